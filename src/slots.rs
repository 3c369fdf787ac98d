use crate::record::{AvailabilityWindow, Reservation};
use crate::time::{ClockTime, Slotted};
use chrono::NaiveDate;
use itertools::Itertools;
use log::{debug, trace};
use std::collections::{BTreeMap, BTreeSet, HashSet};

/// Bookable slot starts per date. Dates iterate in calendar order, slots
/// within a date are ascending and never empty.
pub type BookableSlotMap = BTreeMap<NaiveDate, Vec<ClockTime>>;

/// Computes every half-hour slot still open for booking, keyed by date.
///
/// A slot is bookable when its whole span lies in some availability window,
/// no active reservation on the same date occupies it, and its date is
/// strictly after `today`. Windows on `today` itself are never offered.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use lecture_slots::record::{AvailabilityWindow, Reservation};
/// use lecture_slots::slots::compute_bookable_slots;
///
/// let date = NaiveDate::from_ymd_opt(2025, 7, 28).unwrap();
/// let today = NaiveDate::from_ymd_opt(2025, 7, 27).unwrap();
///
/// let availability = vec![AvailabilityWindow::new(
///     date,
///     "10:00".parse().unwrap(),
///     "12:00".parse().unwrap(),
/// )];
/// let reservations = vec![Reservation::new(
///     date,
///     "11:00".parse().unwrap(),
///     "12:00".parse().unwrap(),
/// )];
///
/// let slots = compute_bookable_slots(&availability, &reservations, today);
///
/// assert_eq!(
///     slots[&date].iter().map(|t| t.to_string()).collect::<Vec<_>>(),
///     vec!["10:00", "10:30"]
/// );
/// ```
pub fn compute_bookable_slots(
    availability: &[AvailabilityWindow],
    reservations: &[Reservation],
    today: NaiveDate,
) -> BookableSlotMap {
    let windows_by_date = availability
        .iter()
        .filter(|window| {
            if window.date <= today {
                trace!("Skipping window on {} (today is {})", window.date, today);
                false
            } else {
                true
            }
        })
        .map(|window| (window.date, window.range()))
        .into_group_map();

    let booked_by_date = reservations
        .iter()
        .filter(|reservation| reservation.status.is_active())
        .map(|reservation| (reservation.date, reservation.range()))
        .into_group_map();

    let mut bookable = BookableSlotMap::new();

    for (date, windows) in windows_by_date {
        let candidates: BTreeSet<ClockTime> = windows.iter().slotted();

        let booked = booked_by_date
            .get(&date)
            .map(|ranges| ranges.iter().slotted())
            .unwrap_or_default();

        let open = candidates.difference(&booked).copied().collect_vec();

        if open.is_empty() {
            debug!("No bookable slots left on {}", date);
        } else {
            trace!("{} bookable slots on {}", open.len(), date);
            bookable.insert(date, open);
        }
    }

    bookable
}

/// Lists the end times that can follow `start_time` without crossing a gap
/// in `available_start_times`. An unavailable `start_time` yields no options.
///
/// # Examples
/// ```
/// use lecture_slots::slots::compute_valid_end_times;
/// use lecture_slots::time::ClockTime;
///
/// let t = |s: &str| s.parse::<ClockTime>().unwrap();
/// let available = vec![t("10:00"), t("10:30"), t("11:30")];
///
/// assert_eq!(
///     compute_valid_end_times(t("10:00"), &available),
///     vec![t("10:30"), t("11:00")]
/// );
/// assert!(compute_valid_end_times(t("11:00"), &available).is_empty());
/// ```
pub fn compute_valid_end_times(
    start_time: ClockTime,
    available_start_times: &[ClockTime],
) -> Vec<ClockTime> {
    let available: HashSet<ClockTime> = available_start_times.iter().copied().collect();

    let mut end_times = Vec::new();
    let mut current = start_time;

    while available.contains(&current) {
        match current.next_slot() {
            Some(next) => {
                end_times.push(next);
                current = next;
            }
            None => break,
        }
    }

    end_times
}
