use crate::policy::BookingPolicy;
use crate::record::{AvailabilityWindow, Reservation};
use crate::time::{Slotted, TimeRange};
use chrono::NaiveDate;
use log::debug;
#[cfg(feature = "serde")]
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "camelCase"))]
pub enum ValidationError {
    #[error("Start time must be before end time, got {range}")]
    InvalidRange { range: String },
    #[error("{date} is no longer open (today is {today})")]
    PastDate { date: NaiveDate, today: NaiveDate },
    #[error("{date} {range} is not within the published availability")]
    OutsideAvailability { date: NaiveDate, range: String },
    #[error("{date} {range} overlaps an existing reservation {existing}")]
    ReservationConflict {
        date: NaiveDate,
        range: String,
        existing: String,
    },
    #[error("{range} is outside of operating hours {operating_hours}")]
    OutsideOperatingHours {
        range: String,
        operating_hours: String,
    },
    #[error("{date} {range} overlaps the existing window {existing}")]
    WindowOverlap {
        date: NaiveDate,
        range: String,
        existing: String,
    },
}

/// Checks a requested booking against published availability and the
/// reservations already held, reporting the first rule it breaks.
///
/// The date must be strictly after `today`, every half-hour of the request
/// must be published on that date, and no active reservation may share a slot.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use lecture_slots::record::{AvailabilityWindow, Reservation};
/// use lecture_slots::validate::{validate_booking, ValidationError};
///
/// let date = NaiveDate::from_ymd_opt(2025, 7, 28).unwrap();
/// let today = NaiveDate::from_ymd_opt(2025, 7, 27).unwrap();
/// let availability = vec![AvailabilityWindow::new(
///     date,
///     "10:00".parse().unwrap(),
///     "12:00".parse().unwrap(),
/// )];
/// let reservations = vec![Reservation::new(
///     date,
///     "11:00".parse().unwrap(),
///     "11:30".parse().unwrap(),
/// )];
///
/// let request = Reservation::new(date, "10:00".parse().unwrap(), "11:00".parse().unwrap());
/// assert_eq!(validate_booking(&request, &availability, &reservations, today), Ok(()));
///
/// let request = Reservation::new(date, "10:30".parse().unwrap(), "11:30".parse().unwrap());
/// assert!(matches!(
///     validate_booking(&request, &availability, &reservations, today),
///     Err(ValidationError::ReservationConflict { .. })
/// ));
/// ```
pub fn validate_booking(
    request: &Reservation,
    availability: &[AvailabilityWindow],
    reservations: &[Reservation],
    today: NaiveDate,
) -> Result<(), ValidationError> {
    let range = request.range();
    let date = request.date;

    let result = check_range(range)
        .and_then(|_| {
            if date <= today {
                Err(ValidationError::PastDate { date, today })
            } else {
                Ok(())
            }
        })
        .and_then(|_| {
            let published = availability
                .iter()
                .filter(|window| window.date == date)
                .map(|window| window.range())
                .collect::<Vec<_>>()
                .iter()
                .slotted();

            if range.slots().all(|slot| published.contains(&slot)) {
                Ok(())
            } else {
                Err(ValidationError::OutsideAvailability {
                    date,
                    range: range.to_string(),
                })
            }
        })
        .and_then(|_| {
            match reservations.iter().find(|existing| {
                existing.date == date
                    && existing.status.is_active()
                    && existing.range().overlaps(&range)
            }) {
                Some(existing) => Err(ValidationError::ReservationConflict {
                    date,
                    range: range.to_string(),
                    existing: existing.range().to_string(),
                }),
                None => Ok(()),
            }
        });

    if let Err(error) = &result {
        debug!("Rejected booking: {}", error);
    }

    result
}

/// Checks an availability window a teacher wants to publish.
///
/// Unlike bookings, a window may still be published for `today`. It must lie
/// within the policy's operating hours and may not overlap another window
/// already published on the same date.
pub fn validate_window(
    window: &AvailabilityWindow,
    existing: &[AvailabilityWindow],
    today: NaiveDate,
    policy: &BookingPolicy,
) -> Result<(), ValidationError> {
    let range = window.range();
    let date = window.date;

    check_range(range)?;

    if date < today {
        debug!("Rejected window on past date {}", date);
        return Err(ValidationError::PastDate { date, today });
    }

    if !policy.contains(&range) {
        debug!("Rejected window {} outside of operating hours", range);
        return Err(ValidationError::OutsideOperatingHours {
            range: range.to_string(),
            operating_hours: policy.operating_hours().to_string(),
        });
    }

    if let Some(other) = existing
        .iter()
        .find(|other| other.date == date && other.range().overlaps(&range))
    {
        debug!("Rejected window {} on {}: overlaps {}", range, date, other.range());
        return Err(ValidationError::WindowOverlap {
            date,
            range: range.to_string(),
            existing: other.range().to_string(),
        });
    }

    Ok(())
}

fn check_range(range: TimeRange) -> Result<(), ValidationError> {
    if range.start() < range.end() {
        Ok(())
    } else {
        Err(ValidationError::InvalidRange {
            range: range.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::BookingStatus;
    use crate::time::ClockTime;

    fn t(s: &str) -> ClockTime {
        s.parse().unwrap()
    }

    fn d(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn window(date: &str, start: &str, end: &str) -> AvailabilityWindow {
        AvailabilityWindow::new(d(date), t(start), t(end))
    }

    fn reservation(date: &str, start: &str, end: &str) -> Reservation {
        Reservation::new(d(date), t(start), t(end))
    }

    #[test]
    fn booking_rules_in_order() {
        let today = d("2025-07-27");
        let availability = vec![
            window("2025-07-28", "10:00", "12:00"),
            window("2025-07-28", "12:00", "13:00"),
            window("2025-07-27", "10:00", "12:00"),
        ];
        let reservations = vec![reservation("2025-07-28", "10:00", "10:30")];

        assert_eq!(
            validate_booking(
                &reservation("2025-07-28", "11:00", "11:00"),
                &availability,
                &reservations,
                today
            ),
            Err(ValidationError::InvalidRange {
                range: "11:00-11:00".to_string()
            })
        );
        assert_eq!(
            validate_booking(
                &reservation("2025-07-27", "11:00", "12:00"),
                &availability,
                &reservations,
                today
            ),
            Err(ValidationError::PastDate {
                date: d("2025-07-27"),
                today
            })
        );
        assert_eq!(
            validate_booking(
                &reservation("2025-07-28", "12:30", "13:30"),
                &availability,
                &reservations,
                today
            ),
            Err(ValidationError::OutsideAvailability {
                date: d("2025-07-28"),
                range: "12:30-13:30".to_string()
            })
        );
        assert_eq!(
            validate_booking(
                &reservation("2025-07-28", "10:00", "11:00"),
                &availability,
                &reservations,
                today
            ),
            Err(ValidationError::ReservationConflict {
                date: d("2025-07-28"),
                range: "10:00-11:00".to_string(),
                existing: "10:00-10:30".to_string()
            })
        );
    }

    #[test]
    fn booking_may_span_adjacent_windows() {
        let availability = vec![
            window("2025-07-28", "10:00", "12:00"),
            window("2025-07-28", "12:00", "13:00"),
        ];

        assert_eq!(
            validate_booking(
                &reservation("2025-07-28", "11:30", "12:30"),
                &availability,
                &[],
                d("2025-07-27")
            ),
            Ok(())
        );
    }

    #[test]
    fn cancelled_reservations_free_their_slots() {
        let availability = vec![window("2025-07-28", "10:00", "12:00")];
        let reservations = vec![
            reservation("2025-07-28", "10:00", "11:00").with_status(BookingStatus::Cancelled)
        ];

        assert_eq!(
            validate_booking(
                &reservation("2025-07-28", "10:00", "11:00"),
                &availability,
                &reservations,
                d("2025-07-27")
            ),
            Ok(())
        );
    }

    #[test]
    fn window_rules() {
        let policy = BookingPolicy::default();
        let today = d("2025-07-27");
        let existing = vec![window("2025-07-28", "10:00", "12:00")];

        assert_eq!(
            validate_window(&window("2025-07-27", "13:00", "14:00"), &existing, today, &policy),
            Ok(())
        );
        assert_eq!(
            validate_window(&window("2025-07-28", "12:00", "14:00"), &existing, today, &policy),
            Ok(())
        );
        assert_eq!(
            validate_window(&window("2025-07-26", "13:00", "14:00"), &existing, today, &policy),
            Err(ValidationError::PastDate {
                date: d("2025-07-26"),
                today
            })
        );
        assert_eq!(
            validate_window(&window("2025-07-28", "14:00", "13:00"), &existing, today, &policy),
            Err(ValidationError::InvalidRange {
                range: "14:00-13:00".to_string()
            })
        );
        assert_eq!(
            validate_window(&window("2025-07-29", "19:00", "21:00"), &existing, today, &policy),
            Err(ValidationError::OutsideOperatingHours {
                range: "19:00-21:00".to_string(),
                operating_hours: "10:00-20:00".to_string()
            })
        );
        assert_eq!(
            validate_window(&window("2025-07-28", "11:30", "13:00"), &existing, today, &policy),
            Err(ValidationError::WindowOverlap {
                date: d("2025-07-28"),
                range: "11:30-13:00".to_string(),
                existing: "10:00-12:00".to_string()
            })
        );
    }
}
