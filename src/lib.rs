pub mod calendar;
pub mod policy;
pub mod record;
pub mod slots;
pub mod time;
pub mod validate;
#[cfg(feature = "wasm")]
pub mod wasm;

pub use calendar::{date_key, month_week, week_dates, week_of_month, MonthWeek, WeekDate};
pub use policy::{BookingPolicy, PolicyError};
pub use record::{AvailabilityWindow, BookingStatus, Reservation};
pub use slots::{compute_bookable_slots, compute_valid_end_times, BookableSlotMap};
pub use time::{ClockTime, ParseError, TimeRange};
pub use validate::{validate_booking, validate_window, ValidationError};

#[cfg(test)]
mod tests {
    use crate::{
        compute_bookable_slots, compute_valid_end_times, week_dates, AvailabilityWindow,
        ClockTime, Reservation,
    };
    use chrono::NaiveDate;

    fn t(s: &str) -> ClockTime {
        s.parse().unwrap()
    }

    fn times(slots: &[&str]) -> Vec<ClockTime> {
        slots.iter().map(|s| t(s)).collect()
    }

    fn d(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn books_a_lecture_through_the_week_view() {
        let today = d("2025-07-30");
        let week = week_dates(0, today).unwrap();

        let availability = vec![
            AvailabilityWindow::new(d("2025-07-29"), t("10:00"), t("12:00")),
            AvailabilityWindow::new(d("2025-07-30"), t("10:00"), t("12:00")),
            AvailabilityWindow::new(d("2025-07-31"), t("10:00"), t("12:00")),
            AvailabilityWindow::new(d("2025-08-02"), t("14:00"), t("16:00")),
        ];
        let reservations = vec![
            Reservation::new(d("2025-07-31"), t("10:30"), t("11:00")),
            Reservation::new(d("2025-08-02"), t("14:00"), t("15:00")),
        ];

        let slots = compute_bookable_slots(&availability, &reservations, today);

        // Days the week view greys out never carry slots
        for day in week.iter().filter(|day| day.is_past) {
            assert!(!slots.contains_key(&day.date));
        }

        assert_eq!(slots[&d("2025-07-31")], times(&["10:00", "11:00", "11:30"]));
        assert_eq!(slots[&d("2025-08-02")], times(&["15:00", "15:30"]));

        let thursday = &slots[&d("2025-07-31")];
        assert_eq!(compute_valid_end_times(t("10:00"), thursday), times(&["10:30"]));
        assert_eq!(
            compute_valid_end_times(t("11:00"), thursday),
            times(&["11:30", "12:00"])
        );
        assert!(compute_valid_end_times(t("10:30"), thursday).is_empty());
    }

    #[test]
    fn chosen_end_times_stay_bookable() {
        let today = d("2025-07-27");
        let availability = vec![AvailabilityWindow::new(d("2025-07-28"), t("10:00"), t("13:00"))];
        let reservations = vec![Reservation::new(d("2025-07-28"), t("11:30"), t("12:00"))];

        let slots = compute_bookable_slots(&availability, &reservations, today);
        let open = &slots[&d("2025-07-28")];

        for start in open {
            for end in compute_valid_end_times(*start, open) {
                let request = Reservation::new(d("2025-07-28"), *start, end);
                assert_eq!(
                    crate::validate_booking(&request, &availability, &reservations, today),
                    Ok(()),
                    "{} - {}",
                    start,
                    end
                );
            }
        }
    }
}
