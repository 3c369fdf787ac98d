#![no_main]
use chrono::{Days, NaiveDate};
use libfuzzer_sys::fuzz_target;
use lecture_slots::{compute_bookable_slots, AvailabilityWindow, Reservation, TimeRange};

fuzz_target!(|data: (Vec<AvailabilityWindow>, Vec<Reservation>, u8)| {
    #[cfg(feature = "log")]
    let _ = fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{}][{}] {}",
                record.target(),
                record.level(),
                message
            ))
        })
        .level(log::LevelFilter::Trace)
        .chain(std::io::stdout())
        .apply();

    let (availability, reservations, today_offset) = data;
    let today = NaiveDate::from_ymd_opt(2025, 6, 25)
        .and_then(|d| d.checked_add_days(Days::new(u64::from(today_offset % 40))))
        .unwrap();

    let slots = compute_bookable_slots(&availability, &reservations, today);

    for (date, open) in slots.iter() {
        assert!(*date > today, "Returned {} on or before today {}", date, today);
        assert!(!open.is_empty(), "Empty entry for {}", date);
        assert!(
            open.windows(2).all(|pair| pair[0] < pair[1]),
            "Slots on {} are not strictly ascending: {:?}",
            date,
            open
        );

        for slot in open {
            let span = TimeRange::new(*slot, slot.next_slot().unwrap());

            assert!(
                availability
                    .iter()
                    .any(|w| w.date == *date && w.range().contains(&span)),
                "Slot {} on {} is not within availability",
                slot,
                date
            );
            assert!(
                !reservations.iter().any(|r| r.date == *date
                    && r.status.is_active()
                    && r.range().overlaps(&span)),
                "Slot {} on {} overlaps a reservation",
                slot,
                date
            );
        }
    }

    let mut shuffled_availability = availability.clone();
    shuffled_availability.reverse();
    let mut shuffled_reservations = reservations.clone();
    shuffled_reservations.reverse();

    assert_eq!(
        compute_bookable_slots(&shuffled_availability, &shuffled_reservations, today),
        slots,
        "Result depends on input order"
    );
});
