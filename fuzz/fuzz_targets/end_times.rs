#![no_main]
use libfuzzer_sys::fuzz_target;
use lecture_slots::{compute_valid_end_times, ClockTime};

fuzz_target!(|data: (ClockTime, Vec<ClockTime>)| {
    let (start, available) = data;
    let end_times = compute_valid_end_times(start, &available);

    if !available.contains(&start) {
        assert!(end_times.is_empty(), "End times offered for unavailable {}", start);
        return;
    }

    if start.next_slot().is_some() {
        assert_eq!(end_times.first().copied(), start.next_slot());
    }

    let mut current = start;
    for end in end_times {
        assert!(
            available.contains(&current),
            "{} offered across the gap at {}",
            end,
            current
        );
        assert_eq!(current.next_slot(), Some(end));
        current = end;
    }
});
