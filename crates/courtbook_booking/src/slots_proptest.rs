#[cfg(test)]
mod tests {
    use crate::slots::SlotGrid;
    use chrono::{NaiveDate, Timelike};
    use proptest::prelude::*;

    // Helper strategy for grids that fit at least one slot into the day.
    fn usable_grid() -> impl Strategy<Value = SlotGrid> {
        (15u32..240, 0u32..720).prop_flat_map(|(duration, first)| {
            ((first + duration)..=1440)
                .prop_map(move |last_end| SlotGrid::new(duration, first, last_end))
        })
    }

    fn any_grid() -> impl Strategy<Value = SlotGrid> {
        (0u32..300, 0u32..2000, 0u32..2000)
            .prop_map(|(duration, first, last_end)| SlotGrid::new(duration, first, last_end))
    }

    fn test_day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 12).unwrap()
    }

    proptest! {
        // Starts come out ascending, aligned, and inside the window.
        #[test]
        fn starts_are_ascending_and_on_grid(grid in usable_grid()) {
            let starts = grid.slot_starts_on(test_day());
            prop_assert!(!starts.is_empty(), "a usable grid fits at least one slot");

            let latest = grid.latest_start_minute().expect("usable grid has a latest start");
            let mut previous = None;
            for start in &starts {
                if let Some(prev) = previous {
                    prop_assert!(start > prev, "starts must be strictly ascending");
                    prop_assert_eq!(
                        *start - *prev,
                        grid.duration(),
                        "consecutive starts must be one slot apart"
                    );
                }
                let minute = start.time().hour() * 60 + start.time().minute();
                prop_assert!(minute <= latest, "start {} past the latest start", start);
                previous = Some(start);
            }
        }

        // Every generated start passes validation; shifting a start by any
        // sub-slot offset breaks it.
        #[test]
        fn generator_output_validates(grid in usable_grid(), offset in 1u32..15) {
            for start in grid.slot_starts_on(test_day()) {
                prop_assert!(grid.is_valid_slot_start(start));
                let shifted = start + chrono::Duration::minutes(i64::from(offset));
                if shifted.date() == start.date() {
                    prop_assert!(
                        !grid.is_valid_slot_start(shifted),
                        "start {} shifted by {} minutes should be off-grid",
                        start,
                        offset
                    );
                }
            }
        }

        // Slot count follows directly from the window and duration.
        #[test]
        fn slot_count_matches_window_arithmetic(grid in usable_grid()) {
            let starts = grid.slot_starts_on(test_day());
            let latest = grid.latest_start_minute().unwrap();
            let first_minute = {
                let first = starts[0].time();
                first.hour() * 60 + first.minute()
            };
            let duration = (grid.duration().num_minutes()) as u32;
            let expected = (latest - first_minute) / duration + 1;
            prop_assert_eq!(starts.len() as u32, expected);
        }

        // The today filter only ever removes a prefix: the survivors are a
        // suffix of the full grid, and moving "now" later never adds slots.
        #[test]
        fn today_filter_is_a_monotone_prefix_drop(
            grid in usable_grid(),
            now_minute in 0u32..1440,
            later_by in 0u32..240,
        ) {
            let day = test_day();
            let full = grid.slot_starts_on(day);

            let now = day.and_hms_opt(now_minute / 60, now_minute % 60, 0).unwrap();
            let filtered = grid.slot_starts_from(day, now);
            prop_assert!(
                full.ends_with(&filtered),
                "filtered starts must be a suffix of the full grid"
            );
            for start in &filtered {
                prop_assert!(*start >= now, "kept start {} lies before now {}", start, now);
            }

            let later = now + chrono::Duration::minutes(i64::from(later_by));
            if later.date() == day {
                let filtered_later = grid.slot_starts_from(day, later);
                prop_assert!(
                    filtered_later.len() <= filtered.len(),
                    "a later now must never produce more slots"
                );
            }
        }

        // No grid, however malformed, may panic or emit an invalid start.
        #[test]
        fn arbitrary_grids_never_panic(grid in any_grid(), minute in 0u32..1440) {
            let day = test_day();
            let starts = grid.slot_starts_on(day);
            for start in &starts {
                prop_assert!(grid.is_valid_slot_start(*start));
            }
            let probe = day.and_hms_opt(minute / 60, minute % 60, 0).unwrap();
            // Outcome does not matter, only that the check is total.
            let _ = grid.is_valid_slot_start(probe);
            let _ = grid.slot_end(probe);
        }
    }
}
