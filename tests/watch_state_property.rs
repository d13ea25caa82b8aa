// tests/watch_state_property.rs

use proptest::prelude::*;
use nodeharness::watch::{ScanStep, WatchBudget, WatchState};

// Lines are drawn from a tiny alphabet so that keyword hits are common.
fn lines_strategy() -> impl Strategy<Value = Vec<String>> {
    proptest::collection::vec(
        prop_oneof![
            Just("noise".to_string()),
            Just("ready".to_string()),
            Just("ready ready".to_string()),
            Just(String::new()),
        ],
        0..60,
    )
}

proptest! {
    #[test]
    fn counters_stay_within_budget_and_never_decrease(
        line_limit in 1usize..8,
        required in 1usize..5,
        lines in lines_strategy(),
    ) {
        let budget = WatchBudget::new(line_limit, required).unwrap();
        let mut state = WatchState::new();
        let mut prev = state;

        for line in &lines {
            let step = state.observe(&budget, "ready", line);

            prop_assert!(state.lines_consumed() >= prev.lines_consumed());
            prop_assert!(state.matches_seen() >= prev.matches_seen());
            prop_assert!(state.lines_consumed() <= budget.max_lines());
            prop_assert!(state.matches_seen() <= required);

            if step == ScanStep::Matched {
                prop_assert_eq!(state.matches_seen(), required);
            }
            prev = state;
        }
    }

    #[test]
    fn verdict_matches_a_direct_count(
        line_limit in 1usize..8,
        required in 1usize..5,
        lines in lines_strategy(),
    ) {
        let budget = WatchBudget::new(line_limit, required).unwrap();
        let mut state = WatchState::new();
        let mut matched = false;

        for line in &lines {
            if !state.has_budget(&budget) {
                break;
            }
            if state.observe(&budget, "ready", line) == ScanStep::Matched {
                matched = true;
                break;
            }
        }

        let window = lines.iter().take(budget.max_lines());
        let hits = window.filter(|l| l.contains("ready")).count();
        prop_assert_eq!(matched, hits >= required);
    }
}
