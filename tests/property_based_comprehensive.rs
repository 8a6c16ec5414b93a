//! Property-based tests for the spec table
//!
//! Core properties:
//! 1. Pattern classification matches the exact-identifier alphabet
//! 2. Exact rules win regardless of position
//! 3. Among regex rules the earliest match wins
//! 4. Lookups are total and deterministic for arbitrary input

use proptest::prelude::*;
use tracespec::decision::Decision;
use tracespec::pattern::{classify, PatternKind};
use tracespec::rule::{Action, Rule};
use tracespec::table::SpecTable;

fn action_strategy() -> impl Strategy<Value = Action> {
    prop_oneof![
        Just(Action::Skip),
        Just(Action::Trace),
        Just(Action::Highlight),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_dotted_identifiers_are_exact(identifier in "[A-Za-z_][A-Za-z0-9_]{0,8}(\\.[A-Za-z_][A-Za-z0-9_]{0,8}){0,4}") {
        prop_assert_eq!(classify(&identifier), PatternKind::ExactIdentifier);
    }

    #[test]
    fn prop_any_other_character_makes_regex(
        prefix in "[a-z.]{0,5}",
        special in "[\\[\\]()+*?|^$ -]",
        suffix in "[a-z.]{0,5}",
    ) {
        let pattern = format!("{}{}{}", prefix, special, suffix);
        prop_assert_eq!(classify(&pattern), PatternKind::RegexPattern);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    #[test]
    fn prop_exact_rule_wins_at_any_position(
        identifier in "[a-z]{1,6}\\.[a-z]{1,6}",
        regex_count in 0usize..6,
        exact_position in 0usize..6,
        exact_action in action_strategy(),
    ) {
        let mut rules: Vec<Rule> = (0..regex_count)
            .map(|_| Rule::new(".+", Action::Skip))
            .collect();
        let position = exact_position.min(rules.len());
        rules.insert(position, Rule::new(identifier.clone(), exact_action));

        let table = SpecTable::build(rules).unwrap();
        let rule = table.lookup(&identifier).unwrap();
        prop_assert_eq!(rule.index, position);
        prop_assert_eq!(rule.action, exact_action);
    }

    #[test]
    fn prop_first_matching_regex_wins(
        actions in prop::collection::vec(action_strategy(), 1..8),
        identifier in "[a-z]{1,6}(\\.[a-z]{1,6}){0,3}",
    ) {
        let rules: Vec<Rule> = actions
            .iter()
            .map(|action| Rule::new("[a-z.]+", *action))
            .collect();

        let table = SpecTable::build(rules).unwrap();
        let rule = table.lookup(&identifier).unwrap();
        prop_assert_eq!(rule.index, 0);
        prop_assert_eq!(rule.action, actions[0]);
    }

    #[test]
    fn prop_lookup_is_total_and_deterministic(identifier in "\\PC{0,40}") {
        let table = SpecTable::build(vec![
            Rule::new(".+[.]__(?!init|call)[^.]+__", Action::Skip),
            Rule::new("socket([.].+)?", Action::Trace),
            Rule::new("select.select", Action::Highlight),
        ])
        .unwrap();

        let first = table.decide(&identifier);
        let second = table.decide(&identifier);
        prop_assert_eq!(&first, &second);
        if table.lookup(&identifier).is_none() {
            prop_assert_eq!(first, Decision::pass_through());
        }
    }
}
