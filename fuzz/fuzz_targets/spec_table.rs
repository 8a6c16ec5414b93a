#![no_main]

use libfuzzer_sys::fuzz_target;
use tracespec::rule::{Action, Rule};
use tracespec::table::SpecTable;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        // First line is the identifier, the rest are patterns
        let mut lines = input.lines();
        let identifier = lines.next().unwrap_or_default();
        let rules: Vec<Rule> = lines.map(|p| Rule::new(p, Action::Trace)).collect();

        // Building may fail on bad patterns; neither step may panic
        if let Ok(table) = SpecTable::build(rules) {
            let _ = table.decide(identifier);
        }
    }
});
