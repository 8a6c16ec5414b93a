//! Turning a governing rule into an instrumentation decision

use crate::rule::{Action, Modifier, Rule};
use crate::table::SpecTable;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// What the instrumentation engine should do with one callable
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision {
    pub should_trace: bool,
    pub highlight: bool,
    pub modifiers: BTreeSet<Modifier>,
}

impl Decision {
    /// The outcome for identifiers no rule governs
    pub fn pass_through() -> Self {
        Self::default()
    }

    /// Whether output for nested calls must be suppressed
    pub fn hides_below(&self) -> bool {
        self.modifiers.contains(&Modifier::HideBelow)
    }

    /// Action equivalent of this decision
    pub fn action(&self) -> Action {
        match (self.should_trace, self.highlight) {
            (true, true) => Action::Highlight,
            (true, false) => Action::Trace,
            _ => Action::Skip,
        }
    }
}

/// Translate the governing rule (or its absence) into a [`Decision`]
pub fn decide(rule: Option<&Rule>) -> Decision {
    let Some(rule) = rule else {
        return Decision::pass_through();
    };

    let (should_trace, highlight) = match rule.action {
        Action::Skip => (false, false),
        Action::Trace => (true, false),
        Action::Highlight => (true, true),
    };

    Decision {
        should_trace,
        highlight,
        modifiers: rule.modifiers.clone(),
    }
}

impl SpecTable {
    /// Decide how to instrument `identifier`
    ///
    /// Total over all inputs: unmatched identifiers get [`Decision::pass_through`].
    pub fn decide(&self, identifier: &str) -> Decision {
        decide(self.lookup(identifier))
    }
}
