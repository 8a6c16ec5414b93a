//! The spec table: an immutable, partitioned index of trace rules
//!
//! Built once from an ordered rule list, then only read. Exact rules live in
//! a hash map keyed by their literal identifier; regex rules keep their
//! original relative order.
//!
//! # Precedence
//!
//! 1. An exact rule for the identifier always wins, wherever it sat in the
//!    input list relative to regex rules.
//! 2. Otherwise the first regex rule (in input order) that fully matches wins.
//! 3. Otherwise no rule governs the identifier.
//!
//! Among exact rules with the same literal, the first one registered wins and
//! the rest are recorded as [`ShadowedRuleWarning`]s.

use crate::error::{ConfigError, Result, ShadowedRuleWarning};
use crate::pattern::{classify, CompiledPattern, PatternKind};
use crate::rule::{Rule, RuleSpec};
use std::collections::HashMap;

/// Immutable rule registry answering "which rule governs this identifier?"
#[derive(Debug)]
pub struct SpecTable {
    exact: HashMap<String, Rule>,
    regexes: Vec<(CompiledPattern, Rule)>,
    shadowed: Vec<ShadowedRuleWarning>,
}

impl SpecTable {
    /// Build a table from validated rules
    ///
    /// Each rule's `index` is set to its position in `rules`.
    pub fn build(rules: impl IntoIterator<Item = Rule>) -> Result<Self> {
        let mut exact: HashMap<String, Rule> = HashMap::new();
        let mut regexes = Vec::new();
        let mut shadowed = Vec::new();

        for (index, mut rule) in rules.into_iter().enumerate() {
            rule.index = index;

            match classify(&rule.pattern) {
                PatternKind::ExactIdentifier => {
                    if let Some(first) = exact.get(&rule.pattern) {
                        let warning = ShadowedRuleWarning {
                            pattern: rule.pattern.clone(),
                            first_index: first.index,
                            shadowed_index: index,
                        };
                        tracing::warn!("{}", warning);
                        shadowed.push(warning);
                    } else {
                        exact.insert(rule.pattern.clone(), rule);
                    }
                }
                PatternKind::RegexPattern => {
                    let compiled = CompiledPattern::compile(&rule.pattern).map_err(|message| {
                        ConfigError::InvalidPattern {
                            index,
                            pattern: rule.pattern.clone(),
                            message,
                        }
                    })?;
                    regexes.push((compiled, rule));
                }
            }
        }

        tracing::debug!(
            "spec table built: {} exact, {} regex, {} shadowed",
            exact.len(),
            regexes.len(),
            shadowed.len()
        );

        Ok(Self {
            exact,
            regexes,
            shadowed,
        })
    }

    /// Decode raw rule specs and build a table
    ///
    /// Fails on the first rule with an unknown token or a bad pattern.
    pub fn from_specs(specs: &[RuleSpec]) -> Result<Self> {
        let rules = specs
            .iter()
            .enumerate()
            .map(|(index, spec)| spec.decode(index))
            .collect::<Result<Vec<_>>>()?;

        Self::build(rules)
    }

    /// Find the rule governing `identifier`, if any
    pub fn lookup(&self, identifier: &str) -> Option<&Rule> {
        if let Some(rule) = self.exact.get(identifier) {
            return Some(rule);
        }

        self.regexes
            .iter()
            .find(|(pattern, _)| pattern.is_full_match(identifier))
            .map(|(_, rule)| rule)
    }

    /// Number of stored rules (shadowed duplicates excluded)
    pub fn len(&self) -> usize {
        self.exact.len() + self.regexes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Exact rules, ordered by original index
    pub fn exact_rules(&self) -> Vec<&Rule> {
        let mut rules: Vec<&Rule> = self.exact.values().collect();
        rules.sort_by_key(|rule| rule.index);
        rules
    }

    /// Regex rules in original order
    pub fn regex_rules(&self) -> impl Iterator<Item = &Rule> {
        self.regexes.iter().map(|(_, rule)| rule)
    }

    /// Duplicate exact rules dropped during the build, in input order
    pub fn shadowed(&self) -> &[ShadowedRuleWarning] {
        &self.shadowed
    }
}
