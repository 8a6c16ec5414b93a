//! JSON output format for decisions and table summaries
//!
//! `--format json` implementation

use crate::decision::Decision;
use crate::error::ShadowedRuleWarning;
use crate::rule::Rule;
use crate::table::SpecTable;
use serde::{Deserialize, Serialize};

/// The rule that governed a decision
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRule {
    /// Position in the rule list
    pub index: usize,
    pub pattern: String,
    /// "skip", "trace" or "highlight"
    pub action: String,
}

/// Decision for one identifier
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonDecision {
    pub identifier: String,
    pub should_trace: bool,
    pub highlight: bool,
    pub modifiers: Vec<String>,
    /// Governing rule (absent when nothing matched)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rule: Option<JsonRule>,
}

impl JsonDecision {
    pub fn new(identifier: &str, rule: Option<&Rule>, decision: &Decision) -> Self {
        Self {
            identifier: identifier.to_string(),
            should_trace: decision.should_trace,
            highlight: decision.highlight,
            modifiers: decision.modifiers.iter().map(|m| m.to_string()).collect(),
            rule: rule.map(|r| JsonRule {
                index: r.index,
                pattern: r.pattern.clone(),
                action: r.action.to_string(),
            }),
        }
    }
}

/// A duplicate exact rule dropped at build time
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonShadowedRule {
    pub pattern: String,
    pub first_index: usize,
    pub shadowed_index: usize,
}

impl From<&ShadowedRuleWarning> for JsonShadowedRule {
    fn from(w: &ShadowedRuleWarning) -> Self {
        Self {
            pattern: w.pattern.clone(),
            first_index: w.first_index,
            shadowed_index: w.shadowed_index,
        }
    }
}

/// Table shape after the build
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonTableSummary {
    pub exact_rules: usize,
    pub regex_rules: usize,
    pub shadowed: Vec<JsonShadowedRule>,
}

impl JsonTableSummary {
    pub fn from_table(table: &SpecTable) -> Self {
        Self {
            exact_rules: table.exact_rules().len(),
            regex_rules: table.regex_rules().count(),
            shadowed: table.shadowed().iter().map(JsonShadowedRule::from).collect(),
        }
    }
}

/// Root JSON output structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonOutput {
    /// Format version identifier
    pub version: String,
    /// Format name
    pub format: String,
    pub table: JsonTableSummary,
    pub decisions: Vec<JsonDecision>,
}

impl JsonOutput {
    pub fn new(table: &SpecTable) -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            format: "tracespec-json-v1".to_string(),
            table: JsonTableSummary::from_table(table),
            decisions: Vec::new(),
        }
    }

    pub fn add_decision(&mut self, decision: JsonDecision) {
        self.decisions.push(decision);
    }

    /// Serialize to pretty-printed JSON
    pub fn to_json(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
