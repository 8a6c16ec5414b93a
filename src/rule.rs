//! Trace rules: what to do with a callable whose identifier matches a pattern
//!
//! Rules come in two shapes. [`RuleSpec`] is the raw, undecoded form read
//! from a rule file; [`Rule`] is the validated form a [`crate::table::SpecTable`]
//! is built from. Decoding happens eagerly, so an unknown token fails the
//! build instead of surfacing at lookup time.
//!
//! # Example rule file entry
//!
//! ```toml
//! [[spec]]
//! pattern = ".+[.]parse_request"
//! action = "highlight"
//! modifiers = ["hide_below"]
//! ```

use crate::error::{ConfigError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// What to do with a matched callable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Do not instrument
    Skip,
    /// Instrument with normal output
    Trace,
    /// Instrument with elevated-visibility output
    Highlight,
}

impl Action {
    /// Parse an action token
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "skip" => Some(Self::Skip),
            "trace" => Some(Self::Trace),
            "highlight" => Some(Self::Highlight),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Skip => "skip",
            Self::Trace => "trace",
            Self::Highlight => "highlight",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Extra instructions attached to a rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Modifier {
    /// Suppress output for every call nested in the matched call's dynamic extent
    HideBelow,
}

impl Modifier {
    /// Parse a modifier token
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "hide_below" => Some(Self::HideBelow),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::HideBelow => "hide_below",
        }
    }
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated trace rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    /// Position in the input list (assigned by the table builder)
    pub index: usize,
    pub pattern: String,
    pub action: Action,
    pub modifiers: BTreeSet<Modifier>,
}

impl Rule {
    pub fn new(pattern: impl Into<String>, action: Action) -> Self {
        Self {
            index: 0,
            pattern: pattern.into(),
            action,
            modifiers: BTreeSet::new(),
        }
    }

    /// Add a modifier
    pub fn with_modifier(mut self, modifier: Modifier) -> Self {
        self.modifiers.insert(modifier);
        self
    }

    pub fn has_modifier(&self, modifier: Modifier) -> bool {
        self.modifiers.contains(&modifier)
    }
}

/// Action as written in a rule file: a token, or a boolean shorthand
///
/// `true` means trace and `false` means skip. Any other TOML value is kept
/// as-is so that `decode` can reject it with the rule's position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawAction {
    Flag(bool),
    Token(String),
    Other(toml::Value),
}

impl From<bool> for RawAction {
    fn from(flag: bool) -> Self {
        Self::Flag(flag)
    }
}

impl From<&str> for RawAction {
    fn from(token: &str) -> Self {
        Self::Token(token.to_string())
    }
}

/// A rule as written in a rule file, before validation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleSpec {
    pub pattern: String,
    pub action: RawAction,
    #[serde(default)]
    pub modifiers: Vec<String>,
}

impl RuleSpec {
    pub fn new(pattern: impl Into<String>, action: impl Into<RawAction>) -> Self {
        Self {
            pattern: pattern.into(),
            action: action.into(),
            modifiers: Vec::new(),
        }
    }

    pub fn with_modifier(mut self, token: impl Into<String>) -> Self {
        self.modifiers.push(token.into());
        self
    }

    /// Validate tokens and produce a [`Rule`] for position `index`
    pub fn decode(&self, index: usize) -> Result<Rule> {
        let action = match &self.action {
            RawAction::Flag(true) => Action::Trace,
            RawAction::Flag(false) => Action::Skip,
            RawAction::Token(token) => {
                Action::from_token(token).ok_or_else(|| ConfigError::UnknownAction {
                    index,
                    pattern: self.pattern.clone(),
                    token: token.clone(),
                })?
            }
            RawAction::Other(value) => {
                return Err(ConfigError::InvalidActionType {
                    index,
                    pattern: self.pattern.clone(),
                    found: value.type_str().to_string(),
                })
            }
        };

        let mut modifiers = BTreeSet::new();
        for token in &self.modifiers {
            let modifier =
                Modifier::from_token(token).ok_or_else(|| ConfigError::UnknownModifier {
                    index,
                    pattern: self.pattern.clone(),
                    token: token.clone(),
                })?;
            modifiers.insert(modifier);
        }

        Ok(Rule {
            index,
            pattern: self.pattern.clone(),
            action,
            modifiers,
        })
    }
}
