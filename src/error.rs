//! Errors and warnings raised while building a spec table
//!
//! Every failure happens at build time. Lookups never fail.

use std::fmt;
use thiserror::Error;

/// Fatal configuration error: the rule list cannot be turned into a table
///
/// Each variant names the offending rule by its position in the input list
/// and by its pattern text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("rule #{index} ({pattern:?}): invalid regular expression: {message}")]
    InvalidPattern {
        index: usize,
        pattern: String,
        message: String,
    },

    #[error("rule #{index} ({pattern:?}): unknown action {token:?} (expected trace, skip or highlight)")]
    UnknownAction {
        index: usize,
        pattern: String,
        token: String,
    },

    #[error("rule #{index} ({pattern:?}): action must be a string or boolean, found {found}")]
    InvalidActionType {
        index: usize,
        pattern: String,
        found: String,
    },

    #[error("rule #{index} ({pattern:?}): unknown modifier {token:?} (expected hide_below)")]
    UnknownModifier {
        index: usize,
        pattern: String,
        token: String,
    },
}

impl ConfigError {
    /// Index of the offending rule in the input list
    pub fn index(&self) -> usize {
        match self {
            Self::InvalidPattern { index, .. }
            | Self::UnknownAction { index, .. }
            | Self::InvalidActionType { index, .. }
            | Self::UnknownModifier { index, .. } => *index,
        }
    }

    /// Pattern text of the offending rule
    pub fn pattern(&self) -> &str {
        match self {
            Self::InvalidPattern { pattern, .. }
            | Self::UnknownAction { pattern, .. }
            | Self::InvalidActionType { pattern, .. }
            | Self::UnknownModifier { pattern, .. } => pattern,
        }
    }
}

/// Result type for table construction
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Non-fatal: an exact rule repeats a literal that an earlier rule already claimed
///
/// The earlier rule stays authoritative; the later one is dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShadowedRuleWarning {
    pub pattern: String,
    pub first_index: usize,
    pub shadowed_index: usize,
}

impl fmt::Display for ShadowedRuleWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "rule #{} ({:?}) is shadowed by rule #{} with the same exact pattern",
            self.shadowed_index, self.pattern, self.first_index
        )
    }
}
