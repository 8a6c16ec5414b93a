//! Rule file loading
//!
//! Rule files are TOML. Rules are listed in precedence order as `[[spec]]`
//! tables; an optional `[output]` table tunes the printed trace.
//!
//! # Example tracespec.toml
//!
//! ```toml
//! [output]
//! indent_unit = "    "
//!
//! # Exact rules outrank every regex rule
//! [[spec]]
//! pattern = "select.select"
//! action = "highlight"
//!
//! [[spec]]
//! pattern = ".+[.]parse_request"
//! action = "highlight"
//! modifiers = ["hide_below"]
//!
//! [[spec]]
//! pattern = "select([.].+)?"
//! action = true
//! ```

use crate::error::ConfigError;
use crate::rule::RuleSpec;
use crate::table::SpecTable;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Rule table for the tornado echo server demo
const BUILTIN_SPECS: &str = include_str!("../specs/tornado_echo.toml");

/// Root configuration of a rule file
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TraceConfig {
    /// Rules in precedence order
    #[serde(default)]
    pub spec: Vec<RuleSpec>,

    #[serde(default)]
    pub output: OutputOptions,
}

/// Trace line rendering options
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OutputOptions {
    /// Text repeated once per nesting level
    #[serde(default = "default_indent_unit")]
    pub indent_unit: String,

    /// Maximum characters in a highlight title line
    #[serde(default = "default_highlight_title_max")]
    pub highlight_title_max: usize,
}

fn default_indent_unit() -> String {
    " ".repeat(8)
}

fn default_highlight_title_max() -> usize {
    265
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            indent_unit: default_indent_unit(),
            highlight_title_max: default_highlight_title_max(),
        }
    }
}

impl TraceConfig {
    /// Load a rule file
    ///
    /// ```no_run
    /// use tracespec::config::TraceConfig;
    ///
    /// # fn main() -> anyhow::Result<()> {
    /// let config = TraceConfig::from_file("tracespec.toml")?;
    /// let table = config.build_table()?;
    /// println!("{} rules", table.len());
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        Self::from_toml_str(&content)
            .with_context(|| format!("Failed to load rule file {}", path.display()))
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse TOML")
    }

    /// The rule table shipped for the tornado echo server demo
    pub fn builtin() -> Result<Self> {
        Self::from_toml_str(BUILTIN_SPECS).context("Builtin rule table is malformed")
    }

    /// Decode and index the rules
    pub fn build_table(&self) -> std::result::Result<SpecTable, ConfigError> {
        SpecTable::from_specs(&self.spec)
    }
}
