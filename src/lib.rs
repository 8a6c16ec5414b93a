//! tracespec - Trace specification matching engine
//!
//! This library decides, for a fully-qualified callable identifier such as
//! `tornado.web.RequestHandler.write`, whether an instrumentation engine
//! should trace it, highlight it, or leave it alone. Rules are built once
//! into an immutable [`table::SpecTable`] and then queried lock-free from any
//! number of threads.
//!
//! ```
//! use tracespec::rule::{Action, Rule};
//! use tracespec::table::SpecTable;
//!
//! # fn main() -> Result<(), tracespec::error::ConfigError> {
//! let table = SpecTable::build(vec![
//!     Rule::new(".+", Action::Skip),
//!     Rule::new("a.b.c", Action::Trace),
//! ])?;
//!
//! // Exact rules outrank regex rules listed before them
//! assert!(table.decide("a.b.c").should_trace);
//! assert!(!table.decide("a.b.d").should_trace);
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod decision;
pub mod error;
pub mod json_output;
pub mod pattern;
pub mod rule;
pub mod session;
pub mod table;
