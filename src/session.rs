//! Per-execution-context call tracking on top of a spec table
//!
//! The table only answers "should this be traced?". A [`TraceSession`] keeps
//! the call stack of one thread (or event loop) so that `hide_below` can
//! silence everything inside a call's dynamic extent. The session owns no
//! global state: run one session per execution context, all sharing the same
//! `&SpecTable`.
//!
//! Output itself goes through the [`Interceptor`] trait.

use crate::config::OutputOptions;
use crate::decision::Decision;
use crate::table::SpecTable;
use anyhow::{bail, Result};
use std::io::Write;

/// A call or return forwarded to an [`Interceptor`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallEvent<'a> {
    pub identifier: &'a str,
    /// Number of emitted calls still open around this one
    pub depth: usize,
    pub highlight: bool,
}

/// Receiver of trace events that survived the rule table and `hide_below`
pub trait Interceptor {
    fn on_call(&mut self, event: &CallEvent<'_>) -> Result<()>;
    fn on_return(&mut self, event: &CallEvent<'_>) -> Result<()>;
}

#[derive(Debug)]
struct Frame {
    identifier: String,
    decision: Decision,
    emitted: bool,
    emitted_depth: usize,
}

/// Call stack for one execution context
pub struct TraceSession<'t, I> {
    table: &'t SpecTable,
    interceptor: I,
    stack: Vec<Frame>,
    /// Open frames carrying `hide_below`
    hiding: usize,
    /// Open frames that were emitted
    emitted: usize,
}

impl<'t, I: Interceptor> TraceSession<'t, I> {
    pub fn new(table: &'t SpecTable, interceptor: I) -> Self {
        Self {
            table,
            interceptor,
            stack: Vec::new(),
            hiding: 0,
            emitted: 0,
        }
    }

    /// Record entry into `identifier`; returns the decision applied
    pub fn enter(&mut self, identifier: &str) -> Result<Decision> {
        let decision = self.table.decide(identifier);
        let emitted = decision.should_trace && self.hiding == 0;
        let emitted_depth = self.emitted;

        if emitted {
            self.interceptor.on_call(&CallEvent {
                identifier,
                depth: emitted_depth,
                highlight: decision.highlight,
            })?;
            self.emitted += 1;
        }
        if decision.hides_below() {
            self.hiding += 1;
        }

        self.stack.push(Frame {
            identifier: identifier.to_string(),
            decision: decision.clone(),
            emitted,
            emitted_depth,
        });
        Ok(decision)
    }

    /// Record return from the innermost open call
    ///
    /// Returns the identifier of the call that returned, or `None` if no call
    /// was open.
    pub fn exit(&mut self) -> Result<Option<String>> {
        let Some(frame) = self.stack.pop() else {
            tracing::debug!("return with empty call stack ignored");
            return Ok(None);
        };

        if frame.decision.hides_below() {
            self.hiding -= 1;
        }
        if frame.emitted {
            self.emitted -= 1;
            self.interceptor.on_return(&CallEvent {
                identifier: &frame.identifier,
                depth: frame.emitted_depth,
                highlight: frame.decision.highlight,
            })?;
        }
        Ok(Some(frame.identifier))
    }

    /// Number of open calls, emitted or not
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Whether output is currently suppressed by an enclosing `hide_below` call
    pub fn is_hiding(&self) -> bool {
        self.hiding > 0
    }

    /// Feed a recorded call log through the session
    pub fn replay(&mut self, entries: &[CallLogEntry]) -> Result<()> {
        for entry in entries {
            match entry {
                CallLogEntry::Call(identifier) => {
                    self.enter(identifier)?;
                }
                CallLogEntry::Return => {
                    self.exit()?;
                }
            }
        }
        Ok(())
    }

    pub fn interceptor(&self) -> &I {
        &self.interceptor
    }

    pub fn into_interceptor(self) -> I {
        self.interceptor
    }
}

/// One line of a recorded call log
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallLogEntry {
    Call(String),
    Return,
}

/// Parse a call log: `call IDENT` and `return` lines, `#` comments, blank lines
pub fn parse_call_log(content: &str) -> Result<Vec<CallLogEntry>> {
    let mut entries = Vec::new();

    for (lineno, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        match line.split_once(char::is_whitespace) {
            Some(("call", identifier)) if !identifier.trim().is_empty() => {
                entries.push(CallLogEntry::Call(identifier.trim().to_string()));
            }
            None if line == "return" => entries.push(CallLogEntry::Return),
            _ => bail!(
                "Invalid call log line {}: {:?}. Expected `call IDENT` or `return`",
                lineno + 1,
                line
            ),
        }
    }

    Ok(entries)
}

/// Writes indented trace lines
///
/// ```text
/// === tornado.web.Application.__init__ ===
///         + tornado.web.Application.add_handlers
///         - tornado.web.Application.add_handlers
/// - tornado.web.Application.__init__
/// ```
pub struct PrintingInterceptor<W> {
    writer: W,
    indent_unit: String,
    highlight_title_max: usize,
}

impl<W: Write> PrintingInterceptor<W> {
    pub fn new(writer: W, options: &OutputOptions) -> Self {
        Self {
            writer,
            indent_unit: options.indent_unit.clone(),
            highlight_title_max: options.highlight_title_max,
        }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn indent(&self, depth: usize) -> String {
        self.indent_unit.repeat(depth)
    }
}

impl<W: Write> Interceptor for PrintingInterceptor<W> {
    fn on_call(&mut self, event: &CallEvent<'_>) -> Result<()> {
        let indent = self.indent(event.depth);
        if event.highlight {
            let title: String = format!("=== {} ===", event.identifier)
                .chars()
                .take(self.highlight_title_max)
                .collect();
            writeln!(self.writer, "{}{}", indent, title)?;
        } else {
            writeln!(self.writer, "{}+ {}", indent, event.identifier)?;
        }
        Ok(())
    }

    fn on_return(&mut self, event: &CallEvent<'_>) -> Result<()> {
        let indent = self.indent(event.depth);
        writeln!(self.writer, "{}- {}", indent, event.identifier)?;
        Ok(())
    }
}
