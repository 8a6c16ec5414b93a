//! Pattern classification and compilation
//!
//! A pattern made only of ASCII alphanumerics, underscores and dots is an
//! exact identifier and is compared literally. Anything else is a regular
//! expression matched against the whole identifier.
//!
//! Patterns are compiled with the `regex` crate. Patterns that need
//! look-around (e.g. `.+[.]__(?!init|call)[^.]+__`) are rejected by it and
//! fall back to `fancy-regex`.

/// How a rule pattern is compared against identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternKind {
    /// Literal string equality
    ExactIdentifier,
    /// Full-string regular expression match
    RegexPattern,
}

/// Classify a pattern by its characters
pub fn classify(pattern: &str) -> PatternKind {
    let is_exact = !pattern.is_empty()
        && pattern
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.');

    if is_exact {
        PatternKind::ExactIdentifier
    } else {
        PatternKind::RegexPattern
    }
}

/// A regex pattern compiled for full-string matching
#[derive(Debug)]
pub enum CompiledPattern {
    /// Finite automaton engine, never fails at match time
    Standard(regex::Regex),
    /// Backtracking engine for look-around patterns
    Backtracking(fancy_regex::Regex),
}

impl CompiledPattern {
    /// Compile `pattern` anchored at both ends
    ///
    /// The bare pattern is validated before anchoring so that text such as
    /// `a)|(b` cannot become valid by closing the wrapper group.
    ///
    /// On failure returns the `regex` crate's diagnostic, which is the more
    /// precise of the two engines for ordinary syntax errors.
    pub fn compile(pattern: &str) -> Result<Self, String> {
        let anchored = format!("^(?:{})$", pattern);

        match regex::Regex::new(pattern) {
            Ok(_) => regex::Regex::new(&anchored)
                .map(Self::Standard)
                .map_err(|e| e.to_string()),
            Err(err) => {
                if fancy_regex::Regex::new(pattern).is_err() {
                    return Err(err.to_string());
                }
                tracing::debug!("pattern {:?} compiled with backtracking engine", pattern);
                fancy_regex::Regex::new(&anchored)
                    .map(Self::Backtracking)
                    .map_err(|e| e.to_string())
            }
        }
    }

    /// Whether the whole `identifier` matches
    ///
    /// A backtracking engine that exceeds its step limit counts as no match.
    pub fn is_full_match(&self, identifier: &str) -> bool {
        match self {
            Self::Standard(re) => re.is_match(identifier),
            Self::Backtracking(re) => match re.is_match(identifier) {
                Ok(matched) => matched,
                Err(e) => {
                    tracing::warn!(
                        "pattern {} gave up on {:?}: {}",
                        re.as_str(),
                        identifier,
                        e
                    );
                    false
                }
            },
        }
    }

    /// Anchored source text as handed to the engine
    pub fn as_str(&self) -> &str {
        match self {
            Self::Standard(re) => re.as_str(),
            Self::Backtracking(re) => re.as_str(),
        }
    }
}
