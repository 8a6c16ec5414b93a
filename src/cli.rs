//! CLI argument parsing for tracespec

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for decisions
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Tab-separated text, one identifier per line (default)
    Text,
    /// JSON format for machine parsing
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "tracespec")]
#[command(version)]
#[command(about = "Decide which callables to trace, highlight, or skip", long_about = None)]
pub struct Cli {
    /// Rule file (TOML); defaults to the builtin tornado echo server table
    #[arg(short = 's', long = "specs", value_name = "FILE")]
    pub specs: Option<PathBuf>,

    /// Output format (text or json)
    #[arg(long = "format", value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Validate the rule table, report shadowed rules, and exit
    #[arg(long = "check")]
    pub check: bool,

    /// Replay a call log (`call IDENT` / `return` lines) and print the trace
    #[arg(long = "replay", value_name = "FILE")]
    pub replay: Option<PathBuf>,

    /// Enable debug logging on stderr
    #[arg(long = "debug")]
    pub debug: bool,

    /// Identifiers to decide; read from stdin when omitted
    pub identifiers: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_identifiers() {
        let cli = Cli::parse_from(["tracespec", "select.select", "socket.socket.bind"]);
        assert_eq!(cli.identifiers, vec!["select.select", "socket.socket.bind"]);
        assert!(cli.specs.is_none());
    }

    #[test]
    fn test_cli_empty_without_identifiers() {
        let cli = Cli::parse_from(["tracespec"]);
        assert!(cli.identifiers.is_empty());
        assert!(!cli.check);
        assert!(!cli.debug);
        assert!(matches!(cli.format, OutputFormat::Text));
    }

    #[test]
    fn test_cli_specs_file() {
        let cli = Cli::parse_from(["tracespec", "-s", "rules.toml", "a.b"]);
        assert_eq!(cli.specs, Some(PathBuf::from("rules.toml")));
    }

    #[test]
    fn test_cli_json_format() {
        let cli = Cli::parse_from(["tracespec", "--format", "json", "a.b"]);
        assert!(matches!(cli.format, OutputFormat::Json));
    }

    #[test]
    fn test_cli_replay_and_check() {
        let cli = Cli::parse_from(["tracespec", "--check"]);
        assert!(cli.check);

        let cli = Cli::parse_from(["tracespec", "--replay", "calls.log"]);
        assert_eq!(cli.replay, Some(PathBuf::from("calls.log")));
    }

    #[test]
    fn test_cli_rejects_unknown_format() {
        assert!(Cli::try_parse_from(["tracespec", "--format", "csv"]).is_err());
    }
}
