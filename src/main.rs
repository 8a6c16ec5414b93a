use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, BufRead, Write};
use tracespec::cli::{Cli, OutputFormat};
use tracespec::config::TraceConfig;
use tracespec::json_output::{JsonDecision, JsonOutput, JsonTableSummary};
use tracespec::session::{parse_call_log, PrintingInterceptor, TraceSession};
use tracespec::table::SpecTable;
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber for debug output
fn init_tracing(debug: bool) {
    if debug {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive(tracing::Level::TRACE.into()),
            )
            .with_writer(std::io::stderr)
            .init();
    }
}

/// Load the rule file, or the builtin table when none is given
fn load_config(args: &Cli) -> Result<TraceConfig> {
    match &args.specs {
        Some(path) => TraceConfig::from_file(path),
        None => TraceConfig::builtin(),
    }
}

/// Print table shape and shadowed rules
fn print_check(table: &SpecTable, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => {
            println!(
                "{} exact rules, {} regex rules, {} shadowed",
                table.exact_rules().len(),
                table.regex_rules().count(),
                table.shadowed().len()
            );
            for warning in table.shadowed() {
                println!("warning: {}", warning);
            }
        }
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&JsonTableSummary::from_table(table))?
            );
        }
    }
    Ok(())
}

/// Print shadowed-rule warnings to stderr
fn report_shadowed(table: &SpecTable) {
    for warning in table.shadowed() {
        eprintln!("warning: {}", warning);
    }
}

/// One tab-separated line: identifier, action, modifiers, governing rule
fn format_decision_line(table: &SpecTable, identifier: &str) -> String {
    let rule = table.lookup(identifier);
    let decision = table.decide(identifier);

    let modifiers = if decision.modifiers.is_empty() {
        "-".to_string()
    } else {
        decision
            .modifiers
            .iter()
            .map(|m| m.to_string())
            .collect::<Vec<_>>()
            .join(",")
    };
    let governing = match rule {
        Some(rule) => format!("#{} {}", rule.index, rule.pattern),
        None => "-".to_string(),
    };

    format!(
        "{}\t{}\t{}\t{}",
        identifier,
        decision.action(),
        modifiers,
        governing
    )
}

fn print_decisions(table: &SpecTable, identifiers: &[String], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => {
            let stdout = io::stdout();
            let mut out = stdout.lock();
            for identifier in identifiers {
                writeln!(out, "{}", format_decision_line(table, identifier))?;
            }
        }
        OutputFormat::Json => {
            let mut output = JsonOutput::new(table);
            for identifier in identifiers {
                output.add_decision(JsonDecision::new(
                    identifier,
                    table.lookup(identifier),
                    &table.decide(identifier),
                ));
            }
            println!("{}", output.to_json()?);
        }
    }
    Ok(())
}

fn read_stdin_identifiers() -> Result<Vec<String>> {
    let mut identifiers = Vec::new();
    for line in io::stdin().lock().lines() {
        let line = line.context("Failed to read identifiers from stdin")?;
        let line = line.trim();
        if !line.is_empty() {
            identifiers.push(line.to_string());
        }
    }
    Ok(identifiers)
}

fn main() -> Result<()> {
    let args = Cli::parse();

    // Initialize tracing if --debug flag is set
    init_tracing(args.debug);

    // The table must be complete before anything is decided
    let config = load_config(&args)?;
    let table = config.build_table().context("Invalid rule table")?;

    if args.check {
        return print_check(&table, args.format);
    }

    report_shadowed(&table);

    if let Some(path) = &args.replay {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let entries = parse_call_log(&content)?;

        let stdout = io::stdout();
        let interceptor = PrintingInterceptor::new(stdout.lock(), &config.output);
        let mut session = TraceSession::new(&table, interceptor);
        session.replay(&entries)?;
        return Ok(());
    }

    let identifiers = if args.identifiers.is_empty() {
        read_stdin_identifiers()?
    } else {
        args.identifiers
    };

    print_decisions(&table, &identifiers, args.format)
}
