mod debug_report;

use checkscan::{
    Check, Options, Range, RuleSystem, ScanMatch, ScanMetrics, UnmappedSkillPolicy, convert_check_with,
    format_display, inline_code, parse_loose, parse_structured, scan_document_verbose, scan_structured,
};
use clap::{Parser, ValueEnum};
use serde::Serialize;
use std::io::{self, IsTerminal, Read};
use std::process::ExitCode;
use tracing::warn;
use tracing_subscriber::EnvFilter;

/// Find and convert skill checks in tabletop-RPG text.
#[derive(Parser, Debug)]
#[command(name = "checkscan", version)]
#[command(about = "Find, parse and convert skill checks such as \"DC 15 Diplomacy\" or @Check[will|dc:15]")]
#[command(after_help = "Exit codes:\n  0  Success.\n  1  Internal error.\n  2  Invalid arguments or missing input.")]
struct Cli {
    /// Rule system the text is written in (legacy or modern)
    #[arg(long, default_value = "modern")]
    system: RuleSystem,

    /// What to do with the input
    #[arg(long, value_enum, default_value_t = Mode::Scan)]
    mode: Mode,

    /// Character level; enables classification and conversion of legacy checks
    #[arg(long, value_parser = clap::value_parser!(i32).range(1..=20))]
    level: Option<i32>,

    /// Drop Lore from converted skill lists
    #[arg(long)]
    exclude_lore: bool,

    /// Keep legacy skills that have no modern translation
    #[arg(long)]
    keep_unmapped: bool,

    /// Print the findings as JSON instead of the report
    #[arg(long)]
    json: bool,

    /// Force ANSI color output
    #[arg(long, conflicts_with = "no_color")]
    color: bool,

    /// Disable ANSI color output
    #[arg(long)]
    no_color: bool,

    /// Debug-level logging on stderr
    #[arg(long, short = 'v')]
    verbose: bool,

    /// Input text; if omitted, reads the trailing arguments or stdin
    #[arg(long, short = 'i', conflicts_with = "text")]
    input: Option<String>,

    #[arg(trailing_var_arg = true, value_name = "TEXT")]
    text: Vec<String>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
enum Mode {
    /// Find natural-language checks
    Scan,
    /// Find strict @Check[...] checks
    Structured,
    /// Parse the whole input as one check
    Parse,
}

/// One check as the CLI reports it.
#[derive(Debug, Serialize)]
struct Finding {
    text: String,
    range: Range,
    check: Check,
    /// The modern check a legacy one converts to, when a level was given.
    converted: Option<Check>,
    display: Option<String>,
    /// Inline-code `@Check[...]` to write back over `text`.
    replacement: Option<String>,
    /// Why this check could not be converted or rendered.
    error: Option<String>,
}

#[derive(Debug, Serialize)]
struct Report {
    system: RuleSystem,
    mode: Mode,
    level: Option<i32>,
    findings: Vec<Finding>,
    metrics: Option<ScanMetrics>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let input = match read_input(&cli) {
        Ok(input) => input,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::from(2);
        }
    };

    let report = run(&cli, &input);

    if cli.json {
        match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{json}"),
            Err(err) => {
                eprintln!("error: failed to serialize report: {err}");
                return ExitCode::from(1);
            }
        }
    } else {
        let color = !cli.no_color && (cli.color || io::stdout().is_terminal());
        debug_report::print_run(&input, &report, color);
    }
    ExitCode::SUCCESS
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("checkscan=debug")
    } else {
        EnvFilter::try_from_env("CHECKSCAN_LOG").unwrap_or_else(|_| EnvFilter::new("checkscan=warn"))
    };
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).init();
}

fn read_input(cli: &Cli) -> Result<String, String> {
    let input = match (&cli.input, cli.text.is_empty()) {
        (Some(value), _) => value.clone(),
        (None, false) => cli.text.join(" "),
        (None, true) => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer).map_err(|err| format!("error: failed to read stdin: {err}"))?;
            buffer
        }
    };

    if input.trim().is_empty() {
        return Err("error: no input provided (see --help)".to_string());
    }
    Ok(input)
}

fn run(cli: &Cli, input: &str) -> Report {
    let options = Options {
        unmapped_skills: if cli.keep_unmapped { UnmappedSkillPolicy::Keep } else { UnmappedSkillPolicy::Drop },
    };

    let (matches, metrics) = match cli.mode {
        Mode::Scan => {
            let report = scan_document_verbose(input, cli.system);
            (report.matches, Some(report.metrics))
        }
        Mode::Structured => (scan_structured(input), None),
        Mode::Parse => (parse_whole(input, cli.system).into_iter().collect(), None),
    };

    let findings = matches.into_iter().map(|m| finding(m.text, m.range, m.check, cli, &options)).collect();

    Report { system: cli.system, mode: cli.mode, level: cli.level, findings, metrics }
}

/// The whole input as one check: strict when it starts with `@`.
fn parse_whole(input: &str, system: RuleSystem) -> Option<ScanMatch> {
    let trimmed = input.trim();
    let check = if trimmed.starts_with('@') { parse_structured(trimmed)? } else { parse_loose(trimmed, system)? };
    let start = input.len() - input.trim_start().len();
    let range = Range { start, end: start + trimmed.len() };
    Some(ScanMatch { check, text: trimmed.to_owned(), range, line: trimmed.to_owned(), line_range: range })
}

/// A check that cannot be rendered is still reported, with its error, so
/// the rest of the document is unaffected.
fn finding(text: String, range: Range, check: Check, cli: &Cli, options: &Options) -> Finding {
    let mut finding =
        Finding { text, range, check, converted: None, display: None, replacement: None, error: None };
    if let Err(err) = describe(&mut finding, cli, options) {
        warn!(text = %finding.text, error = %err, "check cannot be rendered");
        finding.error = Some(err.to_string());
    }
    finding
}

fn describe(finding: &mut Finding, cli: &Cli, options: &Options) -> checkscan::Result<()> {
    if let (Check::Legacy(_), Some(level)) = (&finding.check, cli.level) {
        finding.converted = Some(convert_check_with(&finding.check, level, cli.exclude_lore, options)?);
    }

    let target = finding.converted.as_ref().unwrap_or(&finding.check);
    finding.display = Some(format_display(target, cli.level)?);
    if let Check::Modern(_) = target {
        finding.replacement = Some(inline_code(target)?);
    }
    Ok(())
}
