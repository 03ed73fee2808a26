use crate::{Finding, Report};
use checkscan::{Check, ScanMetrics};

mod ansi {
    pub const RESET: &str = "\x1b[0m";
    pub const DIM: &str = "\x1b[2m";
    pub const BOLD: &str = "\x1b[1m";

    pub const RED: &str = "\x1b[31m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const BLUE: &str = "\x1b[34m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GRAY: &str = "\x1b[90m";

    pub struct Palette {
        enabled: bool,
    }

    impl Palette {
        pub fn new(enabled: bool) -> Self {
            Self { enabled }
        }

        pub fn paint(&self, s: impl AsRef<str>, color: &str) -> String {
            if self.enabled { format!("{}{}{}", color, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }

        pub fn bold(&self, s: impl AsRef<str>) -> String {
            if self.enabled { format!("{}{}{}", BOLD, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }

        pub fn dim(&self, s: impl AsRef<str>) -> String {
            if self.enabled { format!("{}{}{}", DIM, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }
    }
}

const PREVIEW_CHARS: usize = 60;

pub fn print_run(input: &str, report: &Report, color: bool) {
    let palette = ansi::Palette::new(color);
    println!(
        "\n{}",
        palette.bold(palette.paint(format!("⚙  Scanning ({}): \"{}\"", report.system, preview(input)), ansi::CYAN))
    );

    println!("\n{}", palette.paint("━━━ Checks ━━━", ansi::GRAY));
    if report.findings.is_empty() {
        println!("{}", palette.dim("  No checks found"));
        println!("\n{}", palette.paint("Possible reasons:", ansi::YELLOW));
        println!("  • Wrong --system for this text (legacy and modern skill names differ)");
        println!("  • Natural-language checks need both \"DC <number>\" and a known skill");
        println!("  • Strict checks need --mode structured");
    } else {
        for (idx, finding) in report.findings.iter().enumerate() {
            print_finding(idx, finding, &palette);
        }
    }

    if let Some(metrics) = &report.metrics {
        println!("\n{}", palette.paint("━━━ Scan ━━━", ansi::GRAY));
        print_metrics(metrics, &palette);
    }
    println!();
}

fn print_finding(idx: usize, finding: &Finding, palette: &ansi::Palette) {
    println!(
        "  {} {} {} {}",
        palette.paint(format!("[{}]", idx), ansi::GRAY),
        match &finding.display {
            Some(display) => palette.bold(palette.paint(display, ansi::GREEN)),
            None => palette.bold(palette.paint(&finding.text, ansi::YELLOW)),
        },
        palette.dim("│"),
        palette.paint(format!("span {}..{}", finding.range.start, finding.range.end), ansi::YELLOW),
    );
    println!(
        "      {} {}  {} {}",
        palette.dim("text:"),
        palette.paint(&finding.text, ansi::BLUE),
        palette.dim("│ skills:"),
        palette.paint(skills(&finding.check), ansi::CYAN)
    );
    if let Some(converted) = &finding.converted {
        println!("      {} {}", palette.dim("converted:"), palette.paint(skills(converted), ansi::CYAN));
    }
    if let Some(replacement) = &finding.replacement {
        println!("      {} {}", palette.dim("replace with:"), palette.paint(replacement, ansi::GREEN));
    }
    if let Some(error) = &finding.error {
        println!("      {} {}", palette.dim("error:"), palette.paint(error, ansi::RED));
    }
}

fn print_metrics(metrics: &ScanMetrics, palette: &ansi::Palette) {
    println!(
        "  Lines: {}  │  Skipped: {}  │  Candidates: {}  │  Matches: {}",
        palette.paint(metrics.lines.to_string(), ansi::BLUE),
        palette.dim(metrics.lines_skipped.to_string()),
        palette.paint(metrics.candidates.to_string(), ansi::YELLOW),
        palette.paint(metrics.matches.to_string(), ansi::GREEN),
    );
    println!(
        "  Hit rate: {}  │  Total: {}",
        palette.paint(format!("{:.0}%", metrics.hit_rate() * 100.0), ansi::CYAN),
        palette.paint(format!("{:?}", metrics.elapsed), ansi::GREEN),
    );
}

fn skills(check: &Check) -> String {
    if check.skills().is_empty() { "-".to_string() } else { check.skills().join(", ") }
}

/// First line of the input, shortened.
fn preview(input: &str) -> String {
    let line = input.trim().lines().next().unwrap_or_default();
    let mut out: String = line.chars().take(PREVIEW_CHARS).collect();
    if line.chars().count() > PREVIEW_CHARS || input.trim().lines().nth(1).is_some() {
        out.push('…');
    }
    out
}
