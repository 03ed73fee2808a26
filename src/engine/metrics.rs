//! Scan metrics.
//!
//! Collected on every scan (the counters are cheap) and surfaced through
//! `scan_document_verbose` and the CLI's scan report.

use serde::Serialize;
use std::time::Duration;

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct ScanMetrics {
    /// Lines in the document.
    pub lines: usize,
    /// Lines skipped by the trigger pre-scan.
    pub lines_skipped: usize,
    /// Positions where the trie reported a candidate start. Each one costs a
    /// grammar attempt.
    pub candidates: usize,
    /// Matches recorded.
    pub matches: usize,
    /// Wall-clock time of the whole scan.
    pub elapsed: Duration,
}

impl ScanMetrics {
    /// Fraction of grammar attempts that produced a match.
    pub fn hit_rate(&self) -> f64 {
        if self.candidates == 0 { 0.0 } else { self.matches as f64 / self.candidates as f64 }
    }
}
