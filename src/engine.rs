//! Scanning engine.
//!
//! This module is the entry point for locating checks inside documents.
//!
//! ## How the parts work together
//!
//! ```text
//! vocabulary (rules/) ── build_trie ──> Trie<&str>       (trie.rs, once per system)
//!                                          │
//! document ── lines ── TriggerInfo::scan ──┤             (trigger.rs)
//!                                          v
//!                               scan_loose / scan_structured   (scanner.rs)
//!                                 - trie gate per position
//!                                 - grammar parse (crate::grammar)
//!                                 - non-overlapping ScanMatch records
//!                                          │
//!                                          v
//!                            (Vec<ScanMatch>, ScanMetrics)     (metrics.rs)
//! ```
//!
//! ## Responsibilities by module
//!
//! - `trie.rs`: arena-backed prefix trie with longest-prefix lookup.
//! - `trigger.rs`: per-line bucket scan that lets the scanner skip lines that
//!   cannot hold a loose check.
//! - `scanner.rs`: the scanning loops for both notations.
//! - `metrics.rs`: counters and timing for one scan.
//!
//! ## Debugging
//!
//! The scanner emits `tracing` events: one `debug` summary per scan and a
//! `trace` event per match. The CLI shows them with `CHECKSCAN_LOG=checkscan=trace`.

#[path = "engine/metrics.rs"]
mod metrics;
#[path = "engine/scanner.rs"]
mod scanner;
#[path = "engine/trie.rs"]
mod trie;
#[path = "engine/trigger.rs"]
mod trigger;

pub use metrics::ScanMetrics;
pub(crate) use scanner::{scan_loose, scan_structured};
pub use trie::{PrefixMatch, Trie};
