//! Document scanner.
//!
//! ```text
//! document ── split('\n') ──> line
//!                              │  TriggerInfo::scan       skip lines without "dc" + digit
//!                              │  to_ascii_lowercase      (byte offsets unchanged)
//!                              v
//!                  for each char position i:
//!                    trie.longest_prefix(line, i)?     cheap gate
//!                    loose grammar.parse_at(line, i)?  full parse
//!                      hit  -> record, jump to the end of the match
//!                      miss -> advance one char
//! ```
//!
//! Matches never span lines and never overlap: after a hit the cursor jumps
//! past the consumed text. The result is sorted by start offset by
//! construction; the final sort keeps that true if the loop ever changes.

use super::metrics::ScanMetrics;
use super::trie::Trie;
use super::trigger::TriggerInfo;
use crate::grammar::{loose, structured};
use crate::rules::Vocabulary;
use crate::{Check, Range, RuleSystem, ScanMatch, TrieError};
use once_cell::sync::Lazy;
use std::time::Instant;
use tracing::{debug, trace};

static LEGACY_TRIE: Lazy<Trie<&'static str>> =
    Lazy::new(|| build_trie(RuleSystem::Legacy).expect("legacy vocabulary contains duplicate keys"));
static MODERN_TRIE: Lazy<Trie<&'static str>> =
    Lazy::new(|| build_trie(RuleSystem::Modern).expect("modern vocabulary contains duplicate keys"));

/// Candidate-start trie for `system`: every canonical name, every
/// abbreviation, the `dc` keyword, and `knowledge` where knowledge shorthand
/// exists. Keys are lowercase; values are the canonical names.
pub(crate) fn build_trie(system: RuleSystem) -> Result<Trie<&'static str>, TrieError> {
    let vocab = Vocabulary::for_system(system);
    let mut trie = Trie::new();
    for name in vocab.names() {
        trie.insert(&name.to_ascii_lowercase(), name)?;
    }
    for (abbr, target) in vocab.abbreviations {
        trie.insert(abbr, *target)?;
    }
    if !vocab.knowledge_domains.is_empty() {
        trie.insert("knowledge", "Knowledge")?;
    }
    trie.insert("dc", "DC")?;
    Ok(trie)
}

pub(crate) fn trie_for(system: RuleSystem) -> &'static Trie<&'static str> {
    match system {
        RuleSystem::Legacy => &LEGACY_TRIE,
        RuleSystem::Modern => &MODERN_TRIE,
    }
}

/// One line of the document with its absolute byte offset.
struct Line<'a> {
    text: &'a str,
    offset: usize,
}

/// Split on `\n`, dropping a trailing `\r` from each line.
fn lines(document: &str) -> impl Iterator<Item = Line<'_>> {
    let mut offset = 0;
    document.split('\n').map(move |raw| {
        let line = Line { text: raw.strip_suffix('\r').unwrap_or(raw), offset };
        offset += raw.len() + 1;
        line
    })
}

fn record(check: Check, line: &Line<'_>, start: usize, end: usize) -> ScanMatch {
    ScanMatch {
        check,
        text: line.text[start..end].to_owned(),
        range: Range { start: line.offset + start, end: line.offset + end },
        line: line.text.to_owned(),
        line_range: Range { start, end },
    }
}

/// Find every loose check in `document`.
pub(crate) fn scan_loose(document: &str, system: RuleSystem) -> (Vec<ScanMatch>, ScanMetrics) {
    let started = Instant::now();
    let trie = trie_for(system);
    let grammar = loose::grammar(system);
    let mut metrics = ScanMetrics::default();
    let mut matches = Vec::new();

    for line in lines(document) {
        metrics.lines += 1;
        if !TriggerInfo::scan(line.text).may_hold_loose_check() {
            metrics.lines_skipped += 1;
            continue;
        }

        let lower = line.text.to_ascii_lowercase();
        let mut i = 0;
        while i < lower.len() {
            if trie.longest_prefix(&lower, i).is_some() {
                metrics.candidates += 1;
                if let Some((check, end)) = grammar.parse_at(&lower, i) {
                    if end > i {
                        trace!(start = line.offset + i, end = line.offset + end, text = &line.text[i..end], "match");
                        matches.push(record(check, &line, i, end));
                        i = end;
                        continue;
                    }
                }
            }
            i += lower[i..].chars().next().map_or(1, char::len_utf8);
        }
    }

    matches.sort_by_key(|m: &ScanMatch| m.range.start);
    metrics.matches = matches.len();
    metrics.elapsed = started.elapsed();
    debug!(
        %system,
        lines = metrics.lines,
        lines_skipped = metrics.lines_skipped,
        candidates = metrics.candidates,
        matches = metrics.matches,
        "loose scan finished"
    );
    (matches, metrics)
}

/// Find every strict `@Check[...]` in `document`.
pub(crate) fn scan_structured(document: &str) -> Vec<ScanMatch> {
    let grammar = structured::grammar();
    let mut matches = Vec::new();

    for line in lines(document) {
        let mut cursor = 0;
        for opener in regex!(r"@[Cc]heck\[").find_iter(line.text) {
            if opener.start() < cursor {
                continue;
            }
            if let Some((check, end)) = grammar.parse_at(line.text, opener.start()) {
                trace!(start = line.offset + opener.start(), end = line.offset + end, "structured match");
                matches.push(record(Check::Modern(check), &line, opener.start(), end));
                cursor = end;
            }
        }
    }

    matches.sort_by_key(|m: &ScanMatch| m.range.start);
    debug!(matches = matches.len(), "structured scan finished");
    matches
}
