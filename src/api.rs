use crate::conversion::{UnmappedSkillPolicy, convert_difficulty, convert_skill_list};
use crate::engine::{self, ScanMetrics};
use crate::grammar::{loose, structured};
use crate::{Check, CheckError, ModernCheck, Result, RuleSystem, ScanMatch, format};
use serde::Serialize;
use tracing::debug;

/// Options that affect conversion behavior.
#[derive(Debug, Clone, Default)]
pub struct Options {
    /// What happens to a legacy skill with no modern translation.
    pub unmapped_skills: UnmappedSkillPolicy,
}

/// Result from [`scan_document_verbose`].
#[derive(Debug, Clone, Serialize)]
pub struct ScanReport {
    pub system: RuleSystem,
    pub matches: Vec<ScanMatch>,
    pub metrics: ScanMetrics,
}

/// Parse one strict `@Check[...]` check. Surrounding whitespace is ignored;
/// anything else around the check makes this a miss.
///
/// # Example
/// ```
/// use checkscan::parse_structured;
///
/// let check = parse_structured("@Check[fortitude|dc:20|basic]").unwrap();
/// assert_eq!(check.difficulty_class(), Some(20));
/// ```
pub fn parse_structured(text: &str) -> Option<Check> {
    structured::grammar().parse_all(text.trim()).map(Check::Modern)
}

/// Parse one natural-language check, such as `DC 15 Diplomacy`, for the given
/// rule system. Matching is case-insensitive and must cover the whole
/// (trimmed) input.
pub fn parse_loose(text: &str, system: RuleSystem) -> Option<Check> {
    loose::grammar(system).parse_all(&text.trim().to_ascii_lowercase())
}

/// Every natural-language check in `text`, sorted by start offset and never
/// overlapping.
///
/// # Example
/// ```
/// use checkscan::{RuleSystem, scan_document};
///
/// let found = scan_document("Make a DC 15 Diplomacy check.", RuleSystem::Legacy);
/// assert_eq!(found[0].text, "DC 15 Diplomacy");
/// assert_eq!((found[0].start(), found[0].end()), (7, 22));
/// ```
pub fn scan_document(text: &str, system: RuleSystem) -> Vec<ScanMatch> {
    engine::scan_loose(text, system).0
}

/// [`scan_document`] plus the scan's counters and timing.
pub fn scan_document_verbose(text: &str, system: RuleSystem) -> ScanReport {
    let (matches, metrics) = engine::scan_loose(text, system);
    ScanReport { system, matches, metrics }
}

/// Every strict `@Check[...]` in `text`.
pub fn scan_structured(text: &str) -> Vec<ScanMatch> {
    engine::scan_structured(text)
}

/// Convert a legacy check to the modern system at character `level`.
pub fn convert_check(check: &Check, level: i32, exclude_lore: bool) -> Result<Check> {
    convert_check_with(check, level, exclude_lore, &Options::default())
}

pub fn convert_check_with(check: &Check, level: i32, exclude_lore: bool, options: &Options) -> Result<Check> {
    let Check::Legacy(legacy) = check else {
        return Err(CheckError::UnsupportedSystem { operation: "convert", system: check.system() });
    };

    let (skills, adjustments) = convert_skill_list(&legacy.skills, None, exclude_lore, options.unmapped_skills)?;
    let difficulty_class = legacy.difficulty_class.and_then(|dc| convert_difficulty(level, dc));
    debug!(level, from = ?legacy.skills, to = ?skills, ?difficulty_class, "converted check");

    Ok(Check::Modern(ModernCheck { skills, difficulty_class, adjustments: Some(adjustments), ..ModernCheck::default() }))
}

/// Render as a strict `@Check[...]` string. Only modern checks have one.
pub fn format_structured(check: &Check) -> Result<String> {
    format::structured_check(check)
}

/// Render as a phrase (`DC 20 Basic Fortitude`). With a level, modern checks
/// that have a DC get their classification appended.
pub fn format_display(check: &Check, level: Option<i32>) -> Result<String> {
    format::display(check, level)
}

/// Difficulty and proficiency classification of a modern check, e.g.
/// `Hard (+2); Expert`. Without a level only the proficiency is given; without
/// a DC the result is empty.
pub fn classify(check: &Check, level: Option<i32>) -> Result<String> {
    match check {
        Check::Modern(modern) => format::classification(modern, level),
        Check::Legacy(_) => Err(CheckError::UnsupportedSystem { operation: "classify", system: RuleSystem::Legacy }),
    }
}

/// The replacement text written back over a found check: the strict form in
/// a code span.
pub fn inline_code(check: &Check) -> Result<String> {
    Ok(format!("`{}`", format_structured(check)?))
}
