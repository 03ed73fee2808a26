#[macro_use]
mod macros;
mod api;
mod conversion;
mod engine;
mod error;
mod format;
mod grammar;
mod rules;
mod text;

pub use api::{
    Options, ScanReport, classify, convert_check, convert_check_with, format_display, format_structured, inline_code,
    parse_loose, parse_structured, scan_document, scan_document_verbose, scan_structured,
};
pub use conversion::{
    DifficultyTier, ProficiencyTier, UnmappedSkillPolicy, convert_difficulty, convert_skill_list, difficulty_delta,
    difficulty_tier, level_based_difficulty, required_proficiency_tier, translate_skill,
};
pub use engine::{PrefixMatch, ScanMetrics, Trie};
pub use error::{CheckError, Result, TrieError};
pub use text::{clean_escapes, parse_level, replace_match};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// --- Data model -------------------------------------------------------------

/// The two supported check vocabularies.
///
/// `Legacy` is the older edition (richer skill list, `half` modifier);
/// `Modern` is the newer edition and the only one with a strict
/// `@Check[...]` form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleSystem {
    Legacy,
    Modern,
}

impl RuleSystem {
    pub fn name(self) -> &'static str {
        match self {
            RuleSystem::Legacy => "legacy",
            RuleSystem::Modern => "modern",
        }
    }
}

impl fmt::Display for RuleSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RuleSystem {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "legacy" | "pf1e" | "1e" => Ok(RuleSystem::Legacy),
            "modern" | "pf2e" | "2e" => Ok(RuleSystem::Modern),
            other => Err(format!("unknown rule system '{other}' (expected legacy or modern)")),
        }
    }
}

/// A check in the legacy system.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegacyCheck {
    /// Canonical skill names, e.g. `"Disable Device"` or `"Knowledge (arcana)"`.
    pub skills: Vec<String>,
    pub difficulty_class: Option<i32>,
    /// The trailing `half` modifier ("Reflex DC 15 half").
    pub halved: bool,
}

/// A check in the modern system.
///
/// `adjustments`, when present, is expected to hold one entry per skill. The
/// parsers do not enforce this; the formatters do.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModernCheck {
    pub skills: Vec<String>,
    pub difficulty_class: Option<i32>,
    pub adjustments: Option<Vec<i32>>,
    pub basic: bool,
    pub defense: Option<String>,
    /// Attributes of the strict format that are syntactically valid but not
    /// modelled, kept verbatim in source order.
    pub unparsed: Vec<String>,
}

/// A parsed check, tagged by the rule system it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "system", rename_all = "lowercase")]
pub enum Check {
    Legacy(LegacyCheck),
    Modern(ModernCheck),
}

impl Check {
    pub fn system(&self) -> RuleSystem {
        match self {
            Check::Legacy(_) => RuleSystem::Legacy,
            Check::Modern(_) => RuleSystem::Modern,
        }
    }

    pub fn skills(&self) -> &[String] {
        match self {
            Check::Legacy(c) => &c.skills,
            Check::Modern(c) => &c.skills,
        }
    }

    pub fn difficulty_class(&self) -> Option<i32> {
        match self {
            Check::Legacy(c) => c.difficulty_class,
            Check::Modern(c) => c.difficulty_class,
        }
    }
}

impl From<LegacyCheck> for Check {
    fn from(check: LegacyCheck) -> Self {
        Check::Legacy(check)
    }
}

impl From<ModernCheck> for Check {
    fn from(check: ModernCheck) -> Self {
        Check::Modern(check)
    }
}

/// Half-open byte range into a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Range {
    /// Start byte index (inclusive).
    pub start: usize,
    /// End byte index (exclusive).
    pub end: usize,
}

impl Range {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn overlaps(&self, other: &Range) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// One check found in a document.
///
/// All offsets are byte offsets. `range` indexes the whole document and
/// `line_range` indexes `line`, so both `document[range]` and
/// `line[line_range]` equal `text`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanMatch {
    pub check: Check,
    /// The original (not lowercased) text that was matched.
    pub text: String,
    pub range: Range,
    /// The full line containing the match, without its line terminator.
    pub line: String,
    pub line_range: Range,
}

impl ScanMatch {
    pub fn start(&self) -> usize {
        self.range.start
    }

    pub fn end(&self) -> usize {
        self.range.end
    }
}
