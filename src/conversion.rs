//! Numeric conversion engine.
//!
//! Legacy DCs are converted with a per-level table entry and a shared curve:
//!
//! ```text
//! index  = legacy_dc - entry.source_offset        (must be in 0..=30)
//! modern = CURVE[index] + entry.target_offset
//! ```
//!
//! The same table provides the modern level-based DC (`target_offset + 10`)
//! that the difficulty tiers are measured against.

use crate::rules::translation;
use crate::{CheckError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

const CURVE: [i32; 31] = [0, 1, 2, 3, 4, 5, 6, 6, 7, 7, 8, 8, 9, 9, 10, 10, 10, 11, 11, 12, 12, 13, 13, 14, 14, 15, 16, 17, 18, 19, 20];

/// `(source_offset, target_offset)` for levels 1 through 20.
const LEVEL_TABLE: [(i32, i32); 20] = [
    (-2, 5),
    (-1, 6),
    (0, 8),
    (1, 9),
    (2, 10),
    (3, 12),
    (4, 13),
    (5, 14),
    (6, 16),
    (7, 17),
    (8, 18),
    (9, 20),
    (10, 21),
    (11, 22),
    (12, 24),
    (13, 25),
    (14, 26),
    (15, 28),
    (16, 29),
    (17, 30),
];

const BASE_DIFFICULTY: i32 = 10;

/// The lore skill that `exclude_lore` removes.
const LORE: &str = "Lore";

fn table_entry(level: i32) -> Option<(i32, i32)> {
    let index = usize::try_from(level.checked_sub(1)?).ok()?;
    LEVEL_TABLE.get(index).copied()
}

/// The modern DC a check at `level` is expected to have.
pub fn level_based_difficulty(level: i32) -> Result<i32> {
    let (_, target_offset) = table_entry(level).ok_or(CheckError::InvalidLevel(level))?;
    Ok(target_offset + BASE_DIFFICULTY)
}

/// Convert a legacy DC to a modern one. `None` when the level is unknown or
/// the DC falls outside the curve.
pub fn convert_difficulty(level: i32, legacy_dc: i32) -> Option<i32> {
    let (source_offset, target_offset) = table_entry(level)?;
    let index = usize::try_from(legacy_dc.checked_sub(source_offset)?).ok()?;
    match CURVE.get(index) {
        Some(step) => Some(step + target_offset),
        None => {
            debug!(level, legacy_dc, "difficulty outside the conversion curve");
            None
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ProficiencyTier {
    Untrained,
    Trained,
    Expert,
    Master,
    Legendary,
}

impl ProficiencyTier {
    pub fn label(self) -> &'static str {
        match self {
            ProficiencyTier::Untrained => "Untrained",
            ProficiencyTier::Trained => "Trained",
            ProficiencyTier::Expert => "Expert",
            ProficiencyTier::Master => "Master",
            ProficiencyTier::Legendary => "Legendary",
        }
    }
}

impl fmt::Display for ProficiencyTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The proficiency a character needs to have a fair shot at `dc`.
pub fn required_proficiency_tier(dc: i32) -> ProficiencyTier {
    match dc {
        ..15 => ProficiencyTier::Untrained,
        15..20 => ProficiencyTier::Trained,
        20..30 => ProficiencyTier::Expert,
        30..40 => ProficiencyTier::Master,
        _ => ProficiencyTier::Legendary,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DifficultyTier {
    IncrediblyEasy,
    VeryEasy,
    Easy,
    Average,
    Hard,
    VeryHard,
    IncrediblyHard,
}

impl DifficultyTier {
    pub fn label(self) -> &'static str {
        match self {
            DifficultyTier::IncrediblyEasy => "Incredibly easy",
            DifficultyTier::VeryEasy => "Very easy",
            DifficultyTier::Easy => "Easy",
            DifficultyTier::Average => "Average",
            DifficultyTier::Hard => "Hard",
            DifficultyTier::VeryHard => "Very hard",
            DifficultyTier::IncrediblyHard => "Incredibly hard",
        }
    }

    // Easy side is inclusive (<=), hard side exclusive (<).
    fn from_delta(delta: i32) -> Self {
        match delta {
            ..=-10 => DifficultyTier::IncrediblyEasy,
            -9..=-5 => DifficultyTier::VeryEasy,
            -4..=-2 => DifficultyTier::Easy,
            -1..2 => DifficultyTier::Average,
            2..5 => DifficultyTier::Hard,
            5..10 => DifficultyTier::VeryHard,
            _ => DifficultyTier::IncrediblyHard,
        }
    }
}

impl fmt::Display for DifficultyTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// `dc` minus the level-based DC for `level`.
pub fn difficulty_delta(level: i32, dc: i32) -> Result<i32> {
    dc.checked_sub(level_based_difficulty(level)?).ok_or(CheckError::DifficultyOutOfRange(dc))
}

pub fn difficulty_tier(level: i32, dc: i32) -> Result<DifficultyTier> {
    difficulty_delta(level, dc).map(DifficultyTier::from_delta)
}

/// What to do with a legacy skill that has no modern translation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnmappedSkillPolicy {
    /// Leave it out of the converted list.
    #[default]
    Drop,
    /// Pass it through unchanged.
    Keep,
}

/// Modern equivalents of one legacy skill, in preference order.
pub fn translate_skill(skill: &str, policy: UnmappedSkillPolicy) -> Vec<String> {
    match (translation::lookup(skill), policy) {
        (Some(targets), _) => targets.iter().map(|t| (*t).to_owned()).collect(),
        (None, UnmappedSkillPolicy::Keep) => vec![skill.to_owned()],
        (None, UnmappedSkillPolicy::Drop) => {
            debug!(skill, "no modern translation, dropping skill");
            Vec::new()
        }
    }
}

/// Translate a legacy skill list into modern skills.
///
/// Every translated skill inherits its source skill's adjustment (0 when
/// `adjustments` is `None`). A modern skill reached from several sources is
/// kept once, at its first position, with the lowest adjustment seen.
/// `exclude_lore` removes Lore after deduplication.
pub fn convert_skill_list<S: AsRef<str>>(
    skills: &[S],
    adjustments: Option<&[i32]>,
    exclude_lore: bool,
    policy: UnmappedSkillPolicy,
) -> Result<(Vec<String>, Vec<i32>)> {
    if let Some(adjustments) = adjustments {
        if adjustments.len() != skills.len() {
            return Err(CheckError::AdjustmentMismatch { adjustments: adjustments.len(), skills: skills.len() });
        }
    }

    let mut merged: Vec<(String, i32)> = Vec::new();
    for (i, skill) in skills.iter().enumerate() {
        let adjustment = adjustments.map_or(0, |a| a[i]);
        for target in translate_skill(skill.as_ref(), policy) {
            match merged.iter_mut().find(|(name, _)| *name == target) {
                Some((_, kept)) => *kept = (*kept).min(adjustment),
                None => merged.push((target, adjustment)),
            }
        }
    }

    if exclude_lore {
        merged.retain(|(name, _)| name != LORE);
    }

    Ok(merged.into_iter().unzip())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(1, 15)]
    #[case(3, 18)]
    #[case(10, 27)]
    #[case(20, 40)]
    fn level_based(#[case] level: i32, #[case] expected: i32) {
        assert_eq!(level_based_difficulty(level), Ok(expected));
    }

    #[rstest]
    #[case(0)]
    #[case(21)]
    #[case(-5)]
    #[case(i32::MIN)]
    fn invalid_levels(#[case] level: i32) {
        assert_eq!(level_based_difficulty(level), Err(CheckError::InvalidLevel(level)));
        assert_eq!(convert_difficulty(level, 15), None);
        assert!(difficulty_tier(level, 15).is_err());
    }

    #[rstest]
    #[case(1, -2, Some(5))]
    #[case(1, -3, None)]
    #[case(1, 28, Some(25))]
    #[case(1, 29, None)]
    #[case(20, 28, Some(38))]
    #[case(20, 47, Some(50))]
    #[case(20, 48, None)]
    #[case(5, 15, Some(19))]
    #[case(1, i32::MIN, None)]
    fn converts_difficulty(#[case] level: i32, #[case] legacy: i32, #[case] expected: Option<i32>) {
        assert_eq!(convert_difficulty(level, legacy), expected);
    }

    #[test]
    fn curve_is_monotonic() {
        assert!(CURVE.windows(2).all(|w| w[0] <= w[1]));
        assert!(LEVEL_TABLE.windows(2).all(|w| w[0].0 < w[1].0 && w[0].1 < w[1].1));
    }

    #[rstest]
    #[case(5, ProficiencyTier::Untrained)]
    #[case(14, ProficiencyTier::Untrained)]
    #[case(15, ProficiencyTier::Trained)]
    #[case(19, ProficiencyTier::Trained)]
    #[case(20, ProficiencyTier::Expert)]
    #[case(29, ProficiencyTier::Expert)]
    #[case(30, ProficiencyTier::Master)]
    #[case(39, ProficiencyTier::Master)]
    #[case(40, ProficiencyTier::Legendary)]
    #[case(60, ProficiencyTier::Legendary)]
    fn proficiency_thresholds(#[case] dc: i32, #[case] expected: ProficiencyTier) {
        assert_eq!(required_proficiency_tier(dc), expected);
    }

    // Level 1 expects DC 15.
    #[rstest]
    #[case(5, DifficultyTier::IncrediblyEasy)]
    #[case(6, DifficultyTier::VeryEasy)]
    #[case(10, DifficultyTier::VeryEasy)]
    #[case(11, DifficultyTier::Easy)]
    #[case(13, DifficultyTier::Easy)]
    #[case(14, DifficultyTier::Average)]
    #[case(16, DifficultyTier::Average)]
    #[case(17, DifficultyTier::Hard)]
    #[case(19, DifficultyTier::Hard)]
    #[case(20, DifficultyTier::VeryHard)]
    #[case(24, DifficultyTier::VeryHard)]
    #[case(25, DifficultyTier::IncrediblyHard)]
    fn difficulty_boundaries_at_level_one(#[case] dc: i32, #[case] expected: DifficultyTier) {
        assert_eq!(difficulty_tier(1, dc), Ok(expected));
    }

    #[rstest]
    #[case(1, 12, DifficultyTier::Easy, ProficiencyTier::Untrained)]
    #[case(1, 16, DifficultyTier::Average, ProficiencyTier::Trained)]
    #[case(5, 20, DifficultyTier::Average, ProficiencyTier::Expert)]
    #[case(10, 30, DifficultyTier::Hard, ProficiencyTier::Master)]
    #[case(15, 40, DifficultyTier::VeryHard, ProficiencyTier::Legendary)]
    #[case(20, 35, DifficultyTier::VeryEasy, ProficiencyTier::Master)]
    fn assessment_scenarios(
        #[case] level: i32,
        #[case] dc: i32,
        #[case] difficulty: DifficultyTier,
        #[case] proficiency: ProficiencyTier,
    ) {
        assert_eq!(difficulty_tier(level, dc), Ok(difficulty));
        assert_eq!(required_proficiency_tier(dc), proficiency);
    }

    #[test]
    fn extreme_difficulty_classes_do_not_overflow() {
        assert_eq!(difficulty_delta(1, i32::MIN), Err(CheckError::DifficultyOutOfRange(i32::MIN)));
        assert!(difficulty_tier(1, i32::MIN).is_err());
        assert_eq!(difficulty_tier(1, i32::MAX), Ok(DifficultyTier::IncrediblyHard));
    }

    #[test]
    fn tier_labels() {
        assert_eq!(DifficultyTier::IncrediblyHard.to_string(), "Incredibly hard");
        assert_eq!(ProficiencyTier::Expert.to_string(), "Expert");
    }

    #[test]
    fn translates_single_skills() {
        assert_eq!(translate_skill("Appraise", UnmappedSkillPolicy::Drop), ["Society", "Crafting"]);
        assert_eq!(translate_skill("Knowledge (arcana)", UnmappedSkillPolicy::Drop), ["Arcana"]);
        assert_eq!(translate_skill("Fortitude", UnmappedSkillPolicy::Drop), ["Fortitude"]);
        assert!(translate_skill("Basket Weaving", UnmappedSkillPolicy::Drop).is_empty());
        assert_eq!(translate_skill("Basket Weaving", UnmappedSkillPolicy::Keep), ["Basket Weaving"]);
    }

    #[test]
    fn dedup_keeps_lowest_adjustment() {
        let (skills, adjustments) =
            convert_skill_list(&["Sleight of Hand", "Disguise"], Some(&[3, 1]), false, UnmappedSkillPolicy::Drop)
                .unwrap();
        assert_eq!(skills, ["Thievery", "Deception"]);
        assert_eq!(adjustments, [3, 1]);
    }

    #[test]
    fn dedup_keeps_first_position() {
        let (skills, adjustments) = convert_skill_list(
            &["Knowledge (planes)", "Knowledge (dungeoneering)", "Spellcraft"],
            Some(&[2, 0, -1]),
            false,
            UnmappedSkillPolicy::Drop,
        )
        .unwrap();
        assert_eq!(skills, ["Lore", "Arcana", "Nature", "Religion", "Occultism", "Crafting"]);
        assert_eq!(adjustments, [0, -1, 2, 2, 2, 0]);
    }

    #[test]
    fn exclude_lore_after_dedup() {
        let (skills, adjustments) =
            convert_skill_list(&["Knowledge (history)"], None, true, UnmappedSkillPolicy::Drop).unwrap();
        assert_eq!(skills, ["Society"]);
        assert_eq!(adjustments, [0]);
    }

    #[test]
    fn unmapped_skills_follow_policy() {
        let skills = ["Basket Weaving", "Climb"];
        let (dropped, _) = convert_skill_list(&skills, None, false, UnmappedSkillPolicy::Drop).unwrap();
        assert_eq!(dropped, ["Athletics"]);
        let (kept, _) = convert_skill_list(&skills, None, false, UnmappedSkillPolicy::Keep).unwrap();
        assert_eq!(kept, ["Basket Weaving", "Athletics"]);
    }

    #[test]
    fn mismatched_adjustments_are_rejected() {
        let err = convert_skill_list(&["Climb", "Swim"], Some(&[1]), false, UnmappedSkillPolicy::Drop).unwrap_err();
        assert_eq!(err, CheckError::AdjustmentMismatch { adjustments: 1, skills: 2 });
    }
}
