//! Legacy -> modern skill mapping.
//!
//! A legacy skill may map onto several modern skills (Knowledge (planes)
//! becomes any of five); order matters because the converter keeps the
//! first occurrence when deduplicating.

use once_cell::sync::Lazy;
use std::collections::HashMap;

const TRANSLATIONS: &[(&str, &[&str])] = &[
    ("Acrobatics", &["Acrobatics"]),
    ("Appraise", &["Society", "Crafting"]),
    ("Bluff", &["Deception"]),
    ("Climb", &["Athletics"]),
    ("Craft", &["Crafting"]),
    ("Diplomacy", &["Diplomacy"]),
    ("Disable Device", &["Thievery"]),
    ("Disguise", &["Deception"]),
    ("Escape Artist", &["Acrobatics"]),
    ("Fly", &["Acrobatics"]),
    ("Handle Animal", &["Nature"]),
    ("Heal", &["Medicine"]),
    ("Intimidate", &["Intimidation"]),
    ("Knowledge (arcana)", &["Arcana"]),
    ("Knowledge (dungeoneering)", &["Lore", "Crafting"]),
    ("Knowledge (engineering)", &["Lore", "Crafting"]),
    ("Knowledge (geography)", &["Lore", "Survival"]),
    ("Knowledge (history)", &["Lore", "Society"]),
    ("Knowledge (local)", &["Lore", "Society"]),
    ("Knowledge (nature)", &["Nature"]),
    ("Knowledge (nobility)", &["Lore", "Society"]),
    ("Knowledge (planes)", &["Lore", "Arcana", "Nature", "Religion", "Occultism"]),
    ("Knowledge (religion)", &["Religion"]),
    ("Linguistics", &["Society"]),
    ("Perception", &["Perception"]),
    ("Perform", &["Performance"]),
    ("Profession", &["Lore"]),
    ("Ride", &["Nature"]),
    ("Sense Motive", &["Perception"]),
    ("Sleight of Hand", &["Thievery", "Deception"]),
    ("Spellcraft", &["Arcana"]),
    ("Stealth", &["Stealth"]),
    ("Survival", &["Survival"]),
    ("Swim", &["Athletics"]),
    ("Use Magic Device", &["Arcana", "Occultism", "Religion", "Nature"]),
    ("Reflex", &["Reflex"]),
    ("Fortitude", &["Fortitude"]),
    ("Will", &["Will"]),
    ("CMB", &["Athletics"]),
    ("Strength", &["Athletics"]),
    ("Dexterity", &["Acrobatics"]),
    ("Constitution", &["Fortitude"]),
    ("Intelligence", &["Society"]),
    ("Wisdom", &["Perception"]),
    ("Charisma", &["Diplomacy"]),
];

// Keyed by lowercase legacy name.
static TRANSLATION_MAP: Lazy<HashMap<String, &'static [&'static str]>> =
    Lazy::new(|| TRANSLATIONS.iter().map(|(from, to)| (from.to_ascii_lowercase(), *to)).collect());

/// Modern equivalents of a legacy skill, matched case-insensitively.
pub(crate) fn lookup(legacy_skill: &str) -> Option<&'static [&'static str]> {
    TRANSLATION_MAP.get(&legacy_skill.to_ascii_lowercase()).copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RuleSystem;
    use crate::rules::Vocabulary;

    #[test]
    fn every_legacy_name_has_a_translation() {
        for name in Vocabulary::for_system(RuleSystem::Legacy).names() {
            assert!(lookup(name).is_some(), "{name} is not mapped");
        }
    }

    #[test]
    fn targets_are_modern_names() {
        let modern = Vocabulary::for_system(RuleSystem::Modern);
        for (from, targets) in TRANSLATIONS {
            assert!(!targets.is_empty(), "{from}");
            for target in *targets {
                assert!(modern.is_known(target), "{from} -> {target}");
            }
        }
    }

    #[test]
    fn lookup_ignores_case() {
        assert_eq!(lookup("sleight of hand"), Some(&["Thievery", "Deception"][..]));
        assert_eq!(lookup("KNOWLEDGE (ARCANA)"), Some(&["Arcana"][..]));
        assert_eq!(lookup("Basket Weaving"), None);
    }
}
