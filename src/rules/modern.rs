//! Modern-edition vocabulary.

use super::Vocabulary;
use crate::RuleSystem;

pub(crate) const SKILLS: &[&str] = &[
    "Acrobatics",
    "Arcana",
    "Athletics",
    "Crafting",
    "Deception",
    "Diplomacy",
    "Intimidation",
    "Lore",
    "Medicine",
    "Nature",
    "Occultism",
    "Performance",
    "Religion",
    "Society",
    "Stealth",
    "Survival",
    "Thievery",
];

pub(crate) const MISC: &[&str] = &["Reflex", "Fortitude", "Will", "Perception", "Flat"];

pub(crate) const ABBREVIATIONS: &[(&str, &str)] = &[
    ("fort", "Fortitude"),
    ("ref", "Reflex"),
    ("intimidate", "Intimidation"),
    ("craft", "Crafting"),
    ("perform", "Performance"),
];

pub(crate) static VOCABULARY: Vocabulary = Vocabulary {
    system: RuleSystem::Modern,
    skills: SKILLS,
    misc: MISC,
    abbreviations: ABBREVIATIONS,
    knowledge_domains: &[],
};
