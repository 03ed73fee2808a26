//! Legacy-edition vocabulary.

use super::Vocabulary;
use crate::RuleSystem;

pub(crate) const SKILLS: &[&str] = &[
    "Acrobatics",
    "Appraise",
    "Bluff",
    "Climb",
    "Craft",
    "Diplomacy",
    "Disable Device",
    "Disguise",
    "Escape Artist",
    "Fly",
    "Handle Animal",
    "Heal",
    "Intimidate",
    "Knowledge (arcana)",
    "Knowledge (dungeoneering)",
    "Knowledge (engineering)",
    "Knowledge (geography)",
    "Knowledge (history)",
    "Knowledge (local)",
    "Knowledge (nature)",
    "Knowledge (nobility)",
    "Knowledge (planes)",
    "Knowledge (religion)",
    "Linguistics",
    "Perception",
    "Perform",
    "Profession",
    "Ride",
    "Sense Motive",
    "Sleight of Hand",
    "Spellcraft",
    "Stealth",
    "Survival",
    "Swim",
    "Use Magic Device",
];

pub(crate) const MISC: &[&str] = &[
    "Reflex",
    "Fortitude",
    "Will",
    "CMB",
    "Strength",
    "Dexterity",
    "Constitution",
    "Intelligence",
    "Wisdom",
    "Charisma",
];

pub(crate) const ABBREVIATIONS: &[(&str, &str)] = &[("umd", "Use Magic Device"), ("fort", "Fortitude"), ("ref", "Reflex")];

pub(crate) const KNOWLEDGE_DOMAINS: &[&str] = &[
    "arcana",
    "dungeoneering",
    "engineering",
    "geography",
    "history",
    "local",
    "nature",
    "nobility",
    "planes",
    "religion",
];

pub(crate) static VOCABULARY: Vocabulary = Vocabulary {
    system: RuleSystem::Legacy,
    skills: SKILLS,
    misc: MISC,
    abbreviations: ABBREVIATIONS,
    knowledge_domains: KNOWLEDGE_DOMAINS,
};
