//! Formatter.
//!
//! Two renderings of a check: the strict `@Check[...]` string (modern only)
//! and a human-readable phrase such as `DC 20 Basic Fortitude`.

use crate::conversion::{difficulty_delta, difficulty_tier, required_proficiency_tier};
use crate::{Check, CheckError, LegacyCheck, ModernCheck, Result, RuleSystem};

fn check_skills(skills: &[String], adjustments: Option<&[i32]>) -> Result<()> {
    if skills.is_empty() {
        return Err(CheckError::EmptySkills);
    }
    match adjustments {
        Some(list) if list.len() != skills.len() => {
            Err(CheckError::AdjustmentMismatch { adjustments: list.len(), skills: skills.len() })
        }
        _ => Ok(()),
    }
}

/// First letter upper case, the rest lower case.
fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

fn signed(n: i32) -> String {
    if n >= 0 { format!("+{n}") } else { n.to_string() }
}

/// `@Check[skill,skill|dc:N|defense:x|adjustment:a,b|basic|...]`.
pub(crate) fn structured(check: &ModernCheck) -> Result<String> {
    check_skills(&check.skills, check.adjustments.as_deref())?;

    let mut parts = vec![check.skills.iter().map(|s| s.to_lowercase()).collect::<Vec<_>>().join(",")];
    if let Some(dc) = check.difficulty_class {
        parts.push(format!("dc:{dc}"));
    }
    if let Some(defense) = &check.defense {
        parts.push(format!("defense:{}", defense.to_lowercase()));
    }
    if let Some(list) = check.adjustments.as_deref().filter(|l| l.iter().any(|a| *a != 0)) {
        let list: Vec<String> = list.iter().map(i32::to_string).collect();
        parts.push(format!("adjustment:{}", list.join(",")));
    }
    if check.basic {
        parts.push("basic".to_owned());
    }
    parts.extend(check.unparsed.iter().cloned());

    Ok(format!("@Check[{}]", parts.join("|")))
}

pub(crate) fn structured_check(check: &Check) -> Result<String> {
    match check {
        Check::Modern(modern) => structured(modern),
        Check::Legacy(_) => {
            Err(CheckError::UnsupportedSystem { operation: "format as @Check", system: RuleSystem::Legacy })
        }
    }
}

fn display_modern(check: &ModernCheck) -> Result<String> {
    check_skills(&check.skills, check.adjustments.as_deref())?;

    let mut parts = Vec::new();
    if let Some(dc) = check.difficulty_class {
        parts.push(format!("DC {dc}"));
    }
    if check.basic {
        parts.push("Basic".to_owned());
    }

    let skills: Vec<String> = check
        .skills
        .iter()
        .enumerate()
        .map(|(i, skill)| match check.adjustments.as_ref().map(|a| a[i]) {
            Some(adj) if adj != 0 => format!("{} ({})", capitalize(skill), signed(adj)),
            _ => capitalize(skill),
        })
        .collect();
    parts.push(skills.join(" or "));

    if let Some(defense) = &check.defense {
        let defense = if defense.eq_ignore_ascii_case("ac") { "AC".to_owned() } else { capitalize(defense) };
        parts.push(format!("vs {defense}"));
    }

    Ok(parts.join(" "))
}

fn display_legacy(check: &LegacyCheck) -> String {
    let mut parts = Vec::new();
    if let Some(dc) = check.difficulty_class {
        parts.push(format!("DC {dc}"));
    }
    parts.push(check.skills.iter().map(|s| capitalize(s)).collect::<Vec<_>>().join(" or "));
    if check.halved {
        parts.push("Half".to_owned());
    }
    parts.join(" ")
}

/// `"Hard (+2); Expert"`. Parts that cannot be computed are left out.
pub(crate) fn classification(check: &ModernCheck, level: Option<i32>) -> Result<String> {
    let Some(dc) = check.difficulty_class else { return Ok(String::new()) };

    let mut parts = Vec::new();
    if let Some(level) = level {
        let tier = difficulty_tier(level, dc)?;
        parts.push(format!("{tier} ({})", signed(difficulty_delta(level, dc)?)));
    }
    parts.push(required_proficiency_tier(dc).to_string());
    Ok(parts.join("; "))
}

/// Human-readable phrase. With a level, a modern check with a DC gets its
/// classification appended in parentheses.
pub(crate) fn display(check: &Check, level: Option<i32>) -> Result<String> {
    match check {
        Check::Legacy(legacy) => Ok(display_legacy(legacy)),
        Check::Modern(modern) => {
            let phrase = display_modern(modern)?;
            match level {
                Some(_) if modern.difficulty_class.is_some() => {
                    Ok(format!("{phrase} ({})", classification(modern, level)?))
                }
                _ => Ok(phrase),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn modern(skills: &[&str]) -> ModernCheck {
        ModernCheck { skills: skills.iter().map(|s| s.to_string()).collect(), ..ModernCheck::default() }
    }

    #[test]
    fn structured_orders_clauses() {
        let check = ModernCheck {
            difficulty_class: Some(20),
            adjustments: Some(vec![0, -2]),
            basic: true,
            defense: Some("Perception".into()),
            unparsed: vec!["traits:action:long-jump".into()],
            ..modern(&["Crafting", "thievery"])
        };
        assert_eq!(
            structured(&check).unwrap(),
            "@Check[crafting,thievery|dc:20|defense:perception|adjustment:0,-2|basic|traits:action:long-jump]"
        );
    }

    #[rstest]
    #[case(None)]
    #[case(Some(vec![0, 0]))]
    fn structured_omits_zero_adjustments(#[case] adjustments: Option<Vec<i32>>) {
        let check = ModernCheck { difficulty_class: Some(20), adjustments, ..modern(&["arcana", "occultism"]) };
        assert_eq!(structured(&check).unwrap(), "@Check[arcana,occultism|dc:20]");
    }

    #[test]
    fn structured_rejects_mismatch_and_legacy() {
        let check = ModernCheck { adjustments: Some(vec![1]), ..modern(&["a", "b"]) };
        assert_eq!(structured(&check), Err(CheckError::AdjustmentMismatch { adjustments: 1, skills: 2 }));

        let legacy = Check::Legacy(LegacyCheck::default());
        assert!(matches!(structured_check(&legacy), Err(CheckError::UnsupportedSystem { .. })));
    }

    #[rstest]
    #[case(ModernCheck { difficulty_class: Some(20), basic: true, ..modern(&["fortitude"]) }, "DC 20 Basic Fortitude")]
    #[case(ModernCheck { difficulty_class: Some(4), ..modern(&["flat"]) }, "DC 4 Flat")]
    #[case(ModernCheck { difficulty_class: Some(20), ..modern(&["arcana", "occultism"]) }, "DC 20 Arcana or Occultism")]
    #[case(
        ModernCheck { difficulty_class: Some(20), adjustments: Some(vec![0, -2]), ..modern(&["crafting", "thievery"]) },
        "DC 20 Crafting or Thievery (-2)"
    )]
    #[case(ModernCheck { adjustments: Some(vec![3]), ..modern(&["stealth"]) }, "Stealth (+3)")]
    #[case(ModernCheck { defense: Some("perception".into()), ..modern(&["deception"]) }, "Deception vs Perception")]
    #[case(ModernCheck { defense: Some("ac".into()), ..modern(&["athletics"]) }, "Athletics vs AC")]
    fn display_phrases(#[case] check: ModernCheck, #[case] expected: &str) {
        assert_eq!(display(&Check::Modern(check), None).unwrap(), expected);
    }

    #[test]
    fn checks_without_skills_are_rejected() {
        let check = ModernCheck { difficulty_class: Some(18), adjustments: Some(vec![]), ..modern(&[]) };
        assert_eq!(structured(&check), Err(CheckError::EmptySkills));
        assert_eq!(display(&Check::Modern(check), None), Err(CheckError::EmptySkills));
    }

    #[test]
    fn display_rejects_mismatch() {
        let check = ModernCheck { adjustments: Some(vec![1, 2]), ..modern(&["stealth"]) };
        assert!(display(&Check::Modern(check), None).is_err());
    }

    #[test]
    fn display_legacy_checks() {
        let check = LegacyCheck { skills: vec!["Reflex".into()], difficulty_class: Some(15), halved: true };
        assert_eq!(display(&Check::Legacy(check), Some(3)).unwrap(), "DC 15 Reflex Half");

        let check = LegacyCheck {
            skills: vec!["Linguistics".into(), "Knowledge (arcana)".into()],
            difficulty_class: Some(15),
            halved: false,
        };
        assert_eq!(display(&Check::Legacy(check), None).unwrap(), "DC 15 Linguistics or Knowledge (arcana)");
    }

    #[test]
    fn classification_strings() {
        let check = ModernCheck { difficulty_class: Some(17), ..modern(&["stealth"]) };
        assert_eq!(classification(&check, Some(1)).unwrap(), "Hard (+2); Trained");
        assert_eq!(classification(&check, None).unwrap(), "Trained");

        let check = ModernCheck { difficulty_class: Some(12), ..modern(&["stealth"]) };
        assert_eq!(classification(&check, Some(1)).unwrap(), "Easy (-3); Untrained");

        let check = ModernCheck { difficulty_class: Some(15), ..modern(&["stealth"]) };
        assert_eq!(classification(&check, Some(1)).unwrap(), "Average (+0); Trained");

        assert_eq!(classification(&modern(&["stealth"]), Some(1)).unwrap(), "");
        assert!(classification(&check, Some(99)).is_err());
    }

    #[test]
    fn display_with_level_appends_classification() {
        let check = Check::Modern(ModernCheck { difficulty_class: Some(17), ..modern(&["stealth"]) });
        assert_eq!(display(&check, Some(1)).unwrap(), "DC 17 Stealth (Hard (+2); Trained)");
        let check = Check::Modern(modern(&["stealth"]));
        assert_eq!(display(&check, Some(1)).unwrap(), "Stealth");
    }
}
