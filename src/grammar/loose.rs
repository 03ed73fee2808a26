//! Grammar for natural-language checks ("DC 15 Diplomacy", "Stealth DC 20").
//!
//! Input must already be ASCII-lowercased; the produced skill names are the
//! canonical display names from the vocabulary.
//!
//! ```text
//! check      = dc skills | skills dc        (tried in that order)
//!              [ "half" ]                    (legacy only)
//! dc         = "dc" digits
//! skills     = skill ( sep skill )*
//! sep        = " or " | ", or " | ","
//! skill      = longest( knowledge-form | canonical name | abbreviation )
//! ```

use super::combinators::{Grammar, alt, boundary, literal, longest, number, optional_whitespace, seq2, whitespace};
use crate::rules::Vocabulary;
use crate::{Check, LegacyCheck, ModernCheck, RuleSystem};
use once_cell::sync::Lazy;

static LEGACY: Lazy<Grammar<Check>> = Lazy::new(|| build(Vocabulary::for_system(RuleSystem::Legacy)));
static MODERN: Lazy<Grammar<Check>> = Lazy::new(|| build(Vocabulary::for_system(RuleSystem::Modern)));

pub(crate) fn grammar(system: RuleSystem) -> &'static Grammar<Check> {
    match system {
        RuleSystem::Legacy => &LEGACY,
        RuleSystem::Modern => &MODERN,
    }
}

fn difficulty_class() -> Grammar<i32> {
    number().preceded_by(literal("dc").trim(optional_whitespace()))
}

fn separator() -> Grammar<()> {
    alt(vec![
        seq2(whitespace(), literal("or"), |_, _| ()).skip(whitespace()),
        seq2(optional_whitespace(), literal(", or"), |_, _| ()).skip(whitespace()),
        literal(",").trim(optional_whitespace()),
    ])
}

/// Every canonical name, longest first so no name shadows a longer one that
/// it prefixes.
fn canonical_name(vocab: &Vocabulary) -> Grammar<Vec<String>> {
    let mut names: Vec<&'static str> = vocab.names().collect();
    names.sort_by_key(|n| std::cmp::Reverse(n.len()));
    alt(names.into_iter().map(|name| literal(&name.to_ascii_lowercase()).result(vec![name.to_owned()])).collect())
}

/// Abbreviations must end on a word boundary: "ref" is Reflex, "refuse" is not.
fn abbreviation(vocab: &Vocabulary) -> Grammar<Vec<String>> {
    alt(vocab
        .abbreviations
        .iter()
        .map(|(abbr, target)| literal(abbr).followed_by(boundary()).result(vec![(*target).to_owned()]))
        .collect())
}

/// `knowledge (arcana)`, `knowledge arcana`, `knowledge (history or local)`,
/// `knowledge (history, local, or planes)`.
fn knowledge(vocab: &Vocabulary) -> Grammar<Vec<String>> {
    let mut domains: Vec<&'static str> = vocab.knowledge_domains.to_vec();
    domains.sort_by_key(|d| std::cmp::Reverse(d.len()));
    let domain = alt(domains
        .into_iter()
        .map(|d| literal(d).followed_by(boundary()).result(Vocabulary::knowledge_skill(d)))
        .collect());

    let keyword = literal("knowledge");
    let list = domain
        .clone()
        .sep_by1(separator())
        .preceded_by(literal("(").skip(optional_whitespace()))
        .skip(optional_whitespace())
        .skip(literal(")"));
    let parenthesized = list.preceded_by(keyword.clone().skip(optional_whitespace()));
    let bare = domain.map(|skill| vec![skill]).preceded_by(keyword.skip(whitespace()));

    alt(vec![parenthesized, bare])
}

fn skill(vocab: &Vocabulary) -> Grammar<Vec<String>> {
    let mut branches = Vec::new();
    if !vocab.knowledge_domains.is_empty() {
        branches.push(knowledge(vocab));
    }
    branches.push(canonical_name(vocab));
    branches.push(abbreviation(vocab));
    longest(branches)
}

fn skills(vocab: &Vocabulary) -> Grammar<Vec<String>> {
    skill(vocab).sep_by1(separator()).map(|lists| lists.into_iter().flatten().collect())
}

fn build(vocab: &'static Vocabulary) -> Grammar<Check> {
    let dc_first = seq2(difficulty_class().trim(optional_whitespace()), skills(vocab), |dc, skills| (skills, dc));
    let skills_first = seq2(skills(vocab).trim(optional_whitespace()), difficulty_class(), |skills, dc| (skills, dc));
    let core = alt(vec![dc_first, skills_first]);

    match vocab.system {
        RuleSystem::Legacy => {
            let half = literal("half").preceded_by(whitespace()).followed_by(boundary()).optional();
            seq2(core, half, |(skills, dc), half| {
                Check::Legacy(LegacyCheck { skills, difficulty_class: Some(dc), halved: half.is_some() })
            })
        }
        RuleSystem::Modern => core.map(|(skills, dc)| {
            Check::Modern(ModernCheck { skills, difficulty_class: Some(dc), ..ModernCheck::default() })
        }),
    }
}
