//! Static skill taxonomy.
//!
//! Each rule system contributes a [`Vocabulary`]: its canonical skill names,
//! its saves and other non-skill check types, the abbreviations accepted in
//! loose text, and (legacy only) the knowledge domains that the composite
//! `Knowledge (...)` production understands.
//!
//! Everything here is `'static` data; nothing is mutated after start-up.

pub(crate) mod legacy;
pub(crate) mod modern;
pub(crate) mod translation;

use crate::RuleSystem;

#[derive(Debug)]
pub(crate) struct Vocabulary {
    pub system: RuleSystem,
    /// Canonical skill names, in display form.
    pub skills: &'static [&'static str],
    /// Saves, abilities and other check types that are not skills.
    pub misc: &'static [&'static str],
    /// `(abbreviation, canonical name)`; abbreviations are lowercase.
    pub abbreviations: &'static [(&'static str, &'static str)],
    /// Lowercase knowledge domains; empty when the system has none.
    pub knowledge_domains: &'static [&'static str],
}

impl Vocabulary {
    pub fn for_system(system: RuleSystem) -> &'static Vocabulary {
        match system {
            RuleSystem::Legacy => &legacy::VOCABULARY,
            RuleSystem::Modern => &modern::VOCABULARY,
        }
    }

    /// Every canonical name (skills first, then misc), in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.skills.iter().chain(self.misc.iter()).copied()
    }

    /// Display name of a knowledge domain, e.g. `"arcana"` -> `"Knowledge (arcana)"`.
    pub fn knowledge_skill(domain: &str) -> String {
        format!("Knowledge ({domain})")
    }
}

#[cfg(test)]
impl Vocabulary {
    pub fn is_known(&self, name: &str) -> bool {
        self.names().any(|n| n.eq_ignore_ascii_case(name))
    }
}
