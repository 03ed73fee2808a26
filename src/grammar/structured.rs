//! Grammar for the strict `@Check[...]` notation.
//!
//! ```text
//! @Check[ skills ( sep clause )* ]
//!   skills  = ident ( "," ident )*          ident = [A-Za-z_-]+
//!   sep     = "|" | "\|"
//!   clause  = "dc:" n | "defense:" token | "adjustment:" ±n ("," ±n)* | "basic" | other
//! ```
//!
//! `other` is the catch-all: any non-empty fragment up to the next separator
//! or the closing bracket is kept verbatim in [`ModernCheck::unparsed`].
//! Skills and the defense are lowercased, as the formatter writes them.
//! The keyword clauses only win when they span the whole fragment, so
//! `dc:abc` or `basic-ish` end up as unparsed fragments instead of failing
//! the check.
//!
//! Whitespace is horizontal only: a strict check never spans a line break.

use super::combinators::{Grammar, alt, literal, number, seq2, signed_number, take_while, take_while1};
use crate::ModernCheck;
use once_cell::sync::Lazy;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Clause {
    Dc(i32),
    Defense(String),
    Adjustments(Vec<i32>),
    Basic,
    Other(String),
}

static STRUCTURED: Lazy<Grammar<ModernCheck>> = Lazy::new(build);

pub(crate) fn grammar() -> &'static Grammar<ModernCheck> {
    &STRUCTURED
}

fn ows() -> Grammar<()> {
    take_while(|c| c == ' ' || c == '\t').result(())
}

/// `|` or the markdown-table-escaped `\|`.
fn separator() -> Grammar<()> {
    alt(vec![literal("|"), literal("\\|")]).trim(ows())
}

/// Zero-width: the current clause ends here (optional blanks, then `|`, `\|`
/// or `]`).
fn clause_end() -> Grammar<()> {
    let close = alt(vec![literal("|"), literal("\\|"), literal("]")]).preceded_by(ows());
    Grammar::new(move |input, pos| close.parse_at(input, pos).map(|_| ((), pos)))
}

/// Everything up to the next clause delimiter or line break.
fn fragment() -> Grammar<String> {
    Grammar::new(|input, start| {
        let rest = &input[start..];
        let bytes = rest.as_bytes();
        let mut len = 0;
        while len < bytes.len() {
            match bytes[len] {
                b'|' | b']' | b'\n' | b'\r' => break,
                b'\\' if bytes.get(len + 1) == Some(&b'|') => break,
                _ => len += 1,
            }
        }
        Some((rest[..len].to_owned(), start + len))
    })
}

fn clause() -> Grammar<Clause> {
    let dc = number().preceded_by(literal("dc:").skip(ows())).followed_by(clause_end()).map(Clause::Dc);

    let defense = fragment()
        .preceded_by(literal("defense:").skip(ows()))
        .filter_map(|raw| {
            let token = raw.trim_end();
            if token.is_empty() { None } else { Some(Clause::Defense(token.to_lowercase())) }
        });

    let adjustments = signed_number()
        .trim(ows())
        .sep_by1(literal(","))
        .preceded_by(literal("adjustment:").skip(ows()))
        .followed_by(clause_end())
        .map(Clause::Adjustments);

    let basic = literal("basic").followed_by(clause_end()).result(Clause::Basic);

    let other = fragment().filter_map(|raw| {
        let text = raw.trim_end();
        if text.is_empty() { None } else { Some(Clause::Other(text.to_owned())) }
    });

    alt(vec![dc, defense, adjustments, basic, other])
}

fn apply(check: &mut ModernCheck, clause: Clause) {
    match clause {
        Clause::Dc(dc) => check.difficulty_class = Some(dc),
        Clause::Defense(defense) => check.defense = Some(defense),
        // An all-zero list of the right length carries no information and is
        // never written back. A wrong length is kept for the formatter to reject.
        Clause::Adjustments(list) => {
            let empty = list.len() == check.skills.len() && list.iter().all(|a| *a == 0);
            check.adjustments = if empty { None } else { Some(list) };
        }
        Clause::Basic => check.basic = true,
        Clause::Other(text) => check.unparsed.push(text),
    }
}

fn build() -> Grammar<ModernCheck> {
    let open = alt(vec![literal("@Check["), literal("@check[")]);
    let identifier =
        take_while1(|c: char| c.is_ascii_alphabetic() || c == '-' || c == '_').map(|s| s.to_ascii_lowercase());
    let skills = identifier.trim(ows()).sep_by1(literal(","));
    let clauses = clause().preceded_by(separator()).many();

    let body = seq2(skills, clauses, |skills, clauses| {
        let mut check = ModernCheck { skills, ..ModernCheck::default() };
        for clause in clauses {
            apply(&mut check, clause);
        }
        check
    });

    body.preceded_by(open).skip(ows()).skip(literal("]"))
}
