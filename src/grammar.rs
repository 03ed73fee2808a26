//! Grammar engine.
//!
//! Both check notations are parsed with a small parser-combinator library
//! rather than regular expressions: the knowledge lists nest parentheses and
//! the strict form has escaped delimiters, neither of which is pleasant to
//! express as a single regex.
//!
//! ```text
//! combinators.rs   Grammar<T>, literal/alt/longest/seq2/sep_by1/...
//!        │
//!        ├── structured.rs   @Check[skill,skill|dc:20|basic|...]
//!        └── loose.rs        "DC 15 Diplomacy", "Stealth or Bluff DC 20 half"
//! ```
//!
//! A grammar is a value: it is built once (the finished grammars live in
//! `Lazy` statics) and is then shared read-only between threads. Every
//! grammar reports either `Some((value, end))`, where `end` is the byte offset
//! right after the consumed text, or `None`.
//!
//! Case handling is left to callers. The loose grammars expect ASCII
//! lowercased input; the structured grammar sees the text as written.

#[path = "grammar/combinators.rs"]
pub(crate) mod combinators;
#[path = "grammar/loose.rs"]
pub(crate) mod loose;
#[path = "grammar/structured.rs"]
pub(crate) mod structured;
