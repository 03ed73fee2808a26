//! Parser combinators.
//!
//! A [`Grammar<T>`] wraps a function `(input, pos) -> Option<(T, end)>`.
//! Positions are byte offsets and are always char boundaries: `parse_at`
//! refuses anything else, so the individual productions can slice `input`
//! freely.
//!
//! Primitives:
//!
//! - leaves: [`literal`], [`take_while`], [`take_while1`], [`digits`],
//!   [`number`], [`signed_number`], [`whitespace`], [`optional_whitespace`],
//!   [`boundary`]
//! - choice: [`alt`] (ordered, first success wins) and [`longest`]
//!   (longest consumption wins, earlier branch on ties)
//! - sequence: [`seq2`] and the `skip`/`preceded_by` methods
//! - repetition: `many`, `sep_by1`
//! - the rest: `optional`, `trim`, `followed_by` (lookahead), `map`,
//!   `filter_map`, `result`

use std::fmt;
use std::sync::Arc;

type ParseFn<T> = dyn Fn(&str, usize) -> Option<(T, usize)> + Send + Sync;

/// A reusable, thread-safe parser producing values of type `T`.
pub(crate) struct Grammar<T> {
    run: Arc<ParseFn<T>>,
}

impl<T> Clone for Grammar<T> {
    fn clone(&self) -> Self {
        Grammar { run: Arc::clone(&self.run) }
    }
}

impl<T> fmt::Debug for Grammar<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Grammar").finish_non_exhaustive()
    }
}

impl<T: 'static> Grammar<T> {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&str, usize) -> Option<(T, usize)> + Send + Sync + 'static,
    {
        Grammar { run: Arc::new(f) }
    }

    /// Run the grammar at byte offset `pos`.
    pub fn parse_at(&self, input: &str, pos: usize) -> Option<(T, usize)> {
        if pos > input.len() || !input.is_char_boundary(pos) {
            return None;
        }
        (self.run)(input, pos)
    }

    /// Run the grammar from the start and require it to consume all of `input`.
    pub fn parse_all(&self, input: &str) -> Option<T> {
        match self.parse_at(input, 0)? {
            (value, end) if end == input.len() => Some(value),
            _ => None,
        }
    }

    pub fn map<U: 'static, F>(self, f: F) -> Grammar<U>
    where
        F: Fn(T) -> U + Send + Sync + 'static,
    {
        Grammar::new(move |input, pos| self.parse_at(input, pos).map(|(value, end)| (f(value), end)))
    }

    /// Like `map`, but a `None` from `f` turns the match into a miss.
    pub fn filter_map<U: 'static, F>(self, f: F) -> Grammar<U>
    where
        F: Fn(T) -> Option<U> + Send + Sync + 'static,
    {
        Grammar::new(move |input, pos| {
            let (value, end) = self.parse_at(input, pos)?;
            Some((f(value)?, end))
        })
    }

    /// Replace the produced value with a constant.
    pub fn result<U>(self, value: U) -> Grammar<U>
    where
        U: Clone + Send + Sync + 'static,
    {
        self.map(move |_| value.clone())
    }

    /// Never fails: a miss yields `None` and consumes nothing.
    pub fn optional(self) -> Grammar<Option<T>> {
        Grammar::new(move |input, pos| match self.parse_at(input, pos) {
            Some((value, end)) => Some((Some(value), end)),
            None => Some((None, pos)),
        })
    }

    /// Zero or more repetitions. An item that matches without consuming input
    /// ends the repetition.
    pub fn many(self) -> Grammar<Vec<T>> {
        Grammar::new(move |input, start| {
            let mut items = Vec::new();
            let mut pos = start;
            while let Some((value, end)) = self.parse_at(input, pos) {
                if end == pos {
                    break;
                }
                items.push(value);
                pos = end;
            }
            Some((items, pos))
        })
    }

    /// `item (sep item)*`. A separator is only consumed when an item follows it.
    pub fn sep_by1<S: 'static>(self, sep: Grammar<S>) -> Grammar<Vec<T>> {
        Grammar::new(move |input, start| {
            let (first, mut pos) = self.parse_at(input, start)?;
            let mut items = vec![first];
            while let Some((_, after_sep)) = sep.parse_at(input, pos) {
                let Some((item, end)) = self.parse_at(input, after_sep) else { break };
                if end == pos {
                    break;
                }
                items.push(item);
                pos = end;
            }
            Some((items, pos))
        })
    }

    /// Skip `ws` (if it matches) before and after this grammar.
    pub fn trim<W: 'static>(self, ws: Grammar<W>) -> Grammar<T> {
        Grammar::new(move |input, start| {
            let pos = ws.parse_at(input, start).map_or(start, |(_, end)| end);
            let (value, end) = self.parse_at(input, pos)?;
            let end = ws.parse_at(input, end).map_or(end, |(_, after)| after);
            Some((value, end))
        })
    }

    /// Run `next` after this grammar and keep only this grammar's value.
    pub fn skip<U: 'static>(self, next: Grammar<U>) -> Grammar<T> {
        seq2(self, next, |a, _| a)
    }

    /// Run `prefix` first and keep only this grammar's value.
    pub fn preceded_by<U: 'static>(self, prefix: Grammar<U>) -> Grammar<T> {
        seq2(prefix, self, |_, b| b)
    }

    /// Succeed only if `look` would match right after this grammar. `look`
    /// consumes nothing.
    pub fn followed_by<U: 'static>(self, look: Grammar<U>) -> Grammar<T> {
        Grammar::new(move |input, start| {
            let (value, end) = self.parse_at(input, start)?;
            look.parse_at(input, end)?;
            Some((value, end))
        })
    }
}

// --- Sequences ----------------------------------------------------------------

pub(crate) fn seq2<A, B, R, F>(a: Grammar<A>, b: Grammar<B>, combine: F) -> Grammar<R>
where
    A: 'static,
    B: 'static,
    R: 'static,
    F: Fn(A, B) -> R + Send + Sync + 'static,
{
    Grammar::new(move |input, start| {
        let (va, pos) = a.parse_at(input, start)?;
        let (vb, end) = b.parse_at(input, pos)?;
        Some((combine(va, vb), end))
    })
}

// --- Choice -------------------------------------------------------------------

/// Ordered alternative: the first branch that matches wins.
pub(crate) fn alt<T: 'static>(branches: Vec<Grammar<T>>) -> Grammar<T> {
    Grammar::new(move |input, pos| branches.iter().find_map(|g| g.parse_at(input, pos)))
}

/// Longest-match alternative: every branch is tried and the one that consumes
/// the most wins. Ties go to the earlier branch.
pub(crate) fn longest<T: 'static>(branches: Vec<Grammar<T>>) -> Grammar<T> {
    Grammar::new(move |input, pos| {
        let mut best: Option<(T, usize)> = None;
        for branch in &branches {
            if let Some((value, end)) = branch.parse_at(input, pos) {
                if best.as_ref().is_none_or(|(_, best_end)| end > *best_end) {
                    best = Some((value, end));
                }
            }
        }
        best
    })
}

// --- Leaves -------------------------------------------------------------------

/// Exact, case-sensitive string match.
pub(crate) fn literal(text: &str) -> Grammar<()> {
    let text = text.to_owned();
    Grammar::new(move |input, pos| input[pos..].starts_with(text.as_str()).then_some(((), pos + text.len())))
}

pub(crate) fn take_while<P>(pred: P) -> Grammar<String>
where
    P: Fn(char) -> bool + Send + Sync + 'static,
{
    Grammar::new(move |input, pos| {
        let rest = &input[pos..];
        let len = rest.char_indices().find(|&(_, c)| !pred(c)).map_or(rest.len(), |(i, _)| i);
        Some((rest[..len].to_owned(), pos + len))
    })
}

pub(crate) fn take_while1<P>(pred: P) -> Grammar<String>
where
    P: Fn(char) -> bool + Send + Sync + 'static,
{
    take_while(pred).filter_map(|s| if s.is_empty() { None } else { Some(s) })
}

/// One or more ASCII digits.
pub(crate) fn digits() -> Grammar<String> {
    take_while1(|c| c.is_ascii_digit())
}

/// Unsigned decimal integer. Values that overflow `i32` are a miss.
pub(crate) fn number() -> Grammar<i32> {
    digits().filter_map(|d| d.parse().ok())
}

/// Decimal integer with an optional leading `+` or `-`.
pub(crate) fn signed_number() -> Grammar<i32> {
    let sign = alt(vec![literal("-").result(true), literal("+").result(false)]).optional();
    seq2(sign, digits(), |negative, d| (negative == Some(true), d))
        .filter_map(|(negative, d)| if negative { format!("-{d}").parse().ok() } else { d.parse().ok() })
}

pub(crate) fn whitespace() -> Grammar<()> {
    take_while1(char::is_whitespace).result(())
}

pub(crate) fn optional_whitespace() -> Grammar<()> {
    take_while(char::is_whitespace).result(())
}

/// Zero-width: succeeds at the end of input or before a non-alphanumeric char.
pub(crate) fn boundary() -> Grammar<()> {
    Grammar::new(|input, pos| match input[pos..].chars().next() {
        Some(c) if c.is_alphanumeric() => None,
        _ => Some(((), pos)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn literal_matches_exact_prefix() {
        let g = literal("dc");
        assert_eq!(g.parse_at("dc 15", 0), Some(((), 2)));
        assert_eq!(g.parse_at("DC 15", 0), None);
        assert_eq!(g.parse_at("a dc", 2), Some(((), 4)));
        assert_eq!(g.parse_at("a dc", 5), None);
    }

    #[test]
    fn parse_at_rejects_non_boundaries() {
        let g = take_while(|_| true);
        assert_eq!(g.parse_at("é", 1), None);
        assert_eq!(g.parse_at("é", 0), Some(("é".to_string(), 2)));
    }

    #[test]
    fn parse_all_requires_full_consumption() {
        assert_eq!(number().parse_all("42"), Some(42));
        assert_eq!(number().parse_all("42x"), None);
        assert_eq!(number().parse_all(""), None);
    }

    #[rstest]
    #[case("15", Some(15))]
    #[case("+3", Some(3))]
    #[case("-2", Some(-2))]
    #[case("-", None)]
    #[case("99999999999", None)]
    fn signed_numbers(#[case] input: &str, #[case] expected: Option<i32>) {
        assert_eq!(signed_number().parse_all(input), expected);
    }

    #[test]
    fn alt_is_ordered() {
        let g = alt(vec![literal("a").result(1), literal("ab").result(2)]);
        assert_eq!(g.parse_at("abc", 0), Some((1, 1)));
    }

    #[test]
    fn longest_prefers_longer_then_earlier() {
        let g = longest(vec![literal("a").result(1), literal("ab").result(2), literal("ab").result(3)]);
        assert_eq!(g.parse_at("abc", 0), Some((2, 2)));
        assert_eq!(g.parse_at("x", 0), None);
    }

    #[test]
    fn sep_by1_leaves_dangling_separator() {
        let g = digits().sep_by1(literal(","));
        assert_eq!(g.parse_at("1,2,x", 0), Some((vec!["1".to_string(), "2".to_string()], 3)));
        assert_eq!(g.parse_at(",1", 0), None);
    }

    #[test]
    fn many_stops_on_zero_width_items() {
        let g = take_while(|c| c == 'a').many();
        assert_eq!(g.parse_at("aab", 0), Some((vec!["aa".to_string()], 2)));
    }

    #[test]
    fn optional_consumes_nothing_on_miss() {
        let g = literal("half").optional();
        assert_eq!(g.parse_at("whole", 0), Some((None, 0)));
        assert_eq!(g.parse_at("half", 0), Some((Some(()), 4)));
    }

    #[test]
    fn trim_skips_surrounding_whitespace() {
        let g = literal("or").trim(optional_whitespace());
        assert_eq!(g.parse_at("a  or  b", 1), Some(((), 7)));
        assert_eq!(g.parse_at("or", 0), Some(((), 2)));
    }

    #[test]
    fn followed_by_does_not_consume() {
        let g = literal("umd").followed_by(boundary());
        assert_eq!(g.parse_at("umd dc", 0), Some(((), 3)));
        assert_eq!(g.parse_at("umd", 0), Some(((), 3)));
        assert_eq!(g.parse_at("umdx", 0), None);
    }

    #[test]
    fn sequences_combine_values() {
        let g = seq2(number().skip(literal("-")), number(), |a, b| a - b);
        assert_eq!(g.parse_all("10-3"), Some(7));
        assert_eq!(literal("dc").preceded_by(whitespace()).parse_at(" dc", 0), Some(((), 3)));
        assert_eq!(number().skip(literal("!")).parse_all("5!"), Some(5));
        assert_eq!(number().skip(literal("!")).parse_all("5"), None);
    }
}
