//! Small text helpers used around the parsers: escape cleanup, level
//! metadata, and guarded replacement of a found check.

/// Undo the escapes that markdown tables and code spans put into check text:
/// `\n`, `\t`, `\\`, `\|` and `\[`. Any other backslash is kept as is.
pub fn clean_escapes(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        let replacement = match chars.peek() {
            Some('n') => '\n',
            Some('t') => '\t',
            Some('\\') => '\\',
            Some('|') => '|',
            Some('[') => '[',
            _ => {
                out.push(c);
                continue;
            }
        };
        chars.next();
        out.push(replacement);
    }
    out
}

/// Read a level from document metadata: the leading integer of `text`,
/// ignoring surrounding whitespace (`"5"`, `" 12th level"`, `"-1"`).
pub fn parse_level(text: &str) -> Option<i32> {
    let m = regex!(r"^[+-]?[0-9]+").find(text.trim())?;
    m.as_str().parse().ok()
}

/// Replace `expected` at byte offset `start` with `replacement`, but only if
/// the document still holds exactly `expected` there.
///
/// Returns the new document, or `None` if the text moved or changed since it
/// was found.
pub fn replace_match(document: &str, start: usize, expected: &str, replacement: &str) -> Option<String> {
    let end = start.checked_add(expected.len())?;
    if document.get(start..end)? != expected {
        return None;
    }
    let mut out = String::with_capacity(document.len() - expected.len() + replacement.len());
    out.push_str(&document[..start]);
    out.push_str(replacement);
    out.push_str(&document[end..]);
    Some(out)
}
