// File: src/core/tokenizer.rs
//! Whitespace units and their (prefix, core, suffix) decomposition.
//!
//! A unit is rewritable only when it is a single run of word characters,
//! optionally wrapped in non-word characters: `"(enormous),"` yields
//! `("(", "enormous", "),")`, while `"don't"` and `"--"` yield nothing.

/// Word characters: alphanumeric (Unicode) or underscore.
#[inline]
pub fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// A unit split around its core word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WordParts<'a> {
    pub prefix: &'a str,
    pub core: &'a str,
    pub suffix: &'a str,
}

/// Splits on any run of whitespace, dropping empty units.
pub fn split_units(line: &str) -> impl Iterator<Item = &str> {
    line.split_whitespace()
}

/// Decomposes a unit, or returns `None` when it has no word run or more than one.
pub fn decompose(unit: &str) -> Option<WordParts<'_>> {
    let start = unit.find(is_word_char)?;
    let rest = &unit[start..];
    let core_len = rest.find(|c: char| !is_word_char(c)).unwrap_or(rest.len());
    let end = start + core_len;

    let suffix = &unit[end..];
    if suffix.chars().any(is_word_char) {
        return None;
    }

    Some(WordParts {
        prefix: &unit[..start],
        core: &unit[start..end],
        suffix,
    })
}

/// Every maximal run of word characters in `text`, in order.
pub fn word_runs(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| !is_word_char(c)).filter(|run| !run.is_empty())
}
