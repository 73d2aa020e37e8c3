//! Post-processing applied to text returned by the Tika server

use once_cell::sync::Lazy;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

static NON_SPACING_MARKS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\p{Mn}+").expect("non-spacing mark pattern is valid"));

// A line break followed by one or more lines holding nothing but separators.
static BLANK_LINE_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\pZ*\n(?:\pZ*\n)+").expect("blank line pattern is valid"));

/// Remove diacritics by decomposing, dropping non-spacing marks and recomposing.
pub fn strip_diacritics(text: &str) -> String {
    let decomposed: String = text.nfd().collect();
    NON_SPACING_MARKS
        .replace_all(&decomposed, "")
        .nfc()
        .collect()
}

/// Replace every run of blank lines with `replacement`.
pub fn collapse_blank_lines(text: &str, replacement: &str) -> String {
    BLANK_LINE_RUN.replace_all(text, replacement).into_owned()
}

/// Cleanup used for `/tika` output.
pub(crate) fn clean_plain_text(raw: &str) -> String {
    collapse_blank_lines(&strip_diacritics(raw), "\n")
}

/// Cleanup used for `/rmeta/text` output.
pub(crate) fn clean_recursive_text(raw: &str) -> String {
    collapse_blank_lines(raw, "\n\n").trim().to_string()
}
