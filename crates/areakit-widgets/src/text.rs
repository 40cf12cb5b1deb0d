//! Splitting and trimming of pasted text.
//!
//! Whitespace here is the ECMAScript set (`\s` in a browser regex): it
//! includes U+FEFF, which spreadsheet exports prepend as a byte-order mark,
//! and excludes U+0085, which Unicode `White_Space` contains.

use regex::Regex;
use std::sync::OnceLock;

/// Character-class body for ECMAScript whitespace.
const WHITESPACE_CLASS: &str =
    r"\t\n\x0B\x0C\r \x{A0}\x{1680}\x{2000}-\x{200A}\x{2028}\x{2029}\x{202F}\x{205F}\x{3000}\x{FEFF}";

static WHITESPACE_RUN: OnceLock<Regex> = OnceLock::new();
static ID_SEPARATOR_RUN: OnceLock<Regex> = OnceLock::new();

fn whitespace_run() -> &'static Regex {
    WHITESPACE_RUN.get_or_init(|| {
        Regex::new(&format!("[{WHITESPACE_CLASS}]+")).expect("whitespace pattern is valid")
    })
}

fn id_separator_run() -> &'static Regex {
    ID_SEPARATOR_RUN.get_or_init(|| {
        Regex::new(&format!("[,{WHITESPACE_CLASS}]+")).expect("separator pattern is valid")
    })
}

/// Check a character against the ECMAScript whitespace set.
pub const fn is_js_whitespace(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n'
            | '\u{0B}'
            | '\u{0C}'
            | '\r'
            | ' '
            | '\u{A0}'
            | '\u{1680}'
            | '\u{2000}'..='\u{200A}'
            | '\u{2028}'
            | '\u{2029}'
            | '\u{202F}'
            | '\u{205F}'
            | '\u{3000}'
            | '\u{FEFF}'
    )
}

/// Trim leading and trailing whitespace.
pub fn trim(text: &str) -> &str {
    text.trim_matches(is_js_whitespace)
}

/// Split on runs of whitespace.
///
/// Leading or trailing whitespace yields an empty first or last piece, and
/// empty text yields a single empty piece.
pub fn split_whitespace_runs(text: &str) -> Vec<&str> {
    whitespace_run().split(text).collect()
}

/// Split on runs of commas and whitespace.
pub fn split_id_list(text: &str) -> Vec<&str> {
    id_separator_run().split(text).collect()
}
