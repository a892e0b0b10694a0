//! Canonical text form for comparison.
//!
//! Transcripts and targets may differ only in capitalization, trailing
//! punctuation or apostrophe style. Both sides go through [`normalize`]
//! before any distance is computed.

use std::sync::LazyLock;

use regex::Regex;

/// Everything except letters, digits, whitespace and the plain apostrophe.
static STRIP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[^\p{L}\p{N}\s']").expect("static regex is valid")
});

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("static regex is valid"));

/// Typographic apostrophe variants folded to `'`.
const APOSTROPHES: &[char] = &['\u{2019}', '\u{2018}', '\u{02BC}', '\u{FF07}'];

/// Normalize `text` for comparison.
///
/// Lower-cases, trims, folds apostrophe variants to `'`, removes every
/// character that is not a Unicode letter, digit, whitespace or apostrophe,
/// and collapses whitespace runs to a single space.
///
/// The result is trimmed once more at the end: removing punctuation can
/// expose whitespace at either edge (`"hello !"`), and normalization must be
/// idempotent.
pub fn normalize(text: &str) -> String {
    let lowered = text.to_lowercase();
    let folded = lowered.trim().replace(APOSTROPHES, "'");
    let stripped = STRIP.replace_all(&folded, "");
    let collapsed = WHITESPACE_RUN.replace_all(&stripped, " ");
    collapsed.trim().to_owned()
}
