//! Markup stripping for text drawn into reports.
//!
//! The base fonts only cover ASCII, so the transform is lossy and one-way.

use std::sync::LazyLock;

use regex::Regex;

static NON_ASCII: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\x00-\x7F]").expect("Invalid non-ASCII regex"));
static BOLD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*(.*?)\*\*").expect("Invalid bold regex"));
static ITALIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*(.*?)\*").expect("Invalid italic regex"));
static STAR_BULLET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\* ").expect("Invalid bullet regex"));
static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("Invalid whitespace regex"));

/// Reduce chat text to plain single-line ASCII.
///
/// Drops non-ASCII code points, unwraps `**bold**` and `*italic*`, turns
/// `* ` list markers into `- `, collapses whitespace runs and trims.
pub fn clean_text(text: &str) -> String {
    let text = NON_ASCII.replace_all(text, "");
    let text = BOLD.replace_all(&text, "$1");
    let text = ITALIC.replace_all(&text, "$1");
    let text = STAR_BULLET.replace_all(&text, "- ");
    let text = WHITESPACE.replace_all(&text, " ");
    text.trim().to_string()
}
