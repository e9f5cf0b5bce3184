//! Greedy word wrapping against Helvetica metrics.

use crate::metrics::{text_width_mm, FontStyle};

/// Split `text` into lines no wider than `max_width_mm`.
///
/// Words are packed greedily; a word wider than a whole line is broken
/// between characters. Empty text yields a single empty line.
pub fn wrap_text(text: &str, max_width_mm: f32, style: FontStyle, size_pt: f32) -> Vec<String> {
    let fits = |s: &str| text_width_mm(s, style, size_pt) <= max_width_mm;

    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{current} {word}")
        };

        if fits(&candidate) {
            current = candidate;
            continue;
        }

        if !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }

        if fits(word) {
            current = word.to_string();
            continue;
        }

        for ch in word.chars() {
            current.push(ch);
            if !fits(&current) && current.chars().count() > 1 {
                current.pop();
                lines.push(std::mem::take(&mut current));
                current.push(ch);
            }
        }
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}
