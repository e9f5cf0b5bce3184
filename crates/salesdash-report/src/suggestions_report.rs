//! Suggestions report layout.

use chrono::{DateTime, TimeZone};

use crate::clean::clean_text;
use crate::document::{DocumentBuilder, Rgb};
use crate::layout::{
    draw_footer, draw_header, long_date, short_time, ACCENT, BODY_TEXT, CONTINUATION_TOP,
    HEADER_BAND, MARGIN_X,
};
use crate::metrics::FontStyle;
use crate::wrap::wrap_text;

pub const TITLE: &str = "AI Sales Query Suggestions";

/// Context shown when no query triggered the list.
pub const DEFAULT_CONTEXT: &str = "Sales Analysis";

const FIRST_ENTRY_Y: f32 = 90.0;
const BREAK_AFTER_Y: f32 = 260.0;
const TEXT_X: f32 = 40.0;
const WRAP_WIDTH: f32 = 160.0;
const TEXT_SIZE: f32 = 12.0;
const LINE_HEIGHT: f32 = 6.0;
const MIN_ENTRY_HEIGHT: f32 = 12.0;
const ENTRY_GAP: f32 = 8.0;

/// Lay out a numbered suggestion list.
pub fn render_suggestions<D, Tz>(
    doc: &mut D,
    suggestions: &[String],
    context: Option<&str>,
    generated_at: &DateTime<Tz>,
) where
    D: DocumentBuilder,
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    draw_header(doc, TITLE);

    let context = context
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .unwrap_or(DEFAULT_CONTEXT);
    doc.set_font(FontStyle::Normal, 12.0);
    doc.text(&clean_text(&format!("Generated for: {context}")), MARGIN_X, 35.0);

    doc.set_text_color(ACCENT);
    doc.set_font(FontStyle::Normal, 11.0);
    doc.text(
        &format!(
            "Generated on {} at {}",
            long_date(generated_at),
            short_time(generated_at)
        ),
        MARGIN_X,
        55.0,
    );

    doc.set_text_color(BODY_TEXT);
    doc.set_font(FontStyle::Bold, 16.0);
    doc.text("Recommended Queries:", MARGIN_X, 75.0);

    let mut y = FIRST_ENTRY_Y;
    for (index, suggestion) in suggestions.iter().enumerate() {
        if y > BREAK_AFTER_Y {
            doc.add_page();
            y = CONTINUATION_TOP;
        }

        doc.set_fill_color(HEADER_BAND);
        doc.fill_rect(MARGIN_X, y - 8.0, 15.0, 10.0);
        doc.set_text_color(Rgb::WHITE);
        doc.set_font(FontStyle::Bold, 10.0);
        doc.text(&(index + 1).to_string(), 25.0, y - 2.0);

        doc.set_text_color(BODY_TEXT);
        doc.set_font(FontStyle::Normal, TEXT_SIZE);
        let lines = wrap_text(&clean_text(suggestion), WRAP_WIDTH, FontStyle::Normal, TEXT_SIZE);
        for (i, line) in lines.iter().enumerate() {
            doc.text(line, TEXT_X, y + i as f32 * LINE_HEIGHT);
        }

        y += (lines.len() as f32 * LINE_HEIGHT).max(MIN_ENTRY_HEIGHT) + ENTRY_GAP;
    }

    draw_footer(doc);
}
