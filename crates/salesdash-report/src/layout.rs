//! Shared report chrome: palette, header band, footer, date formats.

use chrono::{DateTime, TimeZone};

use crate::document::{DocumentBuilder, Rgb, PAGE_WIDTH_MM};
use crate::metrics::FontStyle;

pub const HEADER_BAND: Rgb = Rgb(102, 126, 234);
pub const ACCENT: Rgb = Rgb(102, 126, 234);
pub const USER_LABEL: Rgb = Rgb(118, 75, 162);
pub const MODEL_LABEL: Rgb = Rgb(102, 126, 234);
pub const FUNCTION_BAND: Rgb = Rgb(76, 175, 80);
pub const OFF_TOPIC_BAND: Rgb = Rgb(255, 107, 107);
pub const BODY_TEXT: Rgb = Rgb(60, 60, 60);
pub const FOOTER_BAND: Rgb = Rgb(248, 249, 250);
pub const FOOTER_TEXT: Rgb = Rgb(150, 150, 150);

pub const FOOTER_LABEL: &str = "Generated by AI Sales Analytics Dashboard";

/// Left margin of header and body text.
pub const MARGIN_X: f32 = 20.0;

/// Cursor position at the top of a continuation page.
pub const CONTINUATION_TOP: f32 = 30.0;

/// Full-width coloured band with the report title in white.
pub fn draw_header<D: DocumentBuilder>(doc: &mut D, title: &str) {
    doc.set_fill_color(HEADER_BAND);
    doc.fill_rect(0.0, 0.0, PAGE_WIDTH_MM, 40.0);
    doc.set_text_color(Rgb::WHITE);
    doc.set_font(FontStyle::Bold, 24.0);
    doc.text(title, MARGIN_X, 25.0);
}

/// Footer band on the current (last) page.
pub fn draw_footer<D: DocumentBuilder>(doc: &mut D) {
    doc.set_fill_color(FOOTER_BAND);
    doc.fill_rect(0.0, 280.0, PAGE_WIDTH_MM, 17.0);
    doc.set_text_color(FOOTER_TEXT);
    doc.set_font(FontStyle::Italic, 9.0);
    doc.text(FOOTER_LABEL, MARGIN_X, 290.0);
}

/// `Monday, March 4, 2024`
pub fn long_date<Tz: TimeZone>(at: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    at.format("%A, %B %-d, %Y").to_string()
}

/// `02:05 PM`
pub fn short_time<Tz: TimeZone>(at: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    at.format("%I:%M %p").to_string()
}
