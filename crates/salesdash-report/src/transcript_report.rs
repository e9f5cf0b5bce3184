//! Transcript report layout.

use chrono::{DateTime, TimeZone};

use salesdash_core::types::Message;

use crate::clean::clean_text;
use crate::document::{DocumentBuilder, Rgb};
use crate::layout::{
    draw_footer, draw_header, long_date, BODY_TEXT, CONTINUATION_TOP, FUNCTION_BAND, MARGIN_X,
    MODEL_LABEL, OFF_TOPIC_BAND, USER_LABEL,
};
use crate::metrics::FontStyle;
use crate::wrap::wrap_text;

pub const TITLE: &str = "Sales Analysis Conversation";
pub const USER_HEADING: &str = "You asked:";
pub const MODEL_HEADING: &str = "AI Response:";
pub const OFF_TOPIC_LABEL: &str = "Off-topic query detected";

const FIRST_MESSAGE_Y: f32 = 60.0;
const MESSAGE_BREAK_Y: f32 = 250.0;
const LINE_BREAK_Y: f32 = 280.0;
const WRAP_WIDTH: f32 = 170.0;
const TEXT_SIZE: f32 = 11.0;
const LINE_HEIGHT: f32 = 5.0;

/// Annotation band drawn under a message, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Annotation {
    Function(String),
    OffTopic,
}

impl Annotation {
    /// The off-topic flag wins over a function tag.
    pub fn for_message(message: &Message) -> Option<Self> {
        if message.is_off_topic {
            return Some(Annotation::OffTopic);
        }
        message
            .function_called
            .as_deref()
            .filter(|f| !f.is_empty())
            .map(|f| Annotation::Function(f.to_string()))
    }

    fn label(&self) -> String {
        match self {
            Annotation::Function(name) => format!("Analysis: {name}"),
            Annotation::OffTopic => OFF_TOPIC_LABEL.to_string(),
        }
    }

    fn color(&self) -> Rgb {
        match self {
            Annotation::Function(_) => FUNCTION_BAND,
            Annotation::OffTopic => OFF_TOPIC_BAND,
        }
    }
}

/// Lay out `messages` as a conversation. A single message may span pages.
pub fn render_transcript<D, Tz>(doc: &mut D, messages: &[Message], generated_at: &DateTime<Tz>)
where
    D: DocumentBuilder,
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    draw_header(doc, TITLE);

    doc.set_font(FontStyle::Normal, 12.0);
    doc.text(
        &format!("{} | {} messages", long_date(generated_at), messages.len()),
        MARGIN_X,
        35.0,
    );

    let mut y = FIRST_MESSAGE_Y;
    for message in messages {
        if y > MESSAGE_BREAK_Y {
            doc.add_page();
            y = CONTINUATION_TOP;
        }

        let (heading, color) = if message.is_user() {
            (USER_HEADING, USER_LABEL)
        } else {
            (MODEL_HEADING, MODEL_LABEL)
        };
        doc.set_fill_color(color);
        doc.fill_rect(15.0, y - 8.0, 180.0, 12.0);
        doc.set_text_color(Rgb::WHITE);
        doc.set_font(FontStyle::Bold, 10.0);
        doc.text(heading, MARGIN_X, y - 2.0);
        y += 8.0;

        doc.set_text_color(BODY_TEXT);
        doc.set_font(FontStyle::Normal, TEXT_SIZE);
        for line in wrap_text(&clean_text(&message.text), WRAP_WIDTH, FontStyle::Normal, TEXT_SIZE) {
            if y > LINE_BREAK_Y {
                doc.add_page();
                y = CONTINUATION_TOP;
            }
            doc.text(&line, MARGIN_X, y);
            y += LINE_HEIGHT;
        }
        y += 10.0;

        if let Some(annotation) = Annotation::for_message(message) {
            doc.set_fill_color(annotation.color());
            doc.fill_rect(MARGIN_X, y - 5.0, 150.0, 8.0);
            doc.set_text_color(Rgb::WHITE);
            doc.set_font(FontStyle::Normal, 9.0);
            doc.text(&annotation.label(), 25.0, y);
            y += 15.0;
        }
    }

    draw_footer(doc);
}
