//! Chat message layout (Slack Block Kit subset).

use serde::Serialize;

use crate::domain::AstronomyRecord;

pub const HEADER: &str = "*Todays astronomy picture of the day* :rocket:*:*";

/// Slack rejects image blocks whose alt text exceeds this many characters.
pub const MAX_ALT_TEXT_LEN: usize = 2000;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    Section { text: TextObject },
    Divider,
    Image { image_url: String, alt_text: String },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TextObject {
    #[serde(rename = "type")]
    pub kind: TextKind,
    pub text: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TextKind {
    Mrkdwn,
}

impl TextObject {
    pub fn mrkdwn(text: impl Into<String>) -> Self {
        Self {
            kind: TextKind::Mrkdwn,
            text: text.into(),
        }
    }
}

impl Block {
    pub fn section(text: impl Into<String>) -> Self {
        Block::Section {
            text: TextObject::mrkdwn(text),
        }
    }
}

/// Build the picture message: header, divider, image, then divider + explanation.
pub fn build_blocks(record: &AstronomyRecord) -> Vec<Block> {
    vec![
        Block::section(format!("{HEADER}\n\n {}", record.title)),
        Block::Divider,
        Block::Image {
            image_url: record.display_url().to_string(),
            alt_text: truncate_chars(&record.explanation, MAX_ALT_TEXT_LEN),
        },
        Block::Divider,
        Block::section(record.explanation.clone()),
    ]
}

/// Plain-text fallback shown in notifications.
pub fn fallback_text(record: &AstronomyRecord) -> String {
    format!("Astronomy picture of the day: {}", record.title)
}

fn truncate_chars(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    format!("{}...", s.chars().take(max.saturating_sub(3)).collect::<String>())
}
