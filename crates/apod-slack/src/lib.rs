//! Slack adapter (Web API `chat.postMessage`).
//!
//! This crate implements the `apod-core` PicturePublisher port with a bot token.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use apod_core::{
    domain::{AstronomyRecord, MessageRef},
    errors::Error,
    message::{build_blocks, fallback_text, Block},
    ports::PicturePublisher,
    Result,
};

pub const DEFAULT_BASE_URL: &str = "https://slack.com/api";

#[derive(Clone, Debug)]
pub struct SlackMessenger {
    base_url: String,
    bot_token: String,
    channel_id: String,
    http: reqwest::Client,
}

#[derive(Debug, Serialize)]
struct PostMessage<'a> {
    channel: &'a str,
    text: String,
    blocks: Vec<Block>,
}

#[derive(Debug, Deserialize)]
struct PostMessageResponse {
    ok: bool,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    channel: Option<String>,
    #[serde(default)]
    ts: Option<String>,
}

impl SlackMessenger {
    pub fn new(bot_token: impl Into<String>, channel_id: impl Into<String>) -> Result<Self> {
        Self::with_base_url(DEFAULT_BASE_URL, bot_token, channel_id)
    }

    pub fn with_base_url(
        base_url: impl Into<String>,
        bot_token: impl Into<String>,
        channel_id: impl Into<String>,
    ) -> Result<Self> {
        let bot_token = bot_token.into();
        let channel_id = channel_id.into();
        if bot_token.trim().is_empty() {
            return Err(Error::Config(
                "SLACK_BOT_TOKEN environment variable is required".to_string(),
            ));
        }
        if channel_id.trim().is_empty() {
            return Err(Error::Config(
                "SLACK_CHANNEL_ID environment variable is required".to_string(),
            ));
        }

        let http = reqwest::Client::builder()
            .user_agent(concat!("apod/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::Transport(format!("http client build failed: {e}")))?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            bot_token,
            channel_id,
            http,
        })
    }
}

/// Interpret a `chat.postMessage` reply.
///
/// Slack reports most failures as HTTP 200 with `"ok": false`.
pub fn parse_post_response(status: u16, body: &str) -> Result<MessageRef> {
    if !(200..300).contains(&status) {
        return Err(Error::Delivery(format!(
            "slack http {status}: {}",
            body.chars().take(200).collect::<String>()
        )));
    }

    let resp: PostMessageResponse = serde_json::from_str(body)
        .map_err(|e| Error::Delivery(format!("slack json error: {e}")))?;

    if !resp.ok {
        return Err(Error::Delivery(
            resp.error.unwrap_or_else(|| "unknown_error".to_string()),
        ));
    }

    Ok(MessageRef {
        channel: resp.channel.unwrap_or_default(),
        ts: resp.ts.unwrap_or_default(),
    })
}

#[async_trait]
impl PicturePublisher for SlackMessenger {
    async fn publish(&self, record: &AstronomyRecord) -> Result<MessageRef> {
        let payload = PostMessage {
            channel: &self.channel_id,
            text: fallback_text(record),
            blocks: build_blocks(record),
        };
        debug!(channel = %self.channel_id, blocks = payload.blocks.len(), "posting to slack");

        let resp = self
            .http
            .post(format!("{}/chat.postMessage", self.base_url))
            .bearer_auth(&self.bot_token)
            .json(&payload)
            .send()
            .await
            .map_err(|e| Error::Transport(format!("slack request error: {e}")))?;

        let status = resp.status().as_u16();
        let body = resp
            .text()
            .await
            .map_err(|e| Error::Transport(format!("slack body read error: {e}")))?;

        parse_post_response(status, &body)
    }
}
