//! NASA APOD adapter.
//!
//! Implements the `apod-core` PictureSource port over `planetary/apod`.

use async_trait::async_trait;
use chrono::NaiveDate;
use tracing::{debug, error};

use apod_core::{domain::AstronomyRecord, errors::Error, ports::PictureSource, Result};

pub const DEFAULT_BASE_URL: &str = "https://api.nasa.gov";

#[derive(Clone, Debug)]
pub struct NasaClient {
    base_url: String,
    api_key: String,
    http: reqwest::Client,
}

impl NasaClient {
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_base_url(DEFAULT_BASE_URL, api_key)
    }

    pub fn with_base_url(base_url: impl Into<String>, api_key: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(Error::Config(
                "NASA_API_KEY environment variable is required".to_string(),
            ));
        }

        let http = reqwest::Client::builder()
            .user_agent(concat!("apod/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::Transport(format!("http client build failed: {e}")))?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
            http,
        })
    }
}

/// `{base}/planetary/apod?date=YYYY-MM-DD&api_key=KEY`
pub fn apod_url(base_url: &str, date: NaiveDate, api_key: &str) -> String {
    format!(
        "{base_url}/planetary/apod?date={}&api_key={api_key}",
        date.format("%Y-%m-%d")
    )
}

/// Turn an APOD HTTP response into a record.
///
/// Anything but 200 is an upstream error carrying the body as diagnostic text.
pub fn decode_response(status: u16, body: &str) -> Result<AstronomyRecord> {
    if status != 200 {
        return Err(Error::Upstream {
            status,
            body: body.to_string(),
        });
    }
    AstronomyRecord::from_json(body)
}

#[async_trait]
impl PictureSource for NasaClient {
    async fn fetch(&self, date: NaiveDate) -> Result<AstronomyRecord> {
        let url = apod_url(&self.base_url, date, &self.api_key);
        debug!(url = %apod_url(&self.base_url, date, "***"), "requesting apod");

        let resp = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::Transport(format!("nasa request error: {}", e.without_url())))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| Error::Transport(format!("nasa body read error: {}", e.without_url())))?;

        if status != reqwest::StatusCode::OK {
            error!(
                "unable to get picture from NASA, status code {}",
                status.as_u16()
            );
        }

        decode_response(status.as_u16(), &body)
    }
}
