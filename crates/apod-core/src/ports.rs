use async_trait::async_trait;
use chrono::NaiveDate;

use crate::{
    domain::{AstronomyRecord, MessageRef},
    errors::Error,
    Result,
};

/// Hexagonal port for the daily picture feed (NASA APOD today).
#[async_trait]
pub trait PictureSource: Send + Sync {
    async fn fetch(&self, date: NaiveDate) -> Result<AstronomyRecord>;
}

/// Hexagonal port for the chat destination (Slack today).
#[async_trait]
pub trait PicturePublisher: Send + Sync {
    async fn publish(&self, record: &AstronomyRecord) -> Result<MessageRef>;
}

/// Stand-in publisher used when the chat destination could not be configured.
///
/// Every publish fails with the original config error, without any network call.
#[derive(Clone, Debug)]
pub struct UnavailablePublisher {
    reason: String,
}

impl UnavailablePublisher {
    pub fn new(cause: &Error) -> Self {
        Self {
            reason: match cause {
                Error::Config(msg) => msg.clone(),
                other => other.to_string(),
            },
        }
    }
}

#[async_trait]
impl PicturePublisher for UnavailablePublisher {
    async fn publish(&self, _record: &AstronomyRecord) -> Result<MessageRef> {
        Err(Error::Config(self.reason.clone()))
    }
}
