//! One run: fetch today's picture, then try to post it.

use chrono::{Local, NaiveDate};
use tracing::{error, info};

use crate::{
    domain::{AstronomyRecord, MessageRef},
    ports::{PicturePublisher, PictureSource},
    Result,
};

/// Outcome of the publish step.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Delivery {
    Posted(MessageRef),
    Failed(String),
}

#[derive(Clone, Debug)]
pub struct RunReport {
    pub record: AstronomyRecord,
    pub delivery: Delivery,
}

/// Today's calendar date in local time.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Fetch the picture for `date` and publish it.
///
/// Fetch errors propagate and the publisher is never called. Publish errors are
/// logged and recorded in the report; they never fail the run.
pub async fn run(
    date: NaiveDate,
    source: &dyn PictureSource,
    publisher: &dyn PicturePublisher,
) -> Result<RunReport> {
    info!(%date, "fetching astronomy picture");
    let record = source.fetch(date).await?;
    info!(
        title = %record.title,
        media_type = %record.media_type,
        service_version = %record.service_version,
        "fetched astronomy picture"
    );

    let delivery = match publisher.publish(&record).await {
        Ok(msg) => {
            info!(channel = %msg.channel, ts = %msg.ts, "posted astronomy picture");
            Delivery::Posted(msg)
        }
        Err(e) => {
            error!("failed to post astronomy picture: {e}");
            Delivery::Failed(e.to_string())
        }
    };

    Ok(RunReport { record, delivery })
}
