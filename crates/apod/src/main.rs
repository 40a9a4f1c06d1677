use apod_core::{
    config::Config,
    pipeline::{self, Delivery},
    ports::{PicturePublisher, UnavailablePublisher},
};
use apod_nasa::NasaClient;
use apod_slack::SlackMessenger;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), apod_core::Error> {
    apod_core::logging::init("apod")?;

    let cfg = Config::load()?;
    let nasa = NasaClient::new(cfg.nasa_api_key.clone())?;

    // A broken Slack setup only costs the publish step; the fetch still runs.
    let slack: Box<dyn PicturePublisher> = match cfg
        .slack()
        .and_then(|(token, channel)| SlackMessenger::new(token, channel))
    {
        Ok(messenger) => Box::new(messenger),
        Err(e) => {
            tracing::warn!("slack publisher unavailable: {e}");
            Box::new(UnavailablePublisher::new(&e))
        }
    };

    let report = pipeline::run(pipeline::today(), &nasa, slack.as_ref()).await?;
    if let Delivery::Failed(reason) = &report.delivery {
        tracing::warn!(
            "picture for {} was fetched but not delivered: {reason}",
            report.record.date
        );
    }

    Ok(())
}
