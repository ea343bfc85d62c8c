//! Sender program
//!
//! Connects, declares the demo topology and publishes a fixed number of
//! numbered text messages, pausing between each publish. There are no
//! publisher confirms: a message counts as sent once the client library
//! accepted it.

pub mod publisher;

use chrono::{DateTime, Utc};
use std::time::Duration;
use tracing::info;

use crate::amqp::{self, topology};
use crate::config::Settings;
use crate::message;
use crate::utils::Result;

pub use publisher::{ChannelPublisher, Publish};

/// Outcome of a completed publishing run.
#[derive(Debug, Clone)]
pub struct SendReport {
    pub published: u64,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

/// Publishes messages `1..=count` through `publisher`, sleeping `interval`
/// after each one. The first publish error aborts the run.
pub async fn send_all<P: Publish>(publisher: &P, count: u32, interval: Duration) -> Result<SendReport> {
    let started_at = Utc::now();
    let mut published = 0;

    for sequence in 1..=count {
        info!("Sending Message #{sequence}");
        let body = message::text(sequence);
        publisher.publish(body.as_bytes()).await?;
        published += 1;

        tokio::time::sleep(interval).await;
    }

    Ok(SendReport {
        published,
        started_at,
        finished_at: Utc::now(),
    })
}

/// Runs the sender end to end against the broker named in `settings`.
pub async fn run(settings: &Settings) -> Result<SendReport> {
    let session = amqp::connect(&settings.broker.uri, &settings.sender.client_name).await?;
    topology::declare(&session.channel).await?;

    let publisher = ChannelPublisher::new(&session.channel);
    let report = send_all(
        &publisher,
        settings.sender.message_count,
        settings.sender.publish_interval(),
    )
    .await?;

    session.close().await?;

    info!(
        "All messages sent! ({} in {}s)",
        report.published,
        (report.finished_at - report.started_at).num_seconds()
    );
    Ok(report)
}
