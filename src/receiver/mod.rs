//! Receiver program
//!
//! Connects, declares the demo topology, limits the channel to one
//! unacknowledged delivery and consumes with manual acks. Each delivery is
//! held for a fixed processing delay before it is logged and acknowledged,
//! so the broker hands out the next message only after the previous ack.
//!
//! Deliveries are handled strictly one at a time. When the stop signal
//! arrives while a delivery is being handled, that delivery still completes
//! and is acknowledged before the consumer is cancelled.

pub mod delivery;
pub mod shutdown;

use chrono::{DateTime, Utc};
use futures_util::{Stream, StreamExt};
use lapin::options::{BasicCancelOptions, BasicConsumeOptions};
use lapin::types::FieldTable;
use std::future::Future;
use std::time::Duration;
use tracing::{debug, info};
use uuid::Uuid;

use crate::amqp::{self, topology};
use crate::config::Settings;
use crate::message;
use crate::utils::{DemoError, Result};

pub use delivery::Acknowledge;
pub use shutdown::{KeySource, TerminalKeys, wait_for_key_from, wait_for_keypress};

/// Outcome of a consuming run.
#[derive(Debug, Clone)]
pub struct ConsumeReport {
    pub acknowledged: u64,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

/// Simulates work on one delivery, then acknowledges it. Returns the decoded
/// message text.
pub async fn handle_delivery<D: Acknowledge>(delivery: &D, delay: Duration) -> Result<String> {
    let text = message::decode(delivery.body());
    tokio::time::sleep(delay).await;
    info!("Message received: {text}");
    delivery.acknowledge().await?;
    debug!("Acked delivery {}", delivery.delivery_tag());
    Ok(text)
}

/// Handles deliveries from `deliveries` in arrival order until the stream
/// ends or `shutdown` resolves.
pub async fn consume<S, D, E, F>(deliveries: S, delay: Duration, shutdown: F) -> Result<ConsumeReport>
where
    S: Stream<Item = std::result::Result<D, E>>,
    D: Acknowledge,
    DemoError: From<E>,
    F: Future<Output = ()>,
{
    let started_at = Utc::now();
    let mut acknowledged = 0;
    tokio::pin!(deliveries, shutdown);

    loop {
        tokio::select! {
            biased;
            _ = &mut shutdown => break,
            next = deliveries.next() => match next {
                Some(delivery) => {
                    handle_delivery(&delivery?, delay).await?;
                    acknowledged += 1;
                }
                None => {
                    info!("Delivery stream ended");
                    break;
                }
            },
        }
    }

    Ok(ConsumeReport {
        acknowledged,
        started_at,
        finished_at: Utc::now(),
    })
}

/// Runs the receiver end to end against the broker named in `settings`,
/// stopping on `shutdown`.
pub async fn run<F>(settings: &Settings, shutdown: F) -> Result<ConsumeReport>
where
    F: Future<Output = ()>,
{
    let session = amqp::connect(&settings.broker.uri, &settings.receiver.client_name).await?;
    topology::declare(&session.channel).await?;
    topology::apply_qos(&session.channel).await?;

    let consumer_tag = format!("receiver-{}", Uuid::new_v4());
    let consumer = session
        .channel
        .basic_consume(
            topology::QUEUE_NAME,
            &consumer_tag,
            BasicConsumeOptions {
                no_ack: false,
                ..BasicConsumeOptions::default()
            },
            FieldTable::default(),
        )
        .await?;
    info!("Consuming from {} as {consumer_tag}", topology::QUEUE_NAME);

    let report = consume(consumer, settings.receiver.processing_delay(), shutdown).await?;

    session
        .channel
        .basic_cancel(&consumer_tag, BasicCancelOptions::default())
        .await?;
    session.close().await?;

    info!("Receiver stopped after {} messages", report.acknowledged);
    Ok(report)
}
