//! Broker topology used by both the sender and the receiver.
//!
//! The names are fixed. Both programs declare the same exchange, queue and
//! binding on startup so either one can be started first.

use lapin::options::{BasicQosOptions, ExchangeDeclareOptions, QueueBindOptions, QueueDeclareOptions};
use lapin::types::FieldTable;
use lapin::{Channel, ExchangeKind};
use tracing::debug;

use crate::utils::Result;

pub const EXCHANGE_NAME: &str = "DemoExchange";
pub const QUEUE_NAME: &str = "DemoQueue";
pub const ROUTING_KEY: &str = "demo-routing-key";

/// Unacknowledged deliveries a receiver may hold at once.
pub const PREFETCH_COUNT: u16 = 1;

/// Declares the direct exchange, the queue and the binding between them.
///
/// The queue is non-durable, non-exclusive and not auto-deleted.
pub async fn declare(channel: &Channel) -> Result<()> {
    channel
        .exchange_declare(
            EXCHANGE_NAME,
            ExchangeKind::Direct,
            ExchangeDeclareOptions::default(),
            FieldTable::default(),
        )
        .await?;

    channel
        .queue_declare(
            QUEUE_NAME,
            QueueDeclareOptions {
                durable: false,
                exclusive: false,
                auto_delete: false,
                ..QueueDeclareOptions::default()
            },
            FieldTable::default(),
        )
        .await?;

    channel
        .queue_bind(
            QUEUE_NAME,
            EXCHANGE_NAME,
            ROUTING_KEY,
            QueueBindOptions::default(),
            FieldTable::default(),
        )
        .await?;

    debug!("Declared {EXCHANGE_NAME} -> {QUEUE_NAME} bound with {ROUTING_KEY}");
    Ok(())
}

/// Limits the channel to `PREFETCH_COUNT` unacknowledged deliveries.
pub async fn apply_qos(channel: &Channel) -> Result<()> {
    channel
        .basic_qos(PREFETCH_COUNT, BasicQosOptions { global: false })
        .await?;
    Ok(())
}
