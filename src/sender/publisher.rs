use lapin::options::BasicPublishOptions;
use lapin::{BasicProperties, Channel};

use crate::amqp::topology::{EXCHANGE_NAME, ROUTING_KEY};
use crate::utils::Result;

/// Something that can hand one payload to the broker.
///
/// `send_all` only depends on this, so the pacing loop can be driven without
/// a live connection.
#[allow(async_fn_in_trait)]
pub trait Publish {
    async fn publish(&self, payload: &[u8]) -> Result<()>;
}

/// Publishes to the demo exchange with the demo routing key over a `lapin`
/// channel, using default properties and no confirm wait.
#[derive(Debug)]
pub struct ChannelPublisher<'a> {
    channel: &'a Channel,
}

impl<'a> ChannelPublisher<'a> {
    pub fn new(channel: &'a Channel) -> Self {
        Self { channel }
    }
}

impl Publish for ChannelPublisher<'_> {
    async fn publish(&self, payload: &[u8]) -> Result<()> {
        // The returned confirm is dropped: confirms are never enabled on this channel.
        let _confirm = self
            .channel
            .basic_publish(
                EXCHANGE_NAME,
                ROUTING_KEY,
                BasicPublishOptions::default(),
                payload,
                BasicProperties::default(),
            )
            .await?;
        Ok(())
    }
}
