use lapin::message::Delivery;
use lapin::options::BasicAckOptions;

use crate::utils::Result;

/// One delivery as the receiver sees it: a body, a tag and a way to ack it.
#[allow(async_fn_in_trait)]
pub trait Acknowledge {
    fn body(&self) -> &[u8];

    fn delivery_tag(&self) -> u64;

    /// Acknowledges this single delivery (`multiple = false`).
    async fn acknowledge(&self) -> Result<()>;
}

impl Acknowledge for Delivery {
    fn body(&self) -> &[u8] {
        &self.data
    }

    fn delivery_tag(&self) -> u64 {
        self.delivery_tag
    }

    async fn acknowledge(&self) -> Result<()> {
        self.acker
            .ack(BasicAckOptions { multiple: false })
            .await?;
        Ok(())
    }
}
