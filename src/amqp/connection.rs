//! Connection and channel lifecycle.

use lapin::{Channel, Connection, ConnectionProperties};
use tracing::{debug, info};

use crate::utils::Result;

const REPLY_SUCCESS: u16 = 200;

/// An open connection together with the single channel the demo uses.
pub struct Session {
    pub connection: Connection,
    pub channel: Channel,
}

/// Opens a connection to `uri`, announcing `client_name` to the broker, and
/// creates one channel on it.
pub async fn connect(uri: &str, client_name: &str) -> Result<Session> {
    let properties = ConnectionProperties::default().with_connection_name(client_name.into());
    let connection = Connection::connect(uri, properties).await?;
    info!("Connected to broker as '{client_name}'");

    let channel = connection.create_channel().await?;
    debug!("Opened channel {}", channel.id());

    Ok(Session {
        connection,
        channel,
    })
}

impl Session {
    /// Closes the channel and then the connection.
    pub async fn close(self) -> Result<()> {
        self.channel.close(REPLY_SUCCESS, "OK").await?;
        self.connection.close(REPLY_SUCCESS, "OK").await?;
        debug!("Connection closed");
        Ok(())
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("channel", &self.channel.id())
            .finish_non_exhaustive()
    }
}
