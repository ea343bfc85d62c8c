//! Error type shared by the sender and the receiver.
//!
//! Nothing here retries or recovers: every failure is surfaced to `main`,
//! which logs it and exits.

use thiserror::Error;

/// Errors from the demo programs.
#[derive(Debug, Error)]
pub enum DemoError {
    /// The broker or the AMQP client library reported a failure.
    #[error("amqp error: {0}")]
    Amqp(#[from] lapin::Error),

    /// Configuration could not be loaded or deserialized.
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Local I/O failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T, E = DemoError> = std::result::Result<T, E>;
