//! The `amqp` module wraps the handful of `lapin` calls both programs share:
//! opening a connection with a named client, declaring the fixed demo
//! topology and closing everything down again.

pub mod connection;
pub mod topology;

pub use connection::{Session, connect};
