//! # rabbit-demo
//!
//! `rabbit-demo` is a pair of small AMQP demo programs built on `lapin`: a
//! sender that publishes numbered text messages at a fixed pace, and a
//! receiver that consumes them one at a time with manual acknowledgment and
//! a simulated processing delay.
//!
//! ## Core Modules
//!
//! - `amqp`: Connection lifecycle and the fixed exchange/queue/binding topology.
//! - `config`: Loads settings from an optional file and the environment.
//! - `message`: Payload text format.
//! - `sender`: The publishing loop.
//! - `receiver`: The consuming loop and its stop signal.
//! - `utils`: Shared error type and logging setup.

pub mod amqp;
pub mod config;
pub mod message;
pub mod receiver;
pub mod sender;
pub mod utils;
