//! The `utils` module provides the pieces shared by both demo programs:
//! the crate-wide error type and logging initialization.

pub mod error;
pub mod logging;

pub use error::{DemoError, Result};
