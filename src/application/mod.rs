//! Application layer: renderers and conversion use cases
//!
//! This layer orchestrates domain logic and depends on I/O boundary traits.

pub mod error;
pub mod render;
pub mod services;

pub use error::{ApplicationError, ApplicationResult};
