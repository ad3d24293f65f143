#![warn(clippy::pedantic)]

pub mod error;
pub mod header;

pub use error::WireError;
pub use header::{StreamFlags, StreamHeader};
