#![warn(clippy::pedantic)]

pub mod config;
pub mod container;
pub mod error;
pub mod pipeline;

pub use config::UnpackConfig;
pub use container::{
    DATA_ALIGN, HEADER_ALIGN, MAX_STREAMS, StreamInfo, UnpackedContainer, Unpacker,
};
pub use error::DriverError;
pub use pipeline::decode_stream;
