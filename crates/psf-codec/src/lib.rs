#![warn(clippy::pedantic)]

pub mod checksum;
pub mod cipher;
pub mod decompress;
pub mod error;
pub mod float_join;
pub mod lfsr;

pub use checksum::checksum;
pub use cipher::decrypt;
pub use decompress::{ESCAPE_BYTE, decompress};
pub use error::CodecError;
pub use float_join::{join_float_streams, join_float_streams3};
pub use lfsr::lfsr_step;
