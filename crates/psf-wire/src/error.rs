/// Errors produced while reading or writing PSF stream headers.
#[derive(Debug, thiserror::Error)]
pub enum WireError {
    /// Input ended before the fixed 20-byte header prefix could be read.
    #[error("unexpected end of input at offset {offset}")]
    UnexpectedEof { offset: usize },

    /// Magic number did not match 0x0213.
    #[error("invalid magic number: expected 0x0213, got {found:#06X}")]
    InvalidMagic { found: u16 },

    /// Unsupported format version.
    #[error("unsupported version {found:#04X}, expected 0x03")]
    UnsupportedVersion { found: u8 },

    /// The flag bits require more header bytes than the input provides.
    ///
    /// The compressed flag adds a 16-byte dictionary and the checksummed
    /// flag adds a 2-byte checksum; a header that declares either without
    /// carrying the bytes is structurally invalid.
    #[error("truncated header: flags require {needed} bytes, only {available} available")]
    TruncatedHeader { needed: usize, available: usize },
}
