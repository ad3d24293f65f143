use psf_codec::CodecError;
use psf_wire::WireError;

/// Errors that can occur while unpacking a PSF container.
///
/// The driver validates at three levels: container structure (stream
/// chaining, alignment, truncation), per-stream decoding (key presence,
/// output sizes, checksums), and the codec primitives underneath.
///
/// ```text
///   DriverError
///   ├── MissingKey            ← encrypted stream, no key configured
///   ├── MissingDictionary     ← compressed flag without a dictionary
///   ├── ChecksumMismatch      ← decoded bytes disagree with the header
///   ├── WrongPayloadLength    ← payload slice ≠ header data_size
///   ├── WrongOutputLength     ← decoded bytes ≠ header orig_data_size
///   ├── StreamTooLarge        ← declared size exceeds address space
///   ├── IncompleteFloatGroup  ← chain ended mid float split
///   ├── TooManyStreams        ← more than MAX_STREAMS in the chain
///   ├── UnexpectedEof         ← container truncated mid-stream
///   ├── Wire(WireError)       ← from psf-wire header parsing
///   └── Codec(CodecError)     ← from psf-codec primitives
/// ```
#[derive(Debug, thiserror::Error)]
pub enum DriverError {
    /// A stream has the encrypted flag but no key was configured.
    #[error("stream is encrypted but no decryption key was provided")]
    MissingKey,

    /// A stream has the compressed flag but the header carries no
    /// dictionary. Headers parsed by `psf-wire` can't hit this; it
    /// guards hand-constructed headers.
    #[error("stream is compressed but the header carries no dictionary")]
    MissingDictionary,

    /// The checksum of the decoded bytes disagrees with the header.
    #[error("checksum mismatch: header says {expected:#06X}, computed {actual:#06X}")]
    ChecksumMismatch { expected: u16, actual: u16 },

    /// The payload handed to the pipeline isn't `data_size` bytes.
    #[error("payload is {actual} bytes but the header declares {expected}")]
    WrongPayloadLength { expected: u64, actual: usize },

    /// Decoding produced a different number of bytes than the header's
    /// `orig_data_size` — typically truncated compressed input.
    #[error("decoded {actual} bytes but the header declares {expected}")]
    WrongOutputLength { expected: u64, actual: usize },

    /// A declared stream size does not fit in this platform's address
    /// space.
    #[error("stream declares {size} bytes, larger than addressable memory")]
    StreamTooLarge { size: u64 },

    /// The stream chain ended before a float split was complete.
    #[error("float group needs {needed} streams but only {found} remain")]
    IncompleteFloatGroup { needed: usize, found: usize },

    /// The container chains more streams than the format allows.
    #[error("container exceeds the {limit}-stream limit")]
    TooManyStreams { limit: usize },

    /// The container ended before a stream's header or payload.
    #[error("container truncated at offset {offset}")]
    UnexpectedEof { offset: usize },

    /// A header-level parse error.
    #[error(transparent)]
    Wire(#[from] WireError),

    /// A codec-primitive error.
    #[error(transparent)]
    Codec(#[from] CodecError),
}
