/// Errors produced by the byte-transform primitives.
///
/// Every variant is a local, recoverable condition: the operation that
/// returns it has written nothing to its output buffer, so callers can
/// resize or re-validate and retry.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// The output buffer cannot hold the result.
    #[error("output buffer too small: need {needed} bytes, have {available}")]
    OutputTooSmall { needed: usize, available: usize },

    /// A sign+fraction stream must encode whole 3-byte groups.
    #[error("sign+fraction stream length {len} is not a multiple of 3")]
    SignfracNotTriples { len: usize },

    /// A fraction stream must encode whole 3-byte groups.
    #[error("fraction stream length {len} is not a multiple of 3")]
    FractionNotTriples { len: usize },

    /// The exponent stream must carry exactly one byte per float.
    #[error("exponent stream has {got} bytes but {expected} floats are encoded")]
    ExponentCountMismatch { got: usize, expected: usize },

    /// The sign stream must carry one bit per float, packed into bytes.
    #[error("sign stream has {got} bytes but {expected} are required")]
    SignCountMismatch { got: usize, expected: usize },
}
