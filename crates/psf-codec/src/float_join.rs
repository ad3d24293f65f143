use crate::error::CodecError;

/// Reassemble IEEE-754 single-precision floats from a split pair of
/// byte streams.
///
/// Each float is stored as 3 sign+fraction bytes (`b0`, `b1`, `b2`:
/// the 23 fraction bits plus the sign in `b2`'s top bit) in the
/// `signfrac` stream and 1 exponent byte in the `exp` stream. The
/// output is the standard little-endian bit pattern:
///
/// ```text
/// out0 = b0
/// out1 = b1
/// out2 = (b2 & 0x7F) | ((exp & 0x01) << 7)   exponent bit 0 → top bit
/// out3 = (exp >> 1)  | ((b2 >> 7) << 7)      sign → top bit
/// ```
///
/// All validation happens before any write: a violation leaves `output`
/// byte-for-byte unchanged. Two empty inputs are a clean no-op.
///
/// # Returns
///
/// The number of output bytes written (4 per float).
///
/// # Errors
///
/// - [`CodecError::SignfracNotTriples`] if `signfrac.len() % 3 != 0`.
/// - [`CodecError::ExponentCountMismatch`] if `exp.len()` isn't one
///   byte per encoded float.
/// - [`CodecError::OutputTooSmall`] if `output` can't hold 4 bytes per
///   float.
pub fn join_float_streams(
    signfrac: &[u8],
    exp: &[u8],
    output: &mut [u8],
) -> Result<usize, CodecError> {
    if signfrac.len() % 3 != 0 {
        return Err(CodecError::SignfracNotTriples {
            len: signfrac.len(),
        });
    }
    let count = signfrac.len() / 3;
    if exp.len() != count {
        return Err(CodecError::ExponentCountMismatch {
            got: exp.len(),
            expected: count,
        });
    }
    if output.len() < 4 * count {
        return Err(CodecError::OutputTooSmall {
            needed: 4 * count,
            available: output.len(),
        });
    }

    for i in 0..count {
        let b0 = signfrac[3 * i];
        let b1 = signfrac[3 * i + 1];
        let b2 = signfrac[3 * i + 2];
        let e = exp[i];

        output[4 * i] = b0;
        output[4 * i + 1] = b1;
        output[4 * i + 2] = (b2 & 0x7F) | ((e & 0x01) << 7);
        output[4 * i + 3] = (e >> 1) | ((b2 >> 7) << 7);
    }

    Ok(4 * count)
}

/// Reassemble IEEE-754 single-precision floats from a three-way split:
/// fraction, exponent, and sign as separate streams.
///
/// The fraction stream carries 3 little-endian bytes per float with the
/// third byte's top bit unused (it is masked off); the exponent stream
/// carries 1 byte per float; the sign stream carries 1 bit per float,
/// packed LSB-first into `ceil(count / 8)` bytes. Reconstruction:
///
/// ```text
/// out0 = f0
/// out1 = f1
/// out2 = (f2 & 0x7F) | ((exp & 0x01) << 7)
/// out3 = (exp >> 1)  | (sign_bit << 7)
/// ```
///
/// Same validate-then-write contract as [`join_float_streams`]: any
/// violation leaves `output` untouched, and three empty inputs are a
/// clean no-op.
///
/// # Errors
///
/// - [`CodecError::FractionNotTriples`] if `frac.len() % 3 != 0`.
/// - [`CodecError::ExponentCountMismatch`] if `exp.len()` isn't one
///   byte per float.
/// - [`CodecError::SignCountMismatch`] if `sign.len()` isn't
///   `ceil(count / 8)` bytes.
/// - [`CodecError::OutputTooSmall`] if `output` can't hold 4 bytes per
///   float.
pub fn join_float_streams3(
    frac: &[u8],
    exp: &[u8],
    sign: &[u8],
    output: &mut [u8],
) -> Result<usize, CodecError> {
    if frac.len() % 3 != 0 {
        return Err(CodecError::FractionNotTriples { len: frac.len() });
    }
    let count = frac.len() / 3;
    if exp.len() != count {
        return Err(CodecError::ExponentCountMismatch {
            got: exp.len(),
            expected: count,
        });
    }
    let sign_bytes = count.div_ceil(8);
    if sign.len() != sign_bytes {
        return Err(CodecError::SignCountMismatch {
            got: sign.len(),
            expected: sign_bytes,
        });
    }
    if output.len() < 4 * count {
        return Err(CodecError::OutputTooSmall {
            needed: 4 * count,
            available: output.len(),
        });
    }

    for i in 0..count {
        let f0 = frac[3 * i];
        let f1 = frac[3 * i + 1];
        let f2 = frac[3 * i + 2];
        let e = exp[i];
        let sign_bit = (sign[i / 8] >> (i % 8)) & 1;

        output[4 * i] = f0;
        output[4 * i + 1] = f1;
        output[4 * i + 2] = (f2 & 0x7F) | ((e & 0x01) << 7);
        output[4 * i + 3] = (e >> 1) | (sign_bit << 7);
    }

    Ok(4 * count)
}
