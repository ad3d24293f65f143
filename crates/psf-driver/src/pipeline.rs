use std::borrow::Cow;

use psf_codec::{checksum, decompress, decrypt};
use psf_wire::StreamHeader;

use crate::config::UnpackConfig;
use crate::error::DriverError;

/// Decode one stream's payload through the optional stages its header
/// declares.
///
/// `payload` must be exactly the stream's `data_size` bytes. Stages run
/// in a fixed order — each one optional, gated by its flag bit:
///
/// ```text
/// payload ──▶ [decrypt] ──▶ [decompress] ──▶ [checksum verify] ──▶ bytes
///              bit 6         bit 7            bit 5
/// ```
///
/// Float joining is not part of this pipeline: it spans streams, so it
/// lives in the container walker.
///
/// # Errors
///
/// - [`DriverError::WrongPayloadLength`] if `payload` isn't `data_size`
///   bytes.
/// - [`DriverError::MissingKey`] if the stream is encrypted and the
///   config has no key.
/// - [`DriverError::MissingDictionary`] if the compressed flag is set on
///   a header without a dictionary.
/// - [`DriverError::WrongOutputLength`] if the decoded bytes don't match
///   `orig_data_size` — e.g. truncated compressed input.
/// - [`DriverError::ChecksumMismatch`] if verification is on and the
///   additive checksum of the decoded bytes disagrees with the header.
pub fn decode_stream(
    header: &StreamHeader,
    payload: &[u8],
    config: &UnpackConfig,
) -> Result<Vec<u8>, DriverError> {
    if payload.len() as u64 != header.data_size {
        return Err(DriverError::WrongPayloadLength {
            expected: header.data_size,
            actual: payload.len(),
        });
    }

    let orig_size = usize::try_from(header.orig_data_size)
        .map_err(|_| DriverError::StreamTooLarge {
            size: header.orig_data_size,
        })?;

    // Stage 1: decrypt.
    let plain: Cow<'_, [u8]> = if header.flags.is_encrypted() {
        let key = config.key.ok_or(DriverError::MissingKey)?;
        let mut buf = vec![0u8; payload.len()];
        decrypt(payload, &mut buf, key)?;
        Cow::Owned(buf)
    } else {
        Cow::Borrowed(payload)
    };

    // Stage 2: decompress.
    let decoded: Vec<u8> = if header.flags.is_compressed() {
        let dictionary = header.dictionary.ok_or(DriverError::MissingDictionary)?;
        let mut buf = vec![0u8; orig_size];
        let written = decompress(&plain, &mut buf, &dictionary);
        if written != orig_size {
            return Err(DriverError::WrongOutputLength {
                expected: header.orig_data_size,
                actual: written,
            });
        }
        buf
    } else {
        plain.into_owned()
    };

    if decoded.len() != orig_size {
        return Err(DriverError::WrongOutputLength {
            expected: header.orig_data_size,
            actual: decoded.len(),
        });
    }

    // Stage 3: verify checksum over the fully decoded bytes.
    if header.flags.is_checksummed() && config.verify_checksums {
        let expected = header.checksum.unwrap_or(0);
        let actual = checksum(&decoded);
        if actual != expected {
            return Err(DriverError::ChecksumMismatch { expected, actual });
        }
    }

    Ok(decoded)
}
