//! Failure-path and boundary coverage for the container driver.
//!
//! Happy paths live in `roundtrip.rs`; everything here is about how the
//! driver refuses bad input: wrong keys, bad checksums, truncated or
//! over-long chains, and compressed payloads that don't expand to the
//! size their header promises.

use psf_codec::ESCAPE_BYTE;
use psf_driver::{DriverError, MAX_STREAMS, UnpackConfig, Unpacker};
use psf_tests::{ContainerBuilder, StreamSpec};

const DICT: [u8; 16] = *b"0123456789abcdef";

#[test]
fn empty_stream_decodes_to_nothing() {
    let container = ContainerBuilder::new().stream(StreamSpec::plain(&[])).build();
    let unpacked = Unpacker::unpack(&container, &UnpackConfig::default()).unwrap();
    assert!(unpacked.data.is_empty());
    assert_eq!(unpacked.streams.len(), 1);
}

#[test]
fn odd_length_encrypted_stream() {
    // The keystream pairs bytes; an odd tail only sees the low byte.
    let content = [0x10, 0x20, 0x30, 0x40, 0x50];
    let container = ContainerBuilder::new()
        .stream(StreamSpec::plain(&content).encrypted(0x1337))
        .build();

    let unpacked = Unpacker::unpack(&container, &UnpackConfig::with_key(0x1337)).unwrap();
    assert_eq!(unpacked.data, content);
}

#[test]
fn encrypted_stream_without_key_is_rejected() {
    let container = ContainerBuilder::new()
        .stream(StreamSpec::plain(b"secret").encrypted(0x1337))
        .build();

    let result = Unpacker::unpack(&container, &UnpackConfig::default());
    assert!(matches!(result, Err(DriverError::MissingKey)));
}

#[test]
fn wrong_key_fails_the_checksum() {
    let container = ContainerBuilder::new()
        .stream(StreamSpec::plain(b"payload bytes").encrypted(0x1337).checksummed())
        .build();

    let result = Unpacker::unpack(&container, &UnpackConfig::with_key(0xBEEF));
    assert!(matches!(result, Err(DriverError::ChecksumMismatch { .. })));
}

#[test]
fn checksum_mismatch_carries_both_values() {
    let container = ContainerBuilder::new()
        .stream(StreamSpec::plain(&[0x01, 0x02]).with_checksum_value(0xAAAA))
        .build();

    let result = Unpacker::unpack(&container, &UnpackConfig::default());
    assert!(matches!(
        result,
        Err(DriverError::ChecksumMismatch {
            expected: 0xAAAA,
            actual: 0x0003
        })
    ));
}

#[test]
fn checksum_mismatch_ignored_when_verification_is_off() {
    let container = ContainerBuilder::new()
        .stream(StreamSpec::plain(&[0x01, 0x02]).with_checksum_value(0xAAAA))
        .build();

    let config = UnpackConfig {
        verify_checksums: false,
        ..UnpackConfig::default()
    };
    let unpacked = Unpacker::unpack(&container, &config).unwrap();
    assert_eq!(unpacked.data, [0x01, 0x02]);
}

#[test]
fn trailing_escape_decodes_as_literal() {
    let tokens = [0xAA, ESCAPE_BYTE];
    let container = ContainerBuilder::new()
        .stream(StreamSpec::compressed_tokens(&tokens, &[0xAA, ESCAPE_BYTE], DICT))
        .build();

    let unpacked = Unpacker::unpack(&container, &UnpackConfig::default()).unwrap();
    assert_eq!(unpacked.data, [0xAA, ESCAPE_BYTE]);
}

#[test]
fn dictionary_runs_expand() {
    // dictionary['3' at index 3] repeated 15 times, after two literals.
    let tokens = [0x11, 0x22, ESCAPE_BYTE, 0xF3];
    let mut decoded = vec![0x11, 0x22];
    decoded.extend_from_slice(&[b'3'; 15]);

    let container = ContainerBuilder::new()
        .stream(StreamSpec::compressed_tokens(&tokens, &decoded, DICT))
        .build();

    let unpacked = Unpacker::unpack(&container, &UnpackConfig::default()).unwrap();
    assert_eq!(unpacked.data, decoded);
}

#[test]
fn under_expanding_payload_is_a_length_error() {
    // Tokens expand to 2 bytes but the header promises 6.
    let tokens = [0x11, 0x22];
    let container = ContainerBuilder::new()
        .stream(StreamSpec::compressed_tokens(&tokens, &[0u8; 6], DICT))
        .build();

    let result = Unpacker::unpack(&container, &UnpackConfig::default());
    assert!(matches!(
        result,
        Err(DriverError::WrongOutputLength {
            expected: 6,
            actual: 2
        })
    ));
}

#[test]
fn run_past_declared_size_truncates_at_the_boundary() {
    // A 15-byte run against a header that promises only 4 bytes: the
    // decompressor stops exactly at the output boundary, so the stream
    // decodes to the declared size.
    let tokens = [ESCAPE_BYTE, 0xF3];
    let container = ContainerBuilder::new()
        .stream(StreamSpec::compressed_tokens(&tokens, &[b'3'; 4], DICT))
        .build();

    let unpacked = Unpacker::unpack(&container, &UnpackConfig::default()).unwrap();
    assert_eq!(unpacked.data, [b'3'; 4]);
}

#[test]
fn truncated_container_is_rejected() {
    let mut container = ContainerBuilder::new()
        .stream(StreamSpec::plain(&[0xAB; 64]))
        .build();
    container.truncate(container.len() - 32);

    let result = Unpacker::unpack(&container, &UnpackConfig::default());
    assert!(matches!(result, Err(DriverError::UnexpectedEof { .. })));
}

#[test]
fn chain_longer_than_the_stream_limit_is_rejected() {
    let mut builder = ContainerBuilder::new();
    for i in 0..=MAX_STREAMS {
        builder = builder.stream(StreamSpec::plain(&[u8::try_from(i).unwrap()]));
    }

    let result = Unpacker::unpack(&builder.build(), &UnpackConfig::default());
    assert!(matches!(
        result,
        Err(DriverError::TooManyStreams { limit: MAX_STREAMS })
    ));
}

#[test]
fn chain_at_the_stream_limit_is_accepted() {
    let mut builder = ContainerBuilder::new();
    for i in 0..MAX_STREAMS {
        builder = builder.stream(StreamSpec::plain(&[u8::try_from(i).unwrap()]));
    }

    let unpacked = Unpacker::unpack(&builder.build(), &UnpackConfig::default()).unwrap();
    assert_eq!(unpacked.streams.len(), MAX_STREAMS);
    assert_eq!(unpacked.data.len(), MAX_STREAMS);
}

#[test]
fn float_stream_at_end_of_chain_is_incomplete() {
    let container = ContainerBuilder::new()
        .stream(StreamSpec::plain(&[0x00, 0x00, 0x16]).float())
        .build();

    let result = Unpacker::unpack(&container, &UnpackConfig::default());
    assert!(matches!(
        result,
        Err(DriverError::IncompleteFloatGroup {
            needed: 2,
            found: 1
        })
    ));
}

#[test]
fn float_triple_missing_its_sign_stream_is_incomplete() {
    let container = ContainerBuilder::new()
        .stream(StreamSpec::plain(&[0x00, 0x00, 0x16]).float3())
        .stream(StreamSpec::plain(&[0x87]))
        .build();

    let result = Unpacker::unpack(&container, &UnpackConfig::default());
    assert!(matches!(
        result,
        Err(DriverError::IncompleteFloatGroup {
            needed: 3,
            found: 2
        })
    ));
}

#[test]
fn garbage_at_stream_zero_is_a_wire_error() {
    let result = Unpacker::unpack(&[0xFFu8; 4096], &UnpackConfig::default());
    assert!(matches!(result, Err(DriverError::Wire(_))));
}
