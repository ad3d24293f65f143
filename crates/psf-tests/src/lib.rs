//! Test fixtures for the PSF workspace.
//!
//! The production stack deliberately has no compression encoder, so the
//! integration tests build containers by hand: [`StreamSpec`] describes
//! one stream's decoded content and which stages to apply, and
//! [`ContainerBuilder`] lays the streams out with the 4096-byte
//! header/data alignment the walker expects.
//!
//! Compression fixtures use the trivial escape-doubling encoding (every
//! literal `0x07` becomes `07 00`) plus explicit dictionary run tokens
//! appended by the test — enough to exercise every decompressor path
//! without a real encoder.

#![warn(clippy::pedantic)]

use psf_codec::{ESCAPE_BYTE, checksum, decrypt};
use psf_wire::header::{DICTIONARY_LEN, MAX_HEADER_LEN};
use psf_wire::{StreamFlags, StreamHeader};

/// One stream's content and stage configuration.
///
/// Stages apply in packing order: describe the content first, then
/// `compressed`/`compressed_tokens`, then `encrypted` (encryption wraps
/// whatever the payload currently is), then `checksummed`.
#[derive(Clone, Debug)]
pub struct StreamSpec {
    flags: StreamFlags,
    /// The decoded bytes this stream should produce.
    content: Vec<u8>,
    /// The wire payload (content after compression/encryption).
    payload: Vec<u8>,
    dictionary: Option<[u8; DICTIONARY_LEN]>,
    checksum: Option<u16>,
}

impl StreamSpec {
    /// A stream whose payload is its content, no stages.
    #[must_use]
    pub fn plain(content: &[u8]) -> Self {
        Self {
            flags: StreamFlags::NONE,
            content: content.to_vec(),
            payload: content.to_vec(),
            dictionary: None,
            checksum: None,
        }
    }

    /// A compressed stream: content is escape-encoded literal by
    /// literal (no runs) against the given dictionary.
    #[must_use]
    pub fn compressed(content: &[u8], dictionary: [u8; DICTIONARY_LEN]) -> Self {
        let mut payload = Vec::with_capacity(content.len());
        for &b in content {
            payload.push(b);
            if b == ESCAPE_BYTE {
                payload.push(0x00);
            }
        }
        Self {
            flags: StreamFlags::COMPRESSED,
            content: content.to_vec(),
            payload,
            dictionary: Some(dictionary),
            checksum: None,
        }
    }

    /// A compressed stream from an explicit token stream, for tests
    /// that want dictionary runs on the wire.
    #[must_use]
    pub fn compressed_tokens(
        tokens: &[u8],
        decoded: &[u8],
        dictionary: [u8; DICTIONARY_LEN],
    ) -> Self {
        Self {
            flags: StreamFlags::COMPRESSED,
            content: decoded.to_vec(),
            payload: tokens.to_vec(),
            dictionary: Some(dictionary),
            checksum: None,
        }
    }

    /// Encrypt the current payload. The cipher is symmetric, so the
    /// decrypt primitive doubles as the test-side encryptor.
    #[must_use]
    pub fn encrypted(mut self, key: u16) -> Self {
        let mut buf = vec![0u8; self.payload.len()];
        decrypt(&self.payload, &mut buf, key).expect("buffer sized to payload");
        self.payload = buf;
        self.flags = self.flags.with(StreamFlags::ENCRYPTED);
        self
    }

    /// Carry the correct additive checksum of the decoded content.
    #[must_use]
    pub fn checksummed(mut self) -> Self {
        self.checksum = Some(checksum(&self.content));
        self.flags = self.flags.with(StreamFlags::CHECKSUMMED);
        self
    }

    /// Carry an explicit (possibly wrong) checksum value.
    #[must_use]
    pub fn with_checksum_value(mut self, value: u16) -> Self {
        self.checksum = Some(value);
        self.flags = self.flags.with(StreamFlags::CHECKSUMMED);
        self
    }

    /// Mark this stream as the sign+fraction half of a float pair.
    #[must_use]
    pub fn float(mut self) -> Self {
        self.flags = self.flags.with(StreamFlags::FLOAT);
        self
    }

    /// Mark this stream as the fraction stream of a float triple.
    #[must_use]
    pub fn float3(mut self) -> Self {
        self.flags = self.flags.with(StreamFlags::FLOAT3);
        self
    }
}

/// Assembles aligned containers from [`StreamSpec`]s.
#[derive(Default)]
pub struct ContainerBuilder {
    specs: Vec<StreamSpec>,
}

impl ContainerBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn stream(mut self, spec: StreamSpec) -> Self {
        self.specs.push(spec);
        self
    }

    /// Lay out the streams: headers on `HEADER_ALIGN` boundaries, data
    /// on `DATA_ALIGN` boundaries, `continue` set on all but the last.
    ///
    /// # Panics
    ///
    /// Panics if called with no streams, or on a header serialization
    /// bug — fixtures fail loudly rather than producing bad containers.
    #[must_use]
    pub fn build(self) -> Vec<u8> {
        assert!(!self.specs.is_empty(), "container needs at least one stream");

        let last = self.specs.len() - 1;
        let mut container = Vec::new();

        for (i, spec) in self.specs.into_iter().enumerate() {
            let mut flags = spec.flags;
            if i < last {
                flags = flags.with(StreamFlags::CONTINUE);
            }

            let header = StreamHeader {
                flags,
                header_len: StreamHeader::len_for_flags(flags),
                orig_data_size: spec.content.len() as u64,
                data_size: spec.payload.len() as u64,
                dictionary: spec.dictionary,
                checksum: spec.checksum,
            };

            let header_start = align_up(container.len(), psf_driver::HEADER_ALIGN);
            container.resize(header_start, 0);
            let mut buf = [0u8; MAX_HEADER_LEN];
            let written = header.write_to(&mut buf).expect("buffer fits max header");
            container.extend_from_slice(&buf[..written]);

            let data_start = align_up(container.len(), psf_driver::DATA_ALIGN);
            container.resize(data_start, 0);
            container.extend_from_slice(&spec.payload);
        }

        container
    }
}

fn align_up(offset: usize, align: usize) -> usize {
    offset.div_ceil(align) * align
}

/// Split a float into its sign+fraction triple and exponent byte, the
/// way a two-stream packer would.
#[must_use]
pub fn split_float(value: f32) -> ([u8; 3], u8) {
    let bits = value.to_bits();
    let frac = (bits & 0x007F_FFFF).to_le_bytes();
    let exp = u8::try_from((bits >> 23) & 0xFF).expect("8 bits");
    let sign = u8::try_from(bits >> 31).expect("1 bit");
    ([frac[0], frac[1], frac[2] | (sign << 7)], exp)
}

/// Split floats into the three-stream form: fraction triples, exponent
/// bytes, and LSB-first packed sign bits.
#[must_use]
pub fn split_floats3(values: &[f32]) -> (Vec<u8>, Vec<u8>, Vec<u8>) {
    let mut frac = Vec::with_capacity(values.len() * 3);
    let mut exp = Vec::with_capacity(values.len());
    let mut sign = vec![0u8; values.len().div_ceil(8)];
    for (i, &v) in values.iter().enumerate() {
        let bits = v.to_bits();
        let f = (bits & 0x007F_FFFF).to_le_bytes();
        frac.extend_from_slice(&f[..3]);
        exp.push(u8::try_from((bits >> 23) & 0xFF).expect("8 bits"));
        sign[i / 8] |= u8::try_from(bits >> 31).expect("1 bit") << (i % 8);
    }
    (frac, exp, sign)
}
