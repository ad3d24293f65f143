use crate::error::WireError;

/// Magic number identifying a PSF stream header.
///
/// Stored big-endian on the wire: byte 0 is `0x02`, byte 1 is `0x13`.
pub const MAGIC: u16 = 0x0213;

/// Current (and only) format version.
pub const VERSION: u8 = 0x03;

/// Size of the fixed header prefix: magic(2) + version(1) + flags(1) +
/// orig_data_size(8) + data_size(8).
pub const BASE_HEADER_LEN: usize = 20;

/// Number of dictionary bytes carried when the compressed flag is set.
pub const DICTIONARY_LEN: usize = 16;

/// Largest possible header: base + dictionary + checksum.
pub const MAX_HEADER_LEN: usize = BASE_HEADER_LEN + DICTIONARY_LEN + 2;

/// Stream header flags bitfield.
///
/// Bit layout (bit 7 is the most significant):
///   bit 7 = compressed   (payload is dictionary run-length encoded)
///   bit 6 = encrypted    (payload is XORed with the LFSR keystream)
///   bit 5 = checksummed  (header carries an additive checksum to verify)
///   bit 4 = continue     (another stream header follows this stream)
///   bit 3 = float        (stream is half of a split float pair)
///   bit 2 = float3       (stream is part of a three-way float split)
///   bits 1-0 = unused
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StreamFlags(u8);

impl StreamFlags {
    pub const NONE: Self = Self(0);
    pub const COMPRESSED: Self = Self(0b1000_0000);
    pub const ENCRYPTED: Self = Self(0b0100_0000);
    pub const CHECKSUMMED: Self = Self(0b0010_0000);
    pub const CONTINUE: Self = Self(0b0001_0000);
    pub const FLOAT: Self = Self(0b0000_1000);
    pub const FLOAT3: Self = Self(0b0000_0100);

    /// Create flags from a raw byte.
    pub fn from_raw(raw: u8) -> Self {
        Self(raw)
    }

    /// Get the underlying byte value.
    pub fn raw(self) -> u8 {
        self.0
    }

    /// Combine two flag sets.
    #[must_use]
    pub fn with(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    pub fn is_compressed(self) -> bool {
        self.0 & Self::COMPRESSED.0 != 0
    }

    pub fn is_encrypted(self) -> bool {
        self.0 & Self::ENCRYPTED.0 != 0
    }

    pub fn is_checksummed(self) -> bool {
        self.0 & Self::CHECKSUMMED.0 != 0
    }

    pub fn should_continue(self) -> bool {
        self.0 & Self::CONTINUE.0 != 0
    }

    pub fn is_float(self) -> bool {
        self.0 & Self::FLOAT.0 != 0
    }

    pub fn is_float3(self) -> bool {
        self.0 & Self::FLOAT3.0 != 0
    }
}

/// PSF stream header — the variable-length header preceding each stream.
///
/// ```text
/// ┌────────┬──────────┬───────────────────────────────────────────┐
/// │ Offset │ Size     │ Description                               │
/// ├────────┼──────────┼───────────────────────────────────────────┤
/// │ 0x00   │ 2 bytes  │ Magic: 0x0213 (big-endian)                │
/// │ 0x02   │ 1 byte   │ Version: 0x03                             │
/// │ 0x03   │ 1 byte   │ Flags                                     │
/// │ 0x04   │ 8 bytes  │ orig_data_size (little-endian u64)        │
/// │ 0x0C   │ 8 bytes  │ data_size (little-endian u64)             │
/// │ 0x14   │ 16 bytes │ Dictionary — present iff compressed       │
/// │ +0     │ 2 bytes  │ Checksum (big-endian) — iff checksummed   │
/// └────────┴──────────┴───────────────────────────────────────────┘
/// ```
///
/// The total length is 20, 22, 36, or 38 bytes depending on the
/// compressed and checksummed flags. The header is immutable once
/// parsed; downstream stages read it and never write back.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StreamHeader {
    pub flags: StreamFlags,

    /// Total header bytes on the wire, derived from the flags.
    pub header_len: usize,

    /// Size of the stream's logical content after all stages run.
    pub orig_data_size: u64,

    /// Size of the payload as stored (i.e. after compression).
    pub data_size: u64,

    /// Compression dictionary; `Some` iff the compressed flag is set.
    pub dictionary: Option<[u8; DICTIONARY_LEN]>,

    /// Expected checksum; `Some` iff the checksummed flag is set.
    pub checksum: Option<u16>,
}

impl StreamHeader {
    /// Compute the wire length a header with these flags occupies.
    pub fn len_for_flags(flags: StreamFlags) -> usize {
        let mut len = BASE_HEADER_LEN;
        if flags.is_compressed() {
            len += DICTIONARY_LEN;
        }
        if flags.is_checksummed() {
            len += 2;
        }
        len
    }

    /// Parse a stream header from the front of the provided buffer.
    ///
    /// Validation order is fixed: buffer length against the 20-byte
    /// minimum, then magic, then version, then the flag-derived total
    /// length against the buffer. Size fields, dictionary, and checksum
    /// are only read once all checks pass, so a failed parse never
    /// yields a partially-populated header.
    ///
    /// # Errors
    ///
    /// - [`WireError::UnexpectedEof`] if fewer than 20 bytes are available.
    /// - [`WireError::InvalidMagic`] if the first two bytes aren't 0x0213.
    /// - [`WireError::UnsupportedVersion`] if the version byte isn't 0x03.
    /// - [`WireError::TruncatedHeader`] if the flags promise a dictionary
    ///   or checksum the buffer doesn't carry.
    pub fn read_from(buf: &[u8]) -> Result<Self, WireError> {
        if buf.len() < BASE_HEADER_LEN {
            return Err(WireError::UnexpectedEof { offset: buf.len() });
        }

        let magic = u16::from_be_bytes([buf[0], buf[1]]);
        if magic != MAGIC {
            return Err(WireError::InvalidMagic { found: magic });
        }

        if buf[2] != VERSION {
            return Err(WireError::UnsupportedVersion { found: buf[2] });
        }

        let flags = StreamFlags::from_raw(buf[3]);

        // Trust the length only after computing what the flags require.
        let header_len = Self::len_for_flags(flags);
        if buf.len() < header_len {
            return Err(WireError::TruncatedHeader {
                needed: header_len,
                available: buf.len(),
            });
        }

        let orig_data_size = u64::from_le_bytes(buf[4..12].try_into().expect("slice is 8 bytes"));
        let data_size = u64::from_le_bytes(buf[12..20].try_into().expect("slice is 8 bytes"));

        let mut offset = BASE_HEADER_LEN;

        let dictionary = if flags.is_compressed() {
            let dict: [u8; DICTIONARY_LEN] = buf[offset..offset + DICTIONARY_LEN]
                .try_into()
                .expect("slice is 16 bytes");
            offset += DICTIONARY_LEN;
            Some(dict)
        } else {
            None
        };

        let checksum = if flags.is_checksummed() {
            Some(u16::from_be_bytes([buf[offset], buf[offset + 1]]))
        } else {
            None
        };

        Ok(Self {
            flags,
            header_len,
            orig_data_size,
            data_size,
            dictionary,
            checksum,
        })
    }

    /// Serialize this header into the front of the provided buffer.
    ///
    /// The dictionary is written iff the compressed flag is set (a missing
    /// dictionary serializes as zeroes) and the checksum iff the
    /// checksummed flag is set, keeping the output consistent with what
    /// [`read_from`](Self::read_from) expects.
    ///
    /// # Returns
    ///
    /// The number of header bytes written (20, 22, 36, or 38).
    ///
    /// # Errors
    ///
    /// Returns [`WireError::UnexpectedEof`] if `buf` is shorter than the
    /// flag-derived header length.
    pub fn write_to(&self, buf: &mut [u8]) -> Result<usize, WireError> {
        let header_len = Self::len_for_flags(self.flags);
        if buf.len() < header_len {
            return Err(WireError::UnexpectedEof { offset: buf.len() });
        }

        buf[0..2].copy_from_slice(&MAGIC.to_be_bytes());
        buf[2] = VERSION;
        buf[3] = self.flags.raw();
        buf[4..12].copy_from_slice(&self.orig_data_size.to_le_bytes());
        buf[12..20].copy_from_slice(&self.data_size.to_le_bytes());

        let mut offset = BASE_HEADER_LEN;

        if self.flags.is_compressed() {
            let dict = self.dictionary.unwrap_or([0u8; DICTIONARY_LEN]);
            buf[offset..offset + DICTIONARY_LEN].copy_from_slice(&dict);
            offset += DICTIONARY_LEN;
        }

        if self.flags.is_checksummed() {
            let value = self.checksum.unwrap_or(0);
            buf[offset..offset + 2].copy_from_slice(&value.to_be_bytes());
        }

        Ok(header_len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 38-byte header: compressed + encrypted + checksummed (flags 0xE0).
    const FULL_HEADER: [u8; 38] = [
        0x02, 0x13, 0x03, 0xE0, // magic, version, flags
        0x07, 0x35, 0x19, 0x00, 0x00, 0x00, 0x00, 0x00, // orig_data_size = 1651975
        0xA9, 0x59, 0x19, 0x00, 0x00, 0x00, 0x00, 0x00, // data_size = 1661353
        0x00, 0x80, 0x01, 0x02, 0x40, 0x04, 0xC0, 0x08, // dictionary[0..8]
        0x03, 0x10, 0x20, 0x06, 0xA0, 0x60, 0x81, 0x30, // dictionary[8..16]
        0x77, 0xB4, // checksum = 0x77B4 (big-endian)
    ];

    fn minimal_header_bytes(flags: u8) -> [u8; BASE_HEADER_LEN] {
        let mut buf = [0u8; BASE_HEADER_LEN];
        buf[0] = 0x02;
        buf[1] = 0x13;
        buf[2] = 0x03;
        buf[3] = flags;
        buf[4] = 0x10; // orig_data_size = 16
        buf[12] = 0x10; // data_size = 16
        buf
    }

    #[test]
    fn parse_full_header() {
        let header = StreamHeader::read_from(&FULL_HEADER).unwrap();
        assert_eq!(header.header_len, 38);
        assert!(header.flags.is_compressed());
        assert!(header.flags.is_encrypted());
        assert!(header.flags.is_checksummed());
        assert!(!header.flags.should_continue());
        assert!(!header.flags.is_float());
        assert!(!header.flags.is_float3());
        assert_eq!(header.orig_data_size, 1_651_975);
        assert_eq!(header.data_size, 1_661_353);
        assert_eq!(header.dictionary.unwrap(), FULL_HEADER[20..36]);
        assert_eq!(header.checksum, Some(0x77B4));
    }

    #[test]
    fn parse_minimal_20_byte_header() {
        let header = StreamHeader::read_from(&minimal_header_bytes(0x00)).unwrap();
        assert_eq!(header.header_len, 20);
        assert_eq!(header.flags, StreamFlags::NONE);
        assert_eq!(header.orig_data_size, 16);
        assert_eq!(header.data_size, 16);
        assert!(header.dictionary.is_none());
        assert!(header.checksum.is_none());
    }

    #[test]
    fn parse_checksum_only_22_byte_header() {
        let mut buf = [0u8; 22];
        buf[..20].copy_from_slice(&minimal_header_bytes(0x20));
        buf[20] = 0xBE;
        buf[21] = 0xEF;

        let header = StreamHeader::read_from(&buf).unwrap();
        assert_eq!(header.header_len, 22);
        assert!(header.flags.is_checksummed());
        assert!(!header.flags.is_compressed());
        assert_eq!(header.checksum, Some(0xBEEF));
        assert!(header.dictionary.is_none());
    }

    #[test]
    fn parse_compression_only_36_byte_header() {
        let mut buf = [0u8; 36];
        buf[..20].copy_from_slice(&minimal_header_bytes(0x80));
        for (i, b) in buf[20..36].iter_mut().enumerate() {
            *b = u8::try_from(i).unwrap();
        }

        let header = StreamHeader::read_from(&buf).unwrap();
        assert_eq!(header.header_len, 36);
        assert!(header.flags.is_compressed());
        assert!(!header.flags.is_checksummed());
        let expected: Vec<u8> = (0..16).collect();
        assert_eq!(header.dictionary.unwrap().to_vec(), expected);
    }

    #[test]
    fn reject_short_input() {
        let result = StreamHeader::read_from(&[0u8; 10]);
        assert!(matches!(result, Err(WireError::UnexpectedEof { offset: 10 })));
    }

    #[test]
    fn reject_bad_magic() {
        let mut buf = minimal_header_bytes(0x00);
        buf[0] = 0xDE;
        buf[1] = 0xAD;
        let result = StreamHeader::read_from(&buf);
        assert!(matches!(
            result,
            Err(WireError::InvalidMagic { found: 0xDEAD })
        ));
    }

    #[test]
    fn reject_bad_version() {
        let mut buf = minimal_header_bytes(0x00);
        buf[2] = 0x99;
        let result = StreamHeader::read_from(&buf);
        assert!(matches!(
            result,
            Err(WireError::UnsupportedVersion { found: 0x99 })
        ));
    }

    #[test]
    fn reject_compressed_flag_without_dictionary_bytes() {
        // Compressed bit set but only the 20 base bytes supplied.
        let result = StreamHeader::read_from(&minimal_header_bytes(0x80));
        assert!(matches!(
            result,
            Err(WireError::TruncatedHeader {
                needed: 36,
                available: 20
            })
        ));
    }

    #[test]
    fn reject_checksummed_flag_without_checksum_bytes() {
        let result = StreamHeader::read_from(&minimal_header_bytes(0x20));
        assert!(matches!(
            result,
            Err(WireError::TruncatedHeader {
                needed: 22,
                available: 20
            })
        ));
    }

    #[test]
    fn trailing_bytes_are_ignored() {
        // A header followed by payload bytes parses identically.
        let mut buf = vec![0u8; 64];
        buf[..20].copy_from_slice(&minimal_header_bytes(0x10));
        let header = StreamHeader::read_from(&buf).unwrap();
        assert_eq!(header.header_len, 20);
        assert!(header.flags.should_continue());
    }

    #[test]
    fn roundtrip_all_header_lengths() {
        for (flags, expected_len) in [
            (StreamFlags::NONE, 20),
            (StreamFlags::CHECKSUMMED, 22),
            (StreamFlags::COMPRESSED, 36),
            (StreamFlags::COMPRESSED.with(StreamFlags::CHECKSUMMED), 38),
        ] {
            let header = StreamHeader {
                flags,
                header_len: expected_len,
                orig_data_size: 0x1122_3344_5566_7788,
                data_size: 42,
                dictionary: flags.is_compressed().then_some([0xA5; DICTIONARY_LEN]),
                checksum: flags.is_checksummed().then_some(0x77B4),
            };

            let mut buf = [0u8; MAX_HEADER_LEN];
            let written = header.write_to(&mut buf).unwrap();
            assert_eq!(written, expected_len);

            let parsed = StreamHeader::read_from(&buf).unwrap();
            assert_eq!(parsed, header);
        }
    }

    #[test]
    fn write_to_rejects_short_buffer() {
        let header = StreamHeader {
            flags: StreamFlags::COMPRESSED,
            header_len: 36,
            orig_data_size: 1,
            data_size: 1,
            dictionary: Some([0u8; DICTIONARY_LEN]),
            checksum: None,
        };
        let mut buf = [0u8; 20];
        assert!(matches!(
            header.write_to(&mut buf),
            Err(WireError::UnexpectedEof { .. })
        ));
    }
}
