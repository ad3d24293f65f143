use psf_codec::{join_float_streams, join_float_streams3};
use psf_wire::StreamHeader;

use crate::config::UnpackConfig;
use crate::error::DriverError;
use crate::pipeline::decode_stream;

/// Stream headers start on this alignment within a container.
pub const HEADER_ALIGN: usize = 4096;

/// Stream payloads start on this alignment within a container.
pub const DATA_ALIGN: usize = 4096;

/// A container chains at most this many streams.
pub const MAX_STREAMS: usize = 16;

/// Location and parsed header of one stream within a container.
#[derive(Clone, Debug)]
pub struct StreamInfo {
    /// Zero-based position in the stream chain.
    pub index: usize,

    /// Byte offset of the stream's header.
    pub header_offset: usize,

    /// Byte offset of the stream's payload (`data_size` bytes).
    pub data_offset: usize,

    pub header: StreamHeader,
}

/// The result of unpacking a whole container.
#[derive(Debug)]
pub struct UnpackedContainer {
    /// Per-stream layout and headers, in chain order.
    pub streams: Vec<StreamInfo>,

    /// The reassembled output: each stream's decoded bytes in order,
    /// with float groups joined into their 4-byte-per-float form.
    pub data: Vec<u8>,
}

/// Multi-stream container walker.
///
/// A packed container lays streams out on 4096-byte boundaries:
///
/// ```text
/// ┌───────────┬─ pad ─┬───────────────┬─ pad ─┬───────────┬─ pad ─┬───
/// │ header 0  │       │ payload 0     │       │ header 1  │       │ …
/// │ 20-38 B   │       │ data_size B   │       │           │       │
/// └───────────┴───────┴───────────────┴───────┴───────────┴───────┴───
/// 0           ▲       DATA_ALIGN              next HEADER_ALIGN
///             └ header padded to DATA_ALIGN boundary
/// ```
///
/// Each header's `continue` flag announces whether another stream
/// follows. Streams flagged as float splits are grouped: a `float`
/// stream carries sign+fraction bytes and the next stream in the chain
/// carries its exponents; a `float3` stream starts a fraction /
/// exponent / sign triple.
pub struct Unpacker;

impl Unpacker {
    /// Walk the container's headers without decoding any payload.
    ///
    /// Used by tooling that wants layout and flags only, and as the
    /// first pass of [`unpack`](Self::unpack).
    ///
    /// # Errors
    ///
    /// - [`DriverError::UnexpectedEof`] if the container ends before a
    ///   chained header or its declared payload.
    /// - [`DriverError::TooManyStreams`] past the 16-stream limit.
    /// - [`DriverError::Wire`] for malformed headers.
    pub fn scan(container: &[u8]) -> Result<Vec<StreamInfo>, DriverError> {
        let mut streams = Vec::new();
        let mut offset = 0;

        loop {
            if streams.len() == MAX_STREAMS {
                return Err(DriverError::TooManyStreams { limit: MAX_STREAMS });
            }
            if offset >= container.len() {
                return Err(DriverError::UnexpectedEof { offset });
            }

            let header = StreamHeader::read_from(&container[offset..])?;
            let data_size = usize::try_from(header.data_size)
                .map_err(|_| DriverError::StreamTooLarge {
                    size: header.data_size,
                })?;

            let data_offset = align_up(offset + header.header_len, DATA_ALIGN);
            let data_end = data_offset
                .checked_add(data_size)
                .ok_or(DriverError::StreamTooLarge {
                    size: header.data_size,
                })?;
            if data_end > container.len() {
                return Err(DriverError::UnexpectedEof {
                    offset: container.len(),
                });
            }

            let continues = header.flags.should_continue();
            streams.push(StreamInfo {
                index: streams.len(),
                header_offset: offset,
                data_offset,
                header,
            });

            if !continues {
                return Ok(streams);
            }
            offset = align_up(data_end, HEADER_ALIGN);
        }
    }

    /// Unpack a whole container: walk the chain, run every stream
    /// through the stage pipeline, join float groups, and concatenate.
    ///
    /// # Errors
    ///
    /// Everything [`scan`](Self::scan) and
    /// [`decode_stream`](crate::pipeline::decode_stream) can return,
    /// plus [`DriverError::IncompleteFloatGroup`] if the chain ends in
    /// the middle of a float split and [`DriverError::Codec`] if the
    /// group's stream lengths disagree.
    pub fn unpack(
        container: &[u8],
        config: &UnpackConfig,
    ) -> Result<UnpackedContainer, DriverError> {
        let streams = Self::scan(container)?;
        let mut data = Vec::new();

        let mut i = 0;
        while i < streams.len() {
            let info = &streams[i];
            let decoded = decode_stream(&info.header, Self::payload(container, info), config)?;

            if info.header.flags.is_float3() {
                let remaining = streams.len() - i;
                if remaining < 3 {
                    return Err(DriverError::IncompleteFloatGroup {
                        needed: 3,
                        found: remaining,
                    });
                }
                let exp = Self::decode_at(container, &streams[i + 1], config)?;
                let sign = Self::decode_at(container, &streams[i + 2], config)?;

                let mut joined = vec![0u8; decoded.len() / 3 * 4];
                join_float_streams3(&decoded, &exp, &sign, &mut joined)?;
                data.extend_from_slice(&joined);
                i += 3;
            } else if info.header.flags.is_float() {
                let remaining = streams.len() - i;
                if remaining < 2 {
                    return Err(DriverError::IncompleteFloatGroup {
                        needed: 2,
                        found: remaining,
                    });
                }
                let exp = Self::decode_at(container, &streams[i + 1], config)?;

                let mut joined = vec![0u8; decoded.len() / 3 * 4];
                join_float_streams(&decoded, &exp, &mut joined)?;
                data.extend_from_slice(&joined);
                i += 2;
            } else {
                data.extend_from_slice(&decoded);
                i += 1;
            }
        }

        Ok(UnpackedContainer { streams, data })
    }

    /// The payload slice for a scanned stream. Bounds were validated
    /// during the scan.
    fn payload<'a>(container: &'a [u8], info: &StreamInfo) -> &'a [u8] {
        let size = usize::try_from(info.header.data_size).expect("validated during scan");
        &container[info.data_offset..info.data_offset + size]
    }

    fn decode_at(
        container: &[u8],
        info: &StreamInfo,
        config: &UnpackConfig,
    ) -> Result<Vec<u8>, DriverError> {
        decode_stream(&info.header, Self::payload(container, info), config)
    }
}

/// Round `offset` up to the next multiple of `align`.
fn align_up(offset: usize, align: usize) -> usize {
    offset.div_ceil(align) * align
}
