#![no_main]

use libfuzzer_sys::fuzz_target;
use psf_wire::header::{DICTIONARY_LEN, MAX_HEADER_LEN};
use psf_wire::{StreamFlags, StreamHeader};

// Fuzz target: StreamHeader write->read roundtrip.
//
// Input format:
//   byte 0: flags
//   bytes 1..9: orig_data_size (little-endian)
//   bytes 9..17: data_size (little-endian)
//   bytes 17..33: dictionary
//   bytes 33..35: checksum (little-endian)
//
// Serializes a header and asserts the parse reproduces it exactly.
fuzz_target!(|data: &[u8]| {
    if data.len() < 35 {
        return;
    }

    let flags = StreamFlags::from_raw(data[0]);
    let orig_data_size = u64::from_le_bytes(data[1..9].try_into().unwrap());
    let data_size = u64::from_le_bytes(data[9..17].try_into().unwrap());
    let dictionary: [u8; DICTIONARY_LEN] = data[17..33].try_into().unwrap();
    let checksum = u16::from_le_bytes([data[33], data[34]]);

    let header = StreamHeader {
        flags,
        header_len: StreamHeader::len_for_flags(flags),
        orig_data_size,
        data_size,
        dictionary: flags.is_compressed().then_some(dictionary),
        checksum: flags.is_checksummed().then_some(checksum),
    };

    let mut buf = [0u8; MAX_HEADER_LEN];
    let written = header.write_to(&mut buf).unwrap();
    assert_eq!(written, header.header_len);

    let parsed = StreamHeader::read_from(&buf[..written]).unwrap();
    assert_eq!(parsed, header);
});
