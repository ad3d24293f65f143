#![no_main]

use libfuzzer_sys::fuzz_target;

// Fuzz target: StreamHeader::read_from header parsing.
//
// Catches bugs in:
// - Flag-derived length calculation vs available bytes
// - Magic/version validation ordering
// - Dictionary and checksum slicing at the variable tail
fuzz_target!(|data: &[u8]| {
    let _ = psf_wire::StreamHeader::read_from(data);
});
