#![no_main]

use libfuzzer_sys::fuzz_target;
use psf_codec::decompress;

// Fuzz target: escape-coded run-length decompression.
//
// Input format:
//   bytes 0..16: dictionary
//   byte 16: output capacity (0-255)
//   bytes 17..: compressed stream
//
// Catches bugs in:
// - Escape handling at the end of input
// - Run expansion against a full output buffer
// - Out-of-bounds writes (the return value must never exceed capacity)
fuzz_target!(|data: &[u8]| {
    if data.len() < 17 {
        return;
    }

    let mut dictionary = [0u8; 16];
    dictionary.copy_from_slice(&data[..16]);
    let capacity = usize::from(data[16]);
    let input = &data[17..];

    let mut output = vec![0u8; capacity];
    let written = decompress(input, &mut output, &dictionary);
    assert!(written <= capacity);
});
