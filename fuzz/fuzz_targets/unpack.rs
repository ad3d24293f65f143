#![no_main]

use libfuzzer_sys::fuzz_target;
use psf_driver::{UnpackConfig, Unpacker};

// Fuzz target: full container unpack on arbitrary bytes.
//
// Input format:
//   bytes 0..2: decryption key (little-endian)
//   bytes 2..: container
//
// Catches bugs in:
// - Stream chain walking (alignment, continue flags, stream limit)
// - Payload bounds vs declared data_size
// - Float group assembly across streams
// Every input must produce Ok or a structured error, never a panic.
fuzz_target!(|data: &[u8]| {
    if data.len() < 2 {
        return;
    }

    let key = u16::from_le_bytes([data[0], data[1]]);
    let config = UnpackConfig::with_key(key);
    let _ = Unpacker::unpack(&data[2..], &config);
});
