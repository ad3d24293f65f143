/// Additive 16-bit checksum over a byte slice.
///
/// Every byte's unsigned value is summed into a `u16` accumulator with
/// silent wraparound (modulo 65536). This is a plain additive checksum,
/// not a CRC; summation order doesn't affect the result, but the exact
/// wraparound semantics do. An empty slice sums to 0.
#[must_use]
pub fn checksum(input: &[u8]) -> u16 {
    input
        .iter()
        .fold(0u16, |acc, &b| acc.wrapping_add(u16::from(b)))
}
