use crate::error::CodecError;
use crate::lfsr::lfsr_step;

/// Decrypt `input` into `output` with the LFSR stream cipher.
///
/// The keystream is generated by seeding the LFSR with `key` and
/// stepping it once per byte *pair*: the first byte of each pair is
/// XORed with the low byte of the new state and the second with the
/// high byte (little-endian keystream order). An odd-length input gets
/// one extra LFSR step for its final byte, which XORs with the low
/// byte only.
///
/// ```text
/// state = key
/// for each pair (a, b):         for a trailing odd byte a:
///     state = lfsr_step(state)      state = lfsr_step(state)
///     out_a = a ^ lo(state)         out_a = a ^ lo(state)
///     out_b = b ^ hi(state)
/// ```
///
/// XOR is its own inverse, so the same call with the same key encrypts.
///
/// # Errors
///
/// Returns [`CodecError::OutputTooSmall`] — with `output` untouched —
/// if `output` cannot hold `input.len()` bytes. There are no partial
/// writes.
pub fn decrypt(input: &[u8], output: &mut [u8], key: u16) -> Result<(), CodecError> {
    if output.len() < input.len() {
        return Err(CodecError::OutputTooSmall {
            needed: input.len(),
            available: output.len(),
        });
    }

    let mut state = key;
    let mut i = 0;
    while i < input.len() {
        state = lfsr_step(state);
        let [lo, hi] = state.to_le_bytes();
        output[i] = input[i] ^ lo;
        if i + 1 < input.len() {
            output[i + 1] = input[i + 1] ^ hi;
        }
        i += 2;
    }

    Ok(())
}
