/// Advance the 16-bit LFSR by one step.
///
/// Feedback taps sit at bit positions 0, 6, 9, and 13 of the current
/// state. The four tap bits are XORed into a single feedback bit, the
/// state shifts right by one, and the feedback bit becomes the new
/// bit 15:
///
/// ```text
///  bit: 15 14 13 12 11 10  9  8  7  6  5  4  3  2  1  0
///        │      ▲                ▲        ▲              ▲
///        │      └────────┬───────┴────────┴──────────────┘
///        │               XOR
///        └───◀───────────┘        (state >> 1, feedback → bit 15)
/// ```
///
/// The tap polynomial is maximal-length: from any non-zero seed the
/// state walks all 65535 non-zero 16-bit values before repeating.
/// `0x0000` is a fixed point and never appears in a non-zero run.
///
/// This is a pure function — the caller owns the state and threads it
/// between calls (`state = lfsr_step(state)`), which keeps concurrent
/// keystreams trivially independent.
#[must_use]
pub fn lfsr_step(state: u16) -> u16 {
    let feedback = (state ^ (state >> 6) ^ (state >> 9) ^ (state >> 13)) & 1;
    (state >> 1) | (feedback << 15)
}
