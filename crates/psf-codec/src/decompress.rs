use psf_wire::header::DICTIONARY_LEN;

/// Byte value that introduces a run-length token in compressed data.
pub const ESCAPE_BYTE: u8 = 0x07;

/// Decompress an escape-coded run-length stream into `output`.
///
/// Every byte other than [`ESCAPE_BYTE`] is a literal and copies
/// through. An escape byte is decoded by looking at what follows:
///
/// ```text
/// ┌─────────────────────────┬─────────────────────────┬──────────┐
/// │ Input                   │ Output                  │ Consumed │
/// ├─────────────────────────┼─────────────────────────┼──────────┤
/// │ byte ≠ 0x07             │ that byte               │ 1        │
/// │ 0x07 at end of input    │ 0x07 (literal)          │ 1        │
/// │ 0x07, 0x00              │ 0x07 (literal)          │ 2        │
/// │ 0x07, code C (C ≠ 0)    │ dictionary[C & 0x0F]    │ 2        │
/// │                         │   repeated (C >> 4)×    │          │
/// └─────────────────────────┴─────────────────────────┴──────────┘
/// ```
///
/// A code byte's low nibble indexes the 16-entry dictionary and its
/// high nibble is the repeat count, so a run can emit 0 to 15 bytes.
///
/// The moment `output` is full the function stops — even mid-run — and
/// returns the count written so far. It never writes past `output`.
/// Callers detect truncation by comparing the return value against the
/// expected decompressed size.
///
/// # Returns
///
/// The number of bytes written to `output` (0 for empty input).
pub fn decompress(input: &[u8], output: &mut [u8], dictionary: &[u8; DICTIONARY_LEN]) -> usize {
    let mut written = 0;
    let mut i = 0;

    while i < input.len() {
        if written == output.len() {
            return written;
        }

        let byte = input[i];
        if byte != ESCAPE_BYTE {
            output[written] = byte;
            written += 1;
            i += 1;
            continue;
        }

        // A trailing escape with no code byte is a literal escape.
        if i + 1 == input.len() {
            output[written] = ESCAPE_BYTE;
            written += 1;
            i += 1;
            continue;
        }

        let code = input[i + 1];
        i += 2;

        if code == 0x00 {
            output[written] = ESCAPE_BYTE;
            written += 1;
            continue;
        }

        let value = dictionary[usize::from(code & 0x0F)];
        let repeat = usize::from(code >> 4);
        for _ in 0..repeat {
            if written == output.len() {
                return written;
            }
            output[written] = value;
            written += 1;
        }
    }

    written
}

#[cfg(test)]
mod tests {
    use super::*;

    const DICT: [u8; DICTIONARY_LEN] = [
        0x00, 0x11, 0x32, 0x33, 0x44, 0x55, 0x66, 0x77, 0x88, 0x99, 0xAA, 0xBB, 0xCC, 0xDD, 0xEE,
        0xFF,
    ];

    #[test]
    fn literals_copy_through() {
        let input = [0x01, 0x02, 0x03];
        let mut output = [0u8; 8];
        let n = decompress(&input, &mut output, &DICT);
        assert_eq!(&output[..n], &[0x01, 0x02, 0x03]);
    }

    #[test]
    fn empty_input_writes_nothing() {
        let mut output = [0xEEu8; 4];
        assert_eq!(decompress(&[], &mut output, &DICT), 0);
        assert_eq!(output, [0xEE; 4]);
    }

    #[test]
    fn escape_then_zero_emits_literal_escape() {
        let input = [ESCAPE_BYTE, 0x00];
        let mut output = [0u8; 4];
        let n = decompress(&input, &mut output, &DICT);
        assert_eq!(&output[..n], &[ESCAPE_BYTE]);
    }

    #[test]
    fn trailing_escape_is_a_literal() {
        let input = [0xAA, ESCAPE_BYTE];
        let mut output = [0u8; 4];
        let n = decompress(&input, &mut output, &DICT);
        assert_eq!(&output[..n], &[0xAA, ESCAPE_BYTE]);
    }

    #[test]
    fn zero_repeat_run_emits_nothing() {
        // Code 0x02: index 2, repeat count 0.
        let input = [ESCAPE_BYTE, 0x02];
        let mut output = [0u8; 4];
        assert_eq!(decompress(&input, &mut output, &DICT), 0);
    }

    #[test]
    fn run_expands_dictionary_entry() {
        // Code 0x42: index 2 (dictionary 0x32), repeat count 4.
        let input = [0x01, ESCAPE_BYTE, 0x42];
        let mut output = [0u8; 8];
        let n = decompress(&input, &mut output, &DICT);
        assert_eq!(&output[..n], &[0x01, 0x32, 0x32, 0x32, 0x32]);
    }

    #[test]
    fn maximum_run_length() {
        // Code 0xFF: index 15, repeat count 15.
        let input = [ESCAPE_BYTE, 0xFF];
        let mut output = [0u8; 16];
        let n = decompress(&input, &mut output, &DICT);
        assert_eq!(n, 15);
        assert!(output[..15].iter().all(|&b| b == 0xFF));
    }

    #[test]
    fn stops_when_output_fills_mid_run() {
        // Run of 8, but only 3 bytes of capacity.
        let input = [ESCAPE_BYTE, 0x84];
        let mut output = [0u8; 3];
        let n = decompress(&input, &mut output, &DICT);
        assert_eq!(n, 3);
        assert_eq!(output, [0x44, 0x44, 0x44]);
    }

    #[test]
    fn stops_when_output_fills_on_literal() {
        let input = [0x01, 0x02, 0x03, 0x04];
        let mut output = [0u8; 2];
        let n = decompress(&input, &mut output, &DICT);
        assert_eq!(n, 2);
        assert_eq!(output, [0x01, 0x02]);
    }

    #[test]
    fn mixed_literals_and_runs() {
        let input = [0x10, ESCAPE_BYTE, 0x21, 0x20, ESCAPE_BYTE, 0x00, ESCAPE_BYTE];
        let mut output = [0u8; 16];
        let n = decompress(&input, &mut output, &DICT);
        assert_eq!(
            &output[..n],
            &[0x10, 0x11, 0x11, 0x20, ESCAPE_BYTE, ESCAPE_BYTE]
        );
    }

    #[test]
    fn zero_capacity_output() {
        let input = [0x01, 0x02];
        let mut output = [];
        assert_eq!(decompress(&input, &mut output, &DICT), 0);
    }
}
