/// Implementation of `psf validate`.
///
/// Runs a full unpack and reports either a series of success checkmarks
/// (`✓`) or a diagnostic failure line (`✗`). The main dispatcher turns
/// `Err` into exit code 1.
///
/// # Success output
///
/// ```text
/// ✓ Headers: 3 streams parsed
/// ✓ Stages: all payloads decoded
/// ✓ Checksums: 2 verified where declared
/// ✓ Output: 8192 bytes reassembled
/// ```
///
/// # Failure output
///
/// ```text
/// ✗ Error: checksum mismatch: header says 0x77B4, computed 0x77B5
/// ```
use std::fs;

use anyhow::{Context, Result, anyhow};
use psf_driver::{DriverError, UnpackConfig, Unpacker};

use crate::ValidateArgs;

/// Run the `psf validate` command.
///
/// # Errors
///
/// Returns an error if the file cannot be read, or if the container
/// fails any structural or integrity check.
pub fn run(args: &ValidateArgs) -> Result<()> {
    let bytes =
        fs::read(&args.file).with_context(|| format!("cannot read {}", args.file.display()))?;

    let config = UnpackConfig {
        key: args.key,
        verify_checksums: true,
    };

    match Unpacker::unpack(&bytes, &config) {
        Ok(unpacked) => {
            let checksummed = unpacked
                .streams
                .iter()
                .filter(|s| s.header.flags.is_checksummed())
                .count();
            println!(
                "✓ Headers: {} stream{} parsed",
                unpacked.streams.len(),
                if unpacked.streams.len() == 1 { "" } else { "s" }
            );
            println!("✓ Stages: all payloads decoded");
            println!("✓ Checksums: {checksummed} verified where declared");
            println!("✓ Output: {} bytes reassembled", unpacked.data.len());
            Ok(())
        }

        Err(e) => {
            println!("✗ Error: {}", diagnostic(&e));
            Err(anyhow!("validation failed"))
        }
    }
}

/// Human-readable diagnostic for a driver error, with a hint where one
/// helps.
fn diagnostic(e: &DriverError) -> String {
    match e {
        DriverError::MissingKey => {
            "container has encrypted streams — pass --key to validate them".to_string()
        }
        DriverError::Wire(inner) => format!("invalid header — {inner}"),
        other => other.to_string(),
    }
}
