/// Implementation of `psf unpack`.
///
/// Decodes every stream in the container (decrypt, decompress, verify,
/// join float groups) and writes the reassembled bytes to the output
/// path. A short summary goes to stdout.
use std::fs;

use anyhow::{Context, Result};
use psf_driver::{UnpackConfig, Unpacker};

use crate::UnpackArgs;

/// Run the `psf unpack` command.
///
/// # Errors
///
/// Returns an error if the input cannot be read, the container fails to
/// decode, or the output cannot be written.
pub fn run(args: &UnpackArgs) -> Result<()> {
    let bytes =
        fs::read(&args.file).with_context(|| format!("cannot read {}", args.file.display()))?;

    let config = UnpackConfig {
        key: args.key,
        verify_checksums: !args.no_verify,
    };

    let unpacked = Unpacker::unpack(&bytes, &config)
        .with_context(|| format!("failed to unpack {}", args.file.display()))?;

    fs::write(&args.output, &unpacked.data)
        .with_context(|| format!("cannot write {}", args.output.display()))?;

    println!(
        "Unpacked {} stream{} ({} bytes) -> {}",
        unpacked.streams.len(),
        if unpacked.streams.len() == 1 { "" } else { "s" },
        unpacked.data.len(),
        args.output.display()
    );

    Ok(())
}
