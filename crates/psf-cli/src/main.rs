/// PSF command-line tool — inspect, validate, and unpack packed stream
/// containers.
///
/// # Command overview
///
/// ```text
/// psf <COMMAND> [OPTIONS]
///
/// Commands:
///   inspect    Print a per-stream summary of a packed container
///   validate   Check a packed container for structural correctness
///   unpack     Decode a packed container and write the output bytes
///   help       Print help information
/// ```
///
/// # Exit codes
///
/// | Code | Meaning                                 |
/// |------|-----------------------------------------|
/// | 0    | Success                                 |
/// | 1    | Error (I/O failure, invalid file, etc.) |
///
/// All error details are written to stderr so stdout can be piped cleanly.
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod cmd_inspect;
mod cmd_unpack;
mod cmd_validate;

// ── CLI root ──────────────────────────────────────────────────────────────────

/// The PSF (Packed Stream Format) command-line tool.
#[derive(Parser)]
#[command(name = "psf", version, about = "Packed Stream Format CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

// ── Sub-commands ──────────────────────────────────────────────────────────────

#[derive(Subcommand)]
enum Commands {
    /// Print a per-stream summary of a packed container.
    Inspect(InspectArgs),
    /// Check a packed container for structural correctness.
    Validate(ValidateArgs),
    /// Decode a packed container and write the reassembled bytes.
    Unpack(UnpackArgs),
}

// ── Argument structs ──────────────────────────────────────────────────────────

/// Arguments for `psf inspect`.
///
/// Walks the container's stream headers (no payload decoding) and prints
/// each stream's offsets, flags, sizes, and checksum/dictionary presence.
#[derive(clap::Args)]
pub struct InspectArgs {
    /// Path to the packed container to inspect.
    pub file: PathBuf,

    /// Emit the summary as JSON instead of a table.
    #[arg(long)]
    pub json: bool,
}

/// Arguments for `psf validate`.
///
/// Runs a full unpack (headers, decrypt, decompress, checksum verify,
/// float join) and reports a checkmark summary or a diagnostic error.
#[derive(clap::Args)]
pub struct ValidateArgs {
    /// Path to the packed container to validate.
    pub file: PathBuf,

    /// Decryption key for encrypted streams (hex, e.g. `0x1337`).
    #[arg(long, value_parser = parse_key)]
    pub key: Option<u16>,
}

/// Arguments for `psf unpack`.
#[derive(clap::Args)]
pub struct UnpackArgs {
    /// Path to the packed container to unpack.
    pub file: PathBuf,

    /// Output file for the reassembled bytes.
    #[arg(short, long)]
    pub output: PathBuf,

    /// Decryption key for encrypted streams (hex, e.g. `0x1337`).
    #[arg(long, value_parser = parse_key)]
    pub key: Option<u16>,

    /// Skip checksum verification.
    #[arg(long)]
    pub no_verify: bool,
}

/// Parse a 16-bit key from decimal or `0x`-prefixed hex.
fn parse_key(s: &str) -> Result<u16, String> {
    let parsed = if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        u16::from_str_radix(hex, 16)
    } else {
        s.parse()
    };
    parsed.map_err(|_| format!("`{s}` is not a 16-bit key (use decimal or 0x-hex)"))
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Inspect(args) => cmd_inspect::run(&args),
        Commands::Validate(args) => cmd_validate::run(&args),
        Commands::Unpack(args) => cmd_unpack::run(&args),
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}
