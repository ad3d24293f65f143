/// Implementation of `psf inspect`.
///
/// Walks the container's headers without decoding any payload and prints
/// a per-stream summary. With `--json`, emits a machine-readable document
/// instead.
///
/// # Output format
///
/// ```text
/// Container: 2 streams, 12288 bytes
/// Stream 0 @ 0x0000: flags=0x50 [encrypted continue] data @ 0x1000 (1024 -> 1024 bytes)
/// Stream 1 @ 0x2000: flags=0xA0 [compressed checksummed] data @ 0x3000 (96 -> 160 bytes)
///          checksum=0x77B4 dictionary=16 bytes
/// ```
use std::fs;

use anyhow::{Context, Result};
use psf_driver::{StreamInfo, Unpacker};
use serde::Serialize;

use crate::InspectArgs;

/// JSON shape for one stream in `inspect --json` output.
#[derive(Serialize)]
struct StreamSummary {
    index: usize,
    header_offset: usize,
    data_offset: usize,
    flags: u8,
    compressed: bool,
    encrypted: bool,
    checksummed: bool,
    continues: bool,
    float: bool,
    float3: bool,
    orig_data_size: u64,
    data_size: u64,
    checksum: Option<u16>,
}

impl From<&StreamInfo> for StreamSummary {
    fn from(info: &StreamInfo) -> Self {
        let h = &info.header;
        Self {
            index: info.index,
            header_offset: info.header_offset,
            data_offset: info.data_offset,
            flags: h.flags.raw(),
            compressed: h.flags.is_compressed(),
            encrypted: h.flags.is_encrypted(),
            checksummed: h.flags.is_checksummed(),
            continues: h.flags.should_continue(),
            float: h.flags.is_float(),
            float3: h.flags.is_float3(),
            orig_data_size: h.orig_data_size,
            data_size: h.data_size,
            checksum: h.checksum,
        }
    }
}

/// Run the `psf inspect` command.
///
/// # Errors
///
/// Returns an error if the file cannot be read or its stream chain is
/// structurally invalid.
pub fn run(args: &InspectArgs) -> Result<()> {
    let bytes =
        fs::read(&args.file).with_context(|| format!("cannot read {}", args.file.display()))?;

    let streams = Unpacker::scan(&bytes)
        .with_context(|| format!("failed to scan {}", args.file.display()))?;

    if args.json {
        let summaries: Vec<StreamSummary> = streams.iter().map(StreamSummary::from).collect();
        println!("{}", serde_json::to_string_pretty(&summaries)?);
        return Ok(());
    }

    println!(
        "Container: {} stream{}, {} bytes",
        streams.len(),
        if streams.len() == 1 { "" } else { "s" },
        bytes.len()
    );

    for info in &streams {
        let h = &info.header;
        println!(
            "Stream {} @ {:#06x}: flags={:#04x} [{}] data @ {:#06x} ({} -> {} bytes)",
            info.index,
            info.header_offset,
            h.flags.raw(),
            flag_labels(h),
            info.data_offset,
            h.data_size,
            h.orig_data_size,
        );
        if h.checksum.is_some() || h.dictionary.is_some() {
            let mut extras = Vec::new();
            if let Some(value) = h.checksum {
                extras.push(format!("checksum={value:#06X}"));
            }
            if h.dictionary.is_some() {
                extras.push("dictionary=16 bytes".to_string());
            }
            println!("         {}", extras.join(" "));
        }
    }

    Ok(())
}

/// Space-separated list of set flag names, or `plain` if none.
fn flag_labels(header: &psf_wire::StreamHeader) -> String {
    let mut labels = Vec::new();
    if header.flags.is_compressed() {
        labels.push("compressed");
    }
    if header.flags.is_encrypted() {
        labels.push("encrypted");
    }
    if header.flags.is_checksummed() {
        labels.push("checksummed");
    }
    if header.flags.should_continue() {
        labels.push("continue");
    }
    if header.flags.is_float() {
        labels.push("float");
    }
    if header.flags.is_float3() {
        labels.push("float3");
    }
    if labels.is_empty() {
        "plain".to_string()
    } else {
        labels.join(" ")
    }
}
