//! Info command implementation.

use crate::utils::{CliResult, bits_per_digit, format_crc, open_input};
use scarc_digits::{HEADER_SIZE, archive};
use std::path::Path;

/// Print the fields of an archive header.
pub fn cmd_info(input: Option<&Path>) -> CliResult {
    let mut source = open_input(input)?;
    let header = archive::read_header(&mut source.reader)?;

    println!("Archive Information");
    println!("===================");
    if let Some(path) = input {
        println!("File: {}", path.display());
    }
    if let Some(len) = source.len {
        println!("Size: {} bytes", len);
    }
    println!("Format version: {}", header.version);
    println!(
        "Flags: {:#04x}{}",
        header.flags,
        if header.is_pi() { " (pi)" } else { "" }
    );
    if header.unknown_flags() != 0 {
        println!("  Unknown flag bits: {:#04x}", header.unknown_flags());
    }

    println!();
    println!("Contents:");
    println!("  Digits: {}", header.length);
    println!("  CRC64: {}", format_crc(header.checksum));
    if let Some(len) = source.len {
        let packed = len.saturating_sub(HEADER_SIZE as u64);
        println!("  Packed size: {} bytes", packed);
        if header.length > 0 {
            println!(
                "  Bits per digit: {:.3}",
                bits_per_digit(packed, header.length)
            );
            println!(
                "  Compression ratio: {:.1}%",
                (1.0 - len as f64 / header.length as f64) * 100.0
            );
        }
    }

    Ok(())
}
