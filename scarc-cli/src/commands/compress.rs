//! Compress command implementation.

use crate::utils::{
    CliResult, bits_per_digit, create_output, create_progress_bar, format_crc, open_input,
};
use scarc_digits::{DigitConfig, archive};
use std::path::Path;

/// Pack a digit stream into an SC archive file.
///
/// The archive header is finalized by seeking back to the start of the
/// output, so the output must be a regular file.
pub fn cmd_compress(
    input: Option<&Path>,
    output: Option<&Path>,
    config: &DigitConfig,
    progress: bool,
) -> CliResult {
    let Some(output) = output else {
        return Err("Can't compress to stdout".into());
    };

    let source = open_input(input)?;
    let mut writer = create_output(output, input)?;

    let pb = create_progress_bar(source.len, progress);
    pb.set_message("Compressing");
    let mut reader = pb.wrap_read(source.reader);

    let summary = archive::compress(&mut reader, &mut writer, config)?;
    pb.finish_with_message("Done");

    log::info!(
        "{}: {} digits -> {} bytes ({:.3} bits/digit), CRC64 {}",
        output.display(),
        summary.digits,
        summary.archive_size(),
        bits_per_digit(summary.packed_bytes, summary.digits),
        format_crc(summary.checksum)
    );
    Ok(())
}
