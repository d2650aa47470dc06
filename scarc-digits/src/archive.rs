//! Stream-level archive operations.
//!
//! These functions combine the header codec, the pi-prefix adapter and the
//! streaming digit codec, driving them over `buffer_size` chunks so memory
//! use does not grow with the stream.
//!
//! ## Example
//!
//! ```rust
//! use scarc_digits::{DigitConfig, archive};
//!
//! let archive = archive::compress_to_vec(b"3.14159", &DigitConfig::PI).unwrap();
//! let (digits, report) = archive::extract_to_vec(&archive, &DigitConfig::DEFAULT).unwrap();
//! assert_eq!(digits, b"3.14159");
//! assert!(report.checksum_ok());
//! ```

use crate::config::DigitConfig;
use crate::decoder::{DigitDecoder, MAX_DIGITS_PER_BYTE};
use crate::encoder::DigitEncoder;
use crate::header::{HEADER_SIZE, Header};
use crate::pi;
use scarc_core::error::{Result, ScArcError};
use scarc_core::traits::{CompressStatus, Compressor, Decompressor, FlushMode};
use std::io::{self, Cursor, ErrorKind, Read, Seek, SeekFrom, Write};

/// Result of a finished compress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompressSummary {
    /// Digits encoded (pi prefix and skipped whitespace excluded).
    pub digits: u64,
    /// Packed data bytes written after the header.
    pub packed_bytes: u64,
    /// Raw CRC-64 recorded in the header.
    pub checksum: u64,
    /// Whether the pi flag was set.
    pub pi_mode: bool,
}

impl CompressSummary {
    /// Total archive size including the header.
    pub fn archive_size(&self) -> u64 {
        HEADER_SIZE as u64 + self.packed_bytes
    }
}

/// Result of an extract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractReport {
    /// The archive header.
    pub header: Header,
    /// Whether the `"3."` prefix was written ahead of the digits.
    pub pi_mode: bool,
    /// Digits decoded and written (prefix excluded).
    pub digits_written: u64,
    /// Raw CRC-64 recomputed over the decoded digits.
    pub computed_checksum: u64,
}

impl ExtractReport {
    /// Whether the recomputed checksum matches the header.
    pub fn checksum_ok(&self) -> bool {
        self.computed_checksum == self.header.checksum
    }

    /// Whether the packed data ended before the declared digit count.
    pub fn is_truncated(&self) -> bool {
        self.digits_written < self.header.length
    }

    /// Digits declared by the header but never decoded.
    pub fn missing_digits(&self) -> u64 {
        self.header.length - self.digits_written
    }
}

/// Compress a digit stream into an SC archive.
///
/// The header is written as a placeholder, the packed data streamed after
/// it, and the header rewritten once length and checksum are known. The
/// writer must therefore be seekable; this is checked before anything is
/// read or written.
///
/// # Errors
///
/// - [`ScArcError::NotSeekable`] if the writer cannot report its position.
/// - [`ScArcError::MissingPiPrefix`] in pi mode when the input does not start with `"3."`.
/// - [`ScArcError::InvalidDigit`] on a non-digit byte.
pub fn compress<R: Read, W: Write + Seek>(
    reader: &mut R,
    writer: &mut W,
    config: &DigitConfig,
) -> Result<CompressSummary> {
    let start = writer
        .stream_position()
        .map_err(|e| ScArcError::not_seekable(format!("compress output: {e}")))?;

    Header::placeholder(config.pi_mode).write(writer)?;

    if config.pi_mode {
        pi::strip_prefix(reader)?;
    }

    let chunk = config.chunk_size();
    let mut encoder = DigitEncoder::new(*config);
    let mut input = vec![0u8; chunk];
    // One digit never completes more than one packed byte
    let mut output = vec![0u8; chunk];

    'stream: loop {
        let n = read_chunk(reader, &mut input)?;
        let flush = if n == 0 {
            FlushMode::Finish
        } else {
            FlushMode::None
        };

        let mut pos = 0;
        loop {
            let (consumed, produced, status) =
                encoder.compress(&input[pos..n], &mut output, flush)?;
            pos += consumed;
            writer.write_all(&output[..produced])?;

            match status {
                CompressStatus::Done => break 'stream,
                CompressStatus::NeedsOutput => continue,
                CompressStatus::NeedsInput => break,
            }
        }
    }

    let summary = encoder.summary();
    let header = Header::new(summary.digits, summary.checksum, config.pi_mode);

    let end = writer.stream_position()?;
    writer.seek(SeekFrom::Start(start))?;
    header.write(writer)?;
    writer.seek(SeekFrom::Start(end))?;
    writer.flush()?;

    log::debug!(
        "compressed {} digits into {} bytes, checksum {:016X}",
        summary.digits,
        summary.packed_bytes,
        summary.checksum
    );

    Ok(CompressSummary {
        digits: summary.digits,
        packed_bytes: summary.packed_bytes,
        checksum: summary.checksum,
        pi_mode: config.pi_mode,
    })
}

/// Extract an SC archive, writing the digits to `writer`.
///
/// Exactly the number of digits declared by the header are decoded; any
/// bytes after that are ignored. A checksum mismatch or a truncated data
/// section is logged and reported, but does not fail the call. Use
/// [`verify`] when either should be an error.
pub fn extract<R: Read, W: Write>(
    reader: &mut R,
    writer: &mut W,
    config: &DigitConfig,
) -> Result<ExtractReport> {
    let header = Header::read(reader)?;
    let pi_mode = config.pi_mode || header.is_pi();
    if pi_mode {
        pi::restore_prefix(writer)?;
    }

    let mut decoder = DigitDecoder::new(header.length);
    let chunk = config.chunk_size();
    let mut input = vec![0u8; chunk];
    let mut output = vec![0u8; chunk * MAX_DIGITS_PER_BYTE];

    while !decoder.is_finished() {
        let n = read_chunk(reader, &mut input)?;
        if n == 0 {
            break;
        }

        let mut pos = 0;
        while pos < n && !decoder.is_finished() {
            let (consumed, produced, _) = decoder.decompress(&input[pos..n], &mut output)?;
            pos += consumed;
            writer.write_all(&output[..produced])?;
        }
    }
    writer.flush()?;

    let summary = decoder.summary();
    let report = ExtractReport {
        header,
        pi_mode,
        digits_written: summary.digits,
        computed_checksum: summary.checksum,
    };

    if report.is_truncated() {
        log::warn!(
            "archive truncated: decoded {} of {} digits",
            report.digits_written,
            header.length
        );
    }
    if !report.checksum_ok() {
        log::warn!(
            "CRC64 mismatch: stored {:016X}, computed {:016X}",
            header.checksum,
            report.computed_checksum
        );
    }

    Ok(report)
}

/// Decode an archive without keeping the output, failing on any damage.
///
/// # Errors
///
/// - [`ScArcError::UnexpectedEof`] if the data section is truncated.
/// - [`ScArcError::CrcMismatch`] if the recomputed checksum differs.
pub fn verify<R: Read>(reader: &mut R) -> Result<ExtractReport> {
    let report = extract(reader, &mut io::sink(), &DigitConfig::DEFAULT)?;

    if report.is_truncated() {
        return Err(ScArcError::unexpected_eof(report.missing_digits()));
    }
    if !report.checksum_ok() {
        return Err(ScArcError::crc_mismatch(
            report.header.checksum,
            report.computed_checksum,
        ));
    }

    Ok(report)
}

/// Read only the archive header.
pub fn read_header<R: Read>(reader: &mut R) -> Result<Header> {
    Header::read(reader)
}

/// Compress an in-memory digit buffer into an in-memory archive.
pub fn compress_to_vec(digits: &[u8], config: &DigitConfig) -> Result<Vec<u8>> {
    let mut output = Cursor::new(Vec::with_capacity(HEADER_SIZE + digits.len() / 2));
    compress(&mut Cursor::new(digits), &mut output, config)?;
    Ok(output.into_inner())
}

/// Extract an in-memory archive.
pub fn extract_to_vec(archive: &[u8], config: &DigitConfig) -> Result<(Vec<u8>, ExtractReport)> {
    let mut output = Vec::new();
    let report = extract(&mut Cursor::new(archive), &mut output, config)?;
    Ok((output, report))
}

fn read_chunk<R: Read>(reader: &mut R, buf: &mut [u8]) -> Result<usize> {
    loop {
        match reader.read(buf) {
            Ok(n) => return Ok(n),
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scarc_core::crc::CRC64_INIT;

    #[test]
    fn test_compress_golden_archive() {
        let archive = compress_to_vec(b"0123456789", &DigitConfig::DEFAULT).unwrap();
        assert_eq!(
            archive,
            [
                0x53, 0x43, 0x00, 0x00, 0x0A, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x74,
                0x75, 0x79, 0x63, 0x6A, 0xB0, 0x11, 0x5A, 0x05, 0x39, 0x73, 0x7B, 0xC0,
            ]
        );
    }

    #[test]
    fn test_compress_empty() {
        let archive = compress_to_vec(b"", &DigitConfig::DEFAULT).unwrap();
        assert_eq!(archive.len(), HEADER_SIZE);

        let header = read_header(&mut Cursor::new(&archive)).unwrap();
        assert_eq!(header.length, 0);
        assert_eq!(header.checksum, CRC64_INIT);

        let (digits, report) = extract_to_vec(&archive, &DigitConfig::DEFAULT).unwrap();
        assert!(digits.is_empty());
        assert!(report.checksum_ok());
    }

    #[test]
    fn test_compress_summary() {
        let mut output = Cursor::new(Vec::new());
        let summary =
            compress(&mut Cursor::new(b"3.1415926535"), &mut output, &DigitConfig::PI).unwrap();
        assert_eq!(summary.digits, 10);
        assert_eq!(summary.checksum, 0x17CD8C820989DE8C);
        assert!(summary.pi_mode);
        assert_eq!(summary.archive_size(), output.get_ref().len() as u64);
    }

    #[test]
    fn test_compress_after_existing_data() {
        // The header is rewritten where it started, not at offset 0
        let mut output = Cursor::new(b"junk".to_vec());
        output.seek(SeekFrom::End(0)).unwrap();
        compress(&mut Cursor::new(b"42"), &mut output, &DigitConfig::DEFAULT).unwrap();

        let bytes = output.into_inner();
        assert_eq!(&bytes[..4], b"junk");
        let header = read_header(&mut Cursor::new(&bytes[4..])).unwrap();
        assert_eq!(header.length, 2);
    }

    #[test]
    fn test_pi_flag_forces_prefix() {
        let archive = compress_to_vec(b"3.14", &DigitConfig::PI).unwrap();
        let (digits, report) = extract_to_vec(&archive, &DigitConfig::DEFAULT).unwrap();
        assert_eq!(digits, b"3.14");
        assert!(report.pi_mode);
        assert_eq!(report.digits_written, 2);
    }

    #[test]
    fn test_pi_requested_without_flag() {
        let archive = compress_to_vec(b"14", &DigitConfig::DEFAULT).unwrap();
        let (digits, _) = extract_to_vec(&archive, &DigitConfig::PI).unwrap();
        assert_eq!(digits, b"3.14");
    }

    #[test]
    fn test_extract_reports_truncation() {
        let archive = compress_to_vec(b"31415926535", &DigitConfig::DEFAULT).unwrap();
        let (digits, report) =
            extract_to_vec(&archive[..HEADER_SIZE + 2], &DigitConfig::DEFAULT).unwrap();
        assert!(report.is_truncated());
        assert_eq!(report.missing_digits(), 11 - digits.len() as u64);
        assert!(!report.checksum_ok());
    }

    #[test]
    fn test_verify_ok() {
        let archive = compress_to_vec(b"2718281828", &DigitConfig::DEFAULT).unwrap();
        let report = verify(&mut Cursor::new(&archive)).unwrap();
        assert_eq!(report.digits_written, 10);
    }

    #[test]
    fn test_verify_truncated() {
        let archive = compress_to_vec(b"2718281828", &DigitConfig::DEFAULT).unwrap();
        let err = verify(&mut Cursor::new(&archive[..HEADER_SIZE + 1])).unwrap_err();
        assert!(matches!(err, ScArcError::UnexpectedEof { .. }));
    }

    #[test]
    fn test_verify_crc_mismatch() {
        let mut archive = compress_to_vec(b"31415926535", &DigitConfig::DEFAULT).unwrap();
        archive[HEADER_SIZE + 1] ^= 0xFF;
        let err = verify(&mut Cursor::new(&archive)).unwrap_err();
        assert!(matches!(
            err,
            ScArcError::CrcMismatch {
                expected: 0x03C888A5E852B20E,
                ..
            }
        ));
    }
}
