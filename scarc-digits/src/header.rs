//! SC archive header parsing and writing.
//!
//! The header is a fixed 20-byte block at the start of every archive:
//!
//! ```text
//! offset 0   'S' 'C'        magic
//! offset 2   version        (0)
//! offset 3   flags          bit 0 = pi mode
//! offset 4   length         u64 LE, digit count (pi prefix excluded)
//! offset 12  checksum       u64 LE, raw CRC-64 of the digits
//! offset 20  packed data
//! ```
//!
//! Length and checksum are only known once all data has been packed, so
//! writers emit a placeholder first and rewrite the header at the end.

use scarc_core::crc::CRC64_INIT;
use scarc_core::error::{Result, ScArcError};
use std::io::{ErrorKind, Read, Write};

/// SC archive magic bytes.
pub const MAGIC: [u8; 2] = *b"SC";

/// Archive format version written and accepted by this crate.
pub const FORMAT_VERSION: u8 = 0;

/// Size of the fixed header in bytes.
pub const HEADER_SIZE: usize = 20;

/// Header flag bits.
pub mod flags {
    /// Digits were preceded by a literal `"3."` that was stripped.
    pub const PI: u8 = 0x01;
    /// All flag bits this version understands.
    pub const KNOWN: u8 = PI;
}

/// SC archive header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    /// Format version.
    pub version: u8,
    /// Flag bits (see [`flags`]).
    pub flags: u8,
    /// Number of digits encoded.
    pub length: u64,
    /// Raw CRC-64 of the encoded digits.
    pub checksum: u64,
}

impl Header {
    /// Create a header for a finished encode.
    pub fn new(length: u64, checksum: u64, pi_mode: bool) -> Self {
        Self {
            version: FORMAT_VERSION,
            flags: if pi_mode { flags::PI } else { 0 },
            length,
            checksum,
        }
    }

    /// Header reserved before the data is written: zero length, empty checksum.
    pub fn placeholder(pi_mode: bool) -> Self {
        Self::new(0, CRC64_INIT, pi_mode)
    }

    /// Whether the pi flag is set.
    pub fn is_pi(&self) -> bool {
        self.flags & flags::PI != 0
    }

    /// Flag bits this version does not know about.
    pub fn unknown_flags(&self) -> u8 {
        self.flags & !flags::KNOWN
    }

    /// Serialize to the fixed byte layout.
    pub fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        let mut buf = [0u8; HEADER_SIZE];
        buf[0..2].copy_from_slice(&MAGIC);
        buf[2] = self.version;
        buf[3] = self.flags;
        buf[4..12].copy_from_slice(&self.length.to_le_bytes());
        buf[12..20].copy_from_slice(&self.checksum.to_le_bytes());
        buf
    }

    /// Parse the fixed byte layout.
    pub fn from_bytes(buf: &[u8; HEADER_SIZE]) -> Result<Self> {
        // Check magic
        if buf[0..2] != MAGIC {
            return Err(ScArcError::invalid_magic(MAGIC, &buf[0..2]));
        }

        let version = buf[2];
        if version != FORMAT_VERSION {
            return Err(ScArcError::unsupported_version(version));
        }

        let mut length = [0u8; 8];
        length.copy_from_slice(&buf[4..12]);
        let mut checksum = [0u8; 8];
        checksum.copy_from_slice(&buf[12..20]);

        Ok(Self {
            version,
            flags: buf[3],
            length: u64::from_le_bytes(length),
            checksum: u64::from_le_bytes(checksum),
        })
    }

    /// Write the header to a writer.
    pub fn write<W: Write>(&self, writer: &mut W) -> Result<()> {
        writer.write_all(&self.to_bytes())?;
        Ok(())
    }

    /// Read a header from a reader.
    ///
    /// A short read is reported as bad magic when the bytes present already
    /// disagree with it, and as unexpected EOF otherwise.
    pub fn read<R: Read>(reader: &mut R) -> Result<Self> {
        let mut buf = [0u8; HEADER_SIZE];
        let n = read_up_to(reader, &mut buf)?;

        if n < HEADER_SIZE {
            let present = n.min(MAGIC.len());
            if buf[..present] != MAGIC[..present] {
                return Err(ScArcError::invalid_magic(MAGIC, &buf[..present]));
            }
            return Err(ScArcError::unexpected_eof((HEADER_SIZE - n) as u64));
        }

        let header = Self::from_bytes(&buf)?;
        if header.unknown_flags() != 0 {
            log::warn!(
                "archive header has unknown flag bits {:#04x}",
                header.unknown_flags()
            );
        }
        log::debug!(
            "header: version {} flags {:#04x} length {} checksum {:016X}",
            header.version,
            header.flags,
            header.length,
            header.checksum
        );
        Ok(header)
    }
}

/// Read until `buf` is full or the reader is exhausted, returning the count.
pub(crate) fn read_up_to<R: Read>(reader: &mut R, buf: &mut [u8]) -> Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        }
    }
    Ok(filled)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_header_layout() {
        let header = Header::new(10, 0x5A11B06A63797574, false);
        let bytes = header.to_bytes();
        assert_eq!(
            bytes,
            [
                b'S', b'C', 0x00, 0x00, // magic, version, flags
                0x0A, 0, 0, 0, 0, 0, 0, 0, // length
                0x74, 0x75, 0x79, 0x63, 0x6A, 0xB0, 0x11, 0x5A, // checksum
            ]
        );
    }

    #[test]
    fn test_header_roundtrip() {
        let header = Header::new(1_000_000, 0x03C888A5E852B20E, true);
        let mut buf = Vec::new();
        header.write(&mut buf).unwrap();
        assert_eq!(buf.len(), HEADER_SIZE);
        assert_eq!(buf[3], flags::PI);

        let parsed = Header::read(&mut Cursor::new(&buf)).unwrap();
        assert_eq!(parsed, header);
        assert!(parsed.is_pi());
    }

    #[test]
    fn test_placeholder() {
        let header = Header::placeholder(false);
        assert_eq!(header.length, 0);
        assert_eq!(header.checksum, CRC64_INIT);
        assert!(!header.is_pi());
    }

    #[test]
    fn test_header_bad_magic() {
        let mut bytes = Header::new(3, 0, false).to_bytes();
        bytes[0] = b'P';
        bytes[1] = b'K';
        let err = Header::read(&mut Cursor::new(&bytes)).unwrap_err();
        assert!(matches!(err, ScArcError::InvalidMagic { .. }));
    }

    #[test]
    fn test_header_bad_magic_short_input() {
        let err = Header::read(&mut Cursor::new(b"GZ")).unwrap_err();
        assert!(matches!(err, ScArcError::InvalidMagic { .. }));
    }

    #[test]
    fn test_header_unsupported_version() {
        let mut bytes = Header::new(3, 0, false).to_bytes();
        bytes[2] = 1;
        let err = Header::read(&mut Cursor::new(&bytes)).unwrap_err();
        assert!(matches!(err, ScArcError::UnsupportedVersion { version: 1 }));
    }

    #[test]
    fn test_header_truncated() {
        let bytes = Header::new(3, 0, false).to_bytes();
        let err = Header::read(&mut Cursor::new(&bytes[..19])).unwrap_err();
        assert!(matches!(err, ScArcError::UnexpectedEof { expected: 1 }));

        let err = Header::read(&mut Cursor::new(&[] as &[u8])).unwrap_err();
        assert!(matches!(err, ScArcError::UnexpectedEof { expected: 20 }));
    }

    #[test]
    fn test_header_unknown_flags_preserved() {
        let mut bytes = Header::new(3, 0, false).to_bytes();
        bytes[3] = 0x81;
        let header = Header::read(&mut Cursor::new(&bytes)).unwrap();
        assert!(header.is_pi());
        assert_eq!(header.unknown_flags(), 0x80);
        assert_eq!(header.to_bytes()[3], 0x81);
    }
}
