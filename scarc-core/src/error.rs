//! Error types for scarc operations.
//!
//! This module provides a single error type covering every failure the
//! codec and container layers can report: I/O failures, header format
//! violations, invalid digit input, and integrity mismatches.

use std::io;
use thiserror::Error;

/// The main error type for scarc operations.
#[derive(Debug, Error)]
pub enum ScArcError {
    /// I/O error from underlying reader/writer.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Invalid magic number in archive header.
    #[error("Invalid magic number: expected {expected:02x?}, found {found:02x?}")]
    InvalidMagic {
        /// Expected magic bytes.
        expected: Vec<u8>,
        /// Actual magic bytes found.
        found: Vec<u8>,
    },

    /// Archive reports a file format version this build does not understand.
    #[error("Unsupported archive version: {version}")]
    UnsupportedVersion {
        /// The version byte found in the header.
        version: u8,
    },

    /// Input byte outside the ten-digit alphabet.
    #[error("Invalid digit {byte:#04x} at offset {offset}")]
    InvalidDigit {
        /// The offending byte.
        byte: u8,
        /// Position of the byte in the digit stream.
        offset: u64,
    },

    /// Pi mode was requested but the input does not start with `"3."`.
    #[error("Pi mode active yet data does not start with \"3.\" (found {found:02x?})")]
    MissingPiPrefix {
        /// The leading bytes actually found (at most two).
        found: Vec<u8>,
    },

    /// CRC-64 checksum mismatch.
    #[error("CRC64 mismatch: expected {expected:016X}, computed {computed:016X}")]
    CrcMismatch {
        /// Checksum stored in the archive header.
        expected: u64,
        /// Checksum recomputed over the decoded digits.
        computed: u64,
    },

    /// Unexpected end of file.
    #[error("Unexpected end of file: expected {expected} more bytes")]
    UnexpectedEof {
        /// Number of bytes (or digits) that were expected but not available.
        expected: u64,
    },

    /// Destination cannot be rewound to finalize the header.
    #[error("Destination is not seekable: {context}")]
    NotSeekable {
        /// What was being written.
        context: String,
    },

    /// Buffer too small for operation.
    #[error("Buffer too small: need {needed} bytes, have {available}")]
    BufferTooSmall {
        /// Number of bytes needed.
        needed: usize,
        /// Number of bytes available.
        available: usize,
    },
}

/// Result type alias for scarc operations.
pub type Result<T> = std::result::Result<T, ScArcError>;

impl ScArcError {
    /// Create an invalid magic error.
    pub fn invalid_magic(expected: impl Into<Vec<u8>>, found: impl Into<Vec<u8>>) -> Self {
        Self::InvalidMagic {
            expected: expected.into(),
            found: found.into(),
        }
    }

    /// Create an unsupported version error.
    pub fn unsupported_version(version: u8) -> Self {
        Self::UnsupportedVersion { version }
    }

    /// Create an invalid digit error.
    pub fn invalid_digit(byte: u8, offset: u64) -> Self {
        Self::InvalidDigit { byte, offset }
    }

    /// Create a missing pi prefix error.
    pub fn missing_pi_prefix(found: impl Into<Vec<u8>>) -> Self {
        Self::MissingPiPrefix {
            found: found.into(),
        }
    }

    /// Create a CRC mismatch error.
    pub fn crc_mismatch(expected: u64, computed: u64) -> Self {
        Self::CrcMismatch { expected, computed }
    }

    /// Create an unexpected EOF error.
    pub fn unexpected_eof(expected: u64) -> Self {
        Self::UnexpectedEof { expected }
    }

    /// Create a not-seekable error.
    pub fn not_seekable(context: impl Into<String>) -> Self {
        Self::NotSeekable {
            context: context.into(),
        }
    }

    /// Create a buffer too small error.
    pub fn buffer_too_small(needed: usize, available: usize) -> Self {
        Self::BufferTooSmall { needed, available }
    }

    /// Whether this error is a format violation detected before data decoding.
    pub fn is_format_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidMagic { .. }
                | Self::UnsupportedVersion { .. }
                | Self::MissingPiPrefix { .. }
                | Self::InvalidDigit { .. }
        )
    }
}
