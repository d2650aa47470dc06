//! # scarc-digits: Prefix-Coded Decimal Digit Packing
//!
//! This crate packs ASCII decimal digit streams with a fixed prefix code and
//! wraps them in the SC archive container.
//!
//! ## Features
//!
//! - **Pure Rust**: No C dependencies, 100% safe Rust
//! - **Fixed prefix code**: 3 bits for `0`-`5`, 4 bits for `6`-`9`
//! - **Integrity**: CRC-64 over the digits, recomputed on extract
//! - **Pi mode**: `"3."` stripped on compress and restored on extract
//! - **Streaming**: bounded memory via the `scarc-core` codec traits
//!
//! ## Code Table
//!
//! | digit | code   |
//! |-------|--------|
//! | 0     | `000`  |
//! | 1     | `001`  |
//! | 2     | `010`  |
//! | 3     | `011`  |
//! | 4     | `100`  |
//! | 5     | `101`  |
//! | 6     | `1100` |
//! | 7     | `1101` |
//! | 8     | `1110` |
//! | 9     | `1111` |
//!
//! Codes are packed MSB-first. The last byte is zero-padded, and since
//! `000` is a valid code the decoder relies on the digit count stored in
//! the header to know where to stop.
//!
//! ## Example
//!
//! ```rust
//! use scarc_digits::{decode, encode};
//!
//! let (packed, summary) = encode(b"0123456789").unwrap();
//! assert_eq!(packed, [0x05, 0x39, 0x73, 0x7B, 0xC0]);
//!
//! let (digits, decoded) = decode(&packed, summary.digits).unwrap();
//! assert_eq!(digits, b"0123456789");
//! assert_eq!(decoded.checksum, summary.checksum);
//! ```
//!
//! ## Archives
//!
//! ```rust
//! use scarc_digits::{DigitConfig, archive};
//! use std::io::Cursor;
//!
//! let mut output = Cursor::new(Vec::new());
//! let summary = archive::compress(&mut &b"3.14159"[..], &mut output, &DigitConfig::PI).unwrap();
//! assert_eq!(summary.digits, 5);
//!
//! let mut restored = Vec::new();
//! let mut archived = Cursor::new(output.into_inner());
//! let report = archive::extract(&mut archived, &mut restored, &DigitConfig::DEFAULT).unwrap();
//! assert_eq!(restored, b"3.14159");
//! assert!(report.checksum_ok());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod archive;
mod config;
mod decoder;
mod encoder;
pub mod header;
pub mod pi;
mod table;

pub use archive::{CompressSummary, ExtractReport};
pub use config::{DigitConfig, MIN_BUFFER_SIZE};
pub use decoder::{DecodeSummary, DigitDecoder, MAX_DIGITS_PER_BYTE};
pub use encoder::{DigitEncoder, EncodeSummary};
pub use header::{FORMAT_VERSION, HEADER_SIZE, Header, MAGIC};
pub use scarc_core::error::{Result, ScArcError};
pub use table::{CODE_TABLE, Code, CodeTable, MAX_CODE_WIDTH, MIN_CODE_WIDTH};

/// Pack a digit buffer with the default configuration.
///
/// # Parameters
///
/// - `digits`: ASCII digits `'0'..='9'`
///
/// # Returns
///
/// The packed bytes and the digit count and checksum needed to decode them.
///
/// # Example
///
/// ```rust
/// use scarc_digits::encode;
///
/// let (packed, summary) = encode(b"31415926535").unwrap();
/// assert_eq!(packed.len(), 5);
/// assert_eq!(summary.digits, 11);
/// ```
pub fn encode(digits: &[u8]) -> Result<(Vec<u8>, EncodeSummary)> {
    let mut encoder = DigitEncoder::new(DigitConfig::DEFAULT);
    encoder.encode(digits)
}

/// Unpack exactly `digit_count` digits.
///
/// # Parameters
///
/// - `packed`: Packed data, without a header
/// - `digit_count`: Number of digits to produce
///
/// # Returns
///
/// The digits and the recomputed checksum. Fewer than `digit_count` digits
/// are returned only if `packed` is too short; check
/// [`DecodeSummary::is_truncated`].
///
/// # Example
///
/// ```rust
/// use scarc_digits::decode;
///
/// // Four padding bits would otherwise read as one more '0'
/// let (digits, _) = decode(&[0xF0], 1).unwrap();
/// assert_eq!(digits, b"9");
/// ```
pub fn decode(packed: &[u8], digit_count: u64) -> Result<(Vec<u8>, DecodeSummary)> {
    let mut decoder = DigitDecoder::new(digit_count);
    decoder.decode(packed)
}
