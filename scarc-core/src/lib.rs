//! # scarc Core
//!
//! Core components for the scarc packed-digit archiver.
//!
//! This crate provides the fundamental building blocks shared by the codec
//! and the command-line tool:
//!
//! - [`bitstream`]: MSB-first bit cursor for codes that straddle byte boundaries
//! - [`crc`]: Table-driven reflected CRC-64 (Jones polynomial, raw accumulator)
//! - [`traits`]: Streaming compressor/decompressor traits
//! - [`error`]: Error types
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │ L3: Surface                                             │
//! │     scarc CLI (flags, files, stdin/stdout)              │
//! ├─────────────────────────────────────────────────────────┤
//! │ L2: Codec + Container                                   │
//! │     Digit prefix code, SC header, pi prefix             │
//! ├─────────────────────────────────────────────────────────┤
//! │ L1: BitStream (this crate)                              │
//! │     BitCursor, CRC-64, codec traits                     │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use scarc_core::bitstream::BitCursor;
//! use scarc_core::crc::{Crc64, CRC64_INIT};
//!
//! let mut cursor = BitCursor::new();
//! assert_eq!(cursor.push(0b1100, 4), None);
//! assert_eq!(cursor.push(0b1101, 4), Some(0xCD));
//!
//! assert_eq!(Crc64::compute(b""), CRC64_INIT);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]
#![allow(clippy::module_name_repetitions)]

pub mod bitstream;
pub mod crc;
pub mod error;
pub mod traits;

// Re-exports for convenience
pub use bitstream::BitCursor;
pub use crc::{CRC64_INIT, Crc64};
pub use error::{Result, ScArcError};
pub use traits::{
    CompressStatus, Compressor, DecompressStatus, Decompressor, FlushMode, STREAM_BUFFER_SIZE,
};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::bitstream::BitCursor;
    pub use crate::crc::Crc64;
    pub use crate::error::{Result, ScArcError};
    pub use crate::traits::{Compressor, Decompressor, FlushMode};
}
