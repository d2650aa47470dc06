//! Digit encoder (compression).

use crate::config::DigitConfig;
use crate::table::{CODE_TABLE, CodeTable};
use scarc_core::bitstream::BitCursor;
use scarc_core::crc::Crc64;
use scarc_core::error::{Result, ScArcError};
use scarc_core::traits::{CompressStatus, Compressor, FlushMode};

/// Totals produced by a finished (or in-progress) encode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodeSummary {
    /// Digits encoded (skipped whitespace excluded).
    pub digits: u64,
    /// Packed bytes emitted so far.
    pub packed_bytes: u64,
    /// Raw CRC-64 over the encoded ASCII digits.
    pub checksum: u64,
}

/// Streaming digit encoder.
///
/// Each input digit is folded into the checksum over its ASCII value, then
/// its code is pushed into the bit cursor; every completed byte goes to the
/// output. On [`FlushMode::Finish`] a partial byte is emitted zero-padded,
/// which is why the decoder needs the exact digit count.
#[derive(Debug, Clone)]
pub struct DigitEncoder {
    table: &'static CodeTable,
    cursor: BitCursor,
    crc: Crc64,
    digits: u64,
    packed_bytes: u64,
    /// Input bytes seen, for error offsets.
    position: u64,
    skip_whitespace: bool,
    finished: bool,
}

impl DigitEncoder {
    /// Create a new encoder.
    pub fn new(config: DigitConfig) -> Self {
        Self {
            table: &CODE_TABLE,
            cursor: BitCursor::new(),
            crc: Crc64::new(),
            digits: 0,
            packed_bytes: 0,
            position: 0,
            skip_whitespace: config.skip_whitespace,
            finished: false,
        }
    }

    /// Digits encoded so far.
    pub fn digits(&self) -> u64 {
        self.digits
    }

    /// Running checksum over the digits encoded so far.
    pub fn checksum(&self) -> u64 {
        self.crc.value()
    }

    /// Current totals.
    pub fn summary(&self) -> EncodeSummary {
        EncodeSummary {
            digits: self.digits,
            packed_bytes: self.packed_bytes,
            checksum: self.crc.value(),
        }
    }

    /// Encode a complete digit buffer in one call.
    ///
    /// # Returns
    ///
    /// The packed bytes together with the digit count and checksum.
    pub fn encode(&mut self, input: &[u8]) -> Result<(Vec<u8>, EncodeSummary)> {
        let packed = self.compress_all(input)?;
        Ok((packed, self.summary()))
    }
}

impl Compressor for DigitEncoder {
    fn compress(
        &mut self,
        input: &[u8],
        output: &mut [u8],
        flush: FlushMode,
    ) -> Result<(usize, usize, CompressStatus)> {
        if self.finished {
            return Ok((0, 0, CompressStatus::Done));
        }

        let mut consumed = 0;
        let mut produced = 0;

        for &byte in input {
            // A single digit completes at most one byte
            if produced == output.len() {
                return Ok((consumed, produced, CompressStatus::NeedsOutput));
            }

            let code = match self.table.encode(byte) {
                Some(code) => code,
                None if self.skip_whitespace && byte.is_ascii_whitespace() => {
                    self.position += 1;
                    consumed += 1;
                    continue;
                }
                None => return Err(ScArcError::invalid_digit(byte, self.position)),
            };

            self.crc.update_byte(byte);
            self.digits += 1;
            self.position += 1;
            consumed += 1;

            if let Some(packed) = self.cursor.push(code.value, code.width) {
                output[produced] = packed;
                produced += 1;
            }
        }

        if flush == FlushMode::Finish {
            if !self.cursor.is_empty() && produced == output.len() {
                return Ok((consumed, produced, CompressStatus::NeedsOutput));
            }
            if let Some(tail) = self.cursor.take_partial() {
                output[produced] = tail;
                produced += 1;
            }
            self.finished = true;
            self.packed_bytes += produced as u64;
            return Ok((consumed, produced, CompressStatus::Done));
        }

        self.packed_bytes += produced as u64;
        Ok((consumed, produced, CompressStatus::NeedsInput))
    }

    fn reset(&mut self) {
        *self = Self::new(DigitConfig::DEFAULT.with_skip_whitespace(self.skip_whitespace));
    }

    fn is_finished(&self) -> bool {
        self.finished
    }
}
