//! Digit decoder (decompression).
//!
//! Packed data carries no end marker and the final byte is zero-padded, so
//! decoding is bounded by the digit count declared in the archive header.
//! The decoder stops the moment that count is reached, even in the middle
//! of a byte, so padding bits are never decoded as spurious `'0'` digits.

use crate::table::{CODE_TABLE, CodeTable, MIN_CODE_WIDTH};
use scarc_core::bitstream::BitCursor;
use scarc_core::crc::Crc64;
use scarc_core::error::{Result, ScArcError};
use scarc_core::traits::{DecompressStatus, Decompressor};

/// Most digits a single packed byte can complete: two from the byte's own
/// window plus one residual code assembled from carried bits.
pub const MAX_DIGITS_PER_BYTE: usize = 3;

/// Totals produced by a decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeSummary {
    /// Digit count the decoder was asked to produce.
    pub expected: u64,
    /// Digits actually produced.
    pub digits: u64,
    /// Raw CRC-64 recomputed over the produced ASCII digits.
    pub checksum: u64,
}

impl DecodeSummary {
    /// Whether input ran out before the declared count was reached.
    pub fn is_truncated(&self) -> bool {
        self.digits < self.expected
    }
}

/// Streaming digit decoder.
///
/// State between input bytes is a [`BitCursor`] holding the unconsumed
/// carry bits (never more than three: anything wider always resolves a
/// code), the remaining digit count, and the running checksum.
#[derive(Debug, Clone)]
pub struct DigitDecoder {
    table: &'static CodeTable,
    carry: BitCursor,
    expected: u64,
    remaining: u64,
    crc: Crc64,
}

impl DigitDecoder {
    /// Create a decoder that will produce exactly `expected` digits.
    pub fn new(expected: u64) -> Self {
        Self {
            table: &CODE_TABLE,
            carry: BitCursor::new(),
            expected,
            remaining: expected,
            crc: Crc64::new(),
        }
    }

    /// Digits still to be produced.
    pub fn remaining(&self) -> u64 {
        self.remaining
    }

    /// Current totals.
    pub fn summary(&self) -> DecodeSummary {
        DecodeSummary {
            expected: self.expected,
            digits: self.expected - self.remaining,
            checksum: self.crc.value(),
        }
    }

    /// Decode a complete packed buffer in one call.
    ///
    /// # Returns
    ///
    /// The digits produced (fewer than `expected` only if `input` runs out)
    /// together with the recomputed checksum.
    pub fn decode(&mut self, input: &[u8]) -> Result<(Vec<u8>, DecodeSummary)> {
        let digits = self.decompress_all(input)?;
        Ok((digits, self.summary()))
    }

    /// Output space one input byte may need.
    #[inline]
    fn step_room(&self) -> usize {
        if self.remaining < MAX_DIGITS_PER_BYTE as u64 {
            self.remaining as usize
        } else {
            MAX_DIGITS_PER_BYTE
        }
    }

    /// Resolve one code from the top of `window` and account for it.
    #[inline]
    fn take_code(&mut self, window: &mut BitCursor) -> u8 {
        let code = self.table.decode(window.peek());
        window.consume(code.width);
        self.crc.update_byte(code.digit);
        self.remaining -= 1;
        code.digit
    }

    /// Decode every code completed by `byte`, writing digits to `out`.
    ///
    /// `out` must hold at least [`Self::step_room`] bytes.
    fn decode_byte(&mut self, byte: u8, out: &mut [u8]) -> usize {
        let carried = self.carry.len();

        // Carry bits followed by the leading bits of the new byte form a
        // full window; the byte's low `carried` bits wait their turn.
        let mut window = BitCursor::window(self.carry.peek() | (byte >> carried));
        let leftover = byte & ((1u8 << carried) - 1);
        let mut n = 0;

        // A full window always holds two codes
        for _ in 0..2 {
            if self.remaining == 0 {
                return n;
            }
            out[n] = self.take_code(&mut window);
            n += 1;
        }

        let spilled = window.push(leftover, carried);
        debug_assert!(spilled.is_none(), "carry never reaches a full byte");

        // Residual code from the carry, if it is already complete
        if self.remaining > 0 && window.len() >= MIN_CODE_WIDTH {
            let code = self.table.decode(window.peek());
            if code.width <= window.len() {
                out[n] = self.take_code(&mut window);
                n += 1;
            }
        }

        self.carry = window;
        n
    }
}

impl Decompressor for DigitDecoder {
    fn decompress(
        &mut self,
        input: &[u8],
        output: &mut [u8],
    ) -> Result<(usize, usize, DecompressStatus)> {
        if self.remaining == 0 {
            return Ok((0, 0, DecompressStatus::Done));
        }

        let room = self.step_room();
        if output.len() < room {
            return Err(ScArcError::buffer_too_small(room, output.len()));
        }

        let mut consumed = 0;
        let mut produced = 0;

        for &byte in input {
            if self.remaining == 0 {
                break;
            }
            if output.len() - produced < self.step_room() {
                return Ok((consumed, produced, DecompressStatus::NeedsOutput));
            }
            consumed += 1;
            produced += self.decode_byte(byte, &mut output[produced..]);
        }

        let status = if self.remaining == 0 {
            DecompressStatus::Done
        } else {
            DecompressStatus::NeedsInput
        };
        Ok((consumed, produced, status))
    }

    fn reset(&mut self) {
        *self = Self::new(self.expected);
    }

    fn is_finished(&self) -> bool {
        self.remaining == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DigitConfig;
    use crate::encoder::DigitEncoder;
    use scarc_core::crc::CRC64_INIT;

    fn pack(digits: &[u8]) -> Vec<u8> {
        DigitEncoder::new(DigitConfig::DEFAULT)
            .encode(digits)
            .unwrap()
            .0
    }

    #[test]
    fn test_decode_all_digits() {
        let mut decoder = DigitDecoder::new(10);
        let (digits, summary) = decoder.decode(&[0x05, 0x39, 0x73, 0x7B, 0xC0]).unwrap();
        assert_eq!(digits, b"0123456789");
        assert_eq!(summary.checksum, 0x5A11B06A63797574);
        assert!(!summary.is_truncated());
        assert!(decoder.is_finished());
    }

    #[test]
    fn test_decode_stops_at_declared_count() {
        // One '0' digit leaves five zero padding bits that also read as '0'
        let mut decoder = DigitDecoder::new(1);
        let (digits, _) = decoder.decode(&[0x00]).unwrap();
        assert_eq!(digits, b"0");

        let mut decoder = DigitDecoder::new(2);
        let (digits, _) = decoder.decode(&[0x00]).unwrap();
        assert_eq!(digits, b"00");
    }

    #[test]
    fn test_decode_zero_digits() {
        let mut decoder = DigitDecoder::new(0);
        let (digits, summary) = decoder.decode(&[0xFF, 0xFF]).unwrap();
        assert!(digits.is_empty());
        assert_eq!(summary.checksum, CRC64_INIT);
    }

    #[test]
    fn test_decode_residual_code() {
        // All 3-bit codes: every third byte completes one code from carried bits
        let original = b"00000000000000000000";
        let packed = pack(original);
        let mut decoder = DigitDecoder::new(original.len() as u64);
        let (digits, _) = decoder.decode(&packed).unwrap();
        assert_eq!(digits, original);
    }

    #[test]
    fn test_decode_three_bit_carry_waits_for_next_byte() {
        // 4-bit codes straddling byte boundaries behind a 3-bit carry
        let original = b"0199999999";
        let packed = pack(original);
        let mut decoder = DigitDecoder::new(original.len() as u64);
        let (digits, _) = decoder.decode(&packed).unwrap();
        assert_eq!(digits, original);
    }

    #[test]
    fn test_decode_truncated_input() {
        let original = b"31415926535";
        let packed = pack(original);
        let mut decoder = DigitDecoder::new(original.len() as u64);
        let (digits, summary) = decoder.decode(&packed[..2]).unwrap();
        assert!(summary.is_truncated());
        assert_eq!(summary.digits, digits.len() as u64);
        assert_eq!(&original[..digits.len()], &digits[..]);
        assert!(!decoder.is_finished());
    }

    #[test]
    fn test_decode_corrupted_byte_reports_mismatch() {
        let original = b"31415926535";
        let mut packed = pack(original);
        packed[1] ^= 0xFF;

        let mut decoder = DigitDecoder::new(original.len() as u64);
        let (digits, summary) = decoder.decode(&packed).unwrap();
        assert_eq!(digits.len(), 11);
        assert_ne!(digits, original);
        assert_ne!(summary.checksum, 0x03C888A5E852B20E);
    }

    #[test]
    fn test_decode_byte_at_a_time() {
        let original = b"27182818284590452353602874713526624977572470936999".repeat(3);
        let packed = pack(&original);

        let mut decoder = DigitDecoder::new(original.len() as u64);
        let mut digits = Vec::new();
        let mut out = [0u8; MAX_DIGITS_PER_BYTE];
        for byte in &packed {
            let (consumed, produced, _) = decoder
                .decompress(std::slice::from_ref(byte), &mut out)
                .unwrap();
            assert_eq!(consumed, 1);
            digits.extend_from_slice(&out[..produced]);
        }

        assert_eq!(digits, original);
        assert!(decoder.is_finished());
    }

    #[test]
    fn test_decode_output_buffer_too_small() {
        let mut decoder = DigitDecoder::new(10);
        let mut out = [0u8; 2];
        let err = decoder.decompress(&[0x05], &mut out).unwrap_err();
        assert!(matches!(
            err,
            ScArcError::BufferTooSmall {
                needed: 3,
                available: 2
            }
        ));

        // Two digits left fit in two bytes
        let mut decoder = DigitDecoder::new(2);
        let (_, produced, status) = decoder.decompress(&[0x05], &mut out).unwrap();
        assert_eq!(produced, 2);
        assert_eq!(status, DecompressStatus::Done);
        assert_eq!(&out, b"01");
    }

    #[test]
    fn test_decode_needs_output() {
        let mut decoder = DigitDecoder::new(10);
        let mut out = [0u8; 4];
        let (consumed, produced, status) =
            decoder.decompress(&[0x05, 0x39, 0x73, 0x7B, 0xC0], &mut out).unwrap();
        assert_eq!(status, DecompressStatus::NeedsOutput);
        assert!(consumed < 5);
        assert_eq!(&out[..produced], &b"0123456789"[..produced]);
    }
}
