//! Bit-level cursor for MSB-first packing.
//!
//! Prefix-coded digits are packed most-significant-bit first and codes
//! freely straddle byte boundaries. [`BitCursor`] holds the partial byte
//! between steps: up to eight bits kept top-aligned, plus a count of how
//! many of them are valid. Bits below the valid count are always zero, so a
//! partially filled cursor is already a correctly padded output byte.
//!
//! The same value type serves both directions:
//!
//! - packing: [`BitCursor::push`] appends a code and hands back a byte
//!   whenever eight bits have accumulated (the fit / short / overflow cases
//!   all go through this one primitive);
//! - unpacking: [`BitCursor::window`] loads a full byte, [`BitCursor::peek`]
//!   exposes the top-aligned bits for a table lookup, and
//!   [`BitCursor::consume`] drops the bits of the code just resolved.
//!
//! # Example
//!
//! ```
//! use scarc_core::bitstream::BitCursor;
//!
//! let mut cursor = BitCursor::new();
//! assert_eq!(cursor.push(0b101, 3), None);
//! assert_eq!(cursor.push(0b1100, 4), None);
//! // 7 bits pending; a 3-bit code overflows into the next byte
//! assert_eq!(cursor.push(0b011, 3), Some(0b1011_1000));
//! assert_eq!(cursor.len(), 2);
//! assert_eq!(cursor.take_partial(), Some(0b1100_0000));
//! ```

/// Partial byte with a count of valid, top-aligned bits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BitCursor {
    /// Valid bits, top-aligned; everything below `len` is zero.
    bits: u8,
    /// Number of valid bits (0-8).
    len: u8,
}

impl BitCursor {
    /// Create an empty cursor.
    pub const fn new() -> Self {
        Self { bits: 0, len: 0 }
    }

    /// Create a full eight-bit window over `byte`.
    pub const fn window(byte: u8) -> Self {
        Self { bits: byte, len: 8 }
    }

    /// Number of valid bits held.
    #[inline(always)]
    pub fn len(&self) -> u8 {
        self.len
    }

    /// Whether the cursor holds no bits.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The valid bits, top-aligned and zero-padded.
    #[inline(always)]
    pub fn peek(&self) -> u8 {
        self.bits
    }

    /// Append the low `width` bits of `value` after the valid bits.
    ///
    /// Returns the completed byte when the push reaches or crosses a byte
    /// boundary; any overflow bits stay in the cursor.
    ///
    /// The cursor must not already be full.
    #[inline]
    pub fn push(&mut self, value: u8, width: u8) -> Option<u8> {
        debug_assert!(width <= 8, "Cannot push more than 8 bits at once");
        debug_assert!(self.len < 8, "Cannot push into a full cursor");

        if width == 0 {
            return None;
        }

        let value = u16::from(value) & ((1u16 << width) - 1);
        let total = self.len + width;

        // High byte: pending bits followed by the new code; low byte: overflow
        let frame = (u16::from(self.bits) << 8) | (value << (16 - total));

        if total < 8 {
            self.bits = (frame >> 8) as u8;
            self.len = total;
            None
        } else {
            self.bits = frame as u8;
            self.len = total - 8;
            Some((frame >> 8) as u8)
        }
    }

    /// Drop the top `width` valid bits.
    #[inline]
    pub fn consume(&mut self, width: u8) {
        debug_assert!(width <= self.len, "Cannot consume more bits than held");
        self.bits = (u16::from(self.bits) << width) as u8;
        self.len -= width;
    }

    /// Take the pending bits as a zero-padded byte, leaving the cursor empty.
    pub fn take_partial(&mut self) -> Option<u8> {
        if self.len == 0 {
            return None;
        }
        let byte = self.bits;
        *self = Self::new();
        Some(byte)
    }
}
