//! CRC-64 checksum engine.
//!
//! scarc archives carry a CRC-64 computed with the Jones polynomial in its
//! bit-reflected form (`0x95AC9329AC4BC9B5`). The running value starts at
//! all-ones and is stored exactly as accumulated: no final XOR is applied,
//! so the checksum of the empty message is [`CRC64_INIT`] itself.
//!
//! ## Performance Optimization
//!
//! [`Crc64::update`] uses the "slicing-by-8" technique for data ≥16 bytes,
//! processing 8 bytes at a time using 8 pre-computed lookup tables. Shorter
//! slices and the per-digit [`Crc64::update_byte`] path use the single
//! 256-entry table. Both paths produce identical values.

/// Reflected Jones polynomial.
pub const POLY64_REV: u64 = 0x95AC9329AC4BC9B5;

/// Initial (and empty-message) CRC-64 value.
pub const CRC64_INIT: u64 = 0xFFFFFFFFFFFFFFFF;

/// Build a 256-entry lookup table for a reflected 64-bit polynomial.
pub const fn build_table(poly: u64) -> [u64; 256] {
    let mut table = [0u64; 256];
    let mut i = 0usize;
    while i < 256 {
        let mut crc = i as u64;
        let mut j = 0;
        while j < 8 {
            if crc & 1 != 0 {
                crc = (crc >> 1) ^ poly;
            } else {
                crc >>= 1;
            }
            j += 1;
        }
        table[i] = crc;
        i += 1;
    }
    table
}

/// CRC-64 lookup table (polynomial 0x95AC9329AC4BC9B5, reflected).
pub const CRC64_TABLE: [u64; 256] = build_table(POLY64_REV);

/// CRC-64 slicing-by-8 lookup tables.
/// This pre-computes 8 tables for processing 8 bytes in parallel.
const CRC64_TABLE_SLICE: [[u64; 256]; 8] = {
    let mut tables = [[0u64; 256]; 8];
    tables[0] = CRC64_TABLE;

    // Build subsequent tables
    let mut t = 1;
    while t < 8 {
        let mut i = 0usize;
        while i < 256 {
            let prev = tables[t - 1][i];
            tables[t][i] = tables[0][(prev & 0xFF) as usize] ^ (prev >> 8);
            i += 1;
        }
        t += 1;
    }

    tables
};

/// Single-step table-driven update: `table[(crc ^ byte) & 0xFF] ^ (crc >> 8)`.
#[inline(always)]
pub const fn crc64_step(crc: u64, byte: u8) -> u64 {
    CRC64_TABLE[((crc ^ byte as u64) & 0xFF) as usize] ^ (crc >> 8)
}

/// Running CRC-64 accumulator.
///
/// - Polynomial: 0xAD93D23594C935A9 (reflected: 0x95AC9329AC4BC9B5)
/// - Initial value: 0xFFFFFFFFFFFFFFFF
/// - Final XOR: none
/// - Reflected input: Yes
/// - Reflected output: Yes
///
/// # Example
///
/// ```
/// use scarc_core::crc::Crc64;
///
/// let mut crc = Crc64::new();
/// crc.update(b"123456789");
/// assert_eq!(crc.value(), 0xCAA717168609F281);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Crc64 {
    crc: u64,
}

impl Crc64 {
    /// Create a new CRC-64 calculator.
    pub const fn new() -> Self {
        Self { crc: CRC64_INIT }
    }

    /// Resume from a previously stored raw value.
    pub const fn from_value(crc: u64) -> Self {
        Self { crc }
    }

    /// Reset the CRC to its initial state.
    pub fn reset(&mut self) {
        self.crc = CRC64_INIT;
    }

    /// Fold a single byte into the running value.
    #[inline(always)]
    pub fn update_byte(&mut self, byte: u8) {
        self.crc = crc64_step(self.crc, byte);
    }

    /// Update the CRC with more data.
    pub fn update(&mut self, data: &[u8]) {
        // Use slicing-by-8 for better performance on large data
        if data.len() >= 16 {
            crc64_slice8(&mut self.crc, data);
        } else {
            crc64_sw(&mut self.crc, data);
        }
    }

    /// Get the current raw accumulator.
    #[inline(always)]
    pub fn value(&self) -> u64 {
        self.crc
    }

    /// Compute CRC-64 for a slice in one call.
    pub fn compute(data: &[u8]) -> u64 {
        let mut crc = Self::new();
        crc.update(data);
        crc.value()
    }
}

impl Default for Crc64 {
    fn default() -> Self {
        Self::new()
    }
}

/// Software CRC-64 implementation using single lookup table.
/// Best for small data (< 16 bytes).
#[inline]
fn crc64_sw(crc: &mut u64, data: &[u8]) {
    for &byte in data {
        *crc = crc64_step(*crc, byte);
    }
}

/// Optimized CRC-64 using slicing-by-8 technique.
/// Processes 8 bytes at a time for better throughput on large data.
#[inline]
fn crc64_slice8(crc: &mut u64, data: &[u8]) {
    let mut c = *crc;
    let mut chunks = data.chunks_exact(8);

    for chunk in &mut chunks {
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(chunk);

        // XOR the 8 bytes with current CRC, then look each lane up in its own table
        let x = c ^ u64::from_le_bytes(bytes);
        c = CRC64_TABLE_SLICE[7][(x & 0xFF) as usize]
            ^ CRC64_TABLE_SLICE[6][((x >> 8) & 0xFF) as usize]
            ^ CRC64_TABLE_SLICE[5][((x >> 16) & 0xFF) as usize]
            ^ CRC64_TABLE_SLICE[4][((x >> 24) & 0xFF) as usize]
            ^ CRC64_TABLE_SLICE[3][((x >> 32) & 0xFF) as usize]
            ^ CRC64_TABLE_SLICE[2][((x >> 40) & 0xFF) as usize]
            ^ CRC64_TABLE_SLICE[1][((x >> 48) & 0xFF) as usize]
            ^ CRC64_TABLE_SLICE[0][(x >> 56) as usize];
    }

    crc64_sw(&mut c, chunks.remainder());
    *crc = c;
}
