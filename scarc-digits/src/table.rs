//! Fixed digit prefix code.
//!
//! The ten ASCII digits map onto a prefix-free code biased towards the low
//! digits:
//!
//! | digit | code   | width |
//! |-------|--------|-------|
//! | 0-5   | `000`-`101`   | 3 |
//! | 6-9   | `1100`-`1111` | 4 |
//!
//! No 3-bit code starts with `11`, so no 3-bit code is a prefix of a 4-bit
//! one. The reverse table is indexed by a top-aligned byte window: each
//! code fills the `2^(8 - width)` entries that share its leading bits, so
//! every byte value resolves to exactly one code.

/// Narrowest code width in bits.
pub const MIN_CODE_WIDTH: u8 = 3;

/// Widest code width in bits.
pub const MAX_CODE_WIDTH: u8 = 4;

/// A single digit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Code {
    /// ASCII digit (`b'0'..=b'9'`).
    pub digit: u8,
    /// Bit pattern, right-aligned.
    pub value: u8,
    /// Number of significant bits in `value`.
    pub width: u8,
}

impl Code {
    /// Code assigned to ASCII digit `digit`. Caller guarantees `digit` is `'0'..='9'`.
    const fn for_digit(digit: u8) -> Self {
        let d = digit - b'0';
        if d < 6 {
            Self {
                digit,
                value: d,
                width: 3,
            }
        } else {
            Self {
                digit,
                value: 0xC + (d - 6),
                width: 4,
            }
        }
    }
}

/// Forward (digit → code) and reverse (byte window → code) lookup tables.
#[derive(Debug, Clone)]
pub struct CodeTable {
    forward: [Code; 10],
    reverse: [Code; 256],
}

/// The process-wide code table, built at compile time.
pub static CODE_TABLE: CodeTable = CodeTable::build();

impl CodeTable {
    /// Build both lookup tables.
    pub const fn build() -> Self {
        let mut forward = [Code::for_digit(b'0'); 10];
        let mut reverse = [Code::for_digit(b'0'); 256];

        let mut d = 0u8;
        while d < 10 {
            let code = Code::for_digit(b'0' + d);
            forward[d as usize] = code;

            // Left-justify the code and fill every low-bit combination
            let base = (code.value as usize) << (8 - code.width);
            let fill = 1usize << (8 - code.width);
            let mut i = 0;
            while i < fill {
                reverse[base + i] = code;
                i += 1;
            }
            d += 1;
        }

        Self { forward, reverse }
    }

    /// Look up the code for an ASCII byte, or `None` if it is not a digit.
    #[inline(always)]
    pub fn encode(&self, byte: u8) -> Option<Code> {
        if byte.is_ascii_digit() {
            Some(self.forward[(byte - b'0') as usize])
        } else {
            None
        }
    }

    /// Resolve the code whose bits lead the top-aligned `window`.
    #[inline(always)]
    pub fn decode(&self, window: u8) -> Code {
        self.reverse[window as usize]
    }

    /// All ten codes in digit order.
    pub fn codes(&self) -> &[Code; 10] {
        &self.forward
    }
}

impl Default for CodeTable {
    fn default() -> Self {
        Self::build()
    }
}
