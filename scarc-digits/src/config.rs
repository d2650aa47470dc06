//! Codec and stream configuration.

use scarc_core::traits::STREAM_BUFFER_SIZE;

/// Smallest chunk size accepted for streaming I/O.
pub const MIN_BUFFER_SIZE: usize = 64;

/// Configuration for compressing and extracting digit streams.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DigitConfig {
    /// Strip a leading `"3."` on compress and restore it on extract.
    ///
    /// On extract, an archive whose header carries the pi flag restores the
    /// prefix even when this is `false`.
    pub pi_mode: bool,
    /// Drop ASCII whitespace from the input instead of rejecting it.
    ///
    /// Skipped bytes are excluded from the digit count and checksum, so
    /// they are not reproduced on extract.
    pub skip_whitespace: bool,
    /// Chunk size for reads and writes.
    pub buffer_size: usize,
}

impl DigitConfig {
    /// Plain digit streams, strict input, 32 KiB chunks.
    pub const DEFAULT: Self = Self {
        pi_mode: false,
        skip_whitespace: false,
        buffer_size: STREAM_BUFFER_SIZE,
    };

    /// Decimal expansions of pi (`"3.1415..."`).
    pub const PI: Self = Self {
        pi_mode: true,
        ..Self::DEFAULT
    };

    /// Create the default configuration.
    pub const fn new() -> Self {
        Self::DEFAULT
    }

    /// Toggle pi mode.
    pub const fn with_pi_mode(mut self, pi_mode: bool) -> Self {
        self.pi_mode = pi_mode;
        self
    }

    /// Toggle whitespace skipping.
    pub const fn with_skip_whitespace(mut self, skip_whitespace: bool) -> Self {
        self.skip_whitespace = skip_whitespace;
        self
    }

    /// Chunk size used for streaming: `buffer_size` raised to [`MIN_BUFFER_SIZE`].
    pub const fn chunk_size(&self) -> usize {
        if self.buffer_size < MIN_BUFFER_SIZE {
            MIN_BUFFER_SIZE
        } else {
            self.buffer_size
        }
    }

    /// Set the chunk size, clamped to [`MIN_BUFFER_SIZE`].
    pub const fn with_buffer_size(mut self, buffer_size: usize) -> Self {
        self.buffer_size = if buffer_size < MIN_BUFFER_SIZE {
            MIN_BUFFER_SIZE
        } else {
            buffer_size
        };
        self
    }
}

impl Default for DigitConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
