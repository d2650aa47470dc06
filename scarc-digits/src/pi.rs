//! Pi-mode prefix handling.
//!
//! Decimal expansions of pi start with the literal `"3."`, which the digit
//! code cannot represent. In pi mode the prefix is consumed before encoding
//! and written back before the decoded digits; it never contributes to the
//! digit count or checksum.

use crate::header::read_up_to;
use scarc_core::error::{Result, ScArcError};
use std::io::{Read, Write};

/// The literal prefix stripped in pi mode.
pub const PI_PREFIX: [u8; 2] = *b"3.";

/// Consume the `"3."` prefix from a reader.
pub fn strip_prefix<R: Read>(reader: &mut R) -> Result<()> {
    let mut buf = [0u8; 2];
    let n = read_up_to(reader, &mut buf)?;
    if n < PI_PREFIX.len() || buf != PI_PREFIX {
        return Err(ScArcError::missing_pi_prefix(&buf[..n]));
    }
    Ok(())
}

/// Split the `"3."` prefix off an in-memory buffer.
pub fn strip_prefix_slice(data: &[u8]) -> Result<&[u8]> {
    data.strip_prefix(&PI_PREFIX[..]).ok_or_else(|| {
        let found = &data[..data.len().min(PI_PREFIX.len())];
        ScArcError::missing_pi_prefix(found)
    })
}

/// Write the `"3."` prefix ahead of decoded digits.
pub fn restore_prefix<W: Write>(writer: &mut W) -> Result<()> {
    writer.write_all(&PI_PREFIX)?;
    Ok(())
}
