//! Flywheel log tick decoding.
//!
//! Each tick is a 32-bit clock value stored as four little-endian bytes and
//! written out as 8 hex characters, so `"01000000"` is 1.

use crate::flywheel::types::DecodeError;

/// Number of hex characters per tick.
pub const TICK_HEX_LEN: usize = 8;

/// Decode one 8-character hex chunk into a clock value.
pub fn decode_tick(chunk: &str) -> Result<u32, DecodeError> {
    if chunk.len() != TICK_HEX_LEN {
        return Err(DecodeError::InvalidLength {
            len: chunk.chars().count(),
        });
    }
    if !chunk.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(DecodeError::InvalidDigit {
            chunk: chunk.to_string(),
        });
    }

    let mut bytes = [0u8; 4];
    for (i, byte) in bytes.iter_mut().enumerate() {
        let pair = &chunk[i * 2..i * 2 + 2];
        *byte = u8::from_str_radix(pair, 16).map_err(|_| DecodeError::InvalidDigit {
            chunk: chunk.to_string(),
        })?;
    }

    Ok(u32::from_le_bytes(bytes))
}

/// Split a log into consecutive 8-character chunks.
///
/// A trailing fragment shorter than 8 characters is discarded.
pub fn split_ticks(log: &str) -> Vec<&str> {
    let mut chunks = Vec::with_capacity(log.len() / TICK_HEX_LEN);
    let mut rest = log;

    loop {
        match rest.char_indices().nth(TICK_HEX_LEN) {
            Some((end, _)) => {
                chunks.push(&rest[..end]);
                rest = &rest[end..];
            }
            None => {
                if rest.chars().count() == TICK_HEX_LEN {
                    chunks.push(rest);
                }
                break;
            }
        }
    }

    chunks
}
