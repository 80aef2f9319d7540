use image::Rgb;
use std::fmt;

use crate::core::error::FingerprintError;

/// Raw bytes per chunk (12 hex characters).
pub const CHUNK_BYTES: usize = 6;

/// Hex characters per chunk.
pub const CHUNK_HEX_LEN: usize = CHUNK_BYTES * 2;

/// A fixed-size slice of the transaction, one grid cell.
///
/// A short trailing slice is right-padded with zero bytes, which is the same
/// as padding its hex form with `'0'`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chunk([u8; CHUNK_BYTES]);

impl Chunk {
    /// Synthetic chunk used to fill the grid square.
    pub const ZERO: Self = Self([0; CHUNK_BYTES]);

    /// Build a chunk from up to `CHUNK_BYTES` bytes, zero-padding on the right.
    pub fn from_slice(bytes: &[u8]) -> Self {
        let mut out = [0u8; CHUNK_BYTES];
        let n = bytes.len().min(CHUNK_BYTES);
        out[..n].copy_from_slice(&bytes[..n]);
        Self(out)
    }

    /// Parse exactly `CHUNK_HEX_LEN` hex characters.
    pub fn from_hex(s: &str) -> Result<Self, FingerprintError> {
        let mut out = [0u8; CHUNK_BYTES];
        hex::decode_to_slice(s, &mut out)?;
        Ok(Self(out))
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Cell color: bytes 0, 1, 2 are red, green, blue. The last three bytes
    /// do not take part in rendering.
    pub fn color(&self) -> Rgb<u8> {
        Rgb([self.0[0], self.0[1], self.0[2]])
    }
}

impl fmt::Display for Chunk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Split transaction bytes into chunks, left to right.
pub fn split_chunks(tx_bytes: &[u8]) -> Vec<Chunk> {
    tx_bytes.chunks(CHUNK_BYTES).map(Chunk::from_slice).collect()
}
