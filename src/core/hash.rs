use serde::{Serialize, Serializer};
use sha2::{Digest, Sha256};
use std::fmt;
use std::str::FromStr;

use crate::core::error::FingerprintError;

/// SHA-256 digest.
pub fn sha256(bytes: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hasher.finalize().into()
}

/// SHA-256 applied twice: `SHA256(SHA256(bytes))`.
pub fn sha256d(bytes: &[u8]) -> [u8; 32] {
    sha256(&sha256(bytes))
}

/// Decode a transaction hex string (surrounding whitespace ignored, any case).
pub fn decode_tx_hex(tx_hex: &str) -> Result<Vec<u8>, FingerprintError> {
    Ok(hex::decode(tx_hex.trim())?)
}

/// Transaction identifier.
///
/// Holds the raw double-SHA-256 output. Like Bitcoin-derived chains, it is
/// displayed (and parsed) in reversed byte order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Txid([u8; 32]);

impl Txid {
    /// Identifier of already decoded transaction bytes.
    pub fn from_tx_bytes(bytes: &[u8]) -> Self {
        Self(sha256d(bytes))
    }

    /// Digest bytes in hashing order.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Digest bytes in display order (reversed).
    pub fn to_display_bytes(&self) -> [u8; 32] {
        let mut out = self.0;
        out.reverse();
        out
    }
}

impl fmt::Display for Txid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.to_display_bytes()))
    }
}

impl FromStr for Txid {
    type Err = FingerprintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut display = [0u8; 32];
        hex::decode_to_slice(s.trim(), &mut display)?;
        display.reverse();
        Ok(Self(display))
    }
}

impl Serialize for Txid {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Compute the canonical identifier of a hex-encoded transaction.
pub fn compute_txid(tx_hex: &str) -> Result<Txid, FingerprintError> {
    let bytes = decode_tx_hex(tx_hex)?;
    Ok(Txid::from_tx_bytes(&bytes))
}
