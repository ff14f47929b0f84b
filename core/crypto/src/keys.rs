//! Key types with secure memory handling.
//!
//! Key material automatically zeroizes on drop to prevent sensitive data
//! from persisting in memory, whichever path a transform exits through.

use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Length of the cipher key in bytes (256-bit, as Kuznyechik requires).
pub const KEY_LENGTH: usize = 32;

/// Symmetric key derived from the user password.
///
/// Exclusively owned by one transform invocation; dropping it zeroizes the
/// underlying bytes.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct CipherKey {
    key: [u8; KEY_LENGTH],
}

impl CipherKey {
    /// Create a cipher key from raw bytes.
    pub fn from_bytes(key: [u8; KEY_LENGTH]) -> Self {
        Self { key }
    }

    /// Get the key bytes.
    ///
    /// # Security
    /// The returned slice should be used immediately and not stored.
    pub fn as_bytes(&self) -> &[u8; KEY_LENGTH] {
        &self.key
    }
}

impl fmt::Debug for CipherKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CipherKey([REDACTED])")
    }
}
