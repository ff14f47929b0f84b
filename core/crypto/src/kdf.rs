//! Key derivation using Argon2id.
//!
//! Argon2id is a memory-hard password hashing function that provides
//! resistance to both GPU and time-memory trade-off attacks.
//!
//! Derivation is keyed by the password and a fixed, compiled-in label. The
//! label is a protocol constant rather than a per-file random salt, which
//! keeps the output file headerless and decryption dependent on nothing but
//! the password. The flip side is documented on [`KDF_LABEL`].

use argon2::{Algorithm, Argon2, Params, Version};

use crate::keys::{CipherKey, KEY_LENGTH};
use kuzcrypt_common::{Error, Result};

/// Fixed label used as the Argon2id salt.
///
/// Because this value is constant, key derivation is fully deterministic:
/// the same password always yields the same key, and two files encrypted
/// with the same password produce mutually predictable keystreams. That is
/// an accepted property of the headerless file format, not a guarantee worth
/// relying on.
pub const KDF_LABEL: &[u8; 16] = b"kuzcrypt.v1.rand";

/// Parameters for Argon2id key derivation.
#[derive(Debug, Clone)]
pub struct KdfParams {
    /// Memory cost in KiB (e.g., 65536 = 64 MiB).
    pub memory_cost: u32,
    /// Number of iterations.
    pub time_cost: u32,
    /// Degree of parallelism.
    pub parallelism: u32,
}

impl KdfParams {
    /// Create parameters suitable for interactive use.
    ///
    /// These parameters provide a balance between security and usability,
    /// targeting approximately 0.5-1 second of derivation time.
    pub fn interactive() -> Self {
        Self {
            memory_cost: 65536, // 64 MiB
            time_cost: 3,
            parallelism: 4,
        }
    }

    /// Create moderate parameters for constrained environments and tests.
    pub fn moderate() -> Self {
        Self {
            memory_cost: 32768, // 32 MiB
            time_cost: 3,
            parallelism: 2,
        }
    }
}

impl Default for KdfParams {
    fn default() -> Self {
        Self::interactive()
    }
}

/// Derive a cipher key from a password using Argon2id and the fixed label.
///
/// # Preconditions
/// - `password` must not be empty
///
/// # Postconditions
/// - The derived key is deterministic given the same password and params
///
/// # Errors
/// - Returns error if password is empty
/// - Returns error if Argon2id parameters are invalid
///
/// # Security
/// - Password is not stored or logged
pub fn derive_key(password: &[u8], params: &KdfParams) -> Result<CipherKey> {
    if password.is_empty() {
        return Err(Error::InvalidInput("Password cannot be empty".to_string()));
    }

    let argon2_params = Params::new(
        params.memory_cost,
        params.time_cost,
        params.parallelism,
        Some(KEY_LENGTH),
    )
    .map_err(|e| Error::Crypto(format!("Invalid KDF parameters: {}", e)))?;

    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, argon2_params);

    let mut key_bytes = [0u8; KEY_LENGTH];
    argon2
        .hash_password_into(password, KDF_LABEL, &mut key_bytes)
        .map_err(|e| Error::Crypto(format!("Key derivation failed: {}", e)))?;

    Ok(CipherKey::from_bytes(key_bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_key_deterministic() {
        let password = b"test-password-123";
        let params = KdfParams::moderate();

        let key1 = derive_key(password, &params).unwrap();
        let key2 = derive_key(password, &params).unwrap();

        assert_eq!(key1.as_bytes(), key2.as_bytes());
    }

    #[test]
    fn test_derive_key_different_password() {
        let params = KdfParams::moderate();

        let key1 = derive_key(b"password1", &params).unwrap();
        let key2 = derive_key(b"password2", &params).unwrap();

        assert_ne!(key1.as_bytes(), key2.as_bytes());
    }

    #[test]
    fn test_derive_key_empty_password_fails() {
        let params = KdfParams::moderate();

        assert!(derive_key(b"", &params).is_err());
    }
}
