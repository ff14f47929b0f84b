//! Cryptographic core for kuzcrypt.
//!
//! This module provides:
//! - Key derivation using Argon2id with the protocol's fixed label
//! - The Kuznyechik CTR keystream with explicit counter state
//! - The streaming transform driver used for both encryption and decryption
//!
//! # Security Guarantees
//! - Key material is automatically zeroized on drop, on every exit path
//! - No counter value is ever fed to the block cipher twice within one run
//! - No plaintext, password, or key material is ever logged

pub mod ctr;
pub mod kdf;
pub mod keys;
pub mod stream;

pub use ctr::{BLOCK_SIZE, IV_SIZE};
pub use kdf::{derive_key, KdfParams};
pub use keys::{CipherKey, KEY_LENGTH};
pub use stream::{transform_bytes, CtrStream, DEFAULT_CHUNK_SIZE, INITIAL_IV};
