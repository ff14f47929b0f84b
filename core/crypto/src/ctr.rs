//! Counter-mode keystream over the Kuznyechik block cipher.
//!
//! The block cipher is consumed as an opaque keyed block function through
//! the `cipher` traits; everything counter-shaped lives here. The 16-byte
//! counter block carries the 8-byte synchronization value in its high half
//! and a big-endian 64-bit block counter in its low half, the counter
//! starting at zero and advancing by one per keystream block.
//!
//! Invariant: no counter value is fed to the block cipher twice within the
//! lifetime of one keystream. The increment is checked, so exhausting the
//! 64-bit counter space surfaces as an error instead of a repeated block.

use kuznyechik::cipher::{Block, BlockEncrypt, Key, KeyInit};
use kuznyechik::Kuznyechik;

use crate::keys::CipherKey;
use kuzcrypt_common::{Error, Result};

/// Kuznyechik block size in bytes.
pub const BLOCK_SIZE: usize = 16;

/// Size of the initial synchronization value in bytes (half a block).
pub const IV_SIZE: usize = 8;

/// CTR keystream state: the keyed cipher, the fixed nonce half of the
/// counter block, and the running block counter.
pub struct CtrKeystream {
    cipher: Kuznyechik,
    nonce: [u8; IV_SIZE],
    counter: u64,
}

impl CtrKeystream {
    /// Create a keystream for `key`, starting the counter sequence at `iv`.
    pub fn new(key: &CipherKey, iv: [u8; IV_SIZE]) -> Self {
        let cipher = Kuznyechik::new(Key::<Kuznyechik>::from_slice(key.as_bytes()));
        Self {
            cipher,
            nonce: iv,
            counter: 0,
        }
    }

    /// Encrypt the current counter block and advance the counter.
    fn next_block(&mut self) -> Result<Block<Kuznyechik>> {
        let mut block = Block::<Kuznyechik>::default();
        block[..IV_SIZE].copy_from_slice(&self.nonce);
        block[IV_SIZE..].copy_from_slice(&self.counter.to_be_bytes());
        self.cipher.encrypt_block(&mut block);

        self.counter = self
            .counter
            .checked_add(1)
            .ok_or_else(|| Error::Crypto("CTR counter space exhausted".to_string()))?;

        Ok(block)
    }

    /// XOR the keystream over `data` in place, consuming one counter value
    /// per block of data.
    ///
    /// Keystream alignment is per block: a call whose length is not a
    /// multiple of [`BLOCK_SIZE`] discards the tail of its last keystream
    /// block, so it must be the final call on this keystream.
    pub fn apply(&mut self, data: &mut [u8]) -> Result<()> {
        for chunk in data.chunks_mut(BLOCK_SIZE) {
            let keystream = self.next_block()?;
            for (byte, ks) in chunk.iter_mut().zip(keystream.iter()) {
                *byte ^= ks;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_IV: [u8; IV_SIZE] = [0x03, 0x07, 0xae, 0xf1, 0x00, 0x00, 0x00, 0x00];

    fn test_key() -> CipherKey {
        CipherKey::from_bytes([7u8; 32])
    }

    #[test]
    fn test_apply_is_involution() {
        let original = [0xA5u8; 40];
        let mut data = original;

        CtrKeystream::new(&test_key(), TEST_IV).apply(&mut data).unwrap();
        assert_ne!(data, original);

        CtrKeystream::new(&test_key(), TEST_IV).apply(&mut data).unwrap();
        assert_eq!(data, original);
    }

    #[test]
    fn test_split_apply_matches_single_apply() {
        let mut whole = [0u8; 64];
        CtrKeystream::new(&test_key(), TEST_IV).apply(&mut whole).unwrap();

        let mut split = [0u8; 64];
        let mut keystream = CtrKeystream::new(&test_key(), TEST_IV);
        let (head, tail) = split.split_at_mut(16);
        keystream.apply(head).unwrap();
        keystream.apply(tail).unwrap();

        assert_eq!(split, whole);
    }

    #[test]
    fn test_keystream_blocks_are_distinct() {
        // Applying to zeroes exposes the raw keystream.
        let mut data = [0u8; 64];
        CtrKeystream::new(&test_key(), TEST_IV).apply(&mut data).unwrap();

        let blocks: Vec<&[u8]> = data.chunks(BLOCK_SIZE).collect();
        for i in 0..blocks.len() {
            for j in (i + 1)..blocks.len() {
                assert_ne!(blocks[i], blocks[j]);
            }
        }
    }

    #[test]
    fn test_partial_tail_roundtrip() {
        let original = [0x11u8; 21];
        let mut data = original;

        CtrKeystream::new(&test_key(), TEST_IV).apply(&mut data).unwrap();
        CtrKeystream::new(&test_key(), TEST_IV).apply(&mut data).unwrap();

        assert_eq!(data, original);
    }

    #[test]
    fn test_different_iv_different_keystream() {
        let mut a = [0u8; 32];
        let mut b = [0u8; 32];
        CtrKeystream::new(&test_key(), TEST_IV).apply(&mut a).unwrap();
        CtrKeystream::new(&test_key(), [0u8; IV_SIZE]).apply(&mut b).unwrap();

        assert_ne!(a, b);
    }
}
