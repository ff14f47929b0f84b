//! Streaming CTR transform for files of any size.
//!
//! The driver reads the input in fixed-size chunks, XORs the keystream over
//! exactly the bytes read, and writes them out, holding no more than one
//! chunk in memory. The counter continues across chunk boundaries, so the
//! output is independent of the chunk size. Encryption and decryption are
//! the same operation.

use std::io::{self, Read, Write};

use crate::ctr::{CtrKeystream, BLOCK_SIZE, IV_SIZE};
use crate::keys::CipherKey;
use kuzcrypt_common::{Error, Result};

/// Default chunk size for the streaming transform (256 cipher blocks).
pub const DEFAULT_CHUNK_SIZE: usize = 4096;

/// Initial synchronization value fed into the counter sequence.
///
/// A protocol constant: it is not derived from the password or the file and
/// is not stored in the output. Decryption relies on this compiled-in value.
pub const INITIAL_IV: [u8; IV_SIZE] = [0x03, 0x07, 0xae, 0xf1, 0x00, 0x00, 0x00, 0x00];

/// Chunked CTR transform over a reader/writer pair.
///
/// One value drives one file start to finish; the borrowed key and the
/// counter state inside [`transform`](Self::transform) live exactly as long
/// as the call.
pub struct CtrStream<'a> {
    key: &'a CipherKey,
    iv: [u8; IV_SIZE],
    chunk_size: usize,
}

impl<'a> CtrStream<'a> {
    /// Create a transform stream keyed by `key`, using the protocol IV.
    pub fn new(key: &'a CipherKey) -> Self {
        Self {
            key,
            iv: INITIAL_IV,
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }

    /// Set a custom chunk size.
    ///
    /// The size must be a nonzero multiple of the cipher block size; this is
    /// checked when the transform runs.
    pub fn with_chunk_size(mut self, size: usize) -> Self {
        self.chunk_size = size;
        self
    }

    /// Transform data from `reader` to `writer`, returning the number of
    /// bytes processed.
    ///
    /// Single pass, in order, no seeking. The output length always equals
    /// the input length; an empty input produces an empty output and
    /// succeeds. Applying the transform twice with the same key restores
    /// the original bytes.
    ///
    /// # Errors
    /// - I/O errors from reader/writer
    /// - Cipher errors (counter exhaustion)
    ///
    /// On error the transform aborts immediately; bytes already written are
    /// not retracted, and the partial output must be treated as invalid.
    pub fn transform<R: Read, W: Write>(&self, mut reader: R, mut writer: W) -> Result<u64> {
        if self.chunk_size == 0 || self.chunk_size % BLOCK_SIZE != 0 {
            return Err(Error::InvalidInput(format!(
                "Chunk size must be a nonzero multiple of {}",
                BLOCK_SIZE
            )));
        }

        let mut keystream = CtrKeystream::new(self.key, self.iv);
        let mut buffer = vec![0u8; self.chunk_size];
        let mut total_bytes = 0u64;

        loop {
            let bytes_read = fill_chunk(&mut reader, &mut buffer)?;
            if bytes_read == 0 {
                break;
            }

            keystream.apply(&mut buffer[..bytes_read])?;
            writer.write_all(&buffer[..bytes_read])?;
            total_bytes += bytes_read as u64;

            // A short chunk is the end of the stream.
            if bytes_read < self.chunk_size {
                break;
            }
        }

        writer.flush()?;
        Ok(total_bytes)
    }
}

/// Fill `buffer` from the reader, tolerating short reads.
///
/// Returns the number of bytes read; anything less than the buffer length
/// means end of input.
fn fill_chunk<R: Read>(reader: &mut R, buffer: &mut [u8]) -> Result<usize> {
    let mut filled = 0;
    while filled < buffer.len() {
        match reader.read(&mut buffer[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        }
    }
    Ok(filled)
}

/// Transform a complete byte slice in memory.
///
/// This is a convenience function for when the complete data is available.
pub fn transform_bytes(key: &CipherKey, data: &[u8]) -> Result<Vec<u8>> {
    let mut output = Vec::with_capacity(data.len());
    CtrStream::new(key).transform(data, &mut output)?;
    Ok(output)
}
