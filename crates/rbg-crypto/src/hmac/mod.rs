//! HMAC (Hash-based Message Authentication Code) implementation.
//!
//! HMAC provides message authentication using a cryptographic hash function
//! combined with a secret key, as defined in RFC 2104.
//!
//! HMAC(K, m) = H((K' XOR opad) || H((K' XOR ipad) || m))
//!
//! where K' is the key padded/hashed to block size, ipad = 0x36, opad = 0x5c.

use crate::provider::Digest;
use crate::sha1::{Sha1, SHA1_OUTPUT_SIZE};
use rbg_types::RbgError;
use zeroize::Zeroize;

/// HMAC context using a boxed Digest for the underlying hash.
pub struct Hmac {
    /// Inner hash context (initialized with ipad-xored key).
    inner: Box<dyn Digest>,
    /// Outer hash context (initialized with opad-xored key).
    outer: Box<dyn Digest>,
    /// Factory to create fresh digest instances (for reset).
    factory: Box<dyn Fn() -> Box<dyn Digest>>,
    /// Processed key block (for reset).
    key_block: Vec<u8>,
}

impl Hmac {
    /// Create a new HMAC instance with the given key and hash factory.
    ///
    /// The `hash_factory` closure creates fresh Digest instances.
    pub fn new(
        hash_factory: impl Fn() -> Box<dyn Digest> + 'static,
        key: &[u8],
    ) -> Result<Self, RbgError> {
        let sample = hash_factory();
        let block_size = sample.block_size();
        let output_size = sample.output_size();
        drop(sample);

        // Step 1: If key > block_size, hash it; otherwise pad with zeros
        let mut key_block = vec![0u8; block_size];
        if key.len() > block_size {
            let mut hasher = hash_factory();
            hasher.update(key)?;
            let mut hashed_key = vec![0u8; output_size];
            hasher.finish(&mut hashed_key)?;
            key_block[..output_size].copy_from_slice(&hashed_key);
            hashed_key.zeroize();
        } else {
            key_block[..key.len()].copy_from_slice(key);
        }

        let mut inner = hash_factory();
        let mut outer = hash_factory();
        absorb_padded_key(inner.as_mut(), &key_block, 0x36)?;
        absorb_padded_key(outer.as_mut(), &key_block, 0x5c)?;

        Ok(Self {
            inner,
            outer,
            factory: Box::new(hash_factory),
            key_block,
        })
    }

    /// Feed data into the HMAC computation.
    pub fn update(&mut self, data: &[u8]) -> Result<(), RbgError> {
        self.inner.update(data)
    }

    /// Finalize the HMAC computation and write the result to `out`.
    pub fn finish(&mut self, out: &mut [u8]) -> Result<(), RbgError> {
        let output_size = self.inner.output_size();
        let mut inner_hash = vec![0u8; output_size];
        self.inner.finish(&mut inner_hash)?;

        self.outer.update(&inner_hash)?;
        inner_hash.zeroize();

        self.outer.finish(out)
    }

    /// Reset the HMAC state for reuse with the same key.
    pub fn reset(&mut self) -> Result<(), RbgError> {
        self.inner = (self.factory)();
        self.outer = (self.factory)();
        absorb_padded_key(self.inner.as_mut(), &self.key_block, 0x36)?;
        absorb_padded_key(self.outer.as_mut(), &self.key_block, 0x5c)
    }

    /// Output size of the underlying hash in bytes.
    pub fn output_size(&self) -> usize {
        self.inner.output_size()
    }

    /// One-shot HMAC computation.
    pub fn mac(
        hash_factory: impl Fn() -> Box<dyn Digest> + 'static,
        key: &[u8],
        data: &[u8],
    ) -> Result<Vec<u8>, RbgError> {
        let mut ctx = Self::new(hash_factory, key)?;
        ctx.update(data)?;
        let mut out = vec![0u8; ctx.output_size()];
        ctx.finish(&mut out)?;
        Ok(out)
    }
}

impl Drop for Hmac {
    fn drop(&mut self) {
        self.key_block.zeroize();
    }
}

/// Feed `key_block XOR pad` into a fresh digest.
fn absorb_padded_key(digest: &mut dyn Digest, key_block: &[u8], pad: u8) -> Result<(), RbgError> {
    let mut padded: Vec<u8> = key_block.iter().map(|b| b ^ pad).collect();
    let result = digest.update(&padded);
    padded.zeroize();
    result
}

pub(crate) fn sha1_factory() -> Box<dyn Digest> {
    Box::new(Sha1::new())
}

/// Compute HMAC-SHA-1(key, data) and return the 20-byte tag.
pub fn hmac_sha1(key: &[u8], data: &[u8]) -> Result<[u8; SHA1_OUTPUT_SIZE], RbgError> {
    let mut out = [0u8; SHA1_OUTPUT_SIZE];
    let mut ctx = Hmac::new(sha1_factory, key)?;
    ctx.update(data)?;
    ctx.finish(&mut out)?;
    Ok(out)
}
