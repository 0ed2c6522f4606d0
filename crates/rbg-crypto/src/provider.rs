//! Trait-based provider mechanism for the primitives under the generators.
//!
//! The HMAC construction is written against [`Digest`] so the underlying hash
//! is chosen by the caller through a factory closure.

use rbg_types::RbgError;

/// A hash / message digest algorithm.
pub trait Digest: Send + Sync {
    /// The output size in bytes.
    fn output_size(&self) -> usize;

    /// The internal block size in bytes.
    fn block_size(&self) -> usize;

    /// Feed data into the hash state.
    fn update(&mut self, data: &[u8]) -> Result<(), RbgError>;

    /// Finalize the hash and write the digest to `out`.
    /// The length of `out` must be at least `output_size()`.
    fn finish(&mut self, out: &mut [u8]) -> Result<(), RbgError>;

    /// Reset the hash state to process a new message.
    fn reset(&mut self);
}
