//! Hash_df derivation function over SHA-1 (NIST SP 800-90A §10.3.1).
//!
//! Used to compress oversized entropy input to an exact bit length and to
//! condition personalization strings.

use crate::sha1::{Sha1, SHA1_OUTPUT_SIZE};
use rbg_types::RbgError;
use zeroize::Zeroize;

/// Largest number of output bits: the 8-bit counter allows 255 blocks.
pub const MAX_OUTPUT_BITS: usize = 255 * SHA1_OUTPUT_SIZE * 8;

/// Derive exactly `output_bits` bits from `input`.
///
/// Each block is `SHA-1(counter || be32(output_bits) || input)` with the
/// counter starting at 1. The result is `ceil(output_bits / 8)` bytes; when
/// `output_bits` is not a multiple of 8 the unused low-order bits of the last
/// byte are zero.
pub fn derive(input: &[u8], output_bits: usize) -> Result<Vec<u8>, RbgError> {
    if output_bits > MAX_OUTPUT_BITS {
        return Err(RbgError::RequestTooLarge {
            got: output_bits,
            max: MAX_OUTPUT_BITS,
        });
    }

    let out_len = output_bits.div_ceil(8);
    let blocks = out_len.div_ceil(SHA1_OUTPUT_SIZE);
    let bits_be = (output_bits as u32).to_be_bytes();

    let mut temp = Vec::with_capacity(blocks * SHA1_OUTPUT_SIZE);
    let mut hasher = Sha1::new();
    for counter in 1..=blocks {
        hasher.update(&[counter as u8])?;
        hasher.update(&bits_be)?;
        hasher.update(input)?;
        let mut block = hasher.finish()?;
        temp.extend_from_slice(&block);
        block.zeroize();
    }

    let mut out = temp[..out_len].to_vec();
    temp.zeroize();

    let partial = output_bits % 8;
    if partial != 0 {
        if let Some(last) = out.last_mut() {
            *last &= 0xffu8 << (8 - partial);
        }
    }
    Ok(out)
}
