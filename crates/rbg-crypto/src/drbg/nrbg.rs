//! Enhanced NRBG, oversampling construction (NIST SP 800-90C §9.3).
//!
//! An HMAC_DRBG instantiated with prediction resistance at its highest
//! strength. Every chunk of output is half the security strength long and
//! is produced right after a reseed, so each output bit is backed by two
//! bits of fresh entropy from the source.

use super::{Drbg, DrbgMechanism, HmacDrbg, HmacSha1Drbg, RandomBitGenerator};
use crate::entropy::{EntropyRequest, EntropySource};
use crate::hash_df;
use rbg_types::{RbgError, SecurityStrength};
use zeroize::Zeroizing;

/// Full-entropy generator over a (possibly low-rate) entropy source.
pub struct OversamplingNrbg<S: EntropySource> {
    drbg: HmacDrbg<S>,
}

impl<S: EntropySource> OversamplingNrbg<S> {
    /// Instantiate over `source`.
    ///
    /// `persona` and `context` are hashed together into a personalization
    /// string of the mechanism's maximum length. `context` is for whatever
    /// leftover environmental entropy the caller can offer (process ids,
    /// timestamps, memory statistics).
    pub fn new(source: S, persona: &[u8], context: &[u8]) -> Result<Self, RbgError> {
        let mechanism = HmacSha1Drbg::default();
        let params = mechanism.params();

        let mut material = Zeroizing::new(Vec::with_capacity(persona.len() + context.len()));
        material.extend_from_slice(persona);
        material.extend_from_slice(context);
        let personalization = Zeroizing::new(hash_df::derive(
            &material,
            params.max_personalization_bits.div_ceil(8) * 8,
        )?);

        let drbg = Drbg::instantiated(
            mechanism,
            source,
            params.max_strength,
            true,
            &personalization,
        )?;
        Ok(OversamplingNrbg { drbg })
    }

    pub fn security_strength(&self) -> SecurityStrength {
        self.drbg
            .security_strength()
            .unwrap_or(SecurityStrength::Bits128)
    }

    /// Produce `ceil(bits / 8)` bytes of full-entropy output.
    pub fn generate(&mut self, bits: usize) -> Result<Vec<u8>, RbgError> {
        let chunk = self.security_strength().bits() / 2;
        let chunk_bits = chunk as usize;

        let mut out = Vec::with_capacity(bits.div_ceil(chunk_bits) * chunk_bits / 8);
        let mut produced = 0;
        while produced < bits {
            let block = self.drbg.generate(chunk_bits, Some(2 * chunk), true, &[])?;
            out.extend_from_slice(&block);
            produced += chunk_bits;
        }
        out.truncate(bits.div_ceil(8));
        Ok(out)
    }

    /// The underlying DRBG.
    pub fn drbg(&self) -> &HmacDrbg<S> {
        &self.drbg
    }
}

impl<S: EntropySource> EntropySource for OversamplingNrbg<S> {
    fn get_entropy_input(&mut self, request: EntropyRequest) -> Result<Vec<u8>, RbgError> {
        let min_len = request.check()?;
        self.generate(min_len)
    }
}

impl<S: EntropySource> RandomBitGenerator for OversamplingNrbg<S> {
    /// Full-entropy output satisfies any strength, so `strength` is ignored.
    fn generate(&mut self, bits: usize, _strength: Option<u32>) -> Result<Vec<u8>, RbgError> {
        OversamplingNrbg::generate(self, bits)
    }
}
