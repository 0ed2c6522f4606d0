//! HMAC_DRBG mechanism (NIST SP 800-90A §10.1.2) over HMAC-SHA-1.

use super::{Drbg, DrbgMechanism, Generated, MechanismParams};
use crate::hmac::hmac_sha1;
use crate::sha1::SHA1_OUTPUT_SIZE;
use rbg_types::{RbgError, SecurityStrength};
use zeroize::Zeroize;

/// HMAC output size for SHA-1.
const HMAC_SIZE: usize = SHA1_OUTPUT_SIZE;

/// Limits of HMAC_DRBG with SHA-1 (SP 800-90A Table 2).
pub const HMAC_SHA1_PARAMS: MechanismParams = MechanismParams {
    max_strength: 128,
    max_personalization_bits: 1000,
    max_additional_bits: 1000,
    max_entropy_bits: 1000,
    max_request_bits: 7500,
    reseed_interval: 100_000,
};

/// HMAC_DRBG envelope over HMAC-SHA-1.
pub type HmacDrbg<S> = Drbg<HmacSha1Drbg, S>;

/// The HMAC-SHA-1 mechanism.
#[derive(Debug, Clone, Copy)]
pub struct HmacSha1Drbg {
    params: MechanismParams,
}

impl Default for HmacSha1Drbg {
    fn default() -> Self {
        HmacSha1Drbg {
            params: HMAC_SHA1_PARAMS,
        }
    }
}

impl HmacSha1Drbg {
    /// The mechanism with a shorter reseed interval.
    pub fn with_reseed_interval(reseed_interval: u64) -> Self {
        HmacSha1Drbg {
            params: MechanismParams {
                reseed_interval: reseed_interval.min(HMAC_SHA1_PARAMS.reseed_interval),
                ..HMAC_SHA1_PARAMS
            },
        }
    }
}

/// HMAC_DRBG working state.
pub struct HmacDrbgState {
    /// HMAC key K (20 bytes).
    k: [u8; HMAC_SIZE],
    /// Chaining value V (20 bytes).
    v: [u8; HMAC_SIZE],
    /// Number of generate requests since last (re)seed, plus one.
    reseed_counter: u64,
}

impl Drop for HmacDrbgState {
    fn drop(&mut self) {
        self.k.zeroize();
        self.v.zeroize();
    }
}

impl HmacDrbgState {
    /// Initial state: K = 0x00..00, V = 0x01..01, then seeded.
    fn seeded(seed_material: &[u8]) -> Result<Self, RbgError> {
        let mut state = HmacDrbgState {
            k: [0x00u8; HMAC_SIZE],
            v: [0x01u8; HMAC_SIZE],
            reseed_counter: 0,
        };
        state.update(seed_material)?;
        state.reseed_counter = 1;
        Ok(state)
    }

    /// HMAC_DRBG Update function (SP 800-90A §10.1.2.2).
    fn update(&mut self, provided_data: &[u8]) -> Result<(), RbgError> {
        // K = HMAC(K, V || 0x00 || provided_data)
        let mut msg = Vec::with_capacity(HMAC_SIZE + 1 + provided_data.len());
        msg.extend_from_slice(&self.v);
        msg.push(0x00);
        msg.extend_from_slice(provided_data);
        self.k = hmac_sha1(&self.k, &msg)?;

        // V = HMAC(K, V)
        self.v = hmac_sha1(&self.k, &self.v)?;

        if !provided_data.is_empty() {
            // K = HMAC(K, V || 0x01 || provided_data)
            msg.clear();
            msg.extend_from_slice(&self.v);
            msg.push(0x01);
            msg.extend_from_slice(provided_data);
            self.k = hmac_sha1(&self.k, &msg)?;

            // V = HMAC(K, V)
            self.v = hmac_sha1(&self.k, &self.v)?;
        }

        msg.zeroize();
        Ok(())
    }
}

/// Concatenate seed material into a buffer that is wiped after `f` runs.
fn with_seed_material<T>(
    parts: &[&[u8]],
    f: impl FnOnce(&[u8]) -> Result<T, RbgError>,
) -> Result<T, RbgError> {
    let mut seed_material = parts.concat();
    let result = f(&seed_material);
    seed_material.zeroize();
    result
}

impl DrbgMechanism for HmacSha1Drbg {
    type State = HmacDrbgState;

    fn params(&self) -> MechanismParams {
        self.params
    }

    fn instantiate(
        &self,
        entropy: &[u8],
        nonce: Option<&[u8]>,
        personalization: &[u8],
        _strength: SecurityStrength,
    ) -> Result<HmacDrbgState, RbgError> {
        with_seed_material(
            &[entropy, nonce.unwrap_or_default(), personalization],
            HmacDrbgState::seeded,
        )
    }

    fn reseed(
        &self,
        state: &mut HmacDrbgState,
        entropy: &[u8],
        additional: &[u8],
    ) -> Result<(), RbgError> {
        with_seed_material(&[entropy, additional], |seed| state.update(seed))?;
        state.reseed_counter = 1;
        Ok(())
    }

    fn generate(
        &self,
        state: &mut HmacDrbgState,
        bits: usize,
        additional: &[u8],
    ) -> Result<Generated, RbgError> {
        if state.reseed_counter > self.params.reseed_interval {
            return Ok(Generated::ReseedRequired);
        }

        if !additional.is_empty() {
            state.update(additional)?;
        }

        let out_len = bits.div_ceil(8);
        let mut output = Vec::with_capacity(out_len.next_multiple_of(HMAC_SIZE));
        while output.len() < out_len {
            state.v = hmac_sha1(&state.k, &state.v)?;
            output.extend_from_slice(&state.v);
        }
        output.truncate(out_len);

        // Roll the state so the output blocks never become key material
        state.update(additional)?;
        state.reseed_counter += 1;

        Ok(Generated::Bits(output))
    }

    fn reseed_counter(&self, state: &HmacDrbgState) -> u64 {
        state.reseed_counter
    }
}
