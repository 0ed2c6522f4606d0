//! Deterministic Random Bit Generators (NIST SP 800-90A).
//!
//! [`Drbg`] is the mechanism-independent envelope of SP 800-90A §9: it
//! validates requests against the mechanism's limits, acquires entropy
//! input, and reseeds automatically when the mechanism runs out of its
//! reseed interval or when prediction resistance is requested. The
//! arithmetic lives behind [`DrbgMechanism`]; [`HmacSha1Drbg`] is the one
//! mechanism provided.
//!
//! # Example
//!
//! ```no_run
//! use rbg_crypto::drbg::{HmacDrbg, HmacSha1Drbg};
//! use rbg_crypto::entropy::{JitterConfig, JitterSource};
//!
//! let source = JitterSource::new(JitterConfig::default());
//! let mut drbg = HmacDrbg::instantiated(HmacSha1Drbg::default(), source, 128, false, b"app")
//!     .expect("instantiation failed");
//! let bytes = drbg.generate(256, None, false, b"").expect("generate failed");
//! assert_eq!(bytes.len(), 32);
//! ```

mod hmac_drbg;
pub mod nrbg;

pub use hmac_drbg::{HmacDrbg, HmacDrbgState, HmacSha1Drbg, HMAC_SHA1_PARAMS};
pub use nrbg::OversamplingNrbg;

use crate::entropy::{EntropyRequest, EntropySource};
use rbg_types::{RbgError, SecurityStrength};
use zeroize::Zeroizing;

/// Limits of a DRBG mechanism. Lengths are in bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MechanismParams {
    /// Highest security strength the mechanism supports.
    pub max_strength: u32,
    /// Longest personalization string.
    pub max_personalization_bits: usize,
    /// Longest additional input.
    pub max_additional_bits: usize,
    /// Longest entropy input requested from the source.
    pub max_entropy_bits: usize,
    /// Most bits returned by one generate request.
    pub max_request_bits: usize,
    /// Generate requests allowed between reseeds.
    pub reseed_interval: u64,
}

/// Result of one run of a mechanism's generate algorithm.
#[derive(Debug, PartialEq, Eq)]
pub enum Generated {
    /// `ceil(bits / 8)` bytes of output.
    Bits(Vec<u8>),
    /// The reseed interval is exhausted; nothing was produced.
    ReseedRequired,
}

/// The algorithms of a concrete DRBG mechanism (SP 800-90A §10).
///
/// The envelope owns the working state and hands it to every call.
pub trait DrbgMechanism {
    /// Working state (for HMAC_DRBG: K, V and the reseed counter).
    type State;

    /// The mechanism's limits.
    fn params(&self) -> MechanismParams;

    /// Derive the initial working state.
    fn instantiate(
        &self,
        entropy: &[u8],
        nonce: Option<&[u8]>,
        personalization: &[u8],
        strength: SecurityStrength,
    ) -> Result<Self::State, RbgError>;

    /// Mix fresh entropy and additional input into the state.
    fn reseed(
        &self,
        state: &mut Self::State,
        entropy: &[u8],
        additional: &[u8],
    ) -> Result<(), RbgError>;

    /// Produce `ceil(bits / 8)` bytes, or signal that a reseed is due.
    fn generate(
        &self,
        state: &mut Self::State,
        bits: usize,
        additional: &[u8],
    ) -> Result<Generated, RbgError>;

    /// Generate requests served since the last (re)seed, plus one.
    fn reseed_counter(&self, state: &Self::State) -> u64;
}

/// A generator of random bits at a requested security strength.
pub trait RandomBitGenerator {
    /// Return `ceil(bits / 8)` bytes. `strength` of `None` means the
    /// generator's own strength.
    fn generate(&mut self, bits: usize, strength: Option<u32>) -> Result<Vec<u8>, RbgError>;
}

struct Instance<St> {
    state: St,
    strength: SecurityStrength,
    resist: bool,
    reseed_required: bool,
}

/// DRBG envelope around a mechanism `M`, seeded from the source `S`.
pub struct Drbg<M: DrbgMechanism, S: EntropySource> {
    mechanism: M,
    params: MechanismParams,
    source: S,
    instance: Option<Instance<M::State>>,
}

impl<M: DrbgMechanism, S: EntropySource> Drbg<M, S> {
    /// Create an uninstantiated DRBG.
    pub fn new(mechanism: M, source: S) -> Self {
        let params = mechanism.params();
        Drbg {
            mechanism,
            params,
            source,
            instance: None,
        }
    }

    /// Create a DRBG and instantiate it right away.
    pub fn instantiated(
        mechanism: M,
        source: S,
        strength: u32,
        resist: bool,
        personalization: &[u8],
    ) -> Result<Self, RbgError> {
        let mut drbg = Self::new(mechanism, source);
        drbg.instantiate(strength, resist, personalization)?;
        Ok(drbg)
    }

    /// Instantiate (SP 800-90A §9.1), replacing any previous working state.
    ///
    /// The requested strength is rounded up to the nearest supported class.
    /// Entropy and nonce are first requested together as one string of
    /// 1.5 × strength bits of entropy; if the source refuses, they are
    /// requested separately.
    pub fn instantiate(
        &mut self,
        strength: u32,
        resist: bool,
        personalization: &[u8],
    ) -> Result<(), RbgError> {
        if strength > self.params.max_strength {
            return Err(RbgError::InvalidStrength {
                requested: strength,
                max: self.params.max_strength,
            });
        }
        if personalization.len() > self.params.max_personalization_bits.div_ceil(8) {
            return Err(RbgError::PersonalizationTooLong {
                got: personalization.len() * 8,
                max: self.params.max_personalization_bits,
            });
        }
        let strength = SecurityStrength::round_up(strength)?;

        let (entropy, nonce) = self.acquire_seed(strength.bits() as usize, resist)?;
        let state = self.mechanism.instantiate(
            &entropy,
            nonce.as_deref().map(Vec::as_slice),
            personalization,
            strength,
        )?;
        log::debug!(
            "drbg: instantiated at {} (prediction resistance: {})",
            strength,
            resist
        );
        self.instance = Some(Instance {
            state,
            strength,
            resist,
            reseed_required: false,
        });
        Ok(())
    }

    fn acquire_seed(
        &mut self,
        bits: usize,
        resist: bool,
    ) -> Result<(Zeroizing<Vec<u8>>, Option<Zeroizing<Vec<u8>>>), RbgError> {
        let max_len = self.params.max_entropy_bits;
        let combined = EntropyRequest::new(bits * 3 / 2, bits, max_len, resist);
        match self.source.get_entropy_input(combined) {
            Ok(input) => Ok((Zeroizing::new(input), None)),
            Err(e) => {
                log::debug!("drbg: combined entropy request failed ({e}), requesting nonce separately");
                let input = Zeroizing::new(
                    self.source
                        .get_entropy_input(EntropyRequest::new(bits, bits, max_len, resist))?,
                );
                let nonce = Zeroizing::new(self.source.get_entropy_input(EntropyRequest::new(
                    bits.div_ceil(2),
                    bits,
                    max_len,
                    resist,
                ))?);
                Ok((input, Some(nonce)))
            }
        }
    }

    /// Reseed (SP 800-90A §9.2) with fresh entropy and optional additional input.
    pub fn reseed(&mut self, resist: bool, additional: &[u8]) -> Result<(), RbgError> {
        let instance = self.instance.as_ref().ok_or(RbgError::NotInstantiated)?;
        if resist && !instance.resist {
            return Err(RbgError::ResistanceUnavailable);
        }
        self.check_additional(additional)?;
        self.reseed_unchecked(resist, additional)
    }

    fn reseed_unchecked(&mut self, resist: bool, additional: &[u8]) -> Result<(), RbgError> {
        let instance = self.instance.as_mut().ok_or(RbgError::NotInstantiated)?;
        let bits = instance.strength.bits() as usize;
        let request = EntropyRequest::new(bits, bits, self.params.max_entropy_bits, resist);
        let entropy = Zeroizing::new(self.source.get_entropy_input(request)?);
        self.mechanism
            .reseed(&mut instance.state, &entropy, additional)?;
        instance.reseed_required = false;
        Ok(())
    }

    fn check_additional(&self, additional: &[u8]) -> Result<(), RbgError> {
        if additional.len() > self.params.max_additional_bits.div_ceil(8) {
            return Err(RbgError::AdditionalInputTooLong {
                got: additional.len() * 8,
                max: self.params.max_additional_bits,
            });
        }
        Ok(())
    }

    /// Generate `ceil(bits / 8)` bytes (SP 800-90A §9.3).
    ///
    /// `strength` of `None` means the instantiated strength. A request with
    /// `resist` set, or one arriving after the reseed interval ran out,
    /// reseeds first; the additional input is then consumed by the reseed.
    pub fn generate(
        &mut self,
        bits: usize,
        strength: Option<u32>,
        resist: bool,
        additional: &[u8],
    ) -> Result<Vec<u8>, RbgError> {
        let instance = self.instance.as_ref().ok_or(RbgError::NotInstantiated)?;
        if bits > self.params.max_request_bits {
            return Err(RbgError::RequestTooLarge {
                got: bits,
                max: self.params.max_request_bits,
            });
        }
        let provisioned = instance.strength.bits();
        if let Some(requested) = strength {
            if requested > provisioned {
                return Err(RbgError::StrengthTooHigh {
                    requested,
                    instantiated: provisioned,
                });
            }
        }
        self.check_additional(additional)?;
        if resist && !instance.resist {
            return Err(RbgError::ResistanceUnavailable);
        }

        let mut resist = resist;
        let mut additional = additional;
        loop {
            let pending = self
                .instance
                .as_ref()
                .is_some_and(|instance| instance.reseed_required);
            if pending || resist {
                self.reseed_unchecked(resist, additional)?;
                additional = &[];
            }

            let instance = self.instance.as_mut().ok_or(RbgError::NotInstantiated)?;
            match self
                .mechanism
                .generate(&mut instance.state, bits, additional)?
            {
                Generated::Bits(out) => return Ok(out),
                Generated::ReseedRequired => {
                    log::debug!("drbg: reseed interval exhausted, reseeding");
                    instance.reseed_required = true;
                }
            }
            if instance.resist {
                resist = true;
            }
        }
    }

    pub fn is_instantiated(&self) -> bool {
        self.instance.is_some()
    }

    /// Strength fixed at instantiation.
    pub fn security_strength(&self) -> Option<SecurityStrength> {
        self.instance.as_ref().map(|instance| instance.strength)
    }

    /// Whether the instance was provisioned for prediction resistance.
    pub fn prediction_resistance(&self) -> bool {
        self.instance.as_ref().is_some_and(|instance| instance.resist)
    }

    pub fn reseed_counter(&self) -> Option<u64> {
        self.instance
            .as_ref()
            .map(|instance| self.mechanism.reseed_counter(&instance.state))
    }

    pub fn params(&self) -> MechanismParams {
        self.params
    }

    pub fn entropy_source(&self) -> &S {
        &self.source
    }
}

/// An instantiated DRBG can seed another one (SP 800-90C §10.1). The
/// requested entropy is passed as the security strength of the generate
/// request, so asking for more than the instance provides fails.
impl<M, S> EntropySource for Drbg<M, S>
where
    M: DrbgMechanism + Send,
    M::State: Send,
    S: EntropySource,
{
    fn get_entropy_input(&mut self, request: EntropyRequest) -> Result<Vec<u8>, RbgError> {
        let min_len = request.check()?;
        let strength = u32::try_from(request.min_entropy).unwrap_or(u32::MAX);
        self.generate(min_len, Some(strength), request.resist, &[])
    }
}

impl<M: DrbgMechanism, S: EntropySource> RandomBitGenerator for Drbg<M, S> {
    fn generate(&mut self, bits: usize, strength: Option<u32>) -> Result<Vec<u8>, RbgError> {
        Drbg::generate(self, bits, strength, false, &[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entropy::NullSource;
    use rbg_types::ErrorKind;

    /// Source that refuses requests asking for more entropy than length,
    /// recording every request it sees.
    struct SplitOnlySource {
        requests: Vec<EntropyRequest>,
        inner: NullSource,
    }

    impl SplitOnlySource {
        fn new() -> Self {
            SplitOnlySource {
                requests: Vec::new(),
                inner: NullSource::new(),
            }
        }
    }

    impl EntropySource for SplitOnlySource {
        fn get_entropy_input(&mut self, request: EntropyRequest) -> Result<Vec<u8>, RbgError> {
            self.requests.push(request);
            if request.min_entropy > request.min_len {
                return Err(RbgError::ImpossibleLengthRequested {
                    min_len: request.min_entropy,
                    max_len: request.min_len,
                });
            }
            self.inner.get_entropy_input(request)
        }
    }

    /// Source that fails every request.
    struct FailingSource;

    impl EntropySource for FailingSource {
        fn get_entropy_input(&mut self, _request: EntropyRequest) -> Result<Vec<u8>, RbgError> {
            Err(RbgError::InsufficientEntropy {
                requested: 0,
                assessed: 0,
                batches: 0,
            })
        }
    }

    fn null_drbg(strength: u32, resist: bool) -> HmacDrbg<NullSource> {
        Drbg::instantiated(
            HmacSha1Drbg::default(),
            NullSource::new(),
            strength,
            resist,
            b"test",
        )
        .unwrap()
    }

    #[test]
    fn test_not_instantiated() {
        let mut drbg = Drbg::new(HmacSha1Drbg::default(), NullSource::new());
        assert!(!drbg.is_instantiated());
        assert_eq!(drbg.security_strength(), None);
        assert_eq!(drbg.reseed_counter(), None);
        assert_eq!(
            drbg.generate(8, None, false, b""),
            Err(RbgError::NotInstantiated)
        );
        assert_eq!(drbg.reseed(false, b""), Err(RbgError::NotInstantiated));
        assert_eq!(drbg.entropy_source().calls(), 0);
    }

    #[test]
    fn test_strength_rounding() {
        for (requested, expected) in [
            (0, SecurityStrength::Bits112),
            (80, SecurityStrength::Bits112),
            (112, SecurityStrength::Bits112),
            (113, SecurityStrength::Bits128),
            (128, SecurityStrength::Bits128),
        ] {
            let drbg = null_drbg(requested, false);
            assert_eq!(drbg.security_strength(), Some(expected));
        }
    }

    #[test]
    fn test_strength_above_mechanism_maximum() {
        let mut drbg = Drbg::new(HmacSha1Drbg::default(), NullSource::new());
        let err = drbg.instantiate(192, false, b"").unwrap_err();
        assert_eq!(
            err,
            RbgError::InvalidStrength {
                requested: 192,
                max: 128
            }
        );
        assert_eq!(err.kind(), ErrorKind::Configuration);
        assert!(drbg.instantiate(300, false, b"").is_err());
        assert!(!drbg.is_instantiated());
    }

    #[test]
    fn test_personalization_limit() {
        let mut drbg = Drbg::new(HmacSha1Drbg::default(), NullSource::new());
        drbg.instantiate(128, false, &[0x5a; 125]).unwrap();
        let err = drbg.instantiate(128, false, &[0x5a; 126]).unwrap_err();
        assert_eq!(
            err,
            RbgError::PersonalizationTooLong {
                got: 1008,
                max: 1000
            }
        );
    }

    #[test]
    fn test_combined_request_sizes() {
        let mut source = SplitOnlySource::new();
        let mut drbg = Drbg::new(HmacSha1Drbg::default(), &mut source);
        drbg.instantiate(128, true, b"").unwrap();
        drop(drbg);
        assert_eq!(
            source.requests,
            vec![
                EntropyRequest::new(192, 128, 1000, true),
                EntropyRequest::new(128, 128, 1000, true),
                EntropyRequest::new(64, 128, 1000, true),
            ]
        );
    }

    #[test]
    fn test_combined_request_used_when_it_succeeds() {
        let drbg = null_drbg(112, false);
        assert_eq!(drbg.entropy_source().calls(), 1);
        assert_eq!(drbg.reseed_counter(), Some(1));
    }

    #[test]
    fn test_entropy_failure_propagates() {
        let mut drbg = Drbg::new(HmacSha1Drbg::default(), FailingSource);
        let err = drbg.instantiate(128, false, b"").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::EntropyUnavailable);
        assert!(!drbg.is_instantiated());
    }

    #[test]
    fn test_generate_check_order() {
        let mut drbg = null_drbg(112, false);
        let long = [0u8; 126];

        // Every check fails at once; the request size is reported first
        assert!(matches!(
            drbg.generate(7501, Some(256), true, &long),
            Err(RbgError::RequestTooLarge { got: 7501, max: 7500 })
        ));
        assert!(matches!(
            drbg.generate(7500, Some(128), true, &long),
            Err(RbgError::StrengthTooHigh {
                requested: 128,
                instantiated: 112
            })
        ));
        assert!(matches!(
            drbg.generate(7500, Some(112), true, &long),
            Err(RbgError::AdditionalInputTooLong { got: 1008, max: 1000 })
        ));
        let err = drbg.generate(7500, Some(112), true, &long[..125]).unwrap_err();
        assert_eq!(err, RbgError::ResistanceUnavailable);
        assert_eq!(err.kind(), ErrorKind::Capability);

        assert_eq!(drbg.generate(7500, Some(112), false, &long[..125]).unwrap().len(), 938);
    }

    #[test]
    fn test_reseed_resistance_unavailable() {
        let mut drbg = null_drbg(128, false);
        assert_eq!(drbg.reseed(true, b""), Err(RbgError::ResistanceUnavailable));
        drbg.reseed(false, b"extra").unwrap();
        assert_eq!(drbg.entropy_source().calls(), 2);
        assert_eq!(drbg.reseed_counter(), Some(1));
    }

    #[test]
    fn test_resist_reseeds_on_every_request() {
        let mut drbg = null_drbg(128, true);
        assert!(drbg.prediction_resistance());
        drbg.generate(64, None, false, b"").unwrap();
        assert_eq!(drbg.entropy_source().calls(), 1);
        drbg.generate(64, None, true, b"").unwrap();
        assert_eq!(drbg.entropy_source().calls(), 2);
        drbg.generate(64, None, true, b"").unwrap();
        assert_eq!(drbg.entropy_source().calls(), 3);
        assert_eq!(drbg.reseed_counter(), Some(2));
    }

    #[test]
    fn test_end_to_end() {
        let mut drbg = null_drbg(128, false);
        let a = drbg.generate(256, None, false, b"").unwrap();
        let b = drbg.generate(256, None, false, b"").unwrap();
        assert_eq!(a.len(), 32);
        assert_eq!(b.len(), 32);
        assert_ne!(a, b);
        assert_eq!(drbg.reseed_counter(), Some(3));
        assert_eq!(drbg.entropy_source().calls(), 1);
    }

    #[test]
    fn test_output_length_rounds_up_to_bytes() {
        let mut drbg = null_drbg(128, false);
        for (bits, len) in [(0, 0), (1, 1), (8, 1), (9, 2), (160, 20), (161, 21), (7500, 938)] {
            assert_eq!(drbg.generate(bits, None, false, b"").unwrap().len(), len);
        }
    }

    #[test]
    fn test_automatic_reseed_after_interval() {
        let mut drbg = null_drbg(112, false);
        let interval = drbg.params().reseed_interval;
        for _ in 0..interval {
            drbg.generate(8, None, false, b"").unwrap();
        }
        assert_eq!(drbg.entropy_source().calls(), 1);
        assert_eq!(drbg.reseed_counter(), Some(interval + 1));

        let out = drbg.generate(8, None, false, b"").unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(drbg.entropy_source().calls(), 2);
        assert_eq!(drbg.reseed_counter(), Some(2));
    }

    #[test]
    fn test_interval_reseed_inherits_provisioned_resistance() {
        for provisioned in [false, true] {
            let mut drbg = Drbg::instantiated(
                HmacSha1Drbg::with_reseed_interval(1),
                SplitOnlySource::new(),
                128,
                provisioned,
                b"",
            )
            .unwrap();
            // Combined request refused, then entropy and nonce
            assert_eq!(drbg.entropy_source().requests.len(), 3);

            drbg.generate(64, None, false, b"").unwrap();
            assert_eq!(drbg.entropy_source().requests.len(), 3);

            // Interval exhausted: the retry reseeds, with resistance if provisioned
            drbg.generate(64, None, false, b"").unwrap();
            let requests = &drbg.entropy_source().requests;
            assert_eq!(requests.len(), 4);
            assert_eq!(
                requests[3],
                EntropyRequest::new(128, 128, 1000, provisioned),
                "provisioned = {provisioned}"
            );
        }
    }

    /// Mechanism wrapper logging the additional input each algorithm sees.
    struct RecordingMechanism {
        inner: HmacSha1Drbg,
        calls: std::sync::Mutex<Vec<(&'static str, Vec<u8>)>>,
    }

    impl RecordingMechanism {
        fn new(reseed_interval: u64) -> Self {
            RecordingMechanism {
                inner: HmacSha1Drbg::with_reseed_interval(reseed_interval),
                calls: std::sync::Mutex::new(Vec::new()),
            }
        }

        fn take_calls(&self) -> Vec<(&'static str, Vec<u8>)> {
            std::mem::take(&mut *self.calls.lock().unwrap())
        }
    }

    impl DrbgMechanism for RecordingMechanism {
        type State = HmacDrbgState;

        fn params(&self) -> MechanismParams {
            self.inner.params()
        }

        fn instantiate(
            &self,
            entropy: &[u8],
            nonce: Option<&[u8]>,
            personalization: &[u8],
            strength: SecurityStrength,
        ) -> Result<HmacDrbgState, RbgError> {
            self.inner
                .instantiate(entropy, nonce, personalization, strength)
        }

        fn reseed(
            &self,
            state: &mut HmacDrbgState,
            entropy: &[u8],
            additional: &[u8],
        ) -> Result<(), RbgError> {
            self.calls
                .lock()
                .unwrap()
                .push(("reseed", additional.to_vec()));
            self.inner.reseed(state, entropy, additional)
        }

        fn generate(
            &self,
            state: &mut HmacDrbgState,
            bits: usize,
            additional: &[u8],
        ) -> Result<Generated, RbgError> {
            self.calls
                .lock()
                .unwrap()
                .push(("generate", additional.to_vec()));
            self.inner.generate(state, bits, additional)
        }

        fn reseed_counter(&self, state: &HmacDrbgState) -> u64 {
            self.inner.reseed_counter(state)
        }
    }

    #[test]
    fn test_reseed_consumes_additional_input() {
        let mut drbg = Drbg::instantiated(
            RecordingMechanism::new(1),
            NullSource::new(),
            128,
            true,
            b"",
        )
        .unwrap();

        drbg.generate(64, None, false, b"first").unwrap();
        assert_eq!(
            drbg.mechanism.take_calls(),
            vec![("generate", b"first".to_vec())]
        );

        // Interval exhausted: the automatic reseed takes the input and the
        // retried generate runs without it
        drbg.generate(64, None, false, b"second").unwrap();
        assert_eq!(
            drbg.mechanism.take_calls(),
            vec![
                ("generate", b"second".to_vec()),
                ("reseed", b"second".to_vec()),
                ("generate", Vec::new()),
            ]
        );

        // Same for a reseed asked for by the caller
        drbg.generate(64, None, true, b"third").unwrap();
        assert_eq!(
            drbg.mechanism.take_calls(),
            vec![("reseed", b"third".to_vec()), ("generate", Vec::new())]
        );
    }

    #[test]
    fn test_reseed_failure_surfaces_as_entropy_error() {
        let mut source = SplitOnlySource::new();
        let mut drbg = Drbg::instantiated(
            HmacSha1Drbg::with_reseed_interval(2),
            &mut source,
            128,
            false,
            b"",
        )
        .unwrap();
        drbg.generate(8, None, false, b"").unwrap();
        drbg.generate(8, None, false, b"").unwrap();
        drbg.generate(8, None, false, b"").unwrap();
        drop(drbg);
        // combined attempt, split entropy + nonce, then one automatic reseed
        assert_eq!(source.requests.len(), 4);

        let mut drbg = Drbg::instantiated(
            HmacSha1Drbg::with_reseed_interval(1),
            NullSource::new(),
            128,
            false,
            b"",
        )
        .unwrap();
        drbg.generate(8, None, false, b"").unwrap();
        let mut drbg = Drbg {
            mechanism: drbg.mechanism,
            params: drbg.params,
            source: FailingSource,
            instance: drbg.instance,
        };
        let err = drbg.generate(8, None, false, b"").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::EntropyUnavailable);
    }

    #[test]
    fn test_drbg_as_entropy_source() {
        let mut parent = null_drbg(128, false);
        let seed = parent
            .get_entropy_input(EntropyRequest::new(128, 64, 1000, false))
            .unwrap();
        assert_eq!(seed.len(), 16);

        assert!(matches!(
            parent.get_entropy_input(EntropyRequest::new(192, 192, 1000, false)),
            Err(RbgError::StrengthTooHigh { .. })
        ));
        assert!(matches!(
            parent.get_entropy_input(EntropyRequest::new(0, 2000, 1000, false)),
            Err(RbgError::ImpossibleLengthRequested { .. })
        ));

        let child = Drbg::instantiated(HmacSha1Drbg::default(), &mut parent, 112, false, b"child");
        assert!(child.is_ok());
    }

    #[test]
    fn test_random_bit_generator_trait() {
        fn draw<G: RandomBitGenerator>(rbg: &mut G) -> Vec<u8> {
            rbg.generate(128, None).unwrap()
        }
        let mut drbg = null_drbg(128, false);
        assert_eq!(draw(&mut drbg).len(), 16);
        assert!(RandomBitGenerator::generate(&mut drbg, 8, Some(256)).is_err());
    }
}
