//! Sources of entropy input (NIST SP 800-90C §10).
//!
//! A DRBG pulls seed material through the [`EntropySource`] contract:
//! a request names the minimum entropy it needs and the length window the
//! returned bitstring must fit in. Implementations:
//!
//! - [`JitterSource`]: timing-jitter noise with a statistical entropy estimate
//! - [`NullSource`]: fast, zero-entropy filler for tests and benchmarks
//! - [`crate::drbg::Drbg`]: an instantiated DRBG can seed another one
//!
//! # Example
//!
//! ```no_run
//! use rbg_crypto::entropy::{EntropyRequest, EntropySource, JitterConfig, JitterSource};
//!
//! let mut source = JitterSource::new(JitterConfig::default());
//! let seed = source
//!     .get_entropy_input(EntropyRequest::new(128, 128, 1000, false))
//!     .expect("entropy acquisition failed");
//! assert!(seed.len() >= 16 && seed.len() <= 125);
//! ```

pub mod assessment;
pub mod health;
#[cfg(feature = "jitter")]
pub mod jitter;

pub use health::{Cutoffs, HealthTest};
#[cfg(feature = "jitter")]
pub use jitter::{JitterConfig, JitterSource};

use rbg_types::RbgError;

/// Parameters of one entropy-input request. All lengths are in bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntropyRequest {
    /// Minimum assessed min-entropy of the result.
    pub min_entropy: usize,
    /// Minimum length of the result.
    pub min_len: usize,
    /// Maximum length of the result.
    pub max_len: usize,
    /// Whether the input must provide prediction resistance.
    pub resist: bool,
}

impl EntropyRequest {
    pub fn new(min_entropy: usize, min_len: usize, max_len: usize, resist: bool) -> Self {
        EntropyRequest {
            min_entropy,
            min_len,
            max_len,
            resist,
        }
    }

    /// Minimum length once the entropy requirement is folded in: a string
    /// carrying `min_entropy` bits can never be shorter than that.
    pub fn effective_min_len(&self) -> usize {
        self.min_len.max(self.min_entropy)
    }

    /// Validate the length window and return the effective minimum length.
    pub fn check(&self) -> Result<usize, RbgError> {
        let min_len = self.effective_min_len();
        if min_len > self.max_len {
            return Err(RbgError::ImpossibleLengthRequested {
                min_len,
                max_len: self.max_len,
            });
        }
        Ok(min_len)
    }
}

/// Source of entropy input (SP 800-90C).
///
/// The returned string is between `min_len` and `max_len` bits long, rounded
/// up to whole bytes, and carries at least `min_entropy` bits of assessed
/// min-entropy. A request whose folded minimum length exceeds `max_len`
/// fails with [`RbgError::ImpossibleLengthRequested`].
pub trait EntropySource: Send {
    fn get_entropy_input(&mut self, request: EntropyRequest) -> Result<Vec<u8>, RbgError>;
}

impl<S: EntropySource + ?Sized> EntropySource for &mut S {
    fn get_entropy_input(&mut self, request: EntropyRequest) -> Result<Vec<u8>, RbgError> {
        (**self).get_entropy_input(request)
    }
}

impl<S: EntropySource + ?Sized> EntropySource for Box<S> {
    fn get_entropy_input(&mut self, request: EntropyRequest) -> Result<Vec<u8>, RbgError> {
        (**self).get_entropy_input(request)
    }
}

/// Entropy source that provides no entropy, very fast.
///
/// Honors only the length part of the contract: the output is a counter
/// pattern, different on every call but entirely predictable. Use it to
/// exercise code that depends on [`EntropySource`], never to seed anything.
#[derive(Debug, Default)]
pub struct NullSource {
    calls: u32,
}

impl NullSource {
    pub fn new() -> Self {
        NullSource { calls: 0 }
    }

    /// Number of successful requests served so far.
    pub fn calls(&self) -> u32 {
        self.calls
    }
}

impl EntropySource for NullSource {
    fn get_entropy_input(&mut self, request: EntropyRequest) -> Result<Vec<u8>, RbgError> {
        let min_len = request.check()?;
        self.calls = self.calls.wrapping_add(1);
        let pattern = self.calls.to_le_bytes();
        Ok(pattern
            .iter()
            .copied()
            .cycle()
            .take(min_len.div_ceil(8))
            .collect())
    }
}
