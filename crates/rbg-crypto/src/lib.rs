#![doc = "Random bit generation per NIST SP 800-90A/90C: HMAC-DRBG, entropy sources, and the primitives beneath them."]
#![forbid(unsafe_code)]

// Core traits
pub mod provider;

// Hash algorithms
#[cfg(feature = "sha1")]
pub mod sha1;

// MAC algorithms
#[cfg(feature = "hmac")]
pub mod hmac;

// Derivation function
#[cfg(feature = "sha1")]
pub mod hash_df;

// Entropy sources and DRBG
pub mod entropy;
#[cfg(feature = "drbg")]
pub mod drbg;

// Known-answer self tests
#[cfg(feature = "drbg")]
pub mod selftest;
