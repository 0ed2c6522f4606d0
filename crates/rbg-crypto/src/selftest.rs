//! Known Answer Tests for the primitives and the HMAC_DRBG mechanism.
//!
//! Each KAT runs one computation on a fixed input and compares the result
//! with an expected value (FIPS 180, RFC 2202, or a recorded HMAC_DRBG
//! transcript).

use crate::drbg::{DrbgMechanism, Generated, HmacSha1Drbg};
use crate::entropy::health::{
    apt_cutoff, rct_cutoff, Cutoffs, HealthTest, DEFAULT_APT_WINDOW, DEFAULT_MIN_ENTROPY,
};
use rbg_types::{RbgError, SecurityStrength};

fn hex(s: &str) -> Vec<u8> {
    (0..s.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&s[i..i + 2], 16).unwrap_or_default())
        .collect()
}

fn kat_failure(what: &str, e: RbgError) -> RbgError {
    RbgError::KatFailure(format!("{what}: {e}"))
}

/// Every KAT, by name.
pub const ALL: [(&str, fn() -> Result<(), RbgError>); 5] = [
    ("SHA-1", kat_sha1),
    ("HMAC-SHA-1", kat_hmac_sha1),
    ("Hash_df", kat_hash_df),
    ("HMAC_DRBG", kat_hmac_drbg),
    ("health tests", kat_entropy_health),
];

/// Run all KATs. Returns on first failure.
pub fn run_all_kat() -> Result<(), RbgError> {
    for (_, kat) in ALL {
        kat()?;
    }
    Ok(())
}

/// SHA-1 KAT (FIPS 180 "abc").
pub fn kat_sha1() -> Result<(), RbgError> {
    use crate::sha1::Sha1;

    let expected = hex("a9993e364706816aba3e25717850c26c9cd0d89d");
    let digest = Sha1::digest(b"abc").map_err(|e| kat_failure("SHA-1", e))?;
    if digest[..] != expected[..] {
        return Err(RbgError::KatFailure("SHA-1 digest mismatch".into()));
    }
    Ok(())
}

/// HMAC-SHA-1 KAT (RFC 2202 Test Case 2).
pub fn kat_hmac_sha1() -> Result<(), RbgError> {
    use crate::hmac::hmac_sha1;

    let expected = hex("effcdf6ae5eb2fa2d27416d5f184df9c259a7c79");
    let tag = hmac_sha1(b"Jefe", b"what do ya want for nothing?")
        .map_err(|e| kat_failure("HMAC-SHA-1", e))?;
    if tag[..] != expected[..] {
        return Err(RbgError::KatFailure("HMAC-SHA-1 MAC mismatch".into()));
    }
    Ok(())
}

/// Hash_df KAT, including a partial trailing byte.
pub fn kat_hash_df() -> Result<(), RbgError> {
    use crate::hash_df::derive;

    let expected = hex("9b4ac52fada2ea0c0e14c8893d575cba3768476a00");
    let out = derive(b"abc", 161).map_err(|e| kat_failure("Hash_df", e))?;
    if out != expected {
        return Err(RbgError::KatFailure("Hash_df output mismatch".into()));
    }
    Ok(())
}

/// HMAC_DRBG KAT: instantiate with nonce and personalization, then two
/// generate calls, the second with additional input.
pub fn kat_hmac_drbg() -> Result<(), RbgError> {
    let entropy = hex("202122232425262728292a2b2c2d2e2f");
    let nonce = hex("4041424344454647");
    let pers = b"test";
    let expected1 = hex(
        "556697422c75804510074154b291db88eed084d7dc5c16ec155f56b2265e3ffd0bd37214cfb84ef0",
    );
    let expected2 = hex("a96bdfe2f21b1efcc3f80ea09ed6cbc5c72493ef");

    let mechanism = HmacSha1Drbg::default();
    let mut state = mechanism
        .instantiate(&entropy, Some(nonce.as_slice()), pers, SecurityStrength::Bits128)
        .map_err(|e| kat_failure("HMAC_DRBG instantiate", e))?;

    let out1 = mechanism
        .generate(&mut state, 320, b"")
        .map_err(|e| kat_failure("HMAC_DRBG generate1", e))?;
    if out1 != Generated::Bits(expected1) {
        return Err(RbgError::KatFailure("HMAC_DRBG output 1 mismatch".into()));
    }

    let out2 = mechanism
        .generate(&mut state, 160, b"additional")
        .map_err(|e| kat_failure("HMAC_DRBG generate2", e))?;
    if out2 != Generated::Bits(expected2) {
        return Err(RbgError::KatFailure("HMAC_DRBG output 2 mismatch".into()));
    }
    Ok(())
}

/// Health test KAT: cutoff derivation against SP 800-90B values, then
/// stuck and biased input must be caught and varying input must pass.
pub fn kat_entropy_health() -> Result<(), RbgError> {
    if rct_cutoff(1.0) != 21 || apt_cutoff(1.0, 1024) != 589 {
        return Err(RbgError::KatFailure("health test cutoff mismatch".into()));
    }

    let mut ht = HealthTest::new(Cutoffs {
        rct: 5,
        apt_window: 20,
        apt: 15,
    });
    if !(0..10).any(|_| ht.test_sample(0x42).is_err()) {
        return Err(RbgError::KatFailure(
            "RCT failed to detect stuck source".into(),
        ));
    }

    ht.reset();
    if !(0..20u64).any(|i| ht.test_sample(if i % 4 == 3 { i } else { 0x42 }).is_err()) {
        return Err(RbgError::KatFailure(
            "APT failed to detect biased source".into(),
        ));
    }

    let mut ht = HealthTest::for_min_entropy(DEFAULT_MIN_ENTROPY, DEFAULT_APT_WINDOW);
    for i in 0u64..1000 {
        ht.test_sample(i)
            .map_err(|e| kat_failure("health test rejected varying data", e))?;
    }
    Ok(())
}
