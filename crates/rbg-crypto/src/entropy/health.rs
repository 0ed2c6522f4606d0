//! Continuous health tests over raw timing deltas (NIST SP 800-90B §4.4).
//!
//! Both tests are sized from the min-entropy per sample H the source
//! currently claims, for a false-positive probability of 2^-20 per test:
//!
//! - the repetition count test fails when one delta repeats
//!   `1 + ⌈20 / H⌉` times in a row;
//! - the adaptive proportion test fails when the first delta of a window
//!   recurs more often than a binomial(W, 2^-H) count would allow.
//!
//! The jitter source starts from a conservative floor for H and retunes the
//! cutoffs from each assessed batch.

use rbg_types::RbgError;

/// -log2 of the false-positive probability of each test.
const ALPHA_EXPONENT: f64 = 20.0;

/// APT window for non-binary noise.
pub const DEFAULT_APT_WINDOW: u32 = 512;

/// Per-sample min-entropy assumed before any batch has been assessed.
/// Gives an RCT cutoff of 64.
pub const DEFAULT_MIN_ENTROPY: f64 = 0.32;

/// RCT cutoff `C = 1 + ⌈20 / H⌉`. A non-positive H disables the test.
pub fn rct_cutoff(min_entropy: f64) -> u32 {
    if !(min_entropy > 0.0) {
        return u32::MAX;
    }
    // Saturates for tiny H
    (1.0 + (ALPHA_EXPONENT / min_entropy).ceil()) as u32
}

/// APT cutoff: one plus the smallest k with `P[X <= k] >= 1 - 2^-20`,
/// X ~ binomial(`window`, 2^-H). A non-positive H yields `window + 1`,
/// which no window can reach.
pub fn apt_cutoff(min_entropy: f64, window: u32) -> u32 {
    let p = (-min_entropy).exp2();
    if !(min_entropy > 0.0) || p >= 1.0 {
        return window.saturating_add(1);
    }
    let n = f64::from(window);
    let target = 1.0 - (-ALPHA_EXPONENT).exp2();
    let ln_odds = (p / (1.0 - p)).ln();

    // Walk the pmf in log space; the left tail underflows for large windows
    let mut ln_pmf = n * (1.0 - p).ln();
    let mut cdf = 0.0;
    for k in 0..=window {
        cdf += ln_pmf.exp();
        if cdf >= target {
            return k + 1;
        }
        let kf = f64::from(k);
        ln_pmf += ((n - kf) / (kf + 1.0)).ln() + ln_odds;
    }
    window.saturating_add(1)
}

/// Cutoffs for both tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cutoffs {
    /// Run length at which the repetition count test fails.
    pub rct: u32,
    /// Samples per adaptive proportion window.
    pub apt_window: u32,
    /// Base-value count at which the adaptive proportion test fails.
    pub apt: u32,
}

impl Cutoffs {
    pub fn for_min_entropy(min_entropy: f64, apt_window: u32) -> Self {
        Cutoffs {
            rct: rct_cutoff(min_entropy),
            apt_window,
            apt: apt_cutoff(min_entropy, apt_window),
        }
    }
}

/// Open APT window: its base value, occurrences so far and samples seen.
struct Window {
    base: u64,
    hits: u32,
    seen: u32,
}

/// Repetition count and adaptive proportion tests run together on every
/// sample.
pub struct HealthTest {
    cutoffs: Cutoffs,
    /// Last sample and the length of its current run.
    run: Option<(u64, u32)>,
    window: Option<Window>,
}

impl HealthTest {
    pub fn new(cutoffs: Cutoffs) -> Self {
        HealthTest {
            cutoffs,
            run: None,
            window: None,
        }
    }

    pub fn for_min_entropy(min_entropy: f64, apt_window: u32) -> Self {
        Self::new(Cutoffs::for_min_entropy(min_entropy, apt_window))
    }

    pub fn cutoffs(&self) -> Cutoffs {
        self.cutoffs
    }

    /// Swap in new cutoffs. The current run and window carry over.
    pub fn set_cutoffs(&mut self, cutoffs: Cutoffs) {
        self.cutoffs = cutoffs;
    }

    pub fn test_sample(&mut self, sample: u64) -> Result<(), RbgError> {
        self.repetition(sample)?;
        self.proportion(sample)
    }

    fn repetition(&mut self, sample: u64) -> Result<(), RbgError> {
        let length = match self.run {
            Some((last, length)) if last == sample => length.saturating_add(1),
            _ => 1,
        };
        self.run = Some((sample, length));
        if length >= self.cutoffs.rct {
            return Err(RbgError::EntropyRctFailure);
        }
        Ok(())
    }

    fn proportion(&mut self, sample: u64) -> Result<(), RbgError> {
        let Some(window) = self.window.as_mut() else {
            self.window = Some(Window {
                base: sample,
                hits: 1,
                seen: 1,
            });
            return Ok(());
        };
        if sample == window.base {
            window.hits += 1;
            if window.hits >= self.cutoffs.apt {
                return Err(RbgError::EntropyAptFailure);
            }
        }
        window.seen += 1;
        if window.seen >= self.cutoffs.apt_window {
            self.window = None;
        }
        Ok(())
    }

    /// Forget the current run and window.
    pub fn reset(&mut self) {
        self.run = None;
        self.window = None;
    }
}
