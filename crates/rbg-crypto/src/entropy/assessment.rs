//! Min-entropy assessment of raw noise samples.
//!
//! The estimate is the most-common-value frequency test: take a one-sided
//! 95% upper confidence bound on the probability of the modal sample and
//! convert it to bits per sample. The bound errs towards fewer bits so the
//! source never claims more entropy than the samples carry.

use std::collections::HashMap;

/// Most frequent sample value and its count.
///
/// When several values share the top count the one that reached it first
/// wins. Returns `None` for an empty slice.
pub fn most_common(samples: &[u64]) -> Option<(u64, usize)> {
    let mut counts: HashMap<u64, usize> = HashMap::with_capacity(samples.len());
    let mut best: Option<(u64, usize)> = None;
    for &sample in samples {
        let count = counts.entry(sample).or_insert(0);
        *count += 1;
        match best {
            Some((_, top)) if *count <= top => {}
            _ => best = Some((sample, *count)),
        }
    }
    best
}

/// Min-entropy per sample, in bits, from the frequency of the modal value.
///
/// `H = -log2(m/n + sqrt(log2(1/0.95) / 2n))`, clamped at zero.
pub fn frequency_test(samples: &[u64]) -> f64 {
    let Some((_, mode_count)) = most_common(samples) else {
        return 0.0;
    };
    let n = samples.len() as f64;
    let margin = ((1.0f64 / 0.95).log2() / (2.0 * n)).sqrt();
    let p_upper = mode_count as f64 / n + margin;
    (-p_upper.log2()).max(0.0)
}
