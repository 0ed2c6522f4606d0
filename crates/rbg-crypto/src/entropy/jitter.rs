//! Timing-jitter software noise source.
//!
//! Each raw sample is the wall-clock duration, in microseconds, of a loop of
//! chained SHA-1 computations. Scheduler preemption, cache and pipeline
//! effects make the duration vary; that variation is the noise. The loop
//! length is recalibrated on every request so a sample takes roughly
//! [`JitterConfig::sample_time_us`].

use std::hint::black_box;
use std::time::Instant;

use rbg_types::RbgError;
use zeroize::{Zeroize, Zeroizing};

use super::assessment::{frequency_test, most_common};
use super::health::{self, Cutoffs, HealthTest};
use super::{EntropyRequest, EntropySource};
use crate::hash_df;
use crate::sha1::{Sha1, SHA1_OUTPUT_SIZE};

/// Configuration for the jitter source.
#[derive(Debug, Clone)]
pub struct JitterConfig {
    /// Target duration of one sample in microseconds. Default: 150.
    pub sample_time_us: u64,
    /// Samples per assessed batch. Default: 200.
    pub noise_length: usize,
    /// Loop length before the first calibration. Default: 50.
    pub initial_rounds: u64,
    /// Samples in the calibration probe. Default: 5.
    pub calibration_samples: usize,
    /// Upper bound on the calibrated loop length. Default: 1 000 000.
    pub max_rounds: u64,
    /// Batches collected before giving up on a request. Default: 4096.
    pub max_batches: usize,
    /// Whether to run health tests on each raw sample. Default: true.
    pub enable_health_tests: bool,
    /// APT window size. Default: 512.
    pub apt_window_size: u32,
    /// Lowest per-sample min-entropy the health-test cutoffs are sized
    /// for, and the value used before the first batch is assessed.
    /// Default: 0.32.
    pub health_min_entropy: f64,
}

impl Default for JitterConfig {
    fn default() -> Self {
        JitterConfig {
            sample_time_us: 150,
            noise_length: 200,
            initial_rounds: 50,
            calibration_samples: 5,
            max_rounds: 1_000_000,
            max_batches: 4096,
            enable_health_tests: true,
            apt_window_size: health::DEFAULT_APT_WINDOW,
            health_min_entropy: health::DEFAULT_MIN_ENTROPY,
        }
    }
}

/// Entropy source harvesting timing jitter of a hashing loop.
pub struct JitterSource {
    config: JitterConfig,
    /// Current loop length (SHA-1 computations per sample).
    rounds: u64,
    health: Option<HealthTest>,
    /// Hash chain carried across samples so the loop cannot be elided.
    chain: [u8; SHA1_OUTPUT_SIZE],
}

impl JitterSource {
    pub fn new(config: JitterConfig) -> Self {
        let health = if config.enable_health_tests {
            Some(HealthTest::for_min_entropy(
                config.health_min_entropy,
                config.apt_window_size,
            ))
        } else {
            None
        };
        let rounds = config.initial_rounds.clamp(1, config.max_rounds.max(1));

        JitterSource {
            config,
            rounds,
            health,
            chain: [0u8; SHA1_OUTPUT_SIZE],
        }
    }

    /// Current loop length.
    pub fn rounds(&self) -> u64 {
        self.rounds
    }

    /// Cutoffs the health tests currently apply, if enabled.
    pub fn health_cutoffs(&self) -> Option<Cutoffs> {
        self.health.as_ref().map(HealthTest::cutoffs)
    }

    /// Time one run of the hashing loop.
    fn sample(&mut self) -> Result<u64, RbgError> {
        let start = Instant::now();
        let mut chain = self.chain;
        for _ in 0..self.rounds {
            chain = Sha1::digest(black_box(&chain))?;
        }
        let elapsed = start.elapsed();
        self.chain = black_box(chain);
        chain.zeroize();
        Ok(u64::try_from(elapsed.as_micros()).unwrap_or(u64::MAX))
    }

    /// Collect `count` raw timing deltas.
    fn noise(&mut self, count: usize) -> Result<Vec<u64>, RbgError> {
        (0..count).map(|_| self.sample()).collect()
    }

    /// Rescale the loop length towards the target sample time using the
    /// most frequent delta of a short probe.
    pub fn calibrate(&mut self) -> Result<(), RbgError> {
        let probe = self.noise(self.config.calibration_samples.max(1))?;
        let mode = most_common(&probe).map_or(1, |(delta, _)| delta.max(1));
        let scaled = self.rounds as f64 * self.config.sample_time_us as f64 / mode as f64 + 1.0;
        let previous = self.rounds;
        self.rounds = (scaled as u64).clamp(1, self.config.max_rounds.max(1));
        log::debug!(
            "jitter: calibrated rounds {} -> {} (mode delta {} us)",
            previous,
            self.rounds,
            mode
        );
        Ok(())
    }

    /// Collect one batch of health-tested samples.
    fn batch(&mut self) -> Result<Vec<u64>, RbgError> {
        let mut samples = self.noise(self.config.noise_length)?;
        if let Some(ref mut ht) = self.health {
            for &sample in &samples {
                if let Err(e) = ht.test_sample(sample) {
                    log::warn!("jitter: health test failed on delta {}: {}", sample, e);
                    ht.reset();
                    samples.zeroize();
                    return Err(e);
                }
            }
        }
        Ok(samples)
    }

    /// Resize the health-test cutoffs for the entropy the last batch showed,
    /// never below the configured floor.
    fn retune_health(&mut self, per_sample: f64) {
        let Some(ht) = self.health.as_mut() else {
            return;
        };
        let h = per_sample.max(self.config.health_min_entropy);
        let cutoffs = Cutoffs::for_min_entropy(h, self.config.apt_window_size);
        if cutoffs != ht.cutoffs() {
            log::trace!(
                "jitter: health cutoffs for H = {:.2}: rct {}, apt {}/{}",
                h,
                cutoffs.rct,
                cutoffs.apt,
                cutoffs.apt_window
            );
            ht.set_cutoffs(cutoffs);
        }
    }
}

impl Drop for JitterSource {
    fn drop(&mut self) {
        self.chain.zeroize();
    }
}

/// Encode samples as little-endian base-128 varints (continuation bit 0x80).
/// A zero sample contributes no bytes.
pub fn encode_samples(samples: &[u64]) -> Vec<u8> {
    let mut out = Vec::with_capacity(samples.len() * 2);
    for &sample in samples {
        let mut x = sample;
        while x != 0 {
            let mut byte = (x & 0x7f) as u8;
            x >>= 7;
            if x != 0 {
                byte |= 0x80;
            }
            out.push(byte);
        }
    }
    out
}

impl EntropySource for JitterSource {
    fn get_entropy_input(&mut self, request: EntropyRequest) -> Result<Vec<u8>, RbgError> {
        let min_len = request.check()?;
        self.calibrate()?;

        let mut collected = Zeroizing::new(Vec::new());
        let mut assessed = 0.0f64;
        let mut batches = 0usize;
        while assessed < request.min_entropy as f64 {
            if batches >= self.config.max_batches {
                log::warn!(
                    "jitter: {:.1} of {} bits after {} batches",
                    assessed,
                    request.min_entropy,
                    batches
                );
                return Err(RbgError::InsufficientEntropy {
                    requested: request.min_entropy,
                    assessed: assessed as usize,
                    batches,
                });
            }
            let mut samples = self.batch()?;
            let per_sample = frequency_test(&samples);
            let entropy = per_sample * samples.len() as f64;
            log::trace!("jitter: batch {} assessed at {:.2} bits", batches, entropy);
            self.retune_health(per_sample);
            collected.extend_from_slice(&encode_samples(&samples));
            samples.zeroize();
            assessed += entropy;
            batches += 1;
        }

        if collected.len() * 8 < min_len {
            collected.resize(min_len.div_ceil(8), 0);
        }
        if collected.len() * 8 > request.max_len {
            return hash_df::derive(&collected, request.max_len);
        }
        Ok(std::mem::take(&mut *collected))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quick_config() -> JitterConfig {
        JitterConfig {
            sample_time_us: 20,
            initial_rounds: 4,
            ..JitterConfig::default()
        }
    }

    #[test]
    fn test_encode_samples() {
        assert_eq!(encode_samples(&[]), Vec::<u8>::new());
        assert_eq!(encode_samples(&[0]), Vec::<u8>::new());
        assert_eq!(encode_samples(&[1]), vec![0x01]);
        assert_eq!(encode_samples(&[127]), vec![0x7f]);
        assert_eq!(encode_samples(&[128]), vec![0x80, 0x01]);
        assert_eq!(encode_samples(&[150]), vec![0x96, 0x01]);
        assert_eq!(encode_samples(&[300, 0, 5]), vec![0xac, 0x02, 0x05]);
    }

    #[test]
    fn test_default_config() {
        let config = JitterConfig::default();
        assert_eq!(config.sample_time_us, 150);
        assert_eq!(config.noise_length, 200);
        assert_eq!(config.initial_rounds, 50);
        assert_eq!(config.calibration_samples, 5);
        assert!(config.enable_health_tests);
        assert_eq!(config.health_min_entropy, health::DEFAULT_MIN_ENTROPY);
        let source = JitterSource::new(config);
        assert_eq!(source.rounds(), 50);
        assert_eq!(
            source.health_cutoffs(),
            Some(Cutoffs::for_min_entropy(health::DEFAULT_MIN_ENTROPY, 512))
        );
        assert_eq!(source.health_cutoffs().map(|c| c.rct), Some(64));
    }

    #[test]
    fn test_health_cutoffs_follow_assessed_entropy() {
        let mut source = JitterSource::new(quick_config());
        source.retune_health(2.0);
        assert_eq!(source.health_cutoffs(), Some(Cutoffs::for_min_entropy(2.0, 512)));
        assert_eq!(source.health_cutoffs().map(|c| c.rct), Some(11));

        // A batch that looks worse than the floor cannot loosen them further
        source.retune_health(0.0);
        assert_eq!(
            source.health_cutoffs(),
            Some(Cutoffs::for_min_entropy(health::DEFAULT_MIN_ENTROPY, 512))
        );
    }

    #[test]
    fn test_health_tests_disabled() {
        let mut source = JitterSource::new(JitterConfig {
            enable_health_tests: false,
            ..quick_config()
        });
        source.retune_health(3.0);
        assert_eq!(source.health_cutoffs(), None);
    }

    #[test]
    fn test_calibration_stays_in_bounds() {
        let mut source = JitterSource::new(JitterConfig {
            max_rounds: 500,
            ..quick_config()
        });
        for _ in 0..3 {
            source.calibrate().unwrap();
            assert!(source.rounds() >= 1 && source.rounds() <= 500);
        }
    }

    #[test]
    fn test_calibration_changes_rounds() {
        // A single round takes far less than a second, so the loop must grow
        let mut source = JitterSource::new(JitterConfig {
            sample_time_us: 1_000_000,
            initial_rounds: 1,
            max_rounds: 10_000,
            ..JitterConfig::default()
        });
        source.calibrate().unwrap();
        assert!(source.rounds() > 1);
    }

    #[test]
    fn test_entropy_input_length_window() {
        let mut source = JitterSource::new(JitterConfig::default());
        let out = source
            .get_entropy_input(EntropyRequest::new(128, 128, 1000, false))
            .unwrap();
        assert!(out.len() >= 16 && out.len() <= 125, "len = {}", out.len());
    }

    #[test]
    fn test_entropy_input_compressed_to_max_len() {
        let mut source = JitterSource::new(quick_config());
        let out = source
            .get_entropy_input(EntropyRequest::new(64, 64, 100, false))
            .unwrap();
        assert!(out.len() >= 8 && out.len() <= 13);
        if out.len() == 13 {
            assert_eq!(out[12] & 0x0f, 0);
        }
    }

    #[test]
    fn test_zero_entropy_request_is_padded() {
        let mut source = JitterSource::new(quick_config());
        let out = source
            .get_entropy_input(EntropyRequest::new(0, 128, 1000, false))
            .unwrap();
        assert_eq!(out, vec![0u8; 16]);
    }

    #[test]
    fn test_impossible_length() {
        let mut source = JitterSource::new(quick_config());
        let result = source.get_entropy_input(EntropyRequest::new(0, 2000, 1000, false));
        assert!(matches!(
            result,
            Err(RbgError::ImpossibleLengthRequested {
                min_len: 2000,
                max_len: 1000
            })
        ));
    }

    #[test]
    fn test_gives_up_after_max_batches() {
        let mut source = JitterSource::new(JitterConfig {
            noise_length: 1,
            max_batches: 3,
            ..quick_config()
        });
        // A single-sample batch never assesses above zero
        let result = source.get_entropy_input(EntropyRequest::new(8, 8, 1000, false));
        assert_eq!(
            result,
            Err(RbgError::InsufficientEntropy {
                requested: 8,
                assessed: 0,
                batches: 3
            })
        );
    }
}
