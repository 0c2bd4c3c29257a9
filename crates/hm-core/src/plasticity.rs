//! Plasticity: retrieval strengthens what was retrieved.
//!
//! Every hit returned by a search adds `resonance × access_weight` to the
//! entry's strength. Strength feeds back into ranking through a bounded bias:
//!
//! ```text
//! gain = max(strength - initial_strength, 0)
//! bias = 1 + bias_weight · (1 - 1 / (1 + ln(1 + gain)))
//! ```
//!
//! Fresh entries get a bias of exactly 1, each further retrieval adds less
//! than the last, and the bias never reaches `1 + bias_weight`, so a heavily
//! used entry cannot drown out a better match.
//!
//! Strength never decays. Forgetting is left open.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

use crate::constants::{ACCESS_WEIGHT, INITIAL_STRENGTH, STRENGTH_BIAS_WEIGHT};
use crate::error::{Result, WaveError};
use crate::index::HarmonicIndex;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlasticityConfig {
    pub initial_strength: f64,
    pub access_weight: f64,
    pub bias_weight: f64,
}

impl Default for PlasticityConfig {
    fn default() -> Self {
        Self {
            initial_strength: INITIAL_STRENGTH,
            access_weight: ACCESS_WEIGHT,
            bias_weight: STRENGTH_BIAS_WEIGHT,
        }
    }
}

/// Lock-free f64 cell holding one entry's strength.
#[derive(Debug)]
pub struct Strength(AtomicU64);

impl Strength {
    pub fn new(value: f64) -> Self {
        Self(AtomicU64::new(value.to_bits()))
    }

    pub fn get(&self) -> f64 {
        f64::from_bits(self.0.load(Ordering::Acquire))
    }

    /// Atomically add `delta`, returning the new value.
    pub fn add(&self, delta: f64) -> f64 {
        let mut current = self.0.load(Ordering::Acquire);
        loop {
            let next = f64::from_bits(current) + delta;
            match self.0.compare_exchange_weak(
                current,
                next.to_bits(),
                Ordering::AcqRel,
                Ordering::Acquire,
            ) {
                Ok(_) => return next,
                Err(actual) => current = actual,
            }
        }
    }
}

/// Sole writer of entry strength. Holds no strength of its own.
#[derive(Clone, Debug, Default)]
pub struct PlasticityStore {
    config: PlasticityConfig,
}

impl PlasticityStore {
    pub fn new(config: PlasticityConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PlasticityConfig {
        &self.config
    }

    pub fn initial_strength(&self) -> f64 {
        self.config.initial_strength
    }

    /// `strength[id] += resonance × access_weight`. Returns the new strength.
    pub fn reinforce(&self, index: &HarmonicIndex, id: &str, resonance: f32) -> Result<f64> {
        if !resonance.is_finite() {
            return Err(WaveError::InvalidInput(format!(
                "resonance must be finite, got {resonance}"
            )));
        }
        index.add_strength(id, resonance as f64 * self.config.access_weight)
    }

    /// Multiplicative ranking bias for an entry of the given strength.
    pub fn bias(&self, strength: f64) -> f32 {
        let gain = (strength - self.config.initial_strength).max(0.0);
        let damped = 1.0 - 1.0 / (1.0 + gain.ln_1p());
        (1.0 + self.config.bias_weight * damped) as f32
    }
}
