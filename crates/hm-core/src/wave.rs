//! Embedding → wave signature.
//!
//! Every embedding dimension becomes one partial: its index picks a fixed
//! frequency in the audible band, its magnitude becomes the amplitude and its
//! sign becomes a phase of 0 or π.

use blake3::Hasher;
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_STEP, F_MAX, F_MIN};
use crate::error::{Result, WaveError};

/// Phase of one partial. Only two values exist: the embedding sign is the
/// whole phase information.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Zero,
    Pi,
}

impl Phase {
    pub fn from_sign(value: f32) -> Self {
        if value >= 0.0 { Phase::Zero } else { Phase::Pi }
    }

    pub fn radians(self) -> f32 {
        match self {
            Phase::Zero => 0.0,
            Phase::Pi => std::f32::consts::PI,
        }
    }
}

/// Frequency/amplitude/phase triple derived from one embedding.
///
/// Immutable: the fields are private and every construction path, including
/// deserialization, goes through [`WavePattern::new`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "WavePatternParts")]
pub struct WavePattern {
    frequencies: Vec<f32>,
    amplitudes: Vec<f32>,
    phases: Vec<Phase>,
}

#[derive(Deserialize)]
struct WavePatternParts {
    frequencies: Vec<f32>,
    amplitudes: Vec<f32>,
    phases: Vec<Phase>,
}

impl TryFrom<WavePatternParts> for WavePattern {
    type Error = WaveError;

    fn try_from(parts: WavePatternParts) -> Result<Self> {
        WavePattern::new(parts.frequencies, parts.amplitudes, parts.phases)
    }
}

impl WavePattern {
    /// Build a pattern from its parts. All three sequences must be non-empty
    /// and of equal length, frequencies inside the `[F_MIN, F_MAX]` band,
    /// amplitudes finite and non-negative.
    pub fn new(frequencies: Vec<f32>, amplitudes: Vec<f32>, phases: Vec<Phase>) -> Result<Self> {
        let n = frequencies.len();
        if n == 0 {
            return Err(WaveError::InvalidInput("pattern has no components".into()));
        }
        if amplitudes.len() != n {
            return Err(WaveError::DimensionMismatch {
                expected: n,
                actual: amplitudes.len(),
            });
        }
        if phases.len() != n {
            return Err(WaveError::DimensionMismatch {
                expected: n,
                actual: phases.len(),
            });
        }
        if let Some(i) = frequencies.iter().position(|f| !(F_MIN..=F_MAX).contains(f)) {
            return Err(WaveError::InvalidInput(format!(
                "frequency {i} is outside [{F_MIN}, {F_MAX}]: {}",
                frequencies[i]
            )));
        }
        if let Some(i) = amplitudes.iter().position(|a| !a.is_finite() || *a < 0.0) {
            return Err(WaveError::InvalidInput(format!(
                "amplitude {i} is not a non-negative finite value: {}",
                amplitudes[i]
            )));
        }
        Ok(Self {
            frequencies,
            amplitudes,
            phases,
        })
    }

    pub fn dimension(&self) -> usize {
        self.frequencies.len()
    }

    pub fn frequencies(&self) -> &[f32] {
        &self.frequencies
    }

    pub fn amplitudes(&self) -> &[f32] {
        &self.amplitudes
    }

    pub fn phases(&self) -> &[Phase] {
        &self.phases
    }

    /// Frequency of the strongest partial (first one on ties).
    pub fn dominant_frequency(&self) -> f32 {
        let mut best = 0;
        for (i, a) in self.amplitudes.iter().enumerate() {
            if *a > self.amplitudes[best] {
                best = i;
            }
        }
        self.frequencies[best]
    }

    /// BLAKE3 digest of every partial, in order. Equal patterns share a
    /// fingerprint; any change to a frequency, amplitude or phase bit
    /// changes it.
    pub fn fingerprint(&self) -> [u8; 32] {
        let mut hasher = Hasher::new();
        for ((f, a), p) in self
            .frequencies
            .iter()
            .zip(&self.amplitudes)
            .zip(&self.phases)
        {
            hasher.update(&f.to_le_bytes());
            hasher.update(&a.to_le_bytes());
            hasher.update(&p.radians().to_le_bytes());
        }
        *hasher.finalize().as_bytes()
    }
}

/// A pattern together with the embedding it came from, when that embedding
/// is still known.
#[derive(Clone, Debug, PartialEq)]
pub struct WaveVector {
    pattern: WavePattern,
    embedding: Option<Vec<f32>>,
}

impl WaveVector {
    /// Pair a pattern with its source embedding. Lengths must agree.
    pub fn new(pattern: WavePattern, embedding: Vec<f32>) -> Result<Self> {
        if embedding.len() != pattern.dimension() {
            return Err(WaveError::DimensionMismatch {
                expected: pattern.dimension(),
                actual: embedding.len(),
            });
        }
        Ok(Self {
            pattern,
            embedding: Some(embedding),
        })
    }

    pub fn from_pattern(pattern: WavePattern) -> Self {
        Self {
            pattern,
            embedding: None,
        }
    }

    pub fn pattern(&self) -> &WavePattern {
        &self.pattern
    }

    /// The source embedding, for hosts that still need plain vectors.
    pub fn as_vector(&self) -> Option<&[f32]> {
        self.embedding.as_deref()
    }

    pub fn into_parts(self) -> (WavePattern, Option<Vec<f32>>) {
        (self.pattern, self.embedding)
    }
}

impl From<WavePattern> for WaveVector {
    fn from(pattern: WavePattern) -> Self {
        Self::from_pattern(pattern)
    }
}

/// Band and spacing of the index → frequency mapping.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransformConfig {
    pub f_min: f32,
    pub f_max: f32,
    pub step: f32,
}

impl Default for TransformConfig {
    fn default() -> Self {
        Self {
            f_min: F_MIN,
            f_max: F_MAX,
            step: DEFAULT_STEP,
        }
    }
}

/// Deterministic embedding → [`WavePattern`] mapping.
#[derive(Clone, Debug, Default)]
pub struct WaveTransform {
    config: TransformConfig,
}

impl WaveTransform {
    pub fn new(config: TransformConfig) -> Self {
        Self { config }
    }

    /// Spacing that spreads `dimension` partials over the whole band.
    pub fn spread(dimension: usize) -> Self {
        let base = TransformConfig::default();
        let step = if dimension > 1 {
            (base.f_max - base.f_min) / (dimension - 1) as f32
        } else {
            base.step
        };
        Self::new(TransformConfig { step, ..base })
    }

    pub fn config(&self) -> &TransformConfig {
        &self.config
    }

    /// Frequency assigned to dimension `i`. Depends on `i` only.
    pub fn frequency(&self, i: usize) -> f32 {
        let TransformConfig { f_min, f_max, step } = self.config;
        (f_min + i as f32 * step).clamp(f_min, f_max)
    }

    pub fn transform(&self, embedding: &[f32]) -> Result<WavePattern> {
        if embedding.is_empty() {
            return Err(WaveError::InvalidInput("embedding is empty".into()));
        }
        if let Some(i) = embedding.iter().position(|v| !v.is_finite()) {
            return Err(WaveError::InvalidInput(format!(
                "embedding component {i} is not finite: {}",
                embedding[i]
            )));
        }

        let frequencies = (0..embedding.len()).map(|i| self.frequency(i)).collect();
        let amplitudes = embedding.iter().map(|v| v.abs()).collect();
        let phases = embedding.iter().map(|v| Phase::from_sign(*v)).collect();

        WavePattern::new(frequencies, amplitudes, phases)
    }

    /// Transform and keep the embedding alongside the pattern.
    pub fn encode(&self, embedding: &[f32]) -> Result<WaveVector> {
        let pattern = self.transform(embedding)?;
        WaveVector::new(pattern, embedding.to_vec())
    }
}
