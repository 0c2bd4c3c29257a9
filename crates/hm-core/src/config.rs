use serde::{Deserialize, Serialize};

use crate::constants::{F_MAX, F_MIN};
use crate::error::{Result, WaveError};
use crate::index::IndexConfig;
use crate::plasticity::PlasticityConfig;
use crate::resonance::ScoringConfig;
use crate::wave::TransformConfig;

/// Every tunable of the engine. Missing sections and fields take their
/// defaults, so an empty document is a valid config.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub transform: TransformConfig,
    pub scoring: ScoringConfig,
    pub index: IndexConfig,
    pub plasticity: PlasticityConfig,
}

fn invalid(msg: String) -> WaveError {
    WaveError::InvalidInput(msg)
}

impl EngineConfig {
    pub fn validate(&self) -> Result<()> {
        let t = &self.transform;
        if !(F_MIN..=F_MAX).contains(&t.f_min) {
            return Err(invalid(format!(
                "transform.f_min must be in [{F_MIN}, {F_MAX}], got {}",
                t.f_min
            )));
        }
        if !(t.f_min..=F_MAX).contains(&t.f_max) {
            return Err(invalid(format!(
                "transform.f_max must be in [f_min, {F_MAX}], got {}",
                t.f_max
            )));
        }
        if !(t.step.is_finite() && t.step >= 0.0) {
            return Err(invalid(format!("transform.step must be non-negative, got {}", t.step)));
        }

        let s = &self.scoring;
        if !(0.0..=1.0).contains(&s.phase_mismatch) {
            return Err(invalid(format!(
                "scoring.phase_mismatch must be in [0, 1], got {}",
                s.phase_mismatch
            )));
        }
        if !(0.0..0.1).contains(&s.tolerance) {
            return Err(invalid(format!(
                "scoring.tolerance must be in [0, 0.1), got {}",
                s.tolerance
            )));
        }
        let bonuses = [
            ("octave_bonus", s.octave_bonus),
            ("fifth_bonus", s.fifth_bonus),
            ("fourth_bonus", s.fourth_bonus),
            ("third_bonus", s.third_bonus),
            ("preference_boost", s.preference_boost),
            ("dissonant_bonus", s.dissonant_bonus),
        ];
        for (name, value) in bonuses {
            if !(value.is_finite() && value > 0.0) {
                return Err(invalid(format!("scoring.{name} must be positive, got {value}")));
            }
        }

        let i = &self.index;
        if i.m < 2 {
            return Err(invalid(format!("index.m must be at least 2, got {}", i.m)));
        }
        if i.m0 < i.m {
            return Err(invalid(format!("index.m0 ({}) must be at least m ({})", i.m0, i.m)));
        }
        if i.ef_construction == 0 || i.ef_search == 0 {
            return Err(invalid("index.ef_construction and ef_search must be positive".into()));
        }
        if !(i.compaction_ratio > 0.0 && i.compaction_ratio <= 1.0) {
            return Err(invalid(format!(
                "index.compaction_ratio must be in (0, 1], got {}",
                i.compaction_ratio
            )));
        }
        if i.dimension == Some(0) {
            return Err(invalid("index.dimension must be positive".into()));
        }

        let p = &self.plasticity;
        if !(p.initial_strength.is_finite() && p.access_weight.is_finite() && p.bias_weight >= 0.0)
        {
            return Err(invalid("plasticity weights must be finite, bias_weight non-negative".into()));
        }
        Ok(())
    }
}
