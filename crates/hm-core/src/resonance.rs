//! Resonance: interference-style similarity between two wave patterns.
//!
//! Each dimension contributes `R · A · P · H`:
//!
//! - `R` frequency resonance, `min(fa, fb) / max(fa, fb)`
//! - `A` amplitude correlation, `1 - |a - b| / max(a, b, ε)`
//! - `P` phase coherence, 1 in phase, `phase_mismatch` out of phase
//! - `H` harmonic bonus when the frequency ratio sits on 2:1, 3:2, 4:3 or 5:4
//!
//! and the score is the mean over dimensions. Any single factor near zero
//! vetoes the dimension, so a match needs every factor to agree.
//!
//! `R · H` is capped at 1, so a bonus can lift a related pair up to but
//! never past an exact frequency match. The unmodulated score therefore lies
//! in [0, 1] under every preference and every bonus setting, and identical
//! patterns reach the maximum of exactly 1. Emotional modulation is applied
//! on top (raw and graceland double the score).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::{
    DISSONANT_BONUS, EPSILON, FIFTH_BONUS, FOURTH_BONUS, HARMONIC_TOLERANCE, OCTAVE_BONUS,
    PHASE_MISMATCH, PREFERENCE_BOOST, THIRD_BONUS, VIBE_BASE,
};
use crate::error::{Result, WaveError};
use crate::metadata::CategoryFilter;
use crate::wave::WavePattern;

/// Consonant frequency ratios that earn a harmonic bonus.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Interval {
    Octave,
    Fifth,
    Fourth,
    Third,
}

impl Interval {
    pub const ALL: [Interval; 4] = [
        Interval::Octave,
        Interval::Fifth,
        Interval::Fourth,
        Interval::Third,
    ];

    pub fn ratio(self) -> f32 {
        match self {
            Interval::Octave => 2.0,
            Interval::Fifth => 1.5,
            Interval::Fourth => 4.0 / 3.0,
            Interval::Third => 1.25,
        }
    }
}

/// Which harmonic relationships a query favors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HarmonicPreference {
    Octave,
    Fifth,
    Fourth,
    Third,
    Dissonant,
    Any,
}

impl HarmonicPreference {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Octave => "octave",
            Self::Fifth => "fifth",
            Self::Fourth => "fourth",
            Self::Third => "third",
            Self::Dissonant => "dissonant",
            Self::Any => "any",
        }
    }

    fn interval(self) -> Option<Interval> {
        match self {
            Self::Octave => Some(Interval::Octave),
            Self::Fifth => Some(Interval::Fifth),
            Self::Fourth => Some(Interval::Fourth),
            Self::Third => Some(Interval::Third),
            Self::Dissonant | Self::Any => None,
        }
    }
}

impl FromStr for HarmonicPreference {
    type Err = WaveError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "octave" => Ok(Self::Octave),
            "fifth" => Ok(Self::Fifth),
            "fourth" => Ok(Self::Fourth),
            "third" => Ok(Self::Third),
            "dissonant" => Ok(Self::Dissonant),
            "any" => Ok(Self::Any),
            other => Err(WaveError::InvalidInput(format!(
                "unknown harmonic preference '{other}'"
            ))),
        }
    }
}

impl fmt::Display for HarmonicPreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Emotional preset used to modulate a final score.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmotionalState {
    #[default]
    Neutral,
    Happy,
    Raw,
    Graceland,
    Focused,
}

impl EmotionalState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Neutral => "neutral",
            Self::Happy => "happy",
            Self::Raw => "raw",
            Self::Graceland => "graceland",
            Self::Focused => "focused",
        }
    }
}

impl FromStr for EmotionalState {
    type Err = WaveError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "neutral" => Ok(Self::Neutral),
            "happy" => Ok(Self::Happy),
            "raw" => Ok(Self::Raw),
            "graceland" => Ok(Self::Graceland),
            "focused" => Ok(Self::Focused),
            other => Err(WaveError::InvalidInput(format!(
                "unknown emotional state '{other}'"
            ))),
        }
    }
}

impl fmt::Display for EmotionalState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How one emotional state reshapes a score.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmotionProfile {
    /// Relative boost per unit of positive item valence.
    pub valence_weight: f32,
    /// Final multiplier.
    pub amplification: f32,
    /// When positive, `s -> v·s + (1 - v)` before amplification.
    pub vulnerability: f32,
}

impl Default for EmotionProfile {
    fn default() -> Self {
        Self {
            valence_weight: 0.0,
            amplification: 1.0,
            vulnerability: 0.0,
        }
    }
}

/// One profile per [`EmotionalState`].
///
/// Valence weights by default: neutral and the amplifying states ignore
/// valence, happy weighs it at 0.3, focused keeps a reduced 0.1 so positive
/// items still edge ahead without dominating the ranking.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmotionTable {
    pub neutral: EmotionProfile,
    pub happy: EmotionProfile,
    pub raw: EmotionProfile,
    pub graceland: EmotionProfile,
    pub focused: EmotionProfile,
}

impl Default for EmotionTable {
    fn default() -> Self {
        Self {
            neutral: EmotionProfile::default(),
            happy: EmotionProfile {
                valence_weight: 0.3,
                ..EmotionProfile::default()
            },
            raw: EmotionProfile {
                amplification: 2.0,
                ..EmotionProfile::default()
            },
            graceland: EmotionProfile {
                amplification: 2.0,
                vulnerability: 0.9,
                ..EmotionProfile::default()
            },
            focused: EmotionProfile {
                valence_weight: 0.1,
                ..EmotionProfile::default()
            },
        }
    }
}

impl EmotionTable {
    pub fn profile(&self, state: EmotionalState) -> &EmotionProfile {
        match state {
            EmotionalState::Neutral => &self.neutral,
            EmotionalState::Happy => &self.happy,
            EmotionalState::Raw => &self.raw,
            EmotionalState::Graceland => &self.graceland,
            EmotionalState::Focused => &self.focused,
        }
    }
}

/// Every tunable constant of the scorer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub phase_mismatch: f32,
    /// Relative tolerance when matching a ratio to an interval.
    pub tolerance: f32,
    pub octave_bonus: f32,
    pub fifth_bonus: f32,
    pub fourth_bonus: f32,
    pub third_bonus: f32,
    pub preference_boost: f32,
    pub dissonant_bonus: f32,
    pub emotions: EmotionTable,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            phase_mismatch: PHASE_MISMATCH,
            tolerance: HARMONIC_TOLERANCE,
            octave_bonus: OCTAVE_BONUS,
            fifth_bonus: FIFTH_BONUS,
            fourth_bonus: FOURTH_BONUS,
            third_bonus: THIRD_BONUS,
            preference_boost: PREFERENCE_BOOST,
            dissonant_bonus: DISSONANT_BONUS,
            emotions: EmotionTable::default(),
        }
    }
}

impl ScoringConfig {
    pub fn bonus(&self, interval: Interval) -> f32 {
        match interval {
            Interval::Octave => self.octave_bonus,
            Interval::Fifth => self.fifth_bonus,
            Interval::Fourth => self.fourth_bonus,
            Interval::Third => self.third_bonus,
        }
    }
}

/// Per-query modulation context.
#[derive(Clone, Debug, Default)]
pub struct SearchContext {
    pub emotional_state: EmotionalState,
    pub harmonic_preference: Option<HarmonicPreference>,
    pub category_filter: Option<CategoryFilter>,
    /// Query valence in [-1, 1]. When set, items with a recorded valence are
    /// re-weighted by [`vibe_check`].
    pub vibe: Option<f32>,
}

impl SearchContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn emotion(mut self, state: EmotionalState) -> Self {
        self.emotional_state = state;
        self
    }

    pub fn harmonic(mut self, preference: HarmonicPreference) -> Self {
        self.harmonic_preference = Some(preference);
        self
    }

    pub fn categories(mut self, filter: CategoryFilter) -> Self {
        self.category_filter = Some(filter);
        self
    }

    pub fn vibe(mut self, valence: f32) -> Self {
        self.vibe = Some(valence);
        self
    }
}

/// Blend a score with how closely two valences agree: 70 % of the score is
/// kept unconditionally, the other 30 % scales with the match.
///
/// Valences are clamped to [-1, 1]; the match is `1 - |q - t| / 2`, so equal
/// valences keep the full score and opposite extremes keep 70 %.
pub fn vibe_check(score: f32, query_vibe: f32, target_vibe: f32) -> f32 {
    let q = query_vibe.clamp(-1.0, 1.0);
    let t = target_vibe.clamp(-1.0, 1.0);
    let matched = 1.0 - (q - t).abs() / 2.0;
    score * (VIBE_BASE + (1.0 - VIBE_BASE) * matched)
}

/// Computes resonance between patterns and modulates it.
#[derive(Clone, Debug, Default)]
pub struct ResonanceScorer {
    config: ScoringConfig,
}

impl ResonanceScorer {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Full score: resonance under the context's harmonic preference, then
    /// emotional modulation without item valence.
    pub fn score(&self, a: &WavePattern, b: &WavePattern, ctx: &SearchContext) -> Result<f32> {
        self.score_with_valence(a, b, ctx, None)
    }

    pub fn score_with_valence(
        &self,
        a: &WavePattern,
        b: &WavePattern,
        ctx: &SearchContext,
        valence: Option<f32>,
    ) -> Result<f32> {
        let r = self.resonance(a, b, ctx.harmonic_preference)?;
        Ok(self.apply_context(r, ctx, valence))
    }

    /// Score one query against many candidates, in candidate order.
    pub fn score_batch(
        &self,
        query: &WavePattern,
        candidates: &[WavePattern],
        ctx: &SearchContext,
    ) -> Result<Vec<f32>> {
        candidates
            .iter()
            .map(|c| self.score(query, c, ctx))
            .collect()
    }

    /// `1 - resonance`, in [0, 1]; 0 for identical patterns. For hosts that
    /// expect a distance rather than a similarity.
    pub fn distance(
        &self,
        a: &WavePattern,
        b: &WavePattern,
        preference: Option<HarmonicPreference>,
    ) -> Result<f32> {
        Ok(1.0 - self.resonance(a, b, preference)?)
    }

    /// Unmodulated resonance.
    pub fn resonance(
        &self,
        a: &WavePattern,
        b: &WavePattern,
        preference: Option<HarmonicPreference>,
    ) -> Result<f32> {
        if a.dimension() != b.dimension() {
            return Err(WaveError::DimensionMismatch {
                expected: a.dimension(),
                actual: b.dimension(),
            });
        }
        Ok(self.resonance_unchecked(a, b, preference))
    }

    /// Resonance for patterns already known to share a dimension.
    pub(crate) fn resonance_unchecked(
        &self,
        a: &WavePattern,
        b: &WavePattern,
        preference: Option<HarmonicPreference>,
    ) -> f32 {
        let (fa, fb) = (a.frequencies(), b.frequencies());
        let (aa, ab) = (a.amplitudes(), b.amplitudes());
        let (pa, pb) = (a.phases(), b.phases());

        let mut total = 0.0f64;
        for i in 0..fa.len() {
            let (r, h) = if fa[i] == fb[i] {
                (1.0, 1.0)
            } else {
                let (lo, hi) = if fa[i] < fb[i] { (fa[i], fb[i]) } else { (fb[i], fa[i]) };
                (lo / hi, self.harmonic_factor(hi / lo, preference))
            };
            let amp = 1.0 - (aa[i] - ab[i]).abs() / aa[i].max(ab[i]).max(EPSILON);
            let phase = if pa[i] == pb[i] {
                1.0
            } else {
                self.config.phase_mismatch
            };
            total += ((r * h).min(1.0) * amp * phase) as f64;
        }
        (total / fa.len() as f64) as f32
    }

    /// Bonus for a frequency ratio `>= 1`.
    fn harmonic_factor(&self, ratio: f32, preference: Option<HarmonicPreference>) -> f32 {
        let tol = self.config.tolerance;
        let interval = Interval::ALL
            .into_iter()
            .find(|iv| (ratio / iv.ratio() - 1.0).abs() <= tol);

        match preference {
            Some(HarmonicPreference::Dissonant) => {
                if interval.is_none() && ratio - 1.0 > tol {
                    self.config.dissonant_bonus
                } else {
                    1.0
                }
            }
            _ => match interval {
                None => 1.0,
                Some(iv) => {
                    let bonus = self.config.bonus(iv);
                    if preference.and_then(HarmonicPreference::interval) == Some(iv) {
                        bonus * self.config.preference_boost
                    } else {
                        bonus
                    }
                }
            },
        }
    }

    /// Emotional modulation followed by the vibe blend, when the context
    /// carries a query valence and the item has one.
    pub fn apply_context(&self, score: f32, ctx: &SearchContext, valence: Option<f32>) -> f32 {
        let s = self.modulate(score, ctx.emotional_state, valence);
        match (ctx.vibe, valence) {
            (Some(q), Some(t)) => vibe_check(s, q, t),
            _ => s,
        }
    }

    /// Apply an emotional profile to a score. `valence` is the item's
    /// recorded valence; only its positive part boosts.
    pub fn modulate(&self, score: f32, state: EmotionalState, valence: Option<f32>) -> f32 {
        let profile = self.config.emotions.profile(state);
        let v = valence.unwrap_or(0.0).clamp(0.0, 1.0);
        let mut s = score * (1.0 + profile.valence_weight * v);
        if profile.vulnerability > 0.0 {
            s = profile.vulnerability * s + (1.0 - profile.vulnerability);
        }
        profile.amplification * s
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wave::{Phase, WaveTransform};
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    fn single(freq: f32, amp: f32, phase: Phase) -> WavePattern {
        WavePattern::new(vec![freq], vec![amp], vec![phase]).unwrap()
    }

    fn scorer() -> ResonanceScorer {
        ResonanceScorer::default()
    }

    #[test]
    fn test_identical_patterns_score_one() {
        let wave = WavePattern::new(
            vec![440.0, 880.0, 1320.0],
            vec![1.0, 0.5, 0.25],
            vec![Phase::Zero, Phase::Pi, Phase::Zero],
        )
        .unwrap();
        let s = scorer().score(&wave, &wave, &SearchContext::new()).unwrap();
        assert_relative_eq!(s, 1.0);
    }

    #[test]
    fn test_zero_amplitudes_correlate_fully() {
        let a = single(440.0, 0.0, Phase::Zero);
        let s = scorer().resonance(&a, &a, None).unwrap();
        assert_relative_eq!(s, 1.0);
    }

    #[test]
    fn test_opposite_phase_halves() {
        let a = single(440.0, 1.0, Phase::Zero);
        let b = single(440.0, 1.0, Phase::Pi);
        let s = scorer().resonance(&a, &b, None).unwrap();
        assert_relative_eq!(s, PHASE_MISMATCH);
    }

    #[test]
    fn test_amplitude_veto() {
        let a = single(440.0, 1.0, Phase::Zero);
        let b = single(440.0, 0.0, Phase::Zero);
        let s = scorer().resonance(&a, &b, None).unwrap();
        assert!(s.abs() < 1e-6, "anti-correlated amplitude should kill resonance: {s}");
    }

    #[test]
    fn test_octave_beats_unrelated_ratio() {
        let base = single(440.0, 1.0, Phase::Zero);
        let octave = single(880.0, 1.0, Phase::Zero);
        let off = single(440.0 * 2.37, 1.0, Phase::Zero);

        let s_oct = scorer().resonance(&base, &octave, None).unwrap();
        let s_off = scorer().resonance(&base, &off, None).unwrap();
        assert_relative_eq!(s_oct, 0.5 * OCTAVE_BONUS);
        assert!(s_oct > s_off, "octave {s_oct} should beat 2.37:1 {s_off}");
    }

    #[test]
    fn test_single_differing_pair_octave_vs_off_ratio() {
        let make = |last: f32| {
            WavePattern::new(
                vec![100.0, 200.0, last],
                vec![0.4, 0.6, 0.8],
                vec![Phase::Zero, Phase::Pi, Phase::Zero],
            )
            .unwrap()
        };
        let a = make(300.0);
        let octave = make(600.0);
        let off = make(300.0 * 2.37);
        let ctx = SearchContext::new();
        let s_oct = scorer().score(&a, &octave, &ctx).unwrap();
        let s_off = scorer().score(&a, &off, &ctx).unwrap();
        assert!(s_oct > s_off);
    }

    #[test]
    fn test_ratios_tested_both_ways() {
        let low = single(300.0, 1.0, Phase::Zero);
        let high = single(450.0, 1.0, Phase::Zero);
        let s = scorer();
        assert_eq!(
            s.resonance(&low, &high, None).unwrap(),
            s.resonance(&high, &low, None).unwrap()
        );
        assert_relative_eq!(s.resonance(&low, &high, None).unwrap(), (2.0 / 3.0) * FIFTH_BONUS);
    }

    #[test]
    fn test_tolerance_edges() {
        let s = scorer();
        assert_relative_eq!(s.harmonic_factor(2.0 * 1.019, None), OCTAVE_BONUS);
        assert_relative_eq!(s.harmonic_factor(2.0 * 1.03, None), 1.0);
        assert_relative_eq!(s.harmonic_factor(1.25, None), THIRD_BONUS);
        assert_relative_eq!(s.harmonic_factor(4.0 / 3.0, None), FOURTH_BONUS);
    }

    #[test]
    fn test_preference_boosts_named_interval_only() {
        let s = scorer();
        assert_relative_eq!(
            s.harmonic_factor(2.0, Some(HarmonicPreference::Octave)),
            OCTAVE_BONUS * PREFERENCE_BOOST
        );
        assert_relative_eq!(
            s.harmonic_factor(1.5, Some(HarmonicPreference::Octave)),
            FIFTH_BONUS
        );
        assert_relative_eq!(s.harmonic_factor(2.0, Some(HarmonicPreference::Any)), OCTAVE_BONUS);
    }

    #[test]
    fn test_preferred_interval_never_beats_exact_match() {
        let s = scorer();
        let base = single(300.0, 1.0, Phase::Zero);
        for (pref, freq) in [
            (HarmonicPreference::Octave, 600.0),
            (HarmonicPreference::Fifth, 450.0),
            (HarmonicPreference::Fourth, 400.0),
            (HarmonicPreference::Third, 375.0),
        ] {
            let related = single(freq, 1.0, Phase::Zero);
            let own = s.resonance(&base, &base, Some(pref)).unwrap();
            let other = s.resonance(&base, &related, Some(pref)).unwrap();
            assert_relative_eq!(own, 1.0);
            assert!(other <= own, "{pref}: related {other} above exact {own}");
        }
        // 4:3 under the fourth preference: 0.75 * 1.2 * 1.2 caps at 1
        let fourth = single(400.0, 1.0, Phase::Zero);
        assert_relative_eq!(
            s.resonance(&base, &fourth, Some(HarmonicPreference::Fourth)).unwrap(),
            1.0
        );
    }

    #[test]
    fn test_dissonant_pair_capped() {
        let s = scorer();
        let a = single(300.0, 1.0, Phase::Zero);
        let b = single(309.0, 1.0, Phase::Zero);
        let r = s.resonance(&a, &b, Some(HarmonicPreference::Dissonant)).unwrap();
        assert_relative_eq!(r, 1.0);
    }

    #[test]
    fn test_score_batch_and_distance() {
        let s = scorer();
        let q = single(440.0, 1.0, Phase::Zero);
        let candidates = vec![
            single(440.0, 1.0, Phase::Zero),
            single(880.0, 1.0, Phase::Zero),
            single(440.0, 1.0, Phase::Pi),
        ];
        let ctx = SearchContext::new();
        let scores = s.score_batch(&q, &candidates, &ctx).unwrap();
        assert_eq!(scores.len(), 3);
        for (score, c) in scores.iter().zip(&candidates) {
            assert_eq!(*score, s.score(&q, c, &ctx).unwrap());
        }
        assert_relative_eq!(s.distance(&q, &candidates[0], None).unwrap(), 0.0);
        assert_relative_eq!(s.distance(&q, &candidates[2], None).unwrap(), 1.0 - PHASE_MISMATCH);

        let wrong = WaveTransform::default().transform(&[0.1, 0.2]).unwrap();
        assert!(s.score_batch(&q, &[wrong], &ctx).is_err());
        assert!(s.score_batch(&q, &[], &ctx).unwrap().is_empty());
    }

    #[test]
    fn test_vibe_check() {
        assert_relative_eq!(vibe_check(0.8, 0.5, 0.5), 0.8);
        assert_relative_eq!(vibe_check(0.8, 1.0, -1.0), 0.8 * 0.7);
        assert_relative_eq!(vibe_check(1.0, 0.6, 0.0), 0.7 + 0.3 * 0.7);
        // out-of-range valences are clamped
        assert_relative_eq!(vibe_check(1.0, 5.0, -5.0), 0.7);
    }

    #[test]
    fn test_apply_context_uses_vibe_only_with_item_valence() {
        let s = scorer();
        let ctx = SearchContext::new().vibe(1.0);
        assert_relative_eq!(s.apply_context(0.6, &ctx, None), 0.6);
        assert_relative_eq!(s.apply_context(0.6, &ctx, Some(1.0)), 0.6);
        assert_relative_eq!(s.apply_context(0.6, &ctx, Some(-1.0)), 0.6 * 0.7);
        let happy = SearchContext::new().emotion(EmotionalState::Happy).vibe(1.0);
        assert_relative_eq!(s.apply_context(0.5, &happy, Some(1.0)), 0.65);
    }

    #[test]
    fn test_dissonant_preference() {
        let s = scorer();
        let dis = Some(HarmonicPreference::Dissonant);
        assert_relative_eq!(s.harmonic_factor(2.0, dis), 1.0);
        assert_relative_eq!(s.harmonic_factor(2.37, dis), DISSONANT_BONUS);
        assert_relative_eq!(s.harmonic_factor(1.01, dis), 1.0);
    }

    #[test]
    fn test_dimension_mismatch() {
        let a = single(440.0, 1.0, Phase::Zero);
        let b = WaveTransform::default().transform(&[0.1, 0.2]).unwrap();
        assert_eq!(
            scorer().score(&a, &b, &SearchContext::new()).unwrap_err(),
            WaveError::DimensionMismatch {
                expected: 1,
                actual: 2
            }
        );
    }

    #[test]
    fn test_emotion_table() {
        let s = scorer();
        assert_relative_eq!(s.modulate(0.5, EmotionalState::Neutral, Some(1.0)), 0.5);
        assert_relative_eq!(s.modulate(0.5, EmotionalState::Happy, Some(1.0)), 0.65);
        assert_relative_eq!(s.modulate(0.5, EmotionalState::Happy, Some(-0.8)), 0.5);
        assert_relative_eq!(s.modulate(0.5, EmotionalState::Happy, None), 0.5);
        assert_relative_eq!(s.modulate(0.5, EmotionalState::Raw, None), 1.0);
        assert_relative_eq!(s.modulate(0.5, EmotionalState::Focused, Some(1.0)), 0.55);
        let table = EmotionTable::default();
        assert!(table.focused.valence_weight < table.happy.valence_weight);
        // 2 * (0.9 * 0.5 + 0.1)
        assert_relative_eq!(s.modulate(0.5, EmotionalState::Graceland, None), 1.1);
        assert_relative_eq!(s.modulate(0.0, EmotionalState::Graceland, None), 0.2);
    }

    #[test]
    fn test_modulation_preserves_order() {
        let s = scorer();
        for state in [
            EmotionalState::Neutral,
            EmotionalState::Happy,
            EmotionalState::Raw,
            EmotionalState::Graceland,
            EmotionalState::Focused,
        ] {
            assert!(s.modulate(0.7, state, None) > s.modulate(0.3, state, None));
        }
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("GRACELAND".parse::<EmotionalState>().unwrap(), EmotionalState::Graceland);
        assert_eq!("fifth".parse::<HarmonicPreference>().unwrap(), HarmonicPreference::Fifth);
        assert!("elvis".parse::<EmotionalState>().is_err());
    }

    fn pattern_strategy(n: usize) -> impl Strategy<Value = WavePattern> {
        (
            prop::collection::vec(20.0f32..20_000.0, n),
            prop::collection::vec(0.0f32..4.0, n),
            prop::collection::vec(any::<bool>(), n),
        )
            .prop_map(|(f, a, p)| {
                let phases = p
                    .into_iter()
                    .map(|neg| if neg { Phase::Pi } else { Phase::Zero })
                    .collect();
                WavePattern::new(f, a, phases).unwrap()
            })
    }

    fn preference_strategy() -> impl Strategy<Value = Option<HarmonicPreference>> {
        prop_oneof![
            Just(None),
            Just(Some(HarmonicPreference::Octave)),
            Just(Some(HarmonicPreference::Fifth)),
            Just(Some(HarmonicPreference::Fourth)),
            Just(Some(HarmonicPreference::Third)),
            Just(Some(HarmonicPreference::Dissonant)),
            Just(Some(HarmonicPreference::Any)),
        ]
    }

    proptest! {
        #[test]
        fn prop_symmetric(
            (a, b) in (1usize..24).prop_flat_map(|n| (pattern_strategy(n), pattern_strategy(n))),
            pref in preference_strategy(),
        ) {
            let s = scorer();
            let ctx = SearchContext { harmonic_preference: pref, ..SearchContext::default() };
            prop_assert_eq!(s.score(&a, &b, &ctx).unwrap(), s.score(&b, &a, &ctx).unwrap());
        }

        #[test]
        fn prop_neutral_bounded_by_self_score(
            (a, b) in (1usize..24).prop_flat_map(|n| (pattern_strategy(n), pattern_strategy(n))),
        ) {
            let s = scorer();
            let ctx = SearchContext::new();
            let ab = s.score(&a, &b, &ctx).unwrap();
            prop_assert!(ab >= 0.0);
            prop_assert!(ab <= 1.0 + 1e-6, "score {} above 1", ab);
            prop_assert!((s.score(&a, &a, &ctx).unwrap() - 1.0).abs() < 1e-6);
        }

        #[test]
        fn prop_self_score_is_maximum_under_every_preference(
            (a, b) in (1usize..24).prop_flat_map(|n| (pattern_strategy(n), pattern_strategy(n))),
            pref in preference_strategy(),
        ) {
            let s = scorer();
            let ab = s.resonance(&a, &b, pref).unwrap();
            let aa = s.resonance(&a, &a, pref).unwrap();
            prop_assert!((0.0..=1.0 + 1e-6).contains(&ab), "resonance {} out of range", ab);
            prop_assert!(aa >= ab, "self {} below other {}", aa, ab);
        }
    }
}
