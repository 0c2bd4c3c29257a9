/// Lowest frequency of the transform band (Hz)
pub const F_MIN: f32 = 20.0;

/// Highest frequency of the transform band (Hz)
pub const F_MAX: f32 = 20_000.0;

/// Default spacing between successive dimension frequencies (Hz)
pub const DEFAULT_STEP: f32 = 100.0;

/// Numerical epsilon for near-zero comparisons
pub const EPSILON: f32 = 1e-6;

/// Phase coherence when two components have opposite sign
pub const PHASE_MISMATCH: f32 = 0.5;

/// Relative tolerance when matching a frequency ratio to a harmonic interval
pub const HARMONIC_TOLERANCE: f32 = 0.02;

/// Octave (2:1) bonus
pub const OCTAVE_BONUS: f32 = 1.5;

/// Perfect fifth (3:2) bonus
pub const FIFTH_BONUS: f32 = 1.3;

/// Perfect fourth (4:3) bonus
pub const FOURTH_BONUS: f32 = 1.2;

/// Major third (5:4) bonus
pub const THIRD_BONUS: f32 = 1.1;

/// Extra multiplier on the interval named by a harmonic preference
pub const PREFERENCE_BOOST: f32 = 1.2;

/// Bonus for non-harmonic pairs under a dissonant preference
pub const DISSONANT_BONUS: f32 = 1.1;

/// Share of a score kept regardless of valence agreement in a vibe check
pub const VIBE_BASE: f32 = 0.7;

/// Strength assigned to every entry on insert
pub const INITIAL_STRENGTH: f64 = 1.0;

/// Strength gained per unit of resonance on retrieval
pub const ACCESS_WEIGHT: f64 = 1.0;

/// Ceiling of the strength bias above 1.0
pub const STRENGTH_BIAS_WEIGHT: f64 = 0.25;

/// Graph: neighbors kept per node on layers above 0
pub const DEFAULT_M: usize = 16;

/// Graph: beam width while inserting
pub const DEFAULT_EF_CONSTRUCTION: usize = 100;

/// Graph: beam width while searching
pub const DEFAULT_EF_SEARCH: usize = 64;

/// Graph: hard cap on sampled levels
pub const MAX_LEVEL: usize = 16;

/// Filtered searches over at most this many matching items scan exhaustively
pub const FULL_SCAN_THRESHOLD: usize = 1000;

/// Compaction runs once tombstones exceed this share of all entries
pub const COMPACTION_RATIO: f64 = 0.25;
