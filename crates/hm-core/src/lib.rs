//! Harmonic memory: similarity search by resonance instead of distance.
//!
//! Embeddings become wave signatures (one frequency, amplitude and phase per
//! dimension). Two signatures are compared by how strongly they would
//! interfere, with bonuses for consonant frequency ratios and optional
//! emotional modulation. A layered small-world graph navigated by that score
//! gives approximate top-k retrieval, and every retrieval strengthens what
//! it returned.
//!
//! Zero I/O. Persistence lives in `hm-store`.

pub mod config;
pub mod constants;
pub mod error;
pub mod index;
pub mod memory;
pub mod metadata;
pub mod plasticity;
pub mod resonance;
pub mod serde_compat;
pub mod wave;

pub use config::EngineConfig;
pub use error::{Result, WaveError};
pub use index::{Edge, EntryView, HarmonicIndex, IndexConfig, IndexStats, SearchHit};
pub use memory::WaveMemory;
pub use metadata::{CategoryFilter, ItemMetadata};
pub use plasticity::{PlasticityConfig, PlasticityStore};
pub use resonance::{
    EmotionProfile, EmotionTable, EmotionalState, HarmonicPreference, Interval, ResonanceScorer,
    ScoringConfig, SearchContext, vibe_check,
};
pub use serde_compat::{CURRENT_VERSION, EntrySnapshot, IndexSnapshot, export_json, import_json};
pub use wave::{Phase, TransformConfig, WavePattern, WaveTransform, WaveVector};
