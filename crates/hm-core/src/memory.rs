//! `WaveMemory`: embeddings in, ranked and reinforced hits out.

use crate::config::EngineConfig;
use crate::error::{Result, WaveError};
use crate::index::{HarmonicIndex, IndexStats, SearchHit};
use crate::metadata::ItemMetadata;
use crate::plasticity::PlasticityStore;
use crate::resonance::{ResonanceScorer, SearchContext};
use crate::wave::{WavePattern, WaveTransform};

/// One transform, one index and the plasticity rule wired together.
///
/// `Send + Sync`; hosts share a single instance behind an `Arc`.
#[derive(Debug)]
pub struct WaveMemory {
    config: EngineConfig,
    transform: WaveTransform,
    index: HarmonicIndex,
    plasticity: PlasticityStore,
}

impl WaveMemory {
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        let index = HarmonicIndex::new(
            config.index.clone(),
            ResonanceScorer::new(config.scoring.clone()),
        );
        Ok(Self::assemble(config, index))
    }

    /// Wrap an index restored from storage.
    pub fn from_index(config: EngineConfig, index: HarmonicIndex) -> Result<Self> {
        config.validate()?;
        Ok(Self::assemble(config, index))
    }

    fn assemble(config: EngineConfig, index: HarmonicIndex) -> Self {
        Self {
            transform: WaveTransform::new(config.transform.clone()),
            plasticity: PlasticityStore::new(config.plasticity.clone()),
            config,
            index,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn index(&self) -> &HarmonicIndex {
        &self.index
    }

    pub fn transform(&self) -> &WaveTransform {
        &self.transform
    }

    pub fn plasticity(&self) -> &PlasticityStore {
        &self.plasticity
    }

    /// Transform and insert. Returns true when `id` replaced an existing entry.
    /// The embedding is kept on the entry when `index.retain_embeddings` is set.
    pub fn insert(&self, id: &str, embedding: &[f32], metadata: ItemMetadata) -> Result<bool> {
        let vector = self.transform.encode(embedding)?;
        self.index.insert_vector(
            id,
            vector,
            metadata,
            self.plasticity.initial_strength(),
        )
    }

    pub fn insert_pattern(
        &self,
        id: &str,
        pattern: WavePattern,
        metadata: ItemMetadata,
    ) -> Result<bool> {
        self.index.insert_with_strength(
            id,
            pattern,
            metadata,
            self.plasticity.initial_strength(),
        )
    }

    pub fn search(
        &self,
        embedding: &[f32],
        ctx: &SearchContext,
        top_k: usize,
    ) -> Result<Vec<SearchHit>> {
        let query = self.transform.transform(embedding)?;
        self.search_pattern(&query, ctx, top_k)
    }

    /// Rank with strength bias, then reinforce every returned hit by its
    /// unmodulated resonance.
    pub fn search_pattern(
        &self,
        query: &WavePattern,
        ctx: &SearchContext,
        top_k: usize,
    ) -> Result<Vec<SearchHit>> {
        let hits = self.index.search_with_plasticity(
            query,
            ctx,
            top_k,
            self.config.index.ef_search,
            &self.plasticity,
        )?;
        for hit in &hits {
            match self.plasticity.reinforce(&self.index, &hit.id, hit.resonance) {
                Ok(_) => {}
                // removed between ranking and reinforcement
                Err(WaveError::NotFound(id)) => {
                    tracing::debug!(id = %id, "hit vanished before reinforcement");
                }
                Err(e) => return Err(e),
            }
        }
        Ok(hits)
    }

    pub fn reinforce(&self, id: &str, resonance: f32) -> Result<f64> {
        self.plasticity.reinforce(&self.index, id, resonance)
    }

    pub fn remove(&self, id: &str) -> Result<()> {
        self.index.remove(id)
    }

    pub fn compact(&self) -> usize {
        self.index.compact()
    }

    pub fn stats(&self) -> IndexStats {
        self.index.stats()
    }

    /// Source embedding of a live entry, when it was retained.
    pub fn embedding(&self, id: &str) -> Option<Vec<f32>> {
        self.index.get(id)?.embedding
    }
}
