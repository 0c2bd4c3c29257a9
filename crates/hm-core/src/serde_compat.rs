//! JSON snapshot of a full index.
//!
//! Entries are written in slot order, tombstones included, so adjacency can
//! refer to slots directly and a reload reproduces the graph exactly.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{Result, WaveError};
use crate::index::{Edge, Graph, HarmonicIndex, IndexConfig, Node};
use crate::metadata::ItemMetadata;
use crate::plasticity::Strength;
use crate::resonance::ResonanceScorer;
use crate::wave::WavePattern;

pub const CURRENT_VERSION: &str = "1";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct IndexSnapshot {
    pub version: String,
    pub dimension: Option<usize>,
    pub entry_point: Option<usize>,
    #[serde(default)]
    pub top_level: usize,
    pub entries: Vec<EntrySnapshot>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EntrySnapshot {
    pub id: String,
    pub level: usize,
    pub strength: f64,
    #[serde(default)]
    pub tombstoned: bool,
    #[serde(default)]
    pub metadata: ItemMetadata,
    pub pattern: WavePattern,
    /// Source embedding, present only for entries that retained one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub embedding: Option<Vec<f32>>,
    /// One list per layer, `0..=level`.
    pub neighbors: Vec<Vec<Edge>>,
}

fn corrupt(msg: impl Into<String>) -> WaveError {
    WaveError::CorruptSnapshot(msg.into())
}

impl IndexSnapshot {
    pub fn from_index(index: &HarmonicIndex) -> Self {
        let graph = index.read();
        Self {
            version: CURRENT_VERSION.to_string(),
            dimension: graph.dimension,
            entry_point: graph.entry_point,
            top_level: graph.top_level,
            entries: graph
                .nodes
                .iter()
                .map(|node| EntrySnapshot {
                    id: node.id.clone(),
                    level: node.level,
                    strength: node.strength.get(),
                    tombstoned: node.tombstoned,
                    metadata: node.metadata.clone(),
                    pattern: node.pattern.clone(),
                    embedding: node.embedding.clone(),
                    neighbors: node.layers.clone(),
                })
                .collect(),
        }
    }

    /// Rebuild an index. Every structural invariant is checked first; any
    /// violation is reported as [`WaveError::CorruptSnapshot`].
    pub fn into_index(self, config: IndexConfig, scorer: ResonanceScorer) -> Result<HarmonicIndex> {
        if self.version != CURRENT_VERSION {
            return Err(corrupt(format!(
                "unsupported snapshot version '{}'",
                self.version
            )));
        }
        if let (Some(fixed), Some(found)) = (config.dimension, self.dimension)
            && fixed != found
        {
            return Err(WaveError::DimensionMismatch {
                expected: fixed,
                actual: found,
            });
        }
        self.validate()?;

        let mut graph = Graph::new(config.seed, self.dimension.or(config.dimension));
        let mut slots = HashMap::new();
        let mut tombstones = 0;
        for (slot, entry) in self.entries.into_iter().enumerate() {
            if entry.tombstoned {
                tombstones += 1;
            } else {
                slots.insert(entry.id.clone(), slot);
            }
            graph.nodes.push(Node {
                id: entry.id,
                pattern: entry.pattern,
                embedding: entry.embedding,
                metadata: entry.metadata,
                level: entry.level,
                layers: entry.neighbors,
                strength: Strength::new(entry.strength),
                tombstoned: entry.tombstoned,
            });
        }
        graph.slots = slots;
        graph.tombstones = tombstones;
        graph.entry_point = self.entry_point;
        graph.top_level = self.top_level;

        Ok(HarmonicIndex::from_graph(config, scorer, graph))
    }

    fn validate(&self) -> Result<()> {
        let n = self.entries.len();
        let mut live_ids = HashMap::new();
        for (slot, entry) in self.entries.iter().enumerate() {
            if entry.id.is_empty() {
                return Err(corrupt(format!("entry {slot} has an empty id")));
            }
            if Some(entry.pattern.dimension()) != self.dimension {
                return Err(corrupt(format!(
                    "entry '{}' has dimension {}, snapshot says {:?}",
                    entry.id,
                    entry.pattern.dimension(),
                    self.dimension
                )));
            }
            if let Some(embedding) = &entry.embedding
                && embedding.len() != entry.pattern.dimension()
            {
                return Err(corrupt(format!(
                    "entry '{}' keeps a {}-value embedding for a {}-partial pattern",
                    entry.id,
                    embedding.len(),
                    entry.pattern.dimension()
                )));
            }
            if !entry.strength.is_finite() {
                return Err(corrupt(format!("entry '{}' has non-finite strength", entry.id)));
            }
            if entry.neighbors.len() != entry.level + 1 {
                return Err(corrupt(format!(
                    "entry '{}' has level {} but {} neighbor layers",
                    entry.id,
                    entry.level,
                    entry.neighbors.len()
                )));
            }
            for (layer, edges) in entry.neighbors.iter().enumerate() {
                for edge in edges {
                    let Some(target) = self.entries.get(edge.slot) else {
                        return Err(corrupt(format!(
                            "entry '{}' links to slot {} of {n}",
                            entry.id, edge.slot
                        )));
                    };
                    if target.level < layer {
                        return Err(corrupt(format!(
                            "entry '{}' links to '{}' on layer {layer} above its level",
                            entry.id, target.id
                        )));
                    }
                }
            }
            if !entry.tombstoned && live_ids.insert(entry.id.as_str(), slot).is_some() {
                return Err(corrupt(format!("duplicate live id '{}'", entry.id)));
            }
        }

        match self.entry_point {
            None if !live_ids.is_empty() => Err(corrupt("live entries but no entry point")),
            None => Ok(()),
            Some(ep) => {
                let entry = self
                    .entries
                    .get(ep)
                    .ok_or_else(|| corrupt(format!("entry point {ep} out of range")))?;
                if entry.tombstoned {
                    return Err(corrupt(format!("entry point '{}' is tombstoned", entry.id)));
                }
                if entry.level != self.top_level {
                    return Err(corrupt(format!(
                        "entry point level {} differs from top level {}",
                        entry.level, self.top_level
                    )));
                }
                Ok(())
            }
        }
    }
}

impl HarmonicIndex {
    pub fn snapshot(&self) -> IndexSnapshot {
        IndexSnapshot::from_index(self)
    }

    pub fn from_snapshot(
        config: IndexConfig,
        scorer: ResonanceScorer,
        snapshot: IndexSnapshot,
    ) -> Result<Self> {
        snapshot.into_index(config, scorer)
    }
}

pub fn export_json(index: &HarmonicIndex) -> Result<String> {
    serde_json::to_string_pretty(&index.snapshot()).map_err(|e| corrupt(e.to_string()))
}

pub fn import_json(json: &str, config: IndexConfig, scorer: ResonanceScorer) -> Result<HarmonicIndex> {
    let snapshot: IndexSnapshot = serde_json::from_str(json).map_err(|e| corrupt(e.to_string()))?;
    snapshot.into_index(config, scorer)
}
