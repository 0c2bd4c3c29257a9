//! Layered proximity graph navigated by resonance.
//!
//! Structure follows a hierarchical small-world graph: every entry lives on
//! layer 0, exponentially fewer on each layer above. Where a metric index
//! keeps the closest neighbors, this one keeps the most resonant: higher
//! score means closer, and beam searches keep the best `ef` by score.
//!
//! Adjacency is stored as slot indices into the entry table, so cycles
//! (A → B → A) are plain data. Removal only sets a tombstone; traversal skips
//! tombstoned slots and [`HarmonicIndex::compact`] drops them for good.
//!
//! Entry point: the first insert, then every insert whose sampled level
//! exceeds the current top level. When the entry point is removed the live
//! entry with the highest level takes over, the most recently inserted one
//! on ties.

use std::cmp::{Ordering, Reverse};
use std::collections::{BinaryHeap, HashMap, HashSet};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::constants::{
    COMPACTION_RATIO, DEFAULT_EF_CONSTRUCTION, DEFAULT_EF_SEARCH, DEFAULT_M, FULL_SCAN_THRESHOLD,
    INITIAL_STRENGTH, MAX_LEVEL,
};
use crate::error::{Result, WaveError};
use crate::metadata::ItemMetadata;
use crate::plasticity::{PlasticityStore, Strength};
use crate::resonance::{HarmonicPreference, ResonanceScorer, SearchContext};
use crate::wave::{WavePattern, WaveVector};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    /// Neighbors kept per entry on layers above 0.
    pub m: usize,
    /// Neighbors kept per entry on layer 0.
    pub m0: usize,
    pub ef_construction: usize,
    pub ef_search: usize,
    pub max_level: usize,
    /// Filtered searches matching at most this many live items scan them all.
    pub full_scan_threshold: usize,
    /// Inserts compact once tombstones exceed this share of all entries.
    pub compaction_ratio: f64,
    /// Level sampling seed. `None` seeds from the OS.
    pub seed: Option<u64>,
    /// Fixed dimensionality. `None` adopts the first inserted pattern's.
    pub dimension: Option<usize>,
    /// Keep the source embedding of entries inserted from one.
    pub retain_embeddings: bool,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            m: DEFAULT_M,
            m0: DEFAULT_M * 2,
            ef_construction: DEFAULT_EF_CONSTRUCTION,
            ef_search: DEFAULT_EF_SEARCH,
            max_level: MAX_LEVEL,
            full_scan_threshold: FULL_SCAN_THRESHOLD,
            compaction_ratio: COMPACTION_RATIO,
            seed: None,
            dimension: None,
            retain_embeddings: false,
        }
    }
}

impl IndexConfig {
    fn cap(&self, layer: usize) -> usize {
        if layer == 0 { self.m0 } else { self.m }
    }

    fn level_multiplier(&self) -> f64 {
        1.0 / (self.m.max(2) as f64).ln()
    }
}

/// One adjacency entry: neighbor slot and the resonance that linked it.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub slot: usize,
    pub resonance: f32,
}

/// A ranked search result.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchHit {
    pub id: String,
    /// Final score: resonance after emotional modulation and strength bias.
    pub score: f32,
    /// Unmodulated resonance between query and entry.
    pub resonance: f32,
    pub metadata: ItemMetadata,
}

/// Read-only copy of one live entry.
#[derive(Clone, Debug, PartialEq)]
pub struct EntryView {
    pub id: String,
    pub pattern: WavePattern,
    pub embedding: Option<Vec<f32>>,
    pub metadata: ItemMetadata,
    pub level: usize,
    pub strength: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct IndexStats {
    pub item_count: usize,
    pub layer_count: usize,
    pub average_degree: f64,
    pub tombstone_count: usize,
    pub dimension: Option<usize>,
}

#[derive(Debug)]
pub(crate) struct Node {
    pub(crate) id: String,
    pub(crate) pattern: WavePattern,
    pub(crate) embedding: Option<Vec<f32>>,
    pub(crate) metadata: ItemMetadata,
    pub(crate) level: usize,
    /// `layers[l]` is the adjacency on layer `l`, for `l` in `0..=level`.
    pub(crate) layers: Vec<Vec<Edge>>,
    pub(crate) strength: Strength,
    pub(crate) tombstoned: bool,
}

#[derive(Debug)]
pub(crate) struct Graph {
    pub(crate) nodes: Vec<Node>,
    /// Live id → slot.
    pub(crate) slots: HashMap<String, usize>,
    pub(crate) entry_point: Option<usize>,
    pub(crate) top_level: usize,
    pub(crate) dimension: Option<usize>,
    pub(crate) tombstones: usize,
    rng: SmallRng,
}

#[derive(Clone, Copy, Debug)]
struct Candidate {
    slot: usize,
    score: f32,
}

impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> Ordering {
        self.score
            .total_cmp(&other.score)
            .then_with(|| other.slot.cmp(&self.slot))
    }
}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Candidate {}

/// Best resonance first, lower slot first on ties.
fn sort_edges(edges: &mut [Edge]) {
    edges.sort_by(|a, b| {
        b.resonance
            .total_cmp(&a.resonance)
            .then_with(|| a.slot.cmp(&b.slot))
    });
}

impl Graph {
    pub(crate) fn new(seed: Option<u64>, dimension: Option<usize>) -> Self {
        let rng = match seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_os_rng(),
        };
        Self {
            nodes: Vec::new(),
            slots: HashMap::new(),
            entry_point: None,
            top_level: 0,
            dimension,
            tombstones: 0,
            rng,
        }
    }

    fn live_count(&self) -> usize {
        self.nodes.len() - self.tombstones
    }

    fn sample_level(&mut self, config: &IndexConfig) -> usize {
        let u: f64 = self.rng.random();
        let level = (-(1.0 - u).ln() * config.level_multiplier()).floor();
        (level as usize).min(config.max_level)
    }

    fn check_dimension(&self, pattern: &WavePattern) -> Result<()> {
        match self.dimension {
            Some(expected) if expected != pattern.dimension() => Err(WaveError::DimensionMismatch {
                expected,
                actual: pattern.dimension(),
            }),
            _ => Ok(()),
        }
    }

    /// Beam search on one layer. Returns up to `ef` live candidates, best
    /// first. Tombstoned neighbors are skipped, not expanded.
    fn search_layer(
        &self,
        scorer: &ResonanceScorer,
        query: &WavePattern,
        preference: Option<HarmonicPreference>,
        entry: &[Candidate],
        ef: usize,
        layer: usize,
    ) -> Vec<Candidate> {
        let mut visited: HashSet<usize> = entry.iter().map(|c| c.slot).collect();
        let mut frontier: BinaryHeap<Candidate> = entry.iter().copied().collect();
        let mut best: BinaryHeap<Reverse<Candidate>> = entry.iter().copied().map(Reverse).collect();
        while best.len() > ef {
            best.pop();
        }

        while let Some(current) = frontier.pop() {
            let worst = best.peek().map_or(f32::NEG_INFINITY, |w| w.0.score);
            if best.len() >= ef && current.score < worst {
                break;
            }
            let Some(edges) = self.nodes[current.slot].layers.get(layer) else {
                continue;
            };
            for edge in edges {
                if !visited.insert(edge.slot) {
                    continue;
                }
                let neighbor = &self.nodes[edge.slot];
                if neighbor.tombstoned {
                    continue;
                }
                let score = scorer.resonance_unchecked(query, &neighbor.pattern, preference);
                let worst = best.peek().map_or(f32::NEG_INFINITY, |w| w.0.score);
                if best.len() < ef || score > worst {
                    let candidate = Candidate {
                        slot: edge.slot,
                        score,
                    };
                    frontier.push(candidate);
                    best.push(Reverse(candidate));
                    if best.len() > ef {
                        best.pop();
                    }
                }
            }
        }

        let mut found: Vec<Candidate> = best.into_iter().map(|r| r.0).collect();
        found.sort_by(|a, b| b.cmp(a));
        found
    }

    /// Greedy descent from the entry point to `layer`, then a beam of `ef`.
    fn walk(
        &self,
        scorer: &ResonanceScorer,
        query: &WavePattern,
        preference: Option<HarmonicPreference>,
        ef: usize,
    ) -> Vec<Candidate> {
        let Some(ep) = self.entry_point else {
            return Vec::new();
        };
        let mut entry = vec![Candidate {
            slot: ep,
            score: scorer.resonance_unchecked(query, &self.nodes[ep].pattern, preference),
        }];
        for layer in (1..=self.top_level).rev() {
            entry = self.search_layer(scorer, query, preference, &entry, 1, layer);
        }
        self.search_layer(scorer, query, preference, &entry, ef, 0)
    }

    fn insert(
        &mut self,
        config: &IndexConfig,
        scorer: &ResonanceScorer,
        id: &str,
        vector: WaveVector,
        metadata: ItemMetadata,
        strength: f64,
    ) -> Result<bool> {
        let (pattern, embedding) = vector.into_parts();
        self.check_dimension(&pattern)?;
        self.dimension = Some(pattern.dimension());

        let replaced = match self.slots.remove(id) {
            Some(old) => {
                self.tombstone(old);
                true
            }
            None => false,
        };

        let level = self.sample_level(config);
        let slot = self.nodes.len();
        let query = pattern.clone();
        self.nodes.push(Node {
            id: id.to_string(),
            pattern,
            embedding,
            metadata,
            level,
            layers: vec![Vec::new(); level + 1],
            strength: Strength::new(strength),
            tombstoned: false,
        });
        self.slots.insert(id.to_string(), slot);

        let Some(ep) = self.entry_point else {
            self.entry_point = Some(slot);
            self.top_level = level;
            tracing::debug!(id, level, "first live entry becomes entry point");
            return Ok(replaced);
        };

        let mut entry = vec![Candidate {
            slot: ep,
            score: scorer.resonance_unchecked(&query, &self.nodes[ep].pattern, None),
        }];
        for layer in ((level + 1)..=self.top_level).rev() {
            entry = self.search_layer(scorer, &query, None, &entry, 1, layer);
        }

        for layer in (0..=level.min(self.top_level)).rev() {
            let found =
                self.search_layer(scorer, &query, None, &entry, config.ef_construction, layer);
            let cap = config.cap(layer);
            let selected: Vec<Edge> = found
                .iter()
                .filter(|c| c.slot != slot)
                .take(cap)
                .map(|c| Edge {
                    slot: c.slot,
                    resonance: c.score,
                })
                .collect();
            for edge in &selected {
                self.link(
                    edge.slot,
                    layer,
                    Edge {
                        slot,
                        resonance: edge.resonance,
                    },
                    cap,
                );
            }
            self.nodes[slot].layers[layer] = selected;
            if !found.is_empty() {
                entry = found;
            }
        }

        if level > self.top_level {
            tracing::debug!(id, level, previous = self.top_level, "promoted to entry point");
            self.top_level = level;
            self.entry_point = Some(slot);
        }
        Ok(replaced)
    }

    /// Add a reverse edge, pruning back to the `cap` most resonant live
    /// neighbors when the list overflows.
    fn link(&mut self, target: usize, layer: usize, edge: Edge, cap: usize) {
        let mut edges = std::mem::take(&mut self.nodes[target].layers[layer]);
        edges.push(edge);
        if edges.len() > cap {
            edges.retain(|e| !self.nodes[e.slot].tombstoned);
            sort_edges(&mut edges);
            edges.truncate(cap);
        }
        self.nodes[target].layers[layer] = edges;
    }

    fn tombstone(&mut self, slot: usize) {
        let node = &mut self.nodes[slot];
        if node.tombstoned {
            return;
        }
        node.tombstoned = true;
        self.tombstones += 1;
        if self.entry_point == Some(slot) {
            self.reselect_entry_point();
        }
    }

    fn reselect_entry_point(&mut self) {
        let next = self
            .nodes
            .iter()
            .enumerate()
            .filter(|(_, n)| !n.tombstoned)
            .max_by(|(i, a), (j, b)| a.level.cmp(&b.level).then(i.cmp(j)));
        match next {
            Some((slot, node)) => {
                tracing::debug!(id = %node.id, level = node.level, "entry point reselected");
                self.entry_point = Some(slot);
                self.top_level = node.level;
            }
            None => {
                self.entry_point = None;
                self.top_level = 0;
            }
        }
    }

    /// Drop tombstoned entries. Live entries that pointed at a removed one
    /// refill that layer from the removed entry's own neighbors.
    fn compact(&mut self, config: &IndexConfig, scorer: &ResonanceScorer) -> usize {
        if self.tombstones == 0 {
            return 0;
        }
        let removed = self.tombstones;

        let mut repaired: Vec<(usize, usize, Vec<Edge>)> = Vec::new();
        for (slot, node) in self.nodes.iter().enumerate() {
            if node.tombstoned {
                continue;
            }
            for (layer, edges) in node.layers.iter().enumerate() {
                if edges.iter().all(|e| !self.nodes[e.slot].tombstoned) {
                    continue;
                }
                let mut seen: HashSet<usize> = HashSet::from([slot]);
                let mut pool: Vec<Edge> = Vec::new();
                for edge in edges {
                    let neighbor = &self.nodes[edge.slot];
                    if !neighbor.tombstoned {
                        if seen.insert(edge.slot) {
                            pool.push(*edge);
                        }
                        continue;
                    }
                    for second in neighbor.layers.get(layer).into_iter().flatten() {
                        let candidate = &self.nodes[second.slot];
                        if candidate.tombstoned || !seen.insert(second.slot) {
                            continue;
                        }
                        pool.push(Edge {
                            slot: second.slot,
                            resonance: scorer.resonance_unchecked(
                                &node.pattern,
                                &candidate.pattern,
                                None,
                            ),
                        });
                    }
                }
                sort_edges(&mut pool);
                pool.truncate(config.cap(layer));
                repaired.push((slot, layer, pool));
            }
        }
        for (slot, layer, edges) in repaired {
            self.nodes[slot].layers[layer] = edges;
        }

        let mut remap = vec![None; self.nodes.len()];
        let mut next = 0;
        for (old, node) in self.nodes.iter().enumerate() {
            if !node.tombstoned {
                remap[old] = Some(next);
                next += 1;
            }
        }

        let nodes = std::mem::take(&mut self.nodes);
        self.nodes = nodes
            .into_iter()
            .filter(|n| !n.tombstoned)
            .map(|mut node| {
                for edges in &mut node.layers {
                    edges.retain_mut(|e| match remap[e.slot] {
                        Some(new) => {
                            e.slot = new;
                            true
                        }
                        None => false,
                    });
                }
                node
            })
            .collect();
        self.slots = self
            .nodes
            .iter()
            .enumerate()
            .map(|(slot, node)| (node.id.clone(), slot))
            .collect();
        self.entry_point = self.entry_point.and_then(|ep| remap[ep]);
        self.tombstones = 0;

        tracing::debug!(removed, live = self.nodes.len(), "compacted index");
        removed
    }
}

/// Resonance-navigated approximate nearest-neighbor index.
///
/// Searches and strength updates share a read lock; inserts, removals and
/// compaction take the write lock, so a search never sees a half-linked
/// entry.
#[derive(Debug)]
pub struct HarmonicIndex {
    config: IndexConfig,
    scorer: ResonanceScorer,
    graph: RwLock<Graph>,
}

impl Default for HarmonicIndex {
    fn default() -> Self {
        Self::new(IndexConfig::default(), ResonanceScorer::default())
    }
}

impl HarmonicIndex {
    pub fn new(config: IndexConfig, scorer: ResonanceScorer) -> Self {
        let graph = Graph::new(config.seed, config.dimension);
        Self {
            config,
            scorer,
            graph: RwLock::new(graph),
        }
    }

    pub(crate) fn from_graph(config: IndexConfig, scorer: ResonanceScorer, graph: Graph) -> Self {
        Self {
            config,
            scorer,
            graph: RwLock::new(graph),
        }
    }

    pub fn config(&self) -> &IndexConfig {
        &self.config
    }

    pub fn scorer(&self) -> &ResonanceScorer {
        &self.scorer
    }

    pub(crate) fn read(&self) -> RwLockReadGuard<'_, Graph> {
        self.graph.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Graph> {
        self.graph.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Insert with the default initial strength. See [`Self::insert_with_strength`].
    pub fn insert(&self, id: &str, pattern: WavePattern, metadata: ItemMetadata) -> Result<bool> {
        self.insert_with_strength(id, pattern, metadata, INITIAL_STRENGTH)
    }

    /// Insert or replace `id`. Returns true when an existing entry was
    /// replaced; its old slot is tombstoned and inbound edges to it are left
    /// for compaction.
    pub fn insert_with_strength(
        &self,
        id: &str,
        pattern: WavePattern,
        metadata: ItemMetadata,
        strength: f64,
    ) -> Result<bool> {
        self.insert_vector(id, WaveVector::from_pattern(pattern), metadata, strength)
    }

    /// Insert a pattern and, when present, the embedding it came from. The
    /// embedding is dropped unless `retain_embeddings` is set.
    pub fn insert_vector(
        &self,
        id: &str,
        vector: WaveVector,
        metadata: ItemMetadata,
        strength: f64,
    ) -> Result<bool> {
        if id.is_empty() {
            return Err(WaveError::InvalidInput("id must not be empty".into()));
        }
        let vector = if self.config.retain_embeddings {
            vector
        } else {
            WaveVector::from_pattern(vector.into_parts().0)
        };
        let mut graph = self.write();
        let replaced = graph.insert(&self.config, &self.scorer, id, vector, metadata, strength)?;

        let threshold = graph.nodes.len() as f64 * self.config.compaction_ratio;
        if graph.tombstones > 0 && graph.tombstones as f64 > threshold {
            graph.compact(&self.config, &self.scorer);
        }
        Ok(replaced)
    }

    /// Top-k live entries by final score, ranked without strength bias.
    pub fn search(
        &self,
        query: &WavePattern,
        ctx: &SearchContext,
        k: usize,
        ef: usize,
    ) -> Result<Vec<SearchHit>> {
        self.search_inner(query, ctx, k, ef, None)
    }

    /// Like [`Self::search`], with each entry's score multiplied by its
    /// plasticity bias.
    pub fn search_with_plasticity(
        &self,
        query: &WavePattern,
        ctx: &SearchContext,
        k: usize,
        ef: usize,
        plasticity: &PlasticityStore,
    ) -> Result<Vec<SearchHit>> {
        self.search_inner(query, ctx, k, ef, Some(plasticity))
    }

    fn search_inner(
        &self,
        query: &WavePattern,
        ctx: &SearchContext,
        k: usize,
        ef: usize,
        plasticity: Option<&PlasticityStore>,
    ) -> Result<Vec<SearchHit>> {
        let graph = self.read();
        if graph.live_count() == 0 {
            return Err(WaveError::EmptyIndex);
        }
        graph.check_dimension(query)?;
        if k == 0 {
            return Ok(Vec::new());
        }

        let ef = ef.max(k);
        let preference = ctx.harmonic_preference;
        let candidates = match &ctx.category_filter {
            Some(filter) => {
                let matching: Vec<usize> = graph
                    .slots
                    .values()
                    .copied()
                    .filter(|slot| filter.matches(&graph.nodes[*slot].metadata))
                    .collect();
                if matching.len() <= self.config.full_scan_threshold {
                    matching
                        .into_iter()
                        .map(|slot| Candidate {
                            slot,
                            score: self.scorer.resonance_unchecked(
                                query,
                                &graph.nodes[slot].pattern,
                                preference,
                            ),
                        })
                        .collect()
                } else {
                    graph.walk(&self.scorer, query, preference, ef)
                }
            }
            None => graph.walk(&self.scorer, query, preference, ef),
        };

        let mut hits: Vec<SearchHit> = candidates
            .into_iter()
            .filter_map(|c| {
                let node = &graph.nodes[c.slot];
                if node.tombstoned {
                    return None;
                }
                if let Some(filter) = &ctx.category_filter
                    && !filter.matches(&node.metadata)
                {
                    return None;
                }
                let mut score = self
                    .scorer
                    .apply_context(c.score, ctx, node.metadata.valence);
                if let Some(plasticity) = plasticity {
                    score *= plasticity.bias(node.strength.get());
                }
                Some(SearchHit {
                    id: node.id.clone(),
                    score,
                    resonance: c.score,
                    metadata: node.metadata.clone(),
                })
            })
            .collect();

        hits.sort_by(|a, b| b.score.total_cmp(&a.score).then_with(|| a.id.cmp(&b.id)));
        hits.truncate(k);
        Ok(hits)
    }

    /// Tombstone `id`. Other entries may keep edges to it until compaction.
    pub fn remove(&self, id: &str) -> Result<()> {
        let mut graph = self.write();
        let slot = graph
            .slots
            .remove(id)
            .ok_or_else(|| WaveError::NotFound(id.to_string()))?;
        graph.tombstone(slot);
        tracing::debug!(id, tombstones = graph.tombstones, "removed");
        Ok(())
    }

    /// Physically drop tombstoned entries. Returns how many were dropped.
    pub fn compact(&self) -> usize {
        self.write().compact(&self.config, &self.scorer)
    }

    pub(crate) fn add_strength(&self, id: &str, delta: f64) -> Result<f64> {
        let graph = self.read();
        let slot = graph
            .slots
            .get(id)
            .ok_or_else(|| WaveError::NotFound(id.to_string()))?;
        Ok(graph.nodes[*slot].strength.add(delta))
    }

    pub fn strength(&self, id: &str) -> Option<f64> {
        let graph = self.read();
        graph.slots.get(id).map(|slot| graph.nodes[*slot].strength.get())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.read().slots.contains_key(id)
    }

    pub fn get(&self, id: &str) -> Option<EntryView> {
        let graph = self.read();
        let node = &graph.nodes[*graph.slots.get(id)?];
        Some(EntryView {
            id: node.id.clone(),
            pattern: node.pattern.clone(),
            embedding: node.embedding.clone(),
            metadata: node.metadata.clone(),
            level: node.level,
            strength: node.strength.get(),
        })
    }

    /// Raw adjacency of a live entry on one layer, including edges that
    /// still point at tombstoned entries.
    pub fn neighbors(&self, id: &str, layer: usize) -> Result<Vec<(String, f32)>> {
        let graph = self.read();
        let slot = graph
            .slots
            .get(id)
            .ok_or_else(|| WaveError::NotFound(id.to_string()))?;
        Ok(graph.nodes[*slot]
            .layers
            .get(layer)
            .map(|edges| {
                edges
                    .iter()
                    .map(|e| (graph.nodes[e.slot].id.clone(), e.resonance))
                    .collect()
            })
            .unwrap_or_default())
    }

    /// Id of the current entry point.
    pub fn entry_point(&self) -> Option<String> {
        let graph = self.read();
        graph.entry_point.map(|ep| graph.nodes[ep].id.clone())
    }

    pub fn len(&self) -> usize {
        self.read().live_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn stats(&self) -> IndexStats {
        let graph = self.read();
        let live = graph.live_count();
        let edges: usize = graph
            .nodes
            .iter()
            .filter(|n| !n.tombstoned)
            .map(|n| {
                n.layers[0]
                    .iter()
                    .filter(|e| !graph.nodes[e.slot].tombstoned)
                    .count()
            })
            .sum();
        IndexStats {
            item_count: live,
            layer_count: if live > 0 { graph.top_level + 1 } else { 0 },
            average_degree: if live > 0 {
                edges as f64 / live as f64
            } else {
                0.0
            },
            tombstone_count: graph.tombstones,
            dimension: graph.dimension,
        }
    }
}
