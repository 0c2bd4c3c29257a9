use std::path::Path;

use rusqlite::{Connection, params};

use hm_core::{
    CURRENT_VERSION, Edge, EngineConfig, EntrySnapshot, HarmonicIndex, IndexConfig, IndexSnapshot,
    ItemMetadata, Phase, ResonanceScorer, WaveMemory, WavePattern,
};

use crate::error::{Result, StoreError};
use crate::schema;

pub struct Store {
    conn: Connection,
}

impl Store {
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        schema::initialize(&conn)?;
        Ok(Self { conn })
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        schema::initialize(&conn)?;
        Ok(Self { conn })
    }

    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    // --- Metadata ---

    pub fn get_metadata(&self, key: &str) -> Result<Option<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT value FROM metadata WHERE key = ?1")?;
        let result = stmt.query_row([key], |row| row.get(0)).ok();
        Ok(result)
    }

    pub fn set_metadata(&self, key: &str, value: &str) -> Result<()> {
        set_metadata_on(&self.conn, key, value)
    }

    // --- Save ---

    /// Replace the stored index with `index`, in one transaction.
    pub fn save_index(&self, index: &HarmonicIndex) -> Result<()> {
        self.save_snapshot(&index.snapshot())
    }

    pub fn save_snapshot(&self, snapshot: &IndexSnapshot) -> Result<()> {
        let tx = self.conn.unchecked_transaction()?;
        tx.execute_batch("DELETE FROM edges; DELETE FROM entries;")?;

        set_optional_on(&tx, "dimension", snapshot.dimension)?;
        set_optional_on(&tx, "entry_point", snapshot.entry_point)?;
        set_metadata_on(&tx, "top_level", &snapshot.top_level.to_string())?;

        {
            let mut insert_entry = tx.prepare(
                "INSERT INTO entries (slot, id, level, strength, tombstoned, metadata, frequencies, amplitudes, phases, embedding)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            )?;
            let mut insert_edge = tx.prepare(
                "INSERT INTO edges (slot, layer, position, neighbor, resonance)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
            )?;

            for (slot, entry) in snapshot.entries.iter().enumerate() {
                let metadata = serde_json::to_string(&entry.metadata)
                    .map_err(|e| StoreError::InvalidData(format!("metadata of '{}': {e}", entry.id)))?;
                insert_entry.execute(params![
                    slot as i64,
                    entry.id,
                    entry.level as i64,
                    entry.strength,
                    entry.tombstoned as i32,
                    metadata,
                    encode_f32s(entry.pattern.frequencies()),
                    encode_f32s(entry.pattern.amplitudes()),
                    encode_phases(entry.pattern.phases()),
                    entry.embedding.as_deref().map(encode_f32s),
                ])?;
            }
            // edges after all entries: neighbors may sit in later slots
            for (slot, entry) in snapshot.entries.iter().enumerate() {
                for (layer, edges) in entry.neighbors.iter().enumerate() {
                    for (position, edge) in edges.iter().enumerate() {
                        insert_edge.execute(params![
                            slot as i64,
                            layer as i64,
                            position as i64,
                            edge.slot as i64,
                            edge.resonance as f64,
                        ])?;
                    }
                }
            }
        }

        tx.commit()?;
        tracing::info!(entries = snapshot.entries.len(), "saved index");
        Ok(())
    }

    /// Write back strengths of live entries after searches.
    pub fn save_strengths(&self, strengths: &[(String, f64)]) -> Result<()> {
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut update = tx.prepare(
                "UPDATE entries SET strength = ?1 WHERE id = ?2 AND tombstoned = 0",
            )?;
            for (id, strength) in strengths {
                update.execute(params![strength, id])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    // --- Load ---

    pub fn load_snapshot(&self) -> Result<IndexSnapshot> {
        let dimension = self.get_optional("dimension")?;
        let entry_point = self.get_optional("entry_point")?;
        let top_level = self.get_optional("top_level")?.unwrap_or(0);

        let mut stmt = self.conn.prepare(
            "SELECT slot, id, level, strength, tombstoned, metadata, frequencies, amplitudes, phases, embedding
             FROM entries ORDER BY slot",
        )?;
        let rows = stmt
            .query_map([], |row| {
                Ok(EntryRow {
                    slot: row.get(0)?,
                    id: row.get(1)?,
                    level: row.get(2)?,
                    strength: row.get(3)?,
                    tombstoned: row.get::<_, i32>(4)? != 0,
                    metadata: row.get(5)?,
                    frequencies: row.get(6)?,
                    amplitudes: row.get(7)?,
                    phases: row.get(8)?,
                    embedding: row.get(9)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let mut entries = Vec::with_capacity(rows.len());
        for (expected, row) in rows.into_iter().enumerate() {
            if row.slot != expected as i64 {
                return Err(StoreError::InvalidData(format!(
                    "slot gap: expected {expected}, found {}",
                    row.slot
                )));
            }
            entries.push(row.into_entry()?);
        }

        let mut edge_stmt = self.conn.prepare(
            "SELECT slot, layer, neighbor, resonance FROM edges ORDER BY slot, layer, position",
        )?;
        let edges = edge_stmt.query_map([], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, i64>(1)?,
                row.get::<_, i64>(2)?,
                row.get::<_, f64>(3)?,
            ))
        })?;
        for edge in edges {
            let (slot, layer, neighbor, resonance) = edge?;
            let entry: &mut EntrySnapshot = entries
                .get_mut(to_usize(slot, "edge slot")?)
                .ok_or_else(|| StoreError::InvalidData(format!("edge from unknown slot {slot}")))?;
            let list = entry
                .neighbors
                .get_mut(to_usize(layer, "edge layer")?)
                .ok_or_else(|| {
                    StoreError::InvalidData(format!("edge on layer {layer} above level of slot {slot}"))
                })?;
            list.push(Edge {
                slot: to_usize(neighbor, "edge neighbor")?,
                resonance: resonance as f32,
            });
        }

        Ok(IndexSnapshot {
            version: CURRENT_VERSION.to_string(),
            dimension,
            entry_point,
            top_level,
            entries,
        })
    }

    /// Restore the saved index. An empty database yields an empty index.
    pub fn load_index(&self, config: IndexConfig, scorer: ResonanceScorer) -> Result<HarmonicIndex> {
        let snapshot = self.load_snapshot()?;
        let entries = snapshot.entries.len();
        let index = HarmonicIndex::from_snapshot(config, scorer, snapshot)?;
        tracing::info!(entries, "loaded index");
        Ok(index)
    }

    pub fn load_memory(&self, config: EngineConfig) -> Result<WaveMemory> {
        let index = self.load_index(
            config.index.clone(),
            ResonanceScorer::new(config.scoring.clone()),
        )?;
        Ok(WaveMemory::from_index(config, index)?)
    }

    pub fn entry_count(&self) -> Result<usize> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM entries WHERE tombstoned = 0",
            [],
            |row| row.get(0),
        )?;
        to_usize(count, "entry count")
    }

    fn get_optional(&self, key: &str) -> Result<Option<usize>> {
        match self.get_metadata(key)? {
            None => Ok(None),
            Some(v) if v.is_empty() => Ok(None),
            Some(v) => v
                .parse::<usize>()
                .map(Some)
                .map_err(|e| StoreError::InvalidData(format!("metadata '{key}' = '{v}': {e}"))),
        }
    }
}

fn set_metadata_on(conn: &Connection, key: &str, value: &str) -> Result<()> {
    conn.execute(
        "INSERT OR REPLACE INTO metadata (key, value) VALUES (?1, ?2)",
        params![key, value],
    )?;
    Ok(())
}

fn set_optional_on(conn: &Connection, key: &str, value: Option<usize>) -> Result<()> {
    let value = value.map(|v| v.to_string()).unwrap_or_default();
    set_metadata_on(conn, key, &value)
}

struct EntryRow {
    slot: i64,
    id: String,
    level: i64,
    strength: f64,
    tombstoned: bool,
    metadata: String,
    frequencies: Vec<u8>,
    amplitudes: Vec<u8>,
    phases: Vec<u8>,
    embedding: Option<Vec<u8>>,
}

impl EntryRow {
    fn into_entry(self) -> Result<EntrySnapshot> {
        let metadata: ItemMetadata = serde_json::from_str(&self.metadata)
            .map_err(|e| StoreError::InvalidData(format!("metadata of '{}': {e}", self.id)))?;
        let pattern = WavePattern::new(
            decode_f32s(&self.frequencies, &self.id)?,
            decode_f32s(&self.amplitudes, &self.id)?,
            decode_phases(&self.phases, &self.id)?,
        )?;
        let embedding = self
            .embedding
            .as_deref()
            .map(|bytes| decode_f32s(bytes, &self.id))
            .transpose()?;
        let level = to_usize(self.level, "level")?;
        Ok(EntrySnapshot {
            id: self.id,
            level,
            strength: self.strength,
            tombstoned: self.tombstoned,
            metadata,
            pattern,
            embedding,
            neighbors: vec![Vec::new(); level + 1],
        })
    }
}

fn to_usize(value: i64, what: &str) -> Result<usize> {
    usize::try_from(value).map_err(|_| StoreError::InvalidData(format!("negative {what}: {value}")))
}

fn encode_f32s(values: &[f32]) -> Vec<u8> {
    values.iter().flat_map(|v| v.to_le_bytes()).collect()
}

fn decode_f32s(bytes: &[u8], id: &str) -> Result<Vec<f32>> {
    if bytes.len() % 4 != 0 {
        return Err(StoreError::InvalidData(format!(
            "pattern BLOB of '{id}' has {} bytes, not a multiple of 4",
            bytes.len()
        )));
    }
    Ok(bytes
        .chunks_exact(4)
        .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]))
        .collect())
}

fn encode_phases(phases: &[Phase]) -> Vec<u8> {
    phases
        .iter()
        .map(|p| match p {
            Phase::Zero => 0,
            Phase::Pi => 1,
        })
        .collect()
}

fn decode_phases(bytes: &[u8], id: &str) -> Result<Vec<Phase>> {
    bytes
        .iter()
        .map(|b| match b {
            0 => Ok(Phase::Zero),
            1 => Ok(Phase::Pi),
            other => Err(StoreError::InvalidData(format!(
                "phase byte {other} in pattern of '{id}'"
            ))),
        })
        .collect()
}
