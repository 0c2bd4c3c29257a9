use std::fs;
use std::path::Path;

use hm_core::{IndexConfig, IndexSnapshot, ResonanceScorer};

use crate::error::{Result, StoreError};
use crate::store::Store;

impl Store {
    /// Replace the stored index with a JSON snapshot file.
    pub fn import_json_file(&self, path: &Path, config: &IndexConfig) -> Result<()> {
        let json = fs::read_to_string(path)?;
        self.import_json_str(&json, config)
    }

    /// Validates the snapshot against `config` before anything is written,
    /// so a snapshot the collection could not load is never stored.
    pub fn import_json_str(&self, json: &str, config: &IndexConfig) -> Result<()> {
        let snapshot: IndexSnapshot = serde_json::from_str(json)
            .map_err(|e| StoreError::InvalidData(format!("invalid JSON: {e}")))?;
        let index = snapshot.into_index(config.clone(), ResonanceScorer::default())?;
        self.save_index(&index)
    }

    pub fn export_json_file(&self, path: &Path) -> Result<()> {
        let json = self.export_json_string()?;
        fs::write(path, json)?;
        Ok(())
    }

    pub fn export_json_string(&self) -> Result<String> {
        let snapshot = self.load_snapshot()?;
        serde_json::to_string_pretty(&snapshot)
            .map_err(|e| StoreError::InvalidData(format!("JSON export failed: {e}")))
    }
}
