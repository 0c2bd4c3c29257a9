use std::path::{Path, PathBuf};
use std::{env, fs};

use hm_core::{EngineConfig, WaveMemory};

use crate::error::{Result, StoreError};
use crate::store::Store;

pub const DEFAULT_COLLECTION: &str = "default";

/// Default base directory for all hm storage.
fn default_base_dir() -> PathBuf {
    dirs_home().join(".harmonic-memory")
}

fn dirs_home() -> PathBuf {
    env::var("HOME")
        .or_else(|_| env::var("USERPROFILE"))
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("."))
}

/// Sanitize a collection name for use as a filename.
fn sanitize_name(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Read `config.toml` from `base`. A missing file means defaults.
pub fn load_config(base: &Path) -> Result<EngineConfig> {
    let path = base.join("config.toml");
    let text = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Ok(EngineConfig::default());
        }
        Err(e) => return Err(e.into()),
    };
    let config: EngineConfig = toml::from_str(&text)
        .map_err(|e| StoreError::Config(format!("{}: {e}", path.display())))?;
    config
        .validate()
        .map_err(|e| StoreError::Config(format!("{}: {e}", path.display())))?;
    tracing::info!(path = %path.display(), "loaded engine config");
    Ok(config)
}

/// One named collection on disk plus the engine config shared by all
/// collections under the same base directory.
///
/// Layout:
/// ```text
/// ~/.harmonic-memory/
/// ├── config.toml
/// └── collections/
///     ├── default.db
///     └── <name>.db
/// ```
pub struct CollectionStore {
    store: Store,
    name: String,
    config: EngineConfig,
}

impl CollectionStore {
    /// `name`: collection name, `default` when absent.
    /// `base_dir`: override the base directory (for testing).
    pub fn open(name: Option<&str>, base_dir: Option<&Path>) -> Result<Self> {
        let base = base_dir.map(PathBuf::from).unwrap_or_else(default_base_dir);
        let collections_dir = base.join("collections");
        fs::create_dir_all(&collections_dir)?;

        let name = name
            .map(sanitize_name)
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| DEFAULT_COLLECTION.to_string());
        let config = load_config(&base)?;
        let store = Store::open(&collections_dir.join(format!("{name}.db")))?;

        Ok(Self {
            store,
            name,
            config,
        })
    }

    /// In-memory collection (for testing).
    pub fn open_in_memory(config: EngineConfig) -> Result<Self> {
        Ok(Self {
            store: Store::open_in_memory()?,
            name: "test".to_string(),
            config,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn load_memory(&self) -> Result<WaveMemory> {
        self.store.load_memory(self.config.clone())
    }

    pub fn save_memory(&self, memory: &WaveMemory) -> Result<()> {
        self.store.save_index(memory.index())
    }

    /// Persist the current strength of each listed id.
    pub fn save_strengths<'a>(
        &self,
        memory: &WaveMemory,
        ids: impl IntoIterator<Item = &'a str>,
    ) -> Result<()> {
        let strengths: Vec<(String, f64)> = ids
            .into_iter()
            .filter_map(|id| memory.index().strength(id).map(|s| (id.to_string(), s)))
            .collect();
        self.store.save_strengths(&strengths)
    }

    /// Import a snapshot, rejecting one that conflicts with this
    /// collection's index config.
    pub fn import_json_file(&self, path: &Path) -> Result<()> {
        self.store.import_json_file(path, &self.config.index)
    }

    pub fn export_json_file(&self, path: &Path) -> Result<()> {
        self.store.export_json_file(path)
    }
}
