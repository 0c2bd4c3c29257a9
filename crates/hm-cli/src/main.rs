use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use hm_core::{
    CategoryFilter, EmotionalState, HarmonicPreference, ItemMetadata, SearchContext, WaveError,
    WaveMemory,
};
use hm_store::CollectionStore;
use serde::{Deserialize, Serialize};

#[derive(Parser)]
#[command(name = "hm", about = "Harmonic memory: resonance-ranked similarity search")]
struct Cli {
    /// Collection to operate on
    #[arg(long, global = true)]
    collection: Option<String>,

    /// Enable verbose debug output
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Insert one embedding
    Insert {
        /// Item id (a fresh UUID when omitted)
        #[arg(long)]
        id: Option<String>,

        /// Embedding as a JSON array of numbers
        #[arg(long)]
        embedding: String,

        #[arg(long)]
        category: Option<String>,

        /// Short text shown with search results
        #[arg(long)]
        preview: Option<String>,

        /// Emotional valence in [-1, 1]
        #[arg(long, allow_hyphen_values = true)]
        valence: Option<f32>,
    },

    /// Ingest JSONL files, one {"id", "embedding", "metadata"} object per line
    Ingest {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Search by embedding
    Search {
        /// Query embedding as a JSON array of numbers
        #[arg(long)]
        embedding: String,

        #[arg(long, default_value_t = 5)]
        top_k: usize,

        /// Beam width (defaults to the configured ef_search)
        #[arg(long)]
        ef: Option<usize>,

        /// Emotional state: neutral, happy, raw, graceland, focused
        #[arg(long, default_value = "neutral")]
        mode: EmotionalState,

        /// Harmonic preference: octave, fifth, fourth, third, dissonant, any
        #[arg(long)]
        harmonic: Option<HarmonicPreference>,

        /// Only return items in these categories
        #[arg(long)]
        category: Vec<String>,

        /// Query valence in [-1, 1]; favors items whose valence agrees
        #[arg(long, allow_hyphen_values = true)]
        vibe: Option<f32>,

        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },

    /// Remove an item
    Remove { id: String },

    /// Show index statistics
    Stats,

    /// Drop removed items from the graph
    Compact,

    /// Export the collection to a JSON snapshot
    Export { path: PathBuf },

    /// Replace the collection with a JSON snapshot
    Import { path: PathBuf },
}

#[derive(Deserialize)]
struct IngestLine {
    id: Option<String>,
    embedding: Vec<f32>,
    #[serde(default)]
    metadata: ItemMetadata,
}

#[derive(Serialize)]
struct HitOutput<'a> {
    id: &'a str,
    score: f32,
    resonance: f32,
    metadata: &'a ItemMetadata,
}

fn open_store(cli: &Cli) -> Result<CollectionStore> {
    let base_dir = std::env::var("HM_DATA_DIR").ok().map(PathBuf::from);
    CollectionStore::open(cli.collection.as_deref(), base_dir.as_deref())
        .context("failed to open collection store")
}

fn load_memory(store: &CollectionStore) -> Result<WaveMemory> {
    store.load_memory().context("failed to load index")
}

fn parse_embedding(json: &str) -> Result<Vec<f32>> {
    serde_json::from_str(json).with_context(|| format!("embedding is not a JSON number array: {json}"))
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into())
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match &cli.command {
        Commands::Insert {
            id,
            embedding,
            category,
            preview,
            valence,
        } => {
            let metadata = ItemMetadata {
                category: category.clone(),
                text_preview: preview.clone(),
                valence: *valence,
                ..ItemMetadata::default()
            };
            cmd_insert(&cli, id.as_deref(), embedding, metadata)
        }
        Commands::Ingest { files } => cmd_ingest(&cli, files),
        Commands::Search {
            embedding,
            top_k,
            ef,
            mode,
            harmonic,
            category,
            vibe,
            json,
        } => {
            check_range("vibe", *vibe)?;
            let mut ctx = SearchContext::new().emotion(*mode);
            if let Some(h) = harmonic {
                ctx = ctx.harmonic(*h);
            }
            if !category.is_empty() {
                ctx = ctx.categories(CategoryFilter::new(category.iter().cloned()));
            }
            if let Some(v) = vibe {
                ctx = ctx.vibe(*v);
            }
            cmd_search(&cli, embedding, &ctx, *top_k, *ef, *json)
        }
        Commands::Remove { id } => cmd_remove(&cli, id),
        Commands::Stats => cmd_stats(&cli),
        Commands::Compact => cmd_compact(&cli),
        Commands::Export { path } => cmd_export(&cli, path),
        Commands::Import { path } => cmd_import(&cli, path),
    }
}

fn check_range(name: &str, value: Option<f32>) -> Result<()> {
    if let Some(v) = value
        && !(-1.0..=1.0).contains(&v)
    {
        bail!("{name} must be in [-1, 1], got {v}");
    }
    Ok(())
}

fn cmd_insert(cli: &Cli, id: Option<&str>, embedding: &str, metadata: ItemMetadata) -> Result<()> {
    check_range("valence", metadata.valence)?;
    let embedding = parse_embedding(embedding)?;
    let store = open_store(cli)?;
    let memory = load_memory(&store)?;

    let id = id
        .map(str::to_string)
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
    let replaced = memory
        .insert(&id, &embedding, metadata)
        .with_context(|| format!("failed to insert '{id}'"))?;
    store.save_memory(&memory).context("failed to save index")?;

    if replaced {
        println!("replaced {id}");
    } else {
        println!("inserted {id}");
    }
    Ok(())
}

fn cmd_ingest(cli: &Cli, files: &[PathBuf]) -> Result<()> {
    let store = open_store(cli)?;
    let memory = load_memory(&store)?;

    for path in files {
        let file = std::fs::File::open(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let mut inserted = 0usize;
        for (n, line) in BufReader::new(file).lines().enumerate() {
            let line = line.with_context(|| format!("failed to read {}", path.display()))?;
            if line.trim().is_empty() {
                continue;
            }
            let item: IngestLine = serde_json::from_str(&line)
                .with_context(|| format!("{}:{}: malformed line", path.display(), n + 1))?;
            check_range("valence", item.metadata.valence)
                .with_context(|| format!("{}:{}", path.display(), n + 1))?;
            let id = item
                .id
                .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
            let replaced = memory
                .insert(&id, &item.embedding, item.metadata)
                .with_context(|| format!("{}:{}: failed to insert '{id}'", path.display(), n + 1))?;
            if replaced {
                tracing::warn!("{}:{}: '{id}' replaced an existing item", path.display(), n + 1);
            }
            inserted += 1;
        }
        println!("ingested {} → {inserted} items", path.display());
    }

    store.save_memory(&memory).context("failed to save index")?;
    println!("done. items={}", memory.stats().item_count);
    Ok(())
}

fn cmd_search(
    cli: &Cli,
    embedding: &str,
    ctx: &SearchContext,
    top_k: usize,
    ef: Option<usize>,
    json: bool,
) -> Result<()> {
    let query = parse_embedding(embedding)?;
    let store = open_store(cli)?;
    let mut config = store.config().clone();
    if let Some(ef) = ef {
        config.index.ef_search = ef;
    }
    let memory = store
        .store()
        .load_memory(config)
        .context("failed to load index")?;

    let hits = match memory.search(&query, ctx, top_k) {
        Ok(hits) => hits,
        Err(WaveError::EmptyIndex) => {
            tracing::warn!("collection '{}' is empty", store.name());
            Vec::new()
        }
        Err(e) => return Err(e).context("search failed"),
    };

    store
        .save_strengths(&memory, hits.iter().map(|h| h.id.as_str()))
        .context("failed to save strengths")?;

    if json {
        let out: Vec<HitOutput<'_>> = hits
            .iter()
            .map(|h| HitOutput {
                id: &h.id,
                score: h.score,
                resonance: h.resonance,
                metadata: &h.metadata,
            })
            .collect();
        println!(
            "{}",
            serde_json::to_string_pretty(&out).context("failed to serialize results")?
        );
        return Ok(());
    }

    if hits.is_empty() {
        println!("(no results)");
        return Ok(());
    }
    for (rank, hit) in hits.iter().enumerate() {
        let mut line = format!(
            "{:>3}. {}  score={:.4}  resonance={:.4}",
            rank + 1,
            hit.id,
            hit.score,
            hit.resonance
        );
        if let Some(category) = &hit.metadata.category {
            line.push_str(&format!("  [{category}]"));
        }
        if let Some(preview) = &hit.metadata.text_preview {
            line.push_str(&format!("  {preview}"));
        }
        println!("{line}");
    }
    Ok(())
}

fn cmd_remove(cli: &Cli, id: &str) -> Result<()> {
    let store = open_store(cli)?;
    let memory = load_memory(&store)?;
    memory
        .remove(id)
        .with_context(|| format!("failed to remove '{id}'"))?;
    store.save_memory(&memory).context("failed to save index")?;
    println!("removed {id}");
    Ok(())
}

fn cmd_stats(cli: &Cli) -> Result<()> {
    let store = open_store(cli)?;
    let memory = load_memory(&store)?;
    let stats = memory.stats();

    println!("collection: {}", store.name());
    println!("items:      {}", stats.item_count);
    println!("layers:     {}", stats.layer_count);
    println!("avg_degree: {:.2}", stats.average_degree);
    println!("tombstones: {}", stats.tombstone_count);
    match stats.dimension {
        Some(d) => println!("dimension:  {d}"),
        None => println!("dimension:  -"),
    }
    Ok(())
}

fn cmd_compact(cli: &Cli) -> Result<()> {
    let store = open_store(cli)?;
    let memory = load_memory(&store)?;
    let removed = memory.compact();
    store.save_memory(&memory).context("failed to save index")?;
    println!("compacted: dropped {removed} tombstones");
    Ok(())
}

fn cmd_export(cli: &Cli, path: &Path) -> Result<()> {
    let store = open_store(cli)?;
    store
        .export_json_file(path)
        .with_context(|| format!("failed to export to {}", path.display()))?;
    println!("exported to {}", path.display());
    Ok(())
}

fn cmd_import(cli: &Cli, path: &Path) -> Result<()> {
    let store = open_store(cli)?;
    store
        .import_json_file(path)
        .with_context(|| format!("failed to import {}", path.display()))?;
    let memory = load_memory(&store).context("failed to load index after import")?;
    println!(
        "imported from {}. items={}",
        path.display(),
        memory.stats().item_count
    );
    Ok(())
}
