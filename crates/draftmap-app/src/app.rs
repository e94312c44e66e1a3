//! Command-line host: load drafts, replay edits, stream render events.

use crate::sink::JsonLineSink;
use clap::Parser;
use draftmap_core::{
    DraftError, DraftStore, DraftStoreConfig, Feature, FeatureCollection, InitialNormalization,
};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Property marking an edit as a deletion of the draft with the same id.
pub const DELETED_KEY: &str = "deleted";

/// Application errors.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Failed to read {}: {source}", .path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: DraftError,
    },
    #[error("Failed to write render events: {0}")]
    Output(#[from] std::io::Error),
}

/// Result type for the application.
pub type AppResult<T> = Result<T, AppError>;

/// Command-line configuration.
#[derive(Debug, Clone, Parser)]
#[command(name = "draftmap")]
#[command(about = "Replay draft feature edits and print the render events a map would receive")]
pub struct AppConfig {
    /// GeoJSON FeatureCollection holding the initial drafts.
    pub initial: PathBuf,

    /// GeoJSON FeatureCollection of edits applied in order.
    pub edits: Option<PathBuf>,

    /// Only replay the initial drafts when the first one has coordinates.
    #[arg(long)]
    pub first_feature_heuristic: bool,
}

impl AppConfig {
    pub fn new(initial: impl Into<PathBuf>) -> Self {
        Self {
            initial: initial.into(),
            edits: None,
            first_feature_heuristic: false,
        }
    }

    fn store_config(&self) -> DraftStoreConfig {
        let normalization = if self.first_feature_heuristic {
            InitialNormalization::FirstFeatureHeuristic
        } else {
            InitialNormalization::Always
        };
        DraftStoreConfig { normalization }
    }
}

/// Read a feature collection from disk.
pub fn load_collection(path: &Path) -> AppResult<FeatureCollection> {
    let read = || -> Result<FeatureCollection, DraftError> {
        let json = fs::read_to_string(path)?;
        FeatureCollection::from_json(&json)
    };
    read().map_err(|source| AppError::Load {
        path: path.to_path_buf(),
        source,
    })
}

fn is_deletion(feature: &Feature) -> bool {
    feature
        .properties
        .get(DELETED_KEY)
        .and_then(|v| v.as_bool())
        .unwrap_or(false)
}

/// Run the host, writing one JSON line per render event to `out`.
///
/// Returns the writer once every event has been flushed.
pub fn run<W: Write>(config: &AppConfig, out: W) -> AppResult<W> {
    let initial = load_collection(&config.initial)?;
    let edits = match &config.edits {
        Some(path) => Some(load_collection(path)?),
        None => None,
    };

    log::info!(
        "Loaded {} initial drafts from {}",
        initial.len(),
        config.initial.display()
    );

    let mut store = DraftStore::with_config(
        JsonLineSink::new(out),
        initial.features,
        config.store_config(),
    );

    for feature in edits.map(|c| c.features).unwrap_or_default() {
        if !is_deletion(&feature) {
            store.update(feature);
            continue;
        }
        match feature.draft_id() {
            Some(id) => {
                if store.remove(&id).is_none() {
                    log::warn!("Cannot delete unknown draft {}", id);
                }
            }
            None => log::warn!("Ignoring deletion without a draft id"),
        }
    }

    store.render();
    log::info!(
        "Wrote {} render events for {} drafts",
        store.sink().written(),
        store.len()
    );

    Ok(store.into_sink().finish()?)
}
