//! # Catalog State
//!
//! The promotion snapshot and the item catalog. Read-only once loaded.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{info, warn};

use cartwise_core::{ingest, CartError, CatalogEntry, CatalogSnapshot, Item, ItemId, ModelError};

use crate::config::CatalogConfig;
use crate::sample::{sample_items, sample_promotions};

/// Catalog loading failures.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read promotion catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Promotion catalog {path} is not valid JSON: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Built-in sample catalog is malformed: {0}")]
    Sample(#[source] serde_json::Error),
}

/// Immutable catalog data shared by all commands.
#[derive(Debug, Clone)]
pub struct CatalogState {
    promotions: CatalogSnapshot,
    items: Vec<Item>,
}

impl CatalogState {
    pub fn new(promotions: CatalogSnapshot, items: Vec<Item>) -> Self {
        CatalogState { promotions, items }
    }

    /// Loads promotions from the configured file, or the sample catalog when
    /// no file is configured. Items are always the sample items.
    pub fn load(config: &CatalogConfig) -> Result<Self, CatalogError> {
        let entries = match &config.path {
            Some(path) => read_entries(path)?,
            None => {
                info!("No catalog path configured, using sample promotions");
                sample_promotions().map_err(CatalogError::Sample)?
            }
        };

        let promotions = ingest(&entries);
        if !promotions.rejected.is_empty() {
            warn!(
                rejected = promotions.rejected.len(),
                "Some catalog promotions were rejected"
            );
        }
        info!(promotions = promotions.promotions.len(), "Promotion catalog loaded");

        Ok(CatalogState::new(promotions, sample_items()))
    }

    pub fn promotions(&self) -> &CatalogSnapshot {
        &self.promotions
    }

    pub fn rejected(&self) -> &[ModelError] {
        &self.promotions.rejected
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn item(&self, id: ItemId) -> Result<&Item, CartError> {
        self.items
            .iter()
            .find(|i| i.id == id)
            .ok_or(CartError::UnknownItem(id))
    }
}

fn read_entries(path: &Path) -> Result<Vec<CatalogEntry>, CatalogError> {
    let contents = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&contents).map_err(|source| CatalogError::Json {
        path: path.to_path_buf(),
        source,
    })
}
