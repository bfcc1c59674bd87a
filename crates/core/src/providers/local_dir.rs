use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::errors::CoreError;
use crate::models::item::MappingEntry;
use crate::models::price::{PriceSnapshot, SnapshotWindow};
use crate::models::recipe::Recipe;
use crate::models::tax::TaxExemptSet;
use super::static_http::LastFetchedResponse;
use super::traits::{
    MarketDataSource, LAST_FETCHED_FILE, MAPPING_FILE, RECIPES_FILE, TAX_EXEMPT_FILE,
};

const PROVIDER: &str = "LocalDir";

/// Reads the same cache layout as `StaticHttpSource` from a directory on disk.
pub struct LocalDirSource {
    root: PathBuf,
}

impl LocalDirSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    async fn read_json<T: DeserializeOwned>(&self, file: &str) -> Result<T, CoreError> {
        let path = self.root.join(file);
        debug!(path = %path.display(), "reading cache file");

        let bytes = tokio::fs::read(&path).await.map_err(|e| {
            CoreError::FileIO(format!("{}: {e}", path.display()))
        })?;
        serde_json::from_slice(&bytes).map_err(|e| CoreError::Api {
            provider: PROVIDER.into(),
            message: format!("Failed to parse {file}: {e}"),
        })
    }
}

#[async_trait]
impl MarketDataSource for LocalDirSource {
    fn name(&self) -> &str {
        PROVIDER
    }

    async fn fetch_mapping(&self) -> Result<Vec<MappingEntry>, CoreError> {
        self.read_json(MAPPING_FILE).await
    }

    async fn fetch_snapshot(&self, window: SnapshotWindow) -> Result<PriceSnapshot, CoreError> {
        self.read_json(window.file_name()).await
    }

    async fn fetch_recipes(&self) -> Result<Vec<Recipe>, CoreError> {
        self.read_json(RECIPES_FILE).await
    }

    async fn fetch_tax_exempt(&self) -> Result<TaxExemptSet, CoreError> {
        self.read_json(TAX_EXEMPT_FILE).await
    }

    async fn fetch_last_fetched(&self) -> Result<DateTime<Utc>, CoreError> {
        let resp: LastFetchedResponse = self.read_json(LAST_FETCHED_FILE).await?;
        Ok(resp.last_fetched)
    }
}
