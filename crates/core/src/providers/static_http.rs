use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use crate::errors::CoreError;
use crate::models::item::MappingEntry;
use crate::models::price::{PriceSnapshot, SnapshotWindow};
use crate::models::recipe::Recipe;
use crate::models::tax::TaxExemptSet;
use super::traits::{
    MarketDataSource, LAST_FETCHED_FILE, MAPPING_FILE, RECIPES_FILE, TAX_EXEMPT_FILE,
};

const PROVIDER: &str = "StaticHttp";

/// Reads the pre-built JSON cache from a web server.
///
/// - **Layout**: `<base>/mapping.json`, `<base>/latest.json`, `<base>/5m.json` …
///   `<base>/24h.json`, `<base>/recipes.json`, `<base>/taxExemptItems.json`,
///   `<base>/last_fetched.json`.
/// - **Auth**: none.
pub struct StaticHttpSource {
    client: Client,
    base_url: Url,
}

impl StaticHttpSource {
    /// `base_url` is the directory holding the cache files; a trailing slash
    /// is added if missing so file names join under it.
    pub fn new(base_url: &str) -> Result<Self, CoreError> {
        let normalized = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_else(|_| Client::new());
        Ok(Self {
            client,
            base_url: Url::parse(&normalized)?,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    async fn get_json<T: DeserializeOwned>(&self, file: &str) -> Result<T, CoreError> {
        let url = self.base_url.join(file)?;
        debug!(%url, "fetching cache file");

        let resp = self.client.get(url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(CoreError::Api {
                provider: PROVIDER.into(),
                message: format!("{file} returned HTTP {status}"),
            });
        }

        resp.json().await.map_err(|e| CoreError::Api {
            provider: PROVIDER.into(),
            message: format!("Failed to parse {file}: {e}"),
        })
    }
}

// ── Cache file shapes ───────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct LastFetchedResponse {
    pub(crate) last_fetched: DateTime<Utc>,
}

#[async_trait]
impl MarketDataSource for StaticHttpSource {
    fn name(&self) -> &str {
        PROVIDER
    }

    async fn fetch_mapping(&self) -> Result<Vec<MappingEntry>, CoreError> {
        self.get_json(MAPPING_FILE).await
    }

    async fn fetch_snapshot(&self, window: SnapshotWindow) -> Result<PriceSnapshot, CoreError> {
        self.get_json(window.file_name()).await
    }

    async fn fetch_recipes(&self) -> Result<Vec<Recipe>, CoreError> {
        self.get_json(RECIPES_FILE).await
    }

    async fn fetch_tax_exempt(&self) -> Result<TaxExemptSet, CoreError> {
        self.get_json(TAX_EXEMPT_FILE).await
    }

    async fn fetch_last_fetched(&self) -> Result<DateTime<Utc>, CoreError> {
        let resp: LastFetchedResponse = self.get_json(LAST_FETCHED_FILE).await?;
        Ok(resp.last_fetched)
    }
}
