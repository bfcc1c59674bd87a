use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

use crate::errors::{player_url, CoreError};
use crate::models::settings::DEFAULT_HISCORES_URL;
use super::traits::{HiscoresProvider, RawSkillLevels};

/// Wise Old Man player lookup.
///
/// - **Free**: no API key.
/// - **Endpoint**: `GET /players/{username}`; the latest snapshot holds
///   every skill's level.
/// - **Errors**: an unknown player or a player without a snapshot is reported
///   as `CoreError::Hiscores`, which carries the manual-update link.
pub struct WiseOldManProvider {
    client: Client,
    base_url: Url,
}

impl WiseOldManProvider {
    pub fn new() -> Result<Self, CoreError> {
        Self::with_base_url(DEFAULT_HISCORES_URL)
    }

    pub fn with_base_url(base_url: &str) -> Result<Self, CoreError> {
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
}

// ── Wise Old Man API response types ─────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlayerResponse {
    latest_snapshot: Option<Snapshot>,
}

#[derive(Deserialize)]
struct Snapshot {
    data: SnapshotData,
}

#[derive(Deserialize)]
struct SnapshotData {
    skills: HashMap<String, SkillEntry>,
}

#[derive(Deserialize)]
struct SkillEntry {
    level: i64,
}

fn hiscores_error(player: &str, message: String) -> CoreError {
    CoreError::Hiscores {
        player: player.to_string(),
        message,
    }
}

#[async_trait]
impl HiscoresProvider for WiseOldManProvider {
    fn name(&self) -> &str {
        "WiseOldMan"
    }

    async fn fetch_levels(&self, player: &str) -> Result<RawSkillLevels, CoreError> {
        let url = player_url(self.base_url.join("players")?.as_str(), player)
            .ok_or_else(|| CoreError::InvalidLocation(self.base_url.to_string()))?;

        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| hiscores_error(player, CoreError::from(e).to_string()))?;

        if !resp.status().is_success() {
            return Err(hiscores_error(player, format!("Player \"{player}\" not found.")));
        }

        let body: PlayerResponse = resp.json().await.map_err(|e| {
            hiscores_error(player, format!("Failed to read hiscores for \"{player}\": {e}"))
        })?;

        let snapshot = body.latest_snapshot.ok_or_else(|| {
            hiscores_error(
                player,
                format!("No snapshot data found for player \"{player}\". Please update manually."),
            )
        })?;

        Ok(snapshot
            .data
            .skills
            .into_iter()
            .map(|(name, entry)| (name, entry.level))
            .collect())
    }
}
