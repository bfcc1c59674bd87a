use thiserror::Error;

/// Base URL players are sent to when the hiscores lookup fails.
pub const HISCORES_FALLBACK_URL: &str = "https://wiseoldman.net/players";

/// Unified error type for the entire osrs-profit-core library.
/// Every public function returns `Result<T, CoreError>`.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Storage / File ──────────────────────────────────────────────
    #[error("Invalid file format: {0}")]
    InvalidFileFormat(String),

    #[error("Unsupported file version: {0}")]
    UnsupportedVersion(u16),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    #[error("File I/O error: {0}")]
    FileIO(String),

    // ── API / Network ───────────────────────────────────────────────
    #[error("API error ({provider}): {message}")]
    Api {
        provider: String,
        message: String,
    },

    #[error("Network error: {0}")]
    Network(String),

    #[error("No data source configured")]
    NoSource,

    #[error("Invalid data location: {0}")]
    InvalidLocation(String),

    // ── Hiscores ────────────────────────────────────────────────────
    /// The one failure that is meant to reach the user verbatim.
    #[error("{message}")]
    Hiscores { player: String, message: String },

    // ── Business Logic ──────────────────────────────────────────────
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

impl CoreError {
    /// Manual-update link for a failed hiscores lookup.
    /// `None` for every other error.
    pub fn fallback_url(&self) -> Option<String> {
        match self {
            CoreError::Hiscores { player, .. } => player_url(HISCORES_FALLBACK_URL, player),
            _ => None,
        }
    }

    /// Full text for a hiscores failure: the reason plus where to go instead.
    pub fn user_message(&self) -> String {
        match self.fallback_url() {
            Some(link) => format!(
                "{self}\nPlease visit {link} to manually update your hiscores data."
            ),
            None => self.to_string(),
        }
    }
}

/// Append `player` to `base` as a single percent-encoded path segment.
pub(crate) fn player_url(base: &str, player: &str) -> Option<String> {
    let mut url = url::Url::parse(base).ok()?;
    url.path_segments_mut().ok()?.pop_if_empty().push(player);
    Some(url.to_string())
}

// ── Conversion helpers (From impls) ─────────────────────────────────

impl From<std::io::Error> for CoreError {
    fn from(e: std::io::Error) -> Self {
        CoreError::FileIO(e.to_string())
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::Deserialization(e.to_string())
    }
}

impl From<url::ParseError> for CoreError {
    fn from(e: url::ParseError) -> Self {
        CoreError::InvalidLocation(e.to_string())
    }
}

impl From<reqwest::Error> for CoreError {
    fn from(e: reqwest::Error) -> Self {
        // Strip query parameters: cache URLs may carry access tokens.
        let msg = e.to_string();
        let sanitized = if let Some(idx) = msg.find('?') {
            format!("{}?<query redacted>", &msg[..idx])
        } else {
            msg
        };
        CoreError::Network(sanitized)
    }
}
