use crate::errors::CoreError;

use super::local_dir::LocalDirSource;
use super::static_http::StaticHttpSource;
use super::traits::MarketDataSource;

/// Ordered list of market data sources.
///
/// The first source is the primary; later ones are fallbacks tried in
/// registration order when an earlier one fails.
pub struct SourceRegistry {
    sources: Vec<Box<dyn MarketDataSource>>,
}

impl SourceRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            sources: Vec::new(),
        }
    }

    /// Build a registry for a configured data location.
    ///
    /// `http://` and `https://` locations are fetched over the network;
    /// anything else is treated as a local directory.
    pub fn from_location(location: &str) -> Result<Self, CoreError> {
        let trimmed = location.trim();
        if trimmed.is_empty() {
            return Err(CoreError::InvalidLocation("data location is empty".into()));
        }

        let mut registry = Self::new();
        if is_remote(trimmed) {
            registry.register(Box::new(StaticHttpSource::new(trimmed)?));
        } else {
            registry.register(Box::new(LocalDirSource::new(trimmed)));
        }
        Ok(registry)
    }

    /// Register another source at the lowest priority.
    pub fn register(&mut self, source: Box<dyn MarketDataSource>) {
        self.sources.push(source);
    }

    /// All sources, primary first.
    pub fn sources(&self) -> Vec<&dyn MarketDataSource> {
        self.sources.iter().map(|s| s.as_ref()).collect()
    }

    pub fn names(&self) -> Vec<String> {
        self.sources.iter().map(|s| s.name().to_string()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

impl Default for SourceRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn is_remote(location: &str) -> bool {
    let lower = location.to_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}
