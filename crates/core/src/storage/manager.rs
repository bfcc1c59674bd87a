use std::path::Path;

use crate::errors::CoreError;
use crate::models::settings::Settings;

use super::format;

/// High-level storage operations: save/load settings to/from bytes or files.
pub struct StorageManager;

impl StorageManager {
    /// Serialize settings to the versioned JSON format.
    pub fn save_to_bytes(settings: &Settings) -> Result<Vec<u8>, CoreError> {
        format::write_file(settings)
    }

    /// Parse settings from raw bytes.
    pub fn load_from_bytes(data: &[u8]) -> Result<Settings, CoreError> {
        format::read_file(data)
    }

    /// Save settings to a file, creating parent directories as needed.
    pub fn save_to_file(settings: &Settings, path: impl AsRef<Path>) -> Result<(), CoreError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let bytes = Self::save_to_bytes(settings)?;
        std::fs::write(path, bytes)?;
        Ok(())
    }

    /// Load settings from a file.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Settings, CoreError> {
        let bytes = std::fs::read(path)?;
        Self::load_from_bytes(&bytes)
    }

    /// Load settings from a file, or defaults if the file does not exist yet.
    /// A file that exists but cannot be parsed is still an error.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Settings, CoreError> {
        let path = path.as_ref();
        if path.exists() {
            Self::load_from_file(path)
        } else {
            Ok(Settings::default())
        }
    }
}
