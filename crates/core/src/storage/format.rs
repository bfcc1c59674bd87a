use serde::{Deserialize, Serialize};

use crate::errors::CoreError;
use crate::models::settings::Settings;

/// Tag identifying a settings file written by this library.
pub const FORMAT_TAG: &str = "osrs-profit-settings";

/// Current file format version.
pub const CURRENT_VERSION: u16 = 1;

/// On-disk wrapper around `Settings`.
///
/// Layout:
/// ```text
/// {"format": "osrs-profit-settings", "version": 1, "settings": { ... }}
/// ```
#[derive(Debug, Serialize, Deserialize)]
pub struct SettingsEnvelope {
    pub format: String,
    pub version: u16,
    pub settings: Settings,
}

/// Header fields only, read before the body so a newer file fails with a
/// version error instead of a field error.
#[derive(Deserialize)]
struct Header {
    format: Option<String>,
    version: Option<u16>,
}

/// Serialize settings into a complete file.
pub fn write_file(settings: &Settings) -> Result<Vec<u8>, CoreError> {
    let envelope = SettingsEnvelope {
        format: FORMAT_TAG.to_string(),
        version: CURRENT_VERSION,
        settings: settings.clone(),
    };
    serde_json::to_vec_pretty(&envelope)
        .map_err(|e| CoreError::Serialization(format!("Failed to serialize settings: {e}")))
}

/// Parse and validate a settings file.
pub fn read_file(data: &[u8]) -> Result<Settings, CoreError> {
    let header: Header = serde_json::from_slice(data)
        .map_err(|e| CoreError::InvalidFileFormat(format!("Not a JSON settings file: {e}")))?;

    match header.format.as_deref() {
        Some(FORMAT_TAG) => {}
        Some(other) => {
            return Err(CoreError::InvalidFileFormat(format!(
                "Unexpected format tag '{other}'"
            )))
        }
        None => return Err(CoreError::InvalidFileFormat("Missing format tag".into())),
    }

    let version = header
        .version
        .ok_or_else(|| CoreError::InvalidFileFormat("Missing version".into()))?;
    if version == 0 || version > CURRENT_VERSION {
        return Err(CoreError::UnsupportedVersion(version));
    }

    let envelope: SettingsEnvelope = serde_json::from_slice(data)
        .map_err(|e| CoreError::Deserialization(format!("Failed to deserialize settings: {e}")))?;
    Ok(envelope.settings)
}
