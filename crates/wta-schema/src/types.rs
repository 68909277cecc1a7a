//! Package metadata and listing records.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::LISTING_FALLBACK_ICON;

/// Parsed contents of a package's `app_mdata.json` entry.
///
/// The document is kept as loose JSON: only `name`, `description` and
/// `icon` are ever consulted, unknown fields are ignored, and a field that
/// is missing, empty, or not a string reads as absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PackageMetadata(Value);

impl PackageMetadata {
    /// Parses a metadata document from raw bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if the bytes are not valid UTF-8 JSON.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes).map(Self)
    }

    /// Display name of the application.
    pub fn name(&self) -> Option<&str> {
        self.string_field("name")
    }

    /// Short human-readable description.
    pub fn description(&self) -> Option<&str> {
        self.string_field("description")
    }

    /// Archive entry name of the application icon.
    pub fn icon(&self) -> Option<&str> {
        self.string_field("icon")
    }

    fn string_field(&self, key: &str) -> Option<&str> {
        self.0
            .get(key)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    }
}

impl From<Value> for PackageMetadata {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

/// One application as reported by the store listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingEntry {
    /// Display name (falls back to the archive filename).
    pub name: String,
    /// Description (falls back to an empty string).
    pub description: String,
    /// Icon entry name (falls back to `unknown.png`).
    pub icon: String,
    /// Filename of the package archive within the package directory.
    pub file: String,
}

impl ListingEntry {
    /// Builds a listing entry for the archive `file` from its metadata.
    pub fn from_metadata(file: &str, metadata: &PackageMetadata) -> Self {
        Self {
            name: metadata.name().unwrap_or(file).to_string(),
            description: metadata.description().unwrap_or_default().to_string(),
            icon: metadata.icon().unwrap_or(LISTING_FALLBACK_ICON).to_string(),
            file: file.to_string(),
        }
    }
}
