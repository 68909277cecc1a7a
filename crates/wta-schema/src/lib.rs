//! Shared types and wire format for the WTA store.
//!
//! A package archive is a zip container with a `.wta` extension. Its
//! metadata lives in a fixed-name JSON entry ([`METADATA_ENTRY`]) and names
//! an icon entry stored alongside it in the same archive.

pub mod types;

// Re-exports
pub use types::*;

/// Name of the metadata entry inside every package archive.
pub const METADATA_ENTRY: &str = "app_mdata.json";

/// File extension (without the dot) that marks a package archive.
pub const PACKAGE_EXTENSION: &str = "wta";

/// Icon entry looked up when the metadata does not name one.
pub const DEFAULT_ICON: &str = "icon.png";

/// Icon name reported in listings when the metadata does not name one.
pub const LISTING_FALLBACK_ICON: &str = "unknown.png";

/// Returns `true` if `file_name` names a package archive (`*.wta`).
///
/// The check is a plain suffix match on the filename.
pub fn is_package_file_name(file_name: &str) -> bool {
    file_name
        .strip_suffix(PACKAGE_EXTENSION)
        .is_some_and(|stem| stem.ends_with('.'))
}
