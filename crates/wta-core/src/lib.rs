//! Core library for the WTA store.
//!
//! Everything here is synchronous and blocking: callers on an async
//! runtime should hop onto a blocking thread before invoking it.

pub mod archive;
pub mod catalog;
pub mod media;
pub mod paths;

pub use archive::{ArchiveError, PackageArchive, read_entry, read_metadata};
pub use catalog::{CatalogError, IconAsset, list_apps, load_icon, resolve_package_file};
pub use wta_schema::{ListingEntry, PackageMetadata};

#[cfg(test)]
pub(crate) mod fixtures;
