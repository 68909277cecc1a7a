//! Package directory catalog.
//!
//! Scans the package directory on every call; nothing is cached between
//! calls, so the results always reflect what is on disk right now.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, warn};

use wta_schema::{DEFAULT_ICON, ListingEntry, is_package_file_name};

use crate::archive::{ArchiveError, PackageArchive, read_metadata};
use crate::media::icon_media_type;
use crate::paths::resolve_within;

/// Errors surfaced by catalog lookups.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// No package file with this name exists in the package directory.
    #[error("Package not found: {0}")]
    PackageNotFound(String),

    /// The package exists but does not contain its icon entry.
    #[error("Icon '{icon}' not found in package {package}")]
    IconNotFound {
        /// Package filename.
        package: String,
        /// Entry name that was looked up.
        icon: String,
    },

    /// The package could not be read as an archive.
    #[error(transparent)]
    Archive(#[from] ArchiveError),

    /// The package directory or a package file could not be read.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CatalogError {
    /// Whether this error means "nothing there" rather than "read failed".
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::PackageNotFound(_) | Self::IconNotFound { .. })
    }
}

/// An icon extracted from a package archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconAsset {
    /// Entry name inside the archive.
    pub name: String,
    /// Media type inferred from `name`.
    pub media_type: &'static str,
    /// Decompressed entry contents.
    pub bytes: Vec<u8>,
}

/// Resolve `name` to an existing regular file inside `packages_dir`.
pub fn resolve_package_file(packages_dir: &Path, name: &str) -> Option<PathBuf> {
    resolve_within(packages_dir, name)
        .filter(|path| path != packages_dir)
        .filter(|path| path.is_file())
}

/// List every package in `packages_dir` that carries a metadata entry.
///
/// Entries are ordered by filename. Packages without metadata are left out.
/// A package that cannot be read, or whose metadata is malformed, is skipped
/// with a warning so one bad file does not hide the rest of the store.
///
/// # Errors
///
/// Returns [`CatalogError::Io`] if `packages_dir` cannot be read.
pub fn list_apps(packages_dir: &Path) -> Result<Vec<ListingEntry>, CatalogError> {
    let mut files: Vec<String> = fs::read_dir(packages_dir)?
        .filter_map(std::result::Result::ok)
        .filter_map(|e| e.file_name().into_string().ok())
        .filter(|name| is_package_file_name(name))
        .filter(|name| packages_dir.join(name).is_file())
        .collect();
    files.sort();

    let mut apps = Vec::with_capacity(files.len());
    for file in &files {
        match read_listing_entry(&packages_dir.join(file), file) {
            Ok(Some(entry)) => apps.push(entry),
            Ok(None) => debug!(file = %file, "package has no metadata, skipping"),
            Err(e) => warn!(file = %file, error = %e, "failed to read package, skipping"),
        }
    }
    Ok(apps)
}

fn read_listing_entry(path: &Path, file: &str) -> Result<Option<ListingEntry>, ArchiveError> {
    let bytes = fs::read(path)?;
    let metadata = read_metadata(&bytes)?;
    Ok(metadata.map(|m| ListingEntry::from_metadata(file, &m)))
}

/// Extract the icon of package `file` from `packages_dir`.
///
/// The icon entry is the one named by the metadata's `icon` field, or
/// `icon.png` when the metadata is missing or does not name one.
///
/// # Errors
///
/// Returns [`CatalogError::PackageNotFound`] if the package file does not
/// exist, [`CatalogError::IconNotFound`] if the icon entry is missing, and
/// [`CatalogError::Archive`] / [`CatalogError::Io`] if the package cannot
/// be read.
pub fn load_icon(packages_dir: &Path, file: &str) -> Result<IconAsset, CatalogError> {
    let path = resolve_package_file(packages_dir, file)
        .ok_or_else(|| CatalogError::PackageNotFound(file.to_string()))?;
    let bytes = fs::read(&path)?;
    let mut archive = PackageArchive::open(&bytes)?;

    let icon = archive
        .metadata()?
        .and_then(|m| m.icon().map(str::to_string))
        .unwrap_or_else(|| DEFAULT_ICON.to_string());

    let Some(data) = archive.entry(&icon)? else {
        return Err(CatalogError::IconNotFound {
            package: file.to_string(),
            icon,
        });
    };

    Ok(IconAsset {
        media_type: icon_media_type(&icon),
        name: icon,
        bytes: data,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::write_package;
    use tempfile::TempDir;

    const FULL_METADATA: &[u8] =
        br#"{"name":"Notes","description":"Take notes","icon":"logo.svg"}"#;

    #[test]
    fn test_list_apps_reports_metadata_verbatim() {
        let dir = TempDir::new().unwrap();
        write_package(
            dir.path(),
            "notes.wta",
            &[("app_mdata.json", FULL_METADATA), ("logo.svg", b"<svg/>")],
        );

        let apps = list_apps(dir.path()).unwrap();
        assert_eq!(
            apps,
            vec![ListingEntry {
                name: "Notes".to_string(),
                description: "Take notes".to_string(),
                icon: "logo.svg".to_string(),
                file: "notes.wta".to_string(),
            }]
        );
    }

    #[test]
    fn test_list_apps_skips_packages_without_metadata() {
        let dir = TempDir::new().unwrap();
        write_package(dir.path(), "a.wta", &[("app_mdata.json", br#"{"name":"A"}"#)]);
        write_package(dir.path(), "b.wta", &[("icon.png", b"png")]);
        write_package(dir.path(), "c.wta", &[("app_mdata.json", b"{}")]);

        let apps = list_apps(dir.path()).unwrap();
        let files: Vec<_> = apps.iter().map(|a| a.file.as_str()).collect();
        assert_eq!(files, ["a.wta", "c.wta"]);
        assert_eq!(apps[1].name, "c.wta");
        assert_eq!(apps[1].icon, "unknown.png");
    }

    #[test]
    fn test_list_apps_ignores_other_files() {
        let dir = TempDir::new().unwrap();
        write_package(dir.path(), "app.zip", &[("app_mdata.json", b"{}")]);
        std::fs::write(dir.path().join("README.md"), "hello").unwrap();
        std::fs::create_dir(dir.path().join("folder.wta")).unwrap();

        assert!(list_apps(dir.path()).unwrap().is_empty());
    }

    #[test]
    fn test_list_apps_skips_broken_packages() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("corrupt.wta"), b"not a zip").unwrap();
        write_package(dir.path(), "malformed.wta", &[("app_mdata.json", b"{oops")]);
        write_package(dir.path(), "ok.wta", &[("app_mdata.json", FULL_METADATA)]);

        let apps = list_apps(dir.path()).unwrap();
        assert_eq!(apps.len(), 1);
        assert_eq!(apps[0].file, "ok.wta");
    }

    #[test]
    fn test_list_apps_is_sorted_and_repeatable() {
        let dir = TempDir::new().unwrap();
        for file in ["zeta.wta", "alpha.wta", "mid.wta"] {
            write_package(dir.path(), file, &[("app_mdata.json", b"{}")]);
        }

        let first = list_apps(dir.path()).unwrap();
        let second = list_apps(dir.path()).unwrap();
        assert_eq!(first, second);
        let files: Vec<_> = first.iter().map(|a| a.file.as_str()).collect();
        assert_eq!(files, ["alpha.wta", "mid.wta", "zeta.wta"]);
    }

    #[test]
    fn test_list_apps_missing_directory() {
        let dir = TempDir::new().unwrap();
        let err = list_apps(&dir.path().join("missing")).unwrap_err();
        assert!(matches!(err, CatalogError::Io(_)));
    }

    #[test]
    fn test_load_icon_from_metadata() {
        let dir = TempDir::new().unwrap();
        write_package(
            dir.path(),
            "notes.wta",
            &[("app_mdata.json", FULL_METADATA), ("logo.svg", b"<svg/>")],
        );

        let icon = load_icon(dir.path(), "notes.wta").unwrap();
        assert_eq!(icon.name, "logo.svg");
        assert_eq!(icon.media_type, "image/svg+xml");
        assert_eq!(icon.bytes, b"<svg/>");
    }

    #[test]
    fn test_load_icon_defaults_to_icon_png() {
        let dir = TempDir::new().unwrap();
        write_package(
            dir.path(),
            "plain.wta",
            &[("app_mdata.json", br#"{"name":"Plain"}"#), ("icon.png", b"png")],
        );
        write_package(dir.path(), "bare.wta", &[("icon.png", b"bare-png")]);

        let icon = load_icon(dir.path(), "plain.wta").unwrap();
        assert_eq!(icon.name, "icon.png");
        assert_eq!(icon.media_type, "image/png");

        let icon = load_icon(dir.path(), "bare.wta").unwrap();
        assert_eq!(icon.bytes, b"bare-png");
    }

    #[test]
    fn test_load_icon_not_found() {
        let dir = TempDir::new().unwrap();
        write_package(dir.path(), "noicon.wta", &[("app_mdata.json", br#"{"name":"X"}"#)]);

        let err = load_icon(dir.path(), "noicon.wta").unwrap_err();
        assert!(err.is_not_found());
        assert!(matches!(err, CatalogError::IconNotFound { ref icon, .. } if icon == "icon.png"));

        let err = load_icon(dir.path(), "does-not-exist.wta").unwrap_err();
        assert!(matches!(err, CatalogError::PackageNotFound(_)));
    }

    #[test]
    fn test_load_icon_rejects_paths_outside_directory() {
        let root = TempDir::new().unwrap();
        let packages = root.path().join("packages");
        std::fs::create_dir(&packages).unwrap();
        write_package(root.path(), "outside.wta", &[("icon.png", b"png")]);

        let err = load_icon(&packages, "../outside.wta").unwrap_err();
        assert!(matches!(err, CatalogError::PackageNotFound(_)));
        let err = load_icon(&packages, "").unwrap_err();
        assert!(matches!(err, CatalogError::PackageNotFound(_)));
    }

    #[test]
    fn test_load_icon_read_failures_are_not_not_found() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("corrupt.wta"), b"garbage").unwrap();
        write_package(dir.path(), "malformed.wta", &[("app_mdata.json", b"[")]);

        let err = load_icon(dir.path(), "corrupt.wta").unwrap_err();
        assert!(!err.is_not_found());
        assert!(matches!(err, CatalogError::Archive(ArchiveError::Zip(_))));

        let err = load_icon(dir.path(), "malformed.wta").unwrap_err();
        assert!(matches!(
            err,
            CatalogError::Archive(ArchiveError::MalformedMetadata(_))
        ));
    }
}
