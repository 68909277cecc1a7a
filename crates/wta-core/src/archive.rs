//! Package archive reader.
//!
//! Opens a `.wta` zip container held in memory, parses its
//! `app_mdata.json` entry, and pulls named entries out of it.

use std::io::{Cursor, Read};

use thiserror::Error;
use zip::ZipArchive;
use zip::result::ZipError;

use wta_schema::{METADATA_ENTRY, PackageMetadata};

/// Errors raised while reading a package archive.
#[derive(Error, Debug)]
pub enum ArchiveError {
    /// The bytes are not a readable zip container.
    #[error("Archive error: {0}")]
    Zip(#[from] ZipError),

    /// An entry could not be decompressed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The metadata entry exists but is not valid JSON.
    #[error("Malformed {METADATA_ENTRY}: {0}")]
    MalformedMetadata(#[from] serde_json::Error),
}

/// An opened package archive backed by a borrowed byte buffer.
#[derive(Debug)]
pub struct PackageArchive<'a> {
    zip: ZipArchive<Cursor<&'a [u8]>>,
}

impl<'a> PackageArchive<'a> {
    /// Open `bytes` as a zip container.
    ///
    /// # Errors
    ///
    /// Returns [`ArchiveError::Zip`] if the bytes are not a valid zip archive.
    pub fn open(bytes: &'a [u8]) -> Result<Self, ArchiveError> {
        let zip = ZipArchive::new(Cursor::new(bytes))?;
        Ok(Self { zip })
    }

    /// Parse the metadata entry.
    ///
    /// `Ok(None)` means the archive has no metadata entry at all. A present
    /// but unparsable entry is an error, never `None`.
    ///
    /// # Errors
    ///
    /// Returns [`ArchiveError::MalformedMetadata`] if the entry is not valid
    /// JSON, or a zip/IO error if it cannot be decompressed.
    pub fn metadata(&mut self) -> Result<Option<PackageMetadata>, ArchiveError> {
        let Some(raw) = self.entry(METADATA_ENTRY)? else {
            return Ok(None);
        };
        Ok(Some(PackageMetadata::from_slice(&raw)?))
    }

    /// Decompress the entry named exactly `name`.
    ///
    /// # Errors
    ///
    /// Returns an error if the entry exists but cannot be decompressed.
    pub fn entry(&mut self, name: &str) -> Result<Option<Vec<u8>>, ArchiveError> {
        let mut file = match self.zip.by_name(name) {
            Ok(file) => file,
            Err(ZipError::FileNotFound) => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let mut buf = Vec::new();
        file.read_to_end(&mut buf)?;
        Ok(Some(buf))
    }

    /// Names of every entry in the archive, in central directory order.
    pub fn entry_names(&self) -> impl Iterator<Item = &str> {
        self.zip.file_names()
    }
}

/// Read the metadata document from raw archive bytes.
///
/// # Errors
///
/// See [`PackageArchive::open`] and [`PackageArchive::metadata`].
pub fn read_metadata(archive_bytes: &[u8]) -> Result<Option<PackageMetadata>, ArchiveError> {
    PackageArchive::open(archive_bytes)?.metadata()
}

/// Read the decompressed bytes of `entry_name` from raw archive bytes.
///
/// # Errors
///
/// See [`PackageArchive::open`] and [`PackageArchive::entry`].
pub fn read_entry(archive_bytes: &[u8], entry_name: &str) -> Result<Option<Vec<u8>>, ArchiveError> {
    PackageArchive::open(archive_bytes)?.entry(entry_name)
}
