//! Test helpers for building package archives in memory.

use std::io::{Cursor, Write};
use std::path::Path;

use zip::ZipWriter;
use zip::write::SimpleFileOptions;

/// Build a zip archive from `(entry name, contents)` pairs.
pub(crate) fn zip_bytes(entries: &[(&str, &[u8])]) -> Vec<u8> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    for (name, contents) in entries {
        writer
            .start_file(*name, SimpleFileOptions::default())
            .expect("start zip entry");
        writer.write_all(contents).expect("write zip entry");
    }
    writer.finish().expect("finish zip").into_inner()
}

/// Write a package archive into `dir` under `file`.
pub(crate) fn write_package(dir: &Path, file: &str, entries: &[(&str, &[u8])]) {
    std::fs::write(dir.join(file), zip_bytes(entries)).expect("write package");
}
