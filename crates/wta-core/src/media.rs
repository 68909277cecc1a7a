//! Content-type inference from file extensions.

use std::path::Path;

/// Fallback for files whose type is unknown.
pub const OCTET_STREAM: &str = "application/octet-stream";

fn lowercase_extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
}

/// Media type for an icon entry name.
///
/// Only JPEG and SVG are told apart; everything else, including names
/// without an extension, is served as PNG.
pub fn icon_media_type(entry_name: &str) -> &'static str {
    match lowercase_extension(Path::new(entry_name)).as_deref() {
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("svg") => "image/svg+xml",
        _ => "image/png",
    }
}

/// Media type for a file served from disk.
pub fn static_media_type(path: &Path) -> &'static str {
    let Some(ext) = lowercase_extension(path) else {
        return OCTET_STREAM;
    };
    match ext.as_str() {
        "html" | "htm" => "text/html; charset=utf-8",
        "css" => "text/css; charset=utf-8",
        "js" | "mjs" => "text/javascript; charset=utf-8",
        "json" | "map" => "application/json",
        "txt" => "text/plain; charset=utf-8",
        "xml" => "application/xml",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        "ico" => "image/x-icon",
        "webp" => "image/webp",
        "woff" => "font/woff",
        "woff2" => "font/woff2",
        "ttf" => "font/ttf",
        "wasm" => "application/wasm",
        "wta" | "zip" => "application/zip",
        _ => OCTET_STREAM,
    }
}
