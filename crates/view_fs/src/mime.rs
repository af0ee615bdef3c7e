//! Extension based mime lookup

use once_cell::sync::Lazy;
use std::collections::HashMap;

static MIME_MAP: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    let mut map = HashMap::new();

    // Text
    map.insert("txt", "text/plain");
    map.insert("md", "text/markdown");
    map.insert("csv", "text/csv");
    map.insert("html", "text/html");
    map.insert("htm", "text/html");
    map.insert("css", "text/css");
    map.insert("xml", "text/xml");
    map.insert("rs", "text/x-rust");
    map.insert("toml", "application/toml");
    map.insert("json", "application/json");
    map.insert("js", "application/javascript");
    map.insert("py", "application/x-python");
    map.insert("lua", "application/x-lua");

    // Documents & archives
    map.insert("pdf", "application/pdf");
    map.insert("zip", "application/zip");
    map.insert("gz", "application/gzip");
    map.insert("tar", "application/x-tar");

    // Images
    map.insert("png", "image/png");
    map.insert("jpg", "image/jpeg");
    map.insert("jpeg", "image/jpeg");
    map.insert("gif", "image/gif");
    map.insert("webp", "image/webp");
    map.insert("bmp", "image/bmp");
    map.insert("svg", "image/svg+xml");

    // Audio / video
    map.insert("mp3", "audio/mpeg");
    map.insert("ogg", "audio/ogg");
    map.insert("wav", "audio/wav");
    map.insert("mp4", "video/mp4");
    map.insert("webm", "video/webm");
    map.insert("mkv", "video/x-matroska");

    map
});

/// Extension after the last `.` (never the whole name of a dotfile)
pub fn extension(filename: &str) -> Option<&str> {
    match filename.rfind('.') {
        Some(0) | None => None,
        Some(idx) => Some(&filename[idx + 1..]).filter(|ext| !ext.is_empty()),
    }
}

/// Mime type for a known extension
pub fn mime_for_extension(ext: &str) -> Option<&'static str> {
    MIME_MAP.get(ext.to_lowercase().as_str()).copied()
}

/// Best guess for a file name, `application/octet-stream` when unknown
pub fn guess_mime(filename: &str) -> String {
    extension(filename)
        .and_then(mime_for_extension)
        .unwrap_or("application/octet-stream")
        .to_string()
}

/// Drop the extension if it maps to a known mime type
pub fn strip_known_extension(filename: &str) -> &str {
    match extension(filename) {
        Some(ext) if mime_for_extension(ext).is_some() => {
            &filename[..filename.len() - ext.len() - 1]
        }
        _ => filename,
    }
}
