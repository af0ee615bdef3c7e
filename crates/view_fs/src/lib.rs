//! DataView File System Collaborator
//!
//! Supplies directory listings to the file view:
//! - FileEntry: serializable directory entry
//! - Scanning with hidden/type/mime filters and sorting
//! - Scanner: asynchronous scan interface (worker thread or inline)
//! - Mime lookup and display formatting helpers

mod entry;
mod format;
mod mime;
mod scan;
mod scanner;

pub use entry::{EntryType, FileEntry};
pub use format::{format_timestamp, human_file_size};
pub use mime::{extension, guess_mime, mime_for_extension, strip_known_extension};
pub use scan::{
    filter_entries, is_root, list_directory, parent_path, sort_entries, MimeFilter, ScanOptions,
    ScanSummary, SortBy, SortDir,
};
pub use scanner::{InlineScanner, LocalScanner, ScanReply, Scanner};

use thiserror::Error;

/// File system errors
#[derive(Error, Debug)]
pub enum FsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Path not found: {0}")]
    NotFound(String),

    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("Scanner unavailable: {0}")]
    Unavailable(String),
}

pub type Result<T> = std::result::Result<T, FsError>;
