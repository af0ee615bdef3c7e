//! Directory entries as handed to views

use crate::{guess_mime, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

/// Kind of a directory entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
    File,
    Dir,
}

impl EntryType {
    pub fn as_str(self) -> &'static str {
        match self {
            EntryType::File => "file",
            EntryType::Dir => "dir",
        }
    }
}

/// A single scanned entry
///
/// Serialized as `{filename, path, mime, type, size, mtime, ctime, id}`; this is
/// the payload stored on file view rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    pub filename: String,
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime: Option<String>,
    #[serde(rename = "type")]
    pub entry_type: EntryType,
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub mtime: Option<i64>,
    #[serde(default)]
    pub ctime: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl FileEntry {
    /// Build an entry from a path on disk
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let metadata = fs::metadata(path)?;

        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.to_string_lossy().to_string());

        let entry_type = if metadata.is_dir() { EntryType::Dir } else { EntryType::File };
        let mime = match entry_type {
            EntryType::File => Some(guess_mime(&filename)),
            EntryType::Dir => None,
        };

        Ok(Self {
            filename,
            path: path.to_string_lossy().to_string(),
            mime,
            entry_type,
            size: if metadata.is_dir() { 0 } else { metadata.len() },
            mtime: unix_seconds(metadata.modified().ok()),
            ctime: unix_seconds(metadata.created().ok()),
            id: None,
        })
    }

    /// The `..` entry pointing at `parent`
    pub fn parent_link(parent: &str) -> Self {
        Self {
            filename: "..".to_string(),
            path: parent.to_string(),
            mime: None,
            entry_type: EntryType::Dir,
            size: 0,
            mtime: None,
            ctime: None,
            id: None,
        }
    }

    /// Synthetic entry, mostly for scanners that are not backed by a disk
    pub fn new(filename: &str, path: &str, entry_type: EntryType) -> Self {
        let mime = match entry_type {
            EntryType::File => Some(guess_mime(filename)),
            EntryType::Dir => None,
        };
        Self {
            filename: filename.to_string(),
            path: path.to_string(),
            mime,
            entry_type,
            size: 0,
            mtime: None,
            ctime: None,
            id: None,
        }
    }

    pub fn with_size(mut self, size: u64) -> Self {
        self.size = size;
        self
    }

    pub fn is_dir(&self) -> bool {
        self.entry_type == EntryType::Dir
    }

    pub fn is_parent_link(&self) -> bool {
        self.filename == ".."
    }

    /// Dotfiles: a leading `.` followed by a word character
    pub fn is_hidden(&self) -> bool {
        let mut chars = self.filename.chars();
        chars.next() == Some('.')
            && chars.next().map_or(false, |c| c.is_ascii_alphanumeric() || c == '_')
    }
}

fn unix_seconds(time: Option<SystemTime>) -> Option<i64> {
    time.and_then(|t| t.duration_since(UNIX_EPOCH).ok())
        .map(|d| d.as_secs() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hidden_detection() {
        assert!(FileEntry::new(".bashrc", "/home/.bashrc", EntryType::File).is_hidden());
        assert!(FileEntry::new("._x", "/._x", EntryType::File).is_hidden());
        assert!(!FileEntry::new("..", "/", EntryType::Dir).is_hidden());
        assert!(!FileEntry::new(".", "/", EntryType::Dir).is_hidden());
        assert!(!FileEntry::new("notes.txt", "/notes.txt", EntryType::File).is_hidden());
    }

    #[test]
    fn test_serialized_shape() {
        let entry = FileEntry::new("a.txt", "/a.txt", EntryType::File).with_size(12);
        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["type"], "file");
        assert_eq!(value["mime"], "text/plain");
        assert_eq!(value["size"], 12);
        assert!(value.get("id").is_none());
    }
}
