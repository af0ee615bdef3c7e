//! View error types

use thiserror::Error;
use view_fs::FsError;

/// Errors surfaced by views and the file view delegate
#[derive(Error, Debug)]
pub enum ViewError {
    // ===== Recoverable (rows untouched, caller notified) =====
    #[error("Scan of {path} failed: {source}")]
    Scan {
        path: String,
        #[source]
        source: FsError,
    },

    #[error("Superseded scan result for {0}")]
    Stale(String),

    // ===== Setup errors =====
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unknown view kind: {0}")]
    UnknownKind(String),
}

impl ViewError {
    pub fn scan(path: impl Into<String>, source: FsError) -> Self {
        ViewError::Scan {
            path: path.into(),
            source,
        }
    }

    /// Is this error recoverable?
    pub fn is_recoverable(&self) -> bool {
        matches!(self, ViewError::Scan { .. } | ViewError::Stale(_))
    }

    /// Get a user-friendly message
    pub fn user_message(&self) -> String {
        match self {
            ViewError::Scan { path, source: FsError::NotFound(_) } => {
                format!("Folder not found: {}", path)
            }
            ViewError::Scan { path, .. } => format!("Cannot open folder: {}", path),
            _ => self.to_string(),
        }
    }
}

impl From<toml::de::Error> for ViewError {
    fn from(e: toml::de::Error) -> Self {
        ViewError::Config(e.to_string())
    }
}
