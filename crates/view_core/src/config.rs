//! View configuration

use crate::{Column, Metrics, ViewError};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use view_fs::{EntryType, ScanOptions, SortBy, SortDir};

/// Concrete view flavor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ViewKind {
    #[default]
    #[serde(rename = "list", alias = "list-view", alias = "gui-list-view")]
    List,
    #[serde(rename = "tree", alias = "tree-view", alias = "gui-tree-view")]
    Tree,
    #[serde(rename = "icon", alias = "icon-view", alias = "gui-icon-view")]
    Icon,
}

impl ViewKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ViewKind::List => "list",
            ViewKind::Tree => "tree",
            ViewKind::Icon => "icon",
        }
    }

    /// Icon size used for file rows of this kind
    pub fn icon_size(self) -> &'static str {
        match self {
            ViewKind::Icon => "32x32",
            ViewKind::List | ViewKind::Tree => "16x16",
        }
    }
}

impl fmt::Display for ViewKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ViewKind {
    type Err = ViewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_lowercase();
        let name = name.strip_prefix("gui-").unwrap_or(&name);
        let name = name.strip_suffix("-view").unwrap_or(name);
        match name {
            "list" => Ok(ViewKind::List),
            "tree" => Ok(ViewKind::Tree),
            "icon" => Ok(ViewKind::Icon),
            _ => Err(ViewError::UnknownKind(s.to_string())),
        }
    }
}

/// How the icon grid infers its row size from row offsets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RowSizeStrategy {
    /// Count every row sharing the first row's top offset
    #[default]
    #[serde(rename = "count-matching")]
    CountMatching,
    /// Count the leading run of rows sharing the first row's top offset
    #[serde(rename = "stop-at-first-mismatch")]
    StopAtFirstMismatch,
}

/// Settings shared by list, tree and icon views
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    pub kind: ViewKind,
    /// List columns, in display order
    pub columns: Vec<Column>,
    pub multiple_select: bool,
    pub single_click_activates: bool,
    pub draggable: bool,
    pub draggable_type: Option<String>,
    /// Owning window, used as the default drag source
    pub window_id: Option<u64>,
    /// Initial expanded state of tree rows
    pub expanded: bool,
    pub row_size_strategy: RowSizeStrategy,
    pub row_height: i32,
    pub header_height: i32,
    pub icon_cell_width: i32,
    pub icon_cell_height: i32,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            kind: ViewKind::List,
            columns: Vec::new(),
            multiple_select: true,
            single_click_activates: false,
            draggable: false,
            draggable_type: None,
            window_id: None,
            expanded: false,
            row_size_strategy: RowSizeStrategy::CountMatching,
            row_height: 20,
            header_height: 22,
            icon_cell_width: 80,
            icon_cell_height: 72,
        }
    }
}

impl ViewConfig {
    pub fn with_kind(kind: ViewKind) -> Self {
        Self {
            kind,
            ..Default::default()
        }
    }

    pub fn metrics(&self) -> Metrics {
        Metrics {
            row_height: self.row_height,
            header_height: self.header_height,
            cell_width: self.icon_cell_width,
            cell_height: self.icon_cell_height,
        }
    }
}

/// File view settings, forwarded to the scanner
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileViewConfig {
    pub view: ViewConfig,
    /// Show dotfiles
    pub dotfiles: bool,
    /// Show known file extensions
    pub extensions: bool,
    /// Mime regexes applied to files
    pub filter: Vec<String>,
    pub filetype: Option<EntryType>,
    pub sort_by: Option<SortBy>,
    pub sort_dir: SortDir,
    /// Ignore `columns` and use the built-in column set
    pub default_columns: bool,
    /// List column keys: filename, mime, mtime, ctime, size
    pub columns: Vec<String>,
    pub default_path: String,
    pub icon_theme: String,
}

impl Default for FileViewConfig {
    fn default() -> Self {
        Self {
            view: ViewConfig::default(),
            dotfiles: false,
            extensions: true,
            filter: Vec::new(),
            filetype: None,
            sort_by: None,
            sort_dir: SortDir::Ascending,
            default_columns: false,
            columns: default_file_columns(),
            default_path: "/".to_string(),
            icon_theme: "default".to_string(),
        }
    }
}

pub(crate) fn default_file_columns() -> Vec<String> {
    vec!["filename".into(), "mime".into(), "size".into()]
}

impl FileViewConfig {
    /// Load configuration from file
    pub fn load() -> anyhow::Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config = Self::from_toml_str(&content)?;
            tracing::info!("Configuration loaded from {:?}", config_path);
            Ok(config)
        } else {
            tracing::info!("Using default configuration");
            Ok(Self::default())
        }
    }

    /// Save configuration to file
    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;

        tracing::info!("Configuration saved to {:?}", config_path);
        Ok(())
    }

    /// Get the configuration file path
    pub fn config_path() -> PathBuf {
        ProjectDirs::from("com", "DataView", "DataView")
            .map(|dirs| dirs.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("./config.toml"))
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ViewError> {
        Ok(toml::from_str(content)?)
    }

    /// Column keys in effect for list headers and cells
    pub fn column_keys(&self) -> Vec<String> {
        if self.default_columns || self.columns.is_empty() {
            default_file_columns()
        } else {
            self.columns.clone()
        }
    }

    pub fn scan_options(&self) -> ScanOptions {
        ScanOptions {
            show_hidden: self.dotfiles,
            mime_filter: self.filter.clone(),
            type_filter: self.filetype,
            sort_by: self.sort_by,
            sort_dir: self.sort_dir,
        }
    }
}
