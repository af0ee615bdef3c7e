//! List view columns

use serde::{Deserialize, Serialize};
use view_fs::SortDir;

/// Minimum width of any column in pixels
pub const MIN_COLUMN_WIDTH: u32 = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// A list view column header
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Column {
    /// Payload field rendered in this column; unique per view
    pub key: String,
    pub label: String,
    /// Fixed width in pixels, `None` lets the column flex
    pub width: Option<u32>,
    pub grow: u32,
    pub shrink: u32,
    pub visible: bool,
    pub resizable: bool,
    /// Sort key reported when the header is clicked
    pub sort_by: Option<String>,
    pub sort_dir: Option<SortDir>,
    pub text_align: TextAlign,
}

impl Default for Column {
    fn default() -> Self {
        Self {
            key: String::new(),
            label: String::new(),
            width: None,
            grow: 1,
            shrink: 1,
            visible: true,
            resizable: false,
            sort_by: None,
            sort_dir: None,
            text_align: TextAlign::Left,
        }
    }
}

impl Column {
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            ..Default::default()
        }
    }

    pub fn with_width(mut self, width: u32) -> Self {
        self.width = Some(width);
        self
    }

    pub fn resizable(mut self) -> Self {
        self.resizable = true;
        self
    }

    /// Make the header clickable for sorting by this column's key
    pub fn sortable(mut self) -> Self {
        self.sort_by = Some(self.key.clone());
        self
    }

    pub fn align(mut self, text_align: TextAlign) -> Self {
        self.text_align = text_align;
        self
    }
}

/// Insert columns in order; a repeated key replaces the earlier column in place
pub(crate) fn dedupe_columns(columns: Vec<Column>) -> Vec<Column> {
    let mut result: Vec<Column> = Vec::with_capacity(columns.len());
    for column in columns {
        match result.iter_mut().find(|c| c.key == column.key) {
            Some(existing) => *existing = column,
            None => result.push(column),
        }
    }
    result
}
