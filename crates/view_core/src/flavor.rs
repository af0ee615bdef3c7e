//! List, tree and icon flavors
//!
//! A flavor decides how items are presented and what extra state its kind
//! carries; everything else is shared by `DataView`.

use crate::column::dedupe_columns;
use crate::{Column, Item, Metrics, Presentation, ViewConfig, ViewKind};
use view_fs::SortDir;

pub trait Flavor: Send {
    fn from_config(config: &ViewConfig) -> Self
    where
        Self: Sized;

    fn kind(&self) -> ViewKind;

    /// Presentation for an item, `None` if it cannot be rendered
    fn present(&self, item: &Item) -> Option<Presentation>;

    /// Height of the sticky header above the rows
    fn header_height(&self, _metrics: &Metrics) -> i32 {
        0
    }

    /// Whether item `entries` become child rows
    fn nests(&self) -> bool {
        false
    }

    fn default_expanded(&self) -> bool {
        false
    }
}

fn label_presentation(item: &Item) -> Presentation {
    Presentation::Label {
        label: item.label.clone().unwrap_or_default(),
        icon: item.icon.clone(),
    }
}

/// Flat list with column headers
#[derive(Debug, Clone, Default)]
pub struct ListFlavor {
    pub(crate) columns: Vec<Column>,
    pub(crate) sort_by: Option<String>,
    pub(crate) sort_dir: Option<SortDir>,
}

impl ListFlavor {
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub(crate) fn set_columns(&mut self, columns: Vec<Column>) {
        self.columns = dedupe_columns(columns);
        if let Some(sorted) = self.columns.iter().find(|c| c.sort_dir.is_some()) {
            self.sort_by = sorted.sort_by.clone();
            self.sort_dir = sorted.sort_dir;
        }
    }
}

impl Flavor for ListFlavor {
    fn from_config(config: &ViewConfig) -> Self {
        let mut flavor = Self::default();
        flavor.set_columns(config.columns.clone());
        flavor
    }

    fn kind(&self) -> ViewKind {
        ViewKind::List
    }

    fn present(&self, item: &Item) -> Option<Presentation> {
        match &item.columns {
            Some(cells) => Some(Presentation::Columns(cells.clone())),
            None if !self.columns.is_empty() => {
                Some(Presentation::Columns(item.cells_from_payload(&self.columns)))
            }
            None => None,
        }
    }

    fn header_height(&self, metrics: &Metrics) -> i32 {
        if self.columns.is_empty() {
            0
        } else {
            metrics.header_height
        }
    }
}

/// Hierarchical rows with expand/collapse
#[derive(Debug, Clone, Default)]
pub struct TreeFlavor {
    expanded: bool,
}

impl Flavor for TreeFlavor {
    fn from_config(config: &ViewConfig) -> Self {
        Self {
            expanded: config.expanded,
        }
    }

    fn kind(&self) -> ViewKind {
        ViewKind::Tree
    }

    fn present(&self, item: &Item) -> Option<Presentation> {
        Some(label_presentation(item))
    }

    fn nests(&self) -> bool {
        true
    }

    fn default_expanded(&self) -> bool {
        self.expanded
    }
}

/// Icon grid
#[derive(Debug, Clone, Copy, Default)]
pub struct IconFlavor;

impl Flavor for IconFlavor {
    fn from_config(_config: &ViewConfig) -> Self {
        Self
    }

    fn kind(&self) -> ViewKind {
        ViewKind::Icon
    }

    fn present(&self, item: &Item) -> Option<Presentation> {
        Some(label_presentation(item))
    }
}
