//! View notifications

use crate::SlotId;
use serde::Serialize;
use serde_json::Value;
use view_fs::SortDir;

/// A row as reported to callers
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewEntry {
    pub position: usize,
    pub payload: Option<Value>,
}

/// Notifications queued by a view, drained with `take_events`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "lowercase")]
pub enum ViewEvent {
    Select {
        entries: Vec<ViewEntry>,
    },
    Activate {
        entries: Vec<ViewEntry>,
    },
    #[serde(rename = "contextmenu")]
    ContextMenu {
        entries: Vec<ViewEntry>,
        x: i32,
        y: i32,
    },
    /// A row was created
    Render {
        entry: ViewEntry,
    },
    Expand {
        entries: Vec<ViewEntry>,
        expanded: bool,
        node: SlotId,
    },
    Sort {
        sort_by: Option<String>,
        sort_dir: Option<SortDir>,
    },
    Drop {
        src: Value,
        dest: Option<Value>,
    },
}

impl ViewEvent {
    pub fn name(&self) -> &'static str {
        match self {
            ViewEvent::Select { .. } => "select",
            ViewEvent::Activate { .. } => "activate",
            ViewEvent::ContextMenu { .. } => "contextmenu",
            ViewEvent::Render { .. } => "render",
            ViewEvent::Expand { .. } => "expand",
            ViewEvent::Sort { .. } => "sort",
            ViewEvent::Drop { .. } => "drop",
        }
    }

    /// Rows carried by the event
    pub fn entries(&self) -> &[ViewEntry] {
        match self {
            ViewEvent::Select { entries }
            | ViewEvent::Activate { entries }
            | ViewEvent::ContextMenu { entries, .. }
            | ViewEvent::Expand { entries, .. } => entries,
            ViewEvent::Render { entry } => std::slice::from_ref(entry),
            ViewEvent::Sort { .. } | ViewEvent::Drop { .. } => &[],
        }
    }
}
