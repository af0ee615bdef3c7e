//! Drag source registration

use parking_lot::Mutex;
use serde::Serialize;
use serde_json::{json, Value};
use std::sync::Arc;

/// What a draggable row hands to the drag transport
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DragSpec {
    #[serde(rename = "type")]
    pub drag_type: Option<String>,
    pub source: Option<Value>,
    pub payload: Option<Value>,
}

impl DragSpec {
    /// Default source for rows that do not name one
    pub fn window_source(window_id: Option<u64>) -> Option<Value> {
        window_id.map(|wid| json!({ "wid": wid }))
    }
}

/// Drag transport; only registration is consumed
pub trait DragRegistrar: Send {
    fn register(&mut self, position: usize, spec: DragSpec);
}

/// Keeps registrations in memory
#[derive(Debug, Clone, Default)]
pub struct DragLog {
    entries: Arc<Mutex<Vec<(usize, DragSpec)>>>,
}

impl DragLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<(usize, DragSpec)> {
        self.entries.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

impl DragRegistrar for DragLog {
    fn register(&mut self, position: usize, spec: DragSpec) {
        tracing::trace!("Drag source registered at {}", position);
        self.entries.lock().push((position, spec));
    }
}
