//! Row codec
//!
//! Items are what callers hand to a view; rows are what the view keeps.
//! The payload is stored as a JSON string on the row and decoded on demand.

use crate::Column;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Stable key used to match rows across patches
///
/// Compared by canonical string form, so `1` and `"1"` are the same identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Identity {
    Num(i64),
    Str(String),
}

impl Identity {
    /// Identity from a JSON scalar; other values carry no identity
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => n
                .as_i64()
                .map(Identity::Num)
                .or_else(|| Some(Identity::Str(n.to_string()))),
            Value::String(s) => Some(Identity::Str(s.clone())),
            _ => None,
        }
    }

    pub fn key(&self) -> String {
        match self {
            Identity::Num(n) => n.to_string(),
            Identity::Str(s) => s.clone(),
        }
    }
}

impl PartialEq for Identity {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Identity {}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key())
    }
}

impl From<i64> for Identity {
    fn from(n: i64) -> Self {
        Identity::Num(n)
    }
}

impl From<&str> for Identity {
    fn from(s: &str) -> Self {
        Identity::Str(s.to_string())
    }
}

impl From<String> for Identity {
    fn from(s: String) -> Self {
        Identity::Str(s)
    }
}

/// One list column cell
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Cell {
    pub label: String,
    pub icon: Option<String>,
}

impl Cell {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            icon: None,
        }
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }
}

/// Caller-side description of a row
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Item {
    pub id: Option<Identity>,
    /// Payload, stored as JSON
    pub value: Option<Value>,
    /// Pre-serialized payload, used verbatim instead of `value`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_value: Option<String>,
    pub label: Option<String>,
    pub icon: Option<String>,
    pub tooltip: Option<String>,
    /// Explicit list cells
    pub columns: Option<Vec<Cell>>,
    /// Tree children
    pub entries: Option<Vec<Item>>,
    pub draggable_type: Option<String>,
    pub draggable_source: Option<Value>,
    /// Tree only; falls back to the view default
    pub expanded: Option<bool>,
}

impl Item {
    pub fn new(value: Value) -> Self {
        Self {
            value: Some(value),
            ..Default::default()
        }
    }

    /// Child shown under unloaded tree directories
    pub fn placeholder() -> Self {
        Self::default().with_label("Loading...")
    }

    pub fn with_id(mut self, id: impl Into<Identity>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn with_tooltip(mut self, tooltip: impl Into<String>) -> Self {
        self.tooltip = Some(tooltip.into());
        self
    }

    pub fn with_columns(mut self, columns: Vec<Cell>) -> Self {
        self.columns = Some(columns);
        self
    }

    pub fn with_entries(mut self, entries: Vec<Item>) -> Self {
        self.entries = Some(entries);
        self
    }

    /// Explicit id, else the payload's `id` field
    pub fn identity(&self) -> Option<Identity> {
        self.id.clone().or_else(|| {
            self.payload()
                .as_ref()
                .and_then(|v| v.get("id"))
                .and_then(Identity::from_value)
        })
    }

    /// Payload as it will be stored on the row
    pub(crate) fn stored_value(&self) -> Option<String> {
        match (&self.raw_value, &self.value) {
            (Some(raw), _) => Some(raw.clone()),
            (None, Some(value)) => serde_json::to_string(value).ok(),
            (None, None) => None,
        }
    }

    fn payload(&self) -> Option<Value> {
        match &self.raw_value {
            Some(raw) => decode_payload(raw),
            None => self.value.clone(),
        }
    }

    /// One cell per column, taken from the payload field named by the column key
    pub(crate) fn cells_from_payload(&self, columns: &[Column]) -> Vec<Cell> {
        let payload = self.payload();
        columns
            .iter()
            .map(|column| {
                let label = payload
                    .as_ref()
                    .and_then(|v| v.get(&column.key))
                    .map(display_value)
                    .unwrap_or_default();
                Cell::new(label)
            })
            .collect()
    }
}

/// What a row displays
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Presentation {
    Columns(Vec<Cell>),
    Label { label: String, icon: Option<String> },
}

/// A rendered row
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub identity: Option<Identity>,
    /// Stored JSON payload
    pub value: Option<String>,
    pub presentation: Presentation,
    pub tooltip: Option<String>,
    /// Active (selected) marker
    pub active: bool,
    pub draggable_type: Option<String>,
    pub draggable_source: Option<Value>,
    pub expanded: bool,
    /// Children were loaded on demand
    pub was_rendered: bool,
}

impl Row {
    /// Build a row from an item and its resolved presentation
    pub fn from_item(item: &Item, presentation: Presentation, expanded: bool) -> Self {
        Self {
            identity: item.identity(),
            value: item.stored_value(),
            presentation,
            tooltip: item.tooltip.clone(),
            active: false,
            draggable_type: item.draggable_type.clone(),
            draggable_source: item.draggable_source.clone(),
            expanded: item.expanded.unwrap_or(expanded),
            was_rendered: false,
        }
    }

    /// Decoded payload; malformed JSON decodes to `None`
    pub fn payload(&self) -> Option<Value> {
        self.value.as_deref().and_then(decode_payload)
    }

    /// Hover text
    pub fn title(&self) -> Option<&str> {
        self.tooltip.as_deref()
    }

    /// Main label: the first cell for lists
    pub fn label(&self) -> &str {
        match &self.presentation {
            Presentation::Columns(cells) => cells.first().map(|c| c.label.as_str()).unwrap_or(""),
            Presentation::Label { label, .. } => label,
        }
    }

    pub fn icon(&self) -> Option<&str> {
        match &self.presentation {
            Presentation::Columns(cells) => cells.first().and_then(|c| c.icon.as_deref()),
            Presentation::Label { icon, .. } => icon.as_deref(),
        }
    }

    pub fn cells(&self) -> &[Cell] {
        match &self.presentation {
            Presentation::Columns(cells) => cells,
            Presentation::Label { .. } => &[],
        }
    }

    /// Match a row by value: position, identity, raw payload or decoded payload
    pub(crate) fn matches(&self, position: usize, wanted: &Value, key: Option<&str>) -> bool {
        let payload = self.payload();
        if let Some(key) = key {
            return payload
                .as_ref()
                .and_then(|v| v.get(key))
                .map_or(false, |field| value_matches(field, wanted));
        }

        if wanted.as_u64() == Some(position as u64) {
            return true;
        }
        if is_scalar(wanted) {
            let wanted = display_value(wanted);
            if self.identity.as_ref().map(Identity::key).as_deref() == Some(wanted.as_str())
                || self.value.as_deref() == Some(wanted.as_str())
            {
                return true;
            }
        }
        payload.as_ref() == Some(wanted)
    }
}

/// Decode a stored payload, logging malformed JSON
pub(crate) fn decode_payload(raw: &str) -> Option<Value> {
    match serde_json::from_str(raw) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!("Malformed row payload {:?}: {}", raw, e);
            None
        }
    }
}

/// Objects compare structurally, scalars by string form
pub(crate) fn value_matches(candidate: &Value, wanted: &Value) -> bool {
    if is_scalar(wanted) {
        is_scalar(candidate) && display_value(candidate) == display_value(wanted)
    } else {
        candidate == wanted
    }
}

fn is_scalar(value: &Value) -> bool {
    !matches!(value, Value::Object(_) | Value::Array(_))
}

/// Strings verbatim, other values stringified, null as empty
pub(crate) fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_identity_canonical_form() {
        assert_eq!(Identity::Num(1), Identity::Str("1".to_string()));
        assert_eq!(Identity::from_value(&json!(7)), Some(Identity::Num(7)));
        assert_eq!(Identity::from_value(&json!({"a": 1})), None);
    }

    #[test]
    fn test_identity_from_payload() {
        let item = Item::new(json!({"id": 3, "name": "c"}));
        assert_eq!(item.identity(), Some(Identity::Num(3)));

        let item = Item::new(json!({"id": 3})).with_id("x");
        assert_eq!(item.identity(), Some(Identity::from("x")));

        let item = Item::default().with_label("x");
        assert_eq!(item.identity(), None);
    }

    #[test]
    fn test_malformed_payload_decodes_to_none() {
        let item = Item {
            raw_value: Some("{not json".to_string()),
            ..Default::default()
        };
        let row = Row::from_item(&item, Presentation::Columns(vec![]), false);
        assert_eq!(row.value.as_deref(), Some("{not json"));
        assert_eq!(row.payload(), None);
    }

    #[test]
    fn test_cells_from_payload() {
        let columns = vec![
            Column::new("name", "Name"),
            Column::new("size", "Size"),
            Column::new("missing", "Missing"),
        ];
        let item = Item::new(json!({"name": "a", "size": 12}));
        let cells = item.cells_from_payload(&columns);
        let labels: Vec<_> = cells.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(labels, vec!["a", "12", ""]);
    }

    #[test]
    fn test_row_matching() {
        let item = Item::new(json!({"id": 5, "path": "/a", "meta": {"x": 1}}));
        let row = Row::from_item(&item, Presentation::Columns(vec![]), false);

        assert!(row.matches(0, &json!("/a"), Some("path")));
        assert!(row.matches(0, &json!("5"), Some("id")));
        assert!(row.matches(0, &json!({"x": 1}), Some("meta")));
        assert!(!row.matches(0, &json!("/b"), Some("path")));
        assert!(!row.matches(0, &json!("/a"), Some("nope")));

        assert!(row.matches(2, &json!(2), None));
        assert!(row.matches(0, &json!("5"), None));
        assert!(row.matches(0, &json!({"id": 5, "path": "/a", "meta": {"x": 1}}), None));
        assert!(!row.matches(1, &json!("6"), None));
    }

    #[test]
    fn test_item_deserializes_from_json() {
        let item: Item = serde_json::from_value(json!({
            "id": "docs",
            "label": "Docs",
            "value": {"path": "/docs"},
            "entries": [{"label": "Loading..."}]
        }))
        .unwrap();

        assert_eq!(item.identity(), Some(Identity::from("docs")));
        assert_eq!(item.entries.as_ref().map(Vec::len), Some(1));
    }
}
