//! DataView Core
//!
//! This crate contains:
//! - Row model: items, identities, payload codec
//! - Row arena and the patch reconciler
//! - Selection, keyboard navigation, layout and scrolling
//! - List, tree and icon view flavors over one generic container
//! - File view: a data view fed by directory scans
//! - Configuration and error types

pub mod any_view;
pub mod arena;
pub mod column;
pub mod config;
pub mod drag;
pub mod error;
pub mod event;
pub mod file_view;
pub mod flavor;
pub mod icons;
pub mod item;
pub mod layout;
pub mod navigator;
pub mod reconcile;
pub mod selection;
pub mod view;

pub use any_view::AnyView;
pub use arena::{RowArena, SlotId};
pub use column::{Column, TextAlign, MIN_COLUMN_WIDTH};
pub use config::{FileViewConfig, RowSizeStrategy, ViewConfig, ViewKind};
pub use drag::{DragLog, DragRegistrar, DragSpec};
pub use error::ViewError;
pub use event::{ViewEntry, ViewEvent};
pub use file_view::{ChdirArgs, ChdirResult, FileView, FILE_DRAG_TYPE};
pub use flavor::{Flavor, IconFlavor, ListFlavor, TreeFlavor};
pub use icons::{IconResolver, ThemeIcons};
pub use item::{Cell, Identity, Item, Presentation, Row};
pub use layout::{grid_row_size, FlowLayout, Layout, Metrics, Rect, Viewport};
pub use navigator::{navigate, Key, NavAction};
pub use reconcile::{Patch, PatchOutcome};
pub use selection::{Modifiers, Selection};
pub use view::{DataView, IconView, ListView, RowTarget, TreeView};
