//! Data view container shared by the list, tree and icon views

use crate::column::MIN_COLUMN_WIDTH;
use crate::layout::{self, FlowLayout, Layout, Metrics, Rect, Viewport};
use crate::navigator::{navigate, Key, NavAction};
use crate::reconcile::reconcile;
use crate::{
    Column, DragRegistrar, DragSpec, Flavor, IconFlavor, Identity, Item, ListFlavor, Modifiers,
    Patch, PatchOutcome, Row, RowArena, RowSizeStrategy, Selection, SlotId, TreeFlavor, ViewConfig,
    ViewEntry, ViewEvent, ViewKind,
};
use serde_json::Value;
use view_fs::SortDir;

pub type ListView = DataView<ListFlavor>;
pub type TreeView = DataView<TreeFlavor>;
pub type IconView = DataView<IconFlavor>;

/// Rows addressed by `remove`
#[derive(Debug, Clone, PartialEq)]
pub enum RowTarget {
    /// Rendered position
    Index(usize),
    /// Every row with this identity
    Id(Identity),
    /// Every row whose payload field `key` matches `value`
    Key { key: String, value: Value },
}

/// A selectable multi-row view
pub struct DataView<F: Flavor> {
    flavor: F,
    multiple_select: bool,
    single_click_activates: bool,
    draggable: bool,
    draggable_type: Option<String>,
    window_id: Option<u64>,
    row_size_strategy: RowSizeStrategy,
    metrics: Metrics,
    viewport: Viewport,
    arena: RowArena,
    selection: Selection,
    layout: Box<dyn Layout>,
    drag: Option<Box<dyn DragRegistrar>>,
    /// Rows created by the running operation, in creation order
    created: Vec<SlotId>,
    events: Vec<ViewEvent>,
    focused: bool,
}

impl<F: Flavor> DataView<F> {
    pub fn new(config: &ViewConfig) -> Self {
        Self::with_flavor(F::from_config(config), config)
    }

    pub fn with_flavor(flavor: F, config: &ViewConfig) -> Self {
        Self {
            flavor,
            multiple_select: config.multiple_select,
            single_click_activates: config.single_click_activates,
            draggable: config.draggable,
            draggable_type: config.draggable_type.clone(),
            window_id: config.window_id,
            row_size_strategy: config.row_size_strategy,
            metrics: config.metrics(),
            viewport: Viewport::default(),
            arena: RowArena::new(),
            selection: Selection::new(),
            layout: Box::new(FlowLayout),
            drag: None,
            created: Vec::new(),
            events: Vec::new(),
            focused: false,
        }
    }

    pub fn kind(&self) -> ViewKind {
        self.flavor.kind()
    }

    pub fn flavor(&self) -> &F {
        &self.flavor
    }

    pub fn set_layout(&mut self, layout: Box<dyn Layout>) {
        self.layout = layout;
    }

    pub fn set_drag_registrar(&mut self, registrar: Box<dyn DragRegistrar>) {
        self.drag = Some(registrar);
    }

    /// Resize the visible area, keeping the scroll offset
    pub fn set_viewport(&mut self, width: i32, height: i32) {
        self.viewport.width = width;
        self.viewport.height = height;
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn metrics(&self) -> Metrics {
        self.metrics
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    pub fn row(&self, position: usize) -> Option<&Row> {
        self.arena.at(position).and_then(|id| self.arena.get(id))
    }

    /// Rows in rendered order
    pub fn rows(&self) -> impl Iterator<Item = (usize, &Row)> + '_ {
        self.arena.iter().map(|(pos, _, row)| (pos, row))
    }

    pub fn slot_at(&self, position: usize) -> Option<SlotId> {
        self.arena.at(position)
    }

    pub fn position_of(&self, id: SlotId) -> Option<usize> {
        self.arena.position(id)
    }

    /// Nesting level of a row, 0 for top level
    pub fn depth(&self, position: usize) -> usize {
        self.arena.at(position).map_or(0, |id| self.arena.depth(id))
    }

    /// Reset and fill with `items`
    pub fn build(&mut self, items: Vec<Item>) {
        self.clear();
        let added = self.add(items);
        tracing::debug!("Built {} view with {} rows", self.kind(), added);
    }

    /// Drop every row, the scroll offset and the selection
    pub fn clear(&mut self) {
        self.arena.clear();
        self.selection.clear();
        self.created.clear();
        self.viewport.scroll_top = 0;
    }

    /// Append rows without identity matching
    pub fn add(&mut self, items: Vec<Item>) -> usize {
        let mut added = 0;
        for item in &items {
            match Self::insert_item(&self.flavor, &mut self.arena, &mut self.created, item, None, None) {
                Some(_) => added += 1,
                None => tracing::debug!("Skipping item without presentation"),
            }
        }
        self.arena.reindex();
        self.flush_created();
        added
    }

    /// Remove matching rows with their children
    pub fn remove(&mut self, target: RowTarget) -> usize {
        let ids: Vec<SlotId> = match &target {
            RowTarget::Index(position) => self.arena.at(*position).into_iter().collect(),
            RowTarget::Id(identity) => self
                .arena
                .iter()
                .filter(|(_, _, row)| row.identity.as_ref() == Some(identity))
                .map(|(_, id, _)| id)
                .collect(),
            RowTarget::Key { key, value } => self
                .arena
                .iter()
                .filter(|(pos, _, row)| row.matches(*pos, value, Some(key)))
                .map(|(_, id, _)| id)
                .collect(),
        };

        let removed = ids
            .into_iter()
            .filter(|id| self.arena.remove_unindexed(*id).is_some())
            .count();
        self.arena.reindex();
        self.sync_from_markers();
        removed
    }

    /// Reconcile top-level rows against `patch` by identity
    pub fn patch(&mut self, patch: impl Into<Patch>) -> PatchOutcome {
        let flavor = &self.flavor;
        let created = &mut self.created;
        let outcome = reconcile(&mut self.arena, patch.into(), |arena, item, before| {
            Self::insert_item(flavor, arena, created, item, None, before)
        });

        self.sync_from_markers();
        self.flush_created();
        tracing::debug!("Patched {} view: {:?}", self.kind(), outcome);
        outcome
    }

    /// Select the first row matching `value`, replacing the selection
    ///
    /// With `key` the payload field is compared; without it the position,
    /// identity, raw payload or whole payload. Returns `false` when nothing
    /// matched, leaving the selection as it was.
    pub fn set_selected(&mut self, value: &Value, key: Option<&str>, scroll: bool) -> bool {
        let found = self
            .arena
            .iter()
            .find(|(pos, _, row)| row.matches(*pos, value, key))
            .map(|(pos, _, _)| pos);

        let Some(position) = found else {
            return false;
        };

        self.selection.select_only(position);
        self.apply_markers();
        if scroll {
            self.scroll_into_view(position);
        }
        true
    }

    /// Selected rows in ascending order
    pub fn selected(&self) -> Vec<ViewEntry> {
        self.selection
            .indices()
            .iter()
            .filter_map(|pos| self.entry_at(*pos))
            .collect()
    }

    pub fn selection(&self) -> &[usize] {
        self.selection.indices()
    }

    /// Payload of the first row matching `value`
    pub fn entry(&self, value: &Value, key: Option<&str>) -> Option<Value> {
        self.arena
            .iter()
            .find(|(pos, _, row)| row.matches(*pos, value, key))
            .and_then(|(_, _, row)| row.payload())
    }

    /// Every payload in rendered order
    pub fn entries(&self) -> Vec<Option<Value>> {
        self.arena.iter().map(|(_, _, row)| row.payload()).collect()
    }

    /// Click a row, or empty space when `position` is `None`
    pub fn click(&mut self, position: Option<usize>, modifiers: Modifiers) -> bool {
        self.focus();

        let Some(position) = position else {
            self.deselect_all();
            self.events.push(ViewEvent::Select { entries: Vec::new() });
            return true;
        };

        if !self.select_at(position, modifiers) {
            return false;
        }
        if self.single_click_activates {
            let entries = self.selected();
            self.events.push(ViewEvent::Activate { entries });
        }
        true
    }

    /// Double click; the row is selected first if it is not already
    ///
    /// In single-click mode the click itself activates, so this is a no-op.
    pub fn double_click(&mut self, position: usize) -> bool {
        if position >= self.len() || self.single_click_activates {
            return false;
        }
        if !self.selection.contains(position) {
            self.select_at(position, Modifiers::NONE);
        }

        let entries = self.selected();
        self.events.push(ViewEvent::Activate { entries });
        true
    }

    /// Right click: select like a click, then report the menu request
    pub fn context_menu(&mut self, position: usize, x: i32, y: i32, modifiers: Modifiers) -> bool {
        if !self.select_at(position, modifiers) {
            return false;
        }

        let entries = self.selected();
        self.events.push(ViewEvent::ContextMenu { entries, x, y });
        true
    }

    /// Keyboard input; returns whether the key was consumed
    pub fn key_down(&mut self, key: Key) -> bool {
        let kind = self.kind();
        let row_size = match kind {
            ViewKind::Icon => self.row_size(),
            ViewKind::List | ViewKind::Tree => 1,
        };

        match navigate(kind, key, self.selection.indices(), self.len(), row_size) {
            NavAction::Ignored => false,
            NavAction::Stay => true,
            NavAction::Activate => {
                let entries = self.selected();
                self.events.push(ViewEvent::Activate { entries });
                true
            }
            NavAction::Move(position) => {
                tracing::trace!("{:?} moves selection to {}", key, position);
                self.selection.select_only(position);
                self.apply_markers();
                self.scroll_into_view(position);
                let entries = self.selected();
                self.events.push(ViewEvent::Select { entries });
                true
            }
        }
    }

    /// Snap the scroll offset so the row is visible; returns whether it moved
    pub fn scroll_into_view(&mut self, position: usize) -> bool {
        let Some(rect) = self.rects().get(position).copied() else {
            return false;
        };
        let header = self.flavor.header_height(&self.metrics);
        layout::scroll_into_view(rect, header, &mut self.viewport)
    }

    /// Row boxes in rendered order
    pub fn rects(&self) -> Vec<Rect> {
        let visible: Vec<bool> = self
            .arena
            .order()
            .iter()
            .map(|id| self.arena.is_visible(*id))
            .collect();
        self.layout
            .arrange(self.kind(), &visible, &self.metrics, &self.viewport)
    }

    /// Items per visual row as inferred from the layout
    pub fn row_size(&self) -> usize {
        let tops: Vec<i32> = self.rects().iter().map(|r| r.top).collect();
        layout::grid_row_size(&tops, self.row_size_strategy)
    }

    pub fn focus(&mut self) {
        self.focused = true;
    }

    pub fn blur(&mut self) {
        self.focused = false;
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn deselect_all(&mut self) {
        self.selection.clear();
        self.apply_markers();
    }

    /// Drain queued notifications
    pub fn take_events(&mut self) -> Vec<ViewEvent> {
        std::mem::take(&mut self.events)
    }

    pub(crate) fn entry_at(&self, position: usize) -> Option<ViewEntry> {
        self.row(position).map(|row| ViewEntry {
            position,
            payload: row.payload(),
        })
    }

    fn insert_item(
        flavor: &F,
        arena: &mut RowArena,
        created: &mut Vec<SlotId>,
        item: &Item,
        parent: Option<SlotId>,
        before: Option<SlotId>,
    ) -> Option<SlotId> {
        let presentation = flavor.present(item)?;
        let row = Row::from_item(item, presentation, flavor.default_expanded());
        let id = arena.insert_unindexed(row, parent, before)?;
        created.push(id);

        if flavor.nests() {
            for child in item.entries.iter().flatten() {
                Self::insert_item(flavor, arena, created, child, Some(id), None);
            }
        }
        Some(id)
    }

    /// Report rows created by the finished operation
    fn flush_created(&mut self) {
        for id in std::mem::take(&mut self.created) {
            let (Some(position), Some(row)) = (self.arena.position(id), self.arena.get(id)) else {
                continue;
            };
            let payload = row.payload();

            if self.draggable {
                if let Some(drag) = self.drag.as_mut() {
                    let spec = DragSpec {
                        drag_type: self.draggable_type.clone().or_else(|| row.draggable_type.clone()),
                        source: row
                            .draggable_source
                            .clone()
                            .or_else(|| DragSpec::window_source(self.window_id)),
                        payload: payload.clone(),
                    };
                    drag.register(position, spec);
                }
            }

            self.events.push(ViewEvent::Render {
                entry: ViewEntry { position, payload },
            });
        }
    }

    fn select_at(&mut self, position: usize, modifiers: Modifiers) -> bool {
        if position >= self.len() {
            return false;
        }

        self.selection.click(position, self.multiple_select, modifiers);
        self.apply_markers();
        let entries = self.selected();
        self.events.push(ViewEvent::Select { entries });
        true
    }

    /// Push the selection onto the row markers
    fn apply_markers(&mut self) {
        let order = self.arena.order().to_vec();
        for (pos, id) in order.into_iter().enumerate() {
            let active = self.selection.contains(pos);
            if let Some(row) = self.arena.get_mut(id) {
                row.active = active;
            }
        }
    }

    /// Recompute the selection from the row markers
    fn sync_from_markers(&mut self) {
        let markers: Vec<(usize, bool)> = self
            .arena
            .iter()
            .map(|(pos, _, row)| (pos, row.active))
            .collect();
        self.selection.rebuild(markers);
    }
}

impl DataView<ListFlavor> {
    /// Replace the header columns; a repeated key replaces the earlier column
    pub fn set_columns(&mut self, columns: Vec<Column>) {
        self.flavor.set_columns(columns);
    }

    pub fn columns(&self) -> &[Column] {
        self.flavor.columns()
    }

    pub fn visible_columns(&self) -> Vec<&Column> {
        self.flavor.columns().iter().filter(|c| c.visible).collect()
    }

    /// Current sort key and direction
    pub fn sort(&self) -> (Option<&str>, Option<SortDir>) {
        (self.flavor.sort_by.as_deref(), self.flavor.sort_dir)
    }

    /// Cycle a sortable header through ascending, descending and unsorted
    pub fn header_click(&mut self, index: usize) -> bool {
        let Some(column) = self.flavor.columns.get_mut(index) else {
            return false;
        };
        let Some(key) = column.sort_by.clone() else {
            return false;
        };

        let (sort_by, sort_dir) = match column.sort_dir {
            None => (Some(key), Some(SortDir::Ascending)),
            Some(SortDir::Ascending) => (Some(key), Some(SortDir::Descending)),
            Some(SortDir::Descending) => (None, None),
        };
        column.sort_dir = sort_dir;
        self.flavor.sort_by = sort_by.clone();
        self.flavor.sort_dir = sort_dir;

        tracing::debug!("Sort changed to {:?} {:?}", sort_by, sort_dir);
        self.events.push(ViewEvent::Sort { sort_by, sort_dir });
        true
    }

    /// Set a resizable column's width
    ///
    /// The width must lie strictly between the minimum column width and the
    /// viewport width less the minimum width of every column.
    pub fn resize_column(&mut self, index: usize, width: u32) -> bool {
        let reserved = self.flavor.columns.len() as i64 * i64::from(MIN_COLUMN_WIDTH);
        let max_width = i64::from(self.viewport.width) - reserved;

        let Some(column) = self.flavor.columns.get_mut(index) else {
            return false;
        };
        if !column.resizable || width <= MIN_COLUMN_WIDTH || i64::from(width) >= max_width {
            return false;
        }

        column.width = Some(width);
        true
    }

    pub fn set_column_visible(&mut self, index: usize, visible: bool) -> bool {
        match self.flavor.columns.get_mut(index) {
            Some(column) => {
                column.visible = visible;
                true
            }
            None => false,
        }
    }
}

impl DataView<TreeFlavor> {
    /// Append child rows under `parent`
    pub fn add_children(&mut self, parent: SlotId, items: Vec<Item>) -> usize {
        if !self.arena.contains(parent) {
            return 0;
        }

        let mut added = 0;
        for item in &items {
            if Self::insert_item(&self.flavor, &mut self.arena, &mut self.created, item, Some(parent), None)
                .is_some()
            {
                added += 1;
            }
        }
        self.arena.reindex();
        self.sync_from_markers();
        self.flush_created();
        added
    }

    /// Swap the children of `parent` for `items`
    pub fn replace_children(&mut self, parent: SlotId, items: Vec<Item>) -> usize {
        if !self.arena.contains(parent) {
            return 0;
        }
        self.arena.remove_children(parent);
        self.add_children(parent, items)
    }

    /// Expand, collapse (`Some`) or toggle (`None`) a row with children
    ///
    /// Returns the new state, or `None` for rows without children.
    pub fn expand(&mut self, position: usize, expanded: Option<bool>) -> Option<bool> {
        let id = self.arena.at(position)?;
        if self.arena.children(id).is_empty() {
            return None;
        }

        let row = self.arena.get_mut(id)?;
        let state = expanded.unwrap_or(!row.expanded);
        row.expanded = state;

        let entries = self.entry_at(position).into_iter().collect();
        self.events.push(ViewEvent::Expand {
            entries,
            expanded: state,
            node: id,
        });
        Some(state)
    }

    pub fn is_expanded(&self, position: usize) -> bool {
        self.row(position).map_or(false, |row| row.expanded)
    }

    pub fn children(&self, parent: SlotId) -> &[SlotId] {
        self.arena.children(parent)
    }

    /// Something was dropped onto a row
    pub fn drop_onto(&mut self, position: usize, src: Value) -> bool {
        let Some(row) = self.row(position) else {
            return false;
        };

        let dest = row.payload();
        self.events.push(ViewEvent::Drop { src, dest });
        true
    }

    /// Set the loaded-children marker; returns `false` if it was already set
    pub fn mark_rendered(&mut self, node: SlotId) -> bool {
        match self.arena.get_mut(node) {
            Some(row) if !row.was_rendered => {
                row.was_rendered = true;
                true
            }
            _ => false,
        }
    }

    pub fn reset_rendered(&mut self, node: SlotId) {
        if let Some(row) = self.arena.get_mut(node) {
            row.was_rendered = false;
        }
    }
}
