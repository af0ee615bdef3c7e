//! A view of any kind, chosen at runtime

use crate::navigator::Key;
use crate::{
    DragRegistrar, IconView, Item, ListView, Modifiers, Patch, PatchOutcome, Row, RowTarget,
    TreeView, ViewConfig, ViewEntry, ViewEvent, ViewKind, Viewport,
};
use serde_json::Value;

pub enum AnyView {
    List(ListView),
    Tree(TreeView),
    Icon(IconView),
}

macro_rules! forward {
    ($self:expr, $view:ident => $body:expr) => {
        match $self {
            AnyView::List($view) => $body,
            AnyView::Tree($view) => $body,
            AnyView::Icon($view) => $body,
        }
    };
}

impl AnyView {
    /// Build the view named by `config.kind`
    pub fn new(config: &ViewConfig) -> Self {
        match config.kind {
            ViewKind::List => AnyView::List(ListView::new(config)),
            ViewKind::Tree => AnyView::Tree(TreeView::new(config)),
            ViewKind::Icon => AnyView::Icon(IconView::new(config)),
        }
    }

    pub fn kind(&self) -> ViewKind {
        forward!(self, v => v.kind())
    }

    pub fn as_list(&self) -> Option<&ListView> {
        match self {
            AnyView::List(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_list_mut(&mut self) -> Option<&mut ListView> {
        match self {
            AnyView::List(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_tree(&self) -> Option<&TreeView> {
        match self {
            AnyView::Tree(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_tree_mut(&mut self) -> Option<&mut TreeView> {
        match self {
            AnyView::Tree(v) => Some(v),
            _ => None,
        }
    }

    pub fn build(&mut self, items: Vec<Item>) {
        forward!(self, v => v.build(items))
    }

    pub fn clear(&mut self) {
        forward!(self, v => v.clear())
    }

    pub fn add(&mut self, items: Vec<Item>) -> usize {
        forward!(self, v => v.add(items))
    }

    pub fn remove(&mut self, target: RowTarget) -> usize {
        forward!(self, v => v.remove(target))
    }

    pub fn patch(&mut self, patch: impl Into<Patch>) -> PatchOutcome {
        let patch = patch.into();
        forward!(self, v => v.patch(patch))
    }

    pub fn set_selected(&mut self, value: &Value, key: Option<&str>, scroll: bool) -> bool {
        forward!(self, v => v.set_selected(value, key, scroll))
    }

    pub fn selected(&self) -> Vec<ViewEntry> {
        forward!(self, v => v.selected())
    }

    pub fn entry(&self, value: &Value, key: Option<&str>) -> Option<Value> {
        forward!(self, v => v.entry(value, key))
    }

    pub fn entries(&self) -> Vec<Option<Value>> {
        forward!(self, v => v.entries())
    }

    pub fn len(&self) -> usize {
        forward!(self, v => v.len())
    }

    pub fn is_empty(&self) -> bool {
        forward!(self, v => v.is_empty())
    }

    pub fn row(&self, position: usize) -> Option<&Row> {
        forward!(self, v => v.row(position))
    }

    pub fn rows(&self) -> Vec<(usize, &Row)> {
        forward!(self, v => v.rows().collect())
    }

    pub fn depth(&self, position: usize) -> usize {
        forward!(self, v => v.depth(position))
    }

    pub fn click(&mut self, position: Option<usize>, modifiers: Modifiers) -> bool {
        forward!(self, v => v.click(position, modifiers))
    }

    pub fn double_click(&mut self, position: usize) -> bool {
        forward!(self, v => v.double_click(position))
    }

    pub fn context_menu(&mut self, position: usize, x: i32, y: i32, modifiers: Modifiers) -> bool {
        forward!(self, v => v.context_menu(position, x, y, modifiers))
    }

    pub fn key_down(&mut self, key: Key) -> bool {
        forward!(self, v => v.key_down(key))
    }

    pub fn scroll_into_view(&mut self, position: usize) -> bool {
        forward!(self, v => v.scroll_into_view(position))
    }

    pub fn set_viewport(&mut self, width: i32, height: i32) {
        forward!(self, v => v.set_viewport(width, height))
    }

    pub fn viewport(&self) -> Viewport {
        forward!(self, v => v.viewport())
    }

    pub fn set_drag_registrar(&mut self, registrar: Box<dyn DragRegistrar>) {
        forward!(self, v => v.set_drag_registrar(registrar))
    }

    pub fn focus(&mut self) {
        forward!(self, v => v.focus())
    }

    pub fn blur(&mut self) {
        forward!(self, v => v.blur())
    }

    pub fn is_focused(&self) -> bool {
        forward!(self, v => v.is_focused())
    }

    pub fn deselect_all(&mut self) {
        forward!(self, v => v.deselect_all())
    }

    pub fn take_events(&mut self) -> Vec<ViewEvent> {
        forward!(self, v => v.take_events())
    }
}
