//! File view
//!
//! Wraps one list, tree or icon view and fills it from directory scans.
//! Scan replies travel through a channel and are applied by `poll` on the
//! owning thread; replies issued before the latest `chdir` are discarded.

use crate::{
    AnyView, Cell, Column, DragRegistrar, FileViewConfig, IconResolver, Identity, Item, Key,
    Modifiers, SlotId, TextAlign, ThemeIcons, ViewConfig, ViewEntry, ViewError, ViewEvent,
    ViewKind,
};
use crossbeam_channel::{unbounded, Receiver, Sender};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use view_fs::{
    format_timestamp, human_file_size, is_root, parent_path, strip_known_extension, FileEntry,
    ScanSummary, Scanner, SortBy,
};

/// Known list columns: key, header label, default width
const FILE_COLUMNS: &[(&str, &str, Option<u32>)] = &[
    ("filename", "Filename", None),
    ("mime", "Type", Some(100)),
    ("mtime", "Modified", Some(160)),
    ("ctime", "Created", Some(160)),
    ("size", "Size", Some(120)),
];

/// Drag type every file row is registered with
pub const FILE_DRAG_TYPE: &str = "file";

/// Arguments for `chdir`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChdirArgs {
    pub path: String,
    /// Rebuild list headers
    pub headers: bool,
}

impl ChdirArgs {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            headers: true,
        }
    }

    pub fn without_headers(mut self) -> Self {
        self.headers = false;
        self
    }
}

pub type ChdirResult = Result<ScanSummary, ViewError>;

type ChdirDone = Box<dyn FnOnce(ChdirResult)>;

/// Makes a fresh drag registrar for each child view
type DragFactory = Box<dyn Fn() -> Box<dyn DragRegistrar>>;

enum Request {
    Chdir {
        path: String,
        headers: bool,
        on_done: ChdirDone,
    },
    Expand {
        path: String,
        node: SlotId,
    },
}

struct Pending {
    generation: u64,
    request: Request,
}

struct ScanMessage {
    request_id: u64,
    result: view_fs::Result<Vec<FileEntry>>,
}

pub struct FileView {
    config: FileViewConfig,
    child: AnyView,
    scanner: Arc<dyn Scanner>,
    icons: Box<dyn IconResolver>,
    drag: Option<DragFactory>,
    path: Option<String>,
    /// Bumped by every chdir and kind switch
    generation: u64,
    next_request: u64,
    pending: HashMap<u64, Pending>,
    reply_tx: Sender<ScanMessage>,
    reply_rx: Receiver<ScanMessage>,
    events: Vec<ViewEvent>,
}

impl FileView {
    pub fn new(config: FileViewConfig, scanner: Arc<dyn Scanner>) -> Self {
        let (reply_tx, reply_rx) = unbounded();
        Self {
            child: build_child(&config.view, None),
            icons: Box::new(ThemeIcons::new(config.icon_theme.clone())),
            drag: None,
            config,
            scanner,
            path: None,
            generation: 0,
            next_request: 0,
            pending: HashMap::new(),
            reply_tx,
            reply_rx,
            events: Vec::new(),
        }
    }

    pub fn with_icons(mut self, icons: Box<dyn IconResolver>) -> Self {
        self.icons = icons;
        self
    }

    /// Install the drag transport; `factory` runs again whenever the child is rebuilt
    pub fn set_drag_registrar(&mut self, factory: impl Fn() -> Box<dyn DragRegistrar> + 'static) {
        self.child.set_drag_registrar(factory());
        self.drag = Some(Box::new(factory));
    }

    pub fn config(&self) -> &FileViewConfig {
        &self.config
    }

    pub fn kind(&self) -> ViewKind {
        self.child.kind()
    }

    /// Directory currently shown
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    pub fn child(&self) -> &AnyView {
        &self.child
    }

    /// Run an operation on the child view and pick up its notifications
    pub fn with_child<R>(&mut self, f: impl FnOnce(&mut AnyView) -> R) -> R {
        let result = f(&mut self.child);
        self.absorb_child_events();
        result
    }

    /// Scans still waiting for `poll`
    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Switch the child view kind, optionally re-listing the current directory
    pub fn set_kind(&mut self, kind: ViewKind, rescan: bool) {
        let viewport = self.child.viewport();
        self.config.view.kind = kind;
        self.child = build_child(&self.config.view, self.drag.as_ref());
        self.child.set_viewport(viewport.width, viewport.height);
        self.generation += 1;
        tracing::debug!("File view switched to {} view", kind);

        if rescan {
            if let Some(path) = self.path.clone() {
                self.chdir(ChdirArgs::new(path), |_| {});
            }
        }
    }

    /// List `args.path`; `on_done` runs from `poll` with the scan summary
    pub fn chdir(&mut self, args: ChdirArgs, on_done: impl FnOnce(ChdirResult) + 'static) {
        self.generation += 1;
        tracing::info!("Opening {}", args.path);

        let path = args.path.clone();
        self.request(
            &path,
            Request::Chdir {
                path: args.path,
                headers: args.headers,
                on_done: Box::new(on_done),
            },
        );
    }

    /// Apply scan replies that have arrived; returns how many were applied
    pub fn poll(&mut self) -> usize {
        let mut applied = 0;

        while let Ok(message) = self.reply_rx.try_recv() {
            let Some(pending) = self.pending.remove(&message.request_id) else {
                continue;
            };
            let current = pending.generation == self.generation;

            match pending.request {
                Request::Chdir { path, on_done, .. } if !current => {
                    tracing::debug!("Dropping superseded listing of {}", path);
                    on_done(Err(ViewError::Stale(path)));
                }
                Request::Chdir {
                    path,
                    headers,
                    on_done,
                } => {
                    let result = self.apply_listing(&path, headers, message.result);
                    on_done(result);
                    applied += 1;
                }
                Request::Expand { path, .. } if !current => {
                    tracing::debug!("Dropping superseded children of {}", path);
                }
                Request::Expand { path, node } => {
                    self.apply_children(&path, node, message.result);
                    applied += 1;
                }
            }
        }

        applied
    }

    pub fn click(&mut self, position: Option<usize>, modifiers: Modifiers) -> bool {
        self.with_child(|child| child.click(position, modifiers))
    }

    pub fn double_click(&mut self, position: usize) -> bool {
        self.with_child(|child| child.double_click(position))
    }

    pub fn context_menu(&mut self, position: usize, x: i32, y: i32, modifiers: Modifiers) -> bool {
        self.with_child(|child| child.context_menu(position, x, y, modifiers))
    }

    pub fn key_down(&mut self, key: Key) -> bool {
        self.with_child(|child| child.key_down(key))
    }

    pub fn set_selected(&mut self, value: &Value, key: Option<&str>, scroll: bool) -> bool {
        self.with_child(|child| child.set_selected(value, key, scroll))
    }

    pub fn selected(&self) -> Vec<ViewEntry> {
        self.child.selected()
    }

    /// Tree only: expand or collapse a directory row, loading it on first expand
    pub fn expand(&mut self, position: usize, expanded: Option<bool>) -> Option<bool> {
        self.with_child(|child| child.as_tree_mut().and_then(|tree| tree.expand(position, expanded)))
    }

    /// List only: click a column header
    pub fn header_click(&mut self, index: usize) -> bool {
        self.with_child(|child| child.as_list_mut().map_or(false, |list| list.header_click(index)))
    }

    pub fn set_viewport(&mut self, width: i32, height: i32) {
        self.child.set_viewport(width, height);
    }

    pub fn focus(&mut self) {
        self.child.focus();
    }

    pub fn blur(&mut self) {
        self.child.blur();
    }

    pub fn take_events(&mut self) -> Vec<ViewEvent> {
        self.absorb_child_events();
        std::mem::take(&mut self.events)
    }

    fn request(&mut self, path: &str, request: Request) {
        let request_id = self.next_request;
        self.next_request += 1;
        self.pending.insert(
            request_id,
            Pending {
                generation: self.generation,
                request,
            },
        );

        let reply_tx = self.reply_tx.clone();
        self.scanner.scan(
            path,
            &self.config.scan_options(),
            Box::new(move |result| {
                if reply_tx.send(ScanMessage { request_id, result }).is_err() {
                    tracing::debug!("File view closed before scan reply");
                }
            }),
        );
    }

    fn apply_listing(
        &mut self,
        path: &str,
        headers: bool,
        result: view_fs::Result<Vec<FileEntry>>,
    ) -> ChdirResult {
        let entries = match result {
            Ok(entries) => entries,
            Err(source) => {
                tracing::warn!("Failed to list {}: {}", path, source);
                return Err(ViewError::scan(path, source));
            }
        };

        let summary = ScanSummary::from_entries(&entries);
        let mut listing = Vec::with_capacity(entries.len() + 1);
        if !is_root(path) {
            if let Some(parent) = parent_path(path) {
                listing.push(FileEntry::parent_link(&parent));
            }
        }
        listing.extend(entries);

        if headers {
            let columns = self.header_columns();
            if let Some(list) = self.child.as_list_mut() {
                list.set_columns(columns);
            }
        }

        let items: Vec<Item> = listing.iter().map(|entry| self.entry_item(entry)).collect();
        self.child.clear();
        self.child.add(items);
        self.path = Some(path.to_string());
        self.absorb_child_events();

        tracing::info!(
            "Listed {}: {} directories, {} files, {} hidden",
            path,
            summary.directories,
            summary.files,
            summary.hidden
        );
        Ok(summary)
    }

    fn apply_children(&mut self, path: &str, node: SlotId, result: view_fs::Result<Vec<FileEntry>>) {
        let entries = match result {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!("Failed to load children of {}: {}", path, e);
                if let Some(tree) = self.child.as_tree_mut() {
                    tree.reset_rendered(node);
                }
                return;
            }
        };

        let items: Vec<Item> = entries.iter().map(|entry| self.entry_item(entry)).collect();
        if let Some(tree) = self.child.as_tree_mut() {
            let added = tree.replace_children(node, items);
            tracing::debug!("Loaded {} children of {}", added, path);
        }
        self.absorb_child_events();
    }

    /// Forward child notifications, reacting to expand and sort
    fn absorb_child_events(&mut self) {
        for event in self.child.take_events() {
            match &event {
                ViewEvent::Expand {
                    entries,
                    expanded: true,
                    node,
                } => {
                    let path = entries
                        .first()
                        .and_then(|e| e.payload.as_ref())
                        .and_then(|p| p.get("path"))
                        .and_then(Value::as_str)
                        .map(str::to_string);
                    if let Some(path) = path {
                        self.load_children(*node, path);
                    }
                }
                ViewEvent::Sort { sort_by, sort_dir } => {
                    self.config.sort_by = sort_by.as_deref().and_then(SortBy::from_key);
                    self.config.sort_dir = sort_dir.unwrap_or_default();
                    if let Some(path) = self.path.clone() {
                        self.chdir(ChdirArgs::new(path).without_headers(), |_| {});
                    }
                }
                _ => {}
            }
            self.events.push(event);
        }
    }

    fn load_children(&mut self, node: SlotId, path: String) {
        let Some(tree) = self.child.as_tree_mut() else {
            return;
        };
        if !tree.mark_rendered(node) {
            return;
        }

        tracing::debug!("Loading children of {}", path);
        self.request(&path, Request::Expand { path: path.clone(), node });
    }

    fn display_name<'a>(&self, filename: &'a str) -> &'a str {
        if self.config.extensions {
            filename
        } else {
            strip_known_extension(filename)
        }
    }

    fn entry_item(&self, entry: &FileEntry) -> Item {
        let kind = self.child.kind();
        let tooltip = format!(
            "{}\n{}\n{} {}",
            entry.entry_type.as_str().to_uppercase(),
            entry.filename,
            display_size(entry),
            entry.mime.as_deref().unwrap_or("")
        );

        let mut item = Item {
            value: serde_json::to_value(entry).ok(),
            tooltip: Some(tooltip),
            ..Default::default()
        };

        match kind {
            ViewKind::List => {
                let id = entry.id.clone().unwrap_or_else(|| entry.filename.clone());
                item.id = Some(Identity::Str(id));
                item.columns = Some(self.file_cells(entry));
            }
            ViewKind::Tree | ViewKind::Icon => {
                let id = entry
                    .id
                    .clone()
                    .unwrap_or_else(|| self.display_name(&entry.filename).to_string());
                item.id = Some(Identity::Str(id));
                item.label = Some(entry.filename.clone());
                item.icon = Some(self.icons.file_icon(entry, kind.icon_size()));

                if kind == ViewKind::Tree && entry.is_dir() && !entry.is_parent_link() {
                    item.entries = Some(vec![Item::placeholder()]);
                }
            }
        }
        item
    }

    fn column_keys(&self) -> Vec<String> {
        self.config
            .column_keys()
            .into_iter()
            .filter(|key| FILE_COLUMNS.iter().any(|(known, _, _)| known == key))
            .collect()
    }

    fn file_cells(&self, entry: &FileEntry) -> Vec<Cell> {
        self.column_keys()
            .iter()
            .map(|key| match key.as_str() {
                "filename" => Cell::new(self.display_name(&entry.filename))
                    .with_icon(self.icons.file_icon(entry, ViewKind::List.icon_size())),
                "mime" => Cell::new(entry.mime.clone().unwrap_or_default()),
                "mtime" => Cell::new(format_timestamp(entry.mtime)),
                "ctime" => Cell::new(format_timestamp(entry.ctime)),
                _ => Cell::new(display_size(entry)),
            })
            .collect()
    }

    fn header_columns(&self) -> Vec<Column> {
        let sorted = self.config.sort_by.map(SortBy::key);

        self.column_keys()
            .iter()
            .enumerate()
            .filter_map(|(idx, key)| {
                let (_, label, width) = FILE_COLUMNS.iter().find(|(known, _, _)| known == key)?;
                let mut column = Column::new(key.as_str(), *label).sortable();
                column.width = *width;
                column.resizable = idx > 0;
                column.text_align = if idx == 0 { TextAlign::Left } else { TextAlign::Right };
                if sorted == Some(key.as_str()) {
                    column.sort_dir = Some(self.config.sort_dir);
                }
                Some(column)
            })
            .collect()
    }
}

fn display_size(entry: &FileEntry) -> String {
    if entry.is_dir() {
        String::new()
    } else {
        human_file_size(entry.size)
    }
}

/// Child view whose rows are always draggable as files
fn build_child(config: &ViewConfig, drag: Option<&DragFactory>) -> AnyView {
    let config = ViewConfig {
        draggable: true,
        draggable_type: Some(FILE_DRAG_TYPE.to_string()),
        ..config.clone()
    };
    let mut child = AnyView::new(&config);
    if let Some(factory) = drag {
        child.set_drag_registrar(factory());
    }
    child
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::cell::RefCell;
    use std::rc::Rc;
    use view_fs::{EntryType, FsError, ScanOptions, ScanReply, SortDir};

    /// Answers from a fixed directory table, either at once or on demand
    #[derive(Default)]
    struct TableScanner {
        dirs: Mutex<HashMap<String, Vec<FileEntry>>>,
        deferred: bool,
        queued: Mutex<Vec<(String, ScanReply)>>,
        calls: Mutex<Vec<(String, ScanOptions)>>,
    }

    impl TableScanner {
        fn new(dirs: Vec<(&str, Vec<FileEntry>)>) -> Arc<Self> {
            Arc::new(Self {
                dirs: Mutex::new(dirs.into_iter().map(|(p, e)| (p.to_string(), e)).collect()),
                ..Default::default()
            })
        }

        fn deferred(dirs: Vec<(&str, Vec<FileEntry>)>) -> Arc<Self> {
            Arc::new(Self {
                dirs: Mutex::new(dirs.into_iter().map(|(p, e)| (p.to_string(), e)).collect()),
                deferred: true,
                ..Default::default()
            })
        }

        fn answer(&self, path: &str) -> view_fs::Result<Vec<FileEntry>> {
            self.dirs
                .lock()
                .get(path)
                .cloned()
                .ok_or_else(|| FsError::NotFound(path.to_string()))
        }

        /// Complete the queued scan of `path`
        fn complete(&self, path: &str) {
            let reply = {
                let mut queued = self.queued.lock();
                let at = queued.iter().position(|(p, _)| p == path).unwrap();
                queued.remove(at).1
            };
            reply(self.answer(path));
        }

        fn call_count(&self) -> usize {
            self.calls.lock().len()
        }
    }

    impl Scanner for TableScanner {
        fn scan(&self, path: &str, options: &ScanOptions, reply: ScanReply) {
            self.calls.lock().push((path.to_string(), options.clone()));
            if self.deferred {
                self.queued.lock().push((path.to_string(), reply));
            } else {
                reply(self.answer(path));
            }
        }
    }

    fn home() -> Vec<FileEntry> {
        vec![
            FileEntry::new("docs", "/home/docs", EntryType::Dir),
            FileEntry::new("notes.txt", "/home/notes.txt", EntryType::File).with_size(2048),
        ]
    }

    fn docs() -> Vec<FileEntry> {
        vec![FileEntry::new("a.md", "/home/docs/a.md", EntryType::File)]
    }

    fn file_view(kind: ViewKind, scanner: Arc<TableScanner>) -> FileView {
        let mut config = FileViewConfig::default();
        config.view.kind = kind;
        FileView::new(config, scanner)
    }

    fn capture() -> (Rc<RefCell<Option<ChdirResult>>>, impl FnOnce(ChdirResult)) {
        let slot = Rc::new(RefCell::new(None));
        let sink = slot.clone();
        (slot, move |result| *sink.borrow_mut() = Some(result))
    }

    fn labels(view: &FileView) -> Vec<String> {
        view.child()
            .rows()
            .into_iter()
            .map(|(_, row)| row.label().to_string())
            .collect()
    }

    #[test]
    fn test_chdir_lists_with_backlink_and_headers() {
        let scanner = TableScanner::new(vec![("/home", home())]);
        let mut view = file_view(ViewKind::List, scanner);

        let (result, on_done) = capture();
        view.chdir(ChdirArgs::new("/home"), on_done);
        assert!(result.borrow().is_none());
        assert_eq!(view.poll(), 1);

        let summary = result.borrow_mut().take().unwrap().unwrap();
        assert_eq!(summary.directories, 1);
        assert_eq!(summary.files, 1);
        assert_eq!(summary.size, 2048);

        assert_eq!(labels(&view), vec!["..", "docs", "notes.txt"]);
        assert_eq!(view.path(), Some("/home"));

        let list = view.child().as_list().unwrap();
        let keys: Vec<_> = list.columns().iter().map(|c| c.key.as_str()).collect();
        assert_eq!(keys, vec!["filename", "mime", "size"]);
        assert!(!list.columns()[0].resizable);
        assert!(list.columns()[2].resizable);

        let row = view.child().row(2).unwrap();
        let cells: Vec<_> = row.cells().iter().map(|c| c.label.as_str()).collect();
        assert_eq!(cells, vec!["notes.txt", "text/plain", "2.0 KiB"]);
        assert_eq!(row.title(), Some("FILE\nnotes.txt\n2.0 KiB text/plain"));
        assert_eq!(row.identity, Some(Identity::from("notes.txt")));
        assert_eq!(
            row.cells()[0].icon.as_deref(),
            Some("themes/default/16x16/mimetypes/txt.png")
        );
    }

    #[test]
    fn test_root_has_no_backlink() {
        let scanner = TableScanner::new(vec![("/", home())]);
        let mut view = file_view(ViewKind::Icon, scanner);
        view.chdir(ChdirArgs::new("/"), |_| {});
        view.poll();

        assert_eq!(labels(&view), vec!["docs", "notes.txt"]);
        assert_eq!(
            view.child().row(0).and_then(|r| r.icon()),
            Some("themes/default/32x32/places/folder.png")
        );
    }

    #[test]
    fn test_failed_scan_leaves_rows() {
        let scanner = TableScanner::new(vec![("/home", home())]);
        let mut view = file_view(ViewKind::List, scanner);
        view.chdir(ChdirArgs::new("/home"), |_| {});
        view.poll();

        let (result, on_done) = capture();
        view.chdir(ChdirArgs::new("/missing"), on_done);
        view.poll();

        let err = result.borrow_mut().take().unwrap().unwrap_err();
        assert!(matches!(err, ViewError::Scan { ref path, .. } if path == "/missing"));
        assert_eq!(labels(&view), vec!["..", "docs", "notes.txt"]);
        assert_eq!(view.path(), Some("/home"));
    }

    #[test]
    fn test_last_requested_chdir_wins() {
        let scanner = TableScanner::deferred(vec![("/home", home()), ("/home/docs", docs())]);
        let mut view = file_view(ViewKind::List, scanner.clone());

        let (first, first_done) = capture();
        let (second, second_done) = capture();
        view.chdir(ChdirArgs::new("/home"), first_done);
        view.chdir(ChdirArgs::new("/home/docs"), second_done);
        assert!(view.has_pending());

        scanner.complete("/home/docs");
        scanner.complete("/home");
        assert_eq!(view.poll(), 1);

        assert!(second.borrow().as_ref().unwrap().is_ok());
        assert!(matches!(first.borrow().as_ref().unwrap(), Err(ViewError::Stale(_))));
        assert_eq!(labels(&view), vec!["..", "a.md"]);
        assert_eq!(view.path(), Some("/home/docs"));
        assert!(!view.has_pending());
    }

    #[test]
    fn test_late_reply_after_drop_is_discarded() {
        let scanner = TableScanner::deferred(vec![("/home", home())]);
        let mut view = file_view(ViewKind::List, scanner.clone());
        view.chdir(ChdirArgs::new("/home"), |_| panic!("must not run"));
        drop(view);

        scanner.complete("/home");
    }

    #[test]
    fn test_tree_lazy_expansion() {
        let scanner = TableScanner::new(vec![("/home", home()), ("/home/docs", docs())]);
        let mut view = file_view(ViewKind::Tree, scanner.clone());
        view.chdir(ChdirArgs::new("/home"), |_| {});
        view.poll();
        assert_eq!(labels(&view), vec!["..", "docs", "Loading...", "notes.txt"]);

        assert_eq!(view.expand(1, None), Some(true));
        assert_eq!(scanner.call_count(), 2);
        view.poll();
        assert_eq!(labels(&view), vec!["..", "docs", "a.md", "notes.txt"]);
        assert_eq!(view.child().depth(2), 1);

        view.expand(1, Some(false));
        view.expand(1, Some(true));
        assert_eq!(scanner.call_count(), 2);

        let expands = view
            .take_events()
            .into_iter()
            .filter(|e| e.name() == "expand")
            .count();
        assert_eq!(expands, 3);
    }

    #[test]
    fn test_tree_expand_failure_allows_retry() {
        let scanner = TableScanner::new(vec![("/home", home())]);
        let mut view = file_view(ViewKind::Tree, scanner.clone());
        view.chdir(ChdirArgs::new("/home"), |_| {});
        view.poll();

        view.expand(1, Some(true));
        view.poll();
        assert_eq!(labels(&view), vec!["..", "docs", "Loading...", "notes.txt"]);

        scanner.dirs.lock().insert("/home/docs".to_string(), docs());
        view.expand(1, Some(false));
        view.expand(1, Some(true));
        view.poll();
        assert_eq!(labels(&view), vec!["..", "docs", "a.md", "notes.txt"]);
        assert_eq!(scanner.call_count(), 3);
    }

    #[test]
    fn test_header_sort_rescans_without_headers() {
        let scanner = TableScanner::new(vec![("/home", home())]);
        let mut view = file_view(ViewKind::List, scanner.clone());
        view.chdir(ChdirArgs::new("/home"), |_| {});
        view.poll();
        view.take_events();

        assert!(view.header_click(2));
        assert_eq!(view.config().sort_by, Some(SortBy::Size));
        assert_eq!(view.config().sort_dir, SortDir::Ascending);

        let (path, options) = scanner.calls.lock().last().cloned().unwrap();
        assert_eq!(path, "/home");
        assert_eq!(options.sort_by, Some(SortBy::Size));

        view.poll();
        let list = view.child().as_list().unwrap();
        assert_eq!(list.sort(), (Some("size"), Some(SortDir::Ascending)));
        assert_eq!(list.columns()[2].sort_dir, Some(SortDir::Ascending));

        let sorts = view.take_events().iter().filter(|e| e.name() == "sort").count();
        assert_eq!(sorts, 1);
    }

    #[test]
    fn test_set_kind_rebuilds_child() {
        let scanner = TableScanner::new(vec![("/home", home())]);
        let mut view = file_view(ViewKind::List, scanner.clone());
        view.set_viewport(400, 300);
        view.chdir(ChdirArgs::new("/home"), |_| {});
        view.poll();

        view.set_kind(ViewKind::Icon, true);
        assert_eq!(view.kind(), ViewKind::Icon);
        assert!(view.child().is_empty());
        assert_eq!(view.child().viewport().width, 400);

        view.poll();
        assert_eq!(labels(&view), vec!["..", "docs", "notes.txt"]);
        assert_eq!(view.config().view.kind, ViewKind::Icon);
    }

    #[test]
    fn test_rows_register_as_file_drags_across_kinds() {
        let scanner = TableScanner::new(vec![("/home", home())]);
        let mut view = file_view(ViewKind::List, scanner);
        assert!(!view.config().view.draggable);

        let log = crate::DragLog::new();
        let shared = log.clone();
        view.set_drag_registrar(move || -> Box<dyn DragRegistrar> { Box::new(shared.clone()) });

        view.chdir(ChdirArgs::new("/home"), |_| {});
        view.poll();
        assert_eq!(log.len(), 3);

        view.set_kind(ViewKind::Icon, true);
        view.poll();
        assert_eq!(log.len(), 6);

        let entries = log.entries();
        assert!(entries
            .iter()
            .all(|(_, spec)| spec.drag_type.as_deref() == Some(FILE_DRAG_TYPE)));
        let positions: Vec<usize> = entries[3..].iter().map(|(pos, _)| *pos).collect();
        assert_eq!(positions, vec![0, 1, 2]);
    }

    #[test]
    fn test_hidden_extensions() {
        let scanner = TableScanner::new(vec![("/", home())]);
        let mut config = FileViewConfig::default();
        config.extensions = false;
        config.view.kind = ViewKind::Tree;
        let mut view = FileView::new(config, scanner.clone());
        view.chdir(ChdirArgs::new("/"), |_| {});
        view.poll();

        let row = view.child().row(2).unwrap();
        assert_eq!(row.label(), "notes.txt");
        assert_eq!(row.identity, Some(Identity::from("notes")));

        view.set_kind(ViewKind::List, true);
        view.poll();
        let row = view.child().row(1).unwrap();
        assert_eq!(row.cells()[0].label, "notes");
        assert_eq!(row.identity, Some(Identity::from("notes.txt")));
    }

    #[test]
    fn test_lists_real_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("sub")).unwrap();
        std::fs::write(dir.path().join("b.txt"), b"hello").unwrap();
        std::fs::write(dir.path().join(".hidden"), b"x").unwrap();

        let mut view = FileView::new(FileViewConfig::default(), Arc::new(view_fs::LocalScanner::new()));
        let (result, on_done) = capture();
        let path = dir.path().to_string_lossy().to_string();
        view.chdir(ChdirArgs::new(path.clone()), on_done);

        let started = std::time::Instant::now();
        while result.borrow().is_none() {
            assert!(started.elapsed() < std::time::Duration::from_secs(5));
            view.poll();
            std::thread::sleep(std::time::Duration::from_millis(2));
        }

        let summary = result.borrow_mut().take().unwrap().unwrap();
        assert_eq!(summary.files, 1);
        assert_eq!(summary.directories, 1);
        assert_eq!(labels(&view), vec!["..", "sub", "b.txt"]);
        assert_eq!(view.path(), Some(path.as_str()));
    }

    #[test]
    fn test_forwards_child_events() {
        let scanner = TableScanner::new(vec![("/home", home())]);
        let mut view = file_view(ViewKind::List, scanner);
        view.chdir(ChdirArgs::new("/home"), |_| {});
        view.poll();

        let renders = view.take_events().iter().filter(|e| e.name() == "render").count();
        assert_eq!(renders, 3);

        view.click(Some(2), Modifiers::NONE);
        view.key_down(Key::Enter);
        view.context_menu(1, 5, 5, Modifiers::NONE);
        let names: Vec<_> = view.take_events().iter().map(ViewEvent::name).collect();
        assert_eq!(names, vec!["select", "activate", "select", "contextmenu"]);

        assert!(view.set_selected(&Value::from("/home/docs"), Some("path"), false));
        assert_eq!(view.selected()[0].position, 1);
        assert_eq!(
            view.selected()[0].payload.as_ref().and_then(|p| p.get("type")),
            Some(&Value::from("dir"))
        );
    }
}
