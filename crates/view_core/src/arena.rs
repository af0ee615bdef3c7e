//! Row arena
//!
//! Rows live in a flat slot array addressed by generational ids. Tree
//! structure is kept as parent/children links; the rendered sequence is the
//! depth-first flattening of every row, collapsed subtrees included.

use crate::Row;
use serde::Serialize;
use std::collections::HashMap;

/// Handle to a row; stale after the row is removed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct SlotId {
    index: u32,
    generation: u32,
}

struct Node {
    row: Row,
    parent: Option<SlotId>,
    children: Vec<SlotId>,
    position: usize,
}

struct Slot {
    generation: u32,
    node: Option<Node>,
}

#[derive(Default)]
pub struct RowArena {
    slots: Vec<Slot>,
    free: Vec<u32>,
    roots: Vec<SlotId>,
    order: Vec<SlotId>,
    /// Rows inserted in front of an anchor since the last reindex
    pending: HashMap<SlotId, Vec<SlotId>>,
    /// Sibling lists hold removed ids or pending rows are not placed yet
    dirty: bool,
}

impl RowArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of rendered rows
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn clear(&mut self) {
        for index in 0..self.slots.len() {
            if self.slots[index].node.is_some() {
                self.release(index as u32);
            }
        }
        self.roots.clear();
        self.order.clear();
        self.pending.clear();
        self.dirty = false;
    }

    /// Insert a row under `parent` (top level if `None`), before the sibling
    /// `before` when given and present, else at the end
    pub fn insert(&mut self, row: Row, parent: Option<SlotId>, before: Option<SlotId>) -> Option<SlotId> {
        let id = self.insert_unindexed(row, parent, before)?;
        self.reindex();
        Some(id)
    }

    /// Remove a row and its subtree
    pub fn remove(&mut self, id: SlotId) -> Option<Row> {
        let row = self.remove_unindexed(id)?;
        self.reindex();
        Some(row)
    }

    /// `insert` without rebuilding positions; call `reindex` once the batch is done
    pub(crate) fn insert_unindexed(
        &mut self,
        row: Row,
        parent: Option<SlotId>,
        before: Option<SlotId>,
    ) -> Option<SlotId> {
        if let Some(parent) = parent {
            self.node(parent)?;
        }

        let node = Node {
            row,
            parent,
            children: Vec::new(),
            position: 0,
        };

        let id = match self.free.pop() {
            Some(index) => {
                let slot = &mut self.slots[index as usize];
                slot.node = Some(node);
                SlotId {
                    index,
                    generation: slot.generation,
                }
            }
            None => {
                let index = u32::try_from(self.slots.len()).ok()?;
                self.slots.push(Slot {
                    generation: 0,
                    node: Some(node),
                });
                SlotId { index, generation: 0 }
            }
        };

        let anchor = before.filter(|b| self.node(*b).map_or(false, |n| n.parent == parent));
        match anchor {
            Some(anchor) => self.pending.entry(anchor).or_default().push(id),
            None => match parent {
                Some(parent) => self.node_mut(parent)?.children.push(id),
                None => self.roots.push(id),
            },
        }

        self.dirty = true;
        Some(id)
    }

    /// `remove` without rebuilding positions; the id stays in its sibling
    /// list until the next `reindex`
    pub(crate) fn remove_unindexed(&mut self, id: SlotId) -> Option<Row> {
        let children = std::mem::take(&mut self.node_mut(id)?.children);

        let mut stack = children;
        while let Some(child) = stack.pop() {
            if let Some(inserted) = self.pending.remove(&child) {
                stack.extend(inserted);
            }
            if let Some(node) = self.release_id(child) {
                stack.extend(node.children);
            }
        }

        self.dirty = true;
        self.release_id(id).map(|n| n.row)
    }

    /// Remove every child of `id`, returning how many rows went away
    pub fn remove_children(&mut self, id: SlotId) -> usize {
        self.reindex();
        let children = match self.node(id) {
            Some(node) => node.children.clone(),
            None => return 0,
        };
        let before = self.len();
        for child in children {
            self.remove_unindexed(child);
        }
        self.reindex();
        before - self.len()
    }

    pub fn get(&self, id: SlotId) -> Option<&Row> {
        self.node(id).map(|n| &n.row)
    }

    pub fn get_mut(&mut self, id: SlotId) -> Option<&mut Row> {
        self.node_mut(id).map(|n| &mut n.row)
    }

    pub fn contains(&self, id: SlotId) -> bool {
        self.node(id).is_some()
    }

    /// Slot at a rendered position
    pub fn at(&self, position: usize) -> Option<SlotId> {
        self.order.get(position).copied()
    }

    pub fn position(&self, id: SlotId) -> Option<usize> {
        self.node(id).map(|n| n.position)
    }

    pub fn parent(&self, id: SlotId) -> Option<SlotId> {
        self.node(id).and_then(|n| n.parent)
    }

    pub fn children(&self, id: SlotId) -> &[SlotId] {
        self.node(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    pub fn roots(&self) -> &[SlotId] {
        &self.roots
    }

    /// Rendered order
    pub fn order(&self) -> &[SlotId] {
        &self.order
    }

    /// Rows in rendered order with their positions
    pub fn iter(&self) -> impl Iterator<Item = (usize, SlotId, &Row)> + '_ {
        self.order
            .iter()
            .enumerate()
            .filter_map(move |(pos, id)| self.get(*id).map(|row| (pos, *id, row)))
    }

    pub fn depth(&self, id: SlotId) -> usize {
        let mut depth = 0;
        let mut current = self.parent(id);
        while let Some(parent) = current {
            depth += 1;
            current = self.parent(parent);
        }
        depth
    }

    /// Shown on screen: every ancestor is expanded
    pub fn is_visible(&self, id: SlotId) -> bool {
        let mut current = self.parent(id);
        while let Some(parent) = current {
            match self.get(parent) {
                Some(row) if row.expanded => current = self.parent(parent),
                _ => return false,
            }
        }
        self.contains(id)
    }

    fn node(&self, id: SlotId) -> Option<&Node> {
        self.slots
            .get(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_ref())
    }

    fn node_mut(&mut self, id: SlotId) -> Option<&mut Node> {
        self.slots
            .get_mut(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_mut())
    }

    fn release(&mut self, index: u32) -> Option<Node> {
        let slot = self.slots.get_mut(index as usize)?;
        let node = slot.node.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(index);
        Some(node)
    }

    fn release_id(&mut self, id: SlotId) -> Option<Node> {
        self.node(id)?;
        self.release(id.index)
    }

    /// Rebuild sibling lists and the rendered order after a batch of edits
    pub(crate) fn reindex(&mut self) {
        if !self.dirty {
            return;
        }

        let roots = std::mem::take(&mut self.roots);
        self.roots = self.settle(roots);

        let mut order = Vec::with_capacity(self.slots.len());
        let mut stack: Vec<SlotId> = self.roots.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            let Some(node) = self.node_mut(id) else {
                continue;
            };
            let children = std::mem::take(&mut node.children);
            let children = self.settle(children);
            stack.extend(children.iter().rev().copied());

            if let Some(node) = self.node_mut(id) {
                node.position = order.len();
                node.children = children;
            }
            order.push(id);
        }

        self.order = order;
        self.pending.clear();
        self.dirty = false;
    }

    /// Place pending rows in front of their anchors and drop removed ids
    fn settle(&mut self, siblings: Vec<SlotId>) -> Vec<SlotId> {
        let mut settled = Vec::with_capacity(siblings.len());
        for id in siblings {
            self.splice(id, &mut settled);
        }
        settled
    }

    fn splice(&mut self, id: SlotId, settled: &mut Vec<SlotId>) {
        if let Some(inserted) = self.pending.remove(&id) {
            for row in inserted {
                self.splice(row, settled);
            }
        }
        if self.contains(id) {
            settled.push(id);
        }
    }
}
