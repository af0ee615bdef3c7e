//! Identity keyed reconciliation of rendered rows against incoming items

use crate::{Item, RowArena, SlotId};
use serde::Serialize;
use std::collections::HashMap;

/// Input to `patch`
///
/// `Many` prunes every rendered identity it does not mention, even when it
/// holds zero or one item. `Single` never removes siblings.
#[derive(Debug, Clone)]
pub enum Patch {
    Single(Item),
    Many(Vec<Item>),
}

impl From<Item> for Patch {
    fn from(item: Item) -> Self {
        Patch::Single(item)
    }
}

impl From<Vec<Item>> for Patch {
    fn from(items: Vec<Item>) -> Self {
        Patch::Many(items)
    }
}

/// What a patch did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PatchOutcome {
    pub replaced: usize,
    pub appended: usize,
    pub removed: usize,
    pub skipped: usize,
}

/// Reconcile the top-level rows of `arena` against `patch`
///
/// `insert` creates the row for an item before the given sibling (or at the
/// end) and returns its slot, or `None` when the item is not renderable. A
/// matched row whose replacement cannot be rendered counts as unmentioned.
/// Positions are rebuilt once, after the last edit.
pub(crate) fn reconcile<I>(arena: &mut RowArena, patch: Patch, mut insert: I) -> PatchOutcome
where
    I: FnMut(&mut RowArena, &Item, Option<SlotId>) -> Option<SlotId>,
{
    let (items, prune) = match patch {
        Patch::Single(item) => (vec![item], false),
        Patch::Many(items) => (items, true),
    };

    let mut in_view: HashMap<String, SlotId> = HashMap::new();
    for id in arena.roots() {
        if let Some(identity) = arena.get(*id).and_then(|r| r.identity.as_ref()) {
            in_view.insert(identity.key(), *id);
        }
    }

    let mut produced: HashMap<String, SlotId> = HashMap::new();
    let mut outcome = PatchOutcome::default();

    for item in &items {
        let Some(identity) = item.identity() else {
            outcome.skipped += 1;
            continue;
        };
        let key = identity.key();

        let outgoing = produced.get(&key).or_else(|| in_view.get(&key)).copied();
        let Some(created) = insert(arena, item, outgoing) else {
            outcome.skipped += 1;
            continue;
        };
        in_view.remove(&key);

        match outgoing {
            Some(old) => {
                let was_active = arena.get(old).map_or(false, |r| r.active);
                if let Some(row) = arena.get_mut(created) {
                    row.active = was_active;
                }
                arena.remove_unindexed(old);
                outcome.replaced += 1;
            }
            None => outcome.appended += 1,
        }
        produced.insert(key, created);
    }

    if prune {
        for (_, stale) in in_view {
            if arena.remove_unindexed(stale).is_some() {
                outcome.removed += 1;
            }
        }
    }

    arena.reindex();
    outcome
}
