//! Selection state machine

/// Modifier keys held during a click or key press
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    /// Range modifier: toggles instead of replacing
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        shift: false,
        ctrl: false,
        alt: false,
    };

    pub fn shift() -> Self {
        Self {
            shift: true,
            ..Self::NONE
        }
    }
}

/// Selected positions, sorted ascending without duplicates
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    indices: Vec<usize>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn first(&self) -> Option<usize> {
        self.indices.first().copied()
    }

    pub fn last(&self) -> Option<usize> {
        self.indices.last().copied()
    }

    pub fn contains(&self, position: usize) -> bool {
        self.indices.binary_search(&position).is_ok()
    }

    pub fn clear(&mut self) {
        self.indices.clear();
    }

    /// Apply a click on `position`
    ///
    /// Without multiple select or without the range modifier the selection is
    /// emptied first, so a plain click always ends with `position` selected.
    /// Returns whether `position` is selected afterwards.
    pub fn click(&mut self, position: usize, multiple: bool, modifiers: Modifiers) -> bool {
        if !multiple || !modifiers.shift {
            self.indices.clear();
        }

        match self.indices.binary_search(&position) {
            Ok(at) => {
                self.indices.remove(at);
                false
            }
            Err(at) => {
                self.indices.insert(at, position);
                true
            }
        }
    }

    pub fn select_only(&mut self, position: usize) {
        self.indices.clear();
        self.indices.push(position);
    }

    /// Rebuild from active markers given in rendered order
    pub fn rebuild<I>(&mut self, markers: I)
    where
        I: IntoIterator<Item = (usize, bool)>,
    {
        self.indices = markers
            .into_iter()
            .filter(|(_, active)| *active)
            .map(|(pos, _)| pos)
            .collect();
        self.indices.sort_unstable();
        self.indices.dedup();
    }
}
