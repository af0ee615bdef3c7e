//! Keyboard navigation

use crate::ViewKind;
use std::str::FromStr;

/// Keys the navigator understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Enter,
    Other,
}

impl FromStr for Key {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_lowercase().as_str() {
            "up" | "arrowup" => Key::Up,
            "down" | "arrowdown" => Key::Down,
            "left" | "arrowleft" => Key::Left,
            "right" | "arrowright" => Key::Right,
            "enter" | "return" => Key::Enter,
            _ => Key::Other,
        })
    }
}

/// Result of a key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavAction {
    /// Key not consumed
    Ignored,
    /// Activate the current selection
    Activate,
    /// Select this position
    Move(usize),
    /// Consumed, selection already there
    Stay,
}

/// Map a key to a selection transition
///
/// `row_size` is the number of items per visual row; only icon grids use it.
/// With nothing selected the walk starts from position 0, so a forward key
/// lands one step past the first row and a backward key on the first row.
pub fn navigate(kind: ViewKind, key: Key, selected: &[usize], count: usize, row_size: usize) -> NavAction {
    if count == 0 {
        return NavAction::Ignored;
    }

    let step = match (kind, key) {
        (_, Key::Enter) => return NavAction::Activate,
        (_, Key::Other) => return NavAction::Ignored,
        (ViewKind::List | ViewKind::Tree, Key::Left | Key::Right) => return NavAction::Ignored,
        (ViewKind::Icon, Key::Up | Key::Down) => row_size.max(1),
        _ => 1,
    };

    let first = selected.first().copied().unwrap_or(0);
    let last = selected.last().copied().unwrap_or(first);

    let max = count - 1;
    let (anchor, target) = match key {
        Key::Up | Key::Left => (first, first.saturating_sub(step)),
        _ => (last, last.saturating_add(step).min(max)),
    };

    if target == anchor && !selected.is_empty() {
        NavAction::Stay
    } else {
        NavAction::Move(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_moves_by_one() {
        assert_eq!(navigate(ViewKind::List, Key::Down, &[2], 5, 1), NavAction::Move(3));
        assert_eq!(navigate(ViewKind::List, Key::Up, &[2], 5, 1), NavAction::Move(1));
        assert_eq!(navigate(ViewKind::Tree, Key::Down, &[1, 3], 5, 1), NavAction::Move(4));
        assert_eq!(navigate(ViewKind::Tree, Key::Up, &[1, 3], 5, 1), NavAction::Move(0));
    }

    #[test]
    fn test_list_clamps() {
        assert_eq!(navigate(ViewKind::List, Key::Up, &[0], 5, 1), NavAction::Stay);
        assert_eq!(navigate(ViewKind::List, Key::Down, &[4], 5, 1), NavAction::Stay);
    }

    #[test]
    fn test_list_ignores_left_right() {
        assert_eq!(navigate(ViewKind::List, Key::Left, &[2], 5, 1), NavAction::Ignored);
        assert_eq!(navigate(ViewKind::Tree, Key::Right, &[2], 5, 1), NavAction::Ignored);
        assert_eq!(navigate(ViewKind::List, Key::Other, &[2], 5, 1), NavAction::Ignored);
    }

    #[test]
    fn test_icon_grid() {
        assert_eq!(navigate(ViewKind::Icon, Key::Down, &[1], 10, 4), NavAction::Move(5));
        assert_eq!(navigate(ViewKind::Icon, Key::Up, &[5], 10, 4), NavAction::Move(1));
        assert_eq!(navigate(ViewKind::Icon, Key::Up, &[2], 10, 4), NavAction::Move(0));
        assert_eq!(navigate(ViewKind::Icon, Key::Left, &[5], 10, 4), NavAction::Move(4));
        assert_eq!(navigate(ViewKind::Icon, Key::Right, &[5], 10, 4), NavAction::Move(6));
    }

    #[test]
    fn test_icon_down_clamps_to_last() {
        assert_eq!(navigate(ViewKind::Icon, Key::Down, &[7], 10, 4), NavAction::Move(9));
        assert_eq!(navigate(ViewKind::Icon, Key::Down, &[9], 10, 4), NavAction::Stay);
        assert_eq!(navigate(ViewKind::Icon, Key::Right, &[9], 10, 4), NavAction::Stay);
    }

    #[test]
    fn test_empty_selection_and_empty_view() {
        assert_eq!(navigate(ViewKind::List, Key::Down, &[], 5, 1), NavAction::Move(1));
        assert_eq!(navigate(ViewKind::List, Key::Up, &[], 5, 1), NavAction::Move(0));
        assert_eq!(navigate(ViewKind::List, Key::Down, &[], 1, 1), NavAction::Move(0));
        assert_eq!(navigate(ViewKind::Icon, Key::Down, &[], 10, 4), NavAction::Move(4));
        assert_eq!(navigate(ViewKind::Icon, Key::Right, &[], 10, 4), NavAction::Move(1));
        assert_eq!(navigate(ViewKind::List, Key::Down, &[], 0, 1), NavAction::Ignored);
        assert_eq!(navigate(ViewKind::List, Key::Enter, &[], 0, 1), NavAction::Ignored);
        assert_eq!(navigate(ViewKind::List, Key::Enter, &[1], 3, 1), NavAction::Activate);
    }

    #[test]
    fn test_key_names() {
        assert_eq!("Return".parse::<Key>().unwrap(), Key::Enter);
        assert_eq!("ArrowDown".parse::<Key>().unwrap(), Key::Down);
        assert_eq!("q".parse::<Key>().unwrap(), Key::Other);
    }
}
