//! Row geometry and viewport scrolling

use crate::{RowSizeStrategy, ViewKind};

/// Row box in content coordinates (pixels)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub fn new(left: i32, top: i32, width: i32, height: i32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn bottom(&self) -> i32 {
        self.top + self.height
    }
}

/// Fixed sizes used by the layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Metrics {
    pub row_height: i32,
    /// List header height
    pub header_height: i32,
    pub cell_width: i32,
    pub cell_height: i32,
}

/// Visible window onto the content
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: i32,
    pub height: i32,
    pub scroll_top: i32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            scroll_top: 0,
        }
    }
}

/// Places rows; `visible[i]` is false for rows under a collapsed parent
pub trait Layout: Send {
    fn arrange(&self, kind: ViewKind, visible: &[bool], metrics: &Metrics, viewport: &Viewport) -> Vec<Rect>;
}

/// Rows stacked top to bottom; icons flow left to right and wrap
#[derive(Debug, Default, Clone, Copy)]
pub struct FlowLayout;

impl Layout for FlowLayout {
    fn arrange(&self, kind: ViewKind, visible: &[bool], metrics: &Metrics, viewport: &Viewport) -> Vec<Rect> {
        match kind {
            ViewKind::Icon => {
                let cols = (viewport.width / metrics.cell_width.max(1)).max(1) as usize;
                (0..visible.len())
                    .map(|i| {
                        Rect::new(
                            (i % cols) as i32 * metrics.cell_width,
                            (i / cols) as i32 * metrics.cell_height,
                            metrics.cell_width,
                            metrics.cell_height,
                        )
                    })
                    .collect()
            }
            ViewKind::List | ViewKind::Tree => {
                let mut top = if kind == ViewKind::List { metrics.header_height } else { 0 };
                visible
                    .iter()
                    .map(|shown| {
                        let height = if *shown { metrics.row_height } else { 0 };
                        let rect = Rect::new(0, top, viewport.width, height);
                        top += height;
                        rect
                    })
                    .collect()
            }
        }
    }
}

/// Items per visual row, inferred from row top offsets (at least 1)
pub fn grid_row_size(tops: &[i32], strategy: RowSizeStrategy) -> usize {
    let Some(first) = tops.first() else {
        return 1;
    };

    let count = match strategy {
        RowSizeStrategy::CountMatching => tops.iter().filter(|top| *top == first).count(),
        RowSizeStrategy::StopAtFirstMismatch => tops.iter().take_while(|top| *top == first).count(),
    };
    count.max(1)
}

/// Snap the scroll offset so `rect` is in view
///
/// `header` is subtracted from the row top and added to the scroll offset.
/// A row whose adjusted top lies inside
/// `[scroll_top + header, scroll_top + height - header]` leaves the offset alone.
pub fn scroll_into_view(rect: Rect, header: i32, viewport: &mut Viewport) -> bool {
    let top = rect.top - header;
    let top_edge = viewport.scroll_top + header;
    let bottom_edge = viewport.scroll_top + viewport.height - header;

    if top < top_edge || top > bottom_edge {
        let changed = viewport.scroll_top != top;
        viewport.scroll_top = top;
        changed
    } else {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics() -> Metrics {
        Metrics {
            row_height: 20,
            header_height: 22,
            cell_width: 80,
            cell_height: 72,
        }
    }

    #[test]
    fn test_list_rows_start_below_header() {
        let rects = FlowLayout.arrange(ViewKind::List, &[true, true], &metrics(), &Viewport::default());
        assert_eq!(rects[0].top, 22);
        assert_eq!(rects[1].top, 42);
    }

    #[test]
    fn test_tree_hides_collapsed_rows() {
        let rects = FlowLayout.arrange(ViewKind::Tree, &[true, false, true], &metrics(), &Viewport::default());
        assert_eq!(rects[1].height, 0);
        assert_eq!(rects[2].top, 20);
    }

    #[test]
    fn test_icon_grid_wraps() {
        let viewport = Viewport {
            width: 250,
            ..Default::default()
        };
        let rects = FlowLayout.arrange(ViewKind::Icon, &[true; 5], &metrics(), &viewport);
        let tops: Vec<_> = rects.iter().map(|r| r.top).collect();
        assert_eq!(tops, vec![0, 0, 0, 72, 72]);
        assert_eq!(rects[4].left, 80);
        assert_eq!(grid_row_size(&tops, RowSizeStrategy::CountMatching), 3);
    }

    #[test]
    fn test_row_size_strategies_on_contiguous_rows() {
        let tops = [0, 0, 0, 72, 72, 72, 144];
        assert_eq!(grid_row_size(&tops, RowSizeStrategy::CountMatching), 3);
        assert_eq!(grid_row_size(&tops, RowSizeStrategy::StopAtFirstMismatch), 3);
    }

    #[test]
    fn test_row_size_strategies_on_reflowed_rows() {
        // Offsets that return to the first row's top after a mismatch
        let tops = [0, 0, 72, 0, 72];
        assert_eq!(grid_row_size(&tops, RowSizeStrategy::CountMatching), 3);
        assert_eq!(grid_row_size(&tops, RowSizeStrategy::StopAtFirstMismatch), 2);
    }

    #[test]
    fn test_row_size_never_zero() {
        assert_eq!(grid_row_size(&[], RowSizeStrategy::CountMatching), 1);
        assert_eq!(grid_row_size(&[], RowSizeStrategy::StopAtFirstMismatch), 1);
    }

    #[test]
    fn test_scroll_snap_leaves_visible_row_alone() {
        let mut viewport = Viewport {
            width: 200,
            height: 100,
            scroll_top: 40,
        };
        // adjusted top 80 lies within [62, 118]
        assert!(!scroll_into_view(Rect::new(0, 102, 200, 20), 22, &mut viewport));
        assert_eq!(viewport.scroll_top, 40);
    }

    #[test]
    fn test_scroll_snap_row_under_header() {
        let mut viewport = Viewport {
            width: 200,
            height: 100,
            scroll_top: 40,
        };
        // adjusted top 50 is past the offset but still under the 22px header
        assert!(scroll_into_view(Rect::new(0, 72, 200, 20), 22, &mut viewport));
        assert_eq!(viewport.scroll_top, 50);

        // row 1 of a list lands at 20 once the header is taken off
        viewport.scroll_top = 40;
        assert!(scroll_into_view(Rect::new(0, 42, 200, 20), 22, &mut viewport));
        assert_eq!(viewport.scroll_top, 20);

        // without a header the band is empty
        viewport.scroll_top = 40;
        assert!(!scroll_into_view(Rect::new(0, 50, 200, 20), 0, &mut viewport));
        assert_eq!(viewport.scroll_top, 40);
    }

    #[test]
    fn test_scroll_snap_above_and_below() {
        let mut viewport = Viewport {
            width: 200,
            height: 100,
            scroll_top: 40,
        };
        assert!(scroll_into_view(Rect::new(0, 42, 200, 20), 22, &mut viewport));
        assert_eq!(viewport.scroll_top, 20);

        assert!(scroll_into_view(Rect::new(0, 300, 200, 20), 0, &mut viewport));
        assert_eq!(viewport.scroll_top, 300);
    }
}
