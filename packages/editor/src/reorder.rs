//! # Drag Reorder
//!
//! Pure index math behind drag-to-reorder lists. The UI tracks which item is
//! dragged and which item is under the pointer; this module turns that into a
//! `(from, to)` move and nothing else.

use serde::{Deserialize, Serialize};

/// Which half of the hovered item the pointer is in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DropPosition {
    Before,
    After,
}

impl DropPosition {
    /// `offset` is the pointer's distance from the top of an item of the
    /// given `height`. The upper half means `Before`.
    pub fn from_pointer(offset: f64, height: f64) -> Self {
        if offset < height / 2.0 {
            DropPosition::Before
        } else {
            DropPosition::After
        }
    }
}

/// A single move-one-element operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reorder {
    pub from: usize,
    pub to: usize,
}

/// Whether a drop indicator should be drawn. Hovering the dragged item itself
/// never shows one.
pub fn shows_indicator<T: PartialEq>(dragged: &T, hovered: &T) -> bool {
    dragged != hovered
}

/// Resolve a drop into the move to perform.
///
/// Returns `None` for a self-drop, for ids not in `ordered`, and for drops
/// that would leave the list unchanged.
pub fn resolve_drop<T: PartialEq>(
    ordered: &[T],
    dragged: &T,
    hovered: &T,
    position: DropPosition,
) -> Option<Reorder> {
    if !shows_indicator(dragged, hovered) {
        return None;
    }

    let from = ordered.iter().position(|item| item == dragged)?;
    let target = ordered.iter().position(|item| item == hovered)?;

    let mut to = match position {
        DropPosition::Before => target,
        DropPosition::After => target + 1,
    };
    // Removing the dragged item first shifts every later index down by one
    if from < to {
        to -= 1;
    }

    (from != to).then_some(Reorder { from, to })
}

/// Remove the element at `from` and reinsert it at `to`.
///
/// Returns `false` without touching the list if either index is out of range.
pub fn move_item<T>(items: &mut Vec<T>, from: usize, to: usize) -> bool {
    if from >= items.len() || to >= items.len() {
        return false;
    }
    let item = items.remove(from);
    items.insert(to, item);
    true
}
