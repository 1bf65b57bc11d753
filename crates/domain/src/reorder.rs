//! Drag-to-reorder gesture handling, shared by the active workout screen and
//! the routine editor. The controller never mutates a list itself: it turns
//! pointer or touch events into a single [`Move`] which the owner applies
//! with [`move_item`].

/// A committed reorder: the item at `from` moves to `to`, shifting the items
/// in between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Move {
    pub from: usize,
    pub to: usize,
}

/// Applies a [`Move`]-style splice. No-op if the indices are equal or out of
/// range.
pub fn move_item<T>(items: &mut Vec<T>, from: usize, to: usize) {
    if from == to || from >= items.len() || to >= items.len() {
        return;
    }
    let item = items.remove(from);
    items.insert(to, item);
}

/// State of one in-flight drag gesture. At most one item is being dragged at
/// a time; committing or cancelling fully resets the controller before the
/// next gesture can start.
#[derive(Debug, Default)]
pub struct ReorderController {
    gesture: Option<Gesture>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Gesture {
    Pointer {
        from: usize,
        target: Option<usize>,
    },
    Touch {
        from: usize,
        start_y: f64,
        item_height: f64,
        len: usize,
        offset: f64,
    },
}

impl ReorderController {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Index of the item currently being dragged, for highlighting.
    #[must_use]
    pub fn dragging(&self) -> Option<usize> {
        match self.gesture {
            Some(Gesture::Pointer { from, .. } | Gesture::Touch { from, .. }) => Some(from),
            None => None,
        }
    }

    pub fn drag_start(&mut self, from: usize) {
        if self.gesture.is_none() {
            self.gesture = Some(Gesture::Pointer { from, target: None });
        }
    }

    pub fn drag_enter(&mut self, index: usize) {
        if let Some(Gesture::Pointer { target, .. }) = &mut self.gesture {
            *target = Some(index);
        }
    }

    /// Commits a pointer drag. Returns the move to apply, if the drop landed
    /// on a different item.
    pub fn drop_commit(&mut self) -> Option<Move> {
        if !matches!(self.gesture, Some(Gesture::Pointer { .. })) {
            return None;
        }
        match self.gesture.take() {
            Some(Gesture::Pointer {
                from,
                target: Some(to),
            }) if from != to => Some(Move { from, to }),
            _ => None,
        }
    }

    /// Clears pointer drag state. Safe to call whether or not a drop happened.
    pub fn drag_end(&mut self) {
        if matches!(self.gesture, Some(Gesture::Pointer { .. })) {
            self.gesture = None;
        }
    }

    pub fn touch_start(&mut self, from: usize, y: f64, item_height: f64, len: usize) {
        if self.gesture.is_none() && from < len && item_height > 0.0 {
            self.gesture = Some(Gesture::Touch {
                from,
                start_y: y,
                item_height,
                len,
                offset: 0.0,
            });
        }
    }

    /// Updates the drag position and returns the vertical offset of the
    /// dragged item for rendering. Callers may rate-limit how often they call
    /// this (e.g. once per animation frame); only the latest position matters
    /// for the commit.
    pub fn touch_move(&mut self, y: f64) -> Option<f64> {
        if let Some(Gesture::Touch { start_y, offset, .. }) = &mut self.gesture {
            *offset = y - *start_y;
            Some(*offset)
        } else {
            None
        }
    }

    /// Index the dragged item would land on if the touch ended now.
    #[must_use]
    pub fn touch_target(&self) -> Option<usize> {
        match self.gesture {
            Some(Gesture::Touch {
                from,
                item_height,
                len,
                offset,
                ..
            }) => Some(target_index(from, offset, item_height, len)),
            _ => None,
        }
    }

    /// Commits a touch drag. Returns the move to apply, if the item ended up
    /// on a different position.
    pub fn touch_end(&mut self) -> Option<Move> {
        if !matches!(self.gesture, Some(Gesture::Touch { .. })) {
            return None;
        }
        match self.gesture.take() {
            Some(Gesture::Touch {
                from,
                item_height,
                len,
                offset,
                ..
            }) => {
                let to = target_index(from, offset, item_height, len);
                (to != from).then_some(Move { from, to })
            }
            _ => None,
        }
    }

    /// An interrupted touch drag still commits: only the latest position
    /// before the interruption matters.
    pub fn touch_cancel(&mut self) -> Option<Move> {
        self.touch_end()
    }
}

fn target_index(from: usize, offset: f64, item_height: f64, len: usize) -> usize {
    #[allow(clippy::cast_possible_truncation)]
    let steps = (offset / item_height).round() as isize;
    #[allow(clippy::cast_possible_wrap)]
    let candidate = (from as isize).saturating_add(steps);
    #[allow(clippy::cast_possible_wrap)]
    let max = len as isize - 1;
    usize::try_from(candidate.clamp(0, max)).unwrap_or(0)
}
