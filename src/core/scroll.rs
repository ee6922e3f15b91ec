//! # Scroll Cursor
//!
//! Tracks which slice of the conversation log is on screen.
//!
//! The offset is the index of the first visible line. It always sits in
//! `0..=max_offset`, where `max_offset = count - visible_rows` (or 0 when
//! everything fits). Sitting at `max_offset` means the view is pinned to the
//! newest content; appends and resizes keep a pinned cursor pinned, and leave
//! a scrolled-back cursor where the user put it.
//!
//! ```text
//!  log index      offset = 0            offset = max_offset
//!     0   ┌──────────────┐ ◄ view
//!     1   │              │
//!     ..  └──────────────┘
//!     ..                                 ┌──────────────┐ ◄ view
//!  count-1                               └──────────────┘
//! ```

use std::ops::Range;

/// Largest valid offset for `count` lines shown through `visible_rows` rows.
pub fn max_offset(count: usize, visible_rows: usize) -> usize {
    count.saturating_sub(visible_rows)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScrollCursor {
    offset: usize,
}

impl ScrollCursor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    /// At (or past) the bottom of a log of `count` lines.
    fn is_pinned(&self, count: usize, visible_rows: usize) -> bool {
        self.offset >= max_offset(count, visible_rows)
    }

    pub fn scroll_up(&mut self, n: usize) {
        self.offset = self.offset.saturating_sub(n);
    }

    pub fn scroll_down(&mut self, n: usize, count: usize, visible_rows: usize) {
        let max = max_offset(count, visible_rows);
        self.offset = self.offset.saturating_add(n).min(max);
    }

    /// Bottom-follow after the log grew from `old_count` to `new_count`.
    pub fn reclamp_on_append(&mut self, old_count: usize, new_count: usize, visible_rows: usize) {
        let new_max = max_offset(new_count, visible_rows);
        if self.is_pinned(old_count, visible_rows) {
            self.offset = new_max;
        } else {
            self.offset = self.offset.min(new_max);
        }
    }

    /// Re-applies the upper bound after the viewport changed height.
    pub fn reclamp_on_resize(&mut self, count: usize, old_rows: usize, new_rows: usize) {
        let new_max = max_offset(count, new_rows);
        if self.is_pinned(count, old_rows) {
            self.offset = new_max;
        } else {
            self.offset = self.offset.min(new_max);
        }
    }

    /// Log indices currently on screen.
    pub fn window(&self, count: usize, visible_rows: usize) -> Range<usize> {
        let start = self.offset.min(count);
        let end = start.saturating_add(visible_rows).min(count);
        start..end
    }
}
