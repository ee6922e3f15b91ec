//! # Conversation Log
//!
//! Append-only, capacity-bounded list of display lines.
//!
//! ```text
//! ConversationLog
//! ├── lines: Vec<Line>   // insertion order, never shrinks
//! └── capacity: usize    // MAX_MESSAGES
//! ```
//!
//! Once the log is full, further appends are dropped. Nothing is ever
//! evicted to make room.

use log::debug;
use std::fmt;
use std::ops::Range;

/// Maximum number of lines the log will hold.
pub const MAX_MESSAGES: usize = 100;

/// Maximum characters kept per line. Anything past this is cut off.
pub const MAX_LINE_LEN: usize = 255;

/// A single display line.
///
/// Control characters are flattened to spaces so a line can never move the
/// terminal cursor when painted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line(String);

impl Line {
    pub fn new(text: &str) -> Self {
        Line(
            text.chars()
                .map(|c| if c.is_control() { ' ' } else { c })
                .take(MAX_LINE_LEN)
                .collect(),
        )
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConversationLog {
    lines: Vec<Line>,
    capacity: usize,
}

impl Default for ConversationLog {
    fn default() -> Self {
        Self::new()
    }
}

impl ConversationLog {
    pub fn new() -> Self {
        Self::with_capacity(MAX_MESSAGES)
    }

    fn with_capacity(capacity: usize) -> Self {
        Self {
            lines: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Stores a truncated copy of `text`.
    ///
    /// Returns `false` (and leaves the log untouched) when the log is full.
    pub fn append(&mut self, text: &str) -> bool {
        if self.is_full() {
            debug!("Conversation log full, dropping line ({} chars)", text.len());
            return false;
        }
        self.lines.push(Line::new(text));
        true
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.lines.len() >= self.capacity
    }

    pub fn get(&self, index: usize) -> Option<&Line> {
        self.lines.get(index)
    }

    /// Lines in `range`, with both ends clamped to the current length.
    pub fn range(&self, range: Range<usize>) -> &[Line] {
        let end = range.end.min(self.lines.len());
        let start = range.start.min(end);
        &self.lines[start..end]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Line> {
        self.lines.iter()
    }
}
