//! The line being typed at the prompt.
//!
//! Only single-character append and trailing removal are supported; there is
//! no cursor movement inside the line.

use crate::core::conversation::MAX_LINE_LEN;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputLine {
    buffer: String,
}

impl InputLine {
    pub fn new() -> Self {
        Self {
            buffer: String::with_capacity(MAX_LINE_LEN),
        }
    }

    /// Appends `c` unless the line is already at capacity.
    pub fn push(&mut self, c: char) -> bool {
        if self.len() >= MAX_LINE_LEN {
            return false;
        }
        self.buffer.push(c);
        true
    }

    /// Removes the trailing character, if any.
    pub fn pop(&mut self) -> bool {
        self.buffer.pop().is_some()
    }

    /// Empties the line, keeping its allocation.
    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    /// Length in characters.
    pub fn len(&self) -> usize {
        self.buffer.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.buffer
    }
}
