//! Terminal size snapshot and the screen layout derived from it.

use log::warn;
use std::io;

pub const DEFAULT_ROWS: u16 = 24;
pub const DEFAULT_COLS: u16 = 80;

/// Rows taken by the status line, the input line and the blank last row.
const CHROME_ROWS: u16 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenGeometry {
    pub rows: u16,
    pub cols: u16,
}

impl Default for ScreenGeometry {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
        }
    }
}

impl ScreenGeometry {
    pub fn new(rows: u16, cols: u16) -> Self {
        Self { rows, cols }
    }

    /// Builds a snapshot from a `(cols, rows)` size report.
    ///
    /// A failed or zero-sized report falls back to 24x80.
    pub fn from_reported(size: io::Result<(u16, u16)>) -> Self {
        match size {
            Ok((cols, rows)) if cols > 0 && rows > 0 => Self { rows, cols },
            Ok((cols, rows)) => {
                warn!("Terminal reported {cols}x{rows}, using default geometry");
                Self::default()
            }
            Err(e) => {
                warn!("Terminal size query failed ({e}), using default geometry");
                Self::default()
            }
        }
    }

    /// Height of the conversation viewport.
    pub fn visible_rows(&self) -> usize {
        usize::from(self.rows.saturating_sub(CHROME_ROWS))
    }

    /// 1-based row of the first conversation line.
    pub fn chat_top_row(&self) -> u16 {
        2
    }

    /// 1-based row of the input line.
    pub fn input_row(&self) -> u16 {
        self.rows.saturating_sub(1).max(1)
    }
}
