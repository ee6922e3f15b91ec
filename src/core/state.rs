//! # Application State
//!
//! The whole session in one place. Owned by the event loop and only
//! changed through `update(state, action)` in action.rs.
//!
//! ```text
//! App
//! ├── log: ConversationLog      // display lines, append-only
//! ├── scroll: ScrollCursor      // first visible line
//! ├── input: InputLine          // text at the prompt
//! ├── geometry: ScreenGeometry  // last known terminal size
//! ├── model_name: String        // passed along with each reply request
//! └── awaiting_reply: bool      // a reply request is in flight
//! ```

use crate::core::conversation::ConversationLog;
use crate::core::geometry::ScreenGeometry;
use crate::core::input_line::InputLine;
use crate::core::scroll::ScrollCursor;

/// Lines shown before the user types anything.
pub const WELCOME_LINES: [&str; 3] = [
    "Welcome to TTY Chat!",
    "Type messages below and press Enter.",
    "Use arrow keys or mouse wheel to scroll.",
];

#[derive(Debug, Clone)]
pub struct App {
    pub log: ConversationLog,
    pub scroll: ScrollCursor,
    pub input: InputLine,
    pub geometry: ScreenGeometry,
    pub model_name: String,
    pub awaiting_reply: bool,
}

impl App {
    /// An empty session. See [`App::with_welcome`] for the startup screen.
    pub fn new(model_name: String, geometry: ScreenGeometry) -> Self {
        Self {
            log: ConversationLog::new(),
            scroll: ScrollCursor::new(),
            input: InputLine::new(),
            geometry,
            model_name,
            awaiting_reply: false,
        }
    }

    pub fn with_welcome(model_name: String, geometry: ScreenGeometry) -> Self {
        let mut app = Self::new(model_name, geometry);
        for line in WELCOME_LINES {
            app.push_line(line);
        }
        app
    }

    pub fn visible_rows(&self) -> usize {
        self.geometry.visible_rows()
    }

    /// Appends a line and keeps a bottom-pinned view pinned.
    pub fn push_line(&mut self, text: &str) {
        let old_count = self.log.len();
        if self.log.append(text) {
            self.scroll
                .reclamp_on_append(old_count, self.log.len(), self.visible_rows());
        }
    }

    pub fn scroll_up(&mut self, n: usize) {
        self.scroll.scroll_up(n);
    }

    pub fn scroll_down(&mut self, n: usize) {
        self.scroll.scroll_down(n, self.log.len(), self.visible_rows());
    }

    pub fn resize(&mut self, geometry: ScreenGeometry) {
        let old_rows = self.visible_rows();
        self.geometry = geometry;
        self.scroll
            .reclamp_on_resize(self.log.len(), old_rows, self.visible_rows());
    }
}
