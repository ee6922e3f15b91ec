//! Resize notification plumbing.
//!
//! The signal side only flips an atomic flag. The event loop swaps it back
//! each tick and does the real work (re-query, reclamp, redraw) itself.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use log::{debug, warn};

use crate::core::geometry::ScreenGeometry;

#[derive(Debug, Clone, Default)]
pub struct ResizeFlag(Arc<AtomicBool>);

impl ResizeFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn raise(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// Returns whether a resize was signalled since the last call.
    pub fn take(&self) -> bool {
        self.0.swap(false, Ordering::SeqCst)
    }
}

/// Current terminal size, or 24x80 if it can't be determined.
pub fn query_geometry() -> ScreenGeometry {
    ScreenGeometry::from_reported(crossterm::terminal::size())
}

/// Raises `flag` on every window-change signal.
///
/// Must be called from within a tokio runtime.
#[cfg(unix)]
pub fn watch_resize(flag: ResizeFlag) {
    use tokio::signal::unix::{SignalKind, signal};

    let mut winch = match signal(SignalKind::window_change()) {
        Ok(stream) => stream,
        Err(e) => {
            warn!("Could not listen for terminal resizes: {}", e);
            return;
        }
    };
    tokio::spawn(async move {
        while winch.recv().await.is_some() {
            debug!("Window change signal received");
            flag.raise();
        }
    });
}

#[cfg(not(unix))]
pub fn watch_resize(_flag: ResizeFlag) {
    warn!("Resize notifications are not supported on this platform");
}
