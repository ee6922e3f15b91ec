//! # Terminal Mode
//!
//! Raw mode plus the visual toggles the session needs: hidden cursor,
//! cleared screen and wheel-capable mouse reporting.
//!
//! `leave()` is idempotent and also runs on drop, so every exit path
//! (quit, Ctrl+C, an error bubbling out of the loop, a panic unwinding)
//! puts the terminal back the way it was found.

use std::fmt;
use std::io::{self, Write};

use crossterm::cursor::{Hide, Show};
use crossterm::terminal::{self, Clear, ClearType};
use crossterm::{Command, queue};
use log::{info, warn};

/// Mouse reporting for button presses and wheel events, SGR encoded.
#[derive(Debug, Clone, Copy)]
pub struct EnableWheelReporting;

impl Command for EnableWheelReporting {
    fn write_ansi(&self, f: &mut impl fmt::Write) -> fmt::Result {
        f.write_str("\x1b[?1000h\x1b[?1002h\x1b[?1006h")
    }

    #[cfg(windows)]
    fn execute_winapi(&self) -> io::Result<()> {
        Ok(())
    }
}

#[derive(Debug, Clone, Copy)]
pub struct DisableWheelReporting;

impl Command for DisableWheelReporting {
    fn write_ansi(&self, f: &mut impl fmt::Write) -> fmt::Result {
        f.write_str("\x1b[?1000l\x1b[?1002l\x1b[?1006l")
    }

    #[cfg(windows)]
    fn execute_winapi(&self) -> io::Result<()> {
        Ok(())
    }
}

#[derive(Debug)]
pub enum TerminalError {
    /// Could not capture the terminal attributes or switch to raw mode.
    /// Startup cannot continue.
    Attributes(io::Error),
    /// Writing escape sequences failed.
    Io(io::Error),
}

impl fmt::Display for TerminalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TerminalError::Attributes(e) => write!(f, "failed to enter raw mode: {e}"),
            TerminalError::Io(e) => write!(f, "terminal I/O error: {e}"),
        }
    }
}

impl std::error::Error for TerminalError {}

impl From<TerminalError> for io::Error {
    fn from(e: TerminalError) -> Self {
        let message = e.to_string();
        match e {
            TerminalError::Attributes(inner) | TerminalError::Io(inner) => {
                io::Error::new(inner.kind(), message)
            }
        }
    }
}

/// Owns the output stream while the session runs.
pub struct TerminalMode<W: Write> {
    out: W,
    /// Whether raw mode is toggled on the controlling terminal. Off for
    /// writers that are not a terminal (tests).
    manage_raw_mode: bool,
    active: bool,
}

impl<W: Write> TerminalMode<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            manage_raw_mode: true,
            active: false,
        }
    }

    /// Escape sequences only; the terminal's line discipline is left alone.
    pub fn detached(out: W) -> Self {
        Self {
            out,
            manage_raw_mode: false,
            active: false,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn writer(&mut self) -> &mut W {
        &mut self.out
    }

    pub fn enter(&mut self) -> Result<(), TerminalError> {
        if self.active {
            return Ok(());
        }
        if self.manage_raw_mode {
            terminal::enable_raw_mode().map_err(TerminalError::Attributes)?;
        }
        self.active = true;

        queue!(self.out, Hide, Clear(ClearType::All), EnableWheelReporting)
            .and_then(|()| self.out.flush())
            .map_err(TerminalError::Io)?;
        info!("Terminal modes enabled (raw, hidden cursor, wheel reporting)");
        Ok(())
    }

    /// Undoes everything `enter()` did. Safe to call any number of times.
    pub fn leave(&mut self) {
        if !self.active {
            return;
        }
        self.active = false;

        if let Err(e) = queue!(self.out, Show, DisableWheelReporting).and_then(|()| self.out.flush())
        {
            warn!("Failed to reset terminal modes: {}", e);
        }
        if self.manage_raw_mode
            && let Err(e) = terminal::disable_raw_mode()
        {
            warn!("Failed to restore terminal attributes: {}", e);
        }
        info!("Terminal restored");
    }
}

impl<W: Write> Drop for TerminalMode<W> {
    fn drop(&mut self) {
        self.leave();
    }
}
