//! # Renderer
//!
//! Paints the whole screen from `App`. Every pass repaints every row it owns,
//! so calling it twice with the same state writes the same bytes.
//!
//! ```text
//! row 1          Status: Chat App | Messages: N     (bold)
//! rows 2..=R-2   conversation viewport
//! row R-1        > input text_
//! row R          (unused)
//! ```

use std::io::{self, Write};

use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::style::{Attribute, Print, SetAttribute};
use crossterm::terminal::{Clear, ClearType};

use crate::core::state::App;

pub const PROMPT: &str = "> ";

/// Draws status line, conversation and prompt, then flushes.
pub fn draw_ui<W: Write>(out: &mut W, app: &App) -> io::Result<()> {
    draw_status(out, app)?;
    draw_chat(out, app)?;
    draw_input(out, app)?;
    out.flush()
}

pub fn status_text(app: &App) -> String {
    let mut text = format!("Status: Chat App | Messages: {}", app.log.len());
    if app.awaiting_reply {
        text.push_str(" | waiting for reply...");
    }
    text
}

pub fn draw_status<W: Write>(out: &mut W, app: &App) -> io::Result<()> {
    let text = status_text(app);
    queue!(
        out,
        MoveTo(0, 0),
        SetAttribute(Attribute::Bold),
        Print(clip(&text, usize::from(app.geometry.cols))),
        SetAttribute(Attribute::Reset),
        Clear(ClearType::UntilNewLine)
    )
}

pub fn draw_chat<W: Write>(out: &mut W, app: &App) -> io::Result<()> {
    let top = app.geometry.chat_top_row() - 1;
    let visible = app.visible_rows();
    let width = usize::from(app.geometry.cols);

    for row in 0..visible {
        queue!(out, MoveTo(0, screen_row(top, row)), Clear(ClearType::UntilNewLine))?;
    }

    let window = app.scroll.window(app.log.len(), visible);
    for (row, line) in app.log.range(window).iter().enumerate() {
        queue!(
            out,
            MoveTo(0, screen_row(top, row)),
            Print(clip(line.as_str(), width)),
            Clear(ClearType::UntilNewLine)
        )?;
    }
    Ok(())
}

/// Draws the prompt and leaves the cursor right after the typed text.
///
/// If the text is wider than the screen only its tail is shown.
pub fn draw_input<W: Write>(out: &mut W, app: &App) -> io::Result<()> {
    let row = app.geometry.input_row() - 1;
    let room = usize::from(app.geometry.cols).saturating_sub(PROMPT.len() + 1);
    let shown = tail(app.input.as_str(), room);
    let cursor_col = PROMPT.len() + shown.chars().count();

    queue!(
        out,
        MoveTo(0, row),
        Clear(ClearType::UntilNewLine),
        MoveTo(0, row),
        Print(PROMPT),
        Print(shown),
        MoveTo(u16::try_from(cursor_col).unwrap_or(u16::MAX), row)
    )
}

fn screen_row(top: u16, offset: usize) -> u16 {
    top.saturating_add(u16::try_from(offset).unwrap_or(u16::MAX))
}

/// First `width` characters of `text`.
fn clip(text: &str, width: usize) -> &str {
    match text.char_indices().nth(width) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Last `width` characters of `text`.
fn tail(text: &str, width: usize) -> &str {
    let len = text.chars().count();
    if len <= width {
        return text;
    }
    match text.char_indices().nth(len - width) {
        Some((idx, _)) => &text[idx..],
        None => "",
    }
}
