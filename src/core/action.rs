//! # Actions
//!
//! Everything that can happen in a session becomes an `Action`.
//! User presses Enter? That's `Action::Submit`.
//! The reply collaborator answers? That's `Action::ReplyReceived(text)`.
//!
//! The `update()` function applies an action to the state and returns the
//! `Effect` the event loop has to carry out. No I/O happens here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```

use log::{debug, info};

use crate::core::geometry::ScreenGeometry;
use crate::core::state::App;

pub const COMMAND_MARKER: char = '/';
pub const INTERRUPT_FAREWELL: &str = "Goodbye! (Ctrl+C)";
pub const QUIT_FAREWELL: &str = "Goodbye!";
pub const UNKNOWN_COMMAND: &str = "Unknown command. Type /quit to exit.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Interrupt,
    Backspace,
    Submit,
    InsertChar(char),
    ScrollUp(usize),
    ScrollDown(usize),
    Resize(ScreenGeometry),
    /// Result of a reply request, already flattened to display text.
    ReplyReceived(String),
}

/// What the event loop must do after an `update()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Nothing visible changed.
    None,
    Redraw,
    /// Redraw, then ask the reply collaborator about this text.
    RequestReply(String),
    /// Redraw one last time, restore the terminal and stop.
    Quit,
}

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Quit,
    Unknown,
}

fn parse_command(line: &str) -> Option<Command> {
    let body = line.strip_prefix(COMMAND_MARKER)?;
    let is_quit = body == "quit" || body.starts_with("quit ");
    Some(if is_quit { Command::Quit } else { Command::Unknown })
}

pub fn update(app: &mut App, action: Action) -> Effect {
    debug!("update: {:?}", action);
    match action {
        Action::Interrupt => {
            app.push_line(INTERRUPT_FAREWELL);
            Effect::Quit
        }
        Action::Backspace => {
            if app.input.pop() {
                Effect::Redraw
            } else {
                Effect::None
            }
        }
        Action::InsertChar(c) => {
            if app.input.push(c) {
                Effect::Redraw
            } else {
                Effect::None
            }
        }
        Action::ScrollUp(n) => {
            app.scroll_up(n);
            Effect::Redraw
        }
        Action::ScrollDown(n) => {
            app.scroll_down(n);
            Effect::Redraw
        }
        Action::Resize(geometry) => {
            app.resize(geometry);
            Effect::Redraw
        }
        Action::ReplyReceived(text) => {
            app.awaiting_reply = false;
            app.push_line(&text);
            Effect::Redraw
        }
        Action::Submit => submit(app),
    }
}

fn submit(app: &mut App) -> Effect {
    if app.input.is_empty() {
        return Effect::None;
    }

    match parse_command(app.input.as_str()) {
        Some(Command::Quit) => {
            info!("Quit command received");
            app.input.clear();
            app.push_line(QUIT_FAREWELL);
            Effect::Quit
        }
        Some(Command::Unknown) => {
            info!("Unknown command: {}", app.input.as_str());
            app.input.clear();
            app.push_line(UNKNOWN_COMMAND);
            Effect::Redraw
        }
        None if app.awaiting_reply => {
            // Keep the text so it can be sent once the pending reply lands.
            debug!("Submit ignored: reply still pending");
            Effect::None
        }
        None => {
            let text = app.input.as_str().to_string();
            app.push_line(&text);
            app.input.clear();
            app.awaiting_reply = true;
            Effect::RequestReply(text)
        }
    }
}
