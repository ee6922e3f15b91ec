//! # Input Decoder
//!
//! Turns the raw terminal byte stream into [`TuiEvent`]s.
//!
//! The stream has no framing: a single read may hold several keys, or stop
//! halfway through an escape sequence. The decoder keeps its position inside
//! a sequence between calls so a split sequence still decodes once.
//!
//! ```text
//! Ground ──ESC──► SawEsc ──[──► SawCsi ──A/B──► Ground (ScrollUp/Down 1)
//!                   │             │
//!                   │             ├──M──► AwaitMouseButton ─► AwaitMouseX ─► AwaitMouseY ─► Ground
//!                   │             │
//!                   │             └──param/intermediate──► CsiParams ──final──► Ground
//!                   └──other──► Ground (dropped)
//! ```
//!
//! An ESC byte in any state abandons the open sequence and starts a new one.
//! A sequence left open when input goes quiet is dropped with [`reset`].
//!
//! [`reset`]: InputDecoder::reset
//!
//! Mouse reports come in two shapes. The legacy one (`ESC [ M b x y`) uses
//! raw bytes; the button byte alone decides the event. The SGR one
//! (`ESC [ < b ; x ; y M`) uses decimal fields. Only the two wheel buttons
//! produce events in either shape. Anything unrecognized is dropped without
//! leaking its bytes into the prompt.

use crate::tui::event::TuiEvent;

const CTRL_C: u8 = 0x03;
const BACKSPACE: u8 = 0x08;
const LINE_FEED: u8 = 0x0A;
const CARRIAGE_RETURN: u8 = 0x0D;
const ESC: u8 = 0x1B;
const DELETE: u8 = 0x7F;

/// Mouse button codes for the wheel, shared by both report shapes.
const WHEEL_UP: u16 = 0x40;
const WHEEL_DOWN: u16 = 0x41;

/// Lines scrolled per wheel notch.
const WHEEL_STEP: usize = 3;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum DecoderState {
    #[default]
    Ground,
    SawEsc,
    SawCsi,
    /// Inside `CSI <params> <final>`. `sgr` is set when the sequence
    /// opened with `<`; `button` accumulates the first field.
    CsiParams { sgr: bool, button: u16, field: u8 },
    AwaitMouseButton,
    AwaitMouseX,
    AwaitMouseY,
}

#[derive(Debug, Default)]
pub struct InputDecoder {
    state: DecoderState,
}

impl InputDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when no escape sequence is partially consumed.
    pub fn is_ground(&self) -> bool {
        self.state == DecoderState::Ground
    }

    /// Drops a partially consumed sequence. The loop calls this when no
    /// more bytes arrived within one poll interval.
    pub fn reset(&mut self) {
        self.state = DecoderState::Ground;
    }

    /// Decodes one chunk. State carries over to the next call.
    pub fn decode(&mut self, chunk: &[u8]) -> Vec<TuiEvent> {
        chunk.iter().filter_map(|&byte| self.feed(byte)).collect()
    }

    /// Advances the state machine by one byte.
    pub fn feed(&mut self, byte: u8) -> Option<TuiEvent> {
        if byte == ESC {
            self.state = DecoderState::SawEsc;
            return None;
        }
        let (next, event) = match self.state {
            DecoderState::Ground => ground(byte),
            DecoderState::SawEsc => match byte {
                b'[' => (DecoderState::SawCsi, None),
                _ => (DecoderState::Ground, None),
            },
            DecoderState::SawCsi => match byte {
                b'A' => (DecoderState::Ground, Some(TuiEvent::ScrollUp(1))),
                b'B' => (DecoderState::Ground, Some(TuiEvent::ScrollDown(1))),
                b'M' => (DecoderState::AwaitMouseButton, None),
                b'<' => (
                    DecoderState::CsiParams {
                        sgr: true,
                        button: 0,
                        field: 0,
                    },
                    None,
                ),
                0x20..=0x3F => (
                    DecoderState::CsiParams {
                        sgr: false,
                        button: 0,
                        field: 0,
                    },
                    None,
                ),
                _ => (DecoderState::Ground, None),
            },
            DecoderState::CsiParams { sgr, button, field } => match byte {
                b'0'..=b'9' if field == 0 => (
                    DecoderState::CsiParams {
                        sgr,
                        button: button
                            .saturating_mul(10)
                            .saturating_add(u16::from(byte - b'0')),
                        field,
                    },
                    None,
                ),
                b';' => (
                    DecoderState::CsiParams {
                        sgr,
                        button,
                        field: field.saturating_add(1),
                    },
                    None,
                ),
                0x20..=0x3F => (self.state, None),
                b'M' if sgr && field == 2 => (DecoderState::Ground, wheel(button)),
                // Final byte of a sequence we don't handle (or an SGR release).
                0x40..=0x7E => (DecoderState::Ground, None),
                _ => (DecoderState::Ground, None),
            },
            DecoderState::AwaitMouseButton => {
                (DecoderState::AwaitMouseX, wheel(u16::from(byte)))
            }
            DecoderState::AwaitMouseX => (DecoderState::AwaitMouseY, None),
            DecoderState::AwaitMouseY => (DecoderState::Ground, None),
        };
        self.state = next;
        event
    }
}

fn ground(byte: u8) -> (DecoderState, Option<TuiEvent>) {
    let event = match byte {
        CTRL_C => Some(TuiEvent::Interrupt),
        DELETE | BACKSPACE => Some(TuiEvent::Backspace),
        LINE_FEED | CARRIAGE_RETURN => Some(TuiEvent::Submit),
        0x20..=0x7E => Some(TuiEvent::Char(char::from(byte))),
        _ => None,
    };
    (DecoderState::Ground, event)
}

fn wheel(button: u16) -> Option<TuiEvent> {
    match button {
        WHEEL_UP => Some(TuiEvent::ScrollUp(WHEEL_STEP)),
        WHEEL_DOWN => Some(TuiEvent::ScrollDown(WHEEL_STEP)),
        _ => None,
    }
}
