use std::io::Read;
use std::sync::mpsc;
use std::thread;

use log::{debug, info, warn};

use crate::core::action::Action;

/// Largest chunk handed to the decoder in one go.
const READ_CHUNK: usize = 32;

/// Discrete input events decoded from the raw byte stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TuiEvent {
    /// Ctrl+C
    Interrupt,
    Backspace,
    /// Enter
    Submit,
    Char(char),
    ScrollUp(usize),
    ScrollDown(usize),
}

impl From<TuiEvent> for Action {
    fn from(event: TuiEvent) -> Self {
        match event {
            TuiEvent::Interrupt => Action::Interrupt,
            TuiEvent::Backspace => Action::Backspace,
            TuiEvent::Submit => Action::Submit,
            TuiEvent::Char(c) => Action::InsertChar(c),
            TuiEvent::ScrollUp(n) => Action::ScrollUp(n),
            TuiEvent::ScrollDown(n) => Action::ScrollDown(n),
        }
    }
}

/// Reads stdin on a dedicated thread and forwards raw chunks.
///
/// The channel disconnects once stdin hits EOF or fails.
pub fn spawn_stdin_reader() -> mpsc::Receiver<Vec<u8>> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let stdin = std::io::stdin();
        let mut stdin = stdin.lock();
        let mut buf = [0u8; READ_CHUNK];
        loop {
            match stdin.read(&mut buf) {
                Ok(0) => {
                    info!("stdin closed");
                    break;
                }
                Ok(n) => {
                    debug!("Read {} bytes from stdin", n);
                    if tx.send(buf[..n].to_vec()).is_err() {
                        break;
                    }
                }
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    warn!("stdin read failed: {}", e);
                    break;
                }
            }
        }
    });
    rx
}
