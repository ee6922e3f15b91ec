//! # TUI Adapter
//!
//! The terminal-specific layer. Owns raw mode and stdout, decodes the byte
//! stream from stdin into events, feeds them through `core::update`, and
//! repaints after anything visible changes.
//!
//! ## Loop
//!
//! Each tick waits up to 100ms for a stdin chunk, then:
//!
//! 1. decodes the chunk and dispatches every event (a quiet interval drops
//!    any half-read escape sequence),
//! 2. checks the resize flag and re-queries geometry if it was raised,
//! 3. drains replies posted by background reply tasks,
//! 4. redraws once if any of the above changed visible state.
//!
//! Reply requests run on tokio tasks so the screen stays live while the
//! collaborator is thinking. Only one request is in flight at a time;
//! `core::update` refuses new messages until it lands.

pub mod decoder;
pub mod event;
pub mod resize;
pub mod terminal;
pub mod ui;

use log::{debug, info, warn};
use std::io::{Write, stdout};
use std::sync::{Arc, mpsc};
use std::time::Duration;

use crate::Provider;
use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::state::App;
use crate::inference::{
    EchoProvider, LmStudioProvider, OllamaProvider, ProviderError, ReplyProvider, ReplyRequest,
    reply_text,
};
use crate::tui::decoder::InputDecoder;
use crate::tui::resize::{ResizeFlag, query_geometry, watch_resize};
use crate::tui::terminal::TerminalMode;

/// Upper bound on how long the loop blocks waiting for input.
pub const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Build a provider from the resolved config.
pub fn build_provider(config: &ResolvedConfig) -> Result<Arc<dyn ReplyProvider>, ProviderError> {
    let provider: Arc<dyn ReplyProvider> = match config.provider {
        Provider::Ollama => Arc::new(OllamaProvider::new(
            config.ollama_base_url.clone(),
            config.reply_timeout,
        )?),
        Provider::LmStudio => Arc::new(LmStudioProvider::new(
            config.lmstudio_base_url.clone(),
            config.reply_timeout,
        )?),
        Provider::Echo => Arc::new(EchoProvider),
    };
    Ok(provider)
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let provider = build_provider(&config)
        .map_err(|e| std::io::Error::other(format!("could not set up reply provider: {e}")))?;
    info!("Using reply provider '{}' with model '{}'", provider.name(), config.model_name);

    let resize = ResizeFlag::new();
    watch_resize(resize.clone());

    let mut app = App::with_welcome(config.model_name.clone(), query_geometry());
    let mut terminal = TerminalMode::new(stdout());
    terminal.enter()?;

    let input = event::spawn_stdin_reader();
    let result = event_loop(&mut app, &mut terminal, provider, &input, &resize);

    terminal.leave();
    result
}

fn event_loop<W: Write>(
    app: &mut App,
    terminal: &mut TerminalMode<W>,
    provider: Arc<dyn ReplyProvider>,
    input: &mpsc::Receiver<Vec<u8>>,
    resize: &ResizeFlag,
) -> std::io::Result<()> {
    // Channel for actions from background reply tasks
    let (tx, rx) = mpsc::channel();
    let mut pending: Option<tokio::task::AbortHandle> = None;
    let mut decoder = InputDecoder::new();

    ui::draw_ui(terminal.writer(), app)?;

    loop {
        let mut actions: Vec<Action> = Vec::new();

        match input.recv_timeout(POLL_INTERVAL) {
            Ok(chunk) => actions.extend(decoder.decode(&chunk).into_iter().map(Action::from)),
            Err(mpsc::RecvTimeoutError::Timeout) => {
                // Nothing followed within the interval: a lone Esc keypress.
                if !decoder.is_ground() {
                    debug!("Dropping incomplete escape sequence");
                    decoder.reset();
                }
            }
            Err(mpsc::RecvTimeoutError::Disconnected) => {
                info!("Input closed, ending session");
                abort_pending(&mut pending);
                return Ok(());
            }
        }

        if resize.take() {
            let geometry = query_geometry();
            if geometry != app.geometry {
                info!("Terminal resized to {}x{}", geometry.cols, geometry.rows);
            }
            // Always repaint: the terminal may have mangled the old frame.
            actions.push(Action::Resize(geometry));
        }

        // Handle background task actions (reply results)
        actions.extend(rx.try_iter());

        let mut needs_redraw = false;
        for action in actions {
            match update(app, action) {
                Effect::None => {}
                Effect::Redraw => needs_redraw = true,
                Effect::RequestReply(text) => {
                    needs_redraw = true;
                    pending = Some(spawn_reply(
                        provider.clone(),
                        text,
                        app.model_name.clone(),
                        tx.clone(),
                    ));
                }
                Effect::Quit => {
                    abort_pending(&mut pending);
                    ui::draw_ui(terminal.writer(), app)?;
                    return Ok(());
                }
            }
        }

        if !app.awaiting_reply {
            pending = None;
        }

        if needs_redraw {
            ui::draw_ui(terminal.writer(), app)?;
        }
    }
}

fn abort_pending(pending: &mut Option<tokio::task::AbortHandle>) {
    if let Some(handle) = pending.take() {
        debug!("Aborting in-flight reply request");
        handle.abort();
    }
}

/// Asks the provider about `prompt` on a background task.
///
/// The outcome, success or failure, comes back as `Action::ReplyReceived`.
pub fn spawn_reply(
    provider: Arc<dyn ReplyProvider>,
    prompt: String,
    model: String,
    tx: mpsc::Sender<Action>,
) -> tokio::task::AbortHandle {
    info!("Spawning reply request ({} chars)", prompt.len());
    let handle = tokio::spawn(async move {
        let request = ReplyRequest {
            prompt: &prompt,
            model: &model,
        };
        let result = provider.reply(request).await;
        if let Err(ref e) = result {
            warn!("Reply request failed: {}", e);
        }
        if tx.send(Action::ReplyReceived(reply_text(result))).is_err() {
            warn!("Failed to send reply: receiver dropped");
        }
    });
    handle.abort_handle()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::{TtyChatConfig, resolve_with_env};
    use crate::core::conversation::Line;
    use crate::test_support::{StubProvider, test_app};

    #[tokio::test]
    async fn test_spawn_reply_posts_result() {
        let (tx, rx) = mpsc::channel();
        let provider: Arc<dyn ReplyProvider> = Arc::new(StubProvider::replying("Bot: hi"));
        spawn_reply(provider, "hello".to_string(), "m".to_string(), tx);

        let action = tokio::task::spawn_blocking(move || rx.recv_timeout(Duration::from_secs(5)))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(action, Action::ReplyReceived("Bot: hi".to_string()));
    }

    #[tokio::test]
    async fn test_spawn_reply_turns_errors_into_text() {
        let (tx, rx) = mpsc::channel();
        let provider: Arc<dyn ReplyProvider> = Arc::new(StubProvider::failing("timed out"));
        spawn_reply(provider, "hello".to_string(), "m".to_string(), tx);

        let action = tokio::task::spawn_blocking(move || rx.recv_timeout(Duration::from_secs(5)))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(
            action,
            Action::ReplyReceived("error: network error: timed out".to_string())
        );
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_loop_submit_reply_then_quit() {
        let mut app = test_app();
        let mut terminal = TerminalMode::detached(Vec::new());
        terminal.enter().unwrap();
        let provider: Arc<dyn ReplyProvider> = Arc::new(StubProvider::replying("Bot: hi"));

        let (input_tx, input_rx) = mpsc::channel();
        input_tx.send(b"hello\r".to_vec()).unwrap();
        let resize = ResizeFlag::new();

        // Send /quit only once the reply has had a chance to land.
        let feeder = tokio::task::spawn_blocking(move || {
            std::thread::sleep(Duration::from_millis(300));
            input_tx.send(b"/quit\r".to_vec()).unwrap();
        });

        let result = tokio::task::block_in_place(|| {
            event_loop(&mut app, &mut terminal, provider, &input_rx, &resize)
        });
        feeder.await.unwrap();
        assert!(result.is_ok());

        let texts: Vec<String> = app.log.iter().map(Line::to_string).collect();
        assert_eq!(texts, vec!["hello", "Bot: hi", "Goodbye!"]);
        assert!(app.input.is_empty());

        terminal.leave();
        let out = String::from_utf8_lossy(terminal.writer()).to_string();
        assert!(out.ends_with("\x1b[?25h\x1b[?1000l\x1b[?1002l\x1b[?1006l"));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_loop_drops_lone_escape_after_quiet_interval() {
        let mut app = test_app();
        let mut terminal = TerminalMode::detached(Vec::new());
        let provider: Arc<dyn ReplyProvider> = Arc::new(StubProvider::replying("ok"));

        let (input_tx, input_rx) = mpsc::channel();
        input_tx.send(b"\x1b".to_vec()).unwrap();
        let resize = ResizeFlag::new();

        let feeder = tokio::task::spawn_blocking(move || {
            std::thread::sleep(POLL_INTERVAL * 3);
            input_tx.send(b"hi\r".to_vec()).unwrap();
            input_tx.send(b"/quit\r".to_vec()).unwrap();
        });

        let result = tokio::task::block_in_place(|| {
            event_loop(&mut app, &mut terminal, provider, &input_rx, &resize)
        });
        feeder.await.unwrap();
        assert!(result.is_ok());

        assert_eq!(app.log.get(0).map(Line::as_str), Some("hi"));
        assert_eq!(app.log.iter().last().map(Line::as_str), Some("Goodbye!"));
    }

    #[test]
    fn test_loop_ends_on_closed_input() {
        let mut app = test_app();
        let mut terminal = TerminalMode::detached(Vec::new());
        let (input_tx, input_rx) = mpsc::channel::<Vec<u8>>();
        drop(input_tx);
        let provider: Arc<dyn ReplyProvider> = Arc::new(StubProvider::replying("unused"));

        let result = event_loop(&mut app, &mut terminal, provider, &input_rx, &ResizeFlag::new());
        assert!(result.is_ok());
        assert!(app.log.is_empty());
    }

    #[test]
    fn test_build_echo_provider() {
        fn no_env(_: &str) -> Option<String> {
            None
        }
        let config =
            resolve_with_env(&TtyChatConfig::default(), Some(Provider::Echo), None, &no_env);
        let provider = build_provider(&config).unwrap();
        assert_eq!(provider.name(), "echo");
    }
}
