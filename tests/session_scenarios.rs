//! End-to-end session scenarios: decoded input bytes go through the reducer,
//! replies come from a stub collaborator, and the screen is rendered into a
//! byte buffer.

use async_trait::async_trait;
use ttychat::core::action::{Action, Effect, update};
use ttychat::core::conversation::MAX_MESSAGES;
use ttychat::core::geometry::ScreenGeometry;
use ttychat::core::scroll::max_offset;
use ttychat::core::state::App;
use ttychat::inference::{ProviderError, ReplyProvider, ReplyRequest, reply_text};
use ttychat::tui::decoder::InputDecoder;
use ttychat::tui::terminal::TerminalMode;
use ttychat::tui::ui::draw_ui;

struct CannedProvider(&'static str);

#[async_trait]
impl ReplyProvider for CannedProvider {
    fn name(&self) -> &str {
        "canned"
    }

    async fn reply(&self, _request: ReplyRequest<'_>) -> Result<String, ProviderError> {
        Ok(self.0.to_string())
    }
}

/// Feeds raw bytes through the decoder and reducer, running any reply
/// request to completion on the spot.
fn feed(
    app: &mut App,
    decoder: &mut InputDecoder,
    bytes: &[u8],
    provider: &dyn ReplyProvider,
) -> Vec<Effect> {
    let mut effects = Vec::new();
    for event in decoder.decode(bytes) {
        let effect = update(app, Action::from(event));
        if let Effect::RequestReply(text) = &effect {
            let request = ReplyRequest {
                prompt: text,
                model: "test-model",
            };
            let reply = reply_text(tokio_test::block_on(provider.reply(request)));
            update(app, Action::ReplyReceived(reply));
        }
        effects.push(effect);
    }
    effects
}

fn texts(app: &App) -> Vec<String> {
    app.log.iter().map(|l| l.as_str().to_string()).collect()
}

fn new_app() -> App {
    App::new("test-model".to_string(), ScreenGeometry::new(24, 80))
}

#[test]
fn test_hello_gets_reply() {
    let mut app = new_app();
    let mut decoder = InputDecoder::new();

    feed(&mut app, &mut decoder, b"hello\r", &CannedProvider("Bot: hi"));

    assert_eq!(texts(&app), vec!["hello", "Bot: hi"]);
    assert!(app.input.is_empty());
    assert!(!app.awaiting_reply);
}

#[test]
fn test_quit_restores_terminal() {
    let mut app = new_app();
    let mut decoder = InputDecoder::new();
    let mut terminal = TerminalMode::detached(Vec::new());
    terminal.enter().unwrap();

    let effects = feed(&mut app, &mut decoder, b"/quit\r", &CannedProvider("unused"));
    assert_eq!(effects.last(), Some(&Effect::Quit));

    draw_ui(terminal.writer(), &app).unwrap();
    terminal.leave();

    assert_eq!(texts(&app), vec!["Goodbye!"]);
    let out = String::from_utf8_lossy(terminal.writer()).to_string();
    assert!(out.ends_with("\x1b[?25h\x1b[?1000l\x1b[?1002l\x1b[?1006l"));
    assert!(!terminal.is_active());
}

#[test]
fn test_ctrl_c_says_goodbye() {
    let mut app = new_app();
    let mut decoder = InputDecoder::new();

    let effects = feed(&mut app, &mut decoder, b"abc\x03", &CannedProvider("unused"));

    assert_eq!(effects.last(), Some(&Effect::Quit));
    assert_eq!(texts(&app), vec!["Goodbye! (Ctrl+C)"]);
}

#[test]
fn test_backspace_edits_before_submit() {
    let mut app = new_app();
    let mut decoder = InputDecoder::new();

    feed(&mut app, &mut decoder, b"helpp\x7f\x7fo\r", &CannedProvider("ok"));

    assert_eq!(texts(&app), vec!["helo", "ok"]);
}

#[test]
fn test_unknown_command_is_reported() {
    let mut app = new_app();
    let mut decoder = InputDecoder::new();

    feed(&mut app, &mut decoder, b"/help\r", &CannedProvider("unused"));

    assert_eq!(texts(&app), vec!["Unknown command. Type /quit to exit."]);
}

#[test]
fn test_101_lines_capped_at_100() {
    let mut app = new_app();
    for i in 0..=MAX_MESSAGES {
        app.push_line(&format!("message {i}"));
    }

    assert_eq!(app.log.len(), MAX_MESSAGES);
    assert!(!texts(&app).contains(&format!("message {MAX_MESSAGES}")));
}

#[test]
fn test_wheel_and_arrows_scroll_with_bottom_follow() {
    let mut app = new_app();
    let mut decoder = InputDecoder::new();
    for i in 0..40 {
        app.push_line(&format!("message {i}"));
    }
    let rows = app.visible_rows();
    assert_eq!(app.scroll.offset(), max_offset(40, rows));

    // Wheel up (legacy report), then arrow up split across reads.
    feed(&mut app, &mut decoder, &[0x1B, b'[', b'M', 0x40, 0x21, 0x21], &CannedProvider(""));
    feed(&mut app, &mut decoder, b"\x1b[", &CannedProvider(""));
    feed(&mut app, &mut decoder, b"A", &CannedProvider(""));
    assert_eq!(app.scroll.offset(), max_offset(40, rows) - 4);

    // Scrolled back: new lines don't move the view.
    app.push_line("new");
    assert_eq!(app.scroll.offset(), max_offset(40, rows) - 4);

    // Scroll back down to the bottom and follow again.
    feed(&mut app, &mut decoder, b"\x1b[<65;1;1M\x1b[<65;1;1M", &CannedProvider(""));
    assert_eq!(app.scroll.offset(), max_offset(41, rows));
    app.push_line("newer");
    assert_eq!(app.scroll.offset(), max_offset(42, rows));
}

#[test]
fn test_resize_while_pinned_reclamps() {
    let mut app = new_app();
    for i in 0..50 {
        app.push_line(&format!("message {i}"));
    }

    update(&mut app, Action::Resize(ScreenGeometry::new(10, 40)));

    assert_eq!(app.visible_rows(), 7);
    assert_eq!(app.scroll.offset(), max_offset(50, 7));

    let mut out = Vec::new();
    draw_ui(&mut out, &app).unwrap();
    let out = String::from_utf8(out).unwrap();
    assert!(out.contains("message 49"));
    assert!(!out.contains("message 42"));
}

#[test]
fn test_render_twice_is_identical() {
    let mut app = new_app();
    let mut decoder = InputDecoder::new();
    feed(&mut app, &mut decoder, b"hello\rtyping", &CannedProvider("Bot: hi"));

    let mut first = Vec::new();
    let mut second = Vec::new();
    draw_ui(&mut first, &app).unwrap();
    draw_ui(&mut second, &app).unwrap();

    assert_eq!(first, second);
}
