//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Send Pipeline
//!
//! ```text
//! Enter ─▶ update(Submit) ─▶ Effect::SpawnRequest ─▶ TypingIndicator::show
//!                                                  └▶ tokio::spawn(fetch_reply_or_fallback)
//! rx ◀── Action::ReplyReceived ◀────────────────────────┘
//!  └▶ TypingIndicator::hide ─▶ update(ReplyReceived)
//! ```
//!
//! ## Redraw Strategy
//!
//! - **Typing**: draws every ~80ms so the dots animate.
//! - **Idle**: sleeps up to 500ms, only redraws on events or terminal resize.

mod component;
mod components;
mod event;
pub mod markup;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::{Arc, mpsc};
use std::time::Duration;

use crossterm::cursor::{Hide, SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
};
use crossterm::execute;
use ratatui::DefaultTerminal;

use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::locale::Locale;
use crate::core::state::{App, local_today};
use crate::core::storage::{FileStore, KeyValueStore};
use crate::inference::{GeminiProvider, GeminiSettings, ReplyFetcher, fetch_reply_or_fallback};
use crate::tui::component::EventHandler;
use crate::tui::components::{
    InputBox, InputEvent, MessageListState, SidebarEvent, SidebarState, TypingIndicator,
};
use crate::tui::event::{TuiEvent, poll_event};

const TYPING_POLL: Duration = Duration::from_millis(80);
const IDLE_POLL: Duration = Duration::from_millis(500);

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub message_list: MessageListState,
    pub input_box: InputBox,
    pub sidebar: SidebarState,
    pub typing: TypingIndicator,
}

impl TuiState {
    pub fn new(locale: Locale) -> Self {
        Self {
            message_list: MessageListState::new(),
            input_box: InputBox::new(locale),
            sidebar: SidebarState::default(),
            typing: TypingIndicator::new(),
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            Show,
            // Steady: set_cursor_position on every draw resets the blink timer
            SetCursorStyle::SteadyBlock,
        )?;
        info!("Terminal modes enabled (mouse, bracketed paste, steady block cursor)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            DisableMouseCapture,
            DisableBracketedPaste,
            Hide
        );
    }
}

/// Build the app from resolved configuration: file-backed sessions plus the
/// Gemini reply fetcher.
pub fn build_app(config: &ResolvedConfig) -> std::io::Result<App> {
    let store: Arc<dyn KeyValueStore> = Arc::new(
        FileStore::open(config.data_dir.clone()).map_err(|e| std::io::Error::other(e.to_string()))?,
    );
    let fetcher: Arc<dyn ReplyFetcher> = Arc::new(GeminiProvider::new(GeminiSettings::from(config)));

    Ok(App::new(
        fetcher,
        store,
        &config.session_prefix,
        config.locale,
        config.model_name.clone(),
        local_today,
    ))
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let mut app = build_app(&config)?;
    let mut tui = TuiState::new(app.locale);
    info!(
        "Opened session {} with {} stored messages",
        app.session.key(),
        app.session.messages().len()
    );

    let mut terminal = ratatui::init();
    let result = TerminalModeGuard::new()
        .and_then(|_guard| event_loop(&mut terminal, &mut app, &mut tui));
    tui.typing.hide();
    ratatui::restore();
    result
}

fn event_loop(terminal: &mut DefaultTerminal, app: &mut App, tui: &mut TuiState) -> std::io::Result<()> {
    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();
    let mut needs_redraw = true; // Force first frame

    loop {
        tui.input_box.disabled = app.is_loading;

        let animating = tui.typing.is_visible();
        if animating {
            needs_redraw = true;
        }

        if needs_redraw {
            terminal.draw(|f| ui::draw_ui(f, app, tui))?;
            needs_redraw = false;
        }

        let timeout = if animating { TYPING_POLL } else { IDLE_POLL };
        let first_event = poll_event(timeout)?;

        // Process first event + drain everything already queued before the next draw
        let mut should_quit = false;
        let mut next = first_event;
        while let Some(event) = next {
            needs_redraw = true;
            if handle_tui_event(app, tui, event, &tx) {
                should_quit = true;
                break;
            }
            next = poll_event(Duration::ZERO)?;
        }

        if should_quit {
            break;
        }

        // Replies from background fetches
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            if apply_action(app, tui, action, &tx) {
                return Ok(());
            }
        }
    }

    Ok(())
}

/// Route one terminal event. Returns true when the app should quit.
fn handle_tui_event(
    app: &mut App,
    tui: &mut TuiState,
    event: TuiEvent,
    tx: &mpsc::Sender<Action>,
) -> bool {
    match event {
        TuiEvent::Resize => return false,
        TuiEvent::ForceQuit => return apply_action(app, tui, Action::Quit, tx),
        _ => {}
    }

    // The delete confirmation swallows the next key press
    if tui.sidebar.is_confirming() {
        return match tui.sidebar.handle_event(&event) {
            Some(SidebarEvent::Delete) => apply_action(app, tui, Action::DeleteSession, tx),
            Some(SidebarEvent::Cancelled) | None => false,
        };
    }

    match event {
        TuiEvent::ToggleSidebar => tui.sidebar.toggle(),
        TuiEvent::RequestDelete => {
            // Only with a sidebar entry to delete and no reply in flight
            let deletable = !app.is_loading && app.session_summary().is_some();
            tui.sidebar.request_delete(deletable);
        }
        TuiEvent::Escape => tui.sidebar.open = false,
        TuiEvent::ScrollUp
        | TuiEvent::ScrollDown
        | TuiEvent::ScrollPageUp
        | TuiEvent::ScrollPageDown => {
            tui.message_list.handle_event(&event);
        }
        _ => {
            if let Some(InputEvent::Submit(text)) = tui.input_box.handle_event(&event) {
                return apply_action(app, tui, Action::Submit(text), tx);
            }
        }
    }
    false
}

/// Run an action through the reducer and carry out its effect.
/// Returns true when the app should quit.
fn apply_action(
    app: &mut App,
    tui: &mut TuiState,
    action: Action,
    tx: &mpsc::Sender<Action>,
) -> bool {
    if matches!(action, Action::ReplyReceived(_)) {
        tui.typing.hide();
    }

    match update(app, action) {
        Effect::None => {}
        Effect::SpawnRequest(text) => {
            tui.typing.show();
            spawn_request(app.fetcher.clone(), app.locale, text, tx.clone());
        }
        Effect::ResetView => {
            tui.message_list.reset();
            tui.typing.hide();
        }
        Effect::Quit => return true,
    }
    false
}

fn spawn_request(
    fetcher: Arc<dyn ReplyFetcher>,
    locale: Locale,
    user_text: String,
    tx: mpsc::Sender<Action>,
) {
    info!("Spawning reply request via {}", fetcher.name());
    tokio::spawn(async move {
        let reply = fetch_reply_or_fallback(fetcher.as_ref(), &user_text, locale).await;
        if tx.send(Action::ReplyReceived(reply)).is_err() {
            warn!("Failed to deliver reply: receiver dropped");
        }
    });
}
