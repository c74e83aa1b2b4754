//! # Actions
//!
//! Everything that can happen in Tabib becomes an `Action`.
//! User presses Enter? That's `Action::Submit(text)`.
//! Reply arrives? That's `Action::ReplyReceived(text)`.
//!
//! `update()` applies an action to the state and returns an `Effect` the
//! adapter must carry out (spawning the fetch, resetting the view, quitting).
//! Persistence is the one side effect that happens inside `update()`: every
//! append to the conversation is written through immediately, so the
//! rendered list and the stored list can't drift apart.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```

use log::{debug, info, warn};

use crate::core::conversation::Sender;
use crate::core::state::App;

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// User sent the input box contents.
    Submit(String),
    /// Reply (or fallback text) for the pending send.
    /// Dropped when no send is pending.
    ReplyReceived(String),
    /// User confirmed deletion of the active session.
    /// Refused while a reply is pending, so the reply can't recreate it.
    DeleteSession,
    Quit,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    /// Fetch a reply for this user text.
    SpawnRequest(String),
    /// Conversation was replaced wholesale; presentation state should reset.
    ResetView,
    Quit,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    debug!("update: {:?}", action);
    match action {
        Action::Submit(text) => {
            let text = text.trim().to_string();
            if text.is_empty() {
                return Effect::None;
            }
            if app.is_loading {
                debug!("Submit ignored: reply still pending");
                return Effect::None;
            }

            let today = app.today();
            let rolled_over = app.session.refresh_for_current_date(today);

            if let Err(e) = app.session.append(Sender::User, text.clone()) {
                warn!("Failed to save user message: {}", e);
                app.status_message = format!("Save failed: {e}");
            } else {
                app.status_message.clear();
            }
            app.is_loading = true;

            if rolled_over {
                info!("New day session: {}", app.session.key());
            }
            Effect::SpawnRequest(text)
        }
        Action::ReplyReceived(reply) => {
            if !app.is_loading {
                warn!("Dropping reply with no pending send");
                return Effect::None;
            }
            app.is_loading = false;
            if let Err(e) = app.session.append(Sender::Bot, reply) {
                warn!("Failed to save reply: {}", e);
                app.status_message = format!("Save failed: {e}");
            }
            Effect::None
        }
        Action::DeleteSession => {
            if app.is_loading {
                debug!("DeleteSession ignored: reply still pending");
                return Effect::None;
            }
            let today = app.today();
            match app.session.delete(today) {
                Ok(()) => app.status_message.clear(),
                Err(e) => {
                    warn!("Failed to delete session: {}", e);
                    app.status_message = format!("Delete failed: {e}");
                }
            }
            Effect::ResetView
        }
        Action::Quit => Effect::Quit,
    }
}
