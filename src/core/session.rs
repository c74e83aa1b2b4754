//! # Session Persistence
//!
//! One conversation per calendar day. The storage key is derived from the
//! date (`<prefix>_YYYY-MM-DD`) and the value is the whole conversation as a
//! JSON array of `{sender, text}` records.
//!
//! Every append rewrites the full snapshot; there are no delta writes.
//! Unreadable data (missing, malformed JSON, wrong shape) loads as an empty
//! conversation.

use std::sync::Arc;

use chrono::NaiveDate;
use log::{debug, info, warn};

use crate::core::conversation::{Conversation, Message, Sender};
use crate::core::storage::{KeyValueStore, StoreError};

pub const DEFAULT_SESSION_PREFIX: &str = "chatSession";

/// Builds the storage key for `date`.
pub fn session_key(prefix: &str, date: NaiveDate) -> String {
    format!("{}_{}", prefix, date.format("%Y-%m-%d"))
}

/// Load the conversation stored under `key`, or an empty one.
pub fn load(store: &dyn KeyValueStore, key: &str) -> Conversation {
    let json = match store.get(key) {
        Ok(Some(json)) => json,
        Ok(None) => return Conversation::new(),
        Err(e) => {
            warn!("Failed to read session {}: {}", key, e);
            return Conversation::new();
        }
    };

    match serde_json::from_str::<Conversation>(&json) {
        Ok(conversation) => conversation,
        Err(e) => {
            warn!("Ignoring malformed session data under {}: {}", key, e);
            Conversation::new()
        }
    }
}

/// Serialize the whole conversation under `key`.
pub fn save(
    store: &dyn KeyValueStore,
    key: &str,
    conversation: &[Message],
) -> Result<(), StoreError> {
    let json = serde_json::to_string(conversation).map_err(StoreError::Serialize)?;
    store.set(key, &json)
}

/// Remove everything stored under `key`.
pub fn delete(store: &dyn KeyValueStore, key: &str) -> Result<(), StoreError> {
    store.remove(key)
}

/// The active day's session: store handle, key and in-memory conversation.
///
/// The key is only recomputed through [`refresh_for_current_date`](Self::refresh_for_current_date),
/// which the app calls before each send so a session spanning midnight
/// moves to the new day's key.
pub struct SessionContext {
    store: Arc<dyn KeyValueStore>,
    prefix: String,
    key: String,
    conversation: Conversation,
}

impl SessionContext {
    /// Opens the session for `today`, loading whatever is stored for it.
    pub fn open(store: Arc<dyn KeyValueStore>, prefix: impl Into<String>, today: NaiveDate) -> Self {
        let prefix = prefix.into();
        let key = session_key(&prefix, today);
        let conversation = load(store.as_ref(), &key);
        info!("Session {} opened with {} messages", key, conversation.len());
        Self {
            store,
            prefix,
            key,
            conversation,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn messages(&self) -> &[Message] {
        &self.conversation
    }

    /// The `YYYY-MM-DD` part of the key.
    pub fn date_part(&self) -> &str {
        self.key
            .strip_prefix(&self.prefix)
            .and_then(|rest| rest.strip_prefix('_'))
            .unwrap_or(&self.key)
    }

    /// Switch to `today`'s key if it differs, reloading the conversation.
    /// Returns `true` when the key changed.
    pub fn refresh_for_current_date(&mut self, today: NaiveDate) -> bool {
        let key = session_key(&self.prefix, today);
        if key == self.key {
            return false;
        }
        info!("Date rolled over: {} -> {}", self.key, key);
        self.conversation = load(self.store.as_ref(), &key);
        self.key = key;
        true
    }

    /// Append a message and persist the full snapshot.
    ///
    /// The in-memory append happens even if the write fails, so what's on
    /// screen and what's in memory never diverge.
    pub fn append(&mut self, sender: Sender, text: impl Into<String>) -> Result<(), StoreError> {
        self.conversation.push(Message {
            sender,
            text: text.into(),
        });
        save(self.store.as_ref(), &self.key, &self.conversation)?;
        debug!(
            "Session {} saved ({} messages)",
            self.key,
            self.conversation.len()
        );
        Ok(())
    }

    /// Erase the stored conversation and reload state for `today`.
    pub fn delete(&mut self, today: NaiveDate) -> Result<(), StoreError> {
        let result = delete(self.store.as_ref(), &self.key);
        if result.is_ok() {
            info!("Session {} deleted", self.key);
        }
        self.key = session_key(&self.prefix, today);
        self.conversation = load(self.store.as_ref(), &self.key);
        result
    }
}
