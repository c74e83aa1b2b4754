//! # Application State
//!
//! Core business state for Tabib. This module contains domain logic only -
//! no TUI-specific types. Presentation state lives in the `tui` module.
//!
//! ```text
//! App
//! ├── fetcher: Arc<dyn ReplyFetcher>   // remote reply source
//! ├── session: SessionContext          // today's key + conversation
//! ├── locale: Locale                   // display language
//! ├── model_name: String               // shown in the title bar
//! ├── status_message: String           // status bar text
//! ├── is_loading: bool                 // waiting for a reply
//! └── clock: fn() -> NaiveDate         // "today", injectable for tests
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use std::sync::Arc;

use chrono::{Local, NaiveDate};

use crate::core::locale::Locale;
use crate::core::session::SessionContext;
use crate::core::session_list::{SessionSummary, summarize};
use crate::core::storage::KeyValueStore;
use crate::inference::ReplyFetcher;

/// Today's date in the local timezone.
pub fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

pub struct App {
    pub fetcher: Arc<dyn ReplyFetcher>,
    pub session: SessionContext,
    pub locale: Locale,
    pub model_name: String,
    pub status_message: String,
    pub is_loading: bool,
    pub clock: fn() -> NaiveDate,
}

impl App {
    pub fn new(
        fetcher: Arc<dyn ReplyFetcher>,
        store: Arc<dyn KeyValueStore>,
        session_prefix: &str,
        locale: Locale,
        model_name: String,
        clock: fn() -> NaiveDate,
    ) -> Self {
        Self {
            fetcher,
            session: SessionContext::open(store, session_prefix, clock()),
            locale,
            model_name,
            status_message: String::new(),
            is_loading: false,
            clock,
        }
    }

    pub fn today(&self) -> NaiveDate {
        (self.clock)()
    }

    /// Sidebar entry for the active session, if it has a full exchange.
    pub fn session_summary(&self) -> Option<SessionSummary> {
        summarize(self.session.messages(), self.session.date_part(), self.locale)
    }
}

#[cfg(test)]
mod tests {
    use crate::core::conversation::Sender;
    use crate::test_support::test_app;

    #[test]
    fn test_app_new_defaults() {
        let app = test_app();
        assert!(!app.is_loading);
        assert_eq!(app.model_name, "test-model");
        assert_eq!(app.session.key(), "chatSession_2024-03-05");
        assert!(app.session.messages().is_empty());
    }

    #[test]
    fn test_session_summary_follows_conversation() {
        let mut app = test_app();
        assert!(app.session_summary().is_none());
        app.session.append(Sender::User, "q").unwrap();
        app.session.append(Sender::Bot, "Migraine likely\nmore").unwrap();
        let summary = app.session_summary().unwrap();
        assert_eq!(summary.title, "Migraine likely");
        assert_eq!(summary.date, "5 March 2024");
    }
}
