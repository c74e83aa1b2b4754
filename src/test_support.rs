//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::core::locale::Locale;
use crate::core::state::App;
use crate::core::storage::{KeyValueStore, MemoryStore};
use crate::inference::{FetchError, ReplyFetcher};

enum Script {
    Reply(String),
    Fail(Box<dyn Fn() -> FetchError + Send + Sync>),
}

/// A fetcher that answers every message the same way and records what it was sent.
pub struct ScriptedFetcher {
    script: Script,
    received: Mutex<Vec<String>>,
}

impl ScriptedFetcher {
    pub fn replying(reply: &str) -> Self {
        Self {
            script: Script::Reply(reply.to_string()),
            received: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(error: impl Fn() -> FetchError + Send + Sync + 'static) -> Self {
        Self {
            script: Script::Fail(Box::new(error)),
            received: Mutex::new(Vec::new()),
        }
    }

    pub fn received(&self) -> Vec<String> {
        self.received.lock().unwrap().clone()
    }
}

#[async_trait]
impl ReplyFetcher for ScriptedFetcher {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn fetch_reply(&self, user_text: &str) -> Result<String, FetchError> {
        self.received.lock().unwrap().push(user_text.to_string());
        match &self.script {
            Script::Reply(reply) => Ok(reply.clone()),
            Script::Fail(make_error) => Err(make_error()),
        }
    }
}

pub fn test_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 5).unwrap()
}

/// Creates a test App over an in-memory store, pinned to 2024-03-05.
pub fn test_app() -> App {
    test_app_with(Arc::new(ScriptedFetcher::replying("ok")), Arc::new(MemoryStore::new()))
}

pub fn test_app_with(fetcher: Arc<dyn ReplyFetcher>, store: Arc<dyn KeyValueStore>) -> App {
    App::new(
        fetcher,
        store,
        "chatSession",
        Locale::English,
        "test-model".to_string(),
        test_date,
    )
}
