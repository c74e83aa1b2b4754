use std::fmt;

use async_trait::async_trait;
use log::{info, warn};

use crate::core::locale::Locale;

/// Errors that can occur while fetching a reply.
/// The send pipeline collapses all of them into the locale's fallback message;
/// the variants exist so logs can tell them apart.
#[derive(Debug)]
pub enum FetchError {
    /// Fetcher misconfigured (missing API key, bad URL).
    Config(String),
    /// Network-level failure (DNS, connection refused, reset).
    Network(String),
    /// The transport gave up waiting.
    Timeout(String),
    /// Endpoint returned a non-success status.
    Api { status: u16, message: String },
    /// Body wasn't JSON, or the reply text wasn't where it should be.
    MalformedResponse(String),
}

impl FetchError {
    /// Short machine-friendly name for log lines.
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::Config(_) => "config",
            FetchError::Network(_) => "network",
            FetchError::Timeout(_) => "timeout",
            FetchError::Api { .. } => "api",
            FetchError::MalformedResponse(_) => "malformed-response",
        }
    }
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::Config(msg) => write!(f, "config error: {msg}"),
            FetchError::Network(msg) => write!(f, "network error: {msg}"),
            FetchError::Timeout(msg) => write!(f, "timed out: {msg}"),
            FetchError::Api { status, message } => {
                write!(f, "API error (HTTP {status}): {message}")
            }
            FetchError::MalformedResponse(msg) => write!(f, "malformed response: {msg}"),
        }
    }
}

impl std::error::Error for FetchError {}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            FetchError::Timeout(e.to_string())
        } else if e.is_decode() {
            FetchError::MalformedResponse(e.to_string())
        } else {
            FetchError::Network(e.to_string())
        }
    }
}

#[async_trait]
pub trait ReplyFetcher: Send + Sync {
    /// Returns the name of the fetcher backend.
    fn name(&self) -> &str;

    /// Sends one user message and returns the generated reply text.
    async fn fetch_reply(&self, user_text: &str) -> Result<String, FetchError>;
}

/// Fetch a reply, resolving to `locale`'s fallback message on any failure.
pub async fn fetch_reply_or_fallback(
    fetcher: &dyn ReplyFetcher,
    user_text: &str,
    locale: Locale,
) -> String {
    match fetcher.fetch_reply(user_text).await {
        Ok(reply) => {
            info!("{} reply received ({} bytes)", fetcher.name(), reply.len());
            reply
        }
        Err(e) => {
            warn!("{} reply failed [{}]: {}", fetcher.name(), e.kind(), e);
            locale.fallback_message().to_string()
        }
    }
}
