pub mod provider;
pub mod providers;

pub use provider::{FetchError, ReplyFetcher, fetch_reply_or_fallback};
pub use providers::{GeminiProvider, GeminiSettings};
