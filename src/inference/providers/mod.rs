pub mod gemini;

pub use gemini::{GeminiProvider, GeminiSettings};
