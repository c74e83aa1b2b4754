//! Tabib library exports for testing

pub mod core;
pub mod inference;
pub mod tui;

#[cfg(test)]
pub mod test_support;

pub use core::locale::Locale;
