//! # TypingIndicator
//!
//! Placeholder shown at the end of the message list while a reply is pending.
//!
//! The animation is a tokio interval task bumping an atomic dot counter
//! (`0..=3`). The renderer only reads the counter, so the task never touches
//! UI state. `hide()` aborts the task through its `AbortHandle`.

use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};
use std::time::Duration;

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Paragraph, Widget};
use tokio::task::AbortHandle;

use crate::core::locale::Locale;

pub const TICK: Duration = Duration::from_millis(400);
const MAX_DOTS: u8 = 3;

/// Rows the placeholder takes at the bottom of the message list.
pub const HEIGHT: u16 = 1;

pub struct TypingIndicator {
    dots: Arc<AtomicU8>,
    handle: Option<AbortHandle>,
}

impl Default for TypingIndicator {
    fn default() -> Self {
        Self::new()
    }
}

impl TypingIndicator {
    pub fn new() -> Self {
        Self {
            dots: Arc::new(AtomicU8::new(0)),
            handle: None,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.handle.is_some()
    }

    /// Must be called from within a tokio runtime.
    pub fn show(&mut self) {
        if self.is_visible() {
            return;
        }

        self.dots.store(0, Ordering::Relaxed);
        let dots = Arc::clone(&self.dots);

        let task = tokio::spawn(async move {
            let mut interval = tokio::time::interval_at(tokio::time::Instant::now() + TICK, TICK);
            loop {
                interval.tick().await;
                let _ = dots.fetch_update(Ordering::Relaxed, Ordering::Relaxed, |d| {
                    Some((d + 1) % (MAX_DOTS + 1))
                });
            }
        });
        self.handle = Some(task.abort_handle());
    }

    pub fn hide(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
        self.dots.store(0, Ordering::Relaxed);
    }

    pub fn dots(&self) -> u8 {
        self.dots.load(Ordering::Relaxed)
    }

    pub fn text(&self, locale: Locale) -> String {
        format!("{}{}", locale.typing_label(), ".".repeat(self.dots() as usize))
    }
}

impl Drop for TypingIndicator {
    fn drop(&mut self) {
        self.hide();
    }
}

/// Widget view of the indicator for a single frame.
pub struct TypingLine {
    pub text: String,
}

impl Widget for TypingLine {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Paragraph::new(format!("  {}", self.text))
            .style(
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            )
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn advance(by: Duration) {
        tokio::time::advance(by).await;
        // let the ticker task run
        for _ in 0..3 {
            tokio::task::yield_now().await;
        }
    }

    #[test]
    fn hidden_by_default() {
        let indicator = TypingIndicator::new();
        assert!(!indicator.is_visible());
        assert_eq!(indicator.text(Locale::English), "Typing");
    }

    #[tokio::test(start_paused = true)]
    async fn dots_cycle_every_tick() {
        let mut indicator = TypingIndicator::new();
        indicator.show();
        tokio::task::yield_now().await;
        assert_eq!(indicator.text(Locale::English), "Typing");

        let mut seen = Vec::new();
        for _ in 0..4 {
            advance(TICK).await;
            seen.push(indicator.text(Locale::English));
        }
        assert_eq!(seen, vec!["Typing.", "Typing..", "Typing...", "Typing"]);
    }

    #[tokio::test(start_paused = true)]
    async fn show_twice_keeps_one_indicator() {
        let mut indicator = TypingIndicator::new();
        indicator.show();
        indicator.show();
        tokio::task::yield_now().await;

        advance(TICK).await;
        // A second ticker would have advanced twice.
        assert_eq!(indicator.dots(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn hide_stops_animation_and_is_idempotent() {
        let mut indicator = TypingIndicator::new();
        indicator.show();
        tokio::task::yield_now().await;
        advance(TICK).await;
        assert_eq!(indicator.dots(), 1);

        indicator.hide();
        indicator.hide();
        assert!(!indicator.is_visible());
        assert_eq!(indicator.dots(), 0);

        advance(TICK * 3).await;
        assert_eq!(indicator.dots(), 0);
    }

    #[test]
    fn arabic_label() {
        let indicator = TypingIndicator::new();
        assert_eq!(indicator.text(Locale::Arabic), "يكتب");
    }
}
