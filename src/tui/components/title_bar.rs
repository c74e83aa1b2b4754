//! # TitleBar Component
//!
//! Top status line: model name, status text, and a "↓ New" marker when the
//! user has scrolled away from the newest message.
//!
//! Purely presentational. The title text changes based on state:
//!
//! 1. **Unseen content**: `"Tabib (model: gemini-1.5-flash-latest) | Save failed | ↓ New"`
//! 2. **Status message**: `"Tabib (model: gemini-1.5-flash-latest) | Save failed"`
//! 3. **Default**: `"Tabib (model: gemini-1.5-flash-latest)"`

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::Span;

use crate::tui::component::Component;

/// # Props
///
/// - `model_name`: from `App`
/// - `status_message`: from `App` (storage errors and the like)
/// - `has_unseen_content`: from the message list's scroll state
pub struct TitleBar {
    pub model_name: String,
    pub status_message: String,
    pub has_unseen_content: bool,
}

impl TitleBar {
    pub fn new(model_name: String, status_message: String, has_unseen_content: bool) -> Self {
        Self {
            model_name,
            status_message,
            has_unseen_content,
        }
    }

    fn text(&self) -> String {
        let mut title = format!("Tabib (model: {})", self.model_name);
        if !self.status_message.is_empty() {
            title.push_str(" | ");
            title.push_str(&self.status_message);
        }
        if self.has_unseen_content {
            title.push_str(" | ↓ New");
        }
        title
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let style = if self.status_message.is_empty() {
            Style::default()
        } else {
            Style::default().fg(Color::Yellow)
        };
        frame.render_widget(Span::styled(self.text(), style), area);
    }
}
