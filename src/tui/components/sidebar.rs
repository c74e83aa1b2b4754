//! # Sidebar Component
//!
//! Collapsible panel listing the current day's session. Toggled with Ctrl+B.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `SidebarState` lives in `TuiState`
//! - `Sidebar` is created each frame with borrowed state and the summary prop
//!
//! Deleting is two-step: Ctrl+D arms a confirmation prompt, then `y`
//! confirms and any other key cancels.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Padding, Paragraph, Wrap};

use crate::core::locale::Locale;
use crate::core::session_list::SessionSummary;
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

pub const SIDEBAR_WIDTH: u16 = 36;

#[derive(Debug, Default)]
pub struct SidebarState {
    pub open: bool,
    pub confirm_delete: bool,
}

/// Events emitted by the sidebar.
#[derive(Debug, Clone, PartialEq)]
pub enum SidebarEvent {
    /// Deletion confirmed with `y`.
    Delete,
    /// Confirmation prompt dismissed.
    Cancelled,
}

impl SidebarState {
    pub fn toggle(&mut self) {
        self.open = !self.open;
    }

    /// Arm the delete confirmation. Nothing to delete → stays disarmed.
    pub fn request_delete(&mut self, deletable: bool) {
        if deletable {
            self.open = true;
            self.confirm_delete = true;
        }
    }

    /// Whether the next key press belongs to the confirmation prompt.
    pub fn is_confirming(&self) -> bool {
        self.confirm_delete
    }
}

impl EventHandler for SidebarState {
    type Event = SidebarEvent;

    /// Only consumes events while the confirmation prompt is up.
    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        if !self.confirm_delete {
            return None;
        }
        self.confirm_delete = false;
        match event {
            TuiEvent::InputChar('y') | TuiEvent::InputChar('Y') => Some(SidebarEvent::Delete),
            _ => Some(SidebarEvent::Cancelled),
        }
    }
}

/// Transient render wrapper for the sidebar.
pub struct Sidebar<'a> {
    state: &'a SidebarState,
    summary: Option<SessionSummary>,
    locale: Locale,
}

impl<'a> Sidebar<'a> {
    pub fn new(state: &'a SidebarState, summary: Option<SessionSummary>, locale: Locale) -> Self {
        Self {
            state,
            summary,
            locale,
        }
    }

    fn lines(&self) -> Vec<Line<'static>> {
        let Some(summary) = &self.summary else {
            return Vec::new();
        };

        let mut lines = vec![
            Line::from(vec![
                Span::styled(
                    summary.title.clone(),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::styled("  ⋮", Style::default().fg(Color::DarkGray)),
            ]),
            Line::styled(summary.date.clone(), Style::default().fg(Color::DarkGray)),
        ];

        if self.state.confirm_delete {
            lines.push(Line::default());
            lines.push(Line::styled(
                self.locale.delete_prompt(),
                Style::default().fg(Color::Yellow),
            ));
        }
        lines
    }
}

impl<'a> Component for Sidebar<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let hint = if self.summary.is_some() {
            " Ctrl+D "
        } else {
            ""
        };

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(format!(" {} ", self.locale.sidebar_title()))
            .title_bottom(Line::from(hint).right_aligned())
            .padding(Padding::horizontal(1));

        let list = Paragraph::new(self.lines())
            .block(block)
            .wrap(Wrap { trim: true });
        frame.render_widget(list, area);
    }
}
