//! # MessageList Component
//!
//! Scrollable view of the day's conversation.
//!
//! ## Responsibilities
//!
//! - Display one `MessageBlock` per stored message, in order
//! - Draw the typing placeholder as the last element while a reply is pending
//! - Jump to the newest entry whenever the conversation grows
//! - Cache message heights so only new messages are measured
//! - Render only the messages within half a screen of the viewport
//!
//! ## Architecture
//!
//! `MessageList` is a transient component (created each frame) that wraps
//! `&'a mut MessageListState` (persistent state) and the messages (props).

use std::ops::Range;

use ratatui::Frame;
use ratatui::layout::{Position, Rect, Size};
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::core::conversation::Message;
use crate::core::locale::Locale;
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::message::MessageBlock;
use crate::tui::components::typing_indicator::{self, TypingLine};
use crate::tui::event::TuiEvent;

/// Layout and scroll state for the message list.
/// Must be persisted in the parent TuiState.
pub struct MessageListState {
    pub scroll_state: ScrollViewState,
    pub layout: LayoutCache,
    /// When true, auto-scroll to bottom on every frame
    pub stick_to_bottom: bool,
    /// Last known viewport height (for scroll clamping between frames)
    pub viewport_height: u16,
}

impl Default for MessageListState {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageListState {
    pub fn new() -> Self {
        Self {
            scroll_state: ScrollViewState::default(),
            layout: LayoutCache::new(),
            stick_to_bottom: true,
            viewport_height: 0,
        }
    }

    /// Content height including the typing placeholder, as of the last frame.
    fn content_height(&self) -> u16 {
        self.layout.total_height
    }

    /// Clamp scroll offset so it never exceeds the content bounds.
    pub fn clamp_scroll(&mut self) {
        let max_y = self.content_height().saturating_sub(self.viewport_height);
        let current = self.scroll_state.offset();
        if current.y > max_y {
            self.scroll_state.set_offset(Position {
                x: current.x,
                y: max_y,
            });
        }
    }

    /// Re-engage auto-scroll if the user has scrolled back to the bottom.
    pub fn repin_if_at_bottom(&mut self) {
        let max_y = self.content_height().saturating_sub(self.viewport_height);
        let current = self.scroll_state.offset();
        if current.y >= max_y {
            self.stick_to_bottom = true;
            self.scroll_state.set_offset(Position {
                x: current.x,
                y: max_y,
            });
        }
    }

    /// Whether content exists below the current viewport.
    pub fn has_unseen_content(&self) -> bool {
        !self.stick_to_bottom
            && self.scroll_state.offset().y + self.viewport_height < self.content_height()
    }

    /// Forget everything; used when the conversation is replaced wholesale.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

/// Scrollable conversation view component.
/// Created fresh each frame with references to state and data.
pub struct MessageList<'a> {
    pub state: &'a mut MessageListState,
    pub messages: &'a [Message],
    pub locale: Locale,
    /// Typing placeholder text, when a reply is pending
    pub typing: Option<String>,
}

impl<'a> MessageList<'a> {
    pub fn new(
        state: &'a mut MessageListState,
        messages: &'a [Message],
        locale: Locale,
        typing: Option<String>,
    ) -> Self {
        Self {
            state,
            messages,
            locale,
            typing,
        }
    }
}

impl<'a> Component for MessageList<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let content_width = area.width.saturating_sub(1); // -1 for scrollbar

        // 1. Measure new messages
        let grew = self.state.layout.update(self.messages, content_width);
        if grew {
            self.state.stick_to_bottom = true;
        }

        let messages_height = self.state.layout.messages_height();
        let typing_height = if self.typing.is_some() {
            typing_indicator::HEIGHT
        } else {
            0
        };
        self.state.layout.total_height = messages_height.saturating_add(typing_height);

        // 2. Clamp scroll offset to prevent overscrolling past content
        self.state.viewport_height = area.height;
        if self.state.stick_to_bottom {
            let max_y = self.state.layout.total_height.saturating_sub(area.height);
            self.state.scroll_state.set_offset(Position { x: 0, y: max_y });
        } else {
            self.state.clamp_scroll();
        }

        // 3. Render only the messages near the viewport into a ScrollView
        let scroll_offset = self.state.scroll_state.offset().y;
        let visible_range = self.state.layout.visible_range(scroll_offset, area.height);

        let mut scroll_view =
            ScrollView::new(Size::new(content_width, self.state.layout.total_height))
                .vertical_scrollbar_visibility(ScrollbarVisibility::Always)
                .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);

        let mut y_offset: u16 = if visible_range.start > 0 {
            self.state.layout.prefix_heights[visible_range.start - 1]
        } else {
            0
        };

        for i in visible_range {
            let height = self.state.layout.heights[i];
            let rect = Rect::new(0, y_offset, content_width, height);
            scroll_view.render_widget(MessageBlock::new(&self.messages[i], self.locale), rect);
            y_offset = y_offset.saturating_add(height);
        }

        if let Some(text) = self.typing.take() {
            let rect = Rect::new(0, messages_height, content_width, typing_height);
            scroll_view.render_widget(TypingLine { text }, rect);
        }

        frame.render_stateful_widget(scroll_view, area, &mut self.state.scroll_state);
    }
}

/// Implemented on the state because `MessageList` is rebuilt every frame.
impl EventHandler for MessageListState {
    type Event = ();

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::ScrollUp => {
                self.scroll_state.scroll_up();
                self.stick_to_bottom = false;
            }
            TuiEvent::ScrollDown => {
                self.scroll_state.scroll_down();
                self.repin_if_at_bottom();
            }
            TuiEvent::ScrollPageUp => {
                self.scroll_state.scroll_page_up();
                self.stick_to_bottom = false;
            }
            TuiEvent::ScrollPageDown => {
                self.scroll_state.scroll_page_down();
                self.repin_if_at_bottom();
            }
            _ => {}
        }
        None
    }
}

/// Cached message heights.
///
/// Messages are append-only between resets, so a cache is valid as long as
/// the width matches and the conversation didn't shrink.
///
/// Offsets are `u16` like ratatui's, so a day long enough to pass
/// `u16::MAX` rows saturates there and the oldest rows stay reachable.
pub struct LayoutCache {
    pub heights: Vec<u16>,
    /// Bottom edge of each message
    pub prefix_heights: Vec<u16>,
    pub total_height: u16,
    content_width: u16,
}

impl Default for LayoutCache {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutCache {
    pub fn new() -> Self {
        Self {
            heights: Vec::new(),
            prefix_heights: Vec::new(),
            total_height: 0,
            content_width: 0,
        }
    }

    /// Bring the cache in line with `messages`. Returns true if new messages
    /// were appended since the last call.
    pub fn update(&mut self, messages: &[Message], content_width: u16) -> bool {
        let previous = self.heights.len();
        if content_width != self.content_width || messages.len() < previous {
            self.heights.clear();
        }
        self.content_width = content_width;

        let cached = self.heights.len();
        self.heights.extend(
            messages[cached..]
                .iter()
                .map(|m| MessageBlock::calculate_height(m, content_width)),
        );
        self.rebuild_prefix_heights();

        messages.len() > previous
    }

    pub fn rebuild_prefix_heights(&mut self) {
        self.prefix_heights = self
            .heights
            .iter()
            .scan(0u16, |acc, &h| {
                *acc = acc.saturating_add(h);
                Some(*acc)
            })
            .collect();
    }

    pub fn messages_height(&self) -> u16 {
        self.prefix_heights.last().copied().unwrap_or(0)
    }

    /// Messages overlapping the viewport, padded by half a screen each way.
    pub fn visible_range(&self, scroll_offset: u16, viewport_height: u16) -> Range<usize> {
        let buffer = viewport_height / 2;
        let buffered_start = scroll_offset.saturating_sub(buffer);
        let buffered_end = scroll_offset
            .saturating_add(viewport_height)
            .saturating_add(buffer);

        let start = self
            .prefix_heights
            .partition_point(|&end| end <= buffered_start);
        let end = self
            .prefix_heights
            .partition_point(|&end| end < buffered_end)
            .saturating_add(1)
            .min(self.prefix_heights.len());

        start..end
    }
}
