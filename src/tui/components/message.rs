use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Text;
use ratatui::widgets::{Block, BorderType, Padding, Paragraph, Widget, Wrap};

use crate::core::conversation::{Message, Sender};
use crate::core::locale::Locale;
use crate::tui::markup;

/// Horizontal padding (per side) between the border and text content.
const CONTENT_PAD_H: u16 = 1;
/// Total horizontal space consumed by borders (1 left + 1 right) and padding.
const HORIZONTAL_OVERHEAD: u16 = 2 + CONTENT_PAD_H * 2;
/// Total vertical space consumed by borders (1 top + 1 bottom).
const VERTICAL_OVERHEAD: u16 = 2;

pub fn sender_style(sender: Sender) -> Style {
    match sender {
        Sender::User => Style::default().fg(Color::Green),
        Sender::Bot => Style::default().fg(Color::Blue),
    }
}

/// Bot text gets bold/line-break formatting; user text is shown as typed.
fn body(message: &Message) -> Text<'static> {
    let style = sender_style(message.sender);
    match message.sender {
        Sender::Bot => markup::render(&message.text, style),
        Sender::User => markup::plain(&message.text, style),
    }
}

/// A stateless component that renders a single chat message.
///
/// `MessageBlock` is created fresh each frame by `MessageList`. The block is
/// titled with the sender's localized label and colored per sender.
///
/// # Height Calculation
///
/// [`calculate_height`](Self::calculate_height) asks the same `Paragraph` the
/// widget renders for its wrapped line count, so the predicted and rendered
/// heights can't disagree.
#[derive(Clone, Copy)]
pub struct MessageBlock<'a> {
    pub message: &'a Message,
    pub locale: Locale,
}

impl<'a> MessageBlock<'a> {
    pub fn new(message: &'a Message, locale: Locale) -> Self {
        Self { message, locale }
    }

    fn paragraph(message: &Message) -> Paragraph<'static> {
        Paragraph::new(body(message)).wrap(Wrap { trim: false })
    }

    pub fn calculate_height(message: &Message, width: u16) -> u16 {
        let content_width = width.saturating_sub(HORIZONTAL_OVERHEAD);
        if content_width == 0 {
            // Terminal too narrow for borders + padding; still occupy a row.
            return 1;
        }

        // A reply taller than the canvas is clipped rather than wrapped around
        let lines = u16::try_from(Self::paragraph(message).line_count(content_width))
            .unwrap_or(u16::MAX);
        lines.max(1).saturating_add(VERTICAL_OVERHEAD)
    }

    fn label(&self) -> &'static str {
        match self.message.sender {
            Sender::User => self.locale.user_label(),
            Sender::Bot => self.locale.bot_label(),
        }
    }
}

impl<'a> Widget for MessageBlock<'a> {
    fn render(self, area: Rect, buf: &mut ratatui::buffer::Buffer) {
        let style = sender_style(self.message.sender);
        let border_style = style.add_modifier(Modifier::DIM);

        let block = Block::bordered()
            .title(self.label())
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title_style(style)
            .padding(Padding::horizontal(CONTENT_PAD_H));

        let inner_area = block.inner(area);
        block.render(area, buf);

        Self::paragraph(self.message).render(inner_area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn draw(message: &Message, width: u16) -> ratatui::buffer::Buffer {
        let height = MessageBlock::calculate_height(message, width);
        let backend = TestBackend::new(width, height);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| f.render_widget(MessageBlock::new(message, Locale::English), f.area()))
            .unwrap();
        terminal.backend().buffer().clone()
    }

    fn row_text(buf: &ratatui::buffer::Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf[(x, y)].symbol().to_string())
            .collect()
    }

    #[test]
    fn calculate_height_zero_width_returns_minimum() {
        let message = Message::user("Hello world");
        assert_eq!(MessageBlock::calculate_height(&message, 0), 1);
        assert_eq!(
            MessageBlock::calculate_height(&message, HORIZONTAL_OVERHEAD),
            1
        );
    }

    #[test]
    fn calculate_height_single_line_fits() {
        let message = Message::user("Hello");
        assert_eq!(
            MessageBlock::calculate_height(&message, 80),
            1 + VERTICAL_OVERHEAD
        );
    }

    #[test]
    fn calculate_height_counts_line_breaks() {
        let message = Message::bot("**Diagnosis:** Take rest\nSee a doctor");
        assert_eq!(
            MessageBlock::calculate_height(&message, 80),
            2 + VERTICAL_OVERHEAD
        );
    }

    #[test]
    fn calculate_height_wraps_long_text() {
        let message = Message::user("Hello world");
        // content width 5: "Hello" | "world"
        assert_eq!(
            MessageBlock::calculate_height(&message, 9),
            2 + VERTICAL_OVERHEAD
        );
    }

    #[test]
    fn calculate_height_saturates_for_huge_reply() {
        let message = Message::bot("x\n".repeat(70_000));
        assert_eq!(MessageBlock::calculate_height(&message, 80), u16::MAX);
    }

    #[test]
    fn bot_reply_renders_bold_without_markers() {
        let message = Message::bot("**Diagnosis:** rest");
        let buf = draw(&message, 40);

        assert!(row_text(&buf, 0).contains("doctor"));
        let content = row_text(&buf, 1);
        assert!(content.contains("Diagnosis: rest"));
        assert!(!content.contains("**"));

        // "│ " then the first bold character
        assert!(buf[(2, 1)].modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn user_text_keeps_markers() {
        let message = Message::user("**raw**");
        let buf = draw(&message, 40);
        assert!(row_text(&buf, 0).contains("you"));
        assert!(row_text(&buf, 1).contains("**raw**"));
    }

    #[test]
    fn sender_colors() {
        assert_eq!(sender_style(Sender::User).fg, Some(Color::Green));
        assert_eq!(sender_style(Sender::Bot).fg, Some(Color::Blue));
    }
}
