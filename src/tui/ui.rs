use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};

use crate::core::state::App;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{
    LandingPage, MessageList, SIDEBAR_WIDTH, Sidebar, TitleBar,
};

/// Screen regions for one frame.
pub struct Areas {
    pub title: Rect,
    pub sidebar: Option<Rect>,
    pub main: Rect,
    pub input: Rect,
}

pub fn layout(frame_area: Rect, input_height: u16, sidebar_open: bool) -> Areas {
    use Constraint::{Length, Min};

    let [title, body, input] =
        Layout::vertical([Length(1), Min(0), Length(input_height)]).areas(frame_area);

    if sidebar_open && body.width > SIDEBAR_WIDTH * 2 {
        let [sidebar, main] = Layout::horizontal([Length(SIDEBAR_WIDTH), Min(0)]).areas(body);
        Areas {
            title,
            sidebar: Some(sidebar),
            main,
            input,
        }
    } else {
        Areas {
            title,
            sidebar: None,
            main: body,
            input,
        }
    }
}

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState) {
    let input_height = tui.input_box.calculate_height(frame.area().width);
    let areas = layout(frame.area(), input_height, tui.sidebar.open);

    if let Some(sidebar_area) = areas.sidebar {
        Sidebar::new(&tui.sidebar, app.session_summary(), app.locale).render(frame, sidebar_area);
    }

    let messages = app.session.messages();
    let typing = tui
        .typing
        .is_visible()
        .then(|| tui.typing.text(app.locale));

    if messages.is_empty() && typing.is_none() {
        LandingPage::new(app.locale).render(frame, areas.main);
    } else {
        MessageList::new(&mut tui.message_list, messages, app.locale, typing)
            .render(frame, areas.main);
    }

    // The prompt must be on screen whenever the next key answers it
    let status = if tui.sidebar.is_confirming() && areas.sidebar.is_none() {
        app.locale.delete_prompt().to_string()
    } else {
        app.status_message.clone()
    };

    TitleBar::new(
        app.model_name.clone(),
        status,
        tui.message_list.has_unseen_content(),
    )
    .render(frame, areas.title);

    tui.input_box.render(frame, areas.input);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    use crate::core::conversation::Sender;
    use crate::test_support::test_app;

    fn screen(app: &App, tui: &mut TuiState) -> String {
        screen_sized(app, tui, 100)
    }

    fn screen_sized(app: &App, tui: &mut TuiState, width: u16) -> String {
        let backend = TestBackend::new(width, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| draw_ui(f, app, tui)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_empty_conversation_shows_greeting() {
        let app = test_app();
        let mut tui = TuiState::new(app.locale);
        let text = screen(&app, &mut tui);
        assert!(text.contains("Tabib (model: test-model)"));
        assert!(text.contains("Describe your symptoms"));
        assert!(text.contains("Message"));
    }

    #[test]
    fn test_stored_conversation_is_drawn_at_startup() {
        let mut app = test_app();
        app.session.append(Sender::User, "I have a headache").unwrap();
        app.session
            .append(Sender::Bot, "**Tension headache**\nDrink water")
            .unwrap();

        let mut tui = TuiState::new(app.locale);
        let text = screen(&app, &mut tui);
        assert!(!text.contains("Describe your symptoms"));
        assert!(text.contains("I have a headache"));
        assert!(text.contains("Tension headache"));
        assert!(text.contains("Drink water"));
        assert!(!text.contains("**"));
    }

    #[test]
    fn test_sidebar_lists_todays_session() {
        let mut app = test_app();
        app.session.append(Sender::User, "cough").unwrap();
        app.session.append(Sender::Bot, "Common cold\nrest").unwrap();

        let mut tui = TuiState::new(app.locale);
        assert!(!screen(&app, &mut tui).contains("Chats"));

        tui.sidebar.toggle();
        let text = screen(&app, &mut tui);
        assert!(text.contains("Chats"));
        assert!(text.contains("Common cold"));
        assert!(text.contains("5 March 2024"));
    }

    #[test]
    fn test_delete_prompt_visible_on_narrow_terminal() {
        let mut app = test_app();
        app.session.append(Sender::User, "cough").unwrap();
        app.session.append(Sender::Bot, "Common cold").unwrap();
        let mut tui = TuiState::new(app.locale);
        tui.sidebar.request_delete(true);

        let narrow = screen_sized(&app, &mut tui, 70);
        assert!(!narrow.contains("Chats"));
        assert!(narrow.contains("Delete this conversation? (y/n)"));

        // With room for the sidebar the prompt lives there, not in the title
        let wide = screen_sized(&app, &mut tui, 100);
        assert!(wide.contains("Chats"));
        assert_eq!(wide.matches("Delete this conversation?").count(), 1);
    }

    #[test]
    fn test_layout_hides_sidebar_on_narrow_terminal() {
        let areas = layout(Rect::new(0, 0, 50, 20), 3, true);
        assert!(areas.sidebar.is_none());
        assert_eq!(areas.main.width, 50);

        let areas = layout(Rect::new(0, 0, 100, 20), 3, true);
        assert_eq!(areas.sidebar.map(|r| r.width), Some(SIDEBAR_WIDTH));
        assert_eq!(areas.main.width, 100 - SIDEBAR_WIDTH);
        assert_eq!(areas.input.height, 3);
        assert_eq!(areas.title.height, 1);
    }
}
