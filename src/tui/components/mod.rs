//! # TUI Components
//!
//! All UI components for the terminal interface.
//!
//! ## Component Architecture
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Simple display components that receive all data as parameters:
//! - `TitleBar`: Top status line showing model name and status
//! - `MessageBlock`: A single conversation message
//! - `LandingPage`: Greeting shown while the conversation is empty
//!
//! ### Stateful Components (Event-Driven)
//!
//! Components that manage local state and emit events:
//! - `InputBox`: Text input with the send hint
//! - `MessageList`: Scrollable conversation view with height caching
//! - `Sidebar`: Today's session entry and the delete confirmation
//! - `TypingIndicator`: Animated placeholder while a reply is pending
//!
//! Each component file holds its state types, event types, rendering,
//! event handling and tests. Components receive external data as props,
//! never by reaching into `App`.
//!
//! ```text
//! components/
//! ├── mod.rs              (this file)
//! ├── title_bar.rs        (Top status line)
//! ├── landing.rs          (Empty-conversation greeting)
//! ├── message.rs          (Single message renderer)
//! ├── message_list.rs     (Scrollable message container)
//! ├── typing_indicator.rs (Pending-reply placeholder)
//! ├── sidebar.rs          (Session entry + delete confirmation)
//! └── input_box/          (Text input with send hint)
//! ```

mod title_bar;
pub use title_bar::TitleBar;

pub mod input_box;
pub mod landing;
pub mod message;
pub mod message_list;
pub mod sidebar;
pub mod typing_indicator;

pub use input_box::{InputBox, InputEvent};
pub use landing::LandingPage;
pub use message_list::{MessageList, MessageListState};
pub use sidebar::{SIDEBAR_WIDTH, Sidebar, SidebarEvent, SidebarState};
pub use typing_indicator::TypingIndicator;
