//! # Core Application Logic
//!
//! This module contains Tabib's business logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • State (app data)     │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │  • Session (day store)  │
//!                    └───────────┬─────────────┘
//!                                │
//!                    ┌───────────┴───────────┐
//!                    ▼                       ▼
//!             ┌────────────┐          ┌────────────┐
//!             │    TUI     │          │ inference  │
//!             │  Adapter   │          │  (Gemini)  │
//!             │ (ratatui)  │          │            │
//!             └────────────┘          └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `App` struct, all application state in one place
//! - [`action`]: The `Action` enum, everything that can happen in the app
//! - [`session`]: Day-keyed conversation persistence
//! - [`storage`]: The key-value store the sessions live in
//! - [`session_list`]: Sidebar summary (title + localized date)
//! - [`config`]: File/env/CLI configuration
//! - [`locale`]: User-visible strings per display language

pub mod action;
pub mod config;
pub mod conversation;
pub mod locale;
pub mod session;
pub mod session_list;
pub mod state;
pub mod storage;
