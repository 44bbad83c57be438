//! Terminal user interface built on [ratatui](https://github.com/ratatui-org/ratatui).
//!
//! The UI is organized into three layers:
//!
//! - **[`app`]**: application state, keyboard event loop, pane focus, node selection
//! - **[`panes`]**: stateless render functions for each visible pane (source, AST
//!   tree, status bar)
//! - **[`theme`]**: centralized color palette used by all panes
//!
//! The entry point for consumers is [`App`]: construct it with source text and a
//! [`Frontend`] and call [`App::run`] to start the event loop.
//!
//! [`Frontend`]: crate::frontend::Frontend
//! [`App::run`]: app::App::run

pub mod app;
pub mod panes;
pub mod theme;

pub use app::App;
