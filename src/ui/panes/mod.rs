//! TUI pane rendering modules
//!
//! This module provides the rendering logic for all visual panes in the TUI,
//! organized by responsibility for maintainability.
//!
//! # Pane Modules
//!
//! - [`source`]: Source code display with keyword highlighting and the marked token span
//! - [`tree`]: AST listing, one indented row per node, with the selected node
//! - [`status`]: Status bar with keybindings and compile state
//!
//! # Architecture
//!
//! Each pane module exports:
//! - A primary `render_*` function
//! - Associated state types (e.g., `SourceScrollState`, `TreeRow`)
//! - Helper functions specific to that pane

pub mod source;
pub mod status;
pub mod tree;

// Re-export render functions for convenience
pub use source::{render_source_pane, SourceScrollState};
pub use status::render_status_bar;
pub use tree::{render_tree_pane, TreeRow};
