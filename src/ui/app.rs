//! Main TUI application state and logic

use super::panes::{self, SourceScrollState, TreeRow};
use crate::errors::CompileError;
use crate::frontend::Frontend;
use crate::parser::ast::{Node, Span};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::io;
use std::sync::Arc;
use std::time::Duration;

/// Which pane is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    Source,
    Tree,
}

impl FocusedPane {
    /// Move focus to the other pane
    pub fn next(self) -> Self {
        match self {
            FocusedPane::Source => FocusedPane::Tree,
            FocusedPane::Tree => FocusedPane::Source,
        }
    }
}

/// The main application state
pub struct App {
    /// The source code that was compiled
    pub source_code: String,

    /// Name of the surface syntax it was compiled with
    pub syntax_name: &'static str,

    /// Tree of a successful compile
    pub tree: Option<Arc<Node>>,

    /// First diagnostic of a failed compile
    pub error: Option<CompileError>,

    /// The tree flattened in pre-order, one row per node
    pub rows: Vec<TreeRow>,

    /// Index into `rows` of the selected node
    pub selected: usize,

    /// Currently focused pane
    pub focused_pane: FocusedPane,

    pub source_scroll: SourceScrollState,
    pub tree_scroll: usize,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,
}

impl App {
    /// Compile `source_code` with `frontend` and build the view over the result
    pub fn new(source_code: String, frontend: &dyn Frontend) -> Self {
        let (tree, error) = match frontend.compile(&source_code) {
            Ok(()) => (frontend.ast().ok(), None),
            Err(err) => (None, Some(err)),
        };

        let rows = tree
            .as_deref()
            .map(|tree| tree.walk().into_iter().map(TreeRow::from).collect())
            .unwrap_or_default();

        let status_message = match &error {
            Some(err) => err.to_string(),
            None => format!("Compiled {} nodes", tree.as_ref().map_or(0, |t| t.walk().len())),
        };

        App {
            source_code,
            syntax_name: frontend.name(),
            tree,
            error,
            rows,
            selected: 0,
            focused_pane: FocusedPane::Tree,
            source_scroll: SourceScrollState::default(),
            tree_scroll: 0,
            should_quit: false,
            status_message,
        }
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }
        }

        Ok(())
    }

    /// Span the source pane should mark: the error, or the selected node
    pub fn highlighted_span(&self) -> Option<Span> {
        match &self.error {
            Some(err) => err.span(),
            None => self.rows.get(self.selected).and_then(|row| row.span),
        }
    }

    /// Render the UI
    fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        // Panes on top, status bar at bottom
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(size);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(main_chunks[0]);

        panes::render_source_pane(
            frame,
            columns[0],
            &self.source_code,
            self.highlighted_span(),
            self.error.is_some(),
            self.focused_pane == FocusedPane::Source,
            &mut self.source_scroll,
        );

        panes::render_tree_pane(
            frame,
            columns[1],
            &self.rows,
            self.selected,
            self.syntax_name,
            self.focused_pane == FocusedPane::Tree,
            &mut self.tree_scroll,
        );

        panes::render_status_bar(
            frame,
            main_chunks[1],
            &self.status_message,
            self.selected,
            self.rows.len(),
            self.syntax_name,
            self.error.is_some(),
        );
    }

    /// Handle keyboard events
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Tab => {
                self.focused_pane = self.focused_pane.next();
            }
            KeyCode::Up => match self.focused_pane {
                FocusedPane::Tree => self.select(self.selected.saturating_sub(1)),
                FocusedPane::Source => {
                    // Scrolling up makes the marked line move down visually
                    if let Some(row) = self.source_scroll.target_line_row {
                        self.source_scroll.target_line_row = Some(row.saturating_add(1));
                    }
                }
            },
            KeyCode::Down => match self.focused_pane {
                FocusedPane::Tree => self.select(self.selected.saturating_add(1)),
                FocusedPane::Source => {
                    if let Some(row) = self.source_scroll.target_line_row {
                        self.source_scroll.target_line_row = Some(row.saturating_sub(1));
                    }
                }
            },
            KeyCode::Home => self.select(0),
            KeyCode::End => self.select(self.rows.len().saturating_sub(1)),
            _ => {}
        }
    }

    fn select(&mut self, index: usize) {
        if self.rows.is_empty() {
            return;
        }
        self.selected = index.min(self.rows.len() - 1);
        let row = &self.rows[self.selected];
        self.status_message = match row.span {
            Some(span) => format!("{} at {}", row.operand, span),
            None => row.operand.to_string(),
        };
    }
}
