//! AST pane rendering
//!
//! One row per node in pre-order, indented by depth, showing the operand, the
//! payload of leaves and the source span.

use crate::parser::ast::{Node, Operand, Span as SourceSpan};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Flattened view of one node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeRow {
    pub depth: usize,
    pub operand: Operand,
    pub payload: Option<String>,
    pub span: Option<SourceSpan>,
}

impl From<(usize, &Node)> for TreeRow {
    fn from((depth, node): (usize, &Node)) -> Self {
        TreeRow {
            depth,
            operand: node.kind(),
            payload: node.payload().map(|payload| payload.to_string()),
            span: node.debug().map(|debug| debug.span()),
        }
    }
}

fn row_line(row: &TreeRow, is_selected: bool) -> Line<'static> {
    let operand_style = match row.operand {
        Operand::Eos => Style::default().fg(DEFAULT_THEME.comment),
        Operand::Integer | Operand::Number => Style::default().fg(DEFAULT_THEME.number),
        Operand::Identifier => Style::default().fg(DEFAULT_THEME.identifier),
        _ => Style::default()
            .fg(DEFAULT_THEME.keyword)
            .add_modifier(Modifier::BOLD),
    };

    let mut spans = vec![
        Span::raw("  ".repeat(row.depth)),
        Span::styled(row.operand.name(), operand_style),
    ];
    if let Some(payload) = &row.payload {
        spans.push(Span::styled(
            format!(" {}", payload),
            Style::default().fg(DEFAULT_THEME.fg),
        ));
    }
    if let Some(span) = row.span {
        spans.push(Span::styled(
            format!("  {}:{}-{}", span.line, span.col_start, span.col_end),
            Style::default().fg(DEFAULT_THEME.comment),
        ));
    }

    if is_selected {
        let selected = Style::default().bg(DEFAULT_THEME.current_line_bg);
        for span in &mut spans {
            span.style = selected.patch(span.style);
        }
    }
    Line::from(spans)
}

/// Keep `selected` inside the visible window, moving `offset` as little as possible
fn scroll_to(offset: usize, selected: usize, visible_height: usize) -> usize {
    if selected < offset {
        selected
    } else if selected >= offset + visible_height {
        selected + 1 - visible_height
    } else {
        offset
    }
}

/// Render the AST pane
pub fn render_tree_pane(
    frame: &mut Frame,
    area: Rect,
    rows: &[TreeRow],
    selected: usize,
    syntax_name: &str,
    is_focused: bool,
    scroll: &mut usize,
) {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    let block = Block::default()
        .title(format!(" AST ({}) ", syntax_name))
        .borders(Borders::ALL)
        .border_style(border_style);

    if rows.is_empty() {
        let placeholder = Paragraph::new(Line::from(Span::styled(
            "no tree: compile failed",
            Style::default().fg(DEFAULT_THEME.error),
        )))
        .block(block);
        frame.render_widget(placeholder, area);
        return;
    }

    let visible_height = area.height.saturating_sub(2).max(1) as usize;
    *scroll = scroll_to(*scroll, selected, visible_height);

    let visible_lines: Vec<Line> = rows
        .iter()
        .enumerate()
        .skip(*scroll)
        .take(visible_height)
        .map(|(idx, row)| row_line(row, idx == selected))
        .collect();

    let paragraph = Paragraph::new(visible_lines).block(block);
    frame.render_widget(paragraph, area);
}
