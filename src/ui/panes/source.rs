//! Source code pane rendering with syntax highlighting
//!
//! This module renders the source code pane, which displays the compiled
//! program with basic keyword highlighting and the span of the selected node
//! (or of the compile error) marked.
//!
//! # Features
//!
//! - Highlighting for keywords and numeric literals
//! - Marked line with the exact token columns picked out
//! - Scroll state that keeps the marked line at a steady row
//! - Line numbering
//!
//! # Rendering
//!
//! The pane uses a simple character-by-character tokenizer to apply syntax
//! highlighting styles without requiring a full lexer.

use crate::parser::ast::Span as SourceSpan;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Simple syntax highlighting for one source fragment
fn highlight_source_code(text: &str) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    let mut current_word = String::new();

    for c in text.chars() {
        if c.is_ascii_alphanumeric() || c == '_' || (c == '.' && starts_number(&current_word)) {
            current_word.push(c);
            continue;
        }

        if !current_word.is_empty() {
            let style = get_word_style(&current_word);
            spans.push(Span::styled(std::mem::take(&mut current_word), style));
        }

        let style = match c {
            '{' | '}' | '(' | ')' => Style::default().fg(DEFAULT_THEME.primary), // Brackets
            _ => Style::default().fg(DEFAULT_THEME.fg), // Operators and blanks
        };
        spans.push(Span::styled(c.to_string(), style));
    }

    if !current_word.is_empty() {
        let style = get_word_style(&current_word);
        spans.push(Span::styled(current_word, style));
    }

    spans
}

fn starts_number(word: &str) -> bool {
    word.starts_with(|c: char| c.is_ascii_digit())
}

fn get_word_style(word: &str) -> Style {
    match word {
        "var" | "const" | "while" | "if" | "else" => Style::default()
            .fg(DEFAULT_THEME.keyword)
            .add_modifier(Modifier::BOLD),
        _ if starts_number(word) => Style::default().fg(DEFAULT_THEME.number),
        _ => Style::default().fg(DEFAULT_THEME.fg), // Identifiers
    }
}

/// Split `line` around the 1-based, end-exclusive character columns
fn split_columns(line: &str, col_start: usize, col_end: usize) -> (&str, &str, &str) {
    let byte_at = |col: usize| {
        line.char_indices()
            .nth(col.saturating_sub(1))
            .map_or(line.len(), |(idx, _)| idx)
    };
    let start = byte_at(col_start);
    let end = byte_at(col_end).max(start);
    (&line[..start], &line[start..end], &line[end..])
}

/// Scroll state for the source pane
#[derive(Debug, Default)]
pub struct SourceScrollState {
    pub offset: usize,
    pub target_line_row: Option<usize>,
}

/// Render the source code pane
pub fn render_source_pane(
    frame: &mut Frame,
    area: Rect,
    source_code: &str,
    marked: Option<SourceSpan>,
    is_error: bool,
    is_focused: bool,
    scroll_state: &mut SourceScrollState,
) {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    let block = Block::default()
        .title(" Source ")
        .borders(Borders::ALL)
        .border_style(border_style);

    let lines: Vec<&str> = source_code.lines().collect();
    let total_lines = lines.len();
    let current_line = marked.map_or(0, |span| span.line);

    let visible_height = area.height.saturating_sub(2).max(1) as usize; // Account for borders (2), min 1

    // Keep the marked line at the target visual row, centered at first
    let target_row = scroll_state
        .target_line_row
        .unwrap_or(visible_height / 2)
        .min(visible_height.saturating_sub(1));
    scroll_state.target_line_row = Some(target_row);

    if current_line > 0 && current_line <= total_lines {
        scroll_state.offset = (current_line - 1).saturating_sub(target_row);
        if total_lines > visible_height {
            scroll_state.offset = scroll_state.offset.min(total_lines - visible_height);
        } else {
            scroll_state.offset = 0;
        }
    }

    let mark_style = if is_error {
        Style::default()
            .bg(DEFAULT_THEME.error)
            .fg(Color::White) // White text on red for visibility
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
            .bg(DEFAULT_THEME.selection_bg)
            .add_modifier(Modifier::BOLD)
    };

    let visible_lines: Vec<Line> = lines
        .iter()
        .enumerate()
        .skip(scroll_state.offset)
        .take(visible_height)
        .map(|(idx, line)| {
            let line_num = idx + 1;
            let line_num_str = format!("{:4} ", line_num);

            let Some(span) = marked.filter(|span| span.line == line_num) else {
                let mut spans = vec![Span::styled(
                    line_num_str,
                    Style::default().fg(DEFAULT_THEME.comment), // Line numbers
                )];
                spans.extend(highlight_source_code(line));
                return Line::from(spans);
            };

            let num_color = if is_error {
                DEFAULT_THEME.error
            } else {
                DEFAULT_THEME.secondary
            };
            let mut spans = vec![Span::styled(
                line_num_str,
                Style::default().fg(num_color).add_modifier(Modifier::BOLD),
            )];

            let (before, inside, after) = split_columns(line, span.col_start, span.col_end);
            spans.extend(highlight_source_code(before));
            if inside.is_empty() {
                // End of line or file: mark the position itself
                spans.push(Span::styled(" ", mark_style));
            } else {
                spans.push(Span::styled(inside.to_string(), mark_style));
            }
            spans.extend(highlight_source_code(after));

            let line_bg = Style::default().bg(DEFAULT_THEME.current_line_bg);
            for span in &mut spans[1..] {
                span.style = line_bg.patch(span.style);
            }
            Line::from(spans)
        })
        .collect();

    let paragraph = Paragraph::new(visible_lines).block(block);
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_columns() {
        assert_eq!(split_columns("x = 1+2", 5, 6), ("x = ", "1", "+2"));
        assert_eq!(split_columns("x = 1", 6, 6), ("x = 1", "", ""));
        assert_eq!(split_columns("é = 1", 3, 4), ("é ", "=", " 1"));
    }

    #[test]
    fn test_highlight_words() {
        let spans = highlight_source_code("while x1 < 2.5");
        let words: Vec<&str> = spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(words, vec!["while", " ", "x1", " ", "<", " ", "2.5"]);
        assert_eq!(spans[0].style, get_word_style("if"));
        assert_eq!(spans[6].style.fg, Some(DEFAULT_THEME.number));
    }
}
