use ratatui::{
    prelude::*,
    text::Span,
    widgets::{Block, Borders, Paragraph},
};

use super::cursor::CursorOps;
use super::EditorState;
use crate::syntax::Highlighter;
use crate::theme::Theme;
use crate::ui::gutter::Gutter;

pub fn render(
    frame: &mut Frame,
    area: Rect,
    state: &EditorState,
    gutter: &Gutter,
    highlighter: &Highlighter,
    show_line_numbers: bool,
    focused: bool,
    theme: &Theme,
) {
    let title = {
        let name = state.doc.filename();
        if state.doc.modified {
            format!(" {} ● ", name)
        } else {
            format!(" {} ", name)
        }
    };

    let (border_style, title_style) = if focused {
        (
            Style::default().fg(theme.ui.border_focused.to_color()),
            Style::default()
                .fg(theme.ui.title_focused.to_color())
                .add_modifier(Modifier::BOLD),
        )
    } else {
        (
            Style::default().fg(theme.ui.border.to_color()),
            Style::default().fg(theme.ui.title.to_color()),
        )
    };

    let block = Block::default()
        .title(Span::styled(title, title_style))
        .borders(Borders::ALL)
        .border_type(ratatui::widgets::BorderType::Rounded)
        .border_style(border_style);

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let visible_height = inner.height as usize;
    let gutter_width = if show_line_numbers { gutter.width() } else { 0 };
    let labels = if show_line_numbers {
        gutter.labels(state, visible_height)
    } else {
        Vec::new()
    };

    let search_query = if state.search_query.is_empty() {
        None
    } else {
        Some(state.search_query.as_str())
    };

    let visible_lines: Vec<Line> = state
        .lines()
        .iter()
        .enumerate()
        .skip(state.scroll_offset())
        .take(visible_height)
        .map(|(idx, line)| {
            let mut spans = Vec::new();

            if show_line_numbers {
                let label = labels
                    .get(idx - state.scroll_offset())
                    .cloned()
                    .unwrap_or_default();
                spans.push(Span::styled(
                    label,
                    Style::default().fg(theme.ui.line_numbers.to_color()),
                ));
            }

            spans.extend(highlighter.highlight_line_with_search(
                line,
                &theme.syntax,
                search_query,
                Some(&theme.ui),
                state.current_match_col(idx),
            ));

            Line::from(spans)
        })
        .collect();

    let paragraph =
        Paragraph::new(visible_lines).style(Style::default().bg(theme.ui.background.to_color()));
    frame.render_widget(paragraph, inner);

    if focused {
        let cursor_screen_y = state.cursor_y().saturating_sub(state.scroll_offset());
        let cursor_col = state
            .lines()
            .get(state.cursor_y())
            .map(|line| CursorOps::char_index_at_byte(line, state.cursor_x()))
            .unwrap_or(0);
        let cursor_screen_x = gutter_width as usize + cursor_col;

        if cursor_screen_y < visible_height {
            frame.set_cursor_position(Position::new(
                inner.x + cursor_screen_x as u16,
                inner.y + cursor_screen_y as u16,
            ));
        }
    }
}
