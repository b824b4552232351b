use crate::theme::Theme;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph},
};

const KEY_LINES: &[(&str, &str)] = &[
    ("F5", "Run buffer"),
    ("Ctrl+S", "Save"),
    ("Ctrl+Q", "Quit"),
    ("Ctrl+O", "Focus output"),
    ("i / Esc", "Insert / normal mode"),
    ("u / Ctrl+R", "Undo / redo"),
    ("yy dd p", "Yank, delete, paste line"),
    ("/ n N", "Search, next, previous"),
    (":o :w :run", "Open, save, run"),
];

pub fn render(frame: &mut Frame, area: Rect, theme: &Theme) {
    let popup_width = 46.min(area.width.saturating_sub(4));
    let popup_height = (KEY_LINES.len() as u16 + 6).min(area.height.saturating_sub(2));

    let popup = Rect::new(
        (area.width.saturating_sub(popup_width)) / 2,
        (area.height.saturating_sub(popup_height)) / 2,
        popup_width,
        popup_height,
    );

    frame.render_widget(Clear, popup);

    let block = Block::default()
        .title(Span::styled(
            " About ",
            Style::default()
                .fg(theme.ui.title_focused.to_color())
                .add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_type(ratatui::widgets::BorderType::Rounded)
        .border_style(Style::default().fg(theme.ui.border_focused.to_color()))
        .style(Style::default().bg(theme.ui.background.to_color()));

    let mut lines = vec![
        Line::from(Span::styled(
            format!("scriptpad {}", env!("CARGO_PKG_VERSION")),
            Style::default()
                .fg(theme.ui.foreground.to_color())
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "A scratchpad editor for Python snippets",
            Style::default().fg(theme.ui.status_bar_fg.to_color()),
        )),
        Line::from(""),
    ];

    for (key, what) in KEY_LINES {
        lines.push(Line::from(vec![
            Span::styled(
                format!("  {:<12}", key),
                Style::default()
                    .fg(theme.ui.title_focused.to_color())
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                *what,
                Style::default().fg(theme.ui.foreground.to_color()),
            ),
        ]));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "  Esc or F1 to close",
        Style::default().fg(theme.ui.line_numbers.to_color()),
    )));

    let paragraph = Paragraph::new(lines).block(block);
    frame.render_widget(paragraph, popup);
}
