use crate::app::{App, Mode};
use ratatui::{prelude::*, text::Span, widgets::Paragraph};

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let theme = app.theme();

    let mode_str = match app.mode {
        Mode::Normal => " NORMAL ",
        Mode::Insert => " INSERT ",
        Mode::Command => " COMMAND ",
        Mode::Search => " SEARCH ",
    };

    let mode_style = match app.mode {
        Mode::Normal => Style::default()
            .bg(theme.ui.mode_normal_bg.to_color())
            .fg(theme.ui.mode_normal_fg.to_color())
            .add_modifier(Modifier::BOLD),
        Mode::Insert => Style::default()
            .bg(theme.ui.mode_insert_bg.to_color())
            .fg(theme.ui.mode_insert_fg.to_color())
            .add_modifier(Modifier::BOLD),
        Mode::Command => Style::default()
            .bg(theme.ui.mode_command_bg.to_color())
            .fg(theme.ui.mode_command_fg.to_color())
            .add_modifier(Modifier::BOLD),
        Mode::Search => Style::default()
            .bg(theme.ui.mode_search_bg.to_color())
            .fg(theme.ui.mode_search_fg.to_color())
            .add_modifier(Modifier::BOLD),
    };

    let file_info = {
        let modified = if app.editor.modified() { " ●" } else { "" };
        format!(" {}{} ", app.editor.doc.filename(), modified)
    };

    let run_info = if app.runs_in_flight > 0 {
        format!(" ⟳ {} running ", app.runs_in_flight)
    } else {
        String::new()
    };

    let cursor_pos = format!(
        " Ln {}, Col {} ",
        app.editor.cursor_y() + 1,
        app.editor.cursor_x() + 1
    );

    let status_msg = format!(" {} ", app.status_message);

    let mode_span = Span::styled(mode_str, mode_style);
    let file_span = Span::styled(
        file_info.clone(),
        Style::default()
            .bg(theme.ui.status_chip_bg.to_color())
            .fg(theme.ui.status_chip_fg.to_color()),
    );
    let run_span = Span::styled(
        run_info.clone(),
        Style::default()
            .bg(theme.ui.status_chip_bg.to_color())
            .fg(theme.ui.output_notice.to_color()),
    );
    let msg_span = Span::styled(
        status_msg.clone(),
        Style::default().fg(theme.ui.status_bar_fg.to_color()),
    );

    let left_len = mode_str.len() + file_info.len() + run_info.len() + status_msg.len();
    let right_len = cursor_pos.len();
    let padding = if area.width as usize > left_len + right_len {
        area.width as usize - left_len - right_len
    } else {
        1
    };

    let padding_span = Span::raw(" ".repeat(padding));
    let cursor_span = Span::styled(
        cursor_pos,
        Style::default()
            .bg(theme.ui.status_chip_bg.to_color())
            .fg(theme.ui.status_chip_fg.to_color()),
    );

    let line = Line::from(vec![
        mode_span,
        file_span,
        run_span,
        msg_span,
        padding_span,
        cursor_span,
    ]);
    let paragraph =
        Paragraph::new(line).style(Style::default().bg(theme.ui.status_bar_bg.to_color()));

    frame.render_widget(paragraph, area);
}
