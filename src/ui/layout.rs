use crate::app::{App, FocusedPanel, Mode};
use ratatui::prelude::*;

pub fn render(frame: &mut Frame, app: &mut App) {
    let size = frame.area();
    let theme = app.config.theme.clone();

    // Main vertical layout: content area + status bar + (optional) command/search bar
    let bottom_bar_height = match app.mode {
        Mode::Command | Mode::Search => 1,
        _ => 0,
    };

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),
            Constraint::Length(1),
            Constraint::Length(bottom_bar_height),
        ])
        .split(size);

    let content_area = main_chunks[0];
    let status_area = main_chunks[1];

    // Content: editor on top, output panel below when visible
    if app.show_output {
        let v_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(5), Constraint::Length(app.output_height)])
            .split(content_area);

        super::editor::render::render(
            frame,
            v_chunks[0],
            &app.editor,
            &app.gutter,
            &app.highlighter,
            app.config.editor.show_line_numbers,
            app.focus == FocusedPanel::Editor
                && app.mode != Mode::Command
                && app.mode != Mode::Search,
            &theme,
        );

        super::output::render(
            frame,
            v_chunks[1],
            &mut app.output,
            app.focus == FocusedPanel::Output,
            &theme,
        );
    } else {
        super::editor::render::render(
            frame,
            content_area,
            &app.editor,
            &app.gutter,
            &app.highlighter,
            app.config.editor.show_line_numbers,
            app.focus == FocusedPanel::Editor
                && app.mode != Mode::Command
                && app.mode != Mode::Search,
            &theme,
        );
    }

    super::status_bar::render(frame, status_area, app);

    if app.mode == Mode::Command {
        super::command_bar::render(frame, main_chunks[2], &app.command_input, &theme);
    }

    if app.mode == Mode::Search {
        super::search_bar::render(frame, main_chunks[2], &app.search_input, &app.editor, &theme);
    }

    if app.show_about {
        super::about::render(frame, size, &theme);
    }
}
