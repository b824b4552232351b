use crate::app::{App, FocusedPanel, Mode};
use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    None,
    Quit,
    Run,
    Save,
}

/// Result of executing a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandResult {
    Continue,
    Quit,
}

pub fn handle_event(app: &mut App) -> Result<Option<Action>> {
    if !event::poll(Duration::from_millis(100))? {
        return Ok(Some(Action::None));
    }

    match event::read()? {
        Event::Key(key) if key.kind != KeyEventKind::Release => handle_key(app, key),
        // Resize redraws from current state on the next tick; anything
        // else (focus, paste chunks) is ignored
        _ => Ok(Some(Action::None)),
    }
}

fn handle_key(app: &mut App, key: KeyEvent) -> Result<Option<Action>> {
    // About popup takes priority
    if app.show_about {
        match key.code {
            KeyCode::Esc | KeyCode::F(1) | KeyCode::Char('q') => app.show_about = false,
            _ => {}
        }
        return Ok(Some(Action::None));
    }

    // Global keybindings
    match key.code {
        KeyCode::F(1) => {
            app.show_about = true;
            return Ok(Some(Action::None));
        }
        KeyCode::F(5) => return Ok(Some(Action::Run)),
        KeyCode::Char('s') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            return Ok(Some(Action::Save));
        }
        KeyCode::Char('q') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            return Ok(Some(Action::Quit));
        }
        KeyCode::Char('o') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.toggle_output_focus();
            return Ok(Some(Action::None));
        }
        _ => {}
    }

    if app.focus == FocusedPanel::Output {
        return handle_output_panel(app, key);
    }

    match app.mode {
        Mode::Normal => handle_normal_mode(app, key),
        Mode::Insert => handle_insert_mode(app, key),
        Mode::Command => handle_command_mode(app, key),
        Mode::Search => handle_search_mode(app, key),
    }
}

fn handle_output_panel(app: &mut App, key: KeyEvent) -> Result<Option<Action>> {
    // Resize with Ctrl+arrows
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            KeyCode::Up => {
                app.increase_output_height();
                return Ok(Some(Action::None));
            }
            KeyCode::Down => {
                app.decrease_output_height();
                return Ok(Some(Action::None));
            }
            _ => {}
        }
    }

    match key.code {
        KeyCode::Char('j') | KeyCode::Down => app.output.scroll_down(1),
        KeyCode::Char('k') | KeyCode::Up => app.output.scroll_up(1),
        KeyCode::Char('g') => app.output.scroll_to_top(),
        KeyCode::Char('G') => app.output.scroll_to_bottom(),
        KeyCode::PageUp => app.output.page_up(),
        KeyCode::PageDown => app.output.page_down(),
        KeyCode::Char('h') | KeyCode::Left => app.output.prev_view(),
        KeyCode::Char('l') | KeyCode::Right => app.output.next_view(),
        KeyCode::Char('x') => {
            if app.output.close_active() {
                app.status_message = String::from("Output closed");
                if app.output.is_empty() {
                    app.show_output = false;
                    app.focus = FocusedPanel::Editor;
                }
            }
        }
        KeyCode::Esc | KeyCode::Char('q') => {
            app.focus = FocusedPanel::Editor;
        }
        _ => {}
    }
    Ok(Some(Action::None))
}

fn handle_normal_mode(app: &mut App, key: KeyEvent) -> Result<Option<Action>> {
    // Second key of dd / yy
    if let Some(pending) = app.pending_key.take() {
        match (pending, key.code) {
            ('d', KeyCode::Char('d')) => {
                app.editor.delete_line();
                app.editor.ensure_cursor_visible();
            }
            ('y', KeyCode::Char('y')) => {
                app.editor.yank_line();
                app.status_message = String::from("Line yanked");
            }
            _ => {}
        }
        return Ok(Some(Action::None));
    }

    match key.code {
        KeyCode::Char('i') => app.mode = Mode::Insert,
        KeyCode::Char('a') => {
            app.editor.move_cursor_right();
            app.mode = Mode::Insert;
        }
        KeyCode::Char('A') => {
            app.editor.move_to_line_end();
            app.mode = Mode::Insert;
        }
        KeyCode::Char('o') => {
            app.editor.move_to_line_end();
            app.editor.insert_newline();
            app.editor.ensure_cursor_visible();
            app.mode = Mode::Insert;
        }
        KeyCode::Char('O') => {
            app.editor.move_to_line_start();
            app.editor.insert_newline_with_indent(false);
            app.editor.move_cursor_up();
            app.editor.ensure_cursor_visible();
            app.mode = Mode::Insert;
        }
        KeyCode::Char(':') => {
            app.mode = Mode::Command;
            app.command_input.clear();
        }
        KeyCode::Char('/') => app.start_search(),

        // Movement
        KeyCode::Char('h') | KeyCode::Left => app.editor.move_cursor_left(),
        KeyCode::Char('j') | KeyCode::Down => {
            app.editor.move_cursor_down();
            app.editor.ensure_cursor_visible();
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.editor.move_cursor_up();
            app.editor.ensure_cursor_visible();
        }
        KeyCode::Char('l') | KeyCode::Right => app.editor.move_cursor_right(),
        KeyCode::Char('0') | KeyCode::Home => app.editor.move_to_line_start(),
        KeyCode::Char('$') | KeyCode::End => app.editor.move_to_line_end(),
        KeyCode::Char('g') => {
            app.editor.go_to_top();
            app.editor.ensure_cursor_visible();
        }
        KeyCode::Char('G') => {
            app.editor.go_to_bottom();
            app.editor.ensure_cursor_visible();
        }

        // Editing
        KeyCode::Char('x') => app.editor.delete_char(),
        KeyCode::Char('d') => app.pending_key = Some('d'),
        KeyCode::Char('y') => app.pending_key = Some('y'),
        KeyCode::Char('p') => {
            app.editor.paste_after();
            app.editor.ensure_cursor_visible();
        }
        KeyCode::Char('P') => {
            app.editor.paste_before();
            app.editor.ensure_cursor_visible();
        }

        // Undo/Redo
        KeyCode::Char('u') => {
            if app.editor.undo() {
                app.editor.ensure_cursor_visible();
                app.status_message = String::from("Undone");
            } else {
                app.status_message = String::from("Nothing to undo");
            }
        }
        KeyCode::Char('r') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            if app.editor.redo() {
                app.editor.ensure_cursor_visible();
                app.status_message = String::from("Redone");
            } else {
                app.status_message = String::from("Nothing to redo");
            }
        }

        // Search navigation
        KeyCode::Char('n') => {
            app.editor.find_next();
            app.editor.ensure_cursor_visible();
        }
        KeyCode::Char('N') => {
            app.editor.find_prev();
            app.editor.ensure_cursor_visible();
        }
        KeyCode::Esc => app.editor.clear_search(),
        _ => {}
    }
    Ok(Some(Action::None))
}

fn handle_insert_mode(app: &mut App, key: KeyEvent) -> Result<Option<Action>> {
    match key.code {
        KeyCode::Esc => app.mode = Mode::Normal,
        KeyCode::Enter => {
            app.editor.insert_newline();
            app.editor.ensure_cursor_visible();
        }
        KeyCode::Backspace => app.editor.backspace(),
        KeyCode::Delete => app.editor.delete_char(),
        KeyCode::Tab => app.editor.insert_tab(),
        KeyCode::Left => app.editor.move_cursor_left(),
        KeyCode::Right => app.editor.move_cursor_right(),
        KeyCode::Up => {
            app.editor.move_cursor_up();
            app.editor.ensure_cursor_visible();
        }
        KeyCode::Down => {
            app.editor.move_cursor_down();
            app.editor.ensure_cursor_visible();
        }
        KeyCode::Home => app.editor.move_to_line_start(),
        KeyCode::End => app.editor.move_to_line_end(),
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.editor.insert_char(c);
        }
        _ => {}
    }
    Ok(Some(Action::None))
}

fn handle_command_mode(app: &mut App, key: KeyEvent) -> Result<Option<Action>> {
    match key.code {
        KeyCode::Esc => {
            app.command_input.clear();
            app.mode = Mode::Normal;
        }
        KeyCode::Enter => {
            if app.execute_command()? == CommandResult::Quit {
                return Ok(Some(Action::Quit));
            }
        }
        KeyCode::Backspace => {
            app.command_input.pop();
        }
        KeyCode::Char(c) => app.command_input.push(c),
        _ => {}
    }
    Ok(Some(Action::None))
}

fn handle_search_mode(app: &mut App, key: KeyEvent) -> Result<Option<Action>> {
    match key.code {
        KeyCode::Esc => app.cancel_search(),
        KeyCode::Enter => app.execute_search(),
        KeyCode::Backspace => {
            app.search_input.pop();
        }
        KeyCode::Char(c) => app.search_input.push(c),
        _ => {}
    }
    Ok(Some(Action::None))
}
