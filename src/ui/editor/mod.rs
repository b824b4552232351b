pub mod clipboard;
pub mod cursor;
pub mod document;
pub mod render;
pub mod undo;

pub use document::Document;
pub use undo::{EditorAction, UndoStack};

use anyhow::Result;
use std::path::{Path, PathBuf};

use clipboard::{Clipboard, YankType};
use cursor::CursorOps;

/// Notifications the editor emits for subscribers (the gutter). Drained
/// once per event-loop tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorEvent {
    ContentChanged { line_count: usize },
    ViewportChanged,
}

/// Cursor and scroll state, kept next to the Document but distinct from
/// it. The gutter and highlighter only ever query this; they never own it.
#[derive(Debug, Clone, Copy)]
pub struct ViewState {
    pub cursor_x: usize, // Byte position in current line
    pub cursor_y: usize, // Line number
    pub scroll_offset: usize,
    pub viewport_height: usize,
}

impl ViewState {
    fn new() -> Self {
        Self {
            cursor_x: 0,
            cursor_y: 0,
            scroll_offset: 0,
            viewport_height: 0,
        }
    }
}

/// The editing surface: owns the document, the view state, history and
/// clipboard.
pub struct EditorState {
    pub doc: Document,
    pub view: ViewState,
    pub tab_size: usize,
    pub auto_indent: bool,
    // Search state
    pub search_query: String,
    pub search_matches: Vec<(usize, usize)>, // (line, char col)
    pub current_match: usize,
    // Undo/Redo
    pub undo_stack: UndoStack,
    // Clipboard
    pub clipboard: Clipboard,
    events: Vec<EditorEvent>,
}

impl EditorState {
    pub fn new(tab_size: usize) -> Self {
        Self {
            doc: Document::new(),
            view: ViewState::new(),
            tab_size,
            auto_indent: true,
            search_query: String::new(),
            search_matches: Vec::new(),
            current_match: 0,
            undo_stack: UndoStack::default(),
            clipboard: Clipboard::new(),
            events: Vec::new(),
        }
    }

    // ========== Accessors ==========

    pub fn lines(&self) -> &Vec<String> {
        &self.doc.lines
    }

    pub fn cursor_x(&self) -> usize {
        self.view.cursor_x
    }

    pub fn cursor_y(&self) -> usize {
        self.view.cursor_y
    }

    pub fn scroll_offset(&self) -> usize {
        self.view.scroll_offset
    }

    pub fn current_file(&self) -> Option<&PathBuf> {
        self.doc.file_path.as_ref()
    }

    pub fn modified(&self) -> bool {
        self.doc.modified
    }

    pub fn get_content(&self) -> String {
        self.doc.get_content()
    }

    /// Drain pending notifications for subscribers
    pub fn take_events(&mut self) -> Vec<EditorEvent> {
        std::mem::take(&mut self.events)
    }

    fn notify_content_changed(&mut self) {
        let line_count = self.doc.line_count();
        self.events.push(EditorEvent::ContentChanged { line_count });
    }

    fn notify_viewport_changed(&mut self) {
        self.events.push(EditorEvent::ViewportChanged);
    }

    /// Bookkeeping shared by every buffer mutation
    fn after_edit(&mut self) {
        self.doc.modified = true;
        self.doc.sync_rope();
        self.notify_content_changed();
        self.clear_search();
    }

    // ========== File Operations ==========

    pub fn open_file(&mut self, path: &Path) -> Result<()> {
        // Build the new document first so a failed open leaves the
        // current buffer untouched
        let doc = Document::from_file(path)?;
        self.doc = doc;
        self.view = ViewState {
            viewport_height: self.view.viewport_height,
            ..ViewState::new()
        };
        self.undo_stack.clear();
        self.clear_search();
        self.notify_content_changed();
        Ok(())
    }

    pub fn save_to(&mut self, path: &Path) -> Result<()> {
        self.doc.save_to(path)
    }

    // ========== Editing Operations ==========

    pub fn insert_char(&mut self, c: char) {
        if self.view.cursor_y >= self.doc.lines.len() {
            return;
        }

        let line = &mut self.doc.lines[self.view.cursor_y];
        self.view.cursor_x = CursorOps::clamp_to_char_boundary(line, self.view.cursor_x);
        if self.view.cursor_x > line.len() {
            return;
        }

        let ln = self.view.cursor_y;
        let col_b = self.view.cursor_x;
        let col_c = CursorOps::char_index_at_byte(line, col_b);

        line.insert(col_b, c);
        self.view.cursor_x = col_b + c.len_utf8();
        self.after_edit();

        self.undo_stack.push(EditorAction::InsertChar {
            line: ln,
            col: col_c,
            ch: c,
        });
    }

    pub fn insert_newline(&mut self) {
        self.insert_newline_with_indent(self.auto_indent);
    }

    pub fn insert_newline_with_indent(&mut self, auto_indent: bool) {
        if self.view.cursor_y >= self.doc.lines.len() {
            return;
        }

        let ln = self.view.cursor_y;
        self.view.cursor_x =
            CursorOps::clamp_to_char_boundary(&self.doc.lines[ln], self.view.cursor_x);
        let col_b = self.view.cursor_x;
        let col_c = CursorOps::char_index_at_byte(&self.doc.lines[ln], col_b);

        let remainder = self.doc.lines[ln].split_off(col_b);

        let indent = if auto_indent {
            calculate_indent(&self.doc.lines[ln], self.tab_size)
        } else {
            String::new()
        };

        self.view.cursor_y += 1;
        self.doc
            .lines
            .insert(self.view.cursor_y, format!("{}{}", indent, remainder));
        self.view.cursor_x = indent.len();
        self.after_edit();

        self.undo_stack
            .push(EditorAction::SplitLine { line: ln, col: col_c });
    }

    pub fn backspace(&mut self) {
        let action = {
            if self.view.cursor_y >= self.doc.lines.len() {
                None
            } else if self.view.cursor_x > 0 {
                let line = &mut self.doc.lines[self.view.cursor_y];
                self.view.cursor_x = CursorOps::clamp_to_char_boundary(line, self.view.cursor_x);
                let start = CursorOps::prev_char_boundary(line, self.view.cursor_x);
                let end = self.view.cursor_x;

                if start == end {
                    None
                } else {
                    let ch = line[start..end].chars().next().unwrap_or(' ');
                    let line_num = self.view.cursor_y;
                    let col_char = CursorOps::char_index_at_byte(line, start);

                    line.drain(start..end);
                    self.view.cursor_x = start;

                    Some(EditorAction::DeleteChar {
                        line: line_num,
                        col: col_char,
                        ch,
                    })
                }
            } else if self.view.cursor_y > 0 {
                let current_line = self.doc.lines.remove(self.view.cursor_y);
                let line_num = self.view.cursor_y;
                self.view.cursor_y -= 1;

                let prev_line = &mut self.doc.lines[self.view.cursor_y];
                let join_col_char = prev_line.chars().count();
                self.view.cursor_x = prev_line.len();
                prev_line.push_str(&current_line);

                Some(EditorAction::JoinLines {
                    line: line_num - 1,
                    col: join_col_char,
                    deleted_content: current_line,
                })
            } else {
                None
            }
        };

        if let Some(act) = action {
            self.after_edit();
            self.undo_stack.push(act);
        }
    }

    pub fn delete_char(&mut self) {
        let action = {
            if self.view.cursor_y >= self.doc.lines.len() {
                None
            } else {
                let cursor_y = self.view.cursor_y;
                let line_len = self.doc.lines[cursor_y].len();

                let cursor_x = {
                    let line = &self.doc.lines[cursor_y];
                    CursorOps::clamp_to_char_boundary(line, self.view.cursor_x)
                };
                self.view.cursor_x = cursor_x;

                if cursor_x < line_len {
                    let line = &self.doc.lines[cursor_y];
                    let end = CursorOps::next_char_boundary(line, cursor_x);

                    if end <= cursor_x {
                        None
                    } else {
                        let ch = line[cursor_x..end].chars().next().unwrap_or(' ');
                        let col_char = CursorOps::char_index_at_byte(line, cursor_x);

                        self.doc.lines[cursor_y].drain(cursor_x..end);

                        Some(EditorAction::DeleteChar {
                            line: cursor_y,
                            col: col_char,
                            ch,
                        })
                    }
                } else if cursor_y + 1 < self.doc.lines.len() {
                    let next_line = self.doc.lines.remove(cursor_y + 1);
                    let join_col_char = self.doc.lines[cursor_y].chars().count();
                    self.doc.lines[cursor_y].push_str(&next_line);

                    Some(EditorAction::JoinLines {
                        line: cursor_y,
                        col: join_col_char,
                        deleted_content: next_line,
                    })
                } else {
                    None
                }
            }
        };

        if let Some(act) = action {
            self.after_edit();
            self.undo_stack.push(act);
        }
    }

    pub fn delete_line(&mut self) {
        let (line_num, content, was_single) = {
            let ln = self.view.cursor_y;
            if self.doc.lines.len() > 1 {
                let c = self.doc.lines.remove(ln);
                if self.view.cursor_y >= self.doc.lines.len() {
                    self.view.cursor_y = self.doc.lines.len() - 1;
                }
                CursorOps::clamp_cursor_x(&self.doc, &mut self.view);
                (ln, c, false)
            } else {
                let c = self.doc.lines[0].clone();
                self.doc.lines[0].clear();
                self.view.cursor_x = 0;
                (ln, c, true)
            }
        };

        self.clipboard.copy(&(content.clone() + "\n"), YankType::Line);
        self.after_edit();

        if was_single {
            if !content.is_empty() {
                self.undo_stack.push(EditorAction::ReplaceLine {
                    line_num,
                    old: content,
                    new: String::new(),
                });
            }
        } else {
            self.undo_stack
                .push(EditorAction::DeleteLine { line_num, content });
        }
    }

    pub fn insert_tab(&mut self) {
        for _ in 0..self.tab_size {
            self.insert_char(' ');
        }
    }

    // ========== Clipboard Operations ==========

    pub fn yank_line(&mut self) {
        if self.view.cursor_y < self.doc.lines.len() {
            let content = self.doc.lines[self.view.cursor_y].clone() + "\n";
            self.clipboard.copy(&content, YankType::Line);
        }
    }

    pub fn paste_after(&mut self) {
        self.paste(true);
    }

    pub fn paste_before(&mut self) {
        self.paste(false);
    }

    fn paste(&mut self, after: bool) {
        let (text, yank_type) = match self.clipboard.paste() {
            Some(v) => v,
            None => return,
        };

        if text.is_empty() {
            return;
        }

        match yank_type {
            YankType::Line => {
                let line_content = text.trim_end_matches('\n').to_string();
                let at = if after {
                    self.view.cursor_y + 1
                } else {
                    self.view.cursor_y
                };
                self.doc.lines.insert(at, line_content.clone());
                self.view.cursor_y = at;
                self.view.cursor_x = 0;
                self.after_edit();

                self.undo_stack.push(EditorAction::InsertLine {
                    line_num: at,
                    content: line_content,
                });
            }
            YankType::Char => {
                for ch in text.chars() {
                    if ch == '\n' {
                        self.insert_newline_with_indent(false);
                    } else {
                        self.insert_char(ch);
                    }
                }
            }
        }
    }

    // ========== Cursor Movement ==========

    pub fn move_cursor_up(&mut self) {
        CursorOps::move_up(&self.doc, &mut self.view);
    }

    pub fn move_cursor_down(&mut self) {
        CursorOps::move_down(&self.doc, &mut self.view);
    }

    pub fn move_cursor_left(&mut self) {
        CursorOps::move_left(&self.doc, &mut self.view);
    }

    pub fn move_cursor_right(&mut self) {
        CursorOps::move_right(&self.doc, &mut self.view);
    }

    pub fn move_to_line_start(&mut self) {
        CursorOps::move_to_line_start(&mut self.view);
    }

    pub fn move_to_line_end(&mut self) {
        CursorOps::move_to_line_end(&self.doc, &mut self.view);
    }

    pub fn go_to_line(&mut self, line_num: usize) {
        let target = line_num
            .saturating_sub(1)
            .min(self.doc.lines.len().saturating_sub(1));
        self.view.cursor_y = target;
        self.view.cursor_x = 0;
    }

    pub fn go_to_top(&mut self) {
        self.go_to_line(1);
    }

    pub fn go_to_bottom(&mut self) {
        self.go_to_line(self.doc.lines.len());
    }

    pub fn ensure_cursor_visible(&mut self) {
        if CursorOps::ensure_visible(&mut self.view) {
            self.notify_viewport_changed();
        }
    }

    /// Called after a terminal resize or layout change
    pub fn set_viewport_height(&mut self, height: usize) {
        if self.view.viewport_height != height {
            self.view.viewport_height = height;
            self.notify_viewport_changed();
        }
        self.ensure_cursor_visible();
    }

    // ========== Search Operations ==========

    pub fn search(&mut self, query: &str) {
        self.search_query = query.to_string();
        self.search_matches.clear();
        self.current_match = 0;

        if query.is_empty() {
            return;
        }

        for (line_idx, line) in self.doc.lines.iter().enumerate() {
            let chars: Vec<char> = line.chars().collect();
            for col in crate::syntax::match_positions(&chars, query) {
                self.search_matches.push((line_idx, col));
            }
        }

        if !self.search_matches.is_empty() {
            self.jump_to_current_match();
        }
    }

    pub fn find_next(&mut self) {
        if self.search_matches.is_empty() {
            return;
        }
        self.current_match = (self.current_match + 1) % self.search_matches.len();
        self.jump_to_current_match();
    }

    pub fn find_prev(&mut self) {
        if self.search_matches.is_empty() {
            return;
        }
        self.current_match = if self.current_match == 0 {
            self.search_matches.len() - 1
        } else {
            self.current_match - 1
        };
        self.jump_to_current_match();
    }

    fn jump_to_current_match(&mut self) {
        if let Some(&(line, col)) = self.search_matches.get(self.current_match) {
            self.view.cursor_y = line;
            self.view.cursor_x = CursorOps::byte_index_of_char(&self.doc.lines[line], col);
            self.ensure_cursor_visible();
        }
    }

    pub fn clear_search(&mut self) {
        self.search_query.clear();
        self.search_matches.clear();
        self.current_match = 0;
    }

    pub fn search_status(&self) -> Option<String> {
        if self.search_matches.is_empty() {
            if !self.search_query.is_empty() {
                Some(String::from("No matches"))
            } else {
                None
            }
        } else {
            Some(format!(
                "{}/{}",
                self.current_match + 1,
                self.search_matches.len()
            ))
        }
    }

    /// Character column of the current match, when it sits on this line
    pub fn current_match_col(&self, line_idx: usize) -> Option<usize> {
        self.search_matches
            .get(self.current_match)
            .filter(|(line, _)| *line == line_idx)
            .map(|&(_, col)| col)
    }

    // ========== Undo/Redo Operations ==========

    pub fn undo(&mut self) -> bool {
        if let Some(action) = self.undo_stack.pop_undo() {
            self.apply_undo_action(&action);
            self.undo_stack.push_redo(action);
            self.doc.sync_rope();
            self.notify_content_changed();
            true
        } else {
            false
        }
    }

    pub fn redo(&mut self) -> bool {
        if let Some(action) = self.undo_stack.pop_redo() {
            self.apply_redo_action(&action);
            self.undo_stack.undo_stack.push_back(action);
            self.doc.sync_rope();
            self.notify_content_changed();
            true
        } else {
            false
        }
    }

    fn apply_undo_action(&mut self, action: &EditorAction) {
        let doc = &mut self.doc;
        let view = &mut self.view;
        match action {
            EditorAction::InsertChar { line, col, .. } => {
                if *line < doc.lines.len() {
                    let ln = &mut doc.lines[*line];
                    let col_b = CursorOps::byte_index_of_char(ln, *col);
                    if col_b < ln.len() {
                        let end = CursorOps::next_char_boundary(ln, col_b);
                        ln.drain(col_b..end);
                        view.cursor_y = *line;
                        view.cursor_x = col_b;
                        doc.modified = true;
                    }
                }
            }
            EditorAction::DeleteChar { line, col, ch } => {
                if *line < doc.lines.len() {
                    let ln = &mut doc.lines[*line];
                    let col_b = CursorOps::byte_index_of_char(ln, *col);
                    ln.insert(col_b, *ch);
                    view.cursor_y = *line;
                    view.cursor_x = (col_b + ch.len_utf8()).min(ln.len());
                    doc.modified = true;
                }
            }
            EditorAction::InsertLine { line_num, .. } => {
                if *line_num < doc.lines.len() {
                    doc.lines.remove(*line_num);
                    if doc.lines.is_empty() {
                        doc.lines.push(String::new());
                    }
                    view.cursor_y = line_num.saturating_sub(1);
                    view.cursor_x = 0;
                    doc.modified = true;
                }
            }
            EditorAction::DeleteLine { line_num, content } => {
                doc.lines.insert(*line_num, content.clone());
                view.cursor_y = *line_num;
                view.cursor_x = 0;
                doc.modified = true;
            }
            EditorAction::ReplaceLine { line_num, old, .. } => {
                if *line_num < doc.lines.len() {
                    doc.lines[*line_num] = old.clone();
                    view.cursor_y = *line_num;
                    view.cursor_x = view.cursor_x.min(doc.lines[*line_num].len());
                    CursorOps::clamp_cursor_x(doc, view);
                    doc.modified = true;
                }
            }
            EditorAction::SplitLine { line, col } => {
                if *line + 1 < doc.lines.len() {
                    let next_line = doc.lines.remove(*line + 1);
                    let trimmed = next_line.trim_start();
                    let ln = &mut doc.lines[*line];
                    let col_b = CursorOps::byte_index_of_char(ln, *col);
                    ln.truncate(col_b);
                    ln.push_str(trimmed);
                    view.cursor_y = *line;
                    view.cursor_x = col_b.min(ln.len());
                    doc.modified = true;
                }
            }
            EditorAction::JoinLines {
                line,
                col,
                deleted_content,
            } => {
                if *line < doc.lines.len() {
                    let ln = &mut doc.lines[*line];
                    let col_b = CursorOps::byte_index_of_char(ln, *col);
                    let tail = ln.get(col_b..).unwrap_or("").to_string();
                    ln.truncate(col_b);
                    doc.lines.insert(*line + 1, deleted_content.clone() + &tail);
                    view.cursor_y = *line + 1;
                    view.cursor_x = 0;
                    doc.modified = true;
                }
            }
        }
    }

    fn apply_redo_action(&mut self, action: &EditorAction) {
        let doc = &mut self.doc;
        let view = &mut self.view;
        match action {
            EditorAction::InsertChar { line, col, ch } => {
                if *line < doc.lines.len() {
                    let ln = &mut doc.lines[*line];
                    let col_b = CursorOps::byte_index_of_char(ln, *col);
                    ln.insert(col_b, *ch);
                    view.cursor_y = *line;
                    view.cursor_x = (col_b + ch.len_utf8()).min(ln.len());
                    doc.modified = true;
                }
            }
            EditorAction::DeleteChar { line, col, .. } => {
                if *line < doc.lines.len() {
                    let ln = &mut doc.lines[*line];
                    let col_b = CursorOps::byte_index_of_char(ln, *col);
                    if col_b < ln.len() {
                        let end = CursorOps::next_char_boundary(ln, col_b);
                        ln.drain(col_b..end);
                        view.cursor_y = *line;
                        view.cursor_x = col_b;
                        doc.modified = true;
                    }
                }
            }
            EditorAction::InsertLine { line_num, content } => {
                doc.lines.insert(*line_num, content.clone());
                view.cursor_y = *line_num;
                view.cursor_x = 0;
                doc.modified = true;
            }
            EditorAction::DeleteLine { line_num, .. } => {
                if *line_num < doc.lines.len() {
                    doc.lines.remove(*line_num);
                    if doc.lines.is_empty() {
                        doc.lines.push(String::new());
                    }
                    view.cursor_y = (*line_num).min(doc.lines.len().saturating_sub(1));
                    view.cursor_x = 0;
                    doc.modified = true;
                }
            }
            EditorAction::ReplaceLine { line_num, new, .. } => {
                if *line_num < doc.lines.len() {
                    doc.lines[*line_num] = new.clone();
                    view.cursor_y = *line_num;
                    view.cursor_x = view.cursor_x.min(doc.lines[*line_num].len());
                    CursorOps::clamp_cursor_x(doc, view);
                    doc.modified = true;
                }
            }
            EditorAction::SplitLine { line, col } => {
                if *line < doc.lines.len() {
                    let ln = &mut doc.lines[*line];
                    let col_b = CursorOps::byte_index_of_char(ln, *col);
                    let remainder = ln.get(col_b..).unwrap_or("").to_string();
                    ln.truncate(col_b);
                    doc.lines.insert(*line + 1, remainder);
                    view.cursor_y = *line + 1;
                    view.cursor_x = 0;
                    doc.modified = true;
                }
            }
            EditorAction::JoinLines { line, col, .. } => {
                if *line + 1 < doc.lines.len() {
                    let next = doc.lines.remove(*line + 1);
                    doc.lines[*line].push_str(&next);
                    view.cursor_y = *line;
                    let ln = &doc.lines[*line];
                    let col_b = CursorOps::byte_index_of_char(ln, *col);
                    view.cursor_x = col_b.min(ln.len());
                    doc.modified = true;
                }
            }
        }
    }
}

fn calculate_indent(line: &str, tab_size: usize) -> String {
    let leading_ws: String = line.chars().take_while(|c| c.is_whitespace()).collect();

    // A block opener (line ending with :) indents one level deeper
    if line.trim_end().ends_with(':') {
        format!("{}{}", leading_ws, " ".repeat(tab_size))
    } else {
        leading_ws
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn editor_with(lines: &[&str]) -> EditorState {
        let mut ed = EditorState::new(4);
        ed.doc.lines = lines.iter().map(|s| s.to_string()).collect();
        ed.doc.sync_rope();
        ed
    }

    fn type_str(ed: &mut EditorState, text: &str) {
        for c in text.chars() {
            if c == '\n' {
                ed.insert_newline();
            } else {
                ed.insert_char(c);
            }
        }
    }

    #[test]
    fn insert_and_undo_restores_text() {
        let mut ed = EditorState::new(4);
        type_str(&mut ed, "print");
        assert_eq!(ed.doc.lines, vec!["print"]);

        for _ in 0..5 {
            assert!(ed.undo());
        }
        assert_eq!(ed.doc.lines, vec![""]);
        assert!(!ed.undo());

        for _ in 0..5 {
            assert!(ed.redo());
        }
        assert_eq!(ed.doc.lines, vec!["print"]);
    }

    #[test]
    fn newline_splits_line_and_undo_rejoins() {
        let mut ed = editor_with(&["abcdef"]);
        ed.view.cursor_x = 3;
        ed.insert_newline_with_indent(false);
        assert_eq!(ed.doc.lines, vec!["abc", "def"]);

        assert!(ed.undo());
        assert_eq!(ed.doc.lines, vec!["abcdef"]);
    }

    #[test]
    fn auto_indent_after_block_opener() {
        let mut ed = editor_with(&["def main():"]);
        ed.view.cursor_x = ed.doc.lines[0].len();
        ed.insert_newline();
        assert_eq!(ed.doc.lines[1], "    ");
        assert_eq!(ed.view.cursor_x, 4);
    }

    #[test]
    fn backspace_joins_lines() {
        let mut ed = editor_with(&["abc", "def"]);
        ed.view.cursor_y = 1;
        ed.view.cursor_x = 0;
        ed.backspace();
        assert_eq!(ed.doc.lines, vec!["abcdef"]);
        assert_eq!(ed.view.cursor_x, 3);

        assert!(ed.undo());
        assert_eq!(ed.doc.lines, vec!["abc", "def"]);
    }

    #[test]
    fn delete_line_and_undo() {
        let mut ed = editor_with(&["one", "two", "three"]);
        ed.view.cursor_y = 1;
        ed.delete_line();
        assert_eq!(ed.doc.lines, vec!["one", "three"]);

        assert!(ed.undo());
        assert_eq!(ed.doc.lines, vec!["one", "two", "three"]);
    }

    #[test]
    fn delete_last_line_clears_it() {
        let mut ed = editor_with(&["only"]);
        ed.delete_line();
        assert_eq!(ed.doc.lines, vec![""]);

        assert!(ed.undo());
        assert_eq!(ed.doc.lines, vec!["only"]);
    }

    #[test]
    fn multibyte_insert_and_backspace() {
        let mut ed = EditorState::new(4);
        type_str(&mut ed, "héllo");
        assert_eq!(ed.doc.lines, vec!["héllo"]);

        ed.backspace();
        ed.backspace();
        ed.backspace();
        ed.backspace();
        assert_eq!(ed.doc.lines, vec!["h"]);
    }

    #[test]
    fn edits_emit_content_changed() {
        let mut ed = EditorState::new(4);
        ed.take_events();

        ed.insert_char('x');
        let events = ed.take_events();
        assert!(events.contains(&EditorEvent::ContentChanged { line_count: 1 }));

        ed.insert_newline();
        let events = ed.take_events();
        assert!(events.contains(&EditorEvent::ContentChanged { line_count: 2 }));
    }

    #[test]
    fn viewport_height_change_emits_notification() {
        let mut ed = EditorState::new(4);
        ed.take_events();
        ed.set_viewport_height(20);
        assert!(ed.take_events().contains(&EditorEvent::ViewportChanged));

        // Same height again: no spurious notification
        ed.set_viewport_height(20);
        assert!(!ed.take_events().contains(&EditorEvent::ViewportChanged));
    }

    #[test]
    fn search_finds_all_matches_and_cycles() {
        let mut ed = editor_with(&["foo bar", "foo foo"]);
        ed.search("foo");
        assert_eq!(ed.search_matches, vec![(0, 0), (1, 0), (1, 4)]);
        assert_eq!(ed.view.cursor_y, 0);

        ed.find_next();
        assert_eq!((ed.view.cursor_y, ed.view.cursor_x), (1, 0));
        ed.find_next();
        assert_eq!((ed.view.cursor_y, ed.view.cursor_x), (1, 4));
        ed.find_next();
        assert_eq!((ed.view.cursor_y, ed.view.cursor_x), (0, 0));

        ed.find_prev();
        assert_eq!((ed.view.cursor_y, ed.view.cursor_x), (1, 4));
    }

    #[test]
    fn edit_clears_search_state() {
        let mut ed = editor_with(&["foo"]);
        ed.search("foo");
        assert!(!ed.search_matches.is_empty());
        ed.insert_char('x');
        assert!(ed.search_matches.is_empty());
        assert!(ed.search_query.is_empty());
    }

    #[test]
    fn failed_open_leaves_buffer_untouched() {
        let mut ed = editor_with(&["keep me"]);
        let missing = std::path::Path::new("/definitely/not/here.py");
        assert!(ed.open_file(missing).is_err());
        assert_eq!(ed.doc.lines, vec!["keep me"]);
    }

    #[test]
    fn content_reflects_edits_with_trailing_newline() {
        let mut ed = EditorState::new(4);
        type_str(&mut ed, "a\nb");
        assert_eq!(ed.get_content(), "a\nb\n");
    }

    #[test]
    fn go_to_line_clamps_to_document() {
        let mut ed = editor_with(&["one", "two"]);
        ed.go_to_line(99);
        assert_eq!(ed.view.cursor_y, 1);
        ed.go_to_line(1);
        assert_eq!(ed.view.cursor_y, 0);
    }
}
