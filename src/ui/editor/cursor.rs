use super::document::Document;
use super::ViewState;

/// Cursor and scroll utilities. Columns are byte offsets into the current
/// line; every helper keeps them on UTF-8 character boundaries.
pub struct CursorOps;

impl CursorOps {
    pub fn clamp_to_char_boundary(s: &str, idx: usize) -> usize {
        let idx = idx.min(s.len());
        if s.is_char_boundary(idx) {
            return idx;
        }

        // Search left for the nearest boundary
        let mut i = idx;
        while i > 0 {
            i -= 1;
            if s.is_char_boundary(i) {
                return i;
            }
        }
        0
    }

    /// Find the byte offset of the previous character boundary
    pub fn prev_char_boundary(s: &str, idx: usize) -> usize {
        let idx = Self::clamp_to_char_boundary(s, idx);
        if idx == 0 {
            return 0;
        }

        let mut i = idx - 1;
        while i > 0 && !s.is_char_boundary(i) {
            i -= 1;
        }
        i
    }

    /// Find the byte offset of the next character boundary
    pub fn next_char_boundary(s: &str, idx: usize) -> usize {
        let idx = Self::clamp_to_char_boundary(s, idx);
        if idx >= s.len() {
            return s.len();
        }

        let ch = s[idx..].chars().next().unwrap_or('\0');
        (idx + ch.len_utf8()).min(s.len())
    }

    /// Convert byte index to character index
    pub fn char_index_at_byte(s: &str, byte_idx: usize) -> usize {
        let byte_idx = Self::clamp_to_char_boundary(s, byte_idx);
        s[..byte_idx].chars().count()
    }

    /// Convert character index to byte index
    pub fn byte_index_of_char(s: &str, char_idx: usize) -> usize {
        if char_idx == 0 {
            return 0;
        }
        match s.char_indices().nth(char_idx) {
            Some((b, _)) => b,
            None => s.len(),
        }
    }

    /// Clamp cursor_x to valid range for the current line
    pub fn clamp_cursor_x(doc: &Document, view: &mut ViewState) {
        if view.cursor_y >= doc.lines.len() {
            view.cursor_x = 0;
            return;
        }

        let line = &doc.lines[view.cursor_y];
        view.cursor_x = view.cursor_x.min(line.len());
        view.cursor_x = Self::clamp_to_char_boundary(line, view.cursor_x);
    }

    pub fn move_up(doc: &Document, view: &mut ViewState) {
        if view.cursor_y > 0 {
            view.cursor_y -= 1;
            Self::clamp_cursor_x(doc, view);
        }
    }

    pub fn move_down(doc: &Document, view: &mut ViewState) {
        if view.cursor_y + 1 < doc.lines.len() {
            view.cursor_y += 1;
            Self::clamp_cursor_x(doc, view);
        }
    }

    pub fn move_left(doc: &Document, view: &mut ViewState) {
        if view.cursor_y >= doc.lines.len() {
            view.cursor_y = 0;
            view.cursor_x = 0;
            return;
        }

        let line = &doc.lines[view.cursor_y];
        view.cursor_x = Self::clamp_to_char_boundary(line, view.cursor_x);

        if view.cursor_x > 0 {
            view.cursor_x = Self::prev_char_boundary(line, view.cursor_x);
        } else if view.cursor_y > 0 {
            view.cursor_y -= 1;
            view.cursor_x = doc.lines[view.cursor_y].len();
        }
    }

    pub fn move_right(doc: &Document, view: &mut ViewState) {
        if view.cursor_y >= doc.lines.len() {
            view.cursor_y = 0;
            view.cursor_x = 0;
            return;
        }

        let line = &doc.lines[view.cursor_y];
        view.cursor_x = Self::clamp_to_char_boundary(line, view.cursor_x);

        if view.cursor_x < line.len() {
            view.cursor_x = Self::next_char_boundary(line, view.cursor_x);
        } else if view.cursor_y + 1 < doc.lines.len() {
            view.cursor_y += 1;
            view.cursor_x = 0;
        }
    }

    pub fn move_to_line_start(view: &mut ViewState) {
        view.cursor_x = 0;
    }

    pub fn move_to_line_end(doc: &Document, view: &mut ViewState) {
        if view.cursor_y < doc.lines.len() {
            view.cursor_x = doc.lines[view.cursor_y].len();
        }
    }

    /// Scroll so the cursor is inside the viewport. Returns true when the
    /// scroll offset changed.
    pub fn ensure_visible(view: &mut ViewState) -> bool {
        let before = view.scroll_offset;
        if view.cursor_y < view.scroll_offset {
            view.scroll_offset = view.cursor_y;
        } else if view.viewport_height > 0
            && view.cursor_y >= view.scroll_offset + view.viewport_height
        {
            view.scroll_offset = view.cursor_y - view.viewport_height + 1;
        }
        view.scroll_offset != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundary_helpers_handle_multibyte() {
        let s = "héllo";
        // é is two bytes, so byte 2 is mid-character
        assert_eq!(CursorOps::clamp_to_char_boundary(s, 2), 1);
        assert_eq!(CursorOps::next_char_boundary(s, 1), 3);
        assert_eq!(CursorOps::prev_char_boundary(s, 3), 1);
        assert_eq!(CursorOps::char_index_at_byte(s, 3), 2);
        assert_eq!(CursorOps::byte_index_of_char(s, 2), 3);
    }

    #[test]
    fn ensure_visible_scrolls_both_directions() {
        let mut view = ViewState {
            cursor_x: 0,
            cursor_y: 25,
            scroll_offset: 0,
            viewport_height: 10,
        };
        assert!(CursorOps::ensure_visible(&mut view));
        assert_eq!(view.scroll_offset, 16);

        view.cursor_y = 3;
        assert!(CursorOps::ensure_visible(&mut view));
        assert_eq!(view.scroll_offset, 3);

        // Already visible: no change
        view.cursor_y = 5;
        assert!(!CursorOps::ensure_visible(&mut view));
    }
}
