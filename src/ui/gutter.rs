use crate::ui::editor::{EditorEvent, EditorState};

/// The line-number column. Holds no line-count state of its own: labels
/// are derived from the editor's scroll and viewport at draw time. The
/// only cached value is the column width, recomputed on content-changed
/// notifications so a growing digit count (99 -> 100) is never clipped.
pub struct Gutter {
    width: u16,
    needs_redraw: bool,
}

const MIN_DIGITS: usize = 3;

impl Gutter {
    pub fn new() -> Self {
        Self {
            width: Self::width_for(1),
            needs_redraw: true,
        }
    }

    /// Subscriber entry point for editor notifications
    pub fn on_notification(&mut self, event: EditorEvent) {
        match event {
            EditorEvent::ContentChanged { line_count } => {
                self.width = Self::width_for(line_count);
                self.needs_redraw = true;
            }
            EditorEvent::ViewportChanged => {
                self.needs_redraw = true;
            }
        }
    }

    fn width_for(line_count: usize) -> u16 {
        let digits = line_count.max(1).to_string().len().max(MIN_DIGITS);
        (digits + 1) as u16 // trailing space between numbers and text
    }

    /// Width in columns, including the trailing pad
    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn take_needs_redraw(&mut self) -> bool {
        std::mem::take(&mut self.needs_redraw)
    }

    /// Line-number labels for the currently visible rows, queried from
    /// the editor's scroll state: counts forward from the first visible
    /// line until the viewport or the document runs out.
    pub fn labels(&self, editor: &EditorState, viewport_height: usize) -> Vec<String> {
        let num_width = self.width as usize - 1;
        let first = editor.scroll_offset();
        let line_count = editor.lines().len();

        (first..line_count)
            .take(viewport_height)
            .map(|idx| format!("{:>width$} ", idx + 1, width = num_width))
            .collect()
    }
}

impl Default for Gutter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::editor::EditorState;

    fn editor_with_lines(n: usize) -> EditorState {
        let mut ed = EditorState::new(4);
        ed.doc.lines = (0..n).map(|i| format!("line {}", i)).collect();
        ed.doc.sync_rope();
        ed
    }

    fn synced_gutter(ed: &mut EditorState) -> Gutter {
        let mut gutter = Gutter::new();
        ed.take_events();
        gutter.on_notification(EditorEvent::ContentChanged {
            line_count: ed.lines().len(),
        });
        gutter
    }

    #[test]
    fn label_count_matches_document_when_viewport_is_larger() {
        let mut ed = editor_with_lines(5);
        let gutter = synced_gutter(&mut ed);
        let labels = gutter.labels(&ed, 50);
        assert_eq!(labels.len(), ed.lines().len());
        assert_eq!(labels[0].trim(), "1");
        assert_eq!(labels[4].trim(), "5");
    }

    #[test]
    fn labels_start_at_first_visible_line() {
        let mut ed = editor_with_lines(100);
        let gutter = synced_gutter(&mut ed);
        ed.view.scroll_offset = 40;
        let labels = gutter.labels(&ed, 10);
        assert_eq!(labels.len(), 10);
        assert_eq!(labels[0].trim(), "41");
        assert_eq!(labels[9].trim(), "50");
    }

    #[test]
    fn width_grows_with_digit_count() {
        let mut gutter = Gutter::new();
        assert_eq!(gutter.width(), 4); // 3-digit minimum plus pad

        gutter.on_notification(EditorEvent::ContentChanged { line_count: 999 });
        assert_eq!(gutter.width(), 4);

        gutter.on_notification(EditorEvent::ContentChanged { line_count: 1000 });
        assert_eq!(gutter.width(), 5);

        gutter.on_notification(EditorEvent::ContentChanged { line_count: 1 });
        assert_eq!(gutter.width(), 4);
    }

    #[test]
    fn tracks_line_count_through_edits() {
        let mut ed = editor_with_lines(1);
        let mut gutter = synced_gutter(&mut ed);

        ed.insert_newline();
        ed.insert_newline();
        for event in ed.take_events() {
            gutter.on_notification(event);
        }
        assert_eq!(gutter.labels(&ed, 50).len(), 3);

        ed.backspace();
        for event in ed.take_events() {
            gutter.on_notification(event);
        }
        assert_eq!(gutter.labels(&ed, 50).len(), 2);
    }

    #[test]
    fn viewport_notification_requests_redraw() {
        let mut gutter = Gutter::new();
        let _ = gutter.take_needs_redraw();
        assert!(!gutter.take_needs_redraw());

        gutter.on_notification(EditorEvent::ViewportChanged);
        assert!(gutter.take_needs_redraw());
    }
}
