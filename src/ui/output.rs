use crate::runner::RunOutput;
use crate::theme::Theme;
use ratatui::{
    prelude::*,
    text::Span,
    widgets::{Block, Borders, Paragraph},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputKind {
    Stdout,
    Stderr,
    Notice,
}

#[derive(Debug, Clone)]
pub struct OutputLine {
    pub text: String,
    pub kind: OutputKind,
}

/// One completed run, shown read-only. Independent of the editor and of
/// other runs; closing it discards the captured text.
pub struct RunView {
    pub label: String,
    pub lines: Vec<OutputLine>,
    pub scroll_offset: usize,
}

impl RunView {
    fn from_output(output: &RunOutput) -> Self {
        let mut lines = Vec::new();
        if output.is_empty() {
            lines.push(OutputLine {
                text: String::from("(no output)"),
                kind: OutputKind::Notice,
            });
        } else {
            for line in output.stdout.lines() {
                lines.push(OutputLine {
                    text: line.to_string(),
                    kind: OutputKind::Stdout,
                });
            }
            for line in output.stderr.lines() {
                lines.push(OutputLine {
                    text: line.to_string(),
                    kind: OutputKind::Stderr,
                });
            }
        }

        Self {
            label: format!("run {}", output.id),
            lines,
            scroll_offset: 0,
        }
    }
}

/// The output panel: holds every run view still open and which one is
/// showing.
pub struct OutputState {
    pub views: Vec<RunView>,
    pub active: usize,
    pub visible_height: usize,
}

impl OutputState {
    pub fn new() -> Self {
        Self {
            views: Vec::new(),
            active: 0,
            visible_height: 10, // Default, updated on render
        }
    }

    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }

    pub fn view_count(&self) -> usize {
        self.views.len()
    }

    /// Add a completed run and show it
    pub fn push_run(&mut self, output: &RunOutput) {
        self.views.push(RunView::from_output(output));
        self.active = self.views.len() - 1;
    }

    /// Close the showing view, discarding its text. Returns false when
    /// there was nothing to close.
    pub fn close_active(&mut self) -> bool {
        if self.views.is_empty() {
            return false;
        }
        self.views.remove(self.active);
        if self.active >= self.views.len() && self.active > 0 {
            self.active -= 1;
        }
        true
    }

    pub fn next_view(&mut self) {
        if self.views.len() > 1 {
            self.active = (self.active + 1) % self.views.len();
        }
    }

    pub fn prev_view(&mut self) {
        if self.views.len() > 1 {
            self.active = if self.active == 0 {
                self.views.len() - 1
            } else {
                self.active - 1
            };
        }
    }

    fn active_view_mut(&mut self) -> Option<&mut RunView> {
        self.views.get_mut(self.active)
    }

    pub fn active_view(&self) -> Option<&RunView> {
        self.views.get(self.active)
    }

    fn content_height(&self) -> usize {
        self.visible_height
    }

    pub fn scroll_up(&mut self, lines: usize) {
        if let Some(view) = self.active_view_mut() {
            view.scroll_offset = view.scroll_offset.saturating_sub(lines);
        }
    }

    pub fn scroll_down(&mut self, lines: usize) {
        let max_scroll = self.max_scroll();
        if let Some(view) = self.active_view_mut() {
            view.scroll_offset = (view.scroll_offset + lines).min(max_scroll);
        }
    }

    pub fn scroll_to_top(&mut self) {
        if let Some(view) = self.active_view_mut() {
            view.scroll_offset = 0;
        }
    }

    pub fn scroll_to_bottom(&mut self) {
        let max_scroll = self.max_scroll();
        if let Some(view) = self.active_view_mut() {
            view.scroll_offset = max_scroll;
        }
    }

    pub fn page_up(&mut self) {
        let page = self.content_height().max(1);
        self.scroll_up(page);
    }

    pub fn page_down(&mut self) {
        let page = self.content_height().max(1);
        self.scroll_down(page);
    }

    fn max_scroll(&self) -> usize {
        let content_height = self.content_height();
        self.active_view()
            .map(|v| v.lines.len().saturating_sub(content_height))
            .unwrap_or(0)
    }

    pub fn update_visible_height(&mut self, height: usize) {
        self.visible_height = height;
        let max_scroll = self.max_scroll();
        if let Some(view) = self.active_view_mut() {
            if view.scroll_offset > max_scroll {
                view.scroll_offset = max_scroll;
            }
        }
    }
}

impl Default for OutputState {
    fn default() -> Self {
        Self::new()
    }
}

pub fn render(frame: &mut Frame, area: Rect, state: &mut OutputState, focused: bool, theme: &Theme) {
    let border_style = if focused {
        Style::default().fg(theme.ui.border_focused.to_color())
    } else {
        Style::default().fg(theme.ui.border.to_color())
    };

    let title = match state.active_view() {
        Some(view) if state.view_count() > 1 => format!(
            " Output - {} ({}/{}) ",
            view.label,
            state.active + 1,
            state.view_count()
        ),
        Some(view) => format!(" Output - {} ", view.label),
        None => String::from(" Output "),
    };
    let title_style = if focused {
        Style::default()
            .fg(theme.ui.title_focused.to_color())
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.ui.title.to_color())
    };

    let block = Block::default()
        .title(Span::styled(title, title_style))
        .borders(Borders::ALL)
        .border_type(ratatui::widgets::BorderType::Rounded)
        .border_style(border_style)
        .style(Style::default().bg(theme.ui.background.to_color()));

    let inner = block.inner(area);
    state.update_visible_height(inner.height as usize);

    if state.is_empty() {
        let placeholder = Paragraph::new(Line::from(vec![
            Span::styled(
                " Press ",
                Style::default().fg(theme.ui.line_numbers.to_color()),
            ),
            Span::styled(
                "F5",
                Style::default()
                    .fg(theme.ui.title_focused.to_color())
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                " to run the buffer",
                Style::default().fg(theme.ui.line_numbers.to_color()),
            ),
        ]))
        .block(block);
        frame.render_widget(placeholder, area);
        return;
    }

    let content_height = inner.height as usize;
    let mut text: Vec<Line> = Vec::new();

    if let Some(view) = state.active_view() {
        for line in view.lines.iter().skip(view.scroll_offset).take(content_height) {
            let styled = match line.kind {
                OutputKind::Stdout => Line::from(Span::styled(
                    format!(" {}", line.text),
                    Style::default().fg(theme.ui.output_stdout.to_color()),
                )),
                OutputKind::Stderr => Line::from(Span::styled(
                    format!(" {}", line.text),
                    Style::default().fg(theme.ui.output_stderr.to_color()),
                )),
                OutputKind::Notice => Line::from(Span::styled(
                    format!(" {}", line.text),
                    Style::default()
                        .fg(theme.ui.output_notice.to_color())
                        .add_modifier(Modifier::ITALIC),
                )),
            };
            text.push(styled);
        }
    }

    let paragraph = Paragraph::new(text).block(block);
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(id: usize, stdout: &str, stderr: &str) -> RunOutput {
        RunOutput {
            id,
            stdout: stdout.to_string(),
            stderr: stderr.to_string(),
            exit_code: 0,
        }
    }

    #[test]
    fn each_run_gets_its_own_view() {
        let mut state = OutputState::new();
        state.push_run(&run(1, "first\n", ""));
        state.push_run(&run(2, "second\n", ""));
        assert_eq!(state.view_count(), 2);
        assert_eq!(state.active, 1);
        assert_eq!(state.active_view().unwrap().lines[0].text, "second");
    }

    #[test]
    fn stderr_lines_follow_stdout_lines() {
        let mut state = OutputState::new();
        state.push_run(&run(1, "out\n", "trace\n"));
        let view = state.active_view().unwrap();
        assert_eq!(view.lines.len(), 2);
        assert_eq!(view.lines[0].kind, OutputKind::Stdout);
        assert_eq!(view.lines[1].kind, OutputKind::Stderr);
        assert_eq!(view.lines[1].text, "trace");
    }

    #[test]
    fn closing_discards_the_view() {
        let mut state = OutputState::new();
        state.push_run(&run(1, "a\n", ""));
        state.push_run(&run(2, "b\n", ""));

        assert!(state.close_active());
        assert_eq!(state.view_count(), 1);
        assert_eq!(state.active_view().unwrap().lines[0].text, "a");

        assert!(state.close_active());
        assert!(state.is_empty());
        assert!(!state.close_active());
    }

    #[test]
    fn cycling_wraps_around() {
        let mut state = OutputState::new();
        for i in 1..=3 {
            state.push_run(&run(i, "x\n", ""));
        }
        assert_eq!(state.active, 2);
        state.next_view();
        assert_eq!(state.active, 0);
        state.prev_view();
        assert_eq!(state.active, 2);
    }

    #[test]
    fn scroll_is_clamped_to_content() {
        let mut state = OutputState::new();
        let body = (0..30).map(|i| format!("line {i}\n")).collect::<String>();
        state.push_run(&run(1, &body, ""));
        state.update_visible_height(12);

        state.scroll_down(100);
        let max = 30 - 12;
        assert_eq!(state.active_view().unwrap().scroll_offset, max);

        state.scroll_up(5);
        assert_eq!(state.active_view().unwrap().scroll_offset, max - 5);

        state.scroll_to_top();
        assert_eq!(state.active_view().unwrap().scroll_offset, 0);
    }

    #[test]
    fn empty_run_shows_a_notice() {
        let mut state = OutputState::new();
        state.push_run(&run(7, "", ""));
        let view = state.active_view().unwrap();
        assert_eq!(view.lines.len(), 1);
        assert_eq!(view.lines[0].kind, OutputKind::Notice);
    }
}
