use crate::config::Config;
use crate::runner::{RunOutput, Runner};
use crate::syntax::Highlighter;
use crate::theme::Theme;
use crate::ui::editor::{Document, EditorState};
use crate::ui::gutter::Gutter;
use crate::ui::output::OutputState;
use anyhow::Result;
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Normal,
    Insert,
    Command,
    Search,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPanel {
    Editor,
    Output,
}

pub struct App {
    pub mode: Mode,
    pub focus: FocusedPanel,
    pub editor: EditorState,
    pub output: OutputState,
    pub gutter: Gutter,
    pub highlighter: Highlighter,
    pub command_input: String,
    pub search_input: String,
    pub status_message: String,
    pub config: Config,
    pub runner: Runner,
    run_rx: Receiver<RunOutput>,
    pub runs_in_flight: usize,
    pub show_output: bool,
    pub show_about: bool,
    pub output_height: u16,
    // Pending first key of dd / yy
    pub pending_key: Option<char>,
}

impl App {
    pub fn new(path: Option<PathBuf>) -> Result<Self> {
        let config = Config::load()?;

        let mut editor = EditorState::new(config.editor.tab_size);
        editor.auto_indent = config.editor.auto_indent;

        let mut status_message = String::from("Press F1 for keys | F5 runs the buffer");

        if let Some(file_path) = path {
            match editor.open_file(&file_path) {
                Ok(_) => {
                    status_message = format!("Opened: {}", file_path.display());
                }
                Err(e) => {
                    status_message = format!("Failed to open {}: {}", file_path.display(), e);
                }
            }
        }

        let (run_tx, run_rx) = mpsc::channel();
        let runner = Runner::new(config.interpreter.path.clone(), run_tx);
        let output_height = config.layout.output_height;

        let mut gutter = Gutter::new();
        for event in editor.take_events() {
            gutter.on_notification(event);
        }

        Ok(Self {
            mode: Mode::Normal,
            focus: FocusedPanel::Editor,
            editor,
            output: OutputState::new(),
            gutter,
            highlighter: Highlighter::new(),
            command_input: String::new(),
            search_input: String::new(),
            status_message,
            config,
            runner,
            run_rx,
            runs_in_flight: 0,
            show_output: false,
            show_about: false,
            output_height,
            pending_key: None,
        })
    }

    pub fn theme(&self) -> &Theme {
        &self.config.theme
    }

    pub fn set_theme(&mut self, name: &str) {
        self.config.set_theme(name);
        self.status_message = format!("Theme changed to: {}", name);
    }

    /// Forward pending editor notifications to the gutter. Called once
    /// per event-loop tick.
    pub fn drain_editor_events(&mut self) {
        for event in self.editor.take_events() {
            self.gutter.on_notification(event);
        }
    }

    /// Pick up completed runs from the worker threads without blocking
    pub fn poll_runs(&mut self) {
        while let Ok(run) = self.run_rx.try_recv() {
            self.runs_in_flight = self.runs_in_flight.saturating_sub(1);
            self.status_message = if run.exit_code == 0 {
                format!("Run {} finished", run.id)
            } else {
                format!("Run {} exited with code {}", run.id, run.exit_code)
            };
            self.output.push_run(&run);
            self.show_output = true;
        }
    }

    /// Hand the whole buffer to the interpreter on a worker thread. The
    /// UI keeps running; the result lands in `poll_runs`.
    pub fn run(&mut self) {
        let source = self.editor.get_content();
        let id = self.runner.spawn(source);
        self.runs_in_flight += 1;
        self.status_message = format!(
            "Run {} started ({})",
            id,
            self.runner.interpreter().display()
        );
    }

    pub fn save(&mut self) {
        let path = match self.editor.current_file().cloned() {
            Some(p) => p,
            None => PathBuf::from(Document::default_save_name()),
        };
        self.save_as(path);
    }

    pub fn save_as(&mut self, path: PathBuf) {
        match self.editor.save_to(&path) {
            Ok(_) => self.status_message = format!("Saved: {}", path.display()),
            Err(e) => self.status_message = format!("Failed to save {}: {}", path.display(), e),
        }
    }

    pub fn open(&mut self, path: PathBuf) {
        // A failed open reports and leaves the buffer as it was
        match self.editor.open_file(&path) {
            Ok(_) => {
                self.status_message = format!("Opened: {}", path.display());
                self.focus = FocusedPanel::Editor;
            }
            Err(e) => {
                self.status_message = format!("Failed to open {}: {}", path.display(), e);
            }
        }
    }

    pub fn toggle_output_focus(&mut self) {
        self.focus = match self.focus {
            FocusedPanel::Editor if !self.output.is_empty() => {
                self.show_output = true;
                FocusedPanel::Output
            }
            FocusedPanel::Editor => {
                self.status_message = String::from("No output yet - run the buffer first");
                FocusedPanel::Editor
            }
            FocusedPanel::Output => FocusedPanel::Editor,
        };
    }

    pub fn increase_output_height(&mut self) {
        let max = self.config.layout.output_max_height;
        if self.output_height < max {
            self.output_height += 2;
        }
    }

    pub fn decrease_output_height(&mut self) {
        let min = self.config.layout.output_min_height;
        if self.output_height > min {
            self.output_height -= 2;
        }
    }

    pub fn start_search(&mut self) {
        self.mode = Mode::Search;
        self.search_input.clear();
    }

    pub fn execute_search(&mut self) {
        self.editor.search(&self.search_input);
        if let Some(status) = self.editor.search_status() {
            self.status_message = format!("Search: {} - {}", self.search_input, status);
        }
        self.mode = Mode::Normal;
    }

    pub fn cancel_search(&mut self) {
        self.search_input.clear();
        self.editor.clear_search();
        self.mode = Mode::Normal;
    }

    pub fn execute_command(&mut self) -> Result<crate::input::CommandResult> {
        use crate::input::CommandResult;

        let cmd = self.command_input.trim().to_string();
        self.command_input.clear();
        self.mode = Mode::Normal;

        let parts: Vec<&str> = cmd.split_whitespace().collect();
        let base_cmd = parts.first().map(|s| s.to_lowercase()).unwrap_or_default();

        match base_cmd.as_str() {
            "q" | "quit" => {
                if self.editor.modified() {
                    self.status_message =
                        String::from("Unsaved changes. Use :q! to discard or :wq to save.");
                } else {
                    return Ok(CommandResult::Quit);
                }
            }
            "q!" => return Ok(CommandResult::Quit),
            "w" | "save" => {
                if parts.len() > 1 {
                    self.save_as(PathBuf::from(parts[1]));
                } else {
                    self.save();
                }
            }
            "wq" => {
                self.save();
                return Ok(CommandResult::Quit);
            }
            "o" | "e" | "open" | "edit" => {
                if parts.len() > 1 {
                    self.open(PathBuf::from(parts[1]));
                } else {
                    self.status_message = String::from("Usage: :o <filename>");
                }
            }
            "run" | "r" => self.run(),
            "output" => self.show_output = !self.show_output,
            "about" => self.show_about = true,
            "theme" => {
                if parts.len() > 1 {
                    self.set_theme(parts[1]);
                } else {
                    let themes = Theme::available_themes().join(", ");
                    self.status_message = format!("Available themes: {}", themes);
                }
            }
            _ => {
                // Try parsing as line number (e.g. :123)
                if let Ok(line_num) = cmd.parse::<usize>() {
                    self.editor.go_to_line(line_num);
                    self.editor.ensure_cursor_visible();
                    self.status_message = format!("Line {}", line_num);
                } else {
                    self.status_message = format!("Unknown command: {}", cmd);
                }
            }
        }

        Ok(CommandResult::Continue)
    }

    /// Keep editor scroll consistent with the current terminal size.
    /// Called every loop tick with the editor pane's inner height.
    pub fn update_editor_viewport(&mut self, height: usize) {
        self.editor.set_viewport_height(height);
    }
}
