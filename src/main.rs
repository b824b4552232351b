#![allow(dead_code)]

mod app;
mod config;
mod input;
mod lang;
mod runner;
mod syntax;
mod theme;
mod ui;

use anyhow::Result;
use app::App;
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use std::io::stdout;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "scriptpad")]
#[command(author, version, about = "TUI scratchpad editor for Python snippets", long_about = None)]
struct Args {
    /// File to open
    path: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(args.path)?;
    let result = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }

    Ok(())
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    loop {
        // Completed runs arrive over the channel between input events
        app.poll_runs();

        terminal.draw(|frame| ui::render(frame, app))?;

        // Editor pane inner height: borders, status bar, and the output
        // panel when shown
        let size = terminal.size()?;
        let output_rows = if app.show_output { app.output_height } else { 0 };
        let visible_height = size.height.saturating_sub(3 + output_rows) as usize;
        app.update_editor_viewport(visible_height);

        // Notify gutter and friends of content/viewport changes
        app.drain_editor_events();

        if let Some(action) = input::handle_event(app)? {
            match action {
                input::Action::Quit => break,
                input::Action::Run => app.run(),
                input::Action::Save => app.save(),
                input::Action::None => {}
            }
        }
    }
    Ok(())
}
