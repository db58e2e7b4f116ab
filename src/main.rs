mod app;
mod domain;
mod input;
mod notifications;
mod persistence;
mod ticker;
mod ui;

use anyhow::Result;
use app::AppState;
use clap::{Parser, Subcommand};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use domain::{TaskStore, TickOutcome};
use persistence::{ensure_data_dir, init_local_toki, tasks_file};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use ticker::Ticker;

#[derive(Parser)]
#[command(name = "toki")]
#[command(about = "A terminal task tracker that runs one countdown timer at a time", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a local .toki directory in the current directory
    Init,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Init) => {
            let toki_dir = init_local_toki()?;
            println!("Initialized toki directory: {}", toki_dir.display());
            println!();
            println!("toki will now use this local directory for task storage.");
            println!("Run 'toki' to start tracking tasks.");
            Ok(())
        }
        None => run_tui(),
    }
}

fn run_tui() -> Result<()> {
    // Resolve and create the storage directory up front
    let toki_dir = ensure_data_dir()?;
    eprintln!("Using toki directory: {}", toki_dir.display());

    // Missing or unreadable state falls back to an empty list inside open()
    let store = TaskStore::open(tasks_file()?);
    let mut app = AppState::new(store);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Print any errors
    if let Err(err) = result {
        eprintln!("Error: {}", err);
    }

    Ok(())
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut AppState) -> Result<()> {
    let mut ticker = Ticker::new();

    loop {
        // Render
        terminal.draw(|f| ui::render(f, app))?;

        // Wait for input, bounded by the next countdown tick (or a long
        // idle timeout when nothing is running)
        if event::poll(ticker.timeout(&app.store))? {
            if let Event::Key(key) = event::read()? {
                // Only process key press events (ignore key release)
                if key.kind == KeyEventKind::Press {
                    let should_quit = input::handle_key(app, key)?;
                    if should_quit {
                        return Ok(());
                    }
                }
            }
        }

        // Advance the running countdown and fire the cue on a finish
        for outcome in ticker.poll(&mut app.store) {
            if let TickOutcome::Finished(id) = outcome {
                if let Some(task) = app.store.get(id) {
                    notifications::play_completion_cue(&task.text);
                    app.finished_banner = Some(task.text.clone());
                }
            }
        }
    }
}
