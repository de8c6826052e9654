use anyhow::Result;
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    crossterm::{
        execute,
        terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
    },
};
use std::io::stdout;

use splitedit::config::{self, ConfigManager};
use splitedit::{App, logging};

#[tokio::main]
async fn main() -> Result<()> {
    // Get command line arguments
    let args: Vec<String> = std::env::args().collect();

    let user_dir = config::user_dir();
    let mut config_manager = ConfigManager::new(&user_dir);
    config_manager.load()?;
    let config = config_manager.get_config().clone();

    logging::init(&config.log_path(&user_dir), &config.log.level)?;
    tracing::info!("splitedit {} starting", env!("CARGO_PKG_VERSION"));

    // Open the file before taking over the terminal so errors print normally
    let file_path = args
        .get(1)
        .cloned()
        .unwrap_or_else(|| config.editor.default_file.clone());
    let mut app = App::with_file(config, user_dir, &file_path)?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = app.run(&mut terminal).await;

    // Restore the terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        ratatui::crossterm::cursor::Show
    )?;

    if app.modified {
        tracing::warn!("quit with unsaved changes in {}", app.document.name());
    }

    // Handle any final errors
    match result {
        Ok(()) => {
            tracing::info!("splitedit exiting");
            Ok(())
        }
        Err(e) => {
            tracing::error!("{:#}", e);
            eprintln!("Error: {}", e);
            Err(e)
        }
    }
}
