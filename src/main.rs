mod api;
mod app;
mod config;
mod format;
mod logging;
mod session;
mod store;
mod ui;
mod validate;

use anyhow::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use api::{Gateway, HttpGateway};
use app::App;
use config::Config;
use session::SessionStore;

struct CliArgs {
    config_path: Option<PathBuf>,
    server: Option<String>,
}

fn parse_args() -> CliArgs {
    let args: Vec<String> = std::env::args().collect();
    let mut config_path = None;
    let mut server = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                print_help();
                std::process::exit(0);
            }
            "--version" | "-V" => {
                println!("picshelf {}", env!("CARGO_PKG_VERSION"));
                std::process::exit(0);
            }
            "--config" | "-c" => {
                if i + 1 < args.len() {
                    config_path = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                } else {
                    eprintln!("Error: --config requires a path argument");
                    std::process::exit(1);
                }
            }
            "--server" | "-s" => {
                if i + 1 < args.len() {
                    server = Some(args[i + 1].clone());
                    i += 1;
                } else {
                    eprintln!("Error: --server requires a URL argument");
                    std::process::exit(1);
                }
            }
            _ => {
                eprintln!("Unknown argument: {}", args[i]);
                print_help();
                std::process::exit(1);
            }
        }
        i += 1;
    }

    CliArgs { config_path, server }
}

fn print_help() {
    println!(
        r#"picshelf - TUI client for a photo-gallery backend

USAGE:
    picshelf [OPTIONS]

OPTIONS:
    --config, -c PATH   Path to config file
    --server, -s URL    Backend base URL (overrides config)
    --version, -V       Show version
    --help, -h          Show this help message

ENVIRONMENT:
    PICSHELF_LOG        Log level (trace, debug, info, warn, error)

Config file location: $XDG_CONFIG_HOME/picshelf/config.toml"#
    );
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = parse_args();

    // Initialize logging (uses journald on Linux, file fallback otherwise)
    let _ = logging::init(&Config::config_dir().join("logs"));

    // Load configuration
    let mut config = match args.config_path {
        Some(path) => Config::load_from(&path)?,
        None => Config::load()?,
    };
    if let Some(server) = args.server {
        config.server.base_url = server;
    }

    // Persisted session and backend gateway
    let session = Arc::new(SessionStore::load(&config.session.path));
    let gateway: Arc<dyn Gateway> = Arc::new(HttpGateway::new(
        &config.server.base_url,
        Duration::from_secs(config.server.timeout_secs),
        session.clone(),
    ));

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create and run app
    let mut app = App::new(config, session, gateway);
    let result = app.run(&mut terminal).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}
