use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tokio::net::TcpListener;

use trellis::config::Config;
use trellis::state::AppState;
use trellis::theme::{JsonFileStore, PresentationRoot, SimulatedHost, ThemeManager, ThemeMode};

#[derive(Parser)]
#[command(name = "trellis", version, about = "Room and space browsing backend")]
struct Cli {
    /// Port to listen on (overrides PORT)
    #[arg(long, global = true)]
    port: Option<u16>,
    /// SQLite URL (overrides DATABASE_URL)
    #[arg(long, global = true)]
    database_url: Option<String>,
    /// Preferences file (overrides TRELLIS_PREFERENCES_PATH)
    #[arg(long, global = true)]
    preferences: Option<PathBuf>,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP server (default)
    Serve {
        /// Enable the /test/seed endpoint
        #[arg(long)]
        test_mode: bool,
    },
    /// Show or change the stored theme
    Theme {
        /// light, dark or system
        #[arg(long)]
        set: Option<String>,
        /// Treat the host as preferring a dark color scheme
        #[arg(long)]
        prefers_dark: bool,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "trellis=debug,tower_http=debug".into()),
        )
        .init();

    let cli = Cli::parse();
    let mut config = Config::from_env();
    if let Some(port) = cli.port {
        config.port = port;
    }
    if let Some(url) = cli.database_url {
        config.database_url = url;
    }
    if let Some(path) = cli.preferences {
        config.preferences_path = path;
    }

    match cli.command.unwrap_or(Command::Serve { test_mode: false }) {
        Command::Serve { test_mode } => {
            config.test_mode |= test_mode;
            print_banner(&config);
            run_server(config).await;
        }
        Command::Theme { set, prefers_dark } => {
            if let Err(msg) = run_theme(&config, set.as_deref(), prefers_dark) {
                eprintln!("error: {msg}");
                std::process::exit(2);
            }
        }
    }
}

fn print_banner(config: &Config) {
    let version = env!("CARGO_PKG_VERSION");

    eprintln!();
    eprintln!("  \x1b[1;36mtrellis\x1b[0m \x1b[2mv{version}\x1b[0m");
    eprintln!();
    eprintln!("  \x1b[2mport\x1b[0m         {}", config.port);
    eprintln!("  \x1b[2mdatabase\x1b[0m     {}", config.database_url);
    eprintln!(
        "  \x1b[2mpreferences\x1b[0m  {}",
        config.preferences_path.display()
    );
    eprintln!(
        "  \x1b[2mdefaults\x1b[0m     {} default room(s)",
        config.default_rooms.len()
    );

    if config.test_mode {
        eprintln!();
        eprintln!("  \x1b[33m! test mode enabled\x1b[0m");
    }

    eprintln!();
}

async fn run_server(config: Config) {
    let db = trellis::db::create_pool(&config.database_url)
        .await
        .expect("failed to create database pool");

    let state = AppState {
        db,
        preferences: Arc::new(JsonFileStore::new(&config.preferences_path)),
        default_rooms: Arc::new(config.default_rooms.clone()),
        test_mode: config.test_mode,
    };

    let app = trellis::routes::router(state);

    let listener = TcpListener::bind(("0.0.0.0", config.port))
        .await
        .expect("failed to bind");

    let actual_port = listener
        .local_addr()
        .expect("failed to get local address")
        .port();
    eprintln!("  \x1b[32m→ listening on 0.0.0.0:{actual_port}\x1b[0m");
    eprintln!();

    axum::serve(listener, app).await.expect("server error");
}

/// Headless theme management. There is no live appearance API here, so the
/// system preference comes from the command line and nothing is watched.
fn run_theme(config: &Config, set: Option<&str>, prefers_dark: bool) -> Result<(), String> {
    let manager = ThemeManager::new(
        JsonFileStore::new(&config.preferences_path),
        SimulatedHost::without_notifications(prefers_dark),
        PresentationRoot::new(),
    );

    if let Some(raw) = set {
        let mode: ThemeMode = raw.parse().map_err(|e| format!("{e}"))?;
        manager.set_stored_theme(mode);
    }

    let mode = manager.get_stored_theme();
    let appearance = manager.apply_theme(mode);
    println!("{mode} ({})", appearance.color_scheme.as_str());
    Ok(())
}
