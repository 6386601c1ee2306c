use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use datachat_core::{Config, Conversation, Envelope, HttpBackend, Message, Renderer};

mod app;
mod handler;
mod print;
mod tui;
mod ui;

use app::App;

/// Environment variable holding the log filter.
const LOG_ENV: &str = "DATACHAT_LOG";

#[derive(Parser)]
#[command(name = "datachat")]
#[command(about = "Ask natural-language questions of an analytics backend and see text, tables and charts")]
struct Cli {
    /// Backend endpoint, overriding the config file
    #[arg(long, global = true)]
    backend: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive chat (default)
    Chat,
    /// Ask a single question and print the reply
    Ask {
        /// Your question
        question: String,
    },
    /// Render a saved response envelope (JSON file) without contacting the backend
    Render {
        /// Path to the JSON file
        path: PathBuf,
    },
}

enum LogTarget {
    File,
    Stderr,
}

fn init_logging(target: LogTarget) -> Result<()> {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new("datachat=info,datachat_core=info"));

    match target {
        // The terminal owns stderr while the TUI runs
        LogTarget::File => {
            let log_dir = dirs::cache_dir()
                .context("Could not determine cache directory")?
                .join("datachat");
            fs::create_dir_all(&log_dir)?;
            let file = fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(log_dir.join("datachat.log"))?;

            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_writer(Mutex::new(file))
                        .with_ansi(false),
                )
                .init();
        }
        LogTarget::Stderr => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Chat);

    let log_target = match command {
        Commands::Chat => LogTarget::File,
        _ => LogTarget::Stderr,
    };
    if let Err(e) = init_logging(log_target) {
        eprintln!("{}: {}", "Logging disabled".yellow(), e);
    }

    let mut config = Config::load().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "could not read config, using defaults");
        Config::new()
    });
    if let Some(url) = cli.backend {
        config.backend_url = url;
    }

    match command {
        Commands::Chat => run_chat(&config).await,
        Commands::Ask { question } => ask(&config, &question).await,
        Commands::Render { path } => render_file(&config, &path),
    }
}

async fn run_chat(config: &Config) -> Result<()> {
    let backend = HttpBackend::with_timeout(&config.backend_url, config.timeout())?;
    let mut app = App::new(
        Arc::new(backend),
        config.backend_url.clone(),
        Renderer::new(config.theme()),
    );
    tracing::info!(backend = %config.backend_url, "starting chat");

    tui::install_panic_hook();
    let mut terminal = tui::init()?;
    let mut events = tui::EventHandler::new(tui::TICK_RATE);

    let result = async {
        while !app.should_quit {
            terminal.draw(|frame| ui::render(&mut app, frame))?;
            match events.next().await {
                Some(event) => handler::handle_event(&mut app, event).await,
                None => break,
            }
        }
        Ok::<_, anyhow::Error>(())
    }
    .await;

    tui::restore()?;
    result
}

async fn ask(config: &Config, question: &str) -> Result<()> {
    let backend = HttpBackend::with_timeout(&config.backend_url, config.timeout())?;
    let renderer = Renderer::new(config.theme());
    let mut conversation = Conversation::new();

    if !conversation.submit(question, &backend).await {
        println!("{}", "Nothing to ask: the question is empty".red());
        return Ok(());
    }

    for message in conversation.messages().iter().filter(|m| m.is_bot()) {
        print::print_tree(&renderer.render(message));
    }
    Ok(())
}

fn render_file(config: &Config, path: &Path) -> Result<()> {
    let body = fs::read_to_string(path)
        .with_context(|| format!("Could not read {}", path.display()))?;
    let envelope = Envelope::from_json(&body)
        .with_context(|| format!("{} is not a response envelope", path.display()))?;

    let renderer = Renderer::new(config.theme());
    print::print_tree(&renderer.render(&Message::bot(envelope)));
    Ok(())
}
