//! # contentgen-cli: A CLI for `contentgen`
//!
//! This is the main entry point for the content generation command-line
//! interface. It is the user-facing shell around the request handler.

mod app;
mod ui;

use anyhow::{bail, Result};
use app::{App, StderrNotifier};
use clap::{Parser, Subcommand};
use contentgen::{
    load_config, ApiClient, ClientConfig, GenerationRequestHandler, Invocation, Outcome,
    RequestPayload, SkipReason,
};
use std::fs::File;
use std::io::{self, Write};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

// --- CLI Definition ---

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Base URL of the generation API (absolute, or a path under --origin)
    #[arg(long, env = "API_URL", global = true)]
    api_url: Option<String>,
    /// Origin that a relative API base URL is resolved against
    #[arg(long, env = "API_ORIGIN", global = true)]
    origin: Option<String>,
    /// Where to write the log file
    #[arg(long, default_value = "contentgen-cli.log", global = true)]
    log_file: String,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate post variants for a draft
    Generate(GenerateArgs),
    /// Start an interactive session
    Interactive(InteractiveArgs),
    /// Check that the generation service is up
    Health,
}

#[derive(Parser, Debug)]
struct GenerateArgs {
    /// The draft text to send
    text: String,
    /// Optional user ID forwarded to the service
    #[arg(long)]
    user_id: Option<String>,
    /// Print the raw JSON response instead of the formatted result
    #[arg(long)]
    json: bool,
}

#[derive(Parser, Debug)]
struct InteractiveArgs {
    /// Optional user ID forwarded to the service
    #[arg(long)]
    user_id: Option<String>,
}

// --- Main Application Entry ---

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging to a file
    let log_file = File::create(&cli.log_file)?;
    let subscriber = fmt::Subscriber::builder()
        .with_writer(log_file)
        .with_ansi(false)
        .with_env_filter(EnvFilter::from_default_env())
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = resolve_config(&cli)?;

    match &cli.command {
        Commands::Generate(args) => {
            if let Err(e) = handle_generate(&config, args).await {
                eprintln!("Generate failed: {e}");
                std::process::exit(1);
            }
        }
        Commands::Interactive(args) => {
            if let Err(e) = handle_interactive(&config, args).await {
                eprintln!("Session failed: {e}");
                std::process::exit(1);
            }
        }
        Commands::Health => {
            if let Err(e) = handle_health(&config).await {
                eprintln!("Health check failed: {e}");
                std::process::exit(1);
            }
        }
    }

    Ok(())
}

/// Loads the configuration, then applies command-line overrides.
fn resolve_config(cli: &Cli) -> Result<ClientConfig> {
    let mut config = load_config()?;
    if let Some(api_url) = &cli.api_url {
        config.api_url = api_url.clone();
    }
    if let Some(origin) = &cli.origin {
        config.api_origin = origin.clone();
    }
    Ok(config)
}

fn build_handler(config: &ClientConfig) -> Result<GenerationRequestHandler> {
    let client = ApiClient::new(config)?;
    info!("Generate endpoint: {}", client.generate_url());
    Ok(GenerationRequestHandler::new(
        Box::new(client),
        Arc::new(StderrNotifier),
    ))
}

// --- Command Handlers ---

async fn handle_generate(config: &ClientConfig, args: &GenerateArgs) -> Result<()> {
    let handler = build_handler(config)?;

    let mut payload = RequestPayload::new(args.text.as_str());
    if let Some(user_id) = &args.user_id {
        payload = payload.with_user_id(user_id.clone());
    }

    match handler.generate_payload(payload).await {
        Invocation::Skipped(SkipReason::EmptyInput) => {
            info!("Empty input; nothing to generate.");
            Ok(())
        }
        Invocation::Skipped(SkipReason::Busy) => bail!("a generation is already in progress"),
        Invocation::Completed(Outcome::Failure(e)) => Err(e.into()),
        Invocation::Completed(Outcome::Success(result)) => {
            let mut stdout = io::stdout().lock();
            if args.json {
                ui::render_json(&mut stdout, result.as_value())?;
            } else {
                ui::render_result(&mut stdout, &handler.snapshot())?;
            }
            stdout.flush()?;
            Ok(())
        }
    }
}

async fn handle_interactive(config: &ClientConfig, args: &InteractiveArgs) -> Result<()> {
    let handler = build_handler(config)?;
    let mut app = App::new(handler, args.user_id.clone());
    info!("Starting interactive session.");

    let mut stdout = io::stdout();
    ui::ui(&mut stdout, &app)?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while app.running {
        let Some(line) = lines.next_line().await? else {
            break;
        };
        app.handle_line(&line).await;
        ui::ui(&mut stdout, &app)?;
    }

    info!("Interactive session ended.");
    Ok(())
}

async fn handle_health(config: &ClientConfig) -> Result<()> {
    let client = ApiClient::new(config)?;
    let health = client.health().await?;
    println!("✅ {}: {}", health.status, health.message);
    Ok(())
}
