//! Parley REST API entry point.
//!
//! Binary name: `parley`
//!
//! Parses CLI arguments, initializes the database and services, then starts
//! the HTTP server with graceful shutdown on Ctrl+C or SIGTERM.

mod http;
mod state;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use parley_infra::config::{CompletionConfig, CorsConfig};

use state::AppState;

/// Chat history backend with a synchronous completion relay.
#[derive(Parser)]
#[command(name = "parley", version, about)]
struct Cli {
    /// Host to bind the server to
    #[arg(long, default_value = "127.0.0.1", env = "PARLEY_HOST")]
    host: String,

    /// Port to listen on
    #[arg(short, long, default_value_t = 8000, env = "PARLEY_PORT")]
    port: u16,

    /// SQLite database URL; defaults to a file inside the data directory
    #[arg(long, env = "PARLEY_DATABASE_URL")]
    database_url: Option<String>,

    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long)]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up tracing based on verbosity
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info,parley_api=debug,parley_core=debug,parley_infra=debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .init();

    let completion = CompletionConfig::from_env();
    let cors = CorsConfig::from_env();

    // Initialize application state (DB, services, provider)
    let state = AppState::init(cli.database_url, completion).await?;

    let addr = format!("{}:{}", cli.host, cli.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    println!(
        "  {} Parley API listening on {}",
        console::style("⚡").bold(),
        console::style(format!("http://{addr}")).cyan()
    );
    println!(
        "  {} CORS origin: {}",
        console::style("🌐").bold(),
        console::style(&cors.allowed_origin).cyan()
    );
    println!("  {}", console::style("Press Ctrl+C to stop").dim());

    let router = http::router::build_router(state, &cors.allowed_origin)?;

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    println!("\n  Server stopped.");

    Ok(())
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
