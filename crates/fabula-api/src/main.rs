//! Fabula entry point.
//!
//! Binary name: `fabula`
//!
//! Parses CLI arguments, wires the requested service's state, then
//! starts the chat or story HTTP server.

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod http;
mod state;

use state::{ChatState, StoryState};

#[derive(Parser)]
#[command(name = "fabula", version, about = "LLM-backed chat and text-adventure services")]
struct Cli {
    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the multi-dialog chat service
    Chat {
        #[arg(long, default_value = "0.0.0.0")]
        host: String,
        #[arg(long, default_value_t = 5556)]
        port: u16,
    },
    /// Start the text-adventure service
    Story {
        #[arg(long, default_value = "0.0.0.0")]
        host: String,
        #[arg(long, default_value_t = 5000)]
        port: u16,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up tracing based on verbosity
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "info",
        1 => "info,fabula=debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .init();

    match cli.command {
        Commands::Chat { host, port } => {
            // Missing credentials refuse startup here, by design.
            let state = ChatState::init().await?;
            let router = http::router::build_chat_router(state);
            serve("chat", &host, port, router).await?;
        }
        Commands::Story { host, port } => {
            let state = StoryState::init();
            let router = http::router::build_story_router(state);
            serve("story", &host, port, router).await?;
        }
    }

    Ok(())
}

/// Bind and run one service until Ctrl+C or SIGTERM.
async fn serve(service: &str, host: &str, port: u16, router: axum::Router) -> anyhow::Result<()> {
    let addr = format!("{host}:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    println!(
        "  {} Fabula {service} service listening on {}",
        console::style("⚡").bold(),
        console::style(format!("http://{addr}")).cyan()
    );
    println!("  {}", console::style("Press Ctrl+C to stop").dim());

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
