//! `chirpd` — the chirp server binary.
//!
//! Usage:
//!   chirpd [-c <config.toml>] [--db <file>] [serve [--listen <addr>]]
//!   chirpd [-c <config.toml>] [--db <file>] follow <follower> <following>
//!   chirpd [-c <config.toml>] [--db <file>] unfollow <follower> <following>
//!
//! Without a subcommand the server is started.

mod bootstrap;
mod commands;
mod config;
mod routes;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::{info, warn};

use chirp_core::{Module, ServiceConfig};
use social::SocialModule;

use config::ServerConfig;

/// chirp server.
#[derive(Parser, Debug)]
#[command(name = "chirpd", about = "chirp social API server")]
struct Cli {
    /// Path to a TOML config file. Defaults apply when omitted.
    #[arg(short = 'c', long = "config", global = true)]
    config: Option<PathBuf>,

    /// SQLite database file (overrides the config file).
    #[arg(long = "db", global = true)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP server (default).
    Serve {
        /// Listen address (overrides the config file).
        #[arg(long = "listen")]
        listen: Option<String>,
    },

    /// Add a follow edge between two existing users.
    Follow {
        follower: String,
        following: String,
    },

    /// Remove the follow edges between two users.
    Unfollow {
        follower: String,
        following: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Command::Serve { listen: None });

    // Load server configuration, then apply CLI overrides.
    if let Some(path) = &cli.config {
        info!("Loading configuration from {}", path.display());
    }
    let mut server_config = ServerConfig::load_or_default(cli.config.as_deref())?;
    if let Command::Serve { listen: Some(listen) } = &command {
        server_config.server.listen = listen.clone();
    }
    bootstrap::verify_config(&server_config)?;

    let mut core_config = server_config.service_config();
    if let Some(db) = cli.db {
        core_config.sqlite_path = Some(db);
    }

    let sql = bootstrap::open_store(&core_config)?;
    let social_module = SocialModule::new(sql, server_config.social_config())
        .map_err(|e| anyhow::anyhow!("failed to initialize social module: {}", e))?;
    info!("Social module initialized");

    match command {
        Command::Serve { .. } => serve(&core_config, &social_module).await,
        Command::Follow { follower, following } => {
            commands::follow(social_module.service(), &follower, &following)?;
            println!("{} now follows {}", follower, following);
            Ok(())
        }
        Command::Unfollow { follower, following } => {
            let removed = commands::unfollow(social_module.service(), &follower, &following)?;
            println!("removed {} edge(s) from {} to {}", removed, follower, following);
            Ok(())
        }
    }
}

async fn serve(core_config: &ServiceConfig, social_module: &SocialModule) -> anyhow::Result<()> {
    let app = routes::build_router(&[social_module as &dyn Module]);

    let listener = tokio::net::TcpListener::bind(&core_config.listen).await?;
    info!("chirp server listening on {}", core_config.listen);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

/// Resolve on Ctrl-C or SIGTERM. In-flight requests are allowed to finish.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("cannot listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                warn!("cannot listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("Shutdown signal received");
}
