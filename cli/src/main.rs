//! Board service CLI server
//!
//! Headless bulletin board backend suitable for deployment as a systemd
//! service, Docker container, or standalone process.
//!
//! ```sh
//! # Run with default config (~/.config/board-service/config.toml)
//! board-service
//!
//! # Custom config path
//! board-service --config /etc/board-service/config.toml
//!
//! # Override the port
//! board-service --port 8081
//!
//! # Validate config without starting
//! board-service --check
//!
//! # Write the effective config (defaults plus overrides) and exit
//! board-service --write-config
//! ```

use std::path::PathBuf;

use clap::Parser;
use tracing::{error, info};

use board_service::config::AppConfig;
use board_service::server::{init_tracing, ServerHandle, ServerOptions};

/// Bulletin board REST server with paginated post and category search.
#[derive(Parser, Debug)]
#[command(
    name = "board-service",
    version,
    about = "Bulletin board REST API server",
    long_about = "Bulletin board REST API server: posts, categories and \
                  paginated keyword/filter search.\n\n\
                  Default config: ~/.config/board-service/config.toml"
)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, env = "BOARD_CONFIG")]
    config: Option<PathBuf>,

    /// Override the REST API listen port.
    #[arg(short, long)]
    port: Option<u16>,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(short, long)]
    log_level: Option<String>,

    /// Validate the configuration file and exit without starting the server.
    #[arg(long)]
    check: bool,

    /// Write the effective configuration to the config path and exit.
    #[arg(long)]
    write_config: bool,

    /// Skip database migrations on startup.
    #[arg(long)]
    no_migrate: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // ── Load configuration ─────────────────────────────────────
    let config_path = cli
        .config
        .unwrap_or_else(board_service::default_config_path);

    let loaded = AppConfig::load(&config_path);
    if cli.write_config {
        let mut config = loaded?;
        if let Some(port) = cli.port {
            config.server.port = port;
        }
        if let Some(level) = cli.log_level {
            config.logging.level = level;
        }
        config.save(&config_path)?;
        println!("✅ Configuration written to {}", config_path.display());
        return Ok(());
    }

    if cli.check {
        let config = loaded?;
        println!("✅ Configuration is valid");
        println!("   Config file : {}", config_path.display());
        println!("   API address : {}", config.server.address());
        println!("   Database    : {}", config.database.connection_url());
        println!("   Log level   : {}", config.logging.level);
        return Ok(());
    }

    let mut config = match loaded {
        Ok(mut cfg) => {
            if let Some(ref level) = cli.log_level {
                cfg.logging.level = level.clone();
            }
            // Init tracing first so subsequent logs are formatted properly
            init_tracing(&cfg);
            info!("Configuration loaded from {}", config_path.display());
            cfg
        }
        Err(e) => {
            let mut cfg = AppConfig::default();
            if let Some(ref level) = cli.log_level {
                cfg.logging.level = level.clone();
            }
            init_tracing(&cfg);
            error!("{}", e);
            error!("Using default configuration.");
            cfg
        }
    };

    // ── Apply CLI overrides ────────────────────────────────────
    if let Some(port) = cli.port {
        info!("CLI override: port = {}", port);
        config.server.port = port;
    }

    // ── Start server ───────────────────────────────────────────
    let handle = ServerHandle::start(ServerOptions {
        config,
        auto_migrate: !cli.no_migrate,
    })
    .await?;

    // Install OS signal handlers (SIGTERM, SIGINT)
    handle.install_signal_handler();

    info!("🚀 Press Ctrl+C to shutdown gracefully.");

    handle.shutdown_signal().wait().await;
    handle.wait().await;

    Ok(())
}
