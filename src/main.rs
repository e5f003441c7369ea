//! zonebar: blue/green deployment health probe and banner service.
//!
//! This is the application entry point. It loads configuration from a TOML
//! file, initializes tracing, seeds the availability flag from the zone
//! marker file, sets up the Axum router, and starts the HTTP server.

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use zonebar::config::{AppConfig, DEFAULT_CONFIG_PATH, DEFAULT_LOG_FILTER, VERSION};
use zonebar::http::start_server;
use zonebar::routes::create_router;
use zonebar::state::AppState;

/// zonebar: blue/green deployment health probe and zone banner
#[derive(Parser, Debug)]
#[command(name = "zonebar", version, about)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    config: String,

    /// Log level filter (e.g., "zonebar=debug")
    #[arg(short, long)]
    log_level: Option<String>,

    /// Deployment zone of this process (overrides the config file)
    #[arg(short, long)]
    zone: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command line arguments
    let args = Args::parse();

    // Load configuration (built-in defaults if the file is absent)
    let mut config = AppConfig::load(&args.config)?;

    // Zone precedence: CLI > config file
    if args.zone.is_some() {
        config.deployment.zone = args.zone;
    }

    // Initialize tracing with priority: CLI > env > default
    let log_filter = args
        .log_level
        .or_else(|| std::env::var("RUST_LOG").ok())
        .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

    if config.logging.format == "json" {
        tracing_subscriber::registry()
            .with(tracing_subscriber::EnvFilter::new(&log_filter))
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(tracing_subscriber::EnvFilter::new(&log_filter))
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    tracing::info!(
        version = VERSION,
        zone = config.deployment.zone.as_deref().unwrap_or("<unset>"),
        marker_file = %config.deployment.marker_file,
        "Loaded configuration"
    );
    if config.deployment.zone.is_none() {
        tracing::warn!("No deployment zone configured, banner will report the misconfiguration");
    }

    // Seed the availability flag from the zone marker file
    let state = AppState::initialize(config.clone());
    tracing::info!(
        available = state.availability.is_available(),
        started_at = %state.started_at,
        "Initialized server state"
    );

    // Create router and start server
    let app = create_router(state);
    start_server(app, &config).await?;

    Ok(())
}
