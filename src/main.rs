use std::{sync::Arc, time::Duration};

use clap::Parser;
use color_eyre::{
    Result,
    eyre::{Context, eyre},
};
use scout::{
    adapters::{AppState, GamedigEngine, build_router},
    config::{ServerConfigValidator, load_config},
    core::QueryDispatcher,
    ports::query_engine::QueryEngine,
    tracing_setup,
    utils::graceful_shutdown::GracefulShutdown,
};

#[derive(Parser, Debug)]
#[clap(author, version, about)]
struct Args {
    #[clap(subcommand)]
    command: Option<Commands>,

    /// Optional configuration file; environment variables always apply
    #[clap(short, long)]
    config: Option<String>,
}

#[derive(Parser, Debug)]
enum Commands {
    /// Validate configuration and exit
    Validate {
        /// Configuration file to validate
        #[clap(short, long)]
        config: Option<String>,
    },
    /// Start the gateway server (default)
    Serve {
        /// Configuration file to use
        #[clap(short, long)]
        config: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let args = Args::parse();

    // Determine the command to run
    let (command, config_path) = match args.command {
        Some(Commands::Validate { config }) => ("validate", config.or(args.config)),
        Some(Commands::Serve { config }) => ("serve", config.or(args.config)),
        None => ("serve", args.config),
    };

    if command == "validate" {
        return validate_config_command(config_path.as_deref());
    }

    if std::env::var("LOG_FORMAT").as_deref() == Ok("console") {
        tracing_setup::init_console_tracing()
            .map_err(|e| eyre!("Failed to initialize tracing: {}", e))?;
    } else {
        tracing_setup::init_tracing().map_err(|e| eyre!("Failed to initialize tracing: {}", e))?;
    }

    let config = load_config(config_path.as_deref()).context("Failed to load configuration")?;
    ServerConfigValidator::validate(&config)
        .map_err(|e| eyre!("Invalid configuration: {}", e))?;

    let credentials = config.credentials().map(Arc::new);
    if credentials.is_some() {
        tracing::info!("Access control filter active; /health stays open for probes");
    } else if config.username.is_some() || config.password.is_some() {
        tracing::warn!(
            "Only one of username/password is configured; access control stays disabled"
        );
    }

    let engine: Arc<dyn QueryEngine> = Arc::new(GamedigEngine::new(Duration::from_secs(
        config.query_timeout_secs,
    )));
    let app = build_router(AppState::new(QueryDispatcher::new(engine)), credentials);

    // Create graceful shutdown manager
    let graceful_shutdown = Arc::new(GracefulShutdown::new());
    let signal_handler_shutdown = graceful_shutdown.clone();
    tokio::spawn(async move {
        if let Err(e) = signal_handler_shutdown.run_signal_handler().await {
            tracing::error!("Signal handler error: {}", e);
        }
    });

    let listen_addr = config.listen_addr();
    let listener = tokio::net::TcpListener::bind(&listen_addr)
        .await
        .with_context(|| format!("Failed to bind to {listen_addr}"))?;

    tracing::info!("Scout gateway listening on {listen_addr}");
    println!("Server is running on port {}", config.port);

    tokio::select! {
        result = axum::serve(listener, app) => {
            result.context("Server error")?;
        }
        reason = graceful_shutdown.wait_for_shutdown_signal() => {
            tracing::info!("Shutdown signal received: {:?}", reason);
        }
    }

    tracing::info!("Graceful shutdown completed");
    Ok(())
}

/// Validate configuration and exit
fn validate_config_command(config_path: Option<&str>) -> Result<()> {
    println!("🔍 Validating gateway configuration");

    // Try to resolve the configuration (environment plus optional file)
    let config = match load_config(config_path) {
        Ok(config) => {
            println!("✅ Configuration parsing: OK");
            config
        }
        Err(e) => {
            eprintln!("❌ Configuration parsing failed:");
            eprintln!("   {e}");
            std::process::exit(1);
        }
    };

    match ServerConfigValidator::validate(&config) {
        Ok(()) => {
            println!("✅ Configuration validation: OK");
            println!();
            println!("📋 Configuration Summary:");
            println!("   • Listen Address: {}", config.listen_addr());
            println!(
                "   • Access Control: {}",
                if config.credentials().is_some() {
                    "enabled"
                } else {
                    "disabled"
                }
            );
            println!("   • Engine Timeout: {}s", config.query_timeout_secs);
            println!();
            println!("🎉 Configuration is valid and ready to use!");
            Ok(())
        }
        Err(e) => {
            eprintln!("❌ Configuration validation failed:");
            eprintln!("{e}");
            println!();
            println!("💡 Common fixes:");
            println!("   • Verify the bind port is between 1 and 65535");
            println!("   • Set both USERNAME and PASSWORD to enable access control");
            println!("   • Ensure the engine timeout is at least 1 second");
            std::process::exit(1);
        }
    }
}
