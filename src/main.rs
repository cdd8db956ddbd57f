//! Route registry CLI.
//!
//! Loads a route table, then inspects it or resolves navigations against it.
//!
//! # Architecture Overview
//!
//! ```text
//!     routes.toml
//!         │
//!         ▼
//!   ┌───────────┐    ┌──────────────┐
//!   │  config   │───▶│   routing    │  descriptor table
//!   └───────────┘    └──────┬───────┘
//!                           │
//!     navigate <target>     ▼
//!   ────────────────▶ ┌──────────────┐    ┌──────────────┐
//!                     │  navigation  │───▶│   security   │  guard
//!                     │    router    │    └──────────────┘
//!                     │              │    ┌──────────────┐
//!                     │              │───▶│    title     │
//!                     │              │    └──────────────┘
//!                     │              │    ┌──────────────┐
//!                     │              │───▶│     view     │  lazy loader + cache
//!                     └──────┬───────┘    └──────────────┘
//!                            ▼
//!                     outcome (JSON)
//! ```

use clap::{Parser, Subcommand};
use serde_json::{json, Value};
use std::path::PathBuf;
use std::sync::Arc;

use route_registry::config::load_config;
use route_registry::lifecycle::build_fs_router;
use route_registry::navigation::{NavigationError, NavigationOutcome, NavigationRequest};
use route_registry::observability::{logging, metrics};
use route_registry::security::SessionAuth;

#[derive(Parser)]
#[command(name = "route-registry")]
#[command(about = "Inspect a route table and resolve navigations against it", long_about = None)]
struct Cli {
    /// Route table configuration file.
    #[arg(short, long, default_value = "routes.toml")]
    config: PathBuf,

    /// Override the configured log level.
    #[arg(long)]
    log_level: Option<String>,

    /// Print Prometheus metrics after the command.
    #[arg(long)]
    metrics: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate the configuration
    Check,
    /// Print the registered routes
    Routes,
    /// Resolve navigations in order
    Navigate {
        /// Navigate with an authenticated session
        #[arg(long)]
        authenticated: bool,

        /// Use replace instead of push semantics
        #[arg(long)]
        replace: bool,

        /// Target paths (e.g. /home or /settings?tab=profile)
        #[arg(required = true)]
        targets: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Logging needs the configured level; a load error is reported once logging is up.
    let loaded = load_config(&cli.config);
    let log_level = cli
        .log_level
        .clone()
        .or_else(|| loaded.as_ref().ok().map(|c| c.observability.log_level.clone()))
        .unwrap_or_else(|| "info".to_string());
    logging::init(&log_level);

    tracing::info!(config = %cli.config.display(), "route-registry v0.1.0 starting");

    let config = loaded.inspect_err(|e| tracing::error!(error = %e, "Failed to load configuration"))?;

    let metrics_enabled = cli.metrics || config.observability.metrics_enabled;
    let metrics_handle = if metrics_enabled {
        metrics::init_metrics()
    } else {
        None
    };

    let authenticated = matches!(cli.command, Commands::Navigate { authenticated: true, .. });
    let auth = Arc::new(SessionAuth::new(authenticated));
    let router = build_fs_router(&cli.config, &config, auth)?;

    match cli.command {
        Commands::Check => {
            println!(
                "{}",
                serde_json::to_string_pretty(&json!({
                    "config": cli.config.display().to_string(),
                    "routes": router.table().len(),
                    "login_path": config.guard.login_path,
                    "valid": true,
                }))?
            );
        }
        Commands::Routes => {
            let routes: Vec<_> = router.table().iter().collect();
            println!("{}", serde_json::to_string_pretty(&routes)?);
        }
        Commands::Navigate { replace, targets, .. } => {
            for target in targets {
                let request = if replace {
                    NavigationRequest::replace(target.clone())
                } else {
                    NavigationRequest::push(target.clone())
                };
                let report = report(&target, router.navigate(request).await);
                println!("{}", serde_json::to_string_pretty(&report)?);
            }
            if let Some(current) = router.current() {
                tracing::info!(path = %current.path, title = %current.title, "Current route");
                println!("{}", serde_json::to_string_pretty(&json!({ "current": current }))?);
            }
        }
    }

    if let Some(handle) = metrics_handle {
        print!("{}", handle.render());
    }

    Ok(())
}

fn report(target: &str, result: Result<NavigationOutcome, NavigationError>) -> Value {
    match result {
        Ok(NavigationOutcome::Allowed { title, view }) => json!({
            "target": target,
            "outcome": "allowed",
            "title": title,
            "view": view.view,
            "bytes": view.body.len(),
        }),
        Ok(NavigationOutcome::Redirected { target: redirect, return_to }) => json!({
            "target": target,
            "outcome": "redirected",
            "redirect": redirect,
            "return_to": return_to,
        }),
        Ok(NavigationOutcome::Denied { reason }) => json!({
            "target": target,
            "outcome": "denied",
            "reason": reason,
        }),
        Err(e) => json!({
            "target": target,
            "outcome": e.phase().as_str(),
            "error": e.to_string(),
        }),
    }
}
