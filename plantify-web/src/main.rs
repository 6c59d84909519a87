//! plantify-web - South Indian medicinal herb classifier
//!
//! Serves the trait-based classifier UI and JSON API. The catalog is
//! embedded in the binary and the model is trained once at startup, so
//! the service has no external data dependencies beyond its writable
//! data folder for the contact book.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use plantify_core::{crossval, Resolver};
use plantify_web::{build_router, config, contacts::ContactStore, AppState};

/// Command-line arguments for plantify-web
#[derive(Parser, Debug)]
#[command(name = "plantify-web")]
#[command(about = "South Indian medicinal herb classifier web service")]
#[command(version)]
struct Args {
    /// Port to listen on
    #[arg(short, long, default_value = "5750", env = "PLANTIFY_PORT")]
    port: u16,

    /// Folder for mutable app data (contact book)
    #[arg(short, long, env = "PLANTIFY_DATA_FOLDER")]
    data_folder: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "plantify_web=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Log build identification immediately after tracing init
    info!(
        "Starting Plantify herb classifier (plantify-web) v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    // Parse command-line arguments
    let args = Args::parse();

    let data_folder = config::resolve_data_folder(args.data_folder.as_deref());
    config::ensure_data_folder(&data_folder).context("Failed to prepare data folder")?;
    info!("Data folder: {}", data_folder.display());

    // Build the classifier from the embedded catalog
    let resolver = Arc::new(
        Resolver::from_embedded().context("Failed to build classifier from embedded catalog")?,
    );
    info!(
        "✓ Classifier ready: {} rows, {} species, {} feature columns",
        resolver.catalog().entries().len(),
        resolver.class_count(),
        resolver.feature_width()
    );

    // Display-only headline number; never gates behavior
    let display_accuracy = crossval::display_accuracy(resolver.catalog())
        .context("Failed to compute display accuracy")?;
    info!("Cross-validated display accuracy: {display_accuracy:.1}% (non-diagnostic)");

    let contacts = Arc::new(ContactStore::new(&data_folder));
    let state = AppState::new(resolver, contacts, display_accuracy);
    let app = build_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], args.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;
    info!("plantify-web listening on http://{}", addr);
    info!("Health check: http://127.0.0.1:{}/health", args.port);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
