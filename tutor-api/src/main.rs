//! AI Guitar Tutor backend - Main entry point
//!
//! Serves the song/chord catalog, chord-diagram images, and the
//! placeholder audio-upload endpoint over HTTP.

use std::net::SocketAddr;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use tutor_api::{build_router, config::Args, AppState};
use tutor_common::Catalog;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tutor_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    info!(
        "Starting AI Guitar Tutor backend (tutor-api) v{}",
        env!("CARGO_PKG_VERSION")
    );
    info!("Data folder: {}", args.data_folder.display());
    info!("Uploads folder: {}", args.uploads_folder.display());

    let catalog = Catalog::load(&args.data_folder)
        .context("Failed to load song/chord catalog")?;
    info!("✓ Catalog loaded ({} songs)", catalog.song_count());

    std::fs::create_dir_all(&args.uploads_folder)
        .context("Failed to create uploads folder")?;

    let state = AppState::new(catalog, args.uploads_folder, args.chords_folder);
    let app = build_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], args.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;
    info!("tutor-api listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
