use std::sync::Arc;

mod backend_bridge;
mod ui;

use anyhow::{anyhow, Context};
use backend_bridge::BackendRuntime;
use clap::Parser;
use client_core::{load_settings, HttpBackend};
use eframe::egui;
use tracing_subscriber::EnvFilter;
use ui::NewsSearchApp;

#[derive(Parser, Debug)]
#[command(name = "news-search-gui", about = "Desktop window for the news search service")]
struct Args {
    /// Overrides the configured search service URL.
    #[arg(long)]
    server_url: Option<String>,
    /// Prefills the search box.
    #[arg(long)]
    query: Option<String>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    let args = Args::parse();

    let mut settings = load_settings();
    if let Some(url) = args.server_url {
        settings.server_url = url;
    }
    let backend = Arc::new(HttpBackend::new(&settings).context("invalid client settings")?);
    tracing::info!(base_url = %backend.base_url(), "using search service");

    let runtime = BackendRuntime::launch()?;
    let initial_query = args.query.unwrap_or_default();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("News Search")
            .with_inner_size([760.0, 820.0])
            .with_min_inner_size([480.0, 420.0]),
        ..Default::default()
    };
    eframe::run_native(
        "News Search",
        options,
        Box::new(move |cc| {
            Ok(Box::new(NewsSearchApp::new(
                cc,
                runtime,
                backend,
                initial_query,
            )))
        }),
    )
    .map_err(|err| anyhow!("news search window failed: {err}"))
}
