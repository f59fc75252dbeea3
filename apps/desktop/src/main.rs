use std::{path::PathBuf, process::ExitCode, sync::Arc};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use client_core::{
    load_settings, load_settings_from, present, HttpBackend, RebuildController,
    SearchController,
};
use tokio::runtime::Handle;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "news-search", about = "Query the news search service")]
struct Args {
    /// Base URL of the search service, e.g. http://localhost:5000
    #[arg(long)]
    server_url: Option<String>,
    /// Settings file; defaults to ./news_search.toml when present.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Per-request timeout in seconds; 0 disables it.
    #[arg(long)]
    timeout_secs: Option<u64>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Submit a free-text query and print the ranked results.
    Search { query: String },
    /// Ask the service to rebuild its index pipeline.
    Rebuild,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let mut settings = match &args.config {
        Some(path) => load_settings_from(path)
            .with_context(|| format!("failed to load settings from {}", path.display()))?,
        None => load_settings(),
    };
    if let Some(url) = args.server_url {
        settings.server_url = url;
    }
    if let Some(secs) = args.timeout_secs {
        settings.request_timeout_secs = secs;
    }

    let backend = Arc::new(HttpBackend::new(&settings).context("invalid client settings")?);
    tracing::debug!(base_url = %backend.base_url(), "backend configured");

    let mut search = SearchController::new(backend.clone(), Handle::current());
    let rebuild = RebuildController::new(backend, Handle::current());

    let failed = match args.command {
        Command::Search { query } => {
            search.set_query(query);
            search.submit().await.context("search task panicked")?;
            println!("{}", present(&search, &rebuild).render_text());
            search.last_error().is_some()
        }
        Command::Rebuild => {
            rebuild.trigger().await.context("rebuild task panicked")?;
            let view = present(&search, &rebuild);
            if let Some(notice) = view.rebuild.notice {
                println!("{}", notice.text);
            }
            rebuild.last_error().is_some()
        }
    };

    Ok(if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}
