//! Masjid Widgets - run the website widgets headlessly.
//!
//! `render` paints a page from cache, refreshes every widget the page
//! activates and prints the resulting document as JSON. `cache` lists the
//! stored widget responses.

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use masjid_widgets_core::{activations_for, App, CacheManager, Config, FileStore, Page, PageRoute};

/// Directory for the optional daily log file
const LOG_DIR_ENV: &str = "MASJID_WIDGETS_LOG_DIR";

#[derive(Parser)]
#[command(name = "masjid-widgets")]
#[command(about = "Render masjid website widgets from cached and live JSON endpoints")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Paint a page from cache, refresh its widgets and print it as JSON
    Render {
        /// Page URL; its path selects the widgets
        url: String,
        /// HTML file whose element ids make up the page
        #[arg(long)]
        markup: Option<PathBuf>,
        /// Paint cached data only, without requests
        #[arg(long, default_value_t = false)]
        offline: bool,
    },
    /// List stored widget responses
    Cache,
}

/// Initialize the tracing subscriber for logging.
///
/// The returned guard flushes the log file on drop; keep it alive for the
/// whole run.
fn init_tracing() -> Option<WorkerGuard> {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let (file_layer, guard) = match std::env::var(LOG_DIR_ENV) {
        Ok(dir) if !dir.is_empty() => {
            let appender = tracing_appender::rolling::daily(dir, "masjid-widgets.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            (
                Some(fmt::layer().with_writer(writer).with_ansi(false)),
                Some(guard),
            )
        }
        _ => (None, None),
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(file_layer)
        .with(filter)
        .init();

    guard
}

async fn render_page(url: String, markup: Option<PathBuf>, offline: bool) -> Result<()> {
    let config = Config::load()?;

    let page = match markup {
        Some(ref path) => {
            let markup = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read markup: {}", path.display()))?;
            Page::from_markup(&url, &markup)
        }
        None => Page::new(&url, std::iter::empty::<String>()),
    };
    let route = PageRoute::from_path(&page.path());
    info!(url = %url, ?route, "Rendering page");

    let mut app = App::from_config(config, page)?;
    app.set_offline(offline);
    app.start(&activations_for(route));
    app.run_until_settled().await;

    let json = serde_json::to_string_pretty(app.page())?;
    println!("{}", json);
    Ok(())
}

fn list_cache() -> Result<()> {
    let config = Config::load()?;
    let dir = config.cache_dir()?;
    let cache = CacheManager::new(std::sync::Arc::new(FileStore::new(dir.clone())?));

    println!("{}", dir.display());
    for key in cache.keys()? {
        println!("  {}", key);
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let _guard = init_tracing();

    match cli.command {
        Command::Render { url, markup, offline } => render_page(url, markup, offline).await,
        Command::Cache => list_cache(),
    }
}
