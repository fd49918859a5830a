//! A tiny scraper that caches anime episode embed links.
pub mod error;
use std::{path::PathBuf, time::Duration};

use clap::{Parser, Subcommand};
mod tests;
pub use error::{Error, Result};

pub mod cache;
pub mod imgbb;
pub mod links;
pub mod scrape;
pub mod site;

/// A tiny scraper that caches anime episode embed links.
#[derive(Parser, Clone)]
#[command(about, version)]
pub struct Args {
    /// JSON file listing the titles to scrape.
    #[clap(long, short, default_value = "all_anime_links.json")]
    links: PathBuf,

    /// Directory for the per-title cache files.
    #[clap(long, short, default_value = "./cache")]
    cache_dir: PathBuf,

    /// Maximum number of episode requests in flight.
    #[clap(long, short, default_value_t = 10, value_parser = clap::value_parser!(u16).range(1..))]
    workers: u16,

    /// Timeout in seconds for page requests.
    #[clap(long, default_value_t = 10)]
    timeout: u64,

    /// Hours a cache file stays fresh.
    #[clap(long, default_value_t = 24)]
    max_age: u64,

    /// Seconds to wait between titles.
    #[clap(long, default_value_t = 1)]
    delay: u64,

    /// Re-scrape even when the cache is fresh.
    #[clap(long, short)]
    force: bool,

    /// ImgBB API key, falling back to $IMGBB_API_KEY. Without one,
    /// background images aren't re-hosted.
    #[clap(long)]
    imgbb_key: Option<String>,

    /// The command that was ran.
    /// This is [None] if no command was specified.
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Defines all of the extra commands anivault can run.
#[derive(Subcommand, Clone)]
enum Commands {
    /// Scrapes a single title URL instead of the links file.
    Fetch {
        /// The title's base URL.
        url: String,
    },
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    let args = Args::parse();

    let key = args
        .imgbb_key
        .clone()
        .or_else(|| std::env::var("IMGBB_API_KEY").ok());
    let uploader = match key {
        Some(key) => Some(imgbb::Uploader::new(key)?),
        None => {
            eprintln!("note: no imgbb api key set, background images won't be re-hosted");
            None
        }
    };

    let site = site::Site::new(Duration::from_secs(args.timeout))?;
    let store = cache::Store::new(
        args.cache_dir.clone(),
        Duration::from_secs(args.max_age * 3600),
    );
    let scraper = scrape::Scraper::new(site, store, uploader, args.workers.into(), args.force);

    if let Some(Commands::Fetch { url }) = &args.command {
        scraper.title(url).await?;
        return Ok(());
    }

    let links = links::Links::load(&args.links).await?;
    scraper.run(&links, Duration::from_secs(args.delay)).await;

    Ok(())
}
