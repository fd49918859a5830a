//! The per-title cache, which stores everything scraped for a title
//! as a single JSON file that's refreshed at most once per day.

use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    sync::LazyLock,
    time::{Duration, SystemTime},
};

use regex::Regex;
use serde::{Deserialize, Serialize};
use tokio::fs;

use crate::site::{episodes::Episode, metadata::Info};

/// Matches every character that isn't safe to keep in a cache filename.
static UNSAFE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^\w\-]").unwrap());

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("couldn't write cache file: {0}")]
    Io(#[from] std::io::Error),

    #[error("couldn't serialize cache record: {0}")]
    Json(#[from] serde_json::Error),
}

/// The cached record for one title.
///
/// The field names are load-bearing, since the file is read by other
/// tools. In particular `imgUrl` keeps its camelCase spelling and the
/// episode map is keyed by the episode number as a string.
#[derive(Debug, Serialize, Deserialize)]
pub struct Record {
    pub success: bool,
    pub base_url: String,
    #[serde(rename = "imgUrl")]
    pub img_url: Option<String>,
    pub info: Info,
    pub episodes: HashMap<String, Episode>,
}

/// Replaces spaces with underscores and strips everything that isn't
/// alphanumeric, an underscore, or a hyphen.
pub fn sanitize(name: &str) -> String {
    let name = name.replace(' ', "_");
    UNSAFE.replace_all(&name, "").into_owned()
}

/// Manages the cache directory and its freshness policy.
pub struct Store {
    /// Where the per-title files live.
    dir: PathBuf,

    /// How old a file may be before it's considered stale.
    max_age: Duration,
}

impl Store {
    pub fn new(dir: PathBuf, max_age: Duration) -> Self {
        Self { dir, max_age }
    }

    /// The cache file path for a title slug.
    pub fn path(&self, slug: &str) -> PathBuf {
        self.dir.join(format!("{}.json", sanitize(slug)))
    }

    /// The age of a cache file, or [`None`] if it doesn't exist or its
    /// metadata can't be read. Unreadable metadata counts as stale.
    pub fn age(path: &Path) -> Option<Duration> {
        let modified = path.metadata().ok()?.modified().ok()?;
        SystemTime::now().duration_since(modified).ok()
    }

    /// Whether a cache file exists and is younger than the maximum age.
    pub fn fresh(&self, path: &Path) -> bool {
        Self::age(path).is_some_and(|age| age < self.max_age)
    }

    /// Overwrites a cache file wholesale with the pretty-printed record,
    /// creating the cache directory if needed.
    pub async fn write(&self, path: &Path, record: &Record) -> Result<()> {
        fs::create_dir_all(&self.dir).await?;

        let json = serde_json::to_string_pretty(record)?;
        fs::write(path, json).await?;

        Ok(())
    }
}
