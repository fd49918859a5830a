//! Loading of the links file, which lists the titles to scrape.

use std::path::Path;

use serde::Deserialize;
use tokio::fs;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("couldn't read links file: {0}")]
    Io(#[from] std::io::Error),

    #[error("links file isn't valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("links file has no anime links")]
    Empty,
}

/// The expected shape of the links file.
#[derive(Deserialize)]
struct File {
    #[serde(default)]
    anime_links: Vec<String>,
}

/// The list of title URLs to scrape, in file order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Links {
    pub entries: Vec<String>,
}

impl Links {
    /// Parses the raw contents of a links file.
    ///
    /// Entries are trimmed, and blank ones dropped. An empty list
    /// is an error since there'd be nothing to do.
    pub fn parse(raw: &str) -> Result<Self> {
        let file: File = serde_json::from_str(raw)?;

        let entries: Vec<String> = file
            .anime_links
            .iter()
            .map(|x| x.trim().to_owned())
            .filter(|x| !x.is_empty())
            .collect();

        if entries.is_empty() {
            return Err(Error::Empty);
        }

        Ok(Self { entries })
    }

    /// Reads a [`Links`] from the filesystem.
    pub async fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).await?;
        Self::parse(&raw)
    }
}
