use crate::{cache, links, site};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("unable to load links: {0}")]
    Links(#[from] links::Error),

    #[error("site failure: {0}")]
    Site(#[from] site::Error),

    #[error("cache failure: {0}")]
    Cache(#[from] cache::Error),

    #[error("unable to fetch data: {0}")]
    Request(#[from] reqwest::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
