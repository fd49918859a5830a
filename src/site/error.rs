pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("unable to fetch data: {0}")]
    Request(#[from] reqwest::Error),

    #[error("unsupported url: {0} (only web.animerco.org is supported)")]
    UnsupportedUrl(String),
}
