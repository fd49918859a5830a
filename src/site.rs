//! The client for the one site this tool knows how to scrape.
//!
//! Everything here is hardwired to `web.animerco.org`'s markup and its
//! `admin-ajax.php` contract, on purpose. Targeting another site would
//! mean rewriting these modules, not parameterizing them.

use std::{sync::LazyLock, time::Duration};

use regex::Regex;
use reqwest::{header, Client};
use url::Url;

pub mod episodes;
pub mod error;
pub mod metadata;

pub use error::{Error, Result};

/// The site's internal AJAX endpoint, used to exchange a post
/// identifier for an embed URL.
const ADMIN_URL: &str = "https://web.animerco.org/wp-admin/admin-ajax.php";

/// A desktop browser user agent, since the site doesn't take kindly
/// to obvious bots.
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/123.0.0.0 Safari/537.36";

/// Captures the title slug out of a season URL.
static SLUG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"https://web\.animerco\.org/seasons/([^/]+)/").unwrap());

/// Extracts the title slug from a base URL, or `unknown_anime` when the
/// URL doesn't look like a season page.
pub fn slug(base_url: &str) -> &str {
    SLUG.captures(base_url)
        .and_then(|x| x.get(1))
        .map_or("unknown_anime", |x| x.as_str())
}

/// Rejects URLs that don't belong to the site.
pub fn validate(url: &str) -> Result<()> {
    let accepted = Url::parse(url)
        .is_ok_and(|x| x.scheme() == "https" && x.host_str() == Some("web.animerco.org"));

    if accepted {
        Ok(())
    } else {
        Err(Error::UnsupportedUrl(url.to_owned()))
    }
}

/// The shared HTTP client for the site.
///
/// One client is reused for every request so connections get pooled,
/// with a fixed per-request deadline.
pub struct Site {
    client: Client,
}

impl Site {
    /// Creates the client with the browser user agent & timeout.
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;

        Ok(Self { client })
    }

    /// Fetches a page, treating non-success statuses as errors.
    pub async fn page(&self, url: &str) -> Result<String> {
        let response = self.client.get(url).send().await?.error_for_status()?;
        Ok(response.text().await?)
    }

    /// Posts a form to the AJAX endpoint the way the site's own player
    /// does: same-origin XHR with the episode page as referer.
    pub async fn ajax(&self, referer: &str, form: &[(&str, &str)]) -> Result<String> {
        let response = self
            .client
            .post(ADMIN_URL)
            .header(header::ACCEPT, "*/*")
            .header("x-requested-with", "XMLHttpRequest")
            .header(header::REFERER, referer)
            .form(form)
            .send()
            .await?
            .error_for_status()?;

        Ok(response.text().await?)
    }
}
