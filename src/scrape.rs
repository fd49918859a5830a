//! Per-title orchestration: the cache check, the three concurrent
//! fetches, and the final cache write.

use std::time::{Duration, Instant};

use crate::{cache, imgbb, links::Links, site, site::Site};

/// Ties the site client, the cache store & the uploader together.
pub struct Scraper {
    site: Site,
    store: cache::Store,
    uploader: Option<imgbb::Uploader>,
    workers: usize,
    force: bool,
}

impl Scraper {
    pub fn new(
        site: Site,
        store: cache::Store,
        uploader: Option<imgbb::Uploader>,
        workers: usize,
        force: bool,
    ) -> Self {
        Self {
            site,
            store,
            uploader,
            workers,
            force,
        }
    }

    /// Finds the background image & re-hosts it, when a key is set.
    ///
    /// Without an uploader the image couldn't go anywhere, so the page
    /// isn't even fetched.
    async fn image(&self, base_url: &str) -> Option<String> {
        let uploader = self.uploader.as_ref()?;

        let source = site::metadata::background_image(&self.site, base_url).await?;
        uploader.upload(&source).await
    }

    /// Scrapes one title & overwrites its cache file.
    ///
    /// Skips the network entirely if the cache file is younger than the
    /// maximum age. Image & info failures degrade to `null`/error
    /// records; only an unreachable listing fails the title.
    pub async fn title(&self, base_url: &str) -> crate::Result<()> {
        site::validate(base_url)?;

        let path = self.store.path(site::slug(base_url));
        if !self.force && self.store.fresh(&path) {
            let age = cache::Store::age(&path).unwrap_or_default();
            println!(
                "using cached data from {} (age: {:.1} hours)",
                path.display(),
                age.as_secs_f64() / 3600.0
            );
            return Ok(());
        }

        println!("scraping {base_url}");
        let start = Instant::now();

        // The three fetches are independent, so they run concurrently.
        let (episodes, img_url, info) = tokio::join!(
            site::episodes::scrape(&self.site, base_url, self.workers),
            self.image(base_url),
            site::metadata::info(&self.site, base_url),
        );

        let record = cache::Record {
            success: true,
            base_url: base_url.to_owned(),
            img_url,
            info,
            episodes: episodes?,
        };

        self.store.write(&path, &record).await?;

        println!(
            "saved {} in {:.2}s",
            path.display(),
            start.elapsed().as_secs_f64()
        );
        Ok(())
    }

    /// Scrapes every title in the links file, in order, pausing between
    /// titles to stay on the site's good side. A failed title is
    /// reported & skipped.
    pub async fn run(&self, links: &Links, delay: Duration) {
        for url in &links.entries {
            if let Err(error) = self.title(url).await {
                eprintln!("error: couldn't scrape {url}: {error}");
            }

            tokio::time::sleep(delay).await;
        }
    }
}
