//! Episode listing & embed resolution, the bulk of the scraper.
//!
//! Getting one episode's embed link takes two round trips: the episode
//! page itself, which hides the site-internal post identifier in a
//! hidden form input, and the `admin-ajax.php` endpoint, which trades
//! that identifier for the actual player embed. This is fanned out
//! across every episode of a title with a worker cap.

use std::{
    collections::{HashMap, HashSet},
    sync::LazyLock,
};

use futures_util::{stream, StreamExt};
use indicatif::ProgressBar;
use regex::Regex;
use scraper::{Html, Selector};
use serde::{Deserialize, Serialize};

use super::Site;

/// Every episode link in a title's listing.
static LINKS: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".episodes-lists a[href]").unwrap());

/// The hidden input carrying the post identifier on an episode page.
static POSTID: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(r#"input[type="hidden"][name="postid"]"#).unwrap());

/// The episode number inside an episode URL.
static NUMBER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"-(\d+)(?:-|$)").unwrap());

/// One fully resolved episode, as it ends up in the cache file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Episode {
    /// The episode number, either parsed from the URL or falling back
    /// to the position in the listing.
    pub episode: u32,

    /// The episode's own page on the site.
    pub page_url: String,

    /// The third-party player link the AJAX endpoint resolved.
    pub embed_url: String,

    /// The embed's type as reported by the endpoint, usually `tv`.
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

/// What the AJAX endpoint answers with.
#[derive(Deserialize)]
struct Embed {
    embed_url: Option<String>,
    #[serde(rename = "type")]
    kind: Option<String>,
}

/// Pulls the unique episode links out of a title page, preserving the
/// order they first appear in.
pub(crate) fn listing(document: &str) -> Vec<String> {
    let html = Html::parse_document(document);

    let mut seen = HashSet::new();
    html.select(&LINKS)
        .filter_map(|x| x.attr("href"))
        .filter(|x| seen.insert(*x))
        .map(String::from)
        .collect()
}

/// Extracts the hidden post identifier from an episode page.
pub(crate) fn postid(document: &str) -> Option<String> {
    let html = Html::parse_document(document);

    html.select(&POSTID)
        .next()
        .and_then(|x| x.attr("value"))
        .map(String::from)
}

/// Extracts the episode number from an episode URL.
///
/// Zero doesn't count as a number here; it falls through to the
/// listing-index fallback like any other miss.
pub(crate) fn number(url: &str) -> Option<u32> {
    NUMBER
        .captures(url)
        .and_then(|x| x.get(1))
        .and_then(|x| x.as_str().parse().ok())
        .filter(|&x| x != 0)
}

/// Parses the AJAX endpoint's answer into the embed link & its type.
///
/// Invalid JSON and a null/absent `embed_url` both come back as
/// [`None`], since either way there's nothing to cache.
pub(crate) fn embed(body: &str) -> Option<(String, Option<String>)> {
    let embed: Embed = serde_json::from_str(body).ok()?;
    Some((embed.embed_url?, embed.kind))
}

/// Resolves a single episode link into an [`Episode`].
///
/// Every failure here (unreachable page, missing postid, bad AJAX
/// response) is reported & skipped, never propagated, so one broken
/// episode can't take the whole title down.
async fn resolve(site: &Site, url: &str, fallback: u32, bar: &ProgressBar) -> Option<Episode> {
    let episode = number(url).unwrap_or(fallback);

    let page = match site.page(url).await {
        Ok(x) => x,
        Err(error) => {
            bar.println(format!("warning: couldn't fetch {url}: {error}"));
            return None;
        }
    };

    let Some(postid) = postid(&page) else {
        bar.println(format!("warning: no postid on {url}"));
        return None;
    };

    let form = [
        ("action", "player_ajax"),
        ("post", postid.as_str()),
        ("nume", "1"),
        ("type", "tv"),
    ];

    let body = match site.ajax(url, &form).await {
        Ok(x) => x,
        Err(error) => {
            bar.println(format!("warning: embed request failed for {url}: {error}"));
            return None;
        }
    };

    let Some((embed_url, kind)) = embed(&body) else {
        bar.println(format!("warning: no embed in the response for episode {episode}"));
        return None;
    };

    bar.println(format!("episode {episode}: {embed_url}"));

    Some(Episode {
        episode,
        page_url: url.to_owned(),
        embed_url,
        kind,
    })
}

/// Fetches a title's listing and resolves every episode on it, with at
/// most `workers` requests in flight.
///
/// Only the listing page itself is fatal; everything past that is
/// skip-and-log. The returned map is keyed by the episode number as a
/// string, and a duplicate number simply overwrites (the listing has
/// already been deduplicated by URL, so that only happens when the site
/// reuses a number across links).
pub async fn scrape(
    site: &Site,
    base_url: &str,
    workers: usize,
) -> super::Result<HashMap<String, Episode>> {
    let page = site.page(base_url).await?;
    let links = listing(&page);

    println!("found {} unique episode links for {base_url}", links.len());

    let bar = ProgressBar::new(links.len() as u64);
    let resolved: Vec<Episode> = stream::iter(links.iter().zip(1u32..))
        .map(|(link, fallback)| {
            let bar = &bar;
            async move {
                let episode = resolve(site, link, fallback, bar).await;
                bar.inc(1);
                episode
            }
        })
        .buffer_unordered(workers.max(1))
        .filter_map(|x| async move { x })
        .collect()
        .await;
    bar.finish_and_clear();

    Ok(resolved
        .into_iter()
        .map(|x| (x.episode.to_string(), x))
        .collect())
}
