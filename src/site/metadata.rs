//! Title-level metadata: the genre/description box & background image.

use std::sync::LazyLock;

use scraper::{Html, Selector};
use serde::{Deserialize, Serialize};

use super::Site;

/// The box holding genres & the description.
static MEDIA_BOX: LazyLock<Selector> = LazyLock::new(|| Selector::parse("div.media-box").unwrap());

/// Genre links inside the media box.
static GENRES: LazyLock<Selector> = LazyLock::new(|| Selector::parse("div.genres a").unwrap());

/// The description paragraph inside the media box.
static CONTENT: LazyLock<Selector> = LazyLock::new(|| Selector::parse("div.content p").unwrap());

/// The background image anchor on the player card.
static IMAGE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div.anime-card.player a.image").unwrap());

/// A single genre entry. Wrapped in an object because that's the shape
/// the cache file has always had.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    pub text: String,
}

/// The title info as it ends up in the cache file.
///
/// The original cache contract stores failures inline as
/// `{"error": ...}` instead of omitting the field, so this is an
/// untagged either-or rather than a `Result`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Info {
    Details {
        genres: Vec<Genre>,
        content: Option<String>,
    },
    Failed {
        error: String,
    },
}

/// Parses the genre list & description out of a title page.
pub(crate) fn parse_info(document: &str) -> Info {
    let html = Html::parse_document(document);

    let Some(media_box) = html.select(&MEDIA_BOX).next() else {
        return Info::Failed {
            error: "media-box not found".to_owned(),
        };
    };

    let genres = media_box
        .select(&GENRES)
        .map(|x| Genre {
            text: x.text().collect::<String>().trim().to_owned(),
        })
        .collect();

    let content = media_box
        .select(&CONTENT)
        .next()
        .map(|x| x.text().collect::<String>().trim().to_owned());

    Info::Details { genres, content }
}

/// Finds the background image source on a title page.
pub(crate) fn image_source(document: &str) -> Option<String> {
    let html = Html::parse_document(document);

    html.select(&IMAGE)
        .next()
        .and_then(|x| x.attr("data-src"))
        .map(String::from)
}

/// Fetches a title's info, degrading any failure into an error record.
pub async fn info(site: &Site, base_url: &str) -> Info {
    match site.page(base_url).await {
        Ok(page) => parse_info(&page),
        Err(error) => Info::Failed {
            error: format!("request failed: {error}"),
        },
    }
}

/// Fetches a title's background image URL, if it has one.
pub async fn background_image(site: &Site, base_url: &str) -> Option<String> {
    match site.page(base_url).await {
        Ok(page) => image_source(&page),
        Err(error) => {
            eprintln!("warning: couldn't fetch background image for {base_url}: {error}");
            None
        }
    }
}
