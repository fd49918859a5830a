//! Re-hosting of background images through the ImgBB API.
//!
//! The upload is a two-field form post: the API key & the source image
//! URL. ImgBB fetches the image server-side, so nothing is downloaded
//! here.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;

/// The upload endpoint.
const UPLOAD_URL: &str = "https://api.imgbb.com/1/upload";

/// Uploads take longer than page fetches, so this client gets its own,
/// more generous deadline.
const TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Deserialize)]
struct Response {
    success: bool,
    data: Option<Data>,
}

#[derive(Deserialize)]
struct Data {
    url: String,
}

/// An ImgBB uploader bound to one API key.
pub struct Uploader {
    client: Client,
    key: String,
}

impl Uploader {
    pub fn new(key: String) -> reqwest::Result<Self> {
        let client = Client::builder().timeout(TIMEOUT).build()?;
        Ok(Self { client, key })
    }

    async fn request(&self, image_url: &str) -> reqwest::Result<Response> {
        let form = [("key", self.key.as_str()), ("image", image_url)];

        self.client
            .post(UPLOAD_URL)
            .form(&form)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
    }

    /// Uploads an image by URL, returning the re-hosted URL.
    ///
    /// Any failure, whether transport or an unsuccessful API answer, is
    /// reported & swallowed: the cache just ends up without an image.
    pub async fn upload(&self, image_url: &str) -> Option<String> {
        match self.request(image_url).await {
            Ok(response) if response.success => response.data.map(|x| x.url),
            Ok(_) => {
                eprintln!("warning: imgbb rejected the upload of {image_url}");
                None
            }
            Err(error) => {
                eprintln!("warning: imgbb upload failed: {error}");
                None
            }
        }
    }
}
