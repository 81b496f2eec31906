use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::instrument;

use super::{PhotoError, PhotoProvider};

const UNSPLASH_BASE: &str = "https://api.unsplash.com";

#[derive(Debug, Clone)]
pub struct UnsplashProvider {
    access_key: String,
    base_url: String,
    http: Client,
}

impl UnsplashProvider {
    pub fn new(access_key: String) -> Self {
        Self::with_base_url(access_key, UNSPLASH_BASE)
    }

    pub fn with_base_url(access_key: String, base_url: &str) -> Self {
        Self {
            access_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct UsUrls {
    full: String,
}

#[derive(Debug, Deserialize)]
struct UsRandomPhoto {
    urls: UsUrls,
}

#[async_trait]
impl PhotoProvider for UnsplashProvider {
    #[instrument(skip(self), level = "info")]
    async fn random_photo_url(&self, query: &str) -> Result<String, PhotoError> {
        let url = format!("{}/photos/random", self.base_url);

        let res = self
            .http
            .get(&url)
            .query(&[("query", query), ("client_id", self.access_key.as_str())])
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            return Err(PhotoError::Status(status));
        }

        let body = res.text().await?;
        let parsed: UsRandomPhoto = serde_json::from_str(&body)?;

        Ok(parsed.urls.full)
    }
}
