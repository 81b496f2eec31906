use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::fmt::Debug;
use tracing::instrument;

use crate::{config::LocationConfig, model::Coordinates};

const IP_API_URL: &str = "http://ip-api.com/json";

#[derive(Debug, thiserror::Error)]
pub enum LocationError {
    /// No location capability exists on this host.
    #[error("geolocation is not supported")]
    Unsupported,
    #[error("location lookup failed: {0}")]
    Failed(String),
}

impl From<reqwest::Error> for LocationError {
    fn from(err: reqwest::Error) -> Self {
        LocationError::Failed(err.to_string())
    }
}

#[async_trait]
pub trait Geolocator: Send + Sync + Debug {
    async fn current_position(&self) -> Result<Coordinates, LocationError>;
}

/// Build the locator selected in the config.
pub fn locator_from_config(config: &LocationConfig) -> Box<dyn Geolocator> {
    match *config {
        LocationConfig::Ip => Box::new(IpApiLocator::new()),
        LocationConfig::Fixed { latitude, longitude } => {
            Box::new(FixedLocator(Coordinates::new(latitude, longitude)))
        }
        LocationConfig::Disabled => Box::new(UnsupportedLocator),
    }
}

/// Approximate position from the public IP address. Terminals have no
/// platform geolocation service.
#[derive(Debug, Clone)]
pub struct IpApiLocator {
    url: String,
    http: Client,
}

#[derive(Debug, Deserialize)]
struct IpApiResponse {
    status: String,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    lat: Option<f64>,
    #[serde(default)]
    lon: Option<f64>,
}

impl IpApiLocator {
    pub fn new() -> Self {
        Self::with_url(IP_API_URL)
    }

    pub fn with_url(url: &str) -> Self {
        Self { url: url.to_string(), http: Client::new() }
    }
}

impl Default for IpApiLocator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Geolocator for IpApiLocator {
    #[instrument(skip(self), level = "info")]
    async fn current_position(&self) -> Result<Coordinates, LocationError> {
        let res = self.http.get(&self.url).send().await?;

        let status = res.status();
        if !status.is_success() {
            return Err(LocationError::Failed(format!("lookup returned {status}")));
        }

        let body: IpApiResponse = res.json().await?;

        match (body.status.as_str(), body.lat, body.lon) {
            ("success", Some(lat), Some(lon)) => {
                tracing::info!(lat, lon, "geolocation resolved");
                Ok(Coordinates::new(lat, lon))
            }
            _ => Err(LocationError::Failed(
                body.message.unwrap_or_else(|| "no coordinates in response".to_string()),
            )),
        }
    }
}

/// Always answers with the configured coordinates.
#[derive(Debug, Clone, Copy)]
pub struct FixedLocator(pub Coordinates);

#[async_trait]
impl Geolocator for FixedLocator {
    async fn current_position(&self) -> Result<Coordinates, LocationError> {
        Ok(self.0)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct UnsupportedLocator;

#[async_trait]
impl Geolocator for UnsupportedLocator {
    async fn current_position(&self) -> Result<Coordinates, LocationError> {
        Err(LocationError::Unsupported)
    }
}
