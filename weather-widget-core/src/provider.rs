use crate::{
    Config,
    model::{Coordinates, WeatherSnapshot},
    provider::{openweather::OpenWeatherProvider, unsplash::UnsplashProvider},
};
use async_trait::async_trait;
use reqwest::StatusCode;
use std::{convert::TryFrom, fmt::Debug};

pub mod openweather;
pub mod unsplash;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderId {
    OpenWeather,
    Unsplash,
}

impl ProviderId {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderId::OpenWeather => "openweather",
            ProviderId::Unsplash => "unsplash",
        }
    }

    pub const fn all() -> &'static [ProviderId] {
        &[ProviderId::OpenWeather, ProviderId::Unsplash]
    }
}

impl std::fmt::Display for ProviderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ProviderId {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.to_lowercase();

        match lower.as_str() {
            "openweather" => Ok(ProviderId::OpenWeather),
            "unsplash" => Ok(ProviderId::Unsplash),
            _ => Err(anyhow::anyhow!(
                "Unknown provider '{value}'. Supported providers: openweather, unsplash."
            )),
        }
    }
}

/// Failure to obtain current weather.
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    /// The provider answered with a non-success status.
    #[error("weather provider returned {status}: {}", .message.as_deref().unwrap_or("no message"))]
    Provider {
        status: StatusCode,
        message: Option<String>,
    },
    #[error("weather request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("malformed weather response: {0}")]
    Malformed(String),
}

impl WeatherError {
    /// The provider's own explanation, when it sent a non-empty one.
    pub fn provider_message(&self) -> Option<&str> {
        match self {
            WeatherError::Provider { message: Some(m), .. } if !m.is_empty() => Some(m),
            _ => None,
        }
    }
}

/// Failure to obtain a background photo. Never shown to the user.
#[derive(Debug, thiserror::Error)]
pub enum PhotoError {
    #[error("photo provider returned {0}")]
    Status(StatusCode),
    #[error("photo request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("malformed photo response: {0}")]
    Malformed(#[from] serde_json::Error),
}

#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn current_by_coordinates(
        &self,
        coords: Coordinates,
    ) -> Result<WeatherSnapshot, WeatherError>;

    async fn current_by_city(&self, city: &str) -> Result<WeatherSnapshot, WeatherError>;
}

#[async_trait]
pub trait PhotoProvider: Send + Sync + Debug {
    /// URL of a full-size random photo matching `query`.
    async fn random_photo_url(&self, query: &str) -> Result<String, PhotoError>;
}

/// Construct the weather provider from config.
pub fn weather_provider_from_config(config: &Config) -> anyhow::Result<Box<dyn WeatherProvider>> {
    let id = ProviderId::OpenWeather;
    let api_key = config.provider_api_key(id).ok_or_else(|| {
        anyhow::anyhow!(
            "No API key configured for provider '{id}'.\n\
                 Hint: run `weather-widget configure {id}` and enter your API key."
        )
    })?;

    Ok(Box::new(OpenWeatherProvider::new(api_key.to_owned())))
}

/// Construct the photo provider from config. Backgrounds are optional, so a
/// missing key simply yields `None`.
pub fn photo_provider_from_config(config: &Config) -> Option<Box<dyn PhotoProvider>> {
    let api_key = config.provider_api_key(ProviderId::Unsplash)?;
    Some(Box::new(UnsplashProvider::new(api_key.to_owned())))
}

pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
