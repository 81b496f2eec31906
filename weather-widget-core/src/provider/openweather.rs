use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use tracing::instrument;

use crate::model::{Coordinates, WeatherSnapshot};

use super::{WeatherError, WeatherProvider, truncate_body};

const OPENWEATHER_BASE: &str = "https://api.openweathermap.org";

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, OPENWEATHER_BASE)
    }

    /// Point the provider at another host, e.g. a mock server.
    pub fn with_base_url(api_key: String, base_url: &str) -> Self {
        Self {
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    async fn fetch_current(&self, key: &[(&str, String)]) -> Result<WeatherSnapshot, WeatherError> {
        let url = format!("{}/data/2.5/weather", self.base_url);

        let mut query: Vec<(&str, String)> = key.to_vec();
        query.push(("appid", self.api_key.clone()));
        query.push(("units", "metric".to_string()));

        let res = self.http.get(&url).query(&query).send().await?;

        let status = res.status();
        let body = res.text().await?;

        tracing::debug!(%status, bytes = body.len(), "OpenWeather current response");

        if !status.is_success() {
            let parsed: OwErrorResponse = serde_json::from_str(&body).map_err(|e| {
                WeatherError::Malformed(format!("{e}; body: {}", truncate_body(&body)))
            })?;

            return Err(WeatherError::Provider { status, message: parsed.message });
        }

        let parsed: OwCurrentResponse = serde_json::from_str(&body)
            .map_err(|e| WeatherError::Malformed(format!("{e}; body: {}", truncate_body(&body))))?;

        parsed.into_snapshot()
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    main: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    #[serde(default)]
    dt: Option<i64>,
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
}

#[derive(Debug, Deserialize)]
struct OwErrorResponse {
    #[serde(default)]
    message: Option<String>,
}

impl OwCurrentResponse {
    fn into_snapshot(self) -> Result<WeatherSnapshot, WeatherError> {
        let primary = self
            .weather
            .into_iter()
            .next()
            .ok_or_else(|| WeatherError::Malformed("response contained no weather conditions".into()))?;

        Ok(WeatherSnapshot {
            city_name: self.name,
            temperature_c: self.main.temp,
            condition_main: primary.main,
            condition_description: primary.description,
            humidity_pct: self.main.humidity,
            wind_speed_mps: self.wind.speed,
            observed_at: self.dt.and_then(unix_to_utc),
        })
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    #[instrument(skip(self), level = "info")]
    async fn current_by_coordinates(
        &self,
        coords: Coordinates,
    ) -> Result<WeatherSnapshot, WeatherError> {
        self.fetch_current(&[
            ("lat", coords.latitude.to_string()),
            ("lon", coords.longitude.to_string()),
        ])
        .await
    }

    #[instrument(skip(self), level = "info")]
    async fn current_by_city(&self, city: &str) -> Result<WeatherSnapshot, WeatherError> {
        self.fetch_current(&[("q", city.to_string())]).await
    }
}

fn unix_to_utc(ts: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(ts, 0)
}
