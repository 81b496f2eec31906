use anyhow::Result;
use tracing::{debug, info, warn};

use crate::{
    animation::Animation,
    background::{BackgroundStyle, BackgroundSurface, NoBackground},
    favorites::Favorites,
    location::{Geolocator, LocationError, UnsupportedLocator},
    model::{Coordinates, WeatherSnapshot},
    provider::{PhotoProvider, WeatherError, WeatherProvider},
    units::{TemperatureUnit, format_temperature},
    view::{self, WeatherPanel, WidgetView},
};

pub const FETCH_FAILED: &str = "Failed to fetch weather data";
pub const CITY_NOT_FOUND: &str = "City not found";
pub const GEOLOCATION_UNSUPPORTED: &str = "Geolocation is not supported by your browser";
pub const LOCATION_FAILED: &str = "Unable to retrieve your location";

/// Session state. Nothing here outlives the widget except favorites, which
/// live in [`Favorites`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WidgetState {
    pub weather: Option<WeatherSnapshot>,
    /// City label used by "add to favorites".
    pub city: String,
    pub error: Option<String>,
    pub unit: TemperatureUnit,
    pub background: Option<String>,
    pub dark_mode: bool,
    pub animation: Option<Animation>,
}

/// Result of a weather fetch, ready to be applied.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    Success(WeatherSnapshot),
    Failure(String),
}

/// Fetches take `&self` and return an outcome without touching state; outcomes
/// are applied with `&mut self` in completion order, so the last one wins.
#[derive(Debug)]
pub struct WeatherWidget {
    weather: Box<dyn WeatherProvider>,
    photos: Option<Box<dyn PhotoProvider>>,
    locator: Box<dyn Geolocator>,
    surface: Box<dyn BackgroundSurface>,
    favorites: Favorites,
    state: WidgetState,
}

impl WeatherWidget {
    /// A widget with no backgrounds and no location capability.
    pub fn new(weather: Box<dyn WeatherProvider>, favorites: Favorites) -> Self {
        Self {
            weather,
            photos: None,
            locator: Box::new(UnsupportedLocator),
            surface: Box::new(NoBackground),
            favorites,
            state: WidgetState::default(),
        }
    }

    pub fn with_photos(mut self, photos: Option<Box<dyn PhotoProvider>>) -> Self {
        self.photos = photos;
        self
    }

    pub fn with_locator(mut self, locator: Box<dyn Geolocator>) -> Self {
        self.locator = locator;
        self
    }

    pub fn with_surface(mut self, surface: Box<dyn BackgroundSurface>) -> Self {
        self.surface = surface;
        self
    }

    pub fn state(&self) -> &WidgetState {
        &self.state
    }

    pub fn favorites(&self) -> &[String] {
        self.favorites.cities()
    }

    /// Startup: locate the user and show their weather.
    pub async fn start(&mut self) {
        info!(favorites = self.favorites.cities().len(), "widget starting");
        self.resolve_location().await;
    }

    /// "Use my location".
    pub async fn resolve_location(&mut self) {
        match self.locator.current_position().await {
            Ok(coords) => {
                let outcome = self.fetch_by_coordinates(coords).await;
                self.complete_fetch(outcome).await;
            }
            Err(LocationError::Unsupported) => {
                warn!("no geolocation capability");
                self.state.error = Some(GEOLOCATION_UNSUPPORTED.to_string());
            }
            Err(e) => {
                warn!(error = %e, "error getting location");
                self.state.error = Some(LOCATION_FAILED.to_string());
            }
        }
    }

    /// Search form submission.
    pub async fn search(&mut self, city: &str) {
        let outcome = self.fetch_by_city(city).await;
        self.complete_fetch(outcome).await;
    }

    pub async fn fetch_by_coordinates(&self, coords: Coordinates) -> FetchOutcome {
        info!(lat = coords.latitude, lon = coords.longitude, "fetching weather by coordinates");
        let result = self.weather.current_by_coordinates(coords).await;
        outcome_from(result, FETCH_FAILED)
    }

    pub async fn fetch_by_city(&self, city: &str) -> FetchOutcome {
        info!(city, "fetching weather by city");
        let result = self.weather.current_by_city(city).await;
        outcome_from(result, CITY_NOT_FOUND)
    }

    /// Apply a fetch outcome. On success returns the description to look up a
    /// background for.
    pub fn apply_weather(&mut self, outcome: FetchOutcome) -> Option<String> {
        match outcome {
            FetchOutcome::Success(snapshot) => {
                self.state.error = None;
                self.state.city = snapshot.city_name.clone();
                self.state.animation = Animation::for_condition(&snapshot.condition_main);
                let query = snapshot.condition_description.clone();
                self.state.weather = Some(snapshot);
                Some(query)
            }
            FetchOutcome::Failure(message) => {
                self.state.error = Some(message);
                self.state.weather = None;
                None
            }
        }
    }

    async fn complete_fetch(&mut self, outcome: FetchOutcome) {
        if let Some(query) = self.apply_weather(outcome) {
            if let Some(url) = self.fetch_background(&query).await {
                self.apply_background(url);
            }
        }
    }

    /// Look up a photo for `query`. Failures are logged and yield `None`.
    pub async fn fetch_background(&self, query: &str) -> Option<String> {
        let Some(photos) = &self.photos else {
            debug!("no photo provider configured; skipping background");
            return None;
        };

        match photos.random_photo_url(query).await {
            Ok(url) => Some(url),
            Err(e) => {
                warn!(error = %e, query, "failed to fetch background image");
                None
            }
        }
    }

    /// Record a new background URL and paint it when it differs from the
    /// current one.
    pub fn apply_background(&mut self, url: String) {
        if url.is_empty() || self.state.background.as_deref() == Some(url.as_str()) {
            return;
        }

        self.surface.apply(&BackgroundStyle::cover(url.as_str()));
        self.state.background = Some(url);
    }

    pub fn set_unit(&mut self, unit: TemperatureUnit) {
        self.state.unit = unit;
    }

    /// Flip dark mode, returning the new value.
    pub fn toggle_dark_mode(&mut self) -> bool {
        self.state.dark_mode = !self.state.dark_mode;
        self.state.dark_mode
    }

    /// Add the current city. Returns whether the list changed.
    pub fn add_to_favorites(&mut self) -> Result<bool> {
        let added = self.favorites.add(&self.state.city)?;
        if added {
            info!(city = %self.state.city, "added favorite");
        }
        Ok(added)
    }

    pub fn remove_favorite(&mut self, city: &str) -> Result<()> {
        self.favorites.remove(city)?;
        info!(city, "removed favorite");
        Ok(())
    }

    /// Make `city` the current label. Weather is not refetched.
    pub fn select_favorite(&mut self, city: &str) {
        self.state.city = city.to_string();
    }

    pub fn view(&self) -> WidgetView {
        let state = &self.state;

        let weather = state.weather.as_ref().map(|w| WeatherPanel {
            heading: format!("Weather in {}", w.city_name),
            temperature: format_temperature(w.temperature_c, state.unit),
            description: w.condition_description.clone(),
            humidity: format!("{}%", w.humidity_pct),
            wind: format!("{} m/s", w.wind_speed_mps),
            observed_at: w.observed_at.map(|t| t.format("%H:%M UTC").to_string()),
            animation: state.animation,
            unit: state.unit,
        });

        WidgetView {
            title: view::TITLE,
            dark_mode: state.dark_mode,
            theme_toggle: view::theme_toggle_label(state.dark_mode),
            error: state.error.clone(),
            weather,
            current_city: state.city.clone(),
            favorites: self.favorites.cities().to_vec(),
        }
    }
}

fn outcome_from(result: Result<WeatherSnapshot, WeatherError>, fallback: &str) -> FetchOutcome {
    match result {
        Ok(snapshot) => {
            info!(city = %snapshot.city_name, condition = %snapshot.condition_main, "weather fetched");
            FetchOutcome::Success(snapshot)
        }
        Err(e) => {
            warn!(error = %e, "weather fetch failed");
            let message = match &e {
                WeatherError::Provider { .. } => e.provider_message().unwrap_or(fallback),
                WeatherError::Transport(_) | WeatherError::Malformed(_) => FETCH_FAILED,
            };
            FetchOutcome::Failure(message.to_string())
        }
    }
}
