//! Core library for the weather widget.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - Weather, photo and location providers
//! - The favorites list and its durable storage
//! - The widget controller that owns all session state
//!
//! It is used by `weather-widget-cli`, but any host that can render a
//! [`WidgetView`] and paint a [`BackgroundSurface`] can drive it.

pub mod animation;
pub mod background;
pub mod config;
pub mod favorites;
pub mod location;
pub mod model;
pub mod provider;
pub mod storage;
pub mod units;
pub mod view;
pub mod widget;

pub use animation::Animation;
pub use background::{BackgroundStyle, BackgroundSurface};
pub use config::{Config, LocationConfig, ProviderConfig};
pub use favorites::Favorites;
pub use location::{Geolocator, LocationError, locator_from_config};
pub use model::{Coordinates, WeatherSnapshot};
pub use provider::{PhotoProvider, ProviderId, WeatherProvider};
pub use storage::{FileStore, KeyValueStore, MemoryStore};
pub use units::{TemperatureUnit, format_temperature};
pub use view::{WeatherPanel, WidgetView};
pub use widget::{FetchOutcome, WeatherWidget, WidgetState};
