use std::fmt;

use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::{Password, Select, Text};
use weather_widget_core::{
    Config, Favorites, FileStore, ProviderId, TemperatureUnit, WeatherWidget, locator_from_config,
    provider::{photo_provider_from_config, weather_provider_from_config},
};

use crate::render::{self, TerminalBackground};

/// Animation loops played after each render.
const ANIMATION_CYCLES: usize = 2;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather-widget", version, about = "Current weather in your terminal")]
pub struct Cli {
    /// Defaults to `interactive`.
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Configure credentials for a provider.
    Configure {
        /// Provider short name: "openweather" or "unsplash".
        provider: String,
    },

    /// Show the weather once and exit.
    Show {
        /// Search this city instead of using your location.
        #[arg(long)]
        city: Option<String>,

        /// Temperature unit: C, F or K.
        #[arg(long, default_value = "C")]
        unit: String,
    },

    /// Run the widget as a menu-driven session.
    Interactive,

    /// Manage saved favorite cities.
    Favorites {
        #[command(subcommand)]
        action: FavoritesAction,
    },
}

#[derive(Debug, Subcommand)]
pub enum FavoritesAction {
    /// Print the saved cities.
    List,
    /// Forget a city.
    Remove { city: String },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command.unwrap_or(Command::Interactive) {
            Command::Configure { provider } => configure(&provider),
            Command::Show { city, unit } => show(city.as_deref(), &unit).await,
            Command::Interactive => interactive().await,
            Command::Favorites { action } => favorites(action),
        }
    }
}

fn configure(provider: &str) -> anyhow::Result<()> {
    let id = ProviderId::try_from(provider)?;
    let mut config = Config::load()?;

    let api_key = Password::new(&format!("API key for {id}:"))
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;

    config.upsert_provider_api_key(id, api_key.trim().to_string());
    config.save()?;

    println!("Saved {id} credentials to {}", Config::config_file_path()?.display());
    Ok(())
}

fn open_favorites() -> anyhow::Result<Favorites> {
    let store = FileStore::open(Config::storage_file_path()?)?;
    tracing::debug!(path = %store.path().display(), "favorites store opened");
    Ok(Favorites::load(Box::new(store)))
}

/// Shown when no photo key is set and backgrounds stay off.
fn background_hint(config: &Config) -> Option<&'static str> {
    (!config.is_provider_configured(ProviderId::Unsplash))
        .then_some("backgrounds disabled; run `weather-widget configure unsplash` to enable them")
}

fn build_widget(config: &Config) -> anyhow::Result<WeatherWidget> {
    let weather = weather_provider_from_config(config)?;

    if let Some(hint) = background_hint(config) {
        tracing::info!("{hint}");
    }

    Ok(WeatherWidget::new(weather, open_favorites()?)
        .with_photos(photo_provider_from_config(config))
        .with_locator(locator_from_config(&config.location))
        .with_surface(Box::new(TerminalBackground)))
}

async fn present(widget: &WeatherWidget) {
    let view = widget.view();
    print!("{}", render::render(&view));

    if let Some(animation) = view.weather.as_ref().and_then(|w| w.animation) {
        render::play(animation, ANIMATION_CYCLES).await;
    }
}

async fn show(city: Option<&str>, unit: &str) -> anyhow::Result<()> {
    let config = Config::load()?;
    let mut widget = build_widget(&config)?;
    widget.set_unit(TemperatureUnit::from_code(unit));

    match city {
        Some(city) => widget.search(city).await,
        None => widget.start().await,
    }

    present(&widget).await;
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuItem {
    Search,
    UseLocation,
    ChooseUnit,
    AddFavorite,
    SelectFavorite,
    RemoveFavorite,
    ToggleTheme(&'static str),
    Quit,
}

impl fmt::Display for MenuItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MenuItem::Search => f.write_str("Search city"),
            MenuItem::UseLocation => f.write_str("Get My Location"),
            MenuItem::ChooseUnit => f.write_str("Temperature unit"),
            MenuItem::AddFavorite => f.write_str("Add to Favorites"),
            MenuItem::SelectFavorite => f.write_str("Select favorite"),
            MenuItem::RemoveFavorite => f.write_str("Remove favorite"),
            MenuItem::ToggleTheme(label) => f.write_str(label),
            MenuItem::Quit => f.write_str("Quit"),
        }
    }
}

fn menu(widget: &WeatherWidget) -> Vec<MenuItem> {
    let view = widget.view();
    let mut items = vec![MenuItem::Search, MenuItem::UseLocation];

    if view.weather.is_some() {
        items.push(MenuItem::ChooseUnit);
        items.push(MenuItem::AddFavorite);
    }
    if !view.favorites.is_empty() {
        items.push(MenuItem::SelectFavorite);
        items.push(MenuItem::RemoveFavorite);
    }

    items.push(MenuItem::ToggleTheme(view.theme_toggle));
    items.push(MenuItem::Quit);
    items
}

async fn interactive() -> anyhow::Result<()> {
    let config = Config::load()?;
    let mut widget = build_widget(&config)?;

    widget.start().await;
    present(&widget).await;

    loop {
        let Some(choice) = Select::new("What next?", menu(&widget)).prompt_skippable()? else {
            break;
        };

        match choice {
            MenuItem::Search => {
                let Some(city) = Text::new("Enter city name:").prompt_skippable()? else {
                    continue;
                };
                widget.search(city.trim()).await;
            }
            MenuItem::UseLocation => widget.resolve_location().await,
            MenuItem::ChooseUnit => {
                let units = TemperatureUnit::all().to_vec();
                if let Some(unit) = Select::new("Unit:", units).prompt_skippable()? {
                    widget.set_unit(unit);
                }
            }
            MenuItem::AddFavorite => {
                if let Err(e) = widget.add_to_favorites() {
                    eprintln!("Could not save favorites: {e:#}");
                }
            }
            MenuItem::SelectFavorite => {
                let cities = widget.favorites().to_vec();
                if let Some(city) = Select::new("Favorite:", cities).prompt_skippable()? {
                    widget.select_favorite(&city);
                }
            }
            MenuItem::RemoveFavorite => {
                let cities = widget.favorites().to_vec();
                if let Some(city) = Select::new("Remove:", cities).prompt_skippable()? {
                    if let Err(e) = widget.remove_favorite(&city) {
                        eprintln!("Could not save favorites: {e:#}");
                    }
                }
            }
            MenuItem::ToggleTheme(_) => {
                widget.toggle_dark_mode();
            }
            MenuItem::Quit => break,
        }

        present(&widget).await;
    }

    Ok(())
}

fn favorites(action: FavoritesAction) -> anyhow::Result<()> {
    let mut favorites = open_favorites()?;

    match action {
        FavoritesAction::List => {
            if favorites.is_empty() {
                println!("No favorite cities yet.");
            }
            for city in favorites.cities() {
                println!("{city}");
            }
        }
        FavoritesAction::Remove { city } => {
            let known = favorites.contains(&city);
            favorites.remove(&city)?;
            if known {
                println!("Removed {city}");
            } else {
                println!("{city} was not a favorite");
            }
        }
    }

    Ok(())
}
