use crate::{animation::Animation, units::TemperatureUnit};

pub const TITLE: &str = "Weather App";
pub const NO_FAVORITES: &str = "No favorite cities yet.";

#[derive(Debug, Clone, PartialEq)]
pub struct WidgetView {
    pub title: &'static str,
    pub dark_mode: bool,
    /// Label of the theme toggle, naming the mode it switches to.
    pub theme_toggle: &'static str,
    pub error: Option<String>,
    pub weather: Option<WeatherPanel>,
    pub current_city: String,
    pub favorites: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WeatherPanel {
    pub heading: String,
    pub temperature: String,
    pub description: String,
    pub humidity: String,
    pub wind: String,
    pub observed_at: Option<String>,
    pub animation: Option<Animation>,
    pub unit: TemperatureUnit,
}

impl WidgetView {
    pub fn favorites_placeholder(&self) -> Option<&'static str> {
        self.favorites.is_empty().then_some(NO_FAVORITES)
    }
}

pub(crate) fn theme_toggle_label(dark_mode: bool) -> &'static str {
    if dark_mode { "Switch to Light Mode" } else { "Switch to Dark Mode" }
}
