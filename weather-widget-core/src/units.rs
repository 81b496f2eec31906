use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureUnit {
    #[default]
    Celsius,
    Fahrenheit,
    Kelvin,
}

impl TemperatureUnit {
    pub const fn all() -> &'static [TemperatureUnit] {
        &[TemperatureUnit::Celsius, TemperatureUnit::Fahrenheit, TemperatureUnit::Kelvin]
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            TemperatureUnit::Celsius => "°C",
            TemperatureUnit::Fahrenheit => "°F",
            TemperatureUnit::Kelvin => "K",
        }
    }

    /// Parse a unit code or name. Anything unrecognised is treated as Celsius.
    pub fn from_code(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "f" | "fahrenheit" => TemperatureUnit::Fahrenheit,
            "k" | "kelvin" => TemperatureUnit::Kelvin,
            _ => TemperatureUnit::Celsius,
        }
    }

    pub fn convert(&self, temp_c: f64) -> f64 {
        match self {
            TemperatureUnit::Celsius => temp_c,
            TemperatureUnit::Fahrenheit => temp_c * 9.0 / 5.0 + 32.0,
            TemperatureUnit::Kelvin => temp_c + 273.15,
        }
    }
}

impl std::fmt::Display for TemperatureUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.symbol())
    }
}

/// At or above 2^52 every f64 is a whole number.
const WHOLE_NUMBER_LIMIT: f64 = 4_503_599_627_370_496.0;

/// Format a Celsius temperature in `unit` with one decimal place.
///
/// Halves round away from zero, so 273.15 renders as `273.2`.
pub fn format_temperature(temp_c: f64, unit: TemperatureUnit) -> String {
    let value = unit.convert(temp_c);
    let rounded = if value.abs() < WHOLE_NUMBER_LIMIT {
        (value * 10.0).round() / 10.0
    } else {
        value
    };
    format!("{rounded:.1}{}", unit.symbol())
}

/// Same as [`format_temperature`], taking the unit as a code.
pub fn format_temperature_code(temp_c: f64, code: &str) -> String {
    format_temperature(temp_c, TemperatureUnit::from_code(code))
}
