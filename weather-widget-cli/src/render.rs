use std::{
    io::{IsTerminal, Write},
    time::Duration,
};

use weather_widget_core::{Animation, BackgroundStyle, BackgroundSurface, TemperatureUnit, WidgetView};

const FRAME_DELAY: Duration = Duration::from_millis(250);

/// Stands in for the page background: announces each newly applied image.
#[derive(Debug, Default)]
pub struct TerminalBackground;

impl BackgroundSurface for TerminalBackground {
    fn apply(&mut self, style: &BackgroundStyle) {
        println!("[background] {} ({}, {})", style.image_url, style.size, style.position);
    }
}

/// Lay out the whole widget as text. The animation is shown as its first frame.
pub fn render(view: &WidgetView) -> String {
    let rule = if view.dark_mode { "▓" } else { "─" }.repeat(40);
    let dark = if view.dark_mode { " (dark)" } else { "" };

    let mut lines = vec![rule.clone(), format!("{}{dark}", view.title), rule];

    if let Some(error) = &view.error {
        lines.push(format!("Error: {error}"));
    }

    if let Some(panel) = &view.weather {
        lines.push(panel.heading.clone());
        if let Some(frame) = panel.animation.and_then(|a| a.frames().first()) {
            lines.push(frame.to_string());
        }
        lines.push(format!("Temperature: {}", panel.temperature));
        lines.push(format!("Weather: {}", panel.description));
        lines.push(format!("Humidity: {}", panel.humidity));
        lines.push(format!("Wind Speed: {}", panel.wind));
        if let Some(at) = &panel.observed_at {
            lines.push(format!("Observed: {at}"));
        }
        lines.push(format!("Units: {}", unit_controls(panel.unit)));
    }

    if !view.current_city.is_empty() {
        lines.push(format!("Current city: {}", view.current_city));
    }

    lines.push(String::new());
    lines.push("Favorite Cities".to_string());
    match view.favorites_placeholder() {
        Some(placeholder) => lines.push(format!("  {placeholder}")),
        None => lines.extend(view.favorites.iter().map(|city| format!("  • {city}"))),
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

/// The three unit controls, with the active one bracketed.
fn unit_controls(active: TemperatureUnit) -> String {
    TemperatureUnit::all()
        .iter()
        .map(|unit| {
            if *unit == active {
                format!("[{}]", unit.symbol())
            } else {
                format!(" {} ", unit.symbol())
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Play the loop a few times in place. Does nothing unless stdout is a terminal.
pub async fn play(animation: Animation, cycles: usize) {
    let mut stdout = std::io::stdout();
    if !stdout.is_terminal() {
        return;
    }

    let height = animation.frame_height();
    let mut first = true;

    for _ in 0..cycles {
        for frame in animation.frames() {
            if !first {
                // Move the cursor back to the top of the previous frame.
                let _ = write!(stdout, "\x1b[{height}A");
            }
            first = false;

            for line in frame.lines() {
                let _ = writeln!(stdout, "\x1b[2K{line}");
            }
            let _ = stdout.flush();
            tokio::time::sleep(FRAME_DELAY).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use weather_widget_core::WeatherPanel;

    fn view() -> WidgetView {
        WidgetView {
            title: "Weather App",
            dark_mode: false,
            theme_toggle: "Switch to Dark Mode",
            error: None,
            weather: None,
            current_city: String::new(),
            favorites: Vec::new(),
        }
    }

    #[test]
    fn empty_widget_shows_placeholder() {
        let out = render(&view());
        assert!(out.contains("Weather App"));
        assert!(out.contains("No favorite cities yet."));
        assert!(!out.contains("Error:"));
    }

    #[test]
    fn weather_panel_lines() {
        let mut v = view();
        v.error = Some("city not found".into());
        v.favorites = vec!["Tokyo".into()];
        v.weather = Some(WeatherPanel {
            heading: "Weather in Paris".into(),
            temperature: "59.0°F".into(),
            description: "clear sky".into(),
            humidity: "60%".into(),
            wind: "3.1 m/s".into(),
            observed_at: None,
            animation: Some(Animation::Sunny),
            unit: TemperatureUnit::Fahrenheit,
        });

        let out = render(&v);
        assert!(out.contains("Error: city not found"));
        assert!(out.contains("Temperature: 59.0°F"));
        assert!(out.contains("Humidity: 60%"));
        assert!(out.contains("Wind Speed: 3.1 m/s"));
        assert!(out.contains("[°F]"));
        assert!(out.contains("• Tokyo"));
        assert!(!out.contains("No favorite cities yet."));
    }

    #[test]
    fn dark_mode_changes_header() {
        let mut v = view();
        v.dark_mode = true;
        v.current_city = "Paris".into();

        let out = render(&v);
        assert!(out.starts_with("▓"));
        assert!(out.contains("Weather App (dark)"));
        assert!(out.contains("Current city: Paris\n\nFavorite Cities\n"));
        assert!(out.ends_with("No favorite cities yet.\n"));
    }
}
