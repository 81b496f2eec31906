use anyhow::{Context, Result};

use crate::storage::KeyValueStore;

/// Storage key holding the JSON-encoded list.
pub const FAVORITES_KEY: &str = "favoriteCities";

#[derive(Debug)]
pub struct Favorites {
    cities: Vec<String>,
    store: Box<dyn KeyValueStore>,
}

impl Favorites {
    /// Read the persisted list. Absent or unreadable data gives an empty list.
    pub fn load(store: Box<dyn KeyValueStore>) -> Self {
        let raw = match store.get(FAVORITES_KEY) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(error = %e, "could not read favorites; starting empty");
                None
            }
        };

        let stored: Vec<String> = raw
            .and_then(|raw| match serde_json::from_str(&raw) {
                Ok(list) => Some(list),
                Err(e) => {
                    tracing::warn!(error = %e, "stored favorites are not a list of names; starting empty");
                    None
                }
            })
            .unwrap_or_default();

        let mut cities: Vec<String> = Vec::with_capacity(stored.len());
        for city in stored {
            if !city.is_empty() && !cities.contains(&city) {
                cities.push(city);
            }
        }

        tracing::debug!(count = cities.len(), "favorites loaded");
        Self { cities, store }
    }

    pub fn cities(&self) -> &[String] {
        &self.cities
    }

    pub fn contains(&self, city: &str) -> bool {
        self.cities.iter().any(|c| c == city)
    }

    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }

    /// Append `city` unless it is empty or already listed.
    /// Returns whether the list changed.
    pub fn add(&mut self, city: &str) -> Result<bool> {
        if city.is_empty() || self.contains(city) {
            return Ok(false);
        }

        self.cities.push(city.to_string());
        self.persist()?;
        Ok(true)
    }

    /// Drop every entry equal to `city`. The list is written back even when
    /// nothing matched.
    pub fn remove(&mut self, city: &str) -> Result<()> {
        self.cities.retain(|c| c != city);
        self.persist()
    }

    fn persist(&mut self) -> Result<()> {
        let json = serde_json::to_string(&self.cities).context("Failed to encode favorites")?;
        self.store
            .set(FAVORITES_KEY, &json)
            .context("Failed to save favorites")
    }
}
