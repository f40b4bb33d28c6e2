use serde::{Deserialize, Serialize};

/// A normalized snapshot of current weather, the input to the rules engine.
///
/// Built once per lookup by [`crate::logic::normalize::normalize_observation`]; every
/// field is always present, so rule predicates never deal with missing data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherObservation {
    pub location_name: String,
    pub temperature_celsius: f64,
    pub humidity_percent: u8,
    /// Lower-cased provider description, e.g. "light rain"
    pub condition_description: String,
}

impl WeatherObservation {
    pub fn new(
        location_name: impl Into<String>,
        temperature_celsius: f64,
        humidity_percent: u8,
        condition_description: &str,
    ) -> Self {
        Self {
            location_name: location_name.into(),
            temperature_celsius,
            humidity_percent,
            condition_description: condition_description.trim().to_lowercase(),
        }
    }

    /// Case-insensitive substring match against the condition description
    pub fn condition_contains(&self, needle: &str) -> bool {
        self.condition_description
            .contains(needle.trim().to_lowercase().as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_lowercases_description() {
        let obs = WeatherObservation::new("Testville", 25.0, 60, "  Clear Sky ");
        assert_eq!(obs.condition_description, "clear sky");
    }

    #[test]
    fn condition_contains_ignores_case() {
        let obs = WeatherObservation::new("Testville", 25.0, 60, "Light Rain");
        assert!(obs.condition_contains("RAIN"));
        assert!(obs.condition_contains("light"));
        assert!(!obs.condition_contains("snow"));
    }
}
