use crate::error::{Result, SmartFarmError};
use crate::models::WeatherObservation;
use serde::Deserialize;
use serde_json::Value;

// OpenWeatherMap "current weather" response, only the fields we read
#[derive(Debug, Deserialize)]
struct OwmCurrent {
    name: Option<String>,
    main: Option<OwmMain>,
    weather: Option<Vec<OwmWeather>>,
}

#[derive(Debug, Deserialize)]
struct OwmMain {
    temp: Option<f64>,
    humidity: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct OwmWeather {
    description: Option<String>,
}

/// Extract a [`WeatherObservation`] from a raw OpenWeatherMap "current weather"
/// response.
///
/// Expected shape:
/// - `name`: location display name (optional, defaults to "")
/// - `main.temp`: temperature in °C (required, numeric)
/// - `main.humidity`: relative humidity 0-100 (required, numeric)
/// - `weather[0].description`: condition text (required)
pub fn normalize_observation(raw: &Value) -> Result<WeatherObservation> {
    let current = OwmCurrent::deserialize(raw)
        .map_err(|e| incomplete(format!("malformed weather response: {}", e)))?;

    let main = current
        .main
        .ok_or_else(|| incomplete("missing 'main' section"))?;

    let temperature = main
        .temp
        .ok_or_else(|| incomplete("'main.temp' is missing"))?;
    let humidity = main
        .humidity
        .ok_or_else(|| incomplete("'main.humidity' is missing"))?;

    if !(0.0..=100.0).contains(&humidity) {
        return Err(incomplete(format!(
            "humidity {} is outside 0-100%",
            humidity
        )));
    }

    let description = current
        .weather
        .ok_or_else(|| incomplete("missing 'weather' conditions list"))?
        .into_iter()
        .next()
        .ok_or_else(|| incomplete("empty 'weather' conditions list"))?
        .description
        .ok_or_else(|| incomplete("first weather condition has no description"))?;

    Ok(WeatherObservation::new(
        current.name.unwrap_or_default(),
        temperature,
        humidity.round() as u8,
        &description,
    ))
}

fn incomplete(reason: impl Into<String>) -> SmartFarmError {
    SmartFarmError::IncompleteObservation(reason.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_response() -> Value {
        json!({
            "coord": { "lon": 36.82, "lat": -1.29 },
            "weather": [
                { "id": 800, "main": "Clear", "description": "Clear Sky", "icon": "01d" }
            ],
            "main": {
                "temp": 25.4,
                "feels_like": 25.1,
                "humidity": 60,
                "pressure": 1015
            },
            "name": "Testville",
            "cod": 200
        })
    }

    #[test]
    fn normalizes_complete_response() {
        let obs = normalize_observation(&sample_response()).unwrap();
        assert_eq!(obs.location_name, "Testville");
        assert!((obs.temperature_celsius - 25.4).abs() < f64::EPSILON);
        assert_eq!(obs.humidity_percent, 60);
        assert_eq!(obs.condition_description, "clear sky");
    }

    #[test]
    fn missing_name_defaults_to_empty() {
        let mut raw = sample_response();
        raw.as_object_mut().unwrap().remove("name");

        let obs = normalize_observation(&raw).unwrap();
        assert_eq!(obs.location_name, "");
    }

    #[test]
    fn missing_humidity_is_incomplete() {
        let mut raw = sample_response();
        raw["main"].as_object_mut().unwrap().remove("humidity");

        let err = normalize_observation(&raw).unwrap_err();
        assert!(matches!(err, SmartFarmError::IncompleteObservation(_)));
    }

    #[test]
    fn missing_temperature_is_incomplete() {
        let mut raw = sample_response();
        raw["main"].as_object_mut().unwrap().remove("temp");

        assert!(matches!(
            normalize_observation(&raw),
            Err(SmartFarmError::IncompleteObservation(_))
        ));
    }

    #[test]
    fn non_numeric_temperature_is_incomplete() {
        let mut raw = sample_response();
        raw["main"]["temp"] = json!("25");

        assert!(matches!(
            normalize_observation(&raw),
            Err(SmartFarmError::IncompleteObservation(_))
        ));
    }

    #[test]
    fn non_numeric_temperature_reports_malformed_response() {
        let mut raw = sample_response();
        raw["main"]["temp"] = json!("warm");

        match normalize_observation(&raw) {
            Err(SmartFarmError::IncompleteObservation(reason)) => {
                assert!(reason.contains("malformed"), "{}", reason)
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn missing_main_section_is_incomplete() {
        let raw = json!({
            "name": "Testville",
            "weather": [{ "description": "clear sky" }]
        });

        assert!(matches!(
            normalize_observation(&raw),
            Err(SmartFarmError::IncompleteObservation(_))
        ));
    }

    #[test]
    fn empty_conditions_list_is_incomplete() {
        let mut raw = sample_response();
        raw["weather"] = json!([]);

        assert!(matches!(
            normalize_observation(&raw),
            Err(SmartFarmError::IncompleteObservation(_))
        ));
    }

    #[test]
    fn condition_without_description_is_incomplete() {
        let mut raw = sample_response();
        raw["weather"] = json!([{ "id": 800, "main": "Clear" }]);

        assert!(matches!(
            normalize_observation(&raw),
            Err(SmartFarmError::IncompleteObservation(_))
        ));
    }

    #[test]
    fn humidity_out_of_range_is_incomplete() {
        let mut raw = sample_response();
        raw["main"]["humidity"] = json!(140);

        assert!(matches!(
            normalize_observation(&raw),
            Err(SmartFarmError::IncompleteObservation(_))
        ));
    }

    #[test]
    fn fractional_humidity_is_rounded() {
        let mut raw = sample_response();
        raw["main"]["humidity"] = json!(59.6);

        let obs = normalize_observation(&raw).unwrap();
        assert_eq!(obs.humidity_percent, 60);
    }

    #[test]
    fn only_first_condition_is_used() {
        let mut raw = sample_response();
        raw["weather"] = json!([
            { "description": "light rain" },
            { "description": "mist" }
        ]);

        let obs = normalize_observation(&raw).unwrap();
        assert_eq!(obs.condition_description, "light rain");
    }
}
