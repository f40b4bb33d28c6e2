use super::normalize::normalize_observation;
use super::rules::RulesEngine;
use crate::datasources::OpenWeatherMapClient;
use crate::error::Result;
use crate::models::WeatherReport;
use serde_json::Value;
use std::sync::Arc;

pub const CURRENT_LOCATION_TITLE: &str = "Current Location";

/// Fetches weather, normalizes it and runs the rules engine.
pub struct AdvisoryService {
    client: OpenWeatherMapClient,
    engine: Arc<RulesEngine>,
}

impl AdvisoryService {
    pub fn new(client: OpenWeatherMapClient, engine: Arc<RulesEngine>) -> Self {
        Self { client, engine }
    }

    pub fn engine(&self) -> &RulesEngine {
        &self.engine
    }

    pub async fn for_coordinates(&self, latitude: f64, longitude: f64) -> Result<WeatherReport> {
        let raw = self.client.fetch_by_coordinates(latitude, longitude).await?;
        assess(&self.engine, CURRENT_LOCATION_TITLE, &raw)
    }

    /// Report for a named city. A blank name is ignored and yields `None`.
    pub async fn for_city(&self, city: &str) -> Result<Option<WeatherReport>> {
        let city = city.trim();
        if city.is_empty() {
            tracing::debug!("Empty city name, skipping lookup");
            return Ok(None);
        }

        let raw = self.client.fetch_by_city(city).await?;
        let mut report = assess(&self.engine, city, &raw)?;
        if !report.observation.location_name.is_empty() {
            report.title = report.observation.location_name.clone();
        }
        Ok(Some(report))
    }

    pub async fn test_connection(&self) -> Result<bool> {
        self.client.test_connection().await
    }
}

/// Normalize a raw provider response and evaluate the rules against it
pub fn assess(engine: &RulesEngine, title: &str, raw: &Value) -> Result<WeatherReport> {
    let observation = normalize_observation(raw)?;
    let advice = engine.evaluate(&observation);

    tracing::info!(
        location = %observation.location_name,
        temp_c = observation.temperature_celsius,
        humidity = observation.humidity_percent,
        condition = %observation.condition_description,
        planting = advice.planting.is_some(),
        pesticide = advice.pesticide.is_some(),
        "Advisory evaluated"
    );

    Ok(WeatherReport::new(title, observation, advice))
}
