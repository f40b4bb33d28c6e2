use super::observation::WeatherObservation;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Output of one rules evaluation. Each slot is filled independently.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdvisoryResult {
    pub planting: Option<String>,
    pub pesticide: Option<String>,
}

impl AdvisoryResult {
    pub fn is_empty(&self) -> bool {
        self.planting.is_none() && self.pesticide.is_none()
    }

    pub fn is_complete(&self) -> bool {
        self.planting.is_some() && self.pesticide.is_some()
    }
}

/// An observation together with the advice derived from it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherReport {
    pub title: String,
    pub observation: WeatherObservation,
    pub advice: AdvisoryResult,
    pub fetched_at: DateTime<Utc>,
}

impl WeatherReport {
    pub fn new(
        title: impl Into<String>,
        observation: WeatherObservation,
        advice: AdvisoryResult,
    ) -> Self {
        Self {
            title: title.into(),
            observation,
            advice,
            fetched_at: Utc::now(),
        }
    }
}
