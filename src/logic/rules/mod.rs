pub mod builtin;
pub mod engine;
pub mod loader;

pub use engine::RulesEngine;

use crate::models::WeatherObservation;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Declarative predicate over a [`WeatherObservation`].
///
/// Range variants (`*_between`) are inclusive at both ends; `*_above` and
/// `*_below` are strict. Text matching is a case-insensitive substring test
/// against the lower-cased condition description.
///
/// In YAML each condition is a single-key map (read through
/// `serde_yaml::with::singleton_map_recursive`), e.g.
///
/// ```yaml
/// all:
///   - temperature_between: { min: 20, max: 30 }
///   - condition_contains: clear
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    Always,
    All(Vec<Condition>),
    Any(Vec<Condition>),
    Not(Box<Condition>),
    TemperatureBetween { min: f64, max: f64 },
    TemperatureAbove(f64),
    TemperatureBelow(f64),
    HumidityBetween { min: u8, max: u8 },
    HumidityAbove(u8),
    HumidityBelow(u8),
    ConditionContains(String),
}

impl Condition {
    pub fn all(conditions: impl IntoIterator<Item = Condition>) -> Self {
        Condition::All(conditions.into_iter().collect())
    }

    pub fn any(conditions: impl IntoIterator<Item = Condition>) -> Self {
        Condition::Any(conditions.into_iter().collect())
    }

    pub fn not(condition: Condition) -> Self {
        Condition::Not(Box::new(condition))
    }

    pub fn contains(text: &str) -> Self {
        Condition::ConditionContains(text.to_string())
    }

    pub fn temperature_between(min: f64, max: f64) -> Self {
        Condition::TemperatureBetween { min, max }
    }

    pub fn humidity_between(min: u8, max: u8) -> Self {
        Condition::HumidityBetween { min, max }
    }

    /// Evaluate against an observation. Total: never panics, never fails.
    pub fn matches(&self, obs: &WeatherObservation) -> bool {
        let temp = obs.temperature_celsius;
        let humidity = obs.humidity_percent;

        match self {
            Condition::Always => true,
            Condition::All(conditions) => conditions.iter().all(|c| c.matches(obs)),
            Condition::Any(conditions) => conditions.iter().any(|c| c.matches(obs)),
            Condition::Not(condition) => !condition.matches(obs),
            Condition::TemperatureBetween { min, max } => temp >= *min && temp <= *max,
            Condition::TemperatureAbove(threshold) => temp > *threshold,
            Condition::TemperatureBelow(threshold) => temp < *threshold,
            Condition::HumidityBetween { min, max } => humidity >= *min && humidity <= *max,
            Condition::HumidityAbove(threshold) => humidity > *threshold,
            Condition::HumidityBelow(threshold) => humidity < *threshold,
            Condition::ConditionContains(text) => obs.condition_contains(text),
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Condition::Always => write!(f, "always"),
            Condition::All(conditions) => write_joined(f, conditions, " and ", "always"),
            Condition::Any(conditions) => write_joined(f, conditions, " or ", "never"),
            Condition::Not(condition) => write!(f, "not ({})", condition),
            Condition::TemperatureBetween { min, max } => {
                write!(f, "temp {}..={}°C", min, max)
            }
            Condition::TemperatureAbove(t) => write!(f, "temp > {}°C", t),
            Condition::TemperatureBelow(t) => write!(f, "temp < {}°C", t),
            Condition::HumidityBetween { min, max } => {
                write!(f, "humidity {}..={}%", min, max)
            }
            Condition::HumidityAbove(h) => write!(f, "humidity > {}%", h),
            Condition::HumidityBelow(h) => write!(f, "humidity < {}%", h),
            Condition::ConditionContains(text) => write!(f, "condition ~ \"{}\"", text),
        }
    }
}

fn write_joined(
    f: &mut fmt::Formatter<'_>,
    conditions: &[Condition],
    separator: &str,
    empty: &str,
) -> fmt::Result {
    if conditions.is_empty() {
        return write!(f, "{}", empty);
    }
    let parts: Vec<String> = conditions
        .iter()
        .map(|c| match c {
            Condition::All(_) | Condition::Any(_) => format!("({})", c),
            _ => c.to_string(),
        })
        .collect();
    write!(f, "{}", parts.join(separator))
}

/// A predicate-to-message mapping. Lower `priority` is evaluated first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdvisoryRule {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub priority: i32,
    #[serde(with = "serde_yaml::with::singleton_map_recursive")]
    pub when: Condition,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub planting: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pesticide: Option<String>,
}

impl AdvisoryRule {
    pub fn new(id: impl Into<String>, priority: i32, when: Condition) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            priority,
            when,
            planting: None,
            pesticide: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_planting(mut self, message: impl Into<String>) -> Self {
        self.planting = Some(message.into());
        self
    }

    pub fn with_pesticide(mut self, message: impl Into<String>) -> Self {
        self.pesticide = Some(message.into());
        self
    }

    pub fn matches(&self, obs: &WeatherObservation) -> bool {
        self.when.matches(obs)
    }

    /// Display name, falling back to the id for rules loaded without one
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            &self.id
        } else {
            &self.name
        }
    }
}
