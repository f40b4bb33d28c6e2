use super::{AdvisoryRule, Condition};
use crate::error::{Result, SmartFarmError};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct RuleSetFile {
    rules: Vec<AdvisoryRule>,
}

/// Parse and validate a YAML rule set (`rules: [...]`)
pub fn parse_rules(yaml: &str) -> Result<Vec<AdvisoryRule>> {
    let file: RuleSetFile = serde_yaml::from_str(yaml)
        .map_err(|e| SmartFarmError::InvalidRule(format!("Failed to parse rules: {}", e)))?;
    validate_rules(&file.rules)?;
    Ok(file.rules)
}

pub fn load_rules(path: &Path) -> Result<Vec<AdvisoryRule>> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        SmartFarmError::Config(format!("Failed to read rules file {:?}: {}", path, e))
    })?;
    parse_rules(&content)
}

/// Reject rule sets the engine cannot evaluate meaningfully.
///
/// - ids must be non-empty and unique
/// - each rule carries at least one message
/// - ranges need `min <= max`, finite temperatures and humidity within 0-100
pub fn validate_rules(rules: &[AdvisoryRule]) -> Result<()> {
    let mut seen = HashSet::new();

    for rule in rules {
        if rule.id.trim().is_empty() {
            return Err(SmartFarmError::InvalidRule("rule with empty id".into()));
        }
        if !seen.insert(rule.id.as_str()) {
            return Err(SmartFarmError::InvalidRule(format!(
                "duplicate rule id '{}'",
                rule.id
            )));
        }
        if rule.planting.is_none() && rule.pesticide.is_none() {
            return Err(SmartFarmError::InvalidRule(format!(
                "rule '{}' has neither a planting nor a pesticide message",
                rule.id
            )));
        }
        validate_condition(&rule.id, &rule.when)?;
    }

    Ok(())
}

fn validate_condition(rule_id: &str, condition: &Condition) -> Result<()> {
    let invalid = |msg: String| SmartFarmError::InvalidRule(format!("rule '{}': {}", rule_id, msg));

    match condition {
        Condition::All(conditions) | Condition::Any(conditions) => conditions
            .iter()
            .try_for_each(|c| validate_condition(rule_id, c)),
        Condition::Not(inner) => validate_condition(rule_id, inner),
        Condition::TemperatureBetween { min, max } => {
            if !min.is_finite() || !max.is_finite() {
                Err(invalid("temperature bounds must be finite".into()))
            } else if min > max {
                Err(invalid(format!("temperature range {}..={} is empty", min, max)))
            } else {
                Ok(())
            }
        }
        Condition::TemperatureAbove(t) | Condition::TemperatureBelow(t) => {
            if t.is_finite() {
                Ok(())
            } else {
                Err(invalid("temperature threshold must be finite".into()))
            }
        }
        Condition::HumidityBetween { min, max } => {
            if *max > 100 {
                Err(invalid(format!("humidity bound {} exceeds 100%", max)))
            } else if min > max {
                Err(invalid(format!("humidity range {}..={} is empty", min, max)))
            } else {
                Ok(())
            }
        }
        Condition::HumidityAbove(h) | Condition::HumidityBelow(h) => {
            if *h > 100 {
                Err(invalid(format!("humidity threshold {} exceeds 100%", h)))
            } else {
                Ok(())
            }
        }
        Condition::ConditionContains(text) => {
            if text.trim().is_empty() {
                Err(invalid("condition text must not be empty".into()))
            } else {
                Ok(())
            }
        }
        Condition::Always => Ok(()),
    }
}
