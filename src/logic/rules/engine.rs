use super::{builtin, loader, AdvisoryRule};
use crate::config::AdvisoryConfig;
use crate::error::Result;
use crate::models::{AdvisoryResult, WeatherObservation};

/// Evaluates an ordered, read-only rule set against observations.
///
/// Rules are sorted by ascending priority once at construction; ties keep
/// declaration order. The engine holds no mutable state and can be shared
/// across threads behind an `Arc`.
pub struct RulesEngine {
    rules: Vec<AdvisoryRule>,
}

impl RulesEngine {
    pub fn new(mut rules: Vec<AdvisoryRule>) -> Self {
        // sort_by_key is stable
        rules.sort_by_key(|r| r.priority);
        Self { rules }
    }

    /// Like [`RulesEngine::new`], but rejects malformed rule sets
    pub fn try_new(rules: Vec<AdvisoryRule>) -> Result<Self> {
        loader::validate_rules(&rules)?;
        Ok(Self::new(rules))
    }

    pub fn builtin() -> Self {
        Self::new(builtin::builtin_rules())
    }

    /// Build the engine from configuration: the built-in table, a rules file,
    /// or both merged.
    pub fn from_config(config: &AdvisoryConfig) -> Result<Self> {
        let mut rules = if config.include_builtin {
            builtin::builtin_rules()
        } else {
            Vec::new()
        };

        if let Some(ref path) = config.rules_file {
            let loaded = loader::load_rules(path)?;
            tracing::info!("Loaded {} advisory rules from {}", loaded.len(), path.display());
            rules.extend(loaded);
        }

        let engine = Self::try_new(rules)?;
        tracing::debug!("Rules engine ready with {} rules", engine.len());
        Ok(engine)
    }

    /// First match per slot, in priority order
    pub fn evaluate(&self, obs: &WeatherObservation) -> AdvisoryResult {
        let mut result = AdvisoryResult::default();

        for rule in &self.rules {
            if result.is_complete() {
                break;
            }
            if !rule.matches(obs) {
                continue;
            }

            if result.planting.is_none() {
                if let Some(ref message) = rule.planting {
                    tracing::debug!(rule = %rule.id, "planting slot filled");
                    result.planting = Some(message.clone());
                }
            }

            if result.pesticide.is_none() {
                if let Some(ref message) = rule.pesticide {
                    tracing::debug!(rule = %rule.id, "pesticide slot filled");
                    result.pesticide = Some(message.clone());
                }
            }
        }

        result
    }

    /// Ids of every rule matching the observation, in evaluation order
    pub fn matching_rules(&self, obs: &WeatherObservation) -> Vec<&str> {
        self.rules
            .iter()
            .filter(|r| r.matches(obs))
            .map(|r| r.id.as_str())
            .collect()
    }

    pub fn rules(&self) -> &[AdvisoryRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Default for RulesEngine {
    fn default() -> Self {
        Self::builtin()
    }
}
