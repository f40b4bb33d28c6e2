pub mod advisory_service;
pub mod normalize;
pub mod rules;

pub use advisory_service::{assess, AdvisoryService};
pub use rules::RulesEngine;
