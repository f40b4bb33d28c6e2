use crate::models::WeatherReport;
use std::fmt;

/// Plain-text rendering of a [`WeatherReport`]
pub struct WeatherCard<'a> {
    pub report: &'a WeatherReport,
    pub matched_rules: Option<&'a [&'a str]>,
}

impl<'a> WeatherCard<'a> {
    pub fn new(report: &'a WeatherReport) -> Self {
        Self {
            report,
            matched_rules: None,
        }
    }

    pub fn with_matched_rules(mut self, rules: &'a [&'a str]) -> Self {
        self.matched_rules = Some(rules);
        self
    }
}

impl fmt::Display for WeatherCard<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let obs = &self.report.observation;
        let advice = &self.report.advice;

        writeln!(f, "== {} ==", self.report.title)?;
        writeln!(f, "Location:    {}", obs.location_name)?;
        writeln!(f, "Temperature: {:.1}°C", obs.temperature_celsius)?;
        writeln!(f, "Humidity:    {}%", obs.humidity_percent)?;
        writeln!(f, "Condition:   {}", obs.condition_description)?;

        if let Some(ref planting) = advice.planting {
            writeln!(f)?;
            writeln!(f, "Planting Advice")?;
            writeln!(f, "  {}", planting)?;
        }

        if let Some(ref pesticide) = advice.pesticide {
            writeln!(f)?;
            writeln!(f, "Pesticide Control")?;
            writeln!(f, "  {}", pesticide)?;
        }

        if advice.is_empty() {
            writeln!(f)?;
            writeln!(f, "No advisory applicable for current conditions.")?;
        }

        if let Some(rules) = self.matched_rules {
            writeln!(f)?;
            if rules.is_empty() {
                writeln!(f, "Matched rules: none")?;
            } else {
                writeln!(f, "Matched rules: {}", rules.join(", "))?;
            }
        }

        Ok(())
    }
}
