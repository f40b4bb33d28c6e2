use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "smartfarm",
    version,
    about = "Weather lookups with planting and pesticide advice"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to config.yaml
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Print reports as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// List every rule matching the observation
    #[arg(long, global = true)]
    pub explain: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Weather and advice for the current location (default)
    Location {
        /// Latitude, overrides config
        #[arg(long, requires = "lon", allow_hyphen_values = true)]
        lat: Option<f64>,
        /// Longitude, overrides config
        #[arg(long, requires = "lat", allow_hyphen_values = true)]
        lon: Option<f64>,
    },
    /// Weather and advice for a city
    City {
        /// City name, e.g. "Nairobi" or "Nairobi,KE"
        name: String,
    },
    /// Evaluate a saved OpenWeatherMap response ("-" reads stdin)
    Evaluate { file: PathBuf },
    /// List the loaded advisory rules in evaluation order
    Rules,
    /// Validate config and rules, test the API connection
    Check,
    /// Run interactive setup
    Init,
}

impl Cli {
    /// Log filter derived from `-v` count
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}
