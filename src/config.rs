use crate::error::{Result, SmartFarmError};
use dialoguer::{Input, Password};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    pub openweathermap: OpenWeatherMapConfig,
    #[serde(default)]
    pub advisory: AdvisoryConfig,
}

#[derive(Clone, Deserialize, Serialize)]
pub struct OpenWeatherMapConfig {
    #[serde(default)]
    pub api_key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

impl OpenWeatherMapConfig {
    /// Configured coordinates for the current-location report
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        self.latitude.zip(self.longitude)
    }
}

impl Default for OpenWeatherMapConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            latitude: None,
            longitude: None,
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl std::fmt::Debug for OpenWeatherMapConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenWeatherMapConfig")
            .field("api_key", &"[REDACTED]")
            .field("latitude", &self.latitude)
            .field("longitude", &self.longitude)
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AdvisoryConfig {
    /// Extra YAML rules, merged with the built-in table
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rules_file: Option<PathBuf>,
    #[serde(default = "default_include_builtin")]
    pub include_builtin: bool,
}

fn default_include_builtin() -> bool {
    true
}

impl Default for AdvisoryConfig {
    fn default() -> Self {
        Self {
            rules_file: None,
            include_builtin: true,
        }
    }
}

impl Config {
    pub fn load(config_override: Option<PathBuf>) -> Result<Self> {
        let config_path = match config_override {
            Some(p) => p,
            None => Self::find_config_path()?,
        };

        if !config_path.exists() {
            return Err(SmartFarmError::Config(format!(
                "Config file not found at {:?}. Run `smartfarm init` to set up.",
                config_path
            )));
        }

        let config_str = std::fs::read_to_string(&config_path)
            .map_err(|e| SmartFarmError::Config(format!("Failed to read config: {}", e)))?;

        let config = Self::from_yaml(&config_str)?;
        tracing::debug!("Loaded configuration from {}", config_path.display());
        Ok(config)
    }

    /// Parse config text, substituting `${VAR}` placeholders from the
    /// environment and falling back to `WEATHER_API_KEY` for an empty key.
    pub fn from_yaml(content: &str) -> Result<Self> {
        let content = Self::substitute_env_vars(content);

        let mut config: Config = serde_yaml::from_str(&content)
            .map_err(|e| SmartFarmError::Config(format!("Failed to parse config: {}", e)))?;

        // A `${VAR}` left behind by substitution means the variable was unset
        let api_key = config.openweathermap.api_key.trim();
        if api_key.starts_with("${") && api_key.ends_with('}') {
            config.openweathermap.api_key.clear();
        }

        if config.openweathermap.api_key.trim().is_empty() {
            if let Ok(key) = std::env::var("WEATHER_API_KEY") {
                config.openweathermap.api_key = key;
            }
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let owm = &self.openweathermap;

        if let Some(lat) = owm.latitude {
            if !(-90.0..=90.0).contains(&lat) {
                return Err(SmartFarmError::Config(format!(
                    "latitude {} out of range (-90..=90)",
                    lat
                )));
            }
        }
        if let Some(lon) = owm.longitude {
            if !(-180.0..=180.0).contains(&lon) {
                return Err(SmartFarmError::Config(format!(
                    "longitude {} out of range (-180..=180)",
                    lon
                )));
            }
        }
        if owm.latitude.is_some() != owm.longitude.is_some() {
            return Err(SmartFarmError::Config(
                "latitude and longitude must be set together".into(),
            ));
        }
        if owm.timeout_secs == 0 {
            return Err(SmartFarmError::Config("timeout_secs must be positive".into()));
        }
        Ok(())
    }

    /// Search for config.yaml in standard locations.
    /// Returns the path of the first found config, or the XDG default path if none found.
    fn find_config_path() -> Result<PathBuf> {
        let local_config = PathBuf::from("config/config.yaml");
        if local_config.exists() {
            return Ok(local_config);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let xdg_config = config_dir.join("smartfarm").join("config.yaml");
            if xdg_config.exists() {
                return Ok(xdg_config);
            }
        }

        Self::default_config_path()
    }

    /// Returns true if a config file can be found in any standard location.
    pub fn exists(config_override: Option<&PathBuf>) -> bool {
        match config_override {
            Some(p) => p.exists(),
            None => Self::find_config_path()
                .map(|p| p.exists())
                .unwrap_or(false),
        }
    }

    /// Default path for writing new config files (~/.config/smartfarm/config.yaml).
    pub fn default_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| SmartFarmError::Config("Cannot determine config directory".into()))?
            .join("smartfarm");
        Ok(config_dir.join("config.yaml"))
    }

    /// Run interactive setup prompts and write config to disk.
    /// Returns the loaded Config and the path it was written to.
    pub fn setup_interactive() -> Result<(Self, PathBuf)> {
        println!();
        println!("Let's set up Smartfarm!");
        println!();

        println!("OpenWeatherMap");
        let api_key: String = Password::new()
            .with_prompt("  API key")
            .interact()
            .map_err(input_error)?;

        println!("  Coordinates for the current-location report (leave blank to skip)");
        let latitude: String = Input::new()
            .with_prompt("  Latitude")
            .default(String::new())
            .allow_empty(true)
            .interact_text()
            .map_err(input_error)?;

        let coordinates = if latitude.trim().is_empty() {
            None
        } else {
            let longitude: String = Input::new()
                .with_prompt("  Longitude")
                .interact_text()
                .map_err(input_error)?;
            Some((parse_coordinate(&latitude)?, parse_coordinate(&longitude)?))
        };

        println!();

        println!("Advisory rules");
        let rules_file: String = Input::new()
            .with_prompt("  Extra rules file (leave blank for built-in rules only)")
            .default(String::new())
            .allow_empty(true)
            .interact_text()
            .map_err(input_error)?;

        println!();

        let config = Config {
            openweathermap: OpenWeatherMapConfig {
                api_key,
                latitude: coordinates.map(|(lat, _)| lat),
                longitude: coordinates.map(|(_, lon)| lon),
                ..OpenWeatherMapConfig::default()
            },
            advisory: AdvisoryConfig {
                rules_file: (!rules_file.trim().is_empty())
                    .then(|| PathBuf::from(rules_file.trim())),
                include_builtin: true,
            },
        };
        config.validate()?;

        let config_path = Self::default_config_path()?;
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let yaml = serde_yaml::to_string(&config)
            .map_err(|e| SmartFarmError::Config(format!("Failed to serialize config: {}", e)))?;

        let content = format!(
            "# Smartfarm Configuration\n# Generated by `smartfarm init`\n# Environment variable substitution (${{VAR}}) is supported.\n\n{}",
            yaml
        );
        std::fs::write(&config_path, content)?;

        println!("Configuration saved to {}", config_path.display());
        println!();

        Ok((config, config_path))
    }

    fn substitute_env_vars(content: &str) -> String {
        let Ok(re) = regex_lite::Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}") else {
            return content.to_string();
        };

        let mut result = content.to_string();
        for cap in re.captures_iter(content) {
            let var_name = &cap[1];
            let placeholder = &cap[0];
            if let Ok(value) = std::env::var(var_name) {
                result = result.replace(placeholder, &value);
            }
        }

        result
    }
}

fn input_error(e: dialoguer::Error) -> SmartFarmError {
    SmartFarmError::Config(format!("Input error: {}", e))
}

fn parse_coordinate(value: &str) -> Result<f64> {
    value
        .trim()
        .parse::<f64>()
        .map_err(|_| SmartFarmError::Config(format!("'{}' is not a valid coordinate", value)))
}
