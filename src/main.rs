mod cli;
mod config;
mod datasources;
mod error;
mod logic;
mod models;
mod ui;

use clap::Parser;
use cli::{Cli, Commands};
use config::Config;
use datasources::OpenWeatherMapClient;
use error::{Result, SmartFarmError};
use logic::{AdvisoryService, RulesEngine};
use models::WeatherReport;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use ui::WeatherCard;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_level())),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    Ok(())
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Some(Commands::Init) => {
            let (_, path) = Config::setup_interactive()?;
            println!("Run `smartfarm check` to verify {}", path.display());
            Ok(())
        }
        Some(Commands::Rules) => {
            let config = load_config_or_default(&cli)?;
            let engine = RulesEngine::from_config(&config.advisory)?;
            print_rules(&engine);
            Ok(())
        }
        Some(Commands::Evaluate { ref file }) => {
            let config = load_config_or_default(&cli)?;
            let engine = RulesEngine::from_config(&config.advisory)?;
            let raw = read_raw_response(file)?;
            let title = raw
                .get("name")
                .and_then(|v| v.as_str())
                .filter(|name| !name.is_empty())
                .unwrap_or("Saved Observation")
                .to_string();
            let report = logic::assess(&engine, &title, &raw)?;
            print_report(&cli, &engine, &report)
        }
        Some(Commands::Check) => check(&cli).await,
        Some(Commands::City { ref name }) => {
            let service = build_service(&cli)?;
            match service.for_city(name).await {
                Ok(Some(report)) => print_report(&cli, service.engine(), &report),
                Ok(None) => {
                    eprintln!("Enter a city name to look up.");
                    Ok(())
                }
                Err(e) => {
                    eprintln!("City not found or weather data unavailable");
                    Err(e)
                }
            }
        }
        Some(Commands::Location { lat, lon }) => {
            current_location(&cli, lat.zip(lon)).await
        }
        None => current_location(&cli, None).await,
    }
}

async fn current_location(cli: &Cli, coordinates: Option<(f64, f64)>) -> Result<()> {
    let config = Config::load(cli.config.clone())?;
    let (lat, lon) = coordinates
        .or_else(|| config.openweathermap.coordinates())
        .ok_or_else(|| {
            SmartFarmError::LocationUnavailable(
                "no coordinates given; pass --lat/--lon or set latitude/longitude in config"
                    .into(),
            )
        })?;

    let service = service_from_config(config)?;
    match service.for_coordinates(lat, lon).await {
        Ok(report) => print_report(cli, service.engine(), &report),
        Err(e) => {
            eprintln!("Failed to get weather for current location");
            Err(e)
        }
    }
}

async fn check(cli: &Cli) -> Result<()> {
    let config = Config::load(cli.config.clone())?;
    println!("Config: OK");

    let engine = RulesEngine::from_config(&config.advisory)?;
    println!("Rules: {} loaded", engine.len());

    if config.openweathermap.api_key.trim().is_empty() {
        println!("OpenWeatherMap: NO API KEY");
        return Ok(());
    }

    let client = OpenWeatherMapClient::new(config.openweathermap)?;
    let service = AdvisoryService::new(client, Arc::new(engine));
    let status = service.test_connection().await.unwrap_or_else(|e| {
        tracing::warn!("Connection test failed: {}", e);
        false
    });
    println!(
        "OpenWeatherMap: {}",
        if status { "OK" } else { "OFFLINE" }
    );
    Ok(())
}

fn load_config_or_default(cli: &Cli) -> Result<Config> {
    if Config::exists(cli.config.as_ref()) {
        Config::load(cli.config.clone())
    } else {
        tracing::info!("No config file found, using built-in defaults");
        Ok(Config::default())
    }
}

fn build_service(cli: &Cli) -> Result<AdvisoryService> {
    service_from_config(Config::load(cli.config.clone())?)
}

fn service_from_config(config: Config) -> Result<AdvisoryService> {
    if config.openweathermap.api_key.trim().is_empty() {
        return Err(SmartFarmError::Config(
            "OpenWeatherMap API key not configured; set WEATHER_API_KEY or api_key in config"
                .into(),
        ));
    }

    let engine = Arc::new(RulesEngine::from_config(&config.advisory)?);
    let client = OpenWeatherMapClient::new(config.openweathermap)?;
    Ok(AdvisoryService::new(client, engine))
}

fn read_raw_response(file: &Path) -> Result<serde_json::Value> {
    let content = if file == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        std::fs::read_to_string(file)?
    };
    Ok(serde_json::from_str(&content)?)
}

fn print_report(cli: &Cli, engine: &RulesEngine, report: &WeatherReport) -> Result<()> {
    let matched = cli
        .explain
        .then(|| engine.matching_rules(&report.observation));

    if cli.json {
        let mut value = serde_json::to_value(report)?;
        if let Some(ref matched) = matched {
            value["matched_rules"] = serde_json::json!(matched);
        }
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    let card = WeatherCard::new(report);
    match matched {
        Some(ref matched) => print!("{}", card.with_matched_rules(matched)),
        None => print!("{}", card),
    }
    Ok(())
}

fn print_rules(engine: &RulesEngine) {
    println!("{} rules, evaluated top to bottom:", engine.len());
    for rule in engine.rules() {
        println!();
        println!("[{:>4}] {} ({})", rule.priority, rule.display_name(), rule.id);
        println!("       when {}", rule.when);
        if let Some(ref planting) = rule.planting {
            println!("       planting:  {}", planting);
        }
        if let Some(ref pesticide) = rule.pesticide {
            println!("       pesticide: {}", pesticide);
        }
    }
}
