pub mod card;

pub use card::WeatherCard;
