use crate::config::OpenWeatherMapConfig;
use crate::error::{Result, SmartFarmError};
use reqwest::{StatusCode, Url};
use serde_json::Value;
use std::time::Duration;

/// Client for the OpenWeatherMap "current weather" endpoint.
///
/// Responses are returned as raw JSON; turning them into observations is the
/// normalizer's job.
pub struct OpenWeatherMapClient {
    client: reqwest::Client,
    config: OpenWeatherMapConfig,
}

impl OpenWeatherMapClient {
    pub fn new(config: OpenWeatherMapConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { client, config })
    }

    /// Current weather at a coordinate pair, metric units
    pub async fn fetch_by_coordinates(&self, latitude: f64, longitude: f64) -> Result<Value> {
        let lat = latitude.to_string();
        let lon = longitude.to_string();
        let url = self.weather_url(&[("lat", lat.as_str()), ("lon", lon.as_str())])?;

        tracing::debug!(latitude, longitude, "Fetching current weather");
        self.get_json(url, &format!("coordinates ({}, {})", lat, lon))
            .await
    }

    /// Current weather for a city name, metric units
    pub async fn fetch_by_city(&self, city: &str) -> Result<Value> {
        let url = self.weather_url(&[("q", city)])?;

        tracing::debug!(city, "Fetching current weather");
        self.get_json(url, &format!("city '{}'", city)).await
    }

    /// Test connection to OpenWeatherMap API
    pub async fn test_connection(&self) -> Result<bool> {
        let url = self.weather_url(&[("lat", "0"), ("lon", "0")])?;

        let response =
            self.client.get(url).send().await.map_err(|e| {
                // Display of a reqwest error carries the URL, and with it the appid
                SmartFarmError::DataSourceUnavailable(format!(
                    "OpenWeatherMap: {}",
                    e.without_url()
                ))
            })?;

        Ok(response.status().is_success())
    }

    fn weather_url(&self, params: &[(&str, &str)]) -> Result<Url> {
        let base = format!("{}/weather", self.config.base_url.trim_end_matches('/'));
        let params = params.iter().copied().chain([
            ("appid", self.config.api_key.as_str()),
            ("units", "metric"),
        ]);

        Url::parse_with_params(&base, params).map_err(|e| {
            SmartFarmError::Config(format!("Invalid OpenWeatherMap base URL '{}': {}", base, e))
        })
    }

    async fn get_json(&self, url: Url, target: &str) -> Result<Value> {
        let response =
            self.client.get(url).send().await.map_err(|e| {
                // Display of a reqwest error carries the URL, and with it the appid
                SmartFarmError::DataSourceUnavailable(format!(
                    "OpenWeatherMap: {}",
                    e.without_url()
                ))
            })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(SmartFarmError::NotFound(format!(
                "OpenWeatherMap has no weather for {}",
                target
            )));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SmartFarmError::DataSourceUnavailable(format!(
                "OpenWeatherMap returned {}: {}",
                status, body
            )));
        }

        response.json::<Value>().await.map_err(|e| {
            SmartFarmError::DataSourceUnavailable(format!(
                "Failed to parse OpenWeatherMap response: {}",
                e.without_url()
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config_for(server: &MockServer) -> OpenWeatherMapConfig {
        OpenWeatherMapConfig {
            api_key: "test_key".to_string(),
            latitude: Some(-1.29),
            longitude: Some(36.82),
            base_url: server.uri(),
            timeout_secs: 5,
        }
    }

    fn current_weather(name: &str) -> Value {
        json!({
            "weather": [{ "id": 800, "main": "Clear", "description": "clear sky" }],
            "main": { "temp": 24.5, "humidity": 58 },
            "name": name
        })
    }

    #[tokio::test]
    async fn fetch_by_coordinates_sends_metric_query() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/weather"))
            .and(query_param("lat", "-1.29"))
            .and(query_param("lon", "36.82"))
            .and(query_param("appid", "test_key"))
            .and(query_param("units", "metric"))
            .respond_with(ResponseTemplate::new(200).set_body_json(current_weather("Nairobi")))
            .mount(&server)
            .await;

        let client = OpenWeatherMapClient::new(config_for(&server)).unwrap();
        let raw = client.fetch_by_coordinates(-1.29, 36.82).await.unwrap();

        assert_eq!(raw["name"], "Nairobi");
        assert_eq!(raw["main"]["humidity"], 58);
    }

    #[tokio::test]
    async fn fetch_by_city_encodes_name() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/weather"))
            .and(query_param("q", "São Paulo"))
            .and(query_param("units", "metric"))
            .respond_with(ResponseTemplate::new(200).set_body_json(current_weather("São Paulo")))
            .mount(&server)
            .await;

        let client = OpenWeatherMapClient::new(config_for(&server)).unwrap();
        let raw = client.fetch_by_city("São Paulo").await.unwrap();

        assert_eq!(raw["name"], "São Paulo");
    }

    #[tokio::test]
    async fn unknown_city_is_not_found() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/weather"))
            .respond_with(
                ResponseTemplate::new(404)
                    .set_body_json(json!({ "cod": "404", "message": "city not found" })),
            )
            .mount(&server)
            .await;

        let client = OpenWeatherMapClient::new(config_for(&server)).unwrap();
        let err = client.fetch_by_city("Atlantis").await.unwrap_err();

        assert!(matches!(err, SmartFarmError::NotFound(_)));
    }

    #[tokio::test]
    async fn server_error_is_unavailable() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/weather"))
            .respond_with(ResponseTemplate::new(401).set_body_string("Invalid API key"))
            .mount(&server)
            .await;

        let client = OpenWeatherMapClient::new(config_for(&server)).unwrap();
        let err = client.fetch_by_coordinates(0.0, 0.0).await.unwrap_err();

        match err {
            SmartFarmError::DataSourceUnavailable(msg) => {
                assert!(msg.contains("401"));
                assert!(msg.contains("Invalid API key"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn non_json_body_is_unavailable() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/weather"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let client = OpenWeatherMapClient::new(config_for(&server)).unwrap();
        assert!(matches!(
            client.fetch_by_city("Testville").await,
            Err(SmartFarmError::DataSourceUnavailable(_))
        ));
    }

    #[tokio::test]
    async fn connection_error_omits_api_key() {
        // Nothing listens on port 1, so the request fails before any response
        let config = OpenWeatherMapConfig {
            api_key: "super-secret-key".into(),
            base_url: "http://127.0.0.1:1".into(),
            timeout_secs: 2,
            ..OpenWeatherMapConfig::default()
        };
        let client = OpenWeatherMapClient::new(config).unwrap();

        let err = client.fetch_by_city("Testville").await.unwrap_err();
        assert!(matches!(err, SmartFarmError::DataSourceUnavailable(_)));
        assert!(!err.to_string().contains("super-secret-key"));
        assert!(!format!("{:?}", err).contains("super-secret-key"));

        let err = client.test_connection().await.unwrap_err();
        assert!(!err.to_string().contains("super-secret-key"));
    }

    #[tokio::test]
    async fn test_connection_reports_status() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/weather"))
            .respond_with(ResponseTemplate::new(200).set_body_json(current_weather("Null Island")))
            .mount(&server)
            .await;

        let client = OpenWeatherMapClient::new(config_for(&server)).unwrap();
        assert!(client.test_connection().await.unwrap());
    }

    #[test]
    fn weather_url_trims_trailing_slash() {
        let config = OpenWeatherMapConfig {
            api_key: "k".into(),
            base_url: "http://localhost:1234/data/2.5/".into(),
            ..OpenWeatherMapConfig::default()
        };
        let client = OpenWeatherMapClient::new(config).unwrap();
        let url = client.weather_url(&[("q", "Testville")]).unwrap();

        assert_eq!(url.path(), "/data/2.5/weather");
        assert_eq!(url.query(), Some("q=Testville&appid=k&units=metric"));
    }
}
