//! Weather tool — current temperature lookup via the Open-Meteo API.
//!
//! Two calls per lookup: geocode the city name, then fetch the current
//! temperature for the coordinates. Both base URLs are injectable so
//! tests can point the tool at a mock server.

use std::collections::HashMap;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use tracing::debug;

use super::base::{require_string, Tool};

const DEFAULT_GEOCODING_BASE: &str = "https://geocoding-api.open-meteo.com";
const DEFAULT_FORECAST_BASE: &str = "https://api.open-meteo.com";

/// Looks up the current temperature for a city.
pub struct GetWeatherTool {
    client: Client,
    geocoding_base: String,
    forecast_base: String,
}

impl GetWeatherTool {
    /// Create a weather tool against the public Open-Meteo API.
    ///
    /// `api_base` overrides both the geocoding and forecast hosts (used
    /// by tests and proxies).
    pub fn new(api_base: Option<String>) -> Self {
        let (geocoding_base, forecast_base) = match api_base {
            Some(base) => (base.clone(), base),
            None => (
                DEFAULT_GEOCODING_BASE.to_string(),
                DEFAULT_FORECAST_BASE.to_string(),
            ),
        };
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(30))
                .build()
                .unwrap_or_default(),
            geocoding_base,
            forecast_base,
        }
    }

    async fn geocode(&self, city: &str) -> anyhow::Result<(f64, f64)> {
        let url = format!(
            "{}/v1/search",
            self.geocoding_base.trim_end_matches('/')
        );
        let resp = self
            .client
            .get(&url)
            .query(&[("name", city), ("count", "1")])
            .send()
            .await
            .map_err(|e| anyhow::anyhow!("geocoding request failed: {e}"))?;

        if !resp.status().is_success() {
            anyhow::bail!("geocoding API returned {}", resp.status());
        }

        let body: Value = resp
            .json()
            .await
            .map_err(|e| anyhow::anyhow!("failed to parse geocoding response: {e}"))?;

        let result = body["results"]
            .as_array()
            .and_then(|r| r.first())
            .ok_or_else(|| anyhow::anyhow!("no location found for '{city}'"))?;

        let lat = result["latitude"]
            .as_f64()
            .ok_or_else(|| anyhow::anyhow!("geocoding response missing latitude"))?;
        let lon = result["longitude"]
            .as_f64()
            .ok_or_else(|| anyhow::anyhow!("geocoding response missing longitude"))?;
        Ok((lat, lon))
    }

    async fn current_temperature(&self, lat: f64, lon: f64) -> anyhow::Result<f64> {
        let url = format!(
            "{}/v1/forecast",
            self.forecast_base.trim_end_matches('/')
        );
        let resp = self
            .client
            .get(&url)
            .query(&[
                ("latitude", lat.to_string()),
                ("longitude", lon.to_string()),
                ("current_weather", "true".to_string()),
            ])
            .send()
            .await
            .map_err(|e| anyhow::anyhow!("forecast request failed: {e}"))?;

        if !resp.status().is_success() {
            anyhow::bail!("forecast API returned {}", resp.status());
        }

        let body: Value = resp
            .json()
            .await
            .map_err(|e| anyhow::anyhow!("failed to parse forecast response: {e}"))?;

        body["current_weather"]["temperature"]
            .as_f64()
            .ok_or_else(|| anyhow::anyhow!("forecast response missing temperature"))
    }
}

#[async_trait]
impl Tool for GetWeatherTool {
    fn name(&self) -> &str {
        "get_weather"
    }

    fn description(&self) -> &str {
        "Get the current temperature in degrees Celsius for a city."
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "city": {
                    "type": "string",
                    "description": "City name, e.g. 'Berlin'"
                }
            },
            "required": ["city"]
        })
    }

    async fn execute(&self, params: HashMap<String, Value>) -> anyhow::Result<String> {
        let city = require_string(&params, "city")?;
        debug!(city = %city, "weather lookup");

        let (lat, lon) = self.geocode(&city).await?;
        let temperature = self.current_temperature(lat, lon).await?;

        Ok(format!("{temperature}"))
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn mock_weather_server(temperature: f64) -> MockServer {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "results": [{ "latitude": 52.52, "longitude": 13.41, "name": "Berlin" }]
            })))
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/v1/forecast"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "current_weather": { "temperature": temperature, "windspeed": 11.2 }
            })))
            .mount(&server)
            .await;

        server
    }

    fn city_params(city: &str) -> HashMap<String, Value> {
        let mut params = HashMap::new();
        params.insert("city".to_string(), json!(city));
        params
    }

    #[tokio::test]
    async fn test_weather_lookup() {
        let server = mock_weather_server(18.5).await;
        let tool = GetWeatherTool::new(Some(server.uri()));

        let result = tool.execute(city_params("Berlin")).await.unwrap();
        assert_eq!(result, "18.5");
    }

    #[tokio::test]
    async fn test_weather_unknown_city() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/search"))
            .and(query_param("name", "Nowhereville"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "results": [] })))
            .mount(&server)
            .await;

        let tool = GetWeatherTool::new(Some(server.uri()));
        let err = tool.execute(city_params("Nowhereville")).await.unwrap_err();
        assert!(err.to_string().contains("no location found"));
    }

    #[tokio::test]
    async fn test_weather_api_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/search"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let tool = GetWeatherTool::new(Some(server.uri()));
        assert!(tool.execute(city_params("Berlin")).await.is_err());
    }

    #[tokio::test]
    async fn test_weather_missing_city_param() {
        let tool = GetWeatherTool::new(None);
        assert!(tool.execute(HashMap::new()).await.is_err());
    }

    #[test]
    fn test_definition_shape() {
        let tool = GetWeatherTool::new(None);
        let def = tool.to_definition();
        assert_eq!(def.function.name, "get_weather");
        assert_eq!(def.function.parameters["required"], json!(["city"]));
    }
}
