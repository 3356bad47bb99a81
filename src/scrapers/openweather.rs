use crate::errors::{AlertHubError, Result};
use crate::models::weather::WeatherReport;
use crate::scrapers::base::WeatherSource;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

pub const WEATHER_URL: &str = "https://api.openweathermap.org/data/2.5/weather";

#[derive(Deserialize)]
struct WeatherResponse {
    main: MainNode,
    #[serde(default)]
    weather: Vec<ConditionNode>,
    rain: Option<RainNode>,
}

#[derive(Deserialize)]
struct MainNode {
    temp: f64,
    feels_like: f64,
    humidity: i64,
}

#[derive(Deserialize)]
struct ConditionNode {
    description: String,
}

#[derive(Deserialize)]
struct RainNode {
    #[serde(rename = "1h")]
    one_hour: Option<f64>,
}

/// OpenWeatherMap current weather client
pub struct OpenWeatherApi {
    client: Client,
    api_key: String,
    url: String,
}

impl OpenWeatherApi {
    pub fn new(api_key: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(AlertHubError::RequestError)?;

        Ok(Self {
            client,
            api_key: api_key.to_string(),
            url: WEATHER_URL.to_string(),
        })
    }

    pub fn with_url(mut self, url: &str) -> Self {
        self.url = url.to_string();
        self
    }
}

#[async_trait]
impl WeatherSource for OpenWeatherApi {
    async fn current_weather(&self, city: &str) -> Result<WeatherReport> {
        let response = self
            .client
            .get(&self.url)
            .query(&[
                ("q", city),
                ("appid", self.api_key.as_str()),
                ("units", "metric"),
                ("lang", "en"),
            ])
            .send()
            .await?
            .error_for_status()?;

        let data: WeatherResponse = response.json().await?;
        let description = data
            .weather
            .into_iter()
            .next()
            .map(|w| w.description)
            .ok_or_else(|| AlertHubError::DataError(format!("No weather conditions for {}", city)))?;

        Ok(WeatherReport {
            city: city.to_string(),
            temp: data.main.temp,
            feels_like: data.main.feels_like,
            humidity: data.main.humidity,
            description,
            rain_1h: data.rain.and_then(|r| r.one_hour).unwrap_or(0.0),
        })
    }
}
