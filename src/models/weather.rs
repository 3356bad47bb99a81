use serde::Serialize;

/// Current conditions for one city, metric units
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherReport {
    pub city: String,
    pub temp: f64,
    pub feels_like: f64,
    pub humidity: i64,
    pub description: String,
    /// Rain volume over the last hour in mm, 0 when the API omits it
    pub rain_1h: f64,
}
