use crate::errors::{AlertHubError, Result};
use chrono::NaiveTime;
use chrono_tz::Tz;
use std::env;
use std::time::Duration;

pub const DEFAULT_TICKERS: [&str; 14] = [
    "NVDA", "MSFT", "AAPL", "GOOGL", "META", "NFLX", "SPOT", "PLTR", "AVGO", "HOOD", "RKLB",
    "ORCL", "TSLA", "AEVA",
];

#[derive(Debug, Clone)]
pub struct EarningsConfig {
    pub debug_mode: bool,
    pub debug_ticker_limit: usize,
    pub tickers: Vec<String>,
    pub output_file: String,
    pub rate_limit_delay: Duration,
}

impl EarningsConfig {
    pub fn new() -> Self {
        Self {
            debug_mode: false,
            debug_ticker_limit: 2,
            tickers: DEFAULT_TICKERS.iter().map(|t| t.to_string()).collect(),
            output_file: "output/earnings_calendar.xlsx".to_string(),
            rate_limit_delay: Duration::from_secs(1),
        }
    }

    pub fn with_debug_mode(mut self, debug_mode: bool) -> Self {
        self.debug_mode = debug_mode;
        self
    }

    pub fn with_debug_ticker_limit(mut self, limit: usize) -> Self {
        self.debug_ticker_limit = limit;
        self
    }

    /// Symbols are trimmed and uppercased; empty entries are dropped
    pub fn with_tickers<I, S>(mut self, tickers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.tickers = tickers
            .into_iter()
            .map(|t| t.as_ref().trim().to_uppercase())
            .filter(|t| !t.is_empty())
            .collect();
        self
    }

    pub fn with_output_file(mut self, path: &str) -> Self {
        self.output_file = path.to_string();
        self
    }

    pub fn with_rate_limit_delay(mut self, delay: Duration) -> Self {
        self.rate_limit_delay = delay;
        self
    }

    /// Tickers this run will actually process
    pub fn effective_tickers(&self) -> &[String] {
        if self.debug_mode && self.tickers.len() > self.debug_ticker_limit {
            &self.tickers[..self.debug_ticker_limit]
        } else {
            &self.tickers
        }
    }
}

impl Default for EarningsConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone)]
pub struct VideoWatchConfig {
    pub channels_file: String,
    pub history_file: String,
    pub output_dir: String,
    pub languages: Vec<String>,
}

impl VideoWatchConfig {
    pub fn new() -> Self {
        Self {
            channels_file: "channel_ids.txt".to_string(),
            history_file: "history.json".to_string(),
            output_dir: ".".to_string(),
            languages: vec!["ko".to_string(), "en".to_string()],
        }
    }

    pub fn with_channels_file(mut self, path: &str) -> Self {
        self.channels_file = path.to_string();
        self
    }

    pub fn with_history_file(mut self, path: &str) -> Self {
        self.history_file = path.to_string();
        self
    }

    pub fn with_output_dir(mut self, dir: &str) -> Self {
        self.output_dir = dir.to_string();
        self
    }

    pub fn with_languages(mut self, languages: Vec<String>) -> Self {
        self.languages = languages;
        self
    }
}

impl Default for VideoWatchConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone)]
pub struct WeatherConfig {
    pub city: String,
    pub alert_time: NaiveTime,
    pub timezone: Tz,
    pub alerts_file: String,
    pub poll_interval: Duration,
}

impl WeatherConfig {
    pub fn new() -> Self {
        Self {
            city: "San Jose".to_string(),
            alert_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap_or(NaiveTime::MIN),
            timezone: chrono_tz::America::Los_Angeles,
            alerts_file: "weather_alerts.txt".to_string(),
            poll_interval: Duration::from_secs(60),
        }
    }

    pub fn with_city(mut self, city: &str) -> Self {
        self.city = city.to_string();
        self
    }

    pub fn with_alert_time(mut self, at: NaiveTime) -> Self {
        self.alert_time = at;
        self
    }

    pub fn with_timezone(mut self, tz: Tz) -> Self {
        self.timezone = tz;
        self
    }

    pub fn with_alerts_file(mut self, path: &str) -> Self {
        self.alerts_file = path.to_string();
        self
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Read a required secret from the environment (after `.env` has been loaded)
pub fn require_env(key: &str) -> Result<String> {
    match env::var(key) {
        Ok(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(AlertHubError::ConfigError(format!(
            "{} environment variable not set",
            key
        ))),
    }
}

/// Parse `HH:MM` into a time of day
pub fn parse_alert_time(s: &str) -> Result<NaiveTime> {
    let (h, m) = s
        .trim()
        .split_once(':')
        .ok_or_else(|| AlertHubError::ConfigError(format!("Invalid alert time: {}", s)))?;
    let hour = h.parse::<u32>()?;
    let minute = m.parse::<u32>()?;
    NaiveTime::from_hms_opt(hour, minute, 0)
        .ok_or_else(|| AlertHubError::ConfigError(format!("Invalid alert time: {}", s)))
}

/// Parse an IANA zone name such as `America/Los_Angeles`
pub fn parse_timezone(s: &str) -> Result<Tz> {
    s.parse::<Tz>()
        .map_err(|e| AlertHubError::ConfigError(format!("Invalid timezone {}: {}", s, e)))
}
