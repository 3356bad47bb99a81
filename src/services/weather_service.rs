use crate::config::WeatherConfig;
use crate::errors::Result;
use crate::render;
use crate::scrapers::base::WeatherSource;
use chrono::{DateTime, Local, NaiveDate, TimeZone};
use log::{error, info};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;

/// Daily weather alert written to an append-only text file
pub struct WeatherService {
    config: WeatherConfig,
    source: Arc<dyn WeatherSource + Send + Sync>,
}

impl WeatherService {
    pub fn new(config: WeatherConfig, source: Arc<dyn WeatherSource + Send + Sync>) -> Self {
        Self { config, source }
    }

    pub fn config(&self) -> &WeatherConfig {
        &self.config
    }

    /// Fetch, format and append one alert; returns the message
    pub async fn run_once(&self) -> Result<String> {
        info!("Weather alert running for {}", self.config.city);
        let report = match self.source.current_weather(&self.config.city).await {
            Ok(report) => Some(report),
            Err(e) => {
                error!("Weather data loading failed: {}", e);
                None
            }
        };

        let message = render::weather_message(report.as_ref());
        self.append_alert(&message)?;
        info!("Weather alert saved: {}", self.config.alerts_file);
        Ok(message)
    }

    fn append_alert(&self, message: &str) -> Result<()> {
        if let Some(parent) = Path::new(&self.config.alerts_file).parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.config.alerts_file)?;
        file.write_all(render::alert_entry(message, Local::now().naive_local()).as_bytes())?;
        Ok(())
    }

    /// Whether the alert should fire at `now`, given the last date it fired
    pub fn is_due<Z: TimeZone>(&self, now: &DateTime<Z>, last_fired: Option<NaiveDate>) -> bool {
        let local = now.with_timezone(&self.config.timezone);
        local.time() >= self.config.alert_time && last_fired != Some(local.date_naive())
    }

    /// Run immediately, then once a day at the configured local time
    pub async fn run_forever(&self) -> Result<()> {
        if let Err(e) = self.run_once().await {
            error!("Initial weather alert failed: {}", e);
        }

        // Started past the alert time: first scheduled alert is tomorrow
        let start = chrono::Utc::now().with_timezone(&self.config.timezone);
        let mut last_fired = if start.time() >= self.config.alert_time {
            Some(start.date_naive())
        } else {
            None
        };

        info!(
            "Weather alert bot started (daily at {} {})",
            self.config.alert_time.format("%H:%M"),
            self.config.timezone
        );
        let mut interval = tokio::time::interval(self.config.poll_interval);
        loop {
            interval.tick().await;
            let now = chrono::Utc::now();
            if !self.is_due(&now, last_fired) {
                continue;
            }
            last_fired = Some(now.with_timezone(&self.config.timezone).date_naive());
            if let Err(e) = self.run_once().await {
                error!("Scheduled weather alert failed: {}", e);
            }
        }
    }
}
