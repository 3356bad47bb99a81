use crate::models::earnings::{CalendarPayload, InfoPayload, QuarterlyEps};
use crate::models::video::LatestVideo;
use crate::models::weather::WeatherReport;
use crate::errors::Result;
use async_trait::async_trait;

/// Base trait for earnings data providers.
///
/// `Ok(None)` means the provider answered but had nothing for the symbol;
/// `Err` is a transport or parse failure.
#[async_trait]
pub trait EarningsSource {
    /// Provider name used in logs
    fn provider(&self) -> &'static str;

    async fn fetch_calendar(&self, symbol: &str) -> Result<Option<CalendarPayload>>;

    async fn fetch_info(&self, symbol: &str) -> Result<Option<InfoPayload>>;

    /// Reported quarters, most recent first
    async fn fetch_quarterly(&self, symbol: &str) -> Result<Option<Vec<QuarterlyEps>>>;
}

/// Looks up the newest upload of a channel
#[async_trait]
pub trait VideoSource {
    async fn latest_video(&self, channel_id: &str) -> Result<Option<LatestVideo>>;
}

/// Fetches the spoken text of a video in the first available language
#[async_trait]
pub trait TranscriptSource {
    async fn fetch_transcript(&self, video_id: &str, languages: &[String]) -> Result<String>;
}

#[async_trait]
pub trait WeatherSource {
    async fn current_weather(&self, city: &str) -> Result<WeatherReport>;
}
