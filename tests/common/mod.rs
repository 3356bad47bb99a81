#![allow(dead_code)]

use alerthub::errors::{AlertHubError, Result};
use alerthub::models::earnings::{CalendarPayload, InfoPayload, QuarterlyEps};
use alerthub::models::video::LatestVideo;
use alerthub::models::weather::WeatherReport;
use alerthub::scrapers::base::{EarningsSource, TranscriptSource, VideoSource, WeatherSource};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

/// Per-ticker canned payloads; unknown tickers fail every request
#[derive(Default)]
pub struct FakeEarnings {
    pub calendar: HashMap<String, CalendarPayload>,
    pub info: HashMap<String, InfoPayload>,
    pub quarterly: HashMap<String, Vec<QuarterlyEps>>,
    pub calls: Mutex<Vec<String>>,
}

impl FakeEarnings {
    fn lookup<T: Clone>(&self, map: &HashMap<String, T>, symbol: &str, what: &str) -> Result<Option<T>> {
        self.calls.lock().unwrap().push(format!("{}:{}", what, symbol));
        match map.get(symbol) {
            Some(payload) => Ok(Some(payload.clone())),
            None => Err(AlertHubError::DataError(format!("no {} for {}", what, symbol))),
        }
    }
}

#[async_trait]
impl EarningsSource for FakeEarnings {
    fn provider(&self) -> &'static str {
        "fake"
    }

    async fn fetch_calendar(&self, symbol: &str) -> Result<Option<CalendarPayload>> {
        self.lookup(&self.calendar, symbol, "calendar")
    }

    async fn fetch_info(&self, symbol: &str) -> Result<Option<InfoPayload>> {
        self.lookup(&self.info, symbol, "info")
    }

    async fn fetch_quarterly(&self, symbol: &str) -> Result<Option<Vec<QuarterlyEps>>> {
        self.lookup(&self.quarterly, symbol, "quarterly")
    }
}

/// Latest video per channel; `None` entries answer with no items
#[derive(Default)]
pub struct FakeVideos {
    pub latest: Mutex<HashMap<String, Option<LatestVideo>>>,
}

impl FakeVideos {
    pub fn set(&self, channel_id: &str, video_id: &str, title: &str) {
        self.latest.lock().unwrap().insert(
            channel_id.to_string(),
            Some(LatestVideo {
                channel_id: channel_id.to_string(),
                channel_name: format!("Channel {}", channel_id),
                title: title.to_string(),
                published_at: "2025-06-10T12:00:00Z".to_string(),
                url: format!("https://www.youtube.com/watch?v={}", video_id),
            }),
        );
    }
}

#[async_trait]
impl VideoSource for FakeVideos {
    async fn latest_video(&self, channel_id: &str) -> Result<Option<LatestVideo>> {
        match self.latest.lock().unwrap().get(channel_id) {
            Some(video) => Ok(video.clone()),
            None => Err(AlertHubError::DataError(format!("unknown channel {}", channel_id))),
        }
    }
}

/// Transcripts per video id; missing ids fail
#[derive(Default)]
pub struct FakeTranscripts {
    pub texts: HashMap<String, String>,
    pub requested: Mutex<Vec<String>>,
}

#[async_trait]
impl TranscriptSource for FakeTranscripts {
    async fn fetch_transcript(&self, video_id: &str, _languages: &[String]) -> Result<String> {
        self.requested.lock().unwrap().push(video_id.to_string());
        self.texts
            .get(video_id)
            .cloned()
            .ok_or_else(|| AlertHubError::TranscriptError("Subtitles are disabled".to_string()))
    }
}

pub struct FakeWeather {
    pub report: Option<WeatherReport>,
}

#[async_trait]
impl WeatherSource for FakeWeather {
    async fn current_weather(&self, city: &str) -> Result<WeatherReport> {
        self.report
            .clone()
            .map(|r| WeatherReport { city: city.to_string(), ..r })
            .ok_or_else(|| AlertHubError::DataError("service down".to_string()))
    }
}
