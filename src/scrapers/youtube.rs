use crate::errors::{AlertHubError, Result};
use crate::models::video::LatestVideo;
use crate::scrapers::base::VideoSource;
use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

pub const SEARCH_URL: &str = "https://www.googleapis.com/youtube/v3/search";

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Deserialize)]
struct SearchItem {
    id: SearchItemId,
    snippet: Snippet,
}

#[derive(Deserialize)]
struct SearchItemId {
    #[serde(rename = "videoId")]
    video_id: String,
}

#[derive(Deserialize)]
struct Snippet {
    #[serde(rename = "channelTitle")]
    channel_title: String,
    title: String,
    #[serde(rename = "publishedAt", default)]
    published_at: String,
}

/// YouTube Data API v3 search client
pub struct YouTubeDataApi {
    client: Client,
    api_key: String,
    search_url: String,
}

impl YouTubeDataApi {
    pub fn new(api_key: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(AlertHubError::RequestError)?;

        Ok(Self {
            client,
            api_key: api_key.to_string(),
            search_url: SEARCH_URL.to_string(),
        })
    }

    pub fn with_search_url(mut self, url: &str) -> Self {
        self.search_url = url.to_string();
        self
    }
}

pub fn watch_url(video_id: &str) -> String {
    format!("https://www.youtube.com/watch?v={}", video_id)
}

#[async_trait]
impl VideoSource for YouTubeDataApi {
    async fn latest_video(&self, channel_id: &str) -> Result<Option<LatestVideo>> {
        let response = self
            .client
            .get(&self.search_url)
            .query(&[
                ("part", "snippet"),
                ("channelId", channel_id),
                ("order", "date"),
                ("maxResults", "1"),
                ("type", "video"),
                ("key", self.api_key.as_str()),
            ])
            .send()
            .await?
            .error_for_status()?;

        let data: SearchResponse = response.json().await?;
        let item = match data.items.into_iter().next() {
            Some(item) => item,
            None => {
                debug!("No videos returned for channel {}", channel_id);
                return Ok(None);
            }
        };

        Ok(Some(LatestVideo {
            channel_id: channel_id.to_string(),
            channel_name: item.snippet.channel_title,
            title: item.snippet.title,
            published_at: item.snippet.published_at,
            url: watch_url(&item.id.video_id),
        }))
    }
}
