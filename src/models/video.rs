use serde::{Deserialize, Serialize};

/// Newest upload of a channel as reported by the search API
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LatestVideo {
    pub channel_id: String,
    pub channel_name: String,
    pub title: String,
    pub published_at: String,
    pub url: String,
}

/// A video seen for the first time during this run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewVideo {
    pub timestamp: String,
    pub url: String,
    pub title: String,
    pub channel_id: String,
    pub channel_name: String,
}

/// Transcript entry written to `video_scripts.json`, keyed by channel id
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoScript {
    pub date: String,
    pub time: String,
    pub title: String,
    pub url: String,
    pub transcript: String,
    pub channel_name: String,
}
