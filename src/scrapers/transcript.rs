use crate::errors::{AlertHubError, Result};
use crate::scrapers::base::TranscriptSource;
use async_trait::async_trait;
use log::debug;
use yt_transcript_rs::api::YouTubeTranscriptApi;

/// Transcript fetcher backed by the public caption tracks
pub struct CaptionTranscripts {
    api: YouTubeTranscriptApi,
}

impl CaptionTranscripts {
    pub fn new() -> Result<Self> {
        let api = YouTubeTranscriptApi::new(None, None, None)
            .map_err(|e| AlertHubError::TranscriptError(e.to_string()))?;
        Ok(Self { api })
    }
}

#[async_trait]
impl TranscriptSource for CaptionTranscripts {
    async fn fetch_transcript(&self, video_id: &str, languages: &[String]) -> Result<String> {
        let languages: Vec<&str> = languages.iter().map(String::as_str).collect();
        let transcript = self
            .api
            .fetch_transcript(video_id, &languages, false)
            .await
            .map_err(|e| AlertHubError::TranscriptError(e.to_string()))?;

        debug!(
            "Fetched {} transcript snippets for {} ({})",
            transcript.snippets.len(),
            video_id,
            transcript.language_code
        );
        Ok(transcript
            .snippets
            .iter()
            .map(|s| s.text.as_str())
            .collect::<Vec<_>>()
            .join(" "))
    }
}
