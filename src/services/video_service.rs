use crate::config::VideoWatchConfig;
use crate::errors::{AlertHubError, Result};
use crate::history::VideoHistory;
use crate::models::video::{LatestVideo, NewVideo, VideoScript};
use crate::render;
use crate::scrapers::base::{TranscriptSource, VideoSource};
use crate::util::{extract_video_id, sanitize_filename, strip_trailing_parenthetical, truncate_to_bytes};
use chrono::{Local, NaiveDateTime};
use log::{info, warn};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

// NAME_MAX on common filesystems
const MAX_FILENAME_BYTES: usize = 255;

/// `<YYYYMMDD>_<channel>_<title>.txt`, the title cut short to fit a file name
pub fn transcript_filename(channel_name: &str, title: &str, now: NaiveDateTime) -> String {
    let stem = format!(
        "{}_{}_{}",
        now.format("%Y%m%d"),
        sanitize_filename(channel_name),
        sanitize_filename(&strip_trailing_parenthetical(title)),
    );
    format!("{}.txt", truncate_to_bytes(&stem, MAX_FILENAME_BYTES - ".txt".len()))
}

/// Outcome of one pass over the watched channels
#[derive(Debug, Default)]
pub struct WatchSummary {
    pub channels_checked: usize,
    pub new_videos: Vec<NewVideo>,
    pub transcript_files: Vec<PathBuf>,
}

/// Watches channels for new uploads and saves their transcripts
pub struct VideoWatchService {
    config: VideoWatchConfig,
    videos: Arc<dyn VideoSource + Send + Sync>,
    transcripts: Arc<dyn TranscriptSource + Send + Sync>,
}

impl VideoWatchService {
    pub fn new(
        config: VideoWatchConfig,
        videos: Arc<dyn VideoSource + Send + Sync>,
        transcripts: Arc<dyn TranscriptSource + Send + Sync>,
    ) -> Self {
        Self {
            config,
            videos,
            transcripts,
        }
    }

    fn output_path(&self, name: &str) -> PathBuf {
        Path::new(&self.config.output_dir).join(name)
    }

    /// Channel ids, one per line, blank lines skipped
    pub fn load_channel_ids(path: &str) -> Result<Vec<String>> {
        let content = fs::read_to_string(path)?;
        Ok(content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(String::from)
            .collect())
    }

    async fn transcript_text(&self, video_id: &str) -> String {
        match self.transcripts.fetch_transcript(video_id, &self.config.languages).await {
            Ok(text) => text,
            Err(e) => {
                warn!("Transcript unavailable for {}: {}", video_id, e);
                let reason = match e {
                    AlertHubError::TranscriptError(msg) => msg,
                    other => other.to_string(),
                };
                format!("[Transcript Error: {}]", reason)
            }
        }
    }

    fn write_transcript_file(
        &self,
        channel_id: &str,
        video: &LatestVideo,
        transcript: &str,
        now: NaiveDateTime,
    ) -> Result<PathBuf> {
        let dir = self.output_path("transcripts");
        fs::create_dir_all(&dir)?;

        let path = dir.join(transcript_filename(&video.channel_name, &video.title, now));
        fs::write(
            &path,
            render::transcript_file(&video.title, channel_id, &video.url, transcript, now),
        )?;
        Ok(path)
    }

    pub async fn run(&self) -> Result<WatchSummary> {
        let channel_ids = Self::load_channel_ids(&self.config.channels_file)?;
        let mut history = VideoHistory::load_from_file(&self.config.history_file)?;
        let mut summary = WatchSummary {
            channels_checked: channel_ids.len(),
            ..Default::default()
        };
        let mut scripts: BTreeMap<String, VideoScript> = BTreeMap::new();

        for channel_id in &channel_ids {
            let video = match self.videos.latest_video(channel_id).await {
                Ok(Some(video)) => video,
                Ok(None) => {
                    info!("No videos found for channel {}", channel_id);
                    continue;
                }
                Err(e) => {
                    warn!("Failed to look up channel {}: {}", channel_id, e);
                    continue;
                }
            };

            let video_id = match extract_video_id(&video.url) {
                Some(id) => id,
                None => {
                    warn!("Cannot extract a video id from {}", video.url);
                    continue;
                }
            };
            if !history.record(channel_id, &video_id) {
                continue;
            }

            let transcript = self.transcript_text(&video_id).await;
            let now = Local::now().naive_local();

            summary.new_videos.push(NewVideo {
                timestamp: now.format("%Y-%m-%dT%H:%M:%S%.6f").to_string(),
                url: video.url.clone(),
                title: video.title.clone(),
                channel_id: channel_id.clone(),
                channel_name: video.channel_name.clone(),
            });
            scripts.insert(
                channel_id.clone(),
                VideoScript {
                    date: now.format("%-m/%-d/%y").to_string(),
                    time: now.format("%H:%M:%S").to_string(),
                    title: video.title.clone(),
                    url: video.url.clone(),
                    transcript: transcript.clone(),
                    channel_name: video.channel_name.clone(),
                },
            );

            info!("New video detected: {} ({})", video.title, video.channel_name);
            match self.write_transcript_file(channel_id, &video, &transcript, now) {
                Ok(path) => {
                    info!("Transcript saved: {}", path.display());
                    summary.transcript_files.push(path);
                }
                Err(e) => warn!("Failed to save transcript for {}: {}", video.url, e),
            }
        }

        history.save_to_file(&self.config.history_file)?;
        fs::create_dir_all(&self.config.output_dir)?;
        fs::write(
            self.output_path("video_scripts.json"),
            serde_json::to_string_pretty(&scripts)?,
        )?;
        fs::write(
            self.output_path("new_videos.html"),
            render::new_videos_html(&summary.new_videos),
        )?;
        fs::write(
            self.output_path("new_videos.txt"),
            render::new_videos_text(&summary.new_videos, Local::now().naive_local()),
        )?;

        info!(
            "Checked {} channels, found {} new videos",
            summary.channels_checked,
            summary.new_videos.len()
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, 10)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_transcript_filename() {
        assert_eq!(
            transcript_filename("Market/Talk", "Fed day: live? (Market Talk)", now()),
            "20250610_Market_Talk_Fed day_ live_.txt"
        );
    }

    #[test]
    fn test_long_titles_fit_a_file_name() {
        let name = transcript_filename("경제 채널", &"가".repeat(100), now());
        assert!(name.len() <= MAX_FILENAME_BYTES);
        assert!(name.starts_with("20250610_경제 채널_가"));
        assert!(name.ends_with("가.txt"));
    }
}
