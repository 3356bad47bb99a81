use crate::errors::Result;
use log::info;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Last seen video per channel, persisted as a flat JSON object
#[derive(Debug, Default, Clone, PartialEq)]
pub struct VideoHistory {
    entries: BTreeMap<String, String>,
}

impl VideoHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// A missing file is an empty history
    pub fn load_from_file(path: &str) -> Result<Self> {
        if !Path::new(path).exists() {
            info!("No history at {}, starting fresh", path);
            return Ok(Self::new());
        }

        let content = fs::read_to_string(path)?;
        let entries: BTreeMap<String, String> = serde_json::from_str(&content)?;
        info!("Loaded history for {} channels from {}", entries.len(), path);
        Ok(Self { entries })
    }

    pub fn save_to_file(&self, path: &str) -> Result<()> {
        if let Some(parent) = Path::new(path).parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(path, serde_json::to_string_pretty(&self.entries)?)?;
        Ok(())
    }

    pub fn last_video(&self, channel_id: &str) -> Option<&str> {
        self.entries.get(channel_id).map(String::as_str)
    }

    /// Record the latest video of a channel; returns whether it was unseen
    pub fn record(&mut self, channel_id: &str, video_id: &str) -> bool {
        if self.last_video(channel_id) == Some(video_id) {
            return false;
        }
        self.entries.insert(channel_id.to_string(), video_id.to_string());
        true
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
