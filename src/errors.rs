use thiserror::Error;
use std::num::ParseIntError;

#[derive(Error, Debug)]
pub enum AlertHubError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("HTTP request error: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Date parsing error: {0}")]
    DateError(#[from] chrono::ParseError),

    #[error("Excel writing error: {0}")]
    XlsxError(#[from] rust_xlsxwriter::XlsxError),

    #[error("Excel parsing error: {0}")]
    ExcelError(#[from] calamine::Error),

    #[error("Transcript error: {0}")]
    TranscriptError(String),

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("Export error: {0}")]
    ExportError(String),

    #[error("Data error: {0}")]
    DataError(String),

    #[error("Parse int error: {0}")]
    ParseIntError(#[from] ParseIntError),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

pub type Result<T> = std::result::Result<T, AlertHubError>;

impl From<String> for AlertHubError {
    fn from(s: String) -> Self {
        AlertHubError::Unknown(s)
    }
}

impl From<&str> for AlertHubError {
    fn from(s: &str) -> Self {
        AlertHubError::Unknown(s.to_string())
    }
}
