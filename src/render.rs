//! Plain-text and HTML bodies for the files the video and weather jobs write.
//!
//! Everything here is pure: timestamps are passed in by the caller.

use crate::models::video::NewVideo;
use crate::models::weather::WeatherReport;
use chrono::NaiveDateTime;

pub const NO_NEW_VIDEOS: &str = "No new videos found.";
pub const WEATHER_UNAVAILABLE: &str = "Weather information cannot be obtained.";

const SUMMARY_PROMPT: [&str; 4] = [
    "- Summarize the above financial and investment-related article into exactly 10 concise bullet points.",
    "- Each point should highlight key facts, trends, or implications related to stocks, markets, or companies mentioned in the article.",
    "- Use clear, professional language suitable for investors. Include relevant numbers (e.g., % changes, EPS, revenue) shown in the article.",
    "- Avoid repetition. Maintain chronological or logical order.",
];

fn rule(c: char) -> String {
    c.to_string().repeat(50)
}

/// Body of `transcripts/<date>_<channel>_<title>.txt`
pub fn transcript_file(
    title: &str,
    channel_id: &str,
    url: &str,
    transcript: &str,
    now: NaiveDateTime,
) -> String {
    let mut out = String::new();
    out.push_str(&format!("Title: {}\n", title));
    out.push_str(&format!("Channel ID: {}\n", channel_id));
    out.push_str(&format!("URL: {}\n", url));
    out.push_str(&format!("Date: {}\n", now.format("%Y-%m-%d %H:%M")));
    out.push_str(&rule('-'));
    out.push_str("\n\nTRANSCRIPT:\n");
    out.push_str(transcript);
    out.push_str("\n\n");
    out.push_str(&rule('='));
    out.push('\n');
    for line in SUMMARY_PROMPT {
        out.push_str(line);
        out.push('\n');
    }
    out
}

pub fn new_videos_html(videos: &[NewVideo]) -> String {
    let mut out = String::from("<!DOCTYPE html>\n<html lang='en'>\n<head>\n");
    out.push_str("<meta charset='UTF-8'>\n<title>New YouTube Videos</title>\n");
    out.push_str("<style>body{font-family:Arial;margin:20px;} a{color:#1976d2;}</style>\n");
    out.push_str("</head>\n<body>\n<h1>New YouTube Videos</h1>\n");

    if videos.is_empty() {
        out.push_str(&format!("<p>{}</p>\n", NO_NEW_VIDEOS));
    }
    for video in videos {
        out.push_str("<div style='margin-bottom:15px;'>\n");
        out.push_str(&format!("<p><strong>[{}]</strong></p>\n", video.timestamp));
        out.push_str(&format!(
            "<p>📺 <a href='{}' target='_blank'>{}</a></p>\n",
            video.url, video.title
        ));
        out.push_str(&format!("<p>📺 Channel: {}</p>\n", video.channel_name));
        out.push_str("</div>\n");
    }

    out.push_str("</body>\n</html>");
    out
}

pub fn new_videos_text(videos: &[NewVideo], checked_at: NaiveDateTime) -> String {
    let mut out = String::from("=== New YouTube Videos Notification ===\n");
    out.push_str(&format!("Check time: {}\n\n", checked_at.format("%Y-%m-%d %H:%M:%S")));

    if videos.is_empty() {
        out.push_str(NO_NEW_VIDEOS);
        out.push('\n');
    }
    for video in videos {
        out.push_str(&format!("[{}]\n", video.timestamp));
        out.push_str(&format!("Title: {}\n", video.title));
        out.push_str(&format!("Link: {}\n", video.url));
        out.push_str(&format!("Channel: {}\n", video.channel_name));
        out.push_str(&format!("Channel ID: {}\n", video.channel_id));
        out.push_str(&rule('-'));
        out.push('\n');
    }
    out
}

// 天气提醒

pub fn clothing_recommendation(temp: f64) -> &'static str {
    if temp < 5.0 {
        "🧥 It's essential to wear a coat!"
    } else if temp < 15.0 {
        "🧥 Wear a thick coat"
    } else if temp < 25.0 {
        "👕 Wear a moderate outfit"
    } else {
        "👕 Wear light clothing"
    }
}

pub fn needs_umbrella(report: &WeatherReport) -> bool {
    report.rain_1h > 0.0
        || ["rain", "snow", "thunder"]
            .iter()
            .any(|word| report.description.contains(word))
}

pub fn weather_message(report: Option<&WeatherReport>) -> String {
    let report = match report {
        Some(report) => report,
        None => return WEATHER_UNAVAILABLE.to_string(),
    };

    let mut message = format!(
        "🌤️ Today's weather alert\n📍 {}\n🌡️ Temperature: {}°C (Feels like: {}°C)\n💧 Humidity: {}%\n☁️ Weather: {}\n{}",
        report.city,
        report.temp,
        report.feels_like,
        report.humidity,
        report.description,
        clothing_recommendation(report.temp),
    );
    if needs_umbrella(report) {
        message.push_str("\n☔ Don't forget to bring an umbrella!");
    }
    message
}

/// One entry of the append-only alerts file
pub fn alert_entry(message: &str, at: NaiveDateTime) -> String {
    format!("[{}]\n{}\n{}\n\n", at.format("%Y-%m-%d %H:%M:%S"), message, rule('='))
}
