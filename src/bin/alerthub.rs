use alerthub::config::{
    parse_alert_time, parse_timezone, require_env, EarningsConfig, VideoWatchConfig, WeatherConfig,
};
use alerthub::scrapers::openweather::OpenWeatherApi;
use alerthub::scrapers::transcript::CaptionTranscripts;
use alerthub::scrapers::yahoo::YahooFinanceScraper;
use alerthub::scrapers::youtube::YouTubeDataApi;
use alerthub::services::earnings_service::EarningsService;
use alerthub::services::video_service::VideoWatchService;
use alerthub::services::weather_service::WeatherService;

use anyhow::{Context, Result};
use clap::{App, Arg, ArgMatches, SubCommand};
use log::info;
use std::sync::Arc;
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let app = App::new("AlertHub")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Earnings calendar, new video transcripts and daily weather alerts");

    // 在开发模式下添加调试参数
    #[cfg(debug_assertions)]
    let app = app
        .arg(
            Arg::with_name("debug")
                .long("debug")
                .help("Enable debug mode")
                .takes_value(false),
        )
        .arg(
            Arg::with_name("debug-limit")
                .long("debug-limit")
                .help("Limit the number of tickers to process in debug mode")
                .takes_value(true)
                .default_value("2"),
        );

    let app = app
        .subcommand(
            SubCommand::with_name("earnings")
                .about("Build the upcoming earnings calendar spreadsheet")
                .arg(
                    Arg::with_name("tickers")
                        .short('t')
                        .long("tickers")
                        .value_name("TICKERS")
                        .help("Comma separated ticker list (defaults to the built-in watch list)")
                        .takes_value(true),
                )
                .arg(
                    Arg::with_name("output")
                        .short('o')
                        .long("output")
                        .value_name("FILE")
                        .help("Spreadsheet path")
                        .takes_value(true)
                        .default_value("output/earnings_calendar.xlsx"),
                )
                .arg(
                    Arg::with_name("delay-ms")
                        .long("delay-ms")
                        .value_name("MILLIS")
                        .help("Pause between tickers")
                        .takes_value(true)
                        .default_value("1000"),
                ),
        )
        .subcommand(
            SubCommand::with_name("youtube")
                .about("Detect new uploads and save their transcripts")
                .arg(
                    Arg::with_name("channels")
                        .long("channels")
                        .value_name("FILE")
                        .takes_value(true)
                        .default_value("channel_ids.txt"),
                )
                .arg(
                    Arg::with_name("history")
                        .long("history")
                        .value_name("FILE")
                        .takes_value(true)
                        .default_value("history.json"),
                )
                .arg(
                    Arg::with_name("output-dir")
                        .long("output-dir")
                        .value_name("DIR")
                        .takes_value(true)
                        .default_value("."),
                ),
        )
        .subcommand(
            SubCommand::with_name("weather")
                .about("Write a daily weather alert")
                .arg(
                    Arg::with_name("city")
                        .short('c')
                        .long("city")
                        .takes_value(true)
                        .default_value("San Jose"),
                )
                .arg(
                    Arg::with_name("at")
                        .long("at")
                        .value_name("HH:MM")
                        .help("Local time of the daily alert")
                        .takes_value(true)
                        .default_value("09:00"),
                )
                .arg(
                    Arg::with_name("timezone")
                        .long("timezone")
                        .value_name("TZ")
                        .takes_value(true)
                        .default_value("America/Los_Angeles"),
                )
                .arg(
                    Arg::with_name("alerts-file")
                        .long("alerts-file")
                        .value_name("FILE")
                        .takes_value(true)
                        .default_value("weather_alerts.txt"),
                )
                .arg(
                    Arg::with_name("once")
                        .long("once")
                        .help("Write one alert and exit")
                        .takes_value(false),
                ),
        );

    let matches = app.get_matches();

    #[cfg(debug_assertions)]
    let debug_mode = matches.is_present("debug");
    #[cfg(not(debug_assertions))]
    let debug_mode = false;

    #[cfg(debug_assertions)]
    let debug_ticker_limit = matches
        .value_of("debug-limit")
        .unwrap_or("2")
        .parse::<usize>()
        .unwrap_or(2);
    #[cfg(not(debug_assertions))]
    let debug_ticker_limit = usize::MAX;

    match matches.subcommand() {
        Some(("earnings", sub)) => run_earnings(sub, debug_mode, debug_ticker_limit).await,
        Some(("youtube", sub)) => run_youtube(sub).await,
        Some(("weather", sub)) => run_weather(sub).await,
        _ => {
            info!("No command specified. Use --help for usage information.");
            Ok(())
        }
    }
}

async fn run_earnings(matches: &ArgMatches, debug_mode: bool, debug_ticker_limit: usize) -> Result<()> {
    let delay_ms = matches
        .value_of("delay-ms")
        .unwrap_or("1000")
        .parse::<u64>()
        .context("--delay-ms must be a number of milliseconds")?;

    let mut config = EarningsConfig::new()
        .with_debug_mode(debug_mode)
        .with_debug_ticker_limit(debug_ticker_limit)
        .with_rate_limit_delay(Duration::from_millis(delay_ms));
    if let Some(output) = matches.value_of("output") {
        config = config.with_output_file(output);
    }
    if let Some(tickers) = matches.value_of("tickers") {
        config = config.with_tickers(tickers.split(','));
    }

    let scraper = YahooFinanceScraper::new().context("Failed to create Yahoo Finance client")?;
    let service = EarningsService::new(config, Arc::new(scraper));
    let records = service.run().await.context("Earnings calendar export failed")?;
    info!("Processed {} tickers", records.len());
    Ok(())
}

async fn run_youtube(matches: &ArgMatches) -> Result<()> {
    let mut config = VideoWatchConfig::new();
    if let Some(path) = matches.value_of("channels") {
        config = config.with_channels_file(path);
    }
    if let Some(path) = matches.value_of("history") {
        config = config.with_history_file(path);
    }
    if let Some(dir) = matches.value_of("output-dir") {
        config = config.with_output_dir(dir);
    }

    let api_key = require_env("YOUTUBE_API_KEY")?;
    let videos = YouTubeDataApi::new(&api_key).context("Failed to create YouTube client")?;
    let transcripts = CaptionTranscripts::new().context("Failed to create transcript client")?;

    let service = VideoWatchService::new(config, Arc::new(videos), Arc::new(transcripts));
    let summary = service.run().await.context("Video watch run failed")?;
    info!(
        "Results saved in 'new_videos.html' and 'new_videos.txt' ({} new)",
        summary.new_videos.len()
    );
    Ok(())
}

async fn run_weather(matches: &ArgMatches) -> Result<()> {
    let mut config = WeatherConfig::new();
    if let Some(city) = matches.value_of("city") {
        config = config.with_city(city);
    }
    if let Some(at) = matches.value_of("at") {
        config = config.with_alert_time(parse_alert_time(at)?);
    }
    if let Some(tz) = matches.value_of("timezone") {
        config = config.with_timezone(parse_timezone(tz)?);
    }
    if let Some(path) = matches.value_of("alerts-file") {
        config = config.with_alerts_file(path);
    }

    let api_key = require_env("OPENWEATHER_API_KEY")?;
    let source = OpenWeatherApi::new(&api_key).context("Failed to create OpenWeather client")?;
    let service = WeatherService::new(config, Arc::new(source));

    if matches.is_present("once") {
        service.run_once().await?;
        return Ok(());
    }
    service.run_forever().await?;
    Ok(())
}
