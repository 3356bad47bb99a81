mod wire;

use crate::errors::{AlertHubError, Result};
use crate::models::earnings::{CalendarPayload, InfoPayload, QuarterlyEps};
use crate::scrapers::base::EarningsSource;
use async_trait::async_trait;
use log::{debug, info};
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::sync::Mutex;
use std::time::{Duration, Instant};
use wire::{CalendarEnvelope, CalendarRow, QuoteEnvelope, QuoteRow, SummaryEnvelope, SummaryResult};

pub const DEFAULT_BASE_URL: &str = "https://query1.finance.yahoo.com";

const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Yahoo Finance earnings data scraper
pub struct YahooFinanceScraper {
    client: Client,
    base_url: String,
    crumb: Option<String>,
    min_interval: Duration,
    last_request: Mutex<Option<Instant>>,
}

impl YahooFinanceScraper {
    pub fn new() -> Result<Self> {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Point every endpoint at another host, e.g. a mock server
    pub fn with_base_url(base_url: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .user_agent(USER_AGENT)
            .build()
            .map_err(AlertHubError::RequestError)?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            crumb: None,
            min_interval: Duration::from_millis(250),
            last_request: Mutex::new(None),
        })
    }

    pub fn with_crumb(mut self, crumb: &str) -> Self {
        self.crumb = Some(crumb.to_string());
        self
    }

    pub fn with_min_interval(mut self, interval: Duration) -> Self {
        self.min_interval = interval;
        self
    }

    async fn wait_for_rate_limit(&self) {
        let now = Instant::now();
        let should_wait = {
            let mut last = match self.last_request.lock() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };
            let should_wait = match *last {
                Some(instant) => {
                    let elapsed = instant.elapsed();
                    self.min_interval.checked_sub(elapsed).filter(|d| !d.is_zero())
                }
                None => None,
            };
            *last = Some(now);
            should_wait
        };

        if let Some(wait_time) = should_wait {
            debug!("Waiting {:?} to respect the request interval", wait_time);
            tokio::time::sleep(wait_time).await;
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str, query: &[(&str, &str)]) -> Result<T> {
        self.wait_for_rate_limit().await;

        let mut request = self
            .client
            .get(format!("{}{}", self.base_url, path))
            .query(query);
        if let Some(crumb) = &self.crumb {
            request = request.query(&[("crumb", crumb.as_str())]);
        }

        let response = request.send().await?.error_for_status()?;
        let text = response.text().await?;
        Ok(serde_json::from_str(&text)?)
    }

    async fn calendar_row(&self, symbol: &str) -> Result<Option<CalendarRow>> {
        let envelope: CalendarEnvelope = self
            .get_json(
                "/v7/finance/calendar/earnings",
                &[
                    ("symbol", symbol),
                    ("formatted", "true"),
                    ("lang", "en-US"),
                    ("region", "US"),
                    ("corsDomain", "finance.yahoo.com"),
                ],
            )
            .await?;

        Ok(envelope
            .earnings
            .and_then(|e| e.result)
            .unwrap_or_default()
            .into_iter()
            .find(|row| row.ticker.as_deref() == Some(symbol)))
    }

    async fn quote_row(&self, symbol: &str) -> Result<Option<QuoteRow>> {
        let envelope: QuoteEnvelope = self
            .get_json("/v7/finance/quote", &[("symbols", symbol)])
            .await?;

        Ok(envelope
            .quote_response
            .and_then(|q| q.result)
            .unwrap_or_default()
            .into_iter()
            .find(|row| row.symbol.as_deref() == Some(symbol)))
    }

    async fn quote_summary(&self, symbol: &str, modules: &str) -> Result<Option<SummaryResult>> {
        let envelope: SummaryEnvelope = self
            .get_json(
                &format!("/v10/finance/quoteSummary/{}", symbol),
                &[("modules", modules)],
            )
            .await?;

        Ok(envelope
            .quote_summary
            .and_then(|s| s.result)
            .and_then(|r| r.into_iter().next()))
    }
}

/// Keep whichever half succeeded; fail only when both requests failed.
fn merge_halves<A, B>(
    symbol: &str,
    first: Result<Option<A>>,
    second: Result<Option<B>>,
) -> Result<(Option<A>, Option<B>)> {
    match (first, second) {
        (Err(e), Err(other)) => {
            debug!("{}: second request also failed: {}", symbol, other);
            Err(e)
        }
        (Err(e), Ok(b)) => {
            debug!("{}: first request failed: {}", symbol, e);
            Ok((None, b))
        }
        (Ok(a), Err(e)) => {
            debug!("{}: second request failed: {}", symbol, e);
            Ok((a, None))
        }
        (Ok(a), Ok(b)) => Ok((a, b)),
    }
}

#[async_trait]
impl EarningsSource for YahooFinanceScraper {
    fn provider(&self) -> &'static str {
        "Yahoo Finance"
    }

    async fn fetch_calendar(&self, symbol: &str) -> Result<Option<CalendarPayload>> {
        let row = self.calendar_row(symbol).await;
        let events = self.quote_summary(symbol, "calendarEvents").await;
        let (row, events) = merge_halves(symbol, row, events)?;

        let earnings_dates = events
            .and_then(|r| r.calendar_events)
            .and_then(|c| c.earnings)
            .and_then(|e| e.earnings_date)
            .unwrap_or_default();

        if row.is_none() && earnings_dates.is_empty() {
            return Ok(None);
        }

        let payload = match row {
            Some(row) => CalendarPayload {
                eps_estimate: row.eps_estimate,
                quarter: row.quarter,
                year: row.year,
                earnings_dates,
            },
            None => CalendarPayload {
                earnings_dates,
                ..Default::default()
            },
        };
        info!("Found calendar data for {}", symbol);
        Ok(Some(payload))
    }

    async fn fetch_info(&self, symbol: &str) -> Result<Option<InfoPayload>> {
        let stats = self.quote_summary(symbol, "defaultKeyStatistics").await;
        let quote = self.quote_row(symbol).await;
        let (stats, quote) = merge_halves(symbol, stats, quote)?;

        let stats = stats.and_then(|r| r.default_key_statistics);
        if stats.is_none() && quote.is_none() {
            return Ok(None);
        }

        let mut payload = InfoPayload::default();
        if let Some(stats) = stats {
            payload.forward_eps = stats.forward_eps;
            payload.trailing_eps = stats.trailing_eps;
            payload.most_recent_quarter = stats.most_recent_quarter;
        }
        if let Some(quote) = quote {
            payload.eps_forward = quote.eps_forward;
            payload.eps_trailing_twelve_months = quote.eps_trailing_twelve_months;
            payload.earnings_dates = [
                quote.earnings_timestamp,
                quote.earnings_timestamp_start,
                quote.earnings_timestamp_end,
            ]
            .into_iter()
            .flatten()
            .collect();
        }
        Ok(Some(payload))
    }

    async fn fetch_quarterly(&self, symbol: &str) -> Result<Option<Vec<QuarterlyEps>>> {
        let result = self.quote_summary(symbol, "earnings").await?;

        let mut quarters: Vec<QuarterlyEps> = result
            .and_then(|r| r.earnings)
            .and_then(|e| e.earnings_chart)
            .and_then(|c| c.quarterly)
            .unwrap_or_default()
            .into_iter()
            .map(|q| QuarterlyEps {
                period: q.date,
                eps: q.actual,
            })
            .collect();

        if quarters.is_empty() {
            return Ok(None);
        }
        // Yahoo lists oldest first
        quarters.reverse();
        Ok(Some(quarters))
    }
}
