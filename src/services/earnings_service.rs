use crate::config::EarningsConfig;
use crate::errors::Result;
use crate::models::earnings::EarningsRecord;
use crate::scrapers::base::EarningsSource;
use crate::services::earnings_builder::EarningsRecordBuilder;
use crate::services::earnings_sorter::EarningsSorter;
use crate::util::excel_utils;
use chrono::{Local, NaiveDate};
use log::{info, warn};
use std::sync::Arc;

/// Earnings calendar job: scrape, merge, sort and export
pub struct EarningsService {
    config: EarningsConfig,
    source: Arc<dyn EarningsSource + Send + Sync>,
}

impl EarningsService {
    pub fn new(config: EarningsConfig, source: Arc<dyn EarningsSource + Send + Sync>) -> Self {
        Self { config, source }
    }

    pub fn config(&self) -> &EarningsConfig {
        &self.config
    }

    /// A failed fetch counts as an absent source
    fn or_absent<T>(&self, ticker: &str, what: &str, result: Result<Option<T>>) -> Option<T> {
        match result {
            Ok(payload) => payload,
            Err(e) => {
                warn!("{}: {} {} fetch failed: {}", ticker, self.source.provider(), what, e);
                None
            }
        }
    }

    pub async fn scrape_ticker(&self, ticker: &str, today: NaiveDate) -> EarningsRecord {
        info!("Processing {}...", ticker);

        let calendar = self.or_absent(ticker, "calendar", self.source.fetch_calendar(ticker).await);
        let info = self.or_absent(ticker, "info", self.source.fetch_info(ticker).await);
        let quarterly = self.or_absent(ticker, "quarterly", self.source.fetch_quarterly(ticker).await);

        EarningsRecordBuilder::new(today).build(
            ticker,
            calendar.as_ref(),
            info.as_ref(),
            quarterly.as_deref(),
        )
    }

    /// One record per ticker, in input order
    pub async fn scrape_all_tickers(&self) -> Vec<EarningsRecord> {
        let tickers = self.config.effective_tickers();
        if self.config.debug_mode {
            info!("Debug mode: processing only {} tickers", tickers.len());
        }

        let today = Local::now().date_naive();
        let mut records = Vec::with_capacity(tickers.len());
        for (i, ticker) in tickers.iter().enumerate() {
            records.push(self.scrape_ticker(ticker, today).await);
            if i + 1 < tickers.len() && !self.config.rate_limit_delay.is_zero() {
                tokio::time::sleep(self.config.rate_limit_delay).await;
            }
        }
        records
    }

    /// Scrape, sort and export; returns the sorted batch
    pub async fn run(&self) -> Result<Vec<EarningsRecord>> {
        info!("Starting earnings calendar scraping via {}", self.source.provider());

        let records = EarningsSorter::sort(self.scrape_all_tickers().await);
        excel_utils::save_records_to_xlsx(&records, &self.config.output_file)?;
        info!("Saved {} records to {}", records.len(), self.config.output_file);

        for record in &records {
            info!(
                "{}: {} | Quarter: {} | Days: {}",
                record.ticker, record.earnings_date, record.fiscal_quarter, record.days_until_earnings
            );
        }
        Ok(records)
    }
}
