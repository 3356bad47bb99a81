use crate::models::earnings::EarningsRecord;
use crate::util::DATE_FORMAT;
use chrono::NaiveDate;
use log::info;

/// Orders earnings records nearest date first
pub struct EarningsSorter;

impl EarningsSorter {
    /// Key used for placeholders and unparseable dates so they sort last
    pub fn far_future() -> NaiveDate {
        NaiveDate::from_ymd_opt(9999, 12, 31).unwrap_or(NaiveDate::MAX)
    }

    pub fn sort_key(record: &EarningsRecord) -> NaiveDate {
        NaiveDate::parse_from_str(&record.earnings_date, DATE_FORMAT)
            .unwrap_or_else(|_| Self::far_future())
    }

    /// Stable ascending sort by earnings date
    pub fn sort(mut records: Vec<EarningsRecord>) -> Vec<EarningsRecord> {
        records.sort_by_key(Self::sort_key);
        info!("Sorted {} earnings records by date (earliest first)", records.len());
        records
    }
}
