use serde::Serialize;
use serde_json::Value;

/// Placeholder for an unknown earnings date
pub const TBD: &str = "TBD";
/// Placeholder for any other unresolved field
pub const NOT_AVAILABLE: &str = "N/A";
/// Placeholder for a days-until value whose date could not be parsed
pub const UNKNOWN: &str = "Unknown";

/// Spreadsheet column order
pub const COLUMNS: [&str; 6] = [
    "Ticker",
    "Earnings_Date",
    "Fiscal_Quarter",
    "Last_Reported_EPS",
    "EPS_Estimate",
    "Days_Until_Earnings",
];

/// One normalized row of the earnings calendar
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EarningsRecord {
    #[serde(rename = "Ticker")]
    pub ticker: String,
    #[serde(rename = "Earnings_Date")]
    pub earnings_date: String,
    #[serde(rename = "Fiscal_Quarter")]
    pub fiscal_quarter: String,
    #[serde(rename = "Last_Reported_EPS")]
    pub last_reported_eps: String,
    #[serde(rename = "EPS_Estimate")]
    pub eps_estimate: String,
    #[serde(rename = "Days_Until_Earnings")]
    pub days_until_earnings: String,
}

impl EarningsRecord {
    /// Cells in `COLUMNS` order
    pub fn cells(&self) -> [&str; 6] {
        [
            self.ticker.as_str(),
            self.earnings_date.as_str(),
            self.fiscal_quarter.as_str(),
            self.last_reported_eps.as_str(),
            self.eps_estimate.as_str(),
            self.days_until_earnings.as_str(),
        ]
    }

    /// A record for a ticker no source could resolve
    pub fn unresolved(ticker: &str) -> Self {
        Self {
            ticker: ticker.to_string(),
            earnings_date: TBD.to_string(),
            fiscal_quarter: NOT_AVAILABLE.to_string(),
            last_reported_eps: NOT_AVAILABLE.to_string(),
            eps_estimate: NOT_AVAILABLE.to_string(),
            days_until_earnings: NOT_AVAILABLE.to_string(),
        }
    }
}

/// Earnings calendar data for one ticker, already flattened from whatever
/// shape the provider returned. Scalars stay raw so that a value which does
/// not coerce can fall through to the next source.
#[derive(Debug, Clone, Default)]
pub struct CalendarPayload {
    pub eps_estimate: Option<Value>,
    pub quarter: Option<Value>,
    pub year: Option<Value>,
    pub earnings_dates: Vec<Value>,
}

/// Generic company info fields relevant to earnings
#[derive(Debug, Clone, Default)]
pub struct InfoPayload {
    pub forward_eps: Option<Value>,
    pub eps_forward: Option<Value>,
    pub trailing_eps: Option<Value>,
    pub eps_trailing_twelve_months: Option<Value>,
    pub most_recent_quarter: Option<Value>,
    pub earnings_dates: Vec<Value>,
}

/// One reported quarter. Histories are ordered most recent first.
#[derive(Debug, Clone, Default)]
pub struct QuarterlyEps {
    pub period: Option<String>,
    pub eps: Option<Value>,
}
