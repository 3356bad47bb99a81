use serde::Deserialize;
use serde_json::Value;

/* ---------------- v7 calendar/earnings ---------------- */

#[derive(Deserialize)]
pub(crate) struct CalendarEnvelope {
    pub(crate) earnings: Option<CalendarResults>,
}

#[derive(Deserialize)]
pub(crate) struct CalendarResults {
    pub(crate) result: Option<Vec<CalendarRow>>,
}

#[derive(Deserialize)]
pub(crate) struct CalendarRow {
    pub(crate) ticker: Option<String>,
    #[serde(rename = "epsEstimate")]
    pub(crate) eps_estimate: Option<Value>,
    pub(crate) quarter: Option<Value>,
    pub(crate) year: Option<Value>,
}

/* ---------------- v7 quote ---------------- */

#[derive(Deserialize)]
pub(crate) struct QuoteEnvelope {
    #[serde(rename = "quoteResponse")]
    pub(crate) quote_response: Option<QuoteResults>,
}

#[derive(Deserialize)]
pub(crate) struct QuoteResults {
    pub(crate) result: Option<Vec<QuoteRow>>,
}

#[derive(Deserialize)]
pub(crate) struct QuoteRow {
    pub(crate) symbol: Option<String>,
    #[serde(rename = "epsForward")]
    pub(crate) eps_forward: Option<Value>,
    #[serde(rename = "epsTrailingTwelveMonths")]
    pub(crate) eps_trailing_twelve_months: Option<Value>,
    #[serde(rename = "earningsTimestamp")]
    pub(crate) earnings_timestamp: Option<Value>,
    #[serde(rename = "earningsTimestampStart")]
    pub(crate) earnings_timestamp_start: Option<Value>,
    #[serde(rename = "earningsTimestampEnd")]
    pub(crate) earnings_timestamp_end: Option<Value>,
}

/* ---------------- v10 quoteSummary ---------------- */

#[derive(Deserialize)]
pub(crate) struct SummaryEnvelope {
    #[serde(rename = "quoteSummary")]
    pub(crate) quote_summary: Option<SummaryResults>,
}

#[derive(Deserialize)]
pub(crate) struct SummaryResults {
    pub(crate) result: Option<Vec<SummaryResult>>,
}

#[derive(Deserialize)]
pub(crate) struct SummaryResult {
    #[serde(rename = "calendarEvents")]
    pub(crate) calendar_events: Option<CalendarEventsNode>,
    #[serde(rename = "defaultKeyStatistics")]
    pub(crate) default_key_statistics: Option<KeyStatisticsNode>,
    pub(crate) earnings: Option<EarningsNode>,
}

/* --- calendar --- */
#[derive(Deserialize)]
pub(crate) struct CalendarEventsNode {
    pub(crate) earnings: Option<CalendarEarningsNode>,
}

#[derive(Deserialize)]
pub(crate) struct CalendarEarningsNode {
    #[serde(rename = "earningsDate")]
    pub(crate) earnings_date: Option<Vec<Value>>,
}

/* --- key statistics --- */
#[derive(Deserialize)]
pub(crate) struct KeyStatisticsNode {
    #[serde(rename = "forwardEps")]
    pub(crate) forward_eps: Option<Value>,
    #[serde(rename = "trailingEps")]
    pub(crate) trailing_eps: Option<Value>,
    #[serde(rename = "mostRecentQuarter")]
    pub(crate) most_recent_quarter: Option<Value>,
}

/* --- earnings --- */
#[derive(Deserialize)]
pub(crate) struct EarningsNode {
    #[serde(rename = "earningsChart")]
    pub(crate) earnings_chart: Option<EarningsChartNode>,
}

#[derive(Deserialize)]
pub(crate) struct EarningsChartNode {
    pub(crate) quarterly: Option<Vec<EpsQuarterNode>>,
}

#[derive(Deserialize)]
pub(crate) struct EpsQuarterNode {
    pub(crate) date: Option<String>,
    pub(crate) actual: Option<Value>,
}
