use crate::models::earnings::{
    CalendarPayload, EarningsRecord, InfoPayload, QuarterlyEps, NOT_AVAILABLE, TBD,
};
use crate::util::{
    days_until, format_eps, quarter_label, quarter_of, value_to_date, value_to_f64, value_to_i64,
    DATE_FORMAT,
};
use chrono::{Datelike, Duration, NaiveDate};
use log::debug;

/// Everything a resolution step may look at for one ticker
pub struct Sources<'a> {
    pub calendar: Option<&'a CalendarPayload>,
    pub info: Option<&'a InfoPayload>,
    pub quarterly: Option<&'a [QuarterlyEps]>,
    /// Filled in once the earnings date chain has run
    pub earnings_date: Option<NaiveDate>,
}

/// One "value or skip" candidate of a field's fallback chain
pub struct Step<T> {
    pub source: &'static str,
    pub resolve: fn(&Sources<'_>) -> Option<T>,
}

pub const EARNINGS_DATE_CHAIN: &[Step<NaiveDate>] = &[
    Step { source: "calendar.earnings_date", resolve: calendar_first_date },
    Step { source: "info.earnings_date", resolve: info_first_date },
];

pub const FISCAL_QUARTER_CHAIN: &[Step<String>] = &[
    Step { source: "calendar.quarter", resolve: calendar_quarter },
    Step { source: "info.most_recent_quarter", resolve: quarter_after_most_recent },
    Step { source: "earnings_date", resolve: earnings_date_quarter },
];

pub const LAST_REPORTED_EPS_CHAIN: &[Step<f64>] = &[
    Step { source: "info.trailing_eps", resolve: info_trailing_eps },
    Step { source: "info.eps_trailing_twelve_months", resolve: info_eps_trailing_twelve_months },
    Step { source: "quarterly.latest_eps", resolve: quarterly_latest_eps },
];

pub const EPS_ESTIMATE_CHAIN: &[Step<f64>] = &[
    Step { source: "calendar.eps_estimate", resolve: calendar_eps_estimate },
    Step { source: "info.forward_eps", resolve: info_forward_eps },
    Step { source: "info.eps_forward", resolve: info_eps_forward },
];

/// Run a chain left to right; the first step yielding a value wins
pub fn resolve<T>(chain: &[Step<T>], sources: &Sources<'_>) -> Option<(T, &'static str)> {
    chain
        .iter()
        .find_map(|step| (step.resolve)(sources).map(|value| (value, step.source)))
}

fn calendar_first_date(s: &Sources<'_>) -> Option<NaiveDate> {
    s.calendar?.earnings_dates.first().and_then(value_to_date)
}

fn info_first_date(s: &Sources<'_>) -> Option<NaiveDate> {
    s.info?.earnings_dates.first().and_then(value_to_date)
}

fn calendar_quarter(s: &Sources<'_>) -> Option<String> {
    let calendar = s.calendar?;
    let quarter = calendar
        .quarter
        .as_ref()
        .and_then(value_to_i64)
        .filter(|q| (1..=4).contains(q))?;
    let year = calendar.year.as_ref().and_then(value_to_i64)?;
    Some(quarter_label(quarter, year))
}

// Guess at the next reporting quarter: most recent quarter end shifted by 90 days.
fn quarter_after_most_recent(s: &Sources<'_>) -> Option<String> {
    let most_recent = s.info?.most_recent_quarter.as_ref().and_then(value_to_date)?;
    let next = most_recent.checked_add_signed(Duration::days(90))?;
    Some(quarter_label(quarter_of(&next) as i64, i64::from(next.year())))
}

fn earnings_date_quarter(s: &Sources<'_>) -> Option<String> {
    let date = s.earnings_date?;
    Some(quarter_label(quarter_of(&date) as i64, i64::from(date.year())))
}

fn info_trailing_eps(s: &Sources<'_>) -> Option<f64> {
    s.info?.trailing_eps.as_ref().and_then(value_to_f64)
}

fn info_eps_trailing_twelve_months(s: &Sources<'_>) -> Option<f64> {
    s.info?.eps_trailing_twelve_months.as_ref().and_then(value_to_f64)
}

fn quarterly_latest_eps(s: &Sources<'_>) -> Option<f64> {
    s.quarterly?.first()?.eps.as_ref().and_then(value_to_f64)
}

fn calendar_eps_estimate(s: &Sources<'_>) -> Option<f64> {
    s.calendar?.eps_estimate.as_ref().and_then(value_to_f64)
}

fn info_forward_eps(s: &Sources<'_>) -> Option<f64> {
    s.info?.forward_eps.as_ref().and_then(value_to_f64)
}

fn info_eps_forward(s: &Sources<'_>) -> Option<f64> {
    s.info?.eps_forward.as_ref().and_then(value_to_f64)
}

/// Merges the per-ticker payloads into one fully populated [`EarningsRecord`].
///
/// `today` anchors the days-until column so that building stays a pure
/// function of its inputs.
pub struct EarningsRecordBuilder {
    today: NaiveDate,
}

impl EarningsRecordBuilder {
    pub fn new(today: NaiveDate) -> Self {
        Self { today }
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    /// Never fails: a field no source can supply gets its placeholder.
    pub fn build(
        &self,
        ticker: &str,
        calendar: Option<&CalendarPayload>,
        info: Option<&InfoPayload>,
        quarterly: Option<&[QuarterlyEps]>,
    ) -> EarningsRecord {
        let mut sources = Sources {
            calendar,
            info,
            quarterly,
            earnings_date: None,
        };

        if let Some((date, source)) = resolve(EARNINGS_DATE_CHAIN, &sources) {
            debug!("{}: earnings date {} from {}", ticker, date, source);
            sources.earnings_date = Some(date);
        }

        let fiscal_quarter = resolve(FISCAL_QUARTER_CHAIN, &sources)
            .map(|(quarter, source)| {
                debug!("{}: fiscal quarter {} from {}", ticker, quarter, source);
                quarter
            })
            .unwrap_or_else(|| NOT_AVAILABLE.to_string());

        let last_reported_eps = Self::render_eps(ticker, resolve(LAST_REPORTED_EPS_CHAIN, &sources));
        let eps_estimate = Self::render_eps(ticker, resolve(EPS_ESTIMATE_CHAIN, &sources));

        let earnings_date = sources
            .earnings_date
            .map(|d| d.format(DATE_FORMAT).to_string())
            .unwrap_or_else(|| TBD.to_string());
        let days_until_earnings = days_until(&earnings_date, self.today);

        EarningsRecord {
            ticker: ticker.to_string(),
            earnings_date,
            fiscal_quarter,
            last_reported_eps,
            eps_estimate,
            days_until_earnings,
        }
    }

    fn render_eps(ticker: &str, resolved: Option<(f64, &'static str)>) -> String {
        match resolved {
            Some((value, source)) => {
                debug!("{}: {} = {}", ticker, source, value);
                format_eps(value)
            }
            None => NOT_AVAILABLE.to_string(),
        }
    }
}
