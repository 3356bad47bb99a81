use alerthub::scrapers::base::EarningsSource;
use alerthub::scrapers::yahoo::YahooFinanceScraper;
use alerthub::services::earnings_builder::EarningsRecordBuilder;
use alerthub::util::value_to_f64;
use chrono::NaiveDate;
use httpmock::Method::GET;
use httpmock::MockServer;
use serde_json::json;
use std::time::Duration;

fn scraper(server: &MockServer) -> YahooFinanceScraper {
    YahooFinanceScraper::with_base_url(&server.base_url())
        .unwrap()
        .with_min_interval(Duration::ZERO)
}

#[tokio::test]
async fn test_calendar_merges_row_and_events() {
    let server = MockServer::start();

    let calendar = server.mock(|when, then| {
        when.method(GET)
            .path("/v7/finance/calendar/earnings")
            .query_param("symbol", "NVDA");
        then.status(200).json_body(json!({
            "earnings": { "result": [
                { "ticker": "NVDA", "epsEstimate": 0.93, "quarter": 2, "year": 2026 }
            ]}
        }));
    });
    let events = server.mock(|when, then| {
        when.method(GET)
            .path("/v10/finance/quoteSummary/NVDA")
            .query_param("modules", "calendarEvents");
        then.status(200).json_body(json!({
            "quoteSummary": { "result": [
                { "calendarEvents": { "earnings": { "earningsDate": [
                    { "raw": 1754006400, "fmt": "2025-08-01" }
                ]}}}
            ]}
        }));
    });

    let payload = scraper(&server).fetch_calendar("NVDA").await.unwrap().unwrap();
    calendar.assert();
    events.assert();

    assert_eq!(payload.eps_estimate.as_ref().and_then(value_to_f64), Some(0.93));
    assert_eq!(payload.earnings_dates.len(), 1);

    let record = EarningsRecordBuilder::new(NaiveDate::from_ymd_opt(2025, 6, 10).unwrap())
        .build("NVDA", Some(&payload), None, None);
    assert_eq!(record.earnings_date, "2025-08-01");
    assert_eq!(record.fiscal_quarter, "Q2 2026");
    assert_eq!(record.eps_estimate, "0.93");
    assert_eq!(record.days_until_earnings, "52 days");
}

#[tokio::test]
async fn test_calendar_survives_one_failed_half() {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(GET).path("/v7/finance/calendar/earnings");
        then.status(401);
    });
    server.mock(|when, then| {
        when.method(GET).path("/v10/finance/quoteSummary/MSFT");
        then.status(200).json_body(json!({
            "quoteSummary": { "result": [
                { "calendarEvents": { "earnings": { "earningsDate": [1753920000] } } }
            ]}
        }));
    });

    let payload = scraper(&server).fetch_calendar("MSFT").await.unwrap().unwrap();
    assert!(payload.eps_estimate.is_none());
    assert_eq!(payload.earnings_dates, vec![json!(1753920000)]);
}

#[tokio::test]
async fn test_calendar_errors_when_both_halves_fail() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET);
        then.status(500);
    });

    assert!(scraper(&server).fetch_calendar("AAPL").await.is_err());
}

#[tokio::test]
async fn test_info_combines_statistics_and_quote() {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(GET)
            .path("/v10/finance/quoteSummary/AAPL")
            .query_param("modules", "defaultKeyStatistics");
        then.status(200).json_body(json!({
            "quoteSummary": { "result": [
                { "defaultKeyStatistics": {
                    "forwardEps": { "raw": 7.5, "fmt": "7.50" },
                    "trailingEps": { "raw": 6.4, "fmt": "6.40" },
                    "mostRecentQuarter": { "raw": 1736899200, "fmt": "2025-01-15" }
                }}
            ]}
        }));
    });
    let quote = server.mock(|when, then| {
        when.method(GET)
            .path("/v7/finance/quote")
            .query_param("symbols", "AAPL");
        then.status(200).json_body(json!({
            "quoteResponse": { "result": [
                { "symbol": "AAPL", "epsForward": 7.4, "epsTrailingTwelveMonths": 6.3,
                  "earningsTimestamp": 1754006400 }
            ]}
        }));
    });

    let info = scraper(&server).fetch_info("AAPL").await.unwrap().unwrap();
    quote.assert();
    assert_eq!(info.forward_eps.as_ref().and_then(value_to_f64), Some(7.5));
    assert_eq!(info.eps_forward.as_ref().and_then(value_to_f64), Some(7.4));
    assert_eq!(info.earnings_dates, vec![json!(1754006400)]);

    let record = EarningsRecordBuilder::new(NaiveDate::from_ymd_opt(2025, 6, 10).unwrap())
        .build("AAPL", None, Some(&info), None);
    assert_eq!(record.earnings_date, "2025-08-01");
    assert_eq!(record.fiscal_quarter, "Q2 2025");
    assert_eq!(record.last_reported_eps, "6.40");
    assert_eq!(record.eps_estimate, "7.50");
}

#[tokio::test]
async fn test_quarterly_is_most_recent_first() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET)
            .path("/v10/finance/quoteSummary/TSLA")
            .query_param("modules", "earnings");
        then.status(200).json_body(json!({
            "quoteSummary": { "result": [
                { "earnings": { "earningsChart": { "quarterly": [
                    { "date": "3Q2024", "actual": { "raw": 0.72 } },
                    { "date": "4Q2024", "actual": { "raw": 0.73 } },
                    { "date": "1Q2025", "actual": { "raw": 0.27 } }
                ]}}}
            ]}
        }));
    });

    let quarters = scraper(&server).fetch_quarterly("TSLA").await.unwrap().unwrap();
    assert_eq!(quarters[0].period.as_deref(), Some("1Q2025"));
    assert_eq!(quarters.len(), 3);
}

#[tokio::test]
async fn test_quarterly_empty_chart_is_absent() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/v10/finance/quoteSummary/AEVA");
        then.status(200).json_body(json!({ "quoteSummary": { "result": [ {} ] } }));
    });

    assert!(scraper(&server).fetch_quarterly("AEVA").await.unwrap().is_none());
}

#[tokio::test]
async fn test_crumb_is_sent_when_configured() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/v10/finance/quoteSummary/META")
            .query_param("crumb", "abc123");
        then.status(200).json_body(json!({ "quoteSummary": { "result": [] } }));
    });

    let scraper = scraper(&server).with_crumb("abc123");
    assert!(scraper.fetch_quarterly("META").await.unwrap().is_none());
    mock.assert();
}
