use chrono::{DateTime, Datelike, NaiveDate};
use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;
use crate::models::earnings::{NOT_AVAILABLE, TBD, UNKNOWN};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

// 数值转换工具

/// Coerce a provider value into a finite float. Yahoo `{ "raw": .., "fmt": .. }`
/// wrappers are unwrapped; numeric strings are parsed.
pub fn value_to_f64(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        Value::Object(map) => map.get("raw").and_then(value_to_f64),
        _ => None,
    };
    parsed.filter(|f| f.is_finite())
}

/// Coerce a provider value into a whole number
pub fn value_to_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        Value::Object(map) => map.get("raw").and_then(value_to_i64),
        _ => None,
    }
}

/// Render a numeric value with exactly two fraction digits
pub fn format_eps(value: f64) -> String {
    format!("{:.2}", value)
}

// 日期转换工具

/// Unix seconds to a UTC calendar date
pub fn timestamp_to_date(ts: i64) -> Option<NaiveDate> {
    DateTime::from_timestamp(ts, 0).map(|dt| dt.date_naive())
}

/// Accepts `YYYY-MM-DD` or an RFC 3339 timestamp
pub fn parse_date_str(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    NaiveDate::parse_from_str(s, DATE_FORMAT)
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive()))
}

/// Coerce a provider value (date string, unix seconds, or `{raw}` wrapper) into a date
pub fn value_to_date(value: &Value) -> Option<NaiveDate> {
    match value {
        Value::Number(_) => value_to_i64(value).and_then(timestamp_to_date),
        Value::String(s) => parse_date_str(s),
        Value::Object(map) => map.get("raw").and_then(value_to_date),
        _ => None,
    }
}

/// Calendar quarter (1-4) of a date
pub fn quarter_of(date: &NaiveDate) -> u32 {
    (date.month() - 1) / 3 + 1
}

pub fn quarter_label(quarter: i64, year: i64) -> String {
    format!("Q{} {}", quarter, year)
}

/// Human readable distance from `today` to an earnings date string
pub fn days_until(earnings_date: &str, today: NaiveDate) -> String {
    if earnings_date.is_empty() || [NOT_AVAILABLE, TBD, "Error"].contains(&earnings_date) {
        return NOT_AVAILABLE.to_string();
    }

    let date = match NaiveDate::parse_from_str(earnings_date, DATE_FORMAT) {
        Ok(date) => date,
        Err(_) => return UNKNOWN.to_string(),
    };

    let diff = (date - today).num_days();
    if diff > 0 {
        format!("{} days", diff)
    } else if diff == 0 {
        "Today".to_string()
    } else {
        format!("{} days ago", diff.abs())
    }
}

// 文本工具

/// Video id from a `watch?v=` URL
pub fn extract_video_id(url: &str) -> Option<String> {
    static VIDEO_ID: OnceLock<Regex> = OnceLock::new();
    let re = VIDEO_ID.get_or_init(|| Regex::new(r"v=([\w-]+)").expect("valid video id regex"));
    re.captures(url)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

/// Replace characters that are not allowed in file names with `_`
pub fn sanitize_filename(s: &str) -> String {
    static UNSAFE: OnceLock<Regex> = OnceLock::new();
    let re = UNSAFE.get_or_init(|| Regex::new(r#"[<>:"/\\|?*]"#).expect("valid filename regex"));
    re.replace_all(s, "_").into_owned()
}

/// Drop a trailing `(...)` group, usually a repeated channel name
pub fn strip_trailing_parenthetical(title: &str) -> String {
    static TRAILING: OnceLock<Regex> = OnceLock::new();
    let re = TRAILING.get_or_init(|| Regex::new(r"\s*\([^)]*\)\s*$").expect("valid title regex"));
    re.replace(title, "").into_owned()
}

/// Longest prefix of `s` that fits in `max_bytes` without splitting a char
pub fn truncate_to_bytes(s: &str, max_bytes: usize) -> &str {
    if s.len() <= max_bytes {
        return s;
    }
    let mut end = max_bytes;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

// Excel导出工具
pub mod excel_utils {
    use crate::errors::{AlertHubError, Result};
    use crate::models::earnings::{EarningsRecord, COLUMNS};
    use calamine::{open_workbook_auto, Reader};
    use log::{info, warn};
    use rust_xlsxwriter::{Format, Workbook};
    use std::fs;
    use std::path::Path;

    pub const SHEET_NAME: &str = "Earnings Calendar";

    /// Column widths sized to the longest cell plus padding
    pub fn column_widths(records: &[EarningsRecord]) -> [usize; 6] {
        let mut widths = COLUMNS.map(|c| c.chars().count());
        for record in records {
            for (i, cell) in record.cells().iter().enumerate() {
                widths[i] = widths[i].max(cell.chars().count());
            }
        }
        widths.map(|w| w + 2)
    }

    /// Write the records to a single-sheet workbook.
    ///
    /// The workbook is saved next to the target first and moved into place,
    /// so a failed write never leaves a partial file at `path`.
    pub fn save_records_to_xlsx(records: &[EarningsRecord], path: &str) -> Result<()> {
        if records.is_empty() {
            return Err(AlertHubError::ExportError("No data to export".to_string()));
        }

        let target = Path::new(path);
        if let Some(parent) = target.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let mut workbook = Workbook::new();
        let header = Format::new().set_bold();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(SHEET_NAME)?;

        for (col, name) in COLUMNS.iter().enumerate() {
            worksheet.write_string_with_format(0, col as u16, *name, &header)?;
        }
        for (i, record) in records.iter().enumerate() {
            let row = (i + 1) as u32;
            for (col, cell) in record.cells().iter().enumerate() {
                worksheet.write_string(row, col as u16, *cell)?;
            }
        }
        for (col, width) in column_widths(records).iter().enumerate() {
            worksheet.set_column_width(col as u16, *width as f64)?;
        }

        let tmp_path = target.with_extension("xlsx.tmp");
        if let Err(e) = workbook.save(&tmp_path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(e.into());
        }
        if let Err(e) = fs::rename(&tmp_path, target) {
            warn!("Failed to move {} into place: {}", tmp_path.display(), e);
            let _ = fs::remove_file(&tmp_path);
            return Err(e.into());
        }

        info!("Exported {} records to {}", records.len(), path);
        Ok(())
    }

    /// Load a workbook written by [`save_records_to_xlsx`]
    pub fn read_records_from_xlsx(path: &str) -> Result<Vec<EarningsRecord>> {
        let mut workbook = open_workbook_auto(path)?;
        let range = workbook.worksheet_range(SHEET_NAME)?;

        let mut rows = range.rows();
        let header: Vec<String> = rows
            .next()
            .map(|r| r.iter().map(|c| c.to_string()).collect())
            .unwrap_or_default();
        if header != COLUMNS {
            return Err(AlertHubError::DataError(format!(
                "Unexpected header in {}: {:?}",
                path, header
            )));
        }

        let mut records = Vec::new();
        for row in rows {
            let cell = |i: usize| row.get(i).map(|c| c.to_string()).unwrap_or_default();
            records.push(EarningsRecord {
                ticker: cell(0),
                earnings_date: cell(1),
                fiscal_quarter: cell(2),
                last_reported_eps: cell(3),
                eps_estimate: cell(4),
                days_until_earnings: cell(5),
            });
        }

        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, DATE_FORMAT).unwrap()
    }

    #[test]
    fn test_value_to_f64() {
        assert_eq!(value_to_f64(&json!(1.2)), Some(1.2));
        assert_eq!(value_to_f64(&json!("3.5")), Some(3.5));
        assert_eq!(value_to_f64(&json!({"raw": 0.77, "fmt": "0.77"})), Some(0.77));
        assert_eq!(value_to_f64(&json!("N/A")), None);
        assert_eq!(value_to_f64(&json!(null)), None);
        assert_eq!(value_to_f64(&json!([1.0])), None);
    }

    #[test]
    fn test_value_to_i64() {
        assert_eq!(value_to_i64(&json!(2)), Some(2));
        assert_eq!(value_to_i64(&json!(2.0)), Some(2));
        assert_eq!(value_to_i64(&json!(2.5)), None);
        assert_eq!(value_to_i64(&json!("2025")), Some(2025));
        assert_eq!(value_to_i64(&json!(true)), None);
    }

    #[test]
    fn test_format_eps() {
        assert_eq!(format_eps(1.2), "1.20");
        assert_eq!(format_eps(-0.456), "-0.46");
        assert_eq!(format_eps(3.0), "3.00");
    }

    #[test]
    fn test_value_to_date() {
        assert_eq!(value_to_date(&json!("2025-04-30")), Some(date("2025-04-30")));
        assert_eq!(
            value_to_date(&json!("2025-04-30T20:00:00Z")),
            Some(date("2025-04-30"))
        );
        // 2025-01-15T00:00:00Z
        assert_eq!(value_to_date(&json!(1736899200)), Some(date("2025-01-15")));
        assert_eq!(value_to_date(&json!({"raw": 1736899200})), Some(date("2025-01-15")));
        assert_eq!(value_to_date(&json!("soon")), None);
    }

    #[test]
    fn test_quarter_of() {
        assert_eq!(quarter_of(&date("2025-01-01")), 1);
        assert_eq!(quarter_of(&date("2025-03-31")), 1);
        assert_eq!(quarter_of(&date("2025-04-15")), 2);
        assert_eq!(quarter_of(&date("2025-12-31")), 4);
    }

    #[test]
    fn test_days_until() {
        let today = date("2025-06-10");
        assert_eq!(days_until("2025-06-10", today), "Today");
        assert_eq!(days_until("2025-06-07", today), "3 days ago");
        assert_eq!(days_until("2025-06-15", today), "5 days");
        assert_eq!(days_until("TBD", today), "N/A");
        assert_eq!(days_until("N/A", today), "N/A");
        assert_eq!(days_until("", today), "N/A");
        assert_eq!(days_until("06/15/2025", today), "Unknown");
    }

    #[test]
    fn test_extract_video_id() {
        assert_eq!(
            extract_video_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ"),
            Some("dQw4w9WgXcQ".to_string())
        );
        assert_eq!(
            extract_video_id("https://www.youtube.com/watch?v=a-b_c&t=10"),
            Some("a-b_c".to_string())
        );
        assert_eq!(extract_video_id("https://youtu.be/xyz"), None);
    }

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename(r#"a<b>c:d"e/f\g|h?i*j"#), "a_b_c_d_e_f_g_h_i_j");
        assert_eq!(sanitize_filename("plain name"), "plain name");
    }

    #[test]
    fn test_strip_trailing_parenthetical() {
        assert_eq!(
            strip_trailing_parenthetical("Market wrap (Some Channel) "),
            "Market wrap"
        );
        assert_eq!(
            strip_trailing_parenthetical("(Live) Fed decision"),
            "(Live) Fed decision"
        );
    }

    #[test]
    fn test_truncate_to_bytes() {
        assert_eq!(truncate_to_bytes("short", 10), "short");
        assert_eq!(truncate_to_bytes("abcdef", 3), "abc");
        // Hangul syllables are three bytes each
        assert_eq!(truncate_to_bytes("가나다", 7), "가나");
        assert_eq!(truncate_to_bytes("가나다", 2), "");
    }

    mod excel {
        use super::super::excel_utils::*;
        use crate::models::earnings::EarningsRecord;

        fn record(ticker: &str, date: &str) -> EarningsRecord {
            EarningsRecord {
                ticker: ticker.to_string(),
                earnings_date: date.to_string(),
                fiscal_quarter: "Q3 2025".to_string(),
                last_reported_eps: "2.94".to_string(),
                eps_estimate: "1.20".to_string(),
                days_until_earnings: "12 days".to_string(),
            }
        }

        #[test]
        fn test_column_widths_pad_longest_cell() {
            let widths = column_widths(&[record("GOOGL", "2025-07-23")]);
            assert_eq!(widths[0], "Ticker".len() + 2);
            assert_eq!(widths[1], "Earnings_Date".len() + 2);
            assert_eq!(widths[5], "Days_Until_Earnings".len() + 2);
        }

        #[test]
        fn test_read_missing_sheet_is_an_error() {
            let dir = tempfile::tempdir().unwrap();
            let path = dir.path().join("other.xlsx");

            let mut workbook = rust_xlsxwriter::Workbook::new();
            let sheet = workbook.add_worksheet();
            sheet.set_name("Other").unwrap();
            sheet.write_string(0, 0, "Ticker").unwrap();
            workbook.save(&path).unwrap();

            assert!(read_records_from_xlsx(path.to_str().unwrap()).is_err());
        }

        #[test]
        fn test_save_and_read_back() {
            let dir = tempfile::tempdir().unwrap();
            let path = dir.path().join("nested/earnings_calendar.xlsx");
            let path = path.to_str().unwrap();
            let records = vec![record("AAPL", "2025-07-31"), record("MSFT", "TBD")];

            save_records_to_xlsx(&records, path).unwrap();
            let loaded = read_records_from_xlsx(path).unwrap();

            assert_eq!(loaded, records);
            assert!(!std::path::Path::new(&format!("{}.tmp", path)).exists());
        }

        #[test]
        fn test_empty_export_is_an_error() {
            let dir = tempfile::tempdir().unwrap();
            let path = dir.path().join("earnings_calendar.xlsx");
            let result = save_records_to_xlsx(&[], path.to_str().unwrap());
            assert!(result.is_err());
            assert!(!path.exists());
        }
    }
}
