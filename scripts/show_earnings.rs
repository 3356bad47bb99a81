use alerthub::util::excel_utils;
use std::env;
use std::error::Error;
use std::path::Path;

fn main() -> Result<(), Box<dyn Error>> {
    let path = env::args()
        .nth(1)
        .unwrap_or_else(|| "output/earnings_calendar.xlsx".to_string());

    // 检查导出文件是否存在
    if !Path::new(&path).exists() {
        return Err(format!("{} not found, run 'cargo run -- earnings' first", path).into());
    }

    let records = excel_utils::read_records_from_xlsx(&path)?;
    if records.is_empty() {
        println!("No earnings records in {}", path);
        return Ok(());
    }

    println!(
        "{:<8} {:<12} {:<10} {:>10} {:>10}  {}",
        "Ticker", "Date", "Quarter", "Last EPS", "Estimate", "Days"
    );
    println!("{:-<66}", "");
    for r in &records {
        println!(
            "{:<8} {:<12} {:<10} {:>10} {:>10}  {}",
            r.ticker, r.earnings_date, r.fiscal_quarter, r.last_reported_eps, r.eps_estimate, r.days_until_earnings
        );
    }
    println!("\n{} tickers", records.len());
    Ok(())
}
