use chrono::NaiveDate;

use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::store::WeekTotals;
use crate::utils::date;
use crate::utils::duration::format_duration;

use super::open_tracker;
use super::week::render_records;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::List { period } = cmd {
        let tracker = open_tracker(cfg)?;

        let records = match resolve_period(period, tracker.today())? {
            Some((from, to)) => tracker.records_between(from, to),
            None => tracker.records().iter().cloned().collect(),
        };

        if records.is_empty() {
            println!("No records found.");
            return Ok(());
        }

        print!("{}", render_records(&records));
        let totals = WeekTotals::of(&records);
        println!(
            "\nDays: {} | Total worked: {} | Breaks: {}",
            records.len(),
            format_duration(totals.worked),
            format_duration(totals.breaks)
        );
    }
    Ok(())
}

/// `None` means every stored record.
fn resolve_period(
    period: &Option<String>,
    today: NaiveDate,
) -> AppResult<Option<(NaiveDate, NaiveDate)>> {
    if let Some(p) = period {
        if p == "all" {
            return Ok(None);
        }

        if let Some((a, b)) = p.split_once(':') {
            return date::range_bounds(a, b)
                .map(Some)
                .map_err(AppError::InvalidDate);
        }

        return date::period_bounds(p).map(Some).map_err(AppError::InvalidDate);
    }

    date::month_bounds(today)
        .map(Some)
        .map_err(AppError::InvalidDate)
}
