use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::models::DailyRecord;
use crate::store::WeekTotals;
use crate::ui::messages::header;
use crate::utils::colors::{colorize_in_out, colorize_optional};
use crate::utils::date::{parse_date, week_start};
use crate::utils::duration::format_duration;
use crate::utils::table::{Column, Table};

use super::open_tracker;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Week { date } = cmd {
        let tracker = open_tracker(cfg)?;

        let reference = match date {
            Some(d) => parse_date(d).ok_or_else(|| AppError::InvalidDate(d.clone()))?,
            None => tracker.today(),
        };

        let days = tracker.week_summary(reference);
        header(format!("Week of {}", week_start(reference)));
        print!("{}", render_records(&days));

        let totals = WeekTotals::of(&days);
        println!(
            "\nTotal worked: {} | Breaks: {} | Days worked: {}",
            format_duration(totals.worked),
            format_duration(totals.breaks),
            totals.days_worked
        );
    }

    Ok(())
}

/// Date / worked / breaks / in / out table.
pub fn render_records(records: &[DailyRecord]) -> String {
    let mut table = Table::new(vec![
        Column::new("Date", 15),
        Column::new("Total Time", 12),
        Column::new("Breaks", 12),
        Column::new("Clock In", 9),
        Column::new("Clock Out", 9),
    ]);

    for r in records {
        table.add_row(vec![
            format!("{} {}", r.date_str(), r.weekday_str()),
            colorize_optional(&r.worked_str()),
            colorize_optional(&r.breaks_str()),
            colorize_in_out(&r.clock_in_str(), true),
            colorize_in_out(&r.clock_out_str(), false),
        ]);
    }

    table.render()
}
