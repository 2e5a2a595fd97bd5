use chrono::{Datelike, Days, NaiveDate};

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}

pub fn format_date(d: NaiveDate) -> String {
    d.format("%Y-%m-%d").to_string()
}

/// Monday of the ISO week containing `d`.
pub fn week_start(d: NaiveDate) -> NaiveDate {
    let back = d.weekday().num_days_from_monday() as u64;
    d.checked_sub_days(Days::new(back)).unwrap_or(d)
}

/// The 7 dates Monday..Sunday of the ISO week containing `d`.
pub fn week_dates(d: NaiveDate) -> Vec<NaiveDate> {
    week_start(d).iter_days().take(7).collect()
}

/// Inclusive date bounds of a period: `YYYY-MM-DD`, `YYYY-MM` or `YYYY`.
pub fn period_bounds(p: &str) -> Result<(NaiveDate, NaiveDate), String> {
    let p = p.trim();

    // YYYY-MM-DD
    if let Some(d) = parse_date(p) {
        return Ok((d, d));
    }

    // YYYY-MM
    if let Some(first) = parse_date(&format!("{p}-01")) {
        let last = first
            .checked_add_months(chrono::Months::new(1))
            .and_then(|d| d.pred_opt())
            .ok_or_else(|| format!("Invalid period: {}", p))?;
        return Ok((first, last));
    }

    // YYYY
    if p.len() == 4
        && let Ok(year) = p.parse::<i32>()
        && let (Some(first), Some(last)) = (
            NaiveDate::from_ymd_opt(year, 1, 1),
            NaiveDate::from_ymd_opt(year, 12, 31),
        )
    {
        return Ok((first, last));
    }

    Err(format!("Invalid period: {}", p))
}

/// `A:B` range where both ends are periods; the range spans from the
/// start of `A` to the end of `B`.
pub fn range_bounds(start: &str, end: &str) -> Result<(NaiveDate, NaiveDate), String> {
    let (from, _) = period_bounds(start)?;
    let (_, to) = period_bounds(end)?;

    if from > to {
        return Err(format!("Invalid range: {}:{}", start, end));
    }
    Ok((from, to))
}

pub fn month_bounds(d: NaiveDate) -> Result<(NaiveDate, NaiveDate), String> {
    period_bounds(&d.format("%Y-%m").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        parse_date(s).unwrap()
    }

    #[test]
    fn week_runs_monday_to_sunday() {
        let days = week_dates(d("2024-01-03"));
        assert_eq!(days.len(), 7);
        assert_eq!(days[0], d("2024-01-01"));
        assert_eq!(days[6], d("2024-01-07"));

        // Sunday belongs to the week that started the Monday before
        assert_eq!(week_start(d("2024-01-07")), d("2024-01-01"));
        assert_eq!(week_start(d("2024-01-01")), d("2024-01-01"));
    }

    #[test]
    fn period_forms() {
        assert_eq!(
            period_bounds("2024-02").unwrap(),
            (d("2024-02-01"), d("2024-02-29"))
        );
        assert_eq!(
            period_bounds("2025").unwrap(),
            (d("2025-01-01"), d("2025-12-31"))
        );
        assert_eq!(
            period_bounds("2025-09-15").unwrap(),
            (d("2025-09-15"), d("2025-09-15"))
        );
        assert!(period_bounds("sept").is_err());
    }

    #[test]
    fn ranges_span_both_ends() {
        assert_eq!(
            range_bounds("2024-09", "2025-09").unwrap(),
            (d("2024-09-01"), d("2025-09-30"))
        );
        assert!(range_bounds("2025", "2024").is_err());
    }
}
