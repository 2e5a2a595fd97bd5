use chrono::{NaiveDate, NaiveTime, TimeDelta};

use crate::utils::duration::format_duration;
use crate::utils::time::format_hhmm;

/// Finalized summary of one calendar day, written at clock-out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyRecord {
    pub date: NaiveDate,
    pub total_worked: TimeDelta,
    pub total_breaks: TimeDelta,
    pub clock_in: Option<NaiveTime>,  // "-" when absent
    pub clock_out: Option<NaiveTime>, // "-" when absent
}

impl DailyRecord {
    /// Zero-valued placeholder for a date without an entry. Never stored.
    pub fn stub(date: NaiveDate) -> Self {
        Self {
            date,
            total_worked: TimeDelta::zero(),
            total_breaks: TimeDelta::zero(),
            clock_in: None,
            clock_out: None,
        }
    }

    pub fn is_stub(&self) -> bool {
        self.clock_in.is_none()
            && self.clock_out.is_none()
            && self.total_worked.is_zero()
            && self.total_breaks.is_zero()
    }

    pub fn date_str(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    pub fn weekday_str(&self) -> String {
        self.date.format("%a").to_string()
    }

    pub fn worked_str(&self) -> String {
        format_duration(self.total_worked)
    }

    pub fn breaks_str(&self) -> String {
        format_duration(self.total_breaks)
    }

    pub fn clock_in_str(&self) -> String {
        format_hhmm(self.clock_in)
    }

    pub fn clock_out_str(&self) -> String {
        format_hhmm(self.clock_out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stub_renders_dashes_and_zeroes() {
        let stub = DailyRecord::stub(NaiveDate::from_ymd_opt(2024, 1, 6).unwrap());
        assert!(stub.is_stub());
        assert_eq!(stub.worked_str(), "0h 0m 0s");
        assert_eq!(stub.breaks_str(), "0h 0m 0s");
        assert_eq!(stub.clock_in_str(), "-");
        assert_eq!(stub.clock_out_str(), "-");
        assert_eq!(stub.weekday_str(), "Sat");
    }
}
