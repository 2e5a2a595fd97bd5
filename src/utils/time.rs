//! Reference timezone and wall-clock helpers.
//!
//! Every "now" and "today" in rTimeclock is computed in a fixed UTC offset,
//! never in the host's local timezone.

use chrono::{DateTime, FixedOffset, NaiveTime, Timelike};

/// Offset of the reference timezone, in seconds east of UTC (UTC+02:00).
pub const REFERENCE_UTC_OFFSET_SECS: i32 = 2 * 3600;

/// The reference timezone used when the configuration does not pin another one.
pub const REFERENCE_OFFSET: FixedOffset = match FixedOffset::east_opt(REFERENCE_UTC_OFFSET_SECS) {
    Some(offset) => offset,
    None => panic!("reference offset out of range"),
};

pub fn reference_offset() -> FixedOffset {
    REFERENCE_OFFSET
}

/// Parse an offset written as `+HH:MM`, `-HH:MM`, `+HH` or `UTC+HH:MM`.
pub fn parse_offset(s: &str) -> Option<FixedOffset> {
    let s = s.trim();
    let s = s
        .strip_prefix("UTC")
        .or_else(|| s.strip_prefix("utc"))
        .unwrap_or(s);

    let (sign, rest) = match s.chars().next()? {
        '+' => (1, &s[1..]),
        '-' => (-1, &s[1..]),
        _ => return None,
    };

    let (h, m) = match rest.split_once(':') {
        Some((h, m)) => (h.parse::<i32>().ok()?, m.parse::<i32>().ok()?),
        None => (rest.parse::<i32>().ok()?, 0),
    };

    if !(0..=14).contains(&h) || !(0..60).contains(&m) {
        return None;
    }

    FixedOffset::east_opt(sign * (h * 3600 + m * 60))
}

/// Wall time truncated to the minute, as stored in daily records.
pub fn wall_time(ts: &DateTime<FixedOffset>) -> NaiveTime {
    NaiveTime::from_hms_opt(ts.hour(), ts.minute(), 0).unwrap_or(NaiveTime::MIN)
}

pub fn parse_hhmm(s: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(s.trim(), "%H:%M").ok()
}

pub fn format_hhmm(t: Option<NaiveTime>) -> String {
    match t {
        Some(t) => t.format("%H:%M").to_string(),
        None => "-".to_string(),
    }
}
