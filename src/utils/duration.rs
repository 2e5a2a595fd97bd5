//! Duration formatting and parsing.
//!
//! One format is used everywhere: `"{h}h {m}m {s}s"`, hours unpadded,
//! components truncated toward zero from whole seconds. Negative durations
//! (overtime) carry a leading `-` in front of the absolute value.

use chrono::TimeDelta;

/// Largest duration accepted from the state document, in seconds (a leap year).
pub const MAX_STORED_SECS: i64 = 366 * 24 * 3600;

pub fn saturating_add(a: TimeDelta, b: TimeDelta) -> TimeDelta {
    a.checked_add(&b).unwrap_or(if b < TimeDelta::zero() {
        TimeDelta::MIN
    } else {
        TimeDelta::MAX
    })
}

pub fn saturating_sub(a: TimeDelta, b: TimeDelta) -> TimeDelta {
    a.checked_sub(&b).unwrap_or(if b < TimeDelta::zero() {
        TimeDelta::MAX
    } else {
        TimeDelta::MIN
    })
}

/// Non-negative and no longer than `MAX_STORED_SECS`.
pub fn is_storable(d: TimeDelta) -> bool {
    d >= TimeDelta::zero() && d.num_seconds() <= MAX_STORED_SECS
}

pub fn format_duration(d: TimeDelta) -> String {
    let total = d.num_seconds();
    let sign = if total < 0 { "-" } else { "" };
    let abs = total.unsigned_abs();

    format!(
        "{}{}h {}m {}s",
        sign,
        abs / 3600,
        (abs % 3600) / 60,
        abs % 60
    )
}

/// Parse `"7h 30m 0s"`, the legacy `"7h 30m"` form, or a signed variant.
pub fn parse_duration(s: &str) -> Option<TimeDelta> {
    let s = s.trim();
    let (negative, body) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s),
    };

    let mut parts = body.split_whitespace();
    let hours = component(parts.next()?, 'h')?;
    let minutes = component(parts.next()?, 'm')?;
    let seconds = match parts.next() {
        Some(p) => component(p, 's')?,
        None => 0,
    };
    if parts.next().is_some() || minutes >= 60 || seconds >= 60 {
        return None;
    }

    let total = hours.checked_mul(3600)?.checked_add(minutes * 60 + seconds)?;
    let delta = TimeDelta::try_seconds(total)?;
    Some(if negative { -delta } else { delta })
}

fn component(part: &str, unit: char) -> Option<i64> {
    let digits = part.strip_suffix(unit)?;
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// Seconds as written in the state document (fractional allowed).
pub fn secs_to_delta(secs: f64) -> Option<TimeDelta> {
    if !secs.is_finite() {
        return None;
    }
    let millis = (secs * 1000.0).round();
    if millis.abs() >= i64::MAX as f64 {
        return None;
    }
    TimeDelta::try_milliseconds(millis as i64)
}

pub fn delta_to_secs(d: TimeDelta) -> f64 {
    d.num_milliseconds() as f64 / 1000.0
}

/// Goal hours entered by the user, rounded to the second.
pub fn hours_to_delta(hours: f64) -> Option<TimeDelta> {
    secs_to_delta(hours * 3600.0).map(|d| TimeDelta::seconds(d.num_seconds()))
}

pub fn delta_to_hours(d: TimeDelta) -> f64 {
    d.num_seconds() as f64 / 3600.0
}

/// Clamp into the range the state document accepts.
pub fn clamp_storable(d: TimeDelta) -> TimeDelta {
    if d < TimeDelta::zero() {
        TimeDelta::zero()
    } else if d.num_seconds() > MAX_STORED_SECS {
        TimeDelta::seconds(MAX_STORED_SECS)
    } else {
        d
    }
}
