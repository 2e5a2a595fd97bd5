#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::{DateTime, FixedOffset, TimeDelta, TimeZone};
use rtimeclock::core::{ManualClock, TimeTracker};
use rtimeclock::store::DocumentStore;
use rtimeclock::store::document::SessionDefaults;
use rtimeclock::utils::time::reference_offset;
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn rtc() -> Command {
    cargo_bin_cmd!("rtimeclock")
}

/// Create a unique state file path inside the system temp dir and remove any existing file
pub fn setup_test_store(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("rtimeclock_tests_{}", name));
    fs::remove_dir_all(&path).ok();
    fs::create_dir_all(&path).expect("create test dir");
    path.push("time_records.json");
    path.to_string_lossy().to_string()
}

/// Instant in the reference timezone (UTC+02:00)
pub fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<FixedOffset> {
    reference_offset()
        .with_ymd_and_hms(y, mo, d, h, mi, 0)
        .single()
        .expect("valid test instant")
}

pub fn defaults() -> SessionDefaults {
    SessionDefaults {
        goal: TimeDelta::hours(16),
        offset: reference_offset(),
    }
}

/// Tracker on a fresh state file driven by a manual clock
pub fn tracker<'a>(path: &str, clock: &'a ManualClock) -> TimeTracker<&'a ManualClock> {
    TimeTracker::open(DocumentStore::new(path), clock, defaults()).expect("open tracker")
}
