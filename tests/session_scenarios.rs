use chrono::{NaiveDate, NaiveTime, TimeDelta};
use rtimeclock::cli::commands::status;
use rtimeclock::core::{ManualClock, TransitionError};
use rtimeclock::errors::AppError;
use rtimeclock::models::StateKind;
use std::fs;

mod common;
use common::{at, setup_test_store, tracker};

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn hm(h: u32, m: u32) -> Option<NaiveTime> {
    NaiveTime::from_hms_opt(h, m, 0)
}

#[test]
fn scenario_a_day_with_break() {
    let path = setup_test_store("scenario_a");
    let clock = ManualClock::new(at(2024, 1, 1, 9, 0));
    let mut t = tracker(&path, &clock);

    t.clock_in().unwrap();
    clock.set(at(2024, 1, 1, 9, 30));
    t.break_in().unwrap();
    clock.set(at(2024, 1, 1, 10, 0));
    t.break_out().unwrap();
    clock.set(at(2024, 1, 1, 17, 0));
    let rec = t.clock_out().unwrap();

    assert_eq!(rec.date, date("2024-01-01"));
    assert_eq!(rec.total_worked, TimeDelta::minutes(7 * 60 + 30));
    assert_eq!(rec.total_breaks, TimeDelta::minutes(30));
    assert_eq!(rec.clock_in, hm(9, 0));
    assert_eq!(rec.clock_out, hm(17, 0));

    // written through to disk
    let raw: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    let stored = &raw["records"]["2024-01-01"];
    assert_eq!(stored["total_time"], "7h 30m 0s");
    assert_eq!(stored["breaks"], "0h 30m 0s");
    assert_eq!(stored["clock_in"], "09:00");
    assert_eq!(stored["clock_out"], "17:00");
    assert_eq!(raw["current_state"]["state"], "clocked_out");
    assert!(raw["current_state"]["session_date"].is_null());
}

#[test]
fn scenario_b_session_crossing_midnight() {
    let path = setup_test_store("scenario_b");
    let clock = ManualClock::new(at(2024, 3, 10, 23, 30));
    let mut t = tracker(&path, &clock);

    t.clock_in().unwrap();
    clock.set(at(2024, 3, 11, 0, 30));
    let rec = t.clock_out().unwrap();

    assert_eq!(rec.date, date("2024-03-10"));
    assert_eq!(rec.total_worked, TimeDelta::hours(1));
    assert!(t.records().get(date("2024-03-11")).is_none());
}

#[test]
fn scenario_c_goal_only_while_clocked_out() {
    let path = setup_test_store("scenario_c");
    let clock = ManualClock::new(at(2024, 1, 1, 8, 0));
    let mut t = tracker(&path, &clock);

    t.set_goal(8.0).unwrap();
    let times = t.current_times();
    assert_eq!(times.worked, TimeDelta::zero());
    assert_eq!(times.left, TimeDelta::hours(8));

    t.clock_in().unwrap();
    let err = t.set_goal(8.0).unwrap_err();
    assert!(matches!(
        err,
        AppError::Transition(TransitionError::SessionInProgress)
    ));
    assert_eq!(t.goal(), TimeDelta::hours(8));
}

#[test]
fn scenario_d_week_summary() {
    let path = setup_test_store("scenario_d");
    let clock = ManualClock::new(at(2024, 1, 2, 9, 0));
    let mut t = tracker(&path, &clock);

    t.clock_in().unwrap();
    clock.advance(TimeDelta::hours(4));
    t.clock_out().unwrap();

    let week = t.week_summary(date("2024-01-03"));
    let dates: Vec<_> = week.iter().map(|r| r.date).collect();
    let expected: Vec<_> = (1..=7)
        .map(|d| NaiveDate::from_ymd_opt(2024, 1, d).unwrap())
        .collect();
    assert_eq!(dates, expected);
    assert!(week[0].is_stub());
    assert_eq!(week[1].total_worked, TimeDelta::hours(4));
    assert_eq!(week[3].clock_in_str(), "-");
    assert_eq!(t.records().len(), 1);
}

#[test]
fn clock_out_while_clocked_out_fails_without_changes() {
    let path = setup_test_store("out_while_out");
    let clock = ManualClock::new(at(2024, 1, 1, 9, 0));
    let mut t = tracker(&path, &clock);

    let err = t.clock_out().unwrap_err();
    assert!(err.is_rejection());
    assert!(t.records().is_empty());
    assert_eq!(t.state(), StateKind::ClockedOut);
    // rejected transitions do not write
    assert!(!t.store().exists());
}

#[test]
fn state_survives_reload() {
    let path = setup_test_store("reload");
    let clock = ManualClock::new(at(2024, 1, 1, 9, 0));

    {
        let mut t = tracker(&path, &clock);
        t.set_goal(7.5).unwrap();
        t.clock_in().unwrap();
        clock.set(at(2024, 1, 1, 11, 0));
        t.break_in().unwrap();
    }

    clock.set(at(2024, 1, 1, 11, 20));
    let mut t = tracker(&path, &clock);
    assert_eq!(t.state(), StateKind::OnBreak);
    assert_eq!(t.goal(), TimeDelta::minutes(450));
    assert_eq!(t.session().state().clock_in_time(), Some(at(2024, 1, 1, 9, 0)));
    assert_eq!(t.session().state().break_start_time(), Some(at(2024, 1, 1, 11, 0)));

    // frozen during the break
    let times = t.current_times();
    assert_eq!(times.worked, TimeDelta::hours(2));
    assert_eq!(times.left, TimeDelta::minutes(330));

    t.break_out().unwrap();
    clock.set(at(2024, 1, 1, 17, 0));
    let rec = t.clock_out().unwrap();
    assert_eq!(rec.total_breaks, TimeDelta::minutes(20));
    assert_eq!(rec.total_worked, TimeDelta::minutes(8 * 60 - 20));
}

#[test]
fn every_step_keeps_state_consistent() {
    let path = setup_test_store("consistency");
    let clock = ManualClock::new(at(2024, 6, 3, 8, 0));
    let mut t = tracker(&path, &clock);

    let check = |t: &rtimeclock::core::TimeTracker<&ManualClock>| {
        let st = t.session().state();
        match t.state() {
            StateKind::ClockedOut => {
                assert!(st.clock_in_time().is_none() && st.session_date().is_none());
                assert!(st.break_start_time().is_none());
            }
            StateKind::ClockedIn => {
                assert!(st.clock_in_time().is_some() && st.session_date().is_some());
                assert!(st.break_start_time().is_none());
            }
            StateKind::OnBreak => {
                assert!(st.clock_in_time().is_some() && st.session_date().is_some());
                assert!(st.break_start_time().is_some());
            }
        }
    };

    // valid steps interleaved with rejected ones
    type Step = fn(&mut rtimeclock::core::TimeTracker<&ManualClock>) -> bool;
    let steps: [Step; 8] = [
        |t| t.clock_in().is_ok(),
        |t| t.clock_in().is_ok(),
        |t| t.break_in().is_ok(),
        |t| t.clock_out().is_ok(),
        |t| t.break_out().is_ok(),
        |t| t.break_out().is_ok(),
        |t| t.clock_out().is_ok(),
        |t| t.break_in().is_ok(),
    ];
    let expected = [true, false, true, false, true, false, true, false];

    for (step, ok) in steps.iter().zip(expected) {
        clock.advance(TimeDelta::minutes(15));
        assert_eq!(step(&mut t), ok);
        check(&t);
    }
    assert_eq!(t.records().len(), 1);
}

#[test]
fn persistence_failure_keeps_transition_in_memory() {
    let base = setup_test_store("persist_fail");
    let sub = format!("{}.d", base);
    let path = format!("{}/state.json", sub);

    let clock = ManualClock::new(at(2024, 1, 1, 9, 0));
    let mut t = tracker(&path, &clock);

    // a regular file where the parent directory should be
    fs::write(&sub, "x").unwrap();

    let err = t.clock_in().unwrap_err();
    assert!(matches!(err, AppError::Persistence { .. }));
    assert_eq!(t.state(), StateKind::ClockedIn);

    clock.set(at(2024, 1, 1, 10, 0));
    assert_eq!(t.current_times().worked, TimeDelta::hours(1));
}

#[test]
fn overtime_is_reported_as_negative_left() {
    let path = setup_test_store("overtime");
    let clock = ManualClock::new(at(2024, 1, 1, 9, 0));
    let mut t = tracker(&path, &clock);
    t.set_goal(1.0).unwrap();
    t.clock_in().unwrap();

    clock.set(at(2024, 1, 1, 11, 12));
    let times = t.current_times();
    assert!(times.is_overtime());
    assert_eq!(times.overtime(), TimeDelta::minutes(72));
    assert_eq!(times.describe_left(), "1h 12m 0s overtime");
}

#[test]
fn corrupt_file_is_surfaced_and_left_alone() {
    let path = setup_test_store("corrupt");
    fs::write(&path, "{ \"records\": [").unwrap();

    let clock = ManualClock::new(at(2024, 1, 1, 9, 0));
    let res = rtimeclock::core::TimeTracker::open(
        rtimeclock::store::DocumentStore::new(&path),
        &clock,
        common::defaults(),
    );
    assert!(matches!(res, Err(AppError::CorruptState { .. })));
    assert_eq!(fs::read_to_string(&path).unwrap(), "{ \"records\": [");
}

#[test]
fn record_or_stub_reads_without_inserting() {
    let path = setup_test_store("record_or_stub");
    let clock = ManualClock::new(at(2024, 5, 6, 8, 0));
    let mut t = tracker(&path, &clock);

    t.clock_in().unwrap();
    clock.set(at(2024, 5, 6, 12, 0));
    t.clock_out().unwrap();

    let stored = t.record_or_stub(date("2024-05-06"));
    assert_eq!(stored.total_worked, TimeDelta::hours(4));
    assert_eq!(stored.clock_in, hm(8, 0));

    let stub = t.record_or_stub(date("2024-05-07"));
    assert!(stub.is_stub());
    assert_eq!(stub.date, date("2024-05-07"));
    assert_eq!(t.records().len(), 1);
}

#[test]
fn status_shows_todays_record_once_clocked_out() {
    let path = setup_test_store("status_today");
    let clock = ManualClock::new(at(2024, 5, 6, 8, 0));
    let mut t = tracker(&path, &clock);

    let before = status::render(&t);
    assert!(before.contains("State     : Clocked out"));
    assert!(!before.contains("Today"));

    t.clock_in().unwrap();
    clock.set(at(2024, 5, 6, 9, 0));
    t.break_in().unwrap();
    assert!(status::render(&t).contains("State     : On break since 09:00"));
    clock.set(at(2024, 5, 6, 9, 15));
    t.break_out().unwrap();
    assert!(status::render(&t).contains("State     : Clocked in since 08:00"));
    clock.set(at(2024, 5, 6, 12, 15));
    t.clock_out().unwrap();

    let after = status::render(&t);
    assert!(after.contains("Today     : 4h 0m 0s worked, 0h 15m 0s on break (08:00 - 12:15)"));
}
