use std::io::{self, Write};
use std::thread;
use std::time::Duration;

use ansi_term::Colour;

use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::{Clock, TimeTracker};
use crate::errors::AppResult;
use crate::models::ClockState;
use crate::utils::duration::format_duration;
use crate::utils::time::{format_hhmm, wall_time};

use super::open_tracker;

const REFRESH: Duration = Duration::from_secs(1);

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Status { watch } = cmd {
        if !*watch {
            let tracker = open_tracker(cfg)?;
            print!("{}", render(&tracker));
            return Ok(());
        }

        // Reload every tick so transitions made from another shell show up.
        loop {
            let tracker = open_tracker(cfg)?;
            print!("\x1b[2J\x1b[H{}", render(&tracker));
            println!("\n(refreshing every second, Ctrl-C to stop)");
            io::stdout().flush().ok();
            thread::sleep(REFRESH);
        }
    }

    Ok(())
}

/// Status block for the tracker at its clock's current instant.
pub fn render<C: Clock>(tracker: &TimeTracker<C>) -> String {
    let session = tracker.session();
    let times = tracker.current_times();
    let mut out = String::new();

    let wall = |t: &chrono::DateTime<chrono::FixedOffset>| {
        format_hhmm(Some(wall_time(&t.with_timezone(&session.offset()))))
    };
    let label = session.kind().label();
    let state_line = match session.state() {
        ClockState::ClockedOut => label.to_string(),
        ClockState::ClockedIn(s) => format!(
            "{} since {} (session {})",
            label,
            wall(&s.clock_in),
            s.session_date
        ),
        ClockState::OnBreak {
            session: s,
            break_start,
        } => format!(
            "{} since {} (clocked in {}, session {})",
            label,
            wall(break_start),
            wall(&s.clock_in),
            s.session_date
        ),
    };

    out.push_str(&format!("State     : {}\n", state_line));
    out.push_str(&format!("Worked    : {}\n", format_duration(times.worked)));

    if times.is_overtime() {
        out.push_str(&format!(
            "Time left : {} {}\n",
            Colour::Red.bold().paint(format_duration(times.left)),
            Colour::Red.paint("(overtime)")
        ));
    } else {
        out.push_str(&format!(
            "Time left : {}\n",
            Colour::Green.paint(format_duration(times.left))
        ));
    }

    if !session.state().total_break().is_zero() {
        out.push_str(&format!(
            "Breaks    : {}\n",
            format_duration(session.state().total_break())
        ));
    }
    out.push_str(&format!("Goal      : {}\n", format_duration(session.goal())));

    if matches!(session.state(), ClockState::ClockedOut) {
        let today = tracker.record_or_stub(tracker.today());
        if !today.is_stub() {
            out.push_str(&format!(
                "Today     : {} worked, {} on break ({} - {})\n",
                format_duration(today.total_worked),
                format_duration(today.total_breaks),
                format_hhmm(today.clock_in),
                format_hhmm(today.clock_out)
            ));
        }
    }

    out
}
