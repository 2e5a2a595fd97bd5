//! `in`, `out`, `break` and `resume`: one transition per invocation.

use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::models::StateKind;
use crate::ui::messages::{info, success, warning};
use crate::ui::prompt::{Prompter, TerminalPrompter};
use crate::utils::duration::format_duration;
use crate::utils::time::{format_hhmm, wall_time};

use super::open_tracker;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let mut tracker = open_tracker(cfg)?;

    match cmd {
        Commands::In => {
            tracker.clock_in()?;
            let state = tracker.session().state();
            success(format!(
                "Clocked in at {} ({})",
                format_hhmm(state.clock_in_time().map(|t| wall_time(&t))),
                state
                    .session_date()
                    .map(|d| d.to_string())
                    .unwrap_or_default()
            ));
            info(format!("Goal for today: {}", format_duration(tracker.goal())));
        }

        Commands::Out { yes } => {
            // wrong-state attempts go straight to the core and fail there
            let ask = cfg.confirm_clock_out && !*yes && tracker.state() == StateKind::ClockedIn;
            if ask {
                let mut prompter = TerminalPrompter::stdin();
                if !prompter.confirm("Clock out now?") {
                    warning("Clock out cancelled.");
                    return Ok(());
                }
            }

            let record = tracker.clock_out()?;
            success(format!(
                "Clocked out at {}. Recorded {} worked, {} breaks for {}",
                record.clock_out_str(),
                record.worked_str(),
                record.breaks_str(),
                record.date_str()
            ));
        }

        Commands::Break => {
            tracker.break_in()?;
            let worked = tracker.current_times().worked;
            success(format!(
                "Break started at {} ({} worked so far)",
                format_hhmm(tracker.session().state().break_start_time().map(|t| wall_time(&t))),
                format_duration(worked)
            ));
        }

        Commands::Resume => {
            let length = tracker.break_out()?;
            success(format!("Back to work after a {} break", format_duration(length)));
            info(tracker.current_times().describe_left());
        }

        _ => {}
    }

    Ok(())
}
