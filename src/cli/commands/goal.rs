use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::TransitionError;
use crate::errors::AppResult;
use crate::models::StateKind;
use crate::ui::messages::{success, warning};
use crate::ui::prompt::{Prompter, TerminalPrompter, parse_hours};
use crate::utils::duration::{delta_to_hours, format_duration};

use super::open_tracker;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Goal { hours } = cmd {
        let mut tracker = open_tracker(cfg)?;
        let current = delta_to_hours(tracker.goal());

        let hours = match hours {
            Some(raw) => parse_hours(raw, current)
                .ok_or_else(|| TransitionError::InvalidGoal(raw.clone()))?,
            None => {
                // no point asking while a session is running
                if tracker.state() != StateKind::ClockedOut {
                    return Err(TransitionError::SessionInProgress.into());
                }
                let mut prompter = TerminalPrompter::stdin();
                match prompter.ask_hours("Set daily time goal (hours)", current) {
                    Some(h) => h,
                    None => {
                        warning("Goal unchanged.");
                        return Ok(());
                    }
                }
            }
        };

        tracker.set_goal(hours)?;
        success(format!(
            "Daily goal set to {}",
            format_duration(tracker.goal())
        ));
    }

    Ok(())
}
