//! Session state machine: clock in/out, breaks, daily goal and the live
//! time query. Every operation takes `now` explicitly and has no I/O.

use chrono::{DateTime, FixedOffset, TimeDelta};
use thiserror::Error;

use crate::models::{ActiveSession, ClockState, DailyRecord, StateKind};
use crate::utils::duration::{
    clamp_storable, format_duration, hours_to_delta, is_storable, saturating_add, saturating_sub,
};
use crate::utils::time::{reference_offset, wall_time};

/// Goal used when nothing else is configured or persisted.
pub const DEFAULT_GOAL_HOURS: f64 = 16.0;

/// A transition the current state does not allow. State is left untouched.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TransitionError {
    #[error("Already clocked in")]
    AlreadyClockedIn,

    #[error("Not clocked in")]
    NotClockedIn,

    #[error("Currently on a break")]
    OnBreak,

    #[error("Not on a break")]
    NotOnBreak,

    #[error("The daily goal can only be changed while clocked out")]
    SessionInProgress,

    #[error("Invalid goal '{0}': expected a positive number of hours")]
    InvalidGoal(String),
}

/// Worked time and time left at a given instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrentTimes {
    pub worked: TimeDelta,
    /// `goal - worked`; negative once the goal is exceeded.
    pub left: TimeDelta,
}

impl CurrentTimes {
    pub fn is_overtime(&self) -> bool {
        self.left < TimeDelta::zero()
    }

    /// Time worked beyond the goal, zero when still under it.
    pub fn overtime(&self) -> TimeDelta {
        if self.is_overtime() {
            -self.left
        } else {
            TimeDelta::zero()
        }
    }

    /// `"6h 30m 0s left"` or `"1h 12m 0s overtime"`.
    pub fn describe_left(&self) -> String {
        if self.is_overtime() {
            format!("{} overtime", format_duration(self.overtime()))
        } else {
            format!("{} left", format_duration(self.left))
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    state: ClockState,
    goal: TimeDelta,
    offset: FixedOffset,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(TimeDelta::hours(DEFAULT_GOAL_HOURS as i64), reference_offset())
    }
}

impl Session {
    pub fn new(goal: TimeDelta, offset: FixedOffset) -> Self {
        Self {
            state: ClockState::ClockedOut,
            goal,
            offset,
        }
    }

    /// Rebuild a session from persisted parts.
    pub fn from_parts(state: ClockState, goal: TimeDelta, offset: FixedOffset) -> Self {
        Self {
            state,
            goal,
            offset,
        }
    }

    pub fn state(&self) -> &ClockState {
        &self.state
    }

    pub fn kind(&self) -> StateKind {
        self.state.kind()
    }

    pub fn goal(&self) -> TimeDelta {
        self.goal
    }

    /// Reference timezone of this session.
    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    fn local(&self, ts: DateTime<FixedOffset>) -> DateTime<FixedOffset> {
        ts.with_timezone(&self.offset)
    }

    pub fn clock_in(&mut self, now: DateTime<FixedOffset>) -> Result<(), TransitionError> {
        if !matches!(self.state, ClockState::ClockedOut) {
            return Err(TransitionError::AlreadyClockedIn);
        }

        let now = self.local(now);
        self.state = ClockState::ClockedIn(ActiveSession {
            clock_in: now,
            session_date: now.date_naive(),
            total_break: TimeDelta::zero(),
        });
        Ok(())
    }

    /// Close the session and build the record filed under the session date.
    pub fn clock_out(&mut self, now: DateTime<FixedOffset>) -> Result<DailyRecord, TransitionError> {
        let session = match &self.state {
            ClockState::ClockedIn(session) => session,
            ClockState::OnBreak { .. } => return Err(TransitionError::OnBreak),
            ClockState::ClockedOut => return Err(TransitionError::NotClockedIn),
        };

        let now = self.local(now);
        // clock skew or a forgotten session must not produce an unloadable record
        let worked = clamp_storable(saturating_sub(now - session.clock_in, session.total_break));
        let record = DailyRecord {
            date: session.session_date,
            total_worked: worked,
            total_breaks: session.total_break,
            clock_in: Some(wall_time(&self.local(session.clock_in))),
            clock_out: Some(wall_time(&now)),
        };

        self.state = ClockState::ClockedOut;
        Ok(record)
    }

    pub fn break_in(&mut self, now: DateTime<FixedOffset>) -> Result<(), TransitionError> {
        let session = match &self.state {
            ClockState::ClockedIn(session) => session.clone(),
            ClockState::OnBreak { .. } => return Err(TransitionError::OnBreak),
            ClockState::ClockedOut => return Err(TransitionError::NotClockedIn),
        };

        self.state = ClockState::OnBreak {
            session,
            break_start: self.local(now),
        };
        Ok(())
    }

    /// End the running break and return its length.
    pub fn break_out(&mut self, now: DateTime<FixedOffset>) -> Result<TimeDelta, TransitionError> {
        let (mut session, break_start) = match &self.state {
            ClockState::OnBreak {
                session,
                break_start,
            } => (session.clone(), *break_start),
            _ => return Err(TransitionError::NotOnBreak),
        };

        let length = clamp_storable(now - break_start);
        session.total_break = clamp_storable(saturating_add(session.total_break, length));
        self.state = ClockState::ClockedIn(session);
        Ok(length)
    }

    pub fn set_goal(&mut self, hours: f64) -> Result<(), TransitionError> {
        if !matches!(self.state, ClockState::ClockedOut) {
            return Err(TransitionError::SessionInProgress);
        }

        if hours.is_nan() || hours <= 0.0 {
            return Err(TransitionError::InvalidGoal(hours.to_string()));
        }
        let goal = hours_to_delta(hours)
            .filter(|d| *d > TimeDelta::zero() && is_storable(*d))
            .ok_or_else(|| TransitionError::InvalidGoal(hours.to_string()))?;

        self.goal = goal;
        Ok(())
    }

    /// Worked time so far and time left against the goal.
    ///
    /// On a break both values stay frozen at the break start; `left` is
    /// always derived from `worked`.
    pub fn current_times(&self, now: DateTime<FixedOffset>) -> CurrentTimes {
        let worked = match &self.state {
            ClockState::ClockedOut => TimeDelta::zero(),
            ClockState::ClockedIn(s) => saturating_sub(now - s.clock_in, s.total_break),
            ClockState::OnBreak {
                session: s,
                break_start,
            } => saturating_sub(*break_start - s.clock_in, s.total_break),
        };

        CurrentTimes {
            worked,
            left: saturating_sub(self.goal, worked),
        }
    }
}
