use chrono::{DateTime, FixedOffset, NaiveDate, TimeDelta};

/// The three states a tracker can be in, without their data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateKind {
    ClockedOut,
    ClockedIn,
    OnBreak,
}

impl StateKind {
    /// Convert enum → document string
    pub fn to_doc_str(&self) -> &'static str {
        match self {
            StateKind::ClockedOut => "clocked_out",
            StateKind::ClockedIn => "clocked_in",
            StateKind::OnBreak => "break",
        }
    }

    /// Convert document string → enum
    pub fn from_doc_str(s: &str) -> Option<Self> {
        match s {
            "clocked_out" => Some(StateKind::ClockedOut),
            "clocked_in" => Some(StateKind::ClockedIn),
            "break" => Some(StateKind::OnBreak),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StateKind::ClockedOut => "Clocked out",
            StateKind::ClockedIn => "Clocked in",
            StateKind::OnBreak => "On break",
        }
    }
}

/// Data carried while a session is open (clocked in or on break).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveSession {
    pub clock_in: DateTime<FixedOffset>,
    /// Reference-timezone date of the clock-in; the record key at clock-out.
    pub session_date: NaiveDate,
    /// Breaks already closed during this session.
    pub total_break: TimeDelta,
}

/// Clock state with its per-state data.
///
/// A break start only exists inside `OnBreak` and a clock-in time only
/// inside an open session, so a half-filled state cannot be built.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ClockState {
    #[default]
    ClockedOut,
    ClockedIn(ActiveSession),
    OnBreak {
        session: ActiveSession,
        break_start: DateTime<FixedOffset>,
    },
}

impl ClockState {
    pub fn kind(&self) -> StateKind {
        match self {
            ClockState::ClockedOut => StateKind::ClockedOut,
            ClockState::ClockedIn(_) => StateKind::ClockedIn,
            ClockState::OnBreak { .. } => StateKind::OnBreak,
        }
    }

    pub fn active(&self) -> Option<&ActiveSession> {
        match self {
            ClockState::ClockedOut => None,
            ClockState::ClockedIn(session) | ClockState::OnBreak { session, .. } => Some(session),
        }
    }

    pub fn clock_in_time(&self) -> Option<DateTime<FixedOffset>> {
        self.active().map(|s| s.clock_in)
    }

    pub fn break_start_time(&self) -> Option<DateTime<FixedOffset>> {
        match self {
            ClockState::OnBreak { break_start, .. } => Some(*break_start),
            _ => None,
        }
    }

    pub fn session_date(&self) -> Option<NaiveDate> {
        self.active().map(|s| s.session_date)
    }

    /// Closed breaks of the open session; zero while clocked out.
    pub fn total_break(&self) -> TimeDelta {
        self.active()
            .map(|s| s.total_break)
            .unwrap_or_else(TimeDelta::zero)
    }
}
