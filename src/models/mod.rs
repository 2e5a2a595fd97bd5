pub mod clock_state;
pub mod daily_record;

pub use clock_state::{ActiveSession, ClockState, StateKind};
pub use daily_record::DailyRecord;
