pub mod clock;
pub mod session;
pub mod tracker;

pub use clock::{Clock, ManualClock, SystemClock};
pub use session::{CurrentTimes, Session, TransitionError};
pub use tracker::TimeTracker;
