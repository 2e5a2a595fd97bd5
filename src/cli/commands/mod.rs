pub mod clock;
pub mod config;
pub mod goal;
pub mod init;
pub mod list;
pub mod status;
pub mod week;

use crate::config::Config;
use crate::core::{SystemClock, TimeTracker};
use crate::errors::AppResult;
use crate::store::DocumentStore;

/// Load the tracker for the configured state file.
pub fn open_tracker(cfg: &Config) -> AppResult<TimeTracker<SystemClock>> {
    let defaults = cfg.session_defaults()?;
    TimeTracker::open(
        DocumentStore::new(cfg.store_path()),
        SystemClock::new(defaults.offset),
        defaults,
    )
}
