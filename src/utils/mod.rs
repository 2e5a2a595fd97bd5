pub mod colors;
pub mod date;
pub mod duration;
pub mod logging;
pub mod path;
pub mod table;
pub mod time;

pub use duration::format_duration;
