//! Durable storage: the record map and the JSON state document.

pub mod document;
pub mod records;

pub use document::DocumentStore;
pub use records::{RecordStore, WeekTotals};
