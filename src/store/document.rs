//! JSON state document: all daily records plus the live session.
//!
//! ```text
//! { "records": { "YYYY-MM-DD": { total_time, breaks, clock_in, clock_out } },
//!   "current_state": { state, clock_in_time, break_start_time,
//!                      total_break_time, total_time, time_left, session_date } }
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, FixedOffset, NaiveDate, TimeDelta};
use serde::{Deserialize, Serialize};

use crate::core::session::Session;
use crate::errors::{AppError, AppResult};
use crate::models::{ActiveSession, ClockState, DailyRecord, StateKind};
use crate::store::records::RecordStore;
use crate::utils::date::{format_date, parse_date};
use crate::utils::duration::{
    delta_to_secs, format_duration, is_storable, parse_duration, secs_to_delta,
};
use crate::utils::time::{format_hhmm, parse_hhmm};

#[derive(Debug, Default, Serialize, Deserialize)]
struct Document {
    #[serde(default)]
    records: BTreeMap<String, RecordDoc>,
    #[serde(default)]
    current_state: Option<StateDoc>,
}

#[derive(Debug, Serialize, Deserialize)]
struct RecordDoc {
    total_time: String,
    breaks: String,
    clock_in: String,
    clock_out: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct StateDoc {
    #[serde(default = "default_state")]
    state: String,
    #[serde(default)]
    clock_in_time: Option<String>,
    #[serde(default)]
    break_start_time: Option<String>,
    #[serde(default)]
    total_break_time: f64,
    #[serde(default)]
    total_time: Option<f64>,
    /// Snapshot for readers of the file; recomputed after loading.
    #[serde(default)]
    time_left: Option<f64>,
    #[serde(default)]
    session_date: Option<String>,
}

fn default_state() -> String {
    StateKind::ClockedOut.to_doc_str().to_string()
}

/// Values used when the document (or part of it) is absent.
#[derive(Debug, Clone, Copy)]
pub struct SessionDefaults {
    pub goal: TimeDelta,
    pub offset: FixedOffset,
}

/// Location of the state document on disk.
#[derive(Debug, Clone)]
pub struct DocumentStore {
    path: PathBuf,
}

impl DocumentStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    fn path_str(&self) -> String {
        self.path.display().to_string()
    }

    /// Read the document. A missing file yields an empty store and a
    /// clocked-out session; anything unreadable is `CorruptState`.
    pub fn load(&self, defaults: SessionDefaults) -> AppResult<(Session, RecordStore)> {
        let content = match fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::info!(path = %self.path_str(), "no state document, starting clocked out");
                return Ok((
                    Session::new(defaults.goal, defaults.offset),
                    RecordStore::new(),
                ));
            }
            Err(e) => return Err(AppError::Io(e)),
        };

        let doc: Document = serde_json::from_str(&content).map_err(|e| {
            tracing::error!(path = %self.path_str(), error = %e, "state document is not valid JSON");
            AppError::corrupt(self.path_str(), e.to_string())
        })?;

        let mut records = RecordStore::new();
        for (key, rec) in &doc.records {
            let record = record_from_doc(key, rec)
                .map_err(|reason| AppError::corrupt(self.path_str(), reason))?;
            records.upsert(record);
        }

        let session = match &doc.current_state {
            Some(state) => session_from_doc(state, defaults)
                .map_err(|reason| AppError::corrupt(self.path_str(), reason))?,
            None => Session::new(defaults.goal, defaults.offset),
        };

        tracing::debug!(
            path = %self.path_str(),
            records = records.len(),
            state = session.kind().to_doc_str(),
            "state document loaded"
        );
        Ok((session, records))
    }

    /// Atomically replace the document with the given snapshot.
    ///
    /// `now` only feeds the informational `time_left` field.
    pub fn save(
        &self,
        session: &Session,
        records: &RecordStore,
        now: DateTime<FixedOffset>,
    ) -> AppResult<()> {
        let doc = Document {
            records: records
                .iter()
                .map(|r| (format_date(r.date), record_to_doc(r)))
                .collect(),
            current_state: Some(session_to_doc(session, now)),
        };

        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        doc.serialize(&mut ser)
            .map_err(|e| self.persistence_error(io::Error::other(e)))?;
        buf.push(b'\n');

        write_atomic(&self.path, &buf).map_err(|e| self.persistence_error(e))?;

        tracing::debug!(path = %self.path_str(), records = records.len(), "state document saved");
        Ok(())
    }

    fn persistence_error(&self, source: io::Error) -> AppError {
        tracing::error!(path = %self.path_str(), error = %source, "failed to save state document");
        AppError::Persistence {
            path: self.path_str(),
            source,
        }
    }
}

/// Write to a sibling temp file, flush it to disk, then rename over `path`.
fn write_atomic(path: &Path, contents: &[u8]) -> io::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }

    let mut tmp_name = path.file_name().unwrap_or_default().to_os_string();
    tmp_name.push(".tmp");
    let tmp = path.with_file_name(tmp_name);

    let result = (|| {
        let mut file = fs::File::create(&tmp)?;
        file.write_all(contents)?;
        file.sync_all()?;
        fs::rename(&tmp, path)
    })();

    if result.is_err() {
        fs::remove_file(&tmp).ok();
    }
    result
}

fn record_to_doc(r: &DailyRecord) -> RecordDoc {
    RecordDoc {
        total_time: format_duration(r.total_worked),
        breaks: format_duration(r.total_breaks),
        clock_in: format_hhmm(r.clock_in),
        clock_out: format_hhmm(r.clock_out),
    }
}

fn record_from_doc(key: &str, doc: &RecordDoc) -> Result<DailyRecord, String> {
    let date = parse_date(key).ok_or_else(|| format!("invalid record date '{key}'"))?;
    let duration = |field: &str, value: &str| {
        parse_duration(value)
            .filter(|d| is_storable(*d))
            .ok_or_else(|| format!("record {key}: invalid {field} '{value}'"))
    };
    let wall = |field: &str, value: &str| -> Result<_, String> {
        if value.trim() == "-" {
            return Ok(None);
        }
        parse_hhmm(value)
            .map(Some)
            .ok_or_else(|| format!("record {key}: invalid {field} '{value}'"))
    };

    Ok(DailyRecord {
        date,
        total_worked: duration("total_time", &doc.total_time)?,
        total_breaks: duration("breaks", &doc.breaks)?,
        clock_in: wall("clock_in", &doc.clock_in)?,
        clock_out: wall("clock_out", &doc.clock_out)?,
    })
}

fn session_to_doc(session: &Session, now: DateTime<FixedOffset>) -> StateDoc {
    let state = session.state();
    StateDoc {
        state: session.kind().to_doc_str().to_string(),
        clock_in_time: state.clock_in_time().map(|t| t.to_rfc3339()),
        break_start_time: state.break_start_time().map(|t| t.to_rfc3339()),
        total_break_time: delta_to_secs(state.total_break()),
        total_time: Some(delta_to_secs(session.goal())),
        time_left: Some(delta_to_secs(session.current_times(now).left)),
        session_date: state.session_date().map(format_date),
    }
}

fn parse_timestamp(field: &str, value: &str) -> Result<DateTime<FixedOffset>, String> {
    DateTime::parse_from_rfc3339(value.trim()).map_err(|e| format!("invalid {field} '{value}': {e}"))
}

fn session_from_doc(doc: &StateDoc, defaults: SessionDefaults) -> Result<Session, String> {
    let kind = StateKind::from_doc_str(&doc.state)
        .ok_or_else(|| format!("unknown state '{}'", doc.state))?;

    let goal = match doc.total_time {
        Some(secs) => secs_to_delta(secs)
            .filter(|g| *g > TimeDelta::zero() && is_storable(*g))
            .ok_or_else(|| format!("invalid daily goal {secs}"))?,
        None => defaults.goal,
    };

    let clock_in = doc
        .clock_in_time
        .as_deref()
        .map(|v| parse_timestamp("clock_in_time", v))
        .transpose()?;
    let break_start = doc
        .break_start_time
        .as_deref()
        .map(|v| parse_timestamp("break_start_time", v))
        .transpose()?;
    let session_date = doc
        .session_date
        .as_deref()
        .map(|v| parse_date(v).ok_or_else(|| format!("invalid session_date '{v}'")))
        .transpose()?;
    let total_break = secs_to_delta(doc.total_break_time)
        .filter(|d| is_storable(*d))
        .ok_or_else(|| format!("invalid total_break_time {}", doc.total_break_time))?;

    let state = match kind {
        StateKind::ClockedOut => {
            if clock_in.is_some() || break_start.is_some() || session_date.is_some() {
                tracing::warn!("clocked out with leftover session fields, dropping them");
            }
            ClockState::ClockedOut
        }
        StateKind::ClockedIn | StateKind::OnBreak => {
            let clock_in =
                clock_in.ok_or_else(|| format!("state '{}' without clock_in_time", doc.state))?;
            let session_date = match session_date {
                Some(d) => d,
                None => {
                    let derived: NaiveDate = clock_in.with_timezone(&defaults.offset).date_naive();
                    tracing::warn!(
                        session_date = %derived,
                        "open session without session_date, using the clock-in date"
                    );
                    derived
                }
            };
            let session = ActiveSession {
                clock_in,
                session_date,
                total_break,
            };

            match (kind, break_start) {
                (StateKind::ClockedIn, None) => ClockState::ClockedIn(session),
                (StateKind::ClockedIn, Some(_)) => {
                    return Err("state 'clocked_in' with a break_start_time".to_string());
                }
                (_, Some(break_start)) if break_start < clock_in => {
                    return Err(format!(
                        "break_start_time {} is before clock_in_time {}",
                        break_start.to_rfc3339(),
                        clock_in.to_rfc3339()
                    ));
                }
                (_, Some(break_start)) => ClockState::OnBreak {
                    session,
                    break_start,
                },
                (_, None) => return Err("state 'break' without break_start_time".to_string()),
            }
        }
    };

    Ok(Session::from_parts(state, goal, defaults.offset))
}
