//! Collaborator-facing tracker: session + records + document, with every
//! transition written through to disk before returning.

use chrono::{DateTime, FixedOffset, NaiveDate, TimeDelta};

use crate::core::clock::Clock;
use crate::core::session::{CurrentTimes, Session};
use crate::errors::AppResult;
use crate::models::{DailyRecord, StateKind};
use crate::store::document::SessionDefaults;
use crate::store::{DocumentStore, RecordStore};

pub struct TimeTracker<C: Clock> {
    clock: C,
    session: Session,
    records: RecordStore,
    store: DocumentStore,
}

impl<C: Clock> TimeTracker<C> {
    /// Load the document at `store` (or start fresh if it does not exist).
    pub fn open(store: DocumentStore, clock: C, defaults: SessionDefaults) -> AppResult<Self> {
        let (session, records) = store.load(defaults)?;
        Ok(Self {
            clock,
            session,
            records,
            store,
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn records(&self) -> &RecordStore {
        &self.records
    }

    pub fn store(&self) -> &DocumentStore {
        &self.store
    }

    pub fn state(&self) -> StateKind {
        self.session.kind()
    }

    pub fn goal(&self) -> TimeDelta {
        self.session.goal()
    }

    pub fn now(&self) -> DateTime<FixedOffset> {
        self.clock.now()
    }

    /// Today in the reference timezone.
    pub fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }

    /// Write the full snapshot. In-memory state is kept even if this fails.
    pub fn save(&self) -> AppResult<()> {
        self.store.save(&self.session, &self.records, self.clock.now())
    }

    pub fn clock_in(&mut self) -> AppResult<()> {
        let now = self.clock.now();
        self.session.clock_in(now)?;
        tracing::info!(
            at = %now,
            session_date = ?self.session.state().session_date(),
            "clocked in"
        );
        self.save()
    }

    /// Close the session, file its record, and return that record.
    pub fn clock_out(&mut self) -> AppResult<DailyRecord> {
        let now = self.clock.now();
        let record = self.session.clock_out(now)?;
        if let Some(old) = self.records.upsert(record.clone()) {
            tracing::info!(date = %old.date, previous = %old.worked_str(), "overwriting daily record");
        }
        tracing::info!(
            at = %now,
            date = %record.date,
            worked = %record.worked_str(),
            breaks = %record.breaks_str(),
            "clocked out"
        );
        self.save()?;
        Ok(record)
    }

    pub fn break_in(&mut self) -> AppResult<()> {
        let now = self.clock.now();
        self.session.break_in(now)?;
        tracing::info!(at = %now, "break started");
        self.save()
    }

    /// End the running break and return its length.
    pub fn break_out(&mut self) -> AppResult<TimeDelta> {
        let now = self.clock.now();
        let length = self.session.break_out(now)?;
        tracing::info!(at = %now, seconds = length.num_seconds(), "break ended");
        self.save()?;
        Ok(length)
    }

    pub fn set_goal(&mut self, hours: f64) -> AppResult<()> {
        self.session.set_goal(hours)?;
        tracing::info!(hours, "daily goal changed");
        self.save()
    }

    pub fn current_times(&self) -> CurrentTimes {
        self.current_times_at(self.clock.now())
    }

    pub fn current_times_at(&self, now: DateTime<FixedOffset>) -> CurrentTimes {
        self.session.current_times(now)
    }

    pub fn week_summary(&self, reference: NaiveDate) -> Vec<DailyRecord> {
        self.records.week_of(reference)
    }

    pub fn record_or_stub(&self, date: NaiveDate) -> DailyRecord {
        self.records.get_record_or_stub(date)
    }

    pub fn records_between(&self, from: NaiveDate, to: NaiveDate) -> Vec<DailyRecord> {
        self.records.range(from, to).cloned().collect()
    }
}
