use std::collections::BTreeMap;

use chrono::{NaiveDate, TimeDelta};

use crate::models::DailyRecord;
use crate::utils::date::week_dates;
use crate::utils::duration::saturating_add;

/// Finalized daily records keyed by calendar date.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordStore {
    records: BTreeMap<NaiveDate, DailyRecord>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, date: NaiveDate) -> Option<&DailyRecord> {
        self.records.get(&date)
    }

    /// Insert or overwrite the record for its date; returns the replaced one.
    pub fn upsert(&mut self, record: DailyRecord) -> Option<DailyRecord> {
        self.records.insert(record.date, record)
    }

    pub fn iter(&self) -> impl Iterator<Item = &DailyRecord> {
        self.records.values()
    }

    /// Stored record, or a zero stub that is not added to the store.
    pub fn get_record_or_stub(&self, date: NaiveDate) -> DailyRecord {
        self.records
            .get(&date)
            .cloned()
            .unwrap_or_else(|| DailyRecord::stub(date))
    }

    /// Monday..Sunday of the ISO week containing `reference`.
    pub fn week_of(&self, reference: NaiveDate) -> Vec<DailyRecord> {
        week_dates(reference)
            .into_iter()
            .map(|d| self.get_record_or_stub(d))
            .collect()
    }

    /// Stored records between `from` and `to`, both inclusive.
    pub fn range(&self, from: NaiveDate, to: NaiveDate) -> impl Iterator<Item = &DailyRecord> {
        let (from, to) = if from <= to { (from, to) } else { (to, from) };
        self.records.range(from..=to).map(|(_, r)| r)
    }
}

/// Sums over a set of records, e.g. one week.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WeekTotals {
    pub worked: TimeDelta,
    pub breaks: TimeDelta,
    pub days_worked: usize,
}

impl WeekTotals {
    pub fn of(records: &[DailyRecord]) -> Self {
        records.iter().fold(Self::default(), |mut acc, r| {
            acc.worked = saturating_add(acc.worked, r.total_worked);
            acc.breaks = saturating_add(acc.breaks, r.total_breaks);
            if !r.is_stub() {
                acc.days_worked += 1;
            }
            acc
        })
    }
}
