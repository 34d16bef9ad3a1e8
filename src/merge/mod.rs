//! Per-day merge of measurement records.
//!
//! Exports frequently contain several entries for the same calendar day (a
//! morning and an evening weigh-in, or a scale entry plus a manual BMI entry).
//! `DayLog` folds them into a single `DayRecord` per day:
//!
//! - the **lowest weight** of the day wins, and its BMI/fat come with it
//!   (full replacement, so a winner without BMI clears a previously held BMI)
//! - any other record of the day may **backfill** BMI/fat the winner lacks,
//!   but never overwrites a value that is already present

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use crate::domain::{DatedRecord, DayRecord, NormalizedDate};

/// Accumulator keyed by calendar day. Iterates in chronological order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DayLog {
    days: BTreeMap<NormalizedDate, DayRecord>,
}

impl DayLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one record into the entry for its day.
    pub fn apply(&mut self, record: DatedRecord) {
        match self.days.entry(record.date) {
            Entry::Vacant(slot) => {
                slot.insert(record.day);
            }
            Entry::Occupied(mut slot) => slot.get_mut().absorb(record.day),
        }
    }

    pub fn get(&self, date: &NormalizedDate) -> Option<&DayRecord> {
        self.days.get(date)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&NormalizedDate, &DayRecord)> {
        self.days.iter()
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}

impl DayRecord {
    /// Whether `incoming` should replace this record outright.
    fn is_superseded_by(&self, incoming: &DayRecord) -> bool {
        match (&self.weight, &incoming.weight) {
            (_, None) => false,
            (None, Some(_)) => true,
            (Some(current), Some(new)) => new.value() < current.value(),
        }
    }

    fn absorb(&mut self, incoming: DayRecord) {
        if self.is_superseded_by(&incoming) {
            *self = incoming;
        } else {
            self.backfill(incoming);
        }
    }

    fn backfill(&mut self, incoming: DayRecord) {
        if self.bmi.is_none() {
            self.bmi = incoming.bmi;
        }
        if self.fat.is_none() {
            self.fat = incoming.fat;
        }
    }
}

/// Fold `records`, in order, into `log` and hand the log back.
pub fn merge(mut log: DayLog, records: impl IntoIterator<Item = DatedRecord>) -> DayLog {
    for record in records {
        log.apply(record);
    }
    log
}
