//! Scan and selection policies.
//!
//! The platform has been seen in two flavours that disagree on the
//! "available" status value, the day length and how a block is chosen.
//! Each one is a named [`Preset`] producing a [`ScanPolicy`].

use std::collections::BTreeSet;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate, NaiveTime, Weekday};

use crate::error::BookingError;

/// How a single interval is chosen out of the scanned candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionMode {
    /// Longest block first, earliest start on ties.
    RankBest,
    /// Earliest block of exactly this many slots.
    RequireExactLength(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanPolicy {
    pub available_sentinel: String,
    pub day_length: usize,
    pub ignored_indices: BTreeSet<usize>,
    /// Runs must be strictly longer than this to become candidates.
    pub min_run_length: usize,
    pub max_run_length: usize,
    pub selection: SelectionMode,
    pub day_anchor: NaiveTime,
    pub slot_minutes: i64,
    pub weekday_start_index: usize,
    pub weekend_start_index: usize,
}

impl ScanPolicy {
    /// First slot to scan for a booking on `date`.
    pub fn start_index_for(&self, date: NaiveDate) -> usize {
        match date.weekday() {
            Weekday::Sat | Weekday::Sun => self.weekend_start_index,
            _ => self.weekday_start_index,
        }
    }

    pub fn slot_duration(&self) -> chrono::Duration {
        chrono::Duration::minutes(self.slot_minutes)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Preset {
    /// Status "1" is free, 27 half-hour slots from 08:00, lunch skipped,
    /// longest block wins.
    #[default]
    WeeklyBest,
    /// Status "0" is free, 28 half-hour slots from 08:00, only an exact
    /// two-hour block is accepted.
    ExactBlock,
}

impl Preset {
    pub fn policy(self) -> ScanPolicy {
        // Both variants anchor the day at 08:00.
        let day_anchor = NaiveTime::from_hms_opt(8, 0, 0).unwrap_or_default();

        match self {
            Preset::WeeklyBest => ScanPolicy {
                available_sentinel: "1".to_string(),
                day_length: 27,
                ignored_indices: (8..=12).collect(),
                min_run_length: 1,
                max_run_length: 4,
                selection: SelectionMode::RankBest,
                day_anchor,
                slot_minutes: 30,
                weekday_start_index: 22,
                weekend_start_index: 3,
            },
            Preset::ExactBlock => ScanPolicy {
                available_sentinel: "0".to_string(),
                day_length: 28,
                ignored_indices: BTreeSet::new(),
                min_run_length: 1,
                max_run_length: 4,
                selection: SelectionMode::RequireExactLength(4),
                day_anchor,
                slot_minutes: 30,
                weekday_start_index: 0,
                weekend_start_index: 0,
            },
        }
    }
}

impl FromStr for Preset {
    type Err = BookingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "weekly-best" => Ok(Preset::WeeklyBest),
            "exact-block" => Ok(Preset::ExactBlock),
            other => Err(BookingError::Config(format!("unknown preset {:?}", other))),
        }
    }
}
