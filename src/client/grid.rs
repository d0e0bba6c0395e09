use std::collections::BTreeSet;

use crate::error::{BookingError, BookingResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotStatus {
    Available,
    Unavailable,
    Ignored,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeSlot {
    pub index: usize,
    pub status: SlotStatus,
}

/// One court's timeline for one day, slot `i` at position `i`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    slots: Vec<TimeSlot>,
}

impl Grid {
    /// Maps raw platform statuses onto slots. Ignored indices win over
    /// whatever the platform reports for them.
    pub fn from_statuses<S: AsRef<str>>(
        raw: &[S],
        expected_len: usize,
        available_sentinel: &str,
        ignored: &BTreeSet<usize>,
    ) -> BookingResult<Grid> {
        if raw.len() != expected_len {
            return Err(BookingError::MalformedGrid {
                expected: expected_len,
                actual: raw.len(),
            });
        }

        let slots = raw
            .iter()
            .enumerate()
            .map(|(index, status)| {
                let status = if ignored.contains(&index) {
                    SlotStatus::Ignored
                } else if status.as_ref() == available_sentinel {
                    SlotStatus::Available
                } else {
                    SlotStatus::Unavailable
                };
                TimeSlot { index, status }
            })
            .collect();

        Ok(Grid { slots })
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn slot(&self, index: usize) -> BookingResult<&TimeSlot> {
        self.slots.get(index).ok_or(BookingError::SlotOutOfRange {
            index,
            len: self.slots.len(),
        })
    }

    pub fn slots(&self) -> &[TimeSlot] {
        &self.slots
    }
}
