//! Time-slot model.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One (day, shift-type) unit of work.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeSlot {
    /// Day index within the resolved horizon.
    pub day: usize,
    /// Day label (e.g., "Segunda-feira (06/01)").
    pub day_label: String,
    /// Calendar date.
    pub date: NaiveDate,
    /// Shift-type name.
    pub shift: String,
}

impl TimeSlot {
    /// Creates a slot.
    pub fn new(
        day: usize,
        day_label: impl Into<String>,
        date: NaiveDate,
        shift: impl Into<String>,
    ) -> Self {
        Self {
            day,
            day_label: day_label.into(),
            date,
            shift: shift.into(),
        }
    }

    /// Whether this slot is the given (day, shift).
    #[inline]
    pub fn is(&self, day: usize, shift: &str) -> bool {
        self.day == day && self.shift == shift
    }
}
