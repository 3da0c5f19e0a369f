//! Shift-type and pin models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A shift-type with the exact number of agents it needs per working day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftType {
    /// Shift name (e.g., "Manhã", "Tarde").
    pub name: String,
    /// Seats to fill on every non-excluded day.
    pub capacity: u32,
}

impl ShiftType {
    /// Creates a shift-type.
    pub fn new(name: impl Into<String>, capacity: u32) -> Self {
        Self {
            name: name.into(),
            capacity,
        }
    }
}

/// A pre-assignment of one agent to one (date, shift) slot.
///
/// Pins consume a seat and a unit of the agent's quota before any
/// free assignment happens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pin {
    /// Calendar date of the pinned slot.
    pub date: NaiveDate,
    /// Shift-type name of the pinned slot.
    pub shift: String,
    /// Agent name.
    pub agent: String,
}

impl Pin {
    /// Creates a pin.
    pub fn new(date: NaiveDate, shift: impl Into<String>, agent: impl Into<String>) -> Self {
        Self {
            date,
            shift: shift.into(),
            agent: agent.into(),
        }
    }
}
