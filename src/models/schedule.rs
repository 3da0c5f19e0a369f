//! Schedule (solution) model.
//!
//! A schedule maps every slot of the horizon to its assignees. Slots on
//! excluded days hold the [`SlotAssignees::Excluded`] marker instead of
//! agents.
//!
//! Per-agent counts ([`Tally`], [`AgentLoad`]) are always derived from the
//! entries, never stored alongside them.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use super::TimeSlot;

/// Text shown in place of agents on an excluded slot.
pub const EXCLUDED_MARKER: &str = "FERIADO";

/// Contents of one slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotAssignees {
    /// Ordered, distinct agent names.
    Staffed(Vec<String>),
    /// Holiday; no agents.
    Excluded,
}

impl SlotAssignees {
    /// Agents in this slot (empty if excluded).
    pub fn agents(&self) -> &[String] {
        match self {
            Self::Staffed(agents) => agents,
            Self::Excluded => &[],
        }
    }

    /// Whether the slot is excluded.
    pub fn is_excluded(&self) -> bool {
        matches!(self, Self::Excluded)
    }

    /// Display cells: agent names, or the excluded marker.
    pub fn display(&self) -> Vec<&str> {
        match self {
            Self::Staffed(agents) => agents.iter().map(String::as_str).collect(),
            Self::Excluded => vec![EXCLUDED_MARKER],
        }
    }
}

/// A slot and its assignees.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotEntry {
    /// The slot.
    pub slot: TimeSlot,
    /// Who works it.
    pub assignees: SlotAssignees,
}

/// A complete roster for the horizon.
///
/// Entries are kept in day-major, shift-minor order regardless of the
/// order in which the engine filled them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    /// Slot entries.
    pub entries: Vec<SlotEntry>,
}

/// Number of slots assigned to each agent.
pub type Tally = BTreeMap<String, u32>;

/// How one agent's assignments are spread over the horizon.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentLoad {
    /// Total slots assigned.
    pub total: u32,
    /// Slots per shift-type.
    pub by_shift: BTreeMap<String, u32>,
    /// Day indices worked.
    pub days: BTreeSet<usize>,
}

impl AgentLoad {
    /// Number of distinct shift-types worked.
    pub fn distinct_shifts(&self) -> usize {
        self.by_shift.len()
    }

    /// Number of distinct days worked.
    pub fn distinct_days(&self) -> usize {
        self.days.len()
    }

    /// Slots of the given shift-type.
    pub fn count_of(&self, shift: &str) -> u32 {
        self.by_shift.get(shift).copied().unwrap_or(0)
    }
}

impl Schedule {
    /// Creates an empty schedule.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an entry.
    pub fn push(&mut self, slot: TimeSlot, assignees: SlotAssignees) {
        self.entries.push(SlotEntry { slot, assignees });
    }

    /// Number of slots (including excluded ones).
    pub fn slot_count(&self) -> usize {
        self.entries.len()
    }

    /// Number of distinct days in the schedule.
    pub fn day_count(&self) -> usize {
        self.entries
            .iter()
            .map(|e| e.slot.day)
            .collect::<BTreeSet<_>>()
            .len()
    }

    /// Assignees of a (day, shift) slot.
    pub fn assignees(&self, day: usize, shift: &str) -> Option<&SlotAssignees> {
        self.entries
            .iter()
            .find(|e| e.slot.is(day, shift))
            .map(|e| &e.assignees)
    }

    /// All slots an agent is assigned to.
    pub fn slots_of(&self, agent: &str) -> Vec<&TimeSlot> {
        self.entries
            .iter()
            .filter(|e| e.assignees.agents().iter().any(|a| a == agent))
            .map(|e| &e.slot)
            .collect()
    }

    /// Recomputes the per-agent tally.
    ///
    /// Agents with no assignment do not appear.
    pub fn tally(&self) -> Tally {
        let mut tally = Tally::new();
        for entry in &self.entries {
            for agent in entry.assignees.agents() {
                *tally.entry(agent.clone()).or_insert(0) += 1;
            }
        }
        tally
    }

    /// Recomputes per-agent load (totals, shift spread, day spread).
    pub fn agent_loads(&self) -> BTreeMap<String, AgentLoad> {
        let mut loads: BTreeMap<String, AgentLoad> = BTreeMap::new();
        for entry in &self.entries {
            for agent in entry.assignees.agents() {
                let load = loads.entry(agent.clone()).or_default();
                load.total += 1;
                *load.by_shift.entry(entry.slot.shift.clone()).or_insert(0) += 1;
                load.days.insert(entry.slot.day);
            }
        }
        loads
    }
}

/// A rule violation found in a completed schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Type of violation.
    pub violation_type: ViolationType,
    /// Agent concerned.
    pub agent: String,
    /// Human-readable description.
    pub message: String,
}

/// Classification of rule violations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViolationType {
    /// Moderate load concentrated on too few shift-types.
    ShiftSpread,
    /// Heavy load concentrated on too few days.
    DaySpread,
    /// Preference not reflected at the trigger workload.
    PreferenceTrend,
    /// Domain-specific violation.
    Custom(String),
}

impl Violation {
    /// Creates a shift-spread violation.
    pub fn shift_spread(agent: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            violation_type: ViolationType::ShiftSpread,
            agent: agent.into(),
            message: message.into(),
        }
    }

    /// Creates a day-spread violation.
    pub fn day_spread(agent: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            violation_type: ViolationType::DaySpread,
            agent: agent.into(),
            message: message.into(),
        }
    }

    /// Creates a preference-trend violation.
    pub fn preference_trend(agent: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            violation_type: ViolationType::PreferenceTrend,
            agent: agent.into(),
            message: message.into(),
        }
    }
}
