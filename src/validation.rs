//! Input validation for rostering problems.
//!
//! Checks structural integrity of agents, shift-types, and pins before
//! any assignment attempt runs. Detects:
//! - Duplicate or empty names
//! - Quotas and capacities out of range
//! - References to unknown agents, shift-types, or dates
//! - Horizons that list a date twice
//! - Pins that cannot be honored (excluded day, over capacity,
//!   over quota, conflicting with the agent's own restrictions)
//!
//! All problems are collected and reported together.

use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;

use crate::models::{Agent, Pin, ShiftType, WorkingDay, MAX_QUOTA};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{message}")]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two agents or two shift-types share a name.
    DuplicateName,
    /// An agent or shift-type has an empty name.
    EmptyName,
    /// Quota is zero or above [`MAX_QUOTA`].
    InvalidQuota,
    /// Shift capacity is zero.
    InvalidCapacity,
    /// Reference to a shift-type that doesn't exist.
    UnknownShift,
    /// Pin references an agent that doesn't exist.
    UnknownAgent,
    /// Pin date is outside the horizon.
    UnknownDate,
    /// The horizon lists the same date twice.
    DuplicateDate,
    /// Pin targets an excluded (holiday) day.
    ExcludedPin,
    /// More pins than seats in one slot.
    PinOverCapacity,
    /// More pins than the agent's quota.
    PinOverQuota,
    /// Same agent pinned twice to one slot.
    DuplicatePin,
    /// Pin contradicts the agent's fixed shift or daily exclusivity.
    PinConflict,
}

impl ValidationError {
    pub(crate) fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates the input data for a rostering problem.
///
/// `days` is the resolved horizon; pins are matched against its dates.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_input(
    agents: &[Agent],
    shifts: &[ShiftType],
    days: &[WorkingDay],
    pins: &[Pin],
) -> ValidationResult {
    let mut errors = Vec::new();

    let mut shift_caps: HashMap<&str, u32> = HashMap::new();
    for s in shifts {
        if s.name.trim().is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyName,
                "Shift-type with empty name",
            ));
        }
        if shift_caps.insert(s.name.as_str(), s.capacity).is_some() {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateName,
                format!("Duplicate shift-type: {}", s.name),
            ));
        }
        if s.capacity == 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidCapacity,
                format!("Shift-type '{}' has capacity 0", s.name),
            ));
        }
    }

    let mut agent_index: HashMap<&str, &Agent> = HashMap::new();
    for a in agents {
        if a.name.trim().is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyName,
                "Agent with empty name",
            ));
        }
        if agent_index.insert(a.name.as_str(), a).is_some() {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateName,
                format!("Duplicate agent: {}", a.name),
            ));
        }
        if a.quota == 0 || a.quota > MAX_QUOTA {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidQuota,
                format!(
                    "Agent '{}' has quota {} (allowed 1..={MAX_QUOTA})",
                    a.name, a.quota
                ),
            ));
        }
        for (what, shift) in [("fixed", &a.fixed_shift), ("preferred", &a.preference)] {
            if let Some(shift) = shift {
                if !shift_caps.contains_key(shift.as_str()) {
                    errors.push(ValidationError::new(
                        ValidationErrorKind::UnknownShift,
                        format!("Agent '{}' has unknown {what} shift '{shift}'", a.name),
                    ));
                }
            }
        }
    }

    let mut seen_dates = HashSet::new();
    for d in days {
        if !seen_dates.insert(d.date) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateDate,
                format!("Date {} appears twice in the horizon", d.date),
            ));
        }
    }

    validate_pins(pins, &agent_index, &shift_caps, days, &mut errors);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_pins(
    pins: &[Pin],
    agents: &HashMap<&str, &Agent>,
    shift_caps: &HashMap<&str, u32>,
    days: &[WorkingDay],
    errors: &mut Vec<ValidationError>,
) {
    let day_by_date: HashMap<NaiveDate, &WorkingDay> = days.iter().map(|d| (d.date, d)).collect();

    let mut seats_used: HashMap<(NaiveDate, &str), u32> = HashMap::new();
    let mut pinned: HashSet<(NaiveDate, &str, &str)> = HashSet::new();
    let mut per_agent: HashMap<&str, u32> = HashMap::new();
    let mut shifts_on_day: HashMap<(&str, NaiveDate), HashSet<&str>> = HashMap::new();

    for pin in pins {
        let agent = agents.get(pin.agent.as_str());
        if agent.is_none() {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnknownAgent,
                format!("Pin references unknown agent '{}'", pin.agent),
            ));
        }
        let Some(&capacity) = shift_caps.get(pin.shift.as_str()) else {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnknownShift,
                format!("Pin references unknown shift '{}'", pin.shift),
            ));
            continue;
        };
        let Some(day) = day_by_date.get(&pin.date) else {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnknownDate,
                format!("Pin date {} is outside the horizon", pin.date),
            ));
            continue;
        };
        if day.excluded {
            errors.push(ValidationError::new(
                ValidationErrorKind::ExcludedPin,
                format!("Pin for '{}' falls on excluded day {}", pin.agent, day.label),
            ));
            continue;
        }

        if !pinned.insert((pin.date, pin.shift.as_str(), pin.agent.as_str())) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicatePin,
                format!(
                    "Agent '{}' pinned twice to {} {}",
                    pin.agent, day.label, pin.shift
                ),
            ));
            continue;
        }

        let used = seats_used.entry((pin.date, pin.shift.as_str())).or_insert(0);
        *used += 1;
        if *used == capacity + 1 {
            errors.push(ValidationError::new(
                ValidationErrorKind::PinOverCapacity,
                format!(
                    "Pins exceed capacity {capacity} of {} {}",
                    day.label, pin.shift
                ),
            ));
        }

        let Some(agent) = agent else { continue };
        let count = per_agent.entry(agent.name.as_str()).or_insert(0);
        *count += 1;
        if *count == agent.quota + 1 {
            errors.push(ValidationError::new(
                ValidationErrorKind::PinOverQuota,
                format!("Pins exceed quota {} of agent '{}'", agent.quota, agent.name),
            ));
        }

        if !agent.allows_shift(&pin.shift) {
            errors.push(ValidationError::new(
                ValidationErrorKind::PinConflict,
                format!(
                    "Agent '{}' is fixed to another shift but pinned to {}",
                    agent.name, pin.shift
                ),
            ));
        }
        let day_shifts = shifts_on_day
            .entry((agent.name.as_str(), pin.date))
            .or_default();
        day_shifts.insert(pin.shift.as_str());
        if agent.daily_exclusive && day_shifts.len() == 2 {
            errors.push(ValidationError::new(
                ValidationErrorKind::PinConflict,
                format!(
                    "Daily-exclusive agent '{}' pinned to two shifts on {}",
                    agent.name, day.label
                ),
            ));
        }
    }
}
