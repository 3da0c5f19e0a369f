//! Constraint context: the immutable input of one roster run.
//!
//! A [`ConstraintContext`] bundles the validated roster, shift-types,
//! resolved horizon, and pins, plus the engine knobs that belong to the
//! input (preference weight, visit order). It is built once, checked by
//! [`validate_input`], and only read afterwards.
//!
//! Slots are addressed internally by a flat index `day * shift_count + shift`,
//! which gives day-major, shift-minor order.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config::{RosterConfig, DEFAULT_PREFERENCE_WEIGHT};
use crate::error::RosterError;
use crate::models::{Agent, ExplicitHolidays, Pin, ShiftType, TimeSlot, WorkingDay};
use crate::scheduler::VisitOrder;
use crate::validation::validate_input;

/// Raw input for a roster run, as supplied by a form or file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterRequest {
    /// Roster, in display order.
    pub agents: Vec<Agent>,
    /// Shift-types, in display order.
    pub shifts: Vec<ShiftType>,
    /// First day of the horizon.
    pub start_date: NaiveDate,
    /// Explicit holiday dates.
    #[serde(default)]
    pub holidays: Vec<NaiveDate>,
    /// Pre-assignments.
    #[serde(default)]
    pub pins: Vec<Pin>,
}

impl RosterRequest {
    /// Creates a request with no holidays or pins.
    pub fn new(agents: Vec<Agent>, shifts: Vec<ShiftType>, start_date: NaiveDate) -> Self {
        Self {
            agents,
            shifts,
            start_date,
            holidays: Vec::new(),
            pins: Vec::new(),
        }
    }

    /// Adds a holiday.
    pub fn with_holiday(mut self, date: NaiveDate) -> Self {
        self.holidays.push(date);
        self
    }

    /// Adds a pin.
    pub fn with_pin(mut self, pin: Pin) -> Self {
        self.pins.push(pin);
        self
    }

    /// Parses a request from a TOML string.
    ///
    /// # Errors
    /// [`RosterError::MalformedRequest`] if the TOML does not describe a request.
    pub fn from_toml_str(s: &str) -> Result<Self, RosterError> {
        toml::from_str(s).map_err(RosterError::MalformedRequest)
    }
}

/// A pin translated to engine indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ResolvedPin {
    pub slot: usize,
    pub day: usize,
    pub agent: usize,
}

/// Validated, immutable input of one run.
#[derive(Debug, Clone)]
pub struct ConstraintContext {
    agents: Vec<Agent>,
    shifts: Vec<ShiftType>,
    days: Vec<WorkingDay>,
    pins: Vec<Pin>,
    resolved_pins: Vec<ResolvedPin>,
    preference_weight: u32,
    visit_order: VisitOrder,
}

impl ConstraintContext {
    /// Starts a context builder.
    pub fn builder(
        agents: Vec<Agent>,
        shifts: Vec<ShiftType>,
        days: Vec<WorkingDay>,
    ) -> ContextBuilder {
        ContextBuilder {
            agents,
            shifts,
            days,
            pins: Vec::new(),
            preference_weight: DEFAULT_PREFERENCE_WEIGHT,
            visit_order: VisitOrder::default(),
        }
    }

    /// Resolves the request's calendar and builds a context.
    ///
    /// # Errors
    /// [`RosterError::InvalidInput`] if any validation check fails.
    pub fn from_request(request: &RosterRequest, config: &RosterConfig) -> Result<Self, RosterError> {
        let explicit: ExplicitHolidays = request.holidays.iter().copied().collect();
        let days = config
            .calendar
            .resolver()
            .with_source(explicit)
            .resolve(request.start_date);

        Self::builder(request.agents.clone(), request.shifts.clone(), days)
            .with_pins(request.pins.clone())
            .with_preference_weight(config.preference_weight)
            .with_visit_order(config.visit_order)
            .build()
    }

    /// Roster, in input order.
    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    /// Shift-types, in input order.
    pub fn shifts(&self) -> &[ShiftType] {
        &self.shifts
    }

    /// Resolved horizon.
    pub fn days(&self) -> &[WorkingDay] {
        &self.days
    }

    /// Pins as supplied.
    pub fn pins(&self) -> &[Pin] {
        &self.pins
    }

    /// Pool multiplicity for preferred candidates.
    pub fn preference_weight(&self) -> u32 {
        self.preference_weight
    }

    /// Slot visit order.
    pub fn visit_order(&self) -> VisitOrder {
        self.visit_order
    }

    /// Number of (day, shift) slots, including excluded ones.
    pub fn slot_count(&self) -> usize {
        self.days.len() * self.shifts.len()
    }

    /// Seats to fill across non-excluded days.
    pub fn total_seats(&self) -> u32 {
        let per_day: u32 = self.shifts.iter().map(|s| s.capacity).sum();
        let working = self.days.iter().filter(|d| !d.excluded).count() as u32;
        per_day * working
    }

    /// Sum of all quotas.
    pub fn total_quota(&self) -> u32 {
        self.agents.iter().map(|a| a.quota).sum()
    }

    /// (day, shift) indices of a flat slot index.
    #[inline]
    pub(crate) fn slot_coords(&self, slot: usize) -> (usize, usize) {
        let n = self.shifts.len();
        (slot / n, slot % n)
    }

    /// Builds the public slot descriptor for a flat slot index.
    pub(crate) fn time_slot(&self, slot: usize) -> TimeSlot {
        let (d, s) = self.slot_coords(slot);
        let day = &self.days[d];
        TimeSlot::new(d, day.label.clone(), day.date, self.shifts[s].name.clone())
    }

    pub(crate) fn resolved_pins(&self) -> &[ResolvedPin] {
        &self.resolved_pins
    }
}

/// Builder for [`ConstraintContext`].
#[derive(Debug, Clone)]
pub struct ContextBuilder {
    agents: Vec<Agent>,
    shifts: Vec<ShiftType>,
    days: Vec<WorkingDay>,
    pins: Vec<Pin>,
    preference_weight: u32,
    visit_order: VisitOrder,
}

impl ContextBuilder {
    /// Adds a pin.
    pub fn with_pin(mut self, pin: Pin) -> Self {
        self.pins.push(pin);
        self
    }

    /// Replaces the pins.
    pub fn with_pins(mut self, pins: Vec<Pin>) -> Self {
        self.pins = pins;
        self
    }

    /// Sets the preference weight (clamped to at least 1).
    pub fn with_preference_weight(mut self, weight: u32) -> Self {
        self.preference_weight = weight.max(1);
        self
    }

    /// Sets the slot visit order.
    pub fn with_visit_order(mut self, order: VisitOrder) -> Self {
        self.visit_order = order;
        self
    }

    /// Validates and freezes the context.
    ///
    /// # Errors
    /// [`RosterError::InvalidInput`] with every problem found.
    pub fn build(self) -> Result<ConstraintContext, RosterError> {
        validate_input(&self.agents, &self.shifts, &self.days, &self.pins)?;

        let agent_idx: HashMap<&str, usize> = self
            .agents
            .iter()
            .enumerate()
            .map(|(i, a)| (a.name.as_str(), i))
            .collect();
        let shift_idx: HashMap<&str, usize> = self
            .shifts
            .iter()
            .enumerate()
            .map(|(i, s)| (s.name.as_str(), i))
            .collect();
        // Positions, not `WorkingDay::index`: callers may filter a resolved horizon.
        let day_idx: HashMap<NaiveDate, usize> = self
            .days
            .iter()
            .enumerate()
            .map(|(i, d)| (d.date, i))
            .collect();

        // Validation guarantees dates are unique and every lookup succeeds.
        let resolved_pins = self
            .pins
            .iter()
            .filter_map(|p| {
                let day = *day_idx.get(&p.date)?;
                let shift = *shift_idx.get(p.shift.as_str())?;
                let agent = *agent_idx.get(p.agent.as_str())?;
                Some(ResolvedPin {
                    slot: day * self.shifts.len() + shift,
                    day,
                    agent,
                })
            })
            .collect();

        Ok(ConstraintContext {
            agents: self.agents,
            shifts: self.shifts,
            days: self.days,
            pins: self.pins,
            resolved_pins,
            preference_weight: self.preference_weight,
            visit_order: self.visit_order,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CalendarResolver, ExclusionPolicy};
    use crate::scheduler::attempt_seeded;

    fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 6).unwrap()
    }

    fn sample_request() -> RosterRequest {
        RosterRequest::new(
            vec![Agent::new("Ana", 5), Agent::new("Bia", 5)],
            vec![ShiftType::new("Manhã", 1), ShiftType::new("Tarde", 1)],
            monday(),
        )
    }

    #[test]
    fn test_from_request() {
        let request = sample_request().with_pin(Pin::new(
            NaiveDate::from_ymd_opt(2025, 1, 7).unwrap(),
            "Tarde",
            "Bia",
        ));
        let ctx = ConstraintContext::from_request(&request, &RosterConfig::default()).unwrap();

        assert_eq!(ctx.days().len(), 5);
        assert_eq!(ctx.slot_count(), 10);
        assert_eq!(ctx.total_seats(), 10);
        assert_eq!(ctx.total_quota(), 10);
        assert_eq!(
            ctx.resolved_pins(),
            &[ResolvedPin {
                slot: 3,
                day: 1,
                agent: 1
            }]
        );
        assert_eq!(ctx.slot_coords(3), (1, 1));
        assert_eq!(ctx.time_slot(3).shift, "Tarde");
    }

    #[test]
    fn test_holidays_fill_reduce_seats() {
        let request = sample_request().with_holiday(NaiveDate::from_ymd_opt(2025, 1, 8).unwrap());
        let config = RosterConfig::default().with_exclusion_policy(ExclusionPolicy::Fill);
        let ctx = ConstraintContext::from_request(&request, &config).unwrap();
        assert_eq!(ctx.slot_count(), 10);
        assert_eq!(ctx.total_seats(), 8);
    }

    #[test]
    fn test_holidays_drop_reduce_days() {
        let request = sample_request().with_holiday(NaiveDate::from_ymd_opt(2025, 1, 8).unwrap());
        let ctx = ConstraintContext::from_request(&request, &RosterConfig::default()).unwrap();
        assert_eq!(ctx.days().len(), 4);
        assert_eq!(ctx.slot_count(), 8);
    }

    #[test]
    fn test_invalid_input_surfaces() {
        let mut request = sample_request();
        request.agents.push(Agent::new("Ana", 1));
        let err = ConstraintContext::from_request(&request, &RosterConfig::default()).unwrap_err();
        assert!(matches!(err, RosterError::InvalidInput(ref e) if e.len() == 1));
    }

    #[test]
    fn test_weight_clamped() {
        let ctx = ConstraintContext::builder(vec![], vec![], vec![])
            .with_preference_weight(0)
            .build()
            .unwrap();
        assert_eq!(ctx.preference_weight(), 1);
        assert_eq!(ctx.slot_count(), 0);
    }

    #[test]
    fn test_request_from_toml() {
        let request = RosterRequest::from_toml_str(
            r#"
            start_date = "2025-01-06"
            holidays = ["2025-01-08"]

            [[agents]]
            name = "Ana"
            quota = 3
            preference = "Manhã"

            [[agents]]
            name = "Bia"
            quota = 2
            daily_exclusive = true

            [[shifts]]
            name = "Manhã"
            capacity = 1

            [[pins]]
            date = "2025-01-06"
            shift = "Manhã"
            agent = "Bia"
            "#,
        )
        .unwrap();
        assert_eq!(request.agents.len(), 2);
        assert!(request.agents[1].daily_exclusive);
        assert_eq!(request.pins[0].agent, "Bia");
        assert_eq!(request.holidays.len(), 1);
    }

    #[test]
    fn test_filtered_horizon_with_pin() {
        let mut days = CalendarResolver::new().resolve(monday());
        let wednesday = NaiveDate::from_ymd_opt(2025, 1, 8).unwrap();
        days.retain(|d| d.date != wednesday);
        let friday = NaiveDate::from_ymd_opt(2025, 1, 10).unwrap();

        let ctx = ConstraintContext::builder(
            vec![Agent::new("Ana", 4), Agent::new("Bia", 4)],
            vec![ShiftType::new("Manhã", 1), ShiftType::new("Tarde", 1)],
            days,
        )
        .with_pin(Pin::new(friday, "Tarde", "Ana"))
        .build()
        .unwrap();

        assert_eq!(ctx.slot_count(), 8);
        assert_eq!(ctx.resolved_pins()[0].slot, 7);
        assert_eq!(ctx.resolved_pins()[0].day, 3);
        assert_eq!(ctx.time_slot(7).day, 3);
        assert_eq!(ctx.time_slot(7).date, friday);

        let schedule = (0..200)
            .find_map(|seed| attempt_seeded(&ctx, seed).ok())
            .unwrap();
        assert!(schedule
            .assignees(3, "Tarde")
            .unwrap()
            .agents()
            .contains(&"Ana".to_string()));
    }

    #[test]
    fn test_malformed_request() {
        let err = RosterRequest::from_toml_str("start_date = 5").unwrap_err();
        assert!(matches!(err, RosterError::MalformedRequest(_)));
    }
}
