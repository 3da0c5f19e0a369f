//! Randomized greedy slot filler.
//!
//! # Algorithm
//!
//! 1. Place pins: each pinned agent takes a seat and a unit of quota.
//! 2. Visit slots in day-major order (or a shuffled order).
//! 3. Skip excluded slots; they keep the excluded marker.
//! 4. Fill each remaining seat by drawing from a weighted pool of
//!    candidates: agents under quota, not yet in the slot, not already
//!    working another shift that day if daily-exclusive, and matching
//!    the slot if fixed to a shift-type. Agents preferring the slot's
//!    shift-type enter the pool `preference_weight` times.
//! 5. An empty candidate set ends the attempt. There is no backtracking;
//!    the caller restarts from scratch.
//!
//! # Complexity
//! O(s * c * a) per attempt where s=slots, c=capacity, a=agents.

use rand::prelude::{IndexedRandom, SliceRandom};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::trace;

use crate::context::ConstraintContext;
use crate::models::{Schedule, SlotAssignees};

/// Order in which the engine visits slots.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VisitOrder {
    /// Day by day, shift-types in input order.
    #[default]
    Fixed,
    /// The whole day × shift grid in random order.
    Shuffled,
}

/// One attempt ran out of candidates.
///
/// Local to an attempt; the retry controller recovers from it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("no candidate for seat {seat} of {shift} on {day}")]
pub struct AttemptInfeasible {
    /// Day label of the slot that could not be filled.
    pub day: String,
    /// Shift-type of the slot.
    pub shift: String,
    /// 1-based seat number that had no candidate.
    pub seat: usize,
}

/// Per-attempt accumulator. Dropped with the attempt.
struct AttemptState {
    tally: Vec<u32>,
    seats: Vec<Vec<usize>>,
    /// `working[agent][day]`: agent already holds a shift on that day.
    working: Vec<Vec<bool>>,
}

impl AttemptState {
    fn new(ctx: &ConstraintContext) -> Self {
        let agents = ctx.agents().len();
        Self {
            tally: vec![0; agents],
            seats: vec![Vec::new(); ctx.slot_count()],
            working: vec![vec![false; ctx.days().len()]; agents],
        }
    }

    fn assign(&mut self, slot: usize, day: usize, agent: usize) {
        self.seats[slot].push(agent);
        self.tally[agent] += 1;
        self.working[agent][day] = true;
    }

    fn is_candidate(
        &self,
        ctx: &ConstraintContext,
        agent: usize,
        slot: usize,
        day: usize,
        shift: &str,
    ) -> bool {
        let a = &ctx.agents()[agent];
        self.tally[agent] < a.quota
            && !self.seats[slot].contains(&agent)
            && !(a.daily_exclusive && self.working[agent][day])
            && a.allows_shift(shift)
    }

    fn into_schedule(self, ctx: &ConstraintContext) -> Schedule {
        let mut schedule = Schedule::new();
        for (slot, seated) in self.seats.into_iter().enumerate() {
            let (day, _) = ctx.slot_coords(slot);
            let assignees = if ctx.days()[day].excluded {
                SlotAssignees::Excluded
            } else {
                SlotAssignees::Staffed(
                    seated
                        .into_iter()
                        .map(|a| ctx.agents()[a].name.clone())
                        .collect(),
                )
            };
            schedule.push(ctx.time_slot(slot), assignees);
        }
        schedule
    }
}

/// Runs one attempt with the given random stream.
///
/// # Errors
/// [`AttemptInfeasible`] at the first seat with no candidate.
pub fn attempt<R: Rng + ?Sized>(
    ctx: &ConstraintContext,
    rng: &mut R,
) -> Result<Schedule, AttemptInfeasible> {
    let mut state = AttemptState::new(ctx);

    for pin in ctx.resolved_pins() {
        state.assign(pin.slot, pin.day, pin.agent);
    }

    let mut order: Vec<usize> = (0..ctx.slot_count()).collect();
    if ctx.visit_order() == VisitOrder::Shuffled {
        order.shuffle(rng);
    }

    let weight = ctx.preference_weight() as usize;
    let mut pool: Vec<usize> = Vec::new();

    for slot in order {
        let (day, shift_idx) = ctx.slot_coords(slot);
        if ctx.days()[day].excluded {
            continue;
        }
        let shift = &ctx.shifts()[shift_idx];
        let capacity = shift.capacity as usize;

        while state.seats[slot].len() < capacity {
            pool.clear();
            for (idx, agent) in ctx.agents().iter().enumerate() {
                if !state.is_candidate(ctx, idx, slot, day, &shift.name) {
                    continue;
                }
                let copies = if agent.prefers(&shift.name) { weight } else { 1 };
                pool.extend(std::iter::repeat(idx).take(copies));
            }

            let Some(&chosen) = pool.choose(rng) else {
                let err = AttemptInfeasible {
                    day: ctx.days()[day].label.clone(),
                    shift: shift.name.clone(),
                    seat: state.seats[slot].len() + 1,
                };
                trace!(%err, "attempt failed");
                return Err(err);
            };
            state.assign(slot, day, chosen);
        }
    }

    Ok(state.into_schedule(ctx))
}

/// Runs one attempt on a fresh stream seeded with `seed`.
///
/// The same context and seed always produce the same result.
pub fn attempt_seeded(ctx: &ConstraintContext, seed: u64) -> Result<Schedule, AttemptInfeasible> {
    let mut rng = SmallRng::seed_from_u64(seed);
    attempt(ctx, &mut rng)
}
