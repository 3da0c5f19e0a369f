//! Distribution-diversity rule.
//!
//! | Total slots | Requirement |
//! |-------------|-------------|
//! | 0..=1 | none |
//! | 2..=5 | at least 2 distinct shift-types |
//! | 6.. | at least 4 distinct days |

use serde::{Deserialize, Serialize};

use super::ScheduleRule;
use crate::models::{Agent, Schedule, Violation};

/// Rejects agents whose load is concentrated on one shift-type or a few days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiversityRule {
    /// Smallest total that requires shift spread.
    pub shift_spread_from: u32,
    /// Largest total that requires shift spread; above it day spread applies.
    pub shift_spread_to: u32,
    /// Distinct shift-types required in the shift-spread band.
    pub min_distinct_shifts: usize,
    /// Distinct days required above the shift-spread band.
    pub min_distinct_days: usize,
}

impl Default for DiversityRule {
    fn default() -> Self {
        Self {
            shift_spread_from: 2,
            shift_spread_to: 5,
            min_distinct_shifts: 2,
            min_distinct_days: 4,
        }
    }
}

impl ScheduleRule for DiversityRule {
    fn name(&self) -> &'static str {
        "diversity"
    }

    fn evaluate(&self, schedule: &Schedule, _agents: &[Agent]) -> Vec<Violation> {
        let mut violations = Vec::new();
        for (agent, load) in schedule.agent_loads() {
            if load.total < self.shift_spread_from {
                continue;
            }
            if load.total <= self.shift_spread_to {
                if load.distinct_shifts() < self.min_distinct_shifts {
                    violations.push(Violation::shift_spread(
                        &agent,
                        format!(
                            "'{agent}' works {} slots on {} shift-type(s), needs {}",
                            load.total,
                            load.distinct_shifts(),
                            self.min_distinct_shifts
                        ),
                    ));
                }
            } else if load.distinct_days() < self.min_distinct_days {
                violations.push(Violation::day_spread(
                    &agent,
                    format!(
                        "'{agent}' works {} slots on {} day(s), needs {}",
                        load.total,
                        load.distinct_days(),
                        self.min_distinct_days
                    ),
                ));
            }
        }
        violations
    }
}
