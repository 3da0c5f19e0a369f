//! Preference-trend rule.
//!
//! An agent with a soft preference that ends up with exactly
//! `trigger_total` slots must show that preference: at least
//! `min_preferred` slots of the preferred shift-type and at most
//! `max_other` of any other. Other totals are not checked.

use serde::{Deserialize, Serialize};

use super::ScheduleRule;
use crate::models::{Agent, Schedule, Violation};

/// Requires a visible preference at one exact workload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreferenceTrendRule {
    /// Exact total that activates the rule.
    pub trigger_total: u32,
    /// Minimum slots of the preferred shift-type.
    pub min_preferred: u32,
    /// Maximum slots of non-preferred shift-types.
    pub max_other: u32,
}

impl Default for PreferenceTrendRule {
    fn default() -> Self {
        Self {
            trigger_total: 5,
            min_preferred: 2,
            max_other: 3,
        }
    }
}

impl ScheduleRule for PreferenceTrendRule {
    fn name(&self) -> &'static str {
        "preference_trend"
    }

    fn evaluate(&self, schedule: &Schedule, agents: &[Agent]) -> Vec<Violation> {
        let loads = schedule.agent_loads();
        let mut violations = Vec::new();

        for agent in agents {
            let Some(preferred) = agent.preference.as_deref() else {
                continue;
            };
            let Some(load) = loads.get(&agent.name) else {
                continue;
            };
            if load.total != self.trigger_total {
                continue;
            }

            let on_preferred = load.count_of(preferred);
            let other = load.total - on_preferred;
            if on_preferred < self.min_preferred || other > self.max_other {
                violations.push(Violation::preference_trend(
                    &agent.name,
                    format!(
                        "'{}' prefers {preferred} but got {on_preferred} of {} (other: {other})",
                        agent.name, load.total
                    ),
                ));
            }
        }
        violations
    }
}
