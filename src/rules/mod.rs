//! Acceptance rules for completed schedules.
//!
//! The assignment engine only enforces hard per-slot constraints. These
//! rules look at the whole schedule afterwards and reject candidates whose
//! load is spread badly. A candidate is accepted only if every rule in the
//! [`RuleSet`] is satisfied.
//!
//! # Usage
//!
//! ```
//! use u_roster::rules::{DiversityRule, PreferenceTrendRule, RuleSet};
//!
//! let rules = RuleSet::new()
//!     .with_rule(DiversityRule::default())
//!     .with_rule(PreferenceTrendRule::default());
//! assert_eq!(rules.len(), 2);
//! ```

mod diversity;
mod preference;

pub use diversity::DiversityRule;
pub use preference::PreferenceTrendRule;

use std::fmt::Debug;
use std::sync::Arc;

use crate::models::{Agent, Schedule, Violation};

/// A predicate over a completed schedule.
///
/// Implementations must be pure: evaluating the same schedule twice
/// yields the same violations.
pub trait ScheduleRule: Send + Sync + Debug {
    /// Rule name (e.g., "diversity").
    fn name(&self) -> &'static str;

    /// Returns every violation found (empty = satisfied).
    fn evaluate(&self, schedule: &Schedule, agents: &[Agent]) -> Vec<Violation>;

    /// Whether the schedule satisfies this rule.
    fn is_satisfied(&self, schedule: &Schedule, agents: &[Agent]) -> bool {
        self.evaluate(schedule, agents).is_empty()
    }
}

/// A rejection: the first failing rule and its violations.
#[derive(Debug, Clone)]
pub struct Rejection {
    /// Name of the failing rule.
    pub rule: &'static str,
    /// Violations it reported.
    pub violations: Vec<Violation>,
}

/// An ordered conjunction of rules.
#[derive(Clone, Default)]
pub struct RuleSet {
    rules: Vec<Arc<dyn ScheduleRule>>,
}

impl RuleSet {
    /// Creates an empty rule set (accepts everything).
    pub fn new() -> Self {
        Self::default()
    }

    /// The diversity and preference-trend rules with the given settings.
    pub fn standard(diversity: DiversityRule, preference: PreferenceTrendRule) -> Self {
        Self::new().with_rule(diversity).with_rule(preference)
    }

    /// Appends a rule.
    pub fn with_rule<R: ScheduleRule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Arc::new(rule));
        self
    }

    /// Number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the set has no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Checks rules in order, stopping at the first that fails.
    pub fn check(&self, schedule: &Schedule, agents: &[Agent]) -> Result<(), Rejection> {
        for rule in &self.rules {
            let violations = rule.evaluate(schedule, agents);
            if !violations.is_empty() {
                return Err(Rejection {
                    rule: rule.name(),
                    violations,
                });
            }
        }
        Ok(())
    }

    /// Collects violations from every rule.
    pub fn evaluate_all(&self, schedule: &Schedule, agents: &[Agent]) -> Vec<Violation> {
        self.rules
            .iter()
            .flat_map(|r| r.evaluate(schedule, agents))
            .collect()
    }
}

impl Debug for RuleSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleSet")
            .field(
                "rules",
                &self.rules.iter().map(|r| r.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}
