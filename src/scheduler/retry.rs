//! Bounded restart loop around the assignment engine.
//!
//! # State Machine
//!
//! ```text
//! Attempting --(engine ok + rules pass)--> Accepted
//!     |  ^
//!     |  +--(engine fails | rules reject)--+
//!     +--(budget spent)--> Exhausted
//! ```
//!
//! Every attempt draws from its own stream, seeded from a master RNG, so
//! a single master seed reproduces the whole run.

use std::collections::BTreeMap;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::engine::attempt_seeded;
use crate::config::DEFAULT_ATTEMPT_BUDGET;
use crate::context::ConstraintContext;
use crate::error::RosterError;
use crate::models::Schedule;
use crate::rules::RuleSet;

/// Counters collected over one run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunStats {
    /// Attempts made (including the accepted one).
    pub attempts: u32,
    /// Attempts that ran out of candidates.
    pub engine_failures: u32,
    /// Rejections per rule name.
    pub rejections: BTreeMap<String, u32>,
}

impl RunStats {
    /// Total rule rejections.
    pub fn total_rejections(&self) -> u32 {
        self.rejections.values().sum()
    }
}

/// Terminal state of a run.
#[derive(Debug, Clone)]
pub enum RunOutcome {
    /// A schedule passed every rule.
    Accepted {
        /// The accepted schedule.
        schedule: Schedule,
        /// Run counters.
        stats: RunStats,
    },
    /// The budget ran out.
    Exhausted {
        /// Run counters.
        stats: RunStats,
    },
}

/// Drives the engine until a schedule is accepted or the budget runs out.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use u_roster::context::ConstraintContext;
/// use u_roster::models::{Agent, CalendarResolver, ShiftType};
/// use u_roster::rules::RuleSet;
/// use u_roster::scheduler::RetryController;
///
/// let days = CalendarResolver::new()
///     .with_horizon(2)
///     .resolve(NaiveDate::from_ymd_opt(2025, 1, 6).unwrap());
/// let ctx = ConstraintContext::builder(
///     vec![Agent::new("Ana", 2), Agent::new("Bia", 2)],
///     vec![ShiftType::new("Manhã", 1), ShiftType::new("Tarde", 1)],
///     days,
/// )
/// .build()
/// .unwrap();
///
/// let (schedule, stats) = RetryController::new(RuleSet::new())
///     .run_seeded(&ctx, 42)
///     .unwrap();
/// assert_eq!(schedule.tally().values().sum::<u32>(), 4);
/// assert!(stats.attempts >= 1);
/// ```
#[derive(Debug, Clone)]
pub struct RetryController {
    budget: u32,
    rules: RuleSet,
}

impl RetryController {
    /// Creates a controller with the default budget.
    pub fn new(rules: RuleSet) -> Self {
        Self {
            budget: DEFAULT_ATTEMPT_BUDGET,
            rules,
        }
    }

    /// Sets the attempt budget (at least 1).
    pub fn with_budget(mut self, budget: u32) -> Self {
        self.budget = budget.max(1);
        self
    }

    /// The attempt budget.
    pub fn budget(&self) -> u32 {
        self.budget
    }

    /// Runs attempts until acceptance or exhaustion.
    ///
    /// Never fails: exhaustion is reported as [`RunOutcome::Exhausted`].
    pub fn drive<R: Rng + ?Sized>(&self, ctx: &ConstraintContext, master: &mut R) -> RunOutcome {
        let mut stats = RunStats::default();

        while stats.attempts < self.budget {
            stats.attempts += 1;
            let seed: u64 = master.random();

            let schedule = match attempt_seeded(ctx, seed) {
                Ok(schedule) => schedule,
                Err(err) => {
                    stats.engine_failures += 1;
                    debug!(attempt = stats.attempts, %err, "attempt infeasible");
                    continue;
                }
            };

            match self.rules.check(&schedule, ctx.agents()) {
                Ok(()) => {
                    info!(
                        attempts = stats.attempts,
                        engine_failures = stats.engine_failures,
                        rejections = stats.total_rejections(),
                        "roster accepted"
                    );
                    return RunOutcome::Accepted { schedule, stats };
                }
                Err(rejection) => {
                    *stats.rejections.entry(rejection.rule.to_string()).or_insert(0) += 1;
                    debug!(
                        attempt = stats.attempts,
                        rule = rejection.rule,
                        violations = rejection.violations.len(),
                        "schedule rejected"
                    );
                }
            }
        }

        warn!(
            attempts = stats.attempts,
            engine_failures = stats.engine_failures,
            rejections = stats.total_rejections(),
            "attempt budget exhausted"
        );
        RunOutcome::Exhausted { stats }
    }

    /// Runs and maps exhaustion to [`RosterError::Infeasible`].
    ///
    /// # Errors
    /// [`RosterError::Infeasible`] when no attempt is accepted.
    pub fn run<R: Rng + ?Sized>(
        &self,
        ctx: &ConstraintContext,
        master: &mut R,
    ) -> Result<(Schedule, RunStats), RosterError> {
        match self.drive(ctx, master) {
            RunOutcome::Accepted { schedule, stats } => Ok((schedule, stats)),
            RunOutcome::Exhausted { stats } => Err(RosterError::Infeasible {
                attempts: stats.attempts,
            }),
        }
    }

    /// Runs from a master seed.
    pub fn run_seeded(
        &self,
        ctx: &ConstraintContext,
        seed: u64,
    ) -> Result<(Schedule, RunStats), RosterError> {
        let mut master = SmallRng::seed_from_u64(seed);
        self.run(ctx, &mut master)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Agent, CalendarResolver, ShiftType};
    use crate::rules::{DiversityRule, PreferenceTrendRule};
    use chrono::NaiveDate;

    fn week() -> Vec<crate::models::WorkingDay> {
        CalendarResolver::new().resolve(NaiveDate::from_ymd_opt(2025, 1, 6).unwrap())
    }

    fn shifts() -> Vec<ShiftType> {
        vec![ShiftType::new("Manhã", 4), ShiftType::new("Tarde", 2)]
    }

    fn agents(quotas: &[u32]) -> Vec<Agent> {
        ["Ana", "Bia", "Caio", "Duda", "Edu", "Fabi"]
            .iter()
            .zip(quotas)
            .map(|(n, &q)| Agent::new(*n, q))
            .collect()
    }

    fn standard() -> RuleSet {
        RuleSet::standard(DiversityRule::default(), PreferenceTrendRule::default())
    }

    #[test]
    fn test_accepts_exact_fit() {
        let ctx = ConstraintContext::builder(agents(&[5; 6]), shifts(), week())
            .build()
            .unwrap();
        let (schedule, stats) = RetryController::new(standard()).run_seeded(&ctx, 1).unwrap();
        assert!(stats.attempts <= 1000);
        assert!(standard().check(&schedule, ctx.agents()).is_ok());
    }

    #[test]
    fn test_exhausts_on_short_roster() {
        let ctx = ConstraintContext::builder(agents(&[2, 2, 1, 1, 1, 1]), shifts(), week())
            .build()
            .unwrap();
        let controller = RetryController::new(standard()).with_budget(50);
        match controller.drive(&ctx, &mut SmallRng::seed_from_u64(0)) {
            RunOutcome::Exhausted { stats } => {
                assert_eq!(stats.attempts, 50);
                assert_eq!(stats.engine_failures, 50);
            }
            RunOutcome::Accepted { .. } => panic!("short roster cannot be accepted"),
        }
    }

    #[test]
    fn test_infeasible_error() {
        let ctx = ConstraintContext::builder(agents(&[2, 2, 1, 1, 1, 1]), shifts(), week())
            .build()
            .unwrap();
        let err = RetryController::new(standard())
            .with_budget(10)
            .run_seeded(&ctx, 0)
            .unwrap_err();
        assert!(matches!(err, RosterError::Infeasible { attempts: 10 }));
    }

    #[test]
    fn test_rule_rejections_counted() {
        // One agent, one shift: every 2-slot schedule lacks shift spread.
        let days = CalendarResolver::new()
            .with_horizon(2)
            .resolve(NaiveDate::from_ymd_opt(2025, 1, 6).unwrap());
        let ctx = ConstraintContext::builder(
            vec![Agent::new("Ana", 2)],
            vec![ShiftType::new("Manhã", 1)],
            days,
        )
        .build()
        .unwrap();
        let controller = RetryController::new(standard()).with_budget(5);
        let RunOutcome::Exhausted { stats } = controller.drive(&ctx, &mut SmallRng::seed_from_u64(3))
        else {
            panic!("expected exhaustion");
        };
        assert_eq!(stats.engine_failures, 0);
        assert_eq!(stats.rejections.get("diversity"), Some(&5));
    }

    #[test]
    fn test_budget_floor() {
        assert_eq!(RetryController::new(RuleSet::new()).with_budget(0).budget(), 1);
    }

    #[test]
    fn test_seeded_run_reproducible() {
        let ctx = ConstraintContext::builder(agents(&[5; 6]), shifts(), week())
            .build()
            .unwrap();
        let controller = RetryController::new(standard());
        let (a, sa) = controller.run_seeded(&ctx, 77).unwrap();
        let (b, sb) = controller.run_seeded(&ctx, 77).unwrap();
        assert_eq!(a, b);
        assert_eq!(sa, sb);
    }
}
