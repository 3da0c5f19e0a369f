//! End-to-end roster generation.
//!
//! Ties the pieces together: calendar → context → retry loop → summary.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::RosterConfig;
use crate::context::{ConstraintContext, RosterRequest};
use crate::error::RosterError;
use crate::models::Schedule;
use crate::scheduler::{RetryController, RunStats, ScheduleSummary};

/// Result of a successful run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterOutcome {
    /// The accepted schedule.
    pub schedule: Schedule,
    /// Reporting view of the schedule.
    pub summary: ScheduleSummary,
    /// Run counters.
    pub stats: RunStats,
}

/// Generates a roster for `request`.
///
/// Uses `config.random_seed` when set, OS entropy otherwise.
///
/// # Errors
/// - [`RosterError::Config`] if the configuration is out of range.
/// - [`RosterError::InvalidInput`] if the request fails validation.
/// - [`RosterError::Infeasible`] if no attempt is accepted.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use u_roster::{generate_roster, RosterConfig, RosterRequest};
/// use u_roster::models::{Agent, ShiftType};
///
/// let request = RosterRequest::new(
///     ["Ana", "Bia", "Caio", "Duda", "Edu", "Fabi"]
///         .iter()
///         .map(|n| Agent::new(*n, 5))
///         .collect(),
///     vec![ShiftType::new("Manhã", 4), ShiftType::new("Tarde", 2)],
///     NaiveDate::from_ymd_opt(2025, 1, 6).unwrap(),
/// );
/// let outcome = generate_roster(&request, &RosterConfig::new().with_random_seed(7)).unwrap();
/// assert_eq!(outcome.summary.filled_seats, 30);
/// ```
pub fn generate_roster(
    request: &RosterRequest,
    config: &RosterConfig,
) -> Result<RosterOutcome, RosterError> {
    let mut rng = match config.random_seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_rng(&mut rand::rng()),
    };
    generate_roster_with(request, config, &mut rng)
}

/// Generates a roster drawing all randomness from `rng`.
pub fn generate_roster_with<R: Rng + ?Sized>(
    request: &RosterRequest,
    config: &RosterConfig,
    rng: &mut R,
) -> Result<RosterOutcome, RosterError> {
    config.validate()?;
    let ctx = ConstraintContext::from_request(request, config)?;
    info!(
        agents = ctx.agents().len(),
        days = ctx.days().len(),
        seats = ctx.total_seats(),
        quota = ctx.total_quota(),
        "generating roster"
    );

    let controller = RetryController::new(config.rule_set()).with_budget(config.attempt_budget);
    let (schedule, stats) = controller.run(&ctx, rng)?;
    let summary = ScheduleSummary::calculate(&schedule, ctx.agents(), &config.split, rng);

    Ok(RosterOutcome {
        schedule,
        summary,
        stats,
    })
}
