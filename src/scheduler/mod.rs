//! Roster generation: engine, retry loop, and summary.
//!
//! # Algorithm
//!
//! The engine is a randomized greedy filler with no backtracking. Each
//! attempt either fills every seat or stops at the first seat without a
//! candidate. The retry controller restarts it from scratch until an
//! attempt both completes and passes the acceptance rules, or the budget
//! is spent.
//!
//! # Summary
//!
//! `ScheduleSummary` derives per-agent totals and per-slot rosters from
//! the accepted schedule for reporting.

mod engine;
mod retry;
mod summary;

pub use engine::{attempt, attempt_seeded, AttemptInfeasible, VisitOrder};
pub use retry::{RetryController, RunOutcome, RunStats};
pub use summary::{AgentSummary, AxisSplit, ScheduleSummary, SlotRoster, SplitGroup};
