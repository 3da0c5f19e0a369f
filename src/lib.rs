//! Shift rostering for the U-Engine ecosystem.
//!
//! Assigns a fixed pool of agents to a week of (day × shift-type) slots.
//! Each agent has a quota of slots; each shift-type has a per-slot
//! capacity. A randomized greedy engine fills the grid and a bounded retry
//! loop restarts it until the result passes the fairness rules.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Agent`, `ShiftType`, `Pin`, `TimeSlot`,
//!   `Schedule`, and the working-day `CalendarResolver`
//! - **`validation`**: Input integrity checks (duplicate names, unknown
//!   shifts, pin conflicts)
//! - **`context`**: `RosterRequest` and the immutable `ConstraintContext`
//! - **`rules`**: Acceptance rules applied to finished schedules
//! - **`scheduler`**: Assignment engine, retry controller, summary
//! - **`config`**: Tunables, loadable from TOML
//! - **`roster`**: `generate_roster`, the end-to-end entry point
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use u_roster::models::{Agent, ShiftType};
//! use u_roster::{generate_roster, RosterConfig, RosterRequest};
//!
//! let agents = ["Ana", "Bia", "Caio", "Duda", "Edu", "Fabi"]
//!     .iter()
//!     .map(|n| Agent::new(*n, 5))
//!     .collect();
//! let request = RosterRequest::new(
//!     agents,
//!     vec![ShiftType::new("Manhã", 4), ShiftType::new("Tarde", 2)],
//!     NaiveDate::from_ymd_opt(2025, 1, 6).unwrap(),
//! );
//!
//! let outcome = generate_roster(&request, &RosterConfig::new().with_random_seed(1)).unwrap();
//! for (name, total) in outcome.summary.tally() {
//!     assert!(total <= 5, "{name} over quota");
//! }
//! ```
//!
//! # References
//!
//! - Ernst et al. (2004), "Staff scheduling and rostering: A review of
//!   applications, methods and models"
//! - Burke et al. (2004), "The State of the Art of Nurse Rostering"

pub mod config;
pub mod context;
pub mod error;
pub mod models;
pub mod roster;
pub mod rules;
pub mod scheduler;
pub mod validation;

pub use config::{ConfigError, RosterConfig};
pub use context::{ConstraintContext, RosterRequest};
pub use error::{Result, RosterError};
pub use roster::{generate_roster, generate_roster_with, RosterOutcome};
