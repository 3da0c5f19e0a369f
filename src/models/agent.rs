//! Agent model.
//!
//! Agents are the people being rostered. Each agent has a quota (the
//! maximum number of slots it may take across the horizon) and optional
//! restrictions on which shift-types it may work.
//!
//! # Hard vs. soft
//! - `daily_exclusive` and `fixed_shift` are hard: they remove the agent
//!   from the candidate set.
//! - `preference` is soft: it only raises selection probability.

use serde::{Deserialize, Serialize};

/// Upper bound on a single agent's quota.
pub const MAX_QUOTA: u32 = 50;

/// An agent that can be assigned to slots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Agent {
    /// Unique, case-sensitive name.
    pub name: String,
    /// Maximum number of slots across the horizon.
    pub quota: u32,
    /// At most one shift-type per day.
    #[serde(default)]
    pub daily_exclusive: bool,
    /// Restricts candidacy to exactly one shift-type.
    #[serde(default)]
    pub fixed_shift: Option<String>,
    /// Shift-type favored during selection.
    #[serde(default)]
    pub preference: Option<String>,
}

impl Agent {
    /// Creates an agent with no restrictions.
    pub fn new(name: impl Into<String>, quota: u32) -> Self {
        Self {
            name: name.into(),
            quota,
            daily_exclusive: false,
            fixed_shift: None,
            preference: None,
        }
    }

    /// Marks the agent as daily-exclusive.
    pub fn exclusive(mut self) -> Self {
        self.daily_exclusive = true;
        self
    }

    /// Restricts the agent to a single shift-type.
    pub fn with_fixed_shift(mut self, shift: impl Into<String>) -> Self {
        self.fixed_shift = Some(shift.into());
        self
    }

    /// Sets the soft shift-type preference.
    pub fn with_preference(mut self, shift: impl Into<String>) -> Self {
        self.preference = Some(shift.into());
        self
    }

    /// Whether the agent may work the given shift-type at all.
    #[inline]
    pub fn allows_shift(&self, shift: &str) -> bool {
        match self.fixed_shift.as_deref() {
            None => true,
            Some(fixed) => fixed == shift,
        }
    }

    /// Whether the agent prefers the given shift-type.
    #[inline]
    pub fn prefers(&self, shift: &str) -> bool {
        self.preference.as_deref() == Some(shift)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_agent_builder() {
        let a = Agent::new("Ana", 3)
            .exclusive()
            .with_fixed_shift("Manhã")
            .with_preference("Manhã");

        assert_eq!(a.name, "Ana");
        assert_eq!(a.quota, 3);
        assert!(a.daily_exclusive);
        assert_eq!(a.fixed_shift.as_deref(), Some("Manhã"));
        assert!(a.prefers("Manhã"));
        assert!(!a.prefers("Tarde"));
    }

    #[test]
    fn test_allows_shift() {
        let free = Agent::new("Bia", 2);
        assert!(free.allows_shift("Manhã"));
        assert!(free.allows_shift("Tarde"));

        let fixed = Agent::new("Caio", 2).with_fixed_shift("Tarde");
        assert!(!fixed.allows_shift("Manhã"));
        assert!(fixed.allows_shift("Tarde"));
    }

    #[test]
    fn test_deserialize_defaults() {
        let a: Agent = serde_json::from_str(r#"{"name":"Duda","quota":4}"#).unwrap();
        assert!(!a.daily_exclusive);
        assert!(a.fixed_shift.is_none());
        assert!(a.preference.is_none());
    }
}
