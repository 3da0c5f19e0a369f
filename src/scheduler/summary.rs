//! Reporting view of an accepted schedule.
//!
//! Derives everything a table or spreadsheet writer needs: per-agent
//! totals in roster order, per-slot rosters, and an optional split of
//! large slots into two labeled groups.
//!
//! # Axis Split
//! A slot whose assignee count equals [`AxisSplit::size`] is shuffled and
//! cut into two equal halves. The split is for presentation only and has
//! no bearing on quotas or acceptance rules.

use std::collections::BTreeMap;

use rand::prelude::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::models::{Agent, Schedule, SlotAssignees, TimeSlot};

/// Presentation split of large slots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AxisSplit {
    /// Assignee count that triggers a split. Must be even; 0 disables.
    pub size: usize,
    /// Labels of the two halves.
    pub labels: [String; 2],
}

impl Default for AxisSplit {
    fn default() -> Self {
        Self {
            size: 4,
            labels: ["A".to_string(), "B".to_string()],
        }
    }
}

impl AxisSplit {
    /// A split that never triggers.
    pub fn disabled() -> Self {
        Self {
            size: 0,
            ..Self::default()
        }
    }

    /// Whether a slot with `count` assignees is split.
    pub fn applies_to(&self, count: usize) -> bool {
        self.size > 0 && self.size % 2 == 0 && count == self.size
    }
}

/// One labeled half of a split slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitGroup {
    /// Group label.
    pub label: String,
    /// Agents in the group.
    pub agents: Vec<String>,
}

/// Roster of one slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotRoster {
    /// The slot.
    pub slot: TimeSlot,
    /// Assignees (or the excluded marker).
    pub assignees: SlotAssignees,
    /// Present when the slot was split.
    pub groups: Option<[SplitGroup; 2]>,
}

/// Totals for one agent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentSummary {
    /// Agent name.
    pub name: String,
    /// Quota from the input.
    pub quota: u32,
    /// Slots assigned.
    pub total: u32,
    /// Slots per shift-type.
    pub by_shift: BTreeMap<String, u32>,
    /// Distinct days worked.
    pub distinct_days: usize,
}

impl AgentSummary {
    /// Unused quota.
    pub fn remaining(&self) -> u32 {
        self.quota.saturating_sub(self.total)
    }
}

/// Reporting view of a schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleSummary {
    /// One row per agent, in roster order (zero totals included).
    pub agents: Vec<AgentSummary>,
    /// One row per slot, day-major.
    pub slots: Vec<SlotRoster>,
    /// Filled seats across the horizon.
    pub filled_seats: u32,
}

impl ScheduleSummary {
    /// Builds the summary.
    ///
    /// `rng` is only used for axis splits.
    pub fn calculate<R: Rng + ?Sized>(
        schedule: &Schedule,
        agents: &[Agent],
        split: &AxisSplit,
        rng: &mut R,
    ) -> Self {
        let mut loads = schedule.agent_loads();
        let agent_rows: Vec<AgentSummary> = agents
            .iter()
            .map(|a| {
                let load = loads.remove(&a.name).unwrap_or_default();
                AgentSummary {
                    name: a.name.clone(),
                    quota: a.quota,
                    total: load.total,
                    distinct_days: load.distinct_days(),
                    by_shift: load.by_shift,
                }
            })
            .collect();

        let slots = schedule
            .entries
            .iter()
            .map(|entry| {
                let agents = entry.assignees.agents();
                let groups = split
                    .applies_to(agents.len())
                    .then(|| split_groups(agents, split, rng));
                SlotRoster {
                    slot: entry.slot.clone(),
                    assignees: entry.assignees.clone(),
                    groups,
                }
            })
            .collect();

        Self {
            filled_seats: agent_rows.iter().map(|a| a.total).sum(),
            agents: agent_rows,
            slots,
        }
    }

    /// (name, total) pairs in roster order.
    pub fn tally(&self) -> Vec<(&str, u32)> {
        self.agents
            .iter()
            .map(|a| (a.name.as_str(), a.total))
            .collect()
    }

    /// Row for one agent.
    pub fn agent(&self, name: &str) -> Option<&AgentSummary> {
        self.agents.iter().find(|a| a.name == name)
    }
}

fn split_groups<R: Rng + ?Sized>(
    agents: &[String],
    split: &AxisSplit,
    rng: &mut R,
) -> [SplitGroup; 2] {
    let mut shuffled = agents.to_vec();
    shuffled.shuffle(rng);
    let second = shuffled.split_off(shuffled.len() / 2);
    let [first_label, second_label] = split.labels.clone();
    [
        SplitGroup {
            label: first_label,
            agents: shuffled,
        },
        SplitGroup {
            label: second_label,
            agents: second,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn slot(day: usize, shift: &str) -> TimeSlot {
        let date = NaiveDate::from_ymd_opt(2025, 1, 6 + day as u32).unwrap();
        TimeSlot::new(day, format!("D{day}"), date, shift)
    }

    fn staffed(names: &[&str]) -> SlotAssignees {
        SlotAssignees::Staffed(names.iter().map(|s| s.to_string()).collect())
    }

    fn sample() -> (Schedule, Vec<Agent>) {
        let mut s = Schedule::new();
        s.push(slot(0, "Manhã"), staffed(&["Ana", "Bia", "Caio", "Duda"]));
        s.push(slot(0, "Tarde"), staffed(&["Ana", "Edu"]));
        s.push(slot(1, "Manhã"), SlotAssignees::Excluded);
        s.push(slot(1, "Tarde"), SlotAssignees::Excluded);
        let agents = ["Ana", "Bia", "Caio", "Duda", "Edu", "Fabi"]
            .iter()
            .map(|n| Agent::new(*n, 3))
            .collect();
        (s, agents)
    }

    #[test]
    fn test_tally_in_roster_order() {
        let (s, agents) = sample();
        let mut rng = SmallRng::seed_from_u64(1);
        let summary = ScheduleSummary::calculate(&s, &agents, &AxisSplit::default(), &mut rng);

        assert_eq!(
            summary.tally(),
            vec![
                ("Ana", 2),
                ("Bia", 1),
                ("Caio", 1),
                ("Duda", 1),
                ("Edu", 1),
                ("Fabi", 0)
            ]
        );
        assert_eq!(summary.filled_seats, 6);
        let ana = summary.agent("Ana").unwrap();
        assert_eq!(ana.by_shift["Tarde"], 1);
        assert_eq!(ana.distinct_days, 1);
        assert_eq!(ana.remaining(), 1);
    }

    #[test]
    fn test_split_only_matching_slots() {
        let (s, agents) = sample();
        let mut rng = SmallRng::seed_from_u64(9);
        let summary = ScheduleSummary::calculate(&s, &agents, &AxisSplit::default(), &mut rng);

        let groups = summary.slots[0].groups.as_ref().unwrap();
        assert_eq!(groups[0].label, "A");
        assert_eq!(groups[1].label, "B");
        assert_eq!(groups[0].agents.len(), 2);
        assert_eq!(groups[1].agents.len(), 2);
        let mut all: Vec<_> = groups.iter().flat_map(|g| g.agents.clone()).collect();
        all.sort();
        assert_eq!(all, vec!["Ana", "Bia", "Caio", "Duda"]);

        assert!(summary.slots[1].groups.is_none()); // 2 assignees
        assert!(summary.slots[2].groups.is_none()); // excluded
    }

    #[test]
    fn test_split_disabled() {
        let (s, agents) = sample();
        let mut rng = SmallRng::seed_from_u64(9);
        let summary = ScheduleSummary::calculate(&s, &agents, &AxisSplit::disabled(), &mut rng);
        assert!(summary.slots.iter().all(|r| r.groups.is_none()));
    }

    #[test]
    fn test_split_does_not_touch_tally() {
        let (s, agents) = sample();
        let mut rng = SmallRng::seed_from_u64(4);
        let summary = ScheduleSummary::calculate(&s, &agents, &AxisSplit::default(), &mut rng);
        assert_eq!(summary.slots[0].assignees, s.entries[0].assignees);
        assert_eq!(summary.filled_seats, s.tally().values().sum::<u32>());
    }

    #[test]
    fn test_odd_size_never_applies() {
        let split = AxisSplit {
            size: 3,
            ..AxisSplit::default()
        };
        assert!(!split.applies_to(3));
        assert!(AxisSplit::default().applies_to(4));
    }
}
