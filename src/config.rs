//! Run configuration.
//!
//! Everything that tunes a roster run without changing its input: the
//! attempt budget, selection bias, calendar handling, acceptance rule
//! thresholds, and presentation split. Loadable from TOML.
//!
//! # Examples
//!
//! ```
//! use u_roster::config::RosterConfig;
//! use u_roster::models::ExclusionPolicy;
//!
//! let config = RosterConfig::from_toml_str(r#"
//!     attempt_budget = 500
//!     preference_weight = 5
//!     visit_order = "shuffled"
//!
//!     [calendar]
//!     exclusion_policy = "fill"
//!
//!     [rules.preference]
//!     min_preferred = 3
//!     max_other = 2
//! "#).unwrap();
//!
//! assert_eq!(config.attempt_budget, 500);
//! assert_eq!(config.calendar.exclusion_policy, ExclusionPolicy::Fill);
//! assert_eq!(config.rules.preference.trigger_total, 5);
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{
    CalendarResolver, ExclusionPolicy, LabelStyle, RecurringHolidays, DEFAULT_HORIZON_DAYS,
};
use crate::rules::{DiversityRule, PreferenceTrendRule, RuleSet};
use crate::scheduler::{AxisSplit, VisitOrder};

/// Default number of engine attempts per run.
pub const DEFAULT_ATTEMPT_BUDGET: u32 = 1000;

/// Longest accepted horizon, in calendar days.
pub const MAX_HORIZON_DAYS: usize = 366;

/// Default multiplicity of a preferred candidate in the selection pool.
pub const DEFAULT_PREFERENCE_WEIGHT: u32 = 3;

/// Configuration error.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not valid TOML for this schema.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// A value is out of range.
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main run configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct RosterConfig {
    /// Maximum engine attempts before reporting infeasibility.
    pub attempt_budget: u32,
    /// Pool multiplicity for candidates whose preference matches the slot.
    pub preference_weight: u32,
    /// Order in which slots are filled.
    pub visit_order: VisitOrder,
    /// Random seed for reproducible runs. `None` = OS entropy.
    pub random_seed: Option<u64>,
    /// Calendar settings.
    pub calendar: CalendarConfig,
    /// Acceptance rule thresholds.
    pub rules: RulesConfig,
    /// Presentation split of large slots.
    pub split: AxisSplit,
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self {
            attempt_budget: DEFAULT_ATTEMPT_BUDGET,
            preference_weight: DEFAULT_PREFERENCE_WEIGHT,
            visit_order: VisitOrder::default(),
            random_seed: None,
            calendar: CalendarConfig::default(),
            rules: RulesConfig::default(),
            split: AxisSplit::default(),
        }
    }
}

impl RosterConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if the file doesn't exist, contains invalid TOML,
    /// or holds out-of-range values.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let config = Self::from_toml_file(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a TOML file without range checks.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Sets the attempt budget.
    pub fn with_attempt_budget(mut self, budget: u32) -> Self {
        self.attempt_budget = budget;
        self
    }

    /// Sets the preference weight.
    pub fn with_preference_weight(mut self, weight: u32) -> Self {
        self.preference_weight = weight;
        self
    }

    /// Sets the slot visit order.
    pub fn with_visit_order(mut self, order: VisitOrder) -> Self {
        self.visit_order = order;
        self
    }

    /// Sets the random seed.
    pub fn with_random_seed(mut self, seed: u64) -> Self {
        self.random_seed = Some(seed);
        self
    }

    /// Sets the exclusion policy.
    pub fn with_exclusion_policy(mut self, policy: ExclusionPolicy) -> Self {
        self.calendar.exclusion_policy = policy;
        self
    }

    /// Sets the horizon length in days.
    pub fn with_horizon_days(mut self, days: usize) -> Self {
        self.calendar.horizon_days = days;
        self
    }

    /// Checks value ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.attempt_budget == 0 {
            return Err(ConfigError::Invalid("attempt_budget must be positive".into()));
        }
        if self.preference_weight == 0 {
            return Err(ConfigError::Invalid(
                "preference_weight must be positive".into(),
            ));
        }
        if self.calendar.horizon_days == 0 {
            return Err(ConfigError::Invalid("horizon_days must be positive".into()));
        }
        if self.calendar.horizon_days > MAX_HORIZON_DAYS {
            return Err(ConfigError::Invalid(format!(
                "horizon_days {} exceeds {MAX_HORIZON_DAYS}",
                self.calendar.horizon_days
            )));
        }
        let d = &self.rules.diversity;
        if d.shift_spread_from > d.shift_spread_to {
            return Err(ConfigError::Invalid(format!(
                "diversity band {}..={} is empty",
                d.shift_spread_from, d.shift_spread_to
            )));
        }
        let p = &self.rules.preference;
        if p.min_preferred > p.trigger_total {
            return Err(ConfigError::Invalid(format!(
                "min_preferred {} exceeds trigger_total {}",
                p.min_preferred, p.trigger_total
            )));
        }
        if self.split.size % 2 != 0 {
            return Err(ConfigError::Invalid(format!(
                "split size {} must be even",
                self.split.size
            )));
        }
        Ok(())
    }

    /// Builds the rule set described by `rules`.
    pub fn rule_set(&self) -> RuleSet {
        RuleSet::standard(self.rules.diversity, self.rules.preference)
    }
}

/// Calendar settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct CalendarConfig {
    /// Calendar days in the horizon.
    pub horizon_days: usize,
    /// Day label style.
    pub label_style: LabelStyle,
    /// What to do with holidays.
    pub exclusion_policy: ExclusionPolicy,
    /// Built-in holiday calendar to apply on top of explicit dates.
    pub holiday_preset: Option<HolidayPreset>,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            horizon_days: DEFAULT_HORIZON_DAYS,
            label_style: LabelStyle::default(),
            exclusion_policy: ExclusionPolicy::default(),
            holiday_preset: None,
        }
    }
}

impl CalendarConfig {
    /// Builds a resolver from these settings.
    pub fn resolver(&self) -> CalendarResolver {
        let resolver = CalendarResolver::new()
            .with_horizon(self.horizon_days)
            .with_label_style(self.label_style)
            .with_policy(self.exclusion_policy);
        match self.holiday_preset {
            Some(HolidayPreset::BrazilFixed) => {
                resolver.with_source(RecurringHolidays::brazil_fixed())
            }
            None => resolver,
        }
    }
}

/// Built-in holiday calendars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HolidayPreset {
    /// Brazilian fixed-date national holidays.
    BrazilFixed,
}

/// Acceptance rule thresholds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct RulesConfig {
    /// Distribution-diversity thresholds.
    pub diversity: DiversityRule,
    /// Preference-trend thresholds.
    pub preference: PreferenceTrendRule,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let c = RosterConfig::default();
        assert_eq!(c.attempt_budget, 1000);
        assert_eq!(c.preference_weight, 3);
        assert_eq!(c.visit_order, VisitOrder::Fixed);
        assert_eq!(c.calendar.horizon_days, 5);
        assert_eq!(c.split.size, 4);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn test_empty_toml_is_default() {
        let c = RosterConfig::from_toml_str("").unwrap();
        assert_eq!(c, RosterConfig::default());
    }

    #[test]
    fn test_parse_nested() {
        let c = RosterConfig::from_toml_str(
            r#"
            random_seed = 42

            [calendar]
            horizon_days = 7
            label_style = "weekday"
            holiday_preset = "brazil_fixed"

            [rules.diversity]
            min_distinct_days = 3

            [split]
            size = 6
            labels = ["Norte", "Sul"]
            "#,
        )
        .unwrap();
        assert_eq!(c.random_seed, Some(42));
        assert_eq!(c.calendar.label_style, LabelStyle::Weekday);
        assert_eq!(c.calendar.holiday_preset, Some(HolidayPreset::BrazilFixed));
        assert_eq!(c.rules.diversity.min_distinct_days, 3);
        assert_eq!(c.rules.diversity.shift_spread_to, 5);
        assert_eq!(c.split.labels, ["Norte".to_string(), "Sul".to_string()]);
    }

    #[test]
    fn test_parse_error() {
        let err = RosterConfig::from_toml_str("attempt_budget = \"many\"").unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));
    }

    #[test]
    fn test_validate_rejects() {
        assert!(RosterConfig::new().with_attempt_budget(0).validate().is_err());
        assert!(RosterConfig::new()
            .with_preference_weight(0)
            .validate()
            .is_err());
        assert!(RosterConfig::new().with_horizon_days(0).validate().is_err());
        assert!(RosterConfig::new().with_horizon_days(366).validate().is_ok());

        let mut c = RosterConfig::new();
        c.split.size = 3;
        assert!(matches!(c.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_load_missing_file() {
        let err = RosterConfig::load("/nonexistent/roster.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_resolver_from_config() {
        let c = RosterConfig::new().with_exclusion_policy(ExclusionPolicy::Fill);
        // Mon 2025-04-21 is Tiradentes.
        let mut cal = c.calendar.clone();
        cal.holiday_preset = Some(HolidayPreset::BrazilFixed);
        let start = chrono::NaiveDate::from_ymd_opt(2025, 4, 21).unwrap();
        let days = cal.resolver().resolve(start);
        assert_eq!(days.len(), 5);
        assert!(days[0].excluded);
    }

    #[test]
    fn test_huge_horizon_rejected() {
        let c = RosterConfig::from_toml_str("[calendar]\nhorizon_days = 100000000").unwrap();
        let err = c.validate().unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(ref m) if m.contains("horizon_days")));
    }
}
