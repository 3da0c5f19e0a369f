//! Planning horizon and holiday calendars.
//!
//! Resolves a start date into the ordered list of days the roster covers.
//! Each day carries a human label and an `excluded` flag for holidays.
//!
//! # Exclusion Policies
//! - [`ExclusionPolicy::Drop`]: holidays are removed from the horizon, so
//!   a 5-day week with one holiday yields 4 days.
//! - [`ExclusionPolicy::Fill`]: holidays stay in the horizon; their slots
//!   are filled with the excluded marker and take no agents.
//!
//! The start date is used as-is. Use [`monday_of`] first when a
//! Monday-aligned week is wanted.

use std::collections::BTreeSet;
use std::fmt::Debug;
use std::sync::Arc;

use chrono::{Datelike, Days, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// Default number of days in the horizon (one working week).
pub const DEFAULT_HORIZON_DAYS: usize = 5;

/// How day labels are rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelStyle {
    /// Weekday name only, e.g. `Segunda-feira`.
    Weekday,
    /// Weekday name and day/month, e.g. `Segunda-feira (06/01)`.
    #[default]
    WeekdayWithDate,
}

/// What happens to holidays inside the horizon.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExclusionPolicy {
    /// Remove excluded days entirely.
    #[default]
    Drop,
    /// Keep excluded days and fill their slots with the excluded marker.
    Fill,
}

/// A source of holiday dates, queried once per calendar year.
pub trait HolidaySource: Send + Sync + Debug {
    /// Holidays falling in `year`.
    fn holidays_in(&self, year: i32) -> Vec<NaiveDate>;
}

/// An explicit set of excluded dates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExplicitHolidays {
    dates: BTreeSet<NaiveDate>,
}

impl ExplicitHolidays {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a date.
    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.dates.insert(date);
        self
    }

    /// Number of dates in the set.
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}

impl FromIterator<NaiveDate> for ExplicitHolidays {
    fn from_iter<I: IntoIterator<Item = NaiveDate>>(iter: I) -> Self {
        Self {
            dates: iter.into_iter().collect(),
        }
    }
}

impl HolidaySource for ExplicitHolidays {
    fn holidays_in(&self, year: i32) -> Vec<NaiveDate> {
        self.dates
            .iter()
            .filter(|d| d.year() == year)
            .copied()
            .collect()
    }
}

/// Holidays that fall on the same month/day every year.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecurringHolidays {
    /// (month, day) pairs.
    pub days: Vec<(u32, u32)>,
}

impl RecurringHolidays {
    /// Creates a source from (month, day) pairs.
    pub fn new(days: Vec<(u32, u32)>) -> Self {
        Self { days }
    }

    /// Brazilian fixed-date national holidays.
    ///
    /// Movable feasts (Carnaval, Sexta-feira Santa, Corpus Christi) are
    /// not included; supply them through [`ExplicitHolidays`].
    pub fn brazil_fixed() -> Self {
        Self::new(vec![
            (1, 1),   // Confraternização Universal
            (4, 21),  // Tiradentes
            (5, 1),   // Dia do Trabalho
            (9, 7),   // Independência
            (10, 12), // Nossa Senhora Aparecida
            (11, 2),  // Finados
            (11, 15), // Proclamação da República
            (11, 20), // Consciência Negra
            (12, 25), // Natal
        ])
    }
}

impl HolidaySource for RecurringHolidays {
    fn holidays_in(&self, year: i32) -> Vec<NaiveDate> {
        self.days
            .iter()
            .filter_map(|&(m, d)| NaiveDate::from_ymd_opt(year, m, d))
            .collect()
    }
}

/// One day of the planning horizon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkingDay {
    /// Position within the resolved horizon (0-based, contiguous).
    pub index: usize,
    /// Human label.
    pub label: String,
    /// Calendar date.
    pub date: NaiveDate,
    /// Whether the day is a holiday kept under [`ExclusionPolicy::Fill`].
    pub excluded: bool,
}

/// Resolves a start date into working days.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use u_roster::models::{CalendarResolver, ExclusionPolicy, ExplicitHolidays};
///
/// let start = NaiveDate::from_ymd_opt(2025, 1, 6).unwrap(); // Monday
/// let holiday = NaiveDate::from_ymd_opt(2025, 1, 8).unwrap();
/// let days = CalendarResolver::new()
///     .with_policy(ExclusionPolicy::Drop)
///     .with_source(ExplicitHolidays::new().with_date(holiday))
///     .resolve(start);
///
/// assert_eq!(days.len(), 4);
/// assert_eq!(days[2].label, "Quinta-feira (09/01)");
/// ```
#[derive(Debug, Clone)]
pub struct CalendarResolver {
    horizon_days: usize,
    label_style: LabelStyle,
    policy: ExclusionPolicy,
    sources: Vec<Arc<dyn HolidaySource>>,
}

impl CalendarResolver {
    /// Creates a resolver for a 5-day horizon with no holidays.
    pub fn new() -> Self {
        Self {
            horizon_days: DEFAULT_HORIZON_DAYS,
            label_style: LabelStyle::default(),
            policy: ExclusionPolicy::default(),
            sources: Vec::new(),
        }
    }

    /// Sets the number of calendar days covered.
    pub fn with_horizon(mut self, days: usize) -> Self {
        self.horizon_days = days;
        self
    }

    /// Sets the label style.
    pub fn with_label_style(mut self, style: LabelStyle) -> Self {
        self.label_style = style;
        self
    }

    /// Sets the exclusion policy.
    pub fn with_policy(mut self, policy: ExclusionPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Adds a holiday source.
    pub fn with_source<S: HolidaySource + 'static>(mut self, source: S) -> Self {
        self.sources.push(Arc::new(source));
        self
    }

    /// Adds a shared holiday source.
    pub fn with_shared_source(mut self, source: Arc<dyn HolidaySource>) -> Self {
        self.sources.push(source);
        self
    }

    /// The configured exclusion policy.
    pub fn policy(&self) -> ExclusionPolicy {
        self.policy
    }

    /// Resolves the horizon starting at `start`.
    ///
    /// Offsets that would overflow the calendar are silently cut off.
    pub fn resolve(&self, start: NaiveDate) -> Vec<WorkingDay> {
        let dates: Vec<NaiveDate> = (0..self.horizon_days as u64)
            .map_while(|offset| start.checked_add_days(Days::new(offset)))
            .collect();
        let holidays = self.holidays_between(&dates);

        let mut days = Vec::with_capacity(dates.len());
        for date in dates {
            let excluded = holidays.contains(&date);
            if excluded && self.policy == ExclusionPolicy::Drop {
                continue;
            }
            days.push(WorkingDay {
                index: days.len(),
                label: day_label(date, self.label_style),
                date,
                excluded,
            });
        }
        days
    }

    fn holidays_between(&self, dates: &[NaiveDate]) -> BTreeSet<NaiveDate> {
        let years: BTreeSet<i32> = dates.iter().map(|d| d.year()).collect();
        self.sources
            .iter()
            .flat_map(|src| years.iter().flat_map(|&y| src.holidays_in(y)))
            .collect()
    }
}

impl Default for CalendarResolver {
    fn default() -> Self {
        Self::new()
    }
}

/// Monday of the week containing `date`.
pub fn monday_of(date: NaiveDate) -> NaiveDate {
    date.week(Weekday::Mon).first_day()
}

/// Portuguese weekday name.
pub fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Segunda-feira",
        Weekday::Tue => "Terça-feira",
        Weekday::Wed => "Quarta-feira",
        Weekday::Thu => "Quinta-feira",
        Weekday::Fri => "Sexta-feira",
        Weekday::Sat => "Sábado",
        Weekday::Sun => "Domingo",
    }
}

/// Renders a day label.
pub fn day_label(date: NaiveDate, style: LabelStyle) -> String {
    let name = weekday_name(date.weekday());
    match style {
        LabelStyle::Weekday => name.to_string(),
        LabelStyle::WeekdayWithDate => format!("{name} ({})", date.format("%d/%m")),
    }
}
