//! Rostering domain models.
//!
//! Provides the data types for describing a rostering problem
//! (agents, shift-types, pins, the calendar) and its solution
//! (schedule, tally, violations).
//!
//! # Domain Mappings
//!
//! | u-roster | Help desk | Clinic | Retail |
//! |----------|-----------|--------|--------|
//! | Agent | Support analyst | Nurse | Clerk |
//! | ShiftType | Morning/Afternoon | Ward shift | Opening/Closing |
//! | Pin | Pre-booked cover | On-call duty | Manager slot |
//! | Schedule | Weekly rota | Duty roster | Staff plan |

mod agent;
mod calendar;
mod schedule;
mod shift;
mod slot;

pub use agent::{Agent, MAX_QUOTA};
pub use calendar::{
    day_label, monday_of, weekday_name, CalendarResolver, ExclusionPolicy, ExplicitHolidays,
    HolidaySource, LabelStyle, RecurringHolidays, WorkingDay, DEFAULT_HORIZON_DAYS,
};
pub use schedule::{
    AgentLoad, Schedule, SlotAssignees, SlotEntry, Tally, Violation, ViolationType,
    EXCLUDED_MARKER,
};
pub use shift::{Pin, ShiftType};
pub use slot::TimeSlot;
