//! Parser-output event types.
//!
//! A `CalendarEvent` is the transient result of parsing one VEVENT block
//! from an ICS schedule file. It only lives long enough to be converted
//! into an imported match by the reconciliation layer.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single match fixture extracted from an ICS file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarEvent {
    /// Own team, if the summary encoded one (or the caller supplied a default)
    pub team: Option<String>,
    /// Opposing team, derived from the event summary
    pub opponent: String,
    pub date: NaiveDate,
    /// Clock time `HH:MM`; absent for all-day events
    pub time: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub status: EventStatus,
    /// The UID property, when the calendar entry carried one.
    /// Used as the stable cross-import identity.
    pub ics_uid: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventStatus {
    Scheduled,
    Canceled,
}
