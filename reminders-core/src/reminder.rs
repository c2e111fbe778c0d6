//! Reminder, alarm and list records.
//!
//! These are the values handed between the store and the rest of the crate.
//! Dates are wall-clock values in the local zone; the store never attaches
//! a time zone to them.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A to-do item belonging to a list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReminderRecord {
    /// Stable identifier assigned by the store (empty until saved)
    pub id: String,
    pub title: String,
    /// Identifier of the containing list
    pub calendar_id: String,
    /// Due date, if any
    pub start_or_due_date: Option<NaiveDateTime>,
    #[serde(default)]
    pub alarms: Vec<AlarmRecord>,
    #[serde(default)]
    pub completed: bool,
}

impl ReminderRecord {
    /// A new, unsaved reminder in the given list with no date and no alarms.
    pub fn new(title: impl Into<String>, calendar_id: impl Into<String>) -> Self {
        ReminderRecord {
            id: String::new(),
            title: title.into(),
            calendar_id: calendar_id.into(),
            start_or_due_date: None,
            alarms: Vec::new(),
            completed: false,
        }
    }

    /// Set the due date together with an absolute alarm at the same time.
    pub fn with_due_date(mut self, due: NaiveDateTime) -> Self {
        self.start_or_due_date = Some(due);
        self.alarms.push(AlarmRecord::absolute(due));
        self
    }

    pub fn with_alarm(mut self, alarm: AlarmRecord) -> Self {
        self.alarms.push(alarm);
        self
    }
}

/// When an alarm fires
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AlarmTrigger {
    /// At a fixed wall-clock time
    Absolute(NaiveDateTime),
    /// Offset in seconds from now
    Relative(i64),
    /// When entering or leaving `AlarmRecord::location`
    Proximity,
}

/// An alarm attached to a reminder
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlarmRecord {
    pub trigger: AlarmTrigger,
    pub location: Option<GeoAlarm>,
    #[serde(default)]
    pub proximity: Proximity,
}

impl AlarmRecord {
    pub fn absolute(at: NaiveDateTime) -> Self {
        AlarmRecord {
            trigger: AlarmTrigger::Absolute(at),
            location: None,
            proximity: Proximity::None,
        }
    }

    pub fn relative(offset_secs: i64) -> Self {
        AlarmRecord {
            trigger: AlarmTrigger::Relative(offset_secs),
            location: None,
            proximity: Proximity::None,
        }
    }

    pub fn location(location: GeoAlarm, proximity: Proximity) -> Self {
        AlarmRecord {
            trigger: AlarmTrigger::Proximity,
            location: Some(location),
            proximity,
        }
    }
}

/// A named circular region used by location alarms
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoAlarm {
    pub title: String,
    /// Radius in meters
    pub radius: f64,
    pub coordinates: Option<GeoPoint>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

/// Whether a location alarm fires on arrival or departure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Proximity {
    #[default]
    None,
    Enter,
    Leave,
}

/// A named reminders list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarRecord {
    pub id: String,
    pub title: String,
}
