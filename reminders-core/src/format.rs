//! Rendering reminders as text lines or JSON documents.

use chrono::{Local, NaiveDateTime, TimeZone};
use serde::Serialize;

use crate::error::{RemindersError, RemindersResult};
use crate::reminder::{AlarmRecord, AlarmTrigger, GeoAlarm, GeoPoint, Proximity, ReminderRecord};

const TEXT_DATE_FORMAT: &str = "%Y-%m-%d %H:%M";
/// Rendered width of `TEXT_DATE_FORMAT`, used to pad undated reminders
const TEXT_DATE_WIDTH: usize = 16;
const DOCUMENT_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%z";
const ALARM_DATE_FORMAT: &str = "%Y-%m-%d";
const SHORT_ID_LEN: usize = 8;

/// Output format for listed reminders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    /// `date id title`, columns aligned
    #[default]
    Text,
    /// One JSON document per line
    Document,
}

impl Format {
    pub fn from_json_flag(json: bool) -> Self {
        if json { Format::Document } else { Format::Text }
    }

    /// Render one reminder as a single line (no trailing newline).
    pub fn render(&self, record: &ReminderRecord) -> RemindersResult<String> {
        match self {
            Format::Text => Ok(text_line(record)),
            Format::Document => document_line(record, &Local),
        }
    }
}

/// Render a reminder as `yyyy-MM-dd HH:mm <short id> <title>`.
///
/// Undated reminders get blank padding in place of the date.
pub fn text_line(record: &ReminderRecord) -> String {
    let date = match &record.start_or_due_date {
        Some(due) => due.format(TEXT_DATE_FORMAT).to_string(),
        None => " ".repeat(TEXT_DATE_WIDTH),
    };
    let short_id: String = record.id.chars().take(SHORT_ID_LEN).collect();

    format!("{} {} {}", date, short_id, record.title)
}

/// Render a reminder as a single-line JSON document, placing dates in `tz`.
pub fn document_line<Tz>(record: &ReminderRecord, tz: &Tz) -> RemindersResult<String>
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let document = ReminderDocument::from_record(record, tz)?;
    serde_json::to_string(&document).map_err(|e| RemindersError::Serialization(e.to_string()))
}

/// Structured form of a reminder.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderDocument {
    pub calendar_item_identifier: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date_components: Option<String>,
    pub title: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub alarms: Vec<AlarmDocument>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlarmDocument {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub absolute_date: Option<String>,
    pub relative_offset: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub structured_location: Option<LocationDocument>,
    pub proximity: Proximity,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationDocument {
    pub title: String,
    pub radius: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub geo_location: Option<GeoPoint>,
}

impl ReminderDocument {
    pub fn from_record<Tz>(record: &ReminderRecord, tz: &Tz) -> RemindersResult<Self>
    where
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        let start_date_components = record
            .start_or_due_date
            .as_ref()
            .map(|due| zoned_timestamp(due, tz))
            .transpose()?;

        Ok(ReminderDocument {
            calendar_item_identifier: record.id.clone(),
            start_date_components,
            title: record.title.clone(),
            alarms: record.alarms.iter().map(AlarmDocument::from).collect(),
        })
    }
}

impl From<&AlarmRecord> for AlarmDocument {
    fn from(alarm: &AlarmRecord) -> Self {
        let (absolute_date, relative_offset) = match &alarm.trigger {
            AlarmTrigger::Absolute(at) => (Some(at.format(ALARM_DATE_FORMAT).to_string()), 0),
            AlarmTrigger::Relative(offset) => (None, *offset),
            AlarmTrigger::Proximity => (None, 0),
        };

        AlarmDocument {
            absolute_date,
            relative_offset,
            structured_location: alarm.location.as_ref().map(LocationDocument::from),
            proximity: alarm.proximity,
        }
    }
}

impl From<&GeoAlarm> for LocationDocument {
    fn from(location: &GeoAlarm) -> Self {
        LocationDocument {
            title: location.title.clone(),
            radius: location.radius,
            geo_location: location.coordinates,
        }
    }
}

/// Wall-clock `dt` placed in `tz`, rendered with its numeric offset.
fn zoned_timestamp<Tz>(dt: &NaiveDateTime, tz: &Tz) -> RemindersResult<String>
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let zoned = tz.from_local_datetime(dt).earliest().ok_or_else(|| {
        RemindersError::Format(format!("{} does not exist in the local time zone", dt))
    })?;
    Ok(zoned.format(DOCUMENT_DATE_FORMAT).to_string())
}
