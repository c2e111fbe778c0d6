use anyhow::Result;
use chrono::NaiveDateTime;
use owo_colors::OwoColorize;
use reminders_core::date_spec;
use reminders_core::format::Format;
use reminders_core::store::RemindersStore;
use reminders_core::{AlarmRecord, CalendarRecord, GeoAlarm, GeoPoint, Proximity, ReminderRecord};

use super::resolve_list;

/// Everything `reminders add` was given on the command line.
pub struct AddOptions {
    pub words: Vec<String>,
    pub calendar: Option<String>,
    pub date: Option<String>,
    pub location: Option<GeoPoint>,
    /// Radius in meters for the location alarm
    pub radius: f64,
    pub proximity: Proximity,
}

pub fn run<S: RemindersStore>(store: &S, options: AddOptions, now: NaiveDateTime) -> Result<()> {
    let (list, saved) = create(store, options, now)?;

    let line = Format::Text.render(&saved)?;
    println!("{}", format!("Created in {}: {}", list.title, line.trim_start()).green());

    Ok(())
}

/// Build the reminder described by `options` and save it.
///
/// Returns the list it went into and the reminder as saved.
pub fn create<S: RemindersStore>(
    store: &S,
    options: AddOptions,
    now: NaiveDateTime,
) -> Result<(CalendarRecord, ReminderRecord)> {
    let due = options
        .date
        .as_deref()
        .map(|spec| date_spec::parse(spec, now))
        .transpose()?;

    if let Some(point) = &options.location {
        validate_location(point, options.radius)?;
    }

    let list = resolve_list(store, options.calendar.as_deref())?;
    let title = options.words.join(" ");

    let mut reminder = ReminderRecord::new(title.clone(), list.id.clone());
    if let Some(due) = due {
        reminder = reminder.with_due_date(due);
    }
    if let Some(point) = options.location {
        let location = GeoAlarm {
            title,
            radius: options.radius,
            coordinates: Some(point),
        };
        reminder = reminder.with_alarm(AlarmRecord::location(location, options.proximity));
    }

    let saved = store.save(reminder)?;
    tracing::info!(id = %saved.id, list = %list.title, "added reminder");

    Ok((list, saved))
}

fn validate_location(point: &GeoPoint, radius: f64) -> Result<()> {
    if !(-90.0..=90.0).contains(&point.latitude) {
        anyhow::bail!("Latitude must be between -90 and 90, got {}", point.latitude);
    }
    if !(-180.0..=180.0).contains(&point.longitude) {
        anyhow::bail!("Longitude must be between -180 and 180, got {}", point.longitude);
    }
    if !(radius > 0.0) {
        anyhow::bail!("Radius must be a positive number of meters, got {}", radius);
    }

    Ok(())
}
