use std::collections::HashSet;

use anyhow::Result;
use reminders_core::format::Format;
use reminders_core::store::RemindersStore;

use super::resolve_list;

pub async fn run<S: RemindersStore>(store: &S, calendar: Option<&str>, format: Format) -> Result<()> {
    for line in render(store, calendar, format).await? {
        println!("{}", line);
    }

    Ok(())
}

/// One formatted line per incomplete reminder in the chosen list.
pub async fn render<S: RemindersStore>(
    store: &S,
    calendar: Option<&str>,
    format: Format,
) -> Result<Vec<String>> {
    let list = resolve_list(store, calendar)?;
    let list_ids = HashSet::from([list.id]);

    let reminders = store.fetch_incomplete(&list_ids).await?;
    tracing::debug!(list = %list.title, count = reminders.len(), "listing reminders");

    reminders
        .iter()
        .map(|reminder| format.render(reminder).map_err(Into::into))
        .collect()
}
