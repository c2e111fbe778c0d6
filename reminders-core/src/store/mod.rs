//! The reminders store: where lists and reminders live.
//!
//! Commands only talk to [`RemindersStore`]. [`LocalStore`] keeps lists and
//! reminders in a directory tree.

mod local;

pub use local::LocalStore;

use std::collections::HashSet;
use std::future::Future;

use crate::error::{RemindersError, RemindersResult};
use crate::reminder::{CalendarRecord, ReminderRecord};

/// Capabilities the CLI needs from a reminders backend.
pub trait RemindersStore {
    /// Ask for access to the store. `false` means access was refused.
    fn request_permission(&self) -> impl Future<Output = RemindersResult<bool>> + Send;

    /// Identifier of the list new reminders go to by default.
    fn default_list_id(&self) -> RemindersResult<String>;

    /// All lists, ordered by title.
    fn lists(&self) -> RemindersResult<Vec<CalendarRecord>>;

    /// Reminders that are not completed, from the given lists only.
    fn fetch_incomplete(
        &self,
        list_ids: &HashSet<String>,
    ) -> impl Future<Output = RemindersResult<Vec<ReminderRecord>>> + Send;

    /// Persist `record`, returning it as stored (with its assigned id).
    fn save(&self, record: ReminderRecord) -> RemindersResult<ReminderRecord>;
}

/// Find a list by exact title.
pub fn find_list(lists: &[CalendarRecord], title: &str) -> RemindersResult<CalendarRecord> {
    lists
        .iter()
        .find(|list| list.title == title)
        .cloned()
        .ok_or_else(|| {
            let available: Vec<_> = lists.iter().map(|list| list.title.as_str()).collect();
            RemindersError::ListNotFound(format!(
                "'{}'. Available: {}",
                title,
                available.join(", ")
            ))
        })
}
