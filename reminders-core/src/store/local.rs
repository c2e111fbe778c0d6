//! Directory-backed reminders store.
//!
//! Layout under the store root:
//!
//! ```text
//! groceries/
//!   .list.toml                                  id + title of the list
//!   5B3A1C9E-4D2F-4E8A-9C61-0F7E2D8B4A10.json   one reminder
//! reminders/
//!   .list.toml
//! ```

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::{debug, warn};
use uuid::Uuid;

use super::RemindersStore;
use crate::config::RemindersConfig;
use crate::error::{RemindersError, RemindersResult};
use crate::handoff;
use crate::reminder::{CalendarRecord, ReminderRecord};

const LIST_FILE: &str = ".list.toml";
const DEFAULT_LIST_TITLE: &str = "Reminders";

#[derive(Debug, Clone)]
pub struct LocalStore {
    root: PathBuf,
    /// Preferred default list, by title
    default_list: Option<String>,
    timeout: Option<Duration>,
}

impl LocalStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        LocalStore {
            root: root.into(),
            default_list: None,
            timeout: None,
        }
    }

    pub fn from_config(config: &RemindersConfig) -> Self {
        LocalStore {
            root: config.store_path(),
            default_list: config.default_list.clone(),
            timeout: config.permission_timeout(),
        }
    }

    pub fn with_default_list(mut self, title: Option<String>) -> Self {
        self.default_list = title;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create a new, empty list in its own directory.
    pub fn create_list(&self, title: &str) -> RemindersResult<CalendarRecord> {
        let dir = self.root.join(unique_dir_name(&self.root, title)?);
        std::fs::create_dir_all(&dir)?;

        let list = CalendarRecord {
            id: new_id(),
            title: title.to_string(),
        };
        let content = toml::to_string_pretty(&list)
            .map_err(|e| RemindersError::Serialization(e.to_string()))?;
        std::fs::write(dir.join(LIST_FILE), content)?;

        debug!(id = %list.id, title = %list.title, "created list");
        Ok(list)
    }

    /// Lists with their directories, creating the default list if the store
    /// has none yet.
    fn catalog(&self) -> RemindersResult<Vec<(PathBuf, CalendarRecord)>> {
        let lists = read_lists(&self.root)?;
        if !lists.is_empty() {
            return Ok(lists);
        }

        std::fs::create_dir_all(&self.root)?;
        self.create_list(DEFAULT_LIST_TITLE)?;
        read_lists(&self.root)
    }
}

impl RemindersStore for LocalStore {
    async fn request_permission(&self) -> RemindersResult<bool> {
        let root = self.root.clone();
        let granted = handoff::wait_for(self.timeout, move |done| {
            tokio::task::spawn_blocking(move || done.complete(probe_access(&root)));
        })
        .await??;

        debug!(root = %self.root.display(), granted, "permission check");
        Ok(granted)
    }

    fn default_list_id(&self) -> RemindersResult<String> {
        let lists = self.catalog()?;

        let list = match &self.default_list {
            Some(title) => lists
                .iter()
                .find(|(_, list)| &list.title == title)
                .ok_or_else(|| RemindersError::ListNotFound(title.clone()))?,
            None => lists
                .first()
                .ok_or_else(|| RemindersError::Store("store has no lists".into()))?,
        };

        Ok(list.1.id.clone())
    }

    fn lists(&self) -> RemindersResult<Vec<CalendarRecord>> {
        Ok(self.catalog()?.into_iter().map(|(_, list)| list).collect())
    }

    async fn fetch_incomplete(
        &self,
        list_ids: &HashSet<String>,
    ) -> RemindersResult<Vec<ReminderRecord>> {
        let root = self.root.clone();
        let list_ids = list_ids.clone();
        let reminders = handoff::wait_for(self.timeout, move |done| {
            tokio::task::spawn_blocking(move || done.complete(read_incomplete(&root, &list_ids)));
        })
        .await??;

        debug!(count = reminders.len(), "fetched incomplete reminders");
        Ok(reminders)
    }

    fn save(&self, mut record: ReminderRecord) -> RemindersResult<ReminderRecord> {
        let lists = self.catalog()?;
        let (dir, _) = lists
            .iter()
            .find(|(_, list)| list.id == record.calendar_id)
            .ok_or_else(|| {
                RemindersError::Save(format!("no list with id '{}'", record.calendar_id))
            })?;

        if record.id.is_empty() {
            record.id = new_id();
        }

        let content = serde_json::to_string_pretty(&record)
            .map_err(|e| RemindersError::Serialization(e.to_string()))?;
        let path = dir.join(format!("{}.json", record.id));
        let temp = dir.join(format!("{}.json.tmp", record.id));

        std::fs::write(&temp, content)
            .and_then(|_| std::fs::rename(&temp, &path))
            .map_err(|e| RemindersError::Save(format!("could not write {}: {}", path.display(), e)))?;

        debug!(id = %record.id, path = %path.display(), "saved reminder");
        Ok(record)
    }
}

fn new_id() -> String {
    Uuid::new_v4().to_string().to_uppercase()
}

/// Whether the store root can be used, creating it if needed.
fn probe_access(root: &Path) -> RemindersResult<bool> {
    match std::fs::create_dir_all(root) {
        Ok(()) => {}
        Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => return Ok(false),
        Err(e) => return Err(e.into()),
    }

    let metadata = std::fs::metadata(root)?;
    if !metadata.is_dir() {
        return Err(RemindersError::Store(format!(
            "{} is not a directory",
            root.display()
        )));
    }

    Ok(!metadata.permissions().readonly())
}

/// Read every list directory (one with a `.list.toml`) under `root`.
fn read_lists(root: &Path) -> RemindersResult<Vec<(PathBuf, CalendarRecord)>> {
    let entries = match std::fs::read_dir(root) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e.into()),
    };

    let mut lists = Vec::new();
    for path in entries.filter_map(|entry| entry.ok()).map(|entry| entry.path()) {
        let list_file = path.join(LIST_FILE);
        if !path.is_dir() || !list_file.exists() {
            continue;
        }

        let content = std::fs::read_to_string(&list_file)?;
        let list: CalendarRecord = toml::from_str(&content).map_err(|e| {
            RemindersError::Store(format!("invalid {}: {}", list_file.display(), e))
        })?;
        lists.push((path, list));
    }

    lists.sort_by(|a, b| a.1.title.cmp(&b.1.title));
    Ok(lists)
}

/// Incomplete reminders from the lists in `list_ids`, dated ones first by
/// due date, then by title.
fn read_incomplete(
    root: &Path,
    list_ids: &HashSet<String>,
) -> RemindersResult<Vec<ReminderRecord>> {
    let mut reminders = Vec::new();

    for (dir, _) in read_lists(root)?
        .into_iter()
        .filter(|(_, list)| list_ids.contains(&list.id))
    {
        for entry in std::fs::read_dir(&dir)? {
            let path = entry?.path();
            if path.extension().map(|e| e != "json").unwrap_or(true) {
                continue;
            }

            let parsed = std::fs::read_to_string(&path)
                .map_err(|e| e.to_string())
                .and_then(|content| {
                    serde_json::from_str::<ReminderRecord>(&content).map_err(|e| e.to_string())
                });
            match parsed {
                Ok(reminder) if !reminder.completed => reminders.push(reminder),
                Ok(_) => {}
                Err(e) => warn!(path = %path.display(), error = %e, "skipping unreadable reminder"),
            }
        }
    }

    reminders.sort_by(|a, b| {
        let a_key = (a.start_or_due_date.is_none(), a.start_or_due_date, &a.title);
        let b_key = (b.start_or_due_date.is_none(), b.start_or_due_date, &b.title);
        a_key.cmp(&b_key)
    });
    Ok(reminders)
}

/// Directory name for a new list: the slug of its title, with -2, -3, etc.
/// appended on collision.
fn unique_dir_name(root: &Path, title: &str) -> RemindersResult<String> {
    let base = match slug::slugify(title) {
        s if s.is_empty() => "list".to_string(),
        s => s,
    };

    if !root.join(&base).exists() {
        return Ok(base);
    }

    for n in 2..=100 {
        let suffixed = format!("{}-{}", base, n);
        if !root.join(&suffixed).exists() {
            return Ok(suffixed);
        }
    }

    Err(RemindersError::Store(format!(
        "Too many list name collisions for '{}'",
        base
    )))
}
