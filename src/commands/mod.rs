pub mod add;
pub mod cal;
pub mod ls;

use anyhow::Result;
use reminders_core::CalendarRecord;
use reminders_core::error::RemindersError;
use reminders_core::store::{self, RemindersStore};

/// Ask the store for access, failing when it is refused.
pub async fn require_permission<S: RemindersStore>(store: &S) -> Result<()> {
    if !store.request_permission().await? {
        return Err(RemindersError::PermissionDenied.into());
    }

    Ok(())
}

/// Resolve `--calendar NAME` to a list, or fall back to the store's default list.
pub fn resolve_list<S: RemindersStore>(store: &S, title: Option<&str>) -> Result<CalendarRecord> {
    let lists = store.lists()?;

    let list = match title {
        Some(title) => store::find_list(&lists, title)?,
        None => {
            let default_id = store.default_list_id()?;
            lists
                .into_iter()
                .find(|list| list.id == default_id)
                .ok_or_else(|| RemindersError::ListNotFound(default_id))?
        }
    };

    Ok(list)
}

#[cfg(test)]
mod tests {
    use super::*;
    use reminders_core::store::LocalStore;

    #[test]
    fn resolve_list_defaults_to_store_default() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::new(dir.path());

        let list = resolve_list(&store, None).unwrap();
        assert_eq!(list.title, "Reminders");
    }

    #[test]
    fn resolve_list_by_title() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::new(dir.path());
        let groceries = store.create_list("Groceries").unwrap();

        assert_eq!(resolve_list(&store, Some("Groceries")).unwrap(), groceries);
    }

    #[test]
    fn resolve_unknown_list_fails() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::new(dir.path());

        let err = resolve_list(&store, Some("Nope")).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<RemindersError>(),
            Some(RemindersError::ListNotFound(_))
        ));
    }

    #[tokio::test]
    async fn permission_granted_for_fresh_store() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::new(dir.path().join("store"));

        assert!(require_permission(&store).await.is_ok());
    }
}
