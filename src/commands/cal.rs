use anyhow::Result;
use reminders_core::store::RemindersStore;

pub fn run<S: RemindersStore>(store: &S) -> Result<()> {
    for title in titles(store)? {
        println!("{}", title);
    }

    Ok(())
}

/// Titles of all lists, in store order.
pub fn titles<S: RemindersStore>(store: &S) -> Result<Vec<String>> {
    Ok(store.lists()?.into_iter().map(|list| list.title).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use reminders_core::store::LocalStore;

    #[test]
    fn lists_every_title() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::new(dir.path());
        store.create_list("Work").unwrap();
        store.create_list("Groceries").unwrap();

        assert_eq!(titles(&store).unwrap(), vec!["Groceries", "Work"]);
    }

    #[test]
    fn empty_store_shows_default_list() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::new(dir.path());

        assert_eq!(titles(&store).unwrap(), vec!["Reminders"]);
    }
}
