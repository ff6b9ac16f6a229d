//! Storage abstraction shared by every backend

use crate::domain::{Item, TodoId};
use crate::error::{Result, TodoError};

/// Capability set every todo backend implements.
///
/// Backends own their items exclusively; callers only ever receive copies.
/// IDs are handed out by a monotonically increasing counter and are never
/// reused after a removal.
pub trait TodoStore {
    /// Every stored item, in a stable order (insertion / primary key order)
    fn get_all(&self) -> Result<Vec<Item>>;

    /// The item with the given ID, or `TodoError::NotFound`
    fn get_one(&self, id: TodoId) -> Result<Item>;

    /// Create a new, not done item and return its assigned ID
    fn add(&mut self, title: &str) -> Result<TodoId>;

    /// Delete an item; returns whether it existed
    fn remove(&mut self, id: TodoId) -> Result<bool>;

    /// Flip the done flag of an item; returns whether it existed
    fn toggle_done(&mut self, id: TodoId) -> Result<bool>;

    /// Flush to persistent storage and release resources.
    ///
    /// Calling it more than once is a no-op.
    fn close(&mut self) -> Result<()>;
}

/// Reject titles a store must not accept
pub(crate) fn validate_title(title: &str) -> Result<()> {
    if Item::is_valid_title(title) {
        Ok(())
    } else {
        Err(TodoError::InvalidArgument(
            "Todo title must not be empty".to_string(),
        ))
    }
}

/// Behaviour both backends must share, run against each in their own tests
#[cfg(test)]
pub(crate) mod conformance {
    use super::TodoStore;
    use crate::error::TodoError;

    pub fn ids_strictly_increasing(store: &mut dyn TodoStore) {
        let ids: Vec<_> = ["a", "b", "c", "d"]
            .iter()
            .map(|title| store.add(title).unwrap())
            .collect();

        for pair in ids.windows(2) {
            assert!(pair[0] < pair[1], "IDs not increasing: {:?}", ids);
        }
    }

    pub fn first_ids_start_at_one(store: &mut dyn TodoStore) {
        assert_eq!(store.add("buy milk").unwrap(), 1);
        assert_eq!(store.add("walk dog").unwrap(), 2);
    }

    pub fn removed_ids_are_not_reused(store: &mut dyn TodoStore) {
        let first = store.add("first").unwrap();
        let second = store.add("second").unwrap();
        assert!(store.remove(second).unwrap());

        let third = store.add("third").unwrap();
        assert!(third > second);
        assert_ne!(third, first);

        let ids: Vec<_> = store.get_all().unwrap().iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![first, third]);
    }

    pub fn remove_then_get_is_not_found(store: &mut dyn TodoStore) {
        let id = store.add("gone soon").unwrap();
        assert!(store.remove(id).unwrap());

        match store.get_one(id) {
            Err(TodoError::NotFound(missing)) => assert_eq!(missing, id),
            other => panic!("Expected NotFound, got {:?}", other),
        }
    }

    pub fn remove_missing_reports_false(store: &mut dyn TodoStore) {
        assert!(!store.remove(999).unwrap());
        let id = store.add("once").unwrap();
        assert!(store.remove(id).unwrap());
        assert!(!store.remove(id).unwrap());
    }

    pub fn toggle_is_an_involution(store: &mut dyn TodoStore) {
        let id = store.add("flip me").unwrap();
        assert!(!store.get_one(id).unwrap().done);

        assert!(store.toggle_done(id).unwrap());
        assert!(store.get_one(id).unwrap().done);

        assert!(store.toggle_done(id).unwrap());
        assert!(!store.get_one(id).unwrap().done);
    }

    pub fn toggle_missing_reports_false(store: &mut dyn TodoStore) {
        assert!(!store.toggle_done(999).unwrap());
        assert!(store.get_all().unwrap().is_empty());
    }

    pub fn empty_title_is_rejected(store: &mut dyn TodoStore) {
        assert!(matches!(
            store.add(""),
            Err(TodoError::InvalidArgument(_))
        ));
        assert!(matches!(
            store.add("  \t"),
            Err(TodoError::InvalidArgument(_))
        ));
        assert!(store.get_all().unwrap().is_empty());
    }

    pub fn get_all_reflects_mutations(store: &mut dyn TodoStore) {
        let a = store.add("a").unwrap();
        let b = store.add("b").unwrap();
        let c = store.add("c").unwrap();
        store.toggle_done(c).unwrap();
        store.remove(b).unwrap();
        store.toggle_done(a).unwrap();
        store.toggle_done(a).unwrap();

        let items = store.get_all().unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!((items[0].id, items[0].done), (a, false));
        assert_eq!((items[1].id, items[1].done), (c, true));
        assert_eq!(items[1].title, "c");

        // Stable across repeated reads
        assert_eq!(store.get_all().unwrap(), items);
    }

    pub fn walkthrough(store: &mut dyn TodoStore) {
        assert_eq!(store.add("buy milk").unwrap(), 1);
        assert_eq!(store.add("walk dog").unwrap(), 2);
        assert!(store.get_all().unwrap().iter().all(|item| !item.done));

        assert!(store.toggle_done(1).unwrap());
        let items = store.get_all().unwrap();
        assert!(items[0].done);
        assert!(!items[1].done);

        assert!(store.remove(2).unwrap());
        let items = store.get_all().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, 1);

        assert!(!store.remove(2).unwrap());
    }

    pub fn close_is_idempotent(store: &mut dyn TodoStore) {
        store.add("persist me").unwrap();
        store.close().unwrap();
        store.close().unwrap();
    }

    /// Run every check above, each against a fresh store
    pub fn run_all<S, F>(mut fresh: F)
    where
        S: TodoStore,
        F: FnMut() -> S,
    {
        let checks: [fn(&mut dyn TodoStore); 11] = [
            ids_strictly_increasing,
            first_ids_start_at_one,
            removed_ids_are_not_reused,
            remove_then_get_is_not_found,
            remove_missing_reports_false,
            toggle_is_an_involution,
            toggle_missing_reports_false,
            empty_title_is_rejected,
            get_all_reflects_mutations,
            walkthrough,
            close_is_idempotent,
        ];

        for check in checks {
            let mut store = fresh();
            check(&mut store);
        }
    }
}
