use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::{StoreError, StoreResult};
use crate::guest::Guest;
use crate::table::GuestTable;
use crate::traits::GuestRepository;

/// In-memory guest store.
///
/// Intended for tests and embedding. Nothing is persisted; data is lost when
/// the store is dropped.
pub struct InMemoryGuestStore {
    table: RwLock<GuestTable>,
}

impl InMemoryGuestStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self {
            table: RwLock::new(GuestTable::new()),
        }
    }

    /// Create a store pre-populated with `guests`, duplicates included.
    pub fn with_guests(guests: impl IntoIterator<Item = Guest>) -> Self {
        Self {
            table: RwLock::new(GuestTable::from_rows(guests.into_iter().collect(), true)),
        }
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, GuestTable>> {
        self.table
            .read()
            .map_err(|e| StoreError::LockPoisoned(e.to_string()))
    }

    fn write(&self) -> StoreResult<RwLockWriteGuard<'_, GuestTable>> {
        self.table
            .write()
            .map_err(|e| StoreError::LockPoisoned(e.to_string()))
    }
}

impl Default for InMemoryGuestStore {
    fn default() -> Self {
        Self::new()
    }
}

impl GuestRepository for InMemoryGuestStore {
    fn get_all(&self) -> StoreResult<Vec<Guest>> {
        Ok(self.read()?.guests().to_vec())
    }

    fn get(&self, id: &str) -> StoreResult<Guest> {
        self.read()?.get(id)
    }

    fn save(&self, guest: Guest) -> StoreResult<()> {
        let mut table = self.write()?;
        *table = table.with_guest(guest)?;
        Ok(())
    }

    fn delete(&self, id: &str) -> StoreResult<usize> {
        let mut table = self.write()?;
        let (next, removed) = table.without(id)?;
        *table = next;
        Ok(removed)
    }

    fn len(&self) -> StoreResult<usize> {
        Ok(self.read()?.len())
    }
}

impl std::fmt::Debug for InMemoryGuestStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let count = self.read().map(|t| t.len()).unwrap_or_default();
        f.debug_struct("InMemoryGuestStore")
            .field("guest_count", &count)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_then_get() {
        let store = InMemoryGuestStore::new();
        store.save(Guest::new("Jaime", "Vaquero")).unwrap();
        assert_eq!(store.get("Jaime:Vaquero").unwrap(), Guest::new("Jaime", "Vaquero"));
        assert_eq!(store.len().unwrap(), 1);
    }

    #[test]
    fn get_missing_is_not_found() {
        let store = InMemoryGuestStore::new();
        assert!(matches!(store.get("missing"), Err(StoreError::NotFound { .. })));
    }

    #[test]
    fn duplicate_save_conflicts() {
        let store = InMemoryGuestStore::new();
        store.save(Guest::new("Jaime", "Vaquero")).unwrap();
        let err = store
            .save(Guest::new("Jaime", "Vaquero").with_plus_one(true))
            .unwrap_err();
        assert!(matches!(err, StoreError::Conflict { .. }));
        assert!(!store.get("Jaime:Vaquero").unwrap().plus_one());
    }

    #[test]
    fn delete_removes_all_matches() {
        let store = InMemoryGuestStore::with_guests([
            Guest::new("Ana", "Ruiz"),
            Guest::new("Ana", "Ruiz"),
            Guest::new("Luis", "Ruiz"),
        ]);
        assert_eq!(store.delete("Ana:Ruiz").unwrap(), 2);
        assert_eq!(store.get_all().unwrap(), vec![Guest::new("Luis", "Ruiz")]);
        assert_eq!(store.delete("Ana:Ruiz").unwrap(), 0);
    }

    #[test]
    fn debug_shows_count() {
        let store = InMemoryGuestStore::with_guests([Guest::new("Ana", "Ruiz")]);
        assert!(format!("{store:?}").contains("guest_count: 1"));
    }

    #[test]
    fn concurrent_saves_of_same_guest_admit_one() {
        use std::sync::Arc;

        let store = Arc::new(InMemoryGuestStore::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || store.save(Guest::new("Ana", "Ruiz")).is_ok())
            })
            .collect();
        let successes = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|ok| *ok)
            .count();
        assert_eq!(successes, 1);
        assert_eq!(store.len().unwrap(), 1);
    }
}
