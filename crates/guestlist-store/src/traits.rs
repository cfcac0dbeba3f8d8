use crate::error::StoreResult;
use crate::guest::Guest;

/// The guest record store.
///
/// All implementations must satisfy these invariants:
/// - Guests are returned in insertion order, rebuilt from their source
///   fields so the id is always derived, never read back verbatim.
/// - At most one stored guest is created per id; `save` rejects duplicates.
/// - Mutations are serialized: a `save` or `delete` observes every earlier
///   mutation and is fully persisted before the next one starts.
pub trait GuestRepository: Send + Sync {
    /// Every guest currently held.
    fn get_all(&self) -> StoreResult<Vec<Guest>>;

    /// The first guest whose id matches.
    ///
    /// Returns `StoreError::NotFound` if nothing matches.
    fn get(&self, id: &str) -> StoreResult<Guest>;

    /// Insert a guest.
    ///
    /// Returns `StoreError::Conflict` if a guest with the same id exists, in
    /// which case nothing is persisted.
    fn save(&self, guest: Guest) -> StoreResult<()>;

    /// Remove every guest with this id and return how many were removed.
    ///
    /// An unknown id is not an error. Backends that cannot address rows by
    /// id return `StoreError::MissingIdentityColumn`.
    fn delete(&self, id: &str) -> StoreResult<usize>;

    /// Number of guests held.
    fn len(&self) -> StoreResult<usize> {
        self.get_all().map(|guests| guests.len())
    }

    /// Returns `true` if the store holds no guests.
    fn is_empty(&self) -> StoreResult<bool> {
        self.len().map(|n| n == 0)
    }
}
