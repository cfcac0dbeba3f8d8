use crate::error::{StoreError, StoreResult};
use crate::guest::Guest;

/// The ordered guest collection shared by every store backend.
///
/// Mutating operations return a new table instead of editing in place so a
/// backend can persist the result before swapping it in.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GuestTable {
    guests: Vec<Guest>,
    has_identity: bool,
}

impl GuestTable {
    /// An empty table with the canonical schema.
    pub fn new() -> Self {
        Self {
            guests: Vec::new(),
            has_identity: true,
        }
    }

    /// A table restored from storage. `has_identity` is `false` when the
    /// source carried no `id` column.
    pub fn from_rows(guests: Vec<Guest>, has_identity: bool) -> Self {
        Self {
            guests,
            has_identity,
        }
    }

    pub fn guests(&self) -> &[Guest] {
        &self.guests
    }

    pub fn len(&self) -> usize {
        self.guests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.guests.is_empty()
    }

    pub fn has_identity(&self) -> bool {
        self.has_identity
    }

    /// First guest whose derived id matches. Nothing is addressable until
    /// the table has an identity column.
    pub fn find(&self, id: &str) -> Option<&Guest> {
        if !self.has_identity {
            return None;
        }
        self.guests.iter().find(|guest| guest.has_id(id))
    }

    pub fn get(&self, id: &str) -> StoreResult<Guest> {
        self.find(id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound { id: id.to_string() })
    }

    /// The table with `guest` appended. Fails with `Conflict` when its id is
    /// already present.
    pub fn with_guest(&self, guest: Guest) -> StoreResult<Self> {
        if self.find(&guest.id()).is_some() {
            return Err(StoreError::Conflict { id: guest.id() });
        }
        let mut guests = Vec::with_capacity(self.guests.len() + 1);
        guests.extend_from_slice(&self.guests);
        guests.push(guest);
        Ok(Self {
            guests,
            has_identity: true,
        })
    }

    /// The table with every guest matching `id` removed, and how many were
    /// dropped. A table without an identity column cannot be addressed.
    pub fn without(&self, id: &str) -> StoreResult<(Self, usize)> {
        if !self.has_identity {
            return Err(StoreError::MissingIdentityColumn);
        }
        let guests: Vec<Guest> = self
            .guests
            .iter()
            .filter(|guest| !guest.has_id(id))
            .cloned()
            .collect();
        let removed = self.guests.len() - guests.len();
        Ok((
            Self {
                guests,
                has_identity: true,
            },
            removed,
        ))
    }
}

impl Default for GuestTable {
    fn default() -> Self {
        Self::new()
    }
}
