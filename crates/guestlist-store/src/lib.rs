//! Guest records and their flat-file store.
//!
//! A [`Guest`] is a single invitee whose identity is derived from its names
//! (`name:last_name`). Guests live in a [`GuestRepository`], an ordered
//! collection that rejects duplicate ids on insert.
//!
//! # Storage Backends
//!
//! - [`CsvGuestStore`] -- the whole table mirrored to one CSV file with the
//!   header `id,name,last_name,plus_one`, rewritten after every mutation
//! - [`InMemoryGuestStore`] -- no persistence, for tests and embedding
//!
//! # Design Rules
//!
//! 1. Ids are derived, never trusted from storage.
//! 2. Mutations hold the store's write lock across the duplicate check, the
//!    file rewrite and the in-memory swap.
//! 3. The in-memory table changes only after the file write succeeds.
//! 4. Every mutation rewrites the whole file, so its cost is linear in the
//!    guest count.

pub mod config;
pub mod error;
pub mod file;
pub mod guest;
pub mod memory;
pub mod row;
pub mod table;
pub mod traits;

pub use config::StoreConfig;
pub use error::{StoreError, StoreResult};
pub use file::CsvGuestStore;
pub use guest::{Guest, ID_SEPARATOR};
pub use memory::InMemoryGuestStore;
pub use table::GuestTable;
pub use traits::GuestRepository;
