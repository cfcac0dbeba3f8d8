//! CSV-file guest store.
//!
//! [`CsvGuestStore`] keeps the whole guest table in memory and rewrites the
//! backing file after every successful mutation. Each rewrite goes to a
//! temporary file in the same directory which is then renamed over the
//! target, and the in-memory table is only replaced once that succeeds.

use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use tempfile::NamedTempFile;
use tracing::{debug, warn};

use crate::config::StoreConfig;
use crate::error::{StoreError, StoreResult};
use crate::guest::Guest;
use crate::row::{read_rows, write_rows};
use crate::table::GuestTable;
use crate::traits::GuestRepository;

/// Guest store persisted to a single CSV file.
pub struct CsvGuestStore {
    path: PathBuf,
    table: RwLock<GuestTable>,
}

impl CsvGuestStore {
    /// Load the store from `path`.
    ///
    /// A missing or zero-length file yields an empty store with no identity
    /// column: lookups find nothing and deletes fail until the first save
    /// creates the file.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref().to_path_buf();
        let table = load_table(&path)?;
        debug!(
            path = %path.display(),
            guests = table.len(),
            has_identity = table.has_identity(),
            "guest store loaded"
        );
        Ok(Self {
            path,
            table: RwLock::new(table),
        })
    }

    /// Load the store from the configured path.
    pub fn from_config(config: &StoreConfig) -> StoreResult<Self> {
        Self::open(&config.path)
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
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

    /// Replace the backing file with `table`.
    fn commit(&self, table: &GuestTable) -> StoreResult<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir)?;

        let mut tmp = NamedTempFile::new_in(dir)?;
        write_rows(tmp.as_file_mut(), table.guests())?;
        tmp.as_file().sync_all()?;
        // Temp files are created 0600; keep the target's existing mode.
        match fs::metadata(&self.path) {
            Ok(meta) => fs::set_permissions(tmp.path(), meta.permissions())?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }
        tmp.persist(&self.path).map_err(|e| e.error)?;

        debug!(path = %self.path.display(), guests = table.len(), "guest file committed");
        Ok(())
    }
}

fn load_table(path: &Path) -> StoreResult<GuestTable> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Ok(GuestTable::from_rows(Vec::new(), false))
        }
        Err(e) => return Err(e.into()),
    };
    if file.metadata()?.len() == 0 {
        return Ok(GuestTable::from_rows(Vec::new(), false));
    }
    let loaded = read_rows(BufReader::new(file))?;
    if !loaded.has_id_column {
        warn!(path = %path.display(), "guest file has no id column; deletes will fail until a guest is saved");
    }
    Ok(GuestTable::from_rows(loaded.guests, loaded.has_id_column))
}

impl GuestRepository for CsvGuestStore {
    fn get_all(&self) -> StoreResult<Vec<Guest>> {
        Ok(self.read()?.guests().to_vec())
    }

    fn get(&self, id: &str) -> StoreResult<Guest> {
        self.read()?.get(id)
    }

    fn save(&self, guest: Guest) -> StoreResult<()> {
        let mut table = self.write()?;
        let next = table.with_guest(guest)?;
        self.commit(&next)?;
        *table = next;
        Ok(())
    }

    fn delete(&self, id: &str) -> StoreResult<usize> {
        let mut table = self.write()?;
        let (next, removed) = table.without(id)?;
        self.commit(&next)?;
        *table = next;
        Ok(removed)
    }

    fn len(&self) -> StoreResult<usize> {
        Ok(self.read()?.len())
    }
}

impl std::fmt::Debug for CsvGuestStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let count = self.read().map(|t| t.len()).unwrap_or_default();
        f.debug_struct("CsvGuestStore")
            .field("path", &self.path)
            .field("guest_count", &count)
            .finish()
    }
}
