//! On-disk row schema for the guest file.
//!
//! The file is CSV with the header `id,name,last_name,plus_one`. Reading is
//! forgiving: columns may be missing or reordered, short rows are accepted,
//! and empty cells fall back to `""` / `false`. The stored `id` column is
//! never trusted; only its presence in the header is recorded.

use std::io::{Read, Write};

use serde::Serialize;

use crate::error::{StoreError, StoreResult};
use crate::guest::Guest;

/// Column order written to the durable file.
pub const HEADER: [&str; 4] = ["id", "name", "last_name", "plus_one"];

/// Name of the identity column.
pub const ID_COLUMN: &str = "id";

#[derive(Serialize)]
struct GuestRowRef<'a> {
    id: String,
    name: &'a str,
    last_name: &'a str,
    plus_one: bool,
}

impl<'a> From<&'a Guest> for GuestRowRef<'a> {
    fn from(guest: &'a Guest) -> Self {
        Self {
            id: guest.id(),
            name: guest.name(),
            last_name: guest.last_name(),
            plus_one: guest.plus_one(),
        }
    }
}

/// Column positions resolved from a file header.
#[derive(Debug, Clone, Copy)]
struct Schema {
    id: Option<usize>,
    name: Option<usize>,
    last_name: Option<usize>,
    plus_one: Option<usize>,
}

impl Schema {
    fn from_header(header: &csv::StringRecord) -> Self {
        let position = |column: &str| header.iter().position(|h| h.trim() == column);
        Self {
            id: position(ID_COLUMN),
            name: position("name"),
            last_name: position("last_name"),
            plus_one: position("plus_one"),
        }
    }

    fn guest(&self, record: &csv::StringRecord) -> StoreResult<Guest> {
        let cell = |index: Option<usize>| index.and_then(|i| record.get(i)).unwrap_or("");
        let plus_one = parse_bool(cell(self.plus_one)).ok_or_else(|| StoreError::InvalidRow {
            line: record.position().map_or(0, csv::Position::line),
            reason: format!("plus_one is not a boolean: {:?}", cell(self.plus_one)),
        })?;
        Ok(Guest::new(cell(self.name), cell(self.last_name)).with_plus_one(plus_one))
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "" | "false" | "0" => Some(false),
        "true" | "1" => Some(true),
        _ => None,
    }
}

/// Guests parsed from a file, plus whether its header carried an `id` column.
#[derive(Debug)]
pub struct LoadedRows {
    pub guests: Vec<Guest>,
    pub has_id_column: bool,
}

/// Parse a guest file.
pub fn read_rows<R: Read>(reader: R) -> StoreResult<LoadedRows> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let schema = Schema::from_header(reader.headers()?);
    let mut guests = Vec::new();
    for record in reader.records() {
        guests.push(schema.guest(&record?)?);
    }

    Ok(LoadedRows {
        guests,
        has_id_column: schema.id.is_some(),
    })
}

/// Write the header and every guest, in order.
pub fn write_rows<W: Write>(writer: W, guests: &[Guest]) -> StoreResult<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    writer.write_record(HEADER)?;
    for guest in guests {
        writer.serialize(GuestRowRef::from(guest))?;
    }
    writer.flush()?;
    Ok(())
}
