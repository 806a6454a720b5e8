//! Row-decoding helpers between SQLite rows and domain types.
//!
//! Every query in the store selects columns in the order these mappers
//! expect; ids and coordinates map natively onto INTEGER / REAL columns.

use orgdir_core::{
  activity::Activity,
  building::Building,
  organization::{Organization, Phone},
};
use rusqlite::Row;

/// Columns: `id, name, parent_id, level`.
pub fn activity_from_row(row: &Row<'_>) -> rusqlite::Result<Activity> {
  Ok(Activity {
    id:        row.get(0)?,
    name:      row.get(1)?,
    parent_id: row.get(2)?,
    level:     row.get(3)?,
  })
}

/// Columns: `id, address, latitude, longitude`.
pub fn building_from_row(row: &Row<'_>) -> rusqlite::Result<Building> {
  Ok(Building {
    id:        row.get(0)?,
    address:   row.get(1)?,
    latitude:  row.get(2)?,
    longitude: row.get(3)?,
  })
}

/// Columns: `id, name, building_id`.
pub fn organization_from_row(row: &Row<'_>) -> rusqlite::Result<Organization> {
  Ok(Organization {
    id:          row.get(0)?,
    name:        row.get(1)?,
    building_id: row.get(2)?,
  })
}

/// Columns: `id, phone`.
pub fn phone_from_row(row: &Row<'_>) -> rusqlite::Result<Phone> {
  Ok(Phone { id: row.get(0)?, phone: row.get(1)? })
}
