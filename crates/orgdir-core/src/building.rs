//! Building — a physical location organizations occupy.

use serde::{Deserialize, Serialize};

pub type BuildingId = i64;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Building {
  pub id:        BuildingId,
  pub address:   String,
  pub latitude:  f64,
  pub longitude: f64,
}

/// Input to [`crate::store::DirectoryStore::add_building`].
#[derive(Debug, Clone, Deserialize)]
pub struct NewBuilding {
  pub address:   String,
  pub latitude:  f64,
  pub longitude: f64,
}
