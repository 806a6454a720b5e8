//! Organization — a directory entry, plus its owned phone numbers and the
//! computed read model returned by queries.

use serde::{Deserialize, Serialize};

use crate::{
  activity::{Activity, ActivityId},
  building::{Building, BuildingId},
};

pub type OrganizationId = i64;
pub type PhoneId = i64;

/// The stored organization record. The building reference is optional and
/// survives building deletion as `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organization {
  pub id:          OrganizationId,
  pub name:        String,
  pub building_id: Option<BuildingId>,
}

/// A contact number owned by exactly one organization; created and
/// destroyed with it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Phone {
  pub id:    PhoneId,
  pub phone: String,
}

/// Input to [`crate::store::DirectoryStore::add_organization`].
///
/// Phones and activity links are supplied atomically with the record.
/// Activity ids must reference already-existing activities.
#[derive(Debug, Clone, Deserialize)]
pub struct NewOrganization {
  pub name:         String,
  #[serde(default)]
  pub building_id:  Option<BuildingId>,
  #[serde(default)]
  pub phones:       Vec<String>,
  #[serde(default)]
  pub activity_ids: Vec<ActivityId>,
}

/// The computed read model for an organization — never stored, always
/// assembled from its relations at query time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrganizationView {
  pub id:         OrganizationId,
  pub name:       String,
  pub building:   Option<Building>,
  pub phones:     Vec<Phone>,
  pub activities: Vec<Activity>,
}
