//! The `DirectoryStore` trait and backend error classification.
//!
//! The trait is implemented by storage backends (e.g.
//! `orgdir-store-sqlite`). Higher layers (`orgdir-api`, `orgdir-server`)
//! depend on this abstraction, not on any concrete backend.

use std::{collections::HashSet, future::Future};

use crate::{
  activity::{Activity, ActivityId, NewActivity},
  building::{Building, BuildingId, NewBuilding},
  organization::{NewOrganization, OrganizationId, OrganizationView},
};

// ─── Error classification ────────────────────────────────────────────────────

/// Implemented by backend error types so the HTTP boundary can map domain
/// failures to status codes without naming a concrete backend.
pub trait StoreError: std::error::Error + Send + Sync + 'static {
  /// The domain failure behind this error, if any. `None` means a backend
  /// failure (I/O, corruption) rather than a caller mistake.
  fn as_domain(&self) -> Option<&crate::Error>;
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over a directory store backend.
///
/// Every operation is a single synchronous read or write against the
/// backing store; the store provides per-operation atomicity and the
/// validate-then-insert sequences are not additionally serialized (a race
/// between two inserts under the same parent is harmless; both compute
/// their level from the already-committed parent).
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait DirectoryStore: Send + Sync {
  type Error: StoreError;

  // ── Activities ────────────────────────────────────────────────────────

  /// Create an activity with its level computed from the parent.
  ///
  /// Fails with a parent-not-found error when `parent_id` does not
  /// reference an existing activity, and with a depth-limit error when the
  /// computed level would exceed [`crate::hierarchy::MAX_LEVEL`]. On
  /// failure nothing is persisted.
  fn add_activity(
    &self,
    input: NewActivity,
  ) -> impl Future<Output = Result<Activity, Self::Error>> + Send + '_;

  /// Retrieve an activity by id. Returns `None` if not found.
  fn get_activity(
    &self,
    id: ActivityId,
  ) -> impl Future<Output = Result<Option<Activity>, Self::Error>> + Send + '_;

  /// Case-insensitive exact name lookup. Returns `None` if not found.
  fn find_activity_by_name_ci<'a>(
    &'a self,
    name: &'a str,
  ) -> impl Future<Output = Result<Option<Activity>, Self::Error>> + Send + 'a;

  /// A flat snapshot of every activity, in store iteration order. This is
  /// the input the [`crate::hierarchy`] engine operates on.
  fn list_activities(
    &self,
  ) -> impl Future<Output = Result<Vec<Activity>, Self::Error>> + Send + '_;

  /// All activities with no parent, in store iteration order. Callers must
  /// not assume a stronger ordering.
  fn list_activity_roots(
    &self,
  ) -> impl Future<Output = Result<Vec<Activity>, Self::Error>> + Send + '_;

  /// Delete an activity and, transitively, all of its descendants.
  /// Organization associations are detached, not deleted.
  fn delete_activity(
    &self,
    id: ActivityId,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Buildings ─────────────────────────────────────────────────────────

  fn add_building(
    &self,
    input: NewBuilding,
  ) -> impl Future<Output = Result<Building, Self::Error>> + Send + '_;

  fn get_building(
    &self,
    id: BuildingId,
  ) -> impl Future<Output = Result<Option<Building>, Self::Error>> + Send + '_;

  fn list_buildings(
    &self,
  ) -> impl Future<Output = Result<Vec<Building>, Self::Error>> + Send + '_;

  /// Delete a building. Organizations located there keep existing with an
  /// unset building reference.
  fn delete_building(
    &self,
    id: BuildingId,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Organizations ─────────────────────────────────────────────────────

  /// Create an organization together with its phones and activity links,
  /// atomically. Fails without persisting anything when the building or
  /// any referenced activity does not exist.
  fn add_organization(
    &self,
    input: NewOrganization,
  ) -> impl Future<Output = Result<OrganizationView, Self::Error>> + Send + '_;

  /// Retrieve one organization by id. Returns `None` if not found.
  fn get_organization(
    &self,
    id: OrganizationId,
  ) -> impl Future<Output = Result<Option<OrganizationView>, Self::Error>> + Send + '_;

  /// Exact (case-sensitive) name lookup. Returns `None` if not found.
  fn find_organization_by_name<'a>(
    &'a self,
    name: &'a str,
  ) -> impl Future<Output = Result<Option<OrganizationView>, Self::Error>> + Send + 'a;

  fn list_organizations(
    &self,
  ) -> impl Future<Output = Result<Vec<OrganizationView>, Self::Error>> + Send + '_;

  /// All organizations located in the given building.
  fn organizations_in_building(
    &self,
    building_id: BuildingId,
  ) -> impl Future<Output = Result<Vec<OrganizationView>, Self::Error>> + Send + '_;

  /// All organizations tagged with the named activity itself:
  /// case-insensitive exact match, no hierarchy traversal.
  fn organizations_with_activity<'a>(
    &'a self,
    activity_name: &'a str,
  ) -> impl Future<Output = Result<Vec<OrganizationView>, Self::Error>> + Send + 'a;

  /// All organizations whose building sits at exactly these coordinates.
  /// Both predicates are conjoined.
  fn organizations_at(
    &self,
    latitude: f64,
    longitude: f64,
  ) -> impl Future<Output = Result<Vec<OrganizationView>, Self::Error>> + Send + '_;

  /// All organizations tagged with any activity in `ids`: the single-hop
  /// join consuming a closure from
  /// [`crate::hierarchy::resolve_closure`]. An empty set yields an empty
  /// result.
  fn organizations_with_activity_ids<'a>(
    &'a self,
    ids: &'a HashSet<ActivityId>,
  ) -> impl Future<Output = Result<Vec<OrganizationView>, Self::Error>> + Send + 'a;

  /// Delete an organization and its phones. Activity records survive; only
  /// the associations are removed.
  fn delete_organization(
    &self,
    id: OrganizationId,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;
}
