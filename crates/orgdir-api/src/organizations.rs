//! Handlers for `/organizations` endpoints.
//!
//! All list endpoints share the boundary policy that an empty result is a
//! 404, not an empty success; the store itself treats "nothing matched" as
//! a valid outcome.

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use orgdir_core::{
  building::BuildingId,
  hierarchy,
  organization::{NewOrganization, OrganizationId, OrganizationView},
  store::DirectoryStore,
};
use serde::Deserialize;

use crate::error::ApiError;

fn non_empty(
  orgs: Vec<OrganizationView>,
  context: String,
) -> Result<Json<Vec<OrganizationView>>, ApiError> {
  if orgs.is_empty() {
    return Err(ApiError::NotFound(context));
  }
  Ok(Json(orgs))
}

// ─── Create / list ────────────────────────────────────────────────────────────

/// `POST /organizations`: atomic create with phones and activity ids.
pub async fn create<S>(
  State(store): State<Arc<S>>,
  Json(body): Json<NewOrganization>,
) -> Result<impl IntoResponse, ApiError>
where
  S: DirectoryStore,
{
  let view = store
    .add_organization(body)
    .await
    .map_err(ApiError::from_store)?;
  Ok((StatusCode::CREATED, Json(view)))
}

/// `GET /organizations`
pub async fn list<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<OrganizationView>>, ApiError>
where
  S: DirectoryStore,
{
  let orgs = store
    .list_organizations()
    .await
    .map_err(ApiError::from_store)?;
  non_empty(orgs, "no organizations registered".to_string())
}

// ─── Point lookups ────────────────────────────────────────────────────────────

/// `GET /organizations/:id`
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<OrganizationId>,
) -> Result<Json<OrganizationView>, ApiError>
where
  S: DirectoryStore,
{
  let view = store
    .get_organization(id)
    .await
    .map_err(ApiError::from_store)?
    .ok_or_else(|| ApiError::NotFound(format!("organization {id} not found")))?;
  Ok(Json(view))
}

/// `GET /organizations/by-name/:name`: exact name match.
pub async fn by_name<S>(
  State(store): State<Arc<S>>,
  Path(name): Path<String>,
) -> Result<Json<OrganizationView>, ApiError>
where
  S: DirectoryStore,
{
  let view = store
    .find_organization_by_name(&name)
    .await
    .map_err(ApiError::from_store)?
    .ok_or_else(|| {
      ApiError::NotFound(format!("organization '{name}' not found"))
    })?;
  Ok(Json(view))
}

// ─── Searches ─────────────────────────────────────────────────────────────────

/// `GET /organizations/by-building/:building_id`
pub async fn by_building<S>(
  State(store): State<Arc<S>>,
  Path(building_id): Path<BuildingId>,
) -> Result<Json<Vec<OrganizationView>>, ApiError>
where
  S: DirectoryStore,
{
  let orgs = store
    .organizations_in_building(building_id)
    .await
    .map_err(ApiError::from_store)?;
  non_empty(orgs, format!("no organizations in building {building_id}"))
}

/// `GET /organizations/by-activity/:name`: the named activity itself, no
/// hierarchy traversal.
pub async fn by_activity<S>(
  State(store): State<Arc<S>>,
  Path(name): Path<String>,
) -> Result<Json<Vec<OrganizationView>>, ApiError>
where
  S: DirectoryStore,
{
  let orgs = store
    .organizations_with_activity(&name)
    .await
    .map_err(ApiError::from_store)?;
  non_empty(orgs, format!("no organizations with activity '{name}'"))
}

#[derive(Debug, Deserialize)]
pub struct CoordinatesParams {
  pub latitude:  f64,
  pub longitude: f64,
}

/// `GET /organizations/by-coordinates?latitude=..&longitude=..`: exact
/// equality on both coordinates.
pub async fn by_coordinates<S>(
  State(store): State<Arc<S>>,
  Query(params): Query<CoordinatesParams>,
) -> Result<Json<Vec<OrganizationView>>, ApiError>
where
  S: DirectoryStore,
{
  let orgs = store
    .organizations_at(params.latitude, params.longitude)
    .await
    .map_err(ApiError::from_store)?;
  non_empty(
    orgs,
    format!(
      "no organizations at ({}, {})",
      params.latitude, params.longitude
    ),
  )
}

/// `GET /organizations/by-activity-tree/:name`: inclusive hierarchical
/// search: resolve the activity closure (self, descendants, ancestors) and
/// select every organization tagged with any id in it.
pub async fn by_activity_tree<S>(
  State(store): State<Arc<S>>,
  Path(name): Path<String>,
) -> Result<Json<Vec<OrganizationView>>, ApiError>
where
  S: DirectoryStore,
{
  let activities = store
    .list_activities()
    .await
    .map_err(ApiError::from_store)?;
  let closure = hierarchy::resolve_closure(&activities, &name);

  let orgs = if closure.is_empty() {
    Vec::new()
  } else {
    store
      .organizations_with_activity_ids(&closure)
      .await
      .map_err(ApiError::from_store)?
  };
  non_empty(orgs, format!("no organizations with activity '{name}'"))
}
