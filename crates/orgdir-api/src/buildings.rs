//! Handlers for `/buildings` endpoints.

use std::sync::Arc;

use axum::{
  Json,
  extract::State,
  http::StatusCode,
  response::IntoResponse,
};
use orgdir_core::{
  building::{Building, NewBuilding},
  store::DirectoryStore,
};

use crate::error::ApiError;

/// `POST /buildings` with body `{"address":"...","latitude":..,"longitude":..}`
pub async fn create<S>(
  State(store): State<Arc<S>>,
  Json(body): Json<NewBuilding>,
) -> Result<impl IntoResponse, ApiError>
where
  S: DirectoryStore,
{
  let building = store
    .add_building(body)
    .await
    .map_err(ApiError::from_store)?;
  Ok((StatusCode::CREATED, Json(building)))
}

/// `GET /buildings`; 404 when none are registered.
pub async fn list<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<Building>>, ApiError>
where
  S: DirectoryStore,
{
  let buildings = store.list_buildings().await.map_err(ApiError::from_store)?;
  if buildings.is_empty() {
    return Err(ApiError::NotFound("no buildings registered".to_string()));
  }
  Ok(Json(buildings))
}
