//! Handlers for `/activities` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/activities` | Body: `{"name":"Food","parent_id":1}`; 404 on missing parent, 400 past level 3 |
//! | `GET`  | `/activities` | Full forest; 404 when no activities exist |

use std::sync::Arc;

use axum::{
  Json,
  extract::State,
  http::StatusCode,
  response::IntoResponse,
};
use orgdir_core::{
  activity::NewActivity,
  hierarchy::{self, ActivityNode},
  store::DirectoryStore,
};

use crate::error::ApiError;

/// `POST /activities`: create with depth validation; responds with the
/// materialized node (a fresh node always has an empty subtree).
pub async fn create<S>(
  State(store): State<Arc<S>>,
  Json(body): Json<NewActivity>,
) -> Result<impl IntoResponse, ApiError>
where
  S: DirectoryStore,
{
  let activity = store
    .add_activity(body)
    .await
    .map_err(ApiError::from_store)?;
  let node =
    hierarchy::materialize(std::slice::from_ref(&activity), &activity);
  Ok((StatusCode::CREATED, Json(node)))
}

/// `GET /activities`: every root with its subtree nested.
pub async fn forest<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<ActivityNode>>, ApiError>
where
  S: DirectoryStore,
{
  let activities = store
    .list_activities()
    .await
    .map_err(ApiError::from_store)?;

  let forest = hierarchy::forest(&activities);
  if forest.is_empty() {
    return Err(ApiError::NotFound("no activities registered".to_string()));
  }
  Ok(Json(forest))
}
