//! JSON REST API for the Organizations Directory.
//!
//! Exposes an axum [`Router`] backed by any
//! [`orgdir_core::store::DirectoryStore`]. TLS and transport concerns are
//! the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", orgdir_api::api_router(store.clone()))
//! ```

pub mod activities;
pub mod buildings;
pub mod error;
pub mod organizations;

use std::sync::Arc;

use axum::{Router, routing::get};
use orgdir_core::store::DirectoryStore;

pub use error::ApiError;

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router
/// regardless of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: DirectoryStore + Send + Sync + 'static,
{
  Router::new()
    // Activities
    .route(
      "/activities",
      get(activities::forest::<S>).post(activities::create::<S>),
    )
    // Buildings
    .route(
      "/buildings",
      get(buildings::list::<S>).post(buildings::create::<S>),
    )
    // Organizations
    .route(
      "/organizations",
      get(organizations::list::<S>).post(organizations::create::<S>),
    )
    .route(
      "/organizations/by-building/{building_id}",
      get(organizations::by_building::<S>),
    )
    .route(
      "/organizations/by-activity/{name}",
      get(organizations::by_activity::<S>),
    )
    .route(
      "/organizations/by-activity-tree/{name}",
      get(organizations::by_activity_tree::<S>),
    )
    .route(
      "/organizations/by-coordinates",
      get(organizations::by_coordinates::<S>),
    )
    .route(
      "/organizations/by-name/{name}",
      get(organizations::by_name::<S>),
    )
    .route("/organizations/{id}", get(organizations::get_one::<S>))
    .with_state(store)
}

// ─── Integration tests ────────────────────────────────────────────────────────
