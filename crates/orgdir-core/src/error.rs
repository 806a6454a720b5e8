//! Error types for `orgdir-core`.

use thiserror::Error;

use crate::{
  activity::ActivityId, building::BuildingId, hierarchy::MAX_LEVEL,
  organization::OrganizationId,
};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
  #[error("activity not found: {0}")]
  ActivityNotFound(ActivityId),

  #[error("referenced parent activity does not exist: {0}")]
  ParentNotFound(ActivityId),

  #[error("building not found: {0}")]
  BuildingNotFound(BuildingId),

  #[error("organization not found: {0}")]
  OrganizationNotFound(OrganizationId),

  #[error("nesting depth exceeds the maximum of {} levels", MAX_LEVEL)]
  DepthLimitExceeded,
}

impl Error {
  /// Whether this is a missing-reference failure, as opposed to a
  /// validation failure.
  pub fn is_not_found(&self) -> bool {
    !matches!(self, Self::DepthLimitExceeded)
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
