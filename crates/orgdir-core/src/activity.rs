//! Activity — a named node in the hierarchical classification of business
//! activities.
//!
//! Activities form a forest with a maximum nesting depth of three levels.
//! Each node stores only its parent id; child relations are derived by the
//! [`crate::hierarchy`] engine, never stored as back-pointers.

use serde::{Deserialize, Serialize};

pub type ActivityId = i64;

/// A classification node. `level` is 1-indexed depth, denormalized at
/// creation time so the depth-limit check stays an O(1) comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
  pub id:        ActivityId,
  pub name:      String,
  pub parent_id: Option<ActivityId>,
  /// Root nodes are level 1; a child is always `parent.level + 1`.
  pub level:     u32,
}

/// Input to [`crate::store::DirectoryStore::add_activity`].
/// `level` is always computed by the store; it is not accepted from callers.
#[derive(Debug, Clone, Deserialize)]
pub struct NewActivity {
  pub name:      String,
  #[serde(default)]
  pub parent_id: Option<ActivityId>,
}
