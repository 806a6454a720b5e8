//! The activity hierarchy engine.
//!
//! Operates on a flat snapshot of [`Activity`] records. Children are derived
//! from a parent-id index built once per call, so nodes never hold live
//! references to each other and the store remains the single owner of every
//! record.

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::{
  Error, Result,
  activity::{Activity, ActivityId},
};

/// Maximum nesting depth of the activity tree. Roots are level 1; an
/// activity at this level cannot take children.
pub const MAX_LEVEL: u32 = 3;

/// Compute the level a new child of `parent` would occupy.
///
/// Fails with [`Error::DepthLimitExceeded`] when the computed level would
/// pass [`MAX_LEVEL`]; callers must reject the insertion without persisting
/// anything.
pub fn child_level(parent: &Activity) -> Result<u32> {
  let level = parent.level + 1;
  if level > MAX_LEVEL {
    return Err(Error::DepthLimitExceeded);
  }
  Ok(level)
}

// ─── Tree materialization ────────────────────────────────────────────────────

/// A materialized subtree: one activity with every descendant nested below
/// it. Fan-out is unbounded; depth is capped by the level invariant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActivityNode {
  pub id:        ActivityId,
  pub name:      String,
  pub parent_id: Option<ActivityId>,
  pub level:     u32,
  pub children:  Vec<ActivityNode>,
}

/// The per-call adjacency index: id lookup plus parent-id -> children.
struct Adjacency<'a> {
  by_id:    HashMap<ActivityId, &'a Activity>,
  children: HashMap<ActivityId, Vec<&'a Activity>>,
}

impl<'a> Adjacency<'a> {
  fn build(activities: &'a [Activity]) -> Self {
    let mut by_id = HashMap::with_capacity(activities.len());
    let mut children: HashMap<ActivityId, Vec<&'a Activity>> = HashMap::new();
    for activity in activities {
      by_id.insert(activity.id, activity);
      if let Some(parent_id) = activity.parent_id {
        children.entry(parent_id).or_default().push(activity);
      }
    }
    Self { by_id, children }
  }

  fn children_of(&self, id: ActivityId) -> &[&'a Activity] {
    self.children.get(&id).map(Vec::as_slice).unwrap_or(&[])
  }
}

fn build_node(adjacency: &Adjacency<'_>, activity: &Activity) -> ActivityNode {
  ActivityNode {
    id:        activity.id,
    name:      activity.name.clone(),
    parent_id: activity.parent_id,
    level:     activity.level,
    children:  adjacency
      .children_of(activity.id)
      .iter()
      .map(|child| build_node(adjacency, child))
      .collect(),
  }
}

/// Materialize the subtree rooted at `root` from the flat snapshot.
///
/// `root` itself need not be a forest root — any node can anchor a subtree.
pub fn materialize(activities: &[Activity], root: &Activity) -> ActivityNode {
  let adjacency = Adjacency::build(activities);
  build_node(&adjacency, root)
}

/// Materialize every root (no parent) in the snapshot, in snapshot order.
/// An empty snapshot yields an empty forest, not an error.
pub fn forest(activities: &[Activity]) -> Vec<ActivityNode> {
  let adjacency = Adjacency::build(activities);
  activities
    .iter()
    .filter(|activity| activity.parent_id.is_none())
    .map(|root| build_node(&adjacency, root))
    .collect()
}

// ─── Closure resolution ──────────────────────────────────────────────────────

/// Resolve an activity name (case-insensitive, exact) into the full closure
/// of ids in scope of it: the matched node, every descendant, and every
/// ancestor up to its root.
///
/// An unknown name yields the empty set — a valid "no results" outcome, not
/// an error. The result is a set consumed as a filter predicate; no ordering
/// is guaranteed.
pub fn resolve_closure(
  activities: &[Activity],
  name: &str,
) -> HashSet<ActivityId> {
  let needle = name.to_lowercase();
  let Some(start) = activities
    .iter()
    .find(|activity| activity.name.to_lowercase() == needle)
  else {
    return HashSet::new();
  };

  let adjacency = Adjacency::build(activities);

  // Descendants, including the matched node itself. The closure set doubles
  // as the visited guard, so the worklist terminates even if the stored
  // levels are ever inconsistent with the parent pointers.
  let mut closure: HashSet<ActivityId> = HashSet::new();
  let mut pending = vec![start];
  while let Some(node) = pending.pop() {
    if !closure.insert(node.id) {
      continue;
    }
    pending.extend(adjacency.children_of(node.id));
  }

  // Ancestors, walking parent pointers upward with the same guard.
  let mut current = start.parent_id;
  while let Some(id) = current {
    if !closure.insert(id) {
      break;
    }
    current = adjacency.by_id.get(&id).and_then(|node| node.parent_id);
  }

  closure
}

// ─── Tests ───────────────────────────────────────────────────────────────────
