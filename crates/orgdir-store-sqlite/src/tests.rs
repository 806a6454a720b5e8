//! Integration tests for `SqliteStore` against an in-memory database.

use std::collections::HashSet;

use orgdir_core::{
  Error as CoreError, hierarchy,
  activity::{ActivityId, NewActivity},
  building::NewBuilding,
  organization::NewOrganization,
  store::DirectoryStore,
};

use crate::{Error, SqliteStore};

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn root(name: &str) -> NewActivity {
  NewActivity { name: name.to_string(), parent_id: None }
}

fn child(name: &str, parent_id: ActivityId) -> NewActivity {
  NewActivity { name: name.to_string(), parent_id: Some(parent_id) }
}

fn building(address: &str, latitude: f64, longitude: f64) -> NewBuilding {
  NewBuilding { address: address.to_string(), latitude, longitude }
}

fn organization(name: &str) -> NewOrganization {
  NewOrganization {
    name:         name.to_string(),
    building_id:  None,
    phones:       Vec::new(),
    activity_ids: Vec::new(),
  }
}

/// Insert the Food -> Meat -> Beef chain and return the three ids.
async fn food_chain(s: &SqliteStore) -> (ActivityId, ActivityId, ActivityId) {
  let food = s.add_activity(root("Food")).await.unwrap();
  let meat = s.add_activity(child("Meat", food.id)).await.unwrap();
  let beef = s.add_activity(child("Beef", meat.id)).await.unwrap();
  (food.id, meat.id, beef.id)
}

// ─── Activities ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn root_activity_gets_level_1() {
  let s = store().await;

  let food = s.add_activity(root("Food")).await.unwrap();
  assert_eq!(food.level, 1);
  assert_eq!(food.parent_id, None);

  let fetched = s.get_activity(food.id).await.unwrap().unwrap();
  assert_eq!(fetched, food);
}

#[tokio::test]
async fn child_levels_follow_parent() {
  let s = store().await;
  let (food_id, meat_id, beef_id) = food_chain(&s).await;

  let meat = s.get_activity(meat_id).await.unwrap().unwrap();
  let beef = s.get_activity(beef_id).await.unwrap().unwrap();
  assert_eq!(meat.level, 2);
  assert_eq!(meat.parent_id, Some(food_id));
  assert_eq!(beef.level, 3);
  assert_eq!(beef.parent_id, Some(meat_id));
}

#[tokio::test]
async fn fourth_level_is_rejected_and_not_persisted() {
  let s = store().await;
  let (_, _, beef_id) = food_chain(&s).await;

  let err = s.add_activity(child("Prime Beef", beef_id)).await.unwrap_err();
  assert!(matches!(err, Error::Core(CoreError::DepthLimitExceeded)));

  let all = s.list_activities().await.unwrap();
  assert_eq!(all.len(), 3);
  assert!(all.iter().all(|a| a.name != "Prime Beef"));
}

#[tokio::test]
async fn missing_parent_is_rejected_and_not_persisted() {
  let s = store().await;

  let err = s.add_activity(child("Orphan", 999)).await.unwrap_err();
  assert!(matches!(err, Error::Core(CoreError::ParentNotFound(999))));

  assert!(s.list_activities().await.unwrap().is_empty());
}

#[tokio::test]
async fn find_activity_by_name_is_case_insensitive() {
  let s = store().await;
  let food = s.add_activity(root("Food")).await.unwrap();

  let found = s.find_activity_by_name_ci("fOOd").await.unwrap().unwrap();
  assert_eq!(found.id, food.id);

  assert!(s.find_activity_by_name_ci("Drink").await.unwrap().is_none());
}

#[tokio::test]
async fn list_activity_roots_excludes_children() {
  let s = store().await;
  food_chain(&s).await;
  s.add_activity(root("Services")).await.unwrap();

  let roots = s.list_activity_roots().await.unwrap();
  let names: Vec<&str> = roots.iter().map(|a| a.name.as_str()).collect();
  assert_eq!(names, vec!["Food", "Services"]);
}

#[tokio::test]
async fn delete_activity_cascades_to_descendants() {
  let s = store().await;
  let (food_id, _, _) = food_chain(&s).await;

  s.delete_activity(food_id).await.unwrap();
  assert!(s.list_activities().await.unwrap().is_empty());
}

#[tokio::test]
async fn delete_missing_activity_errors() {
  let s = store().await;
  let err = s.delete_activity(42).await.unwrap_err();
  assert!(matches!(err, Error::Core(CoreError::ActivityNotFound(42))));
}

// ─── Buildings ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn add_and_list_buildings() {
  let s = store().await;

  let hq = s
    .add_building(building("1 Main St", 55.75, 37.61))
    .await
    .unwrap();
  s.add_building(building("2 Side St", 59.93, 30.33))
    .await
    .unwrap();

  let all = s.list_buildings().await.unwrap();
  assert_eq!(all.len(), 2);
  assert_eq!(all[0], hq);

  let fetched = s.get_building(hq.id).await.unwrap().unwrap();
  assert_eq!(fetched.address, "1 Main St");
}

#[tokio::test]
async fn delete_building_detaches_organizations() {
  let s = store().await;
  let hq = s
    .add_building(building("1 Main St", 55.75, 37.61))
    .await
    .unwrap();

  let mut input = organization("Acme");
  input.building_id = Some(hq.id);
  let org = s.add_organization(input).await.unwrap();

  s.delete_building(hq.id).await.unwrap();

  // The organization survives with its building reference unset.
  let fetched = s.get_organization(org.id).await.unwrap().unwrap();
  assert_eq!(fetched.building, None);
}

// ─── Organizations ───────────────────────────────────────────────────────────

#[tokio::test]
async fn add_organization_with_phones_and_activities() {
  let s = store().await;
  let (food_id, meat_id, _) = food_chain(&s).await;
  let hq = s
    .add_building(building("1 Main St", 55.75, 37.61))
    .await
    .unwrap();

  let view = s
    .add_organization(NewOrganization {
      name:         "Acme Foods".to_string(),
      building_id:  Some(hq.id),
      phones:       vec!["+7 123 456 78 90".to_string(), "+7 987 654 32 10".to_string()],
      activity_ids: vec![food_id, meat_id],
    })
    .await
    .unwrap();

  assert_eq!(view.name, "Acme Foods");
  assert_eq!(view.building.as_ref().map(|b| b.id), Some(hq.id));
  assert_eq!(view.phones.len(), 2);
  assert_eq!(view.phones[0].phone, "+7 123 456 78 90");
  let tagged: Vec<ActivityId> = view.activities.iter().map(|a| a.id).collect();
  assert_eq!(tagged, vec![food_id, meat_id]);

  let fetched = s.get_organization(view.id).await.unwrap().unwrap();
  assert_eq!(fetched, view);
}

#[tokio::test]
async fn add_organization_without_building() {
  let s = store().await;
  let view = s.add_organization(organization("Nomad LLC")).await.unwrap();
  assert_eq!(view.building, None);
  assert!(view.phones.is_empty());
  assert!(view.activities.is_empty());
}

#[tokio::test]
async fn add_organization_rejects_missing_building() {
  let s = store().await;
  let mut input = organization("Acme");
  input.building_id = Some(7);

  let err = s.add_organization(input).await.unwrap_err();
  assert!(matches!(err, Error::Core(CoreError::BuildingNotFound(7))));
  assert!(s.list_organizations().await.unwrap().is_empty());
}

#[tokio::test]
async fn add_organization_rejects_missing_activity() {
  let s = store().await;
  let mut input = organization("Acme");
  input.activity_ids = vec![99];

  let err = s.add_organization(input).await.unwrap_err();
  assert!(matches!(err, Error::Core(CoreError::ActivityNotFound(99))));
  assert!(s.list_organizations().await.unwrap().is_empty());
}

#[tokio::test]
async fn find_organization_by_exact_name() {
  let s = store().await;
  let org = s.add_organization(organization("Acme")).await.unwrap();

  let found = s.find_organization_by_name("Acme").await.unwrap().unwrap();
  assert_eq!(found.id, org.id);

  // Exact means case-sensitive here.
  assert!(s.find_organization_by_name("acme").await.unwrap().is_none());
}

#[tokio::test]
async fn organizations_in_building_filters_by_building() {
  let s = store().await;
  let hq    = s.add_building(building("1 Main St", 55.75, 37.61)).await.unwrap();
  let annex = s.add_building(building("2 Side St", 59.93, 30.33)).await.unwrap();

  let mut a = organization("Acme");
  a.building_id = Some(hq.id);
  let acme = s.add_organization(a).await.unwrap();

  let mut b = organization("Globex");
  b.building_id = Some(annex.id);
  s.add_organization(b).await.unwrap();

  let in_hq = s.organizations_in_building(hq.id).await.unwrap();
  assert_eq!(in_hq.len(), 1);
  assert_eq!(in_hq[0].id, acme.id);
}

#[tokio::test]
async fn organizations_with_activity_matches_case_insensitively() {
  let s = store().await;
  let (food_id, meat_id, _) = food_chain(&s).await;

  let mut a = organization("Butcher & Co");
  a.activity_ids = vec![meat_id];
  let butcher = s.add_organization(a).await.unwrap();

  let mut b = organization("Greengrocer");
  b.activity_ids = vec![food_id];
  s.add_organization(b).await.unwrap();

  let matches = s.organizations_with_activity("mEaT").await.unwrap();
  assert_eq!(matches.len(), 1);
  assert_eq!(matches[0].id, butcher.id);

  // No hierarchy traversal: tagging with the parent does not match.
  assert!(s.organizations_with_activity("Beef").await.unwrap().is_empty());
}

#[tokio::test]
async fn organizations_at_conjoins_both_coordinates() {
  let s = store().await;
  let here  = s.add_building(building("Here", 55.75, 37.61)).await.unwrap();
  // Same latitude, different longitude: must not match.
  let there = s.add_building(building("There", 55.75, 30.33)).await.unwrap();

  let mut a = organization("Acme");
  a.building_id = Some(here.id);
  let acme = s.add_organization(a).await.unwrap();

  let mut b = organization("Globex");
  b.building_id = Some(there.id);
  s.add_organization(b).await.unwrap();

  let found = s.organizations_at(55.75, 37.61).await.unwrap();
  assert_eq!(found.len(), 1);
  assert_eq!(found[0].id, acme.id);

  assert!(s.organizations_at(55.75, 0.0).await.unwrap().is_empty());
}

#[tokio::test]
async fn closure_search_reaches_descendant_tags() {
  let s = store().await;
  let (_, _, beef_id) = food_chain(&s).await;

  // Tagged with the leaf only.
  let mut input = organization("Beef Barn");
  input.activity_ids = vec![beef_id];
  let barn = s.add_organization(input).await.unwrap();

  // A query for the root activity must surface it via the closure.
  let activities = s.list_activities().await.unwrap();
  let closure = hierarchy::resolve_closure(&activities, "Food");
  let found = s.organizations_with_activity_ids(&closure).await.unwrap();
  assert_eq!(found.len(), 1);
  assert_eq!(found[0].id, barn.id);
}

#[tokio::test]
async fn organizations_with_empty_id_set_is_empty() {
  let s = store().await;
  s.add_organization(organization("Acme")).await.unwrap();

  let found = s
    .organizations_with_activity_ids(&HashSet::new())
    .await
    .unwrap();
  assert!(found.is_empty());
}

#[tokio::test]
async fn delete_organization_cascades_phones_but_keeps_activities() {
  let s = store().await;
  let (food_id, _, _) = food_chain(&s).await;

  let mut input = organization("Acme");
  input.phones = vec!["+1 555 0100".to_string()];
  input.activity_ids = vec![food_id];
  let org = s.add_organization(input).await.unwrap();

  s.delete_organization(org.id).await.unwrap();

  assert!(s.get_organization(org.id).await.unwrap().is_none());
  // The activity records are independently owned and survive.
  assert_eq!(s.list_activities().await.unwrap().len(), 3);
}
