//! [`SqliteStore`] — the SQLite implementation of [`DirectoryStore`].

use std::{collections::HashSet, path::Path};

use rusqlite::OptionalExtension as _;

use orgdir_core::{
  Error as CoreError, hierarchy,
  activity::{Activity, ActivityId, NewActivity},
  building::{Building, BuildingId, NewBuilding},
  organization::{
    NewOrganization, Organization, OrganizationId, OrganizationView,
  },
  store::DirectoryStore,
};

use crate::{
  Error, Result,
  rows::{
    activity_from_row, building_from_row, organization_from_row,
    phone_from_row,
  },
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A directory store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── View assembly ───────────────────────────────────────────────────────────

/// Assemble the read model for one organization row: resolve its building
/// and collect its phones and activity associations.
fn load_view(
  conn: &rusqlite::Connection,
  org: Organization,
) -> rusqlite::Result<OrganizationView> {
  let building = match org.building_id {
    Some(id) => conn
      .query_row(
        "SELECT id, address, latitude, longitude FROM buildings WHERE id = ?1",
        rusqlite::params![id],
        building_from_row,
      )
      .optional()?,
    None => None,
  };

  let mut stmt = conn.prepare(
    "SELECT id, phone FROM organization_phones
     WHERE organization_id = ?1 ORDER BY id",
  )?;
  let phones = stmt
    .query_map(rusqlite::params![org.id], phone_from_row)?
    .collect::<rusqlite::Result<Vec<_>>>()?;

  let mut stmt = conn.prepare(
    "SELECT a.id, a.name, a.parent_id, a.level
     FROM activities a
     JOIN organization_activities oa ON oa.activity_id = a.id
     WHERE oa.organization_id = ?1
     ORDER BY a.id",
  )?;
  let activities = stmt
    .query_map(rusqlite::params![org.id], activity_from_row)?
    .collect::<rusqlite::Result<Vec<_>>>()?;

  Ok(OrganizationView {
    id: org.id,
    name: org.name,
    building,
    phones,
    activities,
  })
}

fn load_views(
  conn: &rusqlite::Connection,
  orgs: Vec<Organization>,
) -> rusqlite::Result<Vec<OrganizationView>> {
  orgs.into_iter().map(|org| load_view(conn, org)).collect()
}

// ─── DirectoryStore impl ─────────────────────────────────────────────────────

impl DirectoryStore for SqliteStore {
  type Error = Error;

  // ── Activities ────────────────────────────────────────────────────────────

  async fn add_activity(&self, input: NewActivity) -> Result<Activity> {
    // Validate-then-insert; no extra serialization across the two steps.
    // A concurrent insert under the same parent passes the same check and
    // is harmless (its level is computed from the committed parent too).
    let level = match input.parent_id {
      Some(parent_id) => {
        let parent = self
          .get_activity(parent_id)
          .await?
          .ok_or(CoreError::ParentNotFound(parent_id))?;
        hierarchy::child_level(&parent).map_err(Error::Core)?
      }
      None => 1,
    };

    let name      = input.name.clone();
    let parent_id = input.parent_id;

    let id = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO activities (name, parent_id, level) VALUES (?1, ?2, ?3)",
          rusqlite::params![name, parent_id, level],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    Ok(Activity { id, name: input.name, parent_id: input.parent_id, level })
  }

  async fn get_activity(&self, id: ActivityId) -> Result<Option<Activity>> {
    let activity = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT id, name, parent_id, level FROM activities WHERE id = ?1",
              rusqlite::params![id],
              activity_from_row,
            )
            .optional()?,
        )
      })
      .await?;
    Ok(activity)
  }

  async fn find_activity_by_name_ci(
    &self,
    name: &str,
  ) -> Result<Option<Activity>> {
    let name = name.to_owned();
    let activity = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT id, name, parent_id, level FROM activities
               WHERE LOWER(name) = LOWER(?1)",
              rusqlite::params![name],
              activity_from_row,
            )
            .optional()?,
        )
      })
      .await?;
    Ok(activity)
  }

  async fn list_activities(&self) -> Result<Vec<Activity>> {
    let activities = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT id, name, parent_id, level FROM activities ORDER BY id",
        )?;
        let rows = stmt
          .query_map([], activity_from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(activities)
  }

  async fn list_activity_roots(&self) -> Result<Vec<Activity>> {
    let roots = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT id, name, parent_id, level FROM activities
           WHERE parent_id IS NULL ORDER BY id",
        )?;
        let rows = stmt
          .query_map([], activity_from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(roots)
  }

  async fn delete_activity(&self, id: ActivityId) -> Result<()> {
    let affected = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "DELETE FROM activities WHERE id = ?1",
          rusqlite::params![id],
        )?)
      })
      .await?;

    if affected == 0 {
      return Err(CoreError::ActivityNotFound(id).into());
    }
    Ok(())
  }

  // ── Buildings ─────────────────────────────────────────────────────────────

  async fn add_building(&self, input: NewBuilding) -> Result<Building> {
    let address   = input.address.clone();
    let latitude  = input.latitude;
    let longitude = input.longitude;

    let id = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO buildings (address, latitude, longitude)
           VALUES (?1, ?2, ?3)",
          rusqlite::params![address, latitude, longitude],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    Ok(Building {
      id,
      address:   input.address,
      latitude:  input.latitude,
      longitude: input.longitude,
    })
  }

  async fn get_building(&self, id: BuildingId) -> Result<Option<Building>> {
    let building = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT id, address, latitude, longitude FROM buildings
               WHERE id = ?1",
              rusqlite::params![id],
              building_from_row,
            )
            .optional()?,
        )
      })
      .await?;
    Ok(building)
  }

  async fn list_buildings(&self) -> Result<Vec<Building>> {
    let buildings = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT id, address, latitude, longitude FROM buildings ORDER BY id",
        )?;
        let rows = stmt
          .query_map([], building_from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(buildings)
  }

  async fn delete_building(&self, id: BuildingId) -> Result<()> {
    let affected = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "DELETE FROM buildings WHERE id = ?1",
          rusqlite::params![id],
        )?)
      })
      .await?;

    if affected == 0 {
      return Err(CoreError::BuildingNotFound(id).into());
    }
    Ok(())
  }

  // ── Organizations ─────────────────────────────────────────────────────────

  async fn add_organization(
    &self,
    input: NewOrganization,
  ) -> Result<OrganizationView> {
    // Check references up front so the caller gets a typed failure instead
    // of a raw constraint violation. The write itself runs in one
    // transaction: the record, its phones, and its links land together.
    if let Some(building_id) = input.building_id {
      self
        .get_building(building_id)
        .await?
        .ok_or(CoreError::BuildingNotFound(building_id))?;
    }
    for &activity_id in &input.activity_ids {
      self
        .get_activity(activity_id)
        .await?
        .ok_or(CoreError::ActivityNotFound(activity_id))?;
    }

    let view = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;

        tx.execute(
          "INSERT INTO organizations (name, building_id) VALUES (?1, ?2)",
          rusqlite::params![input.name, input.building_id],
        )?;
        let org_id = tx.last_insert_rowid();

        for phone in &input.phones {
          tx.execute(
            "INSERT INTO organization_phones (phone, organization_id)
             VALUES (?1, ?2)",
            rusqlite::params![phone, org_id],
          )?;
        }
        for activity_id in &input.activity_ids {
          tx.execute(
            "INSERT OR IGNORE INTO organization_activities
               (organization_id, activity_id)
             VALUES (?1, ?2)",
            rusqlite::params![org_id, activity_id],
          )?;
        }
        tx.commit()?;

        let org = Organization {
          id:          org_id,
          name:        input.name,
          building_id: input.building_id,
        };
        Ok(load_view(conn, org)?)
      })
      .await?;

    Ok(view)
  }

  async fn get_organization(
    &self,
    id: OrganizationId,
  ) -> Result<Option<OrganizationView>> {
    let view = self
      .conn
      .call(move |conn| {
        let org = conn
          .query_row(
            "SELECT id, name, building_id FROM organizations WHERE id = ?1",
            rusqlite::params![id],
            organization_from_row,
          )
          .optional()?;
        match org {
          Some(org) => Ok(Some(load_view(conn, org)?)),
          None => Ok(None),
        }
      })
      .await?;
    Ok(view)
  }

  async fn find_organization_by_name(
    &self,
    name: &str,
  ) -> Result<Option<OrganizationView>> {
    let name = name.to_owned();
    let view = self
      .conn
      .call(move |conn| {
        let org = conn
          .query_row(
            "SELECT id, name, building_id FROM organizations WHERE name = ?1",
            rusqlite::params![name],
            organization_from_row,
          )
          .optional()?;
        match org {
          Some(org) => Ok(Some(load_view(conn, org)?)),
          None => Ok(None),
        }
      })
      .await?;
    Ok(view)
  }

  async fn list_organizations(&self) -> Result<Vec<OrganizationView>> {
    let views = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT id, name, building_id FROM organizations ORDER BY id",
        )?;
        let orgs = stmt
          .query_map([], organization_from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(load_views(conn, orgs)?)
      })
      .await?;
    Ok(views)
  }

  async fn organizations_in_building(
    &self,
    building_id: BuildingId,
  ) -> Result<Vec<OrganizationView>> {
    let views = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT id, name, building_id FROM organizations
           WHERE building_id = ?1 ORDER BY id",
        )?;
        let orgs = stmt
          .query_map(rusqlite::params![building_id], organization_from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(load_views(conn, orgs)?)
      })
      .await?;
    Ok(views)
  }

  async fn organizations_with_activity(
    &self,
    activity_name: &str,
  ) -> Result<Vec<OrganizationView>> {
    let name = activity_name.to_owned();
    let views = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT DISTINCT o.id, o.name, o.building_id
           FROM organizations o
           JOIN organization_activities oa ON oa.organization_id = o.id
           JOIN activities a ON a.id = oa.activity_id
           WHERE LOWER(a.name) = LOWER(?1)
           ORDER BY o.id",
        )?;
        let orgs = stmt
          .query_map(rusqlite::params![name], organization_from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(load_views(conn, orgs)?)
      })
      .await?;
    Ok(views)
  }

  async fn organizations_at(
    &self,
    latitude: f64,
    longitude: f64,
  ) -> Result<Vec<OrganizationView>> {
    let views = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT o.id, o.name, o.building_id
           FROM organizations o
           JOIN buildings b ON b.id = o.building_id
           WHERE b.latitude = ?1 AND b.longitude = ?2
           ORDER BY o.id",
        )?;
        let orgs = stmt
          .query_map(
            rusqlite::params![latitude, longitude],
            organization_from_row,
          )?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(load_views(conn, orgs)?)
      })
      .await?;
    Ok(views)
  }

  async fn organizations_with_activity_ids(
    &self,
    ids: &HashSet<ActivityId>,
  ) -> Result<Vec<OrganizationView>> {
    if ids.is_empty() {
      return Ok(Vec::new());
    }
    let ids: Vec<ActivityId> = ids.iter().copied().collect();

    let views = self
      .conn
      .call(move |conn| {
        let placeholders = vec!["?"; ids.len()].join(", ");
        let sql = format!(
          "SELECT DISTINCT o.id, o.name, o.building_id
           FROM organizations o
           JOIN organization_activities oa ON oa.organization_id = o.id
           WHERE oa.activity_id IN ({placeholders})
           ORDER BY o.id"
        );
        let mut stmt = conn.prepare(&sql)?;
        let orgs = stmt
          .query_map(rusqlite::params_from_iter(ids.iter()), organization_from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(load_views(conn, orgs)?)
      })
      .await?;
    Ok(views)
  }

  async fn delete_organization(&self, id: OrganizationId) -> Result<()> {
    let affected = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "DELETE FROM organizations WHERE id = ?1",
          rusqlite::params![id],
        )?)
      })
      .await?;

    if affected == 0 {
      return Err(CoreError::OrganizationNotFound(id).into());
    }
    Ok(())
  }
}
