//! SQL schema for the directory SQLite store.
//!
//! Executed once at connection startup via `PRAGMA user_version`. Future
//! migrations will be gated on that version number.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
///
/// `foreign_keys = ON` is what makes the CASCADE / SET NULL clauses below
/// effective; it must be set on every connection.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

-- Self-referential tree; deleting a node removes its whole subtree.
CREATE TABLE IF NOT EXISTS activities (
    id        INTEGER PRIMARY KEY,
    name      TEXT NOT NULL,
    parent_id INTEGER REFERENCES activities(id) ON DELETE CASCADE,
    level     INTEGER NOT NULL DEFAULT 1   -- 1-indexed depth, max 3
);

CREATE TABLE IF NOT EXISTS buildings (
    id        INTEGER PRIMARY KEY,
    address   TEXT NOT NULL,
    latitude  REAL NOT NULL,
    longitude REAL NOT NULL
);

-- Deleting a building detaches its organizations rather than removing them.
CREATE TABLE IF NOT EXISTS organizations (
    id          INTEGER PRIMARY KEY,
    name        TEXT NOT NULL,
    building_id INTEGER REFERENCES buildings(id) ON DELETE SET NULL
);

-- Phones are exclusively owned: they live and die with their organization.
CREATE TABLE IF NOT EXISTS organization_phones (
    id              INTEGER PRIMARY KEY,
    phone           TEXT NOT NULL,
    organization_id INTEGER NOT NULL REFERENCES organizations(id) ON DELETE CASCADE
);

-- Many-to-many between organizations and activities. Rows here are
-- references, not ownership: deleting either side removes the link only.
CREATE TABLE IF NOT EXISTS organization_activities (
    organization_id INTEGER NOT NULL REFERENCES organizations(id) ON DELETE CASCADE,
    activity_id     INTEGER NOT NULL REFERENCES activities(id) ON DELETE CASCADE,
    PRIMARY KEY (organization_id, activity_id)
);

CREATE INDEX IF NOT EXISTS activities_parent_idx       ON activities(parent_id);
CREATE INDEX IF NOT EXISTS organizations_building_idx  ON organizations(building_id);
CREATE INDEX IF NOT EXISTS org_phones_org_idx          ON organization_phones(organization_id);
CREATE INDEX IF NOT EXISTS org_activities_activity_idx ON organization_activities(activity_id);

PRAGMA user_version = 1;
";
