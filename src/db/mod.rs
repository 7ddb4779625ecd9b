//! handles most db specific functionality
//! (engine check, connecting, schema & seed scripts, table queries)

pub mod helpers;
pub mod queries;
pub mod resources;

use std::time::Duration;

use rusqlite::{params, Connection, OpenFlags};
use tracing::{debug, info};

use crate::error::{Error, ScriptError};
use helpers::*;
use queries::*;
use resources::{SCHEMA_RESOURCE, SEED_RESOURCE};

/// oldest sqlite providing table valued pragma functions (used by `check`)
pub const MIN_SQLITE_VERSION: i32 = 3_016_000;

/// `PRAGMA user_version` value marking a seeded database
pub const SEED_VERSION: i32 = 1;

/// representing a row from Activity table
#[derive(Debug, Clone, PartialEq)]
pub struct ActivityRow {
    pub code: i64,
    pub kind: String,
    pub duration: i64,
    pub distance: f64,
}

/// representing a row from User table
#[derive(Debug, Clone, PartialEq)]
pub struct UserRow {
    pub code: i64,
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    Applied,
    AlreadySeeded,
}

/// make sure the linked sqlite engine is usable; returns its version
pub fn load_driver() -> Result<&'static str, Error> {
    let version = rusqlite::version();

    if rusqlite::version_number() < MIN_SQLITE_VERSION {
        return Err(Error::Driver(format!(
            "sqlite {} found, 3.16.0 or newer required",
            version
        )));
    }

    debug!(version, "sqlite engine available");
    Ok(version)
}

/// open the database named by `url`; the embedded engine takes no
/// credentials, so anything but an empty user/password is refused
pub fn connect(url: &str, user: &str, password: &str) -> Result<Connection, Error> {
    let target = parse_url(url).map_err(|reason| Error::Connection {
        target: url.to_string(),
        reason,
    })?;

    if !user.is_empty() || !password.is_empty() {
        return Err(Error::Connection {
            target: target.path,
            reason: "the embedded database does not take credentials".to_string(),
        });
    }

    let conn = open(&target).map_err(|e| Error::Connection {
        target: target.path.clone(),
        reason: e.to_string(),
    })?;

    info!(path = %target.path, "database connection established");
    Ok(conn)
}

fn open(target: &ConnectionTarget) -> rusqlite::Result<Connection> {
    let conn = if target.is_memory() {
        Connection::open_in_memory()?
    } else {
        Connection::open_with_flags(
            &target.path,
            OpenFlags::SQLITE_OPEN_READ_WRITE
                | OpenFlags::SQLITE_OPEN_CREATE
                | OpenFlags::SQLITE_OPEN_URI
                | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?
    };

    // sqlite opens lazily; touch the schema so an unreachable file fails here
    conn.query_row("SELECT count(*) FROM sqlite_master", [], |row| row.get::<_, i64>(0))?;

    let opts = &target.options;

    conn.pragma_update(None, "foreign_keys", opts.foreign_keys)?;
    if let Some(ms) = opts.busy_timeout_ms {
        conn.busy_timeout(Duration::from_millis(ms))?;
    }
    if let Some(mode) = &opts.mode {
        debug!(mode = %mode, "compatibility mode requested, sqlite dialect kept");
    }
    if opts.auto_reconnect {
        debug!("auto reconnect requested, embedded connection never drops");
    }

    Ok(conn)
}

/// release the connection, reporting whatever sqlite says on close
pub fn close(conn: Connection) -> Result<(), Error> {
    conn.close().map_err(|(_, e)| Error::Close(e))?;
    debug!("database connection closed");
    Ok(())
}

fn script(resource: &str) -> Result<&'static str, ScriptError> {
    resources::load(resource).ok_or_else(|| ScriptError::MissingResource(resource.to_string()))
}

/// execute a bundled script as one batch; a missing resource leaves the
/// db untouched
pub fn run_script(db: &Connection, resource: &str) -> Result<(), ScriptError> {
    let sql = script(resource)?;
    db.execute_batch(sql)?;
    Ok(())
}

/// create tables if absent and verify their layout; safe to call on an
/// already initialized db
pub fn init_schema(db: &Connection) -> Result<(), Error> {
    run_script(db, SCHEMA_RESOURCE).map_err(Error::Schema)?;
    check(db)?;
    info!("database structure ready");
    Ok(())
}

/// populate a freshly created db with initial rows, once per db file
pub fn load_seed(db: &Connection) -> Result<SeedOutcome, Error> {
    let sql = script(SEED_RESOURCE).map_err(Error::Seed)?;

    let version: i32 = db
        .pragma_query_value(None, "user_version", |row| row.get(0))
        .map_err(|e| Error::Seed(e.into()))?;

    if version >= SEED_VERSION {
        debug!(version, "seed data already present");
        return Ok(SeedOutcome::AlreadySeeded);
    }

    db.execute_batch(sql).map_err(|e| Error::Seed(e.into()))?;
    db.pragma_update(None, "user_version", SEED_VERSION)
        .map_err(|e| Error::Seed(e.into()))?;

    info!("seed data inserted");
    Ok(SeedOutcome::Applied)
}

/// check existing db for integrity, conforming to expected layout
pub fn check(db: &Connection) -> Result<(), Error> {
    let mut stmt = db
        .prepare(SQL_TABLE_COLUMNS)
        .map_err(|e| Error::Schema(e.into()))?;

    let expected: [(&str, &[&str]); 2] = [
        (SQL_TABLEN_ACT, &SQL_COLUMNS_ACT[..]),
        (SQL_TABLEN_USR, &SQL_COLUMNS_USR[..]),
    ];

    for (table, columns) in expected {
        let found = stmt
            .query_map(params![table], |row| row.get::<_, String>(0))
            .and_then(|rows| rows.collect::<rusqlite::Result<Vec<String>>>())
            .map_err(|e| Error::Schema(e.into()))?;

        if found != columns {
            debug!(table, ?found, "table layout mismatch");
            return Err(Error::Schema(ScriptError::Layout {
                table: table.to_string(),
            }));
        }
    }

    Ok(())
}

/// retrieve all activities in storage order
pub fn get_activities(db: &Connection) -> rusqlite::Result<Vec<ActivityRow>> {
    let mut stmt = db.prepare(SQL_SELECT_ACT)?;

    // create iterator
    let db_activities_data = stmt.query_map([], |row| {
        Ok(ActivityRow {
            code: row.get(0)?,
            kind: row.get(1)?,
            duration: row.get(2)?,
            distance: row.get(3)?,
        })
    })?;

    // create data vector and use iterator to populate it
    let mut activities = Vec::new();
    for act in db_activities_data {
        activities.push(act?);
    }

    Ok(activities)
}

/// set duration and distance of the activity with `code`;
/// returns the number of rows changed (0 if there's no such code)
pub fn update_activity(
    db: &Connection,
    code: i64,
    duration: i64,
    distance: f64,
) -> rusqlite::Result<usize> {
    db.execute(SQL_UPDATE_ACT, params![duration, distance, code])
}

/// retrieve all users in storage order
pub fn get_users(db: &Connection) -> rusqlite::Result<Vec<UserRow>> {
    let mut stmt = db.prepare(SQL_SELECT_USR)?;

    let db_user_data = stmt.query_map([], |row| {
        Ok(UserRow {
            code: row.get(0)?,
            name: row.get(1)?,
        })
    })?;

    let mut users = Vec::new();
    for user in db_user_data {
        users.push(user?);
    }

    Ok(users)
}

/// remove the user with `code`; returns the number of rows removed
pub fn delete_user(db: &Connection, code: i64) -> rusqlite::Result<usize> {
    db.execute(SQL_DELETE_USR, params![code])
}
