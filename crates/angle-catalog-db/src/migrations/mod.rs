//! Schema migrations for the angle catalog database.
//!
//! The SQL files next to this module are compiled into the binary and applied
//! in version order. `schema_migrations` records what has been applied, so
//! opening an existing catalog only runs the files it has not seen. A catalog
//! written by a newer build is refused rather than opened with a schema this
//! build does not know.

use rusqlite::Connection;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MigrationError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Migration {version} ({name}) failed: {reason}")]
    Failed {
        version: usize,
        name: &'static str,
        reason: String,
    },

    #[error("Catalog schema version {found} is newer than the supported version {supported}")]
    NewerSchema { found: usize, supported: usize },
}

struct Migration {
    version: usize,
    name: &'static str,
    sql: &'static str,
}

impl Migration {
    fn failed(&self, err: rusqlite::Error) -> MigrationError {
        MigrationError::Failed {
            version: self.version,
            name: self.name,
            reason: err.to_string(),
        }
    }
}

const MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    name: "angles",
    sql: include_str!("001_angles.sql"),
}];

fn ensure_migrations_table(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS schema_migrations (
            version INTEGER PRIMARY KEY NOT NULL,
            name TEXT NOT NULL,
            applied_at TEXT NOT NULL DEFAULT (datetime('now'))
        )",
    )
}

/// Highest applied version, 0 for a fresh database.
fn applied_version(conn: &Connection) -> rusqlite::Result<usize> {
    conn.query_row("SELECT MAX(version) FROM schema_migrations", [], |row| {
        row.get::<_, Option<usize>>(0)
    })
    .map(|version| version.unwrap_or(0))
}

/// Bring the schema up to [`latest_version`].
///
/// Each pending migration runs in its own transaction together with its
/// `schema_migrations` row. Returns how many migrations were applied.
pub fn run_migrations(conn: &Connection) -> Result<usize, MigrationError> {
    let current = current_version(conn)?;
    let supported = latest_version();
    if current > supported {
        return Err(MigrationError::NewerSchema {
            found: current,
            supported,
        });
    }

    let mut applied = 0;
    for migration in MIGRATIONS.iter().filter(|m| m.version > current) {
        let tx = conn.unchecked_transaction()?;
        tx.execute_batch(migration.sql)
            .map_err(|e| migration.failed(e))?;
        tx.execute(
            "INSERT INTO schema_migrations (version, name) VALUES (?, ?)",
            rusqlite::params![migration.version, migration.name],
        )
        .map_err(|e| migration.failed(e))?;
        tx.commit().map_err(|e| migration.failed(e))?;

        applied += 1;
        tracing::info!(
            version = migration.version,
            name = migration.name,
            "Applied migration"
        );
    }

    Ok(applied)
}

/// Schema version recorded in the database, 0 if nothing was applied yet.
pub fn current_version(conn: &Connection) -> Result<usize, MigrationError> {
    ensure_migrations_table(conn)?;
    Ok(applied_version(conn)?)
}

/// Version of the newest migration compiled into this build.
pub fn latest_version() -> usize {
    MIGRATIONS.last().map_or(0, |m| m.version)
}
