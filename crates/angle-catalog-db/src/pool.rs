//! Database connection pool management.
//!
//! This module provides connection pooling for SQLite using r2d2.
//! It handles pool initialization, connection customization, and running migrations.

use std::time::Duration;

use angle_catalog_common::{Error, Result};
use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;

use crate::{functions, migrations};

/// Type alias for the database connection pool.
pub type DbPool = Pool<SqliteConnectionManager>;

/// Type alias for a pooled database connection.
pub type PooledConnection = r2d2::PooledConnection<SqliteConnectionManager>;

/// Connections kept by a file-backed pool.
const FILE_POOL_SIZE: u32 = 4;

/// How long a connection waits on a locked database before failing.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Initialize a new database pool with the given file path.
///
/// This function will:
/// - Create the SQLite database file if it doesn't exist
/// - Set up connection pooling with r2d2
/// - Set a busy timeout on every connection
/// - Register the catalog's SQL functions on every connection
/// - Run pending database migrations
///
/// # Example
///
/// ```no_run
/// use angle_catalog_db::pool::init_pool;
///
/// let pool = init_pool("/var/lib/angle-catalog/catalog.db").unwrap();
/// let conn = pool.get().unwrap();
/// ```
pub fn init_pool(db_path: &str) -> Result<DbPool> {
    let manager = SqliteConnectionManager::file(db_path).with_init(|conn| {
        conn.busy_timeout(BUSY_TIMEOUT)?;
        functions::register(conn)
    });

    let pool = Pool::builder()
        .max_size(FILE_POOL_SIZE)
        .build(manager)
        .map_err(|e| Error::database(format!("Failed to create connection pool: {}", e)))?;

    migrate(&pool)?;

    Ok(pool)
}

/// Initialize an in-memory database pool for testing.
///
/// Every SQLite in-memory connection is its own database, so the pool holds
/// exactly one connection. The database is lost when the pool is dropped.
///
/// # Example
///
/// ```
/// use angle_catalog_db::pool::init_memory_pool;
///
/// let pool = init_memory_pool().unwrap();
/// let conn = pool.get().unwrap();
/// ```
pub fn init_memory_pool() -> Result<DbPool> {
    let manager = SqliteConnectionManager::memory().with_init(|conn| functions::register(conn));

    let pool = Pool::builder()
        .max_size(1)
        .build(manager)
        .map_err(|e| Error::database(format!("Failed to create in-memory pool: {}", e)))?;

    migrate(&pool)?;

    Ok(pool)
}

fn migrate(pool: &DbPool) -> Result<()> {
    let conn = get_conn(pool)?;

    let applied = migrations::run_migrations(&conn)
        .map_err(|e| Error::database(format!("Failed to run migrations: {}", e)))?;
    tracing::debug!(
        applied,
        version = migrations::latest_version(),
        "Catalog schema ready"
    );

    Ok(())
}

/// Get a connection from the pool.
///
/// This is a convenience wrapper around `pool.get()` that converts the
/// r2d2 error into our common Error type.
pub fn get_conn(pool: &DbPool) -> Result<PooledConnection> {
    pool.get()
        .map_err(|e| Error::database(format!("Failed to get connection from pool: {}", e)))
}
