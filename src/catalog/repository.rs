//! Record store interface for angles.

use angle_catalog_common::{AngleId, Error, Result};
use angle_catalog_db::models::Angle;
use angle_catalog_db::pool::{get_conn, DbPool};
use angle_catalog_db::queries::angles::{self, AngleFilter, Pagination};

/// Persistence operations the catalog needs.
pub trait AngleRepository: Send + Sync {
    fn find_by_id(&self, id: AngleId) -> Result<Option<Angle>>;

    /// Matching records in insertion order, optionally windowed.
    fn find(&self, filter: &AngleFilter, pagination: Option<Pagination>) -> Result<Vec<Angle>>;

    fn count(&self, filter: &AngleFilter) -> Result<u64>;

    fn create(&self, angle: &Angle) -> Result<()>;

    /// Persist every field of an existing record. Fails with
    /// [`Error::NotFound`] if the record no longer exists.
    fn update(&self, angle: &Angle) -> Result<()>;

    /// Returns `Ok(false)` if there was no such record.
    fn delete(&self, id: AngleId) -> Result<bool>;
}

/// [`AngleRepository`] backed by the SQLite pool.
#[derive(Clone)]
pub struct SqliteAngleRepository {
    pool: DbPool,
}

impl SqliteAngleRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl AngleRepository for SqliteAngleRepository {
    fn find_by_id(&self, id: AngleId) -> Result<Option<Angle>> {
        let conn = get_conn(&self.pool)?;
        angles::get_angle(&conn, id)
    }

    fn find(&self, filter: &AngleFilter, pagination: Option<Pagination>) -> Result<Vec<Angle>> {
        let conn = get_conn(&self.pool)?;
        angles::list_angles(&conn, filter, pagination)
    }

    fn count(&self, filter: &AngleFilter) -> Result<u64> {
        let conn = get_conn(&self.pool)?;
        angles::count_angles(&conn, filter)
    }

    fn create(&self, angle: &Angle) -> Result<()> {
        let conn = get_conn(&self.pool)?;
        angles::insert_angle(&conn, angle)
    }

    fn update(&self, angle: &Angle) -> Result<()> {
        let conn = get_conn(&self.pool)?;
        if angles::update_angle(&conn, angle)? {
            Ok(())
        } else {
            Err(Error::not_found(format!("angle {}", angle.id)))
        }
    }

    fn delete(&self, id: AngleId) -> Result<bool> {
        let conn = get_conn(&self.pool)?;
        angles::delete_angle(&conn, id)
    }
}
