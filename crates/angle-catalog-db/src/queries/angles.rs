//! Angle database queries.
//!
//! This module provides CRUD operations for catalog angles, plus the filtered
//! and paginated listing used by the catalog endpoints.

use angle_catalog_common::{AngleId, BorderRadius, Error, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::types::Type;
use rusqlite::Connection;

use crate::models::{Angle, STATUS_AVAILABLE};

const ANGLE_COLUMNS: &str = "id, name, description, border_radius, price, discount_option,
        discounted_percentage, discounted_price, vat_amount, status, avatar_angle,
        created_at, updated_at";

/// Filter options for listing angles.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AngleFilter {
    /// Case-insensitive substring matched against the name.
    pub search: Option<String>,
    /// Exact status match.
    pub status: Option<String>,
}

impl AngleFilter {
    /// Filter selecting every angle whose status is exactly `available`.
    pub fn available() -> Self {
        Self {
            search: None,
            status: Some(STATUS_AVAILABLE.to_string()),
        }
    }

    fn where_clause(&self) -> String {
        let mut clause = String::from(" WHERE 1=1");
        if self.search.is_some() {
            clause.push_str(" AND contains_ci(name, :search)");
        }
        if self.status.is_some() {
            clause.push_str(" AND status = :status");
        }
        clause
    }
}

/// Pagination options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub offset: u64,
    pub limit: u32,
}

fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn parse_timestamp(idx: usize, value: String) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(&value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

/// Parse an angle from a database row.
///
/// Expects columns in the order of `ANGLE_COLUMNS`.
fn parse_angle_row(row: &rusqlite::Row) -> rusqlite::Result<Angle> {
    let id = row
        .get::<_, String>(0)?
        .parse::<AngleId>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(0, Type::Text, Box::new(e)))?;

    Ok(Angle {
        id,
        name: row.get(1)?,
        description: row.get(2)?,
        border_radius: BorderRadius::from_storage(&row.get::<_, String>(3)?),
        price: row.get(4)?,
        discount_option: row.get(5)?,
        discounted_percentage: row.get(6)?,
        discounted_price: row.get(7)?,
        vat_amount: row.get(8)?,
        status: row.get(9)?,
        avatar_angle: row.get(10)?,
        created_at: parse_timestamp(11, row.get(11)?)?,
        updated_at: parse_timestamp(12, row.get(12)?)?,
    })
}

/// Insert a new angle.
///
/// # Returns
///
/// * `Ok(())` - If the angle was inserted
/// * `Err(Error)` - If a database error occurs, including a duplicate ID
pub fn insert_angle(conn: &Connection, angle: &Angle) -> Result<()> {
    conn.execute(
        "INSERT INTO angles (
            id, name, description, border_radius, price, discount_option,
            discounted_percentage, discounted_price, vat_amount, status, avatar_angle,
            created_at, updated_at
         ) VALUES (
            :id, :name, :description, :border_radius, :price, :discount_option,
            :discounted_percentage, :discounted_price, :vat_amount, :status, :avatar_angle,
            :created_at, :updated_at
         )",
        rusqlite::named_params! {
            ":id": angle.id.to_string(),
            ":name": &angle.name,
            ":description": &angle.description,
            ":border_radius": angle.border_radius.to_storage(),
            ":price": angle.price,
            ":discount_option": &angle.discount_option,
            ":discounted_percentage": angle.discounted_percentage,
            ":discounted_price": angle.discounted_price,
            ":vat_amount": angle.vat_amount,
            ":status": &angle.status,
            ":avatar_angle": &angle.avatar_angle,
            ":created_at": format_timestamp(&angle.created_at),
            ":updated_at": format_timestamp(&angle.updated_at),
        },
    )
    .map_err(|e| Error::database(e.to_string()))?;

    Ok(())
}

/// Overwrite every mutable column of an existing angle.
///
/// `created_at` is never changed.
///
/// # Returns
///
/// * `Ok(true)` - If the angle was updated
/// * `Ok(false)` - If no angle with this ID exists
/// * `Err(Error)` - If a database error occurs
pub fn update_angle(conn: &Connection, angle: &Angle) -> Result<bool> {
    let rows_affected = conn
        .execute(
            "UPDATE angles SET
                name = :name,
                description = :description,
                border_radius = :border_radius,
                price = :price,
                discount_option = :discount_option,
                discounted_percentage = :discounted_percentage,
                discounted_price = :discounted_price,
                vat_amount = :vat_amount,
                status = :status,
                avatar_angle = :avatar_angle,
                updated_at = :updated_at
             WHERE id = :id",
            rusqlite::named_params! {
                ":id": angle.id.to_string(),
                ":name": &angle.name,
                ":description": &angle.description,
                ":border_radius": angle.border_radius.to_storage(),
                ":price": angle.price,
                ":discount_option": &angle.discount_option,
                ":discounted_percentage": angle.discounted_percentage,
                ":discounted_price": angle.discounted_price,
                ":vat_amount": angle.vat_amount,
                ":status": &angle.status,
                ":avatar_angle": &angle.avatar_angle,
                ":updated_at": format_timestamp(&angle.updated_at),
            },
        )
        .map_err(|e| Error::database(e.to_string()))?;

    Ok(rows_affected > 0)
}

/// Get an angle by ID.
///
/// # Returns
///
/// * `Ok(Some(Angle))` - The angle if found
/// * `Ok(None)` - If the angle does not exist
/// * `Err(Error)` - If a database error occurs
pub fn get_angle(conn: &Connection, id: AngleId) -> Result<Option<Angle>> {
    let result = conn.query_row(
        &format!("SELECT {ANGLE_COLUMNS} FROM angles WHERE id = :id"),
        rusqlite::named_params! { ":id": id.to_string() },
        parse_angle_row,
    );

    match result {
        Ok(angle) => Ok(Some(angle)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(Error::database(e.to_string())),
    }
}

/// List angles matching a filter, in insertion order.
///
/// With `pagination` set, only that window of the matches is returned.
pub fn list_angles(
    conn: &Connection,
    filter: &AngleFilter,
    pagination: Option<Pagination>,
) -> Result<Vec<Angle>> {
    let mut query = format!("SELECT {ANGLE_COLUMNS} FROM angles");
    query.push_str(&filter.where_clause());
    query.push_str(" ORDER BY rowid ASC");
    if pagination.is_some() {
        query.push_str(" LIMIT :limit OFFSET :offset");
    }

    let mut stmt = conn
        .prepare(&query)
        .map_err(|e| Error::database(e.to_string()))?;

    let limit = pagination.map(|p| i64::from(p.limit));
    let offset = pagination.map(|p| i64::try_from(p.offset).unwrap_or(i64::MAX));

    let mut params: Vec<(&str, &dyn rusqlite::ToSql)> = Vec::new();
    if let Some(ref search) = filter.search {
        params.push((":search", search));
    }
    if let Some(ref status) = filter.status {
        params.push((":status", status));
    }
    if let (Some(limit), Some(offset)) = (&limit, &offset) {
        params.push((":limit", limit));
        params.push((":offset", offset));
    }

    let angles = stmt
        .query_map(&*params, parse_angle_row)
        .map_err(|e| Error::database(e.to_string()))?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| Error::database(e.to_string()))?;

    Ok(angles)
}

/// Count angles matching a filter.
pub fn count_angles(conn: &Connection, filter: &AngleFilter) -> Result<u64> {
    let mut query = String::from("SELECT COUNT(*) FROM angles");
    query.push_str(&filter.where_clause());

    let mut params: Vec<(&str, &dyn rusqlite::ToSql)> = Vec::new();
    if let Some(ref search) = filter.search {
        params.push((":search", search));
    }
    if let Some(ref status) = filter.status {
        params.push((":status", status));
    }

    let count: i64 = conn
        .query_row(&query, &*params, |row| row.get(0))
        .map_err(|e| Error::database(e.to_string()))?;

    Ok(u64::try_from(count).unwrap_or(0))
}

/// Delete an angle by ID.
///
/// # Returns
///
/// * `Ok(true)` - If the angle was deleted
/// * `Ok(false)` - If the angle did not exist
/// * `Err(Error)` - If a database error occurs
pub fn delete_angle(conn: &Connection, id: AngleId) -> Result<bool> {
    let rows_affected = conn
        .execute(
            "DELETE FROM angles WHERE id = :id",
            rusqlite::named_params! { ":id": id.to_string() },
        )
        .map_err(|e| Error::database(e.to_string()))?;

    Ok(rows_affected > 0)
}
