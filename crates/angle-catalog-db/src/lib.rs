//! Angle-Catalog-DB: Database schema, migrations, and query operations
//!
//! This crate provides the record store for angle-catalog using SQLite
//! with rusqlite and r2d2 connection pooling.
//!
//! # Modules
//!
//! - `functions` - Scalar SQL functions registered on each connection
//! - `migrations` - Database schema migrations
//! - `pool` - Connection pool management
//! - `models` - Rust models matching database schema
//! - `queries` - Database query operations
//!
//! # Example
//!
//! ```no_run
//! use angle_catalog_db::pool::{init_pool, get_conn};
//! use angle_catalog_db::queries::angles::{self, AngleFilter};
//!
//! let pool = init_pool("/var/lib/angle-catalog/catalog.db").unwrap();
//! let conn = get_conn(&pool).unwrap();
//!
//! let available = angles::list_angles(&conn, &AngleFilter::available(), None).unwrap();
//! println!("{} angles available", available.len());
//! ```

pub mod functions;
pub mod migrations;
pub mod models;
pub mod pool;
pub mod queries;
