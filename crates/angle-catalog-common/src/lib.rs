//! Angle-Catalog-Common: Shared types and utilities.
//!
//! This crate provides common functionality used across angle-catalog:
//!
//! - **Typed IDs**: Type-safe UUID wrapper for angle records
//! - **Numbers**: Loose numeric coercion and the normalized border-radius list
//! - **Pagination**: Page/limit parsing and page-count arithmetic
//! - **Path Utilities**: Image extension checks and safe file names
//! - **Error Handling**: Common error types and result aliases
//!
//! # Examples
//!
//! ```
//! use angle_catalog_common::{AngleId, BorderRadius, Error, Result};
//!
//! let id = AngleId::new();
//! let radius = BorderRadius::parse("4,2,4");
//! assert_eq!(radius.values(), &[2.0, 4.0]);
//!
//! fn example(id: AngleId) -> Result<()> {
//!     Err(Error::not_found(format!("angle {}", id)))
//! }
//! assert!(example(id).is_err());
//! ```

pub mod error;
pub mod ids;
pub mod numbers;
pub mod pagination;
pub mod paths;

pub use error::{Error, Result};
pub use ids::*;
pub use numbers::BorderRadius;
pub use pagination::PageRequest;
