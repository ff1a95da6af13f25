//! Angle catalog: record rules on top of the record store and image store.
//!
//! - `form` maps submitted text fields onto records
//! - `repository` abstracts the record store
//! - `service` implements create/list/get/update/delete with image cleanup

pub mod form;
pub mod repository;
pub mod service;

pub use form::AngleForm;
pub use repository::{AngleRepository, SqliteAngleRepository};
pub use service::{AnglePage, AngleService, CatalogSettings};
