//! Database query modules.
//!
//! - angles: Angle CRUD, filtered listing and counting

pub mod angles;
