//! Angle catalog - CRUD service for angle records and their uploaded images
//!
//! This library crate exposes the core functionality for integration testing.

pub mod catalog;
pub mod config;
pub mod images;
pub mod server;
