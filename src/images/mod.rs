//! Uploaded image storage.
//!
//! Images are written to disk before any record logic runs and are referenced
//! from records by file name only. The [`FileStore`] trait is the seam the
//! catalog service uses, so tests can swap in their own implementation.

mod storage;

pub use storage::{FileStore, LocalFileStore, ANGLE_UPLOADS_SEGMENT};
