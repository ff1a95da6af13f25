//! Scalar SQL functions registered on every pooled connection.

use rusqlite::functions::FunctionFlags;
use rusqlite::Connection;

/// Name of the case-insensitive substring function.
pub const CONTAINS_CI: &str = "contains_ci";

/// Register the catalog's SQL functions on `conn`.
///
/// `contains_ci(haystack, needle)` is true when `haystack` contains `needle`
/// ignoring case, with full Unicode case folding (SQLite's `LIKE` only folds
/// ASCII). A NULL haystack never matches.
pub fn register(conn: &Connection) -> rusqlite::Result<()> {
    conn.create_scalar_function(
        CONTAINS_CI,
        2,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        |ctx| {
            let haystack: Option<String> = ctx.get(0)?;
            let needle: String = ctx.get(1)?;
            Ok(haystack.is_some_and(|h| contains_ignore_case(&h, &needle)))
        },
    )
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}
