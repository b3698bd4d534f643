//! Column conversions shared by the repos and the query facade.

use chrono::{DateTime, NaiveDateTime, Utc};

use crate::error::DatabaseError;

const SQLITE_DATETIME: &str = "%Y-%m-%d %H:%M:%S";

/// Decode a stored timestamp.
///
/// Rows written by this crate hold RFC 3339 text; `datetime('now')` values
/// from manual SQL use the bare `SQLite` layout and are read as UTC.
///
/// # Errors
///
/// `DatabaseError::Query` when the text matches neither layout.
pub fn parse_datetime(text: &str) -> Result<DateTime<Utc>, DatabaseError> {
    DateTime::parse_from_rfc3339(text)
        .map(|stamp| stamp.with_timezone(&Utc))
        .or_else(|_| NaiveDateTime::parse_from_str(text, SQLITE_DATETIME).map(|n| n.and_utc()))
        .map_err(|e| DatabaseError::Query(format!("bad timestamp {text:?}: {e}")))
}

/// Read an optional TEXT column, folding `""` into `None`.
///
/// # Errors
///
/// Propagates the libSQL column error.
pub fn get_opt_string(row: &libsql::Row, idx: i32) -> Result<Option<String>, DatabaseError> {
    let value: Option<String> = row.get(idx)?;
    Ok(value.filter(|text| !text.is_empty()))
}

/// Read an INTEGER 0/1 column as `bool`.
///
/// # Errors
///
/// Returns `DatabaseError` if the column read fails.
pub fn get_bool(row: &libsql::Row, idx: i32) -> Result<bool, DatabaseError> {
    Ok(row.get::<i64>(idx)? != 0)
}

/// Detect a UNIQUE constraint violation reported by `SQLite`.
///
/// The check is string-based because libSQL surfaces local and remote
/// failures through different error variants.
pub fn is_unique_violation(e: &libsql::Error) -> bool {
    e.to_string().contains("UNIQUE constraint failed")
}

/// Run a single-column `COUNT(*)`-style query and return the value.
pub(crate) async fn query_count(
    conn: &libsql::Connection,
    sql: &str,
    params: impl libsql::params::IntoParams,
) -> Result<i64, DatabaseError> {
    let mut rows = conn.query(sql, params).await?;
    let row = rows
        .next()
        .await?
        .ok_or_else(|| DatabaseError::Query(format!("no row returned for: {sql}")))?;
    Ok(row.get::<i64>(0)?)
}
