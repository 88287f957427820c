//! Row conversion helpers shared by the query modules.

use std::{error::Error, str::FromStr};

use rusqlite::{ffi, types::Type, ErrorCode, Row};

type BoxError = Box<dyn Error + Send + Sync>;

/// Read a TEXT column and parse it, reporting failures as conversion errors
/// on that column.
pub(super) fn parse_column<T>(row: &Row<'_>, index: usize) -> rusqlite::Result<T>
where
    T: FromStr,
    T::Err: Into<BoxError>,
{
    let text: String = row.get(index)?;
    text.parse::<T>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(index, Type::Text, e.into()))
}

/// Nullable variant of [`parse_column`].
pub(super) fn parse_optional_column<T>(row: &Row<'_>, index: usize) -> rusqlite::Result<Option<T>>
where
    T: FromStr,
    T::Err: Into<BoxError>,
{
    let text: Option<String> = row.get(index)?;
    text.map(|text| {
        text.parse::<T>()
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(index, Type::Text, e.into()))
    })
    .transpose()
}

pub(super) fn get_id(row: &Row<'_>, index: usize) -> rusqlite::Result<u64> {
    Ok(row.get::<_, i64>(index)? as u64)
}

pub(super) fn get_optional_id(row: &Row<'_>, index: usize) -> rusqlite::Result<Option<u64>> {
    Ok(row.get::<_, Option<i64>>(index)?.map(|id| id as u64))
}

/// Wrap a domain error raised while building a model from a row.
pub(super) fn conversion_error(index: usize, error: impl Into<BoxError>) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(index, Type::Text, error.into())
}

/// Lists are stored comma-separated; an empty list is NULL.
pub(super) fn join_list(items: &[String]) -> Option<String> {
    (!items.is_empty()).then(|| items.join(","))
}

pub(super) fn split_list(stored: Option<String>) -> Vec<String> {
    stored
        .map(|s| s.split(',').map(String::from).collect())
        .unwrap_or_default()
}

/// Whether `error` is a UNIQUE constraint (or unique index) violation.
/// CHECK and foreign key failures do not count.
pub(super) fn is_unique_violation(error: &rusqlite::Error) -> bool {
    matches!(
        error,
        rusqlite::Error::SqliteFailure(e, _)
            if e.code == ErrorCode::ConstraintViolation
                && e.extended_code == ffi::SQLITE_CONSTRAINT_UNIQUE
    )
}
