//! Optional text fields between the API and nullable columns.
//!
//! An optional field has exactly two states. Present values, including the empty
//! string, are stored verbatim; absent values are stored as NULL.

use sea_orm::ActiveValue;

/// Maps an optional external value to the value written into a nullable column.
#[must_use]
pub fn to_storage(value: Option<String>) -> ActiveValue<Option<String>> {
    ActiveValue::Set(value)
}

/// Maps a nullable column value back to the external optional value.
#[must_use]
pub fn from_storage(value: Option<String>) -> Option<String> {
    value
}

/// Normalizes a search criterion: blank text means the criterion was not supplied.
///
/// This only applies to search parameters. Stored optional fields keep `""`.
#[must_use]
pub fn criterion(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(ToString::to_string)
}
