//! Column conversion helpers shared by the query modules.

use std::str::FromStr;

use jiff::{civil::Date, Timestamp};
use rusqlite::{types::Type, Row};

/// Drops sub-second precision so stored and returned values agree.
pub(crate) fn truncate_to_second(ts: Timestamp) -> Timestamp {
    Timestamp::from_second(ts.as_second()).unwrap_or(ts)
}

/// Fixed-width UTC form used in every timestamp column.
pub(crate) fn sql_timestamp(ts: Timestamp) -> String {
    ts.strftime("%Y-%m-%dT%H:%M:%SZ").to_string()
}

fn conversion_error(
    idx: usize,
    err: impl Into<Box<dyn std::error::Error + Send + Sync>>,
) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, err.into())
}

pub(crate) fn timestamp_at(row: &Row, idx: usize) -> rusqlite::Result<Timestamp> {
    row.get::<_, String>(idx)?
        .parse::<Timestamp>()
        .map_err(|e| conversion_error(idx, e))
}

pub(crate) fn opt_timestamp_at(row: &Row, idx: usize) -> rusqlite::Result<Option<Timestamp>> {
    row.get::<_, Option<String>>(idx)?
        .map(|s| s.parse::<Timestamp>().map_err(|e| conversion_error(idx, e)))
        .transpose()
}

pub(crate) fn date_at(row: &Row, idx: usize) -> rusqlite::Result<Date> {
    row.get::<_, String>(idx)?
        .parse::<Date>()
        .map_err(|e| conversion_error(idx, e))
}

pub(crate) fn opt_date_at(row: &Row, idx: usize) -> rusqlite::Result<Option<Date>> {
    row.get::<_, Option<String>>(idx)?
        .map(|s| s.parse::<Date>().map_err(|e| conversion_error(idx, e)))
        .transpose()
}

/// Parses one of the model enums stored by its `as_str` form.
pub(crate) fn parsed_at<T>(row: &Row, idx: usize) -> rusqlite::Result<T>
where
    T: FromStr<Err = String>,
{
    row.get::<_, String>(idx)?
        .parse::<T>()
        .map_err(|e| conversion_error(idx, e))
}

pub(crate) fn opt_parsed_at<T>(row: &Row, idx: usize) -> rusqlite::Result<Option<T>>
where
    T: FromStr<Err = String>,
{
    row.get::<_, Option<String>>(idx)?
        .map(|s| s.parse::<T>().map_err(|e| conversion_error(idx, e)))
        .transpose()
}
