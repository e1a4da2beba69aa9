//! Shared utilities for the SQLite adapter

use sqlx::sqlite::SqliteRow;

use pagewright_types::prelude::*;

/// Log database error for debugging
pub(crate) fn inspect(err: &sqlx::Error) {
	warn!("DB: {:#?}", err);
}

/// Map a single-row query result, translating SQL errors to PwResult
pub(crate) fn map_res<T, F>(row: Result<SqliteRow, sqlx::Error>, f: F) -> PwResult<T>
where
	F: FnOnce(SqliteRow) -> Result<T, sqlx::Error>,
{
	match row {
		Ok(row) => f(row).inspect_err(inspect).map_err(|_| Error::DbError),
		Err(sqlx::Error::RowNotFound) => Err(Error::NotFound),
		Err(err) => {
			inspect(&err);
			Err(Error::DbError)
		}
	}
}

/// Collect an iterator of query results, translating errors
pub(crate) fn collect_res<T>(
	iter: impl Iterator<Item = Result<T, sqlx::Error>> + Unpin,
) -> PwResult<Vec<T>> {
	let mut items = Vec::new();
	for item in iter {
		items.push(item.inspect_err(inspect).map_err(|_| Error::DbError)?);
	}
	Ok(items)
}

/// URL lists are stored as JSON arrays
pub(crate) fn parse_url_list(s: &str) -> PwResult<Vec<Box<str>>> {
	serde_json::from_str(s)
		.inspect_err(|err| warn!("DB: invalid URL list {:?}: {}", s, err))
		.map_err(|_| Error::DbError)
}

pub(crate) fn format_url_list(urls: &[&str]) -> PwResult<String> {
	Ok(serde_json::to_string(urls)?)
}

// vim: ts=4
