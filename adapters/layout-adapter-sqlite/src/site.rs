//! Site lookup and registration

use sqlx::{Row, SqlitePool};

use crate::utils::*;
use pagewright_types::prelude::*;
use pagewright_types::types::Site;

/// Read a site by code or hostname (case-insensitive). A code match wins
/// over another site's hostname.
pub(crate) async fn read(db: &SqlitePool, identity: &str) -> PwResult<Site> {
	let res = sqlx::query(
		"SELECT site_id, code, hostname, name FROM sites WHERE code = ?1 OR hostname = ?1
		ORDER BY code = ?1 DESC LIMIT 1",
	)
	.bind(identity.trim())
	.fetch_one(db)
	.await;

	map_res(res, |row| {
		Ok(Site {
			site_id: SiteId(row.try_get("site_id")?),
			code: row.try_get("code")?,
			hostname: row.try_get("hostname")?,
			name: row.try_get("name")?,
		})
	})
}

/// Register a new site
pub(crate) async fn create(db: &SqlitePool, code: &str, hostname: &str, name: &str) -> PwResult<Site> {
	let code = code.trim();
	let hostname = hostname.trim().to_ascii_lowercase();
	if code.is_empty() || hostname.is_empty() {
		return Err(Error::ValidationError("site code and hostname are required".into()));
	}

	let site_id: u32 = sqlx::query_scalar(
		"INSERT INTO sites (code, hostname, name) VALUES (?, ?, ?) RETURNING site_id",
	)
	.bind(code)
	.bind(&hostname)
	.bind(name)
	.fetch_one(db)
	.await
	.map_err(|err| match err {
		sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
			Error::ValidationError(format!("site {:?} or {:?} already exists", code, hostname))
		}
		err => {
			inspect(&err);
			Error::DbError
		}
	})?;
	info!(site_id, code, hostname = %hostname, "site created");

	Ok(Site { site_id: SiteId(site_id), code: code.into(), hostname: hostname.into(), name: name.into() })
}

// vim: ts=4
