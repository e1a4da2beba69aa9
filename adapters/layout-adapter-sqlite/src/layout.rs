//! Versioned layouts
//!
//! Every save creates a new draft version. Publishing a version archives the
//! previously published one of the same (site, kind), so the store normally
//! holds a single published row per slot.

use sqlx::{Row, SqlitePool};

use crate::utils::*;
use pagewright_types::layout_adapter::LayoutRecord;
use pagewright_types::prelude::*;
use pagewright_types::types::now;
use pagewright_types::utils::random_id;

const STATUS_PUBLISHED: &str = "P";

/// List the published layouts of a slot
pub(crate) async fn list_published(
	db: &SqlitePool,
	site_id: SiteId,
	kind: LayoutKind,
) -> PwResult<Vec<LayoutRecord>> {
	let res = sqlx::query(
		"SELECT layout_id, version, html_template, css_urls, js_urls, updated_at
		FROM layouts WHERE site_id = ? AND kind = ? AND status = ?
		ORDER BY version",
	)
	.bind(site_id.0)
	.bind(kind.as_str())
	.bind(STATUS_PUBLISHED)
	.fetch_all(db)
	.await
	.inspect_err(inspect)
	.map_err(|_| Error::DbError)?;

	let rows = collect_res(res.iter().map(|row| {
		Ok((
			row.try_get::<String, _>("layout_id")?,
			row.try_get::<u32, _>("version")?,
			row.try_get::<String, _>("html_template")?,
			row.try_get::<String, _>("css_urls")?,
			row.try_get::<String, _>("js_urls")?,
			row.try_get::<i64, _>("updated_at")?,
		))
	}))?;

	let mut layouts = Vec::with_capacity(rows.len());
	for (layout_id, version, html_template, css_urls, js_urls, updated_at) in rows {
		layouts.push(LayoutRecord {
			layout_id: Some(layout_id.into()),
			kind,
			html_template,
			css_urls: parse_url_list(&css_urls)?,
			js_urls: parse_url_list(&js_urls)?,
			version,
			updated_at: Timestamp(updated_at),
		});
	}
	Ok(layouts)
}

/// Store a new draft version of a slot. Returns the layout id and version.
pub(crate) async fn create(
	db: &SqlitePool,
	site_id: SiteId,
	kind: LayoutKind,
	html_template: &str,
	css_urls: &[&str],
	js_urls: &[&str],
) -> PwResult<(Box<str>, u32)> {
	let css_urls = format_url_list(css_urls)?;
	let js_urls = format_url_list(js_urls)?;
	let layout_id = random_id();

	let mut tx = db.begin().await.inspect_err(inspect).map_err(|_| Error::DbError)?;
	let version: u32 = sqlx::query_scalar(
		"SELECT coalesce(max(version), 0) + 1 FROM layouts WHERE site_id = ? AND kind = ?",
	)
	.bind(site_id.0)
	.bind(kind.as_str())
	.fetch_one(&mut *tx)
	.await
	.inspect_err(inspect)
	.map_err(|_| Error::DbError)?;

	sqlx::query(
		"INSERT INTO layouts (layout_id, site_id, kind, version, status, html_template, css_urls, js_urls, updated_at)
		VALUES (?, ?, ?, ?, 'D', ?, ?, ?, ?)",
	)
	.bind(&layout_id)
	.bind(site_id.0)
	.bind(kind.as_str())
	.bind(version)
	.bind(html_template)
	.bind(css_urls)
	.bind(js_urls)
	.bind(now().0)
	.execute(&mut *tx)
	.await
	.inspect_err(inspect)
	.map_err(|_| Error::DbError)?;
	tx.commit().await.inspect_err(inspect).map_err(|_| Error::DbError)?;

	debug!(site_id = site_id.0, %kind, version, "layout version created");
	Ok((layout_id.into(), version))
}

/// Publish a version, archiving the one published before
pub(crate) async fn publish(
	db: &SqlitePool,
	site_id: SiteId,
	kind: LayoutKind,
	version: u32,
) -> PwResult<()> {
	let updated_at = now().0;
	let mut tx = db.begin().await.inspect_err(inspect).map_err(|_| Error::DbError)?;

	let res = sqlx::query(
		"UPDATE layouts SET status = 'P', updated_at = ? WHERE site_id = ? AND kind = ? AND version = ?",
	)
	.bind(updated_at)
	.bind(site_id.0)
	.bind(kind.as_str())
	.bind(version)
	.execute(&mut *tx)
	.await
	.inspect_err(inspect)
	.map_err(|_| Error::DbError)?;
	if res.rows_affected() == 0 {
		return Err(Error::NotFound);
	}

	sqlx::query(
		"UPDATE layouts SET status = 'A', updated_at = ?
		WHERE site_id = ? AND kind = ? AND status = 'P' AND version != ?",
	)
	.bind(updated_at)
	.bind(site_id.0)
	.bind(kind.as_str())
	.bind(version)
	.execute(&mut *tx)
	.await
	.inspect_err(inspect)
	.map_err(|_| Error::DbError)?;

	tx.commit().await.inspect_err(inspect).map_err(|_| Error::DbError)?;
	info!(site_id = site_id.0, %kind, version, "layout published");
	Ok(())
}

/// Withdraw the published version of a slot, if any
pub(crate) async fn unpublish(db: &SqlitePool, site_id: SiteId, kind: LayoutKind) -> PwResult<()> {
	sqlx::query(
		"UPDATE layouts SET status = 'A', updated_at = ? WHERE site_id = ? AND kind = ? AND status = 'P'",
	)
	.bind(now().0)
	.bind(site_id.0)
	.bind(kind.as_str())
	.execute(db)
	.await
	.inspect_err(inspect)
	.map_err(|_| Error::DbError)?;
	Ok(())
}

// vim: ts=4
