//! Database schema initialization and migrations

use sqlx::{Sqlite, SqlitePool, Transaction};

/// Get the current database version from vars table
async fn get_db_version(tx: &mut Transaction<'_, Sqlite>) -> i64 {
	sqlx::query_scalar::<_, String>("SELECT value FROM vars WHERE key = 'db_version'")
		.fetch_optional(&mut **tx)
		.await
		.ok()
		.flatten()
		.and_then(|v| v.parse().ok())
		.unwrap_or(0)
}

/// Set the database version in vars table
async fn set_db_version(tx: &mut Transaction<'_, Sqlite>, version: i64) -> Result<(), sqlx::Error> {
	sqlx::query("INSERT OR REPLACE INTO vars (key, value) VALUES ('db_version', ?)")
		.bind(version.to_string())
		.execute(&mut **tx)
		.await?;
	Ok(())
}

// Current schema version - update this when adding new migrations
const CURRENT_DB_VERSION: i64 = 1;

/// Initialize the database schema and run migrations
pub(crate) async fn init_db(db: &SqlitePool) -> Result<(), sqlx::Error> {
	let mut tx = db.begin().await?;

	sqlx::query(
		"CREATE TABLE IF NOT EXISTS vars (
		key text NOT NULL,
		value text NOT NULL,
		created_at INTEGER DEFAULT (unixepoch()),
		updated_at INTEGER DEFAULT (unixepoch()),
		PRIMARY KEY(key)
	)",
	)
	.execute(&mut *tx)
	.await?;

	let version = get_db_version(&mut tx).await;

	// Sites
	sqlx::query(
		"CREATE TABLE IF NOT EXISTS sites (
			site_id integer PRIMARY KEY AUTOINCREMENT,
			code text NOT NULL COLLATE NOCASE,
			hostname text NOT NULL COLLATE NOCASE,
			name text NOT NULL,
			created_at INTEGER DEFAULT (unixepoch())
		)",
	)
	.execute(&mut *tx)
	.await?;
	sqlx::query("CREATE UNIQUE INDEX IF NOT EXISTS idx_sites_code ON sites(code)")
		.execute(&mut *tx)
		.await?;
	sqlx::query("CREATE UNIQUE INDEX IF NOT EXISTS idx_sites_hostname ON sites(hostname)")
		.execute(&mut *tx)
		.await?;

	// Layouts
	// status: 'D' draft, 'P' published, 'A' archived
	sqlx::query(
		"CREATE TABLE IF NOT EXISTS layouts (
			layout_id text NOT NULL,
			site_id integer NOT NULL,
			kind text NOT NULL,
			version integer NOT NULL,
			status char(1) NOT NULL DEFAULT 'D',
			html_template text NOT NULL,
			css_urls text NOT NULL DEFAULT '[]',
			js_urls text NOT NULL DEFAULT '[]',
			created_at INTEGER DEFAULT (unixepoch()),
			updated_at INTEGER DEFAULT (unixepoch()),
			PRIMARY KEY(layout_id)
		)",
	)
	.execute(&mut *tx)
	.await?;
	sqlx::query(
		"CREATE UNIQUE INDEX IF NOT EXISTS idx_layouts_version ON layouts(site_id, kind, version)",
	)
	.execute(&mut *tx)
	.await?;
	sqlx::query(
		"CREATE INDEX IF NOT EXISTS idx_layouts_status ON layouts(site_id, kind, status)",
	)
	.execute(&mut *tx)
	.await?;

	// Boards
	sqlx::query(
		"CREATE TABLE IF NOT EXISTS boards (
			board_id integer PRIMARY KEY AUTOINCREMENT,
			site_id integer NOT NULL,
			title text NOT NULL,
			created_at INTEGER DEFAULT (unixepoch())
		)",
	)
	.execute(&mut *tx)
	.await?;

	// Posts
	sqlx::query(
		"CREATE TABLE IF NOT EXISTS posts (
			post_id integer PRIMARY KEY AUTOINCREMENT,
			board_id integer NOT NULL,
			title text NOT NULL,
			author text NOT NULL,
			created_at INTEGER DEFAULT (unixepoch())
		)",
	)
	.execute(&mut *tx)
	.await?;
	sqlx::query("CREATE INDEX IF NOT EXISTS idx_posts_board ON posts(board_id, created_at)")
		.execute(&mut *tx)
		.await?;

	if version < CURRENT_DB_VERSION {
		set_db_version(&mut tx, CURRENT_DB_VERSION).await?;
	}

	tx.commit().await?;
	Ok(())
}

// vim: ts=4
