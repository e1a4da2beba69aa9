//! Boards and their posts

use sqlx::{Row, SqlitePool};

use crate::utils::*;
use pagewright_types::board_adapter::{BoardPost, BoardSummary};
use pagewright_types::prelude::*;
use pagewright_types::types::now;

/// Read a board of a site with its most recent posts, newest first
pub(crate) async fn read_summary(
	db: &SqlitePool,
	site_identity: &str,
	board_id: BoardId,
	limit: u32,
) -> PwResult<BoardSummary> {
	let res = sqlx::query(
		"SELECT b.title FROM boards b WHERE b.board_id = ?1 AND b.site_id = (
			SELECT site_id FROM sites WHERE code = ?2 OR hostname = ?2
			ORDER BY code = ?2 DESC LIMIT 1
		)",
	)
	.bind(board_id.0)
	.bind(site_identity.trim())
	.fetch_one(db)
	.await;
	let title: Box<str> = map_res(res, |row| row.try_get("title"))?;

	let res = sqlx::query(
		"SELECT post_id, title, author, created_at FROM posts WHERE board_id = ?
		ORDER BY created_at DESC, post_id DESC LIMIT ?",
	)
	.bind(board_id.0)
	.bind(limit)
	.fetch_all(db)
	.await
	.inspect_err(inspect)
	.map_err(|_| Error::DbError)?;

	let posts = collect_res(res.iter().map(|row| {
		Ok(BoardPost {
			post_id: row.try_get("post_id")?,
			title: row.try_get("title")?,
			author: row.try_get("author")?,
			created_at: Timestamp(row.try_get("created_at")?),
		})
	}))?;

	Ok(BoardSummary { board_id, title, posts })
}

/// Create a board for a site
pub(crate) async fn create(db: &SqlitePool, site_id: SiteId, title: &str) -> PwResult<BoardId> {
	let board_id: i64 =
		sqlx::query_scalar("INSERT INTO boards (site_id, title) VALUES (?, ?) RETURNING board_id")
			.bind(site_id.0)
			.bind(title)
			.fetch_one(db)
			.await
			.inspect_err(inspect)
			.map_err(|_| Error::DbError)?;
	Ok(BoardId(board_id))
}

/// Add a post to a board. `created_at` defaults to the current time.
pub(crate) async fn create_post(
	db: &SqlitePool,
	board_id: BoardId,
	title: &str,
	author: &str,
	created_at: Option<Timestamp>,
) -> PwResult<i64> {
	let post_id: i64 = sqlx::query_scalar(
		"INSERT INTO posts (board_id, title, author, created_at)
		SELECT board_id, ?, ?, ? FROM boards WHERE board_id = ? RETURNING post_id",
	)
	.bind(title)
	.bind(author)
	.bind(created_at.unwrap_or_else(now).0)
	.bind(board_id.0)
	.fetch_optional(db)
	.await
	.inspect_err(inspect)
	.map_err(|_| Error::DbError)?
	.ok_or(Error::NotFound)?;
	Ok(post_id)
}

// vim: ts=4
