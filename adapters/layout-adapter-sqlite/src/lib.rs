//! SQLite-backed layout and board store for Pagewright
//!
//! Implements `LayoutAdapter` and `BoardAdapter`, plus the authoring side the
//! render pipeline never touches: registering sites, saving and publishing
//! layout versions, and managing boards.

#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![forbid(unsafe_code)]

mod board;
mod layout;
mod schema;
mod site;
mod utils;

use async_trait::async_trait;
use sqlx::sqlite::{self, SqlitePool};
use std::path::Path;

use pagewright_types::board_adapter::{BoardAdapter, BoardSummary};
use pagewright_types::layout_adapter::{LayoutAdapter, LayoutRecord};
use pagewright_types::prelude::*;
use pagewright_types::types::Site;

use crate::schema::init_db;

pub const DB_FILE: &str = "layout.db";

#[derive(Debug)]
pub struct LayoutAdapterSqlite {
	db: SqlitePool,
}

impl LayoutAdapterSqlite {
	/// Open (or create) the store in directory `dir`
	pub async fn new(dir: impl AsRef<Path>) -> PwResult<Self> {
		let dir = dir.as_ref();
		tokio::fs::create_dir_all(dir).await?;

		let opts = sqlite::SqliteConnectOptions::new()
			.filename(dir.join(DB_FILE))
			.create_if_missing(true)
			.journal_mode(sqlite::SqliteJournalMode::Wal);
		let db = sqlite::SqlitePoolOptions::new()
			.max_connections(5)
			.connect_with(opts)
			.await
			.inspect_err(|err| warn!("DB: {:#?}", err))
			.map_err(|_| Error::DbError)?;

		init_db(&db).await.inspect_err(|err| warn!("DB: {:#?}", err)).map_err(|_| Error::DbError)?;
		info!(path = %dir.display(), "layout store opened");

		Ok(Self { db })
	}

	// Authoring
	//***********
	pub async fn create_site(&self, code: &str, hostname: &str, name: &str) -> PwResult<Site> {
		site::create(&self.db, code, hostname, name).await
	}

	/// Save a new draft version of a layout. Returns its id and version.
	pub async fn create_layout(
		&self,
		site_id: SiteId,
		kind: LayoutKind,
		html_template: &str,
		css_urls: &[&str],
		js_urls: &[&str],
	) -> PwResult<(Box<str>, u32)> {
		layout::create(&self.db, site_id, kind, html_template, css_urls, js_urls).await
	}

	pub async fn publish_layout(&self, site_id: SiteId, kind: LayoutKind, version: u32) -> PwResult<()> {
		layout::publish(&self.db, site_id, kind, version).await
	}

	pub async fn unpublish_layout(&self, site_id: SiteId, kind: LayoutKind) -> PwResult<()> {
		layout::unpublish(&self.db, site_id, kind).await
	}

	pub async fn create_board(&self, site_id: SiteId, title: &str) -> PwResult<BoardId> {
		board::create(&self.db, site_id, title).await
	}

	pub async fn create_post(
		&self,
		board_id: BoardId,
		title: &str,
		author: &str,
		created_at: Option<Timestamp>,
	) -> PwResult<i64> {
		board::create_post(&self.db, board_id, title, author, created_at).await
	}
}

#[async_trait]
impl LayoutAdapter for LayoutAdapterSqlite {
	async fn read_site(&self, identity: &str) -> PwResult<Site> {
		site::read(&self.db, identity).await
	}

	async fn list_published_layouts(
		&self,
		site_id: SiteId,
		kind: LayoutKind,
	) -> PwResult<Vec<LayoutRecord>> {
		layout::list_published(&self.db, site_id, kind).await
	}
}

#[async_trait]
impl BoardAdapter for LayoutAdapterSqlite {
	async fn read_board_summary(
		&self,
		site_identity: &str,
		board_id: BoardId,
		limit: u32,
	) -> PwResult<BoardSummary> {
		board::read_summary(&self.db, site_identity, board_id, limit).await
	}
}

// vim: ts=4
