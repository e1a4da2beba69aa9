//! Board store contract, consumed by board-aware widgets.

use async_trait::async_trait;
use serde::Serialize;
use std::fmt::Debug;

use crate::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardPost {
	pub post_id: i64,
	pub title: Box<str>,
	pub author: Box<str>,
	pub created_at: Timestamp,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardSummary {
	pub board_id: BoardId,
	pub title: Box<str>,
	/// Newest first
	pub posts: Vec<BoardPost>,
}

#[async_trait]
pub trait BoardAdapter: Debug + Send + Sync {
	/// Read a board of the given site with at most `limit` recent posts.
	///
	/// `site_identity` is the site code or hostname. Returns `Error::NotFound`
	/// if the board does not belong to that site.
	async fn read_board_summary(
		&self,
		site_identity: &str,
		board_id: BoardId,
		limit: u32,
	) -> PwResult<BoardSummary>;
}

// vim: ts=4
