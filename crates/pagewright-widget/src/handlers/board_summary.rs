//! `board.summary`: recent posts of a board

use async_trait::async_trait;
use std::fmt::Write;
use std::sync::Arc;

use pagewright_render::escape_html;
use pagewright_types::board_adapter::{BoardAdapter, BoardSummary};

use crate::handler::{WidgetHandler, WidgetTag};
use crate::prelude::*;

pub const BOARD_SUMMARY: &str = "board.summary";

const DEFAULT_LIMIT: u32 = 5;
const MAX_LIMIT: u32 = 50;

#[derive(Debug, Clone)]
pub struct BoardSummaryHandler {
	adapter: Arc<dyn BoardAdapter>,
}

impl BoardSummaryHandler {
	pub fn new(adapter: Arc<dyn BoardAdapter>) -> Self {
		Self { adapter }
	}
}

#[async_trait]
impl WidgetHandler for BoardSummaryHandler {
	fn name(&self) -> &str {
		BOARD_SUMMARY
	}

	fn supports(&self, typ: &str) -> bool {
		typ == BOARD_SUMMARY
	}

	async fn render(&self, tag: &WidgetTag, ctx: &WidgetContext) -> PwResult<String> {
		let board_id = match tag.attr("board") {
			Some(board) => Some(board.trim().parse::<BoardId>()?),
			None => ctx.board_id(),
		};
		let Some(board_id) = board_id else {
			return Ok("<!-- board.summary: no board -->".into());
		};
		let limit = tag
			.attr("limit")
			.and_then(|limit| limit.trim().parse::<u32>().ok())
			.unwrap_or(DEFAULT_LIMIT)
			.clamp(1, MAX_LIMIT);

		let summary = self.adapter.read_board_summary(ctx.site_identity(), board_id, limit).await?;
		Ok(render_summary(&summary))
	}
}

fn render_summary(summary: &BoardSummary) -> String {
	let mut html = format!(
		"<section class=\"board-summary\" data-board=\"{}\"><h3>{}</h3>",
		summary.board_id,
		escape_html(&summary.title)
	);
	if summary.posts.is_empty() {
		html.push_str("<p class=\"empty\">No posts yet.</p>");
	} else {
		html.push_str("<ul>");
		for post in &summary.posts {
			let _ = write!(
				html,
				"<li data-post=\"{}\"><span class=\"title\">{}</span> <span class=\"author\">{}</span></li>",
				post.post_id,
				escape_html(&post.title),
				escape_html(&post.author)
			);
		}
		html.push_str("</ul>");
	}
	html.push_str("</section>");
	html
}


// vim: ts=4
