//! `html.block`: inline markup authored in the layout

use async_trait::async_trait;

use crate::handler::{WidgetHandler, WidgetTag};
use crate::prelude::*;

pub const HTML_BLOCK: &str = "html.block";

#[derive(Debug, Default, Clone, Copy)]
pub struct HtmlBlockHandler;

#[async_trait]
impl WidgetHandler for HtmlBlockHandler {
	fn name(&self) -> &str {
		HTML_BLOCK
	}

	fn supports(&self, typ: &str) -> bool {
		typ == HTML_BLOCK
	}

	async fn render(&self, tag: &WidgetTag, _ctx: &WidgetContext) -> PwResult<String> {
		if tag.body.trim().is_empty() {
			return Ok("<!-- html.block: empty -->".into());
		}
		Ok(tag.body.clone())
	}
}


// vim: ts=4
