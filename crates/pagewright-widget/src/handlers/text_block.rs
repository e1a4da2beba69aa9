//! `text.block`: plain text in a single element

use async_trait::async_trait;

use pagewright_render::escape_html;

use crate::handler::{WidgetHandler, WidgetTag};
use crate::prelude::*;

pub const TEXT_BLOCK: &str = "text.block";

const ALLOWED_TAGS: &[&str] = &["p", "div", "span", "h1", "h2", "h3", "h4", "h5", "h6"];
const DEFAULT_TAG: &str = "p";

#[derive(Debug, Default, Clone, Copy)]
pub struct TextBlockHandler;

#[async_trait]
impl WidgetHandler for TextBlockHandler {
	fn name(&self) -> &str {
		TEXT_BLOCK
	}

	fn supports(&self, typ: &str) -> bool {
		typ == TEXT_BLOCK
	}

	async fn render(&self, tag: &WidgetTag, _ctx: &WidgetContext) -> PwResult<String> {
		let element = tag
			.attr("tag")
			.map(|t| t.trim().to_ascii_lowercase())
			.and_then(|t| ALLOWED_TAGS.iter().find(|allowed| **allowed == t).copied())
			.unwrap_or(DEFAULT_TAG);
		Ok(format!("<{0}>{1}</{0}>", element, escape_html(tag.text.trim())))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn ctx() -> WidgetContext {
		WidgetContext::new("example.com", "/", LayoutKind::Main, "published").unwrap()
	}

	#[tokio::test]
	async fn test_text_escaped_in_paragraph() {
		let tag = WidgetTag::new(0, TEXT_BLOCK).with_text(" a < b ");
		let out = TextBlockHandler.render(&tag, &ctx()).await.unwrap();
		assert_eq!(out, "<p>a &lt; b</p>");
	}

	#[tokio::test]
	async fn test_tag_attribute() {
		let tag = WidgetTag::new(0, TEXT_BLOCK).with_attr("tag", "H2").with_text("Title");
		assert_eq!(TextBlockHandler.render(&tag, &ctx()).await.unwrap(), "<h2>Title</h2>");

		let tag = WidgetTag::new(0, TEXT_BLOCK).with_attr("tag", "script").with_text("x");
		assert_eq!(TextBlockHandler.render(&tag, &ctx()).await.unwrap(), "<p>x</p>");
	}
}

// vim: ts=4
