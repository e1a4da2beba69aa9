//! Explicit, ordered widget handler registry
//!
//! The registry is built once at start-up and shared read-only by every
//! render. When more than one handler supports a type, the one registered
//! first wins.

use std::sync::Arc;

use pagewright_types::board_adapter::BoardAdapter;

use crate::handler::WidgetHandler;
use crate::handlers::{BoardSummaryHandler, HtmlBlockHandler, TextBlockHandler};
use crate::prelude::*;

#[derive(Debug, Default, Clone)]
pub struct WidgetRegistry {
	handlers: Vec<Arc<dyn WidgetHandler>>,
}

impl WidgetRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	/// Registry with the built-in handlers, in this order:
	/// `html.block`, `text.block`, `board.summary`.
	///
	/// `board.summary` is only registered when a board adapter is given.
	pub fn with_builtin_handlers(board_adapter: Option<Arc<dyn BoardAdapter>>) -> Self {
		let mut registry = Self::new();
		registry.register(Arc::new(HtmlBlockHandler));
		registry.register(Arc::new(TextBlockHandler));
		if let Some(board_adapter) = board_adapter {
			registry.register(Arc::new(BoardSummaryHandler::new(board_adapter)));
		}
		registry
	}

	/// Append a handler. It is consulted after every handler registered before it.
	pub fn register(&mut self, handler: Arc<dyn WidgetHandler>) -> &mut Self {
		debug!(handler = handler.name(), position = self.handlers.len(), "widget handler registered");
		self.handlers.push(handler);
		self
	}

	/// First handler supporting `typ` (compared lower-cased)
	pub fn resolve(&self, typ: &str) -> Option<&Arc<dyn WidgetHandler>> {
		let typ = typ.to_ascii_lowercase();
		self.handlers.iter().find(|handler| handler.supports(&typ))
	}

	pub fn handler_names(&self) -> Vec<&str> {
		self.handlers.iter().map(|handler| handler.name()).collect()
	}

	pub fn len(&self) -> usize {
		self.handlers.len()
	}

	pub fn is_empty(&self) -> bool {
		self.handlers.is_empty()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::handler::WidgetTag;
	use async_trait::async_trait;

	#[derive(Debug)]
	struct Fixed {
		name: &'static str,
		typ: &'static str,
	}

	#[async_trait]
	impl WidgetHandler for Fixed {
		fn name(&self) -> &str {
			self.name
		}
		fn supports(&self, typ: &str) -> bool {
			typ == self.typ
		}
		async fn render(&self, _tag: &WidgetTag, _ctx: &WidgetContext) -> PwResult<String> {
			Ok(self.name.to_string())
		}
	}

	#[test]
	fn test_first_registered_wins() {
		let mut registry = WidgetRegistry::new();
		registry
			.register(Arc::new(Fixed { name: "first", typ: "a.b" }))
			.register(Arc::new(Fixed { name: "second", typ: "a.b" }));
		assert_eq!(registry.resolve("a.b").map(|h| h.name()), Some("first"));
	}

	#[test]
	fn test_resolve_case_insensitive() {
		let mut registry = WidgetRegistry::new();
		registry.register(Arc::new(Fixed { name: "x", typ: "menu.tree" }));
		assert!(registry.resolve("Menu.Tree").is_some());
		assert!(registry.resolve("menu.list").is_none());
	}

	#[test]
	fn test_builtin_order() {
		let registry = WidgetRegistry::with_builtin_handlers(None);
		assert_eq!(registry.handler_names(), vec!["html.block", "text.block"]);
		assert_eq!(registry.len(), 2);
		assert!(registry.resolve("board.summary").is_none());
	}
}

// vim: ts=4
