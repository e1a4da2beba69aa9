//! The widget handler contract

use async_trait::async_trait;
use std::fmt::Debug;

use crate::prelude::*;

/// One widget element as extracted from a layout
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetTag {
	/// Position among the widgets of the page, in document order
	pub index: usize,
	/// Lower-cased, dot-namespaced type (`html.block`)
	pub typ: Box<str>,
	/// Remaining attributes of the element, in source order
	pub attrs: Vec<(Box<str>, Box<str>)>,
	/// Inner markup of the element
	pub body: String,
	/// Inner text with markup stripped
	pub text: String,
}

impl WidgetTag {
	pub fn new(index: usize, typ: &str) -> Self {
		Self {
			index,
			typ: typ.trim().to_ascii_lowercase().into(),
			attrs: Vec::new(),
			body: String::new(),
			text: String::new(),
		}
	}

	pub fn with_attr(mut self, name: &str, value: &str) -> Self {
		self.attrs.push((name.into(), value.into()));
		self
	}

	pub fn with_body(mut self, body: impl Into<String>) -> Self {
		self.body = body.into();
		self
	}

	pub fn with_text(mut self, text: impl Into<String>) -> Self {
		self.text = text.into();
		self
	}

	/// Attribute value by case-insensitive name
	pub fn attr(&self, name: &str) -> Option<&str> {
		self.attrs
			.iter()
			.find(|(key, _)| key.eq_ignore_ascii_case(name))
			.map(|(_, value)| value.as_ref())
	}
}

/// Renders one widget type.
///
/// Handlers are stateless with respect to the page: a render call sees only
/// its own tag and the shared context. The returned fragment is never
/// sanitized by the handler itself; the composer takes care of that.
#[async_trait]
pub trait WidgetHandler: Debug + Send + Sync {
	/// Short name for logs
	fn name(&self) -> &str;

	/// `typ` is already lower-cased
	fn supports(&self, typ: &str) -> bool;

	/// Produce the HTML fragment replacing the widget. An empty result is
	/// the empty string; handlers with nothing to show return a diagnostic
	/// HTML comment instead.
	async fn render(&self, tag: &WidgetTag, ctx: &WidgetContext) -> PwResult<String>;
}


// vim: ts=4
