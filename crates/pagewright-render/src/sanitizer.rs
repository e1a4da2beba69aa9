//! HTML sanitization for untrusted markup.
//!
//! Markup is parsed into a DOM tree and cleaned there:
//! - executable or embedding elements are removed with their content
//! - event handler attributes (`on*`), inline styles and `srcdoc` are dropped
//! - URL attributes with a non-whitelisted scheme (`javascript:` etc.) are dropped
//!
//! A page can mark elements as trusted with a per-render token in the
//! `TRUST_ATTR` attribute. The mark also records how many attributes the
//! element had, so an element that gained attributes afterwards (through a
//! raw variable spliced into an attribute value) is no longer trusted.
//! Trusted elements are never removed and keep their own attributes, except
//! URL attributes with a disallowed scheme. Their children are still
//! inspected. The token attribute itself is always
//! stripped from the output.

use markup5ever_rcdom::{Handle, NodeData};

use crate::dom;
use crate::prelude::*;

/// Attribute carrying the per-render trust token
pub const TRUST_ATTR: &str = "data-pw-trust";

/// Elements removed together with their content (compared lower-cased)
const DANGEROUS_ELEMENTS: &[&str] = &[
	"script",
	"style",
	"iframe",
	"frame",
	"frameset",
	"object",
	"embed",
	"applet",
	"base",
	"meta",
	"link",
	"form",
	"noscript",
	"template",
	// never closes once re-parsed, swallowing the rest of the page
	"plaintext",
	// SVG
	"foreignobject",
	"set",
	"animate",
	"animatemotion",
	"animatetransform",
	"animatecolor",
];

const DANGEROUS_ATTRS: &[&str] = &["style", "srcdoc"];

const DANGEROUS_ATTR_PREFIXES: &[&str] = &[
	"on", // onclick, onload, onerror, ...
];

/// Attributes holding a URL (`xlink:href` has the local name `href`)
const URL_ATTRS: &[&str] = &["href", "src", "action", "formaction", "poster", "background", "cite"];

const DEFAULT_SCHEMES: &[&str] = &["http", "https", "mailto", "tel"];

/// Value of `TRUST_ATTR` for an element with `attr_count` attributes,
/// the trust attribute included
pub fn trust_value(token: &str, attr_count: usize) -> String {
	format!("{}.{}", token, attr_count)
}

/// Mark `node` as authored by the page for the render owning `token`
pub fn mark_trusted(node: &Handle, token: &str) {
	dom::retain_attrs(node, |name, _| name.eq_ignore_ascii_case(TRUST_ATTR));
	let count = dom::attrs(node).len() + 1;
	dom::set_attr(node, TRUST_ATTR, &trust_value(token, count));
}

fn is_trusted(node: &Handle, token: &str) -> bool {
	dom::get_attr(node, TRUST_ATTR)
		.is_some_and(|value| value == trust_value(token, dom::attrs(node).len()))
}

#[derive(Debug, Default)]
struct CleanStats {
	removed_elements: usize,
	removed_attrs: usize,
}

#[derive(Debug, Clone)]
pub struct Sanitizer {
	allowed_schemes: Box<[Box<str>]>,
}

impl Default for Sanitizer {
	fn default() -> Self {
		Self::new()
	}
}

impl Sanitizer {
	pub fn new() -> Self {
		Self { allowed_schemes: DEFAULT_SCHEMES.iter().map(|s| Box::from(*s)).collect() }
	}

	/// Clean a markup fragment, as found inside a `<body>`
	pub fn clean_fragment(&self, html: &str) -> PwResult<String> {
		let (_dom, root) = dom::parse_body_fragment(html)?;
		let mut stats = CleanStats::default();
		self.clean_children(&root, None, &mut stats);
		if stats.removed_elements > 0 || stats.removed_attrs > 0 {
			debug!(
				removed_elements = stats.removed_elements,
				removed_attrs = stats.removed_attrs,
				"sanitized fragment"
			);
		}
		dom::serialize_children(&root)
	}

	/// Clean a complete page.
	///
	/// Elements whose `TRUST_ATTR` equals `trust_token` are kept as authored.
	pub fn clean_document(&self, html: &str, trust_token: Option<&str>) -> PwResult<String> {
		let page = dom::parse_page(html);
		let mut stats = CleanStats::default();
		self.clean_children(&page.document, trust_token, &mut stats);
		if stats.removed_elements > 0 || stats.removed_attrs > 0 {
			info!(
				removed_elements = stats.removed_elements,
				removed_attrs = stats.removed_attrs,
				"sanitized untrusted markup in page"
			);
		}
		dom::serialize_page(&page)
	}

	fn clean_children(&self, node: &Handle, trust_token: Option<&str>, stats: &mut CleanStats) {
		let children: Vec<Handle> = node.children.borrow().clone();
		for child in &children {
			let NodeData::Element { template_contents, .. } = &child.data else {
				continue;
			};

			let trusted = trust_token.is_some_and(|token| is_trusted(child, token));
			dom::retain_attrs(child, |name, _| name.eq_ignore_ascii_case(TRUST_ATTR));

			if !trusted {
				let name = dom::element_name(child).unwrap_or_default().to_ascii_lowercase();
				if DANGEROUS_ELEMENTS.contains(&name.as_str()) {
					dom::detach(child);
					stats.removed_elements += 1;
					continue;
				}
				stats.removed_attrs +=
					dom::retain_attrs(child, |name, value| self.is_dangerous_attr(name, value));
			} else {
				// Variables can land in trusted URL attributes
				stats.removed_attrs += dom::retain_attrs(child, |name, value| {
					URL_ATTRS.contains(&name.to_ascii_lowercase().as_str()) && !self.is_safe_url(value)
				});
			}

			let contents = template_contents.borrow().clone();
			if let Some(contents) = contents {
				self.clean_children(&contents, trust_token, stats);
			}
			self.clean_children(child, trust_token, stats);
		}
	}

	fn is_dangerous_attr(&self, name: &str, value: &str) -> bool {
		let name = name.to_ascii_lowercase();
		if DANGEROUS_ATTRS.contains(&name.as_str()) {
			return true;
		}
		if DANGEROUS_ATTR_PREFIXES.iter().any(|prefix| name.starts_with(prefix)) {
			return true;
		}
		URL_ATTRS.contains(&name.as_str()) && !self.is_safe_url(value)
	}

	/// Relative URLs are safe; absolute ones need a whitelisted scheme.
	/// Inline images (`data:image/...`, except SVG) are accepted.
	fn is_safe_url(&self, value: &str) -> bool {
		// Browsers ignore embedded whitespace and control characters in schemes
		let normalized: String = value
			.chars()
			.filter(|c| !c.is_whitespace() && !c.is_control())
			.collect::<String>()
			.to_ascii_lowercase();

		match normalized.find([':', '/', '?', '#']) {
			Some(pos) if normalized[pos..].starts_with(':') => {
				let scheme = &normalized[..pos];
				if scheme == "data" {
					return normalized.starts_with("data:image/")
						&& !normalized.starts_with("data:image/svg");
				}
				self.allowed_schemes.iter().any(|allowed| **allowed == *scheme)
			}
			_ => true,
		}
	}
}


// vim: ts=4
