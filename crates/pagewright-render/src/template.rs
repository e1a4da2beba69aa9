//! Layout-level variable substitution
//!
//! Two placeholder forms are recognized:
//! - `{{key}}` is replaced with the HTML-escaped value
//! - `{{key|html}}` is replaced with the raw value
//!
//! Keys may be dotted (`site.name`) to reach into nested objects. A key
//! that is not present leaves its placeholder in the output untouched, so a
//! partially populated template stays visibly diagnosable. A `null` value
//! renders as the empty string.
//!
//! The renderer never sanitizes. Anything routed through `|html` must be
//! safe already, or be cleaned by a later stage.

use regex::{Captures, Regex};
use serde_json::Value;

use crate::prelude::*;

const PLACEHOLDER_PATTERN: &str =
	r"\{\{([A-Za-z_][A-Za-z0-9_-]*(?:\.[A-Za-z_][A-Za-z0-9_-]*)*)(\|html)?\}\}";

/// Placeholder substitution engine
#[derive(Debug, Clone)]
pub struct TemplateRenderer {
	placeholder: Regex,
}

impl TemplateRenderer {
	pub fn new() -> PwResult<Self> {
		let placeholder = Regex::new(PLACEHOLDER_PATTERN)
			.map_err(|e| Error::Internal(format!("regex error: {}", e)))?;
		Ok(Self { placeholder })
	}

	/// Substitute every placeholder of `template` from `vars`.
	///
	/// `vars` is expected to be a JSON object; any other value matches no key.
	pub fn render(&self, template: &str, vars: &Value) -> String {
		self.placeholder
			.replace_all(template, |caps: &Captures<'_>| {
				let key = &caps[1];
				let raw = caps.get(2).is_some();
				match lookup(vars, key) {
					Some(value) => {
						let text = value_to_string(value);
						if raw {
							text
						} else {
							escape_html(&text)
						}
					}
					None => caps[0].to_string(),
				}
			})
			.into_owned()
	}
}

/// HTML-escape text for element content and quoted attribute values
pub fn escape_html(text: &str) -> String {
	handlebars::html_escape(text)
}

/// Resolve a possibly dotted key. A literal top-level key wins over a path.
fn lookup<'a>(vars: &'a Value, key: &str) -> Option<&'a Value> {
	let map = vars.as_object()?;
	if let Some(value) = map.get(key) {
		return Some(value);
	}
	if !key.contains('.') {
		return None;
	}
	let mut current = vars;
	for part in key.split('.') {
		current = current.as_object()?.get(part)?;
	}
	Some(current)
}

fn value_to_string(value: &Value) -> String {
	match value {
		Value::Null => String::new(),
		Value::String(s) => s.clone(),
		Value::Bool(b) => b.to_string(),
		Value::Number(n) => n.to_string(),
		Value::Array(_) | Value::Object(_) => value.to_string(),
	}
}


// vim: ts=4
