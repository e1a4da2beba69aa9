//! Render pipeline settings

use std::time::Duration;

use pagewright_widget::DispatchOptions;

use pagewright_types::types::{MODE_DRAFT, MODE_PREVIEW};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderSettings {
	/// Upper bound for reading the layout store, in milliseconds (0: none)
	pub resolve_timeout_ms: u64,
	/// Upper bound for a single widget handler, in milliseconds (0: none)
	pub widget_timeout_ms: u64,
	/// Render the widgets of a page concurrently
	pub parallel_widgets: bool,
	/// Render modes answered with a structured document instead of plain HTML
	pub structured_modes: Vec<Box<str>>,
}

impl Default for RenderSettings {
	fn default() -> Self {
		Self {
			resolve_timeout_ms: 2000,
			widget_timeout_ms: 1000,
			parallel_widgets: true,
			structured_modes: vec![MODE_PREVIEW.into(), MODE_DRAFT.into()],
		}
	}
}

impl RenderSettings {
	pub fn resolve_timeout(&self) -> Option<Duration> {
		(self.resolve_timeout_ms > 0).then(|| Duration::from_millis(self.resolve_timeout_ms))
	}

	pub fn dispatch_options(&self) -> DispatchOptions {
		DispatchOptions {
			widget_timeout: (self.widget_timeout_ms > 0)
				.then(|| Duration::from_millis(self.widget_timeout_ms)),
			parallel: self.parallel_widgets,
		}
	}

	pub fn is_structured_mode(&self, mode: &str) -> bool {
		self.structured_modes.iter().any(|m| m.eq_ignore_ascii_case(mode))
	}
}


// vim: ts=4
