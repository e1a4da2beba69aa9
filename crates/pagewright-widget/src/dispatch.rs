//! Rendering widget tags with per-widget failure isolation
//!
//! A failing widget never aborts the page: unknown types, handler errors,
//! panics and timeouts all turn into a diagnostic HTML comment in place of
//! the widget, and the remaining widgets render normally.

use std::panic::AssertUnwindSafe;
use std::time::Duration;

use futures::future::join_all;
use futures::FutureExt;

use pagewright_types::types::WidgetStatus;

use crate::handler::WidgetTag;
use crate::prelude::*;
use crate::registry::WidgetRegistry;

#[derive(Debug, Clone, Copy)]
pub struct DispatchOptions {
	/// Upper bound for a single handler call
	pub widget_timeout: Option<Duration>,
	/// Render the widgets of one page concurrently
	pub parallel: bool,
}

impl Default for DispatchOptions {
	fn default() -> Self {
		Self { widget_timeout: Some(Duration::from_secs(1)), parallel: true }
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetOutcome {
	pub fragment: String,
	pub status: WidgetStatus,
}

/// Render one tag with the first matching handler
pub async fn dispatch(
	registry: &WidgetRegistry,
	tag: &WidgetTag,
	ctx: &WidgetContext,
	opts: &DispatchOptions,
) -> WidgetOutcome {
	let Some(handler) = registry.resolve(&tag.typ) else {
		debug!(widget = tag.index, typ = %tag.typ, "no handler for widget type");
		return WidgetOutcome {
			fragment: format!("<!-- unknown widget: {} -->", comment_safe(&tag.typ)),
			status: WidgetStatus::Unknown,
		};
	};

	let render = AssertUnwindSafe(handler.render(tag, ctx)).catch_unwind();
	let result = match opts.widget_timeout {
		Some(limit) => match tokio::time::timeout(limit, render).await {
			Ok(result) => result,
			Err(_) => Ok(Err(Error::Timeout)),
		},
		None => render.await,
	};

	let err = match result {
		Ok(Ok(fragment)) => {
			return WidgetOutcome { fragment, status: WidgetStatus::Rendered };
		}
		Ok(Err(err)) => err.to_string(),
		Err(_) => "handler panicked".to_string(),
	};

	warn!(
		widget = tag.index,
		typ = %tag.typ,
		handler = handler.name(),
		site = ctx.site_identity(),
		path = ctx.path(),
		error = %err,
		"widget render failed"
	);
	WidgetOutcome {
		fragment: format!("<!-- widget error: {} -->", comment_safe(&tag.typ)),
		status: WidgetStatus::Failed,
	}
}

/// Render all tags. Outcomes are returned in the order of `tags`.
pub async fn dispatch_all(
	registry: &WidgetRegistry,
	tags: &[WidgetTag],
	ctx: &WidgetContext,
	opts: &DispatchOptions,
) -> Vec<WidgetOutcome> {
	if opts.parallel {
		join_all(tags.iter().map(|tag| dispatch(registry, tag, ctx, opts))).await
	} else {
		let mut outcomes = Vec::with_capacity(tags.len());
		for tag in tags {
			outcomes.push(dispatch(registry, tag, ctx, opts).await);
		}
		outcomes
	}
}

/// Widget types end up inside HTML comments; keep only characters that
/// cannot terminate one.
fn comment_safe(typ: &str) -> String {
	typ.chars()
		.map(|c| if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | ':') { c } else { '_' })
		.collect()
}


// vim: ts=4
