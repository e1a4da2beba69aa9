//! Composing a page from its layout and widgets
//!
//! A render runs these steps in order:
//! 1. resolve the published layout of the site
//! 2. extract widget elements, replacing each with a positional marker,
//!    append the CSS and JS asset tags, and mark every remaining layout
//!    element with a per-render trust token
//! 3. dispatch the widgets to their handlers
//! 4. clean each fragment on its own and splice it in place of its marker
//! 5. substitute page variables
//! 6. sanitize everything that does not carry the trust token
//!
//! The DOM is only held inside synchronous helpers and is serialized before
//! any await point, so a composer future stays `Send`.

use markup5ever_rcdom::Handle;
use serde_json::{json, Value};

use pagewright_render::dom::{self, Descend};
use pagewright_render::sanitizer::mark_trusted;
use pagewright_render::{Sanitizer, TemplateRenderer};
use pagewright_types::types::{RenderDocument, RenderResponse, WidgetReport};
use pagewright_types::utils::{merge_json, random_id};
use pagewright_widget::dispatch::dispatch_all;
use pagewright_widget::extract::{extract_widgets, WIDGET_ELEMENT};
use pagewright_widget::{WidgetRegistry, WidgetTag};

use crate::prelude::*;
use crate::resolver::LayoutResolver;
use crate::settings::RenderSettings;

const MARKER_PREFIX: &str = "pw-widget";

#[derive(Debug)]
pub struct PageComposer {
	resolver: LayoutResolver,
	registry: WidgetRegistry,
	renderer: TemplateRenderer,
	sanitizer: Sanitizer,
	settings: RenderSettings,
}

/// A layout with widgets taken out, ready for splicing
#[derive(Debug)]
struct PreparedLayout {
	html: String,
	tags: Vec<WidgetTag>,
}

impl PageComposer {
	pub fn new(
		resolver: LayoutResolver,
		registry: WidgetRegistry,
		settings: RenderSettings,
	) -> PwResult<Self> {
		Ok(Self {
			resolver,
			registry,
			renderer: TemplateRenderer::new()?,
			sanitizer: Sanitizer::new(),
			settings,
		})
	}

	pub async fn compose(&self, ctx: &WidgetContext) -> PwResult<RenderResponse> {
		self.compose_with_vars(ctx, &Value::Null).await
	}

	/// Compose with additional page variables. Caller values win over the
	/// built-in `site.*`, `page.*` and `layout.*` ones. `vars` must be an
	/// object or null.
	pub async fn compose_with_vars(&self, ctx: &WidgetContext, vars: &Value) -> PwResult<RenderResponse> {
		if !(vars.is_null() || vars.is_object()) {
			return Err(Error::ValidationError("vars must be an object".into()));
		}
		let (site, layout) = self.resolver.resolve_with_site(ctx.site_identity(), ctx.kind()).await?;

		let token = random_id();
		let PreparedLayout { html, tags } = prepare_layout(&layout, &token)?;
		debug!(site = %site.code, kind = %ctx.kind(), widgets = tags.len(), "layout prepared");

		let outcomes = dispatch_all(&self.registry, &tags, ctx, &self.settings.dispatch_options()).await;

		// A fragment is parsed and balanced on its own, so its markup can not
		// merge with the trusted layout elements around its marker
		let mut html = html;
		for (tag, outcome) in tags.iter().zip(&outcomes) {
			let fragment = self.sanitizer.clean_fragment(&outcome.fragment)?;
			html = html.replacen(&marker(&token, tag.index), &fragment, 1);
		}

		let mut variables = page_variables(&site, ctx, &layout);
		if vars.is_object() {
			merge_json(&mut variables, vars);
		}
		let html = self.renderer.render(&html, &variables);
		let html = self.sanitizer.clean_document(&html, Some(&token))?;

		let widgets: Vec<WidgetReport> = tags
			.iter()
			.zip(outcomes)
			.map(|(tag, outcome)| WidgetReport { typ: tag.typ.clone(), status: outcome.status })
			.collect();
		info!(
			site = %site.code,
			path = ctx.path(),
			kind = %ctx.kind(),
			mode = ctx.mode(),
			version = layout.version,
			widgets = widgets.len(),
			"page composed"
		);

		if self.settings.is_structured_mode(ctx.mode()) {
			let doc = RenderDocument {
				html,
				layout_id: layout.layout_id,
				version: layout.version,
				kind: layout.kind,
				css_urls: layout.css_urls,
				js_urls: layout.js_urls,
				widgets,
			};
			Ok(RenderResponse::document(doc, ctx.board_id()))
		} else {
			Ok(RenderResponse::html(html, ctx.board_id()))
		}
	}
}

fn marker(token: &str, index: usize) -> String {
	format!("<!--{}:{}:{}-->", MARKER_PREFIX, token, index)
}

/// Parse the layout, take out its widgets, add the asset tags and mark the
/// rest as trusted
fn prepare_layout(layout: &LayoutResolveResult, token: &str) -> PwResult<PreparedLayout> {
	let page = dom::parse_page(&layout.html_template);
	let widgets = extract_widgets(&page.document)?;
	append_assets(&page.document, &layout.css_urls, &layout.js_urls);

	dom::walk_elements(&page.document, &mut |node| {
		if dom::is_element(node, WIDGET_ELEMENT) {
			Descend::No
		} else {
			mark_trusted(node, token);
			Descend::Yes
		}
	});

	let mut tags = Vec::with_capacity(widgets.len());
	for (tag, node) in widgets {
		let comment = format!("{}:{}:{}", MARKER_PREFIX, token, tag.index);
		dom::replace_node(&node, dom::new_comment(&comment));
		tags.push(tag);
	}

	Ok(PreparedLayout { html: dom::serialize_page(&page)?, tags })
}

fn page_variables(site: &Site, ctx: &WidgetContext, layout: &LayoutResolveResult) -> Value {
	json!({
		"site": {
			"name": site.name,
			"code": site.code,
			"hostname": site.hostname,
		},
		"page": {
			"path": ctx.path(),
			"kind": ctx.kind().as_str(),
			"mode": ctx.mode(),
			"board": ctx.board_id(),
		},
		"layout": {
			"id": layout.layout_id,
			"version": layout.version,
		},
	})
}

/// Stylesheets are appended to the head, scripts to the body. Order and
/// duplicates are kept.
fn append_assets(document: &Handle, css_urls: &[Box<str>], js_urls: &[Box<str>]) {
	let Some(root) = dom::find_element(document, "html") else {
		return;
	};
	let head = dom::find_element(&root, "head").unwrap_or_else(|| root.clone());
	for url in css_urls {
		dom::append_child(&head, dom::new_element("link", &[("rel", "stylesheet"), ("href", &**url)]));
	}
	let body = dom::find_element(&root, "body").unwrap_or_else(|| root.clone());
	for url in js_urls {
		dom::append_child(&body, dom::new_element("script", &[("src", &**url)]));
	}
}


// vim: ts=4
