//! Common test utilities and helpers
//!
//! An in-memory layout store plus helpers to build composers over it.

#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use pagewright_compose::{LayoutResolver, PageComposer, RenderSettings};
use pagewright_types::error::{Error, PwResult};
use pagewright_types::layout_adapter::{LayoutAdapter, LayoutRecord};
use pagewright_types::types::{LayoutKind, Site, SiteId, Timestamp, WidgetContext};
use pagewright_widget::WidgetRegistry;

#[derive(Debug, Default)]
pub struct MemoryLayouts {
	sites: Mutex<Vec<Site>>,
	layouts: Mutex<Vec<(SiteId, LayoutRecord)>>,
	delay: Option<Duration>,
}

impl MemoryLayouts {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_delay(delay: Duration) -> Self {
		Self { delay: Some(delay), ..Self::default() }
	}

	pub fn add_site(&self, site_id: u32, code: &str, hostname: &str, name: &str) {
		self.sites.lock().unwrap().push(Site {
			site_id: SiteId(site_id),
			code: code.into(),
			hostname: hostname.into(),
			name: name.into(),
		});
	}

	pub fn publish(&self, site_id: u32, kind: LayoutKind, version: u32, updated_at: i64, html: &str) {
		self.publish_with_assets(site_id, kind, version, updated_at, html, &[], &[]);
	}

	pub fn publish_with_assets(
		&self,
		site_id: u32,
		kind: LayoutKind,
		version: u32,
		updated_at: i64,
		html: &str,
		css: &[&str],
		js: &[&str],
	) {
		self.layouts.lock().unwrap().push((
			SiteId(site_id),
			LayoutRecord {
				layout_id: Some(format!("layout-{}-{}", site_id, version).into()),
				kind,
				html_template: html.to_string(),
				css_urls: css.iter().map(|s| Box::from(*s)).collect(),
				js_urls: js.iter().map(|s| Box::from(*s)).collect(),
				version,
				updated_at: Timestamp(updated_at),
			},
		));
	}
}

#[async_trait]
impl LayoutAdapter for MemoryLayouts {
	async fn read_site(&self, identity: &str) -> PwResult<Site> {
		if let Some(delay) = self.delay {
			tokio::time::sleep(delay).await;
		}
		self.sites
			.lock()
			.unwrap()
			.iter()
			.find(|site| {
				site.code.eq_ignore_ascii_case(identity) || site.hostname.eq_ignore_ascii_case(identity)
			})
			.cloned()
			.ok_or(Error::NotFound)
	}

	async fn list_published_layouts(
		&self,
		site_id: SiteId,
		kind: LayoutKind,
	) -> PwResult<Vec<LayoutRecord>> {
		Ok(self
			.layouts
			.lock()
			.unwrap()
			.iter()
			.filter(|(id, layout)| *id == site_id && layout.kind == kind)
			.map(|(_, layout)| layout.clone())
			.collect())
	}
}

pub fn resolver(adapter: Arc<MemoryLayouts>) -> LayoutResolver {
	LayoutResolver::new(adapter, Some(Duration::from_secs(2)))
}

pub fn composer_with(adapter: Arc<MemoryLayouts>, registry: WidgetRegistry) -> PageComposer {
	PageComposer::new(resolver(adapter), registry, RenderSettings::default()).unwrap()
}

pub fn composer(adapter: Arc<MemoryLayouts>) -> PageComposer {
	composer_with(adapter, WidgetRegistry::with_builtin_handlers(None))
}

pub fn ctx(site: &str, kind: LayoutKind, mode: &str) -> WidgetContext {
	WidgetContext::new(site, "/", kind, mode).unwrap()
}

/// A site `demo` (demo.example.com) with nothing published
pub fn demo_store() -> Arc<MemoryLayouts> {
	let store = MemoryLayouts::new();
	store.add_site(1, "demo", "demo.example.com", "Demo Site");
	Arc::new(store)
}

// vim: ts=4
