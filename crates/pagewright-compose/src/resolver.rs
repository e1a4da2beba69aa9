//! Selecting the published layout of a site

use std::sync::Arc;
use std::time::Duration;

use pagewright_types::layout_adapter::{LayoutAdapter, LayoutRecord};

use crate::prelude::*;

#[derive(Debug, Clone)]
pub struct LayoutResolver {
	adapter: Arc<dyn LayoutAdapter>,
	timeout: Option<Duration>,
}

impl LayoutResolver {
	/// `timeout` bounds every resolve call that does not bring its own.
	/// `None` waits for the store indefinitely.
	pub fn new(adapter: Arc<dyn LayoutAdapter>, timeout: Option<Duration>) -> Self {
		Self { adapter, timeout }
	}

	pub async fn resolve(&self, site_identity: &str, kind: LayoutKind) -> PwResult<LayoutResolveResult> {
		let (_site, layout) = self.resolve_site_timeout(site_identity, kind, self.timeout).await?;
		Ok(layout)
	}

	pub async fn resolve_with_timeout(
		&self,
		site_identity: &str,
		kind: LayoutKind,
		timeout: Duration,
	) -> PwResult<LayoutResolveResult> {
		let (_site, layout) = self.resolve_site_timeout(site_identity, kind, Some(timeout)).await?;
		Ok(layout)
	}

	/// Resolve the layout together with the site it belongs to
	pub async fn resolve_with_site(
		&self,
		site_identity: &str,
		kind: LayoutKind,
	) -> PwResult<(Site, LayoutResolveResult)> {
		self.resolve_site_timeout(site_identity, kind, self.timeout).await
	}

	async fn resolve_site_timeout(
		&self,
		site_identity: &str,
		kind: LayoutKind,
		timeout: Option<Duration>,
	) -> PwResult<(Site, LayoutResolveResult)> {
		let Some(timeout) = timeout else {
			return self.read_layout(site_identity, kind).await;
		};
		match tokio::time::timeout(timeout, self.read_layout(site_identity, kind)).await {
			Ok(res) => res,
			Err(_) => {
				warn!(site = site_identity, %kind, ?timeout, "layout read timed out");
				Err(Error::Timeout)
			}
		}
	}

	async fn read_layout(
		&self,
		site_identity: &str,
		kind: LayoutKind,
	) -> PwResult<(Site, LayoutResolveResult)> {
		let site = self.adapter.read_site(site_identity).await?;
		let records = self.adapter.list_published_layouts(site.site_id, kind).await?;
		if records.len() > 1 {
			warn!(
				site = %site.code,
				%kind,
				count = records.len(),
				"several published layouts, using the most recent one"
			);
		}
		let Some(record) = select_published(records) else {
			debug!(site = %site.code, %kind, "no published layout");
			return Err(Error::NotFound);
		};
		debug!(site = %site.code, %kind, version = record.version, "layout resolved");

		let layout = LayoutResolveResult {
			html_template: record.html_template,
			css_urls: record.css_urls,
			js_urls: record.js_urls,
			kind: record.kind,
			layout_id: record.layout_id,
			version: record.version,
		};
		Ok((site, layout))
	}
}

/// Latest `updated_at` wins, ties go to the highest version
fn select_published(records: Vec<LayoutRecord>) -> Option<LayoutRecord> {
	records.into_iter().max_by_key(|record| (record.updated_at, record.version))
}


// vim: ts=4
