//! Layout store contract.
//!
//! Sites and layouts are authored elsewhere; the composition pipeline only
//! reads them through this trait.

use async_trait::async_trait;
use std::fmt::Debug;

use crate::prelude::*;
use crate::types::Site;

/// A layout row marked as published, as returned by the store
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LayoutRecord {
	pub layout_id: Option<Box<str>>,
	pub kind: LayoutKind,
	pub html_template: String,
	pub css_urls: Vec<Box<str>>,
	pub js_urls: Vec<Box<str>>,
	/// Positive, increasing per (site, kind)
	pub version: u32,
	pub updated_at: Timestamp,
}

#[async_trait]
pub trait LayoutAdapter: Debug + Send + Sync {
	/// Look up a site by its code or hostname (case-insensitive).
	///
	/// Returns `Error::NotFound` for unknown identities.
	async fn read_site(&self, identity: &str) -> PwResult<Site>;

	/// List every layout of the given kind currently marked as published.
	///
	/// Normally at most one row; the resolver picks a winner if the store
	/// returns several.
	async fn list_published_layouts(
		&self,
		site_id: SiteId,
		kind: LayoutKind,
	) -> PwResult<Vec<LayoutRecord>>;
}

// vim: ts=4
