//! Common types used throughout Pagewright.

use serde::{Deserialize, Serialize};
use std::time::SystemTime;

use crate::prelude::*;

// SiteId //
//********//
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SiteId(pub u32);

impl std::fmt::Display for SiteId {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.0)
	}
}

// BoardId //
//*********//
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BoardId(pub i64);

impl std::fmt::Display for BoardId {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.0)
	}
}

impl std::str::FromStr for BoardId {
	type Err = Error;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		s.trim()
			.parse::<i64>()
			.map(BoardId)
			.map_err(|_| Error::Parse(format!("invalid board id: {:?}", s)))
	}
}

// Timestamp //
//***********//
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(pub i64);

impl std::fmt::Display for Timestamp {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.0)
	}
}

pub fn now() -> Timestamp {
	let res = SystemTime::now().duration_since(SystemTime::UNIX_EPOCH).unwrap_or_default();
	Timestamp(i64::try_from(res.as_secs()).unwrap_or(i64::MAX))
}

// LayoutKind //
//************//
/// Which of a site's two layout slots a page renders into
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LayoutKind {
	#[serde(rename = "MAIN", alias = "main")]
	Main,
	#[serde(rename = "SUB", alias = "sub")]
	Sub,
}

impl LayoutKind {
	pub fn as_str(&self) -> &'static str {
		match self {
			LayoutKind::Main => "MAIN",
			LayoutKind::Sub => "SUB",
		}
	}
}

impl std::fmt::Display for LayoutKind {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}

impl std::str::FromStr for LayoutKind {
	type Err = Error;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		if s.eq_ignore_ascii_case("main") {
			Ok(LayoutKind::Main)
		} else if s.eq_ignore_ascii_case("sub") {
			Ok(LayoutKind::Sub)
		} else {
			Err(Error::Parse(format!("invalid layout kind: {:?}", s)))
		}
	}
}

// Site //
//******//
/// A tenant site as seen by the composition pipeline
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Site {
	pub site_id: SiteId,
	/// Short site code, usable as identity instead of the hostname
	pub code: Box<str>,
	pub hostname: Box<str>,
	pub name: Box<str>,
}

// WidgetContext //
//***************//
pub const MODE_PUBLISHED: &str = "published";
pub const MODE_PREVIEW: &str = "preview";
pub const MODE_DRAFT: &str = "draft";

/// Describes one render request. Built once, shared read-only by every stage.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WidgetContext {
	site_identity: Box<str>,
	path: Box<str>,
	kind: LayoutKind,
	mode: Box<str>,
	board_id: Option<BoardId>,
}

impl WidgetContext {
	pub fn new(
		site_identity: impl Into<Box<str>>,
		path: impl Into<Box<str>>,
		kind: LayoutKind,
		mode: impl Into<Box<str>>,
	) -> PwResult<Self> {
		let site_identity: Box<str> = site_identity.into();
		let site_identity: Box<str> = site_identity.trim().into();
		if site_identity.is_empty() {
			return Err(Error::ValidationError("site identity must not be empty".into()));
		}
		let mode: Box<str> = mode.into();
		let mode: Box<str> =
			if mode.trim().is_empty() { MODE_PUBLISHED.into() } else { mode.trim().into() };

		Ok(Self { site_identity, path: path.into(), kind, mode, board_id: None })
	}

	/// Scope the render to a board (used by board-aware widgets and echoed in the response)
	pub fn with_board(mut self, board_id: BoardId) -> Self {
		self.board_id = Some(board_id);
		self
	}

	pub fn site_identity(&self) -> &str {
		&self.site_identity
	}
	pub fn path(&self) -> &str {
		&self.path
	}
	pub fn kind(&self) -> LayoutKind {
		self.kind
	}
	pub fn mode(&self) -> &str {
		&self.mode
	}
	pub fn board_id(&self) -> Option<BoardId> {
		self.board_id
	}
}

// LayoutResolveResult //
//*********************//
/// The single published layout selected for a (site, kind) pair
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LayoutResolveResult {
	/// Raw layout HTML before widget substitution
	pub html_template: String,
	pub css_urls: Vec<Box<str>>,
	pub js_urls: Vec<Box<str>>,
	pub kind: LayoutKind,
	/// Absent only for transient (preview) layouts
	pub layout_id: Option<Box<str>>,
	pub version: u32,
}

// RenderResponse //
//****************//
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderType {
	/// `data` is the composed page as a string
	Html,
	/// `data` is a `RenderDocument`
	Document,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WidgetStatus {
	Rendered,
	Unknown,
	Failed,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidgetReport {
	#[serde(rename = "type")]
	pub typ: Box<str>,
	pub status: WidgetStatus,
}

/// Structured payload returned for preview and draft renders
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderDocument {
	pub html: String,
	pub layout_id: Option<Box<str>>,
	pub version: u32,
	pub kind: LayoutKind,
	pub css_urls: Vec<Box<str>>,
	pub js_urls: Vec<Box<str>>,
	pub widgets: Vec<WidgetReport>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RenderData {
	Html(String),
	Document(RenderDocument),
}

impl RenderData {
	/// The composed HTML regardless of payload shape
	pub fn html(&self) -> &str {
		match self {
			RenderData::Html(html) => html,
			RenderData::Document(doc) => &doc.html,
		}
	}
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderResponse {
	#[serde(rename = "type")]
	typ: RenderType,
	#[serde(skip_serializing_if = "Option::is_none")]
	board_id: Option<BoardId>,
	data: RenderData,
}

impl RenderResponse {
	pub fn html(html: String, board_id: Option<BoardId>) -> Self {
		Self { typ: RenderType::Html, board_id, data: RenderData::Html(html) }
	}

	pub fn document(doc: RenderDocument, board_id: Option<BoardId>) -> Self {
		Self { typ: RenderType::Document, board_id, data: RenderData::Document(doc) }
	}

	pub fn typ(&self) -> RenderType {
		self.typ
	}
	pub fn board_id(&self) -> Option<BoardId> {
		self.board_id
	}
	pub fn data(&self) -> &RenderData {
		&self.data
	}
}


// vim: ts=4
