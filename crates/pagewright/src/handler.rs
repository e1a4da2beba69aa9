//! Render API handlers

use axum::{
	extract::{Path, Query, State},
	http::StatusCode,
	Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use pagewright_types::types::{RenderResponse, WidgetContext};

use crate::app::VERSION;
use crate::extract::RequestHost;
use crate::prelude::*;

#[derive(Debug, Default, Deserialize)]
pub struct RenderQuery {
	/// Page path, echoed into `{{page.path}}`
	pub path: Option<String>,
	/// `published` (default), `preview` or `draft`
	pub mode: Option<String>,
	pub board: Option<BoardId>,
	/// Site code or hostname, overrides the `Host` header
	pub site: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderRequest {
	#[serde(flatten)]
	pub query: RenderQuery,
	/// Additional page variables
	#[serde(default)]
	pub vars: Value,
}

#[derive(Debug, Serialize)]
pub struct Health {
	status: &'static str,
	version: &'static str,
}

fn build_context(kind: &str, host: RequestHost, query: RenderQuery) -> PwResult<WidgetContext> {
	let kind: LayoutKind = kind.parse()?;
	let Some(site) = query.site.map(Box::from).or(host.0) else {
		return Err(Error::ValidationError("missing site: no Host header or site parameter".into()));
	};
	let path = query.path.unwrap_or_else(|| "/".into());
	let ctx = WidgetContext::new(site, path, kind, query.mode.unwrap_or_default())?;
	Ok(match query.board {
		Some(board_id) => ctx.with_board(board_id),
		None => ctx,
	})
}

/// `GET /api/render/{kind}`
pub async fn get_render(
	State(app): State<App>,
	host: RequestHost,
	Path(kind): Path<String>,
	Query(query): Query<RenderQuery>,
) -> PwResult<(StatusCode, Json<RenderResponse>)> {
	let ctx = build_context(&kind, host, query)?;
	let res = app.composer.compose(&ctx).await.inspect_err(|err| {
		info!(site = ctx.site_identity(), kind = %ctx.kind(), error = %err, "render failed");
	})?;
	Ok((StatusCode::OK, Json(res)))
}

/// `POST /api/render/{kind}` with page variables in the body
pub async fn post_render(
	State(app): State<App>,
	host: RequestHost,
	Path(kind): Path<String>,
	Json(req): Json<RenderRequest>,
) -> PwResult<(StatusCode, Json<RenderResponse>)> {
	let ctx = build_context(&kind, host, req.query)?;
	let res = app.composer.compose_with_vars(&ctx, &req.vars).await.inspect_err(|err| {
		info!(site = ctx.site_identity(), kind = %ctx.kind(), error = %err, "render failed");
	})?;
	Ok((StatusCode::OK, Json(res)))
}

/// `GET /health`
pub async fn get_health() -> (StatusCode, Json<Health>) {
	(StatusCode::OK, Json(Health { status: "ok", version: VERSION }))
}


// vim: ts=4
