//! HTTP routes

use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use crate::handler;
use crate::prelude::*;

pub fn init(app: App) -> Router {
	Router::new()
		.route("/health", get(handler::get_health))
		.route("/api/render/{kind}", get(handler::get_render).post(handler::post_render))
		.layer(TraceLayer::new_for_http())
		.with_state(app)
}

// vim: ts=4
