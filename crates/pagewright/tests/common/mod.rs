//! Common test utilities and helpers
//!
//! Builds an application over a temporary SQLite layout store.

#![allow(dead_code)]

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

use pagewright::types::{LayoutKind, Site};
use pagewright::{routes, App, AppBuilder};
use pagewright_layout_adapter_sqlite::LayoutAdapterSqlite;

pub struct TestApp {
	pub app: App,
	pub store: Arc<LayoutAdapterSqlite>,
	pub site: Site,
	_temp: TempDir,
}

/// App with one site (`demo` / demo.example.com) and nothing published
pub async fn create_test_app() -> TestApp {
	let temp_dir = TempDir::new().expect("Failed to create temp directory");
	let store = Arc::new(
		LayoutAdapterSqlite::new(temp_dir.path()).await.expect("Failed to create adapter"),
	);
	let site = store.create_site("demo", "demo.example.com", "Demo Site").await.unwrap();

	let mut builder = AppBuilder::new();
	builder.layout_adapter(store.clone()).board_adapter(store.clone());
	let app = builder.build().expect("Failed to build app");

	TestApp { app, store, site, _temp: temp_dir }
}

impl TestApp {
	pub fn router(&self) -> Router {
		routes::init(self.app.clone())
	}

	/// Save and publish a layout, returning its version
	pub async fn publish(&self, kind: LayoutKind, html: &str, css: &[&str], js: &[&str]) -> u32 {
		let (_, version) =
			self.store.create_layout(self.site.site_id, kind, html, css, js).await.unwrap();
		self.store.publish_layout(self.site.site_id, kind, version).await.unwrap();
		version
	}

	pub async fn get(&self, host: &str, uri: &str) -> (StatusCode, serde_json::Value) {
		let req = Request::builder().uri(uri).header("host", host).body(Body::empty()).unwrap();
		send(self.router(), req).await
	}

	pub async fn post(&self, host: &str, uri: &str, body: serde_json::Value) -> (StatusCode, serde_json::Value) {
		let req = Request::builder()
			.method("POST")
			.uri(uri)
			.header("host", host)
			.header("content-type", "application/json")
			.body(Body::from(body.to_string()))
			.unwrap();
		send(self.router(), req).await
	}
}

async fn send(router: Router, req: Request<Body>) -> (StatusCode, serde_json::Value) {
	let res = router.oneshot(req).await.unwrap();
	let status = res.status();
	let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
	let value = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
	(status, value)
}

// vim: ts=4
