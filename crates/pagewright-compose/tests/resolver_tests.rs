//! Layout selection tests

mod common;

use std::sync::Arc;
use std::time::Duration;

use common::*;
use pagewright_compose::LayoutResolver;
use pagewright_types::error::Error;
use pagewright_types::types::LayoutKind;

#[tokio::test]
async fn test_single_layout_returned_unchanged() {
	let store = demo_store();
	let template = "<html><body><widget type=\"html.block\">{{x}}</widget></body></html>";
	store.publish_with_assets(1, LayoutKind::Main, 1, 100, template, &["/a.css"], &["/b.js"]);

	let layout = resolver(store).resolve("demo", LayoutKind::Main).await.unwrap();
	assert_eq!(layout.html_template, template);
	assert_eq!(layout.kind, LayoutKind::Main);
	assert_eq!(layout.version, 1);
	assert_eq!(layout.css_urls.len(), 1);
	assert_eq!(layout.js_urls.len(), 1);
}

#[tokio::test]
async fn test_no_published_layout() {
	let store = demo_store();
	let res = resolver(store).resolve("demo", LayoutKind::Main).await;
	assert!(matches!(res, Err(Error::NotFound)));
}

#[tokio::test]
async fn test_unknown_site() {
	let store = demo_store();
	store.publish(1, LayoutKind::Main, 1, 100, "<p>x</p>");
	let res = resolver(store).resolve("other", LayoutKind::Main).await;
	assert!(matches!(res, Err(Error::NotFound)));
}

#[tokio::test]
async fn test_most_recent_of_several_published() {
	let store = demo_store();
	store.publish(1, LayoutKind::Main, 1, 100, "<p>v1</p>");
	store.publish(1, LayoutKind::Main, 2, 300, "<p>v2</p>");
	store.publish(1, LayoutKind::Main, 3, 200, "<p>v3</p>");

	let resolver = resolver(store);
	for _ in 0..3 {
		let layout = resolver.resolve("demo", LayoutKind::Main).await.unwrap();
		assert_eq!(layout.version, 2);
	}
}

#[tokio::test]
async fn test_kinds_are_separate() {
	let store = demo_store();
	store.publish(1, LayoutKind::Main, 1, 100, "<p>main</p>");
	store.publish(1, LayoutKind::Sub, 1, 100, "<p>sub</p>");

	let resolver = resolver(store);
	let (site, layout) = resolver.resolve_with_site("DEMO", LayoutKind::Sub).await.unwrap();
	assert_eq!(&*site.code, "demo");
	assert_eq!(layout.html_template, "<p>sub</p>");
}

#[tokio::test]
async fn test_layout_read_timeout() {
	let store = MemoryLayouts::with_delay(Duration::from_millis(500));
	store.add_site(1, "slow", "slow.example.com", "Slow");
	store.publish(1, LayoutKind::Main, 1, 100, "<p>x</p>");
	let resolver = LayoutResolver::new(Arc::new(store), Some(Duration::from_secs(5)));

	let res = resolver.resolve_with_timeout("slow", LayoutKind::Main, Duration::from_millis(20)).await;
	assert!(matches!(res, Err(Error::Timeout)));

	let res = resolver.resolve_with_timeout("slow", LayoutKind::Main, Duration::from_secs(5)).await;
	assert!(res.is_ok());
}

#[tokio::test]
async fn test_no_default_timeout_waits() {
	let store = MemoryLayouts::with_delay(Duration::from_millis(50));
	store.add_site(1, "slow", "slow.example.com", "Slow");
	store.publish(1, LayoutKind::Main, 1, 100, "<p>x</p>");
	let resolver = LayoutResolver::new(Arc::new(store), None);

	let layout = resolver.resolve("slow", LayoutKind::Main).await.unwrap();
	assert_eq!(layout.html_template, "<p>x</p>");
}

// vim: ts=4
