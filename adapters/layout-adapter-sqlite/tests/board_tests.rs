//! Board store tests

use pagewright_layout_adapter_sqlite::LayoutAdapterSqlite;
use pagewright_types::board_adapter::BoardAdapter;
use pagewright_types::error::Error;
use pagewright_types::types::{BoardId, Timestamp};
use tempfile::TempDir;

async fn create_test_adapter() -> (LayoutAdapterSqlite, TempDir) {
	let temp_dir = TempDir::new().expect("Failed to create temp directory");
	let adapter = LayoutAdapterSqlite::new(temp_dir.path()).await.expect("Failed to create adapter");
	(adapter, temp_dir)
}

#[tokio::test]
async fn test_board_summary_newest_first_with_limit() {
	let (adapter, _temp) = create_test_adapter().await;
	let site = adapter.create_site("demo", "demo.example.com", "Demo").await.unwrap();
	let board_id = adapter.create_board(site.site_id, "News").await.unwrap();
	for (i, ts) in [(1, 100), (2, 300), (3, 200)] {
		adapter
			.create_post(board_id, &format!("post {}", i), "kim", Some(Timestamp(ts)))
			.await
			.unwrap();
	}

	let summary = adapter.read_board_summary("demo", board_id, 2).await.unwrap();
	assert_eq!(summary.board_id, board_id);
	assert_eq!(&*summary.title, "News");
	let titles: Vec<&str> = summary.posts.iter().map(|p| &*p.title).collect();
	assert_eq!(titles, vec!["post 2", "post 3"]);
	assert_eq!(summary.posts[0].created_at, Timestamp(300));
}

#[tokio::test]
async fn test_board_of_other_site_not_found() {
	let (adapter, _temp) = create_test_adapter().await;
	let a = adapter.create_site("a", "a.example.com", "A").await.unwrap();
	adapter.create_site("b", "b.example.com", "B").await.unwrap();
	let board_id = adapter.create_board(a.site_id, "A board").await.unwrap();

	assert!(adapter.read_board_summary("a.example.com", board_id, 5).await.is_ok());
	assert!(matches!(adapter.read_board_summary("b", board_id, 5).await, Err(Error::NotFound)));
	assert!(matches!(adapter.read_board_summary("a", BoardId(999), 5).await, Err(Error::NotFound)));
}

#[tokio::test]
async fn test_board_site_resolved_like_site_lookup() {
	let (adapter, _temp) = create_test_adapter().await;
	let host_site = adapter.create_site("b", "shop", "Hostname Shop").await.unwrap();
	let code_site = adapter.create_site("shop", "shop.example.com", "Code Shop").await.unwrap();
	let host_board = adapter.create_board(host_site.site_id, "Host board").await.unwrap();
	let code_board = adapter.create_board(code_site.site_id, "Code board").await.unwrap();

	assert!(adapter.read_board_summary("shop", code_board, 5).await.is_ok());
	assert!(matches!(adapter.read_board_summary("shop", host_board, 5).await, Err(Error::NotFound)));
	assert!(adapter.read_board_summary("b", host_board, 5).await.is_ok());
}

#[tokio::test]
async fn test_post_to_missing_board() {
	let (adapter, _temp) = create_test_adapter().await;
	let res = adapter.create_post(BoardId(1), "t", "a", None).await;
	assert!(matches!(res, Err(Error::NotFound)));
}

#[tokio::test]
async fn test_empty_board() {
	let (adapter, _temp) = create_test_adapter().await;
	let site = adapter.create_site("demo", "demo.example.com", "Demo").await.unwrap();
	let board_id = adapter.create_board(site.site_id, "Empty").await.unwrap();
	let summary = adapter.read_board_summary("demo", board_id, 5).await.unwrap();
	assert!(summary.posts.is_empty());
}

// vim: ts=4
