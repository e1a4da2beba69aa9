//! Pagewright render server
//!
//! Configuration is read from the environment:
//! - `LISTEN`: address to bind (default `127.0.0.1:8080`)
//! - `DB_DIR`: directory of the SQLite layout store (default `./data`)
//! - `PAGEWRIGHT_RESOLVE_TIMEOUT_MS`, `PAGEWRIGHT_WIDGET_TIMEOUT_MS`,
//!   `PAGEWRIGHT_PARALLEL_WIDGETS`: render settings
//! - `RUST_LOG`: log filter

#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![forbid(unsafe_code)]

mod config;

use std::process::ExitCode;
use std::sync::Arc;

use pagewright::error::PwResult;
use pagewright::AppBuilder;
use pagewright_layout_adapter_sqlite::LayoutAdapterSqlite;

use crate::config::Config;

async fn run() -> PwResult<()> {
	let mut builder = AppBuilder::new();
	let config = Config::from_env()?;

	let store = Arc::new(LayoutAdapterSqlite::new(&config.db_dir).await?);
	builder
		.listen(config.listen)
		.settings(config.render)
		.layout_adapter(store.clone())
		.board_adapter(store);

	builder.run().await
}

#[tokio::main]
async fn main() -> ExitCode {
	match run().await {
		Ok(()) => ExitCode::SUCCESS,
		Err(err) => {
			tracing::error!("FATAL: {}", err);
			eprintln!("pagewright: {}", err);
			ExitCode::FAILURE
		}
	}
}

// vim: ts=4
