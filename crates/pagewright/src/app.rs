//! App builder - constructs and runs the Pagewright application

use std::sync::Arc;

use pagewright_compose::{LayoutResolver, PageComposer, RenderSettings};
use pagewright_types::board_adapter::BoardAdapter;
use pagewright_types::layout_adapter::LayoutAdapter;
use pagewright_widget::{WidgetHandler, WidgetRegistry};

use crate::prelude::*;
use crate::routes;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug, Clone)]
pub struct AppBuilderOpts {
	pub listen: Box<str>,
}

pub struct AppState {
	pub opts: AppBuilderOpts,
	pub composer: PageComposer,
}

pub type App = Arc<AppState>;

pub struct AppBuilder {
	opts: AppBuilderOpts,
	settings: RenderSettings,
	layout_adapter: Option<Arc<dyn LayoutAdapter>>,
	board_adapter: Option<Arc<dyn BoardAdapter>>,
	widget_handlers: Vec<Arc<dyn WidgetHandler>>,
}

impl Default for AppBuilder {
	fn default() -> Self {
		Self::new()
	}
}

impl AppBuilder {
	pub fn new() -> Self {
		init_tracing();
		AppBuilder {
			opts: AppBuilderOpts { listen: "127.0.0.1:8080".into() },
			settings: RenderSettings::default(),
			layout_adapter: None,
			board_adapter: None,
			widget_handlers: Vec::new(),
		}
	}

	// Opts
	pub fn listen(&mut self, listen: impl Into<Box<str>>) -> &mut Self {
		self.opts.listen = listen.into();
		self
	}
	pub fn settings(&mut self, settings: RenderSettings) -> &mut Self {
		self.settings = settings;
		self
	}

	// Adapters
	pub fn layout_adapter(&mut self, layout_adapter: Arc<dyn LayoutAdapter>) -> &mut Self {
		self.layout_adapter = Some(layout_adapter);
		self
	}
	pub fn board_adapter(&mut self, board_adapter: Arc<dyn BoardAdapter>) -> &mut Self {
		self.board_adapter = Some(board_adapter);
		self
	}

	/// Register an additional widget handler. Handlers added here are
	/// consulted after the built-in ones, in the order they were added.
	pub fn widget_handler(&mut self, handler: Arc<dyn WidgetHandler>) -> &mut Self {
		self.widget_handlers.push(handler);
		self
	}

	/// Assemble the application state without starting a server
	pub fn build(self) -> PwResult<App> {
		let Some(layout_adapter) = self.layout_adapter else {
			error!("FATAL: No layout adapter configured");
			return Err(Error::ConfigError("No layout adapter configured".into()));
		};
		if self.board_adapter.is_none() {
			info!("No board adapter configured, board.summary widget disabled");
		}

		let mut registry = WidgetRegistry::with_builtin_handlers(self.board_adapter);
		for handler in self.widget_handlers {
			registry.register(handler);
		}
		info!("Widget handlers: {}", registry.handler_names().join(", "));

		let resolver = LayoutResolver::new(layout_adapter, self.settings.resolve_timeout());
		let composer = PageComposer::new(resolver, registry, self.settings)?;

		Ok(Arc::new(AppState { opts: self.opts, composer }))
	}

	pub async fn run(self) -> PwResult<()> {
		info!("Pagewright V{}", VERSION);

		let app = self.build()?;
		let router = routes::init(app.clone());

		let listener = tokio::net::TcpListener::bind(app.opts.listen.as_ref()).await.map_err(|e| {
			error!("FATAL: Cannot listen on {}: {}", app.opts.listen, e);
			Error::Io(e)
		})?;
		info!("Listening on HTTP {}", app.opts.listen);

		axum::serve(listener, router).with_graceful_shutdown(shutdown_signal()).await?;
		info!("Shut down");
		Ok(())
	}
}

/// Log to stderr, filtered by `RUST_LOG`
fn init_tracing() {
	// A subscriber may already be installed (tests build several apps)
	let _ = tracing_subscriber::fmt()
		.with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
		.with_target(false)
		.try_init();
}

async fn shutdown_signal() {
	if let Err(e) = tokio::signal::ctrl_c().await {
		warn!("Cannot listen for shutdown signal: {}", e);
		std::future::pending::<()>().await;
	}
}

// vim: ts=4
