//! Pagewright is a multi-tenant page composition backend.
//!
//! # Features
//!
//! - Per-site, versioned MAIN and SUB layouts
//! - Pluggable widgets embedded in layouts (`<widget type="...">`)
//!     - explicit handler registry
//!     - failures isolated per widget
//! - Layout variables (`{{site.name}}`, `{{title|html}}`)
//! - Sanitized output with layout-authored markup kept intact
//! - HTTP render API with plain HTML and structured preview payloads

#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![forbid(unsafe_code)]

// Re-export shared types and adapter traits from pagewright-types
pub use pagewright_types::board_adapter;
pub use pagewright_types::error;
pub use pagewright_types::layout_adapter;
pub use pagewright_types::types;

// Pipeline crate re-exports
pub use pagewright_compose as compose;
pub use pagewright_widget as widget;

// Local modules
pub mod app;
pub mod extract;
pub mod handler;
pub mod prelude;
pub mod routes;

pub use crate::app::{App, AppBuilder, AppState};

// vim: ts=4
