//! Widgets embedded in layout templates
//!
//! A widget is written in a layout as `<widget type="ns.name" ...>body</widget>`.
//! At render time each widget element is extracted, handed to the first
//! registered `WidgetHandler` that supports its type, and replaced by the
//! returned fragment. This crate provides:
//! - the `WidgetHandler` trait and the `WidgetTag` it receives
//! - `WidgetRegistry`, an explicit ordered handler list
//! - extraction of widget tags from a parsed layout
//! - dispatch with per-widget failure isolation
//! - the built-in `html.block`, `text.block` and `board.summary` handlers

#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![forbid(unsafe_code)]

pub mod dispatch;
pub mod extract;
pub mod handler;
pub mod handlers;
pub mod registry;

pub use dispatch::{DispatchOptions, WidgetOutcome};
pub use handler::{WidgetHandler, WidgetTag};
pub use registry::WidgetRegistry;

mod prelude;

// vim: ts=4
