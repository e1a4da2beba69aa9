//! Shared types, adapter traits, and core utilities for Pagewright.
//!
//! This crate contains the foundational types that are shared between the
//! composition pipeline, the HTTP layer and all adapter implementations.
//! Adapters depend only on this crate, so they compile in parallel with the
//! pipeline crates.

#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![forbid(unsafe_code)]

pub mod board_adapter;
pub mod error;
pub mod layout_adapter;
pub mod prelude;
pub mod types;
pub mod utils;

// vim: ts=4
