//! Rendering primitives for the page composition pipeline
//!
//! This crate provides:
//! - `{{var}}` / `{{var|html}}` template substitution
//! - Helpers over the html5ever DOM (parse, query, mutate, serialize)
//! - A DOM-based HTML sanitizer for untrusted markup

#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![forbid(unsafe_code)]

pub mod dom;
pub mod sanitizer;
pub mod template;

pub use sanitizer::Sanitizer;
pub use template::{escape_html, TemplateRenderer};

mod prelude;

// vim: ts=4
