//! Page composition for Pagewright
//!
//! `LayoutResolver` selects the published layout of a site, `PageComposer`
//! turns it into a finished page: widgets rendered, variables substituted,
//! assets injected and untrusted markup sanitized.

#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![forbid(unsafe_code)]

pub mod composer;
pub mod resolver;
pub mod settings;

pub use composer::PageComposer;
pub use resolver::LayoutResolver;
pub use settings::RenderSettings;

mod prelude;

// vim: ts=4
