pub use crate::error::{Error, PwResult};
pub use crate::types::{BoardId, LayoutKind, SiteId, Timestamp};

pub use tracing::{debug, debug_span, error, error_span, info, info_span, warn, warn_span};

// vim: ts=4
