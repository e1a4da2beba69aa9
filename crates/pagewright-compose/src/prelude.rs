pub use pagewright_types::prelude::*;
pub use pagewright_types::types::{LayoutResolveResult, Site, WidgetContext};

// vim: ts=4
