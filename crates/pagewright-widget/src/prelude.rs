pub use pagewright_types::prelude::*;
pub use pagewright_types::types::WidgetContext;

// vim: ts=4
