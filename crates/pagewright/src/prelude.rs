pub use crate::app::App;
pub use pagewright_types::prelude::*;

// vim: ts=4
