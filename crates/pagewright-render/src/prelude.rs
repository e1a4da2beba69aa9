pub use pagewright_types::prelude::*;

// vim: ts=4
