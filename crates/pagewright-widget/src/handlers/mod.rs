//! Built-in widget handlers

mod board_summary;
mod html_block;
mod text_block;

pub use board_summary::BoardSummaryHandler;
pub use html_block::HtmlBlockHandler;
pub use text_block::TextBlockHandler;

// vim: ts=4
