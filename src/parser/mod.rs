//! HTML import module.

mod html_parser;
mod options;

pub use html_parser::HtmlParser;
pub use options::{ErrorMode, ParseOptions};
