//! Rendering module for converting documents to HTML and JSON.

mod html;
mod json;
mod options;
mod result;

pub use html::{
    to_html, to_html_with_stats, HtmlRenderer, IMAGE_CLASS, SPACER_CLASS, TEXT_CLASS,
    WRAPPER_CLASS,
};
pub use json::{to_json, JsonFormat};
pub use options::RenderOptions;
pub use result::{RenderResult, RenderStats};
