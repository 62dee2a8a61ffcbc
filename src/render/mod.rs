//! Rendering module for converting paginations to output formats.

mod html;
mod json;
mod text;

pub use html::{to_html, to_html_document, HtmlRenderer};
pub use json::{to_json, JsonFormat};
pub use text::{pagination_to_text, to_text};
