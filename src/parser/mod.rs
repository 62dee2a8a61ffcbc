//! Note markup parsing: block structure and inline styles.

mod block;
mod inline;

pub use block::{BlockParser, Blocks};
pub use inline::{style_inline, InlineStyler};
