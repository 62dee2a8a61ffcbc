//! Document model types for paginated notes.
//!
//! This module defines the intermediate representation that bridges
//! parsing and layout: a [`Document`] of typed [`Block`]s whose text is
//! already style-resolved, and the [`Page`]s the paginator produces from it.

mod block;
mod document;
mod page;
mod styled;

pub use block::{Block, BlockKind, HeadingLevel};
pub use document::Document;
pub use page::Page;
pub use styled::{StyledText, TextRun, TextStyle};
