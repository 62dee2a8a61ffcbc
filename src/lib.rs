//! # notepager
//!
//! Split lightweight note markup into fixed-size pages.
//!
//! Notes written in a markdown-like syntax are parsed into typed blocks,
//! measured against a canvas geometry and packed into pages that each fit
//! the canvas. The pages are meant to be rendered as a series of
//! same-sized slides or images.
//!
//! ## Quick Start
//!
//! ```
//! use notepager::{paginate_text, PageGeometry};
//!
//! let geometry = PageGeometry::new().with_ratio("3:4")?;
//! let pagination = paginate_text("# Title\n\nSome **bold** text.", &geometry);
//! assert_eq!(pagination.page_count(), 1);
//! # Ok::<(), notepager::Error>(())
//! ```
//!
//! ## Features
//!
//! - **Block parsing**: headings, paragraphs, lists, quotes and fenced code
//! - **Inline styles**: bold, italic, strikethrough, underline, code spans, links
//! - **CJK and emoji aware** width estimation
//! - **Heading-aware pagination**: a heading moves with the content after it
//! - **Font files** (feature `ttf`): exact glyph advances via `ttf-parser`

pub mod error;
pub mod layout;
pub mod model;
pub mod parser;
pub mod render;

// Re-export commonly used types
pub use error::{Error, Result};
pub use layout::{
    Diagnostic, FixedWidthMetrics, FontMetricsProvider, FontSizePreset, PageGeometry, Pagination,
    Paginator, TextAlign, TextMetrics,
};
#[cfg(feature = "ttf")]
pub use layout::TtfMetrics;
pub use model::{
    Block, BlockKind, Document, HeadingLevel, Page, StyledText, TextRun, TextStyle,
};
pub use parser::{BlockParser, InlineStyler};
pub use render::JsonFormat;

use std::path::Path;

/// Parse note markup into a document.
///
/// # Example
///
/// ```
/// use notepager::{parse, Block, HeadingLevel};
///
/// let doc = parse("# Title\n\nBody text");
/// assert_eq!(doc.blocks[0], Block::heading(HeadingLevel::H1, "Title"));
/// assert_eq!(doc.blocks[1], Block::paragraph("Body text"));
/// ```
pub fn parse(text: &str) -> Document {
    BlockParser::new().parse(text)
}

/// Resolve inline emphasis markers in a single piece of text.
pub fn style(raw: &str) -> StyledText {
    parser::style_inline(raw)
}

/// Paginate a parsed document with the default width table.
pub fn paginate(document: &Document, geometry: &PageGeometry) -> Pagination {
    Paginator::new().paginate(document, geometry)
}

/// Parse and paginate note markup.
pub fn paginate_text(text: &str, geometry: &PageGeometry) -> Pagination {
    paginate(&parse(text), geometry)
}

/// Read, parse and paginate a note file.
///
/// # Example
///
/// ```no_run
/// use notepager::{paginate_file, PageGeometry};
///
/// let pagination = paginate_file("notes.md", &PageGeometry::default())?;
/// println!("Pages: {}", pagination.page_count());
/// # Ok::<(), notepager::Error>(())
/// ```
pub fn paginate_file<P: AsRef<Path>>(path: P, geometry: &PageGeometry) -> Result<Pagination> {
    let text = std::fs::read_to_string(path)?;
    Ok(paginate_text(&text, geometry))
}

/// Builder bundling a geometry with the metrics used to paginate.
///
/// # Example
///
/// ```
/// use notepager::{FontSizePreset, Notepager};
///
/// let pagination = Notepager::new()
///     .with_ratio("1:1")?
///     .with_font_size_preset(FontSizePreset::Large)
///     .paginate("- one\n- two");
/// assert_eq!(pagination.block_count(), 1);
/// # Ok::<(), notepager::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Notepager<P = FixedWidthMetrics> {
    geometry: PageGeometry,
    paginator: Paginator<P>,
}

impl Notepager<FixedWidthMetrics> {
    /// Create a builder with the default geometry and width table.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<P: FontMetricsProvider> Notepager<P> {
    /// Replace the whole geometry.
    pub fn with_geometry(mut self, geometry: PageGeometry) -> Self {
        self.geometry = geometry;
        self
    }

    /// Set the canvas size from an aspect ratio such as `"3:4"`.
    pub fn with_ratio(mut self, ratio: &str) -> Result<Self> {
        self.geometry = self.geometry.with_ratio(ratio)?;
        Ok(self)
    }

    /// Set the body font size from a preset.
    pub fn with_font_size_preset(mut self, preset: FontSizePreset) -> Self {
        self.geometry = self.geometry.with_font_size_preset(preset);
        self
    }

    /// Set the logical font family.
    pub fn with_font_family(mut self, family: impl Into<String>) -> Self {
        self.geometry = self.geometry.with_font_family(family);
        self
    }

    /// Use another width provider.
    pub fn with_metrics<Q: FontMetricsProvider>(self, provider: Q) -> Notepager<Q> {
        Notepager {
            geometry: self.geometry,
            paginator: Paginator::with_metrics(TextMetrics::with_provider(provider)),
        }
    }

    /// The configured geometry.
    pub fn geometry(&self) -> &PageGeometry {
        &self.geometry
    }

    /// Parse and paginate note markup.
    pub fn paginate(&self, text: &str) -> Pagination {
        self.paginate_document(&parse(text))
    }

    /// Paginate an already parsed document.
    pub fn paginate_document(&self, document: &Document) -> Pagination {
        self.paginator.paginate(document, &self.geometry)
    }

    /// Read, parse and paginate a note file.
    pub fn paginate_file<Q: AsRef<Path>>(&self, path: Q) -> Result<Pagination> {
        let text = std::fs::read_to_string(path)?;
        Ok(self.paginate(&text))
    }

    /// Render one page as an HTML fragment with the configured geometry.
    pub fn to_html(&self, page: &Page) -> String {
        render::to_html(page, &self.geometry)
    }
}
