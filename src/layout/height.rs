//! Per-block height estimation.

use super::fonts;
use super::geometry::PageGeometry;
use super::metrics::{FontMetricsProvider, TextMetrics};
use super::Diagnostic;
use crate::model::{Block, StyledText};

/// Gap below every block, in body font sizes.
const MARGIN_RATIO: f32 = 0.5;
/// Baseline offset added to non-empty text blocks, in body font sizes.
const BASELINE_RATIO: f32 = 0.1;
/// Minimum block height, in body lines.
const MIN_HEIGHT_LINES: f32 = 0.5;

const LIST_INDENT: f32 = 30.0;
const QUOTE_INDENT: f32 = 20.0;
const QUOTE_EXTRA: f32 = 20.0;
const CODE_LINE_SCALE: f32 = 1.1;
const CODE_EXTRA: f32 = 40.0;

/// Estimates the rendered height of blocks under a [`PageGeometry`].
#[derive(Debug)]
pub struct HeightEstimator<'a, P> {
    metrics: &'a TextMetrics<P>,
    geometry: &'a PageGeometry,
    compensation: f32,
}

impl<'a, P: FontMetricsProvider> HeightEstimator<'a, P> {
    /// Create an estimator for `geometry`.
    pub fn new(metrics: &'a TextMetrics<P>, geometry: &'a PageGeometry) -> Self {
        Self {
            metrics,
            geometry,
            compensation: fonts::compensation(&geometry.font_family),
        }
    }

    /// Heights of all blocks, in source order.
    ///
    /// Unusable estimates are replaced by one body line plus margin and
    /// reported in `diagnostics`. Every height is at least half a body line.
    pub fn heights(&self, blocks: &[Block], diagnostics: &mut Vec<Diagnostic>) -> Vec<f32> {
        blocks
            .iter()
            .enumerate()
            .map(|(index, block)| {
                let mut height = self.raw_height(block);
                if !(height.is_finite() && height > 0.0) {
                    let kind = block.kind();
                    log::warn!(
                        "Height estimate for block {} ({}) was {}, using one line",
                        index,
                        kind,
                        height
                    );
                    diagnostics.push(Diagnostic::HeightFallback { block: index, kind });
                    height = self.fallback_height();
                }
                height.max(self.min_height())
            })
            .collect()
    }

    /// Height of a single block without fallback or floor.
    pub fn raw_height(&self, block: &Block) -> f32 {
        let g = self.geometry;
        let body = g.font_size;
        let lh = g.line_height;
        let margin = body * MARGIN_RATIO;
        let baseline = body * BASELINE_RATIO;
        let width = g.available_width();

        match block {
            Block::Heading { level, text } => {
                let size = g.heading_font_size(*level);
                self.text_height(text, width, size, margin)
            }
            Block::Paragraph { text } => self.text_height(text, width, body, margin),
            Block::UnorderedList { items } | Block::OrderedList { items } => {
                let items_height: f32 = if items.is_empty() {
                    body * lh
                } else {
                    items
                        .iter()
                        .map(|item| {
                            let plain = item.plain_text();
                            if plain.trim().is_empty() {
                                body * lh
                            } else {
                                self.lines(&plain, width - LIST_INDENT, body) * body * lh
                                    + baseline
                            }
                        })
                        .sum()
                };
                items_height + margin
            }
            Block::Quote { text } => {
                let plain = text.plain_text();
                if plain.trim().is_empty() {
                    body * lh + margin + QUOTE_EXTRA
                } else {
                    self.lines(&plain, width - QUOTE_INDENT, body) * body * lh
                        + margin
                        + QUOTE_EXTRA
                        + baseline
                }
            }
            Block::CodeBlock { content } => {
                let lines = content.split('\n').count().max(1) as f32;
                lines * body * lh * CODE_LINE_SCALE + margin + CODE_EXTRA + baseline
            }
        }
    }

    fn text_height(&self, text: &StyledText, width: f32, size: f32, margin: f32) -> f32 {
        let lh = self.geometry.line_height;
        let plain = text.plain_text();
        if plain.trim().is_empty() {
            size * lh + margin
        } else {
            let baseline = self.geometry.font_size * BASELINE_RATIO;
            self.lines(&plain, width, size) * size * lh + margin + baseline
        }
    }

    fn lines(&self, text: &str, width: f32, size: f32) -> f32 {
        self.metrics.line_count(
            text,
            width * self.compensation,
            size,
            &self.geometry.font_family,
        ) as f32
    }

    /// One body line plus margin, or the default geometry's when that is
    /// not a usable height.
    fn fallback_height(&self) -> f32 {
        let height = self.geometry.line_px() + self.geometry.font_size * MARGIN_RATIO;
        if height.is_finite() && height > 0.0 {
            height
        } else {
            let default = PageGeometry::default();
            default.line_px() + default.font_size * MARGIN_RATIO
        }
    }

    fn min_height(&self) -> f32 {
        let height = self.geometry.line_px() * MIN_HEIGHT_LINES;
        if height.is_finite() {
            height
        } else {
            0.0
        }
    }
}
