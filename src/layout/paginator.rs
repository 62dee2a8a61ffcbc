//! Greedy page packing with heading-aware backtracking.
//!
//! Blocks are placed in source order. When a body block would overflow the
//! page, the run starting at the page's last heading is carried to the next
//! page together with it, so a heading is not left stranded at the bottom of
//! a page while its content continues elsewhere.

use serde::Serialize;

use super::geometry::PageGeometry;
use super::height::HeightEstimator;
use super::metrics::{FixedWidthMetrics, FontMetricsProvider, TextMetrics};
use super::Diagnostic;
use crate::model::{Block, Document, Page};

/// Iterations allowed per block before packing gives up.
const ITERATIONS_PER_BLOCK: usize = 10;

/// Height-level view of a block for [`pack`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PackItem {
    pub height: f32,
    pub is_heading: bool,
}

impl PackItem {
    /// A body item.
    pub fn body(height: f32) -> Self {
        Self {
            height,
            is_heading: false,
        }
    }

    /// A heading item.
    pub fn heading(height: f32) -> Self {
        Self {
            height,
            is_heading: true,
        }
    }
}

/// Item indices of one packed page.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PackedPage {
    /// Indices into the packed items, ascending
    pub items: Vec<usize>,
    /// Sum of the item heights
    pub height: f32,
}

impl PackedPage {
    fn push(&mut self, index: usize, height: f32) {
        self.items.push(index);
        self.height += height;
    }
}

/// Result of [`pack`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Packing {
    /// Pages in order; never empty
    pub pages: Vec<PackedPage>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Pack items into pages of `available_height`.
///
/// Items that fit are appended. An item overflowing an empty page is placed
/// alone. A heading overflowing a non-empty page starts the next page. A body
/// item overflowing a non-empty page takes the run from the page's last
/// heading along to the next page, provided that run and the item fit there
/// together; otherwise the item simply starts the next page.
///
/// Every item taller than `available_height` is reported as
/// [`Diagnostic::OversizedBlock`], whichever way it reached its page.
///
/// The result always holds at least one page.
pub fn pack(items: &[PackItem], available_height: f32) -> Packing {
    let mut pages: Vec<PackedPage> = Vec::new();
    let mut diagnostics = Vec::new();
    let mut current = PackedPage::default();

    let limit = items.len().saturating_mul(ITERATIONS_PER_BLOCK);
    let mut iterations = 0;
    let mut i = 0;

    while i < items.len() {
        if iterations >= limit {
            log::error!(
                "Pagination stopped after {} iterations at block {} of {}",
                limit,
                i,
                items.len()
            );
            diagnostics.push(Diagnostic::IterationLimit {
                limit,
                next_block: i,
            });
            break;
        }
        iterations += 1;

        let item = items[i];
        if current.height + item.height <= available_height {
            current.push(i, item.height);
            i += 1;
            continue;
        }

        if current.items.is_empty() {
            log::warn!(
                "Block {} is {:.1}px tall but only {:.1}px are available, placing it alone",
                i,
                item.height,
                available_height
            );
            diagnostics.push(Diagnostic::OversizedBlock {
                block: i,
                height: item.height,
                available: available_height,
            });
            current.push(i, item.height);
            pages.push(std::mem::take(&mut current));
            i += 1;
            continue;
        }

        let carried = if item.is_heading {
            None
        } else {
            carry_from_last_heading(&mut current, items, item.height, available_height)
        };

        let finished = std::mem::take(&mut current);
        if !finished.items.is_empty() {
            pages.push(finished);
        }
        current = carried.unwrap_or_default();
        if item.height > available_height {
            log::warn!(
                "Block {} is {:.1}px tall but only {:.1}px are available, starting a page with it",
                i,
                item.height,
                available_height
            );
            diagnostics.push(Diagnostic::OversizedBlock {
                block: i,
                height: item.height,
                available: available_height,
            });
        }
        current.push(i, item.height);
        i += 1;
    }

    if !current.items.is_empty() {
        pages.push(current);
    }
    if pages.is_empty() {
        pages.push(PackedPage::default());
    }

    log::debug!("Packed {} blocks into {} pages", items.len(), pages.len());
    Packing { pages, diagnostics }
}

/// Split `page` at its last heading when the run from that heading plus an
/// incoming item of `incoming` height fits a fresh page. Returns the run;
/// `page` keeps what precedes it.
fn carry_from_last_heading(
    page: &mut PackedPage,
    items: &[PackItem],
    incoming: f32,
    available_height: f32,
) -> Option<PackedPage> {
    let k = page.items.iter().rposition(|&idx| items[idx].is_heading)?;

    let run: Vec<usize> = page.items[k..].to_vec();
    let run_height: f32 = run.iter().map(|&idx| items[idx].height).sum();
    if run_height + incoming > available_height {
        log::trace!(
            "Run from heading {} ({:.1}px) cannot move with the next block",
            page.items[k],
            run_height
        );
        return None;
    }

    page.items.truncate(k);
    page.height -= run_height;
    log::trace!("Carrying {} blocks from heading {} to the next page", run.len(), run[0]);
    Some(PackedPage {
        items: run,
        height: run_height,
    })
}

/// Pages and diagnostics produced by a [`Paginator`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Pagination {
    pub pages: Vec<Page>,
    pub diagnostics: Vec<Diagnostic>,
}

impl Pagination {
    /// Number of pages. Always at least 1.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Total number of blocks across all pages.
    pub fn block_count(&self) -> usize {
        self.pages.iter().map(Page::block_count).sum()
    }

    /// Get a page by its 1-based number.
    pub fn page(&self, number: u32) -> Option<&Page> {
        let index = (number as usize).checked_sub(1)?;
        self.pages.get(index)
    }

    /// Check if any diagnostics were raised.
    pub fn has_diagnostics(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    /// Iterate over the blocks of all pages in order.
    pub fn blocks(&self) -> impl Iterator<Item = &Block> {
        self.pages.iter().flat_map(|page| page.blocks.iter())
    }
}

/// Splits documents into fixed-size pages.
#[derive(Debug, Clone, Default)]
pub struct Paginator<P = FixedWidthMetrics> {
    metrics: TextMetrics<P>,
}

impl Paginator<FixedWidthMetrics> {
    /// Create a paginator using the approximation width table.
    pub fn new() -> Self {
        Self::with_metrics(TextMetrics::new())
    }
}

impl<P: FontMetricsProvider> Paginator<P> {
    /// Create a paginator using `metrics` for text width estimation.
    pub fn with_metrics(metrics: TextMetrics<P>) -> Self {
        Self { metrics }
    }

    /// The text metrics in use.
    pub fn metrics(&self) -> &TextMetrics<P> {
        &self.metrics
    }

    /// Paginate a document.
    pub fn paginate(&self, document: &Document, geometry: &PageGeometry) -> Pagination {
        self.paginate_blocks(&document.blocks, geometry)
    }

    /// Paginate a block sequence.
    pub fn paginate_blocks(&self, blocks: &[Block], geometry: &PageGeometry) -> Pagination {
        let mut diagnostics = Vec::new();

        if geometry.is_degenerate() {
            log::warn!(
                "No room for content: {}x{} available after padding",
                geometry.available_width(),
                geometry.available_height()
            );
            diagnostics.push(Diagnostic::DegenerateGeometry {
                available_width: geometry.available_width(),
                available_height: geometry.available_height(),
            });
            return Pagination {
                pages: vec![Page::new(1)],
                diagnostics,
            };
        }

        if blocks.is_empty() {
            return Pagination {
                pages: vec![Page::new(1)],
                diagnostics,
            };
        }

        let heights =
            HeightEstimator::new(&self.metrics, geometry).heights(blocks, &mut diagnostics);
        let items: Vec<PackItem> = blocks
            .iter()
            .zip(&heights)
            .map(|(block, &height)| PackItem {
                height,
                is_heading: block.is_heading(),
            })
            .collect();

        let packing = pack(&items, geometry.available_height());
        diagnostics.extend(packing.diagnostics);

        let pages = packing
            .pages
            .into_iter()
            .zip(1u32..)
            .map(|(packed, number)| {
                let blocks = packed.items.iter().map(|&i| blocks[i].clone()).collect();
                Page::with_blocks(number, blocks, packed.height)
            })
            .collect();

        Pagination { pages, diagnostics }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn indices(packing: &Packing) -> Vec<Vec<usize>> {
        packing.pages.iter().map(|p| p.items.clone()).collect()
    }

    #[test]
    fn test_everything_fits_one_page() {
        let items = [PackItem::heading(10.0), PackItem::body(20.0), PackItem::body(30.0)];
        let packing = pack(&items, 100.0);
        assert_eq!(indices(&packing), vec![vec![0, 1, 2]]);
        assert!((packing.pages[0].height - 60.0).abs() < 1e-4);
    }

    #[test]
    fn test_empty_input_gives_one_empty_page() {
        let packing = pack(&[], 100.0);
        assert_eq!(indices(&packing), vec![Vec::<usize>::new()]);
    }

    #[test]
    fn test_heading_overflow_starts_new_page() {
        let items = [PackItem::body(60.0), PackItem::heading(50.0), PackItem::body(10.0)];
        let packing = pack(&items, 100.0);
        assert_eq!(indices(&packing), vec![vec![0], vec![1, 2]]);
    }

    #[test]
    fn test_backtrack_carries_heading_run() {
        let items = [
            PackItem::body(50.0),
            PackItem::heading(20.0),
            PackItem::body(20.0),
            PackItem::body(30.0),
        ];
        let packing = pack(&items, 100.0);
        assert_eq!(indices(&packing), vec![vec![0], vec![1, 2, 3]]);
        assert!((packing.pages[0].height - 50.0).abs() < 1e-4);
        assert!((packing.pages[1].height - 70.0).abs() < 1e-4);
    }

    #[test]
    fn test_backtrack_skipped_when_run_cannot_fit() {
        let items = [PackItem::heading(40.0), PackItem::body(60.0), PackItem::body(60.0)];
        let packing = pack(&items, 150.0);
        assert_eq!(indices(&packing), vec![vec![0, 1], vec![2]]);
    }

    #[test]
    fn test_room_for_block_stays_on_page() {
        let items = [PackItem::heading(40.0), PackItem::body(60.0), PackItem::body(60.0)];
        let packing = pack(&items, 160.0);
        assert_eq!(indices(&packing), vec![vec![0, 1, 2]]);
    }

    #[test]
    fn test_no_heading_breaks_plainly() {
        let items = [PackItem::body(60.0), PackItem::body(60.0)];
        let packing = pack(&items, 100.0);
        assert_eq!(indices(&packing), vec![vec![0], vec![1]]);
    }

    #[test]
    fn test_oversized_block_forced_alone() {
        let items = [PackItem::body(10.0), PackItem::body(500.0), PackItem::body(10.0)];
        let packing = pack(&items, 100.0);
        assert_eq!(indices(&packing), vec![vec![0], vec![1], vec![2]]);
        assert_eq!(
            packing.diagnostics,
            vec![Diagnostic::OversizedBlock {
                block: 1,
                height: 500.0,
                available: 100.0,
            }]
        );
    }

    #[test]
    fn test_oversized_heading_after_break_reported() {
        let items = [PackItem::body(30.0), PackItem::heading(150.0), PackItem::body(10.0)];
        let packing = pack(&items, 100.0);
        assert_eq!(indices(&packing), vec![vec![0], vec![1], vec![2]]);
        assert_eq!(packing.diagnostics.len(), 1);
        assert!(matches!(
            packing.diagnostics[0],
            Diagnostic::OversizedBlock { block: 1, .. }
        ));
    }

    #[test]
    fn test_exact_fit() {
        let items = [PackItem::body(50.0), PackItem::body(50.0)];
        assert_eq!(indices(&pack(&items, 100.0)), vec![vec![0, 1]]);
    }

    #[test]
    fn test_paginator_numbers_pages() {
        let blocks: Vec<Block> = (0..40)
            .map(|i| Block::paragraph(format!("paragraph {}", i).as_str()))
            .collect();
        let pagination = Paginator::new().paginate_blocks(&blocks, &PageGeometry::default());
        assert!(pagination.page_count() > 1);
        for (i, page) in pagination.pages.iter().enumerate() {
            assert_eq!(page.number as usize, i + 1);
            assert!(!page.is_empty());
        }
        assert_eq!(pagination.block_count(), 40);
        assert!(pagination.page(0).is_none());
        assert!(pagination.page(1).is_some());
    }

    #[test]
    fn test_degenerate_geometry() {
        let geometry = PageGeometry::default().with_padding(60.0, 8.0);
        let pagination = Paginator::new().paginate_blocks(&[Block::paragraph("x")], &geometry);
        assert_eq!(pagination.page_count(), 1);
        assert!(pagination.pages[0].is_empty());
        assert!(matches!(
            pagination.diagnostics[0],
            Diagnostic::DegenerateGeometry { .. }
        ));
    }
}
