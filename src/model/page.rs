//! Page-level types.

use super::Block;
use serde::{Deserialize, Serialize};

/// One fixed-geometry output unit: an ordered run of blocks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    /// Page number (1-indexed)
    pub number: u32,

    /// Content blocks on the page, in source order
    pub blocks: Vec<Block>,

    /// Sum of the estimated heights of the blocks, in pixels
    pub estimated_height: f32,
}

impl Page {
    /// Create a new empty page.
    pub fn new(number: u32) -> Self {
        Self {
            number,
            blocks: Vec::new(),
            estimated_height: 0.0,
        }
    }

    /// Create a page from blocks and their combined estimated height.
    pub fn with_blocks(number: u32, blocks: Vec<Block>, estimated_height: f32) -> Self {
        Self {
            number,
            blocks,
            estimated_height,
        }
    }

    /// Get plain text content of the page.
    pub fn plain_text(&self) -> String {
        self.blocks
            .iter()
            .map(Block::plain_text)
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// Check if the page is empty (no content blocks).
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Get the number of blocks on the page.
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Check if the page starts with a heading.
    pub fn starts_with_heading(&self) -> bool {
        self.blocks.first().is_some_and(Block::is_heading)
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new(1)
    }
}
