//! Non-fatal anomalies reported by the paginator.

use serde::Serialize;
use std::fmt;

use crate::model::BlockKind;

/// A recoverable anomaly found while paginating.
///
/// Each diagnostic is also logged when it is raised.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Diagnostic {
    /// The padding leaves no room for content.
    DegenerateGeometry {
        available_width: f32,
        available_height: f32,
    },

    /// A block's height estimate was unusable and was replaced by one line.
    HeightFallback {
        /// Source index of the block
        block: usize,
        kind: BlockKind,
    },

    /// A block taller than the page was placed alone on its own page.
    OversizedBlock {
        /// Source index of the block
        block: usize,
        height: f32,
        available: f32,
    },

    /// Packing stopped early; blocks from `next_block` onwards were dropped.
    IterationLimit { limit: usize, next_block: usize },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::DegenerateGeometry {
                available_width,
                available_height,
            } => write!(
                f,
                "no room for content ({}x{} available)",
                available_width, available_height
            ),
            Diagnostic::HeightFallback { block, kind } => {
                write!(f, "block {} ({}): height estimate fell back to one line", block, kind)
            }
            Diagnostic::OversizedBlock {
                block,
                height,
                available,
            } => write!(
                f,
                "block {} is {:.1}px tall but only {:.1}px are available; placed alone",
                block, height, available
            ),
            Diagnostic::IterationLimit { limit, next_block } => write!(
                f,
                "pagination stopped after {} iterations at block {}",
                limit, next_block
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::HeadingLevel;

    #[test]
    fn test_display() {
        let d = Diagnostic::OversizedBlock {
            block: 3,
            height: 900.0,
            available: 672.0,
        };
        assert_eq!(
            d.to_string(),
            "block 3 is 900.0px tall but only 672.0px are available; placed alone"
        );

        let d = Diagnostic::HeightFallback {
            block: 0,
            kind: BlockKind::Heading(HeadingLevel::H2),
        };
        assert!(d.to_string().contains("heading_2"));
    }

    #[test]
    fn test_serialize_tagged() {
        let d = Diagnostic::IterationLimit {
            limit: 10,
            next_block: 1,
        };
        let json = serde_json::to_string(&d).unwrap();
        assert!(json.contains("\"type\":\"iteration_limit\""));
        assert!(json.contains("\"limit\":10"));
    }
}
