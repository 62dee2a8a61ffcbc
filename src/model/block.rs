//! Block-level types.

use super::StyledText;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A structural unit of a note: heading, paragraph, list, quote or code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    /// A single-line heading
    Heading {
        /// Heading level (1-3)
        level: HeadingLevel,
        /// Heading text
        text: StyledText,
    },

    /// A paragraph; consecutive source lines are joined by newlines
    Paragraph {
        /// Paragraph text
        text: StyledText,
    },

    /// A bulleted list
    UnorderedList {
        /// List items, never empty
        items: Vec<StyledText>,
    },

    /// A numbered list
    OrderedList {
        /// List items, never empty
        items: Vec<StyledText>,
    },

    /// A block quote; consecutive quote lines are joined by newlines
    Quote {
        /// Quote text
        text: StyledText,
    },

    /// A fenced code block
    CodeBlock {
        /// Raw content, newlines and whitespace preserved
        content: String,
    },
}

impl Block {
    /// Create a heading block.
    pub fn heading(level: HeadingLevel, text: impl Into<StyledText>) -> Self {
        Block::Heading {
            level,
            text: text.into(),
        }
    }

    /// Create a paragraph block.
    pub fn paragraph(text: impl Into<StyledText>) -> Self {
        Block::Paragraph { text: text.into() }
    }

    /// Create a quote block.
    pub fn quote(text: impl Into<StyledText>) -> Self {
        Block::Quote { text: text.into() }
    }

    /// Create a code block.
    pub fn code(content: impl Into<String>) -> Self {
        Block::CodeBlock {
            content: content.into(),
        }
    }

    /// Check if this block is a heading.
    pub fn is_heading(&self) -> bool {
        matches!(self, Block::Heading { .. })
    }

    /// Get the heading level, if this block is a heading.
    pub fn heading_level(&self) -> Option<HeadingLevel> {
        match self {
            Block::Heading { level, .. } => Some(*level),
            _ => None,
        }
    }

    /// Check if this block is a list.
    pub fn is_list(&self) -> bool {
        matches!(
            self,
            Block::UnorderedList { .. } | Block::OrderedList { .. }
        )
    }

    /// The block's kind, without its content.
    pub fn kind(&self) -> BlockKind {
        match self {
            Block::Heading { level, .. } => BlockKind::Heading(*level),
            Block::Paragraph { .. } => BlockKind::Paragraph,
            Block::UnorderedList { .. } => BlockKind::UnorderedList,
            Block::OrderedList { .. } => BlockKind::OrderedList,
            Block::Quote { .. } => BlockKind::Quote,
            Block::CodeBlock { .. } => BlockKind::CodeBlock,
        }
    }

    /// Get plain text content of the block.
    ///
    /// List items are joined by newlines.
    pub fn plain_text(&self) -> String {
        match self {
            Block::Heading { text, .. } | Block::Paragraph { text } | Block::Quote { text } => {
                text.plain_text()
            }
            Block::UnorderedList { items } | Block::OrderedList { items } => items
                .iter()
                .map(StyledText::plain_text)
                .collect::<Vec<_>>()
                .join("\n"),
            Block::CodeBlock { content } => content.clone(),
        }
    }
}

/// The kind of a [`Block`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockKind {
    /// Heading of the given level
    Heading(HeadingLevel),
    /// Paragraph
    Paragraph,
    /// Bulleted list
    UnorderedList,
    /// Numbered list
    OrderedList,
    /// Block quote
    Quote,
    /// Fenced code
    CodeBlock,
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockKind::Heading(level) => write!(f, "heading_{}", level.as_u8()),
            BlockKind::Paragraph => f.write_str("paragraph"),
            BlockKind::UnorderedList => f.write_str("unordered_list"),
            BlockKind::OrderedList => f.write_str("ordered_list"),
            BlockKind::Quote => f.write_str("quote"),
            BlockKind::CodeBlock => f.write_str("code"),
        }
    }
}

/// Heading level. Only three levels are recognized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum HeadingLevel {
    /// `# `
    H1,
    /// `## `
    H2,
    /// `### `
    H3,
}

impl HeadingLevel {
    /// Numeric level (1-3).
    pub fn as_u8(self) -> u8 {
        match self {
            HeadingLevel::H1 => 1,
            HeadingLevel::H2 => 2,
            HeadingLevel::H3 => 3,
        }
    }

    /// Font size multiplier relative to the body font size.
    pub fn scale(self) -> f32 {
        match self {
            HeadingLevel::H1 => 1.8,
            HeadingLevel::H2 => 1.5,
            HeadingLevel::H3 => 1.25,
        }
    }
}

impl TryFrom<u8> for HeadingLevel {
    type Error = String;

    fn try_from(level: u8) -> Result<Self, Self::Error> {
        match level {
            1 => Ok(HeadingLevel::H1),
            2 => Ok(HeadingLevel::H2),
            3 => Ok(HeadingLevel::H3),
            other => Err(format!("heading level must be 1-3, got {}", other)),
        }
    }
}

impl From<HeadingLevel> for u8 {
    fn from(level: HeadingLevel) -> Self {
        level.as_u8()
    }
}
