//! Line-oriented block parser.
//!
//! The parser is a finite-state machine over a single open block. Each line
//! either extends the open block, closes it, or closes it and opens another;
//! completed blocks are yielded lazily by [`Blocks`].

use std::collections::VecDeque;

use regex::Regex;

use super::InlineStyler;
use crate::model::{Block, Document, HeadingLevel, StyledText};

/// Parses note markup into a [`Document`].
#[derive(Debug, Clone)]
pub struct BlockParser {
    styler: InlineStyler,
    ordered_item: Regex,
}

impl BlockParser {
    /// Create a new block parser.
    pub fn new() -> Self {
        Self {
            styler: InlineStyler::new(),
            ordered_item: Regex::new(r"^[0-9]+\.\s").expect("ordered item pattern is valid"),
        }
    }

    /// Parse `text` into a document.
    ///
    /// Whitespace around the whole input is ignored. Empty input yields an
    /// empty document.
    pub fn parse(&self, text: &str) -> Document {
        let blocks: Vec<Block> = self.blocks(text.trim()).collect();
        log::debug!("Parsed {} blocks", blocks.len());
        Document::new(blocks)
    }

    /// Iterate over the blocks of `text` in source order.
    pub fn blocks<'a>(&'a self, text: &'a str) -> Blocks<'a> {
        Blocks {
            parser: self,
            lines: text.lines(),
            state: OpenBlock::None,
            ready: VecDeque::new(),
        }
    }
}

impl Default for BlockParser {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListKind {
    Unordered,
    Ordered,
}

/// The block currently accumulating lines.
#[derive(Debug, Default)]
enum OpenBlock {
    #[default]
    None,
    Paragraph(String),
    List(ListKind, Vec<String>),
    Quote(String),
    Code(String),
}

impl OpenBlock {
    fn close(self, styler: &InlineStyler) -> Option<Block> {
        let block = match self {
            OpenBlock::None => return None,
            OpenBlock::Paragraph(text) => Block::Paragraph {
                text: styler.style(&text),
            },
            OpenBlock::List(kind, items) => {
                let items: Vec<StyledText> = items.iter().map(|i| styler.style(i)).collect();
                match kind {
                    ListKind::Unordered => Block::UnorderedList { items },
                    ListKind::Ordered => Block::OrderedList { items },
                }
            }
            OpenBlock::Quote(text) => Block::Quote {
                text: styler.style(&text),
            },
            OpenBlock::Code(content) => Block::CodeBlock { content },
        };
        Some(block)
    }
}

/// Lazy iterator over parsed blocks. See [`BlockParser::blocks`].
#[derive(Debug)]
pub struct Blocks<'a> {
    parser: &'a BlockParser,
    lines: std::str::Lines<'a>,
    state: OpenBlock,
    ready: VecDeque<Block>,
}

impl<'a> Blocks<'a> {
    fn flush(&mut self) {
        let open = std::mem::take(&mut self.state);
        if let Some(block) = open.close(&self.parser.styler) {
            self.ready.push_back(block);
        }
    }

    fn push_item(&mut self, kind: ListKind, item: &str) {
        let item = item.trim().to_string();
        match &mut self.state {
            OpenBlock::List(open_kind, items) if *open_kind == kind => items.push(item),
            _ => {
                self.flush();
                self.state = OpenBlock::List(kind, vec![item]);
            }
        }
    }

    fn step(&mut self, line: &str) {
        // A blank line closes whatever is open, including an unterminated fence.
        if line.trim().is_empty() {
            self.flush();
            return;
        }

        if let Some((level, rest)) = heading_prefix(line) {
            self.flush();
            let text = self.parser.styler.style(rest.trim());
            self.ready.push_back(Block::Heading { level, text });
            return;
        }

        if let Some(rest) = line.strip_prefix("- ") {
            self.push_item(ListKind::Unordered, rest);
            return;
        }

        if self.parser.ordered_item.is_match(line) {
            let rest = line.find('.').map_or("", |dot| &line[dot + 1..]);
            self.push_item(ListKind::Ordered, rest);
            return;
        }

        if let Some(rest) = line.strip_prefix("> ") {
            match &mut self.state {
                OpenBlock::Quote(text) => {
                    text.push('\n');
                    text.push_str(rest.trim());
                }
                _ => {
                    self.flush();
                    self.state = OpenBlock::Quote(rest.trim().to_string());
                }
            }
            return;
        }

        if line.starts_with("```") {
            let closing = matches!(self.state, OpenBlock::Code(_));
            self.flush();
            if !closing {
                self.state = OpenBlock::Code(String::new());
            }
            return;
        }

        match &mut self.state {
            OpenBlock::Code(content) => {
                if !content.is_empty() {
                    content.push('\n');
                }
                content.push_str(line);
            }
            OpenBlock::Paragraph(text) => {
                text.push('\n');
                text.push_str(line.trim());
            }
            _ => {
                self.flush();
                self.state = OpenBlock::Paragraph(line.trim().to_string());
            }
        }
    }
}

impl Iterator for Blocks<'_> {
    type Item = Block;

    fn next(&mut self) -> Option<Block> {
        loop {
            if let Some(block) = self.ready.pop_front() {
                return Some(block);
            }
            match self.lines.next() {
                Some(line) => self.step(line),
                None => {
                    let open = std::mem::take(&mut self.state);
                    return open.close(&self.parser.styler);
                }
            }
        }
    }
}

fn heading_prefix(line: &str) -> Option<(HeadingLevel, &str)> {
    if let Some(rest) = line.strip_prefix("# ") {
        Some((HeadingLevel::H1, rest))
    } else if let Some(rest) = line.strip_prefix("## ") {
        Some((HeadingLevel::H2, rest))
    } else {
        line.strip_prefix("### ").map(|rest| (HeadingLevel::H3, rest))
    }
}
