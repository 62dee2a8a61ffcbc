//! Plain text rendering for pages.

use crate::layout::Pagination;
use crate::model::{Block, Page};

/// Convert a page to plain text.
///
/// List items are prefixed with `- ` or their number, quote lines with `> `.
pub fn to_text(page: &Page) -> String {
    let blocks: Vec<String> = page.blocks.iter().map(block_text).collect();
    blocks.join("\n\n")
}

/// Convert all pages to plain text, separated by page markers.
pub fn pagination_to_text(pagination: &Pagination) -> String {
    let mut output = String::new();
    for page in &pagination.pages {
        output.push_str(&format!("--- Page {} ---\n", page.number));
        let text = to_text(page);
        if !text.is_empty() {
            output.push_str(&text);
            output.push('\n');
        }
        output.push('\n');
    }
    output.trim_end().to_string()
}

fn block_text(block: &Block) -> String {
    match block {
        Block::UnorderedList { items } => items
            .iter()
            .map(|item| format!("- {}", item.plain_text()))
            .collect::<Vec<_>>()
            .join("\n"),
        Block::OrderedList { items } => items
            .iter()
            .enumerate()
            .map(|(i, item)| format!("{}. {}", i + 1, item.plain_text()))
            .collect::<Vec<_>>()
            .join("\n"),
        Block::Quote { text } => text
            .plain_text()
            .lines()
            .map(|line| format!("> {}", line))
            .collect::<Vec<_>>()
            .join("\n"),
        _ => block.plain_text(),
    }
}
