//! HTML rendering of single pages.
//!
//! The output is the hand-off format for an external rasterizer: a
//! `notion-page` container sized to the canvas, holding one element per
//! block. Inline styles map to `<span class="bold">` and friends, code runs
//! to `<code>`.

use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::layout::PageGeometry;
use crate::model::{Block, HeadingLevel, Page, StyledText, TextRun};

/// Render a page as an HTML fragment.
pub fn to_html(page: &Page, geometry: &PageGeometry) -> String {
    HtmlRenderer::new(geometry).render(page)
}

/// Render a page as a standalone HTML document.
pub fn to_html_document(page: &Page, geometry: &PageGeometry) -> String {
    let body = to_html(page, geometry);
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>Page {}</title>\n</head>\n<body>\n{}</body>\n</html>\n",
        page.number, body
    )
}

/// Renders pages for one geometry.
#[derive(Debug, Clone, Copy)]
pub struct HtmlRenderer<'a> {
    geometry: &'a PageGeometry,
}

impl<'a> HtmlRenderer<'a> {
    /// Create a renderer for `geometry`.
    pub fn new(geometry: &'a PageGeometry) -> Self {
        Self { geometry }
    }

    /// Render a page as an HTML fragment.
    pub fn render(&self, page: &Page) -> String {
        let g = self.geometry;
        let mut output = String::new();

        output.push_str(&format!(
            "<div class=\"notion-page\" data-page=\"{}\" style=\"width: {}px; height: {}px; padding: {}px {}px; font-family: {}; font-size: {}px; line-height: {}; text-align: {}; overflow: hidden; position: relative;\">\n",
            page.number,
            g.width,
            g.height,
            g.vertical_padding(),
            g.horizontal_padding(),
            encode_double_quoted_attribute(g.font_stack()),
            g.font_size,
            g.line_height,
            g.text_align.as_css(),
        ));
        output.push_str("<div class=\"notion-content\">\n");
        for block in &page.blocks {
            self.render_block(&mut output, block);
        }
        output.push_str("</div>\n</div>\n");

        output
    }

    fn render_block(&self, output: &mut String, block: &Block) {
        let body = self.geometry.font_size;
        match block {
            Block::Heading { level, text } => {
                let tag = heading_tag(*level);
                let size = self.geometry.heading_font_size(*level);
                output.push_str(&format!("<{} style=\"font-size: {}px;\">", tag, size));
                render_styled(output, text);
                output.push_str(&format!("</{}>\n", tag));
            }
            Block::Paragraph { text } => {
                output.push_str(&format!("<p style=\"font-size: {}px;\">", body));
                render_styled(output, text);
                output.push_str("</p>\n");
            }
            Block::UnorderedList { items } => self.render_list(output, "ul", items),
            Block::OrderedList { items } => self.render_list(output, "ol", items),
            Block::Quote { text } => {
                output.push_str(&format!("<blockquote style=\"font-size: {}px;\">", body));
                render_styled(output, text);
                output.push_str("</blockquote>\n");
            }
            Block::CodeBlock { content } => {
                output.push_str(&format!(
                    "<pre><code style=\"font-size: {}px;\">{}</code></pre>\n",
                    body,
                    encode_text(content)
                ));
            }
        }
    }

    fn render_list(&self, output: &mut String, tag: &str, items: &[StyledText]) {
        output.push_str(&format!("<{}>\n", tag));
        for item in items {
            output.push_str(&format!(
                "<li style=\"font-size: {}px;\">",
                self.geometry.font_size
            ));
            render_styled(output, item);
            output.push_str("</li>\n");
        }
        output.push_str(&format!("</{}>\n", tag));
    }
}

fn heading_tag(level: HeadingLevel) -> &'static str {
    match level {
        HeadingLevel::H1 => "h1",
        HeadingLevel::H2 => "h2",
        HeadingLevel::H3 => "h3",
    }
}

fn render_styled(output: &mut String, text: &StyledText) {
    for run in text.runs() {
        render_run(output, run);
    }
}

fn render_run(output: &mut String, run: &TextRun) {
    let style = run.style;
    let classes = [
        (style.bold, "bold"),
        (style.italic, "italic"),
        (style.strikethrough, "strikethrough"),
        (style.underline, "underline"),
    ];

    let mut open = 0;
    for (_, class) in classes.iter().filter(|(on, _)| *on) {
        output.push_str(&format!("<span class=\"{}\">", class));
        open += 1;
    }

    if style.code {
        output.push_str("<code>");
        output.push_str(&encode_text(&run.text));
        output.push_str("</code>");
    } else {
        output.push_str(&encode_text(&run.text));
    }

    for _ in 0..open {
        output.push_str("</span>");
    }
}
