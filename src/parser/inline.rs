//! Inline emphasis resolution.
//!
//! Markers are rewritten in a fixed order: code spans are lifted out first so
//! no later rule can match inside them, then bold, italic, strikethrough,
//! underline and links, and finally the code spans are put back. Each rule
//! wraps its match in private-use sentinel tags; the tagged string is then
//! folded into [`StyledText`] runs.

use regex::{Captures, Regex};

use crate::model::{StyledText, TextRun, TextStyle};

const OPEN: char = '\u{E000}';
const CLOSE: char = '\u{E001}';
const CODE_START: char = '\u{E002}';
const CODE_END: char = '\u{E003}';

const TAG_BOLD: char = 'b';
const TAG_ITALIC: char = 'i';
const TAG_STRIKE: char = 's';
const TAG_UNDERLINE: char = 'u';

/// Resolve inline markers in `raw` with a fresh [`InlineStyler`].
pub fn style_inline(raw: &str) -> StyledText {
    InlineStyler::new().style(raw)
}

/// Rewrites markdown-like emphasis markers into styled runs.
///
/// Markers without a matching close are left as literal characters.
#[derive(Debug, Clone)]
pub struct InlineStyler {
    code_span: Regex,
    bold_star: Regex,
    bold_underscore: Regex,
    strikethrough: Regex,
    underline: Regex,
    link: Regex,
}

impl InlineStyler {
    /// Create a styler with its marker patterns compiled.
    pub fn new() -> Self {
        Self {
            code_span: pattern(r"`([^`]+)`"),
            bold_star: pattern(r"\*\*([^*]+?)\*\*"),
            bold_underscore: pattern(r"__([^_]+?)__"),
            strikethrough: pattern(r"~~([^~]+?)~~"),
            underline: pattern(r"\+\+([^+]+?)\+\+"),
            link: pattern(r"\[([^\]]+?)\]\([^)]+?\)"),
        }
    }

    /// Resolve all inline markers in `raw`.
    pub fn style(&self, raw: &str) -> StyledText {
        // Sentinels in the input would be mistaken for tags.
        let text: String = raw.chars().filter(|c| !is_sentinel(*c)).collect();

        let mut code_spans: Vec<String> = Vec::new();
        let text = self
            .code_span
            .replace_all(&text, |caps: &Captures<'_>| {
                code_spans.push(caps[1].to_string());
                format!("{}{}{}", CODE_START, code_spans.len() - 1, CODE_END)
            })
            .into_owned();

        let text = self.bold_star.replace_all(&text, tagged(TAG_BOLD));
        let text = self.bold_underscore.replace_all(&text, tagged(TAG_BOLD));
        let text = wrap_lone_markers(&text, '*', TAG_ITALIC);
        let text = wrap_lone_markers(&text, '_', TAG_ITALIC);
        let text = self.strikethrough.replace_all(&text, tagged(TAG_STRIKE));
        let text = self.underline.replace_all(&text, tagged(TAG_UNDERLINE));
        let text = self.link.replace_all(&text, "${1}");

        into_runs(&text, &code_spans)
    }
}

impl Default for InlineStyler {
    fn default() -> Self {
        Self::new()
    }
}

fn pattern(re: &str) -> Regex {
    Regex::new(re).expect("inline marker pattern is valid")
}

fn is_sentinel(c: char) -> bool {
    matches!(c, OPEN | CLOSE | CODE_START | CODE_END)
}

/// Replacement template wrapping capture group 1 in sentinel tags.
fn tagged(tag: char) -> String {
    format!("{OPEN}{tag}${{1}}{CLOSE}{tag}")
}

/// Wrap `marker text marker` pairs where neither marker touches another
/// marker of the same kind. The text may not contain the marker or a newline.
fn wrap_lone_markers(text: &str, marker: char, tag: char) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    let mut i = 0;

    while i < chars.len() {
        if chars[i] == marker && (i == 0 || chars[i - 1] != marker) {
            let mut j = i + 1;
            while j < chars.len() && chars[j] != marker && chars[j] != '\n' {
                j += 1;
            }
            let closed = j > i + 1
                && j < chars.len()
                && chars[j] == marker
                && chars.get(j + 1) != Some(&marker);
            if closed {
                out.push(OPEN);
                out.push(tag);
                out.extend(&chars[i + 1..j]);
                out.push(CLOSE);
                out.push(tag);
                i = j + 1;
                continue;
            }
        }
        out.push(chars[i]);
        i += 1;
    }

    out
}

/// Nesting depth per style flag; a flag is on while its depth is non-zero.
#[derive(Debug, Default)]
struct Depths {
    bold: u32,
    italic: u32,
    strikethrough: u32,
    underline: u32,
}

impl Depths {
    fn apply(&mut self, tag: char, open: bool) {
        let depth = match tag {
            TAG_BOLD => &mut self.bold,
            TAG_ITALIC => &mut self.italic,
            TAG_STRIKE => &mut self.strikethrough,
            TAG_UNDERLINE => &mut self.underline,
            _ => return,
        };
        *depth = if open {
            depth.saturating_add(1)
        } else {
            depth.saturating_sub(1)
        };
    }

    fn style(&self) -> TextStyle {
        TextStyle {
            bold: self.bold > 0,
            italic: self.italic > 0,
            strikethrough: self.strikethrough > 0,
            underline: self.underline > 0,
            code: false,
        }
    }
}

fn into_runs(tagged: &str, code_spans: &[String]) -> StyledText {
    let mut styled = StyledText::new();
    let mut depths = Depths::default();
    let mut buf = String::new();
    let mut chars = tagged.chars();

    while let Some(c) = chars.next() {
        match c {
            OPEN | CLOSE => {
                styled.push(TextRun::styled(std::mem::take(&mut buf), depths.style()));
                if let Some(tag) = chars.next() {
                    depths.apply(tag, c == OPEN);
                }
            }
            CODE_START => {
                styled.push(TextRun::styled(std::mem::take(&mut buf), depths.style()));
                let index: String = chars.by_ref().take_while(|&c| c != CODE_END).collect();
                if let Some(code) = index.parse::<usize>().ok().and_then(|i| code_spans.get(i)) {
                    let style = TextStyle {
                        code: true,
                        ..depths.style()
                    };
                    styled.push(TextRun::styled(code.clone(), style));
                }
            }
            _ => buf.push(c),
        }
    }
    styled.push(TextRun::styled(buf, depths.style()));

    styled
}
