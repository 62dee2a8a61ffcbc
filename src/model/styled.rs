//! Style-resolved inline text.

use serde::{Deserialize, Serialize};

/// Text with its inline emphasis resolved into styled runs.
///
/// The concatenation of all run texts ([`StyledText::plain_text`]) is the
/// character sequence used for width estimation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StyledText {
    runs: Vec<TextRun>,
}

impl StyledText {
    /// Create an empty styled text.
    pub fn new() -> Self {
        Self { runs: Vec::new() }
    }

    /// Create a styled text holding a single unstyled run.
    pub fn plain(text: impl Into<String>) -> Self {
        let mut styled = Self::new();
        styled.push(TextRun::new(text));
        styled
    }

    /// Append a run, merging it into the previous run when the styles match.
    ///
    /// Empty runs are dropped.
    pub fn push(&mut self, run: TextRun) {
        if run.is_empty() {
            return;
        }
        match self.runs.last_mut() {
            Some(last) if last.style == run.style => last.text.push_str(&run.text),
            _ => self.runs.push(run),
        }
    }

    /// The styled runs in order.
    pub fn runs(&self) -> &[TextRun] {
        &self.runs
    }

    /// Get the text with all style annotations stripped.
    pub fn plain_text(&self) -> String {
        self.runs.iter().map(|run| run.text.as_str()).collect()
    }

    /// Check if there are no runs at all.
    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    /// Check if the text is empty or whitespace only.
    pub fn is_blank(&self) -> bool {
        self.runs.iter().all(|run| run.text.trim().is_empty())
    }
}

impl From<&str> for StyledText {
    fn from(text: &str) -> Self {
        Self::plain(text)
    }
}

impl FromIterator<TextRun> for StyledText {
    fn from_iter<I: IntoIterator<Item = TextRun>>(iter: I) -> Self {
        let mut styled = Self::new();
        for run in iter {
            styled.push(run);
        }
        styled
    }
}

/// A run of text with consistent styling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextRun {
    /// The text content
    pub text: String,

    /// Text styling
    #[serde(default, skip_serializing_if = "TextStyle::is_plain")]
    pub style: TextStyle,
}

impl TextRun {
    /// Create a new text run with default style.
    pub fn new(text: impl Into<String>) -> Self {
        Self::styled(text, TextStyle::default())
    }

    /// Create a text run with the given style.
    pub fn styled(text: impl Into<String>, style: TextStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }

    /// Create a bold text run.
    pub fn bold(text: impl Into<String>) -> Self {
        Self::styled(
            text,
            TextStyle {
                bold: true,
                ..Default::default()
            },
        )
    }

    /// Create an italic text run.
    pub fn italic(text: impl Into<String>) -> Self {
        Self::styled(
            text,
            TextStyle {
                italic: true,
                ..Default::default()
            },
        )
    }

    /// Create an inline code run.
    pub fn code(text: impl Into<String>) -> Self {
        Self::styled(
            text,
            TextStyle {
                code: true,
                ..Default::default()
            },
        )
    }

    /// Check if this run is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Inline styling flags. Flags are independent and may overlap.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct TextStyle {
    /// Bold text
    pub bold: bool,

    /// Italic text
    pub italic: bool,

    /// Strikethrough text
    pub strikethrough: bool,

    /// Underlined text
    pub underline: bool,

    /// Inline code
    pub code: bool,
}

impl TextStyle {
    /// Check if no style flag is set.
    pub fn is_plain(&self) -> bool {
        *self == TextStyle::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_merges_matching_styles() {
        let mut text = StyledText::new();
        text.push(TextRun::new("Hello"));
        text.push(TextRun::new(", "));
        text.push(TextRun::bold("world"));
        text.push(TextRun::new(""));

        assert_eq!(text.runs().len(), 2);
        assert_eq!(text.runs()[0].text, "Hello, ");
        assert!(text.runs()[1].style.bold);
        assert_eq!(text.plain_text(), "Hello, world");
    }

    #[test]
    fn test_blank_detection() {
        assert!(StyledText::new().is_blank());
        assert!(StyledText::plain("  \n ").is_blank());
        assert!(!StyledText::plain(" x ").is_blank());
    }

    #[test]
    fn test_plain_style_is_skipped_in_json() {
        let text: StyledText = "plain".into();
        let json = serde_json::to_string(&text).unwrap();
        assert_eq!(json, r#"[{"text":"plain"}]"#);

        let text: StyledText = std::iter::once(TextRun::code("x")).collect();
        let json = serde_json::to_string(&text).unwrap();
        assert!(json.contains("\"code\":true"));
    }
}
