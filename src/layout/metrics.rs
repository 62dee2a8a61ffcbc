//! Character classification and text width estimation.
//!
//! Widths come from a pluggable [`FontMetricsProvider`]; [`TextMetrics`]
//! layers the character-class rules and greedy line wrapping on top of it.
//! The results are estimates for page-break decisions, not glyph placement.

use super::fonts;

/// Glyph used as the width reference for emoji.
const REFERENCE_CJK: char = '中';

/// How many characters the wrap loop looks back for a space.
const SPACE_LOOKBACK: usize = 20;

/// Line height multiplier used by [`TextMetrics::measure`].
const MEASURE_LINE_HEIGHT: f32 = 1.2;

/// Width class of a character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharClass {
    /// Emoji and pictographs, rendered double width
    Emoji,
    /// CJK ideographs, CJK punctuation and fullwidth forms
    Cjk,
    /// Horizontal tab
    Tab,
    /// Line feed
    Newline,
    /// Everything else, treated as Latin
    Other,
}

impl CharClass {
    /// Classify a character. Emoji ranges are checked before CJK ranges.
    pub fn of(ch: char) -> Self {
        match ch as u32 {
            0x1F600..=0x1F64F
            | 0x1F300..=0x1F5FF
            | 0x1F680..=0x1F6FF
            | 0x2600..=0x26FF
            | 0x2700..=0x27BF => CharClass::Emoji,
            0x4E00..=0x9FFF
            | 0x3400..=0x4DBF
            | 0x20000..=0x2A6DF
            | 0x3000..=0x303F
            | 0xFF00..=0xFFEF => CharClass::Cjk,
            0x09 => CharClass::Tab,
            0x0A => CharClass::Newline,
            _ => CharClass::Other,
        }
    }
}

/// Source of raw character widths.
///
/// Implementations must be deterministic for a given `(ch, font_size,
/// font_family)` and monotonic in `font_size`.
pub trait FontMetricsProvider: Send + Sync {
    /// Advance width of `ch` in pixels.
    fn measure_char(&self, ch: char, font_size: f32, font_family: &str) -> f32;

    /// Advance width of a string in pixels.
    fn measure_str(&self, s: &str, font_size: f32, font_family: &str) -> f32 {
        s.chars()
            .map(|ch| self.measure_char(ch, font_size, font_family))
            .sum()
    }
}

impl<P: FontMetricsProvider + ?Sized> FontMetricsProvider for Box<P> {
    fn measure_char(&self, ch: char, font_size: f32, font_family: &str) -> f32 {
        (**self).measure_char(ch, font_size, font_family)
    }
}

impl<P: FontMetricsProvider + ?Sized> FontMetricsProvider for &P {
    fn measure_char(&self, ch: char, font_size: f32, font_family: &str) -> f32 {
        (**self).measure_char(ch, font_size, font_family)
    }
}

/// Approximate widths from a static em table.
///
/// Latin glyphs follow Helvetica proportions, CJK and fullwidth glyphs are
/// one em, and monospace families use 0.6 em for every non-CJK glyph.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedWidthMetrics;

impl FixedWidthMetrics {
    /// Create the approximation table provider.
    pub fn new() -> Self {
        Self
    }

    /// Width of `ch` in em units.
    pub fn em_width(ch: char, monospace: bool) -> f32 {
        match CharClass::of(ch) {
            CharClass::Cjk | CharClass::Emoji => 1.0,
            _ if monospace => 0.6,
            _ => latin_em_width(ch),
        }
    }
}

impl FontMetricsProvider for FixedWidthMetrics {
    fn measure_char(&self, ch: char, font_size: f32, font_family: &str) -> f32 {
        Self::em_width(ch, fonts::is_monospace(font_family)) * font_size
    }
}

#[rustfmt::skip]
fn latin_em_width(ch: char) -> f32 {
    match ch {
        ' ' => 0.278,
        'I' | 'J' => 0.278,                     // narrow uppercase
        'M' | 'W' => 0.833,                     // wide uppercase
        'A'..='Z' => 0.667,
        'f' | 'i' | 'j' | 'l' | 't' => 0.278,   // narrow lowercase
        'm' | 'w' => 0.833,                     // wide lowercase
        'a'..='z' => 0.556,
        '0'..='9' => 0.556,
        '!'..='/' | ':'..='@' | '['..='`' | '{'..='~' => 0.333,
        _ => 0.556,
    }
}

/// Unwrapped extent of a text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextExtent {
    /// Width of the widest line
    pub width: f32,
    /// Line count × font size × 1.2
    pub height: f32,
    /// Number of newline-separated lines
    pub lines: usize,
}

/// Character and line width estimation over a [`FontMetricsProvider`].
#[derive(Debug, Clone, Default)]
pub struct TextMetrics<P = FixedWidthMetrics> {
    provider: P,
}

impl TextMetrics<FixedWidthMetrics> {
    /// Create metrics backed by the approximation table.
    pub fn new() -> Self {
        Self::with_provider(FixedWidthMetrics)
    }
}

impl<P: FontMetricsProvider> TextMetrics<P> {
    /// Create metrics backed by `provider`.
    pub fn with_provider(provider: P) -> Self {
        Self { provider }
    }

    /// The underlying width provider.
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Estimated render width of one character.
    pub fn width_of(&self, ch: char, font_size: f32, font_family: &str) -> f32 {
        match CharClass::of(ch) {
            CharClass::Emoji => {
                self.provider
                    .measure_char(REFERENCE_CJK, font_size, font_family)
                    * 2.0
            }
            CharClass::Tab => self.provider.measure_str("    ", font_size, font_family),
            CharClass::Newline => 0.0,
            CharClass::Cjk | CharClass::Other => {
                self.provider.measure_char(ch, font_size, font_family)
            }
        }
    }

    /// Number of lines `text` wraps to within `max_width`. Always at least 1.
    ///
    /// Each newline-separated paragraph is wrapped independently; a blank
    /// paragraph counts as one line. A line breaks at the first character
    /// that would overflow it. An overflowing space is dropped, any other
    /// character starts the next line.
    pub fn line_count(
        &self,
        text: &str,
        max_width: f32,
        font_size: f32,
        font_family: &str,
    ) -> usize {
        if text.trim().is_empty() {
            return 1;
        }

        text.split('\n')
            .map(|paragraph| {
                if paragraph.trim().is_empty() {
                    1
                } else {
                    self.wrapped_lines(paragraph, max_width, font_size, font_family)
                }
            })
            .sum()
    }

    fn wrapped_lines(
        &self,
        paragraph: &str,
        max_width: f32,
        font_size: f32,
        font_family: &str,
    ) -> usize {
        let chars: Vec<char> = paragraph.chars().collect();
        let mut lines = 1;
        let mut current = 0.0_f32;

        for (i, &ch) in chars.iter().enumerate() {
            let width = self.width_of(ch, font_size, font_family);
            if current + width <= max_width {
                current += width;
                continue;
            }

            lines += 1;
            if ch == ' ' {
                current = 0.0;
                continue;
            }

            // The break stays at the overflowing character; the space search
            // only feeds the trace output.
            if log::log_enabled!(log::Level::Trace) {
                let space_nearby = chars[..i]
                    .iter()
                    .rev()
                    .take(SPACE_LOOKBACK + 1)
                    .any(|&c| c == ' ');
                log::trace!(
                    "Hard break before char {} ({:?}), space within lookback: {}",
                    i,
                    ch,
                    space_nearby
                );
            }
            current = width;
        }

        lines
    }

    /// Unwrapped width and height of `text`.
    pub fn measure(&self, text: &str, font_size: f32, font_family: &str) -> TextExtent {
        let mut width = 0.0_f32;
        let mut lines = 0;

        for line in text.split('\n') {
            lines += 1;
            if line.trim().is_empty() {
                continue;
            }
            let line_width: f32 = line
                .chars()
                .map(|ch| self.width_of(ch, font_size, font_family))
                .sum();
            width = width.max(line_width);
        }

        TextExtent {
            width,
            height: lines as f32 * font_size * MEASURE_LINE_HEIGHT,
            lines,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Every glyph is exactly `font_size` wide.
    struct UnitMetrics;

    impl FontMetricsProvider for UnitMetrics {
        fn measure_char(&self, _ch: char, font_size: f32, _font_family: &str) -> f32 {
            font_size
        }
    }

    fn unit() -> TextMetrics<UnitMetrics> {
        TextMetrics::with_provider(UnitMetrics)
    }

    #[test]
    fn test_char_classes() {
        assert_eq!(CharClass::of('😀'), CharClass::Emoji);
        assert_eq!(CharClass::of('🚀'), CharClass::Emoji);
        assert_eq!(CharClass::of('☀'), CharClass::Emoji);
        assert_eq!(CharClass::of('中'), CharClass::Cjk);
        assert_eq!(CharClass::of('。'), CharClass::Cjk);
        assert_eq!(CharClass::of('Ａ'), CharClass::Cjk);
        assert_eq!(CharClass::of('\u{20000}'), CharClass::Cjk);
        assert_eq!(CharClass::of('\t'), CharClass::Tab);
        assert_eq!(CharClass::of('\n'), CharClass::Newline);
        assert_eq!(CharClass::of('a'), CharClass::Other);
        assert_eq!(CharClass::of('é'), CharClass::Other);
    }

    #[test]
    fn test_width_rules() {
        let metrics = TextMetrics::new();
        let cjk = metrics.width_of('中', 20.0, "Arial");
        assert!((cjk - 20.0).abs() < 1e-4);
        assert!((metrics.width_of('😀', 20.0, "Arial") - 2.0 * cjk).abs() < 1e-4);

        let space = metrics.width_of(' ', 20.0, "Arial");
        assert!((metrics.width_of('\t', 20.0, "Arial") - 4.0 * space).abs() < 1e-4);
        assert_eq!(metrics.width_of('\n', 20.0, "Arial"), 0.0);
    }

    #[test]
    fn test_width_is_monotonic_in_size() {
        let metrics = TextMetrics::new();
        for ch in ['a', 'W', '中', '😀', '\t', ' '] {
            assert!(metrics.width_of(ch, 12.0, "黑体") < metrics.width_of(ch, 24.0, "黑体"));
        }
    }

    #[test]
    fn test_monospace_table() {
        let metrics = TextMetrics::new();
        let i = metrics.width_of('i', 10.0, "Courier New");
        let m = metrics.width_of('m', 10.0, "Courier New");
        assert!((i - m).abs() < 1e-4);
        assert!(metrics.width_of('i', 10.0, "Arial") < metrics.width_of('m', 10.0, "Arial"));
    }

    #[test]
    fn test_line_count_empty_is_one() {
        assert_eq!(unit().line_count("", 100.0, 10.0, "x"), 1);
        assert_eq!(unit().line_count("   ", 100.0, 10.0, "x"), 1);
    }

    #[test]
    fn test_line_count_fits_on_one_line() {
        assert_eq!(unit().line_count("abcde", 50.0, 10.0, "x"), 1);
    }

    #[test]
    fn test_line_count_breaks_at_overflowing_char() {
        // 10 chars of width 10 in a 45-wide line: 4 + 4 + 2.
        assert_eq!(unit().line_count("abcdefghij", 45.0, 10.0, "x"), 3);
    }

    #[test]
    fn test_overflowing_space_is_dropped() {
        // "abcd" fills the line, the space overflows and is dropped,
        // "efgh" fills the second line exactly.
        assert_eq!(unit().line_count("abcd efgh", 40.0, 10.0, "x"), 2);
    }

    #[test]
    fn test_break_ignores_earlier_space() {
        // A word-wrapping layout would move "cdef" down whole; here the break
        // lands exactly at the overflowing "e".
        assert_eq!(unit().line_count("ab cdef", 40.0, 10.0, "x"), 2);
        assert_eq!(unit().line_count("ab cdefgh", 40.0, 10.0, "x"), 3);
    }

    #[test]
    fn test_newlines_and_blank_paragraphs() {
        assert_eq!(unit().line_count("a\n\nb", 100.0, 10.0, "x"), 3);
        assert_eq!(unit().line_count("abcdef\nab", 40.0, 10.0, "x"), 3);
    }

    #[test]
    fn test_nonpositive_width_breaks_every_char() {
        assert_eq!(unit().line_count("abc", 0.0, 10.0, "x"), 4);
    }

    #[test]
    fn test_measure_extent() {
        let extent = unit().measure("ab\nabcd\n", 10.0, "x");
        assert_eq!(extent.lines, 3);
        assert!((extent.width - 40.0).abs() < 1e-4);
        assert!((extent.height - 36.0).abs() < 1e-4);
    }
}
