//! Page geometry configuration.

use serde::{Deserialize, Serialize};

use super::fonts;
use crate::error::{Error, Result};
use crate::model::HeadingLevel;

/// Pixels per ratio unit used by [`PageGeometry::with_ratio`].
const RATIO_SCALE: u32 = 200;

/// Canvas dimensions, padding and typography for pagination.
///
/// Every field has a default, so a partial JSON object is a valid
/// configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageGeometry {
    /// Canvas width in pixels
    pub width: u32,

    /// Canvas height in pixels
    pub height: u32,

    /// Left/right padding as a percentage of the width
    pub horizontal_padding_pct: f32,

    /// Top/bottom padding as a percentage of the height
    pub vertical_padding_pct: f32,

    /// Body font size in pixels
    pub font_size: f32,

    /// Line height multiplier
    pub line_height: f32,

    /// Logical font family name, resolved through the alias table
    pub font_family: String,

    /// Text alignment, passed through to rendering
    pub text_align: TextAlign,
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self {
            width: 600,
            height: 800,
            horizontal_padding_pct: 10.0,
            vertical_padding_pct: 8.0,
            font_size: FontSizePreset::Medium.size(),
            line_height: 1.6,
            font_family: "黑体".to_string(),
            text_align: TextAlign::Left,
        }
    }
}

impl PageGeometry {
    /// Create a geometry with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a geometry from a JSON object. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Set the canvas size in pixels.
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set the canvas size from an aspect ratio such as `"3:4"`.
    ///
    /// Each ratio unit is 200 pixels, so `"3:4"` gives 600×800.
    pub fn with_ratio(self, ratio: &str) -> Result<Self> {
        let (w, h) = parse_ratio(ratio)?;
        Ok(self.with_size(w * RATIO_SCALE, h * RATIO_SCALE))
    }

    /// Set the padding percentages.
    pub fn with_padding(mut self, horizontal_pct: f32, vertical_pct: f32) -> Self {
        self.horizontal_padding_pct = horizontal_pct;
        self.vertical_padding_pct = vertical_pct;
        self
    }

    /// Set the body font size.
    pub fn with_font_size(mut self, size: f32) -> Self {
        self.font_size = size;
        self
    }

    /// Set the body font size from a preset.
    pub fn with_font_size_preset(self, preset: FontSizePreset) -> Self {
        self.with_font_size(preset.size())
    }

    /// Set the line height multiplier.
    pub fn with_line_height(mut self, line_height: f32) -> Self {
        self.line_height = line_height;
        self
    }

    /// Set the logical font family.
    pub fn with_font_family(mut self, family: impl Into<String>) -> Self {
        self.font_family = family.into();
        self
    }

    /// Set the text alignment.
    pub fn with_text_align(mut self, align: TextAlign) -> Self {
        self.text_align = align;
        self
    }

    /// Left/right padding in pixels.
    pub fn horizontal_padding(&self) -> f32 {
        (self.width as f32 * self.horizontal_padding_pct / 100.0).round()
    }

    /// Top/bottom padding in pixels.
    pub fn vertical_padding(&self) -> f32 {
        (self.height as f32 * self.vertical_padding_pct / 100.0).round()
    }

    /// Content width inside the padding. May be negative.
    pub fn available_width(&self) -> f32 {
        self.width as f32 - 2.0 * self.horizontal_padding()
    }

    /// Content height inside the padding. May be negative.
    pub fn available_height(&self) -> f32 {
        self.height as f32 - 2.0 * self.vertical_padding()
    }

    /// Check whether any content can be laid out at all.
    pub fn is_degenerate(&self) -> bool {
        !(self.available_width() > 0.0 && self.available_height() > 0.0)
    }

    /// Rounded font size for a heading level.
    pub fn heading_font_size(&self, level: HeadingLevel) -> f32 {
        (self.font_size * level.scale()).round()
    }

    /// Height of one body text line.
    pub fn line_px(&self) -> f32 {
        self.font_size * self.line_height
    }

    /// Resolved font stack for the configured family.
    pub fn font_stack(&self) -> &'static str {
        fonts::font_stack(&self.font_family)
    }
}

fn parse_ratio(ratio: &str) -> Result<(u32, u32)> {
    let invalid = || Error::InvalidRatio(ratio.to_string());

    let (w, h) = ratio.split_once(':').ok_or_else(invalid)?;
    let w: u32 = w.trim().parse().map_err(|_| invalid())?;
    let h: u32 = h.trim().parse().map_err(|_| invalid())?;
    if w == 0 || h == 0 {
        return Err(invalid());
    }
    Ok((w, h))
}

/// Horizontal text alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
    Justify,
}

impl TextAlign {
    /// CSS `text-align` keyword.
    pub fn as_css(self) -> &'static str {
        match self {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
            TextAlign::Right => "right",
            TextAlign::Justify => "justify",
        }
    }
}

impl std::str::FromStr for TextAlign {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "left" => Ok(TextAlign::Left),
            "center" => Ok(TextAlign::Center),
            "right" => Ok(TextAlign::Right),
            "justify" => Ok(TextAlign::Justify),
            other => Err(Error::Config(format!("unknown text alignment: {}", other))),
        }
    }
}

/// Body font size presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FontSizePreset {
    Small,
    #[default]
    Medium,
    Large,
}

impl FontSizePreset {
    /// Body font size in pixels.
    pub fn size(self) -> f32 {
        match self {
            FontSizePreset::Small => 14.0,
            FontSizePreset::Medium => 16.0,
            FontSizePreset::Large => 18.0,
        }
    }
}

impl std::str::FromStr for FontSizePreset {
    type Err = Error;

    /// Unknown names fall back to [`FontSizePreset::Medium`].
    fn from_str(s: &str) -> Result<Self> {
        Ok(match s.to_ascii_lowercase().as_str() {
            "small" => FontSizePreset::Small,
            "large" => FontSizePreset::Large,
            _ => FontSizePreset::Medium,
        })
    }
}
