//! Glyph advances from a TrueType/OpenType font.

use std::collections::HashMap;
use std::path::Path;

use ttf_parser::Face;

use super::metrics::{FixedWidthMetrics, FontMetricsProvider};
use crate::error::{Error, Result};

/// Widths read from a font file's horizontal metrics.
///
/// Advances for every Unicode codepoint in the font's cmap are read once at
/// load time. Characters the font does not cover fall back to
/// [`FixedWidthMetrics`].
#[derive(Debug, Clone)]
pub struct TtfMetrics {
    family: Option<String>,
    /// Advance width per character, in em units
    advances: HashMap<char, f32>,
}

impl TtfMetrics {
    /// Load metrics from font data. For collections the first face is used.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let face = Face::parse(data, 0).map_err(|e| Error::FontLoad(e.to_string()))?;
        let units_per_em = face.units_per_em() as f32;
        if units_per_em <= 0.0 {
            return Err(Error::FontLoad("font has no units per em".to_string()));
        }

        let mut advances = HashMap::new();
        if let Some(cmap) = face.tables().cmap {
            for subtable in cmap.subtables {
                if !subtable.is_unicode() {
                    continue;
                }
                subtable.codepoints(|cp| {
                    let Some(ch) = char::from_u32(cp) else {
                        return;
                    };
                    if let Some(advance) = subtable
                        .glyph_index(cp)
                        .and_then(|gid| face.glyph_hor_advance(gid))
                    {
                        advances.insert(ch, advance as f32 / units_per_em);
                    }
                });
            }
        }

        let family = font_family_name(&face);
        log::debug!(
            "Loaded font {:?} with {} mapped characters",
            family.as_deref().unwrap_or("<unnamed>"),
            advances.len()
        );

        Ok(Self { family, advances })
    }

    /// Load metrics from a font file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let data = std::fs::read(path.as_ref())?;
        Self::from_bytes(&data)
    }

    /// Family name recorded in the font, if any.
    pub fn family(&self) -> Option<&str> {
        self.family.as_deref()
    }
}

impl FontMetricsProvider for TtfMetrics {
    fn measure_char(&self, ch: char, font_size: f32, font_family: &str) -> f32 {
        match self.advances.get(&ch) {
            Some(em) => em * font_size,
            None => FixedWidthMetrics.measure_char(ch, font_size, font_family),
        }
    }
}

fn font_family_name(face: &Face<'_>) -> Option<String> {
    face.names()
        .into_iter()
        .filter(|name| name.name_id == ttf_parser::name_id::FAMILY && name.is_unicode())
        .find_map(|name| name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_garbage_is_font_load_error() {
        let err = TtfMetrics::from_bytes(b"definitely not a font").unwrap_err();
        assert!(matches!(err, Error::FontLoad(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = TtfMetrics::from_file("/nonexistent/font.ttf").unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
