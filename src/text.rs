//! Label rasterization: a string becomes an RGBA bitmap sized to its
//! measured metrics, ready for texture upload.
//!
//! fontdue does the glyph work; we advance a pen along one line, blit
//! each glyph against the common baseline, fill the configured color,
//! and use glyph coverage as alpha. The bitmap is padded so the soft
//! edge never clips.

use fontdue::{Font, FontSettings};

use crate::error::GalleriaError;

/// Padding added around the measured text, in pixels (total per axis).
const PADDING_PX: u32 = 20;
/// Line height as a multiple of the font size.
const LINE_HEIGHT: f32 = 1.2;

/// A rasterized label: tightly-packed RGBA pixels, rows top-first.
pub struct RasterizedLabel {
    /// RGBA8 pixel data, `width × height × 4` bytes.
    pub rgba: Vec<u8>,
    /// Bitmap width in pixels.
    pub width: u32,
    /// Bitmap height in pixels.
    pub height: u32,
}

/// Renders strings to bitmaps with one font, size, and color.
pub struct TextRasterizer {
    font: Font,
    size_px: f32,
    color: [f32; 4],
}

impl TextRasterizer {
    /// Parse `font_bytes` (TTF/OTF) and fix the size and fill color.
    ///
    /// # Errors
    ///
    /// Returns [`GalleriaError::FontParse`] when fontdue rejects the
    /// data.
    pub fn new(
        font_bytes: &[u8],
        size_px: f32,
        color: [f32; 4],
    ) -> Result<Self, GalleriaError> {
        let font = Font::from_bytes(font_bytes, FontSettings::default())
            .map_err(|e| GalleriaError::FontParse(e.to_owned()))?;
        Ok(Self {
            font,
            size_px,
            color,
        })
    }

    /// Measured advance width of one line, in pixels.
    fn measure(&self, text: &str) -> f32 {
        text.chars()
            .map(|ch| self.font.metrics(ch, self.size_px).advance_width)
            .sum()
    }

    /// Rasterize one line of text, centered in a padded bitmap.
    #[must_use]
    pub fn rasterize(&self, text: &str) -> RasterizedLabel {
        let text_width = self.measure(text).ceil() as u32;
        let (width, height) = padded_bitmap_size(text_width, self.size_px);

        // Glyph bitmaps hang off a shared baseline; fontdue's ascent is
        // measured upward from it.
        let ascent = self
            .font
            .horizontal_line_metrics(self.size_px)
            .map_or(self.size_px * 0.8, |m| m.ascent);
        let baseline =
            (height as f32 / 2.0 - self.size_px * LINE_HEIGHT / 2.0 + ascent)
                .round() as i32;

        let mut rgba = vec![0u8; (width * height * 4) as usize];
        let fill = [
            (self.color[0].clamp(0.0, 1.0) * 255.0) as u8,
            (self.color[1].clamp(0.0, 1.0) * 255.0) as u8,
            (self.color[2].clamp(0.0, 1.0) * 255.0) as u8,
        ];
        let color_alpha = self.color[3].clamp(0.0, 1.0);

        let mut pen_x = (width.saturating_sub(text_width)) as f32 / 2.0;
        for ch in text.chars() {
            let (metrics, coverage) = self.font.rasterize(ch, self.size_px);
            let glyph_left = (pen_x + metrics.xmin as f32).round() as i32;
            let glyph_top =
                baseline - metrics.ymin - metrics.height as i32;

            for row in 0..metrics.height {
                for col in 0..metrics.width {
                    let x = glyph_left + col as i32;
                    let y = glyph_top + row as i32;
                    if x < 0
                        || y < 0
                        || x >= width as i32
                        || y >= height as i32
                    {
                        continue;
                    }
                    let src = coverage[row * metrics.width + col];
                    let dst = ((y as u32 * width + x as u32) * 4) as usize;
                    let alpha = (f32::from(src) * color_alpha) as u8;
                    // Glyph boxes can overlap; keep the darker coverage.
                    if alpha > rgba[dst + 3] {
                        rgba[dst] = fill[0];
                        rgba[dst + 1] = fill[1];
                        rgba[dst + 2] = fill[2];
                        rgba[dst + 3] = alpha;
                    }
                }
            }
            pen_x += metrics.advance_width;
        }

        RasterizedLabel {
            rgba,
            width,
            height,
        }
    }
}

/// Bitmap size for a measured text width at a given font size: measured
/// width plus padding, by `size·1.2` line height plus padding.
fn padded_bitmap_size(text_width: u32, size_px: f32) -> (u32, u32) {
    let height = (size_px * LINE_HEIGHT).ceil() as u32 + PADDING_PX;
    (text_width.max(1) + PADDING_PX, height.max(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bitmap_size_adds_fixed_padding() {
        let (w, h) = padded_bitmap_size(140, 30.0);
        assert_eq!(w, 160);
        assert_eq!(h, 36 + 20);
    }

    #[test]
    fn bitmap_size_never_degenerates() {
        let (w, h) = padded_bitmap_size(0, 0.0);
        assert!(w > 0);
        assert!(h > 0);
    }

    #[test]
    fn height_tracks_font_size_not_text() {
        let (_, h_small) = padded_bitmap_size(500, 10.0);
        let (_, h_large) = padded_bitmap_size(500, 60.0);
        assert!(h_large > h_small);
        assert_eq!(h_large, (60.0f32 * 1.2).ceil() as u32 + 20);
    }
}
