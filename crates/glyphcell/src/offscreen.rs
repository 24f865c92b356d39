//! Cache-free compositing into caller-owned buffers
//!
//! Two direct paths that bypass the cache and the window machinery: a
//! single-line composite into an A4R4G4B4 buffer, and a one-glyph alpha
//! export. Both rasterize at the requested size on the spot, so they suit
//! one-shot surfaces (banners, icons) rather than per-frame text.

use glyphcell_core::types::CoverageBitmap;
use glyphcell_core::utf8::{code_points, DecodePolicy, SUBSTITUTE};

use crate::faces::FaceSet;

const CR: u32 = '\r' as u32;
const LF: u32 = '\n' as u32;

/// Composite one line of UTF-8 text into an A4R4G4B4 target buffer
///
/// `target` holds `width * height` texels; it is cleared first. Glyphs
/// rasterize at `(cell_width, cell_height)` and clip against the buffer
/// edges. Malformed input is skipped, CR/LF draw as the substitute glyph,
/// whitespace and uncovered code points advance `cell_width / 2`. Returns
/// the X position after the last character.
pub fn render_line(
    faces: &mut FaceSet,
    target: &mut [u16],
    width: usize,
    height: usize,
    text: impl AsRef<[u8]>,
    cell_width: u32,
    cell_height: u32,
) -> usize {
    target[..width * height].fill(0);
    faces.set_pixel_size(cell_width, cell_height);

    let half_cell = (cell_width / 2) as usize;
    let mut pos_x = 0usize;

    for cp in code_points(text.as_ref(), DecodePolicy::Skip) {
        if cp == 32 || cp == 9 {
            pos_x += half_cell;
            continue;
        }
        let cp = if cp == CR || cp == LF { SUBSTITUTE } else { cp };

        let Some(bitmap) = faces.resolve(cp) else {
            pos_x = (pos_x + half_cell).min(width);
            continue;
        };

        let y_start = (cell_height as i32 - 1 - bitmap.bitmap_top).max(0) as usize;
        if y_start >= height {
            // Entirely below the buffer: advance without drawing.
            pos_x = (pos_x + bitmap.width as usize).min(width);
            continue;
        }

        blit_a4r4g4b4(target, width, height, pos_x, y_start, &bitmap);
        pos_x = (pos_x + bitmap.width as usize).min(width);
    }

    pos_x
}

fn blit_a4r4g4b4(
    target: &mut [u16],
    width: usize,
    height: usize,
    pos_x: usize,
    y_start: usize,
    bitmap: &CoverageBitmap,
) {
    for row in 0..bitmap.height as usize {
        let y = y_start + row;
        if y >= height {
            break;
        }
        for col in 0..bitmap.width as usize {
            let x = pos_x + col;
            if x >= width {
                break;
            }
            let coverage = bitmap
                .buffer
                .get(row * bitmap.pitch + col)
                .copied()
                .unwrap_or(0);
            if coverage != 0 {
                target[y * width + x] = ((coverage as u16) << 8) | 0x0FFF;
            }
        }
    }
}

/// Placement of a glyph exported by [`glyph_to_alpha`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlyphSpan {
    /// Horizontal advance in pixels, including negative-left compensation
    pub advance: u32,
    /// Rows actually written
    pub rows: u32,
    /// Y correction to place the glyph top; may be negative
    pub y_offset: i32,
}

/// Rasterize a single code point into an 8-bit alpha buffer
///
/// `target` holds `cell_width * cell_height` bytes and is cleared first;
/// the glyph lands at the top-left with stride `cell_width`, clipped to the
/// buffer. Returns `None` when no installed face covers the code point —
/// this path performs no substitute fallback.
pub fn glyph_to_alpha(
    faces: &mut FaceSet,
    codepoint: u32,
    target: &mut [u8],
    cell_width: u32,
    cell_height: u32,
) -> Option<GlyphSpan> {
    let (width, height) = (cell_width as usize, cell_height as usize);
    target[..width * height].fill(0);
    faces.set_pixel_size(cell_width, cell_height);

    let bitmap = faces.resolve(codepoint)?;

    for row in 0..(bitmap.height as usize).min(height) {
        for col in 0..(bitmap.width as usize).min(width) {
            target[row * width + col] = bitmap
                .buffer
                .get(row * bitmap.pitch + col)
                .copied()
                .unwrap_or(0);
        }
    }

    // 26.6 advance rounded up, widened by any negative left bearing.
    let advance = ((bitmap.advance_x + 31) >> 6).max(0) as u32
        + (-bitmap.bitmap_left).max(0) as u32;

    Some(GlyphSpan {
        advance,
        rows: bitmap.height,
        y_offset: cell_height as i32 - 1 - bitmap.bitmap_top,
    })
}
