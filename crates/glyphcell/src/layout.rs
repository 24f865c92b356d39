//! The cursor walk: newline policy, auto-wrap, clipping, quad geometry
//!
//! A [`TextWindow`] owns the layout state for one rendering surface region:
//! origin, extent, newline policy, wrap flag, and depth. [`draw_text`]
//! advances a cursor over the decoded code-point sequence, consults the
//! glyph cache per printable character, and hands draw-ready quads to the
//! Draw Emission collaborator. Clipping only ever suppresses emission; the
//! cursor advances identically whether a glyph is visible or not.

use glyphcell_core::traits::QuadSink;
use glyphcell_core::types::{Color, Quad, UvExtent, CELL_SIZE};
use glyphcell_core::utf8::{code_points, DecodePolicy, SUBSTITUTE};

use crate::cache::{GlyphCache, REF_CELL_HEIGHT, REF_CELL_WIDTH};
use crate::faces::FaceSet;

const CR: u32 = '\r' as u32;
const LF: u32 = '\n' as u32;

/// How line breaks behave inside a window
///
/// The policies are mutually exclusive; auto-wrap is an independent flag on
/// the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NewlinePolicy {
    /// `\n` ends the line (record width, reset X, advance Y); `\r` is ignored
    #[default]
    LineFeed,
    /// `\r` and `\n` draw as the substitute glyph instead of breaking
    Literal,
    /// `\r` resets X only, `\n` advances Y only; CR-then-LF yields exactly
    /// one combined break
    Split,
}

/// Per-call draw parameters
#[derive(Debug, Clone, Copy)]
pub struct DrawParams {
    /// Cursor start, relative to the window origin
    pub x: i32,
    pub y: i32,
    /// Tint applied to glyph texels; zero alpha suppresses all drawing
    pub foreground: Color,
    /// Optional solid quad behind each glyph
    pub background: Option<Color>,
    /// Requested glyph cell width, in pixels
    pub cell_width: i32,
    /// Requested glyph cell height == line height, in pixels
    pub cell_height: i32,
}

impl Default for DrawParams {
    fn default() -> Self {
        Self {
            x: 0,
            y: 0,
            foreground: Color::white(),
            background: None,
            cell_width: 16,
            cell_height: 16,
        }
    }
}

/// A fixed-size window that text flows inside
#[derive(Debug, Clone)]
pub struct TextWindow {
    origin_x: i32,
    origin_y: i32,
    width: i32,
    height: i32,
    policy: NewlinePolicy,
    auto_wrap: bool,
    z: f32,
    next_y: i32,
}

impl TextWindow {
    pub fn new(origin_x: i32, origin_y: i32, width: i32, height: i32) -> Self {
        Self {
            origin_x,
            origin_y,
            width,
            height,
            policy: NewlinePolicy::default(),
            auto_wrap: false,
            z: 0.0,
            next_y: 0,
        }
    }

    pub fn policy(mut self, policy: NewlinePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn auto_wrap(mut self, wrap: bool) -> Self {
        self.auto_wrap = wrap;
        self
    }

    pub fn depth(mut self, z: f32) -> Self {
        self.z = z;
        self
    }

    /// Window Y of the line after the last drawn string
    ///
    /// Callers stack successive strings with this.
    pub fn next_y(&self) -> i32 {
        self.next_y
    }

    /// Lay out and emit one string; returns the maximum line width seen
    ///
    /// The walk decodes `text` with the substitute policy, terminates at a
    /// NUL byte, the end of the slice, or the window bottom, and never fails:
    /// unrenderable glyphs degrade inside the cache.
    pub fn draw_text(
        &mut self,
        cache: &mut GlyphCache,
        faces: &mut FaceSet,
        sink: &mut dyn QuadSink,
        text: impl AsRef<[u8]>,
        params: &DrawParams,
    ) -> i32 {
        let (sw, sh) = (params.cell_width, params.cell_height);
        let mut pos_x = params.x;
        let mut pos_y = params.y;
        let mut lenx = 0;

        for cp in code_points(text.as_ref(), DecodePolicy::Substitute) {
            if pos_y >= self.height && !self.auto_wrap {
                break;
            }

            // Whitespace consumes no glyph slot.
            if cp == 32 || cp == 9 {
                pos_x += sw / 2;
                continue;
            }

            let mut cp = cp;
            match self.policy {
                NewlinePolicy::LineFeed => {
                    if cp == LF {
                        lenx = lenx.max(pos_x);
                        pos_x = 0;
                        pos_y += sh;
                        continue;
                    }
                    if cp == CR {
                        continue;
                    }
                }
                NewlinePolicy::Split => {
                    if cp == CR {
                        lenx = lenx.max(pos_x);
                        pos_x = 0;
                        continue;
                    }
                    if cp == LF {
                        pos_y += sh;
                        continue;
                    }
                }
                NewlinePolicy::Literal => {
                    if cp == CR || cp == LF {
                        cp = SUBSTITUTE;
                    }
                }
            }

            // Remaining control characters draw as the substitute.
            if cp < 32 {
                cp = SUBSTITUTE;
            }

            let idx = cache.glyph(cp, faces);
            let glyph = cache.metrics(idx);

            // Cached extents are at reference size; scale to the request.
            let mut render_width = (glyph.width as f32 * sw as f32) / REF_CELL_WIDTH as f32;
            if render_width <= 0.0 && glyph.valid {
                render_width = sw as f32 / 2.0;
            }

            if self.auto_wrap && pos_x as f32 + render_width > self.width as f32 {
                lenx = lenx.max(pos_x);
                pos_x = 0;
                pos_y += sh;
                if pos_y >= self.height {
                    break;
                }
            }

            let mut visible = glyph.valid && glyph.height > 0 && params.foreground.a != 0;
            if pos_y + sh <= 0 || pos_y >= self.height {
                visible = false;
            }
            if !self.auto_wrap
                && (pos_x >= self.width || pos_x as f32 + render_width <= 0.0)
            {
                visible = false;
            }

            if visible {
                sink.bind_glyph_cell(cache.cell_texture(idx));

                let draw_y = (self.origin_y + pos_y) as f32
                    + (glyph.y_offset as f32 * sh as f32) / REF_CELL_HEIGHT as f32;
                let quad = Quad {
                    x: (self.origin_x + pos_x) as f32,
                    y: draw_y,
                    z: self.z,
                    width: render_width,
                    height: sh as f32,
                    color: params.foreground,
                };

                if let Some(background) = params.background {
                    sink.fill_quad(&Quad {
                        color: background,
                        ..quad
                    });
                }
                sink.glyph_quad(
                    &quad,
                    UvExtent {
                        u: glyph.width as f32 / CELL_SIZE as f32,
                        v: glyph.height as f32 / CELL_SIZE as f32,
                    },
                );
            }

            pos_x += render_width as i32;
        }

        self.next_y = pos_y + sh;
        lenx.max(pos_x)
    }
}

impl Default for TextWindow {
    fn default() -> Self {
        Self::new(0, 0, 848, 512)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glyphcell_core::traits::{FaceRaster, RasterResult};
    use glyphcell_core::types::{CellTexture, CoverageBitmap};

    /// Face whose glyphs are exactly the reference cell wide
    ///
    /// At reference size every glyph renders `cell_width` pixels wide, which
    /// makes advances easy to reason about in the assertions below.
    struct SquareFace;

    impl FaceRaster for SquareFace {
        fn set_pixel_size(&mut self, _width: u32, _height: u32) {}

        fn glyph_index(&self, codepoint: u32) -> Option<u32> {
            Some(codepoint)
        }

        fn rasterize(&mut self, _index: u32) -> RasterResult {
            Ok(CoverageBitmap {
                buffer: vec![255; (REF_CELL_WIDTH * 20) as usize],
                width: REF_CELL_WIDTH,
                height: 20,
                pitch: REF_CELL_WIDTH as usize,
                bitmap_top: REF_CELL_HEIGHT as i32 - 1,
                bitmap_left: 0,
                advance_x: (REF_CELL_WIDTH as i32) << 6,
            })
        }
    }

    #[derive(Default)]
    struct CountingSink {
        binds: usize,
        fills: usize,
        glyphs: Vec<Quad>,
    }

    impl QuadSink for CountingSink {
        fn bind_glyph_cell(&mut self, _cell: CellTexture<'_>) {
            self.binds += 1;
        }

        fn fill_quad(&mut self, _quad: &Quad) {
            self.fills += 1;
        }

        fn glyph_quad(&mut self, quad: &Quad, _uv: UvExtent) {
            self.glyphs.push(*quad);
        }
    }

    fn setup() -> (GlyphCache, FaceSet, CountingSink) {
        let mut faces = FaceSet::new();
        faces.install(0, Box::new(SquareFace)).unwrap();
        (GlyphCache::new(), faces, CountingSink::default())
    }

    fn params(sw: i32, sh: i32) -> DrawParams {
        DrawParams {
            cell_width: sw,
            cell_height: sh,
            ..DrawParams::default()
        }
    }

    #[test]
    fn line_feed_policy_breaks_lines() {
        let (mut cache, mut faces, mut sink) = setup();
        let mut window = TextWindow::new(0, 0, 800, 600);
        let p = params(16, 16);

        let lenx = window.draw_text(&mut cache, &mut faces, &mut sink, "ab\ncd", &p);

        // Two 16px glyphs per line; the walk ends on the second line.
        assert_eq!(lenx, 32);
        assert_eq!(window.next_y(), 16 + 16);
        assert_eq!(sink.glyphs.len(), 4);
        // SquareFace glyphs sit flush at the cell top (y_offset 0).
        assert_eq!(sink.glyphs[2].y, 16.0);
        assert_eq!(sink.glyphs[2].x, 0.0);
    }

    #[test]
    fn carriage_return_is_ignored_by_default() {
        let (mut cache, mut faces, mut sink) = setup();
        let mut window = TextWindow::new(0, 0, 800, 600);
        let p = params(16, 16);

        window.draw_text(&mut cache, &mut faces, &mut sink, "a\r\nb", &p);

        assert_eq!(sink.glyphs.len(), 2);
        assert_eq!(sink.glyphs[1].x, 0.0);
        assert_eq!(sink.glyphs[1].y, 16.0);
    }

    #[test]
    fn split_policy_combines_cr_lf_into_one_break() {
        let (mut cache, mut faces, mut sink) = setup();
        let mut window = TextWindow::new(0, 0, 800, 600).policy(NewlinePolicy::Split);
        let p = params(16, 16);

        let lenx = window.draw_text(&mut cache, &mut faces, &mut sink, "ab\r\ncd", &p);

        assert_eq!(lenx, 32);
        // CR reset X, LF advanced Y: "cd" starts at (0, 16).
        assert_eq!(sink.glyphs[2].x, 0.0);
        assert_eq!(sink.glyphs[2].y, 16.0);
    }

    #[test]
    fn split_policy_lf_alone_keeps_x() {
        let (mut cache, mut faces, mut sink) = setup();
        let mut window = TextWindow::new(0, 0, 800, 600).policy(NewlinePolicy::Split);
        let p = params(16, 16);

        window.draw_text(&mut cache, &mut faces, &mut sink, "a\nb", &p);

        // No X reset: 'b' continues at x = 16 one line down.
        assert_eq!(sink.glyphs[1].x, 16.0);
        assert_eq!(sink.glyphs[1].y, 16.0);
    }

    #[test]
    fn literal_policy_draws_newlines_as_substitute() {
        let (mut cache, mut faces, mut sink) = setup();
        let mut window = TextWindow::new(0, 0, 800, 600).policy(NewlinePolicy::Literal);
        let p = params(16, 16);

        window.draw_text(&mut cache, &mut faces, &mut sink, "a\r\nb", &p);

        // CR and LF each drew a glyph on the same line.
        assert_eq!(sink.glyphs.len(), 4);
        assert!(sink.glyphs.iter().all(|q| q.y == 0.0));
        // They occupy the substitute's ASCII slot.
        assert!(cache.metrics(SUBSTITUTE as usize).valid);
    }

    #[test]
    fn whitespace_advances_half_cell_without_glyphs() {
        let (mut cache, mut faces, mut sink) = setup();
        let mut window = TextWindow::new(0, 0, 800, 600);
        let p = params(16, 16);

        let lenx = window.draw_text(&mut cache, &mut faces, &mut sink, "a b", &p);

        assert_eq!(lenx, 16 + 8 + 16);
        assert_eq!(sink.glyphs.len(), 2);
        assert_eq!(sink.glyphs[1].x, 24.0);
    }

    #[test]
    fn auto_wrap_wraps_before_the_overflowing_glyph() {
        let (mut cache, mut faces, mut sink) = setup();
        let mut window = TextWindow::new(0, 0, 100, 600).auto_wrap(true);
        // 30px advance per glyph.
        let p = params(30, 16);

        window.draw_text(&mut cache, &mut faces, &mut sink, "abcd", &p);

        // Three glyphs fit (0, 30, 60); the fourth would reach 120 > 100,
        // so it wraps first and draws at x = 0 on the next line.
        assert_eq!(sink.glyphs.len(), 4);
        assert_eq!(sink.glyphs[2].x, 60.0);
        assert_eq!(sink.glyphs[2].y, 0.0);
        assert_eq!(sink.glyphs[3].x, 0.0);
        assert_eq!(sink.glyphs[3].y, 16.0);
    }

    #[test]
    fn clipping_suppresses_quads_but_advances_cursor() {
        let (mut cache, mut faces, mut sink) = setup();
        // Narrow window, no auto-wrap: overflowing glyphs are suppressed.
        let mut window = TextWindow::new(0, 0, 40, 600);
        let p = params(16, 16);

        let lenx = window.draw_text(&mut cache, &mut faces, &mut sink, "abcd", &p);

        // Glyphs at 0 and 16 are inside; 32 straddles the edge (still
        // partially visible since only fully-outside quads are culled);
        // 48 starts past the right edge and is suppressed.
        assert_eq!(sink.glyphs.len(), 3);
        assert_eq!(lenx, 64);
    }

    #[test]
    fn walk_stops_at_window_bottom() {
        let (mut cache, mut faces, mut sink) = setup();
        let mut window = TextWindow::new(0, 0, 800, 32);
        let p = params(16, 16);

        let lenx = window.draw_text(&mut cache, &mut faces, &mut sink, "a\nb\nc\nd", &p);

        // Lines at y = 0 and 16 draw; the walk stops once y reaches 32.
        assert_eq!(sink.glyphs.len(), 2);
        assert_eq!(lenx, 16);
    }

    #[test]
    fn background_quads_accompany_glyph_quads() {
        let (mut cache, mut faces, mut sink) = setup();
        let mut window = TextWindow::new(0, 0, 800, 600);
        let p = DrawParams {
            background: Some(Color::black()),
            ..params(16, 16)
        };

        window.draw_text(&mut cache, &mut faces, &mut sink, "ab", &p);

        assert_eq!(sink.glyphs.len(), 2);
        assert_eq!(sink.fills, 2);
        assert_eq!(sink.binds, 2);
    }

    #[test]
    fn zero_alpha_foreground_draws_nothing() {
        let (mut cache, mut faces, mut sink) = setup();
        let mut window = TextWindow::new(0, 0, 800, 600);
        let p = DrawParams {
            foreground: Color::rgba(255, 255, 255, 0),
            ..params(16, 16)
        };

        let lenx = window.draw_text(&mut cache, &mut faces, &mut sink, "ab", &p);

        assert_eq!(sink.glyphs.len(), 0);
        assert_eq!(sink.binds, 0);
        // Layout is unaffected by visibility.
        assert_eq!(lenx, 32);
    }

    #[test]
    fn window_origin_offsets_quads() {
        let (mut cache, mut faces, mut sink) = setup();
        let mut window = TextWindow::new(100, 50, 800, 600).depth(0.5);
        let p = params(16, 16);

        window.draw_text(&mut cache, &mut faces, &mut sink, "a", &p);

        assert_eq!(sink.glyphs[0].x, 100.0);
        assert_eq!(sink.glyphs[0].y, 50.0);
        assert_eq!(sink.glyphs[0].z, 0.5);
    }

    #[test]
    fn unrenderable_text_still_lays_out() {
        let mut cache = GlyphCache::new();
        let mut faces = FaceSet::new(); // nothing installed
        let mut sink = CountingSink::default();
        let mut window = TextWindow::new(0, 0, 800, 600);
        let p = params(16, 16);

        // Placeholders are zero-height: nothing draws, but the cursor
        // advances by the placeholder width each time.
        let lenx = window.draw_text(&mut cache, &mut faces, &mut sink, "abc", &p);

        assert_eq!(sink.glyphs.len(), 0);
        assert_eq!(lenx, 8 * 3);
    }
}
