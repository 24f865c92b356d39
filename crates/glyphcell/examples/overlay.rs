//! Walk a string through the cache and print the emitted quads
//!
//! Uses a synthetic face (solid blocks) so the example runs without any
//! font files. Run with `RUST_LOG=debug` to watch cache builds/evictions.

use glyphcell::offscreen;
use glyphcell::prelude::*;

/// A face whose every glyph is a solid 12x18 block
struct BlockFace;

impl FaceRaster for BlockFace {
    fn set_pixel_size(&mut self, _width: u32, _height: u32) {}

    fn glyph_index(&self, codepoint: u32) -> Option<u32> {
        Some(codepoint)
    }

    fn rasterize(&mut self, _index: u32) -> RasterResult {
        Ok(CoverageBitmap {
            buffer: vec![220; 12 * 18],
            width: 12,
            height: 18,
            pitch: 12,
            bitmap_top: 17,
            bitmap_left: 0,
            advance_x: 13 << 6,
        })
    }
}

/// Sink that narrates everything it receives
#[derive(Default)]
struct ConsoleSink {
    quads: usize,
}

impl QuadSink for ConsoleSink {
    fn bind_glyph_cell(&mut self, cell: CellTexture<'_>) {
        let covered = cell.texels.iter().filter(|&&t| t != 0).count();
        println!("bind cell: {covered} covered texels");
    }

    fn fill_quad(&mut self, quad: &Quad) {
        println!("fill  quad at ({:5.1}, {:5.1})", quad.x, quad.y);
    }

    fn glyph_quad(&mut self, quad: &Quad, uv: UvExtent) {
        self.quads += 1;
        println!(
            "glyph quad at ({:5.1}, {:5.1}) size {:4.1}x{:4.1} uv ({:.3}, {:.3})",
            quad.x, quad.y, quad.width, quad.height, uv.u, uv.v
        );
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let mut faces = FaceSet::new();
    faces.install(0, Box::new(BlockFace))?;

    let mut cache = GlyphCache::new();
    let mut window = TextWindow::new(0, 0, 200, 512).auto_wrap(true);
    let mut sink = ConsoleSink::default();

    cache.begin_frame();
    let width = window.draw_text(
        &mut cache,
        &mut faces,
        &mut sink,
        "héllo, glyphcell!\nwrapped overlay text",
        &DrawParams::default(),
    );
    println!("{} quads, widest line {width}px, next line at y = {}", sink.quads, window.next_y());

    // The cache-free path: one line straight into an A4R4G4B4 buffer.
    let (w, h) = (96usize, 12usize);
    let mut buffer = vec![0u16; w * h];
    let end = offscreen::render_line(&mut faces, &mut buffer, w, h, "abc", 12, 12);
    println!("offscreen line ends at x = {end}");
    for row in buffer.chunks(w) {
        let line: String = row
            .iter()
            .map(|&t| if t != 0 { '#' } else { '.' })
            .collect();
        println!("{line}");
    }

    Ok(())
}
