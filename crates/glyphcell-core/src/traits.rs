//! The contracts that bind the engine to its two collaborators
//!
//! Glyphcell itself never touches font files or the GPU. Everything on
//! either side of the cache/layout core goes through these two traits:
//!
//! - [`FaceRaster`] - Font Resolution: code point in, coverage bitmap out
//! - [`QuadSink`] - Draw Emission: draw-ready quads out to the pipeline

use crate::error::RasterError;
use crate::types::{CellTexture, CoverageBitmap, Quad, UvExtent};

/// What a rasterization request resolves to
pub type RasterResult = std::result::Result<CoverageBitmap, RasterError>;

/// One rasterizing font face
///
/// The Font Resolution collaborator implements this per loaded face. Opening
/// the face (from a path or a memory buffer) belongs to the implementor and
/// may fail with [`crate::error::FaceLoadError`]; once constructed, a face
/// only answers coverage queries and rasterization requests.
///
/// ```ignore
/// struct MyFace { /* handle into your rasterization library */ }
///
/// impl FaceRaster for MyFace {
///     fn set_pixel_size(&mut self, width: u32, height: u32) {
///         // forward to the library
///     }
///
///     fn glyph_index(&self, codepoint: u32) -> Option<u32> {
///         // None when the face has no glyph for this code point
///         Some(42)
///     }
///
///     fn rasterize(&mut self, index: u32) -> RasterResult {
///         // render at the current pixel size
///         unimplemented!()
///     }
/// }
/// ```
pub trait FaceRaster {
    /// Select the pixel size used by subsequent [`rasterize`](Self::rasterize) calls
    fn set_pixel_size(&mut self, width: u32, height: u32);

    /// Find the glyph that represents this code point
    ///
    /// Returns `None` when the face doesn't cover the code point. The engine
    /// then falls through to the next face in priority order.
    fn glyph_index(&self, codepoint: u32) -> Option<u32>;

    /// Render one glyph to an 8-bit coverage bitmap
    ///
    /// May perform file I/O only on the very first face-load event, never
    /// per rasterization.
    fn rasterize(&mut self, index: u32) -> RasterResult;
}

/// Where draw-ready quads leave the engine
///
/// The Draw Emission collaborator receives one texture bind plus one or two
/// quads per visible glyph. Texels in the bound cell are 16-bit A4R4G4B4
/// packed as `(alpha << 8) | 0xFFF`: pure alpha masks with full-intensity
/// RGB, tinted by the quad color at draw time. This packing is a hard wire
/// contract — changing it requires changing the sink's texture-format
/// declaration as well.
pub trait QuadSink {
    /// Bind one 32x32 cache cell as the active glyph texture
    fn bind_glyph_cell(&mut self, cell: CellTexture<'_>);

    /// Emit a solid (untextured) quad, used for glyph backgrounds
    fn fill_quad(&mut self, quad: &Quad);

    /// Emit a textured quad sampling the currently bound cell
    fn glyph_quad(&mut self, quad: &Quad, uv: UvExtent);
}
