//! Glyphcell Core: the shared language of the overlay-text engine
//!
//! Glyphcell puts text on a raster/GPU surface for devices with no native
//! font-shaping stack. This crate holds everything the engine and its two
//! collaborators agree on:
//!
//! - [`traits::FaceRaster`] - how a font face answers coverage and
//!   rasterization requests (Font Resolution)
//! - [`traits::QuadSink`] - how draw-ready quads leave the engine
//!   (Draw Emission)
//! - [`utf8`] - lazy byte-stream decoding with pluggable error policy
//! - [`types`] - the coverage bitmaps, quads, and colors that flow between
//!   all of the above
//!
//! The engine itself — the bounded glyph cache and the cursor/line-wrap
//! layout machine — lives in the `glyphcell` crate.

pub mod error;
pub mod traits;
pub mod utf8;

pub use error::{FaceLoadError, RasterError, Result, TextError};
pub use traits::{FaceRaster, QuadSink, RasterResult};

/// The data structures that cross the collaborator boundaries
pub mod types {
    /// Edge length of one cache cell, in texels
    pub const CELL_SIZE: usize = 32;

    /// What Font Resolution hands back for one rasterized glyph
    ///
    /// An 8-bit coverage (alpha) bitmap plus the metrics needed to place it:
    /// rows are `pitch` bytes apart in `buffer`, `bitmap_top` is the glyph
    /// top relative to the baseline, and `advance_x` is in 26.6 fixed-point
    /// pixels.
    #[derive(Debug, Clone)]
    pub struct CoverageBitmap {
        pub buffer: Vec<u8>,
        pub width: u32,
        pub height: u32,
        pub pitch: usize,
        pub bitmap_top: i32,
        pub bitmap_left: i32,
        pub advance_x: i32,
    }

    /// Simple RGBA color that works everywhere
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Color {
        pub r: u8,
        pub g: u8,
        pub b: u8,
        pub a: u8,
    }

    impl Color {
        pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
            Self { r, g, b, a }
        }

        pub const fn black() -> Self {
            Self::rgba(0, 0, 0, 255)
        }

        pub const fn white() -> Self {
            Self::rgba(255, 255, 255, 255)
        }
    }

    /// An axis-aligned quad, ready for submission
    #[derive(Debug, Clone, Copy, PartialEq)]
    pub struct Quad {
        pub x: f32,
        pub y: f32,
        pub z: f32,
        pub width: f32,
        pub height: f32,
        pub color: Color,
    }

    /// How much of the bound 32x32 cell a glyph quad samples
    ///
    /// `(u, v)` are fractions of the cell edge: a glyph occupying 10x12
    /// texels samples `(10/32, 12/32)` from the cell origin.
    #[derive(Debug, Clone, Copy, PartialEq)]
    pub struct UvExtent {
        pub u: f32,
        pub v: f32,
    }

    /// One 32x32 cache cell handed to the Draw Emission collaborator
    ///
    /// Texels are 16-bit A4R4G4B4 packed as `(alpha << 8) | 0xFFF`; the
    /// stride is `CELL_SIZE * 2` bytes. Sinks should sample with clamped
    /// wrap and linear filtering.
    #[derive(Debug, Clone, Copy)]
    pub struct CellTexture<'a> {
        pub texels: &'a [u16],
        pub width: u32,
        pub height: u32,
        pub stride: usize,
    }

    impl<'a> CellTexture<'a> {
        pub fn new(texels: &'a [u16]) -> Self {
            Self {
                texels,
                width: CELL_SIZE as u32,
                height: CELL_SIZE as u32,
                stride: CELL_SIZE * 2,
            }
        }
    }
}
