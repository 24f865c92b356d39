//! Glyphcell: overlay text for surfaces with no font-shaping stack
//!
//! Byte-stream text goes in, draw-ready quads come out. In between sit the
//! three pieces this crate owns:
//!
//! 1. **Face priority** - up to four rasterizing faces tried in order
//! 2. **Glyph cache** - 1600 fixed 32x32 cells with frame-generation LRU
//! 3. **Layout** - cursor, newline policy, auto-wrap, and clipping inside
//!    a fixed window
//!
//! Rasterization and quad submission stay outside, behind the
//! [`glyphcell_core::traits::FaceRaster`] and
//! [`glyphcell_core::traits::QuadSink`] collaborator traits.
//!
//! # Drawing a string
//!
//! ```ignore
//! use glyphcell::prelude::*;
//!
//! let mut faces = FaceSet::new();
//! faces.install(0, my_system_face)?;
//!
//! let mut cache = GlyphCache::new();
//! let mut window = TextWindow::new(0, 0, 848, 512).auto_wrap(true);
//!
//! // Once per frame:
//! cache.begin_frame();
//! let width = window.draw_text(
//!     &mut cache,
//!     &mut faces,
//!     &mut my_sink,
//!     "héllo wörld",
//!     &DrawParams::default(),
//! );
//! ```
//!
//! All state lives in explicit context objects constructed once per
//! rendering surface; nothing here is global, and nothing here is
//! thread-safe — one surface, one thread.

pub mod cache;
pub mod faces;
pub mod layout;
pub mod offscreen;

pub use cache::{CachedGlyph, GlyphCache, ASCII_SLOTS, MAX_SLOTS, REF_CELL_HEIGHT, REF_CELL_WIDTH};
pub use faces::{FaceSet, MAX_FACES};
pub use layout::{DrawParams, NewlinePolicy, TextWindow};

pub use glyphcell_core as core;
pub use glyphcell_core::{FaceLoadError, RasterError, Result, TextError};

/// Common imports for typical usage
pub mod prelude {
    pub use crate::cache::GlyphCache;
    pub use crate::faces::FaceSet;
    pub use crate::layout::{DrawParams, NewlinePolicy, TextWindow};
    pub use glyphcell_core::error::{Result, TextError};
    pub use glyphcell_core::traits::{FaceRaster, QuadSink, RasterResult};
    pub use glyphcell_core::types::{CellTexture, Color, CoverageBitmap, Quad, UvExtent};
    pub use glyphcell_core::utf8::DecodePolicy;
}
