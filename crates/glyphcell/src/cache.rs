//! The bounded glyph cache: 1600 cells, built lazily, evicted by frame age
//!
//! Every glyph the engine draws lives in one 32x32 cell of a contiguous
//! texel arena. ASCII owns the first 128 cells outright (slot index ==
//! code point, forever); everything else competes for the remaining pool
//! under a frame-generation LRU approximation: a miss evicts a never-used
//! cell if one exists, otherwise the stalest cell not referenced this frame.
//!
//! The approximation is deliberate. Recency is a generation-counter
//! difference resolved by an O(pool) linear scan with ties broken toward
//! the lowest index, and that tie-break is part of the observable contract.
//! Glyphs rasterize once at a fixed reference size; every requested render
//! size scales the cached extents linearly at draw time.

use glyphcell_core::types::{CellTexture, CoverageBitmap, CELL_SIZE};
use glyphcell_core::utf8::SUBSTITUTE;

use crate::faces::FaceSet;

/// Total cache cells, ASCII-reserved plus dynamic
pub const MAX_SLOTS: usize = 1600;

/// Cells `[0, ASCII_SLOTS)` map one-to-one onto ASCII code points
pub const ASCII_SLOTS: usize = 128;

/// Reference rasterization width, in pixels
pub const REF_CELL_WIDTH: u32 = 30;

/// Reference rasterization height, in pixels
pub const REF_CELL_HEIGHT: u32 = 24;

const CELL_TEXELS: usize = CELL_SIZE * CELL_SIZE;

/// Per-cell bookkeeping
///
/// Content (`codepoint`, extents, `valid`) persists across frames until the
/// cell is evicted; `used_this_frame` and `last_use_generation` are recency
/// bookkeeping only.
#[derive(Debug, Clone, Copy, Default)]
struct Slot {
    codepoint: u32,
    width: u16,
    height: u16,
    y_offset: u16,
    valid: bool,
    used_this_frame: bool,
    last_use_generation: u64,
}

/// Metrics of one cached glyph, as the layout engine consumes them
#[derive(Debug, Clone, Copy)]
pub struct CachedGlyph {
    pub codepoint: u32,
    /// Bitmap extent within the cell, at most [`CELL_SIZE`]
    pub width: u16,
    pub height: u16,
    /// Glyph top offset within the cell, at reference size
    pub y_offset: u16,
    pub valid: bool,
}

/// The glyph cache itself: slot table plus owned texel arena
///
/// Allocated once per rendering surface and passed by reference to every
/// layout call; single-threaded by design. The arena is one contiguous
/// buffer sliced into 32x32 A4R4G4B4 cells addressed by slot index.
pub struct GlyphCache {
    slots: Vec<Slot>,
    texels: Vec<u16>,
    generation: u64,
}

impl GlyphCache {
    pub fn new() -> Self {
        Self {
            slots: vec![Slot::default(); MAX_SLOTS],
            texels: vec![0; MAX_SLOTS * CELL_TEXELS],
            generation: 0,
        }
    }

    /// Start a new frame: clear per-frame use marks, bump the generation
    ///
    /// Content and validity are untouched — the cache is durable across
    /// frames, only recency bookkeeping resets. Must be called exactly once
    /// before each frame's text submissions; skipping it degrades recency
    /// comparison to insertion order.
    pub fn begin_frame(&mut self) {
        for slot in &mut self.slots {
            slot.used_this_frame = false;
        }
        self.generation += 1;
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Search the dynamic pool for a live mapping of `codepoint`
    ///
    /// Hit-only: returns `None` on miss without disturbing any slot.
    pub fn find(&self, codepoint: u32) -> Option<usize> {
        if codepoint < ASCII_SLOTS as u32 {
            return Some(codepoint as usize);
        }
        (ASCII_SLOTS..MAX_SLOTS)
            .find(|&idx| self.slots[idx].valid && self.slots[idx].codepoint == codepoint)
    }

    /// Map a code point to its slot, evicting on miss
    ///
    /// ASCII addresses its reserved slot directly. A dynamic miss selects a
    /// victim — any never-used cell first, else the unreferenced cell with
    /// the widest generation gap, ties to the lowest index — and marks it
    /// invalid pending rebuild. Total by construction: every code point maps
    /// to an in-range slot.
    pub fn lookup(&mut self, codepoint: u32) -> usize {
        if let Some(idx) = self.find(codepoint) {
            return idx;
        }
        let idx = self.eviction_candidate();
        if self.slots[idx].valid {
            log::debug!(
                "evicting slot {idx} (U+{:04X}, idle {} frames) for U+{codepoint:04X}",
                self.slots[idx].codepoint,
                self.generation - self.slots[idx].last_use_generation
            );
        }
        self.slots[idx].valid = false;
        idx
    }

    fn eviction_candidate(&self) -> usize {
        let mut stale: Option<(usize, u64)> = None;
        for idx in ASCII_SLOTS..MAX_SLOTS {
            let slot = &self.slots[idx];
            if !slot.valid {
                return idx;
            }
            if slot.used_this_frame {
                continue;
            }
            let gap = self.generation - slot.last_use_generation;
            match stale {
                Some((_, widest)) if gap <= widest => {}
                _ => stale = Some((idx, gap)),
            }
        }
        // Every dynamic slot was referenced this frame; the pool is smaller
        // than the working set. Reuse the first dynamic slot.
        stale.map_or(ASCII_SLOTS, |(idx, _)| idx)
    }

    /// Mark a slot referenced in the current frame
    pub fn touch(&mut self, idx: usize) {
        let slot = &mut self.slots[idx];
        slot.used_this_frame = true;
        slot.last_use_generation = self.generation;
    }

    /// Look up, build if needed, and touch: the per-character fast path
    ///
    /// Never fails: an unrenderable code point falls back to the substitute
    /// glyph and, failing that, to a valid empty placeholder.
    pub fn glyph(&mut self, codepoint: u32, faces: &mut FaceSet) -> usize {
        let idx = self.lookup(codepoint);
        if !self.slots[idx].valid || self.slots[idx].codepoint != codepoint {
            self.build(idx, codepoint, faces);
        }
        self.touch(idx);
        idx
    }

    /// Rasterize `codepoint` into a slot at the reference cell size
    fn build(&mut self, idx: usize, codepoint: u32, faces: &mut FaceSet) {
        faces.set_pixel_size(REF_CELL_WIDTH, REF_CELL_HEIGHT);

        let base = idx * CELL_TEXELS;
        self.texels[base..base + CELL_TEXELS].fill(0);

        let mut bitmap = faces.resolve(codepoint);
        if bitmap.is_none() && codepoint != SUBSTITUTE {
            bitmap = faces.resolve(SUBSTITUTE);
        }

        let slot = match bitmap {
            Some(bitmap) => {
                self.blit_cell(base, &bitmap);
                Slot {
                    // The slot answers for the code point that was asked
                    // for, even when the substitute bitmap stands in.
                    codepoint,
                    width: bitmap.width.min(CELL_SIZE as u32) as u16,
                    height: bitmap.height.min(CELL_SIZE as u32) as u16,
                    y_offset: (REF_CELL_HEIGHT as i32 - 1 - bitmap.bitmap_top)
                        .clamp(0, REF_CELL_HEIGHT as i32 - 1) as u16,
                    valid: true,
                    used_this_frame: false,
                    last_use_generation: self.slots[idx].last_use_generation,
                }
            }
            None => {
                log::debug!("no face covers U+{codepoint:04X}, caching empty placeholder");
                Slot {
                    codepoint,
                    width: (REF_CELL_WIDTH / 2) as u16,
                    height: 0,
                    y_offset: 0,
                    valid: true,
                    used_this_frame: false,
                    last_use_generation: self.slots[idx].last_use_generation,
                }
            }
        };
        self.slots[idx] = slot;
    }

    /// Copy a coverage bitmap into one cell as packed A4R4G4B4 alpha texels
    fn blit_cell(&mut self, base: usize, bitmap: &CoverageBitmap) {
        let rows = (bitmap.height as usize).min(CELL_SIZE);
        let cols = (bitmap.width as usize).min(CELL_SIZE);
        for row in 0..rows {
            for col in 0..cols {
                let coverage = bitmap
                    .buffer
                    .get(row * bitmap.pitch + col)
                    .copied()
                    .unwrap_or(0);
                // Covered texels only; uncovered ones stay fully zero.
                if coverage != 0 {
                    self.texels[base + row * CELL_SIZE + col] =
                        ((coverage as u16) << 8) | 0x0FFF;
                }
            }
        }
    }

    /// The 32x32 texel cell backing one slot
    pub fn cell_texels(&self, idx: usize) -> &[u16] {
        let base = idx * CELL_TEXELS;
        &self.texels[base..base + CELL_TEXELS]
    }

    /// The same cell, described for a Draw Emission bind
    pub fn cell_texture(&self, idx: usize) -> CellTexture<'_> {
        CellTexture::new(self.cell_texels(idx))
    }

    /// Metrics of one slot, as cached
    pub fn metrics(&self, idx: usize) -> CachedGlyph {
        let slot = &self.slots[idx];
        CachedGlyph {
            codepoint: slot.codepoint,
            width: slot.width,
            height: slot.height,
            y_offset: slot.y_offset,
            valid: slot.valid,
        }
    }

    #[cfg(test)]
    fn used_this_frame(&self, idx: usize) -> bool {
        self.slots[idx].used_this_frame
    }
}

impl Default for GlyphCache {
    fn default() -> Self {
        Self::new()
    }
}
