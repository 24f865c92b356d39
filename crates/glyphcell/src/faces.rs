//! Priority-ordered font faces
//!
//! Up to four faces load at once; every coverage query walks them in index
//! order and the first face that both knows the code point and rasterizes
//! it successfully wins. Slot 0 is conventionally the system font, higher
//! slots hold progressively more exotic fallbacks.

use glyphcell_core::error::{Result, TextError};
use glyphcell_core::traits::FaceRaster;
use glyphcell_core::types::CoverageBitmap;

/// How many faces may be installed at once
pub const MAX_FACES: usize = 4;

/// The prioritized set of loaded faces
///
/// Owns the Font Resolution collaborators. Installing into an occupied slot
/// replaces the previous face; clearing the set does *not* invalidate any
/// glyph bitmaps already cached from it.
#[derive(Default)]
pub struct FaceSet {
    faces: [Option<Box<dyn FaceRaster>>; MAX_FACES],
}

impl FaceSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a face at the given priority slot
    ///
    /// Fails only when `slot` is out of range; a failed install never
    /// disturbs already-loaded faces.
    pub fn install(&mut self, slot: usize, face: Box<dyn FaceRaster>) -> Result<()> {
        if slot >= MAX_FACES {
            return Err(TextError::InvalidFaceSlot {
                slot,
                max: MAX_FACES,
            });
        }
        if self.faces[slot].is_some() {
            log::warn!("replacing face in slot {slot}");
        }
        self.faces[slot] = Some(face);
        Ok(())
    }

    /// Drop the face in one slot, leaving the others untouched
    pub fn remove(&mut self, slot: usize) {
        if let Some(face) = self.faces.get_mut(slot) {
            *face = None;
        }
    }

    /// Drop every loaded face
    pub fn clear(&mut self) {
        for face in &mut self.faces {
            *face = None;
        }
    }

    pub fn is_empty(&self) -> bool {
        self.faces.iter().all(Option::is_none)
    }

    pub fn loaded_count(&self) -> usize {
        self.faces.iter().filter(|f| f.is_some()).count()
    }

    /// Broadcast the active rasterization pixel size to every loaded face
    pub fn set_pixel_size(&mut self, width: u32, height: u32) {
        for face in self.faces.iter_mut().flatten() {
            face.set_pixel_size(width, height);
        }
    }

    /// Resolve one code point against the priority chain
    ///
    /// First face with a glyph index and a successful rasterization wins.
    /// Returns `None` when no face covers the code point; the caller decides
    /// whether to retry with the substitute character.
    pub fn resolve(&mut self, codepoint: u32) -> Option<CoverageBitmap> {
        for (slot, face) in self.faces.iter_mut().enumerate() {
            let Some(face) = face else { continue };
            let Some(index) = face.glyph_index(codepoint) else {
                continue;
            };
            match face.rasterize(index) {
                Ok(bitmap) => return Some(bitmap),
                Err(err) => {
                    log::debug!("face {slot} failed to rasterize U+{codepoint:04X}: {err}");
                }
            }
        }
        None
    }
}

impl std::fmt::Debug for FaceSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FaceSet")
            .field("loaded", &self.loaded_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glyphcell_core::error::RasterError;
    use glyphcell_core::traits::RasterResult;

    /// Face that covers a fixed range of code points
    struct RangeFace {
        from: u32,
        to: u32,
        fill: u8,
    }

    impl FaceRaster for RangeFace {
        fn set_pixel_size(&mut self, _width: u32, _height: u32) {}

        fn glyph_index(&self, codepoint: u32) -> Option<u32> {
            (self.from..=self.to).contains(&codepoint).then_some(codepoint)
        }

        fn rasterize(&mut self, _index: u32) -> RasterResult {
            Ok(CoverageBitmap {
                buffer: vec![self.fill; 4],
                width: 2,
                height: 2,
                pitch: 2,
                bitmap_top: 2,
                bitmap_left: 0,
                advance_x: 3 << 6,
            })
        }
    }

    #[test]
    fn install_rejects_out_of_range_slot() {
        let mut faces = FaceSet::new();
        let result = faces.install(
            MAX_FACES,
            Box::new(RangeFace {
                from: 0,
                to: 0,
                fill: 1,
            }),
        );
        assert!(matches!(
            result,
            Err(TextError::InvalidFaceSlot { slot: 4, .. })
        ));
        assert!(faces.is_empty());
    }

    #[test]
    fn resolve_prefers_lower_slots() {
        let mut faces = FaceSet::new();
        faces
            .install(0, Box::new(RangeFace { from: 65, to: 90, fill: 10 }))
            .unwrap();
        faces
            .install(1, Box::new(RangeFace { from: 0, to: 0x10FFFF, fill: 20 }))
            .unwrap();

        // Covered by both: slot 0 wins.
        assert_eq!(faces.resolve(65).unwrap().buffer[0], 10);
        // Covered only by the fallback.
        assert_eq!(faces.resolve(233).unwrap().buffer[0], 20);
    }

    #[test]
    fn resolve_misses_when_uncovered() {
        let mut faces = FaceSet::new();
        faces
            .install(2, Box::new(RangeFace { from: 65, to: 65, fill: 1 }))
            .unwrap();
        assert!(faces.resolve(66).is_none());
        assert!(FaceSet::new().resolve(65).is_none());
    }

    /// Face that claims coverage but always fails to rasterize
    struct BrokenFace;

    impl FaceRaster for BrokenFace {
        fn set_pixel_size(&mut self, _width: u32, _height: u32) {}

        fn glyph_index(&self, _codepoint: u32) -> Option<u32> {
            Some(7)
        }

        fn rasterize(&mut self, index: u32) -> RasterResult {
            Err(RasterError::MissingGlyph(index))
        }
    }

    #[test]
    fn rasterize_failure_falls_through_to_next_face() {
        let mut faces = FaceSet::new();
        faces.install(0, Box::new(BrokenFace)).unwrap();
        faces
            .install(3, Box::new(RangeFace { from: 0, to: 0x10FFFF, fill: 5 }))
            .unwrap();
        assert_eq!(faces.resolve(65).unwrap().buffer[0], 5);
    }
}
