// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! # **Configuration** - *Lane-Width Selection and Size Limits*
//!
//! Build-time lane constants plus the one-time lane-width selection injected
//! into the dispatch layer. Lane width is a configuration decision made once
//! (at process or call-site setup); it is never re-negotiated per call and
//! requires no locking.

include!(concat!(env!("OUT_DIR"), "/simd_lanes.rs"));

/// Maximum supported document/plane length, in bytes.
///
/// Sub-totals accumulate in `u64`: a plane of `n` bytes contributes at most
/// `8 * n` per plane and the final weighting shifts by at most 3, so any
/// 32-bit-representable byte length stays far below `2^64`. The harness and
/// test suites exercise dimensionalities up to 4096 bits per plane.
pub const MAX_PLANE_BYTES: usize = u32::MAX as usize;

/// Data-parallel lane width, in bits.
///
/// An explicit tagged selection of the vectorised kernel strategy. Variants
/// differ only in how many bits one fold processes; all are bit-identical to
/// the scalar reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaneWidth {
    /// 64-bit lanes (single u64 word per fold)
    W64,
    /// 128-bit lanes
    W128,
    /// 256-bit lanes
    W256,
    /// 512-bit lanes
    W512,
}

impl LaneWidth {
    /// Lane width in bits.
    #[must_use]
    pub const fn bits(self) -> usize {
        match self {
            LaneWidth::W64 => 64,
            LaneWidth::W128 => 128,
            LaneWidth::W256 => 256,
            LaneWidth::W512 => 512,
        }
    }

    /// Number of u64 words per lane.
    #[must_use]
    pub const fn words(self) -> usize {
        self.bits() / 64
    }

    /// Widest lane the build target supports, from the build-time constants
    /// in `simd_lanes.rs`.
    ///
    /// This is the one-time capability detection step: call it once at setup
    /// and thread the result through [`crate::similarity_with`].
    #[must_use]
    pub fn preferred() -> Self {
        match W64 {
            w if w >= 8 => LaneWidth::W512,
            4 => LaneWidth::W256,
            2 => LaneWidth::W128,
            _ => LaneWidth::W64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lane_width_geometry() {
        assert_eq!(LaneWidth::W64.bits(), 64);
        assert_eq!(LaneWidth::W512.words(), 8);
        assert_eq!(LaneWidth::W128.words(), 2);
    }

    #[test]
    fn preferred_is_supported() {
        let w = LaneWidth::preferred();
        assert!(matches!(
            w,
            LaneWidth::W64 | LaneWidth::W128 | LaneWidth::W256 | LaneWidth::W512
        ));
    }
}
