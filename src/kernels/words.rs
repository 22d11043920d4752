// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! Unsigned word types the scalar kernels can stride by.

use num_traits::{PrimInt, Unsigned};

/// An unsigned machine word usable as a scalar popcount stride.
///
/// `PrimInt` supplies `count_ones`; `from_le_slice` assembles a word from exactly
/// `BYTES` little-endian bytes. Byte order is irrelevant to a popcount of an
/// AND, but a fixed order keeps word loads deterministic across platforms.
pub trait LaneWord: PrimInt + Unsigned {
    /// Word size in bytes.
    const BYTES: usize;

    /// Builds a word from exactly `BYTES` little-endian bytes.
    fn from_le_slice(chunk: &[u8]) -> Self;
}

impl LaneWord for u32 {
    const BYTES: usize = 4;

    #[inline(always)]
    fn from_le_slice(chunk: &[u8]) -> Self {
        let mut raw = [0u8; 4];
        raw.copy_from_slice(chunk);
        u32::from_le_bytes(raw)
    }
}

impl LaneWord for u64 {
    const BYTES: usize = 8;

    #[inline(always)]
    fn from_le_slice(chunk: &[u8]) -> Self {
        let mut raw = [0u8; 8];
        raw.copy_from_slice(chunk);
        u64::from_le_bytes(raw)
    }
}
