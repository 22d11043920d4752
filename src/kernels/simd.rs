// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! # **SIMD Kernels** - *Vectorised Multi-Plane Popcount Accumulation*
//!
//! Vectorised implementations of the similarity score using portable
//! `std::simd` with configurable lane counts. Two element strategies are
//! provided; both are bit-identical to the scalar reference for all inputs
//! and all supported lane counts:
//!
//! - **64-bit elements** ([`similarity_u64_simd`]): one `count_ones` per u64
//!   lane folded into a per-plane vector accumulator. Sub-totals cannot
//!   overflow at any supported length, so no intermediate widening is needed.
//! - **8-bit elements** ([`similarity_u8_simd`]): the cheapest count
//!   instruction, but a `u8` accumulator element wraps after
//!   `MAX_BYTE_FOLDS` folds of at most 8 each. Folds are therefore blocked
//!   in groups of `BYTE_FOLD_CHUNK` and widened into the 64-bit sub-total
//!   between blocks.
//!
//! Any lane count may leave a remainder of `[0, LANES)` bytes; remainders go
//! through the same byte-wise loop as the scalar reference.

use core::simd::{LaneCount, Simd, SupportedLaneCount};
use std::simd::num::SimdUint;

use crate::kernels::{LaneWord, BYTE_FOLD_CHUNK, MAX_BYTE_FOLDS};
use crate::vector::QUERY_PLANES;

/// Loads `LANES` little-endian u64 words from `LANES * 8` bytes.
#[inline(always)]
fn load_words<const LANES: usize>(bytes: &[u8]) -> Simd<u64, LANES>
where
    LaneCount<LANES>: SupportedLaneCount,
{
    let mut words = [0u64; LANES];
    for (word, chunk) in words.iter_mut().zip(bytes.chunks_exact(8)) {
        *word = u64::from_le_slice(chunk);
    }
    Simd::from_array(words)
}

/// Vectorised kernel with 64-bit elements and `LANES` u64 words per fold.
///
/// Lane width in bits is `LANES * 64`; `LANES` of 1/2/4/8 give the
/// 64/128/256/512-bit variants. Full-width chunks AND each plane against the
/// document and fold lane popcounts into four vector accumulators; each is
/// reduced to its plane sub-total after the loop, and the remainder is
/// processed byte-wise.
#[inline]
pub fn similarity_u64_simd<const LANES: usize>(query: &[u8], document: &[u8]) -> u64
where
    LaneCount<LANES>: SupportedLaneCount,
{
    debug_assert!(!document.is_empty());
    debug_assert_eq!(query.len(), QUERY_PLANES * document.len());
    let len = document.len();
    let step = LANES * 8;

    let mut sums = [Simd::<u64, LANES>::splat(0); QUERY_PLANES];
    let mut i = 0;
    while i + step <= len {
        let vd = load_words::<LANES>(&document[i..i + step]);
        for (plane, sum) in sums.iter_mut().enumerate() {
            let at = plane * len + i;
            let vq = load_words::<LANES>(&query[at..at + step]);
            *sum += (vq & vd).count_ones();
        }
        i += step;
    }

    let mut subs = [0u64; QUERY_PLANES];
    for (sub, sum) in subs.iter_mut().zip(sums.iter()) {
        *sub = sum.reduce_sum();
    }
    // tail as bytes
    for j in i..len {
        let db = document[j];
        for (plane, sub) in subs.iter_mut().enumerate() {
            *sub += u64::from((query[plane * len + j] & db).count_ones());
        }
    }
    weighted(subs)
}

/// Vectorised kernel with 8-bit elements and `LANES` bytes per fold.
///
/// Each `u8` accumulator element takes at most 8 per fold, so at most
/// `BYTE_FOLD_CHUNK` folds run per block before the block is widened into
/// the plane's 64-bit sub-total. The remainder is processed byte-wise.
#[inline]
pub fn similarity_u8_simd<const LANES: usize>(query: &[u8], document: &[u8]) -> u64
where
    LaneCount<LANES>: SupportedLaneCount,
{
    debug_assert!(!document.is_empty());
    debug_assert_eq!(query.len(), QUERY_PLANES * document.len());
    const { assert!(BYTE_FOLD_CHUNK <= MAX_BYTE_FOLDS) };
    let len = document.len();
    let full = len - len % LANES;

    let mut subs = [0u64; QUERY_PLANES];
    let mut i = 0;
    while i < full {
        let mut accs = [Simd::<u8, LANES>::splat(0); QUERY_PLANES];
        let stop = i + (full - i).min(LANES * BYTE_FOLD_CHUNK);
        while i < stop {
            let vd = Simd::<u8, LANES>::from_slice(&document[i..i + LANES]);
            for (plane, acc) in accs.iter_mut().enumerate() {
                let at = plane * len + i;
                let vq = Simd::<u8, LANES>::from_slice(&query[at..at + LANES]);
                *acc += (vq & vd).count_ones();
            }
            i += LANES;
        }
        for (sub, acc) in subs.iter_mut().zip(accs.iter()) {
            *sub += acc.cast::<u64>().reduce_sum();
        }
    }
    // tail as bytes
    for j in full..len {
        let db = document[j];
        for (plane, sub) in subs.iter_mut().enumerate() {
            *sub += u64::from((query[plane * len + j] & db).count_ones());
        }
    }
    weighted(subs)
}

/// Combines plane sub-totals with the `2^i` plane weights.
#[inline(always)]
fn weighted(subs: [u64; QUERY_PLANES]) -> u64 {
    subs.iter()
        .enumerate()
        .map(|(plane, sub)| sub << plane)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernels::std::similarity_bytes_std;

    fn pair(len: usize) -> (Vec<u8>, Vec<u8>) {
        let document: Vec<u8> = (0..len).map(|b| (b as u8).wrapping_mul(73) ^ 0x39).collect();
        let query: Vec<u8> = (0..QUERY_PLANES * len)
            .map(|b| (b as u8).wrapping_mul(29) ^ 0xC6)
            .collect();
        (query, document)
    }

    #[test]
    fn u64_lanes_match_reference() {
        for len in [1usize, 7, 17, 48, 96, 257, 512] {
            let (query, document) = pair(len);
            let expected = similarity_bytes_std(&query, &document);
            assert_eq!(similarity_u64_simd::<1>(&query, &document), expected);
            assert_eq!(similarity_u64_simd::<2>(&query, &document), expected);
            assert_eq!(similarity_u64_simd::<4>(&query, &document), expected);
            assert_eq!(similarity_u64_simd::<8>(&query, &document), expected);
        }
    }

    #[test]
    fn u8_lanes_match_reference() {
        for len in [1usize, 15, 16, 17, 48, 255, 256, 257, 512] {
            let (query, document) = pair(len);
            let expected = similarity_bytes_std(&query, &document);
            assert_eq!(similarity_u8_simd::<16>(&query, &document), expected);
            assert_eq!(similarity_u8_simd::<32>(&query, &document), expected);
            assert_eq!(similarity_u8_simd::<64>(&query, &document), expected);
        }
    }

    #[test]
    fn u8_accumulator_survives_maximal_density() {
        // All bits set maximises per-fold contributions; any wrap in a u8
        // accumulator element would surface here.
        let len = 512;
        let document = vec![0xFFu8; len];
        let query = vec![0xFFu8; QUERY_PLANES * len];
        let expected = similarity_bytes_std(&query, &document);
        assert_eq!(similarity_u8_simd::<16>(&query, &document), expected);
        assert_eq!(similarity_u8_simd::<64>(&query, &document), expected);
    }
}
