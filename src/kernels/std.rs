// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! # **Scalar Kernels** - *Byte- and Word-Level Similarity Fallbacks*
//!
//! Scalar implementations of the multi-plane AND + popcount score, without
//! SIMD dependencies. [`similarity_bytes_std`] is the ground truth the
//! differential harness validates every other variant against; the word
//! kernels are the production fallback when the `simd` feature is off.
//!
//! ## Architecture Principles
//!
//! - **Word-level striding**: full 32- or 64-bit words per popcount where the
//!   length allows, with a byte-wise remainder loop
//! - **Unsigned byte semantics**: every AND result is counted as an unsigned
//!   0-8 value; bytes are never sign-extended before counting
//! - **Tail indexing**: the remainder loop always indexes the document by the
//!   byte offset, never by the plane index
//!
//! All sub-totals accumulate directly in `u64`, so no widening step is needed
//! at any supported length (see `config::MAX_PLANE_BYTES`).

use crate::kernels::LaneWord;
use crate::vector::QUERY_PLANES;

/// Byte-wise scalar reference. Ground truth for all variants.
///
/// For each plane `i` and byte offset `j`, folds
/// `popcount(query[i * len + j] & document[j])` into the plane sub-total,
/// then combines sub-totals as `Σ_i (sub[i] << i)`.
///
/// Callers must have checked `query.len() == QUERY_PLANES * document.len()`;
/// the hot path carries debug assertions only.
#[inline]
pub fn similarity_bytes_std(query: &[u8], document: &[u8]) -> u64 {
    debug_assert!(!document.is_empty());
    debug_assert_eq!(query.len(), QUERY_PLANES * document.len());
    let len = document.len();
    let mut score = 0u64;
    for plane in 0..QUERY_PLANES {
        let q = &query[plane * len..(plane + 1) * len];
        let mut sub = 0u64;
        for (qb, db) in q.iter().zip(document.iter()) {
            sub += u64::from((qb & db).count_ones());
        }
        score += sub << plane;
    }
    score
}

/// Word-striding scalar kernel, generic over the word width.
///
/// Processes `document.len() - document.len() % W::BYTES` bytes as full
/// words and the remainder byte-wise. Numerically identical to
/// [`similarity_bytes_std`] for every input and word type.
#[inline]
pub fn similarity_words_std<W: LaneWord>(query: &[u8], document: &[u8]) -> u64 {
    debug_assert!(!document.is_empty());
    debug_assert_eq!(query.len(), QUERY_PLANES * document.len());
    let len = document.len();
    let full = len - len % W::BYTES;
    let mut score = 0u64;
    for plane in 0..QUERY_PLANES {
        let q = &query[plane * len..(plane + 1) * len];
        let mut sub = 0u64;
        let mut r = 0;
        while r < full {
            let qw = W::from_le_slice(&q[r..r + W::BYTES]);
            let dw = W::from_le_slice(&document[r..r + W::BYTES]);
            sub += u64::from((qw & dw).count_ones());
            r += W::BYTES;
        }
        for j in r..len {
            sub += u64::from((q[j] & document[j]).count_ones());
        }
        score += sub << plane;
    }
    score
}

/// Plane-unrolled u64 kernel: one pass over the document with four
/// independent sub-totals, one per plane.
///
/// The production scalar path. A single document word is loaded per
/// iteration and AND-ed against the matching word of each plane, so the
/// document streams through cache once instead of four times.
#[inline]
pub fn similarity_unrolled_std(query: &[u8], document: &[u8]) -> u64 {
    debug_assert!(!document.is_empty());
    debug_assert_eq!(query.len(), QUERY_PLANES * document.len());
    let len = document.len();
    let (mut sub0, mut sub1, mut sub2, mut sub3) = (0u64, 0u64, 0u64, 0u64);
    let mut i = 0;
    while i + 8 <= len {
        let dw = u64::from_le_slice(&document[i..i + 8]);
        sub0 += u64::from((u64::from_le_slice(&query[i..i + 8]) & dw).count_ones());
        sub1 += u64::from((u64::from_le_slice(&query[len + i..len + i + 8]) & dw).count_ones());
        sub2 += u64::from((u64::from_le_slice(&query[2 * len + i..2 * len + i + 8]) & dw).count_ones());
        sub3 += u64::from((u64::from_le_slice(&query[3 * len + i..3 * len + i + 8]) & dw).count_ones());
        i += 8;
    }
    // tail as bytes
    for j in i..len {
        let db = document[j];
        sub0 += u64::from((query[j] & db).count_ones());
        sub1 += u64::from((query[len + j] & db).count_ones());
        sub2 += u64::from((query[2 * len + j] & db).count_ones());
        sub3 += u64::from((query[3 * len + j] & db).count_ones());
    }
    sub0 + (sub1 << 1) + (sub2 << 2) + (sub3 << 3)
}
