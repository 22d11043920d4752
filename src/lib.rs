// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! # **Bitplane Kernels** - *Multi-Plane Binary Similarity Primitives*
//!
//! Bit-exact AND + popcount similarity kernels for quantised vector search.
//!
//! ## Overview
//!
//! This crate scores a 1-bit-quantised document vector against a 4-bit-quantised
//! query vector. The query is stored as four contiguous bit-planes of equal
//! length; plane `i` contributes with weight `2^i`:
//!
//! ```text
//! score = Σ_i ( popcount(plane_i AND document) << i )
//! ```
//!
//! The score is an integer approximation of the inner product between the
//! original (pre-quantisation) vectors, and is the scoring primitive behind
//! binary quantisation in approximate nearest-neighbour search.
//!
//! ## Architecture
//!
//! The kernels follow a three-tier architecture:
//! - **Dispatch layer**: selects SIMD or scalar implementations based on feature flags
//! - **SIMD kernels**: vectorised implementations using `std::simd` with configurable lane counts
//! - **Scalar kernels**: byte- and word-level fallback implementations for compatibility
//!
//! Every vectorised variant is bit-identical to the scalar reference for all
//! inputs; `validate` in [`validate`] cross-checks this per dimensionality
//! before any variant is trusted for measurement or production use.
//!
//! ## Modules
//! - **`kernels::dispatch`**: public entry points with precondition checks and SIMD/scalar selection
//! - **`kernels::simd`**: vectorised kernels (`simd` feature, nightly `std::simd`)
//! - **`kernels::std`**: scalar reference and word-granularity fallback kernels
//! - **`vector`**: immutable bit-packed document/query buffer views
//! - **`validate`**: differential validation harness over the variant registry
//! - **`config`**: lane-width selection and supported-size constants
//! - **`errors`**: kernel error types

// At the time of writing this unlocks extra std::simd that the developers
// intend on stabilising but haven't yet.
#![cfg_attr(feature = "simd", feature(portable_simd))]

// compile with RUSTFLAGS="-C target-cpu=native" cargo +nightly build --features simd

pub mod config;
pub mod errors;
pub mod vector;

pub mod kernels {
    pub mod dispatch;
    #[cfg(feature = "simd")]
    pub mod simd;
    pub mod std;

    mod words;
    pub use words::LaneWord;

    /// Ceiling of the number of byte-popcount folds an 8-bit accumulator
    /// element can absorb before it must be widened.
    ///
    /// Each AND-ed byte contributes at most 8 to its element, so a `u8`
    /// element holds `floor((2^8 - 1) / 8) = 31` folds without wrapping.
    pub const MAX_BYTE_FOLDS: usize = (u8::MAX as usize) / 8;

    /// Number of byte-popcount folds actually performed per 8-bit accumulator
    /// block before widening into a 64-bit sub-total.
    ///
    /// Must not exceed [`MAX_BYTE_FOLDS`]. 16 keeps each element at or below
    /// 128 and the block length a power of two.
    pub const BYTE_FOLD_CHUNK: usize = 16;
}

pub mod validate;

pub use errors::{KernelError, MismatchError};
pub use kernels::dispatch::{similarity, similarity_packed, similarity_u8, similarity_with};
pub use vector::{BitDocument, BitQuery, QUERY_PLANES};
