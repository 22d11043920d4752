// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! # **Differential Validation Harness** - *Cross-Checking Kernel Variants*
//!
//! Before a kernel variant is trusted for a given dimensionality, every
//! registered variant is invoked on freshly generated random data and its
//! score compared with the byte-wise scalar reference. The first
//! disagreement is returned as a [`MismatchError`] naming the variant and
//! both values; callers must treat it as fatal and abort before measuring.
//!
//! The registry is declared statically, so the set of variants is
//! exhaustively enumerable at compile time. This is a one-shot precondition
//! check per dimensionality, not a background process.

use rand::{rng, Rng};

use crate::errors::MismatchError;
use crate::kernels::std::{similarity_bytes_std, similarity_unrolled_std, similarity_words_std};
use crate::vector::QUERY_PLANES;

/// A registered kernel variant: a display name and the kernel function.
///
/// All variants share one contract: pre-validated `(query, document)` slices
/// in, 64-bit score out, bit-identical to [`similarity_bytes_std`].
#[derive(Clone, Copy)]
pub struct KernelVariant {
    /// Stable identifier used in mismatch reports.
    pub name: &'static str,
    /// The kernel entry point.
    pub kernel: fn(&[u8], &[u8]) -> u64,
}

fn words_u32(query: &[u8], document: &[u8]) -> u64 {
    similarity_words_std::<u32>(query, document)
}

fn words_u64(query: &[u8], document: &[u8]) -> u64 {
    similarity_words_std::<u64>(query, document)
}

#[cfg(feature = "simd")]
mod simd_variants {
    use crate::kernels::simd::{similarity_u64_simd, similarity_u8_simd};

    pub fn u64x1(query: &[u8], document: &[u8]) -> u64 {
        similarity_u64_simd::<1>(query, document)
    }

    pub fn u64x2(query: &[u8], document: &[u8]) -> u64 {
        similarity_u64_simd::<2>(query, document)
    }

    pub fn u64x4(query: &[u8], document: &[u8]) -> u64 {
        similarity_u64_simd::<4>(query, document)
    }

    pub fn u64x8(query: &[u8], document: &[u8]) -> u64 {
        similarity_u64_simd::<8>(query, document)
    }

    pub fn u8x16(query: &[u8], document: &[u8]) -> u64 {
        similarity_u8_simd::<16>(query, document)
    }

    pub fn u8x32(query: &[u8], document: &[u8]) -> u64 {
        similarity_u8_simd::<32>(query, document)
    }

    pub fn u8x64(query: &[u8], document: &[u8]) -> u64 {
        similarity_u8_simd::<64>(query, document)
    }
}

#[cfg(not(feature = "simd"))]
static VARIANTS: &[KernelVariant] = &[
    KernelVariant { name: "scalar_bytes", kernel: similarity_bytes_std },
    KernelVariant { name: "scalar_words_u32", kernel: words_u32 },
    KernelVariant { name: "scalar_words_u64", kernel: words_u64 },
    KernelVariant { name: "scalar_unrolled_u64", kernel: similarity_unrolled_std },
];

#[cfg(feature = "simd")]
static VARIANTS: &[KernelVariant] = &[
    KernelVariant { name: "scalar_bytes", kernel: similarity_bytes_std },
    KernelVariant { name: "scalar_words_u32", kernel: words_u32 },
    KernelVariant { name: "scalar_words_u64", kernel: words_u64 },
    KernelVariant { name: "scalar_unrolled_u64", kernel: similarity_unrolled_std },
    KernelVariant { name: "simd_u64x1", kernel: simd_variants::u64x1 },
    KernelVariant { name: "simd_u64x2", kernel: simd_variants::u64x2 },
    KernelVariant { name: "simd_u64x4", kernel: simd_variants::u64x4 },
    KernelVariant { name: "simd_u64x8", kernel: simd_variants::u64x8 },
    KernelVariant { name: "simd_u8x16", kernel: simd_variants::u8x16 },
    KernelVariant { name: "simd_u8x32", kernel: simd_variants::u8x32 },
    KernelVariant { name: "simd_u8x64", kernel: simd_variants::u8x64 },
];

/// Every kernel variant registered for this build configuration.
#[must_use]
pub fn variants() -> &'static [KernelVariant] {
    VARIANTS
}

/// Dimensionalities the pre-measurement sanity pass exercises, chosen to
/// cover word and lane boundaries, sub-lane tails, and the largest supported
/// benchmark size.
pub const VALIDATION_DIMS: &[usize] =
    &[8, 136, 384, 512, 768, 1024, 1536, 2048, 2056, 2066, 4096];

/// Cross-checks every registered variant against the scalar reference at the
/// given dimensionality (in bits per plane), on freshly generated random data.
///
/// # Errors
/// The first [`MismatchError`] encountered. A mismatch is a configuration or
/// build defect, not a per-call runtime condition; the caller must abort
/// before trusting any measurement.
pub fn validate(dims: usize) -> Result<(), MismatchError> {
    debug_assert!(dims >= 1);
    let len = dims.div_ceil(8);
    let mut rng = rng();
    let mut document = vec![0u8; len];
    rng.fill(&mut document[..]);
    let mut query = vec![0u8; QUERY_PLANES * len];
    rng.fill(&mut query[..]);

    let expected = similarity_bytes_std(&query, &document);
    for variant in variants() {
        let actual = (variant.kernel)(&query, &document);
        if actual != expected {
            return Err(MismatchError {
                variant: variant.name,
                dims,
                expected,
                actual,
            });
        }
    }
    Ok(())
}

/// Runs [`validate`] over the whole [`VALIDATION_DIMS`] grid.
///
/// # Errors
/// The first [`MismatchError`] encountered.
pub fn validate_all() -> Result<(), MismatchError> {
    for &dims in VALIDATION_DIMS {
        validate(dims)?;
    }
    Ok(())
}
