// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! # **Dispatch Module** - *Compile-Time SIMD/Scalar Selection for Similarity Kernels*
//!
//! Dispatcher that selects between SIMD and scalar implementations at compile
//! time based on feature flags, after validating the input length contract.
//!
//! Prefer this unless you want to access the underlying kernel functions directly.

use crate::config::LaneWidth;
use crate::errors::KernelError;
use crate::vector::{BitDocument, BitQuery, QUERY_PLANES};

/// Checks the kernel's length preconditions:
/// `query.len() == QUERY_PLANES * document.len()` and `document.len() >= 1`.
#[inline]
fn check_lengths(query: &[u8], document: &[u8]) -> Result<(), KernelError> {
    if document.is_empty() {
        return Err(KernelError::LengthMismatch(
            "document buffer must hold at least one byte".to_string(),
        ));
    }
    if query.len() != QUERY_PLANES * document.len() {
        return Err(KernelError::LengthMismatch(format!(
            "query holds {} bytes, expected {} ({} planes of {})",
            query.len(),
            QUERY_PLANES * document.len(),
            QUERY_PLANES,
            document.len()
        )));
    }
    Ok(())
}

/// Computes the weighted AND + popcount similarity score with automatic
/// SIMD/scalar selection.
///
/// `query` is `QUERY_PLANES` concatenated planes of `document.len()` bytes
/// each, plane `i` at offset `i * document.len()` with weight `2^i`. Neither
/// buffer is mutated; the result is computed fresh per invocation.
///
/// # Errors
/// [`KernelError::LengthMismatch`] when the buffers violate the length
/// contract. Length violations are never silently truncated or padded.
///
/// # Example
/// ```rust
/// use bitplane_kernels::similarity;
///
/// let document = [0b1111_0000u8];
/// let query = [0b1010_0000u8, 0b0101_0000, 0b0000_1111, 0b1111_1111];
/// assert_eq!(similarity(&query, &document).unwrap(), 38);
/// ```
#[inline]
pub fn similarity(query: &[u8], document: &[u8]) -> Result<u64, KernelError> {
    check_lengths(query, document)?;
    #[cfg(feature = "simd")]
    {
        Ok(crate::kernels::simd::similarity_u64_simd::<{ crate::config::W64 }>(query, document))
    }
    #[cfg(not(feature = "simd"))]
    {
        Ok(crate::kernels::std::similarity_unrolled_std(query, document))
    }
}

/// Computes the similarity score with an explicitly selected lane width.
///
/// Lane width is a one-time configuration decision (see
/// [`LaneWidth::preferred`]); thread the chosen value through calls rather
/// than re-detecting per invocation. Without the `simd` feature every width
/// routes to the 64-bit scalar word path, which is numerically identical.
#[inline]
pub fn similarity_with(
    width: LaneWidth,
    query: &[u8],
    document: &[u8],
) -> Result<u64, KernelError> {
    check_lengths(query, document)?;
    #[cfg(feature = "simd")]
    {
        use crate::kernels::simd::similarity_u64_simd;
        Ok(match width {
            LaneWidth::W64 => similarity_u64_simd::<1>(query, document),
            LaneWidth::W128 => similarity_u64_simd::<2>(query, document),
            LaneWidth::W256 => similarity_u64_simd::<4>(query, document),
            LaneWidth::W512 => similarity_u64_simd::<8>(query, document),
        })
    }
    #[cfg(not(feature = "simd"))]
    {
        let _ = width;
        Ok(crate::kernels::std::similarity_unrolled_std(query, document))
    }
}

/// Computes the similarity score with the 8-bit-element accumulation
/// strategy, at the byte lane count detected for the build target (`W8`
/// from `simd_lanes.rs`).
///
/// The byte strategy uses the cheapest popcount instruction but must widen
/// its accumulators periodically; whether it beats the 64-bit-element path
/// is target-dependent, so both are exposed. Without the `simd` feature this
/// routes to the scalar word path, which is numerically identical.
#[inline]
pub fn similarity_u8(query: &[u8], document: &[u8]) -> Result<u64, KernelError> {
    check_lengths(query, document)?;
    #[cfg(feature = "simd")]
    {
        use crate::config::W8;
        use crate::kernels::simd::similarity_u8_simd;
        Ok(match W8 {
            w if w >= 64 => similarity_u8_simd::<64>(query, document),
            32 => similarity_u8_simd::<32>(query, document),
            16 => similarity_u8_simd::<16>(query, document),
            _ => similarity_u8_simd::<8>(query, document),
        })
    }
    #[cfg(not(feature = "simd"))]
    {
        Ok(crate::kernels::std::similarity_unrolled_std(query, document))
    }
}

/// Computes the similarity score for pre-validated packed views.
///
/// The views' constructors enforce the length contract, so this entry point
/// is infallible apart from the plane-length pairing check between the two
/// views.
#[inline]
pub fn similarity_packed(query: &BitQuery<'_>, document: &BitDocument<'_>) -> Result<u64, KernelError> {
    if query.plane_len() != document.len() {
        return Err(KernelError::LengthMismatch(format!(
            "query plane length {} does not match document length {}",
            query.plane_len(),
            document.len()
        )));
    }
    similarity(query.as_bytes(), document.as_bytes())
}
