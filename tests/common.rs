//! Shared helpers for the kernel equivalence suites.
#![allow(unused)]

use bitplane_kernels::QUERY_PLANES;
use rand::{rng, Rng};

/// Dimensionalities (bits per plane) covering word boundaries, sub-lane
/// tails, and the largest benchmarked size.
pub const DIMS: &[usize] = &[8, 136, 384, 512, 768, 1024, 1536, 2048, 2056, 2066, 4096];

/// Byte length of one plane for a dimensionality in bits.
pub fn plane_bytes(dims: usize) -> usize {
    dims.div_ceil(8)
}

/// Random document/query pair for a dimensionality in bits.
pub fn random_pair(dims: usize) -> (Vec<u8>, Vec<u8>) {
    let len = plane_bytes(dims);
    let mut rng = rng();
    let mut document = vec![0u8; len];
    rng.fill(&mut document[..]);
    let mut query = vec![0u8; QUERY_PLANES * len];
    rng.fill(&mut query[..]);
    (query, document)
}

/// Document/query pair with every byte set to `fill`.
pub fn filled_pair(dims: usize, fill: u8) -> (Vec<u8>, Vec<u8>) {
    let len = plane_bytes(dims);
    (vec![fill; QUERY_PLANES * len], vec![fill; len])
}
