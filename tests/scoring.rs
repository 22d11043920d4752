//! Behavioural contract of the public scoring surface: plane weighting,
//! tail handling, determinism, overflow density, and precondition failures.

mod common;

use bitplane_kernels::config::LaneWidth;
use bitplane_kernels::kernels::std::similarity_bytes_std;
use bitplane_kernels::validate::variants;
use bitplane_kernels::{
    similarity, similarity_packed, similarity_u8, similarity_with, BitDocument, BitQuery,
    KernelError, QUERY_PLANES,
};
use common::{filled_pair, random_pair};

#[test]
fn single_byte_worked_example() {
    // doc 0b11110000; planes 0xA0, 0x50, 0x0F, 0xFF
    // plane popcounts against doc: 2, 2, 0, 4
    // score = 2 + (2<<1) + (0<<2) + (4<<3) = 38
    let document = [0b1111_0000u8];
    let query = [0b1010_0000u8, 0b0101_0000, 0b0000_1111, 0b1111_1111];
    assert_eq!(similarity(&query, &document).unwrap(), 38);
}

#[test]
fn plane_weight_is_power_of_two() {
    // Only plane `i` is populated; the score must be the raw popcount-sum
    // shifted left by the plane index.
    let len = 24usize;
    let document = vec![0xFFu8; len];
    for plane in 0..QUERY_PLANES {
        let mut query = vec![0u8; QUERY_PLANES * len];
        query[plane * len..(plane + 1) * len].fill(0b0011_0101);
        let ones_per_byte = 0b0011_0101u8.count_ones() as u64;
        let expected = (ones_per_byte * len as u64) << plane;
        assert_eq!(similarity(&query, &document).unwrap(), expected);
        for variant in variants() {
            assert_eq!((variant.kernel)(&query, &document), expected);
        }
    }
}

#[test]
fn deterministic_across_repeated_calls() {
    let (query, document) = random_pair(1024);
    let first = similarity(&query, &document).unwrap();
    for _ in 0..10 {
        assert_eq!(similarity(&query, &document).unwrap(), first);
    }
}

#[test]
fn sub_lane_tails_match_reference() {
    // 136 bits = 17 bytes: not divisible by any lane width under test, so
    // every variant exercises its boundary between chunked and byte-wise work.
    for dims in [136usize, 2066] {
        let (query, document) = random_pair(dims);
        let expected = similarity_bytes_std(&query, &document);
        assert_eq!(similarity(&query, &document).unwrap(), expected);
        for width in [
            LaneWidth::W64,
            LaneWidth::W128,
            LaneWidth::W256,
            LaneWidth::W512,
        ] {
            assert_eq!(
                similarity_with(width, &query, &document).unwrap(),
                expected,
                "lane width {:?} mishandled the tail at dims={}",
                width,
                dims
            );
        }
    }
}

#[test]
fn maximal_density_at_largest_dims() {
    // 0xFF everywhere at 4096 bits maximises every partial sum; any
    // accumulator wrap in a variant would diverge from the closed form.
    let (query, document) = filled_pair(4096, 0xFF);
    let len = document.len() as u64;
    let expected = (8 * len) * (1 + 2 + 4 + 8);
    assert_eq!(similarity_bytes_std(&query, &document), expected);
    for variant in variants() {
        assert_eq!(
            (variant.kernel)(&query, &document),
            expected,
            "variant `{}` wrapped at maximal density",
            variant.name
        );
    }
}

#[test]
fn preferred_lane_width_scores_correctly() {
    let (query, document) = random_pair(768);
    let expected = similarity_bytes_std(&query, &document);
    let width = LaneWidth::preferred();
    assert_eq!(similarity_with(width, &query, &document).unwrap(), expected);
}

#[test]
fn byte_element_strategy_matches_reference() {
    // 2066 bits leaves a sub-lane tail at every detectable byte lane count
    for dims in [8usize, 512, 2066] {
        let (query, document) = random_pair(dims);
        let expected = similarity_bytes_std(&query, &document);
        assert_eq!(similarity_u8(&query, &document).unwrap(), expected);
    }
}

#[test]
fn length_violations_are_errors() {
    assert!(matches!(
        similarity(&[], &[]),
        Err(KernelError::LengthMismatch(_))
    ));
    assert!(matches!(
        similarity(&[0u8; 4], &[0u8; 2]),
        Err(KernelError::LengthMismatch(_))
    ));
    assert!(matches!(
        similarity(&[0u8; 9], &[0u8; 2]),
        Err(KernelError::LengthMismatch(_))
    ));
}

#[test]
fn packed_views_enforce_the_same_contract() {
    let document = [0xAAu8; 6];
    let query = [0x55u8; 24];
    let doc = BitDocument::new(&document).unwrap();
    let q = BitQuery::new(&query, 6).unwrap();
    assert_eq!(
        similarity_packed(&q, &doc).unwrap(),
        similarity(&query, &document).unwrap()
    );

    let other = [0u8; 3];
    let short_doc = BitDocument::new(&other).unwrap();
    assert!(matches!(
        similarity_packed(&q, &short_doc),
        Err(KernelError::LengthMismatch(_))
    ));
}
