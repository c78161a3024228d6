//! Primality kernel tests: oracle equivalence, boundary handling, and the
//! small-range fallback vs the segmented path.

mod common;
use common::primes_naive;

use prime_grid::kernel::{is_prime, segmented_sieve};

// ============================================================================
// 1. is_prime
// ============================================================================

#[test]
fn test_is_prime_small_values() {
    assert!(!is_prime(0));
    assert!(!is_prime(1));
    assert!(is_prime(2));
    assert!(is_prime(3));
    assert!(!is_prime(4));
    assert!(is_prime(5));
    assert!(!is_prime(9));
    assert!(is_prime(97));
    assert!(!is_prime(100));
}

#[test]
fn test_is_prime_matches_naive_oracle() {
    for n in 0..2_000u64 {
        assert_eq!(
            is_prime(n),
            !primes_naive(n, n).is_empty(),
            "disagreement at n = {}",
            n
        );
    }
}

#[test]
fn test_is_prime_large_values() {
    assert!(is_prime(99_991));
    assert!(!is_prime(100_000)); // 2^5 * 5^5
    assert!(is_prime(1_999_999_973));
    assert!(!is_prime(1_999_999_971)); // divisible by 3
}

// ============================================================================
// 2. segmented_sieve
// ============================================================================

#[test]
fn test_sieve_first_fifty() {
    let expected: Vec<u64> = vec![2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47];
    assert_eq!(segmented_sieve(2, 50, 100_000), expected);
}

#[test]
fn test_sieve_matches_oracle_across_segment_boundaries() {
    // A tiny segment size forces the segmented path and many boundaries.
    for &(start, end) in &[(2u64, 3_000u64), (950, 1_050), (7_890, 8_010)] {
        let got = segmented_sieve(start, end, 100);
        assert_eq!(
            got,
            primes_naive(start, end),
            "mismatch on [{}, {}]",
            start,
            end
        );
    }
}

#[test]
fn test_sieve_fallback_and_segmented_paths_agree() {
    let fallback = segmented_sieve(2, 5_000, 100_000); // range <= segment size
    let segmented = segmented_sieve(2, 5_000, 128); // forces segmentation
    assert_eq!(fallback, segmented);
}

#[test]
fn test_sieve_single_element_ranges() {
    assert!(segmented_sieve(100_000, 100_000, 100_000).is_empty());
    assert_eq!(segmented_sieve(99_991, 99_991, 100_000), vec![99_991]);
}

#[test]
fn test_sieve_never_emits_zero_or_one() {
    assert_eq!(segmented_sieve(0, 10, 100), vec![2, 3, 5, 7]);
    assert_eq!(segmented_sieve(0, 10, 3), vec![2, 3, 5, 7]);
    assert_eq!(segmented_sieve(1, 1, 100), Vec::<u64>::new());
}

#[test]
fn test_sieve_empty_when_start_exceeds_end() {
    assert!(segmented_sieve(100, 50, 10).is_empty());
}

#[test]
fn test_sieve_output_strictly_increasing() {
    let primes = segmented_sieve(2, 20_000, 500);
    assert!(primes.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn test_sieve_high_range_far_from_origin() {
    // Exercises the base-sieve seeding: every composite here has its smallest
    // factor well below the range itself.
    let got = segmented_sieve(1_000_000, 1_001_000, 100);
    assert_eq!(got, primes_naive(1_000_000, 1_001_000));
}
