//! src/kernel.rs
//!
//! Primality kernel: pure functions with no shared state.
//!
//! Two entry points:
//! - `is_prime`: deterministic trial division with 6k±1 stepping, O(√n).
//! - `segmented_sieve`: ordered prime enumeration over `[start, end]` with
//!   memory bounded by `O(segment_size + √end)` regardless of range width.
//!
//! The segmented form exists because a single marker array over the whole
//! range would need memory proportional to `end - start`, which is infeasible
//! for ranges near 2×10⁹. Instead a base Eratosthenes sieve up to `⌊√end⌋ + 1`
//! seeds per-segment marker arrays sized to one segment only.

/// Deterministic primality test by trial division.
///
/// Skips multiples of 2 and 3, then tests divisors of the form 6k±1 up to
/// `⌊√n⌋`. Returns false for `n < 2`.
pub fn is_prime(n: u64) -> bool {
    if n < 2 {
        return false;
    }
    if n < 4 {
        return true; // 2 and 3
    }
    if n % 2 == 0 || n % 3 == 0 {
        return false;
    }

    let mut i: u64 = 5;
    while i * i <= n {
        if n % i == 0 || n % (i + 2) == 0 {
            return false;
        }
        i += 6;
    }
    true
}

/// Returns the ordered sequence of primes in `[start, end]` (inclusive).
///
/// For ranges no wider than `segment_size` this falls back to an `is_prime`
/// scan per candidate, which beats sieve setup overhead on small inputs. For
/// wider ranges it runs a two-level segmented sieve:
///
/// 1. A base Eratosthenes sieve collects all primes up to `⌊√end⌋ + 1`.
/// 2. The range is walked in sub-segments of at most `segment_size` numbers,
///    each with its own marker array. For each base prime `p`, marking starts
///    at `max(p², ⌈low/p⌉·p)` — rounding up to the first multiple of `p`
///    inside the segment, so segment boundaries neither skip nor double-count
///    any candidate.
///
/// The candidate 1 is never emitted. `segment_size` must be >= 1.
pub fn segmented_sieve(start: u64, end: u64, segment_size: u64) -> Vec<u64> {
    debug_assert!(segment_size >= 1);

    if start > end {
        return Vec::new();
    }

    // Small ranges: per-candidate trial division, no sieve setup.
    if end - start <= segment_size {
        return (start..=end).filter(|&n| is_prime(n)).collect();
    }

    let mut primes = Vec::new();

    // Base sieve: all primes up to sqrt(end) + 1. Bounded memory, independent
    // of the range width.
    let limit = (end as f64).sqrt() as u64 + 1;
    let mut is_prime_small = vec![true; (limit + 1) as usize];
    let mut small_primes: Vec<u64> = Vec::new();

    for i in 2..=limit {
        if is_prime_small[i as usize] {
            small_primes.push(i);
            let mut j = i * i;
            while j <= limit {
                is_prime_small[j as usize] = false;
                j += i;
            }
        }
    }

    // Walk the range in segments, marking composites with the base primes.
    let seg = segment_size.min(end - start + 1);
    let mut low = start;

    while low <= end {
        let high = (low + seg - 1).min(end);
        let mut marker = vec![true; (high - low + 1) as usize];

        for &p in &small_primes {
            // First multiple of p in [low, high] that is >= p².
            let first = (p * p).max(low.div_ceil(p) * p);
            let mut j = first;
            while j <= high {
                if j >= low {
                    marker[(j - low) as usize] = false;
                }
                j += p;
            }
        }

        for (offset, &unmarked) in marker.iter().enumerate() {
            let n = low + offset as u64;
            if unmarked && n >= 2 {
                primes.push(n);
            }
        }

        low = high + 1;
    }

    primes
}
