//! ---
//! pg_section: "02-prime-generation"
//! pg_subsection: "module"
//! pg_type: "source"
//! pg_scope: "code"
//! pg_description: "Trial division against known primes."
//! pg_version: "v0.1.0"
//! pg_owner: "tbd"
//! ---

/// Largest `r` with `r * r <= n`.
pub fn isqrt(n: u64) -> u64 {
    // f64 is close but not exact above 2^52.
    let mut root = (n as f64).sqrt() as u64;
    while root.checked_mul(root).map_or(true, |square| square > n) {
        root -= 1;
    }
    while (root + 1)
        .checked_mul(root + 1)
        .is_some_and(|square| square <= n)
    {
        root += 1;
    }
    root
}

/// Divisor bound for `n`: `floor(sqrt(n)) + 1`.
pub fn divisor_limit(n: u64) -> u64 {
    isqrt(n) + 1
}

/// Trial-divide `n` by the ascending `known` primes up to `floor(sqrt(n)) + 1`.
///
/// With no known primes every candidate passes, which is what makes the
/// first ever candidate, 2, prime.
pub fn is_prime(n: u64, known: &[u64]) -> bool {
    is_prime_by(n, known)
}

/// [`is_prime`] over any ascending sequence of divisors.
///
/// The scan stops at the first divisor above the bound, so callers can
/// chain several sorted sources without materialising them.
pub fn is_prime_by<'a, I>(n: u64, divisors: I) -> bool
where
    I: IntoIterator<Item = &'a u64>,
{
    let limit = divisor_limit(n);
    for &p in divisors {
        if p > limit {
            break;
        }
        // 0 and 1 are never primes; a corrupt store must not make every n composite.
        if p < 2 {
            continue;
        }
        if n % p == 0 {
            return false;
        }
    }
    true
}
