//! ---
//! pg_section: "02-prime-generation"
//! pg_subsection: "integration-tests"
//! pg_type: "source"
//! pg_scope: "code"
//! pg_description: "Property and oracle tests for prime generation."
//! pg_version: "v0.1.0"
//! pg_owner: "tbd"
//! ---
use anyhow::Context;
use primegen_core::{generate_window, is_prime, PrimeGenerator, PrimeList};
use proptest::prelude::*;

fn brute_force(n: u64) -> bool {
    n >= 2 && (2..n).all(|d| n % d != 0)
}

#[test]
fn agrees_with_brute_force_up_to_ten_thousand() {
    let mut below = Vec::new();
    for n in 2..=10_000u64 {
        let expected = brute_force(n);
        assert_eq!(is_prime(n, &below), expected, "disagreement at {n}");
        if expected {
            below.push(n);
        }
    }
    assert_eq!(below.len(), 1229);
}

#[test]
fn consecutive_windows_match_the_oracle() -> anyhow::Result<()> {
    let mut known = Vec::new();
    for _ in 0..10 {
        let found = generate_window(&known, 1_000)?;
        known.extend(found);
    }
    let last = *known.last().context("no primes generated")?;
    assert!(last > 9_000);
    assert_eq!(known, primes_up_to(last));
    Ok(())
}

#[test]
fn prime_free_window_does_not_advance_checkpoint() -> anyhow::Result<()> {
    let generator = PrimeGenerator::with_step_size(1)?;
    let mut known = PrimeList::new();
    for _ in 0..5 {
        let found = generator.generate(&known)?;
        known.extend_checked(&found)?;
    }
    // Window [4, 4] holds no prime, so every later run rescans it.
    assert_eq!(known.as_slice(), &[2, 3]);
    assert_eq!(generator.window_for(&known)?.start(), 4);
    Ok(())
}

fn primes_up_to(limit: u64) -> Vec<u64> {
    (2..=limit).filter(|n| brute_force(*n)).collect()
}

proptest! {
    #[test]
    fn new_primes_stay_inside_window(prefix in 1usize..150, step in 1u64..400) {
        let known: Vec<u64> = primes_up_to(1_000).into_iter().take(prefix).collect();
        let last = *known.last().unwrap();
        let found = generate_window(&known, step).unwrap();
        prop_assert!(found.iter().all(|p| *p > last && *p <= last + step));
        prop_assert!(found.windows(2).all(|pair| pair[0] < pair[1]));
        prop_assert!(found.iter().all(|p| brute_force(*p)));
    }

    #[test]
    fn generation_is_deterministic(prefix in 0usize..100, step in 1u64..300) {
        let known: Vec<u64> = primes_up_to(600).into_iter().take(prefix).collect();
        prop_assert_eq!(
            generate_window(&known, step).unwrap(),
            generate_window(&known, step).unwrap()
        );
    }
}
