//! Property tests over random and boundary inputs.

use frax_math::{
    Engine, FraxError, Limits, StepCounter, U256, checked_pow, frax_exp, is_floor_root, nth_root,
    reduce,
};
use proptest::prelude::*;

/// Floor `b`-th root by bisection, independent of the engine.
fn reference_root(y: u128, b: u32) -> u128 {
    let (mut lo, mut hi) = (0u128, 1u128 << 64);
    // invariant: lo^b <= y < hi^b
    while hi - lo > 1 {
        let mid = lo + (hi - lo) / 2;
        match mid.checked_pow(b) {
            Some(p) if p <= y => lo = mid,
            _ => hi = mid,
        }
    }
    lo
}

/// Words skewed towards small values, powers of two and the top of the range.
fn word() -> impl Strategy<Value = U256> {
    prop_oneof![
        3 => any::<u64>().prop_map(U256::from),
        3 => any::<[u8; 32]>().prop_map(U256::from_be_bytes),
        1 => (0usize..256).prop_map(|shift| U256::from(1) << shift),
        1 => (0usize..256).prop_map(|shift| U256::MAX >> shift),
        1 => (0u64..16).prop_map(U256::from),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 512, ..ProptestConfig::default() })]

    #[test]
    fn exact_on_perfect_powers(n in any::<u32>(), b in 1u32..10) {
        let n = U256::from(n);
        // n < 2^32, so n^b always fits for b <= 8
        if let Ok(y) = checked_pow(n, b) {
            prop_assert_eq!(frax_exp(y, 1, b), Ok(n));
        } else {
            prop_assert_eq!(b, 9);
        }
    }

    #[test]
    fn floor_matches_bisection(x in 0u64..1_000_000_000, b in 2u32..10) {
        let expected = reference_root(x as u128, b);
        prop_assert_eq!(frax_exp(U256::from(x), 1, b), Ok(U256::from(expected)));
    }

    #[test]
    fn floor_matches_bisection_on_wide_inputs(x in any::<u64>(), wide in any::<u128>(), b in 2u32..10) {
        let square = x as u128 * x as u128;
        prop_assert_eq!(frax_exp(U256::from(x), 2, b), Ok(U256::from(reference_root(square, b))));
        prop_assert_eq!(frax_exp(U256::from(wide), 1, b), Ok(U256::from(reference_root(wide, b))));
    }

    #[test]
    fn root_is_floor_over_full_word(y in word(), b in 1u32..300) {
        let r = nth_root(y, b).unwrap();
        prop_assert!(is_floor_root(y, b, r), "{}^(1/{}) = {}", y, b, r);
    }

    #[test]
    fn rational_exponents_on_perfect_power_bases(i in 1u64..1_000, a in 1u32..10, b in 2u32..10) {
        let base = U256::from(i);
        let x = checked_pow(base, b).unwrap();
        let (num, _) = reduce(a, b);
        // only the reduced power has to fit
        match checked_pow(x, num) {
            Ok(_) => prop_assert_eq!(frax_exp(x, a, b), checked_pow(base, a)),
            Err(_) => prop_assert_eq!(frax_exp(x, a, b), Err(FraxError::Overflow)),
        }
    }

    #[test]
    fn equal_terms_are_identity(x in word(), n in 1u32..1_000) {
        prop_assert_eq!(frax_exp(x, n, n), Ok(x));
    }

    #[test]
    fn scaled_exponents_agree(x in 0u64..1_000_000, a in 1u32..8, b in 1u32..8, k in 1u32..20) {
        let x = U256::from(x);
        prop_assert_eq!(frax_exp(x, a * k, b * k), frax_exp(x, a, b));
    }

    #[test]
    fn monotone_in_base(x1 in 0u32..(1 << 28), x2 in 0u32..(1 << 28), a in 1u32..10, b in 1u32..10) {
        let (lo, hi) = if x1 <= x2 { (x1, x2) } else { (x2, x1) };
        let lo = frax_exp(U256::from(lo), a, b).unwrap();
        let hi = frax_exp(U256::from(hi), a, b).unwrap();
        prop_assert!(lo <= hi);
    }

    #[test]
    fn deterministic(x in word(), a in 0u32..10, b in 0u32..10) {
        let engine = Engine::default();
        let (mut first, mut second) = (StepCounter::new(), StepCounter::new());
        let r1 = engine.frax_exp(x, a, b, &mut first);
        let r2 = engine.frax_exp(x, a, b, &mut second);
        prop_assert_eq!(r1, r2);
        prop_assert_eq!(first, second);
        prop_assert_eq!(r1, frax_exp(x, a, b));
    }

    #[test]
    fn unit_denominator_is_power(x in word(), a in 0u32..10) {
        prop_assert_eq!(frax_exp(x, a, 1), checked_pow(x, a));
    }

    #[test]
    fn zero_denominator_fails(x in word(), a in 0u32..10) {
        prop_assert_eq!(frax_exp(x, a, 0), Err(FraxError::InvalidExponent));
    }

    #[test]
    fn default_limits_never_bind(y in word(), b in 2u32..300) {
        let mut counter = StepCounter::new();
        let r = Engine::default().root(y, b, &mut counter);
        prop_assert!(r.is_ok());
        prop_assert!(counter.iterations() < Limits::DEFAULT_MAX_ITERATIONS);
        prop_assert_eq!(counter.corrections(), 0);
    }
}
