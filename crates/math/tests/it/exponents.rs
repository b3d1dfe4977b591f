//! Fixed tables of rational exponents.

use frax_math::{FraxError, U256, frax_exp};

fn exp(x: u128, a: u32, b: u32) -> Result<u128, FraxError> {
    frax_exp(U256::from(x), a, b).map(|r| r.to::<u128>())
}

#[test]
fn perfect_powers_with_arbitrary_numerators() {
    for b in 2..10 {
        for a in 1..10 {
            for i in 1..10u128 {
                assert_eq!(exp(i.pow(b), a, b), Ok(i.pow(a)), "({i}^{b})^({a}/{b})");
            }
        }
    }
}

#[test]
fn unreduced_exponents_only_need_the_reduced_power() {
    let nine_to_nine = 9u128.pow(9);
    assert_eq!(exp(nine_to_nine, 9, 9), Ok(nine_to_nine));
    assert_eq!(exp(9u128.pow(8), 9, 8), Ok(nine_to_nine));
    assert_eq!(exp(1 << 64, 6, 4), Ok(1 << 96));
    assert_eq!(exp(1 << 64, 4, 3), Err(FraxError::Overflow));
}

#[test]
fn perfect_squares_and_cubes() {
    for n in (0..30_000u128).step_by(7) {
        assert_eq!(exp(n * n, 1, 2), Ok(n));
    }
    for n in 0..1_000u128 {
        assert_eq!(exp(n * n * n, 1, 3), Ok(n));
    }
}

#[test]
fn just_below_perfect_powers_round_down() {
    for b in 2..10 {
        for i in 2..50u128 {
            assert_eq!(exp(i.pow(b) - 1, 1, b), Ok(i - 1), "floor(({i}^{b} - 1)^(1/{b}))");
        }
    }
}

#[test]
fn known_imperfect_roots() {
    assert_eq!(exp(2, 1, 2), Ok(1));
    assert_eq!(exp(10, 1, 2), Ok(3));
    assert_eq!(exp(1_000_000_007, 1, 2), Ok(31_622));
    assert_eq!(exp(999_999_999, 1, 3), Ok(999));
    assert_eq!(exp(701_408_733, 1, 9), Ok(9));
    assert_eq!(exp(10, 3, 2), Ok(31));
    assert_eq!(exp(2, 9, 4), Ok(4));
}

#[test]
fn boundaries() {
    for a in 1..10 {
        for b in 1..10 {
            assert_eq!(exp(0, a, b), Ok(0));
            assert_eq!(exp(1, a, b), Ok(1));
        }
        assert_eq!(exp(12, a, 1), Ok(12u128.pow(a)));
        assert_eq!(exp(12, a, 0), Err(FraxError::InvalidExponent));
    }
}

#[test]
fn word_limits() {
    assert_eq!(frax_exp(U256::MAX, 1, 1), Ok(U256::MAX));
    assert_eq!(frax_exp(U256::MAX, 1, 2), Ok(U256::from(u128::MAX)));
    assert_eq!(frax_exp(U256::MAX, 2, 3), Err(FraxError::Overflow));
    assert_eq!(frax_exp(U256::from(u128::MAX), 2, 4), Ok(U256::from(u64::MAX)));
}
