use crate::{FraxError, Inspector, Limits, Op, Result, U256, pow::pow};

/// Returns `floor(y^(1/degree))`, using the default [`Limits`].
///
/// # Example
///
/// ```
/// use frax_math::{U256, nth_root};
///
/// assert_eq!(nth_root(U256::from(1_000), 3)?, U256::from(10));
/// assert_eq!(nth_root(U256::from(999), 3)?, U256::from(9));
/// assert_eq!(nth_root(U256::MAX, 2)?, U256::from(u128::MAX));
/// # Ok::<(), frax_math::FraxError>(())
/// ```
pub fn nth_root(y: U256, degree: u32) -> Result<U256> {
    root(y, degree, &Limits::default(), &mut ())
}

/// Returns true if `r` is the floor `degree`-th root of `y`, i.e. `r^degree <= y < (r+1)^degree`.
///
/// Powers that do not fit in a word count as greater than `y`.
pub fn is_floor_root(y: U256, degree: u32, r: U256) -> bool {
    if degree == 0 {
        return false;
    }
    let mut inspector = ();
    if exceeds(r, degree, y, &mut inspector) {
        return false;
    }
    match r.checked_add(U256::from(1)) {
        Some(next) => exceeds(next, degree, y, &mut inspector),
        None => true,
    }
}

pub(crate) fn root<I: Inspector>(
    y: U256,
    degree: u32,
    limits: &Limits,
    inspector: &mut I,
) -> Result<U256> {
    match degree {
        0 => return Err(FraxError::InvalidExponent),
        1 => return Ok(y),
        _ => {}
    }
    if y <= U256::from(1) {
        return Ok(y);
    }
    // 2^degree > y, and y is at least 2
    let bits = y.bit_len();
    if degree as usize >= bits {
        return Ok(U256::from(1));
    }

    // 2^ceil(bits/degree) is strictly above the root, so the iteration descends onto it.
    inspector.step(Op::Shl);
    let mut estimate = U256::from(1) << bits.div_ceil(degree as usize);
    let n = U256::from(degree);
    let n_minus_one = U256::from(degree - 1);

    let mut rounds = 0;
    loop {
        if rounds >= limits.max_iterations {
            warn!(%y, degree, rounds, "root iteration bound exhausted");
            return Err(FraxError::NonConvergence { iterations: rounds });
        }
        rounds += 1;

        let quotient = match pow(estimate, degree - 1, inspector) {
            Ok(divisor) => {
                inspector.step(Op::Div);
                y / divisor
            }
            // the divisor is beyond the word, hence beyond y
            Err(_) => U256::ZERO,
        };
        inspector.step(Op::Mul);
        inspector.step(Op::Add);
        inspector.step(Op::Div);
        // estimate <= 2^128 here, the numerator cannot overflow
        let next = (n_minus_one * estimate + quotient) / n;
        trace!(round = rounds, %next, "newton round");
        inspector.iteration(rounds, next);

        inspector.step(Op::Lt);
        if next >= estimate {
            break;
        }
        estimate = next;
    }

    settle(y, degree, estimate, rounds, limits, inspector)
}

/// Nudges `estimate` onto the exact floor root, within `limits.max_corrections` steps.
fn settle<I: Inspector>(
    y: U256,
    degree: u32,
    mut estimate: U256,
    rounds: u32,
    limits: &Limits,
    inspector: &mut I,
) -> Result<U256> {
    let mut corrections = 0;
    let bump = |corrections: &mut u32| {
        if *corrections >= limits.max_corrections {
            warn!(%y, degree, rounds, "root correction bound exhausted");
            return Err(FraxError::NonConvergence { iterations: rounds + *corrections });
        }
        *corrections += 1;
        Ok(())
    };

    while exceeds(estimate, degree, y, inspector) {
        bump(&mut corrections)?;
        inspector.step(Op::Sub);
        estimate -= U256::from(1);
        trace!(%estimate, "corrected down");
        inspector.correction(estimate);
    }
    loop {
        inspector.step(Op::Add);
        let next = estimate + U256::from(1);
        if exceeds(next, degree, y, inspector) {
            break;
        }
        bump(&mut corrections)?;
        estimate = next;
        trace!(%estimate, "corrected up");
        inspector.correction(estimate);
    }
    Ok(estimate)
}

/// Whether `r^degree > y`.
fn exceeds<I: Inspector>(r: U256, degree: u32, y: U256, inspector: &mut I) -> bool {
    match pow(r, degree, inspector) {
        Ok(power) => {
            inspector.step(Op::Lt);
            power > y
        }
        Err(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StepCounter;

    fn root_of(y: u64, degree: u32) -> u64 {
        nth_root(U256::from(y), degree).unwrap().to::<u64>()
    }

    #[test]
    fn degenerate_inputs() {
        assert_eq!(nth_root(U256::from(12345), 1), Ok(U256::from(12345)));
        assert_eq!(nth_root(U256::MAX, 1), Ok(U256::MAX));
        for degree in 1..20 {
            assert_eq!(root_of(0, degree), 0);
            assert_eq!(root_of(1, degree), 1);
        }
        assert_eq!(nth_root(U256::from(5), 0), Err(FraxError::InvalidExponent));
    }

    #[test]
    fn square_roots() {
        assert_eq!(root_of(2, 2), 1);
        assert_eq!(root_of(3, 2), 1);
        assert_eq!(root_of(4, 2), 2);
        assert_eq!(root_of(8, 2), 2);
        assert_eq!(root_of(9, 2), 3);
        assert_eq!(root_of(832_040, 2), 912);
        assert_eq!(root_of(u64::MAX, 2), u32::MAX as u64);
    }

    #[test]
    fn higher_roots() {
        assert_eq!(root_of(7, 3), 1);
        assert_eq!(root_of(8, 3), 2);
        assert_eq!(root_of(26, 3), 2);
        assert_eq!(root_of(27, 3), 3);
        assert_eq!(root_of(102_334_155, 9), 7);
        assert_eq!(root_of(1 << 63, 63), 2);
        assert_eq!(root_of((1 << 63) - 1, 63), 1);
    }

    #[test]
    fn word_sized_inputs() {
        let max_128 = U256::from(u128::MAX);
        assert_eq!(nth_root(U256::MAX, 2), Ok(max_128));
        assert_eq!(nth_root(max_128 * max_128, 2), Ok(max_128));
        assert_eq!(nth_root(U256::MAX, 255), Ok(U256::from(2)));
        assert_eq!(nth_root(U256::MAX, 256), Ok(U256::from(1)));
        assert_eq!(nth_root(U256::MAX, u32::MAX), Ok(U256::from(1)));
        assert_eq!(nth_root(U256::from(1) << 255usize, 255), Ok(U256::from(2)));
        // 2^256 - 1 = 3 * 5 * 17 * 257 * 641 * 65537 * ..., not a perfect power
        assert_eq!(nth_root(U256::MAX, 16), Ok(U256::from(65_535)));
        assert_eq!(nth_root(U256::MAX, 64), Ok(U256::from(15)));
    }

    #[test]
    fn floor_root_check() {
        assert!(is_floor_root(U256::from(26), 3, U256::from(2)));
        assert!(is_floor_root(U256::from(27), 3, U256::from(3)));
        assert!(!is_floor_root(U256::from(26), 3, U256::from(3)));
        assert!(!is_floor_root(U256::from(28), 3, U256::from(2)));
        assert!(is_floor_root(U256::MAX, 1, U256::MAX));
        assert!(is_floor_root(U256::MAX, 2, U256::from(u128::MAX)));
        assert!(!is_floor_root(U256::from(1), 0, U256::from(1)));
    }

    #[test]
    fn newton_lands_without_corrections() {
        for degree in 2..=9 {
            let mut counter = StepCounter::new();
            let r = root(U256::MAX, degree, &Limits::default(), &mut counter).unwrap();
            assert!(is_floor_root(U256::MAX, degree, r));
            assert_eq!(counter.corrections(), 0);
            assert!(counter.iterations() > 0);
        }
    }

    #[test]
    fn iteration_bound_is_enforced() {
        let limits = Limits { max_iterations: 1, ..Default::default() };
        assert_eq!(
            root(U256::MAX, 3, &limits, &mut ()),
            Err(FraxError::NonConvergence { iterations: 1 })
        );
    }

    #[test]
    fn worst_case_rounds_fit_default_bound() {
        let mut worst = 0;
        for degree in 2..256 {
            for y in [U256::MAX, U256::from(1) << (255 - 255 % degree as usize)] {
                let mut counter = StepCounter::new();
                root(y, degree, &Limits::default(), &mut counter).unwrap();
                worst = worst.max(counter.iterations());
            }
        }
        assert!(worst < Limits::DEFAULT_MAX_ITERATIONS, "{worst}");
    }
}
