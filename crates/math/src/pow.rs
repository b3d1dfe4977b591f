use crate::{FraxError, Inspector, Op, Result, U256};

/// Returns `base^exp`, or [`FraxError::Overflow`] if it does not fit in a word.
///
/// `0^0` is `1`.
///
/// # Example
///
/// ```
/// use frax_math::{FraxError, U256, checked_pow};
///
/// assert_eq!(checked_pow(U256::from(3), 4)?, U256::from(81));
/// assert_eq!(checked_pow(U256::from(2), 256), Err(FraxError::Overflow));
/// # Ok::<(), FraxError>(())
/// ```
pub fn checked_pow(base: U256, exp: u32) -> Result<U256> {
    pow(base, exp, &mut ())
}

/// Square-and-multiply with every product checked.
pub(crate) fn pow<I: Inspector>(mut base: U256, mut exp: u32, inspector: &mut I) -> Result<U256> {
    let mut acc = U256::from(1);
    while exp > 0 {
        if exp & 1 == 1 {
            inspector.step(Op::Mul);
            acc = acc.checked_mul(base).ok_or(FraxError::Overflow)?;
        }
        exp >>= 1;
        // the last square is never used
        if exp > 0 {
            inspector.step(Op::Mul);
            base = base.checked_mul(base).ok_or(FraxError::Overflow)?;
        }
    }
    Ok(acc)
}
