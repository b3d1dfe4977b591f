use crate::{FraxError, Inspector, Result, U256, pow::pow, root::root};

/// Computes `floor(x^(a/b))` with the default [`Limits`].
///
/// `a == 0` yields `1`, including for `x == 0`. The exponent is reduced to lowest terms first,
/// so only the reduced power `x^(a/gcd(a, b))` has to fit in a word.
///
/// # Errors
///
/// - [`FraxError::InvalidExponent`] if `b == 0`.
/// - [`FraxError::Overflow`] if the reduced power does not fit in a word.
/// - [`FraxError::NonConvergence`] if the root iteration exceeds its bound.
///
/// # Example
///
/// ```
/// use frax_math::{FraxError, U256, frax_exp};
///
/// assert_eq!(frax_exp(U256::from(16), 3, 4)?, U256::from(8));
/// assert_eq!(frax_exp(U256::from(100), 1, 3)?, U256::from(4));
/// assert_eq!(frax_exp(U256::from(100), 1, 0), Err(FraxError::InvalidExponent));
/// // 9^81 does not fit, 9^1 does
/// assert_eq!(frax_exp(U256::from(9), 9, 9)?, U256::from(9));
/// # Ok::<(), FraxError>(())
/// ```
pub fn frax_exp(x: U256, a: u32, b: u32) -> Result<U256> {
    Engine::default().frax_exp(x, a, b, ())
}

/// Reduces the exponent `a/b` to lowest terms.
///
/// `0/b` reduces to `0/1`. A zero denominator is returned unchanged.
///
/// ```
/// use frax_math::reduce;
///
/// assert_eq!(reduce(6, 4), (3, 2));
/// assert_eq!(reduce(0, 7), (0, 1));
/// assert_eq!(reduce(5, 0), (5, 0));
/// ```
pub const fn reduce(a: u32, b: u32) -> (u32, u32) {
    if b == 0 {
        return (a, b);
    }
    let (mut m, mut n) = (a, b);
    while n != 0 {
        (m, n) = (n, m % n);
    }
    (a / m, b / m)
}

/// Step bounds of the root iteration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Limits {
    /// The maximum number of Newton rounds before failing with
    /// [`FraxError::NonConvergence`].
    pub max_iterations: u32,
    /// The maximum number of unit adjustments applied after the Newton rounds.
    pub max_corrections: u32,
}

impl Limits {
    /// Well above the worst case for 256-bit words, which stays under 30 rounds.
    pub const DEFAULT_MAX_ITERATIONS: u32 = 64;
    pub const DEFAULT_MAX_CORRECTIONS: u32 = 2;
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_iterations: Self::DEFAULT_MAX_ITERATIONS,
            max_corrections: Self::DEFAULT_MAX_CORRECTIONS,
        }
    }
}

/// The fractional power engine.
///
/// Stateless apart from its [`Limits`]; every call is independent, so a single engine can be
/// shared freely between threads.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Engine {
    limits: Limits,
}

impl Engine {
    /// Creates an engine with the given limits.
    pub const fn new(limits: Limits) -> Self {
        Self { limits }
    }

    /// Returns the engine's limits.
    pub const fn limits(&self) -> &Limits {
        &self.limits
    }

    /// Returns `x^a`, failing with [`FraxError::Overflow`] instead of wrapping.
    pub fn pow(&self, x: U256, a: u32, mut inspector: impl Inspector) -> Result<U256> {
        pow(x, a, &mut inspector)
    }

    /// Returns `floor(y^(1/b))`.
    pub fn root(&self, y: U256, b: u32, mut inspector: impl Inspector) -> Result<U256> {
        root(y, b, &self.limits, &mut inspector)
    }

    /// Returns `floor(x^(a/b))`.
    ///
    /// See [`frax_exp`] for the failure modes.
    pub fn frax_exp(&self, x: U256, a: u32, b: u32, mut inspector: impl Inspector) -> Result<U256> {
        if b == 0 {
            return Err(FraxError::InvalidExponent);
        }
        let (num, den) = reduce(a, b);
        let power = pow(x, num, &mut inspector).inspect_err(|_| {
            debug!(%x, a, b, num, "power overflows a word");
        })?;
        let result = root(power, den, &self.limits, &mut inspector)?;
        debug!(%x, a, b, %result, "frax_exp");
        Ok(result)
    }
}
