//! Errors related to fractional powers.

/// Possible failures of the engine.
///
/// There is no partial result: a call either yields the exact floor value or one of these.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum FraxError {
    /// An intermediate value does not fit in a 256-bit word.
    #[error("arithmetic overflow: intermediate power exceeds 2^256 - 1")]
    Overflow,
    /// The root iteration ran out of its step bound.
    #[error("root did not converge within {iterations} iterations")]
    NonConvergence { iterations: u32 },
    /// The exponent denominator was zero.
    #[error("invalid exponent: denominator must be non-zero")]
    InvalidExponent,
}
