//! # frax-math
//!
//! Floor-rounded rational powers of 256-bit words.
//!
//! [`frax_exp`] computes `floor(x^(a/b))` with integer arithmetic only: an exact, overflow checked
//! `x^a` followed by a bounded Newton iteration for the `b`-th root. Every primitive word
//! operation can be observed through an [`Inspector`], which is how step costs are measured.
//!
//! ```
//! use frax_math::{U256, frax_exp};
//!
//! assert_eq!(frax_exp(U256::from(27), 2, 3)?, U256::from(9));
//! assert_eq!(frax_exp(U256::from(10), 1, 2)?, U256::from(3));
//! # Ok::<(), frax_math::FraxError>(())
//! ```

#![cfg_attr(not(test), warn(unused_crate_dependencies))]

#[macro_use]
extern crate tracing;

pub use alloy_primitives::U256;

mod error;
pub use error::FraxError;

pub mod inspector;
pub use inspector::{Inspector, Op, StepCounter};

mod engine;
pub use engine::{Engine, Limits, frax_exp, reduce};

mod pow;
pub use pow::checked_pow;

mod root;
pub use root::{is_floor_root, nth_root};

/// Result alias for engine operations.
pub type Result<T, E = FraxError> = std::result::Result<T, E>;
