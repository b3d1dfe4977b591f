//! Step metering hooks.
//!
//! The engine reports every primitive word operation it performs to an [`Inspector`]. Inspectors
//! only observe: nothing they do can change a result.

use crate::U256;
use auto_impl::auto_impl;
use std::fmt;

/// A primitive word operation performed by the engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Op {
    Mul,
    Div,
    Add,
    Sub,
    Shl,
    Lt,
}

impl Op {
    /// Number of distinct operations.
    pub const COUNT: usize = 6;

    /// All operations, in declaration order.
    pub const ALL: [Self; Self::COUNT] =
        [Self::Mul, Self::Div, Self::Add, Self::Sub, Self::Shl, Self::Lt];

    /// The static cost of the operation, following the EVM base gas schedule.
    pub const fn cost(self) -> u64 {
        match self {
            Self::Mul | Self::Div => 5,
            Self::Add | Self::Sub | Self::Shl | Self::Lt => 3,
        }
    }

    /// The EVM mnemonic of the operation.
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Self::Mul => "MUL",
            Self::Div => "DIV",
            Self::Add => "ADD",
            Self::Sub => "SUB",
            Self::Shl => "SHL",
            Self::Lt => "LT",
        }
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}

/// Observer of the engine's work.
///
/// All callbacks default to no-ops. `()` is the inspector that observes nothing.
#[auto_impl(&mut, Box)]
pub trait Inspector {
    /// Called before every primitive word operation.
    #[inline]
    fn step(&mut self, op: Op) {
        let _ = op;
    }

    /// Called after every Newton round with the new estimate. Rounds start at 1.
    #[inline]
    fn iteration(&mut self, round: u32, estimate: U256) {
        let _ = (round, estimate);
    }

    /// Called after every corrective step with the adjusted estimate.
    #[inline]
    fn correction(&mut self, estimate: U256) {
        let _ = estimate;
    }
}

impl Inspector for () {}

/// An inspector that tallies operations and their cost.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StepCounter {
    ops: [u64; Op::COUNT],
    gas: u64,
    iterations: u32,
    corrections: u32,
}

impl StepCounter {
    /// Creates an empty counter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Total cost of all recorded operations.
    pub fn gas(&self) -> u64 {
        self.gas
    }

    /// Total number of recorded operations.
    pub fn steps(&self) -> u64 {
        self.ops.iter().sum()
    }

    /// How many times `op` was recorded.
    pub fn count(&self, op: Op) -> u64 {
        self.ops[op as usize]
    }

    /// Number of Newton rounds.
    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    /// Number of corrective steps taken after the Newton rounds.
    pub fn corrections(&self) -> u32 {
        self.corrections
    }

    /// Clears all tallies.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

impl Inspector for StepCounter {
    #[inline]
    fn step(&mut self, op: Op) {
        self.ops[op as usize] += 1;
        self.gas += op.cost();
    }

    #[inline]
    fn iteration(&mut self, round: u32, _estimate: U256) {
        self.iterations = round;
    }

    #[inline]
    fn correction(&mut self, _estimate: U256) {
        self.corrections += 1;
    }
}

impl fmt::Display for StepCounter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "gas: {}, steps: {}", self.gas, self.steps())?;
        for op in Op::ALL {
            let count = self.count(op);
            if count > 0 {
                write!(f, ", {op}: {count}")?;
            }
        }
        write!(f, ", rounds: {}, corrections: {}", self.iterations, self.corrections)
    }
}
