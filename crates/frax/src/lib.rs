//! # frax
//!
//! The `frax` command line tool: argument parsing, error reporting, logging and the step-cost
//! report.

#![cfg_attr(not(test), warn(unused_crate_dependencies))]

#[macro_use]
extern crate tracing;

pub mod args;
pub mod cmd;
pub mod handler;
pub mod report;
pub mod utils;
