//! Subcommands that carry their own arguments.

pub mod report;
