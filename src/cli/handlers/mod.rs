//! Command handlers for CLI operations
//!
//! Handlers hold what a command needs and print its result to stdout.

pub mod check;
pub mod tasks;

pub use check::CheckCommandHandler;
pub use tasks::TaskCommandHandler;
