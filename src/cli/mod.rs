//! Command-line interface for focusflow.

pub mod args;
pub mod commands;
