//! Dancer CLI library.
//!
//! Argument definitions, input loading, logging setup and the command
//! implementations behind the `dancer` binary.

pub mod cli_args;
pub mod commands;
pub mod input;
pub mod logging;
