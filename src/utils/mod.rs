//! Generic utility primitives with zero domain knowledge.
//!
//! - `command` - Command execution with error handling
//! - `io` - File I/O with consistent error handling
//! - `template` - Literal string substitution

pub mod command;
pub mod io;
pub mod template;
