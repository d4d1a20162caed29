//! Shared helpers: logging, timestamps and git history.

pub mod date;
pub mod git;
pub mod log;
