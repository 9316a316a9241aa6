//! Command handlers.
//!
//! Each handler builds what it needs from `CliConfig`, runs one operation and
//! formats the outcome for the terminal. Failures come back as `CliError` so
//! `main` can pick the exit code.

pub mod check;
pub mod serve;
pub mod synth;
