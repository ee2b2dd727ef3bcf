//! cetem CLI library
//!
//! Command-line interface for streaming the CETEM Público annotated corpus
//! at a chosen granularity.

pub mod commands;
pub mod output;
pub mod progress;
