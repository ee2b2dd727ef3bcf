//! CLI command implementations

use clap::Subcommand;

pub mod process;
pub mod validate;

/// Available CLI commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Stream a corpus file at a chosen granularity
    Process(process::ProcessArgs),

    /// Check that a corpus file is well-formed and report entity counts
    Validate(validate::ValidateArgs),
}
