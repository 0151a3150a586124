// CLI module
// Command-line interface and argument parsing

mod args;

pub use args::CliArgs;

use clap::Parser;

/// Parse command-line arguments using clap
///
/// Returns a `CliArgs` struct with the parsed values. If parsing fails
/// (missing arguments, unknown flags, or --help), clap prints its own
/// message and exits the process.
pub fn parse_args() -> CliArgs {
    CliArgs::parse()
}
