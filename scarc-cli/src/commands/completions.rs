//! Shell completion generation.

use clap::CommandFactory;
use clap_complete::generate;

/// Write a completion script for `shell` to stdout.
pub fn cmd_completions(shell: clap_complete::Shell) {
    let mut cmd = crate::Cli::command();
    generate(shell, &mut cmd, "scarc", &mut std::io::stdout());
}
