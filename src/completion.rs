//! # Shell Completion Module
//!
//! Generates completion scripts for the `cosine` binary through clap_complete.
//!
//! ```bash
//! cosine completion bash > ~/.local/share/bash-completion/completions/cosine
//! cosine completion zsh > ~/.config/zsh/completions/_cosine
//! ```

use crate::cli;
use clap::Command;
use clap_complete::{generate, Generator, Shell as CompletionShell};
use std::io::Write;

/// Writes the completion script for `cmd` to `out`.
pub fn generate_completions<G: Generator>(gen: G, cmd: &mut Command, out: &mut dyn Write) {
    let name = cmd.get_name().to_string();
    generate(gen, cmd, name, out);
}

/// Convert our Shell enum to clap_complete's Shell enum
#[must_use]
pub fn shell_to_completion_shell(shell: cli::Shell) -> CompletionShell {
    match shell {
        cli::Shell::Bash => CompletionShell::Bash,
        cli::Shell::Zsh => CompletionShell::Zsh,
        cli::Shell::Fish => CompletionShell::Fish,
        cli::Shell::PowerShell => CompletionShell::PowerShell,
        cli::Shell::Elvish => CompletionShell::Elvish,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_bash_script_mentions_subcommands() {
        let mut cmd = cli::Args::command();
        let mut out = Vec::new();
        generate_completions(shell_to_completion_shell(cli::Shell::Bash), &mut cmd, &mut out);

        let script = String::from_utf8(out).unwrap();
        assert!(script.contains("_cosine"));
        assert!(script.contains("recommend"));
        assert!(script.contains("onboard"));
    }

    #[test]
    fn test_every_shell_generates_output() {
        for shell in [
            cli::Shell::Bash,
            cli::Shell::Zsh,
            cli::Shell::Fish,
            cli::Shell::PowerShell,
            cli::Shell::Elvish,
        ] {
            let mut cmd = cli::Args::command();
            let mut out = Vec::new();
            generate_completions(shell_to_completion_shell(shell), &mut cmd, &mut out);
            assert!(!out.is_empty(), "no completions for {shell:?}");
        }
    }
}
