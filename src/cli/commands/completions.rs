//! `rfp completions` command - shell completion scripts
//!
//! `source <(rfp completions bash)` enables completion for the current shell.

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use miette::Result;
use std::io::Write;

use crate::cli::Cli;

#[derive(clap::Args, Debug)]
pub struct CompletionsArgs {
    /// Target shell (bash, zsh, fish, elvish, powershell)
    #[arg(value_enum)]
    pub shell: Shell,
}

pub fn run(args: CompletionsArgs) -> Result<()> {
    write_completions(args.shell, &mut std::io::stdout().lock());
    Ok(())
}

/// Write the completion script for `shell`, registered under the `rfp` binary name
pub fn write_completions(shell: Shell, out: &mut impl Write) {
    let mut cmd = Cli::command();
    let bin = cmd.get_name().to_string();
    generate(shell, &mut cmd, bin, out);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn script(shell: Shell) -> String {
        let mut buf = Vec::new();
        write_completions(shell, &mut buf);
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_bash_script_covers_subcommands() {
        let bash = script(Shell::Bash);
        assert!(bash.contains("_rfp"));
        for sub in ["export", "metrics", "team", "delays"] {
            assert!(bash.contains(sub), "missing {sub}");
        }
    }

    #[test]
    fn test_fish_script_names_binary() {
        assert!(script(Shell::Fish).contains("complete -c rfp"));
    }
}
