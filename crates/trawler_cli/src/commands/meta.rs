use clap::CommandFactory;

use crate::Cli;

fn completion_script(shell: clap_complete::Shell) -> Vec<u8> {
    let mut cmd = Cli::command();
    let mut out = Vec::new();
    clap_complete::generate(shell, &mut cmd, "trawler", &mut out);
    out
}

pub(crate) fn handle_completions(
    shell: clap_complete::Shell,
) -> Result<(), Box<dyn std::error::Error>> {
    let out = completion_script(shell);
    use std::io::Write;
    std::io::stdout().write_all(&out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completion_script_contains_binary_name() {
        let script = completion_script(clap_complete::Shell::Bash);
        let script = String::from_utf8(script).expect("completion output should be UTF-8");
        assert!(script.contains("trawler"));
    }

    #[test]
    fn completion_script_lists_sync_subcommands() {
        let script = completion_script(clap_complete::Shell::Zsh);
        let script = String::from_utf8(script).expect("completion output should be UTF-8");
        assert!(script.contains("releases"));
        assert!(script.contains("mine"));
    }

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }
}
