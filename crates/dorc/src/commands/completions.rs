//! Shell completions generation

use crate::cli::{Cli, CompletionsArgs};
use crate::output;
use anyhow::{Context, Result};
use clap::CommandFactory;
use clap_complete::{generate, Shell};
use std::fs::File;
use std::io::{self, Write};

pub fn run(args: CompletionsArgs) -> Result<()> {
    match &args.output {
        Some(path) => {
            let mut file =
                File::create(path).with_context(|| format!("Failed to create {}", path))?;
            write_completions(args.shell, &mut file)?;
            output::success(&format!("Wrote {} completions to {}", args.shell, path));
        }
        None => write_completions(args.shell, &mut io::stdout())?,
    }
    Ok(())
}

fn write_completions(shell: Shell, out: &mut dyn Write) -> Result<()> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, out);
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_bash_completions_cover_run_flags() {
        let mut buf = Vec::new();
        write_completions(Shell::Bash, &mut buf).unwrap();
        let script = String::from_utf8(buf).unwrap();

        assert!(script.contains("dorc"));
        assert!(script.contains("--repository"));
        assert!(script.contains("--keep-tags"));
    }

    #[test]
    fn test_completions_written_to_file() {
        let temp = TempDir::new().unwrap();
        let path = Utf8PathBuf::try_from(temp.path().join("dorc.fish")).unwrap();

        run(CompletionsArgs {
            shell: Shell::Fish,
            output: Some(path.clone()),
        })
        .unwrap();

        let script = std::fs::read_to_string(&path).unwrap();
        assert!(script.contains("complete -c dorc"));
    }
}
