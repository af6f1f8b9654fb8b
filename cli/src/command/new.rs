use std::io::Write;

use flexible_commands::{CommandDocument, InfoDocument};

use crate::{cli::NewArgs, shell::Shell};

use super::utils::{self, LoadedDocument};

fn emit(shell: &mut Shell, args: NewArgs, doc: LoadedDocument) -> anyhow::Result<()> {
    let json = doc.to_json(false)?;
    match args.output {
        Some(path) => {
            utils::write(&path, json)?;
            shell.status("Created", path.display())?;
        }
        None => {
            let mut stdout = std::io::stdout();
            writeln!(stdout, "{json}")?;
            stdout.flush()?;
        }
    }
    Ok(())
}

pub fn new(shell: &mut Shell, args: NewArgs) -> anyhow::Result<()> {
    let doc = if args.info {
        LoadedDocument::Info(InfoDocument::default())
    } else {
        LoadedDocument::Command(CommandDocument::new())
    };
    emit(shell, args, doc)
}

pub fn example(shell: &mut Shell, args: NewArgs) -> anyhow::Result<()> {
    let doc = if args.info {
        LoadedDocument::Info(InfoDocument::example())
    } else {
        LoadedDocument::Command(CommandDocument::example())
    };
    emit(shell, args, doc)
}
