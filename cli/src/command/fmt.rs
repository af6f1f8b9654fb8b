use crate::{cli::FmtArgs, shell::Shell};

use super::utils;

pub fn fmt(shell: &mut Shell, args: FmtArgs) -> anyhow::Result<()> {
    let doc = utils::load(&args.path)?;
    let canonical = doc.to_json(args.compact)? + "\n";
    let current = std::fs::read_to_string(&args.path)?;

    if current == canonical {
        shell.status("Unchanged", args.path.display())?;
        return Ok(());
    }

    if args.check {
        anyhow::bail!("{} is not in canonical form", args.path.display());
    }

    std::fs::write(&args.path, canonical)?;
    shell.status("Formatted", args.path.display())?;
    Ok(())
}
