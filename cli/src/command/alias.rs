use crate::{
    cli::{AliasAction, AliasArgs},
    shell::Shell,
};

use super::utils;

pub fn alias(shell: &mut Shell, args: AliasArgs) -> anyhow::Result<()> {
    let mut doc = utils::load_info(&args.path)?;

    match args.action {
        AliasAction::Add { alias } => {
            shell.status("Added", format!("alias `{alias}`"))?;
            doc.add_alias(alias);
        }
        AliasAction::Set { index, alias } => {
            doc.set_alias(index, alias.clone())?;
            shell.status("Updated", format!("alias #{index} to `{alias}`"))?;
        }
        AliasAction::Remove { index } => {
            let removed = doc.remove_alias(index)?;
            shell.status("Removed", format!("alias `{removed}`"))?;
        }
    }

    utils::write(&args.path, doc.to_json()?)?;
    utils::report_issues(shell, &doc.validate(), None)?;
    Ok(())
}
