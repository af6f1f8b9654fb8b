use crate::{
    cli::{ArgAction, ArgArgs},
    shell::Shell,
};

use super::utils;

pub fn argument(shell: &mut Shell, args: ArgArgs) -> anyhow::Result<()> {
    let mut doc = utils::load_command(&args.path)?;

    match args.action {
        ArgAction::Add { name, r#type } => {
            doc.add_argument(&name, r#type)?;
            shell.status("Added", format!("argument `{}` ({})", name, r#type))?;
        }
        ArgAction::SetType { name, r#type } => {
            doc.set_argument_type(&name, r#type)?;
            shell.status("Updated", format!("argument `{}` is now {}", name, r#type))?;
        }
        ArgAction::Choices { name, choices } => {
            doc.set_choices(&name, choices.split(','))?;
            shell.status("Updated", format!("choices of `{name}`"))?;
        }
        ArgAction::Rename { name, new_name } => {
            doc.rename_argument(&name, &new_name)?;
            shell.status("Renamed", format!("argument `{name}` to `{new_name}`"))?;
        }
        ArgAction::Remove { name } => {
            doc.remove_argument(&name)?;
            shell.status("Removed", format!("argument `{name}`"))?;
        }
    }

    utils::save_command(shell, &args.path, &doc)
}
