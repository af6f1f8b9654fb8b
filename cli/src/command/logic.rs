use anyhow::Context;
use flexible_commands::{Logic, LogicType, MutationError};

use crate::{
    cli::{LogicAction, LogicArgs},
    shell::Shell,
};

use super::utils;

fn parse_logic(ty: LogicType, params: &str) -> anyhow::Result<Logic> {
    let params: serde_json::Value =
        serde_json::from_str(params).context("params must be a JSON object")?;
    let logic = serde_json::from_value(serde_json::json!({ "type": ty, "params": params }))?;
    Ok(logic)
}

pub fn logic(shell: &mut Shell, args: LogicArgs) -> anyhow::Result<()> {
    let mut doc = utils::load_command(&args.path)?;

    match args.action {
        LogicAction::Add {
            key,
            r#type,
            params,
        } => {
            doc.add_logic(&key, parse_logic(r#type, &params)?)?;
            shell.status("Added", format!("custom logic `{}` ({})", key, r#type))?;
        }
        LogicAction::Update { key, params } => {
            let ty = doc
                .logic(&key)
                .map(Logic::ty)
                .ok_or_else(|| MutationError::UnknownLogic(key.clone()))?;
            doc.update_logic(&key, parse_logic(ty, &params)?)?;
            shell.status("Updated", format!("custom logic `{key}`"))?;
        }
        LogicAction::SetType { key, r#type } => {
            doc.set_logic_type(&key, r#type)?;
            shell.status(
                "Updated",
                format!("custom logic `{}` is now {}, params reset", key, r#type),
            )?;
        }
        LogicAction::Remove { key } => {
            doc.remove_logic(&key)?;
            shell.status("Removed", format!("custom logic `{key}`"))?;
        }
    }

    utils::save_command(shell, &args.path, &doc)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn params_are_checked_against_the_type() {
        assert_eq!(
            parse_logic(LogicType::RandomNumberRange, r#"{"min": 1, "max": 64}"#).unwrap(),
            Logic::random_number_range(1, 64)
        );
        assert!(parse_logic(LogicType::RandomNumberRange, r#"{"min": 10, "max": 2}"#).is_err());
        assert!(parse_logic(LogicType::RandomPlayer, r#"{"list": []}"#).is_err());
        assert!(parse_logic(LogicType::RandomPlayer, "not json").is_err());
        assert_eq!(
            parse_logic(LogicType::RandomPlayer, "{}").unwrap(),
            Logic::RandomPlayer
        );
    }
}
