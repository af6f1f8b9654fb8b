use termcolor::Color;

use crate::{cli::ValidateArgs, shell::Shell};

use super::utils;

#[derive(Debug, thiserror::Error)]
pub enum ValidateError {
    #[error("{errors} error(s) found")]
    Errors { errors: usize },
    #[error("{warnings} warning(s) found and warnings are denied")]
    Warnings { warnings: usize },
}

pub fn validate(shell: &mut Shell, args: ValidateArgs) -> anyhow::Result<()> {
    shell.status("Checking", args.path.display())?;
    let doc = utils::load(&args.path)?;
    let report = doc.validate();

    let (errors, warnings) = utils::report_issues(shell, &report, doc.template())?;
    if errors > 0 {
        return Err(ValidateError::Errors { errors }.into());
    }
    if warnings > 0 && args.deny_warnings {
        return Err(ValidateError::Warnings { warnings }.into());
    }

    if warnings > 0 {
        shell.status_with_color(
            "Finished",
            format!("valid, {warnings} warning(s)"),
            Color::Yellow,
        )?;
    } else {
        shell.status("Finished", "valid")?;
    }
    Ok(())
}
