use std::path::Path;

use anyhow::Context;
use flexible_commands::{CommandDocument, InfoDocument, Issue, ParseError, Report, Severity};

use crate::shell::Shell;

pub enum LoadedDocument {
    Command(CommandDocument),
    Info(InfoDocument),
}

impl LoadedDocument {
    pub fn validate(&self) -> Report {
        match self {
            LoadedDocument::Command(doc) => doc.validate(),
            LoadedDocument::Info(doc) => doc.validate(),
        }
    }

    pub fn template(&self) -> Option<&str> {
        match self {
            LoadedDocument::Command(doc) => Some(&doc.template),
            LoadedDocument::Info(_) => None,
        }
    }

    pub fn to_json(&self, compact: bool) -> serde_json::Result<String> {
        match (self, compact) {
            (LoadedDocument::Command(doc), false) => doc.to_json(),
            (LoadedDocument::Command(doc), true) => doc.to_json_compact(),
            (LoadedDocument::Info(doc), false) => doc.to_json(),
            (LoadedDocument::Info(doc), true) => doc.to_json_compact(),
        }
    }
}

fn read(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

/// Loads either document kind. Info documents are recognised by their
/// `aliases` field; anything else is treated as a command document.
pub fn load(path: &Path) -> anyhow::Result<LoadedDocument> {
    let text = read(path)?;
    let is_info = serde_json::from_str::<serde_json::Value>(&text)
        .ok()
        .is_some_and(|v| v.get("aliases").is_some());

    let doc = if is_info {
        LoadedDocument::Info(InfoDocument::from_json(&text)?)
    } else {
        LoadedDocument::Command(CommandDocument::from_json(&text)?)
    };
    Ok(doc)
}

pub fn load_command(path: &Path) -> anyhow::Result<CommandDocument> {
    let text = read(path)?;
    CommandDocument::from_json(&text)
        .with_context(|| format!("failed to import {}", path.display()))
}

pub fn load_info(path: &Path) -> anyhow::Result<InfoDocument> {
    let text = read(path)?;
    InfoDocument::from_json(&text).with_context(|| format!("failed to import {}", path.display()))
}

pub fn write(path: &Path, json: String) -> anyhow::Result<()> {
    std::fs::write(path, json + "\n")
        .with_context(|| format!("failed to write {}", path.display()))
}

/// Writes an edited command document back and prints any dangling or
/// unused declarations the edit left behind.
pub fn save_command(shell: &mut Shell, path: &Path, doc: &CommandDocument) -> anyhow::Result<()> {
    write(path, doc.to_json()?)?;
    report_issues(shell, &doc.validate(), Some(&doc.template))?;
    Ok(())
}

/// The template, indented, with a caret under the offending character.
pub fn syntax_pointer(template: &str, err: &ParseError) -> String {
    let column = template.get(..err.offset()).map_or(0, |s| s.chars().count());
    format!("    {template}\n    {:>width$}", "^", width = column + 1)
}

/// Prints every finding. Returns the number of (errors, warnings).
pub fn report_issues(
    shell: &mut Shell,
    report: &Report,
    template: Option<&str>,
) -> anyhow::Result<(usize, usize)> {
    let mut counts = (0, 0);
    for issue in report.issues() {
        match issue.severity() {
            Severity::Error => {
                counts.0 += 1;
                shell.error(issue)?;
                if let (Issue::TemplateSyntax(err), Some(template)) = (issue, template) {
                    shell.note(format!("in template\n{}", syntax_pointer(template, err)))?;
                }
            }
            Severity::Warning => {
                counts.1 += 1;
                shell.warn(issue)?;
            }
        }
    }
    Ok(counts)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pointer_marks_the_offset() {
        let err = ParseError::UnmatchedBrace { offset: 5 };
        assert_eq!(
            syntax_pointer("give {player", &err),
            "    give {player\n         ^"
        );

        // "é" is two bytes, so byte 3 is the third character
        let err = ParseError::UnmatchedBrace { offset: 3 };
        assert_eq!(syntax_pointer("é {", &err), "    é {\n      ^");
    }
}
