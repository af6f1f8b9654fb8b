use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::{
    json::{self, DocumentError},
    validate::{Issue, Report},
};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InfoError {
    #[error("no alias at index {index} (there are {len})")]
    IndexOutOfRange { index: usize, len: usize },
}

/// A static-message command: any alias prints `message`, which is passed
/// through untouched for the dispatcher's rich-text renderer.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InfoDocument {
    pub aliases: Vec<String>,
    #[serde(default)]
    pub permission: String,
    #[serde(default)]
    pub message: String,
}

impl InfoDocument {
    pub fn example() -> Self {
        InfoDocument {
            aliases: ["discord", "discordlink", "dc", "disc"]
                .into_iter()
                .map(String::from)
                .collect(),
            permission: "flexiblecommands.command.discord".to_string(),
            message: "<green>Join our [<yellow><click:open_url:'https://discord.gg/yourserver'>Discord</click></yellow>] server!".to_string(),
        }
    }

    pub fn add_alias(&mut self, alias: impl Into<String>) {
        self.aliases.push(alias.into());
    }

    pub fn set_alias(&mut self, index: usize, alias: impl Into<String>) -> Result<(), InfoError> {
        let len = self.aliases.len();
        let slot = self
            .aliases
            .get_mut(index)
            .ok_or(InfoError::IndexOutOfRange { index, len })?;
        *slot = alias.into();
        Ok(())
    }

    pub fn remove_alias(&mut self, index: usize) -> Result<String, InfoError> {
        if index >= self.aliases.len() {
            return Err(InfoError::IndexOutOfRange {
                index,
                len: self.aliases.len(),
            });
        }
        Ok(self.aliases.remove(index))
    }

    pub fn validate(&self) -> Report {
        let mut report = Report::default();
        if self.aliases.is_empty() {
            report.push(Issue::NoAliases);
        }

        let mut seen = HashSet::new();
        let mut reported = HashSet::new();
        for (i, alias) in self.aliases.iter().enumerate() {
            if alias.trim().is_empty() {
                report.push(Issue::BlankAlias(i));
            } else if !seen.insert(alias.as_str()) && reported.insert(alias.as_str()) {
                report.push(Issue::DuplicateAlias(alias.clone()));
            }
        }
        report
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        json::encode(self, true)
    }

    pub fn to_json_compact(&self) -> serde_json::Result<String> {
        json::encode(self, false)
    }

    pub fn from_json(text: &str) -> Result<Self, DocumentError> {
        let doc: InfoDocument = json::decode(text)?;
        tracing::debug!(aliases = doc.aliases.len(), "imported info document");
        Ok(doc)
    }
}
