use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

/// The kind of value a caller supplies for an argument placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArgumentType {
    String,
    #[serde(alias = "integer")]
    Int,
    Choice,
    Player,
}

impl ArgumentType {
    pub const ALL: [ArgumentType; 4] = [
        ArgumentType::String,
        ArgumentType::Int,
        ArgumentType::Choice,
        ArgumentType::Player,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ArgumentType::String => "string",
            ArgumentType::Int => "int",
            ArgumentType::Choice => "choice",
            ArgumentType::Player => "player",
        }
    }
}

impl Display for ArgumentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, thiserror::Error)]
#[error(
    "unknown argument type `{0}`, expected one of: {expected}",
    expected = ArgumentType::ALL.map(|t| t.name()).join(", ")
)]
pub struct UnknownArgumentType(String);

impl FromStr for ArgumentType {
    type Err = UnknownArgumentType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "string" => Ok(ArgumentType::String),
            "int" | "integer" => Ok(ArgumentType::Int),
            "choice" => Ok(ArgumentType::Choice),
            "player" => Ok(ArgumentType::Player),
            other => Err(UnknownArgumentType(other.to_string())),
        }
    }
}

/// Type of an argument together with its type-specific data.
///
/// Choices only exist on the `Choice` variant, so switching away from
/// `choice` drops them rather than leaving an empty list behind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgumentKind {
    String,
    Int,
    Choice(Vec<String>),
    Player,
}

impl ArgumentKind {
    pub fn new(ty: ArgumentType) -> Self {
        match ty {
            ArgumentType::String => ArgumentKind::String,
            ArgumentType::Int => ArgumentKind::Int,
            ArgumentType::Choice => ArgumentKind::Choice(Vec::new()),
            ArgumentType::Player => ArgumentKind::Player,
        }
    }

    pub fn ty(&self) -> ArgumentType {
        match self {
            ArgumentKind::String => ArgumentType::String,
            ArgumentKind::Int => ArgumentType::Int,
            ArgumentKind::Choice(_) => ArgumentType::Choice,
            ArgumentKind::Player => ArgumentType::Player,
        }
    }

    /// Switches the type. Re-selecting `choice` on a choice argument keeps
    /// the existing choices.
    pub fn set_type(&mut self, ty: ArgumentType) {
        if self.ty() == ty {
            return;
        }
        *self = ArgumentKind::new(ty);
    }

    /// Replaces the choice list, trimming each entry and dropping blank ones.
    ///
    /// Returns `false` without touching anything if this isn't a choice argument.
    pub fn set_choices<I, S>(&mut self, choices: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        match self {
            ArgumentKind::Choice(existing) => {
                *existing = choices
                    .into_iter()
                    .map(|c| c.as_ref().trim().to_string())
                    .filter(|c| !c.is_empty())
                    .collect();
                true
            }
            _ => false,
        }
    }

    pub fn choices(&self) -> Option<&[String]> {
        match self {
            ArgumentKind::Choice(choices) => Some(choices),
            _ => None,
        }
    }
}

/// Wire form of one argument: `{name, type, choices?}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Argument {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: ArgumentType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub choices: Option<Vec<String>>,
}

impl Argument {
    pub fn new(name: impl Into<String>, ty: ArgumentType) -> Self {
        Self::from_kind(name, &ArgumentKind::new(ty))
    }

    pub fn from_kind(name: impl Into<String>, kind: &ArgumentKind) -> Self {
        Argument {
            name: name.into(),
            ty: kind.ty(),
            choices: kind.choices().map(|c| c.to_vec()),
        }
    }

    /// Converts to the in-memory kind. `choices` is only meaningful for
    /// choice arguments; anywhere else it is reported back as the error.
    pub fn into_kind(self) -> Result<(String, ArgumentKind), String> {
        let kind = match (self.ty, self.choices) {
            (ArgumentType::Choice, Some(choices)) => ArgumentKind::Choice(choices),
            (ArgumentType::Choice, None) => {
                return Err("choice argument is missing `choices`".to_string());
            }
            (ty, Some(_)) => {
                return Err(format!("`choices` is only allowed on choice arguments, not `{ty}`"));
            }
            (ty, None) => ArgumentKind::new(ty),
        };
        Ok((self.name, kind))
    }
}

/// Argument names and logic keys share this rule since both appear inside
/// `{...}` in a template.
pub fn is_identifier(name: &str) -> bool {
    !name.is_empty()
        && !name
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, '{' | '}' | ':'))
}
