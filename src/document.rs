use std::{fmt::Display, str::FromStr};

use indexmap::IndexMap;
use serde::{
    Deserialize, Deserializer, Serialize, Serializer,
    de::{MapAccess, Visitor},
    ser::SerializeStruct,
};

use crate::{
    argument::{Argument, ArgumentKind, ArgumentType, is_identifier},
    json::{self, DocumentError},
    logic::{Logic, LogicType, ParamError},
    template::ReservedToken,
    validate::{self, Report},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunAs {
    #[default]
    Console,
    Player,
}

impl Display for RunAs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RunAs::Console => f.write_str("console"),
            RunAs::Player => f.write_str("player"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown run-as context `{0}`, expected `console` or `player`")]
pub struct UnknownRunAs(String);

impl FromStr for RunAs {
    type Err = UnknownRunAs;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "console" => Ok(RunAs::Console),
            "player" => Ok(RunAs::Player),
            other => Err(UnknownRunAs(other.to_string())),
        }
    }
}

/// Anything a template placeholder can name. Arguments and logic entries
/// live in one map, so a name can only ever be one of them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Declaration {
    Argument(ArgumentKind),
    Logic(Logic),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MutationError {
    #[error("name `{0}` is already declared")]
    DuplicateName(String),
    #[error("key `{0}` is already declared")]
    DuplicateKey(String),
    #[error("`{0}` is not a valid placeholder name")]
    InvalidName(String),
    #[error("`{0}` is reserved")]
    ReservedName(String),
    #[error("no argument named `{0}`")]
    UnknownArgument(String),
    #[error("no custom logic with key `{0}`")]
    UnknownLogic(String),
    #[error("argument `{0}` is not a choice argument")]
    NotAChoice(String),
    #[error("invalid params for `{key}`: {source}")]
    InvalidParams { key: String, source: ParamError },
}

fn check_name(name: &str) -> Result<(), MutationError> {
    if !is_identifier(name) {
        return Err(MutationError::InvalidName(name.to_string()));
    }
    if ReservedToken::from_name(name).is_some() {
        return Err(MutationError::ReservedName(name.to_string()));
    }
    Ok(())
}

/// A command definition handed to the dispatcher.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(try_from = "CommandDocumentRepr")]
pub struct CommandDocument {
    pub alias: String,
    pub base_command: String,
    pub permission: String,
    pub run_as: RunAs,
    pub template: String,
    declarations: IndexMap<String, Declaration>,
}

impl CommandDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// The stock example: hand the caller's chosen player 1 to 64 diamonds.
    pub fn example() -> Self {
        let mut doc = CommandDocument {
            alias: "giverandomdiamonds".to_string(),
            base_command: "give".to_string(),
            permission: "flexiblecommands.command.giverandomdiamonds".to_string(),
            run_as: RunAs::Console,
            template: "{baseCommand} {player} minecraft:diamond {custom:randomamount}".to_string(),
            declarations: IndexMap::new(),
        };
        doc.declarations.insert(
            "player".to_string(),
            Declaration::Argument(ArgumentKind::Player),
        );
        doc.declarations.insert(
            "randomamount".to_string(),
            Declaration::Logic(Logic::random_number_range(1, 64)),
        );
        doc
    }

    pub fn declaration(&self, name: &str) -> Option<&Declaration> {
        self.declarations.get(name)
    }

    pub fn declarations(&self) -> impl Iterator<Item = (&str, &Declaration)> {
        self.declarations.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Arguments in positional order.
    pub fn arguments(&self) -> impl Iterator<Item = (&str, &ArgumentKind)> {
        self.declarations.iter().filter_map(|(k, v)| match v {
            Declaration::Argument(kind) => Some((k.as_str(), kind)),
            Declaration::Logic(_) => None,
        })
    }

    pub fn custom_logic(&self) -> impl Iterator<Item = (&str, &Logic)> {
        self.declarations.iter().filter_map(|(k, v)| match v {
            Declaration::Logic(logic) => Some((k.as_str(), logic)),
            Declaration::Argument(_) => None,
        })
    }

    pub fn argument(&self, name: &str) -> Option<&ArgumentKind> {
        match self.declarations.get(name) {
            Some(Declaration::Argument(kind)) => Some(kind),
            _ => None,
        }
    }

    pub fn logic(&self, key: &str) -> Option<&Logic> {
        match self.declarations.get(key) {
            Some(Declaration::Logic(logic)) => Some(logic),
            _ => None,
        }
    }

    fn argument_mut(&mut self, name: &str) -> Result<&mut ArgumentKind, MutationError> {
        match self.declarations.get_mut(name) {
            Some(Declaration::Argument(kind)) => Ok(kind),
            _ => Err(MutationError::UnknownArgument(name.to_string())),
        }
    }

    fn logic_mut(&mut self, key: &str) -> Result<&mut Logic, MutationError> {
        match self.declarations.get_mut(key) {
            Some(Declaration::Logic(logic)) => Ok(logic),
            _ => Err(MutationError::UnknownLogic(key.to_string())),
        }
    }

    pub fn add_argument(&mut self, name: &str, ty: ArgumentType) -> Result<(), MutationError> {
        check_name(name)?;
        if self.declarations.contains_key(name) {
            return Err(MutationError::DuplicateName(name.to_string()));
        }
        tracing::debug!(name, %ty, "adding argument");
        self.declarations
            .insert(name.to_string(), Declaration::Argument(ArgumentKind::new(ty)));
        Ok(())
    }

    pub fn set_argument_type(&mut self, name: &str, ty: ArgumentType) -> Result<(), MutationError> {
        tracing::debug!(name, %ty, "setting argument type");
        self.argument_mut(name)?.set_type(ty);
        Ok(())
    }

    pub fn set_choices<I, S>(&mut self, name: &str, choices: I) -> Result<(), MutationError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        if !self.argument_mut(name)?.set_choices(choices) {
            return Err(MutationError::NotAChoice(name.to_string()));
        }
        Ok(())
    }

    /// Renames an argument in place, keeping its position. The template is
    /// left alone, so placeholders using the old name become dangling.
    pub fn rename_argument(&mut self, name: &str, new_name: &str) -> Result<(), MutationError> {
        self.argument_mut(name)?;
        if name == new_name {
            return Ok(());
        }
        check_name(new_name)?;
        if self.declarations.contains_key(new_name) {
            return Err(MutationError::DuplicateName(new_name.to_string()));
        }

        tracing::debug!(from = name, to = new_name, "renaming argument");
        if let Some((index, _, decl)) = self.declarations.shift_remove_full(name) {
            self.declarations
                .shift_insert(index, new_name.to_string(), decl);
        }
        Ok(())
    }

    pub fn remove_argument(&mut self, name: &str) -> Result<ArgumentKind, MutationError> {
        self.argument_mut(name)?;
        tracing::debug!(name, "removing argument");
        match self.declarations.shift_remove(name) {
            Some(Declaration::Argument(kind)) => Ok(kind),
            _ => Err(MutationError::UnknownArgument(name.to_string())),
        }
    }

    pub fn add_logic(&mut self, key: &str, logic: Logic) -> Result<(), MutationError> {
        check_name(key)?;
        if self.declarations.contains_key(key) {
            return Err(MutationError::DuplicateKey(key.to_string()));
        }
        logic
            .validate()
            .map_err(|source| MutationError::InvalidParams {
                key: key.to_string(),
                source,
            })?;
        tracing::debug!(key, ty = %logic.ty(), "adding custom logic");
        self.declarations
            .insert(key.to_string(), Declaration::Logic(logic));
        Ok(())
    }

    /// Replaces the entry's params. The new value must satisfy its schema.
    pub fn update_logic(&mut self, key: &str, logic: Logic) -> Result<(), MutationError> {
        let slot = self.logic_mut(key)?;
        logic
            .validate()
            .map_err(|source| MutationError::InvalidParams {
                key: key.to_string(),
                source,
            })?;
        tracing::debug!(key, ty = %logic.ty(), "updating custom logic");
        *slot = logic;
        Ok(())
    }

    /// Switches the logic type, resetting params to the new type's defaults.
    pub fn set_logic_type(&mut self, key: &str, ty: LogicType) -> Result<(), MutationError> {
        let slot = self.logic_mut(key)?;
        if slot.ty() != ty {
            tracing::debug!(key, %ty, "switching custom logic type");
            *slot = Logic::default_for(ty);
        }
        Ok(())
    }

    /// Removes the entry. Template references to it are left dangling.
    pub fn remove_logic(&mut self, key: &str) -> Result<Logic, MutationError> {
        self.logic_mut(key)?;
        tracing::debug!(key, "removing custom logic");
        match self.declarations.shift_remove(key) {
            Some(Declaration::Logic(logic)) => Ok(logic),
            _ => Err(MutationError::UnknownLogic(key.to_string())),
        }
    }

    pub fn validate(&self) -> Report {
        validate::validate(self)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        tracing::debug!(alias = %self.alias, "exporting command document");
        json::encode(self, true)
    }

    pub fn to_json_compact(&self) -> serde_json::Result<String> {
        json::encode(self, false)
    }

    /// Parses and checks a whole document. Nothing is kept on failure.
    pub fn from_json(text: &str) -> Result<Self, DocumentError> {
        let repr: CommandDocumentRepr = json::decode(text)?;
        let doc = CommandDocument::try_from(repr)?;
        tracing::debug!(alias = %doc.alias, "imported command document");
        Ok(doc)
    }
}

impl PartialEq for CommandDocument {
    fn eq(&self, other: &Self) -> bool {
        // IndexMap equality ignores order, but argument order is positional.
        self.alias == other.alias
            && self.base_command == other.base_command
            && self.permission == other.permission
            && self.run_as == other.run_as
            && self.template == other.template
            && self.declarations == other.declarations
            && self.arguments().eq(other.arguments())
    }
}

impl Eq for CommandDocument {}

struct LogicMap<'a>(&'a CommandDocument);

impl Serialize for LogicMap<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.custom_logic())
    }
}

impl Serialize for CommandDocument {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let arguments: Vec<Argument> = self
            .arguments()
            .map(|(name, kind)| Argument::from_kind(name, kind))
            .collect();

        let mut s = serializer.serialize_struct("CommandDocument", 7)?;
        s.serialize_field("alias", &self.alias)?;
        s.serialize_field("baseCommand", &self.base_command)?;
        s.serialize_field("permission", &self.permission)?;
        s.serialize_field("runAs", &self.run_as)?;
        s.serialize_field("template", &self.template)?;
        s.serialize_field("arguments", &arguments)?;
        s.serialize_field("customLogic", &LogicMap(self))?;
        s.end()
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct CommandDocumentRepr {
    alias: String,
    base_command: String,
    #[serde(default)]
    permission: String,
    #[serde(default)]
    run_as: RunAs,
    #[serde(default)]
    template: String,
    #[serde(default)]
    arguments: Vec<Argument>,
    #[serde(default, deserialize_with = "logic_entries")]
    custom_logic: Vec<(String, Logic)>,
}

/// Reads `customLogic` as ordered entries so a repeated key is seen rather
/// than overwritten.
fn logic_entries<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Vec<(String, Logic)>, D::Error> {
    struct Entries;

    impl<'de> Visitor<'de> for Entries {
        type Value = Vec<(String, Logic)>;

        fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
            f.write_str("a map of custom logic entries")
        }

        fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
            let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
            while let Some(entry) = map.next_entry()? {
                entries.push(entry);
            }
            Ok(entries)
        }
    }

    deserializer.deserialize_map(Entries)
}

impl TryFrom<CommandDocumentRepr> for CommandDocument {
    type Error = DocumentError;

    // Empty metadata, choices and lists are left for `validate` so that a
    // partly edited document can be saved and loaded again.
    fn try_from(repr: CommandDocumentRepr) -> Result<Self, Self::Error> {
        let mut declarations = IndexMap::new();

        for (i, arg) in repr.arguments.into_iter().enumerate() {
            let (name, kind) = arg
                .into_kind()
                .map_err(|reason| DocumentError::schema(format!("arguments[{i}]"), reason))?;
            let field = format!("arguments[{i}].name");
            check_name(&name).map_err(|e| DocumentError::schema(&field, e.to_string()))?;
            if declarations.contains_key(&name) {
                return Err(DocumentError::schema(
                    field,
                    format!("duplicate argument name `{name}`"),
                ));
            }
            declarations.insert(name, Declaration::Argument(kind));
        }

        for (key, logic) in repr.custom_logic {
            let field = format!("customLogic.{key}");
            check_name(&key).map_err(|e| DocumentError::schema(&field, e.to_string()))?;
            match declarations.get(&key) {
                Some(Declaration::Argument(_)) => {
                    return Err(DocumentError::schema(
                        field,
                        format!("namespace collision: `{key}` is also an argument name"),
                    ));
                }
                Some(Declaration::Logic(_)) => {
                    return Err(DocumentError::schema(
                        field,
                        format!("duplicate custom logic key `{key}`"),
                    ));
                }
                None => {}
            }
            declarations.insert(key, Declaration::Logic(logic));
        }

        Ok(CommandDocument {
            alias: repr.alias,
            base_command: repr.base_command,
            permission: repr.permission,
            run_as: repr.run_as,
            template: repr.template,
            declarations,
        })
    }
}
