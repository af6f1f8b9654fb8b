//! Renders a document into a concrete command line, the way the dispatcher
//! does when the command is invoked. Used for previews.

use std::collections::HashMap;

use rand::{Rng, seq::SliceRandom};

use crate::{
    argument::ArgumentKind,
    document::CommandDocument,
    logic::{Logic, MaxIvs, NumberRange, ParamError, StringList},
    template::{PlaceholderKind, ReservedToken, Segment, Template},
    validate::Issue,
};

const IV_STATS: [&str; 6] = ["hp", "atk", "def", "spatk", "spdef", "speed"];

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    #[error("document is not executable: {0}")]
    Invalid(Issue),
    #[error("missing value for argument `{0}`")]
    MissingArgument(String),
    #[error("unexpected extra argument `{0}`")]
    UnexpectedArgument(String),
    #[error("argument `{0}` must not be empty")]
    EmptyValue(String),
    #[error("argument `{name}` expects an integer, got `{value}`")]
    InvalidInteger { name: String, value: String },
    #[error("argument `{name}` must be one of {}, got `{value}`", .choices.join(", "))]
    InvalidChoice {
        name: String,
        value: String,
        choices: Vec<String>,
    },
    #[error("custom logic `{0}` needs a player but none are online")]
    NoPlayersOnline(String),
    #[error("custom logic `{key}` cannot be evaluated: {source}")]
    InvalidParams { key: String, source: ParamError },
}

/// Runtime inputs for one invocation.
#[derive(Debug, Clone, Default)]
pub struct Invocation {
    /// Values for the declared arguments, in declaration order.
    pub arguments: Vec<String>,
    /// Candidates for `randomplayer`.
    pub online_players: Vec<String>,
}

fn check_input(name: &str, kind: &ArgumentKind, value: &str) -> Result<(), ResolveError> {
    if value.is_empty() {
        return Err(ResolveError::EmptyValue(name.to_string()));
    }
    match kind {
        ArgumentKind::Int => {
            value
                .parse::<i64>()
                .map_err(|_| ResolveError::InvalidInteger {
                    name: name.to_string(),
                    value: value.to_string(),
                })?;
        }
        ArgumentKind::Choice(choices) => {
            if !choices.iter().any(|c| c == value) {
                return Err(ResolveError::InvalidChoice {
                    name: name.to_string(),
                    value: value.to_string(),
                    choices: choices.clone(),
                });
            }
        }
        ArgumentKind::String | ArgumentKind::Player => {}
    }
    Ok(())
}

/// Produces one value for a logic entry. Params are checked first, so an
/// entry built by hand with an inverted range is an error, not a panic.
pub fn evaluate<R: Rng + ?Sized>(
    key: &str,
    logic: &Logic,
    online_players: &[String],
    rng: &mut R,
) -> Result<String, ResolveError> {
    let invalid = |source: ParamError| ResolveError::InvalidParams {
        key: key.to_string(),
        source,
    };
    logic.validate().map_err(invalid)?;

    let value = match logic {
        Logic::RandomNumberRange(NumberRange { min, max }) => rng.gen_range(*min..=*max).to_string(),
        Logic::GuaranteedMaxIvs(ivs) => max_ivs(ivs, rng),
        Logic::RandomPlayer => online_players
            .choose(rng)
            .cloned()
            .ok_or_else(|| ResolveError::NoPlayersOnline(key.to_string()))?,
        Logic::RandomStringList(StringList { list }) => list
            .choose(rng)
            .cloned()
            .ok_or_else(|| invalid(ParamError::EmptyList))?,
    };
    Ok(value)
}

fn max_ivs<R: Rng + ?Sized>(ivs: &MaxIvs, rng: &mut R) -> String {
    let count = ivs.num_max_ivs.clamp(0, IV_STATS.len() as i64) as usize;
    let maxed = rand::seq::index::sample(&mut *rng, IV_STATS.len(), count).into_vec();
    let (lo, hi) = ivs.random_range;

    IV_STATS
        .iter()
        .enumerate()
        .map(|(i, stat)| {
            let value = if maxed.contains(&i) {
                ivs.max_value
            } else {
                rng.gen_range(lo..=hi)
            };
            format!("iv{stat}:{value}")
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Renders `doc` for one invocation. Each `custom:KEY` is evaluated once,
/// so repeated references to the same key agree.
pub fn render<R: Rng + ?Sized>(
    doc: &CommandDocument,
    invocation: &Invocation,
    rng: &mut R,
) -> Result<String, ResolveError> {
    if let Some(issue) = doc.validate().errors().next() {
        return Err(ResolveError::Invalid(issue.clone()));
    }
    let template = Template::parse(&doc.template)
        .map_err(|e| ResolveError::Invalid(Issue::TemplateSyntax(e)))?;

    let declared: Vec<_> = doc.arguments().collect();
    if let Some(extra) = invocation.arguments.get(declared.len()) {
        return Err(ResolveError::UnexpectedArgument(extra.clone()));
    }

    let mut values: HashMap<&str, String> = HashMap::new();
    for (i, &(name, kind)) in declared.iter().enumerate() {
        let value = invocation
            .arguments
            .get(i)
            .ok_or_else(|| ResolveError::MissingArgument(name.to_string()))?;
        check_input(name, kind, value)?;
        values.insert(name, value.clone());
    }

    let mut computed: HashMap<&str, String> = HashMap::new();
    let mut out = String::new();

    for segment in &template.segments {
        match segment {
            Segment::Literal(text) => out.push_str(text),
            Segment::Placeholder(p) => match &p.kind {
                PlaceholderKind::Reserved(ReservedToken::BaseCommand) => {
                    out.push_str(&doc.base_command)
                }
                PlaceholderKind::Argument(name) => match values.get(name.as_str()) {
                    Some(value) => out.push_str(value),
                    None => {
                        return Err(ResolveError::Invalid(Issue::DanglingArgumentReference(
                            name.clone(),
                        )));
                    }
                },
                PlaceholderKind::Custom(key) => {
                    if !computed.contains_key(key.as_str()) {
                        let logic = doc.logic(key).ok_or_else(|| {
                            ResolveError::Invalid(Issue::DanglingLogicReference(key.clone()))
                        })?;
                        let value = evaluate(key, logic, &invocation.online_players, &mut *rng)?;
                        tracing::trace!(key = %key, %value, "evaluated custom logic");
                        computed.insert(key.as_str(), value);
                    }
                    if let Some(value) = computed.get(key.as_str()) {
                        out.push_str(value);
                    }
                }
            },
        }
    }

    tracing::debug!(alias = %doc.alias, command = %out, "rendered command");
    Ok(out)
}
