//! Custom logic value providers referenced from templates as `{custom:KEY}`.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize, Serializer, ser::SerializeStruct};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LogicType {
    #[serde(rename = "randomnumberrange", alias = "random-number-range")]
    RandomNumberRange,
    #[serde(rename = "guaranteedmaxivs", alias = "guaranteed-max-ivs")]
    GuaranteedMaxIvs,
    #[serde(rename = "randomplayer", alias = "random-player")]
    RandomPlayer,
    #[serde(rename = "randomstringlist", alias = "random-string-list")]
    RandomStringList,
}

impl LogicType {
    pub const ALL: [LogicType; 4] = [
        LogicType::RandomNumberRange,
        LogicType::GuaranteedMaxIvs,
        LogicType::RandomPlayer,
        LogicType::RandomStringList,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            LogicType::RandomNumberRange => "randomnumberrange",
            LogicType::GuaranteedMaxIvs => "guaranteedmaxivs",
            LogicType::RandomPlayer => "randomplayer",
            LogicType::RandomStringList => "randomstringlist",
        }
    }
}

impl Display for LogicType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, thiserror::Error)]
#[error(
    "unknown logic type `{0}`, expected one of: {expected}",
    expected = LogicType::ALL.map(|t| t.name()).join(", ")
)]
pub struct UnknownLogicType(String);

impl FromStr for LogicType {
    type Err = UnknownLogicType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "randomnumberrange" | "random-number-range" => Ok(LogicType::RandomNumberRange),
            "guaranteedmaxivs" | "guaranteed-max-ivs" => Ok(LogicType::GuaranteedMaxIvs),
            "randomplayer" | "random-player" => Ok(LogicType::RandomPlayer),
            "randomstringlist" | "random-string-list" => Ok(LogicType::RandomStringList),
            other => Err(UnknownLogicType(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NumberRange {
    pub min: i64,
    pub max: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct MaxIvs {
    pub num_max_ivs: i64,
    pub max_value: i64,
    pub random_range: (i64, i64),
}

impl Default for MaxIvs {
    fn default() -> Self {
        MaxIvs {
            num_max_ivs: 0,
            max_value: 31,
            random_range: (0, 31),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StringList {
    pub list: Vec<String>,
}

impl StringList {
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        StringList {
            list: entries
                .into_iter()
                .map(|s| s.as_ref().trim().to_string())
                .collect(),
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct NoParams {}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParamError {
    #[error("`min` ({min}) must not be greater than `max` ({max})")]
    RangeInverted { min: i64, max: i64 },
    #[error("`numMaxIvs` must not be negative, got {0}")]
    NegativeMaxIvs(i64),
    #[error("`randomRange` lower bound ({lo}) must not be greater than upper bound ({hi})")]
    RandomRangeInverted { lo: i64, hi: i64 },
    #[error("`list` must contain at least one entry")]
    EmptyList,
    #[error("`list` entry {0} is blank")]
    BlankEntry(usize),
}

impl ParamError {
    /// Params that are well formed but not filled in yet, as left by a type
    /// switch. Documents may be saved and reloaded in this state; only
    /// validation flags them.
    pub fn is_incomplete(&self) -> bool {
        matches!(self, ParamError::EmptyList)
    }
}

/// A value provider; the variant decides both the `type` tag and the shape
/// of `params` on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawLogic")]
pub enum Logic {
    RandomNumberRange(NumberRange),
    GuaranteedMaxIvs(MaxIvs),
    RandomPlayer,
    RandomStringList(StringList),
}

impl Logic {
    pub fn random_number_range(min: i64, max: i64) -> Self {
        Logic::RandomNumberRange(NumberRange { min, max })
    }

    pub fn guaranteed_max_ivs(num_max_ivs: i64, max_value: i64, random_range: (i64, i64)) -> Self {
        Logic::GuaranteedMaxIvs(MaxIvs {
            num_max_ivs,
            max_value,
            random_range,
        })
    }

    pub fn random_string_list<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Logic::RandomStringList(StringList::new(entries))
    }

    /// Default parameters for a freshly selected type. Nothing from a
    /// previous type carries over.
    pub fn default_for(ty: LogicType) -> Self {
        match ty {
            LogicType::RandomNumberRange => Logic::RandomNumberRange(NumberRange::default()),
            LogicType::GuaranteedMaxIvs => Logic::GuaranteedMaxIvs(MaxIvs::default()),
            LogicType::RandomPlayer => Logic::RandomPlayer,
            LogicType::RandomStringList => Logic::RandomStringList(StringList::default()),
        }
    }

    pub fn ty(&self) -> LogicType {
        match self {
            Logic::RandomNumberRange(_) => LogicType::RandomNumberRange,
            Logic::GuaranteedMaxIvs(_) => LogicType::GuaranteedMaxIvs,
            Logic::RandomPlayer => LogicType::RandomPlayer,
            Logic::RandomStringList(_) => LogicType::RandomStringList,
        }
    }

    pub fn validate(&self) -> Result<(), ParamError> {
        match self {
            Logic::RandomNumberRange(NumberRange { min, max }) => {
                if min > max {
                    return Err(ParamError::RangeInverted {
                        min: *min,
                        max: *max,
                    });
                }
            }
            Logic::GuaranteedMaxIvs(ivs) => {
                if ivs.num_max_ivs < 0 {
                    return Err(ParamError::NegativeMaxIvs(ivs.num_max_ivs));
                }
                let (lo, hi) = ivs.random_range;
                if lo > hi {
                    return Err(ParamError::RandomRangeInverted { lo, hi });
                }
            }
            Logic::RandomPlayer => {}
            Logic::RandomStringList(StringList { list }) => {
                if list.is_empty() {
                    return Err(ParamError::EmptyList);
                }
                if let Some(i) = list.iter().position(|s| s.trim().is_empty()) {
                    return Err(ParamError::BlankEntry(i));
                }
            }
        }
        Ok(())
    }
}

impl Serialize for Logic {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("Logic", 2)?;
        s.serialize_field("type", &self.ty())?;
        match self {
            Logic::RandomNumberRange(p) => s.serialize_field("params", p)?,
            Logic::GuaranteedMaxIvs(p) => s.serialize_field("params", p)?,
            Logic::RandomPlayer => s.serialize_field("params", &NoParams {})?,
            Logic::RandomStringList(p) => s.serialize_field("params", p)?,
        }
        s.end()
    }
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawLogic {
    #[serde(rename = "type")]
    ty: LogicType,
    #[serde(default)]
    params: serde_json::Value,
}

#[derive(Debug, thiserror::Error)]
pub enum LogicDecodeError {
    #[error("invalid params for {ty}: {source}")]
    Shape {
        ty: LogicType,
        source: serde_json::Error,
    },
    #[error("invalid params for {ty}: {source}")]
    Constraint { ty: LogicType, source: ParamError },
}

impl TryFrom<RawLogic> for Logic {
    type Error = LogicDecodeError;

    fn try_from(raw: RawLogic) -> Result<Self, Self::Error> {
        let ty = raw.ty;
        let params = match raw.params {
            serde_json::Value::Null => serde_json::Value::Object(Default::default()),
            v => v,
        };
        let shape = |source| LogicDecodeError::Shape { ty, source };

        let logic = match ty {
            LogicType::RandomNumberRange => {
                Logic::RandomNumberRange(serde_json::from_value(params).map_err(shape)?)
            }
            LogicType::GuaranteedMaxIvs => {
                Logic::GuaranteedMaxIvs(serde_json::from_value(params).map_err(shape)?)
            }
            LogicType::RandomPlayer => {
                let NoParams {} = serde_json::from_value(params).map_err(shape)?;
                Logic::RandomPlayer
            }
            LogicType::RandomStringList => {
                let StringList { list } = serde_json::from_value(params).map_err(shape)?;
                Logic::random_string_list(list)
            }
        };

        match logic.validate() {
            Err(source) if !source.is_incomplete() => {
                Err(LogicDecodeError::Constraint { ty, source })
            }
            _ => Ok(logic),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn range_constraint() {
        assert_eq!(
            Logic::random_number_range(10, 2).validate(),
            Err(ParamError::RangeInverted { min: 10, max: 2 })
        );
        assert_eq!(Logic::random_number_range(1, 64).validate(), Ok(()));
        assert_eq!(Logic::random_number_range(5, 5).validate(), Ok(()));
    }

    #[test]
    fn max_ivs_constraints() {
        assert_eq!(
            Logic::guaranteed_max_ivs(-1, 31, (0, 31)).validate(),
            Err(ParamError::NegativeMaxIvs(-1))
        );
        assert_eq!(
            Logic::guaranteed_max_ivs(3, 31, (20, 10)).validate(),
            Err(ParamError::RandomRangeInverted { lo: 20, hi: 10 })
        );
        assert!(Logic::guaranteed_max_ivs(0, 31, (0, 31)).validate().is_ok());
    }

    #[test]
    fn string_list_trimmed_and_non_empty() {
        let logic = Logic::random_string_list([" apple", "pear "]);
        assert_eq!(
            logic,
            Logic::RandomStringList(StringList {
                list: vec!["apple".into(), "pear".into()]
            })
        );
        assert_eq!(
            Logic::random_string_list(Vec::<String>::new()).validate(),
            Err(ParamError::EmptyList)
        );
        assert_eq!(
            Logic::random_string_list(["a", "  "]).validate(),
            Err(ParamError::BlankEntry(1))
        );
    }

    #[test]
    fn default_shapes_are_fresh() {
        assert_eq!(
            serde_json::to_value(Logic::default_for(LogicType::GuaranteedMaxIvs)).unwrap(),
            json!({"type": "guaranteedmaxivs", "params": {"numMaxIvs": 0, "maxValue": 31, "randomRange": [0, 31]}})
        );
        assert_eq!(
            serde_json::to_value(Logic::default_for(LogicType::RandomPlayer)).unwrap(),
            json!({"type": "randomplayer", "params": {}})
        );
    }

    #[test]
    fn decode_accepts_hyphenated_type_names() {
        let logic: Logic = serde_json::from_value(
            json!({"type": "random-number-range", "params": {"min": 1, "max": 64}}),
        )
        .unwrap();
        assert_eq!(logic, Logic::random_number_range(1, 64));
        assert_eq!(
            serde_json::to_value(&logic).unwrap(),
            json!({"type": "randomnumberrange", "params": {"min": 1, "max": 64}})
        );
    }

    #[test]
    fn decode_random_player_without_params() {
        let logic: Logic = serde_json::from_value(json!({"type": "randomplayer"})).unwrap();
        assert_eq!(logic, Logic::RandomPlayer);
    }

    #[test]
    fn decode_rejects_missing_and_stale_params() {
        let err = serde_json::from_value::<Logic>(
            json!({"type": "randomnumberrange", "params": {"min": 1}}),
        )
        .unwrap_err();
        assert!(err.to_string().contains("missing field `max`"), "{err}");

        let err = serde_json::from_value::<Logic>(
            json!({"type": "randomplayer", "params": {"min": 1}}),
        )
        .unwrap_err();
        assert!(err.to_string().contains("unknown field `min`"), "{err}");
    }

    #[test]
    fn decode_rejects_constraint_violation() {
        let err = serde_json::from_value::<Logic>(
            json!({"type": "randomnumberrange", "params": {"min": 10, "max": 2}}),
        )
        .unwrap_err();
        assert!(err.to_string().contains("must not be greater"), "{err}");
    }

    #[test]
    fn decode_keeps_unfilled_list() {
        let logic: Logic =
            serde_json::from_value(json!({"type": "randomstringlist", "params": {"list": []}}))
                .unwrap();
        assert_eq!(logic, Logic::default_for(LogicType::RandomStringList));
        assert_eq!(logic.validate(), Err(ParamError::EmptyList));

        let err = serde_json::from_value::<Logic>(
            json!({"type": "randomstringlist", "params": {"list": ["a", " "]}}),
        )
        .unwrap_err();
        assert!(err.to_string().contains("entry 1 is blank"), "{err}");
    }

    #[test]
    fn decode_rejects_unknown_type() {
        let err = serde_json::from_value::<Logic>(json!({"type": "coinflip", "params": {}}))
            .unwrap_err();
        assert!(err.to_string().contains("unknown variant `coinflip`"), "{err}");
    }

    #[test]
    fn parse_logic_type() {
        for ty in LogicType::ALL {
            assert_eq!(ty.name().parse::<LogicType>().unwrap(), ty);
        }
        assert_eq!(
            "dice".parse::<LogicType>().unwrap_err().to_string(),
            "unknown logic type `dice`, expected one of: randomnumberrange, guaranteedmaxivs, randomplayer, randomstringlist"
        );
    }
}
