// File: src/field.rs
// Purpose: Field data model and declarative attribute lookup

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;

/// Dataset keys read from an input (`data-required`, `data-validator`, ...)
pub mod keys {
    pub const REQUIRED: &str = "required";
    pub const VALIDATOR: &str = "validator";
    pub const VALIDATOR_MIN: &str = "validatorMin";
    pub const VALIDATOR_MAX: &str = "validatorMax";
    pub const VALIDATOR_PATTERN: &str = "validatorPattern";
}

/// Anything that exposes an element's `data-*` attributes by dataset key.
pub trait AttributeSource {
    fn attribute(&self, key: &str) -> Option<String>;

    /// Presence check; `data-required=""` counts as present.
    fn has_attribute(&self, key: &str) -> bool {
        self.attribute(key).is_some()
    }
}

impl AttributeSource for HashMap<String, String> {
    fn attribute(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

impl AttributeSource for BTreeMap<String, String> {
    fn attribute(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

impl AttributeSource for [(&str, &str)] {
    fn attribute(&self, key: &str) -> Option<String> {
        self.iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| (*v).to_string())
    }
}

/// Which check a non-empty value must pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidatorKind {
    /// ASCII digits, optionally bounded by `min`/`max`
    Number,
    /// ASCII letters only
    Letters,
    /// The field's own pattern
    Regexp,
    /// No check; any non-empty value passes
    #[default]
    #[serde(other)]
    None,
}

impl ValidatorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Number => "number",
            Self::Letters => "letters",
            Self::Regexp => "regexp",
            Self::None => "none",
        }
    }
}

impl FromStr for ValidatorKind {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "number" => Self::Number,
            "letters" => Self::Letters,
            "regexp" => Self::Regexp,
            "" | "none" => Self::None,
            other => {
                tracing::warn!(validator = other, "unknown validator, value will not be checked");
                Self::None
            }
        })
    }
}

impl fmt::Display for ValidatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named value holder together with its declared constraints.
///
/// Bounds and pattern are kept exactly as written in the attributes; they
/// are parsed when the field is compiled into [`FieldRules`](crate::FieldRules).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Field {
    pub value: String,
    pub required: bool,
    pub validator: ValidatorKind,
    #[serde(alias = "validatorMin", deserialize_with = "raw_bound")]
    pub min: Option<String>,
    #[serde(alias = "validatorMax", deserialize_with = "raw_bound")]
    pub max: Option<String>,
    #[serde(alias = "validatorPattern")]
    pub pattern: Option<String>,
}

impl Field {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            ..Self::default()
        }
    }

    /// Read constraints from an element's dataset
    pub fn from_attributes(value: impl Into<String>, source: &(impl AttributeSource + ?Sized)) -> Self {
        let validator = source
            .attribute(keys::VALIDATOR)
            .map(|name| name.parse::<ValidatorKind>().unwrap_or_default())
            .unwrap_or_default();

        Self {
            value: value.into(),
            required: source.has_attribute(keys::REQUIRED),
            validator,
            min: source.attribute(keys::VALIDATOR_MIN),
            max: source.attribute(keys::VALIDATOR_MAX),
            pattern: source.attribute(keys::VALIDATOR_PATTERN),
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn validator(mut self, kind: ValidatorKind) -> Self {
        self.validator = kind;
        self
    }

    pub fn min(mut self, min: impl Into<String>) -> Self {
        self.min = Some(min.into());
        self
    }

    pub fn max(mut self, max: impl Into<String>) -> Self {
        self.max = Some(max.into());
        self
    }

    pub fn pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }
}

/// Bounds may arrive as strings (dataset) or numbers (plain JS objects).
fn raw_bound<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Text(String),
        Number(f64),
    }

    Ok(Option::<Repr>::deserialize(deserializer)?.map(|repr| match repr {
        Repr::Text(text) => text,
        Repr::Number(n) => n.to_string(),
    }))
}
