//! Filter dimensions, their value codecs and the per-query selection set.
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::domain::types::TypeConstraintError;

/// A single selected option within a filter dimension.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(untagged)]
pub enum FilterValue {
    Boolean(bool),
    Integer(i64),
    Text(String),
}

impl FilterValue {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }
}

impl Display for FilterValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            FilterValue::Boolean(value) => write!(f, "{value}"),
            FilterValue::Integer(value) => write!(f, "{value}"),
            FilterValue::Text(value) => write!(f, "{value}"),
        }
    }
}

impl From<bool> for FilterValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<i64> for FilterValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// Text encoding of one dimension's values.
///
/// Encoding and decoding are symmetric: `decode(encode(v)) == v` for every
/// value the codec accepts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FilterCodec {
    /// Any non-blank string.
    Text,
    /// Signed decimal integer.
    Integer,
    /// Literal `true` / `false`.
    Boolean,
    /// One of a closed set of option slugs.
    OneOf(&'static [&'static str]),
}

impl FilterCodec {
    /// Returns whether `value` has the shape this codec produces.
    pub fn accepts(&self, value: &FilterValue) -> bool {
        match (self, value) {
            (FilterCodec::Text, FilterValue::Text(text)) => !text.trim().is_empty(),
            (FilterCodec::Integer, FilterValue::Integer(_)) => true,
            (FilterCodec::Boolean, FilterValue::Boolean(_)) => true,
            (FilterCodec::OneOf(options), FilterValue::Text(text)) => {
                options.contains(&text.as_str())
            }
            _ => false,
        }
    }

    pub fn encode(&self, value: &FilterValue) -> String {
        value.to_string()
    }

    pub fn decode(&self, raw: &str) -> Result<FilterValue, TypeConstraintError> {
        let invalid = || TypeConstraintError::InvalidValue(raw.to_string());
        match self {
            FilterCodec::Text => {
                if raw.trim().is_empty() {
                    Err(TypeConstraintError::EmptyString)
                } else {
                    Ok(FilterValue::Text(raw.to_string()))
                }
            }
            FilterCodec::Integer => raw
                .parse::<i64>()
                .map(FilterValue::Integer)
                .map_err(|_| invalid()),
            FilterCodec::Boolean => match raw {
                "true" => Ok(FilterValue::Boolean(true)),
                "false" => Ok(FilterValue::Boolean(false)),
                _ => Err(invalid()),
            },
            FilterCodec::OneOf(options) => {
                if options.contains(&raw) {
                    Ok(FilterValue::Text(raw.to_string()))
                } else {
                    Err(invalid())
                }
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cardinality {
    /// Checkbox group: any number of values.
    Multi,
    /// Radio group: at most one value.
    Single,
}

/// A named filter axis of a list screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FilterDimension {
    pub key: &'static str,
    pub codec: FilterCodec,
    pub cardinality: Cardinality,
}

impl FilterDimension {
    pub const fn multi(key: &'static str, codec: FilterCodec) -> Self {
        Self {
            key,
            codec,
            cardinality: Cardinality::Multi,
        }
    }

    pub const fn single(key: &'static str, codec: FilterCodec) -> Self {
        Self {
            key,
            codec,
            cardinality: Cardinality::Single,
        }
    }

    /// Drops values the codec rejects. Multi-select axes keep the rest in
    /// order with duplicates removed (first occurrence wins); single-select
    /// axes keep only the latest accepted value.
    pub fn normalize(&self, values: impl IntoIterator<Item = FilterValue>) -> Vec<FilterValue> {
        let accepted = values.into_iter().filter(|value| {
            let accepted = self.codec.accepts(value);
            if !accepted {
                log::debug!("Dropping {value:?} not accepted by filter `{}`", self.key);
            }
            accepted
        });

        match self.cardinality {
            Cardinality::Single => accepted.last().into_iter().collect(),
            Cardinality::Multi => {
                let mut normalized: Vec<FilterValue> = Vec::new();
                for value in accepted {
                    if !normalized.contains(&value) {
                        normalized.push(value);
                    }
                }
                normalized
            }
        }
    }
}

/// Selected values per filter dimension. Dimensions without a selection are
/// absent rather than present-and-empty.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct FilterSet(BTreeMap<String, Vec<FilterValue>>);

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Values selected for `key`, empty when unconstrained.
    pub fn selection(&self, key: &str) -> &[FilterValue] {
        self.0.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Returns a copy with the dimension's selection replaced.
    pub fn with_selection(
        &self,
        dimension: &FilterDimension,
        values: impl IntoIterator<Item = FilterValue>,
    ) -> Self {
        let mut next = self.clone();
        let values = dimension.normalize(values);
        if values.is_empty() {
            next.0.remove(dimension.key);
        } else {
            next.0.insert(dimension.key.to_string(), values);
        }
        next
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[FilterValue])> {
        self.0
            .iter()
            .map(|(key, values)| (key.as_str(), values.as_slice()))
    }
}
