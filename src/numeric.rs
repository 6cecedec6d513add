// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! A numeric document field, as received from a caller.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Number;
use std::fmt::Display;

/// A numeric field of an instance or twin document.
///
/// Documents may come from callers or storage that don't agree on how numbers
/// are written, so numbers encoded as text are kept as such, and any other
/// JSON value is kept as-is, `null` included.  The value is only coerced to a
/// real number where it is used, which keeps the compiler a pure passthrough.
///
/// Numbers keep their JSON representation, so integers are written back as
/// integers.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Numeric {
    Number(Number),
    Text(String),
    Other(serde_json::Value),
}

impl Numeric {
    /// Returns the value as a finite real number, if it can be interpreted as
    /// one.
    pub fn to_f64(&self) -> Option<f64> {
        let value = match self {
            Numeric::Number(number) => number.as_f64()?,
            Numeric::Text(text) => text.trim().parse::<f64>().ok()?,
            Numeric::Other(_) => return None,
        };
        value.is_finite().then_some(value)
    }
}

impl From<f64> for Numeric {
    /// JSON has no non-finite numbers, those are kept as text.
    fn from(value: f64) -> Self {
        match Number::from_f64(value) {
            Some(number) => Numeric::Number(number),
            None => Numeric::Text(value.to_string()),
        }
    }
}

impl From<i64> for Numeric {
    fn from(value: i64) -> Self {
        Numeric::Number(value.into())
    }
}

/// Deserializes an optional numeric field that is only `None` when absent.
///
/// Plain `Option` decoding turns `null` into `None`, which would make an
/// explicit `null` indistinguishable from a missing field.  Use together
/// with `#[serde(default)]`.
pub(crate) fn present<'de, D>(deserializer: D) -> Result<Option<Numeric>, D::Error>
where
    D: Deserializer<'de>,
{
    Numeric::deserialize(deserializer).map(Some)
}

impl Display for Numeric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Numeric::Number(value) => write!(f, "{value}"),
            Numeric::Text(text) => write!(f, "{text:?}"),
            Numeric::Other(value) => write!(f, "{value}"),
        }
    }
}
