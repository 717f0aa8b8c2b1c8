//! The closed format-token table.
//!
//! Five semantic argument kinds map bidirectionally onto canonical
//! printf-style tokens. Every specifier default in the crate, and every
//! decoded placeholder, goes through this table; a token outside it is
//! rejected as corrupt data.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

use crate::error::Error;

/// A typed argument slot with no concrete value yet.
///
/// Placeholders let a template declare an argument's type before the value
/// is known; at formatting time each kind resolves to a fixed zero-equivalent
/// default (see [`crate::types::LocalizationValue::localize`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Placeholder {
    Double,
    Float,
    Int,
    Object,
    Uint,
}

impl Placeholder {
    /// The canonical printf-style token for this kind.
    pub fn format_specifier(self) -> &'static str {
        match self {
            Placeholder::Double => "%lf",
            Placeholder::Float => "%f",
            Placeholder::Int => "%lld",
            Placeholder::Object => "%@",
            Placeholder::Uint => "%llu",
        }
    }
}

impl fmt::Display for Placeholder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_specifier())
    }
}

impl FromStr for Placeholder {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "%lf" => Ok(Placeholder::Double),
            "%f" => Ok(Placeholder::Float),
            "%lld" => Ok(Placeholder::Int),
            "%@" => Ok(Placeholder::Object),
            "%llu" => Ok(Placeholder::Uint),
            _ => Err(Error::MalformedSpecifier(s.to_string())),
        }
    }
}

/// Encodes as the bare token string, e.g. `"%lld"`.
impl Serialize for Placeholder {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.format_specifier())
    }
}

/// Decodes from the bare token string; any token outside the table aborts
/// deserialization of the enclosing structure.
impl<'de> Deserialize<'de> for Placeholder {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let specifier = String::deserialize(deserializer)?;
        specifier.parse().map_err(|_| {
            de::Error::custom(format!(
                "unable to create a placeholder from specifier `{}`",
                specifier
            ))
        })
    }
}
