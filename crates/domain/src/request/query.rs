//! Query parameter types

use std::fmt::Display;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// A query parameter whose value may be undefined.
///
/// Undefined parameters are kept so callers can build parameter lists
/// unconditionally; they are skipped when the URL is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryParam {
    /// The parameter key
    pub key: String,
    /// The string-coerced value, `None` when undefined
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl QueryParam {
    /// Creates a defined query parameter.
    #[must_use]
    pub fn new(key: impl Into<String>, value: impl Display) -> Self {
        Self {
            key: key.into(),
            value: Some(value.to_string()),
        }
    }

    /// Creates a parameter from an optional value.
    #[must_use]
    pub fn optional<V: Display>(key: impl Into<String>, value: Option<V>) -> Self {
        Self {
            key: key.into(),
            value: value.map(|v| v.to_string()),
        }
    }

    /// Returns true if the parameter has a value.
    #[must_use]
    pub const fn is_defined(&self) -> bool {
        self.value.is_some()
    }
}

impl FromStr for QueryParam {
    type Err = DomainError;

    /// Parses a `key=value` pair. The value may be empty, the key may not.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('=') {
            Some((key, value)) if !key.is_empty() => Ok(Self::new(key, value)),
            _ => Err(DomainError::InvalidQueryParam(s.to_string())),
        }
    }
}

/// An ordered collection of query parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QueryParams {
    items: Vec<QueryParam>,
}

impl QueryParams {
    /// Creates an empty query parameter collection.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Adds a query parameter to the collection.
    pub fn add(&mut self, param: QueryParam) {
        self.items.push(param);
    }

    /// Appends a defined parameter, builder style.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Display) -> Self {
        self.add(QueryParam::new(key, value));
        self
    }

    /// Appends a parameter that may be undefined, builder style.
    #[must_use]
    pub fn with_optional<V: Display>(mut self, key: impl Into<String>, value: Option<V>) -> Self {
        self.add(QueryParam::optional(key, value));
        self
    }

    /// Returns the defined parameters as key/value pairs, in insertion order.
    pub fn defined(&self) -> impl Iterator<Item = (&str, &str)> {
        self.items
            .iter()
            .filter_map(|p| p.value.as_deref().map(|v| (p.key.as_str(), v)))
    }

    /// Returns all parameters (defined and undefined).
    #[must_use]
    pub fn all(&self) -> &[QueryParam] {
        &self.items
    }

    /// Returns the number of parameters.
    #[must_use]
    #[allow(clippy::missing_const_for_fn)]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if there are no parameters.
    #[must_use]
    #[allow(clippy::missing_const_for_fn)]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl FromIterator<QueryParam> for QueryParams {
    fn from_iter<T: IntoIterator<Item = QueryParam>>(iter: T) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_values_are_string_coerced() {
        assert_eq!(QueryParam::new("page", 1).value.as_deref(), Some("1"));
        assert_eq!(QueryParam::new("flag", true).value.as_deref(), Some("true"));
        assert_eq!(QueryParam::new("ratio", 0.5).value.as_deref(), Some("0.5"));
    }

    #[test]
    fn test_undefined_params_are_skipped_in_order() {
        let params = QueryParams::new()
            .with("a", 1)
            .with_optional::<String>("b", None)
            .with("c", "y");

        assert_eq!(params.len(), 3);
        let defined: Vec<_> = params.defined().collect();
        assert_eq!(defined, vec![("a", "1"), ("c", "y")]);
    }

    #[test]
    fn test_parse_key_value() {
        let param: QueryParam = "q=rust lang".parse().unwrap();
        assert_eq!(param, QueryParam::new("q", "rust lang"));

        let empty: QueryParam = "flag=".parse().unwrap();
        assert_eq!(empty.value.as_deref(), Some(""));
    }

    #[test]
    fn test_parse_rejects_missing_key() {
        assert!("=value".parse::<QueryParam>().is_err());
        assert!("novalue".parse::<QueryParam>().is_err());
    }
}
