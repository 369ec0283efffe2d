//! Query parameters for upstream calls.

use std::fmt;

/// A single query parameter value.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryValue {
    Text(String),
    Number(i64),
    Bool(bool),
}

impl QueryValue {
    fn is_empty(&self) -> bool {
        matches!(self, Self::Text(s) if s.is_empty())
    }
}

impl fmt::Display for QueryValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Number(n) => write!(f, "{}", n),
            Self::Bool(b) => write!(f, "{}", b),
        }
    }
}

impl From<&str> for QueryValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for QueryValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for QueryValue {
    fn from(value: i64) -> Self {
        Self::Number(value)
    }
}

impl From<u32> for QueryValue {
    fn from(value: u32) -> Self {
        Self::Number(value.into())
    }
}

impl From<bool> for QueryValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

/// Ordered query parameters for one upstream call.
///
/// Absent and empty values are kept here but never sent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpstreamQuery {
    params: Vec<(String, Option<QueryValue>)>,
}

impl UpstreamQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a parameter. `None` is recorded and later skipped.
    pub fn param<V: Into<QueryValue>>(mut self, name: impl Into<String>, value: Option<V>) -> Self {
        self.params.push((name.into(), value.map(Into::into)));
        self
    }

    /// Parameters that will actually be sent, coerced to strings.
    pub fn pairs(&self) -> Vec<(&str, String)> {
        self.params
            .iter()
            .filter_map(|(name, value)| match value {
                Some(v) if !v.is_empty() => Some((name.as_str(), v.to_string())),
                _ => None,
            })
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs().is_empty()
    }
}
