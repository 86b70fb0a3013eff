//! Parameter values and assignments
//!
//! An [`Assignment`] maps parameter names to [`ParamValue`]s. It is the unit a
//! sweep generates and the unit a job runner consumes.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::error::{Result, SweepError};
use crate::sweep::decimal::ExactDecimal;

/// A single parameter value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum ParamValue {
    /// Free-form text, passed through verbatim
    Text(String),

    /// Exact decimal (range sweeps)
    Decimal(ExactDecimal),

    /// Floating point (uniform random draws)
    Float(f64),

    /// Integer
    Integer(i64),

    /// Boolean
    Bool(bool),
}

impl ParamValue {
    pub fn text(value: impl Into<String>) -> Self {
        ParamValue::Text(value.into())
    }

    /// The value as text, if it is a text value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ParamValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// The value as a decimal, if it is a decimal value.
    pub fn as_decimal(&self) -> Option<ExactDecimal> {
        match self {
            ParamValue::Decimal(d) => Some(*d),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ParamValue::Float(v) => Some(*v),
            ParamValue::Integer(v) => Some(*v as f64),
            ParamValue::Decimal(d) => d.to_string().parse().ok(),
            _ => None,
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Text(s) => write!(f, "{}", s),
            ParamValue::Decimal(d) => write!(f, "{}", d),
            ParamValue::Float(v) => write!(f, "{}", v),
            ParamValue::Integer(v) => write!(f, "{}", v),
            ParamValue::Bool(v) => write!(f, "{}", v),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Text(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Text(value)
    }
}

impl From<ExactDecimal> for ParamValue {
    fn from(value: ExactDecimal) -> Self {
        ParamValue::Decimal(value)
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        ParamValue::Float(value)
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        ParamValue::Integer(value)
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        ParamValue::Bool(value)
    }
}

/// A mapping from parameter name to value.
///
/// Names are unique within one assignment. Keys are kept sorted so iteration
/// and serialized output never depend on insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Assignment {
    values: BTreeMap<String, ParamValue>,
}

impl Assignment {
    pub fn new() -> Self {
        Self::default()
    }

    /// An assignment holding a single parameter.
    pub fn single(name: &str, value: ParamValue) -> Self {
        let mut values = BTreeMap::new();
        values.insert(name.to_string(), value);
        Self { values }
    }

    /// Insert a parameter, failing if the name is already assigned.
    pub fn insert(&mut self, name: &str, value: ParamValue) -> Result<()> {
        if self.values.contains_key(name) {
            return Err(SweepError::DuplicateParameter {
                name: name.to_string(),
            });
        }
        self.values.insert(name.to_string(), value);
        Ok(())
    }

    /// Combine two assignments into one.
    ///
    /// Fails with [`SweepError::DuplicateParameter`] on the first name of
    /// `other` that `self` already holds.
    pub fn merge(&self, other: &Assignment) -> Result<Assignment> {
        let mut merged = self.clone();
        for (name, value) in &other.values {
            merged.insert(name, value.clone())?;
        }
        Ok(merged)
    }

    /// Fill in `name` only if it is not assigned yet.
    pub(crate) fn fill_default(&mut self, name: &str, value: &ParamValue) {
        self.values
            .entry(name.to_string())
            .or_insert_with(|| value.clone());
    }

    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.values.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn names(&self) -> Vec<String> {
        self.values.keys().cloned().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &ParamValue)> {
        self.values.iter()
    }
}

impl fmt::Display for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (name, value) in &self.values {
            if !first {
                write!(f, " ")?;
            }
            write!(f, "{}={}", name, value)?;
            first = false;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a Assignment {
    type Item = (&'a String, &'a ParamValue);
    type IntoIter = std::collections::btree_map::Iter<'a, String, ParamValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}
