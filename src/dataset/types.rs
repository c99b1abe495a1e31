use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

use super::loader::NAME_COLUMN;

/// A single cell of the fighter statistics table.
///
/// Numeric columns parse into `Number`, free text (stance, nickname, dates)
/// stays as `Category`, and empty or unparseable-as-finite cells are `Missing`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AttrValue {
    Number(f64),
    Category(String),
    Missing,
}

impl AttrValue {
    /// Interpret a raw CSV cell
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.is_empty() {
            return AttrValue::Missing;
        }
        match raw.parse::<f64>() {
            Ok(n) if n.is_finite() => AttrValue::Number(n),
            // "NaN", "inf" and friends parse as floats but carry no data
            Ok(_) => AttrValue::Missing,
            Err(_) => AttrValue::Category(raw.to_string()),
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            AttrValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_category(&self) -> Option<&str> {
        match self {
            AttrValue::Category(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, AttrValue::Missing)
    }
}

impl From<f64> for AttrValue {
    fn from(n: f64) -> Self {
        AttrValue::Number(n)
    }
}

impl From<&str> for AttrValue {
    fn from(s: &str) -> Self {
        AttrValue::Category(s.to_string())
    }
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttrValue::Number(n) => write!(f, "{}", n),
            AttrValue::Category(s) => write!(f, "{}", s),
            AttrValue::Missing => write!(f, "-"),
        }
    }
}

/// Anything the scoring engine can rank: a named bag of attributes.
pub trait Entity {
    fn name(&self) -> &str;
    fn attribute(&self, key: &str) -> Option<&AttrValue>;
}

/// One row of the fighter statistics dataset
#[derive(Debug, Clone, PartialEq)]
pub struct Fighter {
    pub name: String,
    pub attributes: HashMap<String, AttrValue>,
}

impl Fighter {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: HashMap::new(),
        }
    }

    /// Builder-style attribute setter, mostly for fixtures
    pub fn with(mut self, key: &str, value: impl Into<AttrValue>) -> Self {
        self.attributes.insert(key.to_string(), value.into());
        self
    }

    /// Numeric value of `key`, `None` when absent or not a number
    pub fn number(&self, key: &str) -> Option<f64> {
        self.attributes.get(key).and_then(AttrValue::as_number)
    }

    pub fn stance(&self) -> Option<&str> {
        self.attributes.get("stance").and_then(AttrValue::as_category)
    }
}

impl Entity for Fighter {
    fn name(&self) -> &str {
        &self.name
    }

    fn attribute(&self, key: &str) -> Option<&AttrValue> {
        self.attributes.get(key)
    }
}

/// The loaded table: header order plus every fighter row in file order.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub columns: Vec<String>,
    pub fighters: Vec<Fighter>,
}

impl Dataset {
    pub fn has_column(&self, key: &str) -> bool {
        self.columns.iter().any(|c| c == key)
    }

    /// Whether `key` names a column that reaches `Fighter::attributes`.
    /// The name column identifies fighters and is never an attribute.
    pub fn has_attribute(&self, key: &str) -> bool {
        key != NAME_COLUMN && self.has_column(key)
    }

    pub fn len(&self) -> usize {
        self.fighters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fighters.is_empty()
    }
}
