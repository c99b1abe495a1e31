use super::error::ScoreError;
use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Weight a criterion gets when none is given (mid-point of the 0-5 scale)
pub const DEFAULT_WEIGHT: f64 = 2.5;

/// Whether a larger raw value should raise or lower the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Benefit,
    Cost,
}

impl Direction {
    /// Exponent sign: +1 for benefit, -1 for cost
    pub fn sign(self) -> f64 {
        match self {
            Direction::Benefit => 1.0,
            Direction::Cost => -1.0,
        }
    }

    pub fn parse(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "benefit" | "b" | "+" => Ok(Direction::Benefit),
            "cost" | "c" | "-" => Ok(Direction::Cost),
            other => bail!("Direction must be 'benefit' or 'cost', got '{}'", other),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Benefit => write!(f, "Benefit"),
            Direction::Cost => write!(f, "Cost"),
        }
    }
}

/// One selected attribute with its direction and raw (unnormalized) weight.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Criterion {
    /// Dataset column name, e.g. "wins"
    pub key: String,
    pub direction: Direction,
    #[serde(default = "default_weight")]
    pub weight: f64,
}

fn default_weight() -> f64 {
    DEFAULT_WEIGHT
}

impl Criterion {
    pub fn new(key: impl Into<String>, direction: Direction, weight: f64) -> Self {
        Self {
            key: key.into(),
            direction,
            weight,
        }
    }

    pub fn benefit(key: impl Into<String>, weight: f64) -> Self {
        Self::new(key, Direction::Benefit, weight)
    }

    pub fn cost(key: impl Into<String>, weight: f64) -> Self {
        Self::new(key, Direction::Cost, weight)
    }

    /// Parse the command-line form `key:direction[:weight]`.
    ///
    /// Examples: `wins:benefit:3`, `losses:cost:1.5`, `draws:cost`
    pub fn parse(s: &str) -> Result<Self> {
        let parts: Vec<&str> = s.trim().split(':').map(str::trim).collect();
        let (key, direction, weight) = match parts.as_slice() {
            [key, direction] => (*key, *direction, DEFAULT_WEIGHT),
            [key, direction, weight] => {
                let weight: f64 = match weight.parse() {
                    Ok(w) => w,
                    Err(_) => bail!("Invalid weight '{}' in '{}'", weight, s),
                };
                (*key, *direction, weight)
            }
            _ => bail!("Criterion must look like key:direction[:weight], got '{}'", s),
        };
        if key.is_empty() {
            bail!("Criterion key is empty in '{}'", s);
        }
        Ok(Self::new(key, Direction::parse(direction)?, weight))
    }
}

/// A validated, immutable criterion selection for one scoring run.
///
/// Construction checks everything the engine relies on: at least one
/// criterion, unique non-empty keys, finite non-negative weights, and a
/// non-zero weight sum. The normalized weights are computed once here and
/// always sum to 1.
#[derive(Debug, Clone, PartialEq)]
pub struct CriterionSet {
    criteria: Vec<Criterion>,
    normalized: Vec<f64>,
}

impl CriterionSet {
    pub fn new(criteria: Vec<Criterion>) -> Result<Self, ScoreError> {
        if criteria.is_empty() {
            return Err(ScoreError::configuration("select at least one criterion"));
        }

        let mut seen = HashSet::new();
        for criterion in &criteria {
            if criterion.key.trim().is_empty() {
                return Err(ScoreError::configuration("criterion key must not be empty"));
            }
            if !criterion.weight.is_finite() || criterion.weight < 0.0 {
                return Err(ScoreError::configuration(format!(
                    "weight for '{}' must be a finite non-negative number, got {}",
                    criterion.key, criterion.weight
                )));
            }
            if !seen.insert(criterion.key.as_str()) {
                return Err(ScoreError::configuration(format!(
                    "criterion '{}' is selected more than once",
                    criterion.key
                )));
            }
        }

        let total: f64 = criteria.iter().map(|c| c.weight).sum();
        if total == 0.0 {
            return Err(ScoreError::configuration("weights must not all be zero"));
        }
        if !total.is_finite() {
            return Err(ScoreError::configuration("sum of weights is not finite"));
        }

        let normalized = criteria.iter().map(|c| c.weight / total).collect();
        Ok(Self {
            criteria,
            normalized,
        })
    }

    pub fn criteria(&self) -> &[Criterion] {
        &self.criteria
    }

    /// `weight / sum(weights)` per criterion, in selection order
    pub fn normalized_weights(&self) -> &[f64] {
        &self.normalized
    }

    /// Signed normalized weight used as the WP exponent for criterion `i`
    pub fn exponent(&self, i: usize) -> f64 {
        self.criteria[i].direction.sign() * self.normalized[i]
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.criteria.iter().map(|c| c.key.as_str())
    }

    pub fn len(&self) -> usize {
        self.criteria.len()
    }

    /// Always false for a constructed set; kept for API symmetry with `len`
    pub fn is_empty(&self) -> bool {
        self.criteria.is_empty()
    }
}
