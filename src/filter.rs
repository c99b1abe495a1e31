use crate::dataset::Fighter;
use serde::{Deserialize, Serialize};

/// Upstream record filters applied before scoring.
///
/// An unset filter lets everything through. An active filter drops fighters
/// that have no value for the filtered attribute.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FilterConfig {
    /// Keep only these stances (case-insensitive)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stances: Option<Vec<String>>,

    /// Keep only fighters whose `weight_in_kg` lies in this inclusive range
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight_kg: Option<WeightRange>,
}

#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct WeightRange {
    #[serde(default)]
    pub min: Option<f64>,
    #[serde(default)]
    pub max: Option<f64>,
}

impl WeightRange {
    pub fn contains(&self, weight: f64) -> bool {
        self.min.map_or(true, |min| weight >= min) && self.max.map_or(true, |max| weight <= max)
    }
}

impl FilterConfig {
    pub fn is_active(&self) -> bool {
        self.stances.is_some() || self.weight_kg.is_some()
    }

    pub fn matches(&self, fighter: &Fighter) -> bool {
        if let Some(ref stances) = self.stances {
            let stance_ok = fighter
                .stance()
                .is_some_and(|s| stances.iter().any(|want| want.eq_ignore_ascii_case(s)));
            if !stance_ok {
                return false;
            }
        }
        if let Some(range) = self.weight_kg {
            let weight_ok = fighter
                .number("weight_in_kg")
                .is_some_and(|w| range.contains(w));
            if !weight_ok {
                return false;
            }
        }
        true
    }
}

/// Keep the fighters that pass every active filter, preserving order
pub fn filter_fighters(fighters: Vec<Fighter>, filter: &FilterConfig) -> Vec<Fighter> {
    fighters.into_iter().filter(|f| filter.matches(f)).collect()
}

/// Validate filter configuration, collecting every problem
pub fn validate_filters(filter: &FilterConfig) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if let Some(ref stances) = filter.stances {
        if stances.is_empty() {
            errors.push("filters.stances: select at least one stance or remove the filter".to_string());
        }
    }

    if let Some(range) = filter.weight_kg {
        for (name, bound) in [("min", range.min), ("max", range.max)] {
            if let Some(v) = bound {
                if !v.is_finite() {
                    errors.push(format!("filters.weight_kg.{}: must be a finite number", name));
                }
            }
        }
        if let (Some(min), Some(max)) = (range.min, range.max) {
            if min > max {
                errors.push(format!(
                    "filters.weight_kg: min ({}) is greater than max ({})",
                    min, max
                ));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
