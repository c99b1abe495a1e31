use super::error::ScoreError;
use crate::dataset::{AttrValue, Entity};
use std::collections::BTreeSet;

/// Per-run codes for a categorical criterion.
///
/// Distinct labels observed in the current entity set are sorted lexically
/// and numbered 0..k-1. The mapping depends only on which labels are present,
/// never on row order, and is rebuilt on every run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryCodes {
    labels: Vec<String>,
}

impl CategoryCodes {
    pub fn observe<'a>(labels: impl IntoIterator<Item = &'a str>) -> Self {
        let distinct: BTreeSet<&str> = labels.into_iter().collect();
        Self {
            labels: distinct.into_iter().map(str::to_string).collect(),
        }
    }

    pub fn code(&self, label: &str) -> Option<usize> {
        self.labels
            .binary_search_by(|probe| probe.as_str().cmp(label))
            .ok()
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// Numeric values of one criterion across the entity set, in entity order.
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedColumn {
    pub key: String,
    pub values: Vec<f64>,
    pub codes: CategoryCodes,
}

/// Turn one attribute into plain numbers for scoring.
///
/// Absent and missing cells (and NaN) become 0, categories become their code.
/// In a categorical column that makes a missing cell indistinguishable from the
/// lexically first label, which also encodes to 0.
/// Negative or infinite numbers cannot be raised to a fractional power and are
/// rejected.
pub fn encode_column<E: Entity>(entities: &[E], key: &str) -> Result<EncodedColumn, ScoreError> {
    let codes = CategoryCodes::observe(
        entities
            .iter()
            .filter_map(|e| e.attribute(key))
            .filter_map(AttrValue::as_category),
    );

    let mut values = Vec::with_capacity(entities.len());
    for entity in entities {
        let value = match entity.attribute(key) {
            None | Some(AttrValue::Missing) => 0.0,
            Some(AttrValue::Number(n)) if n.is_nan() => 0.0,
            Some(AttrValue::Number(n)) => {
                if !n.is_finite() || *n < 0.0 {
                    return Err(ScoreError::InvalidValue {
                        entity: entity.name().to_string(),
                        key: key.to_string(),
                        value: *n,
                    });
                }
                *n
            }
            // observe() saw every category in this column, so the lookup hits
            Some(AttrValue::Category(label)) => codes.code(label).unwrap_or_default() as f64,
        };
        values.push(value);
    }

    Ok(EncodedColumn {
        key: key.to_string(),
        values,
        codes,
    })
}
