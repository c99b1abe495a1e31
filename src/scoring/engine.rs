use super::criterion::CriterionSet;
use super::encoding::{encode_column, EncodedColumn};
use super::error::ScoreError;
use crate::dataset::{AttrValue, Entity};
use serde::Serialize;
use tracing::debug;

/// Added to every value before exponentiation so a zero value never meets a
/// fractional or negative exponent. It shifts every score slightly and is
/// part of the scoring contract.
pub const EPSILON: f64 = 1e-9;

/// How one criterion fed into an entity's preference
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CriterionTerm {
    pub key: String,
    /// Value as stored on the entity
    pub raw: AttrValue,
    /// Value actually scored (after missing-fill and category coding)
    pub value: f64,
    /// sign * normalized weight
    pub exponent: f64,
}

impl CriterionTerm {
    /// `(value + EPSILON) ^ exponent`
    pub fn factor(&self) -> f64 {
        (self.value + EPSILON).powf(self.exponent)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    /// ln S(e), the log of the unnormalized weighted product
    pub log_preference: f64,
    pub terms: Vec<CriterionTerm>,
}

impl ScoreBreakdown {
    /// S(e) itself. Can overflow or underflow for extreme inputs even when
    /// the normalized score is fine.
    pub fn preference(&self) -> f64 {
        self.log_preference.exp()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreResult {
    /// Index of the entity in the input slice
    pub position: usize,
    pub name: String,
    /// V(e): share of the total preference, all scores of a run sum to 1
    pub score: f64,
    pub breakdown: ScoreBreakdown,
}

impl ScoreResult {
    /// Raw value of a selected criterion, for display
    pub fn raw(&self, key: &str) -> Option<&AttrValue> {
        self.breakdown
            .terms
            .iter()
            .find(|t| t.key == key)
            .map(|t| &t.raw)
    }
}

/// Rank `entities` by the Weighted Product method.
///
/// Each entity gets `S(e) = prod_i (v_i + EPSILON) ^ (sign_i * w_i')` and the
/// final score `V(e) = S(e) / sum(S)`. Results are sorted by score descending;
/// the sort is stable so equal scores keep input order.
///
/// The product is accumulated as a sum of logs and shifted by the largest
/// log-preference before exponentiating, which keeps `V` finite where the
/// direct product would overflow. Individual `V` values can still underflow
/// to 0 when one entity is dominated by hundreds of orders of magnitude.
///
/// Every criterion column is encoded and checked before any entity is
/// scored: an error never comes with a partial ranking.
pub fn rank<E: Entity>(
    entities: &[E],
    criteria: &CriterionSet,
) -> Result<Vec<ScoreResult>, ScoreError> {
    let columns = criteria
        .keys()
        .map(|key| encode_column(entities, key))
        .collect::<Result<Vec<EncodedColumn>, ScoreError>>()?;

    for (criterion, weight) in criteria.criteria().iter().zip(criteria.normalized_weights()) {
        debug!(
            key = %criterion.key,
            direction = %criterion.direction,
            weight = criterion.weight,
            normalized = weight,
            "criterion"
        );
    }
    for column in columns.iter().filter(|c| !c.codes.is_empty()) {
        debug!(key = %column.key, codes = ?column.codes.labels(), "categorical encoding");
    }

    if entities.is_empty() {
        return Ok(Vec::new());
    }

    let log_preferences: Vec<f64> = (0..entities.len())
        .map(|row| {
            columns
                .iter()
                .enumerate()
                .map(|(i, column)| criteria.exponent(i) * (column.values[row] + EPSILON).ln())
                .sum()
        })
        .collect();

    let max_log = log_preferences
        .iter()
        .copied()
        .fold(f64::NEG_INFINITY, f64::max);
    let shifted: Vec<f64> = log_preferences.iter().map(|l| (l - max_log).exp()).collect();
    let total: f64 = shifted.iter().sum();

    let mut results: Vec<ScoreResult> = entities
        .iter()
        .enumerate()
        .map(|(row, entity)| {
            let terms = columns
                .iter()
                .enumerate()
                .map(|(i, column)| CriterionTerm {
                    key: column.key.clone(),
                    raw: entity
                        .attribute(&column.key)
                        .cloned()
                        .unwrap_or(AttrValue::Missing),
                    value: column.values[row],
                    exponent: criteria.exponent(i),
                })
                .collect();

            ScoreResult {
                position: row,
                name: entity.name().to_string(),
                score: shifted[row] / total,
                breakdown: ScoreBreakdown {
                    log_preference: log_preferences[row],
                    terms,
                },
            }
        })
        .collect();

    // sort_by is stable: ties keep input order
    results.sort_by(|a, b| b.score.total_cmp(&a.score));

    debug!(entities = results.len(), "ranked");
    Ok(results)
}
