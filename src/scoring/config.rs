use super::criterion::{Criterion, CriterionSet, Direction, DEFAULT_WEIGHT};
use super::error::ScoreError;
use serde::{Deserialize, Serialize};

/// Upper end of the configurable weight scale
pub const MAX_WEIGHT: f64 = 5.0;

/// Granularity offered by the interactive weight prompt
pub const WEIGHT_STEP: f64 = 0.25;

/// A dataset column offered as a criterion, with its display label
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogEntry {
    pub key: &'static str,
    pub label: &'static str,
}

/// Criteria offered by default. Any other numeric or categorical column of
/// the dataset can still be selected by key.
pub const CATALOG: &[CatalogEntry] = &[
    CatalogEntry { key: "wins", label: "Win" },
    CatalogEntry { key: "losses", label: "Lose" },
    CatalogEntry { key: "draws", label: "Draw" },
    CatalogEntry { key: "height_cm", label: "Height (cm)" },
    CatalogEntry { key: "weight_in_kg", label: "Weight (kg)" },
    CatalogEntry {
        key: "significant_striking_accuracy",
        label: "Significant Striking Accuracy (%)",
    },
    CatalogEntry { key: "stance", label: "Stance" },
];

/// Display label for a criterion key, falling back to the key itself
pub fn label_for(key: &str) -> &str {
    CATALOG
        .iter()
        .find(|entry| entry.key == key)
        .map(|entry| entry.label)
        .unwrap_or(key)
}

/// Scoring section of the config file.
///
/// Example YAML:
/// ```yaml
/// scoring:
///   criteria:
///     - { key: wins, direction: benefit, weight: 3 }
///     - { key: losses, direction: cost, weight: 1 }
///     - { key: significant_striking_accuracy, direction: benefit }
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ScoringConfig {
    /// Selected criteria in display order. Weight defaults to 2.5.
    #[serde(default)]
    pub criteria: Vec<Criterion>,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            criteria: vec![
                Criterion::new("wins", Direction::Benefit, DEFAULT_WEIGHT),
                Criterion::new("losses", Direction::Cost, DEFAULT_WEIGHT),
                Criterion::new(
                    "significant_striking_accuracy",
                    Direction::Benefit,
                    DEFAULT_WEIGHT,
                ),
            ],
        }
    }
}

impl ScoringConfig {
    /// Freeze the selection into the value the engine scores with
    pub fn to_criterion_set(&self) -> Result<CriterionSet, ScoreError> {
        CriterionSet::new(self.criteria.clone())
    }
}
